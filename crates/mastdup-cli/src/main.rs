//! mastdup: check the MAST archive before proposing observations
//!
//! This binary wraps `mastdup-core`: it reads a CSV target list, asks the
//! archive how many observation records exist for each target, fetches the
//! records for targets that have any, and prints or saves them.
//!
//! Usage examples
//! --------------
//!
//! - Show what a target file contains
//!   $ mastdup targets targets.csv
//!   $ mastdup targets pointings.csv --mode coord --ra-col ra --dec-col dec
//!
//! - Count JWST records for a couple of names
//!   $ mastdup -c JWST count "NGC 1275" M87
//!
//! - Full duplicate check, saving every fetched record
//!   $ mastdup -c JWST check targets.csv --radius 30arcsec -o matches.json.gz
//!
//! - One-off searches
//!   $ mastdup search M31 -t image
//!   $ mastdup search --ra 05:35:17.3 --dec -05:23:28 --radius 2arcmin
//!   $ mastdup search --box 10 11 40 42
//!
//! - Revisit a saved table, or get program status links
//!   $ mastdup show matches.json.gz --columns target_name,proposal_id
//!   $ mastdup status-url 1234 2345
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for more detail.
mod args;

use crate::args::{CliArgs, Commands, QueryArgs, TargetFileArgs};
use anyhow::{bail, Context};
use clap::Parser;
use mastdup_core::model::OBSERVATION_COLUMNS;
use mastdup_core::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn,mastdup=info,mastdup_core=info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &CliArgs) -> anyhow::Result<ArchiveConfig> {
    let mut config = match &args.config {
        Some(path) => ArchiveConfig::from_path(path)
            .with_context(|| format!("reading config file {path}"))?,
        None => ArchiveConfig::default(),
    };
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    Ok(config)
}

fn load_list(file: &str, opts: &TargetFileArgs) -> anyhow::Result<TargetList> {
    let mode: LoadMode = opts.mode.parse()?;
    let mut columns = ColumnSelection::new();
    if let Some(c) = &opts.name_col {
        columns = columns.with_name(c.as_str());
    }
    if let Some(c) = &opts.ra_col {
        columns = columns.with_ra(c.as_str());
    }
    if let Some(c) = &opts.dec_col {
        columns = columns.with_dec(c.as_str());
    }
    let list = load_targets(file, mode, &columns).with_context(|| format!("loading {file}"))?;
    info!(file, mode = %mode, rows = list.len(), "loaded target list");
    Ok(list)
}

fn query_options(
    config: &ArchiveConfig,
    collections: &[String],
    query: &QueryArgs,
) -> anyhow::Result<QueryOptions> {
    let mut options = QueryOptions::default()
        .with_collections(config.collections_or_default(collections))
        .with_product_types(query.product_types.iter().map(String::as_str));
    if let Some(r) = &query.radius {
        options = options.with_radius(parse_radius(r)?);
    }
    Ok(options)
}

/// Requested display columns; unknown names are rejected up front.
fn display_columns(requested: &[String]) -> anyhow::Result<Vec<&str>> {
    if requested.is_empty() {
        return Ok(DEFAULT_DISPLAY_COLUMNS.to_vec());
    }
    let mut out = Vec::with_capacity(requested.len());
    for name in requested {
        let name = name.trim();
        if !OBSERVATION_COLUMNS.iter().any(|(c, _)| *c == name) {
            let known: Vec<&str> = OBSERVATION_COLUMNS.iter().map(|(c, _)| *c).collect();
            bail!("unknown column `{name}` (known: {})", known.join(", "));
        }
        out.push(name);
    }
    Ok(out)
}

#[cfg(feature = "client")]
fn connect(config: &ArchiveConfig) -> anyhow::Result<MastClient> {
    Ok(MastClient::new(config.clone())?)
}

/// Stand-in archive for builds without the HTTP client; never constructed.
#[cfg(not(feature = "client"))]
enum NoClient {}

#[cfg(not(feature = "client"))]
impl ArchiveQuery for NoClient {
    fn count_matches(&self, _: &Search, _: &QueryOptions) -> Result<u64> {
        match *self {}
    }

    fn fetch_matches(&self, _: &Search, _: &QueryOptions) -> Result<Vec<ObservationRecord>> {
        match *self {}
    }
}

#[cfg(not(feature = "client"))]
fn connect(_: &ArchiveConfig) -> anyhow::Result<NoClient> {
    bail!("this build has no archive client; rebuild mastdup with `--features client`")
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);
    let config = load_config(&args)?;

    match &args.command {
        Commands::Targets { file, file_args } => match load_list(file, file_args)? {
            TargetList::Names(names) => {
                println!("{} target name(s):", names.len());
                for (i, name) in names.iter().enumerate() {
                    println!("  {:>3}  {name}", i + 1);
                }
            }
            TargetList::Coords(coords) => {
                println!("{} coordinate pair(s):", coords.len());
                for (i, coord) in coords.iter().enumerate() {
                    match coord.to_sky() {
                        Ok(sky) => println!("  {:>3}  {}  ->  {sky}", i + 1, coord.identifier()),
                        Err(e) => println!("  {:>3}  {}  ->  {e}", i + 1, coord.identifier()),
                    }
                }
            }
        },

        Commands::Count {
            names,
            file,
            file_args,
            query,
        } => {
            let mut targets: Vec<TargetInput> = names.iter().map(TargetInput::named).collect();
            if let Some(file) = file {
                targets.extend(TargetInput::from_list(&load_list(file, file_args)?)?);
            }
            if targets.is_empty() {
                bail!("nothing to count: give target names or --file <targets.csv>");
            }
            let options = query_options(&config, &args.collections, query)?;
            let archive = connect(&config)?;
            let counts = count_targets(&archive, &targets, &options)?;
            print!("{}", render_counts(&counts));
        }

        Commands::Search {
            name,
            ra,
            dec,
            region,
            query,
            output,
            columns,
        } => {
            let search = match (name, ra, dec, region) {
                (Some(name), _, _, _) => Search::Name(name.clone()),
                (_, Some(ra), Some(dec), _) => Search::Position(SkyCoord::parse(ra, dec)?),
                (_, _, _, Some(b)) if b.len() == 4 => {
                    Search::Region(SkyBox::new(b[0], b[1], b[2], b[3])?)
                }
                _ => bail!("give a target name, --ra/--dec, or --box RA_MIN RA_MAX DEC_MIN DEC_MAX"),
            };
            let columns = display_columns(columns)?;
            let options = query_options(&config, &args.collections, query)?;
            let archive = connect(&config)?;

            let records = archive.fetch_matches(&search, &options)?;
            info!(query = %search, rows = records.len(), "search finished");
            print!("{}", render_table(&records, &columns, DEFAULT_MAX_CELL_WIDTH));

            if let Some(path) = output {
                ResultTable::new(records)
                    .with_meta("query", search.to_string())
                    .with_meta("collections", options.collections.join(","))
                    .with_meta("product_types", options.product_types.join(","))
                    .with_meta("radius_deg", options.radius().to_string())
                    .save(path)
                    .with_context(|| format!("saving {path}"))?;
                println!("saved to {path}");
            }
        }

        Commands::Check {
            file,
            file_args,
            query,
            output,
        } => {
            let targets = TargetInput::from_list(&load_list(file, file_args)?)?;
            let options = query_options(&config, &args.collections, query)?;
            let archive = connect(&config)?;

            let check = check_targets(&archive, &targets, &options)?;
            print!("{}", render_counts(&check.counts));

            let records: Vec<ObservationRecord> = check.records().cloned().collect();
            if !records.is_empty() {
                println!();
                print!(
                    "{}",
                    render_table(&records, DEFAULT_DISPLAY_COLUMNS, DEFAULT_MAX_CELL_WIDTH)
                );

                let template = StatusUrlTemplate::from_config(&config)?;
                println!();
                println!("Program status:");
                for (id, url) in unique_status_urls(&records, &template) {
                    println!("  {id:>6}  {url}");
                }
            }

            let summary = check.summary();
            println!();
            println!(
                "{} target(s), {} with matches, {} record(s), {} planned",
                summary.targets, summary.targets_with_matches, summary.total_matches, summary.planned
            );

            if let Some(path) = output {
                ResultTable::from_check(&check, &options)
                    .save(path)
                    .with_context(|| format!("saving {path}"))?;
                println!("saved to {path}");
            }
        }

        Commands::Show { file, columns } => {
            let columns = display_columns(columns)?;
            let table = ResultTable::load(file).with_context(|| format!("reading {file}"))?;
            for (key, value) in table.meta.iter() {
                println!("# {key}: {value}");
            }
            print!(
                "{}",
                render_table(&table.rows, &columns, DEFAULT_MAX_CELL_WIDTH)
            );
        }

        Commands::StatusUrl { ids, template } => {
            let template = match template {
                Some(t) => StatusUrlTemplate::new(t.as_str())?,
                None => StatusUrlTemplate::from_config(&config)?,
            };
            for id in ids {
                println!("{}", template.build(id));
            }
        }
    }

    Ok(())
}
