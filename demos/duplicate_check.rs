//! Duplicate-check walkthrough for mastdup-rs
//!
//! Loads a target list, counts archive records per target, fetches the
//! records for targets that have any, prints them with status-page links and
//! saves them as a result table.
//!
//! This example talks to the live MAST service:
//!
//! ```text
//! cargo run --example duplicate_check
//! cargo run --example duplicate_check -- my_targets.csv HST
//! ```

use mastdup_core::prelude::*;
use std::time::Instant;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let file = args.next().unwrap_or_else(|| {
        concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/targets.csv").to_string()
    });
    let collection = args.next().unwrap_or_else(|| "JWST".to_string());

    println!("=== mastdup duplicate check ===\n");

    // 1. Read the target list. The first column holds the names; the
    //    `priority` and `notes` columns are ignored.
    let start = Instant::now();
    let list = load_targets(&file, LoadMode::Name, &ColumnSelection::new().with_name("target"))?;
    println!("Loaded {} target(s) from {file} in {:?}", list.len(), start.elapsed());
    if let Some(names) = list.names() {
        for name in names {
            println!("  - {name}");
        }
    }
    println!();

    // 2. Count, then fetch only where the count is positive.
    let client = MastClient::new(ArchiveConfig::default())?;
    let options = QueryOptions::default()
        .with_collections([collection.as_str()])
        .with_radius(parse_radius("1 arcmin")?);
    let targets = TargetInput::from_list(&list)?;

    let start = Instant::now();
    let check = check_targets(&client, &targets, &options)?;
    println!("{collection} records per target ({:?}):", start.elapsed());
    print!("{}", render_counts(&check.counts));
    println!();

    // 3. Show what is already there, planned observations included.
    let records: Vec<ObservationRecord> = check.records().cloned().collect();
    print!(
        "{}",
        render_table(&records, DEFAULT_DISPLAY_COLUMNS, DEFAULT_MAX_CELL_WIDTH)
    );
    let summary = check.summary();
    println!(
        "\n{} of {} target(s) already observed or planned ({} planned record(s))\n",
        summary.targets_with_matches, summary.targets, summary.planned
    );

    // 4. Status pages for every program involved.
    let template = StatusUrlTemplate::default();
    for (id, url) in unique_status_urls(&records, &template) {
        println!("  program {id}: {url}");
    }

    // 5. Keep the result for later (`mastdup show duplicate_check.json.gz`).
    let out = std::env::temp_dir().join("duplicate_check.json.gz");
    ResultTable::from_check(&check, &options).save(&out)?;
    let back = ResultTable::load(&out)?;
    println!("\nSaved {} record(s) to {}", back.len(), out.display());

    Ok(())
}
