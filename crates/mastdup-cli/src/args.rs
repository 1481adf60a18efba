use clap::{Args, Parser, Subcommand};

/// CLI arguments for mastdup
#[derive(Debug, Parser)]
#[command(
    name = "mastdup",
    version,
    about = "Check the MAST archive for existing or planned observations of your targets"
)]
pub struct CliArgs {
    /// JSON config file (endpoint, page size, timeout, status URL template)
    #[arg(long = "config", global = true)]
    pub config: Option<String>,

    /// Override the MAST invoke endpoint
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Restrict to an observation collection (repeatable, e.g. -c JWST -c HST)
    #[arg(short = 'c', long = "collection", global = true)]
    pub collections: Vec<String>,

    /// More log output (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// How to read a target CSV file.
#[derive(Debug, Clone, Args)]
pub struct TargetFileArgs {
    /// `name` (one identifier per row) or `coord` (RA/Dec per row)
    #[arg(short = 'm', long = "mode", default_value = "name")]
    pub mode: String,

    /// Column holding target names (default: first column)
    #[arg(long = "name-col")]
    pub name_col: Option<String>,

    /// Column holding RA (default: first column)
    #[arg(long = "ra-col")]
    pub ra_col: Option<String>,

    /// Column holding Dec (default: second column)
    #[arg(long = "dec-col")]
    pub dec_col: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Cone radius, e.g. `0.2`, `30arcsec`, `1 arcmin` (default 0.2 deg)
    #[arg(short = 'r', long = "radius")]
    pub radius: Option<String>,

    /// Restrict fetched records to a data-product type (repeatable, e.g. image)
    #[arg(short = 't', long = "product-type")]
    pub product_types: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a target file and print what was read
    Targets {
        /// CSV file with a header row
        file: String,
        #[command(flatten)]
        file_args: TargetFileArgs,
    },

    /// Count archive records per target
    Count {
        /// Target names to count
        names: Vec<String>,
        /// Read targets from a CSV file as well
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
        #[command(flatten)]
        file_args: TargetFileArgs,
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Fetch and print observation records for one name, position or box
    Search {
        /// Target name resolved by the archive
        name: Option<String>,
        /// Right ascension (degrees or hh:mm:ss)
        #[arg(long = "ra", requires = "dec", conflicts_with = "name", allow_hyphen_values = true)]
        ra: Option<String>,
        /// Declination (degrees or dd:mm:ss)
        #[arg(long = "dec", requires = "ra", allow_hyphen_values = true)]
        dec: Option<String>,
        /// RA/Dec box in degrees: RA_MIN RA_MAX DEC_MIN DEC_MAX
        #[arg(
            long = "box",
            num_args = 4,
            value_names = ["RA_MIN", "RA_MAX", "DEC_MIN", "DEC_MAX"],
            allow_negative_numbers = true,
            conflicts_with_all = ["name", "ra"]
        )]
        region: Option<Vec<f64>>,
        #[command(flatten)]
        query: QueryArgs,
        /// Save the records (.json, .json.gz, .bin, .bin.gz)
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
        /// Comma-separated columns to print
        #[arg(long = "columns", value_delimiter = ',')]
        columns: Vec<String>,
    },

    /// Count every target in a file, then fetch records for those with matches
    Check {
        /// CSV file with a header row
        file: String,
        #[command(flatten)]
        file_args: TargetFileArgs,
        #[command(flatten)]
        query: QueryArgs,
        /// Save the fetched records (.json, .json.gz, .bin, .bin.gz)
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },

    /// Print a saved result table
    Show {
        /// Table written by `search --output` or `check --output`
        file: String,
        /// Comma-separated columns to print
        #[arg(long = "columns", value_delimiter = ',')]
        columns: Vec<String>,
    },

    /// Print program status page links
    StatusUrl {
        /// Proposal / program ids
        #[arg(required = true)]
        ids: Vec<String>,
        /// Template with a {proposal_id} placeholder
        #[arg(long = "template")]
        template: Option<String>,
    },
}
