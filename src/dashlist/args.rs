use clap::{Parser, Subcommand};
use dashlist::model::EntityKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dashlist")]
#[command(about = "Browse and edit dashboard collections from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the collection files and config.json (default: $DASHLIST_DATA)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a collection, one page at a time
    #[command(alias = "ls")]
    List {
        /// users, content, blogs or employees
        kind: EntityKind,

        /// Free-text search over the collection's search fields
        #[arg(short, long)]
        search: Option<String>,

        /// Filter criterion (e.g. role=admin, genre~action, createdAt@1w); repeatable
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Only users who logged in recently
        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        /// Only users who did not log in recently
        #[arg(long)]
        inactive: bool,

        /// Sort key (e.g. name, -createdAt, email:desc)
        #[arg(long)]
        sort: Option<String>,

        /// Page number, starting at 1
        #[arg(short, long)]
        page: Option<usize>,

        /// Page size (must be one of the configured sizes)
        #[arg(short = 'n', long)]
        page_size: Option<usize>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show records in full
    #[command(alias = "v")]
    View {
        kind: EntityKind,

        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Create a record from a JSON object
    #[command(alias = "n")]
    Create {
        kind: EntityKind,

        /// Fields as a JSON object, e.g. '{"name": "Ada"}'
        fields: String,
    },

    /// Merge a JSON object into a record
    #[command(alias = "e")]
    Update {
        kind: EntityKind,
        id: String,
        patch: String,
    },

    /// Delete one or more records
    #[command(alias = "rm")]
    Delete {
        kind: EntityKind,

        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Store a file in the uploads area
    Upload { file: PathBuf },

    /// Distinct values of a field, for building filters
    Facets { kind: EntityKind, field: String },

    /// Get or set configuration
    Config {
        /// Configuration key (page-size, page-sizes, active-window)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
