use clap::{Parser, Subcommand};

/// Keeps the rosters of members (padrón) of a set of operators, and records who voted.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the list of operators, the data directory
    /// and the column markers. Without it, the operators are usuario1 to usuario5.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory, optional) Where the rosters are stored. Overrides the directory of
    /// the configuration file.
    #[clap(short, long, value_parser)]
    pub data_dir: Option<String>,

    /// The operator whose roster is used. Required by all the commands except `operators`.
    #[clap(short, long, value_parser)]
    pub operator: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Lists the operators.
    Operators,
    /// Replaces the roster with the content of an Excel (.xlsx, .xls) or CSV file.
    Import {
        #[clap(value_parser)]
        input: String,
    },
    /// Shows the members, with the vote counts.
    List {
        /// Only shows the members whose name or national ID contains this text.
        #[clap(short, long, value_parser)]
        search: Option<String>,
    },
    /// Records the vote of a member.
    Vote {
        #[clap(value_parser)]
        id: u64,
    },
    /// Removes a member from the roster.
    Delete {
        #[clap(value_parser)]
        id: u64,
    },
    /// Adds a member to the roster.
    Add {
        #[clap(long, value_parser)]
        surname: String,
        #[clap(long, value_parser)]
        first_name: String,
        #[clap(long, value_parser)]
        national_id: String,
    },
    /// Writes the roster and the vote counts to a CSV file.
    Export {
        /// (file path, default padron_<operator>.csv)
        #[clap(long, value_parser)]
        out: Option<String>,
    },
}
