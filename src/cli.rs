use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "tennis league stats backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the stats API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Fetch players, matches and league games from upstream into cache and database
    Ingest,
    /// Compute leaderboards and league game scores from the database
    Process {
        /// How many leaderboard entries to print
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Drop and recreate every table
    Reset,
}
