use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "AI Arena ratings backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Populate the ledger with a fixed schedule of demo games
    Seed,
    /// Reset every rating to the default and clear the game log and history
    Reset,
}
