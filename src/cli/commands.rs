use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mn", about = concat!("@ mention v", env!("CARGO_PKG_VERSION"), " - mention autocomplete for plain text"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// User directory file (JSON array of users)
    #[arg(short = 'u', long = "users", global = true, default_value = "users.json")]
    pub users: String,

    /// Config file
    #[arg(short = 'c', long = "config", global = true, default_value = "mention.toml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the word under the caret and whether it starts a mention
    Locate(LocateArgs),
    /// Rank the user directory against a query
    Rank(RankArgs),
    /// Complete the mention under the caret and print the result
    Complete(CompleteArgs),
    /// List the user directory
    Users,
    /// View or edit the config file
    Config(ConfigCmd),
}

#[derive(Args)]
pub struct LocateArgs {
    /// Text to inspect
    pub text: String,
    /// Caret byte offset (default: end of text)
    #[arg(long)]
    pub caret: Option<usize>,
}

#[derive(Args)]
pub struct RankArgs {
    /// Search text without the trigger (empty: browse)
    #[arg(default_value = "")]
    pub query: String,
}

#[derive(Args)]
pub struct CompleteArgs {
    /// Text containing the mention being typed
    pub text: String,
    /// Caret byte offset (default: end of text)
    #[arg(long)]
    pub caret: Option<usize>,
    /// Move the selection down this many times before committing
    #[arg(long, default_value_t = 0)]
    pub next: usize,
    /// Move the selection up this many times before committing
    #[arg(long, default_value_t = 0)]
    pub prev: usize,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective config
    Show,
    /// Set a key, e.g. `complete.min_similarity 0.4`
    Set {
        key: String,
        value: String,
    },
}
