use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
pub enum StoreKind {
    Json,
    Sqlite,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ActionArg {
    Add,
    Study,
    Quiz,
}

#[derive(Debug, Parser, Clone)]
#[command(name = "flashdeck", version, about = "Flashdeck flashcards: study, quiz, and manage cards")]
pub struct Cli {
    /// Storage backend
    #[arg(long, value_enum, default_value_t = StoreKind::Json)]
    pub store: StoreKind,

    /// Data directory (defaults to the platform data dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// SQLite DB path when --store sqlite (defaults to <data dir>/flashdeck.sqlite3)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Storage slot holding the card list
    #[arg(long, default_value = flashdeck_core::DEFAULT_CARDS_KEY)]
    pub key: String,

    /// Timestamped backups kept per slot (JSON store)
    #[arg(long, default_value_t = flashdeck_json::DEFAULT_MAX_BACKUPS)]
    pub max_backups: usize,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Card operations
    #[command(subcommand)]
    Card(CardCmd),
    /// Self-assessed study run over all cards
    Study,
    /// Multiple-choice quiz over all cards
    Quiz,
    /// Export cards
    #[command(subcommand)]
    Export(ExportCmd),
    /// Import cards
    #[command(subcommand)]
    Import(ImportCmd),
    /// Launch Terminal UI
    Tui(TuiCmd),
    /// Report storage health
    Doctor,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CardCmd {
    Add(CardAdd),
    List,
    Edit(CardEdit),
    Rm { card_id: i64 },
    /// Delete every card
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    #[arg(long)]
    pub front: String,
    #[arg(long)]
    pub back: String,
}

#[derive(Debug, Args, Clone)]
pub struct CardEdit {
    pub card_id: i64,
    #[arg(long)]
    pub front: Option<String>,
    #[arg(long)]
    pub back: Option<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ExportCmd {
    Json { path: PathBuf },
    Csv { path: PathBuf },
}

#[derive(Debug, Subcommand, Clone)]
pub enum ImportCmd {
    Json { path: PathBuf },
    Csv { path: PathBuf },
}

#[derive(Debug, Args, Clone)]
pub struct TuiCmd {
    /// Screen to open on launch
    #[arg(long, value_enum)]
    pub action: Option<ActionArg>,

    /// Launch query string, e.g. "?action=quiz"
    #[arg(long, conflicts_with = "action")]
    pub query: Option<String>,
}
