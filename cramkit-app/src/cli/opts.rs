use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "cramkit", version, about = "cramkit CLI/TUI: generate and review flashcards")]
pub struct Cli {
    /// Start with an empty store instead of the bundled sample decks
    #[arg(long)]
    pub no_seed: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Deck operations
    #[command(subcommand)]
    Deck(DeckCmd),
    /// Card operations
    #[command(subcommand)]
    Card(CardCmd),
    /// Generate flashcards from a document via a hosted model
    Generate(GenerateCmd),
    /// Interactive review loop
    Review(ReviewCmd),
    /// Review totals, accuracy, and daily streak
    Stats,
    /// Launch the terminal UI
    Tui,
}

#[derive(Debug, Subcommand, Clone)]
pub enum DeckCmd {
    Add {
        name: String,
        #[arg(long)]
        course: String,
    },
    List(DeckList),
    Rm { deck: String },
    Favorite { deck: String },
    Unfavorite { deck: String },
}

#[derive(Debug, Args, Clone)]
pub struct DeckList {
    /// Only decks for this course
    #[arg(long)]
    pub course: Option<String>,
    /// Only decks with unreviewed cards
    #[arg(long)]
    pub new_only: bool,
    /// Free-text search over name and course
    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CardCmd {
    Add(CardAdd),
    List {
        #[arg(long)]
        deck: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    Rm { card_id: String },
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    #[arg(long)]
    pub deck: String,
    #[arg(long)]
    pub front: String,
    #[arg(long)]
    pub back: String,
    /// Difficulty 1-5
    #[arg(long, default_value_t = 3)]
    pub difficulty: u8,
}

#[derive(Debug, Args, Clone)]
pub struct GenerateCmd {
    /// Document to turn into flashcards (pdf, docx, txt, images, ...)
    #[arg(long)]
    pub file: PathBuf,

    /// Subject the cards are for; guessed from the file name when omitted
    #[arg(long)]
    pub subject: Option<String>,

    /// Store the generated cards into this deck (by name or id)
    #[arg(long)]
    pub deck: Option<String>,

    /// Print the drafts as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Hosted model API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, default_value = cramkit_gen::config::DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = cramkit_gen::config::DEFAULT_CHAT_MODEL)]
    pub model: String,

    #[arg(long, default_value = cramkit_gen::config::DEFAULT_VISION_MODEL)]
    pub vision_model: String,
}

#[derive(Debug, Args, Clone)]
pub struct ReviewCmd {
    /// Deck to review (by name or id); defaults to the first deck
    #[arg(long)]
    pub deck: Option<String>,
    /// Cap on cards per session
    #[arg(long, default_value_t = 50)]
    pub max: usize,
}
