mod commands;
mod config;
mod prompt;
mod render;

use std::env;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use api::ApiClient;

use crate::config::ConfigStore;

#[derive(Parser)]
#[command(
    name = "wts",
    about = "CLI for managing webtoon vocabulary series, chapters, cards, and study sessions",
    version
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Show debug info
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive review sessions
    #[command(subcommand)]
    Study(StudyCommand),

    /// Browse and manage series
    #[command(subcommand)]
    Series(SeriesCommand),

    /// Manage chapters within a series
    #[command(subcommand)]
    Chapter(ChapterCommand),

    /// Manage vocabulary cards
    #[command(subcommand)]
    Card(CardCommand),

    /// Manage shared decks and metadata
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Manage users for development and testing
    #[command(subcommand)]
    User(UserCommand),

    /// Manage CLI configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Authenticate and store a session token
    Login {
        /// Account username
        username: String,
    },

    /// Clear the stored session token
    Logout,

    /// Development and seed utilities (guarded by --allow-dev)
    #[command(subcommand)]
    Dev(DevCommand),
}

#[derive(Subcommand)]
enum StudyCommand {
    /// Review the cards due in a deck
    Start {
        /// Deck to study
        deck_id: String,
        /// User id (prompted when omitted)
        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(Subcommand)]
enum SeriesCommand {
    /// List all series
    List,

    /// Create a new series
    Create {
        /// Series title
        title: String,
    },

    /// Search series by title
    Search {
        /// Title substring to match
        query: String,
    },
}

#[derive(Subcommand)]
enum ChapterCommand {
    /// Add a chapter to a series
    Add {
        /// Series name
        series_name: String,
        /// Chapter number
        number: u32,
    },

    /// List the chapters of a series
    List {
        /// Series id
        series_id: String,
    },
}

#[derive(Subcommand)]
enum CardCommand {
    /// Add a card to a chapter
    Add {
        /// Chapter id
        chapter_id: String,
        /// Prompt word (prompted when omitted)
        #[arg(long)]
        word: Option<String>,
        /// Definition text (prompted when omitted)
        #[arg(long)]
        definition: Option<String>,
    },

    /// Edit a card's word and/or definition
    Edit {
        /// Card id
        card_id: String,
        /// New prompt word
        #[arg(long)]
        word: Option<String>,
        /// New definition text
        #[arg(long)]
        definition: Option<String>,
    },

    /// Delete a card
    Delete {
        /// Card id
        card_id: String,
    },

    /// List the cards of a chapter
    List {
        /// Chapter id
        chapter_id: String,
    },
}

#[derive(Subcommand)]
enum DeckCommand {
    /// View all available decks
    List,

    /// Create a deck from a chapter
    Create {
        /// Series name
        #[arg(long)]
        series: String,
        /// Chapter number
        #[arg(long)]
        chapter: u32,
        /// Maximum number of cards
        #[arg(long)]
        max_length: Option<u32>,
    },

    /// Show a deck and its cards
    Preview {
        /// Deck id
        deck_id: String,
    },

    /// View all data for a deck (alias for preview)
    View {
        /// Deck id
        deck_id: String,
    },

    /// Show the cards due or overdue for review in a deck
    Due {
        /// Deck id
        deck_id: String,
    },

    /// Apply a quality badge to a deck
    Feature {
        /// Deck id
        deck_id: String,
        /// Badge type (beginner-friendly, editor-choice, verified)
        #[arg(long)]
        badge: Option<String>,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Create a new user
    Create {
        /// Username
        username: String,
        /// Create as guest
        #[arg(long)]
        guest: bool,
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Avatar URL (prompted when omitted)
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Simulate login as a specific user
    Login {
        /// Username
        username: String,
    },

    /// Show a user's deck history, streak, and most studied series
    Progress {
        /// User id
        user_id: String,
    },

    /// Wipe a user's progress
    Reset {
        /// User id
        user_id: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Store a configuration value
    Set {
        /// Key, e.g. baseUrl or userId
        key: String,
        /// Value to store
        value: String,
    },

    /// Read a configuration value
    Get {
        /// Key to read
        key: String,
    },
}

#[derive(Subcommand)]
enum DevCommand {
    /// Seed the backend with test users, series, and sample decks
    Seed {
        /// Confirm running against shared backend state
        #[arg(long)]
        allow_dev: bool,
    },

    /// Wipe all content and reseed clean
    Reset {
        /// Confirm running against shared backend state
        #[arg(long)]
        allow_dev: bool,
    },

    /// Export the current content set
    Export {
        /// Confirm running against shared backend state
        #[arg(long)]
        allow_dev: bool,
    },

    /// Watch the upload area for new decks
    Watch {
        /// Confirm running against shared backend state
        #[arg(long)]
        allow_dev: bool,
    },

    /// Lock a chapter until its prerequisites are met
    LockChapter {
        /// Series id
        series_id: String,
        /// Chapter number
        number: u32,
    },

    /// Force-unlock a chapter
    UnlockChapter {
        /// Series id
        series_id: String,
        /// Chapter number
        number: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let debug = cli.debug;
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            render::print_error(&err, debug);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default)).init();
}

/// Build the API client from stored settings. `WTS_API_URL` overrides the
/// configured base URL for one invocation.
fn connect(store: &ConfigStore) -> Result<ApiClient> {
    let settings = store.load();
    let base_url = config::effective_base_url(&settings, env::var("WTS_API_URL").ok());
    Ok(ApiClient::new(&base_url, store.session_token())?)
}

/// Dispatch one parsed invocation. Config and logout run without a client so
/// a broken stored base URL can still be repaired.
async fn run(cli: Cli) -> Result<()> {
    let Cli {
        json,
        debug,
        command,
    } = cli;
    let store = ConfigStore::from_home()?;

    match command {
        Command::Study(StudyCommand::Start { deck_id, user }) => {
            let client = connect(&store)?;
            commands::study::start(client, deck_id, user, debug).await
        }

        Command::Series(sub) => {
            let client = connect(&store)?;
            match sub {
                SeriesCommand::List => commands::series::list(&client, json).await,
                SeriesCommand::Create { title } => {
                    commands::series::create(&client, &title, json).await
                }
                SeriesCommand::Search { query } => {
                    commands::series::search(&client, &query, json).await
                }
            }
        }

        Command::Chapter(sub) => {
            let client = connect(&store)?;
            match sub {
                ChapterCommand::Add {
                    series_name,
                    number,
                } => commands::chapter::add(&client, &series_name, number, json).await,
                ChapterCommand::List { series_id } => {
                    commands::chapter::list(&client, &series_id, json).await
                }
            }
        }

        Command::Card(sub) => {
            let client = connect(&store)?;
            match sub {
                CardCommand::Add {
                    chapter_id,
                    word,
                    definition,
                } => commands::card::add(&client, &chapter_id, word, definition, json).await,
                CardCommand::Edit {
                    card_id,
                    word,
                    definition,
                } => {
                    commands::card::edit(
                        &client,
                        &card_id,
                        word.as_deref(),
                        definition.as_deref(),
                        json,
                    )
                    .await
                }
                CardCommand::Delete { card_id } => commands::card::delete(&client, &card_id).await,
                CardCommand::List { chapter_id } => {
                    commands::card::list(&client, &chapter_id, json).await
                }
            }
        }

        Command::Deck(sub) => {
            let client = connect(&store)?;
            match sub {
                DeckCommand::List => commands::deck::list(&client, json).await,
                DeckCommand::Create {
                    series,
                    chapter,
                    max_length,
                } => {
                    let settings = store.load();
                    commands::deck::create(&client, &settings, &series, chapter, max_length, json)
                        .await
                }
                DeckCommand::Preview { deck_id } | DeckCommand::View { deck_id } => {
                    commands::deck::preview(&client, &deck_id, json).await
                }
                DeckCommand::Due { deck_id } => commands::deck::due(&client, &deck_id, json).await,
                DeckCommand::Feature { deck_id, badge } => {
                    commands::deck::feature(&client, &deck_id, badge.as_deref(), json).await
                }
            }
        }

        Command::User(sub) => {
            let client = connect(&store)?;
            match sub {
                UserCommand::Create {
                    username,
                    guest,
                    email,
                    password,
                    avatar,
                } => {
                    commands::user::create(&client, &username, guest, email, password, avatar, json)
                        .await
                }
                UserCommand::Login { username } => {
                    commands::user::login(&client, &username).await
                }
                UserCommand::Progress { user_id } => {
                    commands::user::progress(&client, &user_id, json).await
                }
                UserCommand::Reset { user_id } => commands::user::reset(&client, &user_id).await,
            }
        }

        Command::Config(sub) => match sub {
            ConfigCommand::Set { key, value } => commands::config::set(&store, &key, &value),
            ConfigCommand::Get { key } => commands::config::get(&store, &key),
        },

        Command::Login { username } => {
            let client = connect(&store)?;
            commands::auth::login(&client, &store, &username).await
        }

        Command::Logout => commands::auth::logout(&store),

        Command::Dev(sub) => {
            let client = connect(&store)?;
            match sub {
                DevCommand::Seed { allow_dev } => commands::dev::seed(&client, allow_dev).await,
                DevCommand::Reset { allow_dev } => commands::dev::reset(&client, allow_dev).await,
                DevCommand::Export { allow_dev } => commands::dev::export(&client, allow_dev).await,
                DevCommand::Watch { allow_dev } => commands::dev::watch(&client, allow_dev).await,
                DevCommand::LockChapter { series_id, number } => {
                    commands::dev::lock_chapter(&client, &series_id, number).await
                }
                DevCommand::UnlockChapter { series_id, number } => {
                    commands::dev::unlock_chapter(&client, &series_id, number).await
                }
            }
        }
    }
}
