use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use inspira_core::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_PAGE_SIZE, FavoriteTarget, ModelPurpose, Platform, SearchMode,
};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod images;

#[derive(Parser)]
#[command(name = "inspira")]
#[command(about = "Design inspiration library with tag search and Gemini-powered AI search", long_about = None)]
struct Cli {
    /// PostgreSQL URL; overrides INSPIRA_DATABASE_URL. Without one, records live in memory.
    #[arg(long, global = true)]
    database_url: Option<String>,
    /// Taxonomy JSON file; overrides INSPIRA_TAXONOMY_PATH.
    #[arg(long, global = true)]
    taxonomy: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Manage screens
    #[command(subcommand)]
    Screen(ScreenCommand),
    /// Manage favorites
    #[command(subcommand)]
    Favorite(FavoriteCommand),
    /// Manage Gemini model configurations
    #[command(subcommand)]
    Model(ModelCommand),
    /// Search with a free-text requirement
    #[command(subcommand)]
    AiSearch(AiSearchCommand),
    /// Send one chat message, optionally with images
    Chat {
        text: String,
        #[arg(long = "image")]
        images: Vec<PathBuf>,
        /// JSON file with earlier turns: [{"role": "user"|"model", "text": "..."}]
        #[arg(long)]
        history: Option<PathBuf>,
        /// Directory for images returned by the model
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },
    /// Generate an image from a prompt
    Image {
        prompt: String,
        #[arg(long = "reference")]
        references: Vec<PathBuf>,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Print the tag taxonomy
    Taxonomy,
}

#[derive(Subcommand)]
enum ProjectCommand {
    Add {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, default_value = "web")]
        platform: Platform,
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        cover_url: Option<String>,
    },
    Get {
        id: String,
    },
    List {
        #[arg(long, default_value = "1")]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        platform: Option<Platform>,
        /// Replaces all tags when given
        #[arg(short, long = "tag")]
        tags: Option<Vec<String>>,
        #[arg(long)]
        cover_url: Option<String>,
    },
    Delete {
        id: String,
    },
    Search(SearchArgs),
}

#[derive(Subcommand)]
enum ScreenCommand {
    Add {
        name: String,
        #[arg(long)]
        image_url: String,
        #[arg(long)]
        project: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    Get {
        id: String,
    },
    List {
        #[arg(long)]
        project: Option<String>,
        #[arg(long, default_value = "1")]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// Move to another project; an empty value detaches the screen
        #[arg(long)]
        project: Option<String>,
        /// An empty value clears the description
        #[arg(short, long)]
        description: Option<String>,
        /// Replaces all tags when given
        #[arg(short, long = "tag")]
        tags: Option<Vec<String>>,
    },
    Delete {
        id: String,
    },
    Search(SearchArgs),
}

#[derive(clap::Args)]
struct SearchArgs {
    #[arg(required = true)]
    tags: Vec<String>,
    /// precise (every tag) or fuzzy (ranked, partial matches allowed)
    #[arg(short, long, default_value = "fuzzy")]
    mode: SearchMode,
    #[arg(long, default_value = "0")]
    min_percentage: u8,
    #[arg(long, default_value = "1")]
    page: usize,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

#[derive(Subcommand)]
enum FavoriteCommand {
    Add {
        target: FavoriteTarget,
        id: String,
        #[arg(short, long, default_value = "local")]
        user: String,
    },
    Remove {
        target: FavoriteTarget,
        id: String,
        #[arg(short, long, default_value = "local")]
        user: String,
    },
    List {
        #[arg(short, long, default_value = "local")]
        user: String,
        #[arg(short, long)]
        target: Option<FavoriteTarget>,
    },
}

#[derive(Subcommand)]
enum ModelCommand {
    Add {
        name: String,
        #[arg(long)]
        purpose: ModelPurpose,
        #[arg(long)]
        model: String,
        #[arg(long)]
        api_key: String,
        #[arg(long, default_value = DEFAULT_GEMINI_BASE_URL)]
        base_url: String,
        #[arg(long)]
        temperature: Option<f32>,
        #[arg(long = "default")]
        is_default: bool,
    },
    List {
        #[arg(long)]
        purpose: Option<ModelPurpose>,
    },
    SetDefault {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum AiSearchCommand {
    Screens(AiSearchArgs),
    Projects(AiSearchArgs),
}

#[derive(clap::Args)]
struct AiSearchArgs {
    requirement: String,
    #[arg(long, default_value = "1")]
    page: usize,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Taxonomy = cli.command {
        return commands::taxonomy::run_taxonomy(cli.taxonomy.as_deref());
    }

    let app = app::App::build(cli.database_url, cli.taxonomy.as_deref()).await?;

    match cli.command {
        Commands::Project(cmd) => commands::project::run(&app, cmd).await,
        Commands::Screen(cmd) => commands::screen::run(&app, cmd).await,
        Commands::Favorite(cmd) => commands::favorite::run(&app, cmd).await,
        Commands::Model(cmd) => commands::model::run(&app, cmd).await,
        Commands::AiSearch(AiSearchCommand::Screens(args)) => {
            commands::ai::run_ai_search_screens(&app, args).await
        },
        Commands::AiSearch(AiSearchCommand::Projects(args)) => {
            commands::ai::run_ai_search_projects(&app, args).await
        },
        Commands::Chat { text, images, history, save_dir } => {
            commands::ai::run_chat(&app, text, &images, history.as_deref(), save_dir.as_deref())
                .await
        },
        Commands::Image { prompt, references, out } => {
            commands::ai::run_image(&app, &prompt, &references, &out).await
        },
        Commands::Taxonomy => Ok(()),
    }
}
