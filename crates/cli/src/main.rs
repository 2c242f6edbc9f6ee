use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dotenv::dotenv;
use tokio_util::sync::CancellationToken;
use tracing::info;

use catalog::{MoodTable, Recommendation};
use server::{MAX_CANDIDATES, MoodOrchestrator, RetrieverConfig, Suggestions};
use sources::{DEFAULT_POSTER_BASE, Outcome};
use tmdb_client::client::DEFAULT_API_BASE;

/// Moodie - movie suggestions for your mood
#[derive(Parser)]
#[command(name = "moodie")]
#[command(about = "Suggests popular movies that match a mood", long_about = None)]
struct Cli {
    /// TMDB API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// TMDB REST root
    #[arg(long, env = "TMDB_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Prefix for poster paths
    #[arg(long, env = "TMDB_IMAGE_BASE", default_value = DEFAULT_POSTER_BASE)]
    image_base: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "MOODIE_TIMEOUT_SECS", default_value = "10")]
    timeout_secs: u64,

    /// Mood table file, one `mood::Genre` per line (defaults to the built-in table)
    #[arg(long, env = "MOODIE_MOODS")]
    moods: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest movies for a mood
    Suggest {
        /// The mood, e.g. "happy" or "aderanaline rush"
        #[arg(required = true, num_args = 1..)]
        mood: Vec<String>,

        /// Only movies originally in this language (e.g. "en", "fr")
        #[arg(long)]
        language: Option<String>,

        /// Number of movies to enrich (at most 30)
        #[arg(long, default_value_t = MAX_CANDIDATES)]
        limit: usize,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the moods this build understands
    Moods,

    /// List the provider's genre catalog
    Genres,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up TMDB_API_KEY and friends from a local .env, if present
    dotenv().ok();

    // Logs go to stderr so `--json` output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,server=info")),
        )
        .init();

    let cli = Cli::parse();
    let moods = load_moods(cli.moods.as_deref())?;

    // Dispatch to appropriate command handler
    match &cli.command {
        Commands::Suggest {
            mood,
            language,
            limit,
            json,
        } => {
            let config = retriever_config(&cli)?.with_candidate_limit(*limit);
            let orchestrator = MoodOrchestrator::new(&config, moods)?;
            handle_suggest(&orchestrator, &mood.join(" "), language.as_deref(), *json).await?
        }
        Commands::Moods => handle_moods(&moods),
        Commands::Genres => {
            let orchestrator = MoodOrchestrator::new(&retriever_config(&cli)?, moods)?;
            handle_genres(&orchestrator).await?
        }
    }

    Ok(())
}

fn load_moods(path: Option<&Path>) -> Result<MoodTable> {
    match path {
        Some(path) => MoodTable::load_from_file(path)
            .with_context(|| format!("Failed to load mood table from {}", path.display())),
        None => Ok(MoodTable::default()),
    }
}

fn retriever_config(cli: &Cli) -> Result<RetrieverConfig> {
    let api_key = cli
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow!("No TMDB API key: pass --api-key or set TMDB_API_KEY"))?;

    Ok(RetrieverConfig::new(api_key)
        .with_api_base(cli.api_base.clone())
        .with_image_base(cli.image_base.clone())
        .with_request_timeout(Duration::from_secs(cli.timeout_secs.max(1))))
}

/// Handle the 'suggest' command
async fn handle_suggest(
    orchestrator: &MoodOrchestrator,
    mood: &str,
    language: Option<&str>,
    json: bool,
) -> Result<()> {
    // Ctrl-C abandons the query instead of killing the process mid-output
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    info!("Looking up movies for mood {:?}", mood);
    let suggestions = orchestrator.suggest_with_cancel(mood, language, &cancel).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        print_suggestions(&suggestions);
    }
    Ok(())
}

/// Handle the 'moods' command
fn handle_moods(moods: &MoodTable) {
    println!("{}", "Moods:".bold().blue());
    for (mood, genre) in moods.iter() {
        println!("{}{} → {}", "• ".green(), mood, genre);
    }
}

/// Handle the 'genres' command
async fn handle_genres(orchestrator: &MoodOrchestrator) -> Result<()> {
    let genres = match orchestrator.genre_resolver().list().await {
        Outcome::Found(genres) => genres,
        Outcome::Missing => Vec::new(),
        Outcome::Failed(e) => return Err(e).context("Failed to fetch genre catalog"),
    };

    println!("{}", "Genres:".bold().blue());
    for genre in genres {
        println!("{:>6}  {}", genre.id.to_string().cyan(), genre.name);
    }
    Ok(())
}

/// Helper function to format and print a mood query result
fn print_suggestions(suggestions: &Suggestions) {
    let movies = match suggestions {
        Suggestions::Apology(apology) => {
            println!("{}", apology.to_string().yellow());
            return;
        }
        Suggestions::Movies(movies) => movies,
    };

    if movies.is_empty() {
        println!("{}", "No movies found.".yellow());
        return;
    }

    println!("{}", "Here are some movie suggestions for you:".bold().blue());
    for rec in movies {
        print_recommendation(rec);
        println!();
    }
}

fn print_recommendation(rec: &Recommendation) {
    let detail = &rec.detail;
    println!("{}. {}", rec.rank.to_string().green(), rec.title.bold());
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        println!("   {}", tagline.italic());
    }
    println!(
        "   {} ⭐{} / 10",
        "Rating:".cyan(),
        detail
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!("   {} {}", "Genre:".cyan(), or_na(detail.genre.as_deref()));
    println!("   {} {}", "Director:".cyan(), or_na(detail.director.as_deref()));
    println!("   {} {}", "Release Date:".cyan(), or_na(detail.release_date.as_deref()));
    println!("   {} {}", "Cast:".cyan(), or_na(detail.cast.as_deref()));
    println!("   {} {}", "Description:".cyan(), or_na(detail.description.as_deref()));
    println!("   {} {}", "Poster:".cyan(), or_na(detail.poster_url.as_deref()));
    println!(
        "   {} {}",
        "Trailer:".cyan(),
        rec.trailer_url.as_deref().unwrap_or("not available")
    );
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("N/A")
}
