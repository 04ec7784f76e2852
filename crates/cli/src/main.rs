use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::Catalog;
use server::{ActivityLog, RecommendationOrchestrator, RecommendationReport, Settings};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// ReelRecs - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Content-based movie recommendations from titles and genres", long_about = None)]
struct Cli {
    /// Path to the movie catalog CSV (title,genres)
    #[arg(short, long, default_value = "data/movies.csv")]
    catalog: PathBuf,

    /// Directory for the activity logs (overrides REEL_RECS_LOG_DIR)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Title to match (case-insensitive substring)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Record the pick under this user id
        #[arg(long)]
        user: Option<String>,

        /// Skip poster lookups
        #[arg(long)]
        no_posters: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// List every title in the catalog
    Titles,

    /// Show a user's latest picks
    History {
        #[arg(long)]
        user: String,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show the most picked titles
    Popular {
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show the latest recommendation requests
    Recent {
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(dir) = cli.log_dir {
        settings.log_dir = dir;
    }
    info!(log_dir = %settings.log_dir.display(), "Activity logs");
    let activity = ActivityLog::new(settings.log_dir.clone());

    match cli.command {
        Commands::Recommend {
            title,
            limit,
            user,
            no_posters,
        } => {
            let catalog = load_catalog(&cli.catalog)?;
            let request = RecommendRequest {
                title: &title,
                limit,
                user: user.as_deref(),
                with_posters: !no_posters,
            };
            handle_recommend(catalog, &settings, activity, request).await?
        }
        Commands::Search { title } => {
            let catalog = load_catalog(&cli.catalog)?;
            handle_search(&catalog, &title);
        }
        Commands::Titles => {
            let catalog = load_catalog(&cli.catalog)?;
            handle_titles(&catalog);
        }
        Commands::History { user, limit } => handle_history(&activity, &user, limit)?,
        Commands::Popular { limit } => handle_popular(&activity, limit)?,
        Commands::Recent { limit } => handle_recent(&activity, limit)?,
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<Arc<Catalog>> {
    println!("Loading movie catalog from {}...", path.display());
    let start = Instant::now();
    let catalog = Catalog::load_from_file(path).context("Failed to load movie catalog")?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    Ok(Arc::new(catalog))
}

/// Arguments of the 'recommend' command
struct RecommendRequest<'a> {
    title: &'a str,
    limit: usize,
    user: Option<&'a str>,
    with_posters: bool,
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog: Arc<Catalog>,
    settings: &Settings,
    activity: ActivityLog,
    request: RecommendRequest<'_>,
) -> Result<()> {
    let posters = settings.poster_resolver()?;

    let start = Instant::now();
    let orchestrator = RecommendationOrchestrator::from_catalog(catalog, posters, activity);
    println!(
        "{} Built {}x{} similarity matrix in {:?}",
        "✓".green(),
        orchestrator.matrix().len(),
        orchestrator.matrix().len(),
        start.elapsed()
    );

    let activity = orchestrator.activity();
    activity
        .initialize()
        .with_context(|| format!("Failed to prepare log directory {}", activity.dir().display()))?;

    let report = orchestrator
        .get_recommendations(request.title, request.user, request.limit, request.with_posters)
        .await;

    print_report(&report);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: &Catalog, title: &str) {
    println!("{}", format!("Search results for '{}':", title).bold().blue());

    let mut found = 0;
    for movie in catalog.search(title) {
        found += 1;
        println!(
            "{}: {} ({}) [{}]",
            movie.id,
            movie.title,
            format_year(movie.year),
            movie.genres.join(", ")
        );
    }

    if found == 0 {
        println!("{}", "No matching movies".yellow());
    }
}

/// Handle the 'titles' command
fn handle_titles(catalog: &Catalog) {
    for title in catalog.titles_sorted() {
        println!("{}", title);
    }
}

/// Handle the 'history' command
fn handle_history(activity: &ActivityLog, user: &str, limit: usize) -> Result<()> {
    let picks = activity
        .recent_for_user(user, limit)
        .context("Failed to read user action log")?;

    println!("{}", format!("Recent picks for {}:", user).bold().blue());
    if picks.is_empty() {
        println!("{}", "No history yet".yellow());
    }
    for pick in picks {
        println!("  {} {}", pick.timestamp.dimmed(), pick.movie_selected);
    }
    Ok(())
}

/// Handle the 'popular' command
fn handle_popular(activity: &ActivityLog, limit: usize) -> Result<()> {
    let ranked = activity
        .popularity(limit)
        .context("Failed to read user action log")?;

    println!("{}", "Most picked movies:".bold().blue());
    if ranked.is_empty() {
        println!("{}", "No picks recorded yet".yellow());
    }
    for (rank, (title, count)) in ranked.iter().enumerate() {
        println!("{}. {} ({} picks)", (rank + 1).to_string().green(), title, count);
    }
    Ok(())
}

/// Handle the 'recent' command
fn handle_recent(activity: &ActivityLog, limit: usize) -> Result<()> {
    let requests = activity
        .recommendation_history(limit)
        .context("Failed to read recommendation log")?;

    println!("{}", "Recent recommendation requests:".bold().blue());
    if requests.is_empty() {
        println!("{}", "No requests recorded yet".yellow());
    }
    for request in requests {
        println!(
            "  {} {} -> {}",
            request.timestamp.dimmed(),
            request.movie_selected,
            request.recommended_movies
        );
    }
    Ok(())
}

fn print_report(report: &RecommendationReport) {
    let Some(matched) = &report.matched else {
        println!("{}", server::NOT_FOUND.red());
        return;
    };

    println!("{}", format!("Because you picked {}:", matched).bold().blue());
    for rec in &report.recommendations {
        println!(
            "{}. {} ({}) [{}] - Score: {:.3}",
            rec.rank.to_string().green(),
            rec.title,
            format_year(rec.year),
            rec.genres.join(", "),
            rec.score
        );
        if let Some(url) = &rec.poster_url {
            println!("   {}", url.dimmed());
        }
    }
}

fn format_year(year: Option<u16>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "?".to_string())
}
