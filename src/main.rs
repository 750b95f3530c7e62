//! FactFusion Client
//!
//! Terminal client core for the FactFusion misinformation detection service:
//! session handling, route authorization, submission assembly, verdict
//! interpretation, history aggregation, and report export.

mod client;
mod config;
mod errors;
mod export;
mod gate;
mod history;
mod models;
mod session;
mod submission;
mod verdict;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use client::ApiClient;
use config::Config;
use errors::{ClientError, ClientResult};
use export::{CapturedRegion, ReportExporter};
use gate::Outcome;
use models::{Route, Session};
use session::SessionStore;
use submission::{DisplaySlot, ImageAttachment, InputMode, SubmissionBuilder, SubmissionTracker};

#[derive(Parser)]
#[command(name = "factfusion", about = "FactFusion detection service client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in to the detection service
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the persisted session
    Logout,
    /// Show the current session
    Whoami,
    /// Submit text and/or an image for analysis
    Analyze {
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = InputMode::Multimodal)]
        mode: InputMode,
    },
    /// Fetch past analyses and show aggregate statistics
    History {
        /// Remove one record from the archive before aggregating
        #[arg(long)]
        delete: Option<String>,
    },
    /// Export a captured result view as a paginated report
    Export {
        /// PNG capture of the rendered result region
        #[arg(long)]
        capture: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Error banner; persisted state stays as it was
            eprintln!("[{}] {}", e.error_code(), e);
            if e.is_recoverable() {
                eprintln!("Correct the input and try again.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config) -> ClientResult<()> {
    let store = SessionStore::new(&config.session_path);
    let result = dispatch(command, config, &store).await;
    if let Err(ClientError::Auth(errors::AuthFailure::SessionExpired)) = &result {
        // An expired session is cleared so the next navigation starts clean
        store.clear();
    }
    result
}

async fn dispatch(command: Command, config: &Config, store: &SessionStore) -> ClientResult<()> {
    match command {
        Command::Login { email, password } => {
            let client = ApiClient::new(config)?;
            let (identity, role) = client.login(&email, &password).await?;
            let session = store.set(identity, role)?;
            println!("Logged in as {} ({})", session.identity, session.role.as_str());
            println!("-> {}", session.role.home_route().path());
            Ok(())
        }
        Command::Logout => {
            store.clear();
            println!("Logged out");
            Ok(())
        }
        Command::Whoami => {
            match store.get() {
                Some(session) => {
                    println!("{} ({})", session.identity, session.role.as_str())
                }
                None => println!("Not logged in"),
            }
            Ok(())
        }
        Command::Analyze { text, image, mode } => {
            let Some(session) = navigate(store, Route::Detection) else {
                return Ok(());
            };
            tracing::info!(identity = %session.identity, "Running analysis");
            analyze(config, mode, text, image).await
        }
        Command::History { delete } => {
            if navigate(store, Route::AnalysisHistory).is_none() {
                return Ok(());
            }
            show_history(config, delete).await
        }
        Command::Export { capture } => {
            if navigate(store, Route::Detection).is_none() {
                return Ok(());
            }
            let region = CapturedRegion::from_image_file(&capture)?;
            let report = ReportExporter::new(&config.export_dir).export(region)?;
            println!(
                "Exported {} page(s), {}x{}px:",
                report.pages.len(),
                report.page_width,
                report.scaled_height
            );
            for page in &report.pages {
                println!("  {}", page.display());
            }
            Ok(())
        }
    }
}

/// Run the access gate for a route transition, as the router would before
/// first paint. Recomputed on every navigation against the live session;
/// returns the session when the screen may render, `None` after a redirect.
fn navigate(store: &SessionStore, route: Route) -> Option<Session> {
    let session = store.get();
    match gate::decide(&route.requirement(), session.as_ref()) {
        Outcome::Render => session,
        Outcome::RedirectLogin => {
            println!("-> {}", Route::Login.path());
            println!("Please log in first.");
            None
        }
        Outcome::RedirectHome(role) => {
            println!("-> {}", role.home_route().path());
            println!(
                "{} is not available for role {}.",
                route.path(),
                role.as_str()
            );
            None
        }
    }
}

async fn analyze(
    config: &Config,
    mode: InputMode,
    text: String,
    image: Option<PathBuf>,
) -> ClientResult<()> {
    let mut builder = SubmissionBuilder::new(mode).text(text);
    if let Some(path) = image {
        let bytes = std::fs::read(&path)
            .map_err(|e| ClientError::Internal(format!("Failed to read image: {}", e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.png".to_string());
        builder = builder.image(ImageAttachment::new(file_name, bytes));
    }
    let payload = builder.build()?;

    let tracker = SubmissionTracker::new();
    let token = tracker
        .try_begin()
        .ok_or_else(|| ClientError::Internal("A submission is already in flight".to_string()))?;

    let client = ApiClient::new(config)?;
    let outcome = client.analyze(&payload).await;
    tracker.finish(token);

    // Apply through the display slot so a superseded response could never
    // replace a newer one
    let mut slot = DisplaySlot::new();
    slot.apply(&tracker, token, outcome?);
    let Some(result) = slot.get() else {
        return Ok(());
    };

    let assessment = verdict::classify(result);
    println!("Verdict:    {}", result.verdict.as_str());
    println!(
        "Tier:       {} ({})",
        assessment.tier.label(),
        assessment.tier.color()
    );
    println!("Score:      {:.2}", result.credibility_score);
    if let (Some(score), Some(tier)) = (result.image_score, assessment.image_tier) {
        println!("Image:      {:.2} -> {}", score, tier.label());
    }
    if let Some(explanation) = &result.xai_insights.explanation {
        println!("Why:        {}", explanation);
    }
    if !result.xai_insights.text_weights.is_empty() {
        println!("Key tokens: {}", result.xai_insights.text_weights.join(", "));
    }
    if let Some(status) = &result.xai_insights.heatmap_status {
        println!("Heatmap:    {}", status);
    }
    if let Some(snippet) = result.text_snippet.as_deref().filter(|s| !s.is_empty()) {
        println!("Snippet:    {}", snippet);
    }
    if let Some(image_ref) = &result.image_ref {
        println!("Image ref:  {}", image_ref);
    }
    if let (Some(id), Some(created)) = (&result.id, &result.created_at) {
        println!("Recorded:   {} ({})", created, id);
    }
    Ok(())
}

async fn show_history(config: &Config, delete: Option<String>) -> ClientResult<()> {
    let client = ApiClient::new(config)?;

    if let Some(id) = delete {
        client.delete_history_record(&id).await?;
        println!("Deleted record {}", id);
    }

    let records = client.history().await?;
    let stats = history::aggregate(&records);

    println!("Total scans:      {}", stats.total);
    println!("Avg confidence:   {:.1}%", stats.average_confidence);
    println!("Verifiable:       {}", stats.counts.informative);
    println!("Subjective/noise: {}", stats.counts.non_informative);
    println!("Out of scope:     {}", stats.counts.ood);
    println!("Suspicious:       {}", stats.suspicious);

    if !stats.recent_trend.is_empty() {
        println!("Recent trend:");
        for point in &stats.recent_trend {
            println!(
                "  {:<20} {:>3}% (actual {}%)",
                point.label, point.percentage, point.real_score
            );
        }
    }

    if !records.is_empty() {
        println!("Latest records:");
        for record in records.iter().take(3) {
            println!(
                "  {:<12} {:<20} {}",
                record.id.as_deref().unwrap_or("-"),
                record.created_at.as_deref().unwrap_or("-"),
                record.verdict.as_str()
            );
        }
    }
    Ok(())
}
