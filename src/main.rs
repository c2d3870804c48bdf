//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `seo_audit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::process;
use std::sync::Arc;

use seo_audit::config::constants::DEFAULT_API_BASE_URL;
use seo_audit::initialization::{init_client, init_logger_with};
use seo_audit::{
    classify, score_band, AuditReport, Config, CrawlState, HttpSeoApi, LinkAudit, LogFormat,
    LogLevel, ProjectDashboard, ProjectOverview, ReportKind, ReportState, ScoreBand, StatusTier,
};

#[derive(Parser)]
#[command(name = "seo_audit", version, about = "SEO crawl audit client")]
struct Cli {
    /// Audit backend base URL
    #[arg(long, env = "SEO_AUDIT_API", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Identity token for the backend
    #[arg(long, env = "SEO_AUDIT_TOKEN", hide_env_values = true)]
    token: String,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List projects, optionally filtered by a search query
    Projects {
        /// Case-insensitive search over project name and domain
        #[arg(long)]
        search: Option<String>,
        /// Page to show (1-indexed)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Create a new project
    CreateProject {
        /// Display name of the project
        name: String,
        /// Bare hostname without a scheme, e.g. example.com
        domain: String,
    },
    /// List the crawled links of a project
    Links {
        /// Project id
        project_id: i64,
        /// Case-insensitive search over URL and title
        #[arg(long)]
        search: Option<String>,
        /// Page to show (1-indexed)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Only show links with issues
        #[arg(long)]
        issues: bool,
    },
    /// Show a project's summary counters
    Overview {
        /// Project id
        project_id: i64,
    },
    /// Start a crawl and wait for it to finish
    Crawl {
        /// Project id
        project_id: i64,
        /// Full URL including http:// or https://
        url: String,
    },
    /// Generate a report for a link
    Report {
        /// Project id
        project_id: i64,
        /// Link id
        link_id: i64,
        /// Which report to generate
        #[arg(long, value_enum)]
        kind: ReportKindArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKindArg {
    /// Lighthouse-style performance audit
    Lighthouse,
    /// AI-authored recommendation
    Ai,
}

impl From<ReportKindArg> for ReportKind {
    fn from(kind: ReportKindArg) -> Self {
        match kind {
            ReportKindArg::Lighthouse => ReportKind::PerformanceAudit,
            ReportKindArg::Ai => ReportKind::AiRecommendation,
        }
    }
}

fn status_label(status_code: u16) -> ColoredString {
    match seo_audit::status_tier(status_code) {
        StatusTier::Ok => status_code.to_string().green(),
        StatusTier::Redirect => status_code.to_string().blue(),
        StatusTier::Error => status_code.to_string().red(),
        StatusTier::Other => status_code.to_string().normal(),
    }
}

fn band_label(score: u8) -> ColoredString {
    match score_band(score) {
        ScoreBand::Good => score.to_string().green(),
        ScoreBand::NeedsImprovement => score.to_string().yellow(),
        ScoreBand::Poor => score.to_string().red(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), so the token
    // can be kept out of shell history.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = Config {
        api_base_url: cli.api_base_url.clone(),
        token: cli.token.clone(),
        log_level: cli.log_level.clone(),
        log_format: cli.log_format.clone(),
        ..Default::default()
    };
    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let api = Arc::new(HttpSeoApi::new(client, &config.api_base_url, &config.token));

    match cli.command {
        Command::Projects { search, page } => {
            let mut dashboard = ProjectDashboard::load(api)
                .await
                .context("Failed to load projects")?;
            let view = dashboard.projects();
            if let Some(query) = search.as_deref() {
                view.set_query(query);
            }
            view.set_page(page);

            let rows = view.current_page();
            if rows.is_empty() {
                println!(
                    "{}",
                    if view.query().is_empty() {
                        "No projects yet"
                    } else {
                        "No matching projects found"
                    }
                );
            }
            for project in &rows {
                println!(
                    "{:>5}  {:<30} {:<30} {}",
                    project.id,
                    project.project_name.bold(),
                    project.domain,
                    project.created_at.dimmed()
                );
            }
            println!(
                "Page {} of {} ({} of {} projects)",
                view.page(),
                view.total_pages(),
                view.filtered_count(),
                view.len()
            );
        }
        Command::CreateProject { name, domain } => {
            let dashboard = ProjectDashboard::load(Arc::clone(&api))
                .await
                .context("Failed to load projects")?;
            let id = dashboard
                .create_project(&name, &domain)
                .await
                .context("Failed to create project")?;
            println!("Created project {} ({})", id.to_string().bold(), domain);
        }
        Command::Links {
            project_id,
            search,
            page,
            issues,
        } => {
            let overview = ProjectOverview::load(api, project_id)
                .await
                .context("Failed to load project")?;
            if let Some(query) = search.as_deref() {
                overview.links().set_query(query);
            }

            if issues {
                for link in overview.issue_links() {
                    print_link_row(&link);
                }
            } else {
                let mut links = overview.links();
                links.set_page(page);
                for link in links.current_page() {
                    print_link_row(&link);
                }
                println!(
                    "Page {} of {} ({} of {} links)",
                    links.page(),
                    links.total_pages(),
                    links.filtered_count(),
                    links.len()
                );
            }
        }
        Command::Overview { project_id } => {
            let overview = ProjectOverview::load(api, project_id)
                .await
                .context("Failed to load project")?;
            let project = overview.project();
            println!("{} ({})", project.project_name.bold(), project.domain);
            println!("Analyzed URLs: {}", overview.analyzed_url_count());
            println!("Issues found:  {}", overview.issue_count());
            println!(
                "Last crawled:  {}",
                overview.last_crawled().unwrap_or_else(|| "Never".to_string())
            );
        }
        Command::Crawl { project_id, url } => {
            let overview = ProjectOverview::load(api, project_id)
                .await
                .context("Failed to load project")?;
            println!("Starting crawl...");
            match overview.crawl().start(&url).await {
                CrawlState::Completed { message } => {
                    println!("{}", message.green());
                    println!("{} links now loaded", overview.analyzed_url_count());
                }
                CrawlState::Failed { message } => {
                    eprintln!("{} {message}", "crawl failed:".red());
                    process::exit(1);
                }
                other => {
                    eprintln!("unexpected crawl state: {other:?}");
                    process::exit(1);
                }
            }
        }
        Command::Report {
            project_id,
            link_id,
            kind,
        } => {
            let audit = LinkAudit::load(api, project_id, link_id)
                .await
                .context("Failed to load link")?;
            let kind = ReportKind::from(kind);
            let lifecycle = match kind {
                ReportKind::PerformanceAudit => audit.performance(),
                ReportKind::AiRecommendation => audit.ai(),
            };
            println!("Generating {kind} for {}...", audit.link().url);
            match lifecycle.request_generation().await {
                ReportState::Ready(report) => print_report(&report),
                ReportState::Failed { message, .. } => {
                    eprintln!("{} {message}", "report generation failed:".red());
                    process::exit(1);
                }
                other => {
                    eprintln!("unexpected report state: {other:?}");
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn print_link_row(link: &seo_audit::LinkRecord) {
    let classification = classify(link);
    let issues = if classification.issues.is_empty() {
        "no issues".green().to_string()
    } else {
        format!(
            "{} issue{}",
            classification.issues.len(),
            if classification.issues.len() == 1 { "" } else { "s" }
        )
        .yellow()
        .to_string()
    };
    println!(
        "{:>5}  {}  {:<10} {}",
        link.id,
        status_label(link.status_code),
        issues,
        if link.title.is_empty() {
            link.url.clone()
        } else {
            format!("{} ({})", link.title, link.url)
        }
    );
}

fn print_report(report: &AuditReport) {
    match report {
        AuditReport::PerformanceAudit { scores, created_at } => {
            println!("Performance:    {}", band_label(scores.performance));
            println!("Accessibility:  {}", band_label(scores.accessibility));
            println!("Best practices: {}", band_label(scores.best_practices));
            println!("SEO:            {}", band_label(scores.seo));
            println!("Generated at {created_at}");
        }
        AuditReport::AiRecommendation {
            response,
            created_at,
        } => {
            println!("{response}");
            println!();
            println!("Generated at {created_at}");
        }
    }
}
