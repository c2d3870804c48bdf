//! seo_audit library: client core for SEO crawl audits
//!
//! This library contains the decision logic and state management behind an
//! SEO audit dashboard: classifying crawled URLs into issue categories,
//! orchestrating the asynchronous generation of per-URL reports (a
//! performance audit and an AI recommendation), and serving searchable,
//! paginated views over projects and their crawled links. Crawling itself,
//! authentication, and rendering are external concerns; the core talks to
//! the backend through the [`SeoApi`] capability and exposes plain state
//! snapshots for any consumer to render.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use seo_audit::{Config, HttpSeoApi, ProjectDashboard};
//! use seo_audit::initialization::init_client;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     api_base_url: "https://audit.example.com".to_string(),
//!     token: std::env::var("SEO_AUDIT_TOKEN")?,
//!     ..Default::default()
//! };
//!
//! let client = init_client(&config)?;
//! let api = Arc::new(HttpSeoApi::new(client, &config.api_base_url, &config.token));
//!
//! let mut dashboard = ProjectDashboard::load(api).await?;
//! println!("{} projects", dashboard.total_projects());
//! dashboard.projects().set_query("shop");
//! for project in dashboard.projects().current_page() {
//!     println!("{} ({})", project.project_name, project.domain);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod api;
pub mod classify;
pub mod collection;
pub mod config;
pub mod crawl;
pub mod dashboard;
pub mod error_handling;
pub mod initialization;
pub mod models;
pub mod report;

// Re-export public API
pub use api::{validate_crawl_url, validate_project_domain, HttpSeoApi, SeoApi};
pub use classify::{classify, has_issues, status_tier, Classification, IssueTag, StatusTier};
pub use collection::{CollectionView, FilterState, Searchable};
pub use config::{Config, LogFormat, LogLevel};
pub use crawl::{CrawlSession, CrawlState};
pub use dashboard::{LinkAudit, ProjectDashboard, ProjectOverview};
pub use error_handling::AuditError;
pub use models::{decode_links, LinkRecord, LinkRow, ProjectRecord};
pub use report::{
    decode_report, score_band, AuditReport, LighthouseScores, ReportKind, ReportLifecycle,
    ReportState, ScoreBand,
};
