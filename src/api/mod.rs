//! Data-access capability for the audit backend.
//!
//! The core never talks to the network directly; every component receives a
//! [`SeoApi`] implementation (and, transitively, the caller's identity token)
//! at construction. [`HttpSeoApi`] is the production implementation against
//! the REST backend; tests substitute an in-memory mock.

use crate::error_handling::AuditError;
use crate::models::{LinkRow, ProjectRecord};
use crate::report::ReportKind;

pub mod client;
pub mod validate;

pub use client::HttpSeoApi;
pub use validate::{validate_crawl_url, validate_project_domain};

/// The logical operations the audit backend offers.
///
/// Report payload shapes differ per kind, so `generate_report` hands back the
/// raw JSON value; the report module performs the kind-keyed decode.
#[allow(async_fn_in_trait)]
pub trait SeoApi {
    /// Lists all projects visible to the caller.
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, AuditError>;

    /// Creates a project and returns its new id.
    async fn create_project(&self, name: &str, domain: &str) -> Result<i64, AuditError>;

    /// Lists the crawled links of a project.
    ///
    /// Sequence-valued fields on the returned rows are serialized text; decode
    /// them with [`crate::models::decode_links`] before use.
    async fn list_links(&self, project_id: i64) -> Result<Vec<LinkRow>, AuditError>;

    /// Starts a crawl of `url` for a project and returns the number of URLs
    /// analyzed. Long-running from the caller's perspective.
    async fn start_crawl(&self, project_id: i64, url: &str) -> Result<u64, AuditError>;

    /// Generates a report of the given kind for a link and returns the raw
    /// payload.
    async fn generate_report(
        &self,
        link_id: i64,
        kind: ReportKind,
    ) -> Result<serde_json::Value, AuditError>;
}
