// Shared test helpers: an in-memory implementation of the data-access
// capability with call counters, plus record builders.

#![allow(dead_code)] // Used by other test files

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use seo_audit::{AuditError, LinkRow, ProjectRecord, ReportKind, SeoApi};

/// In-memory stand-in for the audit backend.
///
/// Every async operation yields once before answering so that callers joined
/// on the same task observe the in-flight (`Generating`/`Running`) state
/// deterministically.
#[derive(Debug)]
pub struct MockApi {
    pub projects: Mutex<Vec<ProjectRecord>>,
    pub links: Mutex<HashMap<i64, Vec<LinkRow>>>,
    /// Analyzed-URL count returned by `start_crawl`, or an error message.
    pub crawl_result: Mutex<Result<u64, String>>,
    /// Report payloads handed out in order, one per `generate_report` call.
    pub report_results: Mutex<VecDeque<Result<serde_json::Value, String>>>,
    /// When set, `list_links` fails with a transport error.
    pub fail_list_links: AtomicBool,

    pub list_projects_calls: AtomicUsize,
    pub list_links_calls: AtomicUsize,
    pub start_crawl_calls: AtomicUsize,
    pub generate_calls: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        MockApi {
            projects: Mutex::new(Vec::new()),
            links: Mutex::new(HashMap::new()),
            crawl_result: Mutex::new(Ok(0)),
            report_results: Mutex::new(VecDeque::new()),
            fail_list_links: AtomicBool::new(false),
            list_projects_calls: AtomicUsize::new(0),
            list_links_calls: AtomicUsize::new(0),
            start_crawl_calls: AtomicUsize::new(0),
            generate_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_projects(projects: Vec<ProjectRecord>) -> Self {
        let api = Self::new();
        *api.projects.lock().unwrap() = projects;
        api
    }

    pub fn set_links(&self, project_id: i64, rows: Vec<LinkRow>) {
        self.links.lock().unwrap().insert(project_id, rows);
    }

    pub fn set_crawl_result(&self, result: Result<u64, &str>) {
        *self.crawl_result.lock().unwrap() = result.map_err(|e| e.to_string());
    }

    pub fn push_report(&self, result: Result<serde_json::Value, &str>) {
        self.report_results
            .lock()
            .unwrap()
            .push_back(result.map_err(|e| e.to_string()));
    }
}

impl SeoApi for MockApi {
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, AuditError> {
        self.list_projects_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn create_project(&self, name: &str, domain: &str) -> Result<i64, AuditError> {
        tokio::task::yield_now().await;
        let mut projects = self.projects.lock().unwrap();
        let id = projects.len() as i64 + 1;
        projects.push(project(id, name, domain));
        Ok(id)
    }

    async fn list_links(&self, project_id: i64) -> Result<Vec<LinkRow>, AuditError> {
        self.list_links_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_list_links.load(Ordering::SeqCst) {
            return Err(AuditError::Transport("backend unavailable".to_string()));
        }
        Ok(self
            .links
            .lock()
            .unwrap()
            .get(&project_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn start_crawl(&self, _project_id: i64, _url: &str) -> Result<u64, AuditError> {
        self.start_crawl_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.crawl_result
            .lock()
            .unwrap()
            .clone()
            .map_err(AuditError::Transport)
    }

    async fn generate_report(
        &self,
        _link_id: i64,
        _kind: ReportKind,
    ) -> Result<serde_json::Value, AuditError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.report_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no report queued".to_string()))
            .map_err(AuditError::Transport)
    }
}

pub fn project(id: i64, name: &str, domain: &str) -> ProjectRecord {
    ProjectRecord {
        id,
        project_name: name.to_string(),
        domain: domain.to_string(),
        created_at: "2025-02-01T09:00:00".to_string(),
    }
}

/// A clean 200 link row; tweak fields per test.
pub fn link_row(id: i64, project_id: i64, url: &str) -> LinkRow {
    LinkRow {
        id,
        url: url.to_string(),
        title: Some("A reasonably descriptive page title".to_string()),
        title_length: 35,
        status_code: 200,
        total_h1_tags: 1,
        h1_tags: Some(r#"["Welcome"]"#.to_string()),
        meta_description: Some("d".repeat(120)),
        meta_description_length: 120,
        total_images_on_page: 2,
        total_images_without_alt: 0,
        images_without_alt: None,
        redirect_from: None,
        redirect_chain: None,
        error_type: None,
        created_at: "2025-03-01T10:00:00".to_string(),
        project_id,
    }
}

/// A well-formed performance-audit payload.
pub fn lighthouse_payload() -> serde_json::Value {
    serde_json::json!({
        "scores": {
            "performance": 91,
            "accessibility": 85,
            "best-practices": 100,
            "seo": 78
        }
    })
}

/// A well-formed AI-recommendation payload.
pub fn ai_payload(text: &str) -> serde_json::Value {
    serde_json::json!({ "ai_response": text })
}
