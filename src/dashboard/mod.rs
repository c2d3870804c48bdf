//! Dashboard aggregates.
//!
//! Read-only compositions over the loaded record sets: the project dashboard
//! (listing, search, summary counters), the per-project overview (link table,
//! issue counters, crawl session), and the per-link audit (one link plus its
//! two independent report lifecycles).

use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{validate_project_domain, SeoApi};
use crate::classify::has_issues;
use crate::collection::CollectionView;
use crate::config::constants::RECENT_PROJECTS_LIMIT;
use crate::crawl::CrawlSession;
use crate::error_handling::AuditError;
use crate::models::{decode_links, LinkRecord, ProjectRecord};
use crate::report::{ReportKind, ReportLifecycle};

/// Top-level project dashboard: the searchable project list plus summary
/// counters.
pub struct ProjectDashboard<A: SeoApi> {
    api: Arc<A>,
    projects: CollectionView<ProjectRecord>,
}

impl<A: SeoApi> ProjectDashboard<A> {
    /// Fetches the project list and builds the dashboard.
    pub async fn load(api: Arc<A>) -> Result<Self, AuditError> {
        let records = api.list_projects().await?;
        log::debug!("loaded {} projects", records.len());
        Ok(ProjectDashboard {
            api,
            projects: CollectionView::new(records),
        })
    }

    /// Refetches the project list, replacing the current record set.
    pub async fn refresh(&mut self) -> Result<(), AuditError> {
        let records = self.api.list_projects().await?;
        self.projects.replace_records(records);
        Ok(())
    }

    /// The searchable, paginated project view.
    pub fn projects(&mut self) -> &mut CollectionView<ProjectRecord> {
        &mut self.projects
    }

    /// Total number of projects, ignoring any search filter.
    pub fn total_projects(&self) -> usize {
        self.projects.len()
    }

    /// The most recent projects in insertion order, at most six.
    pub fn recent_projects(&self) -> Vec<ProjectRecord> {
        self.projects
            .records()
            .iter()
            .take(RECENT_PROJECTS_LIMIT)
            .cloned()
            .collect()
    }

    /// Average SEO score across all projects.
    ///
    /// The backend exposes no aggregate source for this yet; the dashboard
    /// renders a placeholder until one exists.
    pub fn average_seo_score(&self) -> Option<f64> {
        None
    }

    /// Total number of analyzed URLs across all projects.
    ///
    /// The backend exposes no aggregate source for this yet; the dashboard
    /// renders a placeholder until one exists.
    pub fn total_analyzed_urls(&self) -> Option<usize> {
        None
    }

    /// Validates the inputs and creates a new project, returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Validation`] when the domain is not a bare
    /// hostname, or the backend's error on rejection.
    pub async fn create_project(&self, name: &str, domain: &str) -> Result<i64, AuditError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuditError::Validation(
                "project name must not be empty".into(),
            ));
        }
        validate_project_domain(domain)?;
        let id = self.api.create_project(name, domain.trim()).await?;
        log::info!("created project {id} for domain {}", domain.trim());
        Ok(id)
    }
}

/// One project's overview: its link table, issue counters, and crawl session.
#[derive(Debug)]
pub struct ProjectOverview<A: SeoApi> {
    project: ProjectRecord,
    links: Arc<Mutex<CollectionView<LinkRecord>>>,
    crawl: CrawlSession<A>,
}

impl<A: SeoApi> ProjectOverview<A> {
    /// Loads the project (found by id within the caller's project list) and
    /// its crawled links.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::NotFound`] when no project with `project_id`
    /// exists, a transport error on fetch failure, or a decode error when a
    /// link row carries malformed serialized fields.
    pub async fn load(api: Arc<A>, project_id: i64) -> Result<Self, AuditError> {
        let projects = api.list_projects().await?;
        let project = projects
            .into_iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| AuditError::NotFound(format!("project {project_id}")))?;

        let rows = api.list_links(project_id).await?;
        let records = decode_links(rows)?;
        log::debug!(
            "loaded {} links for project {} ({})",
            records.len(),
            project_id,
            project.domain
        );

        let links = Arc::new(Mutex::new(CollectionView::new(records)));
        let crawl = CrawlSession::new(api, project_id, Arc::clone(&links));
        Ok(ProjectOverview {
            project,
            links,
            crawl,
        })
    }

    /// The project record.
    pub fn project(&self) -> &ProjectRecord {
        &self.project
    }

    /// The crawl session for this project.
    pub fn crawl(&self) -> &CrawlSession<A> {
        &self.crawl
    }

    /// Locks and returns the searchable, paginated link view.
    ///
    /// The crawl session replaces the view's record set after a completed
    /// crawl, hence the shared lock.
    pub fn links(&self) -> MutexGuard<'_, CollectionView<LinkRecord>> {
        self.links.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of analyzed URLs, ignoring any search filter.
    pub fn analyzed_url_count(&self) -> usize {
        self.links().len()
    }

    /// Number of links with issues per the aggregate predicate, ignoring any
    /// search filter.
    pub fn issue_count(&self) -> usize {
        self.links().records().iter().filter(|l| has_issues(l)).count()
    }

    /// When the project was last crawled, taken from the first link record.
    ///
    /// `None` when nothing has been crawled yet.
    pub fn last_crawled(&self) -> Option<String> {
        self.links()
            .records()
            .first()
            .map(|l| l.created_at.clone())
            .filter(|ts| !ts.is_empty())
    }

    /// The Issues-tab projection: links matching the current search query
    /// that also carry issues per the aggregate predicate.
    pub fn issue_links(&self) -> Vec<LinkRecord> {
        self.links()
            .filtered()
            .into_iter()
            .filter(|l| has_issues(l))
            .cloned()
            .collect()
    }
}

/// One link's audit surface: the record plus its two report lifecycles.
///
/// The lifecycles are independent; generating one report never affects the
/// other.
#[derive(Debug)]
pub struct LinkAudit<A: SeoApi> {
    link: LinkRecord,
    performance: ReportLifecycle<A>,
    ai: ReportLifecycle<A>,
}

impl<A: SeoApi> LinkAudit<A> {
    /// Loads the link (found by id within the project's fetched links) and
    /// builds empty lifecycles for both report kinds.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::NotFound`] when the link is absent from the
    /// project's current link set.
    pub async fn load(api: Arc<A>, project_id: i64, link_id: i64) -> Result<Self, AuditError> {
        let rows = api.list_links(project_id).await?;
        let links = decode_links(rows)?;
        let link = links
            .into_iter()
            .find(|l| l.id == link_id)
            .ok_or_else(|| AuditError::NotFound(format!("link {link_id}")))?;

        let performance =
            ReportLifecycle::new(Arc::clone(&api), link_id, ReportKind::PerformanceAudit);
        let ai = ReportLifecycle::new(api, link_id, ReportKind::AiRecommendation);
        Ok(LinkAudit {
            link,
            performance,
            ai,
        })
    }

    /// The link record under audit.
    pub fn link(&self) -> &LinkRecord {
        &self.link
    }

    /// The performance-audit lifecycle.
    pub fn performance(&self) -> &ReportLifecycle<A> {
        &self.performance
    }

    /// The AI-recommendation lifecycle.
    pub fn ai(&self) -> &ReportLifecycle<A> {
        &self.ai
    }

    /// Discards both reports, e.g. after the link was re-crawled.
    pub fn invalidate(&self) {
        self.performance.reset();
        self.ai.reset();
    }
}
