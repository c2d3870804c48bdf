//! Crawl orchestration.
//!
//! A [`CrawlSession`] supervises one "start crawl" request/response cycle for
//! a project: it exposes progress text while the crawler runs, a terminal
//! completion summary or failure message, and refreshes the owning link
//! collection once the crawl has landed.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::time::sleep;

use crate::api::{validate_crawl_url, SeoApi};
use crate::collection::CollectionView;
use crate::config::constants::CRAWL_REFRESH_DELAY;
use crate::models::{decode_links, LinkRecord};

/// Observable state of a crawl session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlState {
    /// No crawl is running.
    Idle,
    /// A crawl request is in flight.
    Running {
        /// Progress text shown to the user.
        progress: String,
    },
    /// The crawl finished; the summary includes the analyzed-URL count.
    Completed {
        /// Completion summary text.
        message: String,
    },
    /// The crawl request failed.
    Failed {
        /// Human-readable failure message.
        message: String,
    },
}

impl CrawlState {
    /// Whether a crawl request is currently in flight.
    pub fn is_running(&self) -> bool {
        matches!(self, CrawlState::Running { .. })
    }
}

#[derive(Debug)]
struct Inner {
    state: CrawlState,
    // Bumped whenever a new crawl starts or the session is dismissed; the
    // deferred refresh checks it so a dismissed session stops touching the
    // link collection.
    generation: u64,
}

/// Supervises one crawl request for a project.
///
/// Only one crawl may be running per session at a time; `start` while
/// `Running` is rejected without issuing a request. Different projects have
/// independent sessions and are not serialized against each other.
#[derive(Debug)]
pub struct CrawlSession<A: SeoApi> {
    api: Arc<A>,
    project_id: i64,
    links: Arc<Mutex<CollectionView<LinkRecord>>>,
    inner: Mutex<Inner>,
}

impl<A: SeoApi> CrawlSession<A> {
    /// Creates an idle session for `project_id` owning the given link view.
    pub fn new(
        api: Arc<A>,
        project_id: i64,
        links: Arc<Mutex<CollectionView<LinkRecord>>>,
    ) -> Self {
        CrawlSession {
            api,
            project_id,
            links,
            inner: Mutex::new(Inner {
                state: CrawlState::Idle,
                generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The project this session crawls.
    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CrawlState {
        self.lock().state.clone()
    }

    /// Starts a crawl of `url`.
    ///
    /// Rejected as a no-op while a crawl is already running. On success the
    /// state moves through `Running` to `Completed` with a summary naming the
    /// analyzed-URL count; after a short fixed delay the owning link
    /// collection is refetched once and replaced wholesale. Previously
    /// generated reports for replaced links are not touched. On failure
    /// (validation or transport) the state becomes `Failed` with the message
    /// retained; nothing is refetched.
    pub async fn start(&self, url: &str) -> CrawlState {
        let generation = {
            let mut inner = self.lock();
            if inner.state.is_running() {
                log::debug!(
                    "crawl already running for project {}, ignoring request",
                    self.project_id
                );
                return inner.state.clone();
            }
            inner.generation += 1;
            if let Err(e) = validate_crawl_url(url) {
                log::warn!("rejecting crawl of '{url}': {e}");
                inner.state = CrawlState::Failed {
                    message: e.to_string(),
                };
                return inner.state.clone();
            }
            inner.state = CrawlState::Running {
                progress: "Starting crawl...".to_string(),
            };
            inner.generation
        };

        log::info!("starting crawl of {url} for project {}", self.project_id);
        match self.api.start_crawl(self.project_id, url).await {
            Ok(analyzed_count) => {
                {
                    let mut inner = self.lock();
                    if inner.generation != generation {
                        return inner.state.clone();
                    }
                    let message = format!("Crawl completed. {analyzed_count} URLs analyzed.");
                    log::info!("project {}: {message}", self.project_id);
                    inner.state = CrawlState::Completed { message };
                }

                // Leave the completion summary visible briefly, then swap in
                // the fresh link set.
                sleep(CRAWL_REFRESH_DELAY).await;
                let still_current = self.lock().generation == generation;
                if still_current {
                    self.refresh_links().await;
                }
            }
            Err(e) => {
                let mut inner = self.lock();
                if inner.generation != generation {
                    return inner.state.clone();
                }
                log::warn!("crawl failed for project {}: {e}", self.project_id);
                inner.state = CrawlState::Failed {
                    message: e.to_string(),
                };
            }
        }
        self.state()
    }

    /// Refetches the link collection and replaces its record set wholesale.
    ///
    /// A failed refresh keeps the previous records; the session stays
    /// `Completed` either way.
    async fn refresh_links(&self) {
        let fetched = match self.api.list_links(self.project_id).await {
            Ok(rows) => decode_links(rows),
            Err(e) => Err(e),
        };
        match fetched {
            Ok(records) => {
                let mut links = self.links.lock().unwrap_or_else(|e| e.into_inner());
                log::debug!(
                    "replacing {} links with {} freshly crawled for project {}",
                    links.len(),
                    records.len(),
                    self.project_id
                );
                links.replace_records(records);
            }
            Err(e) => {
                log::warn!(
                    "failed to refresh links for project {} after crawl: {e}",
                    self.project_id
                );
            }
        }
    }

    /// Dismisses a terminal state, returning the session to `Idle`.
    ///
    /// No-op while `Running` or already `Idle`.
    pub fn dismiss(&self) {
        let mut inner = self.lock();
        if matches!(
            inner.state,
            CrawlState::Completed { .. } | CrawlState::Failed { .. }
        ) {
            inner.generation += 1;
            inner.state = CrawlState::Idle;
        }
    }
}
