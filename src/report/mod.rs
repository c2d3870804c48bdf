//! Report generation lifecycles.
//!
//! Each crawled URL can have two generated reports: a performance audit (four
//! Lighthouse scores) and an AI-authored recommendation. Generation is
//! asynchronous and failure-prone, so each (link, kind) pair gets its own
//! [`ReportLifecycle`] state machine. The two kinds are fully independent:
//! requests for different links or kinds may be in flight concurrently with
//! no shared state between them.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::api::SeoApi;

mod decode;

pub use decode::{decode_report, score_band, ScoreBand};

/// Which report a lifecycle manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Lighthouse-style performance/accessibility audit.
    PerformanceAudit,
    /// Free-text AI recommendation.
    AiRecommendation,
}

impl ReportKind {
    /// Returns a human-readable label for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::PerformanceAudit => "performance audit",
            ReportKind::AiRecommendation => "AI recommendation",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four Lighthouse category scores, each in 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LighthouseScores {
    /// Performance score.
    pub performance: u8,
    /// Accessibility score.
    pub accessibility: u8,
    /// Best-practices score.
    pub best_practices: u8,
    /// SEO score.
    pub seo: u8,
}

/// A generated report for one URL.
#[derive(Debug, Clone)]
pub enum AuditReport {
    /// Lighthouse-style audit scores.
    PerformanceAudit {
        /// The four category scores.
        scores: LighthouseScores,
        /// Receipt time of the response.
        created_at: DateTime<Utc>,
    },
    /// AI-authored recommendation text.
    AiRecommendation {
        /// The recommendation text.
        response: String,
        /// Receipt time of the response.
        created_at: DateTime<Utc>,
    },
}

impl AuditReport {
    /// Returns the kind of this report.
    pub fn kind(&self) -> ReportKind {
        match self {
            AuditReport::PerformanceAudit { .. } => ReportKind::PerformanceAudit,
            AuditReport::AiRecommendation { .. } => ReportKind::AiRecommendation,
        }
    }

    /// Returns when the report was received.
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            AuditReport::PerformanceAudit { created_at, .. } => *created_at,
            AuditReport::AiRecommendation { created_at, .. } => *created_at,
        }
    }
}

/// Observable state of one report lifecycle.
///
/// `Generating` and `Failed` carry the last successfully generated report, if
/// any, so a failed regeneration never erases a result the user already saw.
#[derive(Debug, Clone)]
pub enum ReportState {
    /// No report has been requested yet (or the link was re-crawled).
    Empty,
    /// Exactly one generation request is in flight.
    Generating {
        /// Report from a previous successful generation, still displayable.
        last_good: Option<AuditReport>,
    },
    /// A report is available.
    Ready(
        /// The generated report.
        AuditReport,
    ),
    /// The last generation attempt failed; a retry is allowed.
    Failed {
        /// Human-readable failure message.
        message: String,
        /// Report from a previous successful generation, still displayable.
        last_good: Option<AuditReport>,
    },
}

impl ReportState {
    /// Whether a generation request is currently outstanding.
    pub fn is_generating(&self) -> bool {
        matches!(self, ReportState::Generating { .. })
    }

    /// The most recent successfully generated report visible in this state.
    pub fn latest_report(&self) -> Option<&AuditReport> {
        match self {
            ReportState::Empty => None,
            ReportState::Ready(report) => Some(report),
            ReportState::Generating { last_good } | ReportState::Failed { last_good, .. } => {
                last_good.as_ref()
            }
        }
    }

    /// The failure message, when in `Failed`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ReportState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    fn into_last_good(self) -> Option<AuditReport> {
        match self {
            ReportState::Empty => None,
            ReportState::Ready(report) => Some(report),
            ReportState::Generating { last_good } | ReportState::Failed { last_good, .. } => {
                last_good
            }
        }
    }
}

#[derive(Debug)]
struct Inner {
    state: ReportState,
    // Bumped on every transition that starts or discards a request; a
    // response whose generation no longer matches is dropped unseen.
    generation: u64,
}

/// State machine for generating one kind of report for one link.
///
/// At most one generation request is outstanding at a time; a duplicate
/// request while `Generating` is a no-op and issues nothing. Failures are
/// absorbed into the `Failed` state with a retained message and never
/// propagate to the caller.
#[derive(Debug)]
pub struct ReportLifecycle<A: SeoApi> {
    api: Arc<A>,
    link_id: i64,
    kind: ReportKind,
    inner: Mutex<Inner>,
}

impl<A: SeoApi> ReportLifecycle<A> {
    /// Creates an empty lifecycle for `(link_id, kind)`.
    pub fn new(api: Arc<A>, link_id: i64, kind: ReportKind) -> Self {
        ReportLifecycle {
            api,
            link_id,
            kind,
            inner: Mutex::new(Inner {
                state: ReportState::Empty,
                generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a panic elsewhere while holding it;
        // the state itself is always coherent between transitions.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The link this lifecycle belongs to.
    pub fn link_id(&self) -> i64 {
        self.link_id
    }

    /// The report kind this lifecycle manages.
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ReportState {
        self.lock().state.clone()
    }

    /// The most recent successfully generated report, if any.
    pub fn latest_report(&self) -> Option<AuditReport> {
        self.lock().state.latest_report().cloned()
    }

    /// Requests generation of the report.
    ///
    /// Legal from `Empty`, `Failed`, and `Ready` (the latter regenerates,
    /// keeping the prior report visible until the new result arrives). While
    /// `Generating`, the call is a no-op: no second request is issued.
    /// Exactly one outbound request is made per transition into
    /// `Generating`; its success or failure is folded back into the state,
    /// and the resulting snapshot is returned.
    pub async fn request_generation(&self) -> ReportState {
        let generation = {
            let mut inner = self.lock();
            if inner.state.is_generating() {
                log::debug!(
                    "{} generation for link {} already in flight, ignoring request",
                    self.kind,
                    self.link_id
                );
                return inner.state.clone();
            }
            let last_good = std::mem::replace(&mut inner.state, ReportState::Empty).into_last_good();
            inner.generation += 1;
            inner.state = ReportState::Generating { last_good };
            inner.generation
        };

        log::info!("requesting {} for link {}", self.kind, self.link_id);
        let outcome = match self.api.generate_report(self.link_id, self.kind).await {
            Ok(payload) => decode_report(self.kind, payload),
            Err(e) => Err(e),
        };

        let mut inner = self.lock();
        if inner.generation != generation {
            // The lifecycle was reset while the request was in flight; this
            // response belongs to a discarded attempt and must not mutate
            // state.
            log::debug!(
                "dropping stale {} response for link {}",
                self.kind,
                self.link_id
            );
            return inner.state.clone();
        }
        match outcome {
            Ok(report) => {
                log::info!("{} ready for link {}", self.kind, self.link_id);
                inner.state = ReportState::Ready(report);
            }
            Err(e) => {
                log::warn!(
                    "{} generation failed for link {}: {e}",
                    self.kind,
                    self.link_id
                );
                let last_good =
                    std::mem::replace(&mut inner.state, ReportState::Empty).into_last_good();
                inner.state = ReportState::Failed {
                    message: e.to_string(),
                    last_good,
                };
            }
        }
        inner.state.clone()
    }

    /// Discards all report state, returning to `Empty`.
    ///
    /// Used when a new crawl replaces the parent link's metrics. Any
    /// in-flight generation response is dropped when it eventually arrives.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = ReportState::Empty;
    }
}
