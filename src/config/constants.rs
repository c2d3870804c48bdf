//! Configuration constants.
//!
//! This module defines the fixed operational parameters used throughout the
//! crate: pagination, SEO length thresholds, report score bands, and timing.

use std::time::Duration;

/// Number of rows shown per page in link and project views.
pub const PAGE_SIZE: usize = 10;

/// Number of projects shown in the dashboard's recent-projects strip.
pub const RECENT_PROJECTS_LIMIT: usize = 6;

// SEO length thresholds (characters)
/// Minimum recommended meta description length.
pub const META_DESCRIPTION_MIN_LENGTH: u32 = 50;
/// Maximum recommended meta description length.
pub const META_DESCRIPTION_MAX_LENGTH: u32 = 160;
/// Minimum recommended page title length.
pub const TITLE_MIN_LENGTH: u32 = 30;
/// Maximum recommended page title length.
pub const TITLE_MAX_LENGTH: u32 = 60;

// Lighthouse score bands
/// Scores at or above this value are considered good.
pub const LIGHTHOUSE_GOOD_THRESHOLD: u8 = 90;
/// Scores at or above this value (but below the good threshold) need
/// improvement; anything lower is poor.
pub const LIGHTHOUSE_POOR_THRESHOLD: u8 = 50;

/// Delay between a crawl completing and the link collection being refetched.
///
/// The completion summary stays visible for this long before the stale link
/// set is replaced.
pub const CRAWL_REFRESH_DELAY: Duration = Duration::from_secs(2);

/// Maximum URL length (2048 characters) accepted for a crawl start URL.
/// This matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Per-request HTTP timeout in seconds.
///
/// Report generation is long-running on the backend (a full Lighthouse run
/// or an AI completion), so this is deliberately generous.
pub const HTTP_TIMEOUT_SECS: u64 = 120;

/// Default User-Agent header value for requests to the audit backend.
pub const DEFAULT_USER_AGENT: &str = concat!("seo_audit/", env!("CARGO_PKG_VERSION"));

/// Default audit backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
