//! SEO issue classification.
//!
//! Maps a crawled link's metrics to a set of issue tags and a status badge
//! tier. Classification is pure and total: it never fails and never touches
//! anything outside the record it is given.
//!
//! Two predicates coexist on purpose. [`classify`] produces the detailed
//! per-field tag set used for display badges. [`has_issues`] is the narrower
//! aggregate used for the Issues tab and the dashboard counters: it ignores
//! title length entirely and only treats a meta description as problematic
//! when one is present but badly sized. The two must not be merged.

use strum_macros::EnumIter as EnumIterMacro;

use crate::config::constants::{
    META_DESCRIPTION_MAX_LENGTH, META_DESCRIPTION_MIN_LENGTH, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH,
};
use crate::models::LinkRecord;


/// A named SEO defect category derived from a link's metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum IssueTag {
    /// The URL answered with an HTTP error status (>= 400).
    Error,
    /// The page has no H1 tag.
    H1Missing,
    /// The page has more than one H1 tag.
    H1Multiple,
    /// At least one image on the page is missing alt text.
    AltMissing,
    /// The page has no meta description.
    MetaMissing,
    /// The meta description is present but shorter than recommended.
    MetaTooShort,
    /// The meta description is longer than recommended.
    MetaTooLong,
    /// The page title is shorter than recommended.
    TitleTooShort,
    /// The page title is longer than recommended.
    TitleTooLong,
}

impl IssueTag {
    /// Returns a human-readable label for the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueTag::Error => "HTTP error",
            IssueTag::H1Missing => "Missing H1",
            IssueTag::H1Multiple => "Multiple H1s",
            IssueTag::AltMissing => "Missing alt text",
            IssueTag::MetaMissing => "Missing meta description",
            IssueTag::MetaTooShort => "Meta description too short",
            IssueTag::MetaTooLong => "Meta description too long",
            IssueTag::TitleTooShort => "Title too short",
            IssueTag::TitleTooLong => "Title too long",
        }
    }
}

impl std::fmt::Display for IssueTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display tier for a status-code badge.
///
/// `Redirect` is a neutral tier: 3xx codes get a distinct badge but do not
/// count as issues in the aggregate predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTier {
    /// 2xx success.
    Ok,
    /// 3xx redirect (neutral, distinct from Ok for display).
    Redirect,
    /// 4xx/5xx error.
    Error,
    /// Anything outside the above ranges (e.g. 1xx), shown without color.
    Other,
}

/// Result of classifying one link.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Issue tags in rule order; a link may carry several.
    pub issues: Vec<IssueTag>,
    /// Badge tier for the link's status code.
    pub status_tier: StatusTier,
}

/// Returns the badge tier for an HTTP status code.
pub fn status_tier(status_code: u16) -> StatusTier {
    match status_code {
        200..=299 => StatusTier::Ok,
        300..=399 => StatusTier::Redirect,
        code if code >= 400 => StatusTier::Error,
        _ => StatusTier::Other,
    }
}

/// Classifies a link's metrics into issue tags and a status tier.
///
/// All rules are evaluated independently; the resulting tags appear in rule
/// order. The companion sequences on the record are not consulted, so a
/// record whose counts disagree with its sequences still classifies (the
/// tags then reflect the counts, inconsistent as they may be).
pub fn classify(link: &LinkRecord) -> Classification {
    let mut issues = Vec::new();

    if link.status_code >= 400 {
        issues.push(IssueTag::Error);
    }
    if link.total_h1_tags == 0 {
        issues.push(IssueTag::H1Missing);
    }
    if link.total_h1_tags > 1 {
        issues.push(IssueTag::H1Multiple);
    }
    if link.total_images_without_alt > 0 {
        issues.push(IssueTag::AltMissing);
    }
    if link.meta_description.is_empty() {
        issues.push(IssueTag::MetaMissing);
    }
    if !link.meta_description.is_empty()
        && link.meta_description_length < META_DESCRIPTION_MIN_LENGTH
    {
        issues.push(IssueTag::MetaTooShort);
    }
    if link.meta_description_length > META_DESCRIPTION_MAX_LENGTH {
        issues.push(IssueTag::MetaTooLong);
    }
    if link.title_length < TITLE_MIN_LENGTH {
        issues.push(IssueTag::TitleTooShort);
    }
    if link.title_length > TITLE_MAX_LENGTH {
        issues.push(IssueTag::TitleTooLong);
    }

    Classification {
        issues,
        status_tier: status_tier(link.status_code),
    }
}

/// The aggregate "has issues" predicate used for counters and the Issues tab.
///
/// Deliberately narrower than the tag set from [`classify`]: title length is
/// ignored, and a meta description counts only when present but outside the
/// recommended length band.
pub fn has_issues(link: &LinkRecord) -> bool {
    link.status_code >= 400
        || link.total_h1_tags != 1
        || link.total_images_without_alt > 0
        || (link.meta_description_length > 0
            && (link.meta_description_length < META_DESCRIPTION_MIN_LENGTH
                || link.meta_description_length > META_DESCRIPTION_MAX_LENGTH))
}
