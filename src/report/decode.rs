//! Per-kind decoding of report payloads.
//!
//! The backend returns differently shaped JSON for each report kind, with no
//! discriminator in the payload itself: the performance audit carries a
//! `scores` object and the AI recommendation a top-level `ai_response`
//! string. Decoding is therefore keyed by the kind that was requested, and a
//! shape mismatch fails with a decode error instead of assuming fields exist.

use chrono::Utc;
use serde::Deserialize;

use crate::config::constants::{LIGHTHOUSE_GOOD_THRESHOLD, LIGHTHOUSE_POOR_THRESHOLD};
use crate::error_handling::AuditError;

use super::{AuditReport, LighthouseScores, ReportKind};

#[derive(Deserialize)]
struct PerformancePayload {
    scores: ScoresPayload,
}

#[derive(Deserialize)]
struct ScoresPayload {
    performance: u8,
    accessibility: u8,
    #[serde(rename = "best-practices")]
    best_practices: u8,
    seo: u8,
}

#[derive(Deserialize)]
struct AiPayload {
    ai_response: String,
}

/// Decodes a raw report payload for the given kind.
///
/// The backend response carries no timestamp, so `created_at` is stamped
/// with the receipt time here. That makes the stored time an approximation
/// (response time, not generation time on the backend), which is accepted.
///
/// # Errors
///
/// Returns [`AuditError::Decode`] when the payload does not have the shape
/// expected for `kind`.
pub fn decode_report(kind: ReportKind, payload: serde_json::Value) -> Result<AuditReport, AuditError> {
    match kind {
        ReportKind::PerformanceAudit => {
            let decoded: PerformancePayload =
                serde_json::from_value(payload).map_err(|e| AuditError::decode("scores", e))?;
            Ok(AuditReport::PerformanceAudit {
                scores: LighthouseScores {
                    performance: decoded.scores.performance,
                    accessibility: decoded.scores.accessibility,
                    best_practices: decoded.scores.best_practices,
                    seo: decoded.scores.seo,
                },
                created_at: Utc::now(),
            })
        }
        ReportKind::AiRecommendation => {
            let decoded: AiPayload =
                serde_json::from_value(payload).map_err(|e| AuditError::decode("ai_response", e))?;
            Ok(AuditReport::AiRecommendation {
                response: decoded.ai_response,
                created_at: Utc::now(),
            })
        }
    }
}

/// Display band for a Lighthouse score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 90 and above.
    Good,
    /// 50 to 89.
    NeedsImprovement,
    /// Below 50.
    Poor,
}

/// Returns the display band for a 0-100 Lighthouse score.
pub fn score_band(score: u8) -> ScoreBand {
    if score >= LIGHTHOUSE_GOOD_THRESHOLD {
        ScoreBand::Good
    } else if score >= LIGHTHOUSE_POOR_THRESHOLD {
        ScoreBand::NeedsImprovement
    } else {
        ScoreBand::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_performance_payload() {
        let payload = json!({
            "scores": {
                "performance": 93,
                "accessibility": 88,
                "best-practices": 100,
                "seo": 72
            }
        });
        let report = decode_report(ReportKind::PerformanceAudit, payload).expect("should decode");
        match report {
            AuditReport::PerformanceAudit { scores, .. } => {
                assert_eq!(scores.performance, 93);
                assert_eq!(scores.accessibility, 88);
                assert_eq!(scores.best_practices, 100);
                assert_eq!(scores.seo, 72);
            }
            other => panic!("expected performance audit, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_ai_payload() {
        let payload = json!({ "ai_response": "Add a meta description.\n\nShorten the title." });
        let report = decode_report(ReportKind::AiRecommendation, payload).expect("should decode");
        match report {
            AuditReport::AiRecommendation { response, .. } => {
                assert!(response.starts_with("Add a meta description."));
            }
            other => panic!("expected AI recommendation, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_shape_mismatch() {
        // An AI-shaped payload requested as a performance audit must not
        // pass: the decode is keyed by the requested kind.
        let payload = json!({ "ai_response": "text" });
        let err = decode_report(ReportKind::PerformanceAudit, payload)
            .expect_err("shape mismatch should fail");
        match err {
            AuditError::Decode { field, .. } => assert_eq!(field, "scores"),
            other => panic!("expected Decode error, got {other:?}"),
        }

        let payload = json!({ "scores": {} });
        let err = decode_report(ReportKind::AiRecommendation, payload)
            .expect_err("shape mismatch should fail");
        match err {
            AuditError::Decode { field, .. } => assert_eq!(field, "ai_response"),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(score_band(100), ScoreBand::Good);
        assert_eq!(score_band(90), ScoreBand::Good);
        assert_eq!(score_band(89), ScoreBand::NeedsImprovement);
        assert_eq!(score_band(50), ScoreBand::NeedsImprovement);
        assert_eq!(score_band(49), ScoreBand::Poor);
        assert_eq!(score_band(0), ScoreBand::Poor);
    }
}
