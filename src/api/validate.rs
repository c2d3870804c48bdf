//! Input validation for project domains and crawl URLs.

use url::Url;

use crate::config::constants::MAX_URL_LENGTH;
use crate::error_handling::AuditError;

/// Validates a project domain.
///
/// The backend stores a bare hostname, so the domain must come without a
/// scheme, path, or whitespace, and must parse as the host of a URL.
///
/// # Errors
///
/// Returns [`AuditError::Validation`] describing the first problem found.
pub fn validate_project_domain(domain: &str) -> Result<(), AuditError> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(AuditError::Validation("domain must not be empty".into()));
    }
    if domain.contains("://") {
        return Err(AuditError::Validation(
            "domain must not include a scheme (enter it without http:// or https://)".into(),
        ));
    }
    if domain.contains('/') || domain.contains(char::is_whitespace) {
        return Err(AuditError::Validation(
            "domain must be a bare hostname like example.com".into(),
        ));
    }

    let parsed = Url::parse(&format!("https://{domain}"))
        .map_err(|e| AuditError::Validation(format!("invalid domain '{domain}': {e}")))?;
    if parsed.host_str().is_none() {
        return Err(AuditError::Validation(format!(
            "invalid domain '{domain}': no host"
        )));
    }
    Ok(())
}

/// Validates a crawl start URL.
///
/// The crawler needs the full URL including its scheme, so unlike a project
/// domain the scheme is required here rather than inferred. Overlong URLs are
/// rejected outright.
///
/// # Errors
///
/// Returns [`AuditError::Validation`] describing the first problem found.
pub fn validate_crawl_url(url: &str) -> Result<(), AuditError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AuditError::Validation("URL must not be empty".into()));
    }
    if url.len() > MAX_URL_LENGTH {
        return Err(AuditError::Validation(format!(
            "URL exceeds maximum length ({} > {MAX_URL_LENGTH})",
            url.len()
        )));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AuditError::Validation(
            "enter the full URL including http:// or https://".into(),
        ));
    }

    let parsed = Url::parse(url)
        .map_err(|e| AuditError::Validation(format!("invalid URL '{url}': {e}")))?;
    if parsed.host_str().is_none() {
        return Err(AuditError::Validation(format!("invalid URL '{url}': no host")));
    }
    Ok(())
}
