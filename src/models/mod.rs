//! Record types for projects and crawled links.
//!
//! `ProjectRecord` and `LinkRecord` are the decoded, session-local shapes the
//! rest of the crate works with. `LinkRow` is the wire shape delivered by the
//! backend, where the sequence-valued fields (`h1_tags`, `images_without_alt`,
//! `redirect_chain`) arrive as JSON text embedded in a string column and must
//! be decoded before use.

use serde::Deserialize;

use crate::collection::Searchable;
use crate::error_handling::AuditError;

/// One project registered for SEO analysis.
///
/// Created via the project-creation request and never mutated client-side.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    /// Backend identifier.
    pub id: i64,
    /// Display name of the project.
    pub project_name: String,
    /// Bare hostname of the analyzed site, without a scheme.
    pub domain: String,
    /// Creation timestamp as reported by the backend (opaque, display only).
    pub created_at: String,
}

impl Searchable for ProjectRecord {
    fn search_text(&self) -> String {
        format!("{} {}", self.project_name, self.domain)
    }
}

/// One crawled URL with its measured SEO metrics.
///
/// Records are created in bulk when a crawl completes and are immutable for
/// the rest of the session; a new crawl replaces the whole set.
///
/// The counts and their companion sequences (`total_h1_tags` / `h1_tags`,
/// `total_images_without_alt` / `images_without_alt`) are expected to agree,
/// and `total_images_without_alt` should never exceed `total_images_on_page`.
/// These are input invariants owned by the crawler; nothing here enforces
/// them, and the classifier stays well-defined (if odd-looking) when a
/// malformed record violates them.
#[derive(Debug, Clone)]
pub struct LinkRecord {
    /// Backend identifier, unique within a project.
    pub id: i64,
    /// The crawled URL.
    pub url: String,
    /// Page title ("" when the page has none).
    pub title: String,
    /// Title length in characters.
    pub title_length: u32,
    /// HTTP status code observed for the URL.
    pub status_code: u16,
    /// Number of H1 tags on the page.
    pub total_h1_tags: u32,
    /// The H1 tag texts, in document order.
    pub h1_tags: Vec<String>,
    /// Meta description ("" when the page has none).
    pub meta_description: String,
    /// Meta description length in characters.
    pub meta_description_length: u32,
    /// Total number of images on the page.
    pub total_images_on_page: u32,
    /// Number of images missing alt text.
    pub total_images_without_alt: u32,
    /// Source attributes of the images missing alt text, in document order.
    pub images_without_alt: Vec<String>,
    /// URL this page was redirected from, if any.
    pub redirect_from: Option<String>,
    /// Full redirect chain leading to this page, if any.
    pub redirect_chain: Vec<String>,
    /// Crawler error category for failed fetches, if any.
    pub error_type: Option<String>,
    /// Crawl timestamp as reported by the backend (opaque, display only).
    pub created_at: String,
    /// Owning project.
    pub project_id: i64,
}

impl Searchable for LinkRecord {
    fn search_text(&self) -> String {
        format!("{} {}", self.url, self.title)
    }
}

/// Wire shape of a link as delivered by the backend.
///
/// The sequence fields are serialized JSON text (or null); decode into a
/// [`LinkRecord`] with [`LinkRow::decode`] before handing the record to the
/// classifier or a collection view.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkRow {
    /// Backend identifier, unique within a project.
    pub id: i64,
    /// The crawled URL.
    pub url: String,
    /// Page title, null when absent.
    #[serde(default)]
    pub title: Option<String>,
    /// Title length in characters.
    #[serde(default)]
    pub title_length: u32,
    /// HTTP status code observed for the URL.
    pub status_code: u16,
    /// Number of H1 tags on the page.
    #[serde(default)]
    pub total_h1_tags: u32,
    /// H1 tag texts as JSON text, null when absent.
    #[serde(default)]
    pub h1_tags: Option<String>,
    /// Meta description, null when absent.
    #[serde(default)]
    pub meta_description: Option<String>,
    /// Meta description length in characters.
    #[serde(default)]
    pub meta_description_length: u32,
    /// Total number of images on the page.
    #[serde(default)]
    pub total_images_on_page: u32,
    /// Number of images missing alt text.
    #[serde(default)]
    pub total_images_without_alt: u32,
    /// Image sources missing alt text as JSON text, null when absent.
    #[serde(default)]
    pub images_without_alt: Option<String>,
    /// URL this page was redirected from, if any.
    #[serde(default)]
    pub redirect_from: Option<String>,
    /// Redirect chain as JSON text, null when absent.
    #[serde(default)]
    pub redirect_chain: Option<String>,
    /// Crawler error category for failed fetches, if any.
    #[serde(default)]
    pub error_type: Option<String>,
    /// Crawl timestamp as reported by the backend.
    #[serde(default)]
    pub created_at: String,
    /// Owning project.
    #[serde(default)]
    pub project_id: i64,
}

/// Decodes one serialized-text sequence field.
///
/// A null or empty value decodes to an empty sequence; anything else must be
/// a JSON array of strings.
fn decode_string_seq(field: &str, raw: Option<&str>) -> Result<Vec<String>, AuditError> {
    match raw {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => serde_json::from_str(s).map_err(|e| AuditError::decode(field, e)),
    }
}

impl LinkRow {
    /// Decodes the wire row into a [`LinkRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Decode`] naming the offending field when one of
    /// the serialized-text sequence fields is present but is not valid JSON.
    pub fn decode(self) -> Result<LinkRecord, AuditError> {
        let h1_tags = decode_string_seq("h1_tags", self.h1_tags.as_deref())?;
        let images_without_alt =
            decode_string_seq("images_without_alt", self.images_without_alt.as_deref())?;
        let redirect_chain = decode_string_seq("redirect_chain", self.redirect_chain.as_deref())?;

        Ok(LinkRecord {
            id: self.id,
            url: self.url,
            title: self.title.unwrap_or_default(),
            title_length: self.title_length,
            status_code: self.status_code,
            total_h1_tags: self.total_h1_tags,
            h1_tags,
            meta_description: self.meta_description.unwrap_or_default(),
            meta_description_length: self.meta_description_length,
            total_images_on_page: self.total_images_on_page,
            total_images_without_alt: self.total_images_without_alt,
            images_without_alt,
            redirect_from: self.redirect_from,
            redirect_chain,
            error_type: self.error_type,
            created_at: self.created_at,
            project_id: self.project_id,
        })
    }
}

/// Decodes a fetched batch of link rows, preserving order.
pub fn decode_links(rows: Vec<LinkRow>) -> Result<Vec<LinkRecord>, AuditError> {
    rows.into_iter().map(LinkRow::decode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> LinkRow {
        LinkRow {
            id: 1,
            url: "https://example.com/".to_string(),
            title: Some("Example".to_string()),
            title_length: 7,
            status_code: 200,
            total_h1_tags: 1,
            h1_tags: Some(r#"["Welcome"]"#.to_string()),
            meta_description: Some("desc".to_string()),
            meta_description_length: 4,
            total_images_on_page: 3,
            total_images_without_alt: 1,
            images_without_alt: Some(r#"["/img/a.png"]"#.to_string()),
            redirect_from: None,
            redirect_chain: None,
            error_type: None,
            created_at: "2025-03-01T10:00:00".to_string(),
            project_id: 7,
        }
    }

    #[test]
    fn test_decode_sequences() {
        let link = row().decode().expect("row should decode");
        assert_eq!(link.h1_tags, vec!["Welcome".to_string()]);
        assert_eq!(link.images_without_alt, vec!["/img/a.png".to_string()]);
        assert!(link.redirect_chain.is_empty());
    }

    #[test]
    fn test_decode_null_sequence_defaults_to_empty() {
        let mut r = row();
        r.h1_tags = None;
        r.images_without_alt = None;
        let link = r.decode().expect("row should decode");
        assert!(link.h1_tags.is_empty());
        assert!(link.images_without_alt.is_empty());
    }

    #[test]
    fn test_decode_malformed_sequence_names_field() {
        let mut r = row();
        r.h1_tags = Some("not json".to_string());
        let err = r.decode().expect_err("malformed JSON should fail");
        match err {
            AuditError::Decode { field, .. } => assert_eq!(field, "h1_tags"),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_missing_title_defaults_to_empty() {
        let mut r = row();
        r.title = None;
        r.meta_description = None;
        let link = r.decode().expect("row should decode");
        assert!(link.title.is_empty());
        assert!(link.meta_description.is_empty());
    }

    #[test]
    fn test_search_text_combines_url_and_title() {
        let link = row().decode().expect("row should decode");
        let text = link.search_text();
        assert!(text.contains("https://example.com/"));
        assert!(text.contains("Example"));

        let project = ProjectRecord {
            id: 1,
            project_name: "My Site".to_string(),
            domain: "example.com".to_string(),
            created_at: String::new(),
        };
        assert!(project.search_text().contains("My Site"));
        assert!(project.search_text().contains("example.com"));
    }

    #[test]
    fn test_decode_links_preserves_order() {
        let mut a = row();
        a.id = 1;
        let mut b = row();
        b.id = 2;
        let links = decode_links(vec![a, b]).expect("rows should decode");
        assert_eq!(links[0].id, 1);
        assert_eq!(links[1].id, 2);
    }
}
