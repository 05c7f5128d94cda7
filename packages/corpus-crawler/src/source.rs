//! Client for a MediaWiki-style versioned content source.
//!
//! Three query shapes are used: revision lookup by title and cutoff
//! timestamp, rendered-content fetch by revision id, and outbound-link
//! listing by title. Each is attempted exactly once per call; the caller
//! decides what a failure means, and nothing here retries.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::debug;

use crate::error::SourceError;
use crate::types::RevisionId;

/// Default query endpoint for the English-language encyclopedia.
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Timestamp format the query API expects for revision cutoffs.
const CUTOFF_FORMAT: &str = "%Y%m%d%H%M%S";

/// Result cap for outbound-link listings.
const LINK_LIMIT: usize = 50;

/// Read-side operations against the versioned content source.
///
/// A trait seam so the orchestrator can run against scripted sources in
/// tests without network access.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// The most recent revision whose content cleanly predates `cutoff`,
    /// resolved as the parent of the newest qualifying revision. `None`
    /// when the page does not exist or has no revision at or before the
    /// cutoff.
    async fn revision_before(
        &self,
        title: &str,
        cutoff: NaiveDateTime,
    ) -> Result<Option<RevisionId>, SourceError>;

    /// Rendered HTML fragment for an exact revision, with table-of-contents
    /// and edit-section controls suppressed.
    async fn rendered_html(&self, revision: RevisionId) -> Result<String, SourceError>;

    /// Outbound links restricted to the main content namespace, capped at
    /// the source's per-request limit.
    async fn outbound_links(&self, title: &str) -> Result<Vec<String>, SourceError>;
}

/// HTTP client for a MediaWiki `api.php` endpoint.
pub struct WikiClient {
    client: reqwest::Client,
    api_url: String,
    user_agent: String,
}

impl WikiClient {
    /// Create a client against the given `api.php` endpoint.
    ///
    /// The user agent must identify the operator and carry contact
    /// information, per the content source's usage policy.
    pub fn new(api_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            api_url: api_url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Replace the HTTP client, e.g. to adjust timeouts.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let response = self
            .client
            .get(&self.api_url)
            .header("User-Agent", &self.user_agent)
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ContentSource for WikiClient {
    async fn revision_before(
        &self,
        title: &str,
        cutoff: NaiveDateTime,
    ) -> Result<Option<RevisionId>, SourceError> {
        let params = [
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("prop", "revisions".to_string()),
            ("titles", title.to_string()),
            ("rvstart", cutoff.format(CUTOFF_FORMAT).to_string()),
            ("rvdir", "older".to_string()),
            ("rvlimit", "1".to_string()),
            ("rvprop", "ids".to_string()),
        ];
        let response: QueryResponse = self.query(&params).await?;
        let revision = parent_revision(&response);
        debug!(title = %title, revision = ?revision, "Resolved pre-cutoff revision");
        Ok(revision)
    }

    async fn rendered_html(&self, revision: RevisionId) -> Result<String, SourceError> {
        let params = [
            ("action", "parse".to_string()),
            ("format", "json".to_string()),
            ("oldid", revision.to_string()),
            ("prop", "text".to_string()),
            ("disabletoc", "1".to_string()),
            ("disableeditsection", "1".to_string()),
        ];
        let response: ParseResponse = self.query(&params).await?;
        rendered_fragment(response).ok_or_else(|| {
            SourceError::Malformed(format!("no rendered text for revision {revision}"))
        })
    }

    async fn outbound_links(&self, title: &str) -> Result<Vec<String>, SourceError> {
        let params = [
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("titles", title.to_string()),
            ("prop", "links".to_string()),
            ("plnamespace", "0".to_string()),
            ("pllimit", LINK_LIMIT.to_string()),
        ];
        let response: QueryResponse = self.query(&params).await?;
        Ok(link_titles(response))
    }
}

// Response shapes for the `query` and `parse` actions. The `pages` map is
// keyed by page id ("-1" for missing pages), so entries are navigated by
// value rather than by key.

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: HashMap<String, PageEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct PageEntry {
    #[serde(default)]
    revisions: Vec<RevisionEntry>,
    #[serde(default)]
    links: Vec<LinkEntry>,
}

#[derive(Debug, Deserialize)]
struct RevisionEntry {
    parentid: u64,
}

#[derive(Debug, Deserialize)]
struct LinkEntry {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParseBody>,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    text: Option<RenderedText>,
}

#[derive(Debug, Deserialize)]
struct RenderedText {
    #[serde(rename = "*")]
    html: String,
}

/// Parent id of the newest qualifying revision. The "ids" query returns the
/// newest revision at or before the cutoff; its parent is the revision whose
/// content predates the boundary cleanly. A parent id of zero means the page
/// had no earlier revision.
fn parent_revision(response: &QueryResponse) -> Option<RevisionId> {
    response
        .query
        .as_ref()?
        .pages
        .values()
        .find_map(|page| page.revisions.first())
        .map(|revision| revision.parentid)
        .filter(|&id| id != 0)
        .map(RevisionId)
}

fn link_titles(response: QueryResponse) -> Vec<String> {
    response
        .query
        .map(|query| {
            query
                .pages
                .into_values()
                .flat_map(|page| page.links)
                .map(|link| link.title)
                .collect()
        })
        .unwrap_or_default()
}

fn rendered_fragment(response: ParseResponse) -> Option<String> {
    response.parse?.text.map(|text| text.html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_revision_from_ids_query() {
        let response: QueryResponse = serde_json::from_str(
            r#"{"query": {"pages": {"736": {"pageid": 736, "title": "Albert Einstein",
                "revisions": [{"revid": 1063211395, "parentid": 1063211200}]}}}}"#,
        )
        .unwrap();

        assert_eq!(parent_revision(&response), Some(RevisionId(1063211200)));
    }

    #[test]
    fn test_missing_page_has_no_revision() {
        let response: QueryResponse = serde_json::from_str(
            r#"{"query": {"pages": {"-1": {"title": "No Such Page", "missing": ""}}}}"#,
        )
        .unwrap();

        assert_eq!(parent_revision(&response), None);
    }

    #[test]
    fn test_zero_parent_means_no_earlier_revision() {
        let response: QueryResponse = serde_json::from_str(
            r#"{"query": {"pages": {"9": {"revisions": [{"revid": 12, "parentid": 0}]}}}}"#,
        )
        .unwrap();

        assert_eq!(parent_revision(&response), None);
    }

    #[test]
    fn test_link_titles_collected() {
        let response: QueryResponse = serde_json::from_str(
            r#"{"query": {"pages": {"736": {"links": [
                {"ns": 0, "title": "Annus Mirabilis papers"},
                {"ns": 0, "title": "Arthur Eddington"}]}}}}"#,
        )
        .unwrap();

        let mut titles = link_titles(response);
        titles.sort();
        assert_eq!(titles, vec!["Annus Mirabilis papers", "Arthur Eddington"]);
    }

    #[test]
    fn test_no_links_field_yields_empty_list() {
        let response: QueryResponse =
            serde_json::from_str(r#"{"query": {"pages": {"7": {"title": "Orphan"}}}}"#).unwrap();
        assert!(link_titles(response).is_empty());
    }

    #[test]
    fn test_rendered_fragment_under_nested_text_field() {
        let response: ParseResponse = serde_json::from_str(
            r#"{"parse": {"title": "Pluto", "text": {"*": "<p>Pluto is a dwarf planet.</p>"}}}"#,
        )
        .unwrap();

        assert_eq!(
            rendered_fragment(response).as_deref(),
            Some("<p>Pluto is a dwarf planet.</p>")
        );
    }

    #[test]
    fn test_rendered_fragment_missing_is_none() {
        let response: ParseResponse = serde_json::from_str(r#"{"error": {"code": "nosuchrevid"}}"#)
            .unwrap();
        assert!(rendered_fragment(response).is_none());
    }
}
