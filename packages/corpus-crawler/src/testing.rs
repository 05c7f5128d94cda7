//! Mock implementations of the crawl seams.
//!
//! Useful for exercising the orchestrator without network access or a real
//! output file.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::{SinkError, SourceError};
use crate::sink::RecordSink;
use crate::source::ContentSource;
use crate::types::{CorpusRecord, RevisionId};

/// Scripted content source backed by in-memory tables.
///
/// Pages are registered with `with_page`; revision lookups for unregistered
/// titles resolve to `None`, and titles registered with `with_failure` fail
/// the lookup instead. Resolved titles are recorded for assertions.
#[derive(Default)]
pub struct MockSource {
    revisions: HashMap<String, RevisionId>,
    html: HashMap<RevisionId, String>,
    links: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    resolved: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page with a resolvable revision and its rendered HTML.
    pub fn with_page(mut self, title: &str, revision: u64, html: &str) -> Self {
        self.revisions.insert(title.to_string(), RevisionId(revision));
        self.html.insert(RevisionId(revision), html.to_string());
        self
    }

    /// Register outbound links for a title.
    pub fn with_links(mut self, title: &str, links: &[&str]) -> Self {
        self.links
            .insert(title.to_string(), links.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Make revision lookups for a title fail.
    pub fn with_failure(mut self, title: &str) -> Self {
        self.failing.insert(title.to_string());
        self
    }

    /// Titles whose revision was looked up, in order.
    pub fn resolved_titles(&self) -> Vec<String> {
        self.resolved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentSource for MockSource {
    async fn revision_before(
        &self,
        title: &str,
        _cutoff: NaiveDateTime,
    ) -> Result<Option<RevisionId>, SourceError> {
        self.resolved.lock().unwrap().push(title.to_string());
        if self.failing.contains(title) {
            return Err(SourceError::Malformed(format!(
                "scripted failure for {title}"
            )));
        }
        Ok(self.revisions.get(title).copied())
    }

    async fn rendered_html(&self, revision: RevisionId) -> Result<String, SourceError> {
        Ok(self.html.get(&revision).cloned().unwrap_or_default())
    }

    async fn outbound_links(&self, title: &str) -> Result<Vec<String>, SourceError> {
        Ok(self.links.get(title).cloned().unwrap_or_default())
    }
}

/// Record sink that keeps everything in memory.
#[derive(Default)]
pub struct MemorySink {
    pub records: Vec<CorpusRecord>,
    pub flushes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, record: &CorpusRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushes += 1;
        Ok(())
    }
}
