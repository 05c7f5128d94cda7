//! Two-stage summarize-then-expand paraphrase generation.

use async_trait::async_trait;
use tracing::debug;

use crate::client::{ChatRequest, Message, OpenAiClient};
use crate::error::{Result, RewriteError};

const SUMMARIZE_SYSTEM: &str = "You are a professional summarizer. You compress \
a paragraph into at most two sentences without losing its meaning. Respond with \
the summary text only.";

const EXPAND_SYSTEM: &str = "You are a professional writer. You expand a short \
summary into a full paragraph, keeping the context and message it conveys. \
Respond with the paragraph text only.";

/// Text-generation seam, so the pipeline can run against mocks.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    async fn complete(&self, model: &str, system: &str, user: &str) -> Result<String>;
}

#[async_trait]
impl ChatCompleter for OpenAiClient {
    async fn complete(&self, model: &str, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest::new(model)
            .message(Message::system(system))
            .message(Message::user(user));
        self.chat_completion(request).await
    }
}

/// Derives AI-paraphrased counterparts of human-written paragraphs.
///
/// The rewrite is deliberately indirect: compressing to a summary and
/// expanding back forces the generator to restate the content in its own
/// words instead of lightly editing the original.
pub struct Rewriter<C> {
    completer: C,
    model: String,
}

impl<C: ChatCompleter> Rewriter<C> {
    pub fn new(completer: C, model: impl Into<String>) -> Self {
        Self {
            completer,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Produce an AI paraphrase of `text` via summarize-then-expand.
    pub async fn rewrite(&self, text: &str) -> Result<String> {
        let summary = self
            .completer
            .complete(
                &self.model,
                SUMMARIZE_SYSTEM,
                &format!(
                    "Summarize this paragraph in at most two sentences, \
                     retaining its important context and meaning:\n\n{text}"
                ),
            )
            .await?;
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(RewriteError::Parse("empty summary".into()));
        }
        debug!(summary_len = summary.len(), "Summarized paragraph");

        let expanded = self
            .completer
            .complete(
                &self.model,
                EXPAND_SYSTEM,
                &format!(
                    "Expand this summary into a full paragraph, retaining the \
                     context and message being conveyed:\n\n{summary}"
                ),
            )
            .await?;
        let expanded = expanded.trim();
        if expanded.is_empty() {
            return Err(RewriteError::Parse("empty expansion".into()));
        }

        Ok(expanded.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted completer that records every (system, user) pair it sees.
    struct MockCompleter {
        responses: Mutex<Vec<Result<String>>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockCompleter {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatCompleter for MockCompleter {
        async fn complete(&self, _model: &str, system: &str, user: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Err(RewriteError::Api("no scripted response".into()));
            }
            responses.remove(0)
        }
    }

    #[tokio::test]
    async fn test_rewrite_runs_both_stages_in_order() {
        let completer = MockCompleter::new(vec![
            Ok("A short summary.".to_string()),
            Ok("A freshly expanded paragraph.".to_string()),
        ]);
        let rewriter = Rewriter::new(completer, "test-model");

        let result = rewriter.rewrite("The original human paragraph.").await.unwrap();
        assert_eq!(result, "A freshly expanded paragraph.");

        let calls = rewriter.completer.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].1.contains("The original human paragraph."));
        assert!(calls[1].1.contains("A short summary."));
    }

    #[tokio::test]
    async fn test_empty_summary_is_an_error() {
        let completer = MockCompleter::new(vec![Ok("   ".to_string())]);
        let rewriter = Rewriter::new(completer, "test-model");

        let result = rewriter.rewrite("Some paragraph.").await;
        assert!(result.is_err());

        // The expansion stage never ran.
        assert_eq!(rewriter.completer.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stage_failure_propagates() {
        let completer = MockCompleter::new(vec![
            Ok("A summary.".to_string()),
            Err(RewriteError::Api("rate limited".into())),
        ]);
        let rewriter = Rewriter::new(completer, "test-model");

        assert!(rewriter.rewrite("Some paragraph.").await.is_err());
    }
}
