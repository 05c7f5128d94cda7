//! Line-delimited record handling for the rewrite stage.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, RewriteError};
use crate::rewrite::{ChatCompleter, Rewriter};

/// A crawled human-written paragraph. Only the `page` and `text` fields are
/// required of the upstream file; anything else on the line is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct HumanRecord {
    pub page: String,
    pub text: String,
}

/// One human/AI paragraph pair, as persisted by the rewrite stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteRecord {
    pub human_text: String,
    pub ai_text: String,
    pub source: String,
    pub model: String,
}

/// Totals for a rewrite run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub rewritten: usize,
    pub failed: usize,
}

/// Read every record from a crawl output file.
pub fn read_human_records(path: impl AsRef<Path>) -> Result<Vec<HumanRecord>> {
    let file = File::open(path)?;
    let mut records = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: HumanRecord =
            serde_json::from_str(&line).map_err(|e| RewriteError::Parse(e.to_string()))?;
        records.push(record);
    }
    Ok(records)
}

/// Rewrite an entire crawl output file, record by record.
///
/// A record whose generation fails is logged and skipped; the run continues.
/// Output is flushed per record, so an interrupted run keeps every pair
/// already written. `delay` paces requests against the generation service.
pub async fn rewrite_corpus<C: ChatCompleter>(
    rewriter: &Rewriter<C>,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    delay: Duration,
) -> Result<RewriteStats> {
    let records = read_human_records(input)?;
    let total = records.len();
    info!(records = total, "Starting rewrite run");

    let mut writer = BufWriter::new(File::create(output)?);
    let mut stats = RewriteStats::default();

    for (index, record) in records.into_iter().enumerate() {
        match rewriter.rewrite(&record.text).await {
            Ok(ai_text) => {
                let pair = RewriteRecord {
                    human_text: record.text,
                    ai_text,
                    source: record.page,
                    model: rewriter.model().to_string(),
                };
                let line = serde_json::to_string(&pair)
                    .map_err(|e| RewriteError::Parse(e.to_string()))?;
                writeln!(writer, "{line}")?;
                writer.flush()?;
                stats.rewritten += 1;
                info!(
                    record = index + 1,
                    total = total,
                    page = %pair.source,
                    "Generated AI paraphrase"
                );
            }
            Err(err) => {
                stats.failed += 1;
                warn!(
                    record = index + 1,
                    total = total,
                    page = %record.page,
                    error = %err,
                    "Failed to generate AI paraphrase"
                );
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    info!(
        rewritten = stats.rewritten,
        failed = stats.failed,
        "Rewrite run complete"
    );
    Ok(stats)
}
