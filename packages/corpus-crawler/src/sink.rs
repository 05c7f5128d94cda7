//! Line-delimited JSON persistence for corpus records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::SinkError;
use crate::types::CorpusRecord;

/// Destination for corpus records.
///
/// The crawl appends records as it goes and flushes after every page, so an
/// interrupted run keeps everything already written.
pub trait RecordSink {
    fn append(&mut self, record: &CorpusRecord) -> Result<(), SinkError>;
    fn flush(&mut self) -> Result<(), SinkError>;
}

/// File sink writing one JSON record object per line, UTF-8.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create the output file, truncating any previous contents.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl RecordSink for JsonlSink {
    fn append(&mut self, record: &CorpusRecord) -> Result<(), SinkError> {
        let line = serde_json::to_string(record)?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_round_trip_one_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.jsonl");

        let mut sink = JsonlSink::create(&path).unwrap();
        sink.append(&CorpusRecord::human("Mars", "The red planet.")).unwrap();
        sink.append(&CorpusRecord::human("Venus", "The morning star.")).unwrap();
        sink.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: CorpusRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.page, "Mars");
        assert_eq!(first.label, "human");
    }

    #[test]
    fn test_create_truncates_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.jsonl");
        std::fs::write(&path, "stale line\n").unwrap();

        let sink = JsonlSink::create(&path).unwrap();
        drop(sink);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.is_empty());
    }
}
