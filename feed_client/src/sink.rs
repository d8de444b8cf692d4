//! Persistence of the reconciled dataset.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use feed_common::{Record, Result};
use log::info;

/// Default output file of the client binary.
pub const DEFAULT_OUTPUT: &str = "packets.json";

/// Destination for the final ordered records.
pub trait RecordSink {
    /// Durably store `records`, in the order given.
    fn persist(&mut self, records: &[Record]) -> Result<()>;
}

/// Writes records as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Sink writing to `path`, replacing any existing file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for JsonFileSink {
    fn persist(&mut self, records: &[Record]) -> Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        info!("{} records written to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_pretty_array_with_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut sink = JsonFileSink::new(&path);
        let records = vec![
            Record::new("AAPL", "B", 100, 15_000, 1),
            Record::new("MSFT", "S", 50, 30_000, 2),
        ];
        sink.persist(&records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n"));
        for field in ["\"symbol\"", "\"side\"", "\"quantity\"", "\"price\"", "\"sequence\""] {
            assert!(text.contains(field), "missing {}", field);
        }
        let back: Vec<Record> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn empty_dataset_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonFileSink::new(dir.path().join("empty.json"));
        sink.persist(&[]).unwrap();
        let text = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(text.trim(), "[]");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonFileSink::new(dir.path().join("nope").join("out.json"));
        assert!(matches!(
            sink.persist(&[]),
            Err(feed_common::FeedError::Io(_))
        ));
    }
}
