//! The append-only feedback file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};
use tracing::debug;

/// One `[timestamp]\ntext\n\n` block.
pub fn format_entry(timestamp: DateTime<Utc>, text: &str) -> String {
    format!(
        "[{}]\n{}\n\n",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        text
    )
}

pub struct FeedbackLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry stamped with the current time, creating the file if
    /// it does not exist yet.
    pub async fn append(&self, text: &str) -> std::io::Result<()> {
        let entry = format_entry(Utc::now(), text);

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(entry.as_bytes()).await?;
        file.flush().await?;

        debug!("Appended {} bytes to {}", entry.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    #[test]
    fn entry_has_millisecond_utc_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(
            format_entry(ts, "great job"),
            "[2024-03-09T14:05:00.000Z]\ngreat job\n\n"
        );
    }

    #[tokio::test]
    async fn appends_never_truncate() {
        let dir = tempfile::tempdir().unwrap();
        let log = FeedbackLog::new(dir.path().join("feedback.txt"));
        log.append("one").await.unwrap();
        log.append("two\nlines").await.unwrap();

        let contents = tokio::fs::read_to_string(log.path()).await.unwrap();
        assert_eq!(contents.matches("\n\n").count(), 2);
        let one = contents.find("\none\n").unwrap();
        let two = contents.find("\ntwo\nlines\n").unwrap();
        assert!(one < two);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_never_interleave() {
        const WRITERS: usize = 32;
        const BODY_LEN: usize = 20_000;

        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(FeedbackLog::new(dir.path().join("feedback.txt")));

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let log = Arc::clone(&log);
                let letter = char::from(b'a' + (i % 26) as u8);
                let body: String = std::iter::repeat(letter).take(BODY_LEN).collect();
                tokio::spawn(async move { log.append(&body).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let contents = tokio::fs::read_to_string(log.path()).await.unwrap();
        let blocks: Vec<&str> = contents.split_terminator("\n\n").collect();
        assert_eq!(blocks.len(), WRITERS);
        for block in blocks {
            let (stamp, body) = block.split_once('\n').unwrap();
            assert!(stamp.starts_with('[') && stamp.ends_with("Z]"));
            assert_eq!(body.len(), BODY_LEN);
            let first = body.chars().next().unwrap();
            assert!(body.chars().all(|c| c == first));
        }
    }
}
