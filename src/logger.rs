//! Append-only session log shared by all connection threads
//!
//! One multi-line record per session, assembled while the session runs and
//! written under a single lock acquisition, so records from concurrent
//! sessions never interleave mid-record.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

pub trait SessionLog: Send + Sync {
    fn record(&self, _entry: &str) {}
}

pub struct NoopLog;
impl SessionLog for NoopLog {}

pub struct FileLog {
    file: Mutex<File>,
}

impl FileLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(f),
        })
    }
}

impl SessionLog for FileLog {
    fn record(&self, entry: &str) {
        if let Ok(mut f) = self.file.lock() {
            let _ = f.write_all(entry.as_bytes());
            let _ = f.flush();
        }
    }
}

/// Accumulates one session's record: peer, connect time, operation outcome,
/// disconnect time. `finish` renders the whole record for one append.
pub struct SessionRecord {
    peer: String,
    connected: DateTime<Utc>,
    outcome: Option<String>,
}

impl SessionRecord {
    pub fn begin(peer: &str) -> Self {
        Self {
            peer: peer.to_string(),
            connected: Utc::now(),
            outcome: None,
        }
    }

    pub fn set_outcome(&mut self, file: Option<&str>, outcome: &str) {
        self.outcome = Some(format!("File: {}, Status: {}", file.unwrap_or("None"), outcome));
    }

    pub fn has_outcome(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn finish(self) -> String {
        format!(
            "---------- Client Session ----------\n\
             Peer: {}\n\
             Connected: {}\n\
             {}\n\
             Disconnected: {}\n\
             ------------------------------------\n",
            self.peer,
            self.connected.to_rfc3339(),
            self.outcome
                .unwrap_or_else(|| "File: None, Status: No operation".to_string()),
            Utc::now().to_rfc3339(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn record_carries_peer_outcome_and_both_timestamps() {
        let mut rec = SessionRecord::begin("127.0.0.1:40000");
        rec.set_outcome(Some("beta.txt"), "Download completed");
        let text = rec.finish();
        assert!(text.contains("Peer: 127.0.0.1:40000\n"));
        assert!(text.contains("Connected: "));
        assert!(text.contains("File: beta.txt, Status: Download completed\n"));
        assert!(text.contains("Disconnected: "));
        assert!(text.ends_with("------------------------------------\n"));
    }

    #[test]
    fn record_without_outcome_says_so() {
        let text = SessionRecord::begin("peer").finish();
        assert!(text.contains("File: None, Status: No operation\n"));
    }

    #[test]
    fn concurrent_records_do_not_interleave() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("activity.log");
        let log = Arc::new(FileLog::new(&path).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let mut rec = SessionRecord::begin(&format!("peer-{i}"));
                        rec.set_outcome(Some(&format!("file-{i}.txt")), "Download completed");
                        log.record(&rec.finish());
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        // Every record is contiguous: a banner is always followed by its own
        // Peer line, and the peer matches the file named two lines later.
        let lines: Vec<&str> = text.lines().collect();
        let mut records = 0;
        for (i, line) in lines.iter().enumerate() {
            if *line == "---------- Client Session ----------" {
                records += 1;
                let peer = lines[i + 1].strip_prefix("Peer: peer-").unwrap();
                assert!(lines[i + 3].starts_with(&format!("File: file-{peer}.txt")));
            }
        }
        assert_eq!(records, 8 * 50);
    }
}
