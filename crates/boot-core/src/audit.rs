use anyhow::Context;
use directories::ProjectDirs;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

const MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Durable JSONL trail of boot lifecycle events, one session id per
/// supervisor invocation.
#[derive(Clone)]
pub struct BootLog {
    session_id: String,
    base_dir: PathBuf,
    max_bytes: u64,
}

impl BootLog {
    pub fn open_default() -> anyhow::Result<Self> {
        let project = ProjectDirs::from("com", "boot-supervisor", "boot-supervisor")
            .context("resolve project dirs")?;
        Self::open(project.data_local_dir().join("boot-log"), MAX_BYTES)
    }

    pub fn open(base_dir: PathBuf, max_bytes: u64) -> anyhow::Result<Self> {
        fs::create_dir_all(&base_dir).context("create boot log dir")?;
        Ok(Self {
            session_id: Uuid::new_v4().to_string(),
            base_dir,
            max_bytes,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn record(
        &self,
        event: &str,
        status: BootStatus,
        command: Option<&str>,
        attempts: Option<u32>,
        error: Option<&str>,
    ) -> anyhow::Result<String> {
        let ts = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("format timestamp")?;
        let event_id = Uuid::new_v4().to_string();
        let entry = BootEvent {
            ts,
            level: status.level(),
            event: event.to_string(),
            event_id: event_id.clone(),
            session_id: self.session_id.clone(),
            status: status.as_str(),
            command: command.map(|value| value.to_string()),
            attempts,
            error: error.map(|value| value.to_string()),
        };
        self.write_entry(&entry)?;
        Ok(event_id)
    }

    fn write_entry(&self, entry: &BootEvent) -> anyhow::Result<()> {
        let date = OffsetDateTime::now_utc()
            .format(&time::format_description::parse("[year][month][day]")?)
            .context("format date")?;
        let path = next_log_path(&self.base_dir, &date, self.max_bytes)?;
        let line = serde_json::to_string(entry).context("serialize boot event")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open boot log {}", path.display()))?;
        writeln!(file, "{line}").context("write boot event")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum BootStatus {
    Ok,
    Degraded,
    Failed,
}

impl BootStatus {
    fn as_str(&self) -> &'static str {
        match self {
            BootStatus::Ok => "ok",
            BootStatus::Degraded => "degraded",
            BootStatus::Failed => "failed",
        }
    }

    fn level(&self) -> &'static str {
        match self {
            BootStatus::Ok => "INFO",
            BootStatus::Degraded => "WARN",
            BootStatus::Failed => "ERROR",
        }
    }
}

#[derive(Serialize)]
struct BootEvent {
    ts: String,
    level: &'static str,
    event: String,
    event_id: String,
    session_id: String,
    status: &'static str,
    command: Option<String>,
    attempts: Option<u32>,
    error: Option<String>,
}

fn next_log_path(base_dir: &Path, date: &str, max_bytes: u64) -> anyhow::Result<PathBuf> {
    let mut suffix = 0;
    loop {
        let name = if suffix == 0 {
            format!("boot-{date}.jsonl")
        } else {
            format!("boot-{date}-{suffix}.jsonl")
        };
        let path = base_dir.join(name);
        if let Ok(metadata) = fs::metadata(&path) {
            if metadata.len() >= max_bytes {
                suffix += 1;
                continue;
            }
        }
        return Ok(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn record_writes_jsonl() {
        let tmp = TempDir::new().unwrap();
        let log = BootLog::open(tmp.path().to_path_buf(), 1024).unwrap();
        log.record("run.start", BootStatus::Ok, Some("gunicorn"), None, None)
            .unwrap();
        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert!(!entries.is_empty());
        let path = entries[0].as_ref().unwrap().path();
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("\"event\":\"run.start\""));
        assert!(contents.contains("\"command\":\"gunicorn\""));
    }

    #[test]
    fn degraded_events_carry_attempts() {
        let tmp = TempDir::new().unwrap();
        let log = BootLog::open(tmp.path().to_path_buf(), 1024).unwrap();
        log.record(
            "precondition.result",
            BootStatus::Degraded,
            Some("migrate"),
            Some(5),
            Some("exhausted"),
        )
        .unwrap();
        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        let path = entries[0].as_ref().unwrap().path();
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("\"status\":\"degraded\""));
        assert!(contents.contains("\"attempts\":5"));
    }

    #[test]
    fn log_rotates_when_max_reached() {
        let tmp = TempDir::new().unwrap();
        let log = BootLog::open(tmp.path().to_path_buf(), 1).unwrap();
        log.record("run.start", BootStatus::Ok, None, None, None)
            .unwrap();
        log.record("run.start", BootStatus::Ok, None, None, None)
            .unwrap();
        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert!(entries.len() >= 2);
    }
}
