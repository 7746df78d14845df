//! Diagnostic snapshot artifacts.
//!
//! Snapshots are a best-effort side channel: a capture failure must never
//! mask the UI failure that triggered it, so the sink reports outcomes to
//! the caller instead of propagating errors.

use crate::result::VitrinaResult;
use std::path::{Path, PathBuf};

/// Sink for failure-time page snapshots.
///
/// Artifact names combine the caller's label with a millisecond timestamp,
/// so repeated failures of the same action do not collide.
#[derive(Debug, Clone)]
pub struct SnapshotSink {
    dir: PathBuf,
    enabled: bool,
}

impl SnapshotSink {
    /// Create a sink writing under `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            enabled: true,
        }
    }

    /// Create a sink that drops every capture
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            enabled: false,
        }
    }

    /// Whether this sink writes artifacts
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The artifact directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Compute the artifact path for a label.
    ///
    /// Labels are sanitized to filesystem-safe characters; the timestamp has
    /// millisecond precision.
    #[must_use]
    pub fn artifact_path(&self, label: &str) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
        self.dir
            .join(format!("{}-{stamp}.png", sanitize_label(label)))
    }

    /// Write PNG bytes for the given label, returning the artifact path.
    ///
    /// Empty payloads are rejected: an empty capture means the underlying
    /// session produced nothing worth keeping.
    pub async fn write(&self, label: &str, data: &[u8]) -> VitrinaResult<PathBuf> {
        use std::io::{Error, ErrorKind};

        if !self.enabled {
            return Err(Error::new(ErrorKind::Unsupported, "snapshots disabled").into());
        }
        if data.is_empty() {
            return Err(Error::new(ErrorKind::InvalidData, "empty snapshot payload").into());
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.artifact_path(label);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }
}

/// Replace filesystem-hostile characters with dashes and collapse runs.
fn sanitize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_dash = false;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            out.push(c);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "snapshot".to_string()
    } else {
        trimmed.to_string()
    }
}
