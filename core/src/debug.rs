//! Append-only debug sink for request and response bodies.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, SecondsFormat};

/// Destination for debug blocks: a file path, or process stdout when unset.
#[derive(Debug, Clone, Default)]
pub(crate) struct DebugSink {
    path: Option<PathBuf>,
}

impl DebugSink {
    pub(crate) fn new(path: Option<PathBuf>) -> Self {
        DebugSink { path }
    }

    /// Append one timestamped block. Best-effort: a failing sink is
    /// reported through `tracing` and never fails the call.
    pub(crate) fn write_block(&self, url: &str, label: &str, payload: &str) {
        let stamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
        let block = format!("{stamp} [DEBUG] {url}\n{label} ~BEGIN~\n{payload}\n~END~\n");

        let outcome = match &self.path {
            Some(path) => OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut file| file.write_all(block.as_bytes())),
            None => std::io::stdout().lock().write_all(block.as_bytes()),
        };

        if let Err(err) = outcome {
            tracing::warn!(error = %err, "debug sink write failed");
        }
    }
}
