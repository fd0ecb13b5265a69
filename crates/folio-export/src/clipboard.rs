//! Clipboard backends.

use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Error writing to a clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard access denied: {0}")]
    Denied(String),
    #[error("No clipboard tool found (tried pbcopy, wl-copy, xclip, clip)")]
    Unsupported,
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// Asynchronous text clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard.
///
/// Records the last write. Can be constructed to deny every write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    denied: bool,
}

impl MemoryClipboard {
    /// Create an empty clipboard that accepts writes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard that rejects every write.
    #[must_use]
    pub fn denied() -> Self {
        Self {
            contents: Mutex::new(None),
            denied: true,
        }
    }

    /// Last written text.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.denied {
            return Err(ClipboardError::Denied("clipboard is read-only".to_owned()));
        }
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| ClipboardError::Denied("lock poisoned".to_owned()))?;
        *contents = Some(text.to_owned());
        Ok(())
    }
}

/// Clipboard backed by a platform command reading the text on stdin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Use an explicit command.
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_owned()).collect(),
        }
    }

    /// Pick the clipboard command for the current platform.
    ///
    /// `pbcopy` on macOS, `clip` on Windows. On other systems `wl-copy` is
    /// used under Wayland and `xclip` otherwise.
    pub fn detect() -> Result<Self, ClipboardError> {
        if cfg!(target_os = "macos") {
            Ok(Self::new("pbcopy", &[]))
        } else if cfg!(target_os = "windows") {
            Ok(Self::new("clip", &[]))
        } else if cfg!(unix) {
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                Ok(Self::new("wl-copy", &[]))
            } else {
                Ok(Self::new("xclip", &["-selection", "clipboard"]))
            }
        } else {
            Err(ClipboardError::Unsupported)
        }
    }

    /// Program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let spawn_err = |source: std::io::Error| ClipboardError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_err)?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(source) = stdin.write_all(text.as_bytes()).await {
                // The tool must not outlive a failed copy
                let _ = child.kill().await;
                tracing::debug!(program = %self.program, error = %source, "Clipboard tool rejected input");
                return Err(spawn_err(source));
            }
            // Dropping stdin closes the pipe so the tool sees EOF
        }

        let status = child.wait().await.map_err(spawn_err)?;
        if !status.success() {
            return Err(ClipboardError::Failed {
                program: self.program.clone(),
                status,
            });
        }
        tracing::debug!(program = %self.program, bytes = text.len(), "Copied to clipboard");
        Ok(())
    }
}
