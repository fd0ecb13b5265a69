//! Copy-source action.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clipboard::{Clipboard, ClipboardError};
use crate::clock::Clock;

/// How long the confirmation stays visible after a successful copy.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(2000);

/// Button label while idle.
pub const IDLE_LABEL: &str = "Copy as Markdown";

/// Button label while confirmed.
pub const CONFIRMED_LABEL: &str = "Copied!";

/// Visible state of the action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportStatus {
    /// Ready to copy.
    Idle,
    /// A copy succeeded recently.
    Confirmed,
}

/// Result of a copy attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The text reached the clipboard.
    Copied,
    /// The clipboard rejected the write.
    Failed,
}

type FailureHook = Box<dyn Fn(&ClipboardError) + Send + Sync>;

/// One-shot "copy raw source" action.
///
/// A successful copy arms a single expiry deadline; [`status`](Self::status)
/// compares it against the clock on every read. Copying again replaces the
/// deadline, so there is never more than one pending reversion.
pub struct ExportAction {
    clock: Arc<dyn Clock>,
    window: Duration,
    expires_at: Option<Instant>,
    on_failure: Option<FailureHook>,
}

impl ExportAction {
    /// Create an idle action using the default confirmation window.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            window: DEFAULT_WINDOW,
            expires_at: None,
            on_failure: None,
        }
    }

    /// Use a custom confirmation window.
    #[must_use]
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Register a hook notified of clipboard failures.
    #[must_use]
    pub fn with_failure_hook(mut self, hook: impl Fn(&ClipboardError) + Send + Sync + 'static) -> Self {
        self.on_failure = Some(Box::new(hook));
        self
    }

    /// Confirmation window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ExportStatus {
        match self.expires_at {
            Some(deadline) if self.clock.now() < deadline => ExportStatus::Confirmed,
            _ => ExportStatus::Idle,
        }
    }

    /// Whether the confirmation is showing.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.status() == ExportStatus::Confirmed
    }

    /// Button label for the current status.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self.status() {
            ExportStatus::Idle => IDLE_LABEL,
            ExportStatus::Confirmed => CONFIRMED_LABEL,
        }
    }

    /// Deadline of the current confirmation, if one is showing.
    #[must_use]
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at.filter(|_| self.is_confirmed())
    }

    /// Copy `raw` to the clipboard.
    ///
    /// On success the confirmation is (re)armed from now. On failure the
    /// status is left untouched and the failure hook, if any, is called.
    pub async fn copy(&mut self, clipboard: &dyn Clipboard, raw: &str) -> CopyOutcome {
        match clipboard.write_text(raw).await {
            Ok(()) => {
                self.expires_at = Some(self.clock.now() + self.window);
                tracing::debug!(bytes = raw.len(), "Source copied");
                CopyOutcome::Copied
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to copy source");
                if let Some(hook) = &self.on_failure {
                    hook(&e);
                }
                CopyOutcome::Failed
            }
        }
    }

    /// Disarm the confirmation and return to idle.
    pub fn teardown(&mut self) {
        self.expires_at = None;
    }
}

impl std::fmt::Debug for ExportAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportAction")
            .field("window", &self.window)
            .field("expires_at", &self.expires_at)
            .field("has_failure_hook", &self.on_failure.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::clock::ManualClock;
    use pretty_assertions::assert_eq;

    fn action(clock: &Arc<ManualClock>) -> ExportAction {
        ExportAction::new(Arc::clone(clock) as Arc<dyn Clock>)
    }

    #[tokio::test]
    async fn test_copy_confirms_then_expires() {
        let clock = Arc::new(ManualClock::new());
        let clipboard = MemoryClipboard::new();
        let mut export = action(&clock);

        assert_eq!(export.status(), ExportStatus::Idle);
        assert_eq!(export.label(), "Copy as Markdown");

        assert_eq!(export.copy(&clipboard, "# Raw").await, CopyOutcome::Copied);
        assert_eq!(clipboard.contents().as_deref(), Some("# Raw"));
        assert_eq!(export.status(), ExportStatus::Confirmed);
        assert_eq!(export.label(), "Copied!");

        clock.advance(Duration::from_millis(1999));
        assert!(export.is_confirmed());

        clock.advance(Duration::from_millis(1));
        assert_eq!(export.status(), ExportStatus::Idle);
        assert_eq!(export.expires_at(), None);
    }

    #[tokio::test]
    async fn test_second_copy_rearms_window() {
        let clock = Arc::new(ManualClock::new());
        let clipboard = MemoryClipboard::new();
        let mut export = action(&clock);

        export.copy(&clipboard, "a").await;
        clock.advance(Duration::from_millis(1500));
        assert!(export.is_confirmed());

        export.copy(&clipboard, "b").await;
        clock.advance(Duration::from_millis(1500));
        // 3000 ms after the first copy, 1500 ms after the second
        assert!(export.is_confirmed());

        clock.advance(Duration::from_millis(500));
        assert!(!export.is_confirmed());
    }

    #[tokio::test]
    async fn test_failed_copy_stays_idle_and_notifies() {
        let clock = Arc::new(ManualClock::new());
        let failures = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&failures);
        let mut export = action(&clock).with_failure_hook(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let outcome = export.copy(&MemoryClipboard::denied(), "x").await;
        assert_eq!(outcome, CopyOutcome::Failed);
        assert_eq!(export.status(), ExportStatus::Idle);
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_copy_keeps_existing_confirmation() {
        let clock = Arc::new(ManualClock::new());
        let mut export = action(&clock);

        export.copy(&MemoryClipboard::new(), "x").await;
        let deadline = export.expires_at();
        export.copy(&MemoryClipboard::denied(), "y").await;

        assert!(export.is_confirmed());
        assert_eq!(export.expires_at(), deadline);
    }

    #[tokio::test]
    async fn test_teardown_returns_to_idle() {
        let clock = Arc::new(ManualClock::new());
        let mut export = action(&clock);

        export.copy(&MemoryClipboard::new(), "x").await;
        export.teardown();
        assert_eq!(export.status(), ExportStatus::Idle);
    }

    #[tokio::test]
    async fn test_custom_window() {
        let clock = Arc::new(ManualClock::new());
        let mut export = action(&clock).with_window(Duration::from_millis(100));

        export.copy(&MemoryClipboard::new(), "x").await;
        clock.advance(Duration::from_millis(100));
        assert_eq!(export.status(), ExportStatus::Idle);
    }
}
