/// OS-level notification seam for the timer engine.
///
/// Progress updates are advisory; the host may drop or coalesce them.
/// Currently only implements macOS notifications.

#[cfg(target_os = "macos")]
use std::process::Command;

/// Notification sink the timer engine drives
pub trait TimerNotifier {
    /// A countdown is running with this much time left
    fn timer_progress(&self, remaining_ms: i64);
    /// The countdown ran to zero
    fn timer_complete(&self, title: &str);
    /// Remove any visible timer notifications
    fn cancel(&self);
}

/// Silent sink for tests and headless hosts
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl TimerNotifier for NullNotifier {
    fn timer_progress(&self, _remaining_ms: i64) {}
    fn timer_complete(&self, _title: &str) {}
    fn cancel(&self) {}
}

/// Format remaining time as "M:SS"
pub fn format_remaining(remaining_ms: i64) -> String {
    let total_seconds = (remaining_ms.max(0)) / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Desktop notifications via the platform notifier
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl TimerNotifier for DesktopNotifier {
    fn timer_progress(&self, remaining_ms: i64) {
        #[cfg(target_os = "macos")]
        {
            let script = format!(
                r#"display notification "{} remaining" with title "Daybook - Timer Running""#,
                format_remaining(remaining_ms)
            );

            let _ = Command::new("osascript").arg("-e").arg(&script).output();
        }

        #[cfg(not(target_os = "macos"))]
        {
            // No-op on other platforms
            let _ = remaining_ms;
        }
    }

    fn timer_complete(&self, title: &str) {
        #[cfg(target_os = "macos")]
        {
            let script = format!(
                r#"display notification "{}" with title "Daybook - Timer Complete""#,
                title.replace('"', "\\\"")
            );

            let _ = Command::new("osascript").arg("-e").arg(&script).output();
        }

        #[cfg(not(target_os = "macos"))]
        {
            let _ = title;
        }
    }

    fn cancel(&self) {
        // The transient notifications above expire on their own; nothing
        // to tear down.
    }
}
