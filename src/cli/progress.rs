//! CLI-specific progress handling for ecoroute
//!
//! Shows a spinner on stderr while the geocoding service is being queried.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Creates a spinner for CLI display
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Spinner manager for network-bound operations
pub struct ProgressManager {
    pub pb: ProgressBar,
}

impl ProgressManager {
    /// Create a spinner; hidden entirely when `enabled` is false
    pub fn new(message: &str, enabled: bool) -> Self {
        let pb = if enabled {
            let pb = create_spinner(message);
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };

        Self { pb }
    }

    /// Run `future` while the spinner ticks, clearing it afterwards
    pub async fn run<F, T>(self, future: F) -> T
    where
        F: Future<Output = T>,
    {
        let output = future.await;
        self.pb.finish_and_clear();
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_spinner_template() {
        let pb = create_spinner("🌐 Resolving Delhi");
        assert_eq!(pb.message(), "🌐 Resolving Delhi");
        pb.finish();
    }

    #[tokio::test]
    async fn test_progress_manager_returns_future_output() {
        let manager = ProgressManager::new("Test lookup", false);
        let value = manager.run(async { 42 }).await;
        assert_eq!(value, 42);
    }
}
