//! Interactive session: plan routes line by line and keep a trip history in memory

use std::io::Write;
use std::path::Path;

use ecoroute::{NewTrip, Result, RouteResult, RoutePlanner, TripHistory};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::export::{self, OverwriteBehavior};
use super::render;

const HELP: &str = "Enter a route as 'source -> destination' (place names or 'lat, lng').
Commands: :history      show the dashboard
          :save FILE   export the last route as JSON
          :help        show this help
          :quit        leave the session";

/// Whether the session should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// Application state owned by the interactive front end
pub struct Session {
    planner: RoutePlanner,
    history: TripHistory,
    last: Option<RouteResult>,
}

impl Session {
    pub fn new(planner: RoutePlanner) -> Self {
        Self {
            planner,
            history: TripHistory::new(),
            last: None,
        }
    }

    pub fn history(&self) -> &TripHistory {
        &self.history
    }

    /// Handle one input line and return the text to print
    pub async fn handle_line(&mut self, line: &str) -> (Step, String) {
        let line = line.trim();
        match line {
            "" => (Step::Continue, String::new()),
            ":quit" | ":q" | ":exit" => (Step::Quit, String::new()),
            ":help" => (Step::Continue, format!("{HELP}\n")),
            ":history" | ":dashboard" => (Step::Continue, render::dashboard(&self.history)),
            ":save" => (Step::Continue, self.save("")),
            _ if line.starts_with(":save ") => (Step::Continue, self.save(line[6..].trim())),
            _ => match line.split_once("->") {
                Some((source, destination)) => (Step::Continue, self.plan(source, destination).await),
                None => (Step::Continue, format!("{HELP}\n")),
            },
        }
    }

    async fn plan(&mut self, source: &str, destination: &str) -> String {
        match self.planner.plan(source.trim(), destination.trim()).await {
            Ok(result) => {
                if let Some(trip) = NewTrip::from_result(&result) {
                    self.history.record(trip);
                }
                let text = render::route(&result);
                self.last = Some(result);
                text
            }
            Err(e) => format!("❌ {e}\n"),
        }
    }

    fn save(&self, file: &str) -> String {
        if file.is_empty() {
            return "Usage: :save FILE\n".to_string();
        }
        let Some(result) = &self.last else {
            return "Nothing to save yet - plan a route first.\n".to_string();
        };
        match export::write_json(Path::new(file), result, OverwriteBehavior::NeverOverwrite) {
            Ok(()) => format!("📁 Saved to: {file}\n"),
            Err(e) => format!("❌ {e}\n"),
        }
    }

    /// Read lines until end of input or `:quit`
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{HELP}")?;
        let mut lines = input.lines();

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let (step, text) = self.handle_line(&line).await;
            write!(out, "{text}")?;
            if step == Step::Quit {
                break;
            }
        }

        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn test_routes_are_recorded_most_recent_first() {
        let mut session = Session::new(RoutePlanner::offline());

        let (step, text) = session.handle_line("Delhi -> Mumbai").await;
        assert_eq!(step, Step::Continue);
        assert!(text.contains("Eco choice"));

        session.handle_line("Pune -> Thane").await;
        assert_eq!(session.history().total_trips(), 2);
        assert_eq!(session.history().latest().unwrap().source, "Pune");
        assert_eq!(session.last.as_ref().unwrap().destination, "Thane");
    }

    #[tokio::test]
    async fn test_errors_do_not_record_trips() {
        let mut session = Session::new(RoutePlanner::offline());
        let (_, text) = session.handle_line("Delhi -> Mumbay").await;
        assert!(text.contains("Did you mean 'Mumbai'?"));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_commands() {
        let mut session = Session::new(RoutePlanner::offline());
        assert!(session.handle_line(":history").await.1.contains("No trips yet"));
        assert!(session.handle_line("just text").await.1.contains("source -> destination"));
        assert_eq!(session.handle_line(":quit").await.0, Step::Quit);
    }

    #[tokio::test]
    async fn test_save_exports_last_result() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("route.json");
        let command = format!(":save {}", file.display());

        let mut session = Session::new(RoutePlanner::offline());
        assert!(session.handle_line(&command).await.1.contains("Nothing to save"));

        session.handle_line("Delhi -> Mumbai").await;
        assert!(session.handle_line(&command).await.1.contains("Saved to"));
        let saved: RouteResult =
            serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(&saved, session.last.as_ref().unwrap());

        // Existing files are never overwritten from a session
        assert!(session.handle_line(&command).await.1.contains("already exists"));
    }

    #[tokio::test]
    async fn test_save_needs_a_separate_file_argument() {
        let mut session = Session::new(RoutePlanner::offline());
        session.handle_line("Delhi -> Mumbai").await;

        assert!(session.handle_line(":save").await.1.contains("Usage: :save FILE"));
        assert!(session.handle_line(":save   ").await.1.contains("Usage: :save FILE"));
        // Not a command: falls through to the help text and writes nothing
        let (_, text) = session.handle_line(":savefoo").await;
        assert!(text.contains("source -> destination"));
        assert!(!std::path::Path::new("foo").exists());
    }

    #[tokio::test]
    async fn test_run_stops_at_quit() {
        let input = BufReader::new(&b"Delhi -> Jaipur\n:history\n:quit\nPune -> Thane\n"[..]);
        let mut out = Vec::new();

        let mut session = Session::new(RoutePlanner::offline());
        session.run(input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total trips: 1"));
        assert_eq!(session.history().total_trips(), 1);
    }
}
