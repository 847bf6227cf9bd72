//! `marktex watch` command implementation.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use marktex_layout::Settings;
use marktex_renderer::{Pipeline, RenderTarget};
use notify::{RecursiveMode, Watcher};
use tracing::debug;

use super::DocumentArgs;
use super::render::{report_warnings, target, write_pass};
use crate::error::CliError;
use crate::output::Output;

/// Quiet period that coalesces bursts of write events from editors.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Path to the Markdown file.
    input: PathBuf,

    /// Output HTML file.
    #[arg(short, long)]
    output: PathBuf,

    /// Render for print instead of screen.
    #[arg(long)]
    print: bool,

    #[command(flatten)]
    document: DocumentArgs,
}

impl WatchArgs {
    /// Execute the watch command. Runs until the watcher shuts down.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.document.load_config()?;
        let mut session = WatchSession {
            pipeline: Pipeline::new(),
            settings: config.document,
            target: target(self.print),
            input: self.input,
            output: self.output,
        };

        session.render(&output)?;

        let (tx, rx) = mpsc::channel();
        let watched_name = session.input.file_name().map(ToOwned::to_owned);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let Ok(event) = res else { return };
            if !matches!(
                event.kind,
                notify::EventKind::Create(_) | notify::EventKind::Modify(_)
            ) {
                return;
            }
            if event
                .paths
                .iter()
                .any(|path| path.file_name() == watched_name.as_deref())
            {
                let _ = tx.send(());
            }
        })?;
        // Editors often replace the file instead of writing in place, so the
        // parent directory is watched rather than the file itself.
        watcher.watch(&watch_dir(&session.input), RecursiveMode::NonRecursive)?;
        output.highlight(&format!(
            "Watching {} (Ctrl+C to stop)",
            session.input.display()
        ));

        while rx.recv().is_ok() {
            while rx.recv_timeout(DEBOUNCE).is_ok() {}
            if let Err(err) = session.render(&output) {
                output.error(&format!("Error: {err}"));
            }
        }
        Ok(())
    }
}

struct WatchSession {
    pipeline: Pipeline,
    settings: Settings,
    target: RenderTarget,
    input: PathBuf,
    output: PathBuf,
}

impl WatchSession {
    /// Render the current input and write it if the pass is still the newest.
    fn render(&mut self, output: &Output) -> Result<(), CliError> {
        let text = std::fs::read_to_string(&self.input)?;
        let pass = self.pipeline.run(&text, &self.settings);
        report_warnings(output, &pass);
        let id = pass.id;
        debug!(pass = %id, input = %self.input.display(), bytes = text.len(), "Watch pass rendered");
        if let Some(pass) = self.pipeline.apply(pass) {
            write_pass(&pass, self.target, &self.output)?;
            output.success(&format!("Rendered pass {id} -> {}", self.output.display()));
        }
        Ok(())
    }
}

fn watch_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_watch_dir() {
        assert_eq!(watch_dir(Path::new("notes/a.md")), PathBuf::from("notes"));
        assert_eq!(watch_dir(Path::new("a.md")), PathBuf::from("."));
    }

    #[test]
    fn test_session_rerenders_latest_text() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        let html = dir.path().join("doc.html");
        std::fs::write(&input, "# First").unwrap();

        let mut session = WatchSession {
            pipeline: Pipeline::new(),
            settings: Settings::default(),
            target: RenderTarget::Screen,
            input: input.clone(),
            output: html.clone(),
        };
        let output = Output::new();

        session.render(&output).unwrap();
        assert!(std::fs::read_to_string(&html).unwrap().contains("First"));

        std::fs::write(&input, "# Second").unwrap();
        session.render(&output).unwrap();
        let rendered = std::fs::read_to_string(&html).unwrap();
        assert!(rendered.contains("Second"));
        assert!(!rendered.contains("First"));
        assert_eq!(
            session.pipeline.sequencer().applied().map(|id| id.to_string()),
            Some("#2".to_owned())
        );
    }
}
