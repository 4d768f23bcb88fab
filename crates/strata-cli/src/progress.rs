//! Console narration of pipeline events.

use std::io::{self, IsTerminal};
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use strata_core::application::{ProgressSink, ScaffoldEvent};

use crate::cli::OutputFormat;
use crate::output::OutputManager;

/// Prints one line per event and, on a terminal, a spinner for the stage
/// that is currently running.
pub struct ConsoleProgress {
    output: OutputManager,
    spinner: Mutex<Option<ProgressBar>>,
    animate: bool,
}

impl ConsoleProgress {
    pub fn new(output: OutputManager) -> Self {
        let animate = output.format() == OutputFormat::Human
            && !output.is_quiet()
            && io::stderr().is_terminal();
        Self {
            output,
            spinner: Mutex::new(None),
            animate,
        }
    }

    fn start_spinner(&self, message: String) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(previous) = slot.take() {
            previous.finish_and_clear();
        }
        if !self.animate {
            return;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(100));
        *slot = Some(bar);
    }

    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }

    /// Write a line without tearing the spinner.
    fn line(&self, write: impl FnOnce(&OutputManager) -> io::Result<()>) {
        let result = match self.spinner.lock() {
            Ok(slot) => match slot.as_ref() {
                Some(bar) => bar.suspend(|| write(&self.output)),
                None => write(&self.output),
            },
            Err(_) => write(&self.output),
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "Could not write progress line");
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_event(&self, event: &ScaffoldEvent) {
        match event {
            ScaffoldEvent::StageStarted(stage) => {
                self.line(|o| o.info(&format!("{stage}...")));
                self.start_spinner(stage.to_string());
            }
            ScaffoldEvent::LayerCreated { name, template } => {
                self.line(|o| o.success(&format!("Created {name} ({})", template.as_str())));
            }
            ScaffoldEvent::SolutionCreated { path } => {
                self.line(|o| o.success(&format!("Created solution {}", path.display())));
            }
            ScaffoldEvent::LayerRegistered { name } => {
                self.line(|o| o.print(&format!("  {name} added to solution")));
            }
            ScaffoldEvent::ReferencesAdded { from, to } => {
                self.line(|o| o.success(&format!("{from} -> {}", to.join(", "))));
            }
            ScaffoldEvent::SupportFileWritten { path } => {
                self.line(|o| o.success(&format!("Created {}", path.display())));
            }
            ScaffoldEvent::RestoreCompleted => {
                self.stop_spinner();
                self.line(|o| o.success("Packages restored"));
            }
            ScaffoldEvent::RollbackStarted { entries } => {
                self.stop_spinner();
                self.line(|o| o.warning(&format!("Rolling back {entries} recorded path(s)...")));
            }
            ScaffoldEvent::RollbackRemoved { path } => {
                self.line(|o| o.warning(&format!("Removed {}", path.display())));
            }
            ScaffoldEvent::RollbackFailed { path, reason } => {
                self.line(|o| o.error(&format!("Could not remove {}: {reason}", path.display())));
            }
            ScaffoldEvent::RollbackCompleted => {
                self.line(|o| o.warning("Rollback completed"));
            }
        }
    }
}

impl Drop for ConsoleProgress {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use strata_core::application::Stage;
    use strata_core::domain::TemplateKind;

    use crate::cli::GlobalArgs;
    use crate::config::AppConfig;

    fn progress(format: OutputFormat) -> ConsoleProgress {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            output_format: format,
        };
        ConsoleProgress::new(OutputManager::new(&args, &AppConfig::default()))
    }

    #[test]
    fn plain_output_never_animates() {
        let p = progress(OutputFormat::Plain);
        assert!(!p.animate);
        p.on_event(&ScaffoldEvent::StageStarted(Stage::Structure));
        assert!(p.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn every_event_is_handled() {
        let p = progress(OutputFormat::Plain);
        let events = [
            ScaffoldEvent::StageStarted(Stage::Structure),
            ScaffoldEvent::LayerCreated {
                name: "Acme.API".into(),
                template: TemplateKind::WebApi,
            },
            ScaffoldEvent::SolutionCreated {
                path: PathBuf::from("/tmp/work/Acme/Acme.sln"),
            },
            ScaffoldEvent::LayerRegistered {
                name: "Acme.API".into(),
            },
            ScaffoldEvent::ReferencesAdded {
                from: "Acme.API".into(),
                to: vec!["Acme.Domain".into()],
            },
            ScaffoldEvent::SupportFileWritten {
                path: PathBuf::from("/tmp/work/Acme/Dockerfile"),
            },
            ScaffoldEvent::RestoreCompleted,
            ScaffoldEvent::RollbackStarted { entries: 2 },
            ScaffoldEvent::RollbackRemoved {
                path: PathBuf::from("/tmp/work/Acme"),
            },
            ScaffoldEvent::RollbackFailed {
                path: PathBuf::from("/tmp/work/Acme/Dockerfile"),
                reason: "busy".into(),
            },
            ScaffoldEvent::RollbackCompleted,
        ];
        for event in &events {
            p.on_event(event);
        }
        assert!(p.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn json_output_is_silent() {
        let p = progress(OutputFormat::Json);
        assert!(!p.animate);
        p.on_event(&ScaffoldEvent::RestoreCompleted);
    }
}
