use crate::actions::{launch_app, open_externally};
use crate::data::{Candidate, list_files};
use crate::dispatch::Host;
use crate::error::Result;
use crate::paths::{Subsystem, base_name};
use crate::picker::{PickMode, Picker};
use crate::tui::run_picker;
use std::path::PathBuf;

/// Host backed by the terminal: full-screen pickers, stderr notices and
/// detached child processes.
pub struct TerminalHost {
    subsystem: Subsystem,
    cwd: PathBuf,
}

impl TerminalHost {
    pub fn new(subsystem: Subsystem, cwd: PathBuf) -> Self {
        Self { subsystem, cwd }
    }
}

impl Host for TerminalHost {
    async fn active_file(&mut self, placeholder: &str) -> Result<Option<PathBuf>> {
        let files = list_files(&self.cwd)?;
        let labels = files
            .iter()
            .map(|path| base_name(&path.to_string_lossy()).to_string())
            .collect();

        let picked = run_picker(Picker::new(placeholder, labels, PickMode::Single)).await?;
        Ok(picked
            .and_then(|indices| indices.first().copied())
            .and_then(|idx| files.get(idx).cloned()))
    }

    async fn pick_one(&mut self, items: &[String], placeholder: &str) -> Result<Option<String>> {
        let picked = run_picker(Picker::new(placeholder, items.to_vec(), PickMode::Single)).await?;
        Ok(picked
            .and_then(|indices| indices.first().copied())
            .and_then(|idx| items.get(idx).cloned()))
    }

    async fn pick_many(
        &mut self,
        items: &[String],
        placeholder: &str,
    ) -> Result<Option<Vec<String>>> {
        let picked =
            run_picker(Picker::new(placeholder, items.to_vec(), PickMode::Multiple)).await?;
        Ok(picked.map(|indices| {
            indices
                .into_iter()
                .filter_map(|idx| items.get(idx).cloned())
                .collect()
        }))
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("Error: {}", message);
    }

    fn launch(&mut self, file_path: &str, candidate: Option<Candidate<'_>>) -> Result<()> {
        launch_app(file_path, candidate, &self.subsystem)
    }

    fn open_externally(&mut self, uri: &str) -> Result<()> {
        open_externally(uri)
    }
}
