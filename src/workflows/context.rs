use crate::domain::models::ConfirmedMatch;

/// State shared by the steps of one workflow run.
#[derive(Debug, Default)]
pub struct WorkflowContext {
    pub torrents: Vec<ConfirmedMatch>,
    pub completed: Vec<String>,
}

impl WorkflowContext {
    /// Appends after any existing entries; nothing is removed or reordered.
    pub fn extend_torrents(&mut self, matches: impl IntoIterator<Item = ConfirmedMatch>) {
        self.torrents.extend(matches);
    }

    pub fn job_done(&mut self, step: &str) {
        self.completed.push(step.to_string());
    }
}
