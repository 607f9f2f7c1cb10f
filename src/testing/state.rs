//! State shared between the ordered steps of a single run

use super::report::StepFailure;

/// Values produced by one step and consumed by a later one
///
/// Lives for exactly one run and is passed by `&mut` to each step.
#[derive(Debug, Default)]
pub struct RunState {
    created_story_id: Option<String>,
    edited_title: Option<String>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the id returned by the create step. Empty ids are ignored.
    pub fn record_created(&mut self, id: &str) {
        if !id.is_empty() {
            self.created_story_id = Some(id.to_string());
        }
    }

    pub fn created_story_id(&self) -> Option<&str> {
        self.created_story_id.as_deref()
    }

    /// The created id, or a dependency failure naming what needed it
    pub fn require_story_id(&self, purpose: &str) -> Result<&str, StepFailure> {
        self.created_story_id()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| StepFailure::DependencyMissing {
                message: format!("No story ID available for {}.", purpose),
            })
    }

    /// Remember the title the edit step was acknowledged with
    pub fn record_edited(&mut self, title: &str) {
        self.edited_title = Some(title.to_string());
    }

    pub fn edited_title(&self) -> Option<&str> {
        self.edited_title.as_deref()
    }

    /// Drop the created id once the story has been deleted
    pub fn invalidate(&mut self) {
        self.created_story_id = None;
        self.edited_title = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_fails_fast_when_empty() {
        let state = RunState::new();
        let err = state.require_story_id("editing").unwrap_err();
        assert_eq!(
            err,
            StepFailure::DependencyMissing {
                message: "No story ID available for editing.".to_string()
            }
        );
    }

    #[test]
    fn test_empty_id_is_not_recorded() {
        let mut state = RunState::new();
        state.record_created("");
        assert!(state.created_story_id().is_none());
    }

    #[test]
    fn test_record_then_invalidate() {
        let mut state = RunState::new();
        state.record_created("abc123");
        state.record_edited("New title");
        assert_eq!(state.require_story_id("deletion").unwrap(), "abc123");

        state.invalidate();
        assert!(state.require_story_id("deletion").is_err());
        assert!(state.edited_title().is_none());
    }
}
