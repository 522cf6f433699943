//! Questions the release flow asks, and a non-interactive answer set

use super::orchestrator::ReleaseState;
use crate::descriptor::ReleaseKind;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// How to get a dirty working tree to clean before releasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DirtyTreeChoice {
    Commit,
    Stash,
    #[default]
    Abort,
}

impl DirtyTreeChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirtyTreeChoice::Commit => "commit",
            DirtyTreeChoice::Stash => "stash",
            DirtyTreeChoice::Abort => "abort",
        }
    }
}

impl fmt::Display for DirtyTreeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirtyTreeChoice {
    type Err = Error;

    /// Accepts `c`/`s`/`a` and the full words; empty input means abort.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "commit" => Ok(DirtyTreeChoice::Commit),
            "s" | "stash" => Ok(DirtyTreeChoice::Stash),
            "" | "a" | "abort" => Ok(DirtyTreeChoice::Abort),
            _ => Err(Error::InvalidChoice(s.trim().to_string())),
        }
    }
}

/// Everything the release flow needs from the person running it.
///
/// Answers come back as raw text where the orchestrator owns validation, so
/// a bad answer is rejected before anything is touched.
pub trait ReleaseInteraction {
    /// Raw release kind; `default` is offered as the pre-filled answer.
    fn release_kind(&mut self, default: ReleaseKind) -> Result<String>;

    /// Show `pending` (porcelain status) and ask commit, stash or abort.
    fn dirty_tree_choice(&mut self, pending: &str) -> Result<String>;

    fn commit_message(&mut self, default: &str) -> Result<String>;

    /// Whether to pop the pre-release stash now. Default answer is no.
    fn pop_stash(&mut self) -> Result<bool>;

    /// Progress notification before each state is entered.
    fn on_state(&mut self, _state: &ReleaseState) {}
}

/// Fixed answers, used by `--yes` runs and tests
#[derive(Debug, Clone, Default)]
pub struct PresetAnswers {
    pub kind: Option<String>,
    pub dirty_tree: Option<String>,
    pub message: Option<String>,
    pub pop_stash: bool,
    /// States observed, in order
    pub states: Vec<ReleaseState>,
}

impl PresetAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn on_dirty(mut self, choice: impl Into<String>) -> Self {
        self.dirty_tree = Some(choice.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_pop_stash(mut self, pop: bool) -> Self {
        self.pop_stash = pop;
        self
    }
}

impl ReleaseInteraction for PresetAnswers {
    fn release_kind(&mut self, default: ReleaseKind) -> Result<String> {
        Ok(self
            .kind
            .clone()
            .unwrap_or_else(|| default.as_str().to_string()))
    }

    fn dirty_tree_choice(&mut self, _pending: &str) -> Result<String> {
        Ok(self
            .dirty_tree
            .clone()
            .unwrap_or_else(|| DirtyTreeChoice::default().as_str().to_string()))
    }

    fn commit_message(&mut self, default: &str) -> Result<String> {
        Ok(self.message.clone().unwrap_or_else(|| default.to_string()))
    }

    fn pop_stash(&mut self) -> Result<bool> {
        Ok(self.pop_stash)
    }

    fn on_state(&mut self, state: &ReleaseState) {
        self.states.push(state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_parsing() {
        assert_eq!("c".parse::<DirtyTreeChoice>().unwrap(), DirtyTreeChoice::Commit);
        assert_eq!(" Stash ".parse::<DirtyTreeChoice>().unwrap(), DirtyTreeChoice::Stash);
        assert_eq!("".parse::<DirtyTreeChoice>().unwrap(), DirtyTreeChoice::Abort);
        assert!(matches!(
            "x".parse::<DirtyTreeChoice>(),
            Err(Error::InvalidChoice(_))
        ));
    }

    #[test]
    fn test_preset_defaults_match_prompt_defaults() {
        let mut answers = PresetAnswers::new();
        assert_eq!(answers.release_kind(ReleaseKind::Patch).unwrap(), "patch");
        assert_eq!(answers.dirty_tree_choice("M a.ts").unwrap(), "abort");
        assert_eq!(answers.commit_message("wip").unwrap(), "wip");
        assert!(!answers.pop_stash().unwrap());
    }

    #[test]
    fn test_preset_pop_answer_comes_from_builder() {
        let mut answers = PresetAnswers::new().with_pop_stash(true);
        assert!(ReleaseInteraction::pop_stash(&mut answers).unwrap());
        assert!(answers.pop_stash().unwrap());
    }
}
