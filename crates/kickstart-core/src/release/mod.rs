//! Version bump and the release flow
//!
//! This module provides:
//! - The release state machine (`Release`)
//! - The interaction seam it asks questions through, plus preset answers
//! - The standalone bump used by `kickstart bump`

pub mod bump;
pub mod interaction;
pub mod orchestrator;

pub use bump::{bump_version, bump_version_str, BumpResult};
pub use interaction::{DirtyTreeChoice, PresetAnswers, ReleaseInteraction};
pub use orchestrator::{Release, ReleaseReport, ReleaseState};
