//! Kickstart Core - Shared library for the kickstart CLI
//!
//! This library scaffolds TypeScript packages and drives their release flow.
//! It is split so the flows can run behind any front end, or none at all in
//! tests.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Descriptor editing, version bumps, scaffold file writes,
//!   child process execution
//! - **Layer 2: Workflow Orchestration** - `Scaffolder` for `init`, `Release` for the
//!   release state machine, both generic over `CommandRunner`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use kickstart_core::{ProjectContext, ProcessRunner, Settings};
//! use kickstart_core::release::{PresetAnswers, Release};
//!
//! let ctx = ProjectContext::from_process(std::env::current_dir()?);
//! let settings = Settings::load(&ctx)?;
//! let runner = ProcessRunner::new(&ctx);
//! let mut answers = PresetAnswers::new().on_dirty("stash");
//! let report = Release::new(&ctx, &settings, &runner)
//!     .run(Some("minor"), &mut answers)
//!     .await?;
//! ```

pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod release;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{PackageManager, Settings};
pub use context::ProjectContext;
pub use descriptor::{Descriptor, DescriptorEditor, ReleaseKind};
pub use error::{Error, Result};
pub use release::{Release, ReleaseReport};
pub use runtime::{CapturedOutput, CommandRunner, ProcessRunner};
pub use templates::{ScaffoldOptions, Scaffolder, ScaffoldWriter, WriteOutcome};
