//! Scaffold assets, file writing, and the `init` sequence
//!
//! This module provides:
//! - Built-in template assets and `{{key}}` rendering
//! - Template variables derived from the descriptor
//! - The non-clobbering scaffold file writer
//! - The scaffold driver that sequences every `init` step

pub mod assets;
pub mod readme;
pub mod scaffold;
pub mod writer;

pub use assets::{AssetKind, AssetProvider, BuiltinAssets, ScaffoldFile, TemplateVars};
pub use readme::template_vars;
pub use scaffold::{ScaffoldOptions, ScaffoldReport, ScaffoldStep, Scaffolder};
pub use writer::{ScaffoldWriter, WriteOutcome};
