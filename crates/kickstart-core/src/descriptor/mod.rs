//! Project descriptor (`package.json`) handling
//!
//! This module provides:
//! - A typed, order-preserving view over the descriptor document
//! - The editor that loads, mutates and saves it
//! - Default field merging used by `init`
//! - Version parsing and bump rules

pub mod defaults;
pub mod document;
pub mod editor;
pub mod version;

pub use defaults::DefaultFields;
pub use document::{Author, Bin, Descriptor};
pub use editor::DescriptorEditor;
pub use version::{bump, parse_lenient, ReleaseKind};
