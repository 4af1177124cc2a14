//! Syntax source model for Go files.
//!
//! Turns raw Go source into the input route discovery consumes: a
//! tree-sitter tree, the original bytes, and an import table mapping each
//! import path to its effective local alias.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ .go files       │────▶│ SourceLoader │────▶│ ParsedSource  │
//! └─────────────────┘     │ (tree-sitter)│     │ (tree,imports)│
//!                         └──────────────┘     └───────────────┘
//!                                                      │
//!                                                      ▼
//!                                              ┌───────────────┐
//!                                              │ syntax helpers│
//!                                              │ (call shapes) │
//!                                              └───────────────┘
//! ```
//!
//! Files with syntax errors are rejected by the loader; the scanner records
//! the error against the file and moves on.

mod loader;
mod source;
pub mod syntax;

pub use loader::SourceLoader;
pub use source::{default_alias, ParsedSource, Position};
