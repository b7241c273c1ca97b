//! Hanex - Chinese text extraction codemod for Vue and JavaScript projects
//!
//! Hanex scans `.js` and `.vue` sources for hardcoded Chinese text, replaces
//! each occurrence with a translation call keyed by a content hash of the
//! text, and collects the key -> text pairs into a JSON locale catalog.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, reporting)
//! - `config`: Configuration file loading and parsing
//! - `orchestrator`: Per-file dispatch over the rewriters
//! - `script`: JavaScript/TypeScript parsing and literal rewriting
//! - `template`: Vue template markup parsing, rewriting, and printing
//! - `sfc`: Single-file component block splitting
//! - `catalog`: The key -> text catalog backing one locale file
//! - `formatter`: Prettier integration for rewritten components
//! - `scanner`: Project file discovery
//! - `key`: Content-hash key derivation
//! - `utils`: Shared utility functions

pub mod catalog;
pub mod cli;
pub mod config;
pub mod formatter;
pub mod key;
pub mod orchestrator;
pub mod scanner;
pub mod script;
pub mod sfc;
pub mod template;
pub mod utils;
