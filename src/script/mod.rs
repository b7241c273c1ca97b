//! Rewriting of JavaScript code.
//!
//! Chinese string and template literals are replaced by translation calls.
//! Replacements are spliced into the original source text, so untouched
//! code keeps its exact formatting, comments and quoting.

mod edit;
mod parser;
mod rewriter;

pub use edit::{SourceEdit, apply_edits};
pub use parser::{ParsedScript, ScriptSyntax, parse_expression, parse_program};
pub use rewriter::{
    DISABLE_MARKER, RewriteOptions, RewriteOutcome, ScriptScope, TEMPLATE_CALLEE, rewrite,
    rewrite_expression,
};
