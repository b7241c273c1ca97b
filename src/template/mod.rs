//! Rewriting of Vue template markup.
//!
//! The template is parsed into a small node tree, Chinese text and
//! attribute values are swapped for `$t` calls, and the tree is printed
//! back to source. Embedded expressions (directives, interpolations) are
//! handed to the script rewriter.

pub mod ast;
mod parser;
mod printer;
mod rewriter;

pub use ast::{AttrNode, MarkupNode};
pub use parser::parse_template;
pub use printer::print;
pub use rewriter::rewrite_tree;
