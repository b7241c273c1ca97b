//! Template printing.
//!
//! Elements are re-emitted from tag, props and children; every other node
//! prints its stored source, so untouched text, comments and
//! interpolations come back byte for byte.

use super::ast::{MarkupNode, is_void_tag};

/// Print a node tree back to template source. The root wrapper prints only
/// its children.
pub fn print(node: &MarkupNode) -> String {
    match node {
        MarkupNode::Root(root) => root.children.iter().map(print).collect(),
        MarkupNode::Element(el) => {
            let mut out = String::from("<");
            out.push_str(&el.tag);
            for prop in &el.props {
                out.push(' ');
                out.push_str(prop.source());
            }
            if is_void_tag(&el.tag) || el.self_closing {
                out.push_str(" />");
            } else {
                out.push('>');
                for child in &el.children {
                    out.push_str(&print(child));
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
            out
        }
        MarkupNode::Text(text) => text.source.clone(),
        MarkupNode::Interpolation(interp) => interp.source.clone(),
        MarkupNode::Comment(raw)
        | MarkupNode::Compound(raw)
        | MarkupNode::If(raw)
        | MarkupNode::IfBranch(raw)
        | MarkupNode::For(raw)
        | MarkupNode::TextCall(raw)
        | MarkupNode::VNodeCall(raw) => raw.source.clone(),
    }
}
