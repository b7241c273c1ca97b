//! Template node tree.
//!
//! Non-element nodes carry their exact original source text, which the
//! printer emits verbatim unless a rewrite installed a replacement.
//! Elements are reconstructed structurally from tag, props and children.

use std::ops::Range;

/// HTML elements that never take a closing tag.
pub const VOID_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|void| tag.eq_ignore_ascii_case(void))
}

/// One node of a parsed template.
///
/// The compound, control-flow and call variants only appear in trees built
/// by a transform stage; the parser emits elements, text, comments and
/// interpolations. The rewriter and printer pass the former through by
/// their stored source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Root(RootNode),
    Element(ElementNode),
    Text(TextNode),
    Comment(RawNode),
    Interpolation(InterpolationNode),
    Compound(RawNode),
    If(RawNode),
    IfBranch(RawNode),
    For(RawNode),
    TextCall(RawNode),
    VNodeCall(RawNode),
}

/// Synthesized wrapper over the template's top level nodes. Prints as the
/// concatenation of its children, never as a tag of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootNode {
    pub children: Vec<MarkupNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub tag: String,
    /// Attributes and directives in source order.
    pub props: Vec<AttrNode>,
    pub children: Vec<MarkupNode>,
    /// Written as `<tag ... />` in the source.
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationNode {
    /// Inner expression, surrounding whitespace trimmed.
    pub content: String,
    /// Full `{{ ... }}` source.
    pub source: String,
}

/// Any node the rewriter never touches; printed from its source slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNode {
    pub source: String,
}

/// An element prop, in the position it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrNode {
    Static(StaticAttr),
    Directive(DirectiveAttr),
}

impl AttrNode {
    pub fn source(&self) -> &str {
        match self {
            AttrNode::Static(attr) => &attr.source,
            AttrNode::Directive(dir) => &dir.source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAttr {
    pub name: String,
    /// Value with the quotes stripped; `None` for bare attributes.
    pub value: Option<String>,
    pub source: String,
}

/// A `v-`, `:`, `@` or `#` prop. `name` keeps the prefix as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveAttr {
    pub name: String,
    pub expression: Option<String>,
    /// Where the expression sits inside `source`; cleared once a rewrite
    /// replaces the source, since the offsets only fit the original text.
    pub expression_range: Option<Range<usize>>,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_tag_lookup() {
        assert!(is_void_tag("br"));
        assert!(is_void_tag("IMG"));
        assert!(!is_void_tag("div"));
        assert!(!is_void_tag("template"));
    }

    #[test]
    fn test_attr_source_accessor() {
        let attr = AttrNode::Static(StaticAttr {
            name: "class".to_string(),
            value: Some("box".to_string()),
            source: "class=\"box\"".to_string(),
        });
        assert_eq!(attr.source(), "class=\"box\"");

        let dir = AttrNode::Directive(DirectiveAttr {
            name: ":title".to_string(),
            expression: Some("msg".to_string()),
            expression_range: Some(8..11),
            source: ":title=\"msg\"".to_string(),
        });
        assert_eq!(dir.source(), ":title=\"msg\"");
    }
}
