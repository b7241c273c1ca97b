//! Chinese text replacement over the template tree.
//!
//! Walks props before children, children left to right. Static text and
//! attribute values become `$t` calls directly; directive expressions and
//! interpolation bodies go through the script rewriter in template mode.

use anyhow::Result;

use super::ast::{AttrNode, DirectiveAttr, InterpolationNode, MarkupNode};
use crate::catalog::CatalogSink;
use crate::key::key_for;
use crate::script::{
    RewriteOptions, RewriteOutcome, ScriptScope, TEMPLATE_CALLEE, rewrite_expression,
};
use crate::utils::contains_chinese;

/// Rewrite a parsed template in place. Returns the number of replacements.
pub fn rewrite_tree(
    root: &mut MarkupNode,
    options: &RewriteOptions,
    sink: &mut dyn CatalogSink,
) -> Result<usize> {
    let mut expr_options = *options;
    expr_options.scope = ScriptScope::TemplateExpr;

    let mut rewriter = TreeRewriter {
        options: expr_options,
        sink,
        replaced: 0,
    };
    rewriter.rewrite_node(root)?;
    Ok(rewriter.replaced)
}

struct TreeRewriter<'a> {
    options: RewriteOptions<'a>,
    sink: &'a mut dyn CatalogSink,
    replaced: usize,
}

impl TreeRewriter<'_> {
    fn rewrite_node(&mut self, node: &mut MarkupNode) -> Result<()> {
        match node {
            MarkupNode::Root(root) => {
                for child in &mut root.children {
                    self.rewrite_node(child)?;
                }
            }
            MarkupNode::Element(el) => {
                for prop in &mut el.props {
                    self.rewrite_prop(prop)?;
                }
                for child in &mut el.children {
                    self.rewrite_node(child)?;
                }
            }
            MarkupNode::Text(text) => {
                let trimmed = text.source.trim();
                if !contains_chinese(trimmed) {
                    return Ok(());
                }
                let trimmed = trimmed.to_string();
                let key = key_for(&trimmed);
                self.sink.insert(key.clone(), trimmed)?;
                let content = format!("{}('{}')", TEMPLATE_CALLEE, key);
                *node = MarkupNode::Interpolation(InterpolationNode {
                    source: format!("{{{{ {} }}}}", content),
                    content,
                });
                self.replaced += 1;
            }
            MarkupNode::Interpolation(interp) => {
                if !contains_chinese(&interp.content) {
                    return Ok(());
                }
                let content = interp.content.replace(['\r', '\n'], "");
                let outcome = self.rewrite_embedded(&content)?;
                if outcome.replaced > 0 {
                    interp.source = format!("{{{{ {} }}}}", outcome.code);
                    interp.content = outcome.code;
                    self.replaced += outcome.replaced;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn rewrite_prop(&mut self, prop: &mut AttrNode) -> Result<()> {
        match prop {
            AttrNode::Directive(dir) => {
                let (Some(expression), Some(range)) = (&dir.expression, &dir.expression_range)
                else {
                    return Ok(());
                };
                if !contains_chinese(expression) {
                    return Ok(());
                }
                let outcome = self.rewrite_embedded(expression)?;
                if outcome.replaced > 0 {
                    let mut source =
                        String::with_capacity(dir.source.len() + outcome.code.len());
                    source.push_str(&dir.source[..range.start]);
                    source.push_str(&outcome.code);
                    source.push_str(&dir.source[range.end..]);
                    dir.source = source;
                    dir.expression = Some(outcome.code);
                    dir.expression_range = None;
                    self.replaced += outcome.replaced;
                }
            }
            AttrNode::Static(attr) => {
                let Some(value) = &attr.value else {
                    return Ok(());
                };
                if !contains_chinese(value) {
                    return Ok(());
                }
                // The unquoted value is what gets keyed, never the raw
                // name="..." source.
                let value = value.clone();
                let name = attr.name.clone();
                let key = key_for(&value);
                self.sink.insert(key.clone(), value)?;
                let expression = format!("{}('{}')", TEMPLATE_CALLEE, key);
                *prop = AttrNode::Directive(DirectiveAttr {
                    name: format!(":{}", name),
                    source: format!(":{}=\"{}\"", name, expression),
                    expression: Some(expression),
                    expression_range: None,
                });
                self.replaced += 1;
            }
        }
        Ok(())
    }

    /// Attribute values are markup-quoted, so an expression that fails to
    /// parse is retried with single quotes turned into backticks. That is
    /// the only way multiline string values survive a reparse.
    fn rewrite_embedded(&mut self, content: &str) -> Result<RewriteOutcome> {
        match rewrite_expression(content, &self.options, self.sink) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                if !content.contains('\'') {
                    return Err(err);
                }
                let normalized = content.replace('\'', "`");
                rewrite_expression(&normalized, &self.options, self.sink).map_err(|_| err)
            }
        }
    }
}
