//! Cursor parser for Vue template markup.
//!
//! Produces the node tree in `ast`. Offsets are byte offsets into the
//! template text; every delimiter the scanner stops at is ASCII, so byte
//! scanning never splits a multi-byte character.

use anyhow::{Result, bail};

use super::ast::{
    AttrNode, DirectiveAttr, ElementNode, InterpolationNode, MarkupNode, RawNode, RootNode,
    StaticAttr, TextNode, is_void_tag,
};

/// Parse template markup into a tree rooted at a tag-less wrapper node.
pub fn parse_template(source: &str) -> Result<MarkupNode> {
    let mut parser = TemplateParser { source, pos: 0 };
    let children = parser.parse_children()?;
    if parser.pos < source.len() {
        bail!(
            "unexpected closing tag at offset {} in template",
            parser.pos
        );
    }
    Ok(MarkupNode::Root(RootNode { children }))
}

struct TemplateParser<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + ahead).copied()
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.source.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        let bytes = self.source.as_bytes();
        while self.pos < bytes.len() && pred(bytes[self.pos]) {
            self.pos += 1;
        }
        &self.source[start..self.pos]
    }

    /// Children of the current position, up to a closing tag or the end of
    /// input. The closing tag itself is left for the caller.
    fn parse_children(&mut self) -> Result<Vec<MarkupNode>> {
        let mut children = Vec::new();
        while self.pos < self.source.len() {
            if self.rest().starts_with("</") {
                break;
            }
            if self.rest().starts_with("<!--") {
                children.push(self.parse_comment()?);
            } else if self.peek(0) == Some(b'<')
                && self.peek(1).is_some_and(|b| b.is_ascii_alphabetic())
            {
                children.push(self.parse_element()?);
            } else if self.rest().starts_with("{{") {
                children.push(self.parse_interpolation()?);
            } else {
                children.push(self.parse_text());
            }
        }
        Ok(children)
    }

    fn parse_comment(&mut self) -> Result<MarkupNode> {
        let start = self.pos;
        let Some(end) = self.rest().find("-->") else {
            bail!("unclosed comment at offset {}", start);
        };
        self.pos += end + 3;
        Ok(MarkupNode::Comment(RawNode {
            source: self.source[start..self.pos].to_string(),
        }))
    }

    fn parse_interpolation(&mut self) -> Result<MarkupNode> {
        let start = self.pos;
        let Some(end) = self.rest().find("}}") else {
            bail!("unclosed interpolation at offset {}", start);
        };
        let content = self.source[start + 2..start + end].trim().to_string();
        self.pos = start + end + 2;
        Ok(MarkupNode::Interpolation(InterpolationNode {
            content,
            source: self.source[start..self.pos].to_string(),
        }))
    }

    /// Text up to the next interpolation or tag-like `<`. A lone `<` (as in
    /// `1 < 2`) stays part of the text.
    fn parse_text(&mut self) -> MarkupNode {
        let start = self.pos;
        let bytes = self.source.as_bytes();
        // The current character was already ruled out as a node start.
        let mut pos = self.pos + 1;
        while pos < bytes.len() {
            let byte = bytes[pos];
            if byte == b'{' && bytes.get(pos + 1) == Some(&b'{') {
                break;
            }
            if byte == b'<'
                && bytes
                    .get(pos + 1)
                    .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'/' || *b == b'!')
            {
                break;
            }
            pos += 1;
        }
        self.pos = pos.min(bytes.len());
        MarkupNode::Text(TextNode {
            source: self.source[start..self.pos].to_string(),
        })
    }

    fn parse_element(&mut self) -> Result<MarkupNode> {
        let start = self.pos;
        self.pos += 1;
        let tag = self
            .take_while(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.')
            .to_string();

        let (props, self_closing) = self.parse_attrs(&tag, start)?;
        if self_closing || is_void_tag(&tag) {
            return Ok(MarkupNode::Element(ElementNode {
                tag,
                props,
                children: Vec::new(),
                self_closing,
            }));
        }

        let children = self.parse_children()?;
        self.expect_closing(&tag, start)?;
        Ok(MarkupNode::Element(ElementNode {
            tag,
            props,
            children,
            self_closing: false,
        }))
    }

    /// Props of an open tag, consuming the terminating `>` or `/>`.
    fn parse_attrs(&mut self, tag: &str, tag_start: usize) -> Result<(Vec<AttrNode>, bool)> {
        let mut props = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek(0) {
                None => bail!("unclosed tag <{}> at offset {}", tag, tag_start),
                Some(b'>') => {
                    self.pos += 1;
                    return Ok((props, false));
                }
                Some(b'/') if self.peek(1) == Some(b'>') => {
                    self.pos += 2;
                    return Ok((props, true));
                }
                Some(_) => props.push(self.parse_attr()?),
            }
        }
    }

    fn parse_attr(&mut self) -> Result<AttrNode> {
        let start = self.pos;
        let name = self
            .take_while(|b| !b.is_ascii_whitespace() && b != b'=' && b != b'>' && b != b'/')
            .to_string();
        if name.is_empty() {
            bail!("malformed attribute at offset {}", start);
        }
        let name_end = self.pos;

        self.skip_whitespace();
        let mut value_range = None;
        if self.peek(0) == Some(b'=') {
            self.pos += 1;
            self.skip_whitespace();
            value_range = Some(self.parse_attr_value(start)?);
        } else {
            // Bare attribute; the whitespace belongs to the next prop.
            self.pos = name_end;
        }

        let source = self.source[start..self.pos].to_string();
        let value = value_range
            .clone()
            .map(|range| self.source[range].to_string());

        let is_directive = name.starts_with(':')
            || name.starts_with('@')
            || name.starts_with('#')
            || name.starts_with("v-");
        if is_directive {
            Ok(AttrNode::Directive(DirectiveAttr {
                name,
                expression: value,
                expression_range: value_range.map(|range| range.start - start..range.end - start),
                source,
            }))
        } else {
            Ok(AttrNode::Static(StaticAttr {
                name,
                value,
                source,
            }))
        }
    }

    /// Quoted or unquoted attribute value; returns the byte range of the
    /// value text (quotes excluded) in the template.
    fn parse_attr_value(&mut self, attr_start: usize) -> Result<std::ops::Range<usize>> {
        match self.peek(0) {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let value_start = self.pos;
                let Some(end) = self.rest().find(quote as char) else {
                    bail!("unclosed attribute value at offset {}", attr_start);
                };
                self.pos = value_start + end + 1;
                Ok(value_start..value_start + end)
            }
            _ => {
                let value_start = self.pos;
                let bytes = self.source.as_bytes();
                while self.pos < bytes.len() {
                    let byte = bytes[self.pos];
                    if byte.is_ascii_whitespace()
                        || byte == b'>'
                        || (byte == b'/' && bytes.get(self.pos + 1) == Some(&b'>'))
                    {
                        break;
                    }
                    self.pos += 1;
                }
                Ok(value_start..self.pos)
            }
        }
    }

    fn expect_closing(&mut self, tag: &str, element_start: usize) -> Result<()> {
        if !self.rest().starts_with("</") {
            bail!("unclosed element <{}> at offset {}", tag, element_start);
        }
        self.pos += 2;
        let found = self
            .take_while(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.')
            .to_string();
        if found != tag {
            bail!(
                "mismatched closing tag </{}> for <{}> at offset {}",
                found,
                tag,
                element_start
            );
        }
        self.skip_whitespace();
        if self.peek(0) != Some(b'>') {
            bail!("malformed closing tag </{}> at offset {}", found, self.pos);
        }
        self.pos += 1;
        Ok(())
    }
}
