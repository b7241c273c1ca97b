//! Vue single file component splitting.
//!
//! Splits a `.vue` document into template, script, script setup, style and
//! custom blocks. Every block keeps its original open tag, inner content
//! and closing tag, so untouched blocks reassemble byte for byte.

use std::sync::LazyLock;

use anyhow::{Result, bail};
use regex::Regex;

static BLOCK_OPEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<([a-zA-Z][a-zA-Z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*?)(/?)>"#).unwrap()
});

static BLOCK_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+)))?"#).unwrap()
});

/// One top level block of a component file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcBlock {
    pub tag: String,
    /// Attributes of the open tag in source order.
    pub attrs: Vec<(String, Option<String>)>,
    /// The open tag exactly as written, including the angle brackets.
    pub open_tag: String,
    pub content: String,
    /// The closing tag as written; empty for a self-closed block.
    pub close_tag: String,
}

impl SfcBlock {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(attr, _)| attr == name)
    }

    /// The block's full original source.
    pub fn source(&self) -> String {
        format!("{}{}{}", self.open_tag, self.content, self.close_tag)
    }
}

/// The named regions of a component file.
#[derive(Debug, Default)]
pub struct SfcDescriptor {
    pub template: Option<SfcBlock>,
    pub script: Option<SfcBlock>,
    pub script_setup: Option<SfcBlock>,
    pub styles: Vec<SfcBlock>,
    pub custom_blocks: Vec<SfcBlock>,
}

/// Split a component document into its blocks.
pub fn parse_descriptor(source: &str) -> Result<SfcDescriptor> {
    let mut descriptor = SfcDescriptor::default();
    let mut pos = 0;

    while pos < source.len() {
        let Some(next) = source[pos..].find('<') else {
            break;
        };
        pos += next;

        if source[pos..].starts_with("<!--") {
            let Some(end) = source[pos..].find("-->") else {
                bail!("unclosed comment at offset {}", pos);
            };
            pos += end + 3;
            continue;
        }

        let Some(caps) = BLOCK_OPEN_REGEX.captures(&source[pos..]) else {
            pos += 1;
            continue;
        };
        let start = pos;
        let tag = caps[1].to_string();
        let attrs = parse_block_attrs(caps.get(2).map_or("", |m| m.as_str()));
        let self_closing = !caps[3].is_empty();
        let open_end = start + caps[0].len();

        let block = if self_closing {
            pos = open_end;
            SfcBlock {
                tag,
                attrs,
                open_tag: source[start..open_end].to_string(),
                content: String::new(),
                close_tag: String::new(),
            }
        } else {
            let (content_end, block_end) = find_block_end(source, open_end, &tag)?;
            pos = block_end;
            SfcBlock {
                tag,
                attrs,
                open_tag: source[start..open_end].to_string(),
                content: source[open_end..content_end].to_string(),
                close_tag: source[content_end..block_end].to_string(),
            }
        };

        match block.tag.as_str() {
            "template" => {
                if descriptor.template.is_some() {
                    bail!("duplicate <template> block");
                }
                descriptor.template = Some(block);
            }
            "script" if block.has_attr("setup") => {
                if descriptor.script_setup.is_some() {
                    bail!("duplicate <script setup> block");
                }
                descriptor.script_setup = Some(block);
            }
            "script" => {
                if descriptor.script.is_some() {
                    bail!("duplicate <script> block");
                }
                descriptor.script = Some(block);
            }
            "style" => descriptor.styles.push(block),
            _ => descriptor.custom_blocks.push(block),
        }
    }

    Ok(descriptor)
}

fn parse_block_attrs(attr_text: &str) -> Vec<(String, Option<String>)> {
    BLOCK_ATTR_REGEX
        .captures_iter(attr_text)
        .map(|caps| {
            let name = caps[1].to_string();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string());
            (name, value)
        })
        .collect()
}

/// End offsets of a block: where the content stops and where the closing
/// tag stops.
fn find_block_end(source: &str, from: usize, tag: &str) -> Result<(usize, usize)> {
    let content_end = if tag == "template" {
        nested_template_end(source, from)?
    } else {
        // Script, style and custom content is raw text; scan for the
        // literal closing tag.
        let pattern = format!("</{}", tag);
        match find_tag_token(source, from, &pattern) {
            Some(at) => at,
            None => bail!("unclosed <{}> block", tag),
        }
    };
    let Some(end) = source[content_end..].find('>') else {
        bail!("malformed closing tag for <{}>", tag);
    };
    Ok((content_end, content_end + end + 1))
}

/// Template bodies may contain `<template #slot>` elements; the region
/// close is found by depth counting.
fn nested_template_end(source: &str, from: usize) -> Result<usize> {
    let mut depth = 1usize;
    let mut scan = from;
    loop {
        let next_open = find_tag_token(source, scan, "<template");
        let next_close = find_tag_token(source, scan, "</template");
        match (next_open, next_close) {
            (_, None) => bail!("unclosed <template> block"),
            (Some(open), Some(close)) if open < close => {
                let self_closed = BLOCK_OPEN_REGEX
                    .captures(&source[open..])
                    .is_some_and(|caps| !caps[3].is_empty());
                if !self_closed {
                    depth += 1;
                }
                scan = open + "<template".len();
            }
            (_, Some(close)) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(close);
                }
                scan = close + "</template".len();
            }
        }
    }
}

/// Find `pattern` followed by a tag-name boundary, so `</scripty>` does
/// not end a `<script>` block.
fn find_tag_token(source: &str, mut from: usize, pattern: &str) -> Option<usize> {
    while let Some(next) = source[from..].find(pattern) {
        let at = from + next;
        let after = at + pattern.len();
        match source.as_bytes().get(after) {
            Some(byte) if byte.is_ascii_whitespace() || *byte == b'>' || *byte == b'/' => {
                return Some(at);
            }
            Some(_) => from = after,
            None => return None,
        }
    }
    None
}
