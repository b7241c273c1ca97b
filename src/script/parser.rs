use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Result, anyhow, bail};
use swc_common::{
    BytePos, FileName, GLOBALS, Globals, SourceMap,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::{Expr, Program};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Map of byte positions to comments.
pub type CommentMap = HashMap<BytePos, Vec<Comment>>;

/// Comments extracted during parsing, stored independently of swc types.
/// This must happen before SingleThreadedComments is dropped.
#[derive(Debug, Clone)]
pub struct ExtractedComments {
    pub leading: CommentMap,
    pub trailing: CommentMap,
}

impl ExtractedComments {
    fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, trailing) = comments.borrow_all();
        Self {
            leading: leading.iter().map(|(k, v)| (*k, v.clone())).collect(),
            trailing: trailing.iter().map(|(k, v)| (*k, v.clone())).collect(),
        }
    }

    /// True if any comment leading the token at `pos` contains `marker`.
    pub fn leading_contains(&self, pos: BytePos, marker: &str) -> bool {
        self.leading
            .get(&pos)
            .is_some_and(|comments| comments.iter().any(|c| c.text.contains(marker)))
    }
}

/// Parser syntax for a script region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptSyntax {
    /// Plain JavaScript, JSX enabled.
    #[default]
    Es,
    /// TypeScript.
    Ts,
    /// TypeScript with JSX.
    Tsx,
}

impl ScriptSyntax {
    /// Map a `<script lang="...">` attribute to a syntax.
    pub fn from_lang(lang: Option<&str>) -> Self {
        match lang {
            Some("ts") => Self::Ts,
            Some("tsx") => Self::Tsx,
            _ => Self::Es,
        }
    }

    fn to_swc(self) -> Syntax {
        match self {
            Self::Es => Syntax::Es(EsSyntax {
                jsx: true,
                ..Default::default()
            }),
            Self::Ts => Syntax::Typescript(TsSyntax::default()),
            Self::Tsx => Syntax::Typescript(TsSyntax {
                tsx: true,
                ..Default::default()
            }),
        }
    }
}

/// Translates swc spans back to byte offsets in the parsed region text.
///
/// Spans are global to the source map the region was parsed with; `lead`
/// accounts for bytes the parse input was shifted against the caller's
/// text (the parenthesis added by the expression fallback).
#[derive(Debug, Clone, Copy)]
pub struct SpanIndex {
    base: BytePos,
    lead: usize,
}

impl SpanIndex {
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0.saturating_sub(self.base.0) as usize).saturating_sub(self.lead)
    }
}

/// A parsed script region.
pub struct ParsedScript {
    pub program: Program,
    pub comments: ExtractedComments,
    pub index: SpanIndex,
}

/// A parsed standalone expression.
pub struct ParsedExpr {
    pub expr: Box<Expr>,
    pub comments: ExtractedComments,
    pub index: SpanIndex,
}

/// Parse a script region. Module or classic script is detected from the
/// content, matching how mixed Vue codebases are actually written.
pub fn parse_program(code: &str, syntax: ScriptSyntax) -> Result<ParsedScript> {
    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file = source_map
            .new_source_file(FileName::Anon.into(), code.to_string());

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax.to_swc(),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let program = parser
            .parse_program()
            .map_err(|e| anyhow!("Failed to parse script: {:?}", e))?;

        let errors = parser.take_errors();
        if !errors.is_empty() {
            bail!("Failed to parse script: {:?}", errors[0]);
        }

        Ok(ParsedScript {
            program,
            comments: ExtractedComments::from_swc(&comments),
            index: SpanIndex {
                base: source_file.start_pos,
                lead: 0,
            },
        })
    })
}

/// Parse a bare expression from a markup directive or interpolation.
///
/// Fragments that only parse once parenthesized are retried wrapped in
/// `( ... )`; the added byte is compensated in the span index so splices
/// still land in the caller's text.
pub fn parse_expression(code: &str, syntax: ScriptSyntax) -> Result<ParsedExpr> {
    match try_parse_expression(code, syntax, 0) {
        Ok(parsed) => Ok(parsed),
        Err(_) => {
            let wrapped = format!("({})", code);
            try_parse_expression(&wrapped, syntax, 1)
        }
    }
}

fn try_parse_expression(code: &str, syntax: ScriptSyntax, lead: usize) -> Result<ParsedExpr> {
    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file = source_map
            .new_source_file(FileName::Anon.into(), code.to_string());

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax.to_swc(),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let expr = parser
            .parse_expr()
            .map_err(|e| anyhow!("Failed to parse expression: {:?}", e))?;

        let errors = parser.take_errors();
        if !errors.is_empty() {
            bail!("Failed to parse expression: {:?}", errors[0]);
        }

        Ok(ParsedExpr {
            expr,
            comments: ExtractedComments::from_swc(&comments),
            index: SpanIndex {
                base: source_file.start_pos,
                lead,
            },
        })
    })
}

#[cfg(test)]
mod tests {
    use swc_common::Spanned;

    use super::*;

    #[test]
    fn test_parse_module_program() {
        let parsed = parse_program("import a from 'b';\nconst x = 1;", ScriptSyntax::Es).unwrap();
        assert!(matches!(parsed.program, Program::Module(_)));
    }

    #[test]
    fn test_parse_classic_script_program() {
        let parsed = parse_program("var x = 1;", ScriptSyntax::Es).unwrap();
        assert!(matches!(parsed.program, Program::Script(_)));
    }

    #[test]
    fn test_parse_typescript_syntax() {
        let source = "const x: string = '你好';";
        assert!(parse_program(source, ScriptSyntax::Es).is_err());
        assert!(parse_program(source, ScriptSyntax::Ts).is_ok());
    }

    #[test]
    fn test_span_index_maps_back_to_source() {
        let source = "const x = '你好';";
        let parsed = parse_program(source, ScriptSyntax::Es).unwrap();
        let Program::Script(script) = &parsed.program else {
            panic!("expected script");
        };
        let span = script.body[0].span();
        let start = parsed.index.offset(span.lo);
        assert_eq!(start, 0);
    }

    #[test]
    fn test_parse_expression_simple() {
        let parsed = parse_expression("msg + '你好'", ScriptSyntax::Es).unwrap();
        assert_eq!(parsed.index.offset(parsed.expr.span().lo), 0);
    }

    #[test]
    fn test_parse_expression_object_literal() {
        assert!(parse_expression("{ label: '中文' }", ScriptSyntax::Es).is_ok());
    }

    #[test]
    fn test_parse_expression_invalid() {
        assert!(parse_expression("}{", ScriptSyntax::Es).is_err());
    }

    #[test]
    fn test_leading_contains() {
        let parsed =
            parse_program("// i18n-disable\nconst x = 1;", ScriptSyntax::Es).unwrap();
        let Program::Script(script) = &parsed.program else {
            panic!("expected script");
        };
        let lo = script.body[0].span().lo;
        assert!(parsed.comments.leading_contains(lo, "i18n-disable"));
        assert!(!parsed.comments.leading_contains(lo, "other-marker"));
    }
}
