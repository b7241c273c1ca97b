//! Literal replacement over the expression AST.
//!
//! The pass walks the parsed program, records one [`SourceEdit`] per
//! replaced literal and finally splices all edits into the original text.
//! Import and export paths are never candidates: module specifiers are not
//! expressions, and the walk does not descend into import declarations.

use anyhow::Result;
use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::{
    Expr, ImportDecl, ImportSpecifier, Lit, ModuleDecl, ModuleItem, Program, Stmt, Tpl,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::edit::{SourceEdit, apply_edits, apply_edits_within};
use super::parser::{
    ExtractedComments, ScriptSyntax, SpanIndex, parse_expression, parse_program,
};
use crate::catalog::CatalogSink;
use crate::key::key_for;
use crate::utils::contains_chinese;

/// Comment marker that switches extraction off.
pub const DISABLE_MARKER: &str = "i18n-disable";

/// Callee used for expressions embedded in markup.
pub const TEMPLATE_CALLEE: &str = "$t";

/// Where a piece of script code lives. Decides the call shape; the caller
/// always supplies it, the rewriter never guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptScope {
    /// Expression embedded in markup: `$t(...)`, no import handling.
    TemplateExpr,
    /// `<script setup>` block: `<importName>.t(...)`.
    Setup,
    /// Options-style `<script>` block: `this.$t(...)`.
    Options,
    /// Plain .js file: `<importName>.t(...)`.
    Module,
}

impl ScriptScope {
    fn callee(self, import_name: &str) -> String {
        match self {
            ScriptScope::TemplateExpr => TEMPLATE_CALLEE.to_string(),
            ScriptScope::Setup | ScriptScope::Module => format!("{}.t", import_name),
            ScriptScope::Options => "this.$t".to_string(),
        }
    }

    fn injects_import(self) -> bool {
        !matches!(self, ScriptScope::TemplateExpr)
    }
}

/// Options for one rewrite pass.
#[derive(Debug, Clone, Copy)]
pub struct RewriteOptions<'a> {
    pub scope: ScriptScope,
    pub syntax: ScriptSyntax,
    pub import_name: &'a str,
    pub import_path: &'a str,
}

impl<'a> RewriteOptions<'a> {
    pub fn new(scope: ScriptScope, import_name: &'a str, import_path: &'a str) -> Self {
        Self {
            scope,
            syntax: ScriptSyntax::Es,
            import_name,
            import_path,
        }
    }

    pub fn with_syntax(mut self, syntax: ScriptSyntax) -> Self {
        self.syntax = syntax;
        self
    }
}

/// What one rewrite pass did.
#[derive(Debug)]
pub struct RewriteOutcome {
    /// The rewritten source; identical to the input when nothing matched.
    pub code: String,
    /// Number of literals replaced by translation calls.
    pub replaced: usize,
    /// True when the import line was added.
    pub import_injected: bool,
    /// True when a region-level disable marker stopped the pass.
    pub skipped: bool,
}

impl RewriteOutcome {
    fn region_skipped(source: &str) -> Self {
        Self {
            code: source.to_string(),
            replaced: 0,
            import_injected: false,
            skipped: true,
        }
    }
}

/// Rewrite a script region: a .js file or an SFC script block.
pub fn rewrite(
    source: &str,
    options: &RewriteOptions,
    sink: &mut dyn CatalogSink,
) -> Result<RewriteOutcome> {
    let parsed = parse_program(source, options.syntax)?;
    let first_item = first_item_lo(&parsed.program);

    // A marker above the first item disables the whole region.
    if let Some(lo) = first_item
        && parsed.comments.leading_contains(lo, DISABLE_MARKER)
    {
        return Ok(RewriteOutcome::region_skipped(source));
    }

    let mut rewriter =
        LiteralRewriter::new(source, parsed.index, &parsed.comments, options, sink);
    parsed.program.visit_with(&mut rewriter);
    if let Some(error) = rewriter.error {
        return Err(error);
    }

    let mut edits = rewriter.edits;
    let replaced = rewriter.replaced;

    let mut import_injected = false;
    if options.scope.injects_import()
        && replaced > 0
        && !binds_import_name(&parsed.program, options.import_name)
        && let Some(lo) = first_item
    {
        let at = parsed.index.offset(lo);
        edits.push(SourceEdit::new(
            at..at,
            format!(
                "import {} from '{}';\n",
                options.import_name, options.import_path
            ),
        ));
        import_injected = true;
    }

    Ok(RewriteOutcome {
        code: apply_edits(source, &edits),
        replaced,
        import_injected,
        skipped: false,
    })
}

/// Rewrite a bare expression from a markup directive or interpolation.
/// The region marker does not apply here; per-literal markers still do.
pub fn rewrite_expression(
    source: &str,
    options: &RewriteOptions,
    sink: &mut dyn CatalogSink,
) -> Result<RewriteOutcome> {
    let parsed = parse_expression(source, options.syntax)?;

    let mut rewriter =
        LiteralRewriter::new(source, parsed.index, &parsed.comments, options, sink);
    rewriter.visit_expr(&parsed.expr);
    if let Some(error) = rewriter.error {
        return Err(error);
    }

    let replaced = rewriter.replaced;
    Ok(RewriteOutcome {
        code: apply_edits(source, &rewriter.edits),
        replaced,
        import_injected: false,
        skipped: false,
    })
}

fn first_item_lo(program: &Program) -> Option<BytePos> {
    match program {
        Program::Module(module) => module.body.first().map(|item| item.span().lo),
        Program::Script(script) => script.body.first().map(|stmt| stmt.span().lo),
    }
}

/// True if any import declaration already binds `name` locally.
fn binds_import_name(program: &Program, name: &str) -> bool {
    let Program::Module(module) = program else {
        return false;
    };
    module.body.iter().any(|item| {
        matches!(item, ModuleItem::ModuleDecl(ModuleDecl::Import(import))
            if import.specifiers.iter().any(|spec| match spec {
                ImportSpecifier::Default(s) => s.local.sym.as_str() == name,
                ImportSpecifier::Named(s) => s.local.sym.as_str() == name,
                ImportSpecifier::Namespace(s) => s.local.sym.as_str() == name,
            }))
    })
}

struct LiteralRewriter<'a> {
    source: &'a str,
    index: SpanIndex,
    comments: &'a ExtractedComments,
    callee: String,
    sink: &'a mut dyn CatalogSink,
    edits: Vec<SourceEdit>,
    replaced: usize,
    stmt_stack: Vec<BytePos>,
    error: Option<anyhow::Error>,
}

impl<'a> LiteralRewriter<'a> {
    fn new(
        source: &'a str,
        index: SpanIndex,
        comments: &'a ExtractedComments,
        options: &RewriteOptions,
        sink: &'a mut dyn CatalogSink,
    ) -> Self {
        Self {
            source,
            index,
            comments,
            callee: options.scope.callee(options.import_name),
            sink,
            edits: Vec::new(),
            replaced: 0,
            stmt_stack: Vec::new(),
            error: None,
        }
    }

    /// A marker leading the literal itself or any enclosing statement
    /// excludes this literal.
    fn is_disabled(&self, lo: BytePos) -> bool {
        if self.comments.leading_contains(lo, DISABLE_MARKER) {
            return true;
        }
        self.stmt_stack
            .iter()
            .any(|stmt_lo| self.comments.leading_contains(*stmt_lo, DISABLE_MARKER))
    }

    fn store(&mut self, key: &str, text: String) -> bool {
        match self.sink.insert(key.to_string(), text) {
            Ok(()) => true,
            Err(err) => {
                self.error = Some(err);
                false
            }
        }
    }

    fn replace_str(&mut self, span: Span, value: &str) {
        let key = key_for(value);
        if !self.store(&key, value.to_string()) {
            return;
        }
        let range = self.index.offset(span.lo)..self.index.offset(span.hi);
        self.edits
            .push(SourceEdit::new(range, format!("{}('{}')", self.callee, key)));
        self.replaced += 1;
    }

    fn replace_tpl(&mut self, tpl: &Tpl) {
        // Embedded expressions first, so literals nested inside them get
        // their own entries and a second run over the output finds nothing
        // left to extract.
        let edits_before = self.edits.len();
        for expr in &tpl.exprs {
            self.visit_expr(expr);
        }
        if self.error.is_some() {
            return;
        }
        let nested: Vec<SourceEdit> = self.edits.split_off(edits_before);

        // Placeholder text: raw segments joined by {0}, {1}, ... in order
        let mut text = String::new();
        for (i, quasi) in tpl.quasis.iter().enumerate() {
            if i > 0 {
                text.push_str(&format!("{{{}}}", i - 1));
            }
            text.push_str(quasi.raw.as_str());
        }

        let key = key_for(&text);
        if !self.store(&key, text) {
            return;
        }

        let call = if tpl.exprs.is_empty() {
            format!("{}('{}')", self.callee, key)
        } else {
            let args: Vec<String> = tpl
                .exprs
                .iter()
                .map(|expr| {
                    let expr_range =
                        self.index.offset(expr.span().lo)..self.index.offset(expr.span().hi);
                    apply_edits_within(self.source, expr_range, &nested)
                })
                .collect();
            format!("{}('{}', [{}])", self.callee, key, args.join(", "))
        };

        let range = self.index.offset(tpl.span.lo)..self.index.offset(tpl.span.hi);
        self.edits.push(SourceEdit::new(range, call));
        self.replaced += 1;
    }
}

impl Visit for LiteralRewriter<'_> {
    fn visit_import_decl(&mut self, _node: &ImportDecl) {
        // Specifiers and the module path stay as written.
    }

    fn visit_module_item(&mut self, item: &ModuleItem) {
        self.stmt_stack.push(item.span().lo);
        item.visit_children_with(self);
        self.stmt_stack.pop();
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.stmt_stack.push(stmt.span().lo);
        stmt.visit_children_with(self);
        self.stmt_stack.pop();
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if self.error.is_some() {
            return;
        }
        match expr {
            Expr::Lit(Lit::Str(s)) => {
                let Some(value) = s.value.as_str() else {
                    return;
                };
                if !contains_chinese(value) || self.is_disabled(s.span.lo) {
                    return;
                }
                self.replace_str(s.span, value);
            }
            Expr::Tpl(tpl) => {
                let has_chinese = tpl
                    .quasis
                    .iter()
                    .any(|quasi| contains_chinese(quasi.raw.as_str()));
                if !has_chinese || self.is_disabled(tpl.span.lo) {
                    // The embedded expressions may still hold literals
                    expr.visit_children_with(self);
                    return;
                }
                self.replace_tpl(tpl);
            }
            _ => expr.visit_children_with(self),
        }
    }
}
