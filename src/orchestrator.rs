//! Per-file dispatch over the rewriters.
//!
//! A script file goes through the expression rewriter whole. A component
//! file is split into blocks first; the template and each script region are
//! rewritten independently and the document is reassembled in canonical
//! block order. Files that end up with zero replacements keep their
//! original bytes so a rerun never touches them.

use std::path::Path;

use anyhow::{Context, Result};

use crate::catalog::CatalogSink;
use crate::formatter::Formatter;
use crate::script::{self, RewriteOptions, RewriteOutcome, ScriptScope, ScriptSyntax};
use crate::sfc::{self, SfcBlock, SfcDescriptor};
use crate::template;
use crate::utils::contains_chinese;

/// Run-level settings shared by every file.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub import_name: String,
    pub import_path: String,
}

impl ProcessOptions {
    pub fn new(import_name: &str, import_path: &str) -> Self {
        Self {
            import_name: import_name.to_owned(),
            import_path: import_path.to_owned(),
        }
    }
}

/// What happened to a single file.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// The file went through the rewriters. `code` equals the input when
    /// nothing needed replacing.
    Rewritten { code: String, replaced: usize },
    /// Not a file kind we rewrite.
    Unsupported,
    /// No Chinese text anywhere in the file.
    NoChinese,
    /// Disable markers left the file untouched.
    Disabled,
}

/// Rewrites one file's source and reports what changed.
///
/// The catalog sink receives a `(key, text)` pair for every replacement.
/// Only component output goes through the formatter; script files are
/// spliced in place and keep their original layout.
pub fn process_source(
    file_name: &str,
    source: &str,
    options: &ProcessOptions,
    sink: &mut dyn CatalogSink,
    formatter: &dyn Formatter,
) -> Result<ProcessOutcome> {
    let extension = Path::new(file_name).extension().and_then(|e| e.to_str());
    let is_component = match extension {
        Some("vue") => true,
        Some("js") => false,
        _ => return Ok(ProcessOutcome::Unsupported),
    };

    if !contains_chinese(source) {
        return Ok(ProcessOutcome::NoChinese);
    }

    if is_component {
        process_component(file_name, source, options, sink, formatter)
    } else {
        process_script(source, options, sink)
    }
}

fn process_script(
    source: &str,
    options: &ProcessOptions,
    sink: &mut dyn CatalogSink,
) -> Result<ProcessOutcome> {
    let rewrite_options = RewriteOptions::new(
        ScriptScope::Module,
        &options.import_name,
        &options.import_path,
    );
    let outcome = script::rewrite(source, &rewrite_options, sink)?;
    if outcome.skipped {
        return Ok(ProcessOutcome::Disabled);
    }
    Ok(ProcessOutcome::Rewritten {
        code: outcome.code,
        replaced: outcome.replaced,
    })
}

fn process_component(
    file_name: &str,
    source: &str,
    options: &ProcessOptions,
    sink: &mut dyn CatalogSink,
    formatter: &dyn Formatter,
) -> Result<ProcessOutcome> {
    let descriptor = sfc::parse_descriptor(source)?;

    let mut replaced = 0;
    let mut any_disabled = false;

    // Template region. A template in another syntax (lang="pug") is left
    // alone; the script regions are still processed.
    let mut template_code: Option<String> = None;
    if let Some(block) = &descriptor.template
        && !block.has_attr("lang")
        && contains_chinese(&block.content)
    {
        let mut tree =
            template::parse_template(&block.content).context("failed to parse template block")?;
        let rewrite_options = RewriteOptions::new(
            ScriptScope::TemplateExpr,
            &options.import_name,
            &options.import_path,
        );
        let count = template::rewrite_tree(&mut tree, &rewrite_options, sink)
            .context("failed to rewrite template block")?;
        if count > 0 {
            template_code = Some(template::print(&tree));
            replaced += count;
        }
    }

    let mut script_code: Option<String> = None;
    if let Some(block) = &descriptor.script {
        let outcome = rewrite_script_block(block, ScriptScope::Options, options, sink)
            .context("failed to rewrite script block")?;
        if outcome.skipped {
            any_disabled = true;
        } else if outcome.replaced > 0 {
            replaced += outcome.replaced;
            script_code = Some(outcome.code);
        }
    }

    let mut setup_code: Option<String> = None;
    if let Some(block) = &descriptor.script_setup {
        let outcome = rewrite_script_block(block, ScriptScope::Setup, options, sink)
            .context("failed to rewrite script setup block")?;
        if outcome.skipped {
            any_disabled = true;
        } else if outcome.replaced > 0 {
            replaced += outcome.replaced;
            setup_code = Some(outcome.code);
        }
    }

    if replaced == 0 {
        if any_disabled {
            return Ok(ProcessOutcome::Disabled);
        }
        return Ok(ProcessOutcome::Rewritten {
            code: source.to_owned(),
            replaced: 0,
        });
    }

    let document = assemble(
        &descriptor,
        template_code.as_deref(),
        script_code.as_deref(),
        setup_code.as_deref(),
    );
    let formatted = formatter.format(file_name, &document)?;
    Ok(ProcessOutcome::Rewritten {
        code: formatted,
        replaced,
    })
}

fn rewrite_script_block(
    block: &SfcBlock,
    scope: ScriptScope,
    options: &ProcessOptions,
    sink: &mut dyn CatalogSink,
) -> Result<RewriteOutcome> {
    let syntax = ScriptSyntax::from_lang(block.attr("lang"));
    let rewrite_options = RewriteOptions::new(scope, &options.import_name, &options.import_path)
        .with_syntax(syntax);
    script::rewrite(&block.content, &rewrite_options, sink)
}

/// Rebuilds the document in canonical block order: template, script,
/// script setup, styles, then custom blocks.
fn assemble(
    descriptor: &SfcDescriptor,
    template: Option<&str>,
    script: Option<&str>,
    setup: Option<&str>,
) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(block) = &descriptor.template {
        parts.push(block_source(block, template));
    }
    if let Some(block) = &descriptor.script {
        parts.push(block_source(block, script));
    }
    if let Some(block) = &descriptor.script_setup {
        parts.push(block_source(block, setup));
    }
    for block in &descriptor.styles {
        parts.push(block.source());
    }
    for block in &descriptor.custom_blocks {
        parts.push(block.source());
    }

    let mut document = parts.join("\n\n");
    document.push('\n');
    document
}

fn block_source(block: &SfcBlock, rewritten: Option<&str>) -> String {
    match rewritten {
        Some(content) => format!("{}{}{}", block.open_tag, content, block.close_tag),
        None => block.source(),
    }
}
