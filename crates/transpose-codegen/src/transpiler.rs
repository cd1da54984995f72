//! Whole-program translation.
//!
//! Every top-level item is rendered by its own [`Emitter`], so items share no
//! state beyond the mode and can be translated in any order. With the
//! `parallel` feature they run on the rayon pool; the output is joined in
//! source order either way.

use crate::ast::{Item, Program, Stmt};
use crate::emit::Emitter;
use crate::error::{EmitError, TranspileError};
use crate::runtime::Mode;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Comment line separating the prelude from the translated program.
pub const SEPARATOR: &str = "// ---- generated code ----";

/// What to do when an item cannot be translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort on the first failing item.
    #[default]
    FailFast,
    /// Translate everything else and report every failure.
    Collect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

impl Options {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            error_policy: ErrorPolicy::default(),
        }
    }

    pub fn collect_errors(mut self) -> Self {
        self.error_policy = ErrorPolicy::Collect;
        self
    }
}

/// Result of a translation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transpiled {
    /// Prelude, separator and every successfully translated item.
    pub output: String,
    /// Items left out of `output`, in source order. Always empty under
    /// [`ErrorPolicy::FailFast`].
    pub errors: Vec<TranspileError>,
}

impl Transpiled {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Translate a program, failing on the first item that cannot be lowered.
pub fn transpile(program: &Program, mode: Mode) -> Result<String, TranspileError> {
    transpile_with(program, &Options::new(mode)).map(|done| done.output)
}

/// Translate a program under an explicit error policy.
pub fn transpile_with(program: &Program, options: &Options) -> Result<Transpiled, TranspileError> {
    let mode = options.mode;
    tracing::debug!(
        mode = mode.name(),
        items = program.items.len(),
        policy = ?options.error_policy,
        "transpiling program"
    );

    let results = translate_items(&program.items, mode);

    let mut parts = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(text) => parts.push(text),
            Err(err) if options.error_policy == ErrorPolicy::FailFast => return Err(err),
            Err(err) => {
                tracing::warn!(
                    index = err.index,
                    kind = err.kind,
                    error = %err.source,
                    "skipping item"
                );
                errors.push(err);
            }
        }
    }

    let mut output = String::from(mode.prelude());
    output.push('\n');
    output.push_str(SEPARATOR);
    output.push('\n');
    output.push_str(&parts.join("\n"));
    Ok(Transpiled { output, errors })
}

/// Translate a single top-level node without the prelude.
pub fn translate(stmt: &Stmt, mode: Mode) -> Result<String, EmitError> {
    Emitter::emit(mode, stmt)
}

fn translate_item(index: usize, item: &Item, mode: Mode) -> Result<String, TranspileError> {
    tracing::debug!(index, kind = item.node.kind(), "translating item");
    Emitter::emit(mode, &item.node).map_err(|source| TranspileError {
        index,
        kind: item.node.kind(),
        span: item.span,
        source,
    })
}

#[cfg(feature = "parallel")]
fn translate_items(items: &[Item], mode: Mode) -> Vec<Result<String, TranspileError>> {
    items
        .par_iter()
        .enumerate()
        .map(|(index, item)| translate_item(index, item, mode))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn translate_items(items: &[Item], mode: Mode) -> Vec<Result<String, TranspileError>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| translate_item(index, item, mode))
        .collect()
}
