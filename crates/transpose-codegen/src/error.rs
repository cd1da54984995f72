//! Errors produced while lowering the AST.

use crate::ast::Span;
use std::fmt;

/// Why a single node could not be translated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("unsupported {kind} {context}")]
    UnsupportedNode {
        kind: &'static str,
        context: &'static str,
    },

    #[error("unsupported {position} operator `{operator}`")]
    UnsupportedOperator {
        operator: String,
        position: OperatorPosition,
    },

    #[error("variadic parameter `{parameter}` of `{function}` must be the only variadic and the last parameter")]
    MisplacedVariadic { function: String, parameter: String },
}

/// Syntactic role of an operator, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorPosition {
    Assignment,
    Binary,
    Logical,
    Unary,
}

impl fmt::Display for OperatorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperatorPosition::Assignment => "assignment",
            OperatorPosition::Binary => "binary",
            OperatorPosition::Logical => "logical",
            OperatorPosition::Unary => "unary",
        })
    }
}

/// A failure located at one top-level item of the program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("item {index} ({kind}{}): {source}", describe_span(.span))]
pub struct TranspileError {
    /// Zero-based index of the item in the program.
    pub index: usize,
    /// Discriminator of the top-level node that failed.
    pub kind: &'static str,
    pub span: Option<Span>,
    #[source]
    pub source: EmitError,
}

fn describe_span(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" at {}:{}", span.line, span.column),
        None => String::new(),
    }
}
