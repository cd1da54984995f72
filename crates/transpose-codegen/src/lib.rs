//! Code generation backend: a typed source AST lowered to TypeScript.
//!
//! `transpose-codegen` takes an already parsed and resolved program (structs,
//! classes, protocols, enums, optionals, guard/switch control flow, variadic
//! parameters) and emits equivalent TypeScript text.
//!
//! # Architecture
//!
//! ```text
//! Program ─> transpiler ─> emit::decl ─> emit::stmt ─> emit::expr
//!                 │                                        │
//!                 └─ runtime (Mode ─> Strategy)            └─> types / names / ops
//! ```
//!
//! Two generation modes share one tree walk and differ only through the
//! [`Strategy`] trait:
//!
//! - [`Mode::Native`]: plain `const`/`let` bindings.
//! - [`Mode::Managed`]: every binding is a `{ value, type, ...flags }` record
//!   and every read goes through `.value`.
//!
//! # Example
//!
//! ```
//! use transpose_codegen::{Expr, Mode, Program, Stmt, transpile};
//!
//! let program = Program::new(vec![Stmt::const_decl("x", Expr::int(1))]);
//! let out = transpile(&program, Mode::Native).unwrap();
//! assert!(out.ends_with("const x = 1;\n"));
//! ```
//!
//! # Calling convention
//!
//! Every function takes one parameter bag (`__args`). Call sites pass labeled
//! arguments under their label and unlabeled ones under `_<position>`;
//! function bodies destructure the bag and rebuild a trailing variadic
//! parameter from the remaining `_<n>` keys.

pub mod ast;
mod emit;
pub mod error;
pub mod names;
pub mod ops;
pub mod runtime;
pub mod traits;
pub mod transpiler;
pub mod types;

// Re-exports: AST
pub use ast::{
    Argument, Block, Decl, DictionaryEntry, EnumDecl, Expr, FunctionDecl, Item, Literal, Parameter, Program, Span,
    Stmt, SwitchCase, TryMode, TypeAliasDecl, TypeDecl, TypeIdentifier, VariableDecl,
};

// Re-exports: errors
pub use error::{EmitError, OperatorPosition, TranspileError};

// Re-exports: modes and strategies
pub use runtime::{MANAGED, ManagedStrategy, Mode, NATIVE, NativeStrategy};
pub use traits::{Binding, Strategy};

// Re-exports: facade
pub use transpiler::{ErrorPolicy, Options, SEPARATOR, Transpiled, translate, transpile, transpile_with};

pub use names::sanitize;
pub use types::map_type;
