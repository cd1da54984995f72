//! Identifier sanitization.
//!
//! The source language accepts a handful of identifiers that are reserved or
//! predefined in the target. Those get a trailing underscore. Anonymous
//! closure parameters (`$0`, `$1`, ...) get a descriptive positional name.

use std::borrow::Cow;

/// Reserved and strict-mode words of the target, plus the globals that
/// cannot be rebound. All of them are legal identifiers somewhere in the
/// source language.
const RESERVED: &[&str] = &[
    "arguments",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "undefined",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

const ANONYMOUS_SIGIL: char = '$';

/// Rewrite `name` so it is safe in binding and property position.
pub fn sanitize(name: &str) -> Cow<'_, str> {
    if RESERVED.contains(&name) {
        return Cow::Owned(format!("{name}_"));
    }
    if let Some(position) = name.strip_prefix(ANONYMOUS_SIGIL) {
        if !position.is_empty() && position.chars().all(|c| c.is_ascii_digit()) {
            return Cow::Owned(format!("__arg{position}"));
        }
    }
    Cow::Borrowed(name)
}

/// True when `name` is renamed by [`sanitize`].
pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

/// Words covered by the rename table.
pub fn reserved_words() -> &'static [&'static str] {
    RESERVED
}
