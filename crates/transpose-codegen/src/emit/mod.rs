//! Tree walk that renders AST nodes as TypeScript.
//!
//! Statements and declarations are written line by line into a buffer with
//! two-space indentation; expressions are rendered to strings so callers can
//! splice them into headers.

mod decl;
mod expr;
mod stmt;

use crate::ast::Stmt;
use crate::error::EmitError;
use crate::runtime::Mode;
use crate::traits::Strategy;

/// Name of the single parameter-bag argument every function receives.
pub(crate) const PARAMS: &str = "__args";

/// Where a declaration appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Top level, function body or control-flow body.
    Local,
    /// Class, struct or protocol body.
    Member,
}

/// Renders one top-level item.
pub(crate) struct Emitter {
    strategy: &'static dyn Strategy,
    output: String,
    indent: usize,
    /// Counter for hidden temporaries; unique within the item.
    temps: usize,
}

impl Emitter {
    pub(crate) fn new(mode: Mode) -> Self {
        Self {
            strategy: mode.strategy(),
            output: String::new(),
            indent: 0,
            temps: 0,
        }
    }

    /// Translate a top-level node.
    pub(crate) fn emit(mode: Mode, stmt: &Stmt) -> Result<String, EmitError> {
        let mut emitter = Self::new(mode);
        emitter.write_stmt(stmt)?;
        Ok(emitter.output)
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }

    /// Write one complete line at the current indentation.
    fn line(&mut self, text: &str) {
        self.write_indent();
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Write `header {` and indent.
    fn open(&mut self, header: &str) {
        self.line(&format!("{header} {{"));
        self.indent += 1;
    }

    /// Dedent and write `}` followed by `trailer`.
    fn close(&mut self, trailer: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.line(&format!("}}{trailer}"));
    }

    /// Close the current brace and open another on the same line
    /// (`} else {`).
    fn reopen(&mut self, header: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.line(&format!("}} {header} {{"));
        self.indent += 1;
    }

    fn fresh_temp(&mut self, stem: &str) -> String {
        let name = format!("__{stem}{}", self.temps);
        self.temps += 1;
        name
    }
}

/// Escape text for a double-quoted target string.
pub(crate) fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Escape text for a template literal.
pub(crate) fn escape_template(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("say \"hi\"\n"), "say \\\"hi\\\"\\n");
        assert_eq!(escape_string("C:\\tmp"), "C:\\\\tmp");
    }

    #[test]
    fn test_escape_template() {
        assert_eq!(escape_template("a `b` ${c}"), "a \\`b\\` \\${c}");
    }

    #[test]
    fn test_temporaries_are_numbered() {
        let mut emitter = Emitter::new(Mode::Native);
        assert_eq!(emitter.fresh_temp("opt"), "__opt0");
        assert_eq!(emitter.fresh_temp("bound"), "__bound1");
    }

    #[test]
    fn test_blocks_indent() {
        let mut emitter = Emitter::new(Mode::Native);
        emitter.open("if (x)");
        emitter.line("y;");
        emitter.reopen("else");
        emitter.line("z;");
        emitter.close("");
        assert_eq!(emitter.output, "if (x) {\n  y;\n} else {\n  z;\n}\n");
    }
}
