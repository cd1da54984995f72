//! The rendering contract shared by both generation modes.

use crate::ast::TypeIdentifier;

/// A binding about to be emitted: a variable, a member field or an enum.
///
/// `initializer` is already rendered target text.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    /// `const` / `let` at local scope, `None` in member position.
    pub keyword: Option<&'static str>,
    pub is_static: bool,
    pub name: &'a str,
    pub type_annotation: Option<&'a TypeIdentifier>,
    pub initializer: Option<&'a str>,
    pub constant: bool,
    pub private: bool,
}

impl Binding<'_> {
    /// Leading `const ` / `let ` / `static `, or nothing.
    pub fn prefix(&self) -> &'static str {
        match self.keyword {
            Some("const") => "const ",
            Some(_) => "let ",
            None if self.is_static => "static ",
            None => "",
        }
    }
}

/// How source semantics the target cannot express are encoded.
///
/// Every construct whose output differs between modes goes through this
/// trait; everything else is rendered identically.
pub trait Strategy: Send + Sync {
    /// Mode identifier (e.g., "native", "managed").
    fn name(&self) -> &'static str;

    /// Support code emitted once before the translated program.
    fn prelude(&self) -> &'static str;

    /// Render a variable or member field declaration.
    fn variable(&self, binding: &Binding<'_>) -> String;

    /// Render an enum binding; the initializer is the frozen case map.
    fn enumeration(&self, binding: &Binding<'_>) -> String;

    /// Render a read of a declared binding.
    fn reference(&self, name: &str) -> String;

    /// The part of a rendered callee that can be passed to `new`.
    fn constructible<'a>(&self, callee: &'a str) -> &'a str;

    /// Name that receives an unwrapped value (loop counter, parameter,
    /// caught error) before it is bound under `name`.
    fn raw_name(&self, name: &str) -> String;

    /// Statement binding `name` to the raw value held in `raw`, if one is
    /// needed.
    fn bind_raw(&self, name: &str, raw: &str, type_tag: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(keyword: Option<&'static str>, is_static: bool) -> Binding<'static> {
        Binding {
            keyword,
            is_static,
            name: "x",
            type_annotation: None,
            initializer: None,
            constant: false,
            private: false,
        }
    }

    #[test]
    fn test_prefix() {
        assert_eq!(binding(Some("const"), false).prefix(), "const ");
        assert_eq!(binding(Some("let"), false).prefix(), "let ");
        assert_eq!(binding(None, true).prefix(), "static ");
        assert_eq!(binding(None, false).prefix(), "");
    }
}
