//! Native mode: bindings are plain target variables.

use crate::traits::{Binding, Strategy};
use crate::types::map_type_identifier;

/// Static instance used by [`Mode::Native`](super::Mode::Native).
pub static NATIVE: NativeStrategy = NativeStrategy;

const PRELUDE: &str = concat!("// Runtime support: native bindings\n", common_helpers!());

pub struct NativeStrategy;

impl Strategy for NativeStrategy {
    fn name(&self) -> &'static str {
        "native"
    }

    fn prelude(&self) -> &'static str {
        PRELUDE
    }

    fn variable(&self, binding: &Binding<'_>) -> String {
        let mut out = format!("{}{}", binding.prefix(), binding.name);
        if let Some(ty) = binding.type_annotation {
            out.push_str(": ");
            out.push_str(&map_type_identifier(ty));
        }
        if let Some(init) = binding.initializer {
            out.push_str(" = ");
            out.push_str(init);
        }
        out.push(';');
        out
    }

    fn enumeration(&self, binding: &Binding<'_>) -> String {
        format!(
            "{}{} = {};",
            binding.prefix(),
            binding.name,
            binding.initializer.unwrap_or("Object.freeze({})")
        )
    }

    fn reference(&self, name: &str) -> String {
        name.to_string()
    }

    fn constructible<'a>(&self, callee: &'a str) -> &'a str {
        callee
    }

    fn raw_name(&self, name: &str) -> String {
        name.to_string()
    }

    fn bind_raw(&self, name: &str, raw: &str, _type_tag: &str) -> Option<String> {
        if name == raw {
            None
        } else {
            Some(format!("const {name} = {raw};"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeIdentifier;

    fn local(name: &'static str, keyword: &'static str) -> Binding<'static> {
        Binding {
            keyword: Some(keyword),
            is_static: false,
            name,
            type_annotation: None,
            initializer: None,
            constant: keyword == "const",
            private: false,
        }
    }

    #[test]
    fn test_variable_with_type() {
        let ty = TypeIdentifier::named("Int");
        let binding = Binding {
            type_annotation: Some(&ty),
            initializer: Some("1"),
            ..local("x", "const")
        };
        assert_eq!(NATIVE.variable(&binding), "const x: number = 1;");
    }

    #[test]
    fn test_uninitialized_variable() {
        assert_eq!(NATIVE.variable(&local("y", "let")), "let y;");
    }

    #[test]
    fn test_static_member() {
        let binding = Binding {
            keyword: None,
            is_static: true,
            initializer: Some("0"),
            ..local("count", "let")
        };
        assert_eq!(NATIVE.variable(&binding), "static count = 0;");
    }

    #[test]
    fn test_raw_binding() {
        assert_eq!(NATIVE.raw_name("item"), "item");
        assert_eq!(NATIVE.bind_raw("item", "item", "any"), None);
        assert_eq!(
            NATIVE.bind_raw("user", "__opt0", "any").as_deref(),
            Some("const user = __opt0;")
        );
    }

    #[test]
    fn test_references_are_direct() {
        assert_eq!(NATIVE.reference("total"), "total");
        assert_eq!(NATIVE.constructible("Point"), "Point");
    }
}
