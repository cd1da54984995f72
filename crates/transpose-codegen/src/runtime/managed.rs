//! Managed mode: every binding is a tagged record.
//!
//! A record carries the value together with what the target cannot express
//! natively: the declared type, constancy, privacy and whether the binding
//! was declared without an initializer. Reads go through `.value`.

use crate::emit::escape_string;
use crate::traits::{Binding, Strategy};
use crate::types::map_type;

/// Static instance used by [`Mode::Managed`](super::Mode::Managed).
pub static MANAGED: ManagedStrategy = ManagedStrategy;

/// Suffix through which managed bindings are read.
pub const VALUE_ACCESSOR: &str = ".value";

/// Type tag recorded for enum bindings.
pub const ENUM_TAG: &str = "enum";

const PRELUDE: &str = concat!(
    "// Runtime support: managed bindings\n",
    common_helpers!(),
    r#"
interface __Record<T = any> {
  value: T;
  type: string;
  constant?: boolean;
  private?: boolean;
  uninitialized?: boolean;
}

function __isRecord(candidate: unknown): candidate is __Record {
  return (
    typeof candidate === "object" &&
    candidate !== null &&
    "value" in candidate &&
    "type" in candidate
  );
}

function __typeTag(record: __Record): string {
  return record.type;
}

function __isConstant(record: __Record): boolean {
  return record.constant === true;
}
"#
);

pub struct ManagedStrategy;

impl Strategy for ManagedStrategy {
    fn name(&self) -> &'static str {
        "managed"
    }

    fn prelude(&self) -> &'static str {
        PRELUDE
    }

    fn variable(&self, binding: &Binding<'_>) -> String {
        let mut fields = vec![
            format!("value: {}", binding.initializer.unwrap_or("null")),
            format!(
                "type: \"{}\"",
                escape_string(&map_type(binding.type_annotation))
            ),
        ];
        if binding.constant {
            fields.push("constant: true".to_string());
        }
        if binding.private {
            fields.push("private: true".to_string());
        }
        if binding.initializer.is_none() {
            fields.push("uninitialized: true".to_string());
        }
        format!(
            "{}{} = {{ {} }};",
            binding.prefix(),
            binding.name,
            fields.join(", ")
        )
    }

    fn enumeration(&self, binding: &Binding<'_>) -> String {
        format!(
            "{}{} = {{ value: {}, type: \"{ENUM_TAG}\", constant: true }};",
            binding.prefix(),
            binding.name,
            binding.initializer.unwrap_or("Object.freeze({})")
        )
    }

    fn reference(&self, name: &str) -> String {
        format!("{name}{VALUE_ACCESSOR}")
    }

    fn constructible<'a>(&self, callee: &'a str) -> &'a str {
        callee.strip_suffix(VALUE_ACCESSOR).unwrap_or(callee)
    }

    fn raw_name(&self, name: &str) -> String {
        format!("${name}")
    }

    fn bind_raw(&self, name: &str, raw: &str, type_tag: &str) -> Option<String> {
        Some(format!(
            "const {name} = {{ value: {raw}, type: \"{}\", constant: true }};",
            escape_string(type_tag)
        ))
    }
}
