//! Source type → TypeScript type annotation.

use crate::ast::TypeIdentifier;

/// Annotation used when no type was declared.
pub const UNKNOWN_TYPE: &str = "any";

const OPTIONAL_SUFFIX: &str = " | null | undefined";

/// Map an optional declared type, defaulting to `any`.
pub fn map_type(ty: Option<&TypeIdentifier>) -> String {
    match ty {
        Some(ty) => map_type_identifier(ty),
        None => UNKNOWN_TYPE.to_string(),
    }
}

pub fn map_type_identifier(ty: &TypeIdentifier) -> String {
    match ty {
        TypeIdentifier::Named(name) => map_type_name(name).to_string(),
        TypeIdentifier::Array(element) => {
            let element = map_type_identifier(element);
            if element.contains(" | ") {
                format!("({element})[]")
            } else {
                format!("{element}[]")
            }
        }
        TypeIdentifier::Dictionary { key, value } => format!(
            "{{ [key: {}]: {} }}",
            map_type_identifier(key),
            map_type_identifier(value)
        ),
        TypeIdentifier::Optional(inner) => {
            let inner = map_type_identifier(inner);
            // `T??` collapses to a single pair of sentinels.
            if inner.ends_with(OPTIONAL_SUFFIX) {
                inner
            } else {
                format!("{inner}{OPTIONAL_SUFFIX}")
            }
        }
    }
}

/// Map a primitive type name. User-defined names pass through unchanged.
pub fn map_type_name(name: &str) -> &str {
    match name {
        "Int" | "Int8" | "Int16" | "Int32" | "Int64" | "UInt" | "UInt8" | "UInt16" | "UInt32"
        | "UInt64" | "Float" | "Float32" | "Float64" | "Double" | "CGFloat" => "number",
        "String" | "Character" | "Substring" => "string",
        "Bool" => "boolean",
        "Any" | "AnyObject" => "any",
        "Void" => "void",
        other => other,
    }
}
