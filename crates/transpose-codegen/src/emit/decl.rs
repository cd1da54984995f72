//! Declaration rendering: bindings, types, functions and enums.

use super::expr::positional_key;
use super::{Emitter, PARAMS, Scope};
use crate::ast::{Decl, EnumDecl, FunctionDecl, Parameter, TypeDecl, TypeIdentifier, VariableDecl};
use crate::error::EmitError;
use crate::names::sanitize;
use crate::traits::Binding;
use crate::types::{UNKNOWN_TYPE, map_type, map_type_identifier};

/// Source name of initializers.
const INITIALIZER: &str = "init";

impl Emitter {
    pub(super) fn write_decl(&mut self, decl: &Decl, scope: Scope) -> Result<(), EmitError> {
        match decl {
            Decl::Variable(var) => self.write_variable(var, scope),
            Decl::Function(func) => self.write_function(func, scope),
            Decl::Enum(decl) => self.write_enum(decl, scope),
            Decl::TypeAlias(alias) => {
                let mapped = map_type_identifier(&alias.target);
                let keyword = match scope {
                    Scope::Local => "const",
                    Scope::Member => "static",
                };
                self.line(&format!(
                    "{keyword} {} = \"{}\";",
                    sanitize(&alias.name),
                    super::escape_string(&mapped)
                ));
                Ok(())
            }
            Decl::Struct(_) | Decl::Class(_) | Decl::Protocol(_) if scope == Scope::Member => {
                Err(EmitError::UnsupportedNode {
                    kind: decl.kind(),
                    context: "inside a type body",
                })
            }
            Decl::Struct(ty) => {
                if !ty.inherits.is_empty() {
                    tracing::debug!(name = %ty.name, inherits = ?ty.inherits, "struct conformances are not emitted");
                }
                self.open(&format!("class {}", sanitize(&ty.name)));
                if !has_initializer(ty) {
                    self.open(&format!("constructor({PARAMS}: any = {{}})"));
                    self.line(&format!("Object.assign(this, {PARAMS});"));
                    self.close("");
                }
                self.write_members(ty)
            }
            Decl::Class(ty) => {
                let header = match ty.inherits.first() {
                    Some(parent) => format!("class {} extends {}", sanitize(&ty.name), sanitize(parent)),
                    None => format!("class {}", sanitize(&ty.name)),
                };
                self.open(&header);
                self.write_members(ty)
            }
            Decl::Protocol(ty) => {
                self.open(&format!("class {}", sanitize(&ty.name)));
                self.write_members(ty)
            }
        }
    }

    /// Members of an open type body, then its closing brace.
    fn write_members(&mut self, ty: &TypeDecl) -> Result<(), EmitError> {
        for member in &ty.members {
            self.write_decl(member, Scope::Member)?;
        }
        self.close("");
        Ok(())
    }

    fn write_variable(&mut self, var: &VariableDecl, scope: Scope) -> Result<(), EmitError> {
        let name = sanitize(&var.name);
        let initializer = var
            .initializer
            .as_ref()
            .map(|init| self.expr(init))
            .transpose()?;
        // `const` without an initializer is not valid target code.
        let keyword = match scope {
            Scope::Local if var.constant && initializer.is_some() => Some("const"),
            Scope::Local => Some("let"),
            Scope::Member => None,
        };
        let binding = Binding {
            keyword,
            is_static: var.is_static,
            name: &name,
            type_annotation: var.type_annotation.as_ref(),
            initializer: initializer.as_deref(),
            constant: var.constant,
            private: var.private,
        };
        let text = self.strategy.variable(&binding);
        self.line(&text);
        Ok(())
    }

    fn write_enum(&mut self, decl: &EnumDecl, scope: Scope) -> Result<(), EmitError> {
        let name = sanitize(&decl.name);
        let cases: Vec<String> = decl
            .cases
            .iter()
            .map(|case| format!("{}: \"{}\"", sanitize(case), super::escape_string(case)))
            .collect();
        let frozen = if cases.is_empty() {
            "Object.freeze({})".to_string()
        } else {
            format!("Object.freeze({{ {} }})", cases.join(", "))
        };
        let binding = Binding {
            keyword: (scope == Scope::Local).then_some("const"),
            is_static: scope == Scope::Member,
            name: &name,
            type_annotation: None,
            initializer: Some(frozen.as_str()),
            constant: true,
            private: false,
        };
        let text = self.strategy.enumeration(&binding);
        self.line(&text);
        Ok(())
    }

    fn write_function(&mut self, func: &FunctionDecl, scope: Scope) -> Result<(), EmitError> {
        let is_initializer = func.name == INITIALIZER;
        if is_initializer && scope == Scope::Local {
            return Err(EmitError::UnsupportedNode {
                kind: "initializer",
                context: "outside a type body",
            });
        }
        check_variadic(func)?;

        let head = if is_initializer {
            "constructor".to_string()
        } else {
            let prefix = match scope {
                Scope::Local => "function ",
                Scope::Member if func.is_static => "static ",
                Scope::Member => "",
            };
            format!("{prefix}{}", sanitize(&func.name))
        };
        let params = if func.params.is_empty() {
            "()".to_string()
        } else {
            format!("({PARAMS}: any = {{}})")
        };
        let returns = match &func.return_type {
            Some(ty) if !is_initializer => format!(": {}", map_type_identifier(ty)),
            _ => String::new(),
        };

        self.open(&format!("{head}{params}{returns}"));
        self.write_parameters(&func.params)?;
        self.write_block(&func.body)?;
        self.close("");
        Ok(())
    }

    /// Unpack the parameter bag at the top of a function body.
    fn write_parameters(&mut self, params: &[Parameter]) -> Result<(), EmitError> {
        let mut entries = Vec::new();
        let mut bindings = Vec::new();
        for (i, param) in params.iter().enumerate().filter(|(_, p)| !p.variadic) {
            let name = sanitize(&param.name);
            let raw = self.strategy.raw_name(&name);
            let key = match param.label.as_deref() {
                Some("_") => positional_key(i),
                Some(label) => label.to_string(),
                None => param.name.clone(),
            };
            let mut entry = if key == raw {
                key
            } else {
                format!("{key}: {raw}")
            };
            if let Some(default) = &param.default {
                entry.push_str(" = ");
                entry.push_str(&self.expr(default)?);
            }
            entries.push(entry);
            let tag = map_type(param.type_annotation.as_ref());
            bindings.extend(self.strategy.bind_raw(&name, &raw, &tag));
        }
        if !entries.is_empty() {
            self.line(&format!("const {{ {} }} = {PARAMS};", entries.join(", ")));
        }
        for binding in bindings {
            self.line(&binding);
        }

        if let Some(variadic) = params.iter().find(|p| p.variadic) {
            self.write_variadic(variadic, variadic_threshold(params));
        }
        Ok(())
    }

    /// Rebuild a variadic parameter from the `_<n>` keys past `threshold`.
    ///
    /// A labeled variadic receives its first value under the label and the
    /// rest positionally, so that value goes in front of the tail.
    fn write_variadic(&mut self, param: &Parameter, threshold: usize) {
        let name = sanitize(&param.name);
        let raw = self.strategy.raw_name(&name);
        let label = match param.label.as_deref() {
            Some("_") => None,
            Some(label) => Some(label),
            None => Some(param.name.as_str()),
        };
        match label {
            None => {
                self.line(&format!("const {raw} = Object.entries({PARAMS})"));
                self.indent += 1;
                self.write_positional_tail(threshold, ";");
                self.indent -= 1;
            }
            Some(label) => {
                let key = super::escape_string(label);
                self.line(&format!("const {raw} = ["));
                self.indent += 1;
                self.line(&format!(
                    "...(\"{key}\" in {PARAMS} ? [{PARAMS}[\"{key}\"]] : []),"
                ));
                self.line(&format!("...Object.entries({PARAMS})"));
                self.indent += 1;
                self.write_positional_tail(threshold, ",");
                self.indent -= 2;
                self.line("];");
            }
        }
        let tag = match &param.type_annotation {
            Some(element) => map_type_identifier(&TypeIdentifier::array(element.clone())),
            None => format!("{UNKNOWN_TYPE}[]"),
        };
        if let Some(binding) = self.strategy.bind_raw(&name, &raw, &tag) {
            self.line(&binding);
        }
    }

    /// Select the `_<n>` entries past `threshold` and order them by position.
    fn write_positional_tail(&mut self, threshold: usize, terminator: &str) {
        self.line(r".filter(([key]) => /^_\d+$/.test(key))");
        self.line(".map(([key, value]): [number, any] => [Number(key.slice(1)), value])");
        self.line(&format!(".filter(([position]) => position > {threshold})"));
        self.line(".sort((a, b) => a[0] - b[0])");
        self.line(&format!(".map(([, value]) => value){terminator}"));
    }
}

fn has_initializer(ty: &TypeDecl) -> bool {
    ty.members
        .iter()
        .any(|member| matches!(member, Decl::Function(func) if func.name == INITIALIZER))
}

/// Only a single variadic parameter, in last position, can be recovered
/// from the bag.
fn check_variadic(func: &FunctionDecl) -> Result<(), EmitError> {
    let last = func.params.len().saturating_sub(1);
    match func
        .params
        .iter()
        .enumerate()
        .find(|(i, p)| p.variadic && *i != last)
    {
        Some((_, param)) => Err(EmitError::MisplacedVariadic {
            function: func.name.clone(),
            parameter: param.name.clone(),
        }),
        None => Ok(()),
    }
}

/// 1-based position of the last unlabeled non-variadic parameter; variadic
/// values are the positional arguments after it.
fn variadic_threshold(params: &[Parameter]) -> usize {
    params
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.variadic && p.is_positional())
        .map(|(i, _)| i + 1)
        .last()
        .unwrap_or(0)
}
