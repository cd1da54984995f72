//! Statement and control-flow rendering.

use super::{Emitter, Scope};
use crate::ast::{Block, Expr, Literal, Stmt, SwitchCase};
use crate::error::EmitError;
use crate::names::sanitize;
use crate::types::UNKNOWN_TYPE;

/// Fixed name bound by every catch clause.
const CATCH_BINDING: &str = "error";

/// Type tag of counted loop variables.
const COUNTER_TYPE: &str = "number";

impl Emitter {
    pub(super) fn write_stmt(&mut self, stmt: &Stmt) -> Result<(), EmitError> {
        match stmt {
            Stmt::Decl(decl) => self.write_decl(decl, Scope::Local)?,

            Stmt::Expr(expr) => {
                let text = self.expr(expr)?;
                self.line(&format!("{text};"));
            }

            // The enclosing brace already scopes the statements.
            Stmt::Block(block) => self.write_block(block)?,

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let test = self.condition(condition)?;
                self.open(&format!("if ({test})"));
                self.write_block(then_branch)?;
                self.write_else(else_branch.as_deref())?;
            }

            Stmt::IfLet {
                name,
                value,
                then_branch,
                else_branch,
            } => {
                let (subject, binding) = self.optional_binding(name, value)?;
                self.open(&format!("if (!__isNil({subject}))"));
                if let Some(binding) = binding {
                    self.line(&binding);
                }
                self.write_block(then_branch)?;
                self.write_else(else_branch.as_deref())?;
            }

            Stmt::Guard { condition, body } => {
                let test = self.expr(condition)?;
                self.open(&format!("if (!{test})"));
                self.write_block(body)?;
                self.close("");
            }

            Stmt::GuardLet { name, value, body } => {
                let (subject, binding) = self.optional_binding(name, value)?;
                self.open(&format!("if (__isNil({subject}))"));
                self.write_block(body)?;
                if !body.stmts.last().is_some_and(Stmt::is_exit) {
                    self.line("return;");
                }
                self.close("");
                if let Some(binding) = binding {
                    self.line(&binding);
                }
            }

            Stmt::Switch {
                subject,
                cases,
                default,
            } => self.write_switch(subject, cases, default.as_ref())?,

            Stmt::ForIn {
                variable,
                sequence,
                body,
            } => self.write_for_in(variable, sequence, body)?,

            Stmt::While { condition, body } => {
                let test = self.condition(condition)?;
                self.open(&format!("while ({test})"));
                self.write_block(body)?;
                self.close("");
            }

            Stmt::Repeat { body, condition } => {
                self.open("do");
                self.write_block(body)?;
                let test = self.condition(condition)?;
                self.close(&format!(" while ({test});"));
            }

            Stmt::Return(None) => self.line("return;"),
            Stmt::Return(Some(value)) => {
                let value = self.expr(value)?;
                self.line(&format!("return {value};"));
            }

            Stmt::Break => self.line("break;"),
            Stmt::Continue => self.line("continue;"),
            Stmt::Blank => self.line(";"),

            // The clause's own binding name is not threaded through yet: the
            // error is always available as `error`.
            Stmt::DoCatch { body, handler, .. } => {
                self.open("try");
                self.write_block(body)?;
                let raw = self.strategy.raw_name(CATCH_BINDING);
                self.reopen(&format!("catch ({raw})"));
                if let Some(binding) = self.strategy.bind_raw(CATCH_BINDING, &raw, UNKNOWN_TYPE) {
                    self.line(&binding);
                }
                self.write_block(handler)?;
                self.close("");
            }

            Stmt::Throw(value) => {
                let value = self.expr(value)?;
                self.line(&format!("throw {value};"));
            }
        }
        Ok(())
    }

    pub(super) fn write_block(&mut self, block: &Block) -> Result<(), EmitError> {
        for stmt in &block.stmts {
            self.write_stmt(stmt)?;
        }
        Ok(())
    }

    /// Finish an `if` whose then-branch is open, chaining `else if`.
    fn write_else(&mut self, else_branch: Option<&Stmt>) -> Result<(), EmitError> {
        match else_branch {
            None => self.close(""),
            Some(Stmt::If {
                condition,
                then_branch,
                else_branch,
            }) => {
                let test = self.condition(condition)?;
                self.reopen(&format!("else if ({test})"));
                self.write_block(then_branch)?;
                self.write_else(else_branch.as_deref())?;
            }
            Some(Stmt::Block(block)) => {
                self.reopen("else");
                self.write_block(block)?;
                self.close("");
            }
            // `else if let` needs its temporary first, so it nests.
            Some(other) => {
                self.reopen("else");
                self.write_stmt(other)?;
                self.close("");
            }
        }
        Ok(())
    }

    /// Evaluate an optional once and prepare the binding of its unwrapped
    /// value. Returns the expression to test and the binding statement.
    ///
    /// Re-binding a variable to itself needs neither a temporary nor a
    /// binding.
    fn optional_binding(
        &mut self,
        name: &str,
        value: &Expr,
    ) -> Result<(String, Option<String>), EmitError> {
        if matches!(value, Expr::Variable(source) if source == name) {
            return Ok((self.expr(value)?, None));
        }
        let text = self.expr(value)?;
        let temp = self.fresh_temp("opt");
        self.line(&format!("const {temp} = {text};"));
        let binding = self
            .strategy
            .bind_raw(&sanitize(name), &temp, UNKNOWN_TYPE);
        Ok((temp, binding))
    }

    fn write_switch(
        &mut self,
        subject: &Expr,
        cases: &[SwitchCase],
        default: Option<&Block>,
    ) -> Result<(), EmitError> {
        let subject = self.condition(subject)?;
        self.open(&format!("switch ({subject})"));
        for case in cases {
            let Some((last, rest)) = case.patterns.split_last() else {
                return Err(EmitError::UnsupportedNode {
                    kind: "case",
                    context: "without patterns",
                });
            };
            for pattern in rest {
                let label = self.case_label(pattern)?;
                self.line(&format!("case {label}:"));
            }
            let label = self.case_label(last)?;
            self.open(&format!("case {label}:"));
            self.write_block(&case.body)?;
            // Cases never fall through in the source.
            self.line("break;");
            self.close("");
        }
        if let Some(body) = default {
            self.open("default:");
            self.write_block(body)?;
            self.line("break;");
            self.close("");
        }
        self.close("");
        Ok(())
    }

    fn case_label(&self, pattern: &Expr) -> Result<String, EmitError> {
        if let Expr::Range { .. } = pattern {
            return Err(EmitError::UnsupportedNode {
                kind: "range",
                context: "as a switch case pattern",
            });
        }
        self.expr(pattern)
    }

    fn write_for_in(&mut self, variable: &str, sequence: &Expr, body: &Block) -> Result<(), EmitError> {
        let name = sanitize(variable);
        let raw = self.strategy.raw_name(&name);
        match sequence {
            Expr::Range {
                lower,
                upper,
                inclusive,
            } => {
                let lower = self.expr(lower)?;
                let cmp = if *inclusive { "<=" } else { "<" };
                let header = if is_literal(upper) {
                    let upper = self.expr(upper)?;
                    format!("for (let {raw} = {lower}; {raw} {cmp} {upper}; {raw}++)")
                } else {
                    // Evaluate the bound once, like the source range.
                    let upper = self.expr(upper)?;
                    let bound = self.fresh_temp("bound");
                    format!(
                        "for (let {raw} = {lower}, {bound} = {upper}; {raw} {cmp} {bound}; {raw}++)"
                    )
                };
                self.open(&header);
                if let Some(binding) = self.strategy.bind_raw(&name, &raw, COUNTER_TYPE) {
                    self.line(&binding);
                }
            }
            sequence => {
                let sequence = self.expr(sequence)?;
                self.open(&format!("for (const {raw} of {sequence})"));
                if let Some(binding) = self.strategy.bind_raw(&name, &raw, UNKNOWN_TYPE) {
                    self.line(&binding);
                }
            }
        }
        self.write_block(body)?;
        self.close("");
        Ok(())
    }
}

/// Only a literal bound can be re-read every iteration; the loop body may
/// reassign anything else.
fn is_literal(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Literal(Literal::Int(_)) | Expr::Literal(Literal::Double(_))
    )
}
