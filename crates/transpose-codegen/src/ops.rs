//! Operator mapping.
//!
//! Each operator family is a closed enum parsed from its source spelling.
//! Spellings outside the table (including user-defined operators) are
//! reported instead of being lowered to a guess.

use crate::error::{EmitError, OperatorPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Identical,
    NotIdentical,
    Lt,
    Le,
    Gt,
    Ge,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    NilCoalesce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Neg,
    Plus,
    BitNot,
}

fn unsupported(operator: &str, position: OperatorPosition) -> EmitError {
    EmitError::UnsupportedOperator {
        operator: operator.to_string(),
        position,
    }
}

impl AssignmentOperator {
    pub fn parse(source: &str) -> Result<Self, EmitError> {
        Ok(match source {
            "=" => Self::Assign,
            "+=" => Self::Add,
            "-=" => Self::Sub,
            "*=" => Self::Mul,
            "/=" => Self::Div,
            "%=" => Self::Rem,
            "&=" => Self::BitAnd,
            "|=" => Self::BitOr,
            "^=" => Self::BitXor,
            "<<=" => Self::Shl,
            ">>=" => Self::Shr,
            other => return Err(unsupported(other, OperatorPosition::Assignment)),
        })
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
            Self::Rem => "%=",
            Self::BitAnd => "&=",
            Self::BitOr => "|=",
            Self::BitXor => "^=",
            Self::Shl => "<<=",
            Self::Shr => ">>=",
        }
    }
}

impl BinaryOperator {
    pub fn parse(source: &str) -> Result<Self, EmitError> {
        Ok(match source {
            // Overflow operators wrap in the source; numbers do not overflow here.
            "+" | "&+" => Self::Add,
            "-" | "&-" => Self::Sub,
            "*" | "&*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "===" => Self::Identical,
            "!==" => Self::NotIdentical,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "&" => Self::BitAnd,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            "??" => Self::NilCoalesce,
            other => return Err(unsupported(other, OperatorPosition::Binary)),
        })
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            // Value equality has no loose-equality pitfalls to preserve.
            Self::Eq | Self::Identical => "===",
            Self::Ne | Self::NotIdentical => "!==",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::NilCoalesce => "??",
        }
    }
}

impl LogicalOperator {
    pub fn parse(source: &str) -> Result<Self, EmitError> {
        match source {
            "&&" => Ok(Self::And),
            "||" => Ok(Self::Or),
            other => Err(unsupported(other, OperatorPosition::Logical)),
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl UnaryOperator {
    pub fn parse(source: &str) -> Result<Self, EmitError> {
        match source {
            "!" => Ok(Self::Not),
            "-" => Ok(Self::Neg),
            "+" => Ok(Self::Plus),
            "~" => Ok(Self::BitNot),
            other => Err(unsupported(other, OperatorPosition::Unary)),
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Neg => "-",
            Self::Plus => "+",
            Self::BitNot => "~",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_assignment() {
        assert_eq!(AssignmentOperator::parse("+=").unwrap().token(), "+=");
        assert_eq!(AssignmentOperator::parse("-=").unwrap().token(), "-=");
        assert_eq!(AssignmentOperator::parse("<<=").unwrap().token(), "<<=");
    }

    #[test]
    fn test_unknown_assignment_is_rejected() {
        let err = AssignmentOperator::parse("&&=").unwrap_err();
        assert_eq!(
            err,
            EmitError::UnsupportedOperator {
                operator: "&&=".to_string(),
                position: OperatorPosition::Assignment,
            }
        );
    }

    #[test]
    fn test_equality_is_strict() {
        assert_eq!(BinaryOperator::parse("==").unwrap().token(), "===");
        assert_eq!(BinaryOperator::parse("!=").unwrap().token(), "!==");
        assert_eq!(BinaryOperator::parse("===").unwrap().token(), "===");
    }

    #[test]
    fn test_overflow_operators() {
        assert_eq!(BinaryOperator::parse("&+").unwrap(), BinaryOperator::Add);
        assert_eq!(BinaryOperator::parse("&*").unwrap().token(), "*");
    }

    #[test]
    fn test_custom_operator_rejected() {
        assert!(BinaryOperator::parse("<>").is_err());
        assert!(BinaryOperator::parse("...").is_err());
        assert!(LogicalOperator::parse("and").is_err());
        assert!(UnaryOperator::parse("++").is_err());
    }
}
