//! Input AST for the code generator.
//!
//! The tree is produced by an upstream parser and resolver; by the time it
//! reaches this crate it is assumed structurally valid. Declarations,
//! statements and expressions are closed sum types so every translator
//! matches them exhaustively.
//!
//! All types are serde-serializable (externally tagged, `snake_case`), which is
//! how the CLI receives programs from the front end.

use serde::{Deserialize, Serialize};

/// A whole program: top-level items in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A top-level node with its (optional) source position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub node: Stmt,
    pub span: Option<Span>,
}

/// Rough source position of a top-level item, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

/// A braced statement list. Control-flow bodies are always blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decl {
    Variable(VariableDecl),
    Struct(TypeDecl),
    Class(TypeDecl),
    Function(FunctionDecl),
    Enum(EnumDecl),
    Protocol(TypeDecl),
    TypeAlias(TypeAliasDecl),
}

/// `let` / `var` declaration, at any scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    pub type_annotation: Option<TypeIdentifier>,
    pub initializer: Option<Expr>,
    /// Declared with `let` in the source.
    #[serde(default)]
    pub constant: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub is_static: bool,
}

/// Body of a struct, class or protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    /// Superclass and/or conformances, in source order.
    #[serde(default)]
    pub inherits: Vec<String>,
    #[serde(default)]
    pub members: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeIdentifier>,
    #[serde(default)]
    pub body: Block,
    #[serde(default)]
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Name used inside the function body.
    pub name: String,
    /// Call-site label. `None` means the internal name doubles as the label,
    /// `Some("_")` means the argument is passed positionally.
    pub label: Option<String>,
    pub default: Option<Expr>,
    #[serde(default)]
    pub variadic: bool,
    pub type_annotation: Option<TypeIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub cases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasDecl {
    pub name: String,
    pub target: TypeIdentifier,
}

/// Declared type of a binding, parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeIdentifier {
    Named(String),
    Array(Box<TypeIdentifier>),
    Dictionary {
        key: Box<TypeIdentifier>,
        value: Box<TypeIdentifier>,
    },
    Optional(Box<TypeIdentifier>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    Decl(Decl),
    Expr(Expr),
    Block(Block),
    If {
        condition: Expr,
        then_branch: Block,
        /// Either a block or another conditional (`else if`).
        else_branch: Option<Box<Stmt>>,
    },
    IfLet {
        name: String,
        value: Expr,
        then_branch: Block,
        else_branch: Option<Box<Stmt>>,
    },
    Guard {
        condition: Expr,
        body: Block,
    },
    GuardLet {
        name: String,
        value: Expr,
        body: Block,
    },
    Switch {
        subject: Expr,
        #[serde(default)]
        cases: Vec<SwitchCase>,
        default: Option<Block>,
    },
    ForIn {
        variable: String,
        sequence: Expr,
        body: Block,
    },
    While {
        condition: Expr,
        body: Block,
    },
    Repeat {
        body: Block,
        condition: Expr,
    },
    Return(Option<Expr>),
    Break,
    Continue,
    Blank,
    DoCatch {
        body: Block,
        /// Binding name declared by the catch clause, if any.
        binding: Option<String>,
        handler: Block,
    },
    Throw(Expr),
}

/// One `case` of a switch: its patterns share a single body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub patterns: Vec<Expr>,
    #[serde(default)]
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Assign {
        target: Box<Expr>,
        operator: String,
        value: Box<Expr>,
    },
    Ternary {
        condition: Box<Expr>,
        then_value: Box<Expr>,
        else_value: Box<Expr>,
    },
    Binary {
        operator: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        operator: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        operator: String,
        operand: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        #[serde(default)]
        arguments: Vec<Argument>,
        /// Type construction (`Point(x: 1)`) rather than a function call.
        #[serde(default)]
        initializer: bool,
    },
    Member {
        object: Box<Expr>,
        name: String,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    /// `value?` (or `value!` when forced) used as the base of a chain.
    OptionalChain {
        value: Box<Expr>,
        #[serde(default)]
        forced: bool,
    },
    Cast {
        value: Box<Expr>,
        target: TypeIdentifier,
    },
    TypeTest {
        value: Box<Expr>,
        target: TypeIdentifier,
    },
    Try {
        value: Box<Expr>,
        #[serde(default)]
        mode: TryMode,
    },
    Literal(Literal),
    #[serde(rename = "self")]
    SelfRef,
    Variable(String),
    Grouping(Box<Expr>),
    Array(Vec<Expr>),
    Dictionary(Vec<DictionaryEntry>),
    Range {
        lower: Box<Expr>,
        upper: Box<Expr>,
        inclusive: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TryMode {
    /// `try`
    #[default]
    Plain,
    /// `try?`
    Optional,
    /// `try!`
    Forced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub label: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub key: Expr,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    /// Booleans, `nil` (no raw text) and anything else the front end does not
    /// classify further.
    Generic(Option<String>),
    String {
        value: String,
        #[serde(default)]
        multiline: bool,
    },
    Int(String),
    Double(String),
}

impl Program {
    pub fn new(nodes: Vec<Stmt>) -> Self {
        Self {
            items: nodes
                .into_iter()
                .map(|node| Item { node, span: None })
                .collect(),
        }
    }

    /// Parse a program from the JSON produced by the front end.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }
}

impl Decl {
    /// Discriminator used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Decl::Variable(_) => "variable",
            Decl::Struct(_) => "struct",
            Decl::Class(_) => "class",
            Decl::Function(_) => "function",
            Decl::Enum(_) => "enum",
            Decl::Protocol(_) => "protocol",
            Decl::TypeAlias(_) => "type alias",
        }
    }
}

impl Stmt {
    /// Discriminator used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::Decl(decl) => decl.kind(),
            Stmt::Expr(_) => "expression statement",
            Stmt::Block(_) => "block",
            Stmt::If { .. } => "if",
            Stmt::IfLet { .. } => "if-let",
            Stmt::Guard { .. } => "guard",
            Stmt::GuardLet { .. } => "guard-let",
            Stmt::Switch { .. } => "switch",
            Stmt::ForIn { .. } => "for-in",
            Stmt::While { .. } => "while",
            Stmt::Repeat { .. } => "repeat-while",
            Stmt::Return(_) => "return",
            Stmt::Break => "break",
            Stmt::Continue => "continue",
            Stmt::Blank => "blank",
            Stmt::DoCatch { .. } => "do-catch",
            Stmt::Throw(_) => "throw",
        }
    }

    /// True for statements after which control never falls through.
    pub fn is_exit(&self) -> bool {
        matches!(
            self,
            Stmt::Return(_) | Stmt::Throw(_) | Stmt::Break | Stmt::Continue
        )
    }

    pub fn decl(decl: Decl) -> Self {
        Stmt::Decl(decl)
    }

    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr(expr)
    }

    pub fn const_decl(name: &str, init: Expr) -> Self {
        Stmt::Decl(Decl::Variable(VariableDecl::constant(name, Some(init))))
    }

    pub fn var_decl(name: &str, init: Option<Expr>) -> Self {
        Stmt::Decl(Decl::Variable(VariableDecl::mutable(name, init)))
    }

    pub fn if_stmt(condition: Expr, then_branch: Vec<Stmt>, else_branch: Option<Stmt>) -> Self {
        Stmt::If {
            condition,
            then_branch: Block::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn if_let(name: &str, value: Expr, then_branch: Vec<Stmt>) -> Self {
        Stmt::IfLet {
            name: name.to_string(),
            value,
            then_branch: Block::new(then_branch),
            else_branch: None,
        }
    }

    pub fn return_stmt(value: Option<Expr>) -> Self {
        Stmt::Return(value)
    }

    pub fn block(stmts: Vec<Stmt>) -> Self {
        Stmt::Block(Block::new(stmts))
    }
}

impl VariableDecl {
    pub fn constant(name: &str, initializer: Option<Expr>) -> Self {
        Self {
            name: name.to_string(),
            type_annotation: None,
            initializer,
            constant: true,
            private: false,
            is_static: false,
        }
    }

    pub fn mutable(name: &str, initializer: Option<Expr>) -> Self {
        Self {
            constant: false,
            ..Self::constant(name, initializer)
        }
    }

    pub fn typed(mut self, ty: TypeIdentifier) -> Self {
        self.type_annotation = Some(ty);
        self
    }
}

impl TypeDecl {
    pub fn new(name: &str, members: Vec<Decl>) -> Self {
        Self {
            name: name.to_string(),
            inherits: Vec::new(),
            members,
        }
    }
}

impl FunctionDecl {
    pub fn new(name: &str, params: Vec<Parameter>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.to_string(),
            params,
            return_type: None,
            body: Block::new(body),
            is_static: false,
        }
    }
}

impl Parameter {
    /// A parameter whose label is its internal name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            default: None,
            variadic: false,
            type_annotation: None,
        }
    }

    /// A parameter passed without a label (`_ name`).
    pub fn positional(name: &str) -> Self {
        Self {
            label: Some("_".to_string()),
            ..Self::named(name)
        }
    }

    pub fn labeled(label: &str, name: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            ..Self::named(name)
        }
    }

    pub fn with_default(mut self, value: Expr) -> Self {
        self.default = Some(value);
        self
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn typed(mut self, ty: TypeIdentifier) -> Self {
        self.type_annotation = Some(ty);
        self
    }

    /// True when the call site passes this argument without a label.
    pub fn is_positional(&self) -> bool {
        self.label.as_deref() == Some("_")
    }
}

impl TypeIdentifier {
    pub fn named(name: &str) -> Self {
        TypeIdentifier::Named(name.to_string())
    }

    pub fn array(element: TypeIdentifier) -> Self {
        TypeIdentifier::Array(Box::new(element))
    }

    pub fn dictionary(key: TypeIdentifier, value: TypeIdentifier) -> Self {
        TypeIdentifier::Dictionary {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn optional(inner: TypeIdentifier) -> Self {
        TypeIdentifier::Optional(Box::new(inner))
    }
}

impl Argument {
    pub fn labeled(label: &str, value: Expr) -> Self {
        Self {
            label: Some(label.to_string()),
            value,
        }
    }

    pub fn positional(value: Expr) -> Self {
        Self { label: None, value }
    }
}

impl Expr {
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Assign { .. } => "assignment",
            Expr::Ternary { .. } => "ternary",
            Expr::Binary { .. } => "binary",
            Expr::Logical { .. } => "logical",
            Expr::Unary { .. } => "unary",
            Expr::Call { .. } => "call",
            Expr::Member { .. } => "member access",
            Expr::Index { .. } => "subscript",
            Expr::OptionalChain { .. } => "optional chain",
            Expr::Cast { .. } => "type cast",
            Expr::TypeTest { .. } => "type test",
            Expr::Try { .. } => "try",
            Expr::Literal(_) => "literal",
            Expr::SelfRef => "self",
            Expr::Variable(_) => "variable",
            Expr::Grouping(_) => "grouping",
            Expr::Array(_) => "array literal",
            Expr::Dictionary(_) => "dictionary literal",
            Expr::Range { .. } => "range",
        }
    }

    pub fn ident(name: &str) -> Self {
        Expr::Variable(name.to_string())
    }

    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal::Int(value.to_string()))
    }

    pub fn double(raw: &str) -> Self {
        Expr::Literal(Literal::Double(raw.to_string()))
    }

    pub fn string(value: &str) -> Self {
        Expr::Literal(Literal::String {
            value: value.to_string(),
            multiline: false,
        })
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal(Literal::Generic(Some(value.to_string())))
    }

    pub fn nil() -> Self {
        Expr::Literal(Literal::Generic(None))
    }

    pub fn binary(left: Expr, operator: &str, right: Expr) -> Self {
        Expr::Binary {
            operator: operator.to_string(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(left: Expr, operator: &str, right: Expr) -> Self {
        Expr::Logical {
            operator: operator.to_string(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(operator: &str, operand: Expr) -> Self {
        Expr::Unary {
            operator: operator.to_string(),
            operand: Box::new(operand),
        }
    }

    pub fn assign(target: Expr, operator: &str, value: Expr) -> Self {
        Expr::Assign {
            target: Box::new(target),
            operator: operator.to_string(),
            value: Box::new(value),
        }
    }

    pub fn call(callee: Expr, arguments: Vec<Argument>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            arguments,
            initializer: false,
        }
    }

    pub fn construct(callee: Expr, arguments: Vec<Argument>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            arguments,
            initializer: true,
        }
    }

    pub fn member(object: Expr, name: &str) -> Self {
        Expr::Member {
            object: Box::new(object),
            name: name.to_string(),
        }
    }

    pub fn index(object: Expr, index: Expr) -> Self {
        Expr::Index {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    pub fn chain(value: Expr) -> Self {
        Expr::OptionalChain {
            value: Box::new(value),
            forced: false,
        }
    }

    pub fn force(value: Expr) -> Self {
        Expr::OptionalChain {
            value: Box::new(value),
            forced: true,
        }
    }

    pub fn range(lower: Expr, upper: Expr, inclusive: bool) -> Self {
        Expr::Range {
            lower: Box::new(lower),
            upper: Box::new(upper),
            inclusive,
        }
    }
}
