//! Syntax tree consumed by the evaluator
//!
//! Ripple does not lex or parse. A frontend hands the evaluator a
//! [`Program`] built from these nodes; every node carries a [`Span`] so
//! runtime errors can point back at the source.
//!
//! The [`build`] module has terse constructors for assembling trees by hand
//! (hosts embedding small scripts, and the test suite).

pub mod build;

use std::fmt;
use std::rc::Rc;

/// A source location (1-indexed line and column, `0:0` when unknown).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Line number
    pub line: u32,
    /// Column number
    pub column: u32,
}

impl Span {
    /// Create a span at the given line and column.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Whether this span carries a real location.
    pub fn is_known(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A whole script: top-level statements evaluated in the global scope.
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// Top-level statements
    pub body: Vec<Stmt>,
}

impl Program {
    /// Create a program from its statements.
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Statements
// ═══════════════════════════════════════════════════════════════════════

/// A statement node.
#[derive(Debug, Clone)]
pub struct Stmt {
    /// What kind of statement this is
    pub kind: StmtKind,
    /// Where it starts
    pub span: Span,
}

impl Stmt {
    /// Create a statement with an unknown location.
    pub fn new(kind: StmtKind) -> Self {
        Self {
            kind,
            span: Span::default(),
        }
    }

    /// Attach a source location.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.span = Span::new(line, column);
        self
    }
}

/// Declaration keyword of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// `var` - mutable, function-scoped
    Var,
    /// `let` - mutable, block-scoped
    Let,
    /// `const` - immutable, block-scoped
    Const,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeclKind::Var => "var",
            DeclKind::Let => "let",
            DeclKind::Const => "const",
        })
    }
}

/// One `name = init` pair of a declaration statement.
#[derive(Debug, Clone)]
pub struct Declarator {
    /// Declared name
    pub name: String,
    /// Initializer (`null` when absent)
    pub init: Option<Expr>,
}

/// A function definition shared by declarations and expressions.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    /// Function name (`None` for anonymous functions and lambdas)
    pub name: Option<String>,
    /// Parameter names in order
    pub params: Vec<String>,
    /// Body statements
    pub body: Rc<[Stmt]>,
}

/// Loop variable of a `for-in` / `for-of` statement.
#[derive(Debug, Clone)]
pub struct LoopBinding {
    /// Declaration keyword, or `None` to reuse an existing variable
    pub kind: Option<DeclKind>,
    /// Variable name
    pub name: String,
}

/// A `case`/`default` arm of a switch.
#[derive(Debug, Clone)]
pub struct SwitchCase {
    /// Case test, `None` for `default`
    pub test: Option<Expr>,
    /// Statements run when the case is entered
    pub body: Vec<Stmt>,
}

/// The `catch (param) { ... }` clause of a try statement.
#[derive(Debug, Clone)]
pub struct CatchClause {
    /// Name the caught error is bound to
    pub param: Option<String>,
    /// Handler statements
    pub body: Vec<Stmt>,
}

/// One imported name.
#[derive(Debug, Clone)]
pub enum ImportSpecifier {
    /// `import { imported as local } from "..."`
    Named {
        /// Exported name in the module
        imported: String,
        /// Local binding name
        local: String,
    },
    /// `import * as local from "..."`
    Namespace(String),
}

/// Statement kinds.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Expression evaluated for its value and side effects
    Expr(Expr),
    /// `let`/`const`/`var` declaration
    Declare {
        /// Declaration keyword
        kind: DeclKind,
        /// Declared names and initializers
        declarations: Vec<Declarator>,
    },
    /// `function name(params) { body }`
    Function(Rc<FunctionDef>),
    /// `{ ... }`
    Block(Vec<Stmt>),
    /// `if (test) consequent else alternate`
    If {
        /// Condition
        test: Expr,
        /// Taken when the condition is truthy
        consequent: Box<Stmt>,
        /// Taken otherwise
        alternate: Option<Box<Stmt>>,
    },
    /// `while (test) body`
    While {
        /// Condition
        test: Expr,
        /// Loop body
        body: Box<Stmt>,
    },
    /// `do body while (test)`
    DoWhile {
        /// Loop body
        body: Box<Stmt>,
        /// Condition checked after each iteration
        test: Expr,
    },
    /// `for (init; test; update) body`
    For {
        /// Initializer statement
        init: Option<Box<Stmt>>,
        /// Condition (absent means always true)
        test: Option<Expr>,
        /// Update expression
        update: Option<Expr>,
        /// Loop body
        body: Box<Stmt>,
    },
    /// `for (binding in object) body`
    ForIn {
        /// Loop variable
        binding: LoopBinding,
        /// Enumerated value
        object: Expr,
        /// Loop body
        body: Box<Stmt>,
    },
    /// `for (binding of iterable) body`
    ForOf {
        /// Loop variable
        binding: LoopBinding,
        /// Iterated value
        iterable: Expr,
        /// Loop body
        body: Box<Stmt>,
    },
    /// `switch (discriminant) { cases }`
    Switch {
        /// Value compared against each case
        discriminant: Expr,
        /// Cases in source order
        cases: Vec<SwitchCase>,
    },
    /// `try { block } catch (param) { handler } finally { finalizer }`
    Try {
        /// Protected statements
        block: Vec<Stmt>,
        /// Catch clause
        handler: Option<CatchClause>,
        /// Finally statements
        finalizer: Option<Vec<Stmt>>,
    },
    /// `throw value`
    Throw(Expr),
    /// `return value`
    Return(Option<Expr>),
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `when (test) { body }` guarded sub-block
    When {
        /// Guard condition
        test: Expr,
        /// Statements run when the guard holds
        body: Vec<Stmt>,
    },
    /// `otherwise { body }` runs when no preceding `when` fired
    Otherwise(Vec<Stmt>),
    /// `observe name handler` / `observe (a, b) handler`
    Observe {
        /// Watched variable names
        targets: Vec<String>,
        /// Callback expression
        handler: Expr,
    },
    /// `import { ... } from "source"`
    Import {
        /// Imported names
        specifiers: Vec<ImportSpecifier>,
        /// Module path handed to the loader
        source: String,
    },
    /// `export <declaration>`
    Export(Box<Stmt>),
    /// `;`
    Empty,
}

impl StmtKind {
    /// Short name used in trace output.
    pub fn name(&self) -> &'static str {
        match self {
            StmtKind::Expr(_) => "expression",
            StmtKind::Declare { .. } => "declaration",
            StmtKind::Function(_) => "function",
            StmtKind::Block(_) => "block",
            StmtKind::If { .. } => "if",
            StmtKind::While { .. } => "while",
            StmtKind::DoWhile { .. } => "do-while",
            StmtKind::For { .. } => "for",
            StmtKind::ForIn { .. } => "for-in",
            StmtKind::ForOf { .. } => "for-of",
            StmtKind::Switch { .. } => "switch",
            StmtKind::Try { .. } => "try",
            StmtKind::Throw(_) => "throw",
            StmtKind::Return(_) => "return",
            StmtKind::Break => "break",
            StmtKind::Continue => "continue",
            StmtKind::When { .. } => "when",
            StmtKind::Otherwise(_) => "otherwise",
            StmtKind::Observe { .. } => "observe",
            StmtKind::Import { .. } => "import",
            StmtKind::Export(_) => "export",
            StmtKind::Empty => "empty",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════

/// An expression node.
#[derive(Debug, Clone)]
pub struct Expr {
    /// What kind of expression this is
    pub kind: ExprKind,
    /// Where it starts
    pub span: Span,
}

impl Expr {
    /// Create an expression with an unknown location.
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            span: Span::default(),
        }
    }

    /// Attach a source location.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.span = Span::new(line, column);
        self
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `null` / `undefined`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Numeric literal
    Number(f64),
    /// String literal
    String(String),
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `+x`
    Plus,
    /// `!x`
    Not,
    /// `~x`
    BitNot,
    /// `typeof x`
    TypeOf,
    /// `void x`
    Void,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::TypeOf => "typeof",
            UnaryOp::Void => "void",
        })
    }
}

/// `++` / `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    /// `++`
    Increment,
    /// `--`
    Decrement,
}

impl fmt::Display for UpdateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
        })
    }
}

/// Binary operators (non short-circuiting).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `**`
    Pow,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    UShr,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
        })
    }
}

/// Short-circuiting operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// `&&`
    And,
    /// `||`
    Or,
    /// `??`
    Nullish,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
            LogicalOp::Nullish => "??",
        })
    }
}

/// Expression kinds.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Literal value
    Literal(Literal),
    /// Variable reference
    Ident(String),
    /// `this`
    This,
    /// `[a, b, c]`
    Array(Vec<Expr>),
    /// `{ key: value, ... }`
    Object(Vec<(String, Expr)>),
    /// `function (params) { body }` or `(params) => body`
    Function(Rc<FunctionDef>),
    /// Prefix operator
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },
    /// `++x`, `x--`, ...
    Update {
        /// Increment or decrement
        op: UpdateOp,
        /// Whether the operator precedes the operand
        prefix: bool,
        /// Updated variable
        target: Box<Expr>,
    },
    /// Binary operator
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },
    /// Short-circuiting operator
    Logical {
        /// Operator
        op: LogicalOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand (evaluated only when needed)
        right: Box<Expr>,
    },
    /// `test ? consequent : alternate`
    Conditional {
        /// Condition
        test: Box<Expr>,
        /// Value when truthy
        consequent: Box<Expr>,
        /// Value when falsy
        alternate: Box<Expr>,
    },
    /// `target = value` or `target op= value`
    Assign {
        /// Compound operator (`None` for plain `=`)
        op: Option<BinaryOp>,
        /// Identifier, member, or index expression
        target: Box<Expr>,
        /// Assigned value
        value: Box<Expr>,
    },
    /// `object.property`
    Member {
        /// Object expression
        object: Box<Expr>,
        /// Property name
        property: String,
    },
    /// `object[index]`
    Index {
        /// Object expression
        object: Box<Expr>,
        /// Key expression
        index: Box<Expr>,
    },
    /// `callee(args)`
    Call {
        /// Called expression
        callee: Box<Expr>,
        /// Arguments
        args: Vec<Expr>,
    },
    /// `import(path)`
    Import(Box<Expr>),
}
