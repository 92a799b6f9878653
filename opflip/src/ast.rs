//! Tree types for the parsed Python subset
//!
//! The shapes follow CPython's `ast` module where it matters for this tool:
//! `elif` chains desugar into a single-`If` `orelse`, and a comparison chain
//! like `a < b <= c` is one [`Compare`](ExprKind::Compare) node holding an
//! ordered operator sequence alongside its comparators.

use std::fmt;

/// Location of a node or token in the source text.
///
/// `line` is 1-based and `col` is 0-based, matching CPython's
/// `lineno`/`col_offset` convention. `start`/`end` are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    /// Extends this span's byte range to `end`, keeping the start location.
    pub fn to(&self, end: usize) -> Span {
        Span {
            start: self.start,
            end,
            line: self.line,
            col: self.col,
        }
    }
}

/// A parsed source snippet: the root of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expr(Expr),
    Assign {
        target: Expr,
        value: Expr,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
    },
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
    },
    Return(Option<Expr>),
    Pass,
    Break,
    Continue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Name(String),
    /// Numeric literal, stored as its raw lexeme so re-emission is exact.
    Number(String),
    /// String literal, raw lexeme including quotes.
    Str(String),
    Bool(bool),
    NoneLiteral,
    BoolOp {
        op: BoolOpKind,
        values: Vec<Expr>,
    },
    UnaryOp {
        op: UnaryOpKind,
        operand: Box<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinOpKind,
        right: Box<Expr>,
    },
    /// One left-to-right comparison chain: `left ops[0] comparators[0] ...`.
    /// `ops` and `comparators` always have the same length.
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOpKind {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOpKind {
    Not,
    Neg,
    Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinOpKind {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::FloorDiv => "//",
            BinOpKind::Mod => "%",
            BinOpKind::Pow => "**",
        }
    }
}

/// Comparison operator kinds.
///
/// The first six form the invertible set; `is`/`is not`/`in`/`not in` are
/// parsed and re-emitted but have no logical inverse in this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Lt,
    LtE,
    Gt,
    GtE,
    Eq,
    NotEq,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOp {
    /// The inversion table: maps each invertible kind to its logical inverse.
    ///
    /// The mapping is an involution (`op.inverse()` twice restores `op`).
    /// Identity and membership operators return `None`: they are left
    /// untouched by the rewriter.
    pub fn inverse(self) -> Option<CmpOp> {
        match self {
            CmpOp::Lt => Some(CmpOp::GtE),
            CmpOp::LtE => Some(CmpOp::Gt),
            CmpOp::Gt => Some(CmpOp::LtE),
            CmpOp::GtE => Some(CmpOp::Lt),
            CmpOp::Eq => Some(CmpOp::NotEq),
            CmpOp::NotEq => Some(CmpOp::Eq),
            CmpOp::Is | CmpOp::IsNot | CmpOp::In | CmpOp::NotIn => None,
        }
    }

    /// Symbolic kind name, used in position records.
    pub fn name(self) -> &'static str {
        match self {
            CmpOp::Lt => "LESS_THAN",
            CmpOp::LtE => "LESS_EQUAL",
            CmpOp::Gt => "GREATER_THAN",
            CmpOp::GtE => "GREATER_EQUAL",
            CmpOp::Eq => "EQUAL",
            CmpOp::NotEq => "NOT_EQUAL",
            CmpOp::Is => "IS",
            CmpOp::IsNot => "IS_NOT",
            CmpOp::In => "IN",
            CmpOp::NotIn => "NOT_IN",
        }
    }

    /// Source spelling, used by the unparser.
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::LtE => "<=",
            CmpOp::Gt => ">",
            CmpOp::GtE => ">=",
            CmpOp::Eq => "==",
            CmpOp::NotEq => "!=",
            CmpOp::Is => "is",
            CmpOp::IsNot => "is not",
            CmpOp::In => "in",
            CmpOp::NotIn => "not in",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
