//! The tree rewriter: a single depth-first pass that inverts comparison
//! operators in place and records where it did.
//!
//! The traversal is a visitor with one capability, "visit and possibly
//! rewrite": [`Transform`] recurses into children unchanged by default, and
//! [`ConditionalInverter`] overrides expression visits to specialize
//! `Compare` nodes only. Every other node kind passes through untouched.

use crate::ast::{Expr, ExprKind, Module, Stmt, StmtKind};
use crate::OpflipResult;
use serde::Serialize;

/// One inverted operator: where it was and what it originally said.
///
/// The reported column is the comparison chain's start column offset by the
/// operator's index within the chain, not the operator's true source column.
/// That approximation is part of the tool's published output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvertedOp {
    /// 1-based source line of the comparison chain.
    pub line: usize,
    /// Chain start column (0-based) plus the operator's chain index.
    pub col: usize,
    /// Symbolic name of the original operator kind, e.g. `LESS_THAN`.
    pub kind: &'static str,
}

/// Result of one full inversion pass over a source snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inversion {
    /// Position records in document order, one per inverted operator.
    pub positions: Vec<InvertedOp>,
    /// The re-emitted source with all eligible operators inverted.
    pub code: String,
}

/// Depth-first tree transformer. Default methods recurse into children
/// unchanged; override a `visit_*` method to rewrite a node kind.
pub trait Transform {
    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_module<T: Transform + ?Sized>(transform: &mut T, module: &mut Module) {
    for stmt in &mut module.body {
        transform.visit_stmt(stmt);
    }
}

/// Visits a statement's children in document order.
pub fn walk_stmt<T: Transform + ?Sized>(transform: &mut T, stmt: &mut Stmt) {
    match &mut stmt.kind {
        StmtKind::Expr(expr) => transform.visit_expr(expr),
        StmtKind::Assign { target, value } => {
            transform.visit_expr(target);
            transform.visit_expr(value);
        }
        StmtKind::If { test, body, orelse } => {
            transform.visit_expr(test);
            for stmt in body {
                transform.visit_stmt(stmt);
            }
            for stmt in orelse {
                transform.visit_stmt(stmt);
            }
        }
        StmtKind::While { test, body } => {
            transform.visit_expr(test);
            for stmt in body {
                transform.visit_stmt(stmt);
            }
        }
        StmtKind::For { target, iter, body } => {
            transform.visit_expr(target);
            transform.visit_expr(iter);
            for stmt in body {
                transform.visit_stmt(stmt);
            }
        }
        StmtKind::Return(value) => {
            if let Some(expr) = value {
                transform.visit_expr(expr);
            }
        }
        StmtKind::Pass | StmtKind::Break | StmtKind::Continue => {}
    }
}

/// Visits an expression's children in document order.
pub fn walk_expr<T: Transform + ?Sized>(transform: &mut T, expr: &mut Expr) {
    match &mut expr.kind {
        ExprKind::BoolOp { values, .. } => {
            for value in values {
                transform.visit_expr(value);
            }
        }
        ExprKind::UnaryOp { operand, .. } => transform.visit_expr(operand),
        ExprKind::BinOp { left, right, .. } => {
            transform.visit_expr(left);
            transform.visit_expr(right);
        }
        ExprKind::Compare {
            left, comparators, ..
        } => {
            transform.visit_expr(left);
            for comparator in comparators {
                transform.visit_expr(comparator);
            }
        }
        ExprKind::Call { func, args } => {
            transform.visit_expr(func);
            for arg in args {
                transform.visit_expr(arg);
            }
        }
        ExprKind::Name(_)
        | ExprKind::Number(_)
        | ExprKind::Str(_)
        | ExprKind::Bool(_)
        | ExprKind::NoneLiteral => {}
    }
}

/// Inverts every invertible comparison operator it encounters, accumulating
/// a position record per inversion in traversal order.
#[derive(Debug, Default)]
pub struct ConditionalInverter {
    pub positions: Vec<InvertedOp>,
}

impl ConditionalInverter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transform for ConditionalInverter {
    fn visit_expr(&mut self, expr: &mut Expr) {
        if let ExprKind::Compare { ops, .. } = &mut expr.kind {
            // Operators are processed left to right before descending into
            // operands, so nested chains report after their enclosing chain.
            for (index, op) in ops.iter_mut().enumerate() {
                if let Some(flipped) = op.inverse() {
                    self.positions.push(InvertedOp {
                        line: expr.span.line,
                        col: expr.span.col + index,
                        kind: op.name(),
                    });
                    *op = flipped;
                }
            }
        }
        walk_expr(self, expr);
    }
}

/// Runs the rewriter over a tree it takes ownership of, returning the
/// position records and the mutated tree.
pub fn invert_module(mut module: Module) -> (Vec<InvertedOp>, Module) {
    let mut inverter = ConditionalInverter::new();
    walk_module(&mut inverter, &mut module);
    (inverter.positions, module)
}

/// The single entry point: parse, invert, re-emit.
///
/// Malformed input fails with the parser's error before any mutation;
/// input without eligible operators succeeds with an empty record list and
/// semantically unchanged output.
pub fn invert_source(source: &str) -> OpflipResult<Inversion> {
    let module = crate::parser::parse(source)?;
    let (positions, module) = invert_module(module);
    let code = crate::unparse::unparse(&module)?;
    Ok(Inversion { positions, code })
}
