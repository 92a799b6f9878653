//! Source re-emission
//!
//! Renders a [`Module`] back to text. The contract is semantic equivalence,
//! not formatting preservation: output uses 4-space indentation, single
//! spaces around operators, no blank lines, `elif` re-synthesized from
//! single-`If` `orelse` chains, and parentheses only where operator
//! precedence requires them. String and number literals are raw lexemes, so
//! their original spelling survives verbatim.

use crate::ast::{BinOpKind, BoolOpKind, Expr, ExprKind, Module, Stmt, StmtKind, UnaryOpKind};
use crate::OpflipResult;
use std::fmt::{self, Write};

pub fn unparse(module: &Module) -> OpflipResult<String> {
    let mut out = String::new();
    for stmt in &module.body {
        write_stmt(&mut out, stmt, 0)?;
    }
    Ok(out)
}

fn write_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("    ");
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt, level: usize) -> fmt::Result {
    match &stmt.kind {
        StmtKind::Expr(expr) => {
            write_indent(out, level);
            write_expr(out, expr, 0)?;
            out.push('\n');
        }
        StmtKind::Assign { target, value } => {
            write_indent(out, level);
            write_expr(out, target, 0)?;
            out.push_str(" = ");
            write_expr(out, value, 0)?;
            out.push('\n');
        }
        StmtKind::If { test, body, orelse } => {
            write_if(out, test, body, orelse, level, "if")?;
        }
        StmtKind::While { test, body } => {
            write_indent(out, level);
            out.push_str("while ");
            write_expr(out, test, 0)?;
            out.push_str(":\n");
            write_block(out, body, level + 1)?;
        }
        StmtKind::For { target, iter, body } => {
            write_indent(out, level);
            out.push_str("for ");
            write_expr(out, target, 0)?;
            out.push_str(" in ");
            write_expr(out, iter, 0)?;
            out.push_str(":\n");
            write_block(out, body, level + 1)?;
        }
        StmtKind::Return(value) => {
            write_indent(out, level);
            out.push_str("return");
            if let Some(expr) = value {
                out.push(' ');
                write_expr(out, expr, 0)?;
            }
            out.push('\n');
        }
        StmtKind::Pass => {
            write_indent(out, level);
            out.push_str("pass\n");
        }
        StmtKind::Break => {
            write_indent(out, level);
            out.push_str("break\n");
        }
        StmtKind::Continue => {
            write_indent(out, level);
            out.push_str("continue\n");
        }
    }
    Ok(())
}

fn write_if(
    out: &mut String,
    test: &Expr,
    body: &[Stmt],
    orelse: &[Stmt],
    level: usize,
    keyword: &str,
) -> fmt::Result {
    write_indent(out, level);
    out.push_str(keyword);
    out.push(' ');
    write_expr(out, test, 0)?;
    out.push_str(":\n");
    write_block(out, body, level + 1)?;
    if orelse.is_empty() {
        return Ok(());
    }
    // A lone nested `If` in the else branch came from an `elif` chain.
    if let [only] = orelse {
        if let StmtKind::If { test, body, orelse } = &only.kind {
            return write_if(out, test, body, orelse, level, "elif");
        }
    }
    write_indent(out, level);
    out.push_str("else:\n");
    write_block(out, orelse, level + 1)
}

fn write_block(out: &mut String, body: &[Stmt], level: usize) -> fmt::Result {
    for stmt in body {
        write_stmt(out, stmt, level)?;
    }
    Ok(())
}

/// Binding strength, low to high. A child is parenthesized when its own
/// precedence is below the minimum its position demands.
fn precedence(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::BoolOp {
            op: BoolOpKind::Or, ..
        } => 1,
        ExprKind::BoolOp {
            op: BoolOpKind::And,
            ..
        } => 2,
        ExprKind::UnaryOp {
            op: UnaryOpKind::Not,
            ..
        } => 3,
        ExprKind::Compare { .. } => 4,
        ExprKind::BinOp { op, .. } => match op {
            BinOpKind::Add | BinOpKind::Sub => 5,
            BinOpKind::Mul | BinOpKind::Div | BinOpKind::FloorDiv | BinOpKind::Mod => 6,
            BinOpKind::Pow => 8,
        },
        ExprKind::UnaryOp { .. } => 7,
        _ => 9,
    }
}

fn write_expr(out: &mut String, expr: &Expr, min_prec: u8) -> fmt::Result {
    let prec = precedence(expr);
    let parens = prec < min_prec;
    if parens {
        out.push('(');
    }
    match &expr.kind {
        ExprKind::Name(name) => out.push_str(name),
        ExprKind::Number(text) => out.push_str(text),
        ExprKind::Str(text) => out.push_str(text),
        ExprKind::Bool(true) => out.push_str("True"),
        ExprKind::Bool(false) => out.push_str("False"),
        ExprKind::NoneLiteral => out.push_str("None"),
        ExprKind::BoolOp { op, values } => {
            let separator = match op {
                BoolOpKind::And => " and ",
                BoolOpKind::Or => " or ",
            };
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(separator);
                }
                write_expr(out, value, prec + 1)?;
            }
        }
        ExprKind::UnaryOp { op, operand } => {
            match op {
                UnaryOpKind::Not => out.push_str("not "),
                UnaryOpKind::Neg => out.push('-'),
                UnaryOpKind::Pos => out.push('+'),
            }
            write_expr(out, operand, prec)?;
        }
        ExprKind::BinOp { left, op, right } => {
            // `**` associates right; everything else associates left.
            let (left_min, right_min) = if matches!(op, BinOpKind::Pow) {
                (prec + 1, prec)
            } else {
                (prec, prec + 1)
            };
            write_expr(out, left, left_min)?;
            write!(out, " {} ", op.symbol())?;
            write_expr(out, right, right_min)?;
        }
        ExprKind::Compare {
            left,
            ops,
            comparators,
        } => {
            write_expr(out, left, prec + 1)?;
            for (op, comparator) in ops.iter().zip(comparators) {
                write!(out, " {} ", op.symbol())?;
                write_expr(out, comparator, prec + 1)?;
            }
        }
        ExprKind::Call { func, args } => {
            write_expr(out, func, 9)?;
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg, 0)?;
            }
            out.push(')');
        }
    }
    if parens {
        out.push(')');
    }
    Ok(())
}
