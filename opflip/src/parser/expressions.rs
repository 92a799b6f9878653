//! Expression grammar, with Python's precedence ladder:
//! `or` < `and` < `not` < comparison < `+ -` < `* / // %` < unary < `**` < call.

use super::lexer::TokenKind;
use super::Parser;
use crate::ast::{BinOpKind, BoolOpKind, CmpOp, Expr, ExprKind, UnaryOpKind};
use crate::OpflipResult;

pub(crate) fn parse_expression(p: &mut Parser) -> OpflipResult<Expr> {
    parse_or(p)
}

fn parse_or(p: &mut Parser) -> OpflipResult<Expr> {
    parse_bool_op(p, BoolOpKind::Or, TokenKind::Or, parse_and)
}

fn parse_and(p: &mut Parser) -> OpflipResult<Expr> {
    parse_bool_op(p, BoolOpKind::And, TokenKind::And, parse_not)
}

/// Runs of the same boolean operator collapse into one `BoolOp` node with a
/// value list, as in CPython (`a or b or c` has a single `Or`).
fn parse_bool_op(
    p: &mut Parser,
    op: BoolOpKind,
    token: TokenKind,
    next: fn(&mut Parser) -> OpflipResult<Expr>,
) -> OpflipResult<Expr> {
    let first = next(p)?;
    if p.peek().kind != token {
        return Ok(first);
    }
    let mut values = vec![first];
    while p.eat(token.clone()) {
        values.push(next(p)?);
    }
    let span = values[0].span.to(p.prev_end());
    Ok(Expr {
        kind: ExprKind::BoolOp { op, values },
        span,
    })
}

fn parse_not(p: &mut Parser) -> OpflipResult<Expr> {
    if p.peek().kind != TokenKind::Not {
        return parse_comparison(p);
    }
    let token = p.bump();
    let operand = parse_not(p)?;
    let span = token.span.to(operand.span.end);
    Ok(Expr {
        kind: ExprKind::UnaryOp {
            op: UnaryOpKind::Not,
            operand: Box::new(operand),
        },
        span,
    })
}

/// A comparison chain parses into one `Compare` node whose span starts at
/// the leftmost operand; `a < b <= c` yields `ops = [Lt, LtE]`.
fn parse_comparison(p: &mut Parser) -> OpflipResult<Expr> {
    let left = parse_arith(p)?;
    let mut ops = Vec::new();
    let mut comparators = Vec::new();
    while let Some(op) = match_cmp_op(p)? {
        ops.push(op);
        comparators.push(parse_arith(p)?);
    }
    if ops.is_empty() {
        return Ok(left);
    }
    let span = left.span.to(p.prev_end());
    Ok(Expr {
        kind: ExprKind::Compare {
            left: Box::new(left),
            ops,
            comparators,
        },
        span,
    })
}

/// Consumes one comparison operator if the next tokens form one.
/// `not` in operator position can only begin `not in`; `is` may be
/// followed by `not` to form `is not`.
fn match_cmp_op(p: &mut Parser) -> OpflipResult<Option<CmpOp>> {
    let op = match p.peek().kind {
        TokenKind::Lt => CmpOp::Lt,
        TokenKind::Le => CmpOp::LtE,
        TokenKind::Gt => CmpOp::Gt,
        TokenKind::Ge => CmpOp::GtE,
        TokenKind::EqEq => CmpOp::Eq,
        TokenKind::NotEq => CmpOp::NotEq,
        TokenKind::In => CmpOp::In,
        TokenKind::Is => {
            p.bump();
            if p.eat(TokenKind::Not) {
                return Ok(Some(CmpOp::IsNot));
            }
            return Ok(Some(CmpOp::Is));
        }
        TokenKind::Not => {
            p.bump();
            p.expect(TokenKind::In, "'in' after 'not'")?;
            return Ok(Some(CmpOp::NotIn));
        }
        _ => return Ok(None),
    };
    p.bump();
    Ok(Some(op))
}

fn parse_arith(p: &mut Parser) -> OpflipResult<Expr> {
    let mut left = parse_term(p)?;
    loop {
        let op = match p.peek().kind {
            TokenKind::Plus => BinOpKind::Add,
            TokenKind::Minus => BinOpKind::Sub,
            _ => break,
        };
        p.bump();
        let right = parse_term(p)?;
        left = bin_op(left, op, right);
    }
    Ok(left)
}

fn parse_term(p: &mut Parser) -> OpflipResult<Expr> {
    let mut left = parse_factor(p)?;
    loop {
        let op = match p.peek().kind {
            TokenKind::Star => BinOpKind::Mul,
            TokenKind::Slash => BinOpKind::Div,
            TokenKind::DoubleSlash => BinOpKind::FloorDiv,
            TokenKind::Percent => BinOpKind::Mod,
            _ => break,
        };
        p.bump();
        let right = parse_factor(p)?;
        left = bin_op(left, op, right);
    }
    Ok(left)
}

fn parse_factor(p: &mut Parser) -> OpflipResult<Expr> {
    let op = match p.peek().kind {
        TokenKind::Minus => UnaryOpKind::Neg,
        TokenKind::Plus => UnaryOpKind::Pos,
        _ => return parse_power(p),
    };
    let token = p.bump();
    let operand = parse_factor(p)?;
    let span = token.span.to(operand.span.end);
    Ok(Expr {
        kind: ExprKind::UnaryOp {
            op,
            operand: Box::new(operand),
        },
        span,
    })
}

/// `**` is right-associative and its right side is a factor, so `2 ** -1`
/// and `2 ** 3 ** 2` group the way Python groups them.
fn parse_power(p: &mut Parser) -> OpflipResult<Expr> {
    let base = parse_call(p)?;
    if !p.eat(TokenKind::DoubleStar) {
        return Ok(base);
    }
    let exponent = parse_factor(p)?;
    Ok(bin_op(base, BinOpKind::Pow, exponent))
}

fn parse_call(p: &mut Parser) -> OpflipResult<Expr> {
    let mut expr = parse_atom(p)?;
    while p.peek().kind == TokenKind::LParen {
        p.bump();
        let mut args = Vec::new();
        if p.peek().kind != TokenKind::RParen {
            loop {
                args.push(parse_expression(p)?);
                if !p.eat(TokenKind::Comma) {
                    break;
                }
                if p.peek().kind == TokenKind::RParen {
                    break;
                }
            }
        }
        p.expect(TokenKind::RParen, "')'")?;
        let span = expr.span.to(p.prev_end());
        expr = Expr {
            kind: ExprKind::Call {
                func: Box::new(expr),
                args,
            },
            span,
        };
    }
    Ok(expr)
}

fn parse_atom(p: &mut Parser) -> OpflipResult<Expr> {
    let token = p.peek().clone();
    let kind = match token.kind {
        TokenKind::Name(name) => ExprKind::Name(name),
        TokenKind::Number(text) => ExprKind::Number(text),
        TokenKind::Str(text) => ExprKind::Str(text),
        TokenKind::True => ExprKind::Bool(true),
        TokenKind::False => ExprKind::Bool(false),
        TokenKind::None => ExprKind::NoneLiteral,
        TokenKind::LParen => {
            p.bump();
            let inner = parse_expression(p)?;
            p.expect(TokenKind::RParen, "')'")?;
            // Parentheses group only; the inner expression keeps its span,
            // matching CPython's locations for parenthesized expressions.
            return Ok(inner);
        }
        _ => {
            return Err(p.error_here(format!("expected an expression, found {}", token.kind)));
        }
    };
    p.bump();
    Ok(Expr {
        kind,
        span: token.span,
    })
}

fn bin_op(left: Expr, op: BinOpKind, right: Expr) -> Expr {
    let span = left.span.to(right.span.end);
    Expr {
        kind: ExprKind::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        span,
    }
}
