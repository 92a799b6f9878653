//! Statement grammar: simple statements, blocks, and compound statements.

use super::expressions::parse_expression;
use super::lexer::TokenKind;
use super::Parser;
use crate::ast::{Expr, ExprKind, Stmt, StmtKind};
use crate::OpflipResult;

pub(crate) fn parse_statement(p: &mut Parser) -> OpflipResult<Stmt> {
    match p.peek().kind {
        TokenKind::If => parse_if(p),
        TokenKind::While => parse_while(p),
        TokenKind::For => parse_for(p),
        TokenKind::Return => parse_return(p),
        TokenKind::Pass => parse_keyword_statement(p, StmtKind::Pass),
        TokenKind::Break => parse_keyword_statement(p, StmtKind::Break),
        TokenKind::Continue => parse_keyword_statement(p, StmtKind::Continue),
        TokenKind::Indent => Err(p.error_here("unexpected indent".to_string())),
        _ => parse_expr_statement(p),
    }
}

fn parse_keyword_statement(p: &mut Parser, kind: StmtKind) -> OpflipResult<Stmt> {
    let token = p.bump();
    end_of_statement(p)?;
    Ok(Stmt {
        kind,
        span: token.span,
    })
}

fn parse_return(p: &mut Parser) -> OpflipResult<Stmt> {
    let token = p.bump();
    let value = if p.peek().kind == TokenKind::Newline {
        None
    } else {
        Some(parse_expression(p)?)
    };
    let span = token.span.to(p.prev_end());
    end_of_statement(p)?;
    Ok(Stmt {
        kind: StmtKind::Return(value),
        span,
    })
}

fn parse_expr_statement(p: &mut Parser) -> OpflipResult<Stmt> {
    let expr = parse_expression(p)?;
    if p.peek().kind != TokenKind::Assign {
        end_of_statement(p)?;
        let span = expr.span.clone();
        return Ok(Stmt {
            kind: StmtKind::Expr(expr),
            span,
        });
    }
    p.bump();
    if !matches!(expr.kind, ExprKind::Name(_)) {
        return Err(p.error_at("cannot assign to this expression".to_string(), expr.span));
    }
    let value = parse_expression(p)?;
    end_of_statement(p)?;
    let span = expr.span.to(value.span.end);
    Ok(Stmt {
        kind: StmtKind::Assign {
            target: expr,
            value,
        },
        span,
    })
}

/// Parses an `if`/`elif` statement. `elif` chains nest: each `elif` becomes
/// a single-`If` `orelse` of the one before it, as in CPython's AST.
fn parse_if(p: &mut Parser) -> OpflipResult<Stmt> {
    let token = p.bump();
    let test = parse_expression(p)?;
    let body = parse_block(p)?;
    let orelse = match p.peek().kind {
        TokenKind::Elif => vec![parse_if(p)?],
        TokenKind::Else => {
            p.bump();
            parse_block(p)?
        }
        _ => Vec::new(),
    };
    let span = token.span.to(p.prev_end());
    Ok(Stmt {
        kind: StmtKind::If { test, body, orelse },
        span,
    })
}

fn parse_while(p: &mut Parser) -> OpflipResult<Stmt> {
    let token = p.bump();
    let test = parse_expression(p)?;
    let body = parse_block(p)?;
    let span = token.span.to(p.prev_end());
    Ok(Stmt {
        kind: StmtKind::While { test, body },
        span,
    })
}

fn parse_for(p: &mut Parser) -> OpflipResult<Stmt> {
    let token = p.bump();
    let target_token = p.peek().clone();
    let target = match target_token.kind {
        TokenKind::Name(name) => {
            p.bump();
            Expr {
                kind: ExprKind::Name(name),
                span: target_token.span,
            }
        }
        _ => {
            return Err(p.error_here(format!(
                "expected a loop variable name, found {}",
                target_token.kind
            )))
        }
    };
    p.expect(TokenKind::In, "'in'")?;
    let iter = parse_expression(p)?;
    let body = parse_block(p)?;
    let span = token.span.to(p.prev_end());
    Ok(Stmt {
        kind: StmtKind::For { target, iter, body },
        span,
    })
}

/// Parses `: NEWLINE INDENT statement+ DEDENT`.
fn parse_block(p: &mut Parser) -> OpflipResult<Vec<Stmt>> {
    p.expect(TokenKind::Colon, "':'")?;
    p.expect(TokenKind::Newline, "a newline after ':'")?;
    p.expect(TokenKind::Indent, "an indented block")?;
    let mut body = Vec::new();
    loop {
        match p.peek().kind {
            TokenKind::Dedent => {
                p.bump();
                break;
            }
            TokenKind::Newline => {
                p.bump();
            }
            TokenKind::Eof => {
                return Err(p.error_here("unexpected end of input inside a block".to_string()));
            }
            _ => body.push(parse_statement(p)?),
        }
    }
    Ok(body)
}

fn end_of_statement(p: &mut Parser) -> OpflipResult<()> {
    p.expect(TokenKind::Newline, "end of statement")?;
    Ok(())
}
