//! Statement sub-grammar: every statement form plus the compound
//! (`begin ... end`) body shared by both standalone `begin` statements
//! and a block's trailing body.
//!
//! `statement` is the one entry point that can legitimately produce
//! nothing at all - an empty statement before `;` or `end` - so unlike
//! every other grammar layer it returns [`Link`] rather than [`Node`].
//! Every caller that embeds a sub-statement (compound bodies, `if`'s
//! branches, loop bodies) works with that `Link` directly; only `repeat`
//! needs an actual `Node` for its `Grouping` wrapper, so an empty final
//! statement there is a parse error instead of a silently-null `Grouping`.

use crate::ast::{Link, Node};
use crate::error::ParseResult;
use crate::spine::spine;
use crate::Parser;
use pasc_lex::TokenKind;

/// A label (`IDENTIFIER` or `DIGIT`) followed by `:` in front of a
/// statement. Labels are recognized and discarded; nothing downstream
/// ever sees them.
fn follows_label(p: &Parser) -> bool {
    let starts_label = matches!(p.peek().kind, TokenKind::Identifier | TokenKind::Digit);
    starts_label
        && p.peek_far(1)
            .map(|t| t.kind == TokenKind::Colon)
            .unwrap_or(false)
}

/// Dispatches on the first token after silently consuming an optional
/// label. Returns `None` for the empty statement.
pub fn parse_statement(p: &mut Parser) -> ParseResult<Link> {
    if follows_label(p) {
        p.take();
        p.take();
    }

    match p.peek().kind {
        TokenKind::Identifier => parse_assignment_or_procedure(p),
        TokenKind::Begin => Ok(parse_compound_statement(p)?.some()),
        TokenKind::If => Ok(parse_if(p)?.some()),
        TokenKind::Repeat => Ok(parse_repeat(p)?.some()),
        TokenKind::While => Ok(parse_while(p)?.some()),
        TokenKind::For => Ok(parse_for(p)?.some()),
        TokenKind::Case => Ok(parse_case(p)?.some()),
        TokenKind::With => Ok(parse_with(p)?.some()),
        TokenKind::Goto => Ok(parse_goto(p)?.some()),
        TokenKind::Exit => Ok(parse_exit(p)?.some()),
        _ => Ok(None),
    }
}

fn parse_assignment_or_procedure(p: &mut Parser) -> ParseResult<Link> {
    match p.peek_far(1)?.kind {
        TokenKind::LBracket | TokenKind::Dot | TokenKind::Caret | TokenKind::Assign => {
            Ok(parse_assignment(p)?.some())
        }
        _ => parse_procedure(p),
    }
}

fn parse_assignment(p: &mut Parser) -> ParseResult<Node> {
    let var = crate::expr::parse_variable(p)?;
    let assign = p.expect(TokenKind::Assign)?;
    let expr = crate::expr::parse_expression(p)?;
    Ok(Node::binary(Some(assign), var.some(), expr.some()))
}

/// An identifier alone, or followed by a (possibly empty) argument list.
/// Empty parentheses collapse to the bare identifier; a non-empty list
/// is `Binary(LPAREN, Literal(ident), arglist)`.
fn parse_procedure(p: &mut Parser) -> ParseResult<Link> {
    let ident = p.expect(TokenKind::Identifier)?;
    if !p.check(TokenKind::LParen) {
        return Ok(Node::literal(ident).some());
    }
    let lparen = p.take();
    if p.eat(TokenKind::RParen) {
        return Ok(Node::literal(ident).some());
    }
    let args = spine(
        p,
        lparen.clone(),
        TokenKind::Comma,
        TokenKind::RParen,
        &mut crate::expr::parse_expression,
    )?;
    Ok(Node::binary(Some(lparen), Node::literal(ident).some(), args.some()).some())
}

/// `begin S ; S ; … ; S end`, anchored by `begin` on the first cons
/// cell and by each `;` on the following ones, ending at `Literal(END)`.
/// Reused as-is for a block's trailing compound statement.
pub fn parse_compound_statement(p: &mut Parser) -> ParseResult<Node> {
    let begin = p.expect(TokenKind::Begin)?;
    compound_tail(p, begin)
}

fn compound_tail(p: &mut Parser, anchor: pasc_lex::Token) -> ParseResult<Node> {
    let stmt = parse_statement(p)?;
    match p.peek().kind {
        TokenKind::Semicolon => {
            let sep = p.take();
            let rest = compound_tail(p, sep)?;
            Ok(Node::binary(Some(anchor), stmt, rest.some()))
        }
        TokenKind::End => {
            let end_tok = p.take();
            Ok(Node::binary(Some(anchor), stmt, Node::literal(end_tok).some()))
        }
        _ => Err(p.error(format!(
            "expected ';' or 'end' in compound statement, found {}",
            p.peek().describe()
        ))),
    }
}

/// `Binary(IF, cond, Binary(THEN, then-stmt, elseOrNull))`; `else` is
/// `Unary(ELSE, stmt)` sitting in the THEN node's right slot.
fn parse_if(p: &mut Parser) -> ParseResult<Node> {
    let if_tok = p.expect(TokenKind::If)?;
    let cond = crate::expr::parse_expression(p)?;
    let then_tok = p.expect(TokenKind::Then)?;
    let then_stmt = parse_statement(p)?;

    let then_branch = if p.check(TokenKind::Else) {
        let else_tok = p.take();
        let else_stmt = parse_statement(p)?;
        Node::binary(
            Some(then_tok),
            then_stmt,
            Node::unary(Some(else_tok), else_stmt).some(),
        )
    } else {
        Node::binary(Some(then_tok), then_stmt, None)
    };

    Ok(Node::binary(Some(if_tok), cond.some(), then_branch.some()))
}

/// `Binary(REPEAT, stmt-spine, Unary(UNTIL, cond))`.
fn parse_repeat(p: &mut Parser) -> ParseResult<Node> {
    let repeat_tok = p.expect(TokenKind::Repeat)?;
    let stmts = parse_repeat_stmts(p)?;
    let until_tok = p.expect(TokenKind::Until)?;
    let cond = crate::expr::parse_expression(p)?;
    Ok(Node::binary(
        Some(repeat_tok),
        stmts.some(),
        Node::unary(Some(until_tok), cond.some()).some(),
    ))
}

/// Statements separated by `;`, the final one wrapped in `Grouping`
/// rather than closed with a sentinel - `repeat`'s body has no closing
/// delimiter of its own (`until` belongs to the enclosing production).
/// An entirely empty body (`repeat until cond`) is rejected rather than
/// wrapping a null statement in `Grouping`, keeping that wrapper's
/// "child is never null" invariant exception-free.
fn parse_repeat_stmts(p: &mut Parser) -> ParseResult<Node> {
    let stmt = parse_statement(p)?;
    if p.check(TokenKind::Semicolon) {
        let sep = p.take();
        let rest = parse_repeat_stmts(p)?;
        Ok(Node::binary(Some(sep), stmt, rest.some()))
    } else {
        let stmt = stmt.ok_or_else(|| p.error("a repeat loop needs at least one statement"))?;
        Ok(Node::grouping(*stmt))
    }
}

/// `Binary(WHILE, cond, body)`.
fn parse_while(p: &mut Parser) -> ParseResult<Node> {
    let while_tok = p.expect(TokenKind::While)?;
    let cond = crate::expr::parse_expression(p)?;
    p.expect(TokenKind::Do)?;
    let body = parse_statement(p)?;
    Ok(Node::binary(Some(while_tok), cond.some(), body))
}

/// `Binary(FOR, Unary(IDENT, Binary(TO|DOWNTO, start, end)), body)`.
fn parse_for(p: &mut Parser) -> ParseResult<Node> {
    let for_tok = p.expect(TokenKind::For)?;
    let ident = p.expect(TokenKind::Identifier)?;
    p.expect(TokenKind::Assign)?;
    let start = crate::expr::parse_expression(p)?;

    let to_downto = p.take();
    if !matches!(to_downto.kind, TokenKind::To | TokenKind::Downto) {
        return Err(p.error(format!(
            "expected 'to' or 'downto' in for loop, found {}",
            to_downto.describe()
        )));
    }

    let end = crate::expr::parse_expression(p)?;
    p.expect(TokenKind::Do)?;
    let body = parse_statement(p)?;

    let range = Node::binary(Some(to_downto), start.some(), end.some());
    let header = Node::unary(Some(ident), range.some());
    Ok(Node::binary(Some(for_tok), header.some(), body))
}

/// `Binary(CASE, discriminant, case-list)`.
fn parse_case(p: &mut Parser) -> ParseResult<Node> {
    let case_tok = p.expect(TokenKind::Case)?;
    let discriminant = crate::expr::parse_expression(p)?;
    p.expect(TokenKind::Of)?;
    let cases = parse_case_list(p)?;
    Ok(Node::binary(Some(case_tok), discriminant.some(), cases.some()))
}

/// `constant-list : statement` items separated by `;`, ending at `end`.
/// Each cons cell is anchored by the token that *closes* the item - the
/// `;` before the next one, or the final `end` - rather than the token
/// that opens it, and a trailing `; end` is accepted without starting a
/// new (empty) item.
fn parse_case_list(p: &mut Parser) -> ParseResult<Node> {
    let labels = parse_case_constant_list(p)?;
    let colon = p.expect(TokenKind::Colon)?;
    let stmt = parse_statement(p)?;
    let item = Node::binary(Some(colon), labels.some(), stmt);

    let sep = p.take();
    match sep.kind {
        TokenKind::End => Ok(Node::binary(Some(sep), item.some(), None)),
        TokenKind::Semicolon => {
            if p.eat(TokenKind::End) {
                Ok(Node::binary(Some(sep), item.some(), None))
            } else {
                let rest = parse_case_list(p)?;
                Ok(Node::binary(Some(sep), item.some(), rest.some()))
            }
        }
        _ => Err(p.error(format!(
            "expected ';' or 'end' in case statement, found {}",
            sep.describe()
        ))),
    }
}

/// A single-constant label is the bare constant; a multi-constant label
/// is a `COMMA`-rooted cons spine whose final cell's right slot is the
/// bare last constant (no sentinel).
fn parse_case_constant_list(p: &mut Parser) -> ParseResult<Node> {
    let first = crate::expr::parse_constant(p)?;
    if p.check(TokenKind::Colon) {
        return Ok(first);
    }
    let comma = p.expect(TokenKind::Comma)?;
    let rest = parse_case_constant_list(p)?;
    Ok(Node::binary(Some(comma), first.some(), rest.some()))
}

/// `Binary(WITH, variable-list, body)`.
fn parse_with(p: &mut Parser) -> ParseResult<Node> {
    let with_tok = p.expect(TokenKind::With)?;
    let vars = parse_variable_list(p)?;
    p.expect(TokenKind::Do)?;
    let body = parse_statement(p)?;
    Ok(Node::binary(Some(with_tok), vars.some(), body))
}

/// `COMMA`-rooted cons spine of variables; single variable is bare, like
/// `parse_case_constant_list`.
fn parse_variable_list(p: &mut Parser) -> ParseResult<Node> {
    let first = crate::expr::parse_variable(p)?;
    if p.check(TokenKind::Do) {
        return Ok(first);
    }
    let comma = p.expect(TokenKind::Comma)?;
    let rest = parse_variable_list(p)?;
    Ok(Node::binary(Some(comma), first.some(), rest.some()))
}

/// `Unary(GOTO, Literal(unsigned-integer))`.
fn parse_goto(p: &mut Parser) -> ParseResult<Node> {
    let goto_tok = p.expect(TokenKind::Goto)?;
    let target = crate::expr::parse_unsigned_integer(p)?;
    Ok(Node::unary(Some(goto_tok), target.some()))
}

/// `exit ( IDENT | program )` -> `Unary(EXIT, Literal(..))`.
fn parse_exit(p: &mut Parser) -> ParseResult<Node> {
    let exit_tok = p.expect(TokenKind::Exit)?;
    p.expect(TokenKind::LParen)?;
    let param = if p.check(TokenKind::Program) {
        Node::literal(p.take())
    } else {
        Node::literal(p.expect(TokenKind::Identifier)?)
    };
    p.expect(TokenKind::RParen)?;
    Ok(Node::unary(Some(exit_tok), param.some()))
}

impl Parser {
    pub fn parse_statement(&mut self) -> ParseResult<Link> {
        parse_statement(self)
    }

    pub fn parse_compound_statement(&mut self) -> ParseResult<Node> {
        parse_compound_statement(self)
    }
}
