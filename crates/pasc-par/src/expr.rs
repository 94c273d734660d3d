//! Expression sub-grammar: `expression` / `simple_expression` / `term` /
//! `factor`, plus variable accessors and constants.
//!
//! Precedence climbs in four layers, tightest last: `factor` binds
//! tightest, `expression` loosest. Every layer either wraps the
//! next-tighter layer in a `Grouping` (no operator applied at this level)
//! or anchors a `Binary` at the operator token found. `Node::grouping`
//! collapses nested groupings as it goes, so `Grouping(Grouping(x))`
//! never survives construction.

use crate::ast::Node;
use crate::error::ParseResult;
use crate::spine::spine;
use crate::Parser;
use pasc_lex::TokenKind;

fn is_relational(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Greater
            | TokenKind::GreaterEq
            | TokenKind::Less
            | TokenKind::LessEq
            | TokenKind::Equal
            | TokenKind::Neq
            | TokenKind::In
    )
}

fn is_additive(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Plus | TokenKind::Minus | TokenKind::Or)
}

fn is_multiplicative(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Asterisk | TokenKind::Slash | TokenKind::Div | TokenKind::Mod | TokenKind::And
    )
}

/// `simple_expression [relop simple_expression]`.
pub fn parse_expression(p: &mut Parser) -> ParseResult<Node> {
    let lhs = parse_simple_expression(p)?;
    if is_relational(p.peek().kind) {
        let op = p.take();
        let rhs = parse_simple_expression(p)?;
        Ok(Node::binary(Some(op), lhs.some(), rhs.some()))
    } else {
        Ok(Node::grouping(lhs))
    }
}

/// `[+|-] term [(+|-|or) simple_expression]`, right-associative.
///
/// A leading sign wraps the *entire* remaining simple expression in a
/// `Unary`, not just the first `term`: `-4 + 2 or 3` parses as
/// `Unary(MINUS, Binary(PLUS, 4, Binary(OR, 2, 3)))`, never
/// `Binary(PLUS, Unary(MINUS, 4), Binary(OR, 2, 3))`. Two consecutive
/// sign operators (`--x`, `+-x`), or a sign directly following an
/// additive operator (`2 + -3`), are both parse errors.
pub fn parse_simple_expression(p: &mut Parser) -> ParseResult<Node> {
    if matches!(p.peek().kind, TokenKind::Plus | TokenKind::Minus) {
        let sign = p.take();
        if matches!(p.peek().kind, TokenKind::Plus | TokenKind::Minus) {
            return Err(p.error("two consecutive unary sign operators"));
        }
        let rest = parse_simple_expression_unsigned(p)?;
        return Ok(Node::unary(Some(sign), rest.some()));
    }
    parse_simple_expression_unsigned(p)
}

/// The `term [(+|-|or) simple_expression]` tail, with no leading sign of
/// its own. Used both as `parse_simple_expression`'s entry once a
/// leading sign (if any) has been consumed, and as the right-hand side
/// of an additive operator, where a further leading sign is rejected
/// rather than parsed - a sign may only ever open a `simple_expression`,
/// never follow one of its own operators.
fn parse_simple_expression_unsigned(p: &mut Parser) -> ParseResult<Node> {
    let term = parse_term(p)?;
    if is_additive(p.peek().kind) {
        let op = p.take();
        if matches!(p.peek().kind, TokenKind::Plus | TokenKind::Minus) {
            return Err(p.error("a unary sign cannot follow an additive operator"));
        }
        let rhs = parse_simple_expression_unsigned(p)?;
        Ok(Node::binary(Some(op), term.some(), rhs.some()))
    } else {
        Ok(Node::grouping(term))
    }
}

/// `factor [(*|/|div|mod|and) term]`, right-associative.
pub fn parse_term(p: &mut Parser) -> ParseResult<Node> {
    let factor = parse_factor(p)?;
    if is_multiplicative(p.peek().kind) {
        let op = p.take();
        let rhs = parse_term(p)?;
        Ok(Node::binary(Some(op), factor.some(), rhs.some()))
    } else {
        Ok(Node::grouping(factor))
    }
}

/// Dispatches on the first token: variable accessors, function calls,
/// unsigned constants, `not factor`, parenthesized sub-expressions and
/// set constructors.
pub fn parse_factor(p: &mut Parser) -> ParseResult<Node> {
    match p.peek().kind {
        TokenKind::Identifier => {
            let lookahead = p.peek_far(1)?.kind;
            match lookahead {
                TokenKind::LBracket | TokenKind::Dot | TokenKind::Caret => parse_variable(p),
                TokenKind::LParen => parse_function_call(p),
                _ => parse_unsigned_constant(p),
            }
        }
        TokenKind::Digit | TokenKind::Nil | TokenKind::String => parse_unsigned_constant(p),
        TokenKind::Not => {
            let tok = p.take();
            let operand = parse_factor(p)?;
            Ok(Node::unary(Some(tok), operand.some()))
        }
        TokenKind::LParen => {
            p.take();
            let inner = parse_expression(p)?;
            p.expect(TokenKind::RParen)?;
            Ok(inner)
        }
        TokenKind::LBracket => parse_set_constructor(p),
        _ => Err(p.error(format!("unexpected token {} in factor", p.peek().describe()))),
    }
}

/// `ident (expr {, expr})` -> `Unary(IDENT, arglist)`, where `arglist` is
/// the `(`-rooted cons spine terminated by `Literal(RPAREN)`.
fn parse_function_call(p: &mut Parser) -> ParseResult<Node> {
    let ident = p.expect(TokenKind::Identifier)?;
    let open = p.expect(TokenKind::LParen)?;
    let args = spine(p, open, TokenKind::Comma, TokenKind::RParen, &mut parse_expression)?;
    Ok(Node::unary(Some(ident), args.some()))
}

/// `[ expr {, expr | expr .. expr} ]`.
///
/// A range member is `Binary(DOTDOT, from, to)`, sitting in the left slot
/// of its cons cell just like any other item.
fn parse_set_constructor(p: &mut Parser) -> ParseResult<Node> {
    let open = p.expect(TokenKind::LBracket)?;
    spine(p, open, TokenKind::Comma, TokenKind::RBracket, &mut parse_set_member)
}

fn parse_set_member(p: &mut Parser) -> ParseResult<Node> {
    let from = parse_expression(p)?;
    if p.check(TokenKind::DotDot) {
        let dotdot = p.take();
        let to = parse_expression(p)?;
        Ok(Node::binary(Some(dotdot), from.some(), to.some()))
    } else {
        Ok(from)
    }
}

/// An `IDENTIFIER` optionally followed by any number of `^`/`.ident`/`[expr,…]`
/// suffixes. With no suffix the result is a bare `Literal(IDENT)`.
pub fn parse_variable(p: &mut Parser) -> ParseResult<Node> {
    let ident = p.expect(TokenKind::Identifier)?;
    if !starts_suffix(p.peek().kind) {
        return Ok(Node::literal(ident));
    }
    let chain = parse_suffix_chain(p)?;
    Ok(Node::unary(Some(ident), chain.some()))
}

fn starts_suffix(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Caret | TokenKind::Dot | TokenKind::LBracket)
}

/// Right-leaning `Binary(op, payload, nextOrNull)` chain of access
/// suffixes. `^` carries no payload (the left slot is `None`).
fn parse_suffix_chain(p: &mut Parser) -> ParseResult<Node> {
    match p.peek().kind {
        TokenKind::Caret => {
            let tok = p.take();
            let next = parse_optional_suffix_tail(p)?;
            Ok(Node::binary(Some(tok), None, next))
        }
        TokenKind::Dot => {
            let tok = p.take();
            let field = p.expect(TokenKind::Identifier)?;
            let next = parse_optional_suffix_tail(p)?;
            Ok(Node::binary(Some(tok), Node::literal(field).some(), next))
        }
        TokenKind::LBracket => {
            let tok = p.take();
            let indices = spine(p, tok.clone(), TokenKind::Comma, TokenKind::RBracket, &mut parse_expression)?;
            let next = parse_optional_suffix_tail(p)?;
            Ok(Node::binary(Some(tok), indices.some(), next))
        }
        _ => unreachable!("parse_suffix_chain called without a suffix starter"),
    }
}

fn parse_optional_suffix_tail(p: &mut Parser) -> ParseResult<crate::ast::Link> {
    if starts_suffix(p.peek().kind) {
        Ok(parse_suffix_chain(p)?.some())
    } else {
        Ok(None)
    }
}

/// `STRING | NIL | DIGIT | IDENTIFIER`, wrapped as a bare `Literal`.
pub fn parse_unsigned_constant(p: &mut Parser) -> ParseResult<Node> {
    match p.peek().kind {
        TokenKind::String | TokenKind::Nil | TokenKind::Digit | TokenKind::Identifier => {
            Ok(Node::literal(p.take()))
        }
        _ => Err(p.error(format!(
            "expected a constant, found {}",
            p.peek().describe()
        ))),
    }
}

/// `[+|-] unsigned_constant`. With a sign, the result is
/// `Unary(sign, Literal)`; without one it is the bare unsigned constant.
pub fn parse_constant(p: &mut Parser) -> ParseResult<Node> {
    if matches!(p.peek().kind, TokenKind::Plus | TokenKind::Minus) {
        let sign = p.take();
        let value = parse_unsigned_constant(p)?;
        Ok(Node::unary(Some(sign), value.some()))
    } else {
        parse_unsigned_constant(p)
    }
}

/// A `DIGIT` whose meta is pure ASCII digits - no `.` or `e`.
pub fn parse_unsigned_integer(p: &mut Parser) -> ParseResult<Node> {
    if p.peek().kind == TokenKind::Digit {
        let is_plain = p
            .peek()
            .meta
            .as_deref()
            .is_some_and(|m| !m.is_empty() && m.bytes().all(|b| b.is_ascii_digit()));
        if is_plain {
            return Ok(Node::literal(p.take()));
        }
    }
    Err(p.error(format!(
        "expected an unsigned integer, found {}",
        p.peek().describe()
    )))
}

/// Entry point listed in the spec alongside `unsigned_integer`: any
/// unsigned numeric literal (integer or real), i.e. a bare `DIGIT` token.
pub fn parse_unsigned_number(p: &mut Parser) -> ParseResult<Node> {
    if p.peek().kind == TokenKind::Digit {
        Ok(Node::literal(p.take()))
    } else {
        Err(p.error(format!(
            "expected a number, found {}",
            p.peek().describe()
        )))
    }
}

impl Parser {
    pub fn parse_expression(&mut self) -> ParseResult<Node> {
        parse_expression(self)
    }

    pub fn parse_simple_expression(&mut self) -> ParseResult<Node> {
        parse_simple_expression(self)
    }

    pub fn parse_term(&mut self) -> ParseResult<Node> {
        parse_term(self)
    }

    pub fn parse_factor(&mut self) -> ParseResult<Node> {
        parse_factor(self)
    }

    pub fn parse_variable(&mut self) -> ParseResult<Node> {
        parse_variable(self)
    }

    pub fn parse_constant(&mut self) -> ParseResult<Node> {
        parse_constant(self)
    }

    pub fn parse_unsigned_constant(&mut self) -> ParseResult<Node> {
        parse_unsigned_constant(self)
    }

    pub fn parse_unsigned_integer(&mut self) -> ParseResult<Node> {
        parse_unsigned_integer(self)
    }

    pub fn parse_unsigned_number(&mut self) -> ParseResult<Node> {
        parse_unsigned_number(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasc_lex::TokenKind;

    fn parse_expr(src: &str) -> Node {
        let mut p = Parser::from_source(src.as_bytes());
        parse_expression(&mut p).unwrap()
    }

    #[test]
    fn unsigned_number() {
        let node = {
            let mut p = Parser::from_source(b"42");
            parse_unsigned_number(&mut p).unwrap()
        };
        assert_eq!(node, Node::literal(pasc_lex::Token::new(TokenKind::Digit, Some("42".into()), 1, 1)));
    }

    #[test]
    fn signed_constant() {
        let mut p = Parser::from_source(b"-7");
        let node = parse_constant(&mut p).unwrap();
        match node {
            Node::Unary(Some(tok), Some(child)) => {
                assert_eq!(tok.kind, TokenKind::Minus);
                assert_eq!(*child, Node::literal(pasc_lex::Token::new(TokenKind::Digit, Some("7".into()), 1, 2)));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn arithmetic_precedence() {
        // `expression` wraps its whole `simple_expression` result in a
        // top-level Grouping when no relational operator follows.
        let node = parse_expr("1 + 2 * 3");
        let Node::Grouping(top) = node else {
            panic!("expected top-level grouping, got {node:?}");
        };
        match *top {
            Node::Binary(Some(op), Some(lhs), Some(rhs)) => {
                assert_eq!(op.kind, TokenKind::Plus);
                assert!(matches!(*lhs, Node::Grouping(_)));
                match *rhs {
                    Node::Grouping(inner) => assert!(matches!(*inner, Node::Binary(..))),
                    other => panic!("expected grouping, got {other:?}"),
                }
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn double_unary_sign_is_an_error() {
        let mut p = Parser::from_source(b"- -1");
        assert!(parse_simple_expression(&mut p).is_err());
    }

    #[test]
    fn leading_sign_wraps_the_whole_simple_expression() {
        // `-4 + 2` -> `Unary(MINUS, Binary(PLUS, 4, 2))`, not
        // `Binary(PLUS, Unary(MINUS, 4), 2)`.
        let mut p = Parser::from_source(b"-4 + 2");
        let node = parse_simple_expression(&mut p).unwrap();
        match node {
            Node::Unary(Some(sign), Some(rest)) => {
                assert_eq!(sign.kind, TokenKind::Minus);
                match *rest {
                    Node::Binary(Some(op), Some(lhs), Some(rhs)) => {
                        assert_eq!(op.kind, TokenKind::Plus);
                        assert!(matches!(*lhs, Node::Grouping(ref inner)
                            if matches!(**inner, Node::Literal(ref t) if t.meta.as_deref() == Some("4"))));
                        assert!(matches!(*rhs, Node::Grouping(ref inner)
                            if matches!(**inner, Node::Literal(ref t) if t.meta.as_deref() == Some("2"))));
                    }
                    other => panic!("unexpected shape: {other:?}"),
                }
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn sign_directly_after_additive_operator_is_an_error() {
        let mut p = Parser::from_source(b"2 + -3");
        assert!(parse_simple_expression(&mut p).is_err());
    }

    #[test]
    fn empty_function_call_arglist_is_literal_rparen() {
        let mut p = Parser::from_source(b"f()");
        let node = parse_factor(&mut p).unwrap();
        match node {
            Node::Unary(Some(ident), Some(args)) => {
                assert_eq!(ident.kind, TokenKind::Identifier);
                assert!(matches!(*args, Node::Literal(ref t) if t.kind == TokenKind::RParen));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn variable_with_index_and_field_suffixes() {
        let mut p = Parser::from_source(b"a[1].b");
        let node = parse_variable(&mut p).unwrap();
        assert!(matches!(node, Node::Unary(Some(_), Some(_))));
    }

    #[test]
    fn set_constructor_with_range() {
        let mut p = Parser::from_source(b"[1..3, 5]");
        let node = parse_set_constructor(&mut p).unwrap();
        match node {
            Node::Binary(Some(open), Some(first), _) => {
                assert_eq!(open.kind, TokenKind::LBracket);
                assert!(matches!(*first, Node::Binary(Some(ref t), ..) if t.kind == TokenKind::DotDot));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }
}
