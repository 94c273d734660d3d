//! Type sub-grammar: `type`, `simple_type`, `field_list`, `parameter_list`
//! and `identifier_list`.
//!
//! `field_list` is the one spot where the cons-spine shape departs from
//! the delimiter-rooted pattern in [`crate::spine::spine`]: every cell -
//! fixed field lines, the variant header, each `case` branch - is
//! anchored by `None` instead of an open/separator token, and the spine
//! ends with a bare `None` right child rather than a terminal `Literal`.
//! See [`crate::spine::null_spine`].

use crate::ast::{Link, Node};
use crate::error::ParseResult;
use crate::spine::{null_spine, spine};
use crate::Parser;
use pasc_lex::TokenKind;

/// `[packed] (pointer | array | file | set | record | simple_type)`.
pub fn parse_type(p: &mut Parser) -> ParseResult<Node> {
    let packed = if p.check(TokenKind::Packed) {
        Some(p.take())
    } else {
        None
    };

    let inner = match p.peek().kind {
        TokenKind::Caret => {
            if packed.is_some() {
                return Err(p.error("packed cannot precede a pointer type"));
            }
            let caret = p.take();
            let ident = p.expect(TokenKind::Identifier)?;
            Node::unary(Some(caret), Node::literal(ident).some())
        }
        TokenKind::Array => {
            let array = p.take();
            let lbracket = p.expect(TokenKind::LBracket)?;
            let index_list = spine(
                p,
                lbracket,
                TokenKind::Comma,
                TokenKind::RBracket,
                &mut parse_simple_type,
            )?;
            p.expect(TokenKind::Of)?;
            let element = parse_type(p)?;
            Node::binary(Some(array), index_list.some(), element.some())
        }
        TokenKind::File => {
            let file = p.take();
            p.expect(TokenKind::Of)?;
            let element = parse_type(p)?;
            Node::unary(Some(file), element.some())
        }
        TokenKind::Set => {
            let set = p.take();
            p.expect(TokenKind::Of)?;
            let member = parse_simple_type(p)?;
            Node::unary(Some(set), member.some())
        }
        TokenKind::Record => {
            let record = p.take();
            let fields = parse_field_list(p)?;
            p.expect(TokenKind::End)?;
            Node::unary(Some(record), fields.some())
        }
        _ => {
            if packed.is_some() {
                return Err(p.error("packed cannot precede this type"));
            }
            parse_simple_type(p)?
        }
    };

    Ok(match packed {
        Some(packed) => Node::unary(Some(packed), inner.some()),
        None => inner,
    })
}

/// Enumerated type, subrange, parameterized-size type, or a lone
/// constant wrapped as a `Grouping`.
pub fn parse_simple_type(p: &mut Parser) -> ParseResult<Node> {
    if p.check(TokenKind::LParen) {
        let lparen = p.take();
        return spine(p, lparen, TokenKind::Comma, TokenKind::RParen, &mut |p| {
            let ident = p.expect(TokenKind::Identifier)?;
            Ok(Node::literal(ident))
        });
    }

    let first = crate::expr::parse_constant(p)?;
    if p.check(TokenKind::DotDot) {
        let dotdot = p.take();
        let high = crate::expr::parse_constant(p)?;
        Ok(Node::binary(Some(dotdot), first.some(), high.some()))
    } else if p.check(TokenKind::LBracket) {
        let lbracket = p.take();
        let size = crate::expr::parse_expression(p)?;
        p.expect(TokenKind::RBracket)?;
        Ok(Node::binary(Some(lbracket), first.some(), size.some()))
    } else {
        Ok(Node::grouping(first))
    }
}

/// Record fields: zero or more fixed field lines, then an optional
/// `case` (variant) part. Unlike every other list in this grammar, the
/// whole thing - fixed lines, variant header, each branch - is one flat
/// spine of `Binary(None, item, restOrNone)` cells; there is no
/// delimiter sentinel at the tail, just `None`.
pub fn parse_field_list(p: &mut Parser) -> ParseResult<Node> {
    let mut items = Vec::new();

    while p.check(TokenKind::Identifier) {
        let idents = parse_identifier_list(p)?;
        let colon = p.expect(TokenKind::Colon)?;
        let ty = parse_type(p)?;
        items.push(Node::binary(Some(colon), idents.some(), ty.some()));
        if !p.eat(TokenKind::Semicolon) {
            break;
        }
    }

    if p.eat(TokenKind::Case) {
        items.push(parse_variant_header(p)?);
        items.push(parse_field_list_branch(p)?);
        while p.eat(TokenKind::Semicolon) {
            items.push(parse_field_list_branch(p)?);
        }
    }

    if items.is_empty() {
        return Err(p.error("a record needs at least one field or a case section"));
    }

    Ok(null_spine(items))
}

/// `case tag-type of ...` -> `Unary(OF, Literal(tag-type))`, or
/// `case discriminant : tag-type of ...` -> `Binary(OF, Literal(discriminant),
/// Literal(tag-type))`.
fn parse_variant_header(p: &mut Parser) -> ParseResult<Node> {
    let first = p.expect(TokenKind::Identifier)?;
    if p.eat(TokenKind::Colon) {
        let tag_type = p.expect(TokenKind::Identifier)?;
        let of_tok = p.expect(TokenKind::Of)?;
        Ok(Node::binary(
            Some(of_tok),
            Node::literal(first).some(),
            Node::literal(tag_type).some(),
        ))
    } else {
        let of_tok = p.expect(TokenKind::Of)?;
        Ok(Node::unary(Some(of_tok), Node::literal(first).some()))
    }
}

/// One `constant, constant, … : ( field_list )` case arm.
fn parse_field_list_branch(p: &mut Parser) -> ParseResult<Node> {
    let constants = parse_field_constant_list(p)?;
    let colon = p.expect(TokenKind::Colon)?;
    p.expect(TokenKind::LParen)?;
    let fields = parse_field_list(p)?;
    p.expect(TokenKind::RParen)?;
    Ok(Node::binary(Some(colon), constants.some(), fields.some()))
}

/// The constant-list local to a `field_list` branch label. Null-anchored,
/// like the rest of `field_list` - distinct from the `COMMA`-rooted
/// constant-list used by a `case` *statement*'s labels (see `stmt.rs`).
fn parse_field_constant_list(p: &mut Parser) -> ParseResult<Node> {
    let mut items = Vec::new();
    loop {
        items.push(crate::expr::parse_constant(p)?);
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    Ok(null_spine(items))
}

/// `(` ident-group `{` `;` ident-group `}` `)`, or nothing at all. Empty
/// parentheses `()` are equivalent to no parameter list at all, so both
/// produce `None` - mirroring `stmt.rs`'s `parse_procedure` special-casing
/// an empty argument list the same way.
/// Each ident-group is `[var] ident, …, ident : IDENT` (a type name, not
/// a full type): with `var`, `Binary(TYPE_IDENT, Literal(VAR), ident-list)`;
/// without, `Unary(TYPE_IDENT, ident-list)`.
pub fn parse_parameter_list(p: &mut Parser) -> ParseResult<Link> {
    if !p.check(TokenKind::LParen) {
        return Ok(None);
    }
    let lparen = p.take();
    if p.eat(TokenKind::RParen) {
        return Ok(None);
    }
    let groups = spine(
        p,
        lparen,
        TokenKind::Semicolon,
        TokenKind::RParen,
        &mut parse_parameter_group,
    )?;
    Ok(groups.some())
}

fn parse_parameter_group(p: &mut Parser) -> ParseResult<Node> {
    let var = if p.check(TokenKind::Var) {
        Some(Node::literal(p.take()))
    } else {
        None
    };
    let idents = parse_identifier_list(p)?;
    p.expect(TokenKind::Colon)?;
    let type_ident = p.expect(TokenKind::Identifier)?;
    Ok(match var {
        Some(var) => Node::binary(Some(type_ident), var.some(), idents.some()),
        None => Node::unary(Some(type_ident), idents.some()),
    })
}

/// One or more `IDENTIFIER`s separated by `,`, encoded as a left-leaning
/// chain of `Unary(IDENT, nextOrNull)` in source order.
pub fn parse_identifier_list(p: &mut Parser) -> ParseResult<Node> {
    let ident = p.expect(TokenKind::Identifier)?;
    if p.eat(TokenKind::Comma) {
        let rest = parse_identifier_list(p)?;
        Ok(Node::unary(Some(ident), rest.some()))
    } else {
        Ok(Node::unary(Some(ident), None))
    }
}

impl Parser {
    pub fn parse_type(&mut self) -> ParseResult<Node> {
        parse_type(self)
    }

    pub fn parse_simple_type(&mut self) -> ParseResult<Node> {
        parse_simple_type(self)
    }

    pub fn parse_field_list(&mut self) -> ParseResult<Node> {
        parse_field_list(self)
    }

    pub fn parse_parameter_list(&mut self) -> ParseResult<Link> {
        parse_parameter_list(self)
    }

    pub fn parse_identifier_list(&mut self) -> ParseResult<Node> {
        parse_identifier_list(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasc_lex::TokenKind;

    fn parse<T>(src: &str, f: impl FnOnce(&mut Parser) -> ParseResult<T>) -> T {
        let mut p = Parser::from_source(src.as_bytes());
        f(&mut p).unwrap()
    }

    #[test]
    fn pointer_type_rejects_packed() {
        let mut p = Parser::from_source(b"packed ^integer");
        assert!(parse_type(&mut p).is_err());
    }

    #[test]
    fn array_type_has_index_list_and_element() {
        let node = parse("array[1..10] of integer", parse_type);
        match node {
            Node::Binary(Some(tok), Some(indices), Some(element)) => {
                assert_eq!(tok.kind, TokenKind::Array);
                assert!(matches!(*indices, Node::Binary(Some(ref t), ..) if t.kind == TokenKind::LBracket));
                assert!(matches!(*element, Node::Grouping(_)));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn packed_wraps_the_final_tree() {
        let node = parse("packed array[1..2] of integer", parse_type);
        assert!(matches!(node, Node::Unary(Some(ref t), Some(_)) if t.kind == TokenKind::Packed));
    }

    #[test]
    fn simple_type_enumerated_list() {
        let node = parse("(red, green, blue)", parse_simple_type);
        assert!(matches!(node, Node::Binary(Some(ref t), ..) if t.kind == TokenKind::LParen));
    }

    #[test]
    fn simple_type_lone_constant_is_grouped() {
        let node = parse("integer", parse_simple_type);
        assert!(matches!(node, Node::Grouping(_)));
    }

    #[test]
    fn field_list_single_fixed_line_has_no_trailing_sentinel() {
        // "record x, y: integer; end" per the spec's own worked example.
        let node = parse("x, y: integer", parse_field_list);
        match node {
            Node::Binary(None, Some(line), right) => {
                assert!(right.is_none());
                assert!(matches!(*line, Node::Binary(Some(ref t), ..) if t.kind == TokenKind::Colon));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn field_list_variant_header_with_discriminant() {
        let node = parse("case x: t of 1: (y: integer)", parse_field_list);
        match node {
            Node::Binary(None, Some(header_cell), Some(rest)) => {
                match *header_cell {
                    Node::Binary(Some(ref of_tok), Some(ref disc), Some(ref tag)) => {
                        assert_eq!(of_tok.kind, TokenKind::Of);
                        assert!(matches!(**disc, Node::Literal(ref t) if t.meta.as_deref() == Some("x")));
                        assert!(matches!(**tag, Node::Literal(ref t) if t.meta.as_deref() == Some("t")));
                    }
                    ref other => panic!("unexpected header shape: {other:?}"),
                }
                assert!(matches!(*rest, Node::Binary(None, Some(_), None)));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn field_list_variant_header_without_discriminant() {
        let node = parse("case t of 1: (y: integer)", parse_field_list);
        match node {
            Node::Binary(None, Some(header_cell), _) => {
                assert!(matches!(*header_cell, Node::Unary(Some(ref t), Some(_)) if t.kind == TokenKind::Of));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn empty_field_list_is_an_error() {
        let mut p = Parser::from_source(b"end");
        assert!(parse_field_list(&mut p).is_err());
    }

    #[test]
    fn parameter_list_empty_parens_is_no_params() {
        let link = parse("()", parse_parameter_list);
        assert!(link.is_none());
    }

    #[test]
    fn parameter_list_with_var_and_multiple_groups() {
        let link = parse("(var x: integer; y, z: real)", parse_parameter_list);
        let spine = link.expect("expected a parameter list");
        match *spine {
            Node::Binary(Some(open), Some(first), Some(_)) => {
                assert_eq!(open.kind, TokenKind::LParen);
                assert!(matches!(*first, Node::Binary(Some(ref t), Some(_), Some(_)) if t.kind == TokenKind::Identifier));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn identifier_list_is_left_leaning() {
        let node = parse("a, b, c", parse_identifier_list);
        match node {
            Node::Unary(Some(a), Some(rest)) => {
                assert_eq!(a.meta.as_deref(), Some("a"));
                match *rest {
                    Node::Unary(Some(b), Some(rest2)) => {
                        assert_eq!(b.meta.as_deref(), Some("b"));
                        assert!(matches!(*rest2, Node::Unary(Some(ref c), None) if c.meta.as_deref() == Some("c")));
                    }
                    other => panic!("unexpected shape: {other:?}"),
                }
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }
}
