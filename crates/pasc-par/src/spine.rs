//! Shared cons-spine builder.
//!
//! Record field lines, parameter groups, argument lists, set constructors
//! and case arms are all "one or more items, separated by a punctuator,
//! wrapped in an optional pair of delimiters" - the same right-leaning
//! `Binary` chain every time, just with different item parsers and
//! different anchor/separator/terminator tokens. This module builds that
//! chain once so each grammar module only supplies the differences.
//!
//! The root cell is anchored by the token that opened the list (e.g. the
//! `(` of an argument list); every following cell is anchored by the
//! separator that introduced it. The spine ends with `Literal(close)` -
//! an empty list collapses straight to that terminal literal.

use crate::ast::{Link, Node};
use crate::error::ParseResult;
use crate::Parser;
use pasc_lex::{Token, TokenKind};

/// Parses `item {sep item} close`, given that the opening delimiter has
/// already been consumed as `open`. Returns `Literal(close)` directly if
/// the list is empty.
pub(crate) fn spine(
    p: &mut Parser,
    open: Token,
    sep: TokenKind,
    close: TokenKind,
    parse_item: &mut dyn FnMut(&mut Parser) -> ParseResult<Node>,
) -> ParseResult<Node> {
    if p.check(close) {
        let close_tok = p.take();
        return Ok(Node::literal(close_tok));
    }
    let first = parse_item(p)?;
    spine_tail(p, open, first, sep, close, parse_item)
}

fn spine_tail(
    p: &mut Parser,
    anchor: Token,
    item: Node,
    sep: TokenKind,
    close: TokenKind,
    parse_item: &mut dyn FnMut(&mut Parser) -> ParseResult<Node>,
) -> ParseResult<Node> {
    if p.check(sep) {
        let sep_tok = p.take();
        let next_item = parse_item(p)?;
        let rest = spine_tail(p, sep_tok, next_item, sep, close, parse_item)?;
        Ok(Node::binary(Some(anchor), item.some(), rest.some()))
    } else {
        let close_tok = p.expect(close)?;
        Ok(Node::binary(
            Some(anchor),
            item.some(),
            Node::literal(close_tok).some(),
        ))
    }
}

/// A handful of lists in this grammar - a `field_list`'s fixed/variant
/// lines, a block's section sequencing - have no delimiter at all to
/// anchor on. This builds the same right-leaning `Binary` chain as
/// [`spine`] but with every cell anchored by `None` and a bare `None`
/// right child at the tail instead of a sentinel `Literal`.
///
/// Panics if `items` is empty; every caller only reaches this after
/// confirming it parsed at least one item.
pub(crate) fn null_spine(mut items: Vec<Node>) -> Node {
    let mut rest: Link = None;
    while let Some(item) = items.pop() {
        rest = Node::binary(None, item.some(), rest).some();
    }
    *rest.expect("null_spine requires at least one item")
}
