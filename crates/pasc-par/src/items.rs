//! Program and block structure: `program`, `block`, the `const`/`type`/`var`
//! declaration sections, and `function`/`procedure` definitions.
//!
//! A block's sections - `const`, `type`, `var`, each subroutine, and the
//! final compound statement - have no delimiter between them at all, so
//! they're chained with the same `None`-anchored spine `field_list` uses
//! (see [`crate::spine::null_spine`]) rather than the synthetic
//! placeholder token an older revision of this grammar used for that
//! purpose. Inside a section, though, each declaration line really is
//! separated by a semicolon, so those inner chains are anchored by the
//! real `;` tokens consumed between declarations, in the same keyword-
//! anchors-root, separator-anchors-the-rest shape as a compound
//! statement (see [`crate::stmt::parse_compound_statement`]).

use crate::ast::{Link, Node};
use crate::error::ParseResult;
use crate::spine::null_spine;
use crate::Parser;
use pasc_lex::{Token, TokenKind};

/// `program IDENT [( ident-list )] ; block .`
pub fn parse_program(p: &mut Parser) -> ParseResult<Node> {
    let program_tok = p.expect(TokenKind::Program)?;
    let ident = parse_program_ident(p)?;
    p.expect(TokenKind::Semicolon)?;
    let block = parse_block(p)?;
    p.expect(TokenKind::Dot)?;
    p.expect(TokenKind::Eof)?;
    Ok(Node::binary(Some(program_tok), ident.some(), block.some()))
}

/// A program name, optionally followed by its file parameters:
/// `Literal(ident)` alone, or `Unary(ident, param-list)`.
fn parse_program_ident(p: &mut Parser) -> ParseResult<Node> {
    let ident = p.expect(TokenKind::Identifier)?;
    if !p.check(TokenKind::LParen) {
        return Ok(Node::literal(ident));
    }
    p.expect(TokenKind::LParen)?;
    let params = crate::types::parse_identifier_list(p)?;
    p.expect(TokenKind::RParen)?;
    Ok(Node::unary(Some(ident), params.some()))
}

/// Zero or more declaration sections (`const`/`type`/`var`/subroutines, in
/// any order and multiplicity) followed by the trailing compound
/// statement, all chained as one `None`-anchored spine.
pub fn parse_block(p: &mut Parser) -> ParseResult<Node> {
    let mut sections = Vec::new();

    loop {
        match p.peek().kind {
            TokenKind::Const => sections.push(parse_const_section(p)?),
            TokenKind::Type => sections.push(parse_type_section(p)?),
            TokenKind::Var => sections.push(parse_var_section(p)?),
            TokenKind::Function | TokenKind::Procedure => sections.push(parse_subroutine(p)?),
            _ => break,
        }
    }

    let body = crate::stmt::parse_compound_statement(p)?;
    sections.push(body);
    Ok(null_spine(sections))
}

/// `const IDENT = constant ; { IDENT = constant ; }`.
fn parse_const_section(p: &mut Parser) -> ParseResult<Node> {
    let const_tok = p.expect(TokenKind::Const)?;
    const_decls_tail(p, const_tok)
}

fn const_decls_tail(p: &mut Parser, anchor: Token) -> ParseResult<Node> {
    let ident = p.expect(TokenKind::Identifier)?;
    let eq = p.expect(TokenKind::Equal)?;
    let value = crate::expr::parse_constant(p)?;
    let decl = Node::binary(Some(eq), Node::literal(ident).some(), value.some());
    let sep = p.expect(TokenKind::Semicolon)?;

    if p.check(TokenKind::Identifier) {
        let rest = const_decls_tail(p, sep)?;
        Ok(Node::binary(Some(anchor), decl.some(), rest.some()))
    } else {
        Ok(Node::binary(Some(anchor), decl.some(), None))
    }
}

/// `type IDENT = type ; { IDENT = type ; }`.
fn parse_type_section(p: &mut Parser) -> ParseResult<Node> {
    let type_tok = p.expect(TokenKind::Type)?;
    type_decls_tail(p, type_tok)
}

fn type_decls_tail(p: &mut Parser, anchor: Token) -> ParseResult<Node> {
    let ident = p.expect(TokenKind::Identifier)?;
    let eq = p.expect(TokenKind::Equal)?;
    let ty = crate::types::parse_type(p)?;
    let decl = Node::binary(Some(eq), Node::literal(ident).some(), ty.some());
    let sep = p.expect(TokenKind::Semicolon)?;

    if p.check(TokenKind::Identifier) {
        let rest = type_decls_tail(p, sep)?;
        Ok(Node::binary(Some(anchor), decl.some(), rest.some()))
    } else {
        Ok(Node::binary(Some(anchor), decl.some(), None))
    }
}

/// `var ident-list : type ; { ident-list : type ; }`.
fn parse_var_section(p: &mut Parser) -> ParseResult<Node> {
    let var_tok = p.expect(TokenKind::Var)?;
    var_decls_tail(p, var_tok)
}

fn var_decls_tail(p: &mut Parser, anchor: Token) -> ParseResult<Node> {
    let idents = crate::types::parse_identifier_list(p)?;
    let colon = p.expect(TokenKind::Colon)?;
    let ty = crate::types::parse_type(p)?;
    let decl = Node::binary(Some(colon), idents.some(), ty.some());
    let sep = p.expect(TokenKind::Semicolon)?;

    if p.check(TokenKind::Identifier) {
        let rest = var_decls_tail(p, sep)?;
        Ok(Node::binary(Some(anchor), decl.some(), rest.some()))
    } else {
        Ok(Node::binary(Some(anchor), decl.some(), None))
    }
}

/// `(function | procedure) IDENT parameter-list [: return-type] ; block ;`
/// -> `Binary(keyword, Binary(ident, params, returnTypeOrNull), block)`.
fn parse_subroutine(p: &mut Parser) -> ParseResult<Node> {
    let keyword = p.take();
    let ident = p.expect(TokenKind::Identifier)?;
    let params: Link = crate::types::parse_parameter_list(p)?;

    let prototype = if keyword.kind == TokenKind::Function {
        p.expect(TokenKind::Colon)?;
        let return_type = p.expect(TokenKind::Identifier)?;
        Node::binary(Some(ident), params, Node::literal(return_type).some())
    } else {
        Node::binary(Some(ident), params, None)
    };

    p.expect(TokenKind::Semicolon)?;
    let block = parse_block(p)?;
    p.expect(TokenKind::Semicolon)?;

    Ok(Node::binary(Some(keyword), prototype.some(), block.some()))
}

impl Parser {
    pub fn parse_program(&mut self) -> ParseResult<Node> {
        parse_program(self)
    }

    pub fn parse_block(&mut self) -> ParseResult<Node> {
        parse_block(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasc_lex::TokenKind;

    #[test]
    fn minimal_program() {
        let mut p = Parser::from_source(b"program Empty; begin end.");
        let node = parse_program(&mut p).unwrap();
        match node {
            Node::Binary(Some(program_tok), Some(ident), Some(block)) => {
                assert_eq!(program_tok.kind, TokenKind::Program);
                assert!(matches!(*ident, Node::Literal(ref t) if t.meta.as_deref() == Some("Empty")));
                assert!(matches!(*block, Node::Binary(Some(ref t), ..) if t.kind == TokenKind::Begin));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn program_with_file_parameters() {
        let mut p = Parser::from_source(b"program P(input, output); begin end.");
        let node = parse_program(&mut p).unwrap();
        match node {
            Node::Binary(_, Some(ident), _) => {
                assert!(matches!(*ident, Node::Unary(Some(ref t), Some(_)) if t.meta.as_deref() == Some("P")));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn block_with_const_type_var_sections() {
        let block = {
            let mut p = Parser::from_source(
                b"const n = 10; type t = integer; var x: integer; begin x := n end",
            );
            parse_block(&mut p).unwrap()
        };

        match block {
            Node::Binary(None, Some(const_section), Some(rest)) => {
                assert!(matches!(*const_section, Node::Binary(Some(ref t), ..) if t.kind == TokenKind::Const));
                match *rest {
                    Node::Binary(None, Some(type_section), Some(rest2)) => {
                        assert!(matches!(*type_section, Node::Binary(Some(ref t), ..) if t.kind == TokenKind::Type));
                        match *rest2 {
                            Node::Binary(None, Some(var_section), Some(rest3)) => {
                                assert!(matches!(*var_section, Node::Binary(Some(ref t), ..) if t.kind == TokenKind::Var));
                                match *rest3 {
                                    Node::Binary(None, Some(body), None) => {
                                        assert!(matches!(*body, Node::Binary(Some(ref t), ..) if t.kind == TokenKind::Begin));
                                    }
                                    other => panic!("unexpected shape: {other:?}"),
                                }
                            }
                            other => panic!("unexpected shape: {other:?}"),
                        }
                    }
                    other => panic!("unexpected shape: {other:?}"),
                }
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn block_with_no_sections_is_just_the_body() {
        // `null_spine` wraps every item including the last, mirroring
        // `field_list`'s own "placeholder token on each cons cell" shape
        // (spec.md §4.4, §8 Example 7): one section means one cons cell
        // holding (body, null), not the bare body.
        let mut p = Parser::from_source(b"begin end");
        let block = parse_block(&mut p).unwrap();
        match block {
            Node::Binary(None, Some(body), None) => {
                assert!(matches!(*body, Node::Binary(Some(ref t), ..) if t.kind == TokenKind::Begin));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn procedure_definition_has_no_return_type() {
        let mut p = Parser::from_source(b"procedure p(x: integer); begin end; begin end.");
        let block = parse_block(&mut p).unwrap();
        match block {
            Node::Binary(None, Some(proc_def), Some(_)) => match *proc_def {
                Node::Binary(Some(ref kw), Some(ref prototype), Some(_)) => {
                    assert_eq!(kw.kind, TokenKind::Procedure);
                    assert!(matches!(**prototype, Node::Binary(Some(_), Some(_), None)));
                }
                ref other => panic!("unexpected prototype shape: {other:?}"),
            },
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn function_definition_carries_return_type() {
        let mut p = Parser::from_source(b"function f: integer; begin end; begin end.");
        let block = parse_block(&mut p).unwrap();
        match block {
            Node::Binary(None, Some(fn_def), Some(_)) => match *fn_def {
                Node::Binary(Some(ref kw), Some(ref prototype), Some(_)) => {
                    assert_eq!(kw.kind, TokenKind::Function);
                    assert!(matches!(**prototype, Node::Binary(Some(_), None, Some(_))));
                }
                ref other => panic!("unexpected prototype shape: {other:?}"),
            },
            other => panic!("unexpected shape: {other:?}"),
        }
    }
}
