//! AST node definitions.
//!
//! The entire grammar is encoded with one uniform, four-variant shape
//! rather than one Rust type per production: `Literal` is a leaf,
//! `Unary`/`Binary` anchor an operator (or cons-cell) token to one or two
//! children, and `Grouping` is a precedence-transparent wrapper. Position
//! overloads meaning throughout - the same `Binary` shape encodes both
//! `a + b` and a cons-spine cell in a parameter list - so downstream
//! passes read node shape, not node name, to know what they are looking
//! at. This keeps the dump format (and any consumer built against it)
//! stable across grammar changes.

use pasc_lex::Token;

/// A child slot: `None` marks either "no child" (e.g. a lone identifier
/// ending an `identifier_list` chain) or the end of a cons spine that
/// terminates without a sentinel literal (declaration blocks).
pub type Link = Option<Box<Node>>;

/// An AST node.
///
/// `Binary`/`Unary` carry an `Option<Token>` rather than a bare `Token`
/// because cons-spine cells (record field lines, for instance) use a
/// placeholder with no token at all - see the `field_list` grammar notes
/// in `types.rs`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A single token at a leaf.
    Literal(Token),
    /// An operator/wrapper with one operand.
    Unary(Option<Token>, Link),
    /// An operator with two operands, or a cons-list cell.
    Binary(Option<Token>, Link, Link),
    /// A precedence-transparent wrapper around exactly one child.
    Grouping(Box<Node>),
}

impl Node {
    pub fn literal(token: Token) -> Node {
        Node::Literal(token)
    }

    pub fn unary(token: Option<Token>, child: Link) -> Node {
        Node::Unary(token, child)
    }

    pub fn binary(token: Option<Token>, left: Link, right: Link) -> Node {
        Node::Binary(token, left, right)
    }

    /// Wraps `child` in a `Grouping`, collapsing `Grouping(Grouping(x))`
    /// to `Grouping(x)` so nested groupings never appear in the tree.
    pub fn grouping(child: Node) -> Node {
        match child {
            Node::Grouping(_) => child,
            other => Node::Grouping(Box::new(other)),
        }
    }

    /// Boxes `self` for use as a child slot.
    pub fn some(self) -> Link {
        Some(Box::new(self))
    }

    /// The node's anchor token, if it has one. `Grouping` has none.
    pub fn token(&self) -> Option<&Token> {
        match self {
            Node::Literal(tok) => Some(tok),
            Node::Unary(tok, _) | Node::Binary(tok, _, _) => tok.as_ref(),
            Node::Grouping(_) => None,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Node::Literal(_) => "Literal",
            Node::Unary(..) => "Unary",
            Node::Binary(..) => "Binary",
            Node::Grouping(_) => "Grouping",
        }
    }

    /// Depth-first preorder textual rendering, indented per level, showing
    /// each node's kind and anchor token (kind plus optional meta in
    /// parentheses). Intended as a debugging aid and as the reference
    /// format for structural golden tests - not part of the compiler's
    /// externally promised output.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push_str(self.kind_name());
        if let Some(tok) = self.token() {
            out.push(' ');
            out.push_str(&tok.describe());
        }
        out.push('\n');

        match self {
            Node::Literal(_) => {}
            Node::Unary(_, child) => dump_link(child, out, depth + 1),
            Node::Binary(_, left, right) => {
                dump_link(left, out, depth + 1);
                dump_link(right, out, depth + 1);
            }
            Node::Grouping(child) => child.dump_into(out, depth + 1),
        }
    }
}

fn dump_link(link: &Link, out: &mut String, depth: usize) {
    match link {
        Some(node) => node.dump_into(out, depth),
        None => {
            out.push_str(&"  ".repeat(depth));
            out.push_str("null\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasc_lex::TokenKind;

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, None, 1, 1)
    }

    #[test]
    fn grouping_collapses_nested_grouping() {
        let leaf = Node::literal(tok(TokenKind::Digit));
        let once = Node::grouping(leaf);
        let twice = Node::grouping(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn dump_renders_null_children() {
        let node = Node::unary(Some(tok(TokenKind::Goto)), None);
        let dump = node.dump();
        assert!(dump.contains("Unary"));
        assert!(dump.contains("null"));
    }
}
