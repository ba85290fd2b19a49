use crate::node::{ErrorKind, Node, NodeType};
use crate::parser::{next_significant, Input};
use crate::SyntaxError;
use stilo_shared::char_stream::Location;

/// Parses exactly one qualified rule or at-rule.
///
/// Returns an `empty` error for blank input and an `extra-input` error
/// when significant content follows the rule.
pub fn parse_one_rule<'i>(input: impl Into<Input<'i>>) -> Node {
    log::trace!("parse_one_rule");

    let values = input.into().into_values(false);
    let mut values = values.into_iter();

    let Some(first) = next_significant(&mut values) else {
        return Node::error(
            ErrorKind::Empty,
            ErrorKind::Empty.description(),
            Location::default(),
        );
    };

    let rule = match consume_rule(first, &mut values) {
        Ok(rule) => rule,
        Err(error) => return error.into_node(),
    };

    if let Some(extra) = next_significant(&mut values) {
        return Node::error(
            ErrorKind::ExtraInput,
            "expected a single rule, got more input after the first rule",
            extra.location,
        );
    }

    rule
}

/// Consumes one qualified rule or at-rule starting at `first`.
///
/// Takes just enough of the stream for this rule: the prelude runs up to
/// a top-level `{}` block (qualified rule) or, for at-rules, up to a `;`
/// or a `{}` block.
pub(crate) fn consume_rule(
    first: Node,
    values: &mut impl Iterator<Item = Node>,
) -> Result<Node, SyntaxError> {
    let Node {
        node_type,
        location,
    } = first;

    match *node_type {
        NodeType::AtKeyword { value } => Ok(consume_at_rule(value, location, values)),
        NodeType::CurlyBracketsBlock { content } => Ok(Node::new(
            NodeType::QualifiedRule {
                prelude: Vec::new(),
                content,
            },
            location,
        )),
        other => {
            let mut prelude = vec![Node::new(other, location.clone())];

            for node in values.by_ref() {
                if node.is_curly_block() {
                    return Ok(Node::new(
                        NodeType::QualifiedRule {
                            prelude,
                            content: node.into_curly_content(),
                        },
                        location,
                    ));
                }
                prelude.push(node);
            }

            let last_location = prelude
                .last()
                .map(|node| node.location.clone())
                .unwrap_or(location);
            Err(SyntaxError::new(
                ErrorKind::Invalid,
                "EOF reached before {} block for a qualified rule",
                last_location,
            ))
        }
    }
}

/// Consumes an at-rule whose at-keyword has already been taken off the
/// stream. A `;` ends a statement at-rule (no content); a `{}` block ends
/// a block at-rule; so does EOF.
pub(crate) fn consume_at_rule(
    name: String,
    location: Location,
    values: &mut impl Iterator<Item = Node>,
) -> Node {
    let mut prelude = Vec::new();
    let mut content = None;

    for node in values.by_ref() {
        if node.is_curly_block() {
            content = Some(node.into_curly_content());
            break;
        }
        if node.is_literal(";") {
            break;
        }
        prelude.push(node);
    }

    Node::new(
        NodeType::AtRule {
            name,
            prelude,
            content,
        },
        location,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn one_qualified_rule() {
        let rule = parse_one_rule("p { color: red }");

        let (prelude, content) = rule.as_qualified_rule();
        assert_eq!(*prelude[0].node_type, NodeType::Ident {
            value: "p".to_string()
        });
        assert!(content.iter().any(Node::is_significant));
    }

    #[test]
    fn one_statement_at_rule() {
        let rule = parse_one_rule("@import \"theme.css\";");

        let NodeType::AtRule {
            name,
            prelude,
            content,
        } = &*rule.node_type
        else {
            panic!("expected an at-rule");
        };
        assert_eq!(name, "import");
        assert!(prelude.iter().any(Node::is_significant));
        assert!(content.is_none());
    }

    #[test]
    fn one_block_at_rule() {
        let rule = parse_one_rule("@media screen { p {} }");

        let NodeType::AtRule { name, content, .. } = &*rule.node_type else {
            panic!("expected an at-rule");
        };
        assert_eq!(name, "media");
        assert!(content.is_some());
    }

    #[test]
    fn unterminated_at_rule_at_eof() {
        // EOF ends the at-rule without an error
        let rule = parse_one_rule("@import \"theme.css\"");
        assert!(rule.is_at_rule());
    }

    #[test]
    fn empty_and_extra_input() {
        let rule = parse_one_rule("  /* nothing */ ");
        assert!(matches!(
            &*rule.node_type,
            NodeType::Error {
                kind: ErrorKind::Empty,
                ..
            }
        ));

        let rule = parse_one_rule("p {} div {}");
        assert!(matches!(
            &*rule.node_type,
            NodeType::Error {
                kind: ErrorKind::ExtraInput,
                ..
            }
        ));
    }

    #[test]
    fn missing_block_is_invalid() {
        let rule = parse_one_rule("p > span");
        assert!(matches!(
            &*rule.node_type,
            NodeType::Error {
                kind: ErrorKind::Invalid,
                ..
            }
        ));
    }
}
