use crate::node::{ErrorKind, Node, NodeType};
use crate::parser::rule::{consume_at_rule, consume_rule};
use crate::parser::{next_significant, Input};
use crate::SyntaxError;
use stilo_shared::char_stream::Location;

#[derive(PartialEq)]
enum BangState {
    Value,
    Bang,
    Important,
}

/// Parses exactly one declaration.
///
/// The declaration's value runs to the end of the input, so unlike the
/// other `parse_one_*` functions there is no extra-input case.
pub fn parse_one_declaration<'i>(input: impl Into<Input<'i>>) -> Node {
    log::trace!("parse_one_declaration");

    let values = input.into().into_values(false);
    let mut values = values.into_iter();

    let Some(first) = next_significant(&mut values) else {
        return Node::error(
            ErrorKind::Empty,
            ErrorKind::Empty.description(),
            Location::default(),
        );
    };

    consume_declaration(first, &mut values).unwrap_or_else(SyntaxError::into_node)
}

/// Parses the contents of a style block: declarations, at-rules, and
/// nested qualified rules, in source order.
///
/// Each `;`-separated chunk is tried as a declaration first and re-tried
/// as a nested qualified rule when that fails; a chunk that is neither
/// yields an inline `invalid` error and parsing resumes after the `;`.
/// In contexts that do not expect nested rules or at-rules, callers
/// should reject those nodes themselves.
pub fn parse_blocks_contents<'i>(
    input: impl Into<Input<'i>>,
    skip_comments: bool,
    skip_whitespace: bool,
) -> Vec<Node> {
    log::trace!("parse_blocks_contents");

    let values = input.into().into_values(skip_comments);
    let mut values = values.into_iter();
    let mut result = Vec::new();

    while let Some(node) = values.next() {
        if node.is_whitespace() {
            if !skip_whitespace {
                result.push(node);
            }
            continue;
        }
        if node.is_comment() {
            if !skip_comments {
                result.push(node);
            }
            continue;
        }
        if node.is_literal(";") {
            continue;
        }
        if node.is_at_keyword() {
            let Node {
                node_type,
                location,
            } = node;
            let NodeType::AtKeyword { value } = *node_type else {
                unreachable!("is_at_keyword was checked");
            };
            result.push(consume_at_rule(value, location, &mut values));
            continue;
        }

        result.push(consume_block_content(node, &mut values));
    }

    result
}

/// Deprecated name for [`parse_blocks_contents`], kept for compatibility.
#[deprecated(since = "0.1.0", note = "superseded by parse_blocks_contents")]
pub fn parse_declaration_list<'i>(
    input: impl Into<Input<'i>>,
    skip_comments: bool,
    skip_whitespace: bool,
) -> Vec<Node> {
    parse_blocks_contents(input, skip_comments, skip_whitespace)
}

/// Consumes one declaration or nested qualified rule inside a block.
fn consume_block_content(first: Node, values: &mut impl Iterator<Item = Node>) -> Node {
    // Collect the chunk for this entry: up to an exclusive top-level `;`
    // or up to (and including) a `{}` block.
    let mut chunk = Vec::new();
    if !first.is_curly_block() {
        for node in values.by_ref() {
            if node.is_literal(";") {
                break;
            }
            let ends_chunk = node.is_curly_block();
            chunk.push(node);
            if ends_chunk {
                break;
            }
        }
    }

    match consume_declaration(first.clone(), &mut chunk.clone().into_iter()) {
        Ok(declaration) => declaration,
        Err(_) => consume_rule(first, &mut chunk.into_iter())
            .unwrap_or_else(SyntaxError::into_node),
    }
}

/// Consumes a declaration: `<ident> <whitespace>* ':' <value>`, with an
/// optional trailing `!important` marker that is stripped from the value.
fn consume_declaration(
    first: Node,
    values: &mut impl Iterator<Item = Node>,
) -> Result<Node, SyntaxError> {
    let location = first.location.clone();

    let name = match &*first.node_type {
        NodeType::Ident { value } => value.clone(),
        _ => {
            return Err(SyntaxError::new(
                ErrorKind::Invalid,
                "expected <ident> for a declaration name",
                first.location,
            ));
        }
    };

    match next_significant(values) {
        None => {
            return Err(SyntaxError::new(
                ErrorKind::Invalid,
                "expected ':' after the declaration name, got EOF",
                location,
            ));
        }
        Some(node) if !node.is_literal(":") => {
            return Err(SyntaxError::new(
                ErrorKind::Invalid,
                "expected ':' after the declaration name",
                node.location,
            ));
        }
        Some(_) => {}
    }

    // Track a trailing `! important` marker; whitespace and comments may
    // appear around both tokens.
    let mut value: Vec<Node> = Vec::new();
    let mut state = BangState::Value;
    let mut bang_position = 0;

    for node in values.by_ref() {
        if state == BangState::Value && node.is_literal("!") {
            state = BangState::Bang;
            bang_position = value.len();
        } else if state == BangState::Bang
            && matches!(&*node.node_type, NodeType::Ident { value } if value.eq_ignore_ascii_case("important"))
        {
            state = BangState::Important;
        } else if node.is_significant() {
            state = BangState::Value;
        }
        value.push(node);
    }

    let important = state == BangState::Important;
    if important {
        value.truncate(bang_position);
    }

    if !value.iter().any(Node::is_significant) {
        return Err(SyntaxError::new(
            ErrorKind::Invalid,
            "expected a value for the declaration",
            location,
        ));
    }

    // Outside custom properties, a top-level {} block must be the whole
    // value; `a:hover span {}` is a nested rule, not a declaration.
    if !name.starts_with("--")
        && value.iter().any(Node::is_curly_block)
        && value.iter().filter(|node| node.is_significant()).count() > 1
    {
        return Err(SyntaxError::new(
            ErrorKind::Invalid,
            "a {} block must be the only value of the declaration",
            location,
        ));
    }

    Ok(Node::new(
        NodeType::Declaration {
            name,
            value,
            important,
        },
        location,
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    fn ident(value: &str) -> NodeType {
        NodeType::Ident {
            value: value.to_string(),
        }
    }

    fn ws(value: &str) -> NodeType {
        NodeType::Whitespace {
            value: value.to_string(),
        }
    }

    #[test]
    fn important_declaration() {
        let declaration = parse_one_declaration("color: red !important");

        let (name, value, important) = declaration.as_declaration();
        assert_eq!(name, "color");
        assert!(important);

        let value_types: Vec<&NodeType> = value.iter().map(|n| &*n.node_type).collect();
        assert_eq!(value_types, vec![&ws(" "), &ident("red"), &ws(" ")]);
    }

    #[test]
    fn important_is_case_insensitive_and_spaced() {
        for css in [
            "color: red !IMPORTANT",
            "color: red ! important",
            "color: red !/*x*/important",
            "color: red !important  ",
            "color: red !important /*y*/",
        ] {
            let declaration = parse_one_declaration(css);
            let (_, _, important) = declaration.as_declaration();
            assert!(important, "parsing {css:?}");
        }
    }

    #[test]
    fn bang_in_the_middle_is_not_important() {
        let declaration = parse_one_declaration("content: \"!\" important");
        let (_, value, important) = declaration.as_declaration();
        assert!(!important);
        assert!(value.iter().any(Node::is_significant));

        let declaration = parse_one_declaration("color: red ! important blue");
        let (_, _, important) = declaration.as_declaration();
        assert!(!important);
    }

    #[test]
    fn declaration_name_keeps_case() {
        let declaration = parse_one_declaration("COLOR: red");
        let (name, _, _) = declaration.as_declaration();
        assert_eq!(name, "COLOR");
    }

    #[test]
    fn invalid_declarations() {
        for css in ["", "  ", "42: x", "color red", "color:", "color: !important"] {
            let node = parse_one_declaration(css);
            assert!(node.is_error(), "parsing {css:?}");
        }
    }

    #[test]
    fn blocks_contents_with_nesting() {
        let rules = crate::parser::stylesheet::parse_stylesheet(
            "a { color: red; & b { color: blue } }",
            false,
            false,
        );
        let (_, content) = rules[0].as_qualified_rule();

        let items = parse_blocks_contents(content.clone(), false, true);

        assert_eq!(items.len(), 2);
        assert!(items[0].is_declaration());
        let (name, _, _) = items[0].as_declaration();
        assert_eq!(name, "color");

        assert!(items[1].is_qualified_rule());
        let (prelude, nested) = items[1].as_qualified_rule();
        assert!(prelude[0].is_literal("&"));
        assert!(nested.iter().any(Node::is_significant));
    }

    #[test]
    fn blocks_contents_with_at_rule() {
        let items = parse_blocks_contents(
            "color: red; @media screen { a{} } margin: 0",
            false,
            true,
        );

        assert_eq!(items.len(), 3);
        assert!(items[0].is_declaration());
        assert!(items[1].is_at_rule());
        assert!(items[2].is_declaration());
    }

    #[test]
    fn invalid_declaration_recovers_at_semicolon() {
        let items = parse_blocks_contents("color red; margin: 0", false, true);

        assert_eq!(items.len(), 2);
        assert!(matches!(
            &*items[0].node_type,
            NodeType::Error {
                kind: ErrorKind::Invalid,
                ..
            }
        ));
        assert!(items[1].is_declaration());
    }

    #[test]
    fn pseudo_class_selectors_are_not_declarations() {
        // `a:hover span {}` would parse as a declaration named `a` if a
        // {} block were allowed next to other value content
        let items = parse_blocks_contents("a:hover span { color: blue }", false, true);

        assert_eq!(items.len(), 1);
        assert!(items[0].is_qualified_rule());
        let (prelude, _) = items[0].as_qualified_rule();
        assert!(prelude[0].is_ident());
    }

    #[test]
    fn custom_property_with_block_value() {
        let items = parse_blocks_contents("--layout: { a: b }; color: red", false, true);

        assert_eq!(items.len(), 2);
        assert!(items[0].is_declaration());
        let (name, value, _) = items[0].as_declaration();
        assert_eq!(name, "--layout");
        assert!(value.iter().any(Node::is_curly_block));
        assert!(items[1].is_declaration());
    }

    #[test]
    fn deprecated_alias() {
        #[allow(deprecated)]
        let items = parse_declaration_list("color: red", false, true);
        assert_eq!(items.len(), 1);
        assert!(items[0].is_declaration());
    }

    #[test]
    fn semicolons_alone_are_dropped() {
        let items = parse_blocks_contents(";; color: red ;;", false, true);
        assert_eq!(items.len(), 1);
        assert!(items[0].is_declaration());
    }
}
