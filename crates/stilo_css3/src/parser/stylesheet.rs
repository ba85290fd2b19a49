use crate::node::Node;
use crate::parser::rule::consume_rule;
use crate::parser::Input;
use stilo_shared::encoding::decode_stylesheet_bytes;

/// Parses a stylesheet: a list of qualified rules and at-rules.
///
/// Top-level `<!--` and `-->` tokens are ignored, a historical quirk for
/// stylesheets embedded in HTML. Whitespace and comments between rules are
/// kept in the returned list unless the corresponding flag drops them;
/// anything that fails to parse as a rule becomes an inline error node.
pub fn parse_stylesheet<'i>(
    input: impl Into<Input<'i>>,
    skip_comments: bool,
    skip_whitespace: bool,
) -> Vec<Node> {
    log::trace!("parse_stylesheet");

    consume_rule_list(
        input.into().into_values(skip_comments),
        skip_comments,
        skip_whitespace,
        true,
    )
}

/// Parses a rule list that is not the top level of a stylesheet, e.g. the
/// content of a `@media` block. Unlike [`parse_stylesheet`], `<!--` and
/// `-->` are not special here and will start a (typically invalid)
/// qualified rule.
pub fn parse_rule_list<'i>(
    input: impl Into<Input<'i>>,
    skip_comments: bool,
    skip_whitespace: bool,
) -> Vec<Node> {
    log::trace!("parse_rule_list");

    consume_rule_list(
        input.into().into_values(skip_comments),
        skip_comments,
        skip_whitespace,
        false,
    )
}

/// Decodes stylesheet bytes and parses the result.
///
/// The encoding is determined by the `css-syntax` fallback chain: BOM,
/// protocol encoding label, leading `@charset` rule, environment encoding
/// label, UTF-8. Decoding never fails; malformed sequences become U+FFFD.
pub fn parse_stylesheet_bytes(
    css_bytes: &[u8],
    protocol_encoding: Option<&str>,
    environment_encoding: Option<&str>,
    skip_comments: bool,
    skip_whitespace: bool,
) -> Vec<Node> {
    log::trace!("parse_stylesheet_bytes");

    let (css, _encoding) =
        decode_stylesheet_bytes(css_bytes, protocol_encoding, environment_encoding);

    parse_stylesheet(css.as_str(), skip_comments, skip_whitespace)
}

fn consume_rule_list(
    values: Vec<Node>,
    skip_comments: bool,
    skip_whitespace: bool,
    top_level: bool,
) -> Vec<Node> {
    let mut values = values.into_iter();
    let mut rules = Vec::new();

    while let Some(node) = values.next() {
        if node.is_whitespace() {
            if !skip_whitespace {
                rules.push(node);
            }
            continue;
        }
        if node.is_comment() {
            if !skip_comments {
                rules.push(node);
            }
            continue;
        }
        if top_level && (node.is_literal("<!--") || node.is_literal("-->")) {
            continue;
        }

        match consume_rule(node, &mut values) {
            Ok(rule) => rules.push(rule),
            Err(error) => rules.push(error.into_node()),
        }
    }

    rules
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::{ErrorKind, NodeType};

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
    fn simple_stylesheet() {
        let rules = parse_stylesheet("body div { width: 50% }", false, false);

        assert_eq!(rules.len(), 1);
        let (prelude, content) = rules[0].as_qualified_rule();

        let prelude_types: Vec<&NodeType> = prelude.iter().map(|n| &*n.node_type).collect();
        assert_eq!(
            prelude_types,
            vec![&ident("body"), &ws(" "), &ident("div"), &ws(" ")]
        );

        let content_types: Vec<&NodeType> = content.iter().map(|n| &*n.node_type).collect();
        assert_eq!(
            content_types,
            vec![
                &ws(" "),
                &ident("width"),
                &NodeType::Literal {
                    value: ":".to_string()
                },
                &ws(" "),
                &NodeType::Percentage {
                    value: 50.0,
                    int_value: Some(50),
                    representation: "50".to_string(),
                },
                &ws(" "),
            ]
        );
    }

    #[test]
    fn charset_rule_and_whitespace() {
        let rules = parse_stylesheet("@charset \"utf-8\"; p{}", false, false);

        assert_eq!(rules.len(), 3);

        let NodeType::AtRule {
            name,
            prelude,
            content,
        } = &*rules[0].node_type
        else {
            panic!("expected an at-rule");
        };
        assert_eq!(name, "charset");
        assert!(content.is_none());
        let prelude_types: Vec<&NodeType> = prelude.iter().map(|n| &*n.node_type).collect();
        assert_eq!(
            prelude_types,
            vec![
                &ws(" "),
                &NodeType::QuotedString {
                    value: "utf-8".to_string(),
                    quote: '"',
                }
            ]
        );

        assert!(rules[1].is_whitespace());

        let (prelude, content) = rules[2].as_qualified_rule();
        let prelude_types: Vec<&NodeType> = prelude.iter().map(|n| &*n.node_type).collect();
        assert_eq!(prelude_types, vec![&ident("p")]);
        assert!(content.is_empty());
    }

    #[test]
    fn skip_flags() {
        let rules = parse_stylesheet("/* hi */ p{} /* there */", true, true);
        assert_eq!(rules.len(), 1);
        assert!(rules[0].is_qualified_rule());
    }

    #[test]
    fn cdo_cdc_at_top_level() {
        let rules = parse_stylesheet("<!-- p{} -->", false, true);
        assert_eq!(rules.len(), 1);
        assert!(rules[0].is_qualified_rule());
    }

    #[test]
    fn cdo_cdc_in_rule_lists() {
        // inside rule lists '<!--' starts an (invalid) qualified rule
        let rules = parse_rule_list("<!-- p{} -->", false, true);
        assert_eq!(rules.len(), 2);
        assert!(rules[0].is_qualified_rule());
        let (prelude, _) = rules[0].as_qualified_rule();
        assert!(prelude[0].is_literal("<!--"));
        assert!(matches!(
            &*rules[1].node_type,
            NodeType::Error {
                kind: ErrorKind::Invalid,
                ..
            }
        ));
    }

    #[test]
    fn rule_list_from_component_values() {
        let outer = parse_stylesheet("@media screen { a{} b{} }", false, true);
        let NodeType::AtRule {
            content: Some(content),
            ..
        } = &*outer[0].node_type
        else {
            panic!("expected a block at-rule");
        };

        let rules = parse_rule_list(content.clone(), false, true);
        assert_eq!(rules.len(), 2);
        assert!(rules.iter().all(Node::is_qualified_rule));
    }

    #[test]
    fn stylesheet_from_bytes() {
        let rules = parse_stylesheet_bytes(b"\xEF\xBB\xBFp{}", None, None, false, false);
        let expected = parse_stylesheet("p{}", false, false);
        assert_eq!(rules, expected);

        let rules = parse_stylesheet_bytes(
            b"@charset \"windows-1252\"; h1{content:'\xe9'}",
            None,
            None,
            false,
            true,
        );
        assert!(rules.iter().any(Node::is_qualified_rule));
    }

    #[test]
    fn invalid_rule_recovers() {
        // the rule with no block eats the rest of the input, per css-syntax
        let rules = parse_stylesheet("p ; div", false, true);
        assert_eq!(rules.len(), 1);
        assert!(matches!(
            &*rules[0].node_type,
            NodeType::Error {
                kind: ErrorKind::Invalid,
                ..
            }
        ));
    }
}
