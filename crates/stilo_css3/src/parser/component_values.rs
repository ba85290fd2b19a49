use crate::node::{ErrorKind, Node, NodeType};
use crate::parser::{next_significant, Input};
use crate::tokenizer::{Token, TokenType, Tokenizer};
use stilo_shared::char_stream::{CharStream, Location};

/// Parses CSS text into a flat list of component values.
///
/// Blocks and functions are nested eagerly: an opening `(`, `[`, `{` or a
/// function token starts a child list that runs up to (and consumes) the
/// matching closer. With `skip_comments`, comment nodes are dropped at
/// every nesting level.
pub fn parse_component_value_list(css: &str, skip_comments: bool) -> Vec<Node> {
    log::trace!("parse_component_value_list");

    let mut stream = CharStream::new(css);
    let mut tokenizer = Tokenizer::new(&mut stream);

    consume_value_list(&mut tokenizer, None, skip_comments)
}

/// Parses exactly one component value.
///
/// Returns an `empty` error when there is nothing but whitespace and
/// comments, and an `extra-input` error when more than one significant
/// component value is present.
pub fn parse_one_component_value<'i>(input: impl Into<Input<'i>>) -> Node {
    log::trace!("parse_one_component_value");

    let values = input.into().into_values(false);
    let mut values = values.into_iter();

    let Some(first) = next_significant(&mut values) else {
        return Node::error(
            ErrorKind::Empty,
            ErrorKind::Empty.description(),
            Location::default(),
        );
    };

    if let Some(second) = next_significant(&mut values) {
        return Node::error(
            ErrorKind::ExtraInput,
            "got more than one component value",
            second.location,
        );
    }

    first
}

/// Consumes component values until EOF or until the given closing token,
/// which is consumed but not part of the result.
fn consume_value_list(
    tokenizer: &mut Tokenizer,
    closing: Option<&TokenType>,
    skip_comments: bool,
) -> Vec<Node> {
    let mut values = Vec::new();

    loop {
        let token = tokenizer.consume();
        if token.token_type == TokenType::Eof {
            break;
        }
        if Some(&token.token_type) == closing {
            break;
        }

        if let Some(node) = consume_component_value(tokenizer, token, skip_comments) {
            values.push(node);
        }
    }

    values
}

fn consume_component_value(
    tokenizer: &mut Tokenizer,
    token: Token,
    skip_comments: bool,
) -> Option<Node> {
    let location = token.location;

    let node_type = match token.token_type {
        TokenType::LParen => NodeType::ParenthesesBlock {
            content: consume_value_list(tokenizer, Some(&TokenType::RParen), skip_comments),
        },
        TokenType::LBracket => NodeType::SquareBracketsBlock {
            content: consume_value_list(tokenizer, Some(&TokenType::RBracket), skip_comments),
        },
        TokenType::LCurly => NodeType::CurlyBracketsBlock {
            content: consume_value_list(tokenizer, Some(&TokenType::RCurly), skip_comments),
        },
        TokenType::Function(name) => NodeType::Function {
            // function names are canonically lowercase
            name: name.to_ascii_lowercase(),
            arguments: consume_value_list(tokenizer, Some(&TokenType::RParen), skip_comments),
        },
        TokenType::Comment(value) => {
            if skip_comments {
                return None;
            }
            NodeType::Comment { value }
        }
        TokenType::Whitespace(value) => NodeType::Whitespace { value },
        TokenType::Ident(value) => NodeType::Ident { value },
        TokenType::AtKeyword(value) => NodeType::AtKeyword { value },
        TokenType::Hash {
            value,
            is_identifier,
        } => NodeType::Hash {
            value,
            is_identifier,
        },
        TokenType::QuotedString { value, quote } => NodeType::QuotedString { value, quote },
        TokenType::Url(value) => NodeType::Url { value },
        TokenType::Number {
            value,
            int_value,
            representation,
        } => NodeType::Number {
            value,
            int_value,
            representation,
        },
        TokenType::Percentage {
            value,
            int_value,
            representation,
        } => NodeType::Percentage {
            value,
            int_value,
            representation,
        },
        TokenType::Dimension {
            value,
            int_value,
            representation,
            unit,
        } => NodeType::Dimension {
            value,
            int_value,
            representation,
            unit,
        },
        TokenType::UnicodeRange { start, end } => NodeType::UnicodeRange { start, end },
        TokenType::Match(value) => NodeType::Literal { value },
        TokenType::Delim(c) => NodeType::Literal {
            value: c.to_string(),
        },
        TokenType::Comma => NodeType::Literal {
            value: ",".to_string(),
        },
        TokenType::Colon => NodeType::Literal {
            value: ":".to_string(),
        },
        TokenType::Semicolon => NodeType::Literal {
            value: ";".to_string(),
        },
        TokenType::Cdo => NodeType::Literal {
            value: "<!--".to_string(),
        },
        TokenType::Cdc => NodeType::Literal {
            value: "-->".to_string(),
        },
        // unmatched closers are kept as literals
        TokenType::RParen => NodeType::Literal {
            value: ")".to_string(),
        },
        TokenType::RBracket => NodeType::Literal {
            value: "]".to_string(),
        },
        TokenType::RCurly => NodeType::Literal {
            value: "}".to_string(),
        },
        TokenType::Error(kind) => NodeType::Error {
            kind,
            message: kind.description().to_string(),
        },
        TokenType::Eof => return None,
    };

    Some(Node::new(node_type, location))
}

#[cfg(test)]
mod test {
    use super::*;

    fn types(nodes: &[Node]) -> Vec<&NodeType> {
        nodes.iter().map(|n| &*n.node_type).collect()
    }

    fn ident(value: &str) -> NodeType {
        NodeType::Ident {
            value: value.to_string(),
        }
    }

    fn literal(value: &str) -> NodeType {
        NodeType::Literal {
            value: value.to_string(),
        }
    }

    fn ws(value: &str) -> NodeType {
        NodeType::Whitespace {
            value: value.to_string(),
        }
    }

    #[test]
    fn nested_blocks() {
        let values = parse_component_value_list("a [b (c) ] {d}", false);

        assert_eq!(values.len(), 5);
        assert_eq!(*values[0].node_type, ident("a"));
        assert_eq!(*values[1].node_type, ws(" "));

        let NodeType::SquareBracketsBlock { content } = &*values[2].node_type else {
            panic!("expected a [] block");
        };
        assert_eq!(content.len(), 4);
        assert_eq!(*content[0].node_type, ident("b"));
        let NodeType::ParenthesesBlock { content: inner } = &*content[2].node_type else {
            panic!("expected a () block");
        };
        assert_eq!(types(inner), vec![&ident("c")]);

        let NodeType::CurlyBracketsBlock { content } = &*values[4].node_type else {
            panic!("expected a {{}} block");
        };
        assert_eq!(types(content), vec![&ident("d")]);
    }

    #[test]
    fn function_arguments() {
        let values = parse_component_value_list("calc(1 + 2)", false);

        assert_eq!(values.len(), 1);
        let NodeType::Function { name, arguments } = &*values[0].node_type else {
            panic!("expected a function");
        };
        assert_eq!(name, "calc");
        assert_eq!(arguments.len(), 5);
        assert!(arguments[2].is_literal("+"));
    }

    #[test]
    fn quoted_url_is_a_function() {
        let values = parse_component_value_list("url( \"foo.png\" )", false);

        assert_eq!(values.len(), 1);
        let NodeType::Function { name, arguments } = &*values[0].node_type else {
            panic!("expected a function");
        };
        assert_eq!(name, "url");
        let significant: Vec<&Node> = arguments.iter().filter(|n| n.is_significant()).collect();
        assert_eq!(significant.len(), 1);
        assert_eq!(
            *significant[0].node_type,
            NodeType::QuotedString {
                value: "foo.png".to_string(),
                quote: '"',
            }
        );
    }

    #[test]
    fn unmatched_closers_stay_literals() {
        let values = parse_component_value_list("a ] b", false);
        assert_eq!(
            types(&values),
            vec![&ident("a"), &ws(" "), &literal("]"), &ws(" "), &ident("b")]
        );

        // a wrong closer inside a block does not close it
        let values = parse_component_value_list("{ a ) b }", false);
        let NodeType::CurlyBracketsBlock { content } = &*values[0].node_type else {
            panic!("expected a {{}} block");
        };
        assert!(content.iter().any(|n| n.is_literal(")")));
    }

    #[test]
    fn eof_closes_open_blocks() {
        let values = parse_component_value_list("(a", false);

        assert_eq!(values.len(), 1);
        let NodeType::ParenthesesBlock { content } = &*values[0].node_type else {
            panic!("expected a () block");
        };
        assert_eq!(types(content), vec![&ident("a")]);
    }

    #[test]
    fn skip_comments_at_every_level() {
        let values = parse_component_value_list("a/*x*/ (b/*y*/)", true);

        assert!(values.iter().all(|n| !n.is_comment()));
        let NodeType::ParenthesesBlock { content } = &*values.last().unwrap().node_type else {
            panic!("expected a () block");
        };
        assert!(content.iter().all(|n| !n.is_comment()));
    }

    #[test]
    fn one_component_value() {
        let node = parse_one_component_value("  red  ");
        assert_eq!(*node.node_type, ident("red"));

        let node = parse_one_component_value(" /* only a comment */ ");
        assert!(matches!(
            &*node.node_type,
            NodeType::Error {
                kind: ErrorKind::Empty,
                ..
            }
        ));

        let node = parse_one_component_value("red blue");
        assert!(matches!(
            &*node.node_type,
            NodeType::Error {
                kind: ErrorKind::ExtraInput,
                ..
            }
        ));

        // a block counts as a single component value
        let node = parse_one_component_value("{ a; b }");
        assert!(node.is_curly_block());
    }
}
