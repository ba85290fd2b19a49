use crate::node::{Node, NodeType};
use crate::unicode::{is_control, is_name_char};
use std::fmt::Write;

/// Serializes a sequence of nodes back to CSS text.
///
/// The result re-tokenizes to the same component values: an empty comment
/// `/**/` is inserted between adjacent nodes whose concatenation would
/// merge into different tokens, and declarations in the list are
/// terminated with `;`.
pub fn serialize(nodes: &[Node]) -> String {
    let mut output = String::new();
    serialize_to(nodes, &mut output);
    output
}

/// Serializes a string as a CSS identifier.
///
/// Codepoints that would re-tokenize differently are escaped: a leading
/// digit, a digit after a leading `-`, controls, and anything that is not
/// an ident codepoint. Returns `None` for values that are not
/// representable as an ident at all: the empty string and a bare `-`.
pub fn serialize_identifier(value: &str) -> Option<String> {
    if value.is_empty() || value == "-" {
        return None;
    }

    let mut output = String::with_capacity(value.len());
    write_identifier(value, &mut output);
    Some(output)
}

/// Serializes a string as a CSS string token, quoted with `"`.
pub fn serialize_string(value: &str) -> String {
    let mut output = String::with_capacity(value.len() + 2);
    write_string(value, &mut output);
    output
}

pub(crate) fn serialize_to(nodes: &[Node], output: &mut String) {
    let mut previous: Option<GapType> = None;

    for node in nodes {
        let Some(current) = gap_type(node) else {
            // error nodes serialize to nothing and leave no gap to guard
            continue;
        };

        if let Some(previous) = previous {
            if previous == GapType::Literal("\\") {
                // anything but a newline would extend the backslash into
                // a valid escape
                let joins_safely = matches!(
                    &*node.node_type,
                    NodeType::Whitespace { value } if value.starts_with('\n')
                );
                if !joins_safely {
                    output.push('\n');
                }
            } else if needs_comment_between(previous, current) {
                output.push_str("/**/");
            }
        }

        node.write_css(output);
        if node.is_declaration() {
            output.push(';');
        }

        previous = Some(current);
    }
}

impl Node {
    /// Serializes this single node to CSS text
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut output = String::new();
        self.write_css(&mut output);
        output
    }

    pub(crate) fn write_css(&self, output: &mut String) {
        match &*self.node_type {
            NodeType::Whitespace { value } => output.push_str(value),
            NodeType::Literal { value } => output.push_str(value),
            NodeType::Ident { value } => write_identifier(value, output),
            NodeType::AtKeyword { value } => {
                output.push('@');
                write_identifier(value, output);
            }
            NodeType::Hash { value, .. } => {
                output.push('#');
                write_name(value, output);
            }
            NodeType::QuotedString { value, .. } => write_string(value, output),
            NodeType::Url { value } => {
                output.push_str("url(");
                write_url(value, output);
                output.push(')');
            }
            NodeType::Number { representation, .. } => output.push_str(representation),
            NodeType::Percentage { representation, .. } => {
                output.push_str(representation);
                output.push('%');
            }
            NodeType::Dimension {
                representation,
                unit,
                ..
            } => {
                output.push_str(representation);
                // a unit like `e2` or `e-5` would re-tokenize as an exponent
                if unit.starts_with(['e', 'E'])
                    && unit[1..].chars().next().map_or(true, |c| {
                        c == '-' || c.is_ascii_digit()
                    })
                {
                    output.push_str("\\65 ");
                    write_name(&unit[1..], output);
                } else {
                    write_identifier(unit, output);
                }
            }
            NodeType::UnicodeRange { start, end } => {
                if start == end {
                    let _ = write!(output, "U+{start:X}");
                } else {
                    let _ = write!(output, "U+{start:X}-{end:X}");
                }
            }
            NodeType::Comment { value } => {
                output.push_str("/*");
                output.push_str(value);
                output.push_str("*/");
            }
            NodeType::Error { .. } => {}
            NodeType::ParenthesesBlock { content } => {
                output.push('(');
                serialize_to(content, output);
                output.push(')');
            }
            NodeType::SquareBracketsBlock { content } => {
                output.push('[');
                serialize_to(content, output);
                output.push(']');
            }
            NodeType::CurlyBracketsBlock { content } => {
                output.push('{');
                serialize_to(content, output);
                output.push('}');
            }
            NodeType::Function { name, arguments } => {
                write_identifier(name, output);
                output.push('(');
                serialize_to(arguments, output);
                output.push(')');
            }
            NodeType::QualifiedRule { prelude, content } => {
                serialize_to(prelude, output);
                output.push('{');
                serialize_to(content, output);
                output.push('}');
            }
            NodeType::AtRule {
                name,
                prelude,
                content,
            } => {
                output.push('@');
                write_identifier(name, output);
                serialize_to(prelude, output);
                match content {
                    Some(content) => {
                        output.push('{');
                        serialize_to(content, output);
                        output.push('}');
                    }
                    None => output.push(';'),
                }
            }
            NodeType::Declaration {
                name,
                value,
                important,
            } => {
                write_identifier(name, output);
                output.push(':');
                serialize_to(value, output);
                if *important {
                    output.push_str("!important");
                }
            }
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn write_identifier(value: &str, output: &mut String) {
    // a bare '-' cannot start an ident sequence unescaped
    if value == "-" {
        output.push_str("\\-");
        return;
    }

    let mut value = value;
    if let Some(stripped) = value.strip_prefix('-') {
        output.push('-');
        value = stripped;
    }

    for (i, c) in value.chars().enumerate() {
        if c == '\0' {
            output.push('\u{FFFD}');
        } else if c.is_ascii_digit() && i == 0 {
            let _ = write!(output, "\\{:x} ", c as u32);
        } else if is_name_char(c) {
            output.push(c);
        } else if is_control(c) {
            let _ = write!(output, "\\{:x} ", c as u32);
        } else {
            output.push('\\');
            output.push(c);
        }
    }
}

/// Like [`write_identifier`], but without the first-codepoint rules; used
/// for hash names, which may start with a digit.
fn write_name(value: &str, output: &mut String) {
    for c in value.chars() {
        if c == '\0' {
            output.push('\u{FFFD}');
        } else if is_name_char(c) {
            output.push(c);
        } else if is_control(c) {
            let _ = write!(output, "\\{:x} ", c as u32);
        } else {
            output.push('\\');
            output.push(c);
        }
    }
}

fn write_string(value: &str, output: &mut String) {
    output.push('"');
    for c in value.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\A "),
            c if is_control(c) => {
                let _ = write!(output, "\\{:x} ", c as u32);
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

fn write_url(value: &str, output: &mut String) {
    for c in value.chars() {
        match c {
            '"' | '\'' | '(' | ')' | '\\' | ' ' => {
                output.push('\\');
                output.push(c);
            }
            '\n' => output.push_str("\\A "),
            '\t' => output.push_str("\\9 "),
            c if c == '\0' || is_control(c) => {
                let _ = write!(output, "\\{:x} ", c as u32);
            }
            c => output.push(c),
        }
    }
}

/// The serialization type of a node for the token-pair table; literal
/// tokens are represented by their text
#[derive(Clone, Copy, PartialEq)]
enum GapType<'a> {
    Ident,
    AtKeyword,
    Hash,
    String,
    Url,
    Function,
    Number,
    Percentage,
    Dimension,
    UnicodeRange,
    Whitespace,
    Comment,
    Paren,
    Square,
    Curly,
    Rule,
    Declaration,
    Literal(&'a str),
}

fn gap_type(node: &Node) -> Option<GapType> {
    Some(match &*node.node_type {
        NodeType::Ident { .. } => GapType::Ident,
        NodeType::AtKeyword { .. } => GapType::AtKeyword,
        NodeType::Hash { .. } => GapType::Hash,
        NodeType::QuotedString { .. } => GapType::String,
        NodeType::Url { .. } => GapType::Url,
        NodeType::Function { .. } => GapType::Function,
        NodeType::Number { .. } => GapType::Number,
        NodeType::Percentage { .. } => GapType::Percentage,
        NodeType::Dimension { .. } => GapType::Dimension,
        NodeType::UnicodeRange { .. } => GapType::UnicodeRange,
        NodeType::Whitespace { .. } => GapType::Whitespace,
        NodeType::Comment { .. } => GapType::Comment,
        NodeType::ParenthesesBlock { .. } => GapType::Paren,
        NodeType::SquareBracketsBlock { .. } => GapType::Square,
        NodeType::CurlyBracketsBlock { .. } => GapType::Curly,
        NodeType::QualifiedRule { .. } | NodeType::AtRule { .. } => GapType::Rule,
        NodeType::Declaration { .. } => GapType::Declaration,
        NodeType::Literal { value } => GapType::Literal(value),
        NodeType::Error { .. } => return None,
    })
}

/// The token pairs that must be separated by an empty comment to keep
/// their tokenization, per the css-syntax serialization table.
fn needs_comment_between(previous: GapType, next: GapType) -> bool {
    use GapType::*;

    let next_is_identish = matches!(next, Ident | Function | Url);
    let next_is_numeric = matches!(next, Number | Percentage | Dimension);

    match previous {
        Ident => {
            next_is_identish
                || next_is_numeric
                || next == UnicodeRange
                || next == Paren
                || matches!(next, Literal("-") | Literal("-->"))
        }
        AtKeyword | Hash | Dimension => {
            next_is_identish
                || next_is_numeric
                || next == UnicodeRange
                || matches!(next, Literal("-") | Literal("-->"))
        }
        Number => next_is_identish || next_is_numeric || next == UnicodeRange,
        UnicodeRange => {
            matches!(next, Ident | Function | Number | Percentage | Dimension)
                || next == Literal("?")
        }
        Literal("#") | Literal("-") => {
            next_is_identish || next_is_numeric || next == UnicodeRange
        }
        Literal("@") => {
            next_is_identish || next == UnicodeRange || next == Literal("-")
        }
        Literal(".") | Literal("+") => next_is_numeric,
        Literal("/") => next == Literal("*"),
        Literal("~") | Literal("^") | Literal("$") | Literal("*") => next == Literal("="),
        Literal("|") => matches!(next, Literal("=") | Literal("|")),
        _ => false,
    }
}
