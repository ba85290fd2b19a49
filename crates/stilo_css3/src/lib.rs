//! A low-level CSS parser and serializer, implementing the tokenization
//! and parsing algorithms of [CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/).
//!
//! The crate turns CSS text (or bytes, with the css-syntax encoding
//! detection) into a tree of component values, declarations and rules,
//! and serializes such trees back to CSS that re-tokenizes identically.
//! It knows tokens, blocks, functions, rules and declarations, but
//! attaches no meaning to them: selectors, property names and at-rule
//! grammars are entirely the caller's business. Parse errors are inline
//! [`Node`] values, never panics or results.
//!
//! Two small grammars on top of the core are included: the `<An+B>`
//! microsyntax ([`parse_nth`]) and CSS Color Level 4 values
//! ([`parse_color`]).

use thiserror::Error;

pub mod colors;
pub mod node;
pub mod parser;
mod serializer;
pub mod tokenizer;
mod unicode;
pub mod utils;
pub mod walker;

pub use colors::{parse_color, Color, Rgba};
pub use node::{ErrorKind, Node, NodeType};
pub use parser::anplusb::parse_nth;
pub use parser::component_values::{parse_component_value_list, parse_one_component_value};
#[allow(deprecated)]
pub use parser::declaration::parse_declaration_list;
pub use parser::declaration::{parse_blocks_contents, parse_one_declaration};
pub use parser::rule::parse_one_rule;
pub use parser::stylesheet::{parse_rule_list, parse_stylesheet, parse_stylesheet_bytes};
pub use parser::Input;
pub use serializer::{serialize, serialize_identifier, serialize_string};
pub use stilo_shared::char_stream::{CharStream, Location};
pub use stilo_shared::encoding::decode_stylesheet_bytes;

/// A syntax error on the given position.
///
/// Used internally while consuming rules and declarations; at the public
/// boundary every error becomes an inline [`NodeType::Error`] node.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message} at {location:?}")]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Location,
}

impl SyntaxError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
        }
    }

    pub(crate) fn into_node(self) -> Node {
        Node::error(self.kind, self.message, self.location)
    }
}
