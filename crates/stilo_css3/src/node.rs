use stilo_shared::char_stream::Location;

/// Machine-readable classification of a parse error node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A construct that does not match the grammar at this position
    Invalid,
    /// The input ended inside a string token
    EofInString,
    /// The input ended inside an unquoted url token
    EofInUrl,
    /// A string token was terminated by an unescaped newline
    BadString,
    /// An unquoted url token contained a forbidden character
    BadUrl,
    /// Parsing a single item, found only whitespace and comments
    Empty,
    /// Found more input after parsing a single item
    ExtraInput,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Invalid => "invalid",
            ErrorKind::EofInString => "eof-in-string",
            ErrorKind::EofInUrl => "eof-in-url",
            ErrorKind::BadString => "bad-string",
            ErrorKind::BadUrl => "bad-url",
            ErrorKind::Empty => "empty",
            ErrorKind::ExtraInput => "extra-input",
        }
    }

    /// The default human-readable message for errors produced by the tokenizer
    pub(crate) fn description(&self) -> &'static str {
        match self {
            ErrorKind::Invalid => "invalid syntax",
            ErrorKind::EofInString => "unexpected EOF in a string",
            ErrorKind::EofInUrl => "unexpected EOF in a url",
            ErrorKind::BadString => "bad string token",
            ErrorKind::BadUrl => "bad url token",
            ErrorKind::Empty => "input is empty",
            ErrorKind::ExtraInput => "unexpected input after the first item",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum NodeType {
    /// A whitespace run, with the original characters
    Whitespace {
        value: String,
    },
    /// A literal token: `:`, `;`, `,`, `<!--`, `-->`, the match operators
    /// `~=` `|=` `^=` `$=` `*=` `||`, or any other single codepoint that no
    /// other token claimed
    Literal {
        value: String,
    },
    Ident {
        value: String,
    },
    /// An at-keyword; the value does not include the `@` marker
    AtKeyword {
        value: String,
    },
    /// A hash token; the value does not include the `#` marker.
    /// `is_identifier` is true when the name would also be a valid ident
    /// sequence, which is what makes it usable as an ID selector.
    Hash {
        value: String,
        is_identifier: bool,
    },
    /// A string token. The value is unescaped and does not include the
    /// quotes; `quote` records which quote character the source used.
    QuotedString {
        value: String,
        quote: char,
    },
    /// An unquoted `url(…)` token. The quoted form tokenizes as a
    /// `Function` named `url` with a `QuotedString` argument instead.
    Url {
        value: String,
    },
    /// A number token. `representation` is the exact source text, so
    /// serialization is lossless; `int_value` is set iff the source had no
    /// fraction and no exponent.
    Number {
        value: f64,
        int_value: Option<i64>,
        representation: String,
    },
    Percentage {
        value: f64,
        int_value: Option<i64>,
        representation: String,
    },
    /// A dimension; the unit is canonical lowercase (ASCII characters
    /// only, non-ASCII codepoints are kept as-is)
    Dimension {
        value: f64,
        int_value: Option<i64>,
        representation: String,
        unit: String,
    },
    /// A `u+…` unicode-range token, as an inclusive codepoint range
    UnicodeRange {
        start: u32,
        end: u32,
    },
    /// A comment; the value excludes the `/*` and `*/` markers
    Comment {
        value: String,
    },
    /// An inline parse error. Errors are component values like any other
    /// node; nothing is thrown.
    Error {
        kind: ErrorKind,
        message: String,
    },
    /// A `(…)` block; the parentheses themselves are not part of `content`
    ParenthesesBlock {
        content: Vec<Node>,
    },
    /// A `[…]` block
    SquareBracketsBlock {
        content: Vec<Node>,
    },
    /// A `{…}` block
    CurlyBracketsBlock {
        content: Vec<Node>,
    },
    /// A function call: `name(…)`. The name is canonical lowercase
    /// (ASCII-only, like `Dimension` units); commas inside the arguments
    /// are ordinary `Literal` nodes.
    Function {
        name: String,
        arguments: Vec<Node>,
    },
    /// A qualified rule: a prelude followed by a `{}` block
    QualifiedRule {
        prelude: Vec<Node>,
        content: Vec<Node>,
    },
    /// An at-rule. `content` is `None` for statement at-rules terminated
    /// by a `;`.
    AtRule {
        name: String,
        prelude: Vec<Node>,
        content: Option<Vec<Node>>,
    },
    /// A property or descriptor declaration. When `important` is set, the
    /// trailing `!important` marker has been stripped from `value`.
    Declaration {
        name: String,
        value: Vec<Node>,
        important: bool,
    },
}

/// A node is a single element in the AST
#[derive(Debug, PartialEq, Clone)]
pub struct Node {
    pub node_type: Box<NodeType>,
    pub location: Location,
}

impl Node {
    pub fn new(node_type: NodeType, location: Location) -> Self {
        Self {
            node_type: Box::new(node_type),
            location,
        }
    }

    pub(crate) fn error(
        kind: ErrorKind,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(
            NodeType::Error {
                kind,
                message: message.into(),
            },
            location,
        )
    }

    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        matches!(&*self.node_type, NodeType::Whitespace { .. })
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(&*self.node_type, NodeType::Comment { .. })
    }

    /// Returns true for anything except whitespace and comments
    #[must_use]
    pub fn is_significant(&self) -> bool {
        !self.is_whitespace() && !self.is_comment()
    }

    #[must_use]
    pub fn is_literal(&self, literal: &str) -> bool {
        matches!(&*self.node_type, NodeType::Literal { value } if value == literal)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(&*self.node_type, NodeType::Error { .. })
    }

    #[must_use]
    pub fn is_ident(&self) -> bool {
        matches!(&*self.node_type, NodeType::Ident { .. })
    }

    #[must_use]
    pub fn as_ident(&self) -> &String {
        match &*self.node_type {
            NodeType::Ident { value } => value,
            _ => panic!("Node is not an ident"),
        }
    }

    #[must_use]
    pub fn is_at_keyword(&self) -> bool {
        matches!(&*self.node_type, NodeType::AtKeyword { .. })
    }

    #[must_use]
    pub fn is_curly_block(&self) -> bool {
        matches!(&*self.node_type, NodeType::CurlyBracketsBlock { .. })
    }

    /// Consumes the node and returns the content of its `{}` block
    #[must_use]
    pub fn into_curly_content(self) -> Vec<Node> {
        match *self.node_type {
            NodeType::CurlyBracketsBlock { content } => content,
            _ => panic!("Node is not a {{}} block"),
        }
    }

    #[must_use]
    pub fn is_declaration(&self) -> bool {
        matches!(&*self.node_type, NodeType::Declaration { .. })
    }

    #[must_use]
    pub fn as_declaration(&self) -> (&String, &Vec<Node>, &bool) {
        match &*self.node_type {
            NodeType::Declaration {
                name,
                value,
                important,
            } => (name, value, important),
            _ => panic!("Node is not a declaration"),
        }
    }

    #[must_use]
    pub fn is_qualified_rule(&self) -> bool {
        matches!(&*self.node_type, NodeType::QualifiedRule { .. })
    }

    #[must_use]
    pub fn as_qualified_rule(&self) -> (&Vec<Node>, &Vec<Node>) {
        match &*self.node_type {
            NodeType::QualifiedRule { prelude, content } => (prelude, content),
            _ => panic!("Node is not a qualified rule"),
        }
    }

    #[must_use]
    pub fn is_at_rule(&self) -> bool {
        matches!(&*self.node_type, NodeType::AtRule { .. })
    }
}
