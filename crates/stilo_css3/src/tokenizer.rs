use crate::node::ErrorKind;
use crate::unicode::{is_name_char, is_name_start, is_non_printable, is_whitespace};
use std::char::REPLACEMENT_CHARACTER;
use stilo_shared::char_stream::{CharStream, Location, Stream};

#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    /// An `<at-keyword-token>`; the value does not include the `@` marker
    AtKeyword(String),
    Ident(String),
    /// A `<function-token>`: an ident directly followed by `(`
    Function(String),
    /// An unquoted `<url-token>`; `url("…")` produces `Function` instead
    Url(String),
    /// A `<hash-token>`; the flag is true when the name is a valid ident
    /// sequence (the "id" type flag of css-syntax)
    Hash {
        value: String,
        is_identifier: bool,
    },
    /// A `<string-token>`; the value is unescaped, without the quotes
    QuotedString {
        value: String,
        quote: char,
    },
    /// A numeric token, keeping the exact source text as `representation`
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
    Dimension {
        value: f64,
        int_value: Option<i64>,
        representation: String,
        unit: String,
    },
    /// A `u+…` `<unicode-range-token>`
    UnicodeRange {
        start: u32,
        end: u32,
    },
    /// A `<whitespace-token>`, keeping the original run
    Whitespace(String),
    /// A comment, without the `/*` and `*/` markers
    Comment(String),
    /// One of the match operators `~=` `|=` `^=` `$=` `*=` `||`
    Match(String),
    /// A `<delim-token>`
    Delim(char),
    /// A `<{-token>`
    LCurly,
    /// A `<}-token>`
    RCurly,
    /// A `<(-token>`
    LParen,
    /// A `<)-token>`
    RParen,
    /// A `<[-token>`
    LBracket,
    /// A `<]-token>`
    RBracket,
    Comma,
    Colon,
    Semicolon,
    /// A `<!--` `<CDO-token>`
    Cdo,
    /// A `-->` `<CDC-token>`
    Cdc,
    /// A recoverable tokenizer error (bad or unterminated string/url)
    Error(ErrorKind),
    /// An `<EOF-token>`
    Eof,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    /// Type of the token
    pub token_type: TokenType,
    /// Location of the token in the source
    pub location: Location,
}

impl Token {
    /// Returns a new token for the given type on the given location
    fn new(token_type: TokenType, location: Location) -> Token {
        Token {
            token_type,
            location,
        }
    }

    fn new_delim(c: char, location: Location) -> Token {
        Token::new(TokenType::Delim(c), location)
    }

    fn new_ident(value: &str, location: Location) -> Token {
        Token::new(TokenType::Ident(value.to_string()), location)
    }

    fn new_function(value: &str, location: Location) -> Token {
        Token::new(TokenType::Function(value.to_string()), location)
    }

    fn new_at_keyword(value: &str, location: Location) -> Token {
        Token::new(TokenType::AtKeyword(value.to_string()), location)
    }

    fn new_url(value: &str, location: Location) -> Token {
        Token::new(TokenType::Url(value.to_string()), location)
    }

    fn new_hash(value: &str, is_identifier: bool, location: Location) -> Token {
        Token::new(
            TokenType::Hash {
                value: value.to_string(),
                is_identifier,
            },
            location,
        )
    }

    fn new_string(value: &str, quote: char, location: Location) -> Token {
        Token::new(
            TokenType::QuotedString {
                value: value.to_string(),
                quote,
            },
            location,
        )
    }

    fn new_number(representation: String, location: Location) -> Token {
        let (value, int_value) = parse_numeric(&representation);
        Token::new(
            TokenType::Number {
                value,
                int_value,
                representation,
            },
            location,
        )
    }

    fn new_percentage(representation: String, location: Location) -> Token {
        let (value, int_value) = parse_numeric(&representation);
        Token::new(
            TokenType::Percentage {
                value,
                int_value,
                representation,
            },
            location,
        )
    }

    fn new_dimension(representation: String, unit: String, location: Location) -> Token {
        let (value, int_value) = parse_numeric(&representation);
        Token::new(
            TokenType::Dimension {
                value,
                int_value,
                representation,
                unit,
            },
            location,
        )
    }

    fn new_error(kind: ErrorKind, location: Location) -> Token {
        Token::new(TokenType::Error(kind), location)
    }
}

/// Derives the numeric value and the integer flag from the source text of
/// a numeric token. `int_value` is set iff the text has no fraction and no
/// exponent.
fn parse_numeric(representation: &str) -> (f64, Option<i64>) {
    let value: f64 = representation.parse().unwrap_or(0.0);
    if representation.contains(['.', 'e', 'E']) {
        (value, None)
    } else {
        let int_value = representation.parse().unwrap_or(value as i64);
        (value, Some(int_value))
    }
}

/// CSS tokenizer according to the [w3 specification](https://www.w3.org/TR/css-syntax-3/#tokenization)
pub struct Tokenizer<'stream> {
    stream: &'stream mut CharStream,
    /// Position of the NEXT token to consume
    position: usize,
    /// All tokens produced so far, so lookahead can run ahead of consume
    tokens: Vec<Token>,
}

impl<'stream> Tokenizer<'stream> {
    pub fn new(stream: &'stream mut CharStream) -> Self {
        Self {
            stream,
            position: 0,
            tokens: Vec::new(),
        }
    }

    /// Returns the location of the next character in the source
    pub fn current_location(&self) -> Location {
        self.stream.location()
    }

    /// Returns true when every token has been consumed
    pub fn eof(&self) -> bool {
        self.stream.eof() && self.position >= self.tokens.len()
    }

    /// Looks ahead at the token with the given offset; lookahead(0) is the
    /// token the next consume() will return
    pub fn lookahead(&mut self, offset: usize) -> Token {
        while self.tokens.len() <= self.position + offset {
            let token = self.consume_token();
            self.tokens.push(token);
        }

        self.tokens[self.position + offset].clone()
    }

    /// Consumes the next token and returns it
    pub fn consume(&mut self) -> Token {
        if self.tokens.len() == self.position {
            let token = self.consume_token();
            self.tokens.push(token);
        }

        let token = self.tokens[self.position].clone();
        self.position += 1;

        log::trace!("{:?}", token);

        token
    }

    /// Pushes the current position back so the next consume returns the
    /// same token again
    pub fn reconsume(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    /// 4.3.1. [Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Token {
        let loc = self.stream.location();

        let Some(c) = self.stream.read() else {
            return Token::new(TokenType::Eof, loc);
        };

        match c {
            '/' if self.stream.look_ahead(1) == Some('*') => self.consume_comment(),
            c if is_whitespace(c) => {
                let value = self.stream.consume_while(is_whitespace);
                Token::new(TokenType::Whitespace(value), loc)
            }
            '"' | '\'' => self.consume_string(),
            '#' => {
                // consume '#'
                self.stream.next();

                if self.is_name_char_at(0) || self.is_valid_escape(0) {
                    let is_identifier = self.would_start_ident(0);
                    Token::new_hash(&self.consume_name(), is_identifier, loc)
                } else {
                    Token::new_delim(c, loc)
                }
            }
            '(' => {
                self.stream.next();
                Token::new(TokenType::LParen, loc)
            }
            ')' => {
                self.stream.next();
                Token::new(TokenType::RParen, loc)
            }
            '[' => {
                self.stream.next();
                Token::new(TokenType::LBracket, loc)
            }
            ']' => {
                self.stream.next();
                Token::new(TokenType::RBracket, loc)
            }
            '{' => {
                self.stream.next();
                Token::new(TokenType::LCurly, loc)
            }
            '}' => {
                self.stream.next();
                Token::new(TokenType::RCurly, loc)
            }
            ',' => {
                self.stream.next();
                Token::new(TokenType::Comma, loc)
            }
            ':' => {
                self.stream.next();
                Token::new(TokenType::Colon, loc)
            }
            ';' => {
                self.stream.next();
                Token::new(TokenType::Semicolon, loc)
            }
            '+' | '.' => {
                if self.would_start_number() {
                    return self.consume_numeric();
                }

                self.stream.next();
                Token::new_delim(c, loc)
            }
            '-' => {
                if self.would_start_number() {
                    return self.consume_numeric();
                }

                if self.stream.starts_with("-->") {
                    self.stream.next_n(3);
                    return Token::new(TokenType::Cdc, loc);
                }

                if self.would_start_ident(0) {
                    return self.consume_ident_like();
                }

                self.stream.next();
                Token::new_delim(c, loc)
            }
            '<' => {
                if self.stream.starts_with("<!--") {
                    self.stream.next_n(4);
                    return Token::new(TokenType::Cdo, loc);
                }

                self.stream.next();
                Token::new_delim(c, loc)
            }
            '@' => {
                // consume '@'
                self.stream.next();

                if self.would_start_ident(0) {
                    return Token::new_at_keyword(&self.consume_name(), loc);
                }

                Token::new_delim(c, loc)
            }
            '\\' => {
                if self.is_valid_escape(0) {
                    return self.consume_ident_like();
                }

                // parse error: a lone backslash stays a delim
                self.stream.next();
                Token::new_delim(c, loc)
            }
            'u' | 'U' => {
                if self.stream.look_ahead(1) == Some('+')
                    && matches!(self.stream.look_ahead(2), Some(c) if c.is_ascii_hexdigit() || c == '?')
                {
                    return self.consume_unicode_range();
                }

                self.consume_ident_like()
            }
            c if c.is_ascii_digit() => self.consume_numeric(),
            c if is_name_start(c) => self.consume_ident_like(),
            '~' | '^' | '$' | '*' => {
                self.stream.next();
                if self.stream.read() == Some('=') {
                    self.stream.next();
                    return Token::new(TokenType::Match(format!("{c}=")), loc);
                }

                Token::new_delim(c, loc)
            }
            '|' => {
                self.stream.next();
                match self.stream.read() {
                    Some('=') => {
                        self.stream.next();
                        Token::new(TokenType::Match("|=".to_string()), loc)
                    }
                    Some('|') => {
                        self.stream.next();
                        Token::new(TokenType::Match("||".to_string()), loc)
                    }
                    _ => Token::new_delim(c, loc),
                }
            }
            c => {
                self.stream.next();
                Token::new_delim(c, loc)
            }
        }
    }

    /// 4.3.2. [Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// An unterminated comment at EOF is not an error.
    fn consume_comment(&mut self) -> Token {
        let loc = self.stream.location();

        // consume '/*'
        self.stream.next_n(2);

        let mut value = String::new();
        while !self.stream.eof() {
            if self.stream.starts_with("*/") {
                self.stream.next_n(2);
                break;
            }
            if let Some(c) = self.stream.read_and_next() {
                value.push(c);
            }
        }

        Token::new(TokenType::Comment(value), loc)
    }

    /// 4.3.3. [Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    ///
    /// Returns either a `<number-token>`, `<percentage-token>`, or `<dimension-token>`.
    fn consume_numeric(&mut self) -> Token {
        let loc = self.stream.location();

        let representation = self.consume_number();

        if self.would_start_ident(0) {
            // units are canonically lowercase; ASCII-only, so non-ASCII
            // codepoints come through untouched
            let unit = self.consume_name().to_ascii_lowercase();
            return Token::new_dimension(representation, unit, loc);
        }

        if self.stream.read() == Some('%') {
            // consume '%'
            self.stream.next();
            return Token::new_percentage(representation, loc);
        }

        Token::new_number(representation, loc)
    }

    /// 4.3.12. [Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    ///
    /// Returns the exact source text; the numeric value is derived from it
    /// afterwards so that serialization can reproduce the source.
    fn consume_number(&mut self) -> String {
        let mut repr = String::new();

        if matches!(self.stream.read(), Some('+' | '-')) {
            repr.push(self.stream.read_and_next().unwrap());
        }

        repr.push_str(&self.stream.consume_while(|c| c.is_ascii_digit()));

        if self.stream.read() == Some('.')
            && matches!(self.stream.look_ahead(1), Some(c) if c.is_ascii_digit())
        {
            repr.push(self.stream.read_and_next().unwrap());
            repr.push_str(&self.stream.consume_while(|c| c.is_ascii_digit()));
        }

        if matches!(self.stream.read(), Some('e' | 'E')) {
            let first = self.stream.look_ahead(1);
            let second = self.stream.look_ahead(2);
            let digits = matches!(first, Some(c) if c.is_ascii_digit())
                || (matches!(first, Some('+' | '-'))
                    && matches!(second, Some(c) if c.is_ascii_digit()));

            if digits {
                repr.push(self.stream.read_and_next().unwrap());
                if matches!(self.stream.read(), Some('+' | '-')) {
                    repr.push(self.stream.read_and_next().unwrap());
                }
                repr.push_str(&self.stream.consume_while(|c| c.is_ascii_digit()));
            }
        }

        repr
    }

    /// 4.3.4. [Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    ///
    /// Returns an `<ident-token>`, `<function-token>`, `<url-token>`, or an
    /// error token for a bad url.
    fn consume_ident_like(&mut self) -> Token {
        let loc = self.stream.location();

        let value = self.consume_name();

        if self.stream.read() == Some('(') {
            // consume '('
            self.stream.next();

            // function names are canonically lowercase (ASCII-only)
            let name = value.to_ascii_lowercase();

            if name == "url" {
                // An opening quote, possibly after whitespace, keeps this a
                // function token; the quoted string stays a separate token.
                let mut offset = 0;
                while matches!(self.stream.look_ahead(offset), Some(c) if is_whitespace(c)) {
                    offset += 1;
                }
                if matches!(self.stream.look_ahead(offset), Some('"' | '\'')) {
                    return Token::new_function(&name, loc);
                }

                return self.consume_url(loc);
            }

            return Token::new_function(&name, loc);
        }

        Token::new_ident(&value, loc)
    }

    /// 4.3.5. [Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string(&mut self) -> Token {
        let loc = self.stream.location();

        // consume the opening quote
        let quote = self.stream.read_and_next().unwrap();

        let mut value = String::new();
        loop {
            match self.stream.read() {
                None => {
                    return Token::new_error(ErrorKind::EofInString, loc);
                }
                Some(c) if c == quote => {
                    self.stream.next();
                    return Token::new_string(&value, quote, loc);
                }
                Some('\n') => {
                    // parse error; the newline is not consumed
                    return Token::new_error(ErrorKind::BadString, loc);
                }
                Some('\\') => match self.stream.look_ahead(1) {
                    None => {
                        // escaped EOF: drop the backslash, EOF handling follows
                        self.stream.next();
                    }
                    Some('\n') => {
                        // line continuation
                        self.stream.next_n(2);
                    }
                    _ => {
                        self.stream.next();
                        value.push(self.consume_escaped());
                    }
                },
                Some(c) => {
                    self.stream.next();
                    value.push(c);
                }
            }
        }
    }

    /// 4.3.6. [Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    ///
    /// Only called for the unquoted form; the stream is positioned after
    /// the `(` of `url(`.
    fn consume_url(&mut self, loc: Location) -> Token {
        let mut value = String::new();

        self.stream.consume_while(is_whitespace);

        loop {
            match self.stream.read() {
                None => {
                    return Token::new_error(ErrorKind::EofInUrl, loc);
                }
                Some(')') => {
                    self.stream.next();
                    return Token::new_url(&value, loc);
                }
                Some(c) if is_whitespace(c) => {
                    self.stream.consume_while(is_whitespace);
                    match self.stream.read() {
                        None => return Token::new_error(ErrorKind::EofInUrl, loc),
                        Some(')') => {
                            self.stream.next();
                            return Token::new_url(&value, loc);
                        }
                        _ => {
                            self.consume_bad_url_remnants();
                            return Token::new_error(ErrorKind::BadUrl, loc);
                        }
                    }
                }
                Some('"' | '\'' | '(') => {
                    self.consume_bad_url_remnants();
                    return Token::new_error(ErrorKind::BadUrl, loc);
                }
                Some(c) if is_non_printable(c) => {
                    self.consume_bad_url_remnants();
                    return Token::new_error(ErrorKind::BadUrl, loc);
                }
                Some('\\') => {
                    if self.is_valid_escape(0) {
                        self.stream.next();
                        value.push(self.consume_escaped());
                    } else {
                        self.consume_bad_url_remnants();
                        return Token::new_error(ErrorKind::BadUrl, loc);
                    }
                }
                Some(c) => {
                    self.stream.next();
                    value.push(c);
                }
            }
        }
    }

    /// 4.3.14. [Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    ///
    /// Consumes enough input to reach a recovery point where normal
    /// tokenizing can resume.
    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.stream.read() {
                None => return,
                Some(')') => {
                    self.stream.next();
                    return;
                }
                Some('\\') if self.is_valid_escape(0) => {
                    self.stream.next();
                    self.consume_escaped();
                }
                _ => self.stream.next(),
            }
        }
    }

    /// 4.3.7. [Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// The stream is positioned just after the backslash.
    fn consume_escaped(&mut self) -> char {
        match self.stream.read() {
            None => REPLACEMENT_CHARACTER,
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = String::new();
                while hex.len() < 6 {
                    match self.stream.read() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            self.stream.next();
                            hex.push(c);
                        }
                        _ => break,
                    }
                }

                // a single whitespace after the hex digits is part of the escape
                if matches!(self.stream.read(), Some(c) if is_whitespace(c)) {
                    self.stream.next();
                }

                let codepoint = u32::from_str_radix(&hex, 16).unwrap_or(0);
                match char::from_u32(codepoint) {
                    Some(c) if codepoint != 0 => c,
                    // NUL, surrogates and out-of-range codepoints
                    _ => REPLACEMENT_CHARACTER,
                }
            }
            Some(c) => {
                self.stream.next();
                c
            }
        }
    }

    /// 4.3.11. [Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    ///
    /// The caller must ensure the stream starts with an ident sequence.
    fn consume_name(&mut self) -> String {
        let mut value = String::new();

        loop {
            match self.stream.read() {
                Some(c) if is_name_char(c) => {
                    self.stream.next();
                    value.push(c);
                }
                Some('\\') if self.is_valid_escape(0) => {
                    self.stream.next();
                    value.push(self.consume_escaped());
                }
                _ => break,
            }
        }

        value
    }

    /// Consumes `u+` followed by hex digits, `?` wildcards or a `-` range
    fn consume_unicode_range(&mut self) -> Token {
        let loc = self.stream.location();

        // consume 'u+'
        self.stream.next_n(2);

        let mut start_hex = String::new();
        while start_hex.len() < 6 {
            match self.stream.read() {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.stream.next();
                    start_hex.push(c);
                }
                _ => break,
            }
        }

        let mut question_marks = 0;
        while start_hex.len() + question_marks < 6 && self.stream.read() == Some('?') {
            self.stream.next();
            question_marks += 1;
        }

        if question_marks > 0 {
            let start = format!("{}{}", start_hex, "0".repeat(question_marks));
            let end = format!("{}{}", start_hex, "F".repeat(question_marks));
            return Token::new(
                TokenType::UnicodeRange {
                    start: u32::from_str_radix(&start, 16).unwrap_or(0),
                    end: u32::from_str_radix(&end, 16).unwrap_or(0),
                },
                loc,
            );
        }

        let start = u32::from_str_radix(&start_hex, 16).unwrap_or(0);

        if self.stream.read() == Some('-')
            && matches!(self.stream.look_ahead(1), Some(c) if c.is_ascii_hexdigit())
        {
            // consume '-'
            self.stream.next();

            let mut end_hex = String::new();
            while end_hex.len() < 6 {
                match self.stream.read() {
                    Some(c) if c.is_ascii_hexdigit() => {
                        self.stream.next();
                        end_hex.push(c);
                    }
                    _ => break,
                }
            }

            let end = u32::from_str_radix(&end_hex, 16).unwrap_or(0);
            return Token::new(TokenType::UnicodeRange { start, end }, loc);
        }

        Token::new(TokenType::UnicodeRange { start, end: start }, loc)
    }

    fn is_name_char_at(&self, offset: usize) -> bool {
        matches!(self.stream.look_ahead(offset), Some(c) if is_name_char(c))
    }

    /// 4.3.8. [Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
    fn is_valid_escape(&self, offset: usize) -> bool {
        self.stream.look_ahead(offset) == Some('\\')
            && self.stream.look_ahead(offset + 1) != Some('\n')
    }

    /// 4.3.9. [Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_ident(&self, offset: usize) -> bool {
        match self.stream.look_ahead(offset) {
            Some('-') => {
                matches!(self.stream.look_ahead(offset + 1), Some(c) if is_name_start(c) || c == '-')
                    || self.is_valid_escape(offset + 1)
            }
            Some('\\') => self.is_valid_escape(offset),
            Some(c) => is_name_start(c),
            None => false,
        }
    }

    /// 4.3.10. [Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    fn would_start_number(&self) -> bool {
        match self.stream.look_ahead(0) {
            Some('+' | '-') => match self.stream.look_ahead(1) {
                Some('.') => matches!(self.stream.look_ahead(2), Some(c) if c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            },
            Some('.') => matches!(self.stream.look_ahead(1), Some(c) if c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }
}
