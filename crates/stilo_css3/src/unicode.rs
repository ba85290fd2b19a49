//! Codepoint classification as defined by css-syntax.

/// CSS whitespace: after preprocessing only LF, TAB and SPACE remain
pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ')
}

/// [ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
pub(crate) fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
pub(crate) fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

/// [non-printable code point](https://www.w3.org/TR/css-syntax-3/#non-printable-code-point)
pub(crate) fn is_non_printable(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{0008}' | '\u{000B}' | '\u{000E}'..='\u{001F}' | '\u{007F}')
}

/// Control codepoints that must be hex-escaped when serializing
pub(crate) fn is_control(c: char) -> bool {
    matches!(c, '\u{0001}'..='\u{001F}' | '\u{007F}')
}
