use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

/// Determine the character encoding of a CSS stylesheet and decode it.
///
/// This follows the `css-syntax` "decode from bytes" fallback chain: a BOM
/// wins, then the protocol encoding label (e.g. from a `Content-Type`
/// header), then an `@charset` rule at the very start of the bytes, then
/// the environment encoding, then UTF-8. Labels are resolved with the
/// WHATWG label registry. Malformed byte sequences decode to U+FFFD; this
/// function never fails.
///
/// Returns the decoded text together with the encoding that was used.
pub fn decode_stylesheet_bytes(
    css_bytes: &[u8],
    protocol_encoding: Option<&str>,
    environment_encoding: Option<&str>,
) -> (String, &'static Encoding) {
    if let Some(rest) = css_bytes.strip_prefix(b"\xEF\xBB\xBF".as_slice()) {
        return decode_with(rest, UTF_8);
    }
    if let Some(rest) = css_bytes.strip_prefix(b"\xFE\xFF".as_slice()) {
        return decode_with(rest, UTF_16BE);
    }
    if let Some(rest) = css_bytes.strip_prefix(b"\xFF\xFE".as_slice()) {
        return decode_with(rest, UTF_16LE);
    }

    if let Some(encoding) = protocol_encoding.and_then(lookup_label) {
        return decode_with(css_bytes, encoding);
    }

    if let Some(encoding) = charset_rule_label(css_bytes).and_then(|l| lookup_label(&l)) {
        // A stylesheet cannot start with an ASCII "@charset" rule and be
        // UTF-16 encoded at the same time.
        let encoding = if encoding == UTF_16BE || encoding == UTF_16LE {
            UTF_8
        } else {
            encoding
        };
        return decode_with(css_bytes, encoding);
    }

    if let Some(encoding) = environment_encoding.and_then(lookup_label) {
        return decode_with(css_bytes, encoding);
    }

    decode_with(css_bytes, UTF_8)
}

/// Extracts the encoding label of a leading `@charset "…";` rule, if any.
///
/// The match is byte-exact and ASCII-only: the bytes must start with
/// `@charset "`, and a closing `"` directly followed by `;` must appear
/// within the first 100 bytes.
fn charset_rule_label(css_bytes: &[u8]) -> Option<String> {
    const PREFIX: &[u8] = b"@charset \"";

    if !css_bytes.starts_with(PREFIX) {
        return None;
    }

    let window = &css_bytes[PREFIX.len()..css_bytes.len().min(100)];
    let quote = window.iter().position(|&b| b == b'"')?;
    if !css_bytes[PREFIX.len() + quote..].starts_with(b"\";") {
        return None;
    }

    // Labels are ASCII; map the bytes straight to chars.
    Some(window[..quote].iter().map(|&b| b as char).collect())
}

fn lookup_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> (String, &'static Encoding) {
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    (text.into_owned(), encoding)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn utf8_bom() {
        let (text, encoding) = decode_stylesheet_bytes(b"\xEF\xBB\xBFp{}", None, None);
        assert_eq!(text, "p{}");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn utf16_boms() {
        let (text, encoding) = decode_stylesheet_bytes(b"\xFE\xFF\x00p\x00{\x00}", None, None);
        assert_eq!(text, "p{}");
        assert_eq!(encoding, UTF_16BE);

        let (text, encoding) = decode_stylesheet_bytes(b"\xFF\xFEp\x00{\x00}\x00", None, None);
        assert_eq!(text, "p{}");
        assert_eq!(encoding, UTF_16LE);
    }

    #[test]
    fn protocol_encoding_wins_over_charset() {
        let bytes = b"@charset \"utf-8\"; a{}";
        let (_, encoding) = decode_stylesheet_bytes(bytes, Some("latin1"), None);
        assert_eq!(encoding.name(), "windows-1252");
    }

    #[test]
    fn charset_rule() {
        let bytes = b"@charset \"windows-1252\"; a{content:'\xe9'}";
        let (text, encoding) = decode_stylesheet_bytes(bytes, None, None);
        assert_eq!(encoding.name(), "windows-1252");
        assert!(text.contains('\u{00E9}'));
    }

    #[test]
    fn charset_utf16_label_is_rewritten_to_utf8() {
        let bytes = b"@charset \"utf-16le\"; a{}";
        let (text, encoding) = decode_stylesheet_bytes(bytes, None, None);
        assert_eq!(encoding, UTF_8);
        assert_eq!(text, "@charset \"utf-16le\"; a{}");
    }

    #[test]
    fn malformed_charset_rules_fall_through() {
        // Single quotes, wrong spacing and missing ';' do not count.
        for bytes in [
            b"@charset 'utf-8'; a{}".as_slice(),
            b"@charset\"utf-8\"; a{}".as_slice(),
            b"@charset \"utf-8\" a{}".as_slice(),
        ] {
            let (_, encoding) = decode_stylesheet_bytes(bytes, None, None);
            assert_eq!(encoding, UTF_8);
        }
    }

    #[test]
    fn unknown_charset_label_falls_through_to_environment() {
        let bytes = b"@charset \"no-such-encoding\"; a{}";
        let (_, encoding) = decode_stylesheet_bytes(bytes, None, Some("latin1"));
        assert_eq!(encoding.name(), "windows-1252");
    }

    #[test]
    fn utf8_fallback_replaces_malformed_bytes() {
        let (text, encoding) = decode_stylesheet_bytes(b"a\xFFb", None, None);
        assert_eq!(encoding, UTF_8);
        assert_eq!(text, "a\u{FFFD}b");
    }

    #[test]
    fn unknown_labels_are_ignored() {
        let (_, encoding) = decode_stylesheet_bytes(b"a{}", Some("bogus"), Some("bogus"));
        assert_eq!(encoding, UTF_8);
    }
}
