use crate::node::{Node, NodeType};
use crate::parser::{next_significant, Input};

/// Parses `<An+B>`, as found in `:nth-child()` and related pseudo-classes.
///
/// The tokenizer splits the microsyntax in surprising ways (`2n+1` is a
/// dimension followed by a signed number, `n-2` is a single ident,
/// `3n-6` is a dimension with unit `n-6`), so every shape is matched on
/// component values. Surrounding whitespace and comments are ignored.
/// Returns `(a, b)`, or `None` for anything that is not valid `<An+B>`.
pub fn parse_nth<'i>(input: impl Into<Input<'i>>) -> Option<(i64, i64)> {
    log::trace!("parse_nth");

    let values = input.into().into_values(true);
    let mut values = values.into_iter();

    let token = next_significant(&mut values)?;
    match &*token.node_type {
        NodeType::Number {
            int_value: Some(b), ..
        } => parse_end(&mut values, 0, *b),
        NodeType::Dimension {
            int_value: Some(a),
            unit,
            ..
        } => {
            let a = *a;
            match unit.as_str() {
                "n" => parse_b(&mut values, a),
                "n-" => parse_signless_b(&mut values, a, -1),
                _ => parse_end(&mut values, a, parse_n_dash_digits(unit)?),
            }
        }
        NodeType::Ident { value } => {
            let ident = value.to_ascii_lowercase();
            match ident.as_str() {
                "even" => parse_end(&mut values, 2, 0),
                "odd" => parse_end(&mut values, 2, 1),
                "n" => parse_b(&mut values, 1),
                "-n" => parse_b(&mut values, -1),
                "n-" => parse_signless_b(&mut values, 1, -1),
                "-n-" => parse_signless_b(&mut values, -1, -1),
                _ => {
                    if let Some(rest) = ident.strip_prefix('-') {
                        parse_end(&mut values, -1, parse_n_dash_digits(rest)?)
                    } else {
                        parse_end(&mut values, 1, parse_n_dash_digits(&ident)?)
                    }
                }
            }
        }
        NodeType::Literal { value } if value == "+" => {
            // whitespace between '+' and the ident is invalid, so the next
            // node is taken without skipping
            let token = values.next()?;
            let NodeType::Ident { value } = &*token.node_type else {
                return None;
            };

            let ident = value.to_ascii_lowercase();
            match ident.as_str() {
                "n" => parse_b(&mut values, 1),
                "n-" => parse_signless_b(&mut values, 1, -1),
                _ => parse_end(&mut values, 1, parse_n_dash_digits(&ident)?),
            }
        }
        _ => None,
    }
}

/// Parses the `±B` part after `An`, or the end of the input
fn parse_b(values: &mut impl Iterator<Item = Node>, a: i64) -> Option<(i64, i64)> {
    let Some(token) = next_significant(values) else {
        return Some((a, 0));
    };

    if token.is_literal("+") {
        return parse_signless_b(values, a, 1);
    }
    if token.is_literal("-") {
        return parse_signless_b(values, a, -1);
    }

    match &*token.node_type {
        NodeType::Number {
            int_value: Some(b),
            representation,
            ..
        } if representation.starts_with(['-', '+']) => parse_end(values, a, *b),
        _ => None,
    }
}

/// Parses the integer after an explicit sign; its source text must not
/// carry a sign of its own
fn parse_signless_b(
    values: &mut impl Iterator<Item = Node>,
    a: i64,
    b_sign: i64,
) -> Option<(i64, i64)> {
    let token = next_significant(values)?;
    match &*token.node_type {
        NodeType::Number {
            int_value: Some(b),
            representation,
            ..
        } if !representation.starts_with(['-', '+']) => parse_end(values, a, b_sign * b),
        _ => None,
    }
}

fn parse_end(
    values: &mut impl Iterator<Item = Node>,
    a: i64,
    b: i64,
) -> Option<(i64, i64)> {
    match next_significant(values) {
        None => Some((a, b)),
        Some(_) => None,
    }
}

/// Matches `n-<digits>` and returns the (negative) integer
fn parse_n_dash_digits(text: &str) -> Option<i64> {
    let digits = text.strip_prefix("n-")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse::<i64>().ok().map(|b| -b)
}
