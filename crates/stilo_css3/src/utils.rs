use crate::node::Node;

/// Removes leading and trailing whitespace nodes from a slice
#[must_use]
pub fn strip_whitespace(nodes: &[Node]) -> &[Node] {
    let Some(start) = nodes.iter().position(|node| !node.is_whitespace()) else {
        return &[];
    };
    let end = nodes
        .iter()
        .rposition(|node| !node.is_whitespace())
        .map_or(nodes.len(), |i| i + 1);

    &nodes[start..end]
}

/// Splits a component-value list on top-level comma literals, stripping
/// whitespace from each part
#[must_use]
pub fn split_on_comma(nodes: &[Node]) -> Vec<&[Node]> {
    let mut parts = Vec::new();
    let mut rest = nodes;

    while let Some(position) = rest.iter().position(|node| node.is_literal(",")) {
        parts.push(strip_whitespace(&rest[..position]));
        rest = &rest[position + 1..];
    }
    parts.push(strip_whitespace(rest));

    parts
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::component_values::parse_component_value_list;

    #[test]
    fn strip() {
        let values = parse_component_value_list("  a b  ", false);
        let stripped = strip_whitespace(&values);
        assert_eq!(stripped.len(), 3);
        assert!(stripped[0].is_ident());
        assert!(stripped[2].is_ident());

        assert!(strip_whitespace(&parse_component_value_list("   ", false)).is_empty());
        assert!(strip_whitespace(&[]).is_empty());
    }

    #[test]
    fn split() {
        let values = parse_component_value_list("a, b c , ", false);
        let parts = split_on_comma(&values);

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 1);
        assert_eq!(parts[1].len(), 3);
        assert!(parts[2].is_empty());

        // a comma inside a function does not split
        let values = parse_component_value_list("rgb(1, 2, 3)", false);
        assert_eq!(split_on_comma(&values).len(), 1);
    }
}
