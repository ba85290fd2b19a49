use crate::node::{Node, NodeType};
use std::io::Write;

/// The walker prints an indented dump of a node tree, mainly for
/// debugging parser output.
pub struct Walker<'a> {
    nodes: &'a [Node],
}

impl<'a> Walker<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self { nodes }
    }

    pub fn walk_stdout(&self) {
        let _ = self.walk(&mut std::io::stdout());
    }

    pub fn walk_to_string(&self) -> String {
        let mut output: Vec<u8> = Vec::new();
        let _ = self.walk(&mut output);

        String::from_utf8_lossy(&output).into_owned()
    }

    fn walk(&self, f: &mut dyn Write) -> std::io::Result<()> {
        for node in self.nodes {
            walk_node(node, 0, f)?;
        }
        Ok(())
    }
}

fn walk_list(nodes: &[Node], depth: usize, f: &mut dyn Write) -> std::io::Result<()> {
    for node in nodes {
        walk_node(node, depth, f)?;
    }
    Ok(())
}

fn walk_node(node: &Node, depth: usize, f: &mut dyn Write) -> std::io::Result<()> {
    let prefix = " ".repeat(depth * 2);

    match &*node.node_type {
        NodeType::QualifiedRule { prelude, content } => {
            writeln!(f, "{prefix}[QualifiedRule]")?;
            walk_list(prelude, depth + 1, f)?;
            walk_list(content, depth + 1, f)?;
        }
        NodeType::AtRule {
            name,
            prelude,
            content,
        } => {
            writeln!(f, "{prefix}[AtRule] name: {name}")?;
            walk_list(prelude, depth + 1, f)?;
            if let Some(content) = content {
                walk_list(content, depth + 1, f)?;
            }
        }
        NodeType::Declaration {
            name, value, important, ..
        } => {
            writeln!(f, "{prefix}[Declaration] name: {name} important: {important}")?;
            walk_list(value, depth + 1, f)?;
        }
        NodeType::ParenthesesBlock { content } => {
            writeln!(f, "{prefix}[ParenthesesBlock]")?;
            walk_list(content, depth + 1, f)?;
        }
        NodeType::SquareBracketsBlock { content } => {
            writeln!(f, "{prefix}[SquareBracketsBlock]")?;
            walk_list(content, depth + 1, f)?;
        }
        NodeType::CurlyBracketsBlock { content } => {
            writeln!(f, "{prefix}[CurlyBracketsBlock]")?;
            walk_list(content, depth + 1, f)?;
        }
        NodeType::Function { name, arguments } => {
            writeln!(f, "{prefix}[Function] name: {name}")?;
            walk_list(arguments, depth + 1, f)?;
        }
        NodeType::Whitespace { .. } => {
            writeln!(f, "{prefix}[Whitespace]")?;
        }
        NodeType::Literal { value } => {
            writeln!(f, "{prefix}[Literal] {value}")?;
        }
        NodeType::Ident { value } => {
            writeln!(f, "{prefix}[Ident] {value}")?;
        }
        NodeType::AtKeyword { value } => {
            writeln!(f, "{prefix}[AtKeyword] {value}")?;
        }
        NodeType::Hash {
            value,
            is_identifier,
        } => {
            writeln!(f, "{prefix}[Hash] {value} id: {is_identifier}")?;
        }
        NodeType::QuotedString { value, .. } => {
            writeln!(f, "{prefix}[String] {value:?}")?;
        }
        NodeType::Url { value } => {
            writeln!(f, "{prefix}[Url] {value}")?;
        }
        NodeType::Number { representation, .. } => {
            writeln!(f, "{prefix}[Number] {representation}")?;
        }
        NodeType::Percentage { representation, .. } => {
            writeln!(f, "{prefix}[Percentage] {representation}%")?;
        }
        NodeType::Dimension {
            representation,
            unit,
            ..
        } => {
            writeln!(f, "{prefix}[Dimension] {representation}{unit}")?;
        }
        NodeType::UnicodeRange { start, end } => {
            writeln!(f, "{prefix}[UnicodeRange] U+{start:X}-{end:X}")?;
        }
        NodeType::Comment { value } => {
            writeln!(f, "{prefix}[Comment] {value:?}")?;
        }
        NodeType::Error { kind, message } => {
            writeln!(f, "{prefix}[Error] {kind}: {message}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::stylesheet::parse_stylesheet;

    #[test]
    fn walks_a_stylesheet() {
        let rules = parse_stylesheet("a { color: red }", false, true);
        let dump = Walker::new(&rules).walk_to_string();

        assert!(dump.starts_with("[QualifiedRule]"));
        assert!(dump.contains("[Ident] a"));
        assert!(dump.contains("[Ident] color"));
    }
}
