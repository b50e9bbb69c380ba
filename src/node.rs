use std::fmt;

use crate::Delimiters;


/// An element of a compiled template tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Literal(String),
    Variable(Variable),
    Section(Section),
    Inverted(Section),
    Comment(String),
    Partial(Partial),
    Root(Vec<Node>),
}

/// `{{name}}`, `{{{name}}}` or `{{&name}}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: String,
    pub escape: bool,
}

/// `{{#name}}...{{/name}}` or `{{^name}}...{{/name}}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub name: String,
    /// Source between the open and close tags, untrimmed.
    pub raw: String,
    pub children: Vec<Node>,
    /// Delimiters active at the open tag.
    pub delimiters: Delimiters,
}

/// `{{>name}}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Partial {
    pub name: String,
    /// Leading whitespace of a standalone partial tag, applied to each
    /// line of the included source.
    pub indent: Option<String>,
    /// Delimiters the including template started with. Tags changing the
    /// delimiters before `{{>name}}` do not carry over into the partial.
    pub delimiters: Delimiters,
}

impl Node {
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Variable(Variable { name, .. })
            | Node::Section(Section { name, .. })
            | Node::Inverted(Section { name, .. })
            | Node::Partial(Partial { name, .. }) => Some(name.as_str()),
            Node::Literal(_) | Node::Comment(_) | Node::Root(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Section(section) | Node::Inverted(section) => &section.children,
            Node::Root(children) => children,
            _ => &[],
        }
    }

    fn kind(&self) -> char {
        match self {
            Node::Literal(_) => 'L',
            Node::Variable(_) => 'V',
            Node::Section(_) => 'S',
            Node::Inverted(_) => 'I',
            Node::Comment(_) => 'C',
            Node::Partial(_) => 'P',
            Node::Root(_) => 'R',
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "{:indent$}[({}", "", self.kind(), indent = indent)?;
        match self {
            Node::Literal(text) | Node::Comment(text) => write!(f, ",{:?}", text)?,
            Node::Variable(variable) if !variable.escape => write!(f, ",{},raw", variable.name)?,
            Node::Section(section) | Node::Inverted(section) => write!(f, ",{},{:?}", section.name, section.raw)?,
            _ => {
                if let Some(name) = self.name() {
                    write!(f, ",{}", name)?;
                }
            }
        }
        write!(f, ")")?;
        for child in self.children() {
            writeln!(f)?;
            child.write_tree(f, indent + 4)?;
        }
        write!(f, "]")
    }
}

/// Prints the tree one node per line, children indented under their parent.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_dump() {
        let root = Node::Root(vec![
            Node::Literal("Hi ".to_owned()),
            Node::Section(Section {
                name: "people".to_owned(),
                raw: "{{name}}".to_owned(),
                children: vec![Node::Variable(Variable { name: "name".to_owned(), escape: true })],
                delimiters: Delimiters::default(),
            }),
            Node::Variable(Variable { name: "html".to_owned(), escape: false }),
            Node::Inverted(Section {
                name: "people".to_owned(),
                raw: "nobody".to_owned(),
                children: vec![Node::Literal("nobody".to_owned())],
                delimiters: Delimiters::default(),
            }),
            Node::Partial(Partial {
                name: "footer".to_owned(),
                indent: None,
                delimiters: Delimiters::default(),
            }),
        ]);
        assert_eq!(
            root.to_string(),
            "[(R)\n    [(L,\"Hi \")]\n    [(S,people,\"{{name}}\")\n        [(V,name)]]\n    [(V,html,raw)]\n    [(I,people,\"nobody\")\n        [(L,\"nobody\")]]\n    [(P,footer)]]"
        );
    }

    #[test]
    fn leaves_have_no_children() {
        assert!(Node::Literal("x".to_owned()).children().is_empty());
        assert_eq!(Node::Comment("x".to_owned()).name(), None);
    }
}
