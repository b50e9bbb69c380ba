use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use tracing::{debug, trace};

use crate::context::ContextStack;
use crate::node::{Node, Partial, Section, Variable};
use crate::reader::{is_inline_space, Reader, Token};
use crate::render::Renderer;
use crate::{Delimiters, Error, JsonValue, RenderOptions, SyntaxError, YamlValue};


/// A compiled template, ready to be rendered any number of times.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    root: Node,
}

impl Template {
    pub fn from(input: &str) -> Result<Self, SyntaxError> {
        Template::with_delimiters(input, &Delimiters::default())
    }

    pub fn with_delimiters(input: &str, delimiters: &Delimiters) -> Result<Self, SyntaxError> {
        Ok(Template { root: compile(input, delimiters)? })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn render<'a>(&self, context: impl Into<ContextStack<'a>>) -> Result<String, Error> {
        self.render_with_options(context, &NoPartials, &RenderOptions::default())
    }

    pub fn render_with_partials<'a>(
        &self, context: impl Into<ContextStack<'a>>, partials: &dyn PartialStore,
    ) -> Result<String, Error> {
        self.render_with_options(context, partials, &RenderOptions::default())
    }

    /// Render with explicit options. The template is already compiled, so
    /// `options.delimiters` only matters to sources compiled on the way.
    pub fn render_with_options<'a>(
        &self, context: impl Into<ContextStack<'a>>, partials: &dyn PartialStore, options: &RenderOptions,
    ) -> Result<String, Error> {
        let mut stack = context.into();
        Renderer::new(partials, options).render(&self.root, &mut stack)
    }

    /// Raw source of the section at `path`, dot-separated from the
    /// outermost section, e.g. `"list.item"`.
    pub fn section_text(&self, path: &str) -> Option<&str> {
        find_section(self.root.children(), path)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}

fn find_section<'t>(nodes: &'t [Node], path: &str) -> Option<&'t str> {
    nodes.iter().find_map(|node| match node {
        Node::Section(section) | Node::Inverted(section) => {
            if section.name == path {
                Some(section.raw.as_str())
            } else {
                path.strip_prefix(section.name.as_str())
                    .and_then(|rest| rest.strip_prefix('.'))
                    .and_then(|rest| find_section(&section.children, rest))
            }
        },
        _ => None,
    })
}


/// A section opened but not yet closed.
struct OpenSection<'a> {
    name: &'a str,
    inverted: bool,
    body_start: usize,
    delimiters: Delimiters,
    siblings: Vec<Node>,
}

impl<'a> OpenSection<'a> {
    /// Open a section whose body starts at `body_start`, setting aside the
    /// nodes emitted so far until it closes.
    fn new(
        name: &'a str, inverted: bool, body_start: usize, delimiters: &Delimiters, nodes: &mut Vec<Node>,
    ) -> Self {
        OpenSection {
            name,
            inverted,
            body_start,
            delimiters: delimiters.clone(),
            siblings: mem::take(nodes),
        }
    }
}

/// Compile `input` into a tree rooted at a [`Node::Root`].
pub fn compile(input: &str, delimiters: &Delimiters) -> Result<Node, SyntaxError> {
    let mut reader = Reader::new(input, delimiters)?;
    let mut active = delimiters.clone();
    let mut nodes = Vec::new();
    let mut open: Vec<OpenSection> = Vec::new();

    while let Some((text, tag)) = reader.pop_front() {
        let token = tag.token()?;
        let standalone = if token.may_stand_alone(!open.is_empty()) {
            reader.standalone(&tag)
        } else {
            None
        };
        let text = match standalone {
            Some(_) => text.trim_end_matches(is_inline_space),
            None => text,
        };
        if !text.is_empty() {
            nodes.push(Node::Literal(text.to_owned()));
        }

        match token {
            Token::Value(name, escape) => {
                nodes.push(Node::Variable(Variable { name: name.to_owned(), escape }))
            },
            Token::Comment(text) => {
                nodes.push(Node::Comment(text.to_owned()))
            },
            Token::Partial(name) => {
                // partials start over from the delimiters the template started with
                nodes.push(Node::Partial(Partial {
                    name: name.to_owned(),
                    indent: standalone.as_ref().map(|line| line.indent.to_owned()),
                    delimiters: delimiters.clone(),
                }))
            },
            Token::Section(name) => {
                open.push(OpenSection::new(name, false, tag.end, &active, &mut nodes))
            },
            Token::InvertedSection(name) => {
                open.push(OpenSection::new(name, true, tag.end, &active, &mut nodes))
            },
            Token::EndSection(name) => {
                let section = open.pop().ok_or_else(|| SyntaxError::UnopenedSection {
                    tag: tag.source.to_owned(),
                })?;
                if section.name != name {
                    return Err(SyntaxError::MismatchedSection {
                        expected: section.name.to_owned(),
                        tag: tag.source.to_owned(),
                    });
                }
                let children = mem::replace(&mut nodes, section.siblings);
                let body = Section {
                    name: name.to_owned(),
                    raw: reader.slice(section.body_start, tag.start).to_owned(),
                    children,
                    delimiters: section.delimiters,
                };
                nodes.push(if section.inverted { Node::Inverted(body) } else { Node::Section(body) });
            },
            Token::Delimiters(next) => {
                trace!(delimiters = %next, "delimiters changed");
                reader.set_delimiters(&next)?;
                active = next;
            },
        }

        if let Some(line) = standalone {
            reader.skip_to(line.end);
        }
    }

    if let Some(section) = open.pop() {
        return Err(SyntaxError::UnclosedSection { name: section.name.to_owned() });
    }
    let rest = reader.rest();
    if !rest.is_empty() {
        nodes.push(Node::Literal(rest.to_owned()));
    }
    debug!(source_len = input.len(), nodes = nodes.len(), "compiled template");
    Ok(Node::Root(nodes))
}


/// Source of the partials a template may include, by name.
pub trait PartialStore {
    fn get(&self, name: &str) -> Option<&str>;
}

/// A store without partials.
pub struct NoPartials;

impl PartialStore for NoPartials {
    fn get(&self, _name: &str) -> Option<&str> {
        None
    }
}

impl<K, V, S> PartialStore for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn get(&self, name: &str) -> Option<&str> {
        HashMap::get(self, name).map(AsRef::as_ref)
    }
}

impl<K, V> PartialStore for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn get(&self, name: &str) -> Option<&str> {
        BTreeMap::get(self, name).map(AsRef::as_ref)
    }
}

impl PartialStore for JsonValue {
    fn get(&self, name: &str) -> Option<&str> {
        JsonValue::get(self, name).and_then(JsonValue::as_str)
    }
}

impl PartialStore for YamlValue {
    fn get(&self, name: &str) -> Option<&str> {
        YamlValue::get(self, name).and_then(YamlValue::as_str)
    }
}
