use std::borrow::Cow;

use tracing::{debug, trace};

use crate::context::ContextStack;
use crate::node::{Node, Partial, Section, Variable};
use crate::template::{compile, PartialStore};
use crate::{Delimiters, Error, MissingPartial, RenderOptions, Value};


/// Walks a compiled tree, producing its output for a context stack.
///
/// Partials and lambda output are compiled on the fly and rendered by a
/// renderer one level deeper, up to the configured recursion limit.
#[derive(Clone, Copy)]
pub(crate) struct Renderer<'r> {
    partials: &'r dyn PartialStore,
    options: &'r RenderOptions,
    depth: usize,
}

impl<'r> Renderer<'r> {
    pub(crate) fn new(partials: &'r dyn PartialStore, options: &'r RenderOptions) -> Self {
        Renderer { partials, options, depth: 0 }
    }

    pub(crate) fn render(&self, node: &Node, stack: &mut ContextStack<'_>) -> Result<String, Error> {
        match node {
            Node::Literal(text) => Ok(text.clone()),
            Node::Comment(_) => Ok(String::new()),
            Node::Root(children) => self.render_nodes(children, stack),
            Node::Variable(variable) => self.render_variable(variable, stack),
            Node::Section(section) => self.render_section(section, stack),
            Node::Inverted(section) => self.render_inverted(section, stack),
            Node::Partial(partial) => self.render_partial(partial, stack),
        }
    }

    fn render_nodes(&self, nodes: &[Node], stack: &mut ContextStack<'_>) -> Result<String, Error> {
        Ok(nodes.iter()
            .map(|node| self.render(node, stack))
            .collect::<Result<Vec<_>, _>>()?
            .concat())
    }

    fn render_variable(&self, variable: &Variable, stack: &mut ContextStack<'_>) -> Result<String, Error> {
        let text = match stack.lookup(&variable.name) {
            Some(Value::Lambda(lambda)) => {
                trace!(name = %variable.name, "calling lambda");
                self.render_source(&lambda.call(None), &Delimiters::default(), stack)?
            },
            Some(value) => value.to_text(),
            None => String::new(),
        };
        Ok(if variable.escape { html_escape(&text) } else { text })
    }

    fn render_section<'a>(&self, section: &Section, stack: &mut ContextStack<'a>) -> Result<String, Error> {
        let value = match stack.lookup(&section.name) {
            Some(value) if !value.is_falsy() => value,
            _ => return Ok(String::new()),
        };
        match value {
            Value::List(items) => Ok(items.iter()
                .map(|item| stack.with_frame(item, |stack| self.render_nodes(&section.children, stack)))
                .collect::<Result<Vec<_>, _>>()?
                .concat()),
            Value::Lambda(lambda) => {
                trace!(name = %section.name, "calling section lambda");
                self.render_source(&lambda.call(Some(section.raw.as_str())), &section.delimiters, stack)
            },
            _ => stack.with_frame(value, |stack| self.render_nodes(&section.children, stack)),
        }
    }

    fn render_inverted(&self, section: &Section, stack: &mut ContextStack<'_>) -> Result<String, Error> {
        match stack.lookup(&section.name) {
            Some(value) if !value.is_falsy() => Ok(String::new()),
            _ => self.render_nodes(&section.children, stack),
        }
    }

    fn render_partial(&self, partial: &Partial, stack: &mut ContextStack<'_>) -> Result<String, Error> {
        let Some(source) = self.partials.get(&partial.name) else {
            return match self.options.missing_partial {
                MissingPartial::Empty => {
                    debug!(name = %partial.name, "partial not found, rendering nothing");
                    Ok(String::new())
                },
                MissingPartial::Error => Err(Error::MissingPartial { name: partial.name.clone() }),
            };
        };
        trace!(name = %partial.name, depth = self.depth, "expanding partial");
        let source = match partial.indent.as_deref() {
            Some(indent) if !indent.is_empty() => Cow::Owned(indent_lines(source, indent)),
            _ => Cow::Borrowed(source),
        };
        self.render_source(&source, &partial.delimiters, stack)
    }

    /// Compile and render template source produced while rendering.
    fn render_source(
        &self, source: &str, delimiters: &Delimiters, stack: &mut ContextStack<'_>,
    ) -> Result<String, Error> {
        let depth = self.depth + 1;
        if depth > self.options.recursion_limit {
            return Err(Error::RecursionLimit { limit: self.options.recursion_limit });
        }
        let root = compile(source, delimiters)?;
        Renderer { depth, ..*self }.render(&root, stack)
    }
}


// Prefix every line of `source` with `indent`.
fn indent_lines(source: &str, indent: &str) -> String {
    source.split_inclusive('\n')
        .map(|line| format!("{}{}", indent, line))
        .collect::<String>()
}

pub(crate) fn html_escape(input: &str) -> String {
    input.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
