//! A Mustache template compiler and renderer.
//!
//! Template source is compiled into a tree of [Node]s, which is then
//! rendered against a [ContextStack] of [Value]s, pulling partials from a
//! [PartialStore]. Behavior follows the Mustache [`specs`] for comments,
//! delimiters, interpolation, sections, inverted sections, partials and
//! lambdas.
//!
//! Variables are looked up from the innermost scope outwards, the way
//! javascript walks a prototype chain: entering a section pushes its value,
//! and names the section value lacks are found in the enclosing scopes.
//!
//! Partials and lambda results are template source themselves; they are
//! compiled when rendered, with a depth limit so that a partial including
//! itself fails with [Error::RecursionLimit] rather than overflowing the
//! stack. A missing partial renders as nothing unless
//! [RenderOptions::missing_partial] says otherwise.
//!
//!
//! # Samples
//!
//! ## Hello world
//!
//! ```
//! use mustachio::{Template, JsonValue, Value};
//!
//! let text = "hello, {{you}}!";
//! let data = r#"{
//!     "you": "world"
//! }"#;
//!
//! let template = Template::from(text).unwrap();
//! let context = Value::from(serde_json::from_str::<JsonValue>(data).unwrap());
//!
//! let result = template.render(&context).unwrap();
//!
//! assert_eq!(result, "hello, world!")
//! ```
//!
//! ## Hello team
//!
//! ```
//! use mustachio::{Template, YamlValue, Value};
//! let text = r#"
//!   {{#team}}
//!   hello, {{address}} {{name}}!
//!   {{/team}}
//! "#;
//! let data = r#"
//!   team:
//!     - name: john
//!       address: little
//!     - name: 42
//!       address: citizen
//! "#;
//!
//! let template = Template::from(text).unwrap();
//! let context = Value::from(serde_yaml::from_str::<YamlValue>(data).unwrap());
//!
//! let result = template.render(&context).unwrap();
//! assert_eq!(result, r#"
//!   hello, little john!
//!   hello, citizen 42!
//! "#);
//! ```
//!
//! ## Partials and lambdas
//!
//! ```
//! use std::collections::HashMap;
//! use mustachio::{render_with_partials, Value};
//!
//! let partials = HashMap::from([("user", "<li>{{name}}</li>")]);
//! let context: Value = [
//!     ("users", Value::from(vec![
//!         [("name", "ann")].into_iter().collect::<Value>(),
//!         [("name", "bob")].into_iter().collect::<Value>(),
//!     ])),
//!     ("upper", Value::lambda1(|text| text.to_uppercase())),
//! ].into_iter().collect();
//!
//! let result = render_with_partials(
//!     "<ul>{{#users}}{{>user}}{{/users}}</ul>{{#upper}}done{{/upper}}",
//!     &context,
//!     &partials,
//! ).unwrap();
//! assert_eq!(result, "<ul><li>ann</li><li>bob</li></ul>DONE");
//! ```
//!
//!
//! [`specs`]: https://github.com/mustache/spec
mod context;
mod delimiters;
mod error;
mod json;
mod node;
mod options;
mod reader;
mod render;
mod template;
mod value;
mod yaml;

pub use self::context::ContextStack;
pub use self::delimiters::Delimiters;
pub use self::error::{Error, SyntaxError};
pub use self::json::JsonValue;
pub use self::node::{Node, Partial, Section, Variable};
pub use self::options::{MissingPartial, RenderOptions, DEFAULT_RECURSION_LIMIT};
pub use self::template::{compile, NoPartials, PartialStore, Template};
pub use self::value::{Lambda, Value};
pub use self::yaml::YamlValue;


/// Compile and render `template` against `context`, without partials.
pub fn render<'a>(template: &str, context: impl Into<ContextStack<'a>>) -> Result<String, Error> {
    render_with_options(template, context, &NoPartials, &RenderOptions::default())
}

/// Compile and render `template` against `context`, including partials
/// from `partials`.
pub fn render_with_partials<'a>(
    template: &str, context: impl Into<ContextStack<'a>>, partials: &dyn PartialStore,
) -> Result<String, Error> {
    render_with_options(template, context, partials, &RenderOptions::default())
}

/// Compile `template` under `options.delimiters` and render it.
pub fn render_with_options<'a>(
    template: &str, context: impl Into<ContextStack<'a>>, partials: &dyn PartialStore, options: &RenderOptions,
) -> Result<String, Error> {
    Template::with_delimiters(template, &options.delimiters)?
        .render_with_options(context, partials, options)
}
