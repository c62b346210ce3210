//! Literal output templates.
//!
//! Templates are Jinja rendered by `minijinja`. LaTeX is full of `{}` and
//! `%`, so the delimiters are changed:
//!
//! - `<< name >>` substitutes a value (missing values render as nothing)
//! - `<% if name %>` ... `<% else %>` ... `<% endif %>` for conditionals
//! - `<# ... #>` for comments
//!
//! Whitespace is kept as written. Repeated parts (table rows) are rendered by
//! the caller and passed in as a single value.

use std::collections::BTreeMap;

use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, Value};
use smallvec::SmallVec;

/// Template errors: bad syntax or a failed render.
pub type TemplateError = minijinja::Error;

fn environment() -> Result<Environment<'static>, TemplateError> {
    let syntax = SyntaxConfig::builder()
        .block_delimiters("<%", "%>")
        .variable_delimiters("<<", ">>")
        .comment_delimiters("<#", "#>")
        .build()?;
    let mut env = Environment::new();
    env.set_syntax(syntax);
    Ok(env)
}

/// Named values for one template rendering.
#[derive(Debug, Clone, Default)]
pub struct Values {
    entries: SmallVec<[(&'static str, Value); 8]>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text value.
    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.entries.push((name, Value::from(value.into())));
        self
    }

    /// Set a text value if present; absent values stay undefined.
    pub fn opt<V: Into<String>>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    /// Set a boolean flag.
    pub fn flag(mut self, name: &'static str, on: bool) -> Self {
        self.entries.push((name, Value::from(on)));
        self
    }

    /// Later values win.
    fn context(&self) -> BTreeMap<&'static str, &Value> {
        self.entries.iter().map(|(name, value)| (*name, value)).collect()
    }
}

/// A fixed output template.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    source: &'static str,
}

impl Template {
    pub const fn new(source: &'static str) -> Self {
        Self { source }
    }

    /// Render with `values`.
    pub fn render(&self, values: &Values) -> Result<String, TemplateError> {
        environment()?.render_str(self.source, values.context())
    }
}
