//! Attribute system for document elements
//!
//! Pandoc attaches `(identifier, classes, key-value pairs)` to spans, divs,
//! headers, code blocks, images and tables. Key-value pairs stay a plain
//! `Vec<(String, String)>`: lookups are linear, which is fine for the handful
//! of attributes an element carries.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Key-value attributes in source order.
pub type Attrs = Vec<(String, String)>;

/// Class list. Most elements carry zero to two classes.
pub type Classes = SmallVec<[String; 4]>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| k == &name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }
}

// =============================================================================
// Attr
// =============================================================================

/// Element attributes: identifier, classes and key-value pairs.
///
/// Serialized the way pandoc does it, as `[identifier, [classes], [[k, v]]]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AttrRepr", into = "AttrRepr")]
pub struct Attr {
    pub identifier: String,
    pub classes: Classes,
    pub attributes: Attrs,
}

#[derive(Serialize, Deserialize)]
struct AttrRepr(String, Classes, Attrs);

impl From<AttrRepr> for Attr {
    fn from(AttrRepr(identifier, classes, attributes): AttrRepr) -> Self {
        Self {
            identifier,
            classes,
            attributes,
        }
    }
}

impl From<Attr> for AttrRepr {
    fn from(attr: Attr) -> Self {
        AttrRepr(attr.identifier, attr.classes, attr.attributes)
    }
}

impl Attr {
    /// Empty attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the identifier.
    pub fn with_id(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Builder: add a class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Builder: add or replace a key-value attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set_attr(name, value);
        self
    }

    /// Check class membership.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Check whether any of `classes` is present.
    pub fn has_any_class<S: AsRef<str>>(&self, classes: &[S]) -> bool {
        classes.iter().any(|c| self.has_class(c.as_ref()))
    }

    /// Get a key-value attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get_attr(name)
    }

    /// Identifier, or `None` when empty.
    pub fn id(&self) -> Option<&str> {
        (!self.identifier.is_empty()).then_some(self.identifier.as_str())
    }
}

// =============================================================================
// Attribute schemas
// =============================================================================

/// Declare a closed set of optional string attributes read from an [`Attr`].
///
/// Each field maps to the attribute of the same name (or an explicit `= "key"`).
/// Empty values count as absent; unknown attributes are ignored.
///
/// ```ignore
/// attr_schema! {
///     pub struct ImageAttrs {
///         short,
///         placement,
///         width,
///     }
/// }
/// ```
#[macro_export]
macro_rules! attr_schema {
    (@key $field:ident $key:literal) => { $key };
    (@key $field:ident) => { stringify!($field) };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($field:ident $(= $key:literal)?),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        $vis struct $name {
            $(pub $field: Option<String>,)*
        }

        impl $name {
            /// Read the recognized attributes from `attr`.
            pub fn from_attr(attr: &$crate::attr::Attr) -> Self {
                Self {
                    $($field: attr
                        .get($crate::attr_schema!(@key $field $($key)?))
                        .filter(|v| !v.is_empty())
                        .map(str::to_owned),)*
                }
            }
        }
    };
}

// =============================================================================
// Tests
// =============================================================================
