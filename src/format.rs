//! Target output formats.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Output markup language of a pass, and format tag of raw fragments.
///
/// Pandoc passes the writer name as the first argument to a JSON filter;
/// anything other than `latex` and `html` is kept verbatim in `Other`.
///
/// Defaults to `html`, pandoc's default writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Format {
    Latex,
    #[default]
    Html,
    Other(CompactString),
}

impl Format {
    pub fn as_str(&self) -> &str {
        match self {
            Format::Latex => "latex",
            Format::Html => "html",
            Format::Other(name) => name,
        }
    }

    pub fn is_latex(&self) -> bool {
        matches!(self, Format::Latex)
    }

    pub fn is_html(&self) -> bool {
        matches!(self, Format::Html)
    }
}

impl From<&str> for Format {
    fn from(name: &str) -> Self {
        match name {
            "latex" => Format::Latex,
            "html" => Format::Html,
            other => Format::Other(CompactString::from(other)),
        }
    }
}

impl From<String> for Format {
    fn from(name: String) -> Self {
        Format::from(name.as_str())
    }
}

impl From<Format> for String {
    fn from(format: Format) -> Self {
        format.as_str().to_owned()
    }
}

impl FromStr for Format {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Format::from(s))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
