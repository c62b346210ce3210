//! Filter configuration.

use smallvec::SmallVec;

use crate::convert::Pandoc;

/// Div classes that mark a table container.
pub const DEFAULT_TABLE_CLASSES: &[&str] = &["ext", "divtable"];

/// Code block classes handled as minted listings.
pub const DEFAULT_LISTING_LANGUAGES: &[&str] = &["python", "bash", "sql"];

/// Code block class handled as a quotation.
pub const DEFAULT_BLOCKQUOTE_CLASS: &str = "blockquote";

/// Converter executable.
pub const DEFAULT_PANDOC: &str = "pandoc";

/// Arguments appended to every converter call.
pub const DEFAULT_PANDOC_ARGS: &[&str] = &["--biblatex"];

/// Environment variable overriding [`DEFAULT_PANDOC`].
pub const PANDOC_ENV: &str = "TEXWEAVE_PANDOC";

type Names = SmallVec<[String; 4]>;

fn names(list: &[&str]) -> Names {
    list.iter().map(|s| (*s).to_owned()).collect()
}

/// Settings shared by the filters and the converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_classes: Names,
    pub listing_languages: Names,
    pub blockquote_class: String,
    pub pandoc: String,
    pub pandoc_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_classes: names(DEFAULT_TABLE_CLASSES),
            listing_languages: names(DEFAULT_LISTING_LANGUAGES),
            blockquote_class: DEFAULT_BLOCKQUOTE_CLASS.to_owned(),
            pandoc: DEFAULT_PANDOC.to_owned(),
            pandoc_args: DEFAULT_PANDOC_ARGS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_listing_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.listing_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_blockquote_class(mut self, class: impl Into<String>) -> Self {
        self.blockquote_class = class.into();
        self
    }

    pub fn with_pandoc(mut self, program: impl Into<String>) -> Self {
        self.pandoc = program.into();
        self
    }

    pub fn with_pandoc_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pandoc_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Build the subprocess converter for these settings.
    pub fn converter(&self) -> Pandoc {
        Pandoc::new(self.pandoc.clone()).with_args(self.pandoc_args.iter().cloned())
    }
}
