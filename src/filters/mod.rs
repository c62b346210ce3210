//! The concrete filters and their registry.
//!
//! | Name | Matches | Formats |
//! |------|---------|---------|
//! | `allcaps` | Span `.allcaps` | latex |
//! | `refspans` | Span `.ref` | latex |
//! | `glossary` | Span `.ac` / `.gl` | latex |
//! | `textquote` | Span `.textquote` | latex |
//! | `unnumbered` | Header `.unnumbered` | latex |
//! | `figures` | Image, Figure around one Image | latex |
//! | `tables` | Table inside a container Div | latex |
//! | `listings` | CodeBlock of a listing language | latex, html |
//! | `blockquotes` | CodeBlock `.blockquote` | latex |

mod allcaps;
mod blockquotes;
mod fenced;
mod figures;
mod glossary;
mod listings;
mod refspans;
mod tables;
mod textquote;
mod unnumbered;

pub use self::allcaps::AllCaps;
pub use self::blockquotes::BlockQuotes;
pub use self::fenced::split_header;
pub use self::figures::Figures;
pub use self::glossary::{Abbreviation, Glossary, GlossaryEntry};
pub use self::listings::Listings;
pub use self::refspans::RefSpans;
pub use self::tables::Tables;
pub use self::textquote::TextQuote;
pub use self::unnumbered::Unnumbered;

use crate::config::Config;
use crate::error::{FilterError, FilterResult};
use crate::transform::Filter;

/// Registered filter names, in default run order.
pub const NAMES: &[&str] = &[
    "allcaps",
    "refspans",
    "glossary",
    "textquote",
    "unnumbered",
    "figures",
    "tables",
    "listings",
    "blockquotes",
];

/// Instantiate the filter registered as `name`.
pub fn by_name(name: &str, config: &Config) -> FilterResult<Box<dyn Filter>> {
    let filter: Box<dyn Filter> = match name {
        "allcaps" => Box::new(AllCaps),
        "refspans" => Box::new(RefSpans),
        "glossary" => Box::new(Glossary::new()),
        "textquote" => Box::new(TextQuote),
        "unnumbered" => Box::new(Unnumbered),
        "figures" => Box::new(Figures),
        "tables" => Box::new(Tables::new(config.table_classes.iter().cloned())),
        "listings" => Box::new(Listings::new(config.listing_languages.iter().cloned())),
        "blockquotes" => Box::new(BlockQuotes::new(config.blockquote_class.clone())),
        other => return Err(FilterError::UnknownFilter(other.to_owned(), NAMES.join(", "))),
    };
    Ok(filter)
}

/// Every registered filter, in default run order.
pub fn all(config: &Config) -> Vec<Box<dyn Filter>> {
    NAMES
        .iter()
        .filter_map(|name| by_name(name, config).ok())
        .collect()
}

/// Convert a width percentage to a text-width factor.
///
/// `"70%"` and `"70"` both give `0.7`. Only positive finite numbers are
/// widths.
pub fn parse_width(value: &str) -> FilterResult<f64> {
    let number = value.trim().trim_end_matches('%').trim();
    let percent: f64 = number
        .parse()
        .map_err(|source| FilterError::invalid_width(value, source))?;
    if !percent.is_finite() || percent <= 0.0 {
        return Err(FilterError::invalid_width(value, "not a positive percentage"));
    }
    Ok(percent / 100.0)
}

/// [`parse_width`] for an optional attribute.
pub(crate) fn width_factor(value: Option<&str>) -> FilterResult<Option<f64>> {
    value.map(parse_width).transpose()
}

/// A width factor as printed in LaTeX lengths.
pub(crate) fn print_factor(factor: f64) -> String {
    format!("{factor:.2}")
}
