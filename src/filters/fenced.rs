//! Code blocks with a YAML option header.
//!
//! ```text
//! caption: Gradient descent
//! floating: true
//! ...
//! def gradient_descent(X, y):
//! ```
//!
//! The header ends at the first line made only of three or more `.` or `-`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use tracing::warn;

fn is_separator(line: &str) -> bool {
    let line = line.trim_end_matches('\r');
    line.len() >= 3 && (line.bytes().all(|b| b == b'.') || line.bytes().all(|b| b == b'-'))
}

/// Split block text into YAML header and body.
///
/// `None` if there is no separator line.
pub fn split_header(code: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in code.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        if is_separator(content) {
            let header = &code[..offset];
            let body = &code[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }
    None
}

/// Parse the header of `code` into `T`.
///
/// Returns `None` (and logs) if there is no header or it is not valid YAML
/// for `T`; the block should then be left alone.
pub(crate) fn parse<T>(code: &str) -> Option<(T, &str)>
where
    T: DeserializeOwned + Default,
{
    let (header, body) = split_header(code)?;
    if header.trim().is_empty() {
        return Some((T::default(), body));
    }
    match serde_yaml::from_str(header) {
        Ok(options) => Some((options, body)),
        Err(err) => {
            warn!(error = %err, "ignoring code block with malformed YAML header");
            None
        }
    }
}

/// Flatten a YAML scalar or flow sequence back to text.
///
/// `cite: [@doe, 13]` would otherwise be a sequence, but is meant as the
/// markdown citation `[@doe, 13]`.
fn flatten(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten).collect();
            Some(format!("[{}]", parts.join(", ")))
        }
        Value::Mapping(_) => None,
        Value::Tagged(tagged) => flatten(&tagged.value),
    }
}

/// `deserialize_with` helper: any scalar as an optional string.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(flatten(&value).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "text")]
        caption: Option<String>,
        floating: Option<bool>,
    }

    #[test]
    fn test_split_header() {
        assert_eq!(split_header("a: 1\n...\nbody\n"), Some(("a: 1\n", "body\n")));
        assert_eq!(split_header("a: 1\n-----\nx"), Some(("a: 1\n", "x")));
        assert_eq!(split_header("---\nx"), Some(("", "x")));
        assert_eq!(split_header("a: 1\n..\nx"), None);
        assert_eq!(split_header("print('...')"), None);
    }

    #[test]
    fn test_parse_header() {
        let (sample, body) = parse::<Sample>("caption: Hello *world*\nfloating: True\n...\ncode").unwrap();
        assert_eq!(sample.caption.as_deref(), Some("Hello *world*"));
        assert_eq!(sample.floating, Some(true));
        assert_eq!(body, "code");
    }

    #[test]
    fn test_numbers_and_sequences_flatten() {
        let (sample, _) = parse::<Sample>("caption: [doe, 13]\n...\n").unwrap();
        assert_eq!(sample.caption.as_deref(), Some("[doe, 13]"));
        let (sample, _) = parse::<Sample>("caption: 42\n...\n").unwrap();
        assert_eq!(sample.caption.as_deref(), Some("42"));
    }

    #[test]
    fn test_malformed_header_is_rejected() {
        assert!(parse::<Sample>("floating: [\n...\ncode").is_none());
        assert!(parse::<Sample>("floating: maybe\n...\ncode").is_none());
        assert!(parse::<Sample>("no separator").is_none());
    }
}
