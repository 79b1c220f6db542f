//! Message building blocks
//!
//! Every diagnostic is assembled from a prefix (`begin`), a subject (`Ident`)
//! and a tail describing the failure. Numbers go through [`number_text`] and
//! text through [`quote`], which escapes and truncates so that a long or
//! multi-line input never floods a message.

use crate::errors::Diagnostic;
use crate::types::Value;
use std::fmt;

/// Longest text fragment (in chars) shown verbatim in a message
pub const SNIPPET_LIMIT: usize = 32;

// ============================================================================
// Ident - the subject of a message
// ============================================================================

/// Kind of container an anonymous member lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Array,
    Dictionary,
}

impl Container {
    fn phrase(&self) -> &'static str {
        match self {
            Self::Array => "of an array",
            Self::Dictionary => "of a dictionary",
        }
    }
}

/// Name of the value under validation, as shown in messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ident {
    /// No identifier was given
    Anonymous,
    /// Identifier or property path, e.g. `user.tags[2]`
    Named(String),
    /// Member of an anonymous container, e.g. `` `[2]` of an array ``
    Member { path: String, container: Container },
}

impl Ident {
    /// Build from an optional caller-supplied identifier
    pub fn new(identifier: Option<&str>) -> Self {
        match identifier {
            Some(name) => Self::Named(name.to_string()),
            None => Self::Anonymous,
        }
    }

    /// Identifier of the item at `index` of this (array) value
    pub fn item(&self, index: usize) -> Self {
        match self {
            Self::Anonymous => Self::Member {
                path: format!("[{}]", index),
                container: Container::Array,
            },
            Self::Named(name) => Self::Named(format!("{}[{}]", name, index)),
            Self::Member { path, container } => Self::Member {
                path: format!("{}[{}]", path, index),
                container: *container,
            },
        }
    }

    /// Identifier of the entry `key` of this (dictionary) value
    pub fn entry(&self, key: &str) -> Self {
        match self {
            Self::Anonymous => Self::Member {
                path: key.to_string(),
                container: Container::Dictionary,
            },
            _ => self.property(key),
        }
    }

    /// Identifier of the property `key` of this (object) value
    pub fn property(&self, key: &str) -> Self {
        match self {
            Self::Anonymous => Self::Named(key.to_string()),
            Self::Named(name) => Self::Named(format!("{}.{}", name, key)),
            Self::Member { path, container } => Self::Member {
                path: format!("{}.{}", path, key),
                container: *container,
            },
        }
    }

    /// Form used mid-sentence ("Cannot validate a value")
    pub fn inline(&self) -> String {
        match self {
            Self::Anonymous => "a value".to_string(),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => write!(f, "A value"),
            Self::Named(name) => write!(f, "`{}`", name),
            Self::Member { path, container } => write!(f, "`{}` {}", path, container.phrase()),
        }
    }
}

// ============================================================================
// Diagnostic builders
// ============================================================================

/// Render the `begin` option as a message prefix
pub fn prefix(begin: Option<&str>) -> String {
    match begin {
        Some(begin) => format!("{}: ", begin),
        None => String::new(),
    }
}

/// Value-invalid diagnostic: `"{begin}: {subject} {tail}"`
pub fn value_failure(begin: Option<&str>, ident: &Ident, tail: impl fmt::Display) -> Diagnostic {
    Diagnostic::value(format!("{}{} {}", prefix(begin), ident, tail))
}

/// Options-invalid diagnostic: `` "{begin}: Cannot validate {subject}, `{path}` {why}" ``
pub fn options_failure(
    begin: Option<&str>,
    ident: &Ident,
    path: &str,
    why: impl fmt::Display,
) -> Diagnostic {
    Diagnostic::options(format!(
        "{}Cannot validate {}, `{}` {}",
        prefix(begin),
        ident.inline(),
        path,
        why
    ))
}

// ============================================================================
// Value snippets
// ============================================================================

/// Render a number the way people write it (`5`, `3.5`, `Infinity`)
pub fn number_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_text(n)
    } else {
        format!("{}", n)
    }
}

/// `1e+21`, `-2.5e-7`: the exponent always carries its sign
fn exponent_text(n: f64) -> String {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

/// Quote text, escaping quotes and control characters, truncating long input
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len().min(SNIPPET_LIMIT) + 5);
    out.push('\'');
    for c in text.chars().take(SNIPPET_LIMIT) {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    if text.chars().count() > SNIPPET_LIMIT {
        out.push_str("...");
    }
    out.push('\'');
    out
}

/// What a value is, for "is X not Y" messages: `null`, `an array` or `type 'tag'`
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(_) => "an array".to_string(),
        other => format!("type '{}'", other.type_tag()),
    }
}

// ============================================================================
// Type lists
// ============================================================================

/// Join type tags with `:`; nested lists render as `[a:b]`
///
/// Tag lists reach this point already checked, so only text and nested
/// lists are rendered.
pub fn join_tags(tags: &[Value]) -> String {
    tags.iter()
        .filter_map(|tag| match tag {
            Value::String(s) => Some(s.clone()),
            Value::Array(inner) => Some(format!("[{}]", join_tags(inner))),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(":")
}

/// Expected-type phrase: `'number'` or `one of 'number:string'`
pub fn expected_tags(tags: &[Value]) -> String {
    if tags.len() == 1 {
        format!("'{}'", join_tags(tags))
    } else {
        format!("one of '{}'", join_tags(tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_display() {
        assert_eq!(Ident::new(None).to_string(), "A value");
        assert_eq!(Ident::new(Some("x")).to_string(), "`x`");
        assert_eq!(Ident::new(None).inline(), "a value");
        assert_eq!(Ident::new(Some("x")).inline(), "`x`");
    }

    #[test]
    fn test_ident_children() {
        let anon = Ident::Anonymous;
        assert_eq!(anon.item(2).to_string(), "`[2]` of an array");
        assert_eq!(anon.entry("k").to_string(), "`k` of a dictionary");
        assert_eq!(anon.property("p").to_string(), "`p`");
        assert_eq!(anon.entry("k").item(0).to_string(), "`k[0]` of a dictionary");

        let named = Ident::new(Some("user"));
        assert_eq!(named.item(1).to_string(), "`user[1]`");
        assert_eq!(named.entry("k").to_string(), "`user.k`");
        assert_eq!(named.property("tags").item(3).to_string(), "`user.tags[3]`");
    }

    #[test]
    fn test_diagnostic_builders() {
        let ident = Ident::new(Some("x"));
        assert_eq!(
            value_failure(Some("proc()"), &ident, "is null").as_str(),
            "proc(): `x` is null"
        );
        assert_eq!(
            options_failure(None, &Ident::Anonymous, "options.gte", "is NaN").as_str(),
            "Cannot validate a value, `options.gte` is NaN"
        );
    }

    #[test]
    fn test_number_text() {
        assert_eq!(number_text(5.0), "5");
        assert_eq!(number_text(3.5), "3.5");
        assert_eq!(number_text(-0.0), "0");
        assert_eq!(number_text(f64::INFINITY), "Infinity");
        assert_eq!(number_text(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(number_text(f64::NAN), "NaN");
    }

    #[test]
    fn test_number_text_exponent_form() {
        assert_eq!(number_text(1e21), "1e+21");
        assert_eq!(number_text(-2.5e22), "-2.5e+22");
        assert_eq!(number_text(1e-7), "1e-7");
        assert_eq!(number_text(1.5e-7), "1.5e-7");
        assert_eq!(number_text(1e20), "100000000000000000000");
        assert_eq!(number_text(0.000001), "0.000001");
    }

    #[test]
    fn test_quote_escapes_and_truncates() {
        assert_eq!(quote("ab"), "'ab'");
        assert_eq!(quote("it's"), "'it\\'s'");
        assert_eq!(quote("a\nb"), "'a\\nb'");
        let long = "x".repeat(40);
        assert_eq!(quote(&long), format!("'{}...'", "x".repeat(SNIPPET_LIMIT)));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&Value::Null), "null");
        assert_eq!(describe(&Value::Array(vec![])), "an array");
        assert_eq!(describe(&Value::Object(vec![])), "type 'object'");
        assert_eq!(describe(&Value::from(1)), "type 'number'");
    }

    #[test]
    fn test_expected_tags() {
        assert_eq!(expected_tags(&[Value::from("number")]), "'number'");
        assert_eq!(
            expected_tags(&[Value::from("number"), Value::from("string")]),
            "one of 'number:string'"
        );
        assert_eq!(
            expected_tags(&[Value::from(vec!["boolean"])]),
            "'[boolean]'"
        );
        assert_eq!(
            expected_tags(&[Value::from("string"), Value::from(vec!["number", "boolean"])]),
            "one of 'string:[number:boolean]'"
        );
    }
}
