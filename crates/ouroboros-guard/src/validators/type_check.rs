//! Type validation
//!
//! The foundation every other validator builds on. Compares the value's type
//! tag against `options.type`, which is either one tag or a list of tags. In
//! list mode the value must be an array and every item must carry one of the
//! listed tags.

use crate::errors::{Diagnostic, Verdict};
use crate::format::{describe, expected_tags, value_failure, Ident};
use crate::option_checks::{ListRule, OptionChecker};
use crate::options::Options;
use crate::types::{TypeTag, Value};

/// Validate a value's type tag against `options.type`
///
/// # Example
///
/// ```
/// use ouroboros_guard::{validate_type, Options, Value};
///
/// let options = Options::new().kind("string");
/// assert!(validate_type(&Value::from("ok"), Some("name"), &options).is_ok());
///
/// let err = validate_type(&Value::from(1), Some("name"), &options).unwrap_err();
/// assert_eq!(err.to_string(), "`name` is type 'number' not 'string'");
/// ```
pub fn validate_type(value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
    check_type(value, &Ident::new(identifier), options)
}

pub(crate) fn check_type(value: &Value, ident: &Ident, options: &Options) -> Verdict {
    let begin = options.begin.as_deref();
    let checker = OptionChecker::new(options, ident);
    match &options.kind {
        None => Err(checker.fail("type", "is not set")),
        Some(Value::Null) => Err(checker.fail("type", "is null")),
        Some(Value::String(tag)) => {
            let tag = tag
                .parse::<TypeTag>()
                .map_err(|_| checker.fail("type", "is not a known type"))?;
            expect_tag(value, ident, begin, tag)
        }
        Some(kind @ Value::Array(_)) => {
            let tags = checker
                .text_list("type", Some(kind), ListRule::TAGS)?
                .unwrap_or_default();
            let Value::Array(items) = value else {
                return Err(value_failure(
                    begin,
                    ident,
                    format!("is {} not an array", describe(value)),
                ));
            };
            check_item_tags(items, ident, begin, tags)
        }
        Some(other) => Err(checker.fail("type", format!("is {} not 'string'", describe(other)))),
    }
}

/// Single-tag check shared by the scalar validators
pub(crate) fn expect_tag(value: &Value, ident: &Ident, begin: Option<&str>, tag: TypeTag) -> Verdict {
    if value.type_tag() == tag {
        Ok(())
    } else {
        Err(mismatch(value, ident, begin, &format!("'{}'", tag)))
    }
}

/// `"{subject} is {what it is} not {expected}"`
pub(crate) fn mismatch(value: &Value, ident: &Ident, begin: Option<&str>, expected: &str) -> Diagnostic {
    value_failure(begin, ident, format!("is {} not {}", describe(value), expected))
}

/// First item (in index order) whose tag is not listed fails; an empty list allows anything
pub(crate) fn check_item_tags<'v>(
    items: impl IntoIterator<Item = &'v Value>,
    ident: &Ident,
    begin: Option<&str>,
    tags: &[Value],
) -> Verdict {
    if tags.is_empty() {
        return Ok(());
    }
    for (i, item) in items.into_iter().enumerate() {
        if !tag_allowed(item, tags) {
            return Err(mismatch(item, &ident.item(i), begin, &expected_tags(tags)));
        }
    }
    Ok(())
}

/// Whether `value` matches one of `tags`
///
/// A nested list of tags matches an array whose items all match that list.
pub(crate) fn tag_allowed(value: &Value, tags: &[Value]) -> bool {
    let tag = value.type_tag();
    tags.iter().any(|allowed| match allowed {
        Value::String(name) => name == tag.as_str(),
        Value::Array(inner) => match value {
            Value::Array(items) => items.iter().all(|item| tag_allowed(item, inner)),
            _ => false,
        },
        _ => false,
    })
}
