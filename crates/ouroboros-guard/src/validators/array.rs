//! Array validation

use crate::errors::Verdict;
use crate::format::{expected_tags, Ident};
use crate::option_checks::{Bound, ListRule, OptionChecker};
use crate::options::Options;
use crate::types::Value;

use super::type_check::{mismatch, tag_allowed};
use super::{check_size, pass_through};

/// Validate an array: item count, item types and (with `pass`) item contents
///
/// When `split` is set, text is read as the array of its delimited parts.
/// The value itself is never replaced. `split` is checked whatever the
/// input, so a bad delimiter shows up even when an array is passed.
///
/// # Example
///
/// ```
/// use ouroboros_guard::{validate_array, Options, Value};
///
/// let err = validate_array(&Value::Object(vec![]), None, &Options::new()).unwrap_err();
/// assert_eq!(err.to_string(), "A value is type 'object' not an array");
/// ```
pub fn validate_array(value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
    check_array(value, &Ident::new(identifier), options)
}

pub(crate) fn check_array(value: &Value, ident: &Ident, options: &Options) -> Verdict {
    let begin = options.begin.as_deref();
    let checker = OptionChecker::new(options, ident);
    let split = checker.text("split", options.split.as_ref())?;

    let parts;
    let items: &[Value] = match (value, split) {
        (Value::Array(items), _) => items,
        (Value::String(text), Some(delimiter)) => {
            parts = split_text(text, delimiter);
            &parts
        }
        _ => return Err(mismatch(value, ident, begin, "an array")),
    };

    let least = checker.number("least", options.least.as_ref(), Bound::NonNegative)?;
    let most = checker.number("most", options.most.as_ref(), Bound::NonNegative)?;
    let types = checker
        .text_list("types", options.types.as_ref(), ListRule::TAGS)?
        .unwrap_or_default();
    let pass = checker.boolean("pass", options.pass.as_ref())?.unwrap_or(false);
    checker.ordered("least", least, "most", most)?;

    check_size(items.len(), least, most, "length", ident, begin)?;

    if !types.is_empty() {
        if let Some((i, item)) = items.iter().enumerate().find(|(_, item)| !tag_allowed(item, types)) {
            return Err(mismatch(item, &ident.item(i), begin, &expected_tags(types)));
        }
    }

    if pass {
        pass_through(
            items.iter().enumerate().map(|(i, item)| (ident.item(i), item)),
            options,
        )?;
    }
    Ok(())
}

fn split_text(text: &str, delimiter: &str) -> Vec<Value> {
    if delimiter.is_empty() {
        text.chars().map(|c| Value::String(c.to_string())).collect()
    } else {
        text.split(delimiter).map(Value::from).collect()
    }
}
