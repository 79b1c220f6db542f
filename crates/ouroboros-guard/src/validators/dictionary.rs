//! Dictionary validation
//!
//! A dictionary is a record used as a uniform key-value mapping: every entry
//! obeys the same `types`, and every key the same `key` test.

use crate::errors::Verdict;
use crate::format::{expected_tags, quote, value_failure, Ident};
use crate::option_checks::{Bound, ListRule, OptionChecker};
use crate::options::Options;
use crate::rx::{fails_phrase, Rxish};
use crate::types::Value;

use super::type_check::{mismatch, tag_allowed};
use super::{check_size, pass_through};

/// Validate a dictionary: entry count, key test, value types and (with `pass`) value contents
///
/// # Example
///
/// ```
/// use ouroboros_guard::{validate_dictionary, Options, Value};
///
/// let scores = Value::object([("ann", Value::from(3)), ("bob", Value::from("4"))]);
/// let err = validate_dictionary(&scores, None, &Options::new().types(["number"])).unwrap_err();
/// assert_eq!(err.to_string(), "`bob` of a dictionary is type 'string' not 'number'");
/// ```
pub fn validate_dictionary(value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
    check_dictionary(value, &Ident::new(identifier), options)
}

pub(crate) fn check_dictionary(value: &Value, ident: &Ident, options: &Options) -> Verdict {
    let begin = options.begin.as_deref();
    let Some(entries) = value.entries() else {
        return Err(mismatch(value, ident, begin, "a dictionary"));
    };

    let checker = OptionChecker::new(options, ident);
    let least = checker.number("least", options.least.as_ref(), Bound::NonNegative)?;
    let most = checker.number("most", options.most.as_ref(), Bound::NonNegative)?;
    let types = checker
        .text_list("types", options.types.as_ref(), ListRule::TAGS)?
        .unwrap_or_default();
    let key = checker.tester("key", options.key.as_ref())?;
    let pass = checker.boolean("pass", options.pass.as_ref())?.unwrap_or(false);
    checker.ordered("least", least, "most", most)?;

    check_size(entries.len(), least, most, "size", ident, begin)?;

    if let Some(key) = key {
        if let Some((name, _)) = entries.iter().find(|(name, _)| !key.test(name)) {
            return Err(value_failure(
                begin,
                ident,
                format!("has key {} which {}", quote(name), fails_phrase(&key)),
            ));
        }
    }

    if !types.is_empty() {
        if let Some((name, entry)) = entries.iter().find(|(_, entry)| !tag_allowed(entry, types)) {
            return Err(mismatch(entry, &ident.entry(name), begin, &expected_tags(types)));
        }
    }

    if pass {
        pass_through(
            entries.iter().map(|(name, entry)| (ident.entry(name), entry)),
            options,
        )?;
    }
    Ok(())
}
