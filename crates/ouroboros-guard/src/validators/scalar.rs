//! Scalar validators: number, string, boolean, function and null

use crate::errors::Verdict;
use crate::format::{number_text, quote, value_failure, Ident};
use crate::option_checks::{Bound, ListRule, OptionChecker};
use crate::options::Options;
use crate::rx::{fails_phrase, Rxish};
use crate::types::{TypeTag, Value};

use super::type_check::{expect_tag, mismatch};

// ============================================================================
// Number
// ============================================================================

/// Validate a number, rejecting NaN and applying `gte`, `lte` and `mod`
///
/// Checks run in a fixed order and the first failure wins: type, the
/// `gte`/`lte`/`mod` option shapes, `gte > lte`, NaN, then the bounds and
/// divisibility of the value.
///
/// # Example
///
/// ```
/// use ouroboros_guard::{validate_number, Options, Value};
///
/// let err = validate_number(&Value::from(5), Some("x"), &Options::new().gte(10)).unwrap_err();
/// assert_eq!(err.to_string(), "`x` 5 is not gte 10");
/// ```
pub fn validate_number(value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
    check_number(value, &Ident::new(identifier), options)
}

pub(crate) fn check_number(value: &Value, ident: &Ident, options: &Options) -> Verdict {
    let begin = options.begin.as_deref();
    let Value::Number(n) = value else {
        return Err(mismatch(value, ident, begin, "'number'"));
    };
    let n = *n;

    let checker = OptionChecker::new(options, ident);
    let gte = checker.number("gte", options.gte.as_ref(), Bound::Any)?;
    let lte = checker.number("lte", options.lte.as_ref(), Bound::Any)?;
    let modulo = checker.number("mod", options.modulo.as_ref(), Bound::NonZero)?;
    checker.ordered("gte", gte, "lte", lte)?;

    if n.is_nan() {
        return Err(value_failure(begin, ident, "is the special `NaN` value"));
    }
    let shown = number_text(n);
    if let Some(gte) = gte.filter(|gte| n < *gte) {
        return Err(value_failure(begin, ident, format!("{} is not gte {}", shown, number_text(gte))));
    }
    if let Some(lte) = lte.filter(|lte| n > *lte) {
        return Err(value_failure(begin, ident, format!("{} is not lte {}", shown, number_text(lte))));
    }
    if let Some(modulo) = modulo.filter(|modulo| n % modulo != 0.0) {
        return Err(value_failure(begin, ident, format!("{} is not mod {}", shown, number_text(modulo))));
    }
    Ok(())
}

// ============================================================================
// String
// ============================================================================

/// Validate text against `is`, `isnt`, `max`, `min` and `rx`
///
/// Lengths are counted in characters, not bytes.
///
/// # Example
///
/// ```
/// use ouroboros_guard::{validate_string, Options, Value};
///
/// let err = validate_string(&Value::from("ab"), Some("s"), &Options::new().min(3)).unwrap_err();
/// assert_eq!(err.to_string(), "`s` 'ab' has length 2, not min 3");
/// ```
pub fn validate_string(value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
    check_string(value, &Ident::new(identifier), options)
}

pub(crate) fn check_string(value: &Value, ident: &Ident, options: &Options) -> Verdict {
    let begin = options.begin.as_deref();
    let Value::String(text) = value else {
        return Err(mismatch(value, ident, begin, "'string'"));
    };

    let checker = OptionChecker::new(options, ident);
    let allowed = checker.text_list(
        "is",
        options.is.as_ref(),
        ListRule {
            non_empty: true,
            ..ListRule::TEXT
        },
    )?;
    let denied = checker.text_list("isnt", options.isnt.as_ref(), ListRule::TEXT)?;
    let max = checker.number("max", options.max.as_ref(), Bound::NonNegative)?;
    let min = checker.number("min", options.min.as_ref(), Bound::NonNegative)?;
    let rx = checker.tester("rx", options.rx.as_ref())?;
    checker.ordered("min", min, "max", max)?;

    let shown = quote(text);
    if let Some(allowed) = allowed {
        if !contains_text(allowed, text) {
            return Err(value_failure(begin, ident, format!("{} is not {}", shown, one_of(allowed))));
        }
    }
    if let Some(denied) = denied {
        if contains_text(denied, text) {
            return Err(value_failure(begin, ident, format!("{} is in `options.isnt`", shown)));
        }
    }
    let length = text.chars().count();
    if let Some(max) = max.filter(|max| length as f64 > *max) {
        return Err(value_failure(
            begin,
            ident,
            format!("{} has length {}, not max {}", shown, length, number_text(max)),
        ));
    }
    if let Some(min) = min.filter(|min| (length as f64) < *min) {
        return Err(value_failure(
            begin,
            ident,
            format!("{} has length {}, not min {}", shown, length, number_text(min)),
        ));
    }
    if let Some(rx) = rx {
        if !rx.test(text) {
            return Err(value_failure(begin, ident, format!("{} {}", shown, fails_phrase(&rx))));
        }
    }
    Ok(())
}

fn contains_text(list: &[Value], text: &str) -> bool {
    list.iter().any(|item| matches!(item, Value::String(s) if s == text))
}

/// `'A'` for a single allowed value, `one of 'A', 'B'` otherwise
fn one_of(list: &[Value]) -> String {
    let quoted: Vec<String> = list
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(quote(s)),
            _ => None,
        })
        .collect();
    if quoted.len() == 1 {
        quoted.join("")
    } else {
        format!("one of {}", quoted.join(", "))
    }
}

// ============================================================================
// Boolean, Function, Null
// ============================================================================

/// Validate that a value is a boolean
pub fn validate_boolean(value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
    expect_tag(value, &Ident::new(identifier), options.begin.as_deref(), TypeTag::Boolean)
}

/// Validate that a value is a function
pub fn validate_function(value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
    expect_tag(value, &Ident::new(identifier), options.begin.as_deref(), TypeTag::Function)
}

/// Validate that a value is null
///
/// Null shares the `object` tag with arrays and records, so it is matched
/// on the value itself.
pub fn validate_null(value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
    let ident = Ident::new(identifier);
    match value {
        Value::Null => Ok(()),
        _ => Err(mismatch(value, &ident, options.begin.as_deref(), "null")),
    }
}
