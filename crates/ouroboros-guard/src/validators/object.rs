//! Object validation and schema conformance
//!
//! A regular object is any record (plain or constructed), never null and
//! never an array. Its shape is described by `options.schema`: for every
//! declared property the options say which type tags are acceptable and
//! which further constraints apply.
//!
//! Schema checks report one failure per call, in a fixed priority:
//! declared properties in declaration order (missing, wrong type, then the
//! property's own constraints), and only after all of them pass, undeclared
//! properties in the record's own order.

use crate::errors::Verdict;
use crate::format::{describe, expected_tags, value_failure, Ident};
use crate::option_checks::OptionChecker;
use crate::options::{Options, Schema};
use crate::types::Value;

use super::scalar::{check_number, check_string};
use super::type_check::{mismatch, tag_allowed};

/// Validate a regular object against `is`, `open` and `schema`
///
/// # Example
///
/// ```
/// use ouroboros_guard::{validate_object, Options, Value};
///
/// let options = Options::new().begin("proc()");
/// let err = validate_object(&Value::Null, Some("lookup"), &options).unwrap_err();
/// assert_eq!(err.to_string(), "proc(): `lookup` is null not a regular object");
/// ```
pub fn validate_object(value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
    check_object(value, &Ident::new(identifier), options)
}

/// Check only schema conformance of a record
///
/// Option shapes are still checked first. A value without properties
/// behaves like an empty record.
pub fn validate_against_schema(value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
    let ident = Ident::new(identifier);
    let checker = OptionChecker::new(options, &ident);
    checker.boolean("open", options.open.as_ref())?;
    checker.schema(options.schema.as_ref())?;
    match &options.schema {
        Some(schema) => conform(value, &ident, options, schema),
        None => Ok(()),
    }
}

pub(crate) fn check_object(value: &Value, ident: &Ident, options: &Options) -> Verdict {
    let begin = options.begin.as_deref();
    if value.entries().is_none() {
        return Err(mismatch(value, ident, begin, "a regular object"));
    }

    let checker = OptionChecker::new(options, ident);
    let allowed = checker.list("is", options.is.as_ref(), true)?;
    checker.boolean("open", options.open.as_ref())?;
    checker.schema(options.schema.as_ref())?;

    if let Some(allowed) = allowed {
        if !allowed.iter().any(|candidate| is_allowed(value, candidate)) {
            return Err(value_failure(begin, ident, "is not in `options.is`"));
        }
    }

    match &options.schema {
        Some(schema) => conform(value, ident, options, schema),
        None => Ok(()),
    }
}

/// A constructor matches its instances; anything else must be equal
fn is_allowed(value: &Value, candidate: &Value) -> bool {
    match (candidate, value) {
        (Value::Function(constructor), Value::Instance { class, .. }) => constructor.name() == class,
        (Value::Function(_), _) => false,
        _ => candidate == value,
    }
}

fn conform(value: &Value, ident: &Ident, options: &Options, schema: &Schema) -> Verdict {
    let begin = options.begin.as_deref();

    for (name, entry) in schema.iter() {
        let property = value.get(name).unwrap_or(&Value::Undefined);
        let property_ident = ident.property(name);
        let types = match &entry.types {
            Some(Value::Array(types)) => types.as_slice(),
            _ => &[],
        };

        if types.is_empty() || !tag_allowed(property, types) {
            if property.is_undefined() {
                return Err(value_failure(begin, &property_ident, "is missing"));
            }
            if !types.is_empty() {
                return Err(value_failure(
                    begin,
                    &property_ident,
                    format!("is {} not {}", describe(property), expected_tags(types)),
                ));
            }
        }

        check_property(property, &property_ident, &entry.inheriting_begin(begin))?;
    }

    if !options.is_open() {
        let entries = value.entries().unwrap_or_default();
        if let Some((name, _)) = entries.iter().find(|(name, _)| !schema.contains_key(name)) {
            return Err(value_failure(begin, &ident.property(name), "is unexpected"));
        }
    }
    Ok(())
}

/// Constraints a schema entry places on a present, correctly typed property
///
/// Numbers and text get the scalar checks. Records and arrays of records are
/// only descended into when the entry declares its own `schema`; `pass` is
/// never carried into them.
fn check_property(property: &Value, ident: &Ident, entry: &Options) -> Verdict {
    match property {
        Value::Number(_) => check_number(property, ident, entry),
        Value::String(_) => check_string(property, ident, entry),
        Value::Object(_) | Value::Instance { .. } if entry.schema.is_some() => {
            check_object(property, ident, &nested(entry))
        }
        Value::Array(items) if entry.schema.is_some() => {
            let nested = nested(entry);
            for (i, item) in items.iter().enumerate() {
                check_object(item, &ident.item(i), &nested)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Entry options as seen by the nested object check
fn nested(entry: &Options) -> Options {
    Options {
        begin: entry.begin.clone(),
        is: entry.is.clone(),
        open: entry.open.clone(),
        schema: entry.schema.clone(),
        ..Options::default()
    }
}
