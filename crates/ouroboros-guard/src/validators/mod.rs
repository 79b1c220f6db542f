//! Validators
//!
//! Every validator has the same shape: `(value, identifier, options)` in,
//! [`Verdict`](crate::Verdict) out. Containers compose the scalar
//! validators, and every validator composes the type check.

pub mod array;
pub mod dictionary;
pub mod object;
pub mod scalar;
pub mod type_check;

pub use array::validate_array;
pub use dictionary::validate_dictionary;
pub use object::{validate_against_schema, validate_object};
pub use scalar::{validate_boolean, validate_function, validate_null, validate_number, validate_string};
pub use type_check::validate_type;

use crate::errors::Verdict;
use crate::format::{number_text, value_failure, Ident};
use crate::options::Options;
use crate::types::Value;

/// Container size against `least`/`most`, phrased with `unit` ("length", "size")
pub(crate) fn check_size(
    size: usize,
    least: Option<f64>,
    most: Option<f64>,
    unit: &str,
    ident: &Ident,
    begin: Option<&str>,
) -> Verdict {
    if let Some(least) = least.filter(|least| (size as f64) < *least) {
        return Err(value_failure(
            begin,
            ident,
            format!("has {} {}, not least {}", unit, size, number_text(least)),
        ));
    }
    if let Some(most) = most.filter(|most| size as f64 > *most) {
        return Err(value_failure(
            begin,
            ident,
            format!("has {} {}, not most {}", unit, size, number_text(most)),
        ));
    }
    Ok(())
}

/// Re-run the scalar validators over numeric and text members
///
/// Only numbers and text are revisited; nested containers are left alone.
pub(crate) fn pass_through<'v>(
    members: impl IntoIterator<Item = (Ident, &'v Value)>,
    options: &Options,
) -> Verdict {
    for (ident, member) in members {
        match member {
            Value::Number(_) => scalar::check_number(member, &ident, options)?,
            Value::String(_) => scalar::check_string(member, &ident, options)?,
            _ => {}
        }
    }
    Ok(())
}
