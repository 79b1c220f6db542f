//! Ouroboros Guard
//!
//! Guard-clause validation for runtime values.
//!
//! Every validator takes a value, an optional identifier and an [`Options`]
//! record, and returns a [`Verdict`]: `Ok(())` when the value conforms, or a
//! [`Diagnostic`] whose message says exactly what failed. Malformed options
//! are reported the same way, flagged as [`DiagnosticKind::OptionsInvalid`],
//! so "your input is bad" stays distinguishable from "your checks are bad".
//!
//! # Layers
//!
//! ```text
//! narrow                 shared options, collected failures, OR-groups
//!   array / dictionary / object (schema)
//!     number / string / boolean / function / null
//!       type check
//!         option checks + message formatting
//! ```
//!
//! # Features
//!
//! - **Default**: validators, options and narrowing
//! - **serde**: `serde_json` conversions and JSON options loading
//!
//! # Example
//!
//! ```rust
//! use ouroboros_guard::{validate_number, validate_object, Options, Schema, Value};
//!
//! let err = validate_number(&Value::from(5), Some("x"), &Options::new().gte(10)).unwrap_err();
//! assert_eq!(err.to_string(), "`x` 5 is not gte 10");
//!
//! let schema = Schema::new().property("a", Options::new().types(["number"]));
//! let err = validate_object(&Value::Object(vec![]), None, &Options::new().schema(schema)).unwrap_err();
//! assert_eq!(err.to_string(), "`a` is missing");
//! ```

// Public modules
pub mod errors;
pub mod format;
pub mod narrow;
pub mod option_checks;
pub mod options;
pub mod rx;
pub mod types;
pub mod validators;

#[cfg(feature = "serde")]
pub mod json;

// Re-export commonly used types
pub use errors::{Diagnostic, DiagnosticKind, FailureReport, OptionsError, Verdict};
pub use narrow::{boxed, narrow, BoxedValidator, Check, Failures, Narrowed, Validate};
pub use options::{Options, Schema};
pub use rx::{Rxish, Tester};
pub use types::{Function, TypeTag, Value};
pub use validators::{
    validate_against_schema, validate_array, validate_boolean, validate_dictionary,
    validate_function, validate_null, validate_number, validate_object, validate_string,
    validate_type,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
