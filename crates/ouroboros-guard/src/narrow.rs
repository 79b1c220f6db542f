//! Narrowing: shared options and collected failures
//!
//! [`narrow`] binds a set of shared options to a list of checks and returns
//! one [`Narrowed`] validator per check, plus a [`Failures`] handle onto the
//! list every narrowed validator appends to. A routine can run all of its
//! argument checks and report every failure at once.
//!
//! # Example
//!
//! ```rust
//! use ouroboros_guard::narrow::{narrow, Check};
//! use ouroboros_guard::{validate_number, validate_string, Options, Value};
//!
//! let (failures, checks) = narrow(
//!     Options::new().begin("resize()"),
//!     vec![Check::one(validate_number), Check::one(validate_string)],
//! );
//! let (number, string) = (&checks[0], &checks[1]);
//!
//! assert!(number.check(&Value::from(3), Some("width"), None).is_ok());
//! let _ = number.check(&Value::from(-1), Some("height"), Some(&Options::new().gte(0)));
//! let _ = string.check(&Value::from(7), Some("unit"), None);
//!
//! assert_eq!(
//!     failures.messages(),
//!     vec![
//!         "resize(): `height` -1 is not gte 0".to_string(),
//!         "resize(): `unit` is type 'number' not 'string'".to_string(),
//!     ]
//! );
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::errors::{Diagnostic, DiagnosticKind, FailureReport, Verdict};
use crate::options::Options;
use crate::types::Value;

// ============================================================================
// Validate
// ============================================================================

/// Anything with the validator calling convention
///
/// Implemented for every `Fn(&Value, Option<&str>, &Options) -> Verdict`,
/// so the crate's validators and plain closures can be narrowed directly.
pub trait Validate {
    fn validate(&self, value: &Value, identifier: Option<&str>, options: &Options) -> Verdict;
}

impl<F> Validate for F
where
    F: Fn(&Value, Option<&str>, &Options) -> Verdict,
{
    fn validate(&self, value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
        self(value, identifier, options)
    }
}

/// Type alias for a boxed validator
pub type BoxedValidator = Box<dyn Validate>;

/// Box a validator function or closure
pub fn boxed<F>(validator: F) -> BoxedValidator
where
    F: Fn(&Value, Option<&str>, &Options) -> Verdict + 'static,
{
    Box::new(validator)
}

// ============================================================================
// Check
// ============================================================================

/// One entry of a [`narrow`] call
pub enum Check {
    /// A single validator
    One(BoxedValidator),
    /// Alternatives; the value must satisfy at least one
    AnyOf(Vec<BoxedValidator>),
}

impl Check {
    /// Single validator check
    pub fn one<F>(validator: F) -> Self
    where
        F: Fn(&Value, Option<&str>, &Options) -> Verdict + 'static,
    {
        Self::One(boxed(validator))
    }

    /// OR-group of alternative validators, tried in order
    pub fn any_of(validators: Vec<BoxedValidator>) -> Self {
        Self::AnyOf(validators)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(_) => write!(f, "Check::One"),
            Self::AnyOf(group) => write!(f, "Check::AnyOf({})", group.len()),
        }
    }
}

// ============================================================================
// Failures
// ============================================================================

/// Shared, append-only list of failures recorded by narrowed validators
///
/// Clones are handles onto the same list. There is no locking: the list is
/// meant to be used from the thread that created it.
#[derive(Debug, Clone, Default)]
pub struct Failures(Rc<RefCell<Vec<Diagnostic>>>);

impl Failures {
    fn push(&self, diagnostic: Diagnostic) {
        self.0.borrow_mut().push(diagnostic);
    }

    /// Number of recorded failures
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing has failed yet
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Messages in the order they were recorded
    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().iter().map(|d| d.message.clone()).collect()
    }

    /// Diagnostics in the order they were recorded
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.0.borrow().clone()
    }

    /// Forget every recorded failure
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// All messages joined with `separator`
    pub fn report(&self, separator: &str) -> String {
        self.messages().join(separator)
    }

    /// `Ok(())` when nothing failed, otherwise every failure as one error
    pub fn into_result(self) -> Result<(), FailureReport> {
        let diagnostics = self.diagnostics();
        if diagnostics.is_empty() {
            Ok(())
        } else {
            Err(FailureReport { diagnostics })
        }
    }
}

// ============================================================================
// Narrowed
// ============================================================================

/// Validator bound to shared options and a shared failure list
pub struct Narrowed {
    shared: Rc<Options>,
    check: Check,
    failures: Failures,
}

impl Narrowed {
    /// Run the check; options set in `overrides` win over the shared ones
    ///
    /// A failure is recorded before it is returned.
    pub fn check(&self, value: &Value, identifier: Option<&str>, overrides: Option<&Options>) -> Verdict {
        let options = match overrides {
            Some(overrides) => self.shared.merged(overrides),
            None => Options::clone(&self.shared),
        };

        let verdict = match &self.check {
            Check::One(validator) => validator.validate(value, identifier, &options),
            Check::AnyOf(group) => match group.as_slice() {
                [validator] => validator.validate(value, identifier, &options),
                group => any_of(group, value, identifier, &options),
            },
        };

        if let Err(diagnostic) = &verdict {
            tracing::debug!(kind = %diagnostic.kind, "recorded failure: {}", diagnostic.message);
            self.failures.push(diagnostic.clone());
        }
        verdict
    }

    /// Handle onto the shared failure list
    pub fn failures(&self) -> &Failures {
        &self.failures
    }
}

impl fmt::Debug for Narrowed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Narrowed")
            .field("shared", &self.shared)
            .field("check", &self.check)
            .field("failures", &self.failures.len())
            .finish()
    }
}

/// Bind `shared` options to each check
///
/// Returns the shared failure list and one narrowed validator per check, in
/// the same order.
pub fn narrow(shared: Options, checks: Vec<Check>) -> (Failures, Vec<Narrowed>) {
    let failures = Failures::default();
    let shared = Rc::new(shared);
    let narrowed = checks
        .into_iter()
        .map(|check| Narrowed {
            shared: Rc::clone(&shared),
            check,
            failures: failures.clone(),
        })
        .collect();
    (failures, narrowed)
}

// ============================================================================
// OR-groups
// ============================================================================

fn any_of(group: &[BoxedValidator], value: &Value, identifier: Option<&str>, options: &Options) -> Verdict {
    let mut diagnostics = Vec::with_capacity(group.len());
    for validator in group {
        match validator.validate(value, identifier, options) {
            Ok(()) => return Ok(()),
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }
    if diagnostics.is_empty() {
        return Ok(());
    }

    let kind = if diagnostics.iter().all(Diagnostic::is_options_invalid) {
        DiagnosticKind::OptionsInvalid
    } else {
        DiagnosticKind::ValueInvalid
    };
    let messages: Vec<&str> = diagnostics.iter().map(Diagnostic::as_str).collect();
    let message = condense(&messages);
    tracing::trace!(alternatives = messages.len(), "condensed OR-group failure: {}", message);
    Err(Diagnostic { kind, message })
}

/// Join alternative messages, stating their shared beginning only once
///
/// `["`x` 'D' is not 'A'", "`x` 'D' is not 'B'"]` condenses to
/// `` `x` 'D' is not 'A'; or 'B' ``. A common prefix ending in `" '"` is cut
/// before the quote so a quoted value stays whole.
pub fn condense(messages: &[&str]) -> String {
    let [first, rest @ ..] = messages else {
        return String::new();
    };

    let chars: Vec<char> = first.chars().collect();
    let mut common = chars.len();
    for message in rest {
        let shared = chars
            .iter()
            .zip(message.chars())
            .take_while(|(a, b)| **a == *b)
            .count();
        common = common.min(shared);
    }
    if common >= 2 && chars[common - 2] == ' ' && chars[common - 1] == '\'' {
        common -= 2;
    }

    let mut condensed = first.to_string();
    for message in rest {
        let suffix: String = message.chars().skip(common).collect();
        condensed.push_str("; or ");
        condensed.push_str(suffix.trim());
    }
    condensed
}
