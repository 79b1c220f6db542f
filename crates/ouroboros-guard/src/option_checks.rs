//! Well-formedness checks for option values
//!
//! Before an option is applied to a value it is checked here. Each check
//! returns the option in its usable form, or an options-invalid diagnostic
//! naming the option path (`options.gte`, `options.schema.a.types[1]`).
//! Validators run these in a fixed order and stop at the first failure.

use crate::errors::Diagnostic;
use crate::format::{describe, options_failure, Ident};
use crate::options::{Options, Schema};
use crate::rx::Tester;
use crate::types::{TypeTag, Value};
use regex::Regex;

/// Extra constraint on a numeric option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Any number except NaN
    Any,
    /// Zero or more
    NonNegative,
    /// Anything but zero
    NonZero,
}

/// Extra constraints on a list-of-text option
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRule {
    /// Reject an empty list
    pub non_empty: bool,
    /// Every element must be a recognised type tag
    pub known_tags: bool,
    /// Elements may themselves be lists of tags (schema `types`)
    pub nested: bool,
}

impl ListRule {
    /// Plain list of text
    pub const TEXT: ListRule = ListRule {
        non_empty: false,
        known_tags: false,
        nested: false,
    };

    /// List of type tags, empty allowed
    pub const TAGS: ListRule = ListRule {
        non_empty: false,
        known_tags: true,
        nested: false,
    };

    /// List of type tags where a nested list means "array of these"
    pub const NESTED_TAGS: ListRule = ListRule {
        non_empty: false,
        known_tags: true,
        nested: true,
    };
}

/// Checks options on behalf of one validation subject
pub struct OptionChecker<'a> {
    begin: Option<&'a str>,
    ident: &'a Ident,
    base: String,
}

impl<'a> OptionChecker<'a> {
    /// Checker for top-level options
    pub fn new(options: &'a Options, ident: &'a Ident) -> Self {
        Self {
            begin: options.begin.as_deref(),
            ident,
            base: "options".to_string(),
        }
    }

    fn nested(&self, segment: &str) -> OptionChecker<'a> {
        OptionChecker {
            begin: self.begin,
            ident: self.ident,
            base: format!("{}.{}", self.base, segment),
        }
    }

    fn path(&self, field: &str) -> String {
        format!("{}.{}", self.base, field)
    }

    /// Options-invalid diagnostic for `field`
    pub fn fail(&self, field: &str, why: impl std::fmt::Display) -> Diagnostic {
        options_failure(self.begin, self.ident, &self.path(field), why)
    }

    /// Numeric option: not null, not an array, a number, not NaN, then `bound`
    pub fn number(&self, field: &str, raw: Option<&Value>, bound: Bound) -> Result<Option<f64>, Diagnostic> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        let n = match raw {
            Value::Null => return Err(self.fail(field, "is null")),
            Value::Array(_) => return Err(self.fail(field, "is an array not 'number'")),
            Value::Number(n) => *n,
            other => return Err(self.fail(field, format!("is {} not 'number'", describe(other)))),
        };
        if n.is_nan() {
            return Err(self.fail(field, "is NaN"));
        }
        match bound {
            Bound::NonZero if n == 0.0 => Err(self.fail(field, "is zero")),
            Bound::NonNegative if n < 0.0 => Err(self.fail(field, "is negative")),
            _ => Ok(Some(n)),
        }
    }

    /// Boolean option
    pub fn boolean(&self, field: &str, raw: Option<&Value>) -> Result<Option<bool>, Diagnostic> {
        match raw {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::Null) => Err(self.fail(field, "is null")),
            Some(Value::Array(_)) => Err(self.fail(field, "is an array not 'boolean'")),
            Some(other) => Err(self.fail(field, format!("is {} not 'boolean'", describe(other)))),
        }
    }

    /// Text option
    pub fn text<'v>(&self, field: &str, raw: Option<&'v Value>) -> Result<Option<&'v str>, Diagnostic> {
        match raw {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(Value::Null) => Err(self.fail(field, "is null")),
            Some(Value::Array(_)) => Err(self.fail(field, "is an array not 'string'")),
            Some(other) => Err(self.fail(field, format!("is {} not 'string'", describe(other)))),
        }
    }

    /// List option with any element types
    pub fn list<'v>(
        &self,
        field: &str,
        raw: Option<&'v Value>,
        non_empty: bool,
    ) -> Result<Option<&'v [Value]>, Diagnostic> {
        let items = match raw {
            None => return Ok(None),
            Some(Value::Array(items)) => items.as_slice(),
            Some(Value::Null) => return Err(self.fail(field, "is null")),
            Some(other) => return Err(self.fail(field, format!("is {} not an array", describe(other)))),
        };
        if non_empty && items.is_empty() {
            return Err(self.fail(field, "is empty"));
        }
        Ok(Some(items))
    }

    /// List-of-text option, each element checked in index order
    pub fn text_list<'v>(
        &self,
        field: &str,
        raw: Option<&'v Value>,
        rule: ListRule,
    ) -> Result<Option<&'v [Value]>, Diagnostic> {
        let Some(items) = self.list(field, raw, rule.non_empty)? else {
            return Ok(None);
        };
        for (i, item) in items.iter().enumerate() {
            let at = format!("{}[{}]", field, i);
            match item {
                Value::Array(inner) if rule.nested => {
                    if inner.is_empty() {
                        return Err(self.fail(&at, "is empty"));
                    }
                    for (j, tag) in inner.iter().enumerate() {
                        self.element(&format!("{}[{}]", at, j), tag, rule)?;
                    }
                }
                _ => self.element(&at, item, rule)?,
            }
        }
        Ok(Some(items))
    }

    fn element(&self, at: &str, item: &Value, rule: ListRule) -> Result<(), Diagnostic> {
        match item {
            Value::String(s) if rule.known_tags && !TypeTag::is_known(s) => {
                Err(self.fail(at, "is not a known type"))
            }
            Value::String(_) => Ok(()),
            Value::Null => Err(self.fail(at, "is null")),
            Value::Array(_) => Err(self.fail(at, "is an array not 'string'")),
            other => Err(self.fail(at, format!("is {} not 'string'", describe(other)))),
        }
    }

    /// Text-test option: pattern source or test function
    pub fn tester(&self, field: &str, raw: Option<&Value>) -> Result<Option<Tester>, Diagnostic> {
        match raw {
            None => Ok(None),
            Some(Value::String(source)) => Regex::new(source)
                .map(|re| Some(Tester::Pattern(re)))
                .map_err(|e| self.fail(field, format!("is not a valid pattern ({})", last_line(&e.to_string())))),
            Some(Value::Function(f)) => Ok(Some(Tester::Custom(f.clone()))),
            Some(Value::Null) => Err(self.fail(field, "is null")),
            Some(Value::Array(_)) => Err(self.fail(field, "is an array not a pattern or test function")),
            Some(other) => Err(self.fail(
                field,
                format!("is {} not a pattern or test function", describe(other)),
            )),
        }
    }

    /// `a` must not exceed `b` when both are set
    pub fn ordered(
        &self,
        low_field: &str,
        low: Option<f64>,
        high_field: &str,
        high: Option<f64>,
    ) -> Result<(), Diagnostic> {
        match (low, high) {
            (Some(low), Some(high)) if low > high => Err(self.fail(
                low_field,
                format!("is greater than `{}`", self.path(high_field)),
            )),
            _ => Ok(()),
        }
    }

    /// Every schema entry, recursively, in declaration order
    pub fn schema(&self, schema: Option<&Schema>) -> Result<(), Diagnostic> {
        let Some(schema) = schema else {
            return Ok(());
        };
        for (name, entry) in schema.iter() {
            self.nested(&format!("schema.{}", name)).entry(entry)?;
        }
        Ok(())
    }

    fn entry(&self, entry: &Options) -> Result<(), Diagnostic> {
        self.text_list("types", entry.types.as_ref(), ListRule::NESTED_TAGS)?;
        let gte = self.number("gte", entry.gte.as_ref(), Bound::Any)?;
        let lte = self.number("lte", entry.lte.as_ref(), Bound::Any)?;
        self.number("mod", entry.modulo.as_ref(), Bound::NonZero)?;
        self.ordered("gte", gte, "lte", lte)?;
        if only_text(entry.types.as_ref()) {
            self.text_list("is", entry.is.as_ref(), ListRule { non_empty: true, ..ListRule::TEXT })?;
            self.text_list("isnt", entry.isnt.as_ref(), ListRule::TEXT)?;
        } else {
            self.list("is", entry.is.as_ref(), true)?;
            self.list("isnt", entry.isnt.as_ref(), false)?;
        }
        let max = self.number("max", entry.max.as_ref(), Bound::NonNegative)?;
        let min = self.number("min", entry.min.as_ref(), Bound::NonNegative)?;
        self.ordered("min", min, "max", max)?;
        self.tester("rx", entry.rx.as_ref())?;
        let least = self.number("least", entry.least.as_ref(), Bound::NonNegative)?;
        let most = self.number("most", entry.most.as_ref(), Bound::NonNegative)?;
        self.ordered("least", least, "most", most)?;
        self.boolean("open", entry.open.as_ref())?;
        self.boolean("pass", entry.pass.as_ref())?;
        self.schema(entry.schema.as_ref())
    }
}

/// Whether a schema entry's `types` is exactly `["string"]`
fn only_text(types: Option<&Value>) -> bool {
    matches!(types, Some(Value::Array(tags)) if matches!(tags.as_slice(), [Value::String(tag)] if tag == "string"))
}

fn last_line(text: &str) -> &str {
    text.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or(text).trim()
}
