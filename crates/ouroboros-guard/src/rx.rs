//! Text predicates for the `rx` and `key` options
//!
//! Anything that can answer "does this text pass?" can drive the `rx` and
//! `key` options. Regular expressions display as `/source/` in messages;
//! other testers fall back to the generic "custom test" wording.

use crate::types::{Function, Value};
use regex::Regex;

/// Capability of testing text
pub trait Rxish {
    /// Whether `text` passes the test
    fn test(&self, text: &str) -> bool;

    /// Display form used in diagnostics, `None` for opaque testers
    fn display(&self) -> Option<String> {
        None
    }
}

impl Rxish for Regex {
    fn test(&self, text: &str) -> bool {
        self.is_match(text)
    }

    fn display(&self) -> Option<String> {
        Some(format!("/{}/", self.as_str()))
    }
}

impl Rxish for Function {
    fn test(&self, text: &str) -> bool {
        self.call(&[Value::String(text.to_string())]).is_truthy()
    }
}

/// Tester resolved from a raw `rx`/`key` option value
#[derive(Debug, Clone)]
pub enum Tester {
    /// Compiled regular expression
    Pattern(Regex),
    /// Custom test function
    Custom(Function),
}

impl Rxish for Tester {
    fn test(&self, text: &str) -> bool {
        match self {
            Self::Pattern(re) => re.test(text),
            Self::Custom(f) => f.test(text),
        }
    }

    fn display(&self) -> Option<String> {
        match self {
            Self::Pattern(re) => re.display(),
            Self::Custom(f) => f.display(),
        }
    }
}

/// Failure phrase for a tester: `fails /^a/` or `fails custom test`
pub fn fails_phrase(rx: &dyn Rxish) -> String {
    match rx.display() {
        Some(shown) => format!("fails {}", shown),
        None => "fails custom test".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_tester() {
        let re = Regex::new(r"^\d+$").unwrap();
        assert!(re.test("123"));
        assert!(!Rxish::test(&re, "12a"));
        assert_eq!(fails_phrase(&re), r"fails /^\d+$/");
    }

    #[test]
    fn test_function_tester() {
        let upper = Function::predicate("upper", |s| s.chars().all(char::is_uppercase));
        assert!(upper.test("ABC"));
        assert!(!upper.test("AbC"));
        assert_eq!(fails_phrase(&upper), "fails custom test");
    }

    #[test]
    fn test_truthy_results_pass() {
        let length = Function::new("length", |args| match args.first() {
            Some(Value::String(s)) => Value::Number(s.len() as f64),
            _ => Value::Undefined,
        });
        assert!(length.test("a"));
        assert!(!length.test(""));
    }
}
