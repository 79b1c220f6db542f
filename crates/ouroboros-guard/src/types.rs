//! Runtime values and their type tags
//!
//! This module defines the value model every validator inspects. A `Value`
//! carries enough shape information to answer three questions: which coarse
//! type tag it has, whether it is a sequence, and (for records) which
//! properties it holds.

use crate::errors::OptionsError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// ============================================================================
// TypeTag - coarse runtime category
// ============================================================================

/// Coarse runtime category of a value
///
/// `null`, arrays and records all share the `object` tag. Validators that
/// need to tell them apart inspect the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Undefined,
    Object,
    Boolean,
    Number,
    BigInt,
    String,
    Symbol,
    Function,
}

impl TypeTag {
    /// Every recognised tag, in the order they are listed in messages
    pub const ALL: [TypeTag; 8] = [
        Self::BigInt,
        Self::Boolean,
        Self::Function,
        Self::Number,
        Self::Object,
        Self::String,
        Self::Symbol,
        Self::Undefined,
    ];

    /// Tag text as it appears in options and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Object => "object",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Function => "function",
        }
    }

    /// Check whether `text` names a recognised tag
    pub fn is_known(text: &str) -> bool {
        text.parse::<TypeTag>().is_ok()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|tag| tag.as_str() == s)
            .copied()
            .ok_or_else(|| OptionsError::UnknownTypeTag(s.to_string()))
    }
}

// ============================================================================
// Function - named callable
// ============================================================================

type Body = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A named callable value
///
/// Functions play two roles: as plain values (checked by
/// `validate_function`), and as constructors whose name is matched against
/// `Value::Instance::class` by the object validator's `is` list. A function
/// can also serve as a custom `rx` test, in which case it is called with the
/// text under test and its result is judged by truthiness.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    body: Arc<Body>,
}

impl Function {
    /// Create a function from a name and a body
    pub fn new(
        name: impl Into<Arc<str>>,
        body: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    /// Create a constructor marker for the class `name`
    pub fn constructor(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, |_| Value::Undefined)
    }

    /// Create a one-argument text predicate, for use as a custom `rx` test
    pub fn predicate(
        name: impl Into<Arc<str>>,
        test: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, move |args| match args.first() {
            Some(Value::String(s)) => Value::Bool(test(s)),
            _ => Value::Bool(false),
        })
    }

    /// Function name (empty for anonymous functions)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function
    pub fn call(&self, args: &[Value]) -> Value {
        (self.body)(args)
    }

    /// Create an instance record of this constructor
    pub fn instantiate(&self, fields: Vec<(String, Value)>) -> Value {
        Value::Instance {
            class: self.name.to_string(),
            fields,
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "[Function (anonymous)]")
        } else {
            write!(f, "[Function: {}]", self.name)
        }
    }
}

// ============================================================================
// Value Enum - Runtime values to be validated
// ============================================================================

/// Runtime value that can be validated
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value (missing property, unset argument)
    Undefined,
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (NaN and infinities included)
    Number(f64),
    /// Arbitrary-size integer
    BigInt(i128),
    /// Text value
    String(String),
    /// Symbol with its description
    Symbol(String),
    /// Callable value
    Function(Function),
    /// Ordered sequence
    Array(Vec<Value>),
    /// Plain record (insertion-ordered key-value pairs)
    Object(Vec<(String, Value)>),
    /// Record created by a named constructor
    Instance {
        /// Constructor name
        class: String,
        /// Own properties
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    /// Coarse runtime type tag
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Undefined => TypeTag::Undefined,
            Self::Null | Self::Array(_) | Self::Object(_) | Self::Instance { .. } => TypeTag::Object,
            Self::Bool(_) => TypeTag::Boolean,
            Self::Number(_) => TypeTag::Number,
            Self::BigInt(_) => TypeTag::BigInt,
            Self::String(_) => TypeTag::String,
            Self::Symbol(_) => TypeTag::Symbol,
            Self::Function(_) => TypeTag::Function,
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Check if value is a sequence
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Check if value is the not-a-number sentinel
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Number(n) if n.is_nan())
    }

    /// Own properties of a record, `None` for every other value
    pub fn entries(&self) -> Option<&[(String, Value)]> {
        match self {
            Self::Object(fields) | Self::Instance { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Look up a record property
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Truthiness, used to judge the result of custom test functions
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::BigInt(n) => *n != 0,
            Self::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Build a plain record from key-value pairs
    pub fn object<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Number(n as f64)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_tag() {
        assert_eq!(Value::Undefined.type_tag(), TypeTag::Undefined);
        assert_eq!(Value::Null.type_tag(), TypeTag::Object);
        assert_eq!(Value::Bool(true).type_tag(), TypeTag::Boolean);
        assert_eq!(Value::Number(f64::NAN).type_tag(), TypeTag::Number);
        assert_eq!(Value::BigInt(7).type_tag(), TypeTag::BigInt);
        assert_eq!(Value::from("x").type_tag(), TypeTag::String);
        assert_eq!(Value::Symbol("s".into()).type_tag(), TypeTag::Symbol);
        assert_eq!(Value::Array(vec![]).type_tag(), TypeTag::Object);
        assert_eq!(Value::Object(vec![]).type_tag(), TypeTag::Object);
        assert_eq!(
            Value::Function(Function::constructor("Date")).type_tag(),
            TypeTag::Function
        );
    }

    #[test]
    fn test_type_tag_parse() {
        assert_eq!("bigint".parse::<TypeTag>().unwrap(), TypeTag::BigInt);
        assert!(TypeTag::is_known("symbol"));
        assert!(!TypeTag::is_known("array"));
        assert!(matches!(
            "integer".parse::<TypeTag>(),
            Err(OptionsError::UnknownTypeTag(t)) if t == "integer"
        ));
    }

    #[test]
    fn test_value_get() {
        let value = Value::object([("a", Value::from(1)), ("b", Value::Null)]);
        assert_eq!(value.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(value.get("b"), Some(&Value::Null));
        assert_eq!(value.get("c"), None);
        assert_eq!(Value::from(3).get("a"), None);
    }

    #[test]
    fn test_value_truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::Array(vec![]).is_truthy());
    }

    #[test]
    fn test_function_identity() {
        let date = Function::constructor("Date");
        let other = Function::constructor("Date");
        assert_eq!(date, date.clone());
        assert_ne!(date, other);
        assert_eq!(format!("{:?}", date), "[Function: Date]");
    }

    #[test]
    fn test_function_predicate() {
        let even = Function::predicate("even", |s| s.len() % 2 == 0);
        assert_eq!(even.call(&[Value::from("ab")]), Value::Bool(true));
        assert_eq!(even.call(&[Value::from("abc")]), Value::Bool(false));
        assert_eq!(even.call(&[]), Value::Bool(false));
    }
}
