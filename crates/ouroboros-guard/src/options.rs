//! Constraint options
//!
//! `Options` is the single configuration record every validator reads.
//! All fields are independent and optional; an absent field disables its
//! feature. Constraint values are kept as raw [`Value`]s so that options
//! loaded from configuration can be malformed and still be reported as a
//! readable diagnostic instead of a panic.

use crate::errors::OptionsError;
use crate::format::describe;
use crate::types::Value;

// ============================================================================
// Options
// ============================================================================

/// Constraint options for a validation call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    /// Message prefix, rendered as `"{begin}: "`
    pub begin: Option<String>,
    /// Expected type tag, or list of tags (`type`)
    pub kind: Option<Value>,
    /// Permitted tags for container items or schema properties
    pub types: Option<Value>,
    /// Allow-list of exact values (or constructors, for objects)
    pub is: Option<Value>,
    /// Deny-list of exact values
    pub isnt: Option<Value>,
    /// Number must be greater than or equal
    pub gte: Option<Value>,
    /// Number must be less than or equal
    pub lte: Option<Value>,
    /// Number must be divisible by (`mod`)
    pub modulo: Option<Value>,
    /// Minimum text length
    pub min: Option<Value>,
    /// Maximum text length
    pub max: Option<Value>,
    /// Minimum container size
    pub least: Option<Value>,
    /// Maximum container size
    pub most: Option<Value>,
    /// Text test: pattern source or test function
    pub rx: Option<Value>,
    /// Dictionary key test: pattern source or test function
    pub key: Option<Value>,
    /// Permit properties not declared in `schema`
    pub open: Option<Value>,
    /// Validate numeric and text container items with these same options
    pub pass: Option<Value>,
    /// Expected shape of each property
    pub schema: Option<Schema>,
    /// Delimiter for reading text as an array
    pub split: Option<Value>,
}

impl Options {
    /// Create empty options (every feature disabled)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message prefix
    pub fn begin(mut self, begin: impl Into<String>) -> Self {
        self.begin = Some(begin.into());
        self
    }

    /// Set the expected type tag (or list of tags)
    pub fn kind(mut self, kind: impl Into<Value>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the permitted item/property tags
    pub fn types(mut self, types: impl Into<Value>) -> Self {
        self.types = Some(types.into());
        self
    }

    /// Set the allow-list
    pub fn is(mut self, allowed: impl Into<Value>) -> Self {
        self.is = Some(allowed.into());
        self
    }

    /// Set the deny-list
    pub fn isnt(mut self, denied: impl Into<Value>) -> Self {
        self.isnt = Some(denied.into());
        self
    }

    /// Set the inclusive lower bound
    pub fn gte(mut self, gte: impl Into<Value>) -> Self {
        self.gte = Some(gte.into());
        self
    }

    /// Set the inclusive upper bound
    pub fn lte(mut self, lte: impl Into<Value>) -> Self {
        self.lte = Some(lte.into());
        self
    }

    /// Set the divisor
    pub fn modulo(mut self, modulo: impl Into<Value>) -> Self {
        self.modulo = Some(modulo.into());
        self
    }

    /// Set the minimum text length
    pub fn min(mut self, min: impl Into<Value>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Set the maximum text length
    pub fn max(mut self, max: impl Into<Value>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Set the minimum container size
    pub fn least(mut self, least: impl Into<Value>) -> Self {
        self.least = Some(least.into());
        self
    }

    /// Set the maximum container size
    pub fn most(mut self, most: impl Into<Value>) -> Self {
        self.most = Some(most.into());
        self
    }

    /// Set the text test
    pub fn rx(mut self, rx: impl Into<Value>) -> Self {
        self.rx = Some(rx.into());
        self
    }

    /// Set the dictionary key test
    pub fn key(mut self, key: impl Into<Value>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Permit (or forbid) undeclared properties
    pub fn open(mut self, open: impl Into<Value>) -> Self {
        self.open = Some(open.into());
        self
    }

    /// Recurse into numeric and text container items
    pub fn pass(mut self, pass: impl Into<Value>) -> Self {
        self.pass = Some(pass.into());
        self
    }

    /// Set the property schema
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set the delimiter for reading text as an array
    pub fn split(mut self, split: impl Into<Value>) -> Self {
        self.split = Some(split.into());
        self
    }

    /// Field-wise merge; fields set in `overrides` win
    pub fn merged(&self, overrides: &Options) -> Options {
        macro_rules! pick {
            ($($field:ident),* $(,)?) => {
                Options {
                    $($field: overrides.$field.clone().or_else(|| self.$field.clone()),)*
                }
            };
        }
        pick!(
            begin, kind, types, is, isnt, gte, lte, modulo, min, max, least, most, rx, key, open,
            pass, schema, split,
        )
    }

    /// Copy of these options, inheriting `begin` from a parent when unset
    pub(crate) fn inheriting_begin(&self, begin: Option<&str>) -> Options {
        let mut options = self.clone();
        if options.begin.is_none() {
            options.begin = begin.map(str::to_string);
        }
        options
    }

    /// Whether `open` is exactly `true`
    pub(crate) fn is_open(&self) -> bool {
        matches!(self.open, Some(Value::Bool(true)))
    }

    /// Parse options from a record value
    ///
    /// Keys use the option names as they appear in messages (`type`, `mod`).
    /// `undefined` entries are treated as absent.
    pub fn from_value(value: &Value) -> Result<Options, OptionsError> {
        Self::from_value_at(value, "options")
    }

    fn from_value_at(value: &Value, path: &str) -> Result<Options, OptionsError> {
        let Value::Object(entries) = value else {
            return Err(if path == "options" {
                OptionsError::NotARecord(describe(value))
            } else {
                OptionsError::WrongShape {
                    path: path.to_string(),
                    expected: "a record",
                    found: describe(value),
                }
            });
        };

        let mut options = Options::new();
        for (name, raw) in entries {
            if raw.is_undefined() {
                continue;
            }
            let slot = match name.as_str() {
                "begin" => {
                    let Value::String(begin) = raw else {
                        return Err(OptionsError::WrongShape {
                            path: format!("{}.begin", path),
                            expected: "text",
                            found: describe(raw),
                        });
                    };
                    options.begin = Some(begin.clone());
                    continue;
                }
                "schema" => {
                    options.schema = Some(Schema::from_value_at(raw, &format!("{}.schema", path))?);
                    continue;
                }
                "type" => &mut options.kind,
                "types" => &mut options.types,
                "is" => &mut options.is,
                "isnt" => &mut options.isnt,
                "gte" => &mut options.gte,
                "lte" => &mut options.lte,
                "mod" => &mut options.modulo,
                "min" => &mut options.min,
                "max" => &mut options.max,
                "least" => &mut options.least,
                "most" => &mut options.most,
                "rx" => &mut options.rx,
                "key" => &mut options.key,
                "open" => &mut options.open,
                "pass" => &mut options.pass,
                "split" => &mut options.split,
                _ => return Err(OptionsError::UnknownOption(format!("{}.{}", path, name))),
            };
            *slot = Some(raw.clone());
        }
        Ok(options)
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Expected shape of each property of a record, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    entries: Vec<(String, Options)>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property (builder style)
    pub fn property(mut self, name: impl Into<String>, options: Options) -> Self {
        self.insert(name, options);
        self
    }

    /// Declare a property; redeclaring a name replaces it in place
    pub fn insert(&mut self, name: impl Into<String>, options: Options) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = options,
            None => self.entries.push((name, options)),
        }
    }

    /// Options declared for a property
    pub fn get(&self, name: &str) -> Option<&Options> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, options)| options)
    }

    /// Whether a property is declared
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declared properties in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Options)> {
        self.entries.iter().map(|(k, options)| (k.as_str(), options))
    }

    /// Number of declared properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no property is declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_value_at(value: &Value, path: &str) -> Result<Schema, OptionsError> {
        let Value::Object(entries) = value else {
            return Err(OptionsError::WrongShape {
                path: path.to_string(),
                expected: "a record",
                found: describe(value),
            });
        };
        let mut schema = Schema::new();
        for (name, raw) in entries {
            schema.insert(name.clone(), Options::from_value_at(raw, &format!("{}.{}", path, name))?);
        }
        Ok(schema)
    }
}

impl<K: Into<String>> FromIterator<(K, Options)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, Options)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, options) in iter {
            schema.insert(name, options);
        }
        schema
    }
}
