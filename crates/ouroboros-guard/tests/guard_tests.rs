//! Guard-clause validation tests

use ouroboros_guard::narrow::{boxed, narrow, Check};
use ouroboros_guard::*;

fn message(verdict: Verdict) -> String {
    verdict.unwrap_err().message
}

fn sample_values() -> Vec<Value> {
    vec![
        Value::Undefined,
        Value::Null,
        Value::Bool(false),
        Value::Number(0.0),
        Value::Number(f64::NAN),
        Value::BigInt(12),
        Value::from("text"),
        Value::Symbol("id".to_string()),
        Value::Function(Function::constructor("Date")),
        Value::from(vec![1, 2]),
        Value::object([("a", Value::from(1))]),
        Function::constructor("Date").instantiate(vec![]),
    ]
}

// ============================================================================
// Documented Scenarios
// ============================================================================

#[test]
fn test_number_below_gte() {
    assert_eq!(
        message(validate_number(&Value::from(5), Some("x"), &Options::new().gte(10))),
        "`x` 5 is not gte 10"
    );
}

#[test]
fn test_record_is_not_an_array() {
    assert_eq!(
        message(validate_array(&Value::Object(vec![]), None, &Options::new())),
        "A value is type 'object' not an array"
    );
}

#[test]
fn test_null_is_not_a_regular_object() {
    assert_eq!(
        message(validate_object(&Value::Null, Some("lookup"), &Options::new().begin("proc()"))),
        "proc(): `lookup` is null not a regular object"
    );
}

#[test]
fn test_string_below_min() {
    let msg = message(validate_string(&Value::from("ab"), Some("s"), &Options::new().min(3)));
    assert!(msg.contains("'ab'"));
    assert!(msg.ends_with("not min 3"));
}

#[test]
fn test_schema_missing_property_follows_identifier() {
    let options = Options::new().schema(Schema::new().property("a", Options::new().types(["number"])));
    let empty = Value::Object(vec![]);
    assert_eq!(message(validate_object(&empty, None, &options)), "`a` is missing");
    assert_eq!(message(validate_object(&empty, Some("cfg"), &options)), "`cfg.a` is missing");
}

#[test]
fn test_or_group_of_exact_matches() {
    let exactly = |text: &'static str| {
        boxed(move |value: &Value, identifier: Option<&str>, options: &Options| {
            validate_string(value, identifier, &options.merged(&Options::new().is([text])))
        })
    };
    let (failures, checks) = narrow(
        Options::new(),
        vec![Check::any_of(vec![exactly("A"), exactly("B"), exactly("C")])],
    );
    let msg = message(checks[0].check(&Value::from("D"), Some("x"), None));
    assert!(msg.ends_with("not 'A'; or 'B'; or 'C'"));
    assert_eq!(failures.messages(), vec![msg]);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_idempotence() {
    let options = Options::new().begin("f()").gte(0).lte(10).modulo(3);
    for value in sample_values() {
        assert_eq!(
            validate_number(&value, Some("n"), &options),
            validate_number(&value, Some("n"), &options)
        );
        assert_eq!(
            validate_object(&value, None, &Options::new()),
            validate_object(&value, None, &Options::new())
        );
    }
}

#[test]
fn test_failures_are_never_empty() {
    let options = Options::new();
    let validators: [fn(&Value, Option<&str>, &Options) -> Verdict; 8] = [
        validate_number,
        validate_string,
        validate_boolean,
        validate_function,
        validate_null,
        validate_array,
        validate_dictionary,
        validate_object,
    ];
    for validator in validators {
        for value in sample_values() {
            if let Err(diagnostic) = validator(&value, None, &options) {
                assert!(!diagnostic.message.is_empty());
            }
        }
    }
}

#[test]
fn test_type_tag_totality() {
    for value in sample_values() {
        for tag in TypeTag::ALL {
            let verdict = validate_type(&value, Some("v"), &Options::new().kind(tag.as_str()));
            assert_eq!(verdict.is_ok(), value.type_tag() == tag, "{:?} as {}", value, tag);
        }
    }
}

#[test]
fn test_nan_is_only_rejected_by_number() {
    let nan = Value::Number(f64::NAN);
    assert!(validate_type(&nan, Some("x"), &Options::new().kind("number")).is_ok());
    assert_eq!(
        message(validate_number(&nan, Some("x"), &Options::new())),
        "`x` is the special `NaN` value"
    );
}

#[test]
fn test_gte_above_lte_always_wins() {
    let options = Options::new().gte(10).lte(1);
    for n in [-5.0, 0.0, 5.0, 50.0, f64::NAN] {
        let diagnostic = validate_number(&Value::Number(n), Some("x"), &options).unwrap_err();
        assert!(diagnostic.is_options_invalid());
        assert_eq!(
            diagnostic.message,
            "Cannot validate `x`, `options.gte` is greater than `options.lte`"
        );
    }
}

#[test]
fn test_missing_reported_before_unexpected() {
    let options = Options::new().schema(
        Schema::new()
            .property("id", Options::new().types(["number"]))
            .property("name", Options::new().types(["string"])),
    );
    let value = Value::object([("extra", Value::from(true)), ("id", Value::from(1))]);
    assert_eq!(message(validate_object(&value, Some("user"), &options)), "`user.name` is missing");
}

#[test]
fn test_aggregation_keeps_call_order() {
    let (failures, checks) = narrow(
        Options::new().begin("save()"),
        vec![
            Check::one(validate_string),
            Check::one(validate_number),
            Check::one(validate_array),
        ],
    );
    let (string, number, array) = (&checks[0], &checks[1], &checks[2]);

    let _ = array.check(&Value::Null, Some("tags"), None);
    let _ = string.check(&Value::from("ok"), Some("name"), None);
    let _ = number.check(&Value::from(-1), Some("age"), Some(&Options::new().gte(0)));
    let _ = string.check(&Value::from(""), Some("title"), Some(&Options::new().min(1)));

    assert_eq!(
        failures.messages(),
        vec![
            "save(): `tags` is null not an array".to_string(),
            "save(): `age` -1 is not gte 0".to_string(),
            "save(): `title` '' has length 0, not min 1".to_string(),
        ]
    );
    let report = failures.into_result().unwrap_err();
    assert!(report.to_string().starts_with("3 validation failure(s): "));
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_options_invalid_is_distinguishable() {
    let diagnostic = validate_string(&Value::from("a"), Some("s"), &Options::new().min("3")).unwrap_err();
    assert_eq!(diagnostic.kind, DiagnosticKind::OptionsInvalid);
    assert_eq!(
        diagnostic.message,
        "Cannot validate `s`, `options.min` is type 'string' not 'number'"
    );

    let diagnostic = validate_string(&Value::from("a"), Some("s"), &Options::new().min(3)).unwrap_err();
    assert_eq!(diagnostic.kind, DiagnosticKind::ValueInvalid);
}

#[test]
fn test_options_from_value_drive_validators() {
    let raw = Value::object([
        ("begin", Value::from("register()")),
        (
            "schema",
            Value::object([
                (
                    "email",
                    Value::object([("types", Value::from(["string"])), ("rx", Value::from("^[^@]+@[^@]+$"))]),
                ),
                (
                    "tags",
                    Value::object([("types", Value::from(vec![Value::from(["string"])]))]),
                ),
            ]),
        ),
    ]);
    let options = Options::from_value(&raw).unwrap();

    let good = Value::object([
        ("email", Value::from("a@b.c")),
        ("tags", Value::from(vec!["x", "y"])),
    ]);
    assert!(validate_object(&good, Some("form"), &options).is_ok());

    let bad = Value::object([
        ("email", Value::from("nope")),
        ("tags", Value::from(vec!["x"])),
    ]);
    assert_eq!(
        message(validate_object(&bad, Some("form"), &options)),
        "register(): `form.email` 'nope' fails /^[^@]+@[^@]+$/"
    );
}

#[test]
fn test_custom_test_function() {
    let even_length = Function::predicate("evenLength", |text| text.chars().count() % 2 == 0);
    let options = Options::new().rx(even_length);
    assert!(validate_string(&Value::from("ab"), Some("s"), &options).is_ok());
    assert_eq!(
        message(validate_string(&Value::from("abc"), Some("s"), &options)),
        "`s` 'abc' fails custom test"
    );
}

#[test]
fn test_dictionary_of_arrays_with_pass() {
    let options = Options::new().types(["number"]).pass(true).gte(0);
    let scores = Value::object([("ann", Value::from(1)), ("bob", Value::from(-3))]);
    assert_eq!(
        message(validate_dictionary(&scores, Some("scores"), &options)),
        "`scores.bob` -3 is not gte 0"
    );
}

#[test]
fn test_long_text_is_truncated_in_messages() {
    let long = "x".repeat(100);
    let msg = message(validate_string(&Value::from(long.as_str()), Some("s"), &Options::new().max(5)));
    assert!(msg.len() < 80);
    assert!(msg.contains("..."));
    assert!(msg.ends_with("has length 100, not max 5"));
}
