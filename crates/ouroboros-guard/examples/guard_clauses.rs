//! Guard clauses at a function boundary
//!
//! Run with: cargo run -p ouroboros-guard --example guard_clauses

use ouroboros_guard::narrow::{boxed, narrow, Check};
use ouroboros_guard::{
    validate_array, validate_null, validate_object, validate_string, FailureReport, Options, Schema,
    Value,
};

/// Validate the arguments of `schedule(title, slots, owner)` and report every problem at once
fn schedule(title: &Value, slots: &Value, owner: &Value) -> Result<(), FailureReport> {
    let (failures, checks) = narrow(
        Options::new().begin("schedule()"),
        vec![
            Check::one(validate_string),
            Check::one(validate_array),
            Check::any_of(vec![boxed(validate_null), boxed(validate_object)]),
        ],
    );
    let (text, list, owner_check) = (&checks[0], &checks[1], &checks[2]);

    let _ = text.check(title, Some("title"), Some(&Options::new().min(1).max(60)));
    let _ = list.check(
        slots,
        Some("slots"),
        Some(&Options::new().least(1).types(["number"]).pass(true).gte(0).lte(23)),
    );
    let owner_schema = Schema::new()
        .property("id", Options::new().types(["number"]).gte(1))
        .property("email", Options::new().types(["string"]).rx("^[^@]+@[^@]+$"));
    let _ = owner_check.check(owner, Some("owner"), Some(&Options::new().schema(owner_schema)));

    failures.into_result()
}

fn main() {
    let owner = Value::object([("id", Value::from(7)), ("email", Value::from("ada@example.com"))]);
    match schedule(&Value::from("Standup"), &Value::from(vec![9, 13]), &owner) {
        Ok(()) => println!("valid call"),
        Err(report) => println!("{}", report),
    }

    let owner = Value::object([("id", Value::from(0))]);
    match schedule(&Value::from(""), &Value::from(vec![9, 25]), &owner) {
        Ok(()) => println!("valid call"),
        Err(report) => println!("{}", report),
    }

    match schedule(&Value::from("Review"), &Value::from("9,13"), &Value::Null) {
        Ok(()) => println!("valid call"),
        Err(report) => println!("{}", report),
    }
}
