//! Built-in capability set of the value model.
//!
//! A capability is a named member a value exposes. Capability guards probe
//! for presence ([`respond_to`]); property guards additionally read the
//! result ([`invoke_capability`]). Objects expose their own members;
//! every other shape exposes a fixed built-in set.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use super::{Value, ValueType};

// Capability name -> value shapes that expose it. `to_s` is universal and
// handled outside the table.
static BUILTIN_CAPABILITIES: Lazy<BTreeMap<&'static str, &'static [ValueType]>> =
    Lazy::new(|| {
        BTreeMap::from([
            (
                "length",
                &[ValueType::Str, ValueType::List, ValueType::Map][..],
            ),
            (
                "empty?",
                &[ValueType::Str, ValueType::List, ValueType::Map][..],
            ),
            ("each", &[ValueType::List, ValueType::Map][..]),
            ("first", &[ValueType::List][..]),
            ("last", &[ValueType::List][..]),
            ("keys", &[ValueType::Map][..]),
            ("values", &[ValueType::Map][..]),
            ("abs", &[ValueType::Number][..]),
            ("zero?", &[ValueType::Number][..]),
        ])
    });

/// Does `value` expose a capability called `name`?
///
/// Presence only; nothing is invoked. Objects respond to their member names,
/// everything responds to `to_s`.
pub fn respond_to(value: &Value, name: &str) -> bool {
    if name == "to_s" {
        return true;
    }
    match value {
        Value::Object(obj) => obj.members.contains_key(name),
        _ => BUILTIN_CAPABILITIES
            .get(name)
            .is_some_and(|shapes| shapes.iter().any(|ty| ty.matches(value))),
    }
}

/// Invoke (or read) the capability `name` on `value`.
///
/// Returns `None` exactly when [`respond_to`] is `false`. Reading a member
/// capability on an object yields the member's value; `each` yields the
/// collection itself (the iteration seam, not an iterator).
pub fn invoke_capability(value: &Value, name: &str) -> Option<Value> {
    if name == "to_s" {
        return Some(Value::Str(value.to_string()));
    }
    match (value, name) {
        (Value::Object(obj), _) => obj.members.get(name).cloned(),
        (Value::Str(s), "length") => Some(Value::Int(s.chars().count() as i64)),
        (Value::Str(s), "empty?") => Some(Value::Bool(s.is_empty())),
        (Value::List(items), "length") => Some(Value::Int(items.len() as i64)),
        (Value::List(items), "empty?") => Some(Value::Bool(items.is_empty())),
        (Value::List(items), "first") => Some(items.first().cloned().unwrap_or(Value::Nil)),
        (Value::List(items), "last") => Some(items.last().cloned().unwrap_or(Value::Nil)),
        (Value::List(_), "each") | (Value::Map(_), "each") => Some(value.clone()),
        (Value::Map(entries), "length") => Some(Value::Int(entries.len() as i64)),
        (Value::Map(entries), "empty?") => Some(Value::Bool(entries.is_empty())),
        (Value::Map(entries), "keys") => Some(Value::List(
            entries.keys().map(|k| Value::Str(k.clone())).collect(),
        )),
        (Value::Map(entries), "values") => Some(Value::List(entries.values().cloned().collect())),
        (Value::Int(i), "abs") => Some(Value::Int(i.abs())),
        (Value::Int(i), "zero?") => Some(Value::Bool(*i == 0)),
        (Value::Float(x), "abs") => Some(Value::Float(x.abs())),
        (Value::Float(x), "zero?") => Some(Value::Bool(*x == 0.0)),
        _ => None,
    }
}

/// All capability names `value` responds to, sorted.
pub fn capability_names(value: &Value) -> Vec<String> {
    let mut names = vec!["to_s".to_string()];
    match value {
        Value::Object(obj) => names.extend(obj.members.keys().cloned()),
        _ => names.extend(
            BUILTIN_CAPABILITIES
                .iter()
                .filter(|(_, shapes)| shapes.iter().any(|ty| ty.matches(value)))
                .map(|(name, _)| name.to_string()),
        ),
    }
    names.sort();
    names
}
