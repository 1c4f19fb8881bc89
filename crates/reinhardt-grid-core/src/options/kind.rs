//! Allowed-type kinds for option values

use serde_json::Value;
use std::fmt;

/// JSON shape an option value may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
	/// Any value.
	Any,
	/// `null`.
	Null,
	/// `true` / `false`.
	Bool,
	/// Integral number.
	Integer,
	/// Number with a fractional part (integers are accepted too).
	Float,
	/// Any number.
	Number,
	/// String.
	String,
	/// Array.
	Array,
	/// Object.
	Object,
}

impl OptionKind {
	/// Whether `value` has this shape.
	pub fn matches(self, value: &Value) -> bool {
		match self {
			OptionKind::Any => true,
			OptionKind::Null => value.is_null(),
			OptionKind::Bool => value.is_boolean(),
			OptionKind::Integer => value.is_i64() || value.is_u64(),
			OptionKind::Float | OptionKind::Number => value.is_number(),
			OptionKind::String => value.is_string(),
			OptionKind::Array => value.is_array(),
			OptionKind::Object => value.is_object(),
		}
	}

	/// The narrowest kind describing `value`.
	pub fn of(value: &Value) -> Self {
		match value {
			Value::Null => OptionKind::Null,
			Value::Bool(_) => OptionKind::Bool,
			Value::Number(n) if n.is_f64() => OptionKind::Float,
			Value::Number(_) => OptionKind::Integer,
			Value::String(_) => OptionKind::String,
			Value::Array(_) => OptionKind::Array,
			Value::Object(_) => OptionKind::Object,
		}
	}

	/// Lowercase name used in error messages.
	pub fn as_str(self) -> &'static str {
		match self {
			OptionKind::Any => "any",
			OptionKind::Null => "null",
			OptionKind::Bool => "bool",
			OptionKind::Integer => "int",
			OptionKind::Float => "float",
			OptionKind::Number => "number",
			OptionKind::String => "string",
			OptionKind::Array => "array",
			OptionKind::Object => "object",
		}
	}
}

impl fmt::Display for OptionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(OptionKind::Integer, json!(3), true)]
	#[case(OptionKind::Integer, json!(3.5), false)]
	#[case(OptionKind::Float, json!(3), true)]
	#[case(OptionKind::Number, json!(-1.25), true)]
	#[case(OptionKind::String, json!(null), false)]
	#[case(OptionKind::Null, json!(null), true)]
	#[case(OptionKind::Any, json!({"a": 1}), true)]
	#[case(OptionKind::Object, json!([]), false)]
	fn test_matches(#[case] kind: OptionKind, #[case] value: Value, #[case] expected: bool) {
		assert_eq!(kind.matches(&value), expected);
	}

	#[rstest]
	fn test_of_reports_narrowest_kind() {
		assert_eq!(OptionKind::of(&json!(1)), OptionKind::Integer);
		assert_eq!(OptionKind::of(&json!(1.5)), OptionKind::Float);
		assert_eq!(OptionKind::of(&json!("x")), OptionKind::String);
	}
}
