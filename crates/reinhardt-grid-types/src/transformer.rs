//! Built-in data transformers
//!
//! Display transformers turn raw row values into what a column shows;
//! parse transformers turn values submitted to a filter into typed values.
//! All of them pass `null` through untouched.

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use reinhardt_grid_core::{DataTransformer, OptionKind, TransformError};
use serde_json::{Map, Number, Value};
use std::fmt::Write;

fn unexpected(transformer: &str, expected: &str, value: &Value) -> TransformError {
	TransformError::UnexpectedType {
		transformer: transformer.to_string(),
		expected: expected.to_string(),
		actual: OptionKind::of(value).to_string(),
	}
}

fn failed(transformer: &str, message: impl Into<String>) -> TransformError {
	TransformError::Failed {
		transformer: transformer.to_string(),
		message: message.into(),
	}
}

/// Whether `format` is a usable strftime format.
pub fn is_valid_date_format(format: &str) -> bool {
	!format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Replaces `null` with a fixed value.
#[derive(Debug, Clone)]
pub struct DefaultValue {
	value: Value,
}

impl DefaultValue {
	/// Creates the transformer.
	pub fn new(value: Value) -> Self {
		Self { value }
	}
}

impl DataTransformer for DefaultValue {
	fn name(&self) -> &str {
		"default_value"
	}

	fn transform(&self, value: Value, _row: &Value) -> Result<Value, TransformError> {
		Ok(if value.is_null() { self.value.clone() } else { value })
	}
}

/// Converts scalars to strings, optionally trimmed and truncated.
#[derive(Debug, Clone, Default)]
pub struct StringTransformer {
	trim: bool,
	max_length: Option<usize>,
}

impl StringTransformer {
	/// Creates the transformer.
	pub fn new(trim: bool, max_length: Option<usize>) -> Self {
		Self { trim, max_length }
	}
}

impl DataTransformer for StringTransformer {
	fn name(&self) -> &str {
		"string"
	}

	fn transform(&self, value: Value, _row: &Value) -> Result<Value, TransformError> {
		let mut text = match value {
			Value::Null => return Ok(Value::Null),
			Value::String(s) => s,
			Value::Bool(b) => b.to_string(),
			Value::Number(n) => n.to_string(),
			other => return Err(unexpected(self.name(), "scalar", &other)),
		};
		if self.trim {
			text = text.trim().to_string();
		}
		if let Some(max) = self.max_length
			&& text.chars().count() > max
		{
			text = text.chars().take(max).collect();
		}
		Ok(Value::String(text))
	}
}

/// Formats numbers with fixed decimals and custom separators.
#[derive(Debug, Clone)]
pub struct NumberFormat {
	decimals: Option<usize>,
	decimal_separator: String,
	thousands_separator: String,
}

impl NumberFormat {
	/// Creates the transformer.
	pub fn new(
		decimals: Option<usize>,
		decimal_separator: impl Into<String>,
		thousands_separator: impl Into<String>,
	) -> Self {
		Self {
			decimals,
			decimal_separator: decimal_separator.into(),
			thousands_separator: thousands_separator.into(),
		}
	}

	fn format(&self, number: &Number) -> String {
		let plain = match (self.decimals, number.as_f64()) {
			(Some(decimals), Some(n)) => format!("{n:.decimals$}"),
			_ => number.to_string(),
		};
		let (sign, unsigned) = match plain.strip_prefix('-') {
			Some(rest) => ("-", rest),
			None => ("", plain.as_str()),
		};
		let (integer, fraction) = match unsigned.split_once('.') {
			Some((integer, fraction)) => (integer, Some(fraction)),
			None => (unsigned, None),
		};

		let mut grouped = String::with_capacity(plain.len() + integer.len() / 3);
		for (i, digit) in integer.chars().enumerate() {
			if i > 0 && (integer.len() - i) % 3 == 0 {
				grouped.push_str(&self.thousands_separator);
			}
			grouped.push(digit);
		}

		match fraction {
			Some(fraction) => format!("{sign}{grouped}{}{fraction}", self.decimal_separator),
			None => format!("{sign}{grouped}"),
		}
	}
}

impl DataTransformer for NumberFormat {
	fn name(&self) -> &str {
		"number_format"
	}

	fn transform(&self, value: Value, _row: &Value) -> Result<Value, TransformError> {
		let number = match &value {
			Value::Null => return Ok(Value::Null),
			Value::Number(n) => n.clone(),
			Value::String(s) => s
				.trim()
				.parse::<f64>()
				.ok()
				.and_then(Number::from_f64)
				.ok_or_else(|| failed(self.name(), format!("'{s}' is not a number")))?,
			other => return Err(unexpected(self.name(), "number", other)),
		};
		Ok(Value::String(self.format(&number)))
	}
}

/// Renders booleans as labels.
#[derive(Debug, Clone)]
pub struct BooleanLabel {
	true_label: String,
	false_label: String,
}

impl BooleanLabel {
	/// Creates the transformer.
	pub fn new(true_label: impl Into<String>, false_label: impl Into<String>) -> Self {
		Self {
			true_label: true_label.into(),
			false_label: false_label.into(),
		}
	}
}

impl DataTransformer for BooleanLabel {
	fn name(&self) -> &str {
		"boolean_label"
	}

	fn transform(&self, value: Value, _row: &Value) -> Result<Value, TransformError> {
		match value {
			Value::Null => Ok(Value::Null),
			Value::Bool(true) => Ok(Value::String(self.true_label.clone())),
			Value::Bool(false) => Ok(Value::String(self.false_label.clone())),
			other => Err(unexpected(self.name(), "bool", &other)),
		}
	}
}

fn parse_datetime(input: &str, format: &str) -> Option<NaiveDateTime> {
	NaiveDateTime::parse_from_str(input, format)
		.ok()
		.or_else(|| {
			NaiveDate::parse_from_str(input, format)
				.ok()
				.and_then(|date| date.and_hms_opt(0, 0, 0))
		})
}

/// Reformats date strings.
#[derive(Debug, Clone)]
pub struct DateFormat {
	input_format: String,
	format: String,
}

impl DateFormat {
	/// Creates the transformer.
	pub fn new(input_format: impl Into<String>, format: impl Into<String>) -> Self {
		Self {
			input_format: input_format.into(),
			format: format.into(),
		}
	}
}

impl DataTransformer for DateFormat {
	fn name(&self) -> &str {
		"date_format"
	}

	fn transform(&self, value: Value, _row: &Value) -> Result<Value, TransformError> {
		let input = match &value {
			Value::Null => return Ok(Value::Null),
			Value::String(s) => s,
			other => return Err(unexpected(self.name(), "string", other)),
		};
		let datetime = parse_datetime(input, &self.input_format).ok_or_else(|| {
			failed(
				self.name(),
				format!("'{input}' does not match '{}'", self.input_format),
			)
		})?;

		let mut output = String::new();
		write!(output, "{}", datetime.format(&self.format)).map_err(|_| {
			failed(
				self.name(),
				format!("cannot render with format '{}'", self.format),
			)
		})?;
		Ok(Value::String(output))
	}
}

/// Replaces choice values with their labels.
#[derive(Debug, Clone)]
pub struct ChoiceLabel {
	choices: Map<String, Value>,
}

impl ChoiceLabel {
	/// Creates the transformer from a value-to-label map.
	pub fn new(choices: Map<String, Value>) -> Self {
		Self { choices }
	}
}

impl DataTransformer for ChoiceLabel {
	fn name(&self) -> &str {
		"choice_label"
	}

	fn transform(&self, value: Value, _row: &Value) -> Result<Value, TransformError> {
		let key = match &value {
			Value::String(s) => s.clone(),
			Value::Number(n) => n.to_string(),
			Value::Bool(b) => b.to_string(),
			_ => return Ok(value),
		};
		Ok(self.choices.get(&key).cloned().unwrap_or(value))
	}
}

/// Parses submitted numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberParse;

impl DataTransformer for NumberParse {
	fn name(&self) -> &str {
		"number_parse"
	}

	fn transform(&self, value: Value, _row: &Value) -> Result<Value, TransformError> {
		match value {
			Value::Null | Value::Number(_) => Ok(value),
			Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
			Value::String(s) => {
				let s = s.trim();
				if let Ok(n) = s.parse::<i64>() {
					return Ok(Value::from(n));
				}
				s.parse::<f64>()
					.ok()
					.and_then(Number::from_f64)
					.map(Value::Number)
					.ok_or_else(|| failed(self.name(), format!("'{s}' is not a number")))
			}
			other => Err(unexpected(self.name(), "number or string", &other)),
		}
	}
}

/// Parses submitted booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanParse;

impl DataTransformer for BooleanParse {
	fn name(&self) -> &str {
		"boolean_parse"
	}

	fn transform(&self, value: Value, _row: &Value) -> Result<Value, TransformError> {
		match value {
			Value::Null | Value::Bool(_) => Ok(value),
			Value::String(s) => match s.trim().to_lowercase().as_str() {
				"" => Ok(Value::Null),
				"true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
				"false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
				_ => Err(failed(self.name(), format!("'{s}' is not a boolean"))),
			},
			Value::Number(n) => match n.as_i64() {
				Some(0) => Ok(Value::Bool(false)),
				Some(1) => Ok(Value::Bool(true)),
				_ => Err(failed(self.name(), format!("{n} is not a boolean"))),
			},
			other => Err(unexpected(self.name(), "bool or string", &other)),
		}
	}
}

/// Parses submitted dates and normalizes them to ISO 8601.
#[derive(Debug, Clone)]
pub struct DateParse {
	format: String,
}

impl DateParse {
	/// Creates the transformer for dates submitted in `format`.
	pub fn new(format: impl Into<String>) -> Self {
		Self {
			format: format.into(),
		}
	}
}

impl DataTransformer for DateParse {
	fn name(&self) -> &str {
		"date_parse"
	}

	fn transform(&self, value: Value, _row: &Value) -> Result<Value, TransformError> {
		match &value {
			Value::Null => Ok(Value::Null),
			Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
			Value::String(s) => parse_datetime(s.trim(), &self.format)
				.map(|datetime| Value::String(datetime.date().format("%Y-%m-%d").to_string()))
				.ok_or_else(|| failed(self.name(), format!("'{s}' does not match '{}'", self.format))),
			other => Err(unexpected(self.name(), "string", other)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn run(transformer: &dyn DataTransformer, value: Value) -> Result<Value, TransformError> {
		transformer.transform(value, &json!({}))
	}

	#[rstest]
	#[case(json!(null), json!("n/a"))]
	#[case(json!(0), json!(0))]
	fn test_default_value(#[case] input: Value, #[case] expected: Value) {
		assert_eq!(run(&DefaultValue::new(json!("n/a")), input).unwrap(), expected);
	}

	#[rstest]
	#[case(json!("  Ada Lovelace "), json!("Ada L"))]
	#[case(json!(42), json!("42"))]
	#[case(json!(null), json!(null))]
	fn test_string_trims_and_truncates(#[case] input: Value, #[case] expected: Value) {
		let transformer = StringTransformer::new(true, Some(5));
		assert_eq!(run(&transformer, input).unwrap(), expected);
	}

	#[rstest]
	fn test_string_rejects_objects() {
		let result = run(&StringTransformer::default(), json!({"a": 1}));
		assert!(matches!(result, Err(TransformError::UnexpectedType { .. })));
	}

	#[rstest]
	#[case(json!(1234567.891), Some(2), ",", ".", json!("1.234.567,89"))]
	#[case(json!(-1234), None, ".", ",", json!("-1,234"))]
	#[case(json!(999), Some(1), ".", ",", json!("999.0"))]
	#[case(json!("1000"), Some(0), ".", " ", json!("1 000"))]
	fn test_number_format(
		#[case] input: Value,
		#[case] decimals: Option<usize>,
		#[case] decimal_separator: &str,
		#[case] thousands_separator: &str,
		#[case] expected: Value,
	) {
		let transformer = NumberFormat::new(decimals, decimal_separator, thousands_separator);
		assert_eq!(run(&transformer, input).unwrap(), expected);
	}

	#[rstest]
	fn test_boolean_label() {
		let transformer = BooleanLabel::new("Yes", "No");
		assert_eq!(run(&transformer, json!(true)).unwrap(), json!("Yes"));
		assert_eq!(run(&transformer, json!(false)).unwrap(), json!("No"));
		assert!(run(&transformer, json!("true")).is_err());
	}

	#[rstest]
	#[case("%Y-%m-%d", "2024-03-10", "%d/%m/%Y", "10/03/2024")]
	#[case("%Y-%m-%d %H:%M", "2024-03-10 14:05", "%H:%M", "14:05")]
	#[case("%Y-%m-%d", "2024-03-10", "%Y-%m-%d %H:%M", "2024-03-10 00:00")]
	fn test_date_format(
		#[case] input_format: &str,
		#[case] input: &str,
		#[case] format: &str,
		#[case] expected: &str,
	) {
		let transformer = DateFormat::new(input_format, format);
		assert_eq!(run(&transformer, json!(input)).unwrap(), json!(expected));
	}

	#[rstest]
	fn test_date_format_reports_mismatch() {
		let transformer = DateFormat::new("%Y-%m-%d", "%d/%m/%Y");
		assert!(matches!(
			run(&transformer, json!("10/03/2024")),
			Err(TransformError::Failed { .. })
		));
	}

	#[rstest]
	fn test_choice_label_falls_back_to_value() {
		let choices = json!({"1": "Open", "2": "Closed"});
		let transformer = ChoiceLabel::new(choices.as_object().cloned().unwrap());
		assert_eq!(run(&transformer, json!(1)).unwrap(), json!("Open"));
		assert_eq!(run(&transformer, json!("3")).unwrap(), json!("3"));
	}

	#[rstest]
	#[case(json!("42"), json!(42))]
	#[case(json!(" 2.5 "), json!(2.5))]
	#[case(json!(""), json!(null))]
	#[case(json!(7), json!(7))]
	fn test_number_parse(#[case] input: Value, #[case] expected: Value) {
		assert_eq!(run(&NumberParse, input).unwrap(), expected);
	}

	#[rstest]
	#[case(json!("yes"), json!(true))]
	#[case(json!("OFF"), json!(false))]
	#[case(json!(1), json!(true))]
	fn test_boolean_parse(#[case] input: Value, #[case] expected: Value) {
		assert_eq!(run(&BooleanParse, input).unwrap(), expected);
	}

	#[rstest]
	fn test_parse_errors() {
		assert!(run(&NumberParse, json!("abc")).is_err());
		assert!(run(&BooleanParse, json!("maybe")).is_err());
		assert!(run(&DateParse::new("%Y-%m-%d"), json!("03/10/2024")).is_err());
	}

	#[rstest]
	fn test_date_parse_normalizes() {
		let transformer = DateParse::new("%d/%m/%Y");
		assert_eq!(run(&transformer, json!("10/03/2024")).unwrap(), json!("2024-03-10"));
	}

	#[rstest]
	#[case("%Y-%m-%d", true)]
	#[case("%Q", false)]
	#[case("", false)]
	fn test_date_format_validation(#[case] format: &str, #[case] valid: bool) {
		assert_eq!(is_valid_date_format(format), valid);
	}
}
