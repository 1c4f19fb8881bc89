//! Option schema: declarations, validation and resolution
//!
//! Declarations accumulate across a type chain. Re-declaring an option
//! replaces its default, while allowed-type and allowed-value constraints and
//! normalizers pile up, so a constraint declared by an ancestor keeps
//! applying to every descendant.
//!
//! Resolution runs in two passes over the options in declaration order:
//!
//! 1. pick the raw value (input, static default or lazy default computed from
//!    the options resolved so far) and validate it;
//! 2. run the normalizers. A normalizer sees earlier options already
//!    normalized and later ones validated but not yet normalized.

use super::kind::OptionKind;
use super::resolved::ResolvedOptions;
use crate::error::OptionError;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

type LazyDefault = Arc<dyn Fn(&ResolvedOptions) -> Value + Send + Sync>;
type Normalizer = Arc<dyn Fn(&ResolvedOptions, Value) -> Result<Value, String> + Send + Sync>;
type ValuePredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Clone)]
enum DefaultValue {
	Static(Value),
	Lazy(LazyDefault),
}

#[derive(Clone)]
enum AllowedValues {
	OneOf(Vec<Value>),
	Predicate {
		description: String,
		check: ValuePredicate,
	},
}

#[derive(Clone, Default)]
struct OptionDefinition {
	default: Option<DefaultValue>,
	required: bool,
	allowed_types: Vec<Vec<OptionKind>>,
	allowed_values: Vec<AllowedValues>,
	normalizers: Vec<Normalizer>,
}

impl OptionDefinition {
	fn validate(&self, name: &str, value: &Value) -> Result<(), OptionError> {
		for kinds in &self.allowed_types {
			if !kinds.iter().any(|kind| kind.matches(value)) {
				return Err(OptionError::InvalidType {
					name: name.to_string(),
					expected: kinds
						.iter()
						.map(|k| k.as_str())
						.collect::<Vec<_>>()
						.join("|"),
					actual: OptionKind::of(value).to_string(),
				});
			}
		}

		for allowed in &self.allowed_values {
			let reason = match allowed {
				AllowedValues::OneOf(values) if !values.contains(value) => format!(
					"expected one of {}",
					values
						.iter()
						.map(Value::to_string)
						.collect::<Vec<_>>()
						.join(", ")
				),
				AllowedValues::Predicate { description, check } if !check(value) => {
					description.clone()
				}
				_ => continue,
			};
			return Err(OptionError::InvalidValue {
				name: name.to_string(),
				value: value.to_string(),
				reason,
			});
		}

		Ok(())
	}
}

/// Declarative set of options accepted by a type chain.
///
/// # Examples
///
/// ```
/// use reinhardt_grid_core::options::{OptionKind, OptionSchema};
/// use serde_json::json;
///
/// let mut schema = OptionSchema::new();
/// schema
///     .define("pinned")
///     .default(json!(null))
///     .allowed_values([json!(null), json!("left"), json!("right")]);
/// schema
///     .define("width")
///     .default(100)
///     .allowed_types([OptionKind::Integer]);
///
/// let options = schema.resolve(&json!({"pinned": "left"})).unwrap();
/// assert_eq!(options.get_str("pinned"), Some("left"));
/// assert_eq!(options.get_i64("width"), Some(100));
///
/// assert!(schema.resolve(&json!({"pinned": "top"})).is_err());
/// ```
#[derive(Clone, Default)]
pub struct OptionSchema {
	options: IndexMap<String, OptionDefinition>,
}

impl OptionSchema {
	/// Creates an empty schema.
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares `name`, or reopens its existing declaration.
	pub fn define(&mut self, name: &str) -> OptionDeclaration<'_> {
		let definition = self.options.entry(name.to_string()).or_default();
		OptionDeclaration { definition }
	}

	/// Whether `name` is declared.
	pub fn is_defined(&self, name: &str) -> bool {
		self.options.contains_key(name)
	}

	/// Whether `name` is declared as required.
	pub fn is_required(&self, name: &str) -> bool {
		self.options.get(name).is_some_and(|d| d.required)
	}

	/// Whether `name` currently has a default.
	pub fn has_default(&self, name: &str) -> bool {
		self.options.get(name).is_some_and(|d| d.default.is_some())
	}

	/// Declared option names in declaration order.
	pub fn defined_options(&self) -> impl Iterator<Item = &str> {
		self.options.keys().map(String::as_str)
	}

	/// Number of declared options.
	pub fn len(&self) -> usize {
		self.options.len()
	}

	/// Whether nothing is declared.
	pub fn is_empty(&self) -> bool {
		self.options.is_empty()
	}

	/// Resolves raw input given as a JSON object (or `null` for no input).
	pub fn resolve(&self, raw: &Value) -> Result<ResolvedOptions, OptionError> {
		match raw {
			Value::Null => self.resolve_map(&Map::new()),
			Value::Object(map) => self.resolve_map(map),
			other => Err(OptionError::InvalidInput(OptionKind::of(other).to_string())),
		}
	}

	/// Resolves raw input.
	pub fn resolve_map(&self, raw: &Map<String, Value>) -> Result<ResolvedOptions, OptionError> {
		if let Some(name) = raw.keys().find(|k| !self.options.contains_key(*k)) {
			let mut defined: Vec<String> = self.options.keys().cloned().collect();
			defined.sort();
			return Err(OptionError::UndefinedOption {
				name: name.clone(),
				defined,
			});
		}

		let mut values = ResolvedOptions::new();
		for (name, definition) in &self.options {
			let value = match (raw.get(name), &definition.default) {
				(Some(value), _) => value.clone(),
				(None, Some(DefaultValue::Static(value))) => value.clone(),
				(None, Some(DefaultValue::Lazy(default))) => default(&values),
				(None, None) if definition.required => {
					return Err(OptionError::MissingRequired(name.clone()));
				}
				(None, None) => continue,
			};
			definition.validate(name, &value)?;
			values.insert(name, value);
		}

		for (name, definition) in &self.options {
			if definition.normalizers.is_empty() {
				continue;
			}
			let Some(mut value) = values.get(name).cloned() else {
				continue;
			};
			for normalizer in &definition.normalizers {
				value = normalizer(&values, value).map_err(|message| OptionError::Normalization {
					name: name.clone(),
					message,
				})?;
			}
			values.insert(name, value);
		}

		Ok(values)
	}
}

impl fmt::Debug for OptionSchema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OptionSchema")
			.field("options", &self.options.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Builder-style handle on one option declaration.
pub struct OptionDeclaration<'a> {
	definition: &'a mut OptionDefinition,
}

impl OptionDeclaration<'_> {
	/// Sets the default, replacing any earlier one.
	pub fn default(self, value: impl Into<Value>) -> Self {
		self.definition.default = Some(DefaultValue::Static(value.into()));
		self
	}

	/// Sets a default computed from the options declared before this one.
	pub fn default_with<F>(self, default: F) -> Self
	where
		F: Fn(&ResolvedOptions) -> Value + Send + Sync + 'static,
	{
		self.definition.default = Some(DefaultValue::Lazy(Arc::new(default)));
		self
	}

	/// Marks the option as required: it must be supplied or defaulted.
	pub fn required(self) -> Self {
		self.definition.required = true;
		self
	}

	/// Adds an allowed-type constraint: the value must match one of `kinds`.
	pub fn allowed_types(self, kinds: impl IntoIterator<Item = OptionKind>) -> Self {
		self.definition
			.allowed_types
			.push(kinds.into_iter().collect());
		self
	}

	/// Adds an allowed-value constraint: the value must equal one of `values`.
	pub fn allowed_values<I, V>(self, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		self.definition
			.allowed_values
			.push(AllowedValues::OneOf(values.into_iter().map(Into::into).collect()));
		self
	}

	/// Adds a predicate constraint; `description` is reported on failure.
	pub fn allowed_if<F>(self, description: impl Into<String>, check: F) -> Self
	where
		F: Fn(&Value) -> bool + Send + Sync + 'static,
	{
		self.definition.allowed_values.push(AllowedValues::Predicate {
			description: description.into(),
			check: Arc::new(check),
		});
		self
	}

	/// Appends a normalizer. Normalizers of one option run in declaration
	/// order, each receiving the previous one's output.
	pub fn normalize<F>(self, normalizer: F) -> Self
	where
		F: Fn(&ResolvedOptions, Value) -> Result<Value, String> + Send + Sync + 'static,
	{
		self.definition.normalizers.push(Arc::new(normalizer));
		self
	}
}
