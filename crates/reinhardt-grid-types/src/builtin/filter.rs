//! Filter types

use super::{licensed_type, subset_of};
use crate::entity::Filter;
use crate::kind::FilterKind;
use crate::transformer::{BooleanParse, DateParse, NumberParse, StringTransformer, is_valid_date_format};
use crate::view::FilterView;
use reinhardt_grid_core::prelude::*;
use serde_json::{Value, json};

/// Buttons a filter may show.
pub const FILTER_BUTTONS: [&str; 4] = ["apply", "clear", "reset", "cancel"];

const TEXT_OPERATORS: &[&str] = &[
	"contains",
	"not_contains",
	"equals",
	"not_equal",
	"starts_with",
	"ends_with",
	"blank",
	"not_blank",
];
const COMPARISON_OPERATORS: &[&str] = &[
	"equals",
	"not_equal",
	"less_than",
	"less_than_or_equal",
	"greater_than",
	"greater_than_or_equal",
	"in_range",
	"blank",
	"not_blank",
];
const BOOLEAN_OPERATORS: &[&str] = &["equals", "blank", "not_blank"];

/// Root filter type.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterType;

impl TypeNode<FilterKind> for FilterType {
	fn name(&self) -> &str {
		"filter"
	}

	fn configure_options(&self, schema: &mut OptionSchema, ctx: &TypeContext<'_>) {
		schema
			.define("template")
			.default(ctx.ambient.settings().templates.filter.clone())
			.allowed_types([OptionKind::String]);
		schema
			.define("floating_filter")
			.default(false)
			.allowed_types([OptionKind::Bool]);
		schema
			.define("buttons")
			.default(json!([]))
			.allowed_types([OptionKind::Array])
			.allowed_if(
				format!("buttons must be among {}", FILTER_BUTTONS.join(", ")),
				subset_of(&FILTER_BUTTONS),
			);
		schema
			.define("debounce_ms")
			.default(Value::Null)
			.allowed_types([OptionKind::Null, OptionKind::Integer])
			.allowed_if("must not be negative", |v| {
				v.is_null() || v.as_i64().is_some_and(|n| n >= 0)
			});
	}

	fn build_view(&self, view: &mut FilterView, filter: &Filter, options: &ResolvedOptions) -> GridResult<()> {
		if let Some(template) = options.get_str("template") {
			view.template = template.to_string();
		}
		view.vars
			.set("type", filter.type_name())
			.set("field", filter.field());
		for name in ["floating_filter", "buttons", "debounce_ms"] {
			if let Some(value) = options.get(name) {
				view.vars.set(name, value.clone());
			}
		}
		Ok(())
	}
}

/// How submitted values of an operator filter are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterValue {
	/// Trimmed text.
	Text,
	/// Numbers.
	Number,
	/// ISO dates.
	Date,
	/// Booleans.
	Boolean,
}

/// Filter offering a fixed set of comparison operators.
#[derive(Debug, Clone, Copy)]
pub struct OperatorFilterType {
	name: &'static str,
	operators: &'static [&'static str],
	default_option: &'static str,
	value: FilterValue,
}

impl OperatorFilterType {
	/// `text_filter`.
	pub const TEXT: Self = Self {
		name: "text_filter",
		operators: TEXT_OPERATORS,
		default_option: "contains",
		value: FilterValue::Text,
	};
	/// `number_filter`.
	pub const NUMBER: Self = Self {
		name: "number_filter",
		operators: COMPARISON_OPERATORS,
		default_option: "equals",
		value: FilterValue::Number,
	};
	/// `date_filter`.
	pub const DATE: Self = Self {
		name: "date_filter",
		operators: COMPARISON_OPERATORS,
		default_option: "equals",
		value: FilterValue::Date,
	};
	/// `boolean_filter`.
	pub const BOOLEAN: Self = Self {
		name: "boolean_filter",
		operators: BOOLEAN_OPERATORS,
		default_option: "equals",
		value: FilterValue::Boolean,
	};

	/// Operators the filter offers.
	pub fn operators(&self) -> &'static [&'static str] {
		self.operators
	}
}

impl TypeNode<FilterKind> for OperatorFilterType {
	fn name(&self) -> &str {
		self.name
	}

	fn parent(&self) -> Option<&str> {
		Some("filter")
	}

	fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
		let operators = self.operators;
		schema
			.define("filter_options")
			.default(json!(operators))
			.allowed_types([OptionKind::Array])
			.allowed_if(
				format!("operators must be among {}", operators.join(", ")),
				subset_of(operators),
			);
		schema
			.define("default_option")
			.default(self.default_option)
			.allowed_values(operators.iter().copied())
			.normalize(|options, value| {
				let offered = options
					.get_array("filter_options")
					.is_some_and(|offered| offered.contains(&value));
				if offered {
					Ok(value)
				} else {
					Err("default_option must be one of filter_options".to_string())
				}
			});
		if self.value == FilterValue::Date {
			schema
				.define("input_format")
				.default("%Y-%m-%d")
				.allowed_types([OptionKind::String])
				.allowed_if("must be a valid strftime format", |v| {
					v.as_str().is_some_and(is_valid_date_format)
				});
		}
	}

	fn build_view(&self, view: &mut FilterView, _filter: &Filter, options: &ResolvedOptions) -> GridResult<()> {
		for name in ["filter_options", "default_option"] {
			if let Some(value) = options.get(name) {
				view.vars.set(name, value.clone());
			}
		}
		Ok(())
	}

	fn build_data(&self, pipeline: &mut DataPipeline, options: &ResolvedOptions) -> GridResult<()> {
		match self.value {
			FilterValue::Text => pipeline.add(StringTransformer::new(true, None)),
			FilterValue::Number => pipeline.add(NumberParse),
			FilterValue::Boolean => pipeline.add(BooleanParse),
			FilterValue::Date => {
				pipeline.add(DateParse::new(options.get_str("input_format").unwrap_or("%Y-%m-%d")))
			}
		};
		Ok(())
	}
}

/// Filter listing every distinct value of its column. Enterprise only.
///
/// When `values` is `null` the values are fetched from the grid's data
/// source each time the view is built.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetFilterType;

impl TypeNode<FilterKind> for SetFilterType {
	fn name(&self) -> &str {
		"set_filter"
	}

	fn parent(&self) -> Option<&str> {
		Some("filter")
	}

	fn configure_options(&self, schema: &mut OptionSchema, ctx: &TypeContext<'_>) {
		schema
			.define("template")
			.normalize(licensed_type("set_filter", ctx.ambient.has_license()));
		schema
			.define("values")
			.default(Value::Null)
			.allowed_types([OptionKind::Null, OptionKind::Array]);
		schema
			.define("search")
			.default(true)
			.allowed_types([OptionKind::Bool]);
	}

	fn build_view(&self, view: &mut FilterView, filter: &Filter, options: &ResolvedOptions) -> GridResult<()> {
		let values = match options.get("values").filter(|v| !v.is_null()) {
			Some(values) => values.clone(),
			None => Value::Array(
				filter
					.context()
					.data_source()
					.map(|source| source.distinct_values(filter.field()))
					.unwrap_or_default(),
			),
		};
		view.vars
			.set("values", values)
			.set("search", options.flag("search"));
		Ok(())
	}
}

register_type!(FilterKind, "filter", FilterType);
register_type!(FilterKind, "text_filter", OperatorFilterType::TEXT);
register_type!(FilterKind, "number_filter", OperatorFilterType::NUMBER);
register_type!(FilterKind, "date_filter", OperatorFilterType::DATE);
register_type!(FilterKind, "boolean_filter", OperatorFilterType::BOOLEAN);
register_type!(FilterKind, "set_filter", SetFilterType);
