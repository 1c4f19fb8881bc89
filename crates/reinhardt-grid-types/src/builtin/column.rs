//! Column types

use super::{humanize, licensed_flag, positive_or_null};
use crate::entity::Column;
use crate::kind::ColumnKind;
use crate::transformer::{
	BooleanLabel, ChoiceLabel, DateFormat, DefaultValue, NumberFormat, StringTransformer,
	is_valid_date_format,
};
use crate::view::ColumnView;
use reinhardt_grid_core::prelude::*;
use serde_json::{Value, json};

/// Root column type.
///
/// Declares everything a column displays, and appends a default-value
/// transformer when `default_value` is set so it runs after every
/// descendant's conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnType;

impl TypeNode<ColumnKind> for ColumnType {
	fn name(&self) -> &str {
		"column"
	}

	fn configure_options(&self, schema: &mut OptionSchema, ctx: &TypeContext<'_>) {
		let name = ctx.name.to_string();
		let licensed = ctx.ambient.has_license();

		schema
			.define("label")
			.default(humanize(&name))
			.allowed_types([OptionKind::Null, OptionKind::String]);
		schema
			.define("path")
			.default(name)
			.allowed_types([OptionKind::String]);
		schema
			.define("position")
			.default(Value::Null)
			.allowed_types([OptionKind::Null, OptionKind::String, OptionKind::Object]);
		for flag in ["sortable", "resizable"] {
			schema
				.define(flag)
				.default(true)
				.allowed_types([OptionKind::Bool]);
		}
		schema
			.define("hide")
			.default(false)
			.allowed_types([OptionKind::Bool]);
		schema
			.define("width")
			.default(Value::Null)
			.allowed_types([OptionKind::Null, OptionKind::Integer])
			.allowed_if("must be greater than zero", positive_or_null);
		schema
			.define("pinned")
			.default(Value::Null)
			.allowed_values([json!(null), json!("left"), json!("right")]);
		schema
			.define("filter")
			.default(Value::Null)
			.allowed_types([OptionKind::Null, OptionKind::String]);
		schema
			.define("filter_options")
			.default(json!({}))
			.allowed_types([OptionKind::Object]);
		schema
			.define("translation_domain")
			.default(Value::Null)
			.allowed_types([OptionKind::Null, OptionKind::String]);
		schema
			.define("template")
			.default(ctx.ambient.settings().templates.column.clone())
			.allowed_types([OptionKind::String]);
		for class in ["header_class", "cell_class"] {
			schema
				.define(class)
				.default(Value::Null)
				.allowed_types([OptionKind::Null, OptionKind::String, OptionKind::Array]);
		}
		for (flag, feature) in [
			("enable_row_group", "row grouping"),
			("enable_pivot", "pivoting"),
			("enable_value", "value aggregation"),
		] {
			schema
				.define(flag)
				.default(false)
				.allowed_types([OptionKind::Bool])
				.normalize(licensed_flag(feature, licensed));
		}
		schema.define("default_value").default(Value::Null);
	}

	fn build_view(&self, view: &mut ColumnView, column: &Column, options: &ResolvedOptions) -> GridResult<()> {
		view.path = column.path().to_string();
		if let Some(template) = options.get_str("template") {
			view.template = template.to_string();
		}
		view.vars
			.set("name", column.name())
			.set("type", column.type_name())
			.set("group", column.is_group());
		for name in [
			"label",
			"position",
			"sortable",
			"resizable",
			"hide",
			"width",
			"pinned",
			"filter",
			"translation_domain",
			"header_class",
			"cell_class",
			"enable_row_group",
			"enable_pivot",
			"enable_value",
		] {
			if let Some(value) = options.get(name) {
				view.vars.set(name, value.clone());
			}
		}
		Ok(())
	}

	fn build_data(&self, pipeline: &mut DataPipeline, options: &ResolvedOptions) -> GridResult<()> {
		if let Some(value) = options.get("default_value").filter(|v| !v.is_null()) {
			pipeline.append(DefaultValue::new(value.clone()));
		}
		Ok(())
	}
}

/// Text column.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextType;

impl TypeNode<ColumnKind> for TextType {
	fn name(&self) -> &str {
		"text"
	}

	fn parent(&self) -> Option<&str> {
		Some("column")
	}

	fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
		schema
			.define("trim")
			.default(true)
			.allowed_types([OptionKind::Bool]);
		schema
			.define("max_length")
			.default(Value::Null)
			.allowed_types([OptionKind::Null, OptionKind::Integer])
			.allowed_if("must be greater than zero", positive_or_null);
	}

	fn build_view(&self, view: &mut ColumnView, _column: &Column, _options: &ResolvedOptions) -> GridResult<()> {
		view.vars.set("cell_data_type", "text");
		Ok(())
	}

	fn build_data(&self, pipeline: &mut DataPipeline, options: &ResolvedOptions) -> GridResult<()> {
		let max_length = options
			.get_i64("max_length")
			.and_then(|n| usize::try_from(n).ok());
		pipeline.add(StringTransformer::new(options.flag("trim"), max_length));
		Ok(())
	}
}

/// Number column.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberType;

impl TypeNode<ColumnKind> for NumberType {
	fn name(&self) -> &str {
		"number"
	}

	fn parent(&self) -> Option<&str> {
		Some("column")
	}

	fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
		schema
			.define("decimals")
			.default(Value::Null)
			.allowed_types([OptionKind::Null, OptionKind::Integer])
			.allowed_if("must not be negative", |v| {
				v.is_null() || v.as_i64().is_some_and(|n| n >= 0)
			});
		schema
			.define("decimal_separator")
			.default(".")
			.allowed_types([OptionKind::String]);
		schema
			.define("thousands_separator")
			.default("")
			.allowed_types([OptionKind::String]);
	}

	fn build_view(&self, view: &mut ColumnView, _column: &Column, _options: &ResolvedOptions) -> GridResult<()> {
		view.vars.set("cell_data_type", "number");
		Ok(())
	}

	fn build_data(&self, pipeline: &mut DataPipeline, options: &ResolvedOptions) -> GridResult<()> {
		let decimals = options
			.get_i64("decimals")
			.and_then(|n| usize::try_from(n).ok());
		pipeline.add(NumberFormat::new(
			decimals,
			options.get_str("decimal_separator").unwrap_or("."),
			options.get_str("thousands_separator").unwrap_or_default(),
		));
		Ok(())
	}
}

/// Boolean column.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanType;

impl TypeNode<ColumnKind> for BooleanType {
	fn name(&self) -> &str {
		"boolean"
	}

	fn parent(&self) -> Option<&str> {
		Some("column")
	}

	fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
		schema
			.define("true_label")
			.default("Yes")
			.allowed_types([OptionKind::String]);
		schema
			.define("false_label")
			.default("No")
			.allowed_types([OptionKind::String]);
	}

	fn build_view(&self, view: &mut ColumnView, _column: &Column, _options: &ResolvedOptions) -> GridResult<()> {
		view.vars.set("cell_data_type", "boolean");
		Ok(())
	}

	fn build_data(&self, pipeline: &mut DataPipeline, options: &ResolvedOptions) -> GridResult<()> {
		pipeline.add(BooleanLabel::new(
			options.get_str("true_label").unwrap_or("Yes"),
			options.get_str("false_label").unwrap_or("No"),
		));
		Ok(())
	}
}

/// Date column; `input_format` and `format` are strftime formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateType;

impl TypeNode<ColumnKind> for DateType {
	fn name(&self) -> &str {
		"date"
	}

	fn parent(&self) -> Option<&str> {
		Some("column")
	}

	fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
		for format in ["input_format", "format"] {
			schema
				.define(format)
				.default("%Y-%m-%d")
				.allowed_types([OptionKind::String])
				.allowed_if("must be a valid strftime format", |v| {
					v.as_str().is_some_and(is_valid_date_format)
				});
		}
	}

	fn build_view(&self, view: &mut ColumnView, _column: &Column, options: &ResolvedOptions) -> GridResult<()> {
		view.vars.set("cell_data_type", "date");
		if let Some(format) = options.get_str("format") {
			view.vars.set("format", format);
		}
		Ok(())
	}

	fn build_data(&self, pipeline: &mut DataPipeline, options: &ResolvedOptions) -> GridResult<()> {
		pipeline.add(DateFormat::new(
			options.get_str("input_format").unwrap_or("%Y-%m-%d"),
			options.get_str("format").unwrap_or("%Y-%m-%d"),
		));
		Ok(())
	}
}

/// Column showing labels of a fixed set of values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceType;

impl TypeNode<ColumnKind> for ChoiceType {
	fn name(&self) -> &str {
		"choice"
	}

	fn parent(&self) -> Option<&str> {
		Some("column")
	}

	fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
		schema
			.define("choices")
			.required()
			.allowed_types([OptionKind::Object])
			.allowed_if("labels must be strings", |v| {
				v.as_object()
					.is_some_and(|choices| choices.values().all(Value::is_string))
			});
	}

	fn build_view(&self, view: &mut ColumnView, _column: &Column, options: &ResolvedOptions) -> GridResult<()> {
		view.vars.set("cell_data_type", "text");
		if let Some(choices) = options.get("choices") {
			view.vars.set("choices", choices.clone());
		}
		Ok(())
	}

	fn build_data(&self, pipeline: &mut DataPipeline, options: &ResolvedOptions) -> GridResult<()> {
		let choices = options.get_object("choices").cloned().unwrap_or_default();
		pipeline.add(ChoiceLabel::new(choices));
		Ok(())
	}
}

/// Header group; its nested columns are added through the builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupType;

impl TypeNode<ColumnKind> for GroupType {
	fn name(&self) -> &str {
		"group"
	}

	fn parent(&self) -> Option<&str> {
		Some("column")
	}

	fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
		schema.define("sortable").default(false);
		schema
			.define("marry_children")
			.default(false)
			.allowed_types([OptionKind::Bool]);
		schema
			.define("open_by_default")
			.default(false)
			.allowed_types([OptionKind::Bool]);
	}

	fn build_view(&self, view: &mut ColumnView, _column: &Column, options: &ResolvedOptions) -> GridResult<()> {
		view.vars
			.set("marry_children", options.flag("marry_children"))
			.set("open_by_default", options.flag("open_by_default"));
		Ok(())
	}
}

register_type!(ColumnKind, "column", ColumnType);
register_type!(ColumnKind, "text", TextType);
register_type!(ColumnKind, "number", NumberType);
register_type!(ColumnKind, "boolean", BooleanType);
register_type!(ColumnKind, "date", DateType);
register_type!(ColumnKind, "choice", ChoiceType);
register_type!(ColumnKind, "group", GroupType);
