//! Component types

use super::{humanize, licensed_type, positive_or_null, subset_of};
use crate::entity::Component;
use crate::kind::ComponentKind;
use crate::view::ComponentView;
use reinhardt_grid_core::prelude::*;
use serde_json::{Value, json};

/// Aggregations an `aggregation` status panel may show.
pub const AGGREGATIONS: [&str; 5] = ["count", "sum", "min", "max", "avg"];

fn copy_vars(view: &mut ComponentView, options: &ResolvedOptions, names: &[&str]) {
	for name in names {
		if let Some(value) = options.get(name) {
			view.vars.set(name, value.clone());
		}
	}
}

/// Root component type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentType;

impl TypeNode<ComponentKind> for ComponentType {
	fn name(&self) -> &str {
		"component"
	}

	fn configure_options(&self, schema: &mut OptionSchema, ctx: &TypeContext<'_>) {
		schema
			.define("template")
			.default(ctx.ambient.settings().templates.component.clone())
			.allowed_types([OptionKind::String]);
		schema
			.define("align")
			.default("left")
			.allowed_values(["left", "center", "right"]);
	}

	fn build_view(
		&self,
		view: &mut ComponentView,
		component: &Component,
		options: &ResolvedOptions,
	) -> GridResult<()> {
		if let Some(template) = options.get_str("template") {
			view.template = template.to_string();
		}
		view.vars
			.set("name", component.name())
			.set("type", component.type_name());
		copy_vars(view, options, &["align"]);
		Ok(())
	}
}

/// Side bar hosting tool panels. Enterprise only.
#[derive(Debug, Clone, Copy, Default)]
pub struct SideBarType;

impl TypeNode<ComponentKind> for SideBarType {
	fn name(&self) -> &str {
		"side_bar"
	}

	fn parent(&self) -> Option<&str> {
		Some("component")
	}

	fn configure_options(&self, schema: &mut OptionSchema, ctx: &TypeContext<'_>) {
		schema
			.define("template")
			.normalize(licensed_type("side_bar", ctx.ambient.has_license()));
		schema
			.define("default_tool_panel")
			.default(Value::Null)
			.allowed_types([OptionKind::Null, OptionKind::String]);
		schema
			.define("hidden_by_default")
			.default(false)
			.allowed_types([OptionKind::Bool]);
		schema
			.define("position")
			.default("right")
			.allowed_values(["left", "right"]);
	}

	fn build_view(
		&self,
		view: &mut ComponentView,
		component: &Component,
		options: &ResolvedOptions,
	) -> GridResult<()> {
		copy_vars(
			view,
			options,
			&["default_tool_panel", "hidden_by_default", "position"],
		);
		let panels: Vec<&str> = component.children().iter().map(|c| c.name()).collect();
		view.vars.set("tool_panels", panels);
		Ok(())
	}
}

/// A panel inside a side bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolPanelType;

impl TypeNode<ComponentKind> for ToolPanelType {
	fn name(&self) -> &str {
		"tool_panel"
	}

	fn parent(&self) -> Option<&str> {
		Some("component")
	}

	fn configure_options(&self, schema: &mut OptionSchema, ctx: &TypeContext<'_>) {
		schema
			.define("label")
			.default(humanize(ctx.name))
			.allowed_types([OptionKind::String]);
		schema
			.define("icon_key")
			.default(Value::Null)
			.allowed_types([OptionKind::Null, OptionKind::String]);
		schema
			.define("width")
			.default(Value::Null)
			.allowed_types([OptionKind::Null, OptionKind::Integer])
			.allowed_if("must be greater than zero", positive_or_null);
	}

	fn build_view(
		&self,
		view: &mut ComponentView,
		_component: &Component,
		options: &ResolvedOptions,
	) -> GridResult<()> {
		copy_vars(view, options, &["label", "icon_key", "width"]);
		Ok(())
	}
}

/// Tool panel of a built-in grid feature.
#[derive(Debug, Clone, Copy)]
pub struct FeatureToolPanelType {
	name: &'static str,
	panel: &'static str,
	icon_key: &'static str,
}

impl FeatureToolPanelType {
	/// `columns_tool_panel`.
	pub const COLUMNS: Self = Self {
		name: "columns_tool_panel",
		panel: "agColumnsToolPanel",
		icon_key: "columns",
	};
	/// `filters_tool_panel`.
	pub const FILTERS: Self = Self {
		name: "filters_tool_panel",
		panel: "agFiltersToolPanel",
		icon_key: "filter",
	};
}

impl TypeNode<ComponentKind> for FeatureToolPanelType {
	fn name(&self) -> &str {
		self.name
	}

	fn parent(&self) -> Option<&str> {
		Some("tool_panel")
	}

	fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
		schema.define("icon_key").default(self.icon_key);
	}

	fn build_view(
		&self,
		view: &mut ComponentView,
		_component: &Component,
		_options: &ResolvedOptions,
	) -> GridResult<()> {
		view.vars.set("tool_panel", self.panel);
		Ok(())
	}
}

/// Status bar hosting status panels. Enterprise only.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusBarType;

impl TypeNode<ComponentKind> for StatusBarType {
	fn name(&self) -> &str {
		"status_bar"
	}

	fn parent(&self) -> Option<&str> {
		Some("component")
	}

	fn configure_options(&self, schema: &mut OptionSchema, ctx: &TypeContext<'_>) {
		schema
			.define("template")
			.normalize(licensed_type("status_bar", ctx.ambient.has_license()));
	}

	fn build_view(
		&self,
		view: &mut ComponentView,
		component: &Component,
		_options: &ResolvedOptions,
	) -> GridResult<()> {
		let panels: Vec<&str> = component.children().iter().map(|c| c.name()).collect();
		view.vars.set("status_panels", panels);
		Ok(())
	}
}

/// A panel inside a status bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusPanelType;

impl TypeNode<ComponentKind> for StatusPanelType {
	fn name(&self) -> &str {
		"status_panel"
	}

	fn parent(&self) -> Option<&str> {
		Some("component")
	}
}

/// Status panel showing the total row count.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalRowCountType;

impl TypeNode<ComponentKind> for TotalRowCountType {
	fn name(&self) -> &str {
		"total_row_count"
	}

	fn parent(&self) -> Option<&str> {
		Some("status_panel")
	}

	fn build_view(
		&self,
		view: &mut ComponentView,
		_component: &Component,
		_options: &ResolvedOptions,
	) -> GridResult<()> {
		view.vars.set("status_panel", "agTotalRowCountComponent");
		Ok(())
	}
}

/// Status panel aggregating the selected cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationType;

impl TypeNode<ComponentKind> for AggregationType {
	fn name(&self) -> &str {
		"aggregation"
	}

	fn parent(&self) -> Option<&str> {
		Some("status_panel")
	}

	fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
		schema.define("align").default("right");
		schema
			.define("aggregations")
			.default(json!(AGGREGATIONS))
			.allowed_types([OptionKind::Array])
			.allowed_if(
				format!("aggregations must be among {}", AGGREGATIONS.join(", ")),
				subset_of(&AGGREGATIONS),
			);
	}

	fn build_view(
		&self,
		view: &mut ComponentView,
		_component: &Component,
		options: &ResolvedOptions,
	) -> GridResult<()> {
		view.vars.set("status_panel", "agAggregationComponent");
		copy_vars(view, options, &["aggregations"]);
		Ok(())
	}
}

register_type!(ComponentKind, "component", ComponentType);
register_type!(ComponentKind, "side_bar", SideBarType);
register_type!(ComponentKind, "tool_panel", ToolPanelType);
register_type!(ComponentKind, "columns_tool_panel", FeatureToolPanelType::COLUMNS);
register_type!(ComponentKind, "filters_tool_panel", FeatureToolPanelType::FILTERS);
register_type!(ComponentKind, "status_bar", StatusBarType);
register_type!(ComponentKind, "status_panel", StatusPanelType);
register_type!(ComponentKind, "total_row_count", TotalRowCountType);
register_type!(ComponentKind, "aggregation", AggregationType);
