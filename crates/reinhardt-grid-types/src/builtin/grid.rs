//! The `grid` type

use crate::entity::Grid;
use crate::kind::GridKind;
use crate::view::GridView;
use reinhardt_grid_core::prelude::*;
use serde_json::{Value, json};

/// Row models accepted by `row_model`.
pub const ROW_MODELS: [&str; 3] = ["client_side", "server_side", "infinite"];

/// Root grid type.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridType;

impl TypeNode<GridKind> for GridType {
	fn name(&self) -> &str {
		"grid"
	}

	fn configure_options(&self, schema: &mut OptionSchema, ctx: &TypeContext<'_>) {
		let settings = ctx.ambient.settings();

		schema
			.define("license_key")
			.default(settings.license_key.clone().map_or(Value::Null, Value::String))
			.allowed_types([OptionKind::Null, OptionKind::String]);
		schema
			.define("translation_domain")
			.default(settings.translation_domain.clone())
			.allowed_types([OptionKind::String]);
		schema
			.define("theme")
			.default(settings.theme.clone())
			.allowed_types([OptionKind::String]);
		schema
			.define("template")
			.default(settings.templates.grid.clone())
			.allowed_types([OptionKind::String]);
		schema
			.define("row_model")
			.default("client_side")
			.allowed_values(ROW_MODELS)
			.normalize(|options, value| {
				let licensed = options.get_str("license_key").is_some_and(|k| !k.is_empty());
				if value != json!("client_side") && !licensed {
					Err(format!(
						"the '{}' row model is an enterprise feature and requires a license key",
						value.as_str().unwrap_or_default()
					))
				} else {
					Ok(value)
				}
			});
		schema
			.define("pagination")
			.default(false)
			.allowed_types([OptionKind::Bool]);
		schema
			.define("pagination_page_size")
			.default(100)
			.allowed_types([OptionKind::Integer])
			.allowed_if("must be greater than zero", |v| v.as_i64().is_some_and(|n| n > 0));
		schema
			.define("row_selection")
			.default(Value::Null)
			.allowed_values([json!(null), json!("single"), json!("multiple")]);
		schema
			.define("dom_layout")
			.default("normal")
			.allowed_values(["normal", "auto_height", "print"]);
		schema
			.define("grid_options")
			.default(json!({}))
			.allowed_types([OptionKind::Object]);
	}

	fn build_view(&self, view: &mut GridView, grid: &Grid, options: &ResolvedOptions) -> GridResult<()> {
		if let Some(template) = options.get_str("template") {
			view.template = template.to_string();
		}
		view.vars
			.set("name", grid.name())
			.set("enterprise", grid.context().has_license());
		for name in [
			"license_key",
			"translation_domain",
			"theme",
			"row_model",
			"pagination",
			"pagination_page_size",
			"row_selection",
			"dom_layout",
			"grid_options",
		] {
			if let Some(value) = options.get(name) {
				view.vars.set(name, value.clone());
			}
		}
		let column_keys: Vec<String> = view.leaf_keys().into_iter().map(str::to_string).collect();
		view.vars.set("column_keys", column_keys);
		Ok(())
	}
}

register_type!(GridKind, "grid", GridType);
