//! Settings flowing from TOML and overrides into rendered grid views

#![cfg(feature = "types")]

use reinhardt_grid::SettingsError;
use reinhardt_grid::prelude::*;
use rstest::*;
use serde_json::json;
use std::sync::Arc;

#[fixture]
fn settings() -> GridSettings {
	GridSettings::from_toml_str(
		r#"
		translation_domain = "catalog"
		theme = "ag-theme-alpine"

		[templates]
		column = "catalog/column.html"
		"#,
	)
	.unwrap()
}

#[rstest]
fn test_settings_become_view_defaults(settings: GridSettings) {
	// Arrange
	let factory = GridFactory::new(Arc::new(TypeResolver::new()), settings);
	let mut builder = factory.create_builder("products", "grid", json!({}), None).unwrap();
	builder.add("sku", "text", json!({}));

	// Act
	let view = builder.get_grid().unwrap().create_view().unwrap();

	// Assert
	assert_eq!(view.template, "grid/grid.html");
	assert_eq!(view.vars.get("theme"), Some(&json!("ag-theme-alpine")));
	assert_eq!(view.vars.get("translation_domain"), Some(&json!("catalog")));
	assert_eq!(view.columns[0].template, "catalog/column.html");
	assert_eq!(view.columns[0].vars.get("label"), Some(&json!("Sku")));
}

#[rstest]
fn test_license_override_enables_enterprise_types(settings: GridSettings) {
	// Arrange
	let settings = settings
		.with_overrides([("REINHARDT_GRID_LICENSE_KEY", "catalog-license")])
		.unwrap();
	let factory = GridFactory::new(Arc::new(TypeResolver::new()), settings);
	let mut builder = factory.create_builder("products", "grid", json!({}), None).unwrap();
	builder.add_component("status", "status_bar", json!({}));

	// Act
	let view = builder.get_grid().unwrap().create_view().unwrap();

	// Assert
	assert_eq!(view.vars.get("enterprise"), Some(&json!(true)));
	assert_eq!(view.components[0].name, "status");
}

#[rstest]
fn test_empty_override_is_rejected(settings: GridSettings) {
	let result = settings.with_overrides([("REINHARDT_GRID_THEME", " ")]);
	assert!(matches!(result, Err(SettingsError::InvalidValue { key, .. }) if key == "theme"));
}
