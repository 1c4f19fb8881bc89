use reinhardt_grid_core::{GridError, GridSettings, OptionError, TypeResolutionError, TypeResolver};
use reinhardt_grid_types::prelude::*;
use rstest::*;
use serde_json::{Value, json};
use std::sync::Arc;

/// Adds a `highlight` flag to text columns only.
struct HighlightExtension;

impl TypeExtension<ColumnKind> for HighlightExtension {
	fn extended_type(&self) -> &str {
		"text"
	}

	fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
		schema
			.define("highlight")
			.default(false)
			.allowed_types([OptionKind::Bool]);
	}

	fn build_view(&self, view: &mut ColumnView, _column: &Column, options: &ResolvedOptions) -> GridResult<()> {
		view.vars.set("highlight", options.flag("highlight"));
		Ok(())
	}
}

/// Text column rendering a mailto link.
struct EmailType;

impl TypeNode<ColumnKind> for EmailType {
	fn name(&self) -> &str {
		"email"
	}

	fn parent(&self) -> Option<&str> {
		Some("text")
	}

	fn build_view(&self, view: &mut ColumnView, _column: &Column, _options: &ResolvedOptions) -> GridResult<()> {
		view.vars.set("cell_renderer", "mailto");
		Ok(())
	}

	fn build_data(&self, pipeline: &mut DataPipeline, _options: &ResolvedOptions) -> GridResult<()> {
		pipeline.add(CallbackTransformer::new("lowercase", |value: Value, _row: &Value| {
			Ok(match value {
				Value::String(s) => Value::String(s.to_lowercase()),
				other => other,
			})
		}));
		Ok(())
	}
}

#[fixture]
fn resolver() -> Arc<TypeResolver> {
	let resolver = TypeResolver::new();
	resolver.register::<ColumnKind>(EmailType);
	resolver.register_extension(HighlightExtension).unwrap();
	Arc::new(resolver)
}

#[fixture]
fn factory(resolver: Arc<TypeResolver>) -> GridFactory {
	GridFactory::new(resolver, GridSettings::default())
}

#[rstest]
fn test_extension_applies_to_exact_type(factory: GridFactory) {
	// Arrange
	let mut builder = factory.create_builder("users", "grid", json!({}), None).unwrap();
	builder
		.add("name", "text", json!({"highlight": true}))
		.add("email", "email", json!({}));

	// Act
	let view = builder.get_grid().unwrap().create_view().unwrap();

	// Assert
	assert_eq!(view.columns[0].vars.get("highlight"), Some(&json!(true)));
	assert!(!view.columns[1].vars.is_set("highlight"));
	assert_eq!(view.columns[1].vars.get("cell_renderer"), Some(&json!("mailto")));
	assert_eq!(view.columns[1].vars.get("cell_data_type"), Some(&json!("text")));
}

#[rstest]
fn test_extension_options_are_not_inherited(factory: GridFactory) {
	// Arrange
	let mut builder = factory.create_builder("users", "grid", json!({}), None).unwrap();
	builder.add("email", "email", json!({"highlight": true}));

	// Act
	let err = builder.get_grid().unwrap_err();

	// Assert
	assert!(matches!(
		err.as_option_error(),
		Some(OptionError::UndefinedOption { name, .. }) if name == "highlight"
	));
}

#[rstest]
fn test_managed_type_runs_after_its_ancestors(factory: GridFactory) {
	// Arrange
	let mut builder = factory.create_builder("users", "grid", json!({}), None).unwrap();
	builder.add("email", "email", json!({}));
	let mut grid = builder.get_grid().unwrap();

	// Act
	let rows = grid
		.transform_rows(&[json!({"email": "  Alice@Example.COM "})])
		.unwrap();

	// Assert
	assert_eq!(rows[0]["email"], json!("alice@example.com"));
	assert_eq!(
		grid.column("email").unwrap().pipeline().names(),
		vec!["lowercase", "string"]
	);
}

#[rstest]
fn test_extension_of_unknown_type_is_rejected() {
	// Arrange
	struct Orphan;
	impl TypeExtension<ColumnKind> for Orphan {
		fn extended_type(&self) -> &str {
			"missing"
		}
	}
	let resolver = TypeResolver::new();

	// Act
	let result = resolver.register_extension(Orphan);

	// Assert
	assert_eq!(
		result,
		Err(TypeResolutionError::UnknownExtensionTarget {
			kind: "column",
			name: "missing".to_string(),
		})
	);
}

#[rstest]
fn test_unknown_grid_type(factory: GridFactory) {
	let result = factory.create_builder("users", "spreadsheet", json!({}), None);
	assert!(matches!(
		result,
		Err(GridError::TypeResolution(TypeResolutionError::NotFound { kind: "grid", .. }))
	));
}
