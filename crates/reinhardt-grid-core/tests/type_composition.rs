//! Composition through link-time registered types.

use reinhardt_grid_core::prelude::*;
use reinhardt_grid_core::{GridSettings, OptionError, TypeResolver, TypeResolutionError};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

struct CellKind;

impl TypeKind for CellKind {
	const LABEL: &'static str = "cell";
	type Entity = ();
	type View = Vec<(String, Value)>;
}

struct BaseCell;

impl TypeNode<CellKind> for BaseCell {
	fn name(&self) -> &str {
		"base_cell"
	}

	fn configure_options(&self, schema: &mut OptionSchema, ctx: &TypeContext<'_>) {
		let name = ctx.name.to_string();
		schema.define("label").default_with(move |_| json!(name.clone()));
		schema
			.define("premium")
			.default(false)
			.allowed_types([OptionKind::Bool])
			.normalize({
				let licensed = ctx.ambient.has_license();
				move |_, value| {
					if value == json!(true) && !licensed {
						Err("premium cells require a license key".to_string())
					} else {
						Ok(value)
					}
				}
			});
	}

	fn build_view(
		&self,
		view: &mut Vec<(String, Value)>,
		_entity: &(),
		options: &ResolvedOptions,
	) -> GridResult<()> {
		view.push(("label".to_string(), options.get("label").cloned().unwrap_or_default()));
		Ok(())
	}
}

struct UpperCell;

impl TypeNode<CellKind> for UpperCell {
	fn name(&self) -> &str {
		"upper_cell"
	}

	fn parent(&self) -> Option<&str> {
		Some("base_cell")
	}

	fn build_data(&self, pipeline: &mut DataPipeline, _options: &ResolvedOptions) -> GridResult<()> {
		pipeline.add(CallbackTransformer::new("upper", |value, _| {
			Ok(json!(value.as_str().unwrap_or_default().to_uppercase()))
		}));
		Ok(())
	}
}

register_type!(CellKind, "base_cell", BaseCell);
register_type!(CellKind, "upper_cell", UpperCell);

fn ambient(license_key: Option<&str>) -> AmbientContext {
	AmbientContext::new(Arc::new(GridSettings {
		license_key: license_key.map(str::to_string),
		..GridSettings::default()
	}))
}

#[fixture]
fn resolver() -> TypeResolver {
	TypeResolver::new()
}

#[rstest]
fn test_link_time_chain_resolves_and_cascades(resolver: TypeResolver) {
	// Arrange
	let resolved = resolver.resolve_type::<CellKind>("upper_cell").unwrap();
	let options = resolved
		.resolve_options("title", &Value::Null, &ambient(None))
		.unwrap();
	let mut view = Vec::new();
	let mut pipeline = DataPipeline::new();

	// Act
	resolved.build_view(&mut view, &(), &options).unwrap();
	resolved.build_data("title", &mut pipeline, &options).unwrap();

	// Assert
	assert_eq!(resolved.type_names(), vec!["base_cell", "upper_cell"]);
	assert_eq!(view, vec![("label".to_string(), json!("title"))]);
	assert_eq!(
		pipeline.transform(json!("grid"), &json!({})).unwrap(),
		json!("GRID")
	);
}

#[rstest]
#[case(None, false)]
#[case(Some("KEY"), true)]
fn test_license_gated_option(
	resolver: TypeResolver,
	#[case] license_key: Option<&str>,
	#[case] accepted: bool,
) {
	// Arrange
	let resolved = resolver.resolve_type::<CellKind>("base_cell").unwrap();

	// Act
	let result = resolved.resolve_options("title", &json!({"premium": true}), &ambient(license_key));

	// Assert
	match result {
		Ok(options) => {
			assert!(accepted);
			assert!(options.flag("premium"));
		}
		Err(err) => {
			assert!(!accepted);
			assert!(matches!(
				err.as_option_error(),
				Some(OptionError::Normalization { name, .. }) if name == "premium"
			));
		}
	}
}

#[rstest]
fn test_managed_type_shadows_link_time_registration(resolver: TypeResolver) {
	// Arrange
	struct Shadow;
	impl TypeNode<CellKind> for Shadow {
		fn name(&self) -> &str {
			"upper_cell"
		}
	}
	resolver.register::<CellKind>(Shadow);

	// Act
	let resolved = resolver.resolve_type::<CellKind>("upper_cell").unwrap();

	// Assert
	assert_eq!(resolved.type_names(), vec!["upper_cell"]);
}

#[rstest]
fn test_missing_type_is_reported(resolver: TypeResolver) {
	assert!(matches!(
		resolver.resolve_type::<CellKind>("lower_cell"),
		Err(TypeResolutionError::NotFound { kind: "cell", .. })
	));
}
