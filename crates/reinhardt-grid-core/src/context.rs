//! Ambient context shared by every entity of a grid

use crate::options::ResolvedOptions;
use crate::settings::GridSettings;
use crate::source::DataSource;
use std::fmt;
use std::sync::Arc;

/// Read-only context handed to every option contribution.
///
/// Carries the factory settings, the owning grid's resolved options (absent
/// while the grid's own options are being resolved) and the data-source
/// handle. Cloning is cheap; nothing in here is ever mutated by an entity.
#[derive(Clone)]
pub struct AmbientContext {
	settings: Arc<GridSettings>,
	grid_options: Option<Arc<ResolvedOptions>>,
	data_source: Option<Arc<dyn DataSource>>,
}

impl AmbientContext {
	/// Creates a context with settings only.
	pub fn new(settings: Arc<GridSettings>) -> Self {
		Self {
			settings,
			grid_options: None,
			data_source: None,
		}
	}

	/// Attaches the owning grid's resolved options.
	pub fn with_grid_options(mut self, options: Arc<ResolvedOptions>) -> Self {
		self.grid_options = Some(options);
		self
	}

	/// Attaches a data-source handle.
	pub fn with_data_source(mut self, data_source: Option<Arc<dyn DataSource>>) -> Self {
		self.data_source = data_source;
		self
	}

	/// Factory settings.
	pub fn settings(&self) -> &GridSettings {
		&self.settings
	}

	/// The owning grid's resolved options.
	pub fn grid_options(&self) -> Option<&ResolvedOptions> {
		self.grid_options.as_deref()
	}

	/// The data-source handle.
	pub fn data_source(&self) -> Option<&dyn DataSource> {
		self.data_source.as_deref()
	}

	/// Enterprise license key: the grid option when the grid is resolved,
	/// the settings value otherwise.
	pub fn license_key(&self) -> Option<&str> {
		let key = match &self.grid_options {
			Some(options) => options.get_str("license_key"),
			None => self.settings.license_key.as_deref(),
		};
		key.filter(|key| !key.is_empty())
	}

	/// Whether an enterprise license key is available.
	pub fn has_license(&self) -> bool {
		self.license_key().is_some()
	}

	/// Translation domain applied to views whose cascade left it unset.
	pub fn translation_domain(&self) -> &str {
		self.grid_options
			.as_deref()
			.and_then(|options| options.get_str("translation_domain"))
			.unwrap_or(&self.settings.translation_domain)
	}
}

impl fmt::Debug for AmbientContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AmbientContext")
			.field("settings", &self.settings)
			.field("grid_options", &self.grid_options)
			.field("data_source", &self.data_source.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::options::OptionSchema;
	use rstest::rstest;
	use serde_json::json;

	fn grid_options(raw: serde_json::Value) -> Arc<ResolvedOptions> {
		let mut schema = OptionSchema::new();
		schema.define("license_key").default(json!(null));
		schema.define("translation_domain").default("grid");
		Arc::new(schema.resolve(&raw).unwrap())
	}

	#[rstest]
	fn test_license_key_comes_from_settings_before_grid_resolution() {
		let settings = GridSettings {
			license_key: Some("KEY".to_string()),
			..GridSettings::default()
		};
		let context = AmbientContext::new(Arc::new(settings));
		assert_eq!(context.license_key(), Some("KEY"));
	}

	#[rstest]
	fn test_grid_option_overrides_settings_license() {
		// Arrange
		let settings = GridSettings {
			license_key: Some("KEY".to_string()),
			..GridSettings::default()
		};
		let context = AmbientContext::new(Arc::new(settings))
			.with_grid_options(grid_options(json!({"license_key": null})));

		// Assert
		assert!(!context.has_license());
	}

	#[rstest]
	fn test_empty_license_key_counts_as_missing() {
		let context = AmbientContext::new(Arc::new(GridSettings::default()))
			.with_grid_options(grid_options(json!({"license_key": ""})));
		assert!(!context.has_license());
	}

	#[rstest]
	fn test_translation_domain_falls_back_to_settings() {
		let context = AmbientContext::new(Arc::new(GridSettings::default()));
		assert_eq!(context.translation_domain(), "grid");

		let context = context.with_grid_options(grid_options(json!({"translation_domain": "admin"})));
		assert_eq!(context.translation_domain(), "admin");
	}
}
