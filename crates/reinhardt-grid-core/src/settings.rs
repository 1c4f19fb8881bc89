//! Grid settings
//!
//! Defaults shared by every grid a factory builds. Settings are layered the
//! same way as the rest of the framework's configuration: built-in defaults,
//! then a TOML document, then `REINHARDT_GRID_*` environment variables.
//!
//! ```toml
//! license_key = "..."
//! translation_domain = "admin"
//! theme = "ag-theme-alpine"
//!
//! [templates]
//! grid = "grid/custom_grid.html"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of the environment variables read by [`GridSettings::with_env_overrides`].
pub const ENV_PREFIX: &str = "REINHARDT_GRID_";

/// Settings errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SettingsError {
	/// The TOML document could not be parsed.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A value failed validation.
	#[error("Invalid value for '{key}': {message}")]
	InvalidValue {
		/// Setting key.
		key: String,
		/// What is wrong with it.
		message: String,
	},
}

/// Default template identifiers per entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
	/// Grid template.
	pub grid: String,
	/// Column template.
	pub column: String,
	/// Filter template.
	pub filter: String,
	/// Component template.
	pub component: String,
}

impl Default for TemplateSettings {
	fn default() -> Self {
		Self {
			grid: "grid/grid.html".to_string(),
			column: "grid/column.html".to_string(),
			filter: "grid/filter.html".to_string(),
			component: "grid/component.html".to_string(),
		}
	}
}

/// Factory-wide grid settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
	/// Enterprise license key, default for the `license_key` grid option.
	pub license_key: Option<String>,
	/// Fallback translation domain for views.
	pub translation_domain: String,
	/// Default theme class.
	pub theme: String,
	/// Default templates.
	pub templates: TemplateSettings,
}

impl Default for GridSettings {
	fn default() -> Self {
		Self {
			license_key: None,
			translation_domain: "grid".to_string(),
			theme: "ag-theme-quartz".to_string(),
			templates: TemplateSettings::default(),
		}
	}
}

impl GridSettings {
	/// Parses settings from a TOML document; missing keys keep their defaults.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_grid_core::settings::GridSettings;
	///
	/// let settings = GridSettings::from_toml_str(r#"
	///     translation_domain = "admin"
	///     [templates]
	///     grid = "admin/grid.html"
	/// "#).unwrap();
	///
	/// assert_eq!(settings.translation_domain, "admin");
	/// assert_eq!(settings.templates.grid, "admin/grid.html");
	/// assert_eq!(settings.templates.column, "grid/column.html");
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: GridSettings = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Overlays values from `REINHARDT_GRID_*` environment variables.
	pub fn with_env_overrides(self) -> Result<Self, SettingsError> {
		self.with_overrides(std::env::vars())
	}

	/// Overlays values from `(name, value)` pairs using the environment
	/// variable naming scheme. Unknown names are ignored.
	pub fn with_overrides<I, K, V>(mut self, vars: I) -> Result<Self, SettingsError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		for (key, value) in vars {
			let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
				continue;
			};
			match name.to_lowercase().as_str() {
				"license_key" => self.license_key = Some(value.into()),
				"translation_domain" => self.translation_domain = value.into(),
				"theme" => self.theme = value.into(),
				"template_grid" => self.templates.grid = value.into(),
				"template_column" => self.templates.column = value.into(),
				"template_filter" => self.templates.filter = value.into(),
				"template_component" => self.templates.component = value.into(),
				other => tracing::debug!(setting = other, "ignoring unknown grid setting"),
			}
		}
		self.validate()?;
		Ok(self)
	}

	/// Checks that every value is usable.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.license_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
			return Err(SettingsError::InvalidValue {
				key: "license_key".to_string(),
				message: "must not be empty when set".to_string(),
			});
		}
		let required = [
			("translation_domain", &self.translation_domain),
			("theme", &self.theme),
			("templates.grid", &self.templates.grid),
			("templates.column", &self.templates.column),
			("templates.filter", &self.templates.filter),
			("templates.component", &self.templates.component),
		];
		for (key, value) in required {
			if value.trim().is_empty() {
				return Err(SettingsError::InvalidValue {
					key: key.to_string(),
					message: "must not be empty".to_string(),
				});
			}
		}
		Ok(())
	}
}

impl fmt::Debug for GridSettings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GridSettings")
			.field(
				"license_key",
				&self.license_key.as_ref().map(|_| "[REDACTED]"),
			)
			.field("translation_domain", &self.translation_domain)
			.field("theme", &self.theme)
			.field("templates", &self.templates)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = GridSettings::default();
		assert_eq!(settings.license_key, None);
		assert_eq!(settings.translation_domain, "grid");
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_from_toml_with_license() {
		// Act
		let settings = GridSettings::from_toml_str(
			r#"
			license_key = "ENTERPRISE-123"
			theme = "ag-theme-alpine"
			"#,
		)
		.unwrap();

		// Assert
		assert_eq!(settings.license_key.as_deref(), Some("ENTERPRISE-123"));
		assert_eq!(settings.theme, "ag-theme-alpine");
		assert_eq!(settings.translation_domain, "grid");
	}

	#[rstest]
	fn test_invalid_toml_is_reported() {
		let result = GridSettings::from_toml_str("theme = [");
		assert!(matches!(result, Err(SettingsError::Toml(_))));
	}

	#[rstest]
	#[case("translation_domain = \"\"", "translation_domain")]
	#[case("license_key = \"  \"", "license_key")]
	#[case("[templates]\ncolumn = \"\"", "templates.column")]
	fn test_empty_values_are_rejected(#[case] source: &str, #[case] expected_key: &str) {
		let result = GridSettings::from_toml_str(source);
		assert!(matches!(
			result,
			Err(SettingsError::InvalidValue { ref key, .. }) if key == expected_key
		));
	}

	#[rstest]
	fn test_overrides_use_env_naming() {
		// Arrange
		let vars = vec![
			("REINHARDT_GRID_LICENSE_KEY", "KEY"),
			("REINHARDT_GRID_TEMPLATE_FILTER", "custom/filter.html"),
			("OTHER_VARIABLE", "ignored"),
			("REINHARDT_GRID_UNKNOWN", "ignored"),
		];

		// Act
		let settings = GridSettings::default().with_overrides(vars).unwrap();

		// Assert
		assert_eq!(settings.license_key.as_deref(), Some("KEY"));
		assert_eq!(settings.templates.filter, "custom/filter.html");
	}

	#[rstest]
	fn test_debug_redacts_license_key() {
		let settings = GridSettings {
			license_key: Some("SECRET".to_string()),
			..GridSettings::default()
		};
		let debug = format!("{settings:?}");
		assert!(!debug.contains("SECRET"));
		assert!(debug.contains("[REDACTED]"));
	}
}
