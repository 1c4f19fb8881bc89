//! Column filters

use crate::kind::FilterKind;
use crate::view::FilterView;
use reinhardt_grid_core::{
	AmbientContext, DataPipeline, DataSource, GridError, GridResult, ResolvedOptions, ResolvedType,
};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Query-translation collaborator.
///
/// Turns a filter payload submitted by the client into a boolean expression
/// for whatever query layer backs the data source, or `None` when the payload
/// does not restrict anything.
pub trait FilterTranslator {
	/// Translates `payload` for the filter on `field`.
	fn translate(
		&self,
		field: &str,
		options: &ResolvedOptions,
		data_source: Option<&dyn DataSource>,
		payload: &Value,
	) -> Result<Option<Value>, String>;
}

/// Filter attached to a column.
pub struct Filter {
	pub(crate) column_key: String,
	pub(crate) field: String,
	pub(crate) resolved_type: ResolvedType<FilterKind>,
	pub(crate) options: Arc<ResolvedOptions>,
	pub(crate) context: AmbientContext,
	pub(crate) pipeline: DataPipeline,
}

impl Filter {
	/// Key of the owning column.
	pub fn column_key(&self) -> &str {
		&self.column_key
	}

	/// Data path the filter applies to.
	pub fn field(&self) -> &str {
		&self.field
	}

	/// Identifier of the filter's type.
	pub fn type_name(&self) -> &str {
		self.resolved_type.name()
	}

	/// Resolved options.
	pub fn options(&self) -> &ResolvedOptions {
		&self.options
	}

	/// Ambient grid context.
	pub fn context(&self) -> &AmbientContext {
		&self.context
	}

	/// Transformer chain applied to submitted values.
	pub fn pipeline(&self) -> &DataPipeline {
		&self.pipeline
	}

	/// Builds a fresh view of the filter.
	pub fn create_view(&self) -> GridResult<FilterView> {
		let mut view = FilterView::new(&self.column_key);
		self.resolved_type
			.build_view(&mut view, self, &self.options)?;
		view.vars
			.set_default("translation_domain", self.context.translation_domain());
		Ok(view)
	}

	/// Populates the transformer chain. Runs at most once per filter.
	pub fn build_data(&mut self) -> GridResult<()> {
		self.resolved_type
			.build_data(&self.column_key, &mut self.pipeline, &self.options)
	}

	/// Runs the submitted value through the transformer chain and hands the
	/// payload to `translator`.
	///
	/// The value is read from the payload's `value` key when the payload is
	/// an object carrying one, otherwise the whole payload is the value.
	pub fn translate(
		&self,
		translator: &dyn FilterTranslator,
		payload: &Value,
	) -> GridResult<Option<Value>> {
		if !self.pipeline.is_built() {
			return Err(GridError::PipelineNotBuilt(self.column_key.clone()));
		}

		let transform = |value: Value| {
			self.pipeline
				.transform(value, payload)
				.map_err(|source| GridError::Transform {
					entity: self.column_key.clone(),
					source,
				})
		};
		let payload = match payload {
			Value::Object(map) if map.contains_key("value") => {
				let mut map = map.clone();
				let value = map.remove("value").unwrap_or_default();
				map.insert("value".to_string(), transform(value)?);
				Value::Object(map)
			}
			other => transform(other.clone())?,
		};

		translator
			.translate(
				&self.field,
				&self.options,
				self.context.data_source(),
				&payload,
			)
			.map_err(|message| GridError::Translation {
				entity: self.column_key.clone(),
				message,
			})
	}
}

impl fmt::Debug for Filter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Filter")
			.field("column_key", &self.column_key)
			.field("type", &self.resolved_type.name())
			.field("field", &self.field)
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}
