//! Data transformer chains
//!
//! A column's displayed value is produced by running the raw value read from
//! a row through an ordered chain of [`DataTransformer`]s. The chain is
//! populated once by the data build cascade and only evaluated afterwards.

use crate::error::TransformError;
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// One value-conversion step.
pub trait DataTransformer: Send + Sync + fmt::Debug {
	/// Name used in errors and introspection.
	fn name(&self) -> &str;

	/// Converts `value`; `row` is the whole row it was read from.
	fn transform(&self, value: Value, row: &Value) -> Result<Value, TransformError>;
}

/// Whether the data build cascade already ran for a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
	/// The cascade has not run yet.
	#[default]
	Unbuilt,
	/// The cascade ran; further builds are no-ops.
	Built,
}

/// Ordered transformer chain of one column or filter.
///
/// [`add`](Self::add) prepends, so a transformer added later runs before
/// the ones added earlier; [`append`](Self::append) puts it at the back.
#[derive(Debug, Clone, Default)]
pub struct DataPipeline {
	transformers: VecDeque<Arc<dyn DataTransformer>>,
	state: PipelineState,
}

impl DataPipeline {
	/// Creates an empty, unbuilt pipeline.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a transformer at the front of the chain.
	pub fn add(&mut self, transformer: impl DataTransformer + 'static) -> &mut Self {
		self.transformers.push_front(Arc::new(transformer));
		self
	}

	/// Inserts a transformer at the back of the chain.
	pub fn append(&mut self, transformer: impl DataTransformer + 'static) -> &mut Self {
		self.transformers.push_back(Arc::new(transformer));
		self
	}

	/// Number of transformers.
	pub fn len(&self) -> usize {
		self.transformers.len()
	}

	/// Whether the chain is empty.
	pub fn is_empty(&self) -> bool {
		self.transformers.is_empty()
	}

	/// Transformer names in execution order.
	pub fn names(&self) -> Vec<&str> {
		self.transformers.iter().map(|t| t.name()).collect()
	}

	/// Build state.
	pub fn state(&self) -> PipelineState {
		self.state
	}

	/// Whether the data build cascade already ran.
	pub fn is_built(&self) -> bool {
		self.state == PipelineState::Built
	}

	/// Marks the pipeline as built.
	pub fn mark_built(&mut self) {
		self.state = PipelineState::Built;
	}

	/// Runs `value` through every transformer, front to back.
	pub fn transform(&self, value: Value, row: &Value) -> Result<Value, TransformError> {
		self.transformers
			.iter()
			.try_fold(value, |value, transformer| transformer.transform(value, row))
	}
}

type TransformFn = dyn Fn(Value, &Value) -> Result<Value, TransformError> + Send + Sync;

/// Transformer backed by a closure.
///
/// ```
/// use reinhardt_grid_core::pipeline::{CallbackTransformer, DataPipeline};
/// use serde_json::{json, Value};
///
/// let mut pipeline = DataPipeline::new();
/// pipeline.add(CallbackTransformer::new("upper", |value, _row| {
///     Ok(Value::String(value.as_str().unwrap_or_default().to_uppercase()))
/// }));
///
/// assert_eq!(pipeline.transform(json!("ada"), &json!({})).unwrap(), json!("ADA"));
/// ```
#[derive(Clone)]
pub struct CallbackTransformer {
	name: String,
	callback: Arc<TransformFn>,
}

impl CallbackTransformer {
	/// Creates a named closure transformer.
	pub fn new<F>(name: impl Into<String>, callback: F) -> Self
	where
		F: Fn(Value, &Value) -> Result<Value, TransformError> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			callback: Arc::new(callback),
		}
	}
}

impl fmt::Debug for CallbackTransformer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CallbackTransformer")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

impl DataTransformer for CallbackTransformer {
	fn name(&self) -> &str {
		&self.name
	}

	fn transform(&self, value: Value, row: &Value) -> Result<Value, TransformError> {
		(self.callback)(value, row)
	}
}
