//! In-memory data source

use reinhardt_grid_core::DataSource;
use serde::Serialize;
use serde_json::Value;

/// Data source over rows held in memory.
///
/// ```
/// use reinhardt_grid_core::DataSource;
/// use reinhardt_grid_types::MemoryDataSource;
/// use serde_json::json;
///
/// let source = MemoryDataSource::new(vec![
///     json!({"status": "open"}),
///     json!({"status": "closed"}),
///     json!({"status": "open"}),
/// ]);
/// assert_eq!(source.distinct_values("status"), vec![json!("open"), json!("closed")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
	rows: Vec<Value>,
}

impl MemoryDataSource {
	/// Creates a source over JSON rows.
	pub fn new(rows: Vec<Value>) -> Self {
		Self { rows }
	}

	/// Creates a source by serializing each item.
	pub fn from_serialize<T: Serialize>(items: &[T]) -> serde_json::Result<Self> {
		let rows = items
			.iter()
			.map(serde_json::to_value)
			.collect::<serde_json::Result<Vec<_>>>()?;
		Ok(Self::new(rows))
	}

	/// Appends a row.
	pub fn push(&mut self, row: Value) {
		self.rows.push(row);
	}

	/// Number of rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Whether there are no rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

impl DataSource for MemoryDataSource {
	fn rows(&self) -> Vec<Value> {
		self.rows.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[derive(Serialize)]
	struct Ticket {
		id: u32,
		status: &'static str,
	}

	#[rstest]
	fn test_from_serialize() {
		// Arrange
		let tickets = [
			Ticket { id: 1, status: "open" },
			Ticket { id: 2, status: "closed" },
		];

		// Act
		let source = MemoryDataSource::from_serialize(&tickets).unwrap();

		// Assert
		assert_eq!(source.len(), 2);
		assert_eq!(source.rows()[1], json!({"id": 2, "status": "closed"}));
	}
}
