//! Common test fixtures for reinhardt-grid-types tests

use reinhardt_grid_core::{DataSource, GridSettings, TypeResolver};
use reinhardt_grid_types::{GridBuilder, GridFactory, MemoryDataSource};
use rstest::*;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Person a ticket is assigned to
#[derive(Debug, Clone, Serialize)]
pub struct TestAssignee {
	pub name: String,
	pub city: String,
}

/// Ticket row used across grid tests
#[derive(Debug, Clone, Serialize)]
pub struct TestTicket {
	pub id: i64,
	pub title: String,
	pub status: String,
	pub urgent: bool,
	pub created_at: String,
	pub notes: Option<String>,
	pub assignee: TestAssignee,
}

fn ticket(id: i64, title: &str, status: &str, urgent: bool, created_at: &str, assignee: (&str, &str)) -> TestTicket {
	TestTicket {
		id,
		title: title.to_string(),
		status: status.to_string(),
		urgent,
		created_at: created_at.to_string(),
		notes: None,
		assignee: TestAssignee {
			name: assignee.0.to_string(),
			city: assignee.1.to_string(),
		},
	}
}

/// Fixture providing sample tickets
#[fixture]
pub fn sample_tickets() -> Vec<TestTicket> {
	vec![
		ticket(1234, "  Broken login  ", "open", true, "2024-01-15", ("Alice", "Lyon")),
		ticket(7, "Typo", "closed", false, "2024-02-20", ("Bob", "Oslo")),
		ticket(42, "Slow search", "open", false, "2024-03-10", ("Alice", "Lyon")),
	]
}

/// Fixture providing the sample tickets as a data source
#[fixture]
pub fn ticket_source(sample_tickets: Vec<TestTicket>) -> Arc<dyn DataSource> {
	Arc::new(MemoryDataSource::from_serialize(&sample_tickets).unwrap())
}

/// Fixture providing a factory without a license key
#[fixture]
pub fn factory() -> GridFactory {
	GridFactory::default()
}

/// Fixture providing a factory whose settings carry a license key
#[fixture]
pub fn licensed_factory() -> GridFactory {
	let settings = GridSettings {
		license_key: Some("test-license".to_string()),
		..GridSettings::default()
	};
	GridFactory::new(Arc::new(TypeResolver::new()), settings)
}

/// Fixture providing a builder with one column of every data type
#[fixture]
pub fn ticket_builder(factory: GridFactory, ticket_source: Arc<dyn DataSource>) -> GridBuilder {
	let mut builder = factory
		.create_builder("tickets", "grid", json!({}), Some(ticket_source))
		.unwrap();

	builder
		.add("id", "number", json!({"thousands_separator": ","}))
		.add("title", "text", json!({"max_length": 10}))
		.add(
			"status",
			"choice",
			json!({"choices": {"open": "Open", "closed": "Closed"}}),
		)
		.add("urgent", "boolean", json!({}))
		.add("created_at", "date", json!({"format": "%d/%m/%Y"}))
		.add("notes", "text", json!({"default_value": "-"}))
		.add_group("assignee", json!({}), |group| {
			group
				.add("name", "text", json!({"path": "assignee.name"}))
				.add("city", "text", json!({"path": "assignee.city"}));
		});

	builder
}
