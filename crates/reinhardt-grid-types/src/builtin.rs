//! Built-in types
//!
//! Every type here registers itself at link time, so a fresh
//! [`TypeResolver`](reinhardt_grid_core::TypeResolver) resolves all of them
//! without any set-up.
//!
//! | Kind | Root | Descendants |
//! |------|------|-------------|
//! | grid | `grid` | |
//! | column | `column` | `text`, `number`, `boolean`, `date`, `choice`, `group` |
//! | filter | `filter` | `text_filter`, `number_filter`, `date_filter`, `boolean_filter`, `set_filter` |
//! | component | `component` | `side_bar`, `tool_panel` (`columns_tool_panel`, `filters_tool_panel`), `status_bar`, `status_panel` (`total_row_count`, `aggregation`) |

pub mod column;
pub mod component;
pub mod filter;
pub mod grid;

use reinhardt_grid_core::ResolvedOptions;
use serde_json::Value;

/// Turns an identifier into a label: `first_name` becomes `First name`.
pub fn humanize(name: &str) -> String {
	let spaced: String = name
		.chars()
		.map(|c| if c == '_' || c == '-' || c == '.' { ' ' } else { c })
		.collect();
	let spaced = spaced.trim().to_lowercase();
	let mut chars = spaced.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Normalizer rejecting a truthy flag when no license key is available.
pub(crate) fn licensed_flag(
	feature: &'static str,
	licensed: bool,
) -> impl Fn(&ResolvedOptions, Value) -> Result<Value, String> + Send + Sync + 'static {
	move |_, value| {
		if value == Value::Bool(true) && !licensed {
			Err(format!(
				"{feature} is an enterprise feature and requires a license key"
			))
		} else {
			Ok(value)
		}
	}
}

/// Normalizer rejecting any use of an enterprise-only type without a license
/// key; attached to an option every entity resolves.
pub(crate) fn licensed_type(
	type_name: &'static str,
	licensed: bool,
) -> impl Fn(&ResolvedOptions, Value) -> Result<Value, String> + Send + Sync + 'static {
	move |_, value| {
		if licensed {
			Ok(value)
		} else {
			Err(format!(
				"the '{type_name}' type is an enterprise feature and requires a license key"
			))
		}
	}
}

/// Predicate for array options whose items must all be in `allowed`.
pub(crate) fn subset_of(allowed: &'static [&'static str]) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
	move |value| {
		value.as_array().is_some_and(|items| {
			items
				.iter()
				.all(|item| item.as_str().is_some_and(|s| allowed.contains(&s)))
		})
	}
}

/// Predicate for optional positive integers.
pub(crate) fn positive_or_null(value: &Value) -> bool {
	value.is_null() || value.as_i64().is_some_and(|n| n > 0)
}
