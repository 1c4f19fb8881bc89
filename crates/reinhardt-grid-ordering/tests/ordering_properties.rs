//! Property tests for the grid ordering engine

use proptest::prelude::*;
use reinhardt_grid_ordering::{GridOrderer, Position, PositionedEntry};
use std::collections::HashSet;

fn keys(count: usize) -> Vec<String> {
	(0..count).map(|i| format!("col_{i}")).collect()
}

/// Positions that never reference another entry, so ordering always succeeds.
fn absolute_position() -> impl Strategy<Value = Option<Position>> {
	prop_oneof![
		3 => Just(None),
		1 => Just(Some(Position::First)),
		1 => Just(Some(Position::Last)),
	]
}

proptest! {
	#[test]
	fn prop_output_is_a_permutation_of_the_input(
		positions in prop::collection::vec(absolute_position(), 0..24)
	) {
		let entries: Vec<PositionedEntry> = keys(positions.len())
			.into_iter()
			.zip(positions)
			.map(|(key, position)| PositionedEntry::new(key, position))
			.collect();

		let order = GridOrderer::order(&entries).unwrap();

		prop_assert_eq!(order.len(), entries.len());
		let unique: HashSet<&String> = order.iter().collect();
		prop_assert_eq!(unique.len(), entries.len());
	}

	#[test]
	fn prop_unpositioned_entries_keep_natural_order(count in 0usize..32) {
		let entries: Vec<PositionedEntry> =
			keys(count).into_iter().map(PositionedEntry::unpositioned).collect();

		let order = GridOrderer::order(&entries).unwrap();

		prop_assert_eq!(order, keys(count));
	}

	#[test]
	fn prop_first_entries_lead_in_declaration_order(
		positions in prop::collection::vec(absolute_position(), 1..24)
	) {
		let entries: Vec<PositionedEntry> = keys(positions.len())
			.into_iter()
			.zip(positions)
			.map(|(key, position)| PositionedEntry::new(key, position))
			.collect();
		let firsts: Vec<String> = entries
			.iter()
			.filter(|e| e.position == Some(Position::First))
			.map(|e| e.key.clone())
			.collect();

		let order = GridOrderer::order(&entries).unwrap();

		prop_assert_eq!(&order[..firsts.len()], &firsts[..]);
	}

	#[test]
	fn prop_before_reference_lands_directly_in_front(
		count in 2usize..16,
		target in 0usize..16,
		mover in 0usize..16,
	) {
		let target = target % count;
		let mover = mover % count;
		prop_assume!(target != mover);
		let names = keys(count);
		let entries: Vec<PositionedEntry> = names
			.iter()
			.enumerate()
			.map(|(i, key)| {
				if i == mover {
					PositionedEntry::new(key.clone(), Some(Position::Before(names[target].clone())))
				} else {
					PositionedEntry::unpositioned(key.clone())
				}
			})
			.collect();

		let order = GridOrderer::order(&entries).unwrap();

		let mover_at = order.iter().position(|k| *k == names[mover]).unwrap();
		let target_at = order.iter().position(|k| *k == names[target]).unwrap();
		prop_assert_eq!(mover_at + 1, target_at);
	}
}
