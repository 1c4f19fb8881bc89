//! Weight-based ordering engine
//!
//! Every placed entry owns an integer weight. Placing an entry at weight `w`
//! shifts every weight `>= w` up by one, so the new entry lands exactly in
//! front of whatever sat at `w` before. Three counters track the insertion
//! points for `"first"`, unpositioned and `"last"` entries.
//!
//! An entry whose before/after target has no weight yet is parked in a
//! deferred bucket keyed by the target. As soon as the target is placed, its
//! waiting entries are placed next to it; they may in turn release entries
//! waiting on them. That cascade runs off an explicit worklist.
//!
//! Within one bucket the waiting entries keep their declaration order:
//! entries deferred `before` a target end up in declaration order in front
//! of it, entries deferred `after` a target in declaration order behind it.

use crate::error::{OrderingError, OrderingResult};
use crate::position::{Position, PositionedEntry, Relation};
use std::collections::{HashMap, HashSet, VecDeque};

/// Entries waiting for a target that has not been placed yet.
#[derive(Debug, Default)]
struct DeferredBucket {
	/// target -> keys waiting on it, in declaration order
	waiting: HashMap<String, Vec<String>>,
	/// waiting key -> its target
	targets: HashMap<String, String>,
}

impl DeferredBucket {
	fn push(&mut self, key: &str, target: &str) {
		self.waiting
			.entry(target.to_string())
			.or_default()
			.push(key.to_string());
		self.targets.insert(key.to_string(), target.to_string());
	}

	fn take(&mut self, target: &str) -> Vec<String> {
		let keys = self.waiting.remove(target).unwrap_or_default();
		for key in &keys {
			self.targets.remove(key);
		}
		keys
	}

	fn target_of(&self, key: &str) -> Option<&str> {
		self.targets.get(key).map(String::as_str)
	}

	fn is_waiting_on(&self, key: &str, target: &str) -> bool {
		self.waiting
			.get(target)
			.is_some_and(|keys| keys.iter().any(|k| k == key))
	}
}

/// Computes a total order over positioned entries.
///
/// # Examples
///
/// ```
/// use reinhardt_grid_ordering::{GridOrderer, Position, PositionedEntry};
///
/// let entries = vec![
///     PositionedEntry::new("a", Some(Position::Before("b".to_string()))),
///     PositionedEntry::unpositioned("b"),
///     PositionedEntry::new("c", Some(Position::First)),
/// ];
///
/// assert_eq!(GridOrderer::order(&entries).unwrap(), vec!["c", "a", "b"]);
/// ```
#[derive(Debug, Default)]
pub struct GridOrderer {
	weights: HashMap<String, i64>,
	first_weight: i64,
	current_weight: i64,
	last_weight: i64,
	before: DeferredBucket,
	after: DeferredBucket,
	worklist: VecDeque<String>,
}

impl GridOrderer {
	/// Creates an empty orderer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Orders `entries` and returns their keys, first to last.
	pub fn order(entries: &[PositionedEntry]) -> OrderingResult<Vec<String>> {
		Self::new().run(entries)
	}

	/// Runs this orderer over `entries`.
	///
	/// The orderer is consumed: weights from one run are meaningless for
	/// another.
	pub fn run(mut self, entries: &[PositionedEntry]) -> OrderingResult<Vec<String>> {
		let mut seen = HashSet::with_capacity(entries.len());
		for entry in entries {
			if !seen.insert(entry.key.as_str()) {
				return Err(OrderingError::DuplicateKey(entry.key.clone()));
			}
		}

		for entry in entries {
			self.process(entry)?;
		}

		for entry in entries {
			if self.weights.contains_key(&entry.key) {
				continue;
			}
			if let Some((relation, target)) = entry.position.as_ref().and_then(Position::relative)
			{
				return Err(OrderingError::UnresolvedTarget {
					key: entry.key.clone(),
					target: target.to_string(),
					relation,
				});
			}
		}

		let mut ordered: Vec<(&str, i64)> = entries
			.iter()
			.filter_map(|e| self.weights.get(&e.key).map(|w| (e.key.as_str(), *w)))
			.collect();
		ordered.sort_by_key(|(_, weight)| *weight);

		Ok(ordered.into_iter().map(|(key, _)| key.to_string()).collect())
	}

	fn process(&mut self, entry: &PositionedEntry) -> OrderingResult<()> {
		let key = entry.key.as_str();
		match &entry.position {
			None => self.place(key, self.current_weight),
			Some(Position::First) => {
				let weight = self.first_weight;
				self.first_weight += 1;
				self.place(key, weight);
			}
			Some(Position::Last) => self.place(key, self.last_weight + 1),
			Some(Position::Before(target)) => match self.weights.get(target) {
				Some(&weight) => self.place(key, weight),
				None => self.defer(key, target, Relation::Before)?,
			},
			Some(Position::After(target)) => match self.weights.get(target) {
				Some(&weight) => self.place(key, weight + 1),
				None => self.defer(key, target, Relation::After)?,
			},
		}
		Ok(())
	}

	fn bucket(&self, relation: Relation) -> &DeferredBucket {
		match relation {
			Relation::Before => &self.before,
			Relation::After => &self.after,
		}
	}

	fn defer(&mut self, key: &str, target: &str, relation: Relation) -> OrderingResult<()> {
		self.check_cycle(key, target, relation)?;

		if self.bucket(relation.opposite()).is_waiting_on(target, key) {
			return Err(OrderingError::SymmetricConflict {
				key: key.to_string(),
				target: target.to_string(),
				relation,
			});
		}

		tracing::trace!(key, target, %relation, "deferring ordering entry");
		match relation {
			Relation::Before => self.before.push(key, target),
			Relation::After => self.after.push(key, target),
		}
		Ok(())
	}

	/// Follows the chain of deferred targets starting at `target` under the
	/// same relation; reaching `key` again closes a cycle.
	fn check_cycle(&self, key: &str, target: &str, relation: Relation) -> OrderingResult<()> {
		let bucket = self.bucket(relation);
		let mut cycle = vec![key.to_string(), target.to_string()];
		let mut current = target;
		loop {
			if current == key {
				return Err(OrderingError::CircularReference { cycle });
			}
			match bucket.target_of(current) {
				Some(next) => {
					cycle.push(next.to_string());
					current = next;
				}
				None => return Ok(()),
			}
		}
	}

	fn place(&mut self, key: &str, weight: i64) {
		self.insert_at(key, weight);
		self.worklist.push_back(key.to_string());

		while let Some(placed) = self.worklist.pop_front() {
			for waiting in self.before.take(&placed) {
				let weight = self.weights[&placed];
				tracing::trace!(key = %waiting, target = %placed, "resolving deferred 'before' entry");
				self.insert_at(&waiting, weight);
				self.worklist.push_back(waiting);
			}
			// Reverse so that repeated "right after the target" inserts leave
			// the bucket in declaration order.
			for waiting in self.after.take(&placed).into_iter().rev() {
				let weight = self.weights[&placed] + 1;
				tracing::trace!(key = %waiting, target = %placed, "resolving deferred 'after' entry");
				self.insert_at(&waiting, weight);
				self.worklist.push_back(waiting);
			}
		}
	}

	fn insert_at(&mut self, key: &str, weight: i64) {
		for existing in self.weights.values_mut() {
			if *existing >= weight {
				*existing += 1;
			}
		}
		if self.current_weight >= weight {
			self.current_weight += 1;
		}
		self.last_weight += 1;
		self.weights.insert(key.to_string(), weight);
	}
}
