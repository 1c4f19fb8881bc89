//! Type registries and resolution
//!
//! Types are found in two places, in this order:
//!
//! 1. the managed registry of a [`TypeResolver`], filled at runtime with
//!    [`TypeResolver::register`];
//! 2. link-time registrations submitted with [`register_type!`](crate::register_type),
//!    constructed on demand.
//!
//! Registries are read-only while grids are being built; registration is
//! expected to happen during application start-up.

use crate::composition::ResolvedType;
use crate::error::TypeResolutionError;
use crate::types::{TypeExtension, TypeKind, TypeNode};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Maximum number of types in one parent chain.
///
/// Parent chains are acyclic by construction; the limit turns a cyclic
/// chain into an error instead of an endless walk.
pub const MAX_TYPE_DEPTH: usize = 32;

/// Link-time registration of a type constructor.
///
/// Submitted through [`register_type!`](crate::register_type) and collected
/// with `inventory`.
pub struct TypeRegistration {
	/// Kind marker identity.
	pub kind: fn() -> TypeId,
	/// Kind name, for mismatch errors.
	pub kind_label: &'static str,
	/// Type identifier.
	pub name: &'static str,
	/// Returns a boxed `Arc<dyn TypeNode<K>>`.
	pub construct: fn() -> Box<dyn Any + Send + Sync>,
}

impl TypeRegistration {
	/// Creates a registration of kind `K`.
	pub const fn new<K: TypeKind>(
		name: &'static str,
		construct: fn() -> Box<dyn Any + Send + Sync>,
	) -> Self {
		Self {
			kind: TypeId::of::<K>,
			kind_label: K::LABEL,
			name,
			construct,
		}
	}

	fn is_kind<K: TypeKind>(&self) -> bool {
		(self.kind)() == TypeId::of::<K>()
	}
}

inventory::collect!(TypeRegistration);

/// Registers a type at link time.
///
/// ```ignore
/// register_type!(ColumnKind, "currency", CurrencyColumnType);
/// ```
#[macro_export]
macro_rules! register_type {
	($kind:ty, $name:expr, $node:expr) => {
		const _: () = {
			fn construct() -> ::std::boxed::Box<dyn ::std::any::Any + Send + Sync> {
				let node: ::std::sync::Arc<dyn $crate::types::TypeNode<$kind>> =
					::std::sync::Arc::new($node);
				::std::boxed::Box::new(node)
			}

			$crate::inventory::submit! {
				$crate::registry::TypeRegistration::new::<$kind>($name, construct)
			}
		};
	};
}

static REGISTRATIONS: Lazy<HashMap<&'static str, Vec<&'static TypeRegistration>>> =
	Lazy::new(|| {
		let mut index: HashMap<&'static str, Vec<&'static TypeRegistration>> = HashMap::new();
		for registration in inventory::iter::<TypeRegistration> {
			index.entry(registration.name).or_default().push(registration);
		}
		tracing::debug!(types = index.len(), "indexed link-time type registrations");
		index
	});

/// Link-time registered identifiers of kind `K`, sorted.
pub fn registered_types<K: TypeKind>() -> Vec<&'static str> {
	let mut names: Vec<&'static str> = REGISTRATIONS
		.values()
		.flatten()
		.filter(|r| r.is_kind::<K>())
		.map(|r| r.name)
		.collect();
	names.sort_unstable();
	names
}

/// Managed types and extensions of one kind.
pub struct TypeRegistry<K: TypeKind> {
	types: HashMap<String, Arc<dyn TypeNode<K>>>,
	extensions: HashMap<String, Vec<Arc<dyn TypeExtension<K>>>>,
}

impl<K: TypeKind> Default for TypeRegistry<K> {
	fn default() -> Self {
		Self {
			types: HashMap::new(),
			extensions: HashMap::new(),
		}
	}
}

impl<K: TypeKind> TypeRegistry<K> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a type under its own name, replacing any earlier one.
	pub fn register(&mut self, node: Arc<dyn TypeNode<K>>) {
		self.types.insert(node.name().to_string(), node);
	}

	/// Registers an extension of its target type.
	pub fn register_extension(&mut self, extension: Arc<dyn TypeExtension<K>>) {
		self.extensions
			.entry(extension.extended_type().to_string())
			.or_default()
			.push(extension);
	}

	/// Managed type registered under `name`.
	pub fn get(&self, name: &str) -> Option<Arc<dyn TypeNode<K>>> {
		self.types.get(name).cloned()
	}

	/// Extensions of exactly `name`, in registration order.
	pub fn extensions_of(&self, name: &str) -> Vec<Arc<dyn TypeExtension<K>>> {
		self.extensions.get(name).cloned().unwrap_or_default()
	}

	/// Whether a managed type is registered under `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.types.contains_key(name)
	}
}

impl<K: TypeKind> fmt::Debug for TypeRegistry<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeRegistry")
			.field("kind", &K::LABEL)
			.field("types", &self.types.keys().collect::<Vec<_>>())
			.field("extensions", &self.extensions.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Resolves type identifiers of every kind.
///
/// # Examples
///
/// ```
/// use reinhardt_grid_core::registry::TypeResolver;
/// use reinhardt_grid_core::types::{TypeKind, TypeNode};
///
/// struct Badge;
/// impl TypeKind for Badge {
///     const LABEL: &'static str = "badge";
///     type Entity = ();
///     type View = ();
/// }
///
/// struct Root;
/// impl TypeNode<Badge> for Root {
///     fn name(&self) -> &str { "badge" }
/// }
///
/// struct Round;
/// impl TypeNode<Badge> for Round {
///     fn name(&self) -> &str { "round" }
///     fn parent(&self) -> Option<&str> { Some("badge") }
/// }
///
/// let resolver = TypeResolver::new();
/// resolver.register::<Badge>(Root);
/// resolver.register::<Badge>(Round);
///
/// let resolved = resolver.resolve_type::<Badge>("round").unwrap();
/// assert_eq!(resolved.type_names(), vec!["badge", "round"]);
/// ```
#[derive(Default)]
pub struct TypeResolver {
	registries: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl TypeResolver {
	/// Creates a resolver with empty managed registries.
	pub fn new() -> Self {
		Self::default()
	}

	fn read<K: TypeKind, R>(&self, f: impl FnOnce(&TypeRegistry<K>) -> R) -> Option<R> {
		let registries = self.registries.read();
		registries
			.get(&TypeId::of::<K>())
			.and_then(|registry| registry.downcast_ref::<TypeRegistry<K>>())
			.map(f)
	}

	fn write<K: TypeKind, R>(&self, f: impl FnOnce(&mut TypeRegistry<K>) -> R) -> R {
		let mut registries = self.registries.write();
		let registry = registries
			.entry(TypeId::of::<K>())
			.or_insert_with(|| Box::new(TypeRegistry::<K>::new()));
		match registry.downcast_mut::<TypeRegistry<K>>() {
			Some(registry) => f(registry),
			None => unreachable!("registries are keyed by their kind"),
		}
	}

	/// Registers a managed type; it shadows a link-time registration of the
	/// same name.
	pub fn register<K: TypeKind>(&self, node: impl TypeNode<K> + 'static) {
		self.register_arc::<K>(Arc::new(node));
	}

	/// Registers a shared managed type.
	pub fn register_arc<K: TypeKind>(&self, node: Arc<dyn TypeNode<K>>) {
		tracing::debug!(kind = K::LABEL, name = node.name(), "registering managed type");
		self.write::<K, _>(|registry| registry.register(node));
	}

	/// Registers an extension. Its target must already be resolvable.
	pub fn register_extension<K: TypeKind>(
		&self,
		extension: impl TypeExtension<K> + 'static,
	) -> Result<(), TypeResolutionError> {
		let target = extension.extended_type().to_string();
		if !self.has_type::<K>(&target) {
			return Err(TypeResolutionError::UnknownExtensionTarget {
				kind: K::LABEL,
				name: target,
			});
		}
		tracing::debug!(kind = K::LABEL, target = %target, "registering type extension");
		self.write::<K, _>(|registry| registry.register_extension(Arc::new(extension)));
		Ok(())
	}

	/// Whether `name` resolves to a type of kind `K`.
	pub fn has_type<K: TypeKind>(&self, name: &str) -> bool {
		self.resolve::<K>(name).is_ok()
	}

	/// Resolves one type, managed registry first.
	pub fn resolve<K: TypeKind>(&self, name: &str) -> Result<Arc<dyn TypeNode<K>>, TypeResolutionError> {
		if let Some(node) = self.read::<K, _>(|registry| registry.get(name)).flatten() {
			return Ok(node);
		}

		let Some(registrations) = REGISTRATIONS.get(name) else {
			return Err(TypeResolutionError::NotFound {
				kind: K::LABEL,
				name: name.to_string(),
			});
		};

		match registrations.iter().find(|r| r.is_kind::<K>()) {
			Some(registration) => (registration.construct)()
				.downcast::<Arc<dyn TypeNode<K>>>()
				.map(|node| *node)
				.map_err(|_| TypeResolutionError::KindMismatch {
					name: name.to_string(),
					expected: K::LABEL,
					found: registration.kind_label,
				}),
			None => Err(TypeResolutionError::KindMismatch {
				name: name.to_string(),
				expected: K::LABEL,
				found: registrations.first().map_or("unknown", |r| r.kind_label),
			}),
		}
	}

	/// Resolves the full chain of `name`, root first, together with the
	/// extensions registered for exactly `name`.
	pub fn resolve_type<K: TypeKind>(&self, name: &str) -> Result<ResolvedType<K>, TypeResolutionError> {
		let leaf = self.resolve::<K>(name)?;
		let mut parent = leaf.parent().map(str::to_string);
		let mut chain = vec![leaf];

		while let Some(parent_name) = parent {
			if chain.len() >= MAX_TYPE_DEPTH {
				return Err(TypeResolutionError::ChainTooDeep {
					kind: K::LABEL,
					name: name.to_string(),
					limit: MAX_TYPE_DEPTH,
				});
			}
			let node = self.resolve::<K>(&parent_name)?;
			parent = node.parent().map(str::to_string);
			chain.push(node);
		}
		chain.reverse();

		let extensions = self
			.read::<K, _>(|registry| registry.extensions_of(name))
			.unwrap_or_default();

		tracing::trace!(
			kind = K::LABEL,
			name,
			depth = chain.len(),
			extensions = extensions.len(),
			"resolved type chain"
		);
		Ok(ResolvedType::new(name, chain, extensions))
	}
}

impl fmt::Debug for TypeResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeResolver")
			.field("kinds", &self.registries.read().len())
			.finish()
	}
}
