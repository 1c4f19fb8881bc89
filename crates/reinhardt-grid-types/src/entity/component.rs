//! Side-bar and status-bar components

use crate::kind::ComponentKind;
use crate::view::ComponentView;
use reinhardt_grid_core::{AmbientContext, GridResult, ResolvedOptions, ResolvedType};
use std::fmt;
use std::sync::Arc;

/// A grid component such as a side bar and its tool panels.
pub struct Component {
	pub(crate) name: String,
	pub(crate) resolved_type: ResolvedType<ComponentKind>,
	pub(crate) options: Arc<ResolvedOptions>,
	pub(crate) context: AmbientContext,
	pub(crate) children: Vec<Component>,
}

impl Component {
	/// Component name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Identifier of the component's type.
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

	/// Child components, in declaration order.
	pub fn children(&self) -> &[Component] {
		&self.children
	}

	/// Builds a fresh view of the component and its children.
	pub fn create_view(&self, parent: Option<Arc<ComponentView>>) -> GridResult<ComponentView> {
		let mut view = ComponentView::new(&self.name, parent);
		self.resolved_type
			.build_view(&mut view, self, &self.options)?;
		view.vars
			.set_default("translation_domain", self.context.translation_domain());

		if !self.children.is_empty() {
			let snapshot = Arc::new(view.clone());
			for child in &self.children {
				view.children.push(child.create_view(Some(snapshot.clone()))?);
			}
		}
		Ok(view)
	}
}

impl fmt::Debug for Component {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Component")
			.field("name", &self.name)
			.field("type", &self.resolved_type.name())
			.field("children", &self.children)
			.finish_non_exhaustive()
	}
}
