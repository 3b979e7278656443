mod direct;
pub use direct::*;
mod grab;
pub use grab::*;
mod interactable;
pub use interactable::*;
mod interactor;
pub use interactor::*;
mod ray;
pub use ray::*;
mod teleportable;
pub use teleportable::*;
mod throw;
pub use throw::*;

use crate::scene::NodeId;
use rustc_hash::FxHashMap;

/// What a collider is, as far as interactors are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
	Interactable,
	/// A 3D UI surface: hoverable by rays, pressable, never selectable.
	UiChecker,
}

/// Component lookup by collider node.
#[derive(Debug, Default)]
pub struct Targets(FxHashMap<NodeId, TargetKind>);
impl Targets {
	pub fn insert(&mut self, node: NodeId, kind: TargetKind) {
		self.0.insert(node, kind);
	}
	pub fn remove(&mut self, node: NodeId) {
		self.0.remove(&node);
	}
	pub fn kind(&self, node: NodeId) -> Option<TargetKind> {
		self.0.get(&node).copied()
	}
	pub fn is_interactable(&self, node: NodeId) -> bool {
		self.kind(node) == Some(TargetKind::Interactable)
	}
}
