use crate::scene::{NodeId, SceneGraph};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InteractionError {
	#[error("{0} has no collider, interaction is disabled for it")]
	MissingCollider(NodeId),
	#[error("{0} has no interaction components")]
	UnknownNode(NodeId),
}

pub fn require_collider(scene: &dyn SceneGraph, node: NodeId) -> Result<(), InteractionError> {
	if scene.has_collider(node) {
		Ok(())
	} else {
		Err(InteractionError::MissingCollider(node))
	}
}
