//! Interfaces to the host engine: scene graph, physics queries and rigid bodies.
//!
//! Nothing in this crate owns a node. Components refer to nodes by [`NodeId`]
//! and go through these traits for every read or write.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);
impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "node#{}", self.0)
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
	pub origin: Vec3,
	pub direction: Vec3,
}
impl Ray {
	pub fn new(origin: Vec3, direction: Vec3) -> Self {
		Ray {
			origin,
			direction: direction.normalize_or_zero(),
		}
	}

	pub fn at(&self, t: f32) -> Vec3 {
		self.origin + self.direction * t
	}
}

/// Closest hit returned by [`Physics::raycast_closest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
	pub collider: NodeId,
	pub point: Vec3,
	pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
	Dynamic,
	Kinematic,
}

pub trait SceneGraph {
	fn world_position(&self, node: NodeId) -> Option<Vec3>;
	fn world_rotation(&self, node: NodeId) -> Option<Quat>;
	fn world_scale(&self, node: NodeId) -> Option<Vec3>;
	fn set_world_position(&mut self, node: NodeId, position: Vec3);
	fn set_world_rotation(&mut self, node: NodeId, rotation: Quat);

	fn local_position(&self, node: NodeId) -> Option<Vec3>;
	fn local_rotation(&self, node: NodeId) -> Option<Quat>;
	fn local_scale(&self, node: NodeId) -> Option<Vec3>;
	fn set_local_position(&mut self, node: NodeId, position: Vec3);
	fn set_local_rotation(&mut self, node: NodeId, rotation: Quat);
	fn set_local_scale(&mut self, node: NodeId, scale: Vec3);

	fn is_active(&self, node: NodeId) -> bool;
	fn set_active(&mut self, node: NodeId, active: bool);

	/// Whether the node carries a collider component.
	fn has_collider(&self, node: NodeId) -> bool;
	/// Create an empty node parented to `parent`, at the parent's origin.
	fn spawn_child(&mut self, parent: NodeId) -> NodeId;

	fn world_matrix(&self, node: NodeId) -> Option<Mat4> {
		Some(Mat4::from_scale_rotation_translation(
			self.world_scale(node)?,
			self.world_rotation(node)?,
			self.world_position(node)?,
		))
	}
}

pub trait Physics {
	fn raycast_closest(&self, ray: Ray, max_distance: f32) -> Option<RayHit>;
}

pub trait RigidBodies {
	fn has_rigid_body(&self, node: NodeId) -> bool;
	fn linear_velocity(&self, node: NodeId) -> Option<Vec3>;
	fn set_linear_velocity(&mut self, node: NodeId, velocity: Vec3);
	fn angular_velocity(&self, node: NodeId) -> Option<Vec3>;
	fn set_angular_velocity(&mut self, node: NodeId, velocity: Vec3);
	fn body_kind(&self, node: NodeId) -> Option<BodyKind>;
	fn set_body_kind(&mut self, node: NodeId, kind: BodyKind);
	fn uses_gravity(&self, node: NodeId) -> Option<bool>;
	fn set_use_gravity(&mut self, node: NodeId, gravity: bool);
}

/// Everything the interaction components need from the engine.
pub trait Host: SceneGraph + Physics + RigidBodies {}
impl<T: SceneGraph + Physics + RigidBodies> Host for T {}

/// Convert a point in `node`'s local space to world space.
pub fn to_world_space(host: &dyn Host, node: NodeId, point: Vec3) -> Option<Vec3> {
	Some(host.world_matrix(node)?.transform_point3(point))
}

/// Convert a world space point into `node`'s local space.
pub fn to_node_space(host: &dyn Host, node: NodeId, point: Vec3) -> Option<Vec3> {
	Some(host.world_matrix(node)?.inverse().transform_point3(point))
}
