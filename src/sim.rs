//! A small in-memory host used by the demo and the tests.

use crate::scene::{BodyKind, NodeId, Physics, Ray, RayHit, RigidBodies, SceneGraph};
use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimBody {
	pub kind: BodyKind,
	pub gravity: bool,
	pub linear_velocity: Vec3,
	pub angular_velocity: Vec3,
}
impl Default for SimBody {
	fn default() -> Self {
		SimBody {
			kind: BodyKind::Dynamic,
			gravity: true,
			linear_velocity: Vec3::ZERO,
			angular_velocity: Vec3::ZERO,
		}
	}
}

#[derive(Debug, Clone)]
struct SimNode {
	parent: Option<NodeId>,
	position: Vec3,
	rotation: Quat,
	scale: Vec3,
	active: bool,
	sphere_radius: Option<f32>,
	body: Option<SimBody>,
}
impl SimNode {
	fn new(parent: Option<NodeId>) -> Self {
		SimNode {
			parent,
			position: Vec3::ZERO,
			rotation: Quat::IDENTITY,
			scale: Vec3::ONE,
			active: true,
			sphere_radius: None,
			body: None,
		}
	}
}

/// Parented nodes with sphere colliders and rigid bodies. Physics is queried,
/// never stepped: bodies keep whatever velocity was last written.
#[derive(Debug, Default)]
pub struct SimScene {
	nodes: FxHashMap<NodeId, SimNode>,
	next_id: u64,
}
impl SimScene {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn spawn(&mut self, parent: Option<NodeId>) -> NodeId {
		self.next_id += 1;
		let id = NodeId(self.next_id);
		self.nodes.insert(id, SimNode::new(parent));
		id
	}
	pub fn spawn_at(&mut self, position: Vec3) -> NodeId {
		let id = self.spawn(None);
		self.set_local_position(id, position);
		id
	}
	/// Attach a sphere collider, making the node hittable by ray casts.
	pub fn add_sphere_collider(&mut self, node: NodeId, radius: f32) {
		if let Some(n) = self.nodes.get_mut(&node) {
			n.sphere_radius = Some(radius);
		}
	}
	pub fn add_rigid_body(&mut self, node: NodeId, body: SimBody) {
		if let Some(n) = self.nodes.get_mut(&node) {
			n.body = Some(body);
		}
	}
	pub fn body(&self, node: NodeId) -> Option<&SimBody> {
		self.nodes.get(&node)?.body.as_ref()
	}
	fn world_pose(&self, node: NodeId) -> Option<(Vec3, Quat, Vec3)> {
		let n = self.nodes.get(&node)?;
		match n.parent.and_then(|p| self.world_pose(p)) {
			Some((p_pos, p_rot, p_scale)) => Some((
				p_pos + p_rot * (p_scale * n.position),
				p_rot * n.rotation,
				p_scale * n.scale,
			)),
			None => Some((n.position, n.rotation, n.scale)),
		}
	}
	fn active_in_hierarchy(&self, node: NodeId) -> bool {
		let Some(n) = self.nodes.get(&node) else {
			return false;
		};
		n.active && n.parent.map_or(true, |p| self.active_in_hierarchy(p))
	}
}

impl SceneGraph for SimScene {
	fn world_position(&self, node: NodeId) -> Option<Vec3> {
		self.world_pose(node).map(|(p, _, _)| p)
	}
	fn world_rotation(&self, node: NodeId) -> Option<Quat> {
		self.world_pose(node).map(|(_, r, _)| r)
	}
	fn world_scale(&self, node: NodeId) -> Option<Vec3> {
		self.world_pose(node).map(|(_, _, s)| s)
	}
	fn set_world_position(&mut self, node: NodeId, position: Vec3) {
		let Some(parent) = self.nodes.get(&node).map(|n| n.parent) else {
			return;
		};
		let local = match parent.and_then(|p| self.world_pose(p)) {
			Some((p_pos, p_rot, p_scale)) => (p_rot.inverse() * (position - p_pos)) / p_scale,
			None => position,
		};
		self.set_local_position(node, local);
	}
	fn set_world_rotation(&mut self, node: NodeId, rotation: Quat) {
		let Some(parent) = self.nodes.get(&node).map(|n| n.parent) else {
			return;
		};
		let local = match parent.and_then(|p| self.world_rotation(p)) {
			Some(p_rot) => p_rot.inverse() * rotation,
			None => rotation,
		};
		self.set_local_rotation(node, local);
	}

	fn local_position(&self, node: NodeId) -> Option<Vec3> {
		self.nodes.get(&node).map(|n| n.position)
	}
	fn local_rotation(&self, node: NodeId) -> Option<Quat> {
		self.nodes.get(&node).map(|n| n.rotation)
	}
	fn local_scale(&self, node: NodeId) -> Option<Vec3> {
		self.nodes.get(&node).map(|n| n.scale)
	}
	fn set_local_position(&mut self, node: NodeId, position: Vec3) {
		if let Some(n) = self.nodes.get_mut(&node) {
			n.position = position;
		}
	}
	fn set_local_rotation(&mut self, node: NodeId, rotation: Quat) {
		if let Some(n) = self.nodes.get_mut(&node) {
			n.rotation = rotation.normalize();
		}
	}
	fn set_local_scale(&mut self, node: NodeId, scale: Vec3) {
		if let Some(n) = self.nodes.get_mut(&node) {
			n.scale = scale;
		}
	}

	fn is_active(&self, node: NodeId) -> bool {
		self.active_in_hierarchy(node)
	}
	fn set_active(&mut self, node: NodeId, active: bool) {
		if let Some(n) = self.nodes.get_mut(&node) {
			n.active = active;
		}
	}

	fn has_collider(&self, node: NodeId) -> bool {
		self.nodes
			.get(&node)
			.is_some_and(|n| n.sphere_radius.is_some())
	}
	fn spawn_child(&mut self, parent: NodeId) -> NodeId {
		self.spawn(Some(parent))
	}
}

impl Physics for SimScene {
	fn raycast_closest(&self, ray: Ray, max_distance: f32) -> Option<RayHit> {
		self.nodes
			.iter()
			.filter(|(id, _)| self.active_in_hierarchy(**id))
			.filter_map(|(id, node)| {
				let radius = node.sphere_radius?;
				let (center, _, scale) = self.world_pose(*id)?;
				let radius = radius * scale.max_element();
				// ray/sphere: |o + td - c|^2 = r^2
				let oc = ray.origin - center;
				let b = oc.dot(ray.direction);
				let c = oc.length_squared() - radius * radius;
				let discriminant = b * b - c;
				if discriminant < 0.0 {
					return None;
				}
				let sqrt = discriminant.sqrt();
				let t = if -b - sqrt >= 0.0 { -b - sqrt } else { -b + sqrt };
				(t >= 0.0 && t <= max_distance).then(|| RayHit {
					collider: *id,
					point: ray.at(t),
					distance: t,
				})
			})
			.min_by(|a, b| a.distance.total_cmp(&b.distance))
	}
}

impl RigidBodies for SimScene {
	fn has_rigid_body(&self, node: NodeId) -> bool {
		self.body(node).is_some()
	}
	fn linear_velocity(&self, node: NodeId) -> Option<Vec3> {
		self.body(node).map(|b| b.linear_velocity)
	}
	fn set_linear_velocity(&mut self, node: NodeId, velocity: Vec3) {
		if let Some(b) = self.nodes.get_mut(&node).and_then(|n| n.body.as_mut()) {
			b.linear_velocity = velocity;
		}
	}
	fn angular_velocity(&self, node: NodeId) -> Option<Vec3> {
		self.body(node).map(|b| b.angular_velocity)
	}
	fn set_angular_velocity(&mut self, node: NodeId, velocity: Vec3) {
		if let Some(b) = self.nodes.get_mut(&node).and_then(|n| n.body.as_mut()) {
			b.angular_velocity = velocity;
		}
	}
	fn body_kind(&self, node: NodeId) -> Option<BodyKind> {
		self.body(node).map(|b| b.kind)
	}
	fn set_body_kind(&mut self, node: NodeId, kind: BodyKind) {
		if let Some(b) = self.nodes.get_mut(&node).and_then(|n| n.body.as_mut()) {
			b.kind = kind;
		}
	}
	fn uses_gravity(&self, node: NodeId) -> Option<bool> {
		self.body(node).map(|b| b.gravity)
	}
	fn set_use_gravity(&mut self, node: NodeId, gravity: bool) {
		if let Some(b) = self.nodes.get_mut(&node).and_then(|n| n.body.as_mut()) {
			b.gravity = gravity;
		}
	}
}
