use crate::scene::{Host, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingOriginMode {
	#[default]
	Unbounded,
	Device,
	Floor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackingOriginSettings {
	/// Child raised to eye height when tracking isn't floor relative.
	pub offset_object: Option<NodeId>,
	pub mode: TrackingOriginMode,
	pub y_offset: f32,
}
impl Default for TrackingOriginSettings {
	fn default() -> Self {
		Self {
			offset_object: None,
			mode: TrackingOriginMode::Unbounded,
			y_offset: 1.36144,
		}
	}
}

/// Root of the tracked rig and the default locomotion agent.
#[derive(Debug)]
pub struct TrackingOrigin {
	pub node: NodeId,
	settings: TrackingOriginSettings,
}
impl TrackingOrigin {
	pub fn new(host: &mut dyn Host, node: NodeId, settings: TrackingOriginSettings) -> Self {
		let origin = TrackingOrigin { node, settings };
		origin.apply_offset(host);
		origin
	}

	pub fn settings(&self) -> &TrackingOriginSettings {
		&self.settings
	}
	pub fn set_mode(&mut self, host: &mut dyn Host, mode: TrackingOriginMode) {
		self.settings.mode = mode;
		self.apply_offset(host);
	}
	pub fn set_y_offset(&mut self, host: &mut dyn Host, y_offset: f32) {
		self.settings.y_offset = y_offset;
		self.apply_offset(host);
	}

	fn apply_offset(&self, host: &mut dyn Host) {
		let Some(offset_object) = self.settings.offset_object else {
			return;
		};
		let Some(mut position) = host.local_position(offset_object) else {
			return;
		};
		position.y = match self.settings.mode {
			TrackingOriginMode::Floor => 0.0,
			_ => self.settings.y_offset,
		};
		debug!(?offset_object, mode = ?self.settings.mode, y = position.y, "tracking origin offset");
		host.set_local_position(offset_object, position);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{scene::SceneGraph, sim::SimScene};
	use glam::Vec3;

	#[test]
	fn floor_mode_drops_offset() {
		let mut scene = SimScene::new();
		let origin = scene.spawn_at(Vec3::ZERO);
		let offset = scene.spawn_child(origin);
		scene.set_local_position(offset, Vec3::new(0.2, 0.0, 0.1));

		let mut tracking = TrackingOrigin::new(&mut scene, origin, TrackingOriginSettings {
			offset_object: Some(offset),
			..Default::default()
		});
		assert_eq!(scene.local_position(offset), Some(Vec3::new(0.2, 1.36144, 0.1)));

		tracking.set_mode(&mut scene, TrackingOriginMode::Floor);
		assert_eq!(scene.local_position(offset), Some(Vec3::new(0.2, 0.0, 0.1)));
	}
}
