use super::LocomotionChecker;
use crate::{
	input::{Hand, InputEvent},
	lifecycle::{FrameInfo, InteractionContext},
	scene::NodeId,
};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoverSettings {
	pub hand: Hand,
	/// Meters per second at full stick deflection.
	pub move_speed: f32,
	/// Node whose facing defines forward. Defaults to the mover's own node.
	pub forward_source: Option<NodeId>,
}
impl Default for MoverSettings {
	fn default() -> Self {
		Self {
			hand: Hand::Left,
			move_speed: 1.0,
			forward_source: None,
		}
	}
}

#[derive(Debug)]
pub struct ContinuousMover {
	pub node: NodeId,
	pub checker: LocomotionChecker,
	pub settings: MoverSettings,
	stick: Vec2,
}
impl ContinuousMover {
	pub fn new(node: NodeId, checker: LocomotionChecker, settings: MoverSettings) -> Self {
		ContinuousMover {
			node,
			checker,
			settings,
			stick: Vec2::ZERO,
		}
	}

	pub fn handle_input(&mut self, input: &InputEvent) {
		self.stick = input.stick(self.settings.hand);
	}
	pub(super) fn stop(&mut self) {
		self.stick = Vec2::ZERO;
	}

	pub(super) fn update(&mut self, ctx: &mut InteractionContext, info: &FrameInfo) {
		if self.stick == Vec2::ZERO {
			return;
		}
		let source = self.settings.forward_source.unwrap_or(self.node);
		let rotation = ctx.host.world_rotation(source).unwrap_or_default();
		let direction = rotation * Vec3::new(self.stick.x, 0.0, -self.stick.y);
		let Some(position) = ctx.host.local_position(self.checker.agent) else {
			return;
		};
		ctx.host.set_local_position(
			self.checker.agent,
			position + direction * self.settings.move_speed * info.delta,
		);
	}
}
