use super::LocomotionChecker;
use crate::{
	input::{Hand, InputEvent},
	lifecycle::{FrameInfo, InteractionContext},
};
use glam::Quat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnerSettings {
	pub hand: Hand,
	/// Degrees per second.
	pub turn_speed: f32,
}
impl Default for TurnerSettings {
	fn default() -> Self {
		Self {
			hand: Hand::Right,
			turn_speed: 60.0,
		}
	}
}

/// Turns the agent about its own up axis for as long as the stick is held
/// sideways. Only the sign of the deflection matters.
#[derive(Debug)]
pub struct ContinuousTurner {
	pub checker: LocomotionChecker,
	pub settings: TurnerSettings,
	direction: f32,
}
impl ContinuousTurner {
	pub fn new(checker: LocomotionChecker, settings: TurnerSettings) -> Self {
		ContinuousTurner {
			checker,
			settings,
			direction: 0.0,
		}
	}

	pub fn handle_input(&mut self, input: &InputEvent) {
		let x = input.stick(self.settings.hand).x;
		self.direction = if x < 0.0 {
			1.0
		} else if x > 0.0 {
			-1.0
		} else {
			0.0
		};
	}
	pub(super) fn stop(&mut self) {
		self.direction = 0.0;
	}

	pub(super) fn update(&mut self, ctx: &mut InteractionContext, info: &FrameInfo) {
		if self.direction == 0.0 {
			return;
		}
		let Some(rotation) = ctx.host.local_rotation(self.checker.agent) else {
			return;
		};
		let angle = (self.direction * self.settings.turn_speed * info.delta).to_radians();
		ctx.host
			.set_local_rotation(self.checker.agent, rotation * Quat::from_rotation_y(angle));
	}
}
