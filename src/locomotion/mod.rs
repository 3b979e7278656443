mod continuous_mover;
pub use continuous_mover::*;
mod continuous_turner;
pub use continuous_turner::*;
mod sharp_turner;
pub use sharp_turner::*;

use crate::{
	input::InputEvent,
	lifecycle::{FrameInfo, InteractionContext, Lifecycle},
	scene::{Host, NodeId},
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Names the node locomotion moves around, usually the tracking origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocomotionChecker {
	pub agent: NodeId,
}
impl LocomotionChecker {
	pub fn new(agent: NodeId) -> Self {
		LocomotionChecker { agent }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teleporter {
	pub checker: LocomotionChecker,
}
impl Teleporter {
	pub fn new(checker: LocomotionChecker) -> Self {
		Teleporter { checker }
	}
	pub fn agent(&self) -> NodeId {
		self.checker.agent
	}
	pub fn teleport(&self, host: &mut dyn Host, position: Vec3) {
		debug!(agent = ?self.checker.agent, ?position, "teleport");
		host.set_world_position(self.checker.agent, position);
	}
}

/// Stick driven locomotion bound to one hand.
#[derive(Debug)]
pub enum LocomotionDriver {
	Mover(ContinuousMover),
	Turner(ContinuousTurner),
	SharpTurner(SharpTurner),
}
impl LocomotionDriver {
	pub fn handle_input(&mut self, ctx: &mut InteractionContext, input: &InputEvent) {
		match self {
			LocomotionDriver::Mover(mover) => mover.handle_input(input),
			LocomotionDriver::Turner(turner) => turner.handle_input(input),
			LocomotionDriver::SharpTurner(turner) => turner.handle_input(ctx, input),
		}
	}
	pub fn checker(&self) -> LocomotionChecker {
		match self {
			LocomotionDriver::Mover(mover) => mover.checker,
			LocomotionDriver::Turner(turner) => turner.checker,
			LocomotionDriver::SharpTurner(turner) => turner.checker,
		}
	}
}
impl Lifecycle for LocomotionDriver {
	fn update(&mut self, ctx: &mut InteractionContext, info: &FrameInfo) {
		match self {
			LocomotionDriver::Mover(mover) => mover.update(ctx, info),
			LocomotionDriver::Turner(turner) => turner.update(ctx, info),
			LocomotionDriver::SharpTurner(turner) => turner.update(info),
		}
	}
	fn on_disable(&mut self, _ctx: &mut InteractionContext) {
		match self {
			LocomotionDriver::Mover(mover) => mover.stop(),
			LocomotionDriver::Turner(turner) => turner.stop(),
			LocomotionDriver::SharpTurner(turner) => turner.stop(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{scene::SceneGraph, sim::SimScene};

	#[test]
	fn teleporter_moves_agent() {
		let mut scene = SimScene::new();
		let agent = scene.spawn_at(Vec3::ZERO);
		let teleporter = Teleporter::new(LocomotionChecker::new(agent));
		teleporter.teleport(&mut scene, Vec3::new(3.0, 0.0, -4.0));
		assert_eq!(scene.world_position(agent), Some(Vec3::new(3.0, 0.0, -4.0)));
	}
}
