use super::LocomotionChecker;
use crate::{
	input::{Hand, InputEvent, PressTracker},
	lifecycle::{FrameInfo, InteractionContext},
};
use glam::Quat;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharpTurnerSettings {
	pub hand: Hand,
	/// Degrees per snap.
	pub turn_angle: f32,
	/// Clicking the stick spins the agent half a turn.
	pub enable_turn_around: bool,
	/// Seconds before another snap is accepted.
	pub activation_timeout: f32,
}
impl Default for SharpTurnerSettings {
	fn default() -> Self {
		Self {
			hand: Hand::Right,
			turn_angle: 45.0,
			enable_turn_around: true,
			activation_timeout: 0.5,
		}
	}
}

#[derive(Debug)]
pub struct SharpTurner {
	pub checker: LocomotionChecker,
	pub settings: SharpTurnerSettings,
	cooldown: f32,
	click: PressTracker,
}
impl SharpTurner {
	pub fn new(checker: LocomotionChecker, settings: SharpTurnerSettings) -> Self {
		SharpTurner {
			checker,
			settings,
			cooldown: 0.0,
			click: PressTracker::default(),
		}
	}

	pub fn handle_input(&mut self, ctx: &mut InteractionContext, input: &InputEvent) {
		let x = input.stick(self.settings.hand).x;
		if x != 0.0 && self.cooldown <= 0.0 {
			let angle = if x < 0.0 {
				self.settings.turn_angle
			} else {
				-self.settings.turn_angle
			};
			trace!(agent = ?self.checker.agent, angle, "sharp turn");
			self.turn(ctx, angle);
			self.cooldown = self.settings.activation_timeout;
		}

		if self.settings.enable_turn_around {
			self.click.update(input.stick_click(self.settings.hand), 0.0);
			if self.click.started() {
				trace!(agent = ?self.checker.agent, "turn around");
				self.turn(ctx, 180.0);
			}
		}
	}
	pub(super) fn stop(&mut self) {
		self.click.reset();
	}

	pub(super) fn update(&mut self, info: &FrameInfo) {
		self.cooldown = (self.cooldown - info.delta).max(0.0);
	}

	fn turn(&self, ctx: &mut InteractionContext, degrees: f32) {
		let Some(rotation) = ctx.host.local_rotation(self.checker.agent) else {
			return;
		};
		ctx.host.set_local_rotation(
			self.checker.agent,
			Quat::from_rotation_y(degrees.to_radians()) * rotation,
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{event::EventQueue, input::HandleInput, interaction::Targets, sim::SimScene};
	use glam::{Vec2, Vec3};

	#[test]
	fn one_snap_per_timeout_window() {
		let mut scene = SimScene::new();
		let agent = scene.spawn_at(Vec3::ZERO);
		let targets = Targets::default();
		let mut queue = EventQueue::default();
		let mut turner = SharpTurner::new(LocomotionChecker::new(agent), SharpTurnerSettings::default());
		let held = InputEvent::Handle(HandleInput {
			right_stick: Vec2::new(-1.0, 0.0),
			..Default::default()
		});
		let frame = FrameInfo {
			delta: 0.1,
			elapsed: 0.0,
		};
		let mut ctx = InteractionContext {
			host: &mut scene,
			targets: &targets,
			queue: &mut queue,
			now: 0.0,
		};

		for _ in 0..4 {
			turner.handle_input(&mut ctx, &held);
			turner.update(&frame);
		}
		let once = Quat::from_rotation_y(45f32.to_radians());
		assert!(ctx.host.local_rotation(agent).unwrap().abs_diff_eq(once, 1e-5));

		for _ in 0..5 {
			turner.update(&frame);
		}
		turner.handle_input(&mut ctx, &held);
		let twice = Quat::from_rotation_y(90f32.to_radians());
		assert!(ctx.host.local_rotation(agent).unwrap().abs_diff_eq(twice, 1e-5));
	}

	#[test]
	fn stick_click_turns_around_once() {
		let mut scene = SimScene::new();
		let agent = scene.spawn_at(Vec3::ZERO);
		let targets = Targets::default();
		let mut queue = EventQueue::default();
		let mut turner = SharpTurner::new(LocomotionChecker::new(agent), SharpTurnerSettings::default());
		let clicked = InputEvent::Handle(HandleInput {
			right_stick_button: 1.0,
			..Default::default()
		});
		let mut ctx = InteractionContext {
			host: &mut scene,
			targets: &targets,
			queue: &mut queue,
			now: 0.0,
		};
		turner.handle_input(&mut ctx, &clicked);
		turner.handle_input(&mut ctx, &clicked);
		let half = Quat::from_rotation_y(std::f32::consts::PI);
		let rotation = ctx.host.local_rotation(agent).unwrap();
		assert!(rotation.abs_diff_eq(half, 1e-5) || rotation.abs_diff_eq(-half, 1e-5));
	}
}
