mod press;
pub use press::*;

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
	#[default]
	Left,
	Right,
}

/// Snapshot of a tracked handle pair. Axes are in `[0, 1]`, sticks in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandleInput {
	/// A
	pub button_south: f32,
	/// B
	pub button_east: f32,
	/// X
	pub button_west: f32,
	/// Y
	pub button_north: f32,
	pub trigger_left: f32,
	pub trigger_right: f32,
	pub grip_left: f32,
	pub grip_right: f32,
	pub left_stick: Vec2,
	pub right_stick: Vec2,
	pub left_stick_button: f32,
	pub right_stick_button: f32,
	pub trigger_button_left: f32,
	pub trigger_button_right: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadInput {
	pub button_south: f32,
	pub button_east: f32,
	pub button_west: f32,
	pub button_north: f32,
	pub button_l2: f32,
	pub button_r2: f32,
	pub left_stick: Vec2,
	pub right_stick: Vec2,
	pub left_stick_button: f32,
	pub right_stick_button: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
	Handle(HandleInput),
	Gamepad(GamepadInput),
}

/// Control a channel is bound to, resolved per hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlBinding {
	/// X on the left hand, A on the right.
	PrimaryButton,
	/// Y on the left hand, B on the right.
	SecondaryButton,
	Trigger,
	Grip,
	Thumbstick,
	TriggerButton,
}

impl InputEvent {
	pub fn control(&self, hand: Hand, binding: ControlBinding) -> f32 {
		match (self, binding) {
			(InputEvent::Handle(h), ControlBinding::PrimaryButton) => match hand {
				Hand::Left => h.button_west,
				Hand::Right => h.button_south,
			},
			(InputEvent::Handle(h), ControlBinding::SecondaryButton) => match hand {
				Hand::Left => h.button_north,
				Hand::Right => h.button_east,
			},
			(InputEvent::Handle(h), ControlBinding::Trigger) => match hand {
				Hand::Left => h.trigger_left,
				Hand::Right => h.trigger_right,
			},
			(InputEvent::Handle(h), ControlBinding::Grip) => match hand {
				Hand::Left => h.grip_left,
				Hand::Right => h.grip_right,
			},
			(InputEvent::Handle(h), ControlBinding::TriggerButton) => match hand {
				Hand::Left => h.trigger_button_left,
				Hand::Right => h.trigger_button_right,
			},
			(InputEvent::Gamepad(g), ControlBinding::PrimaryButton) => match hand {
				Hand::Left => g.button_west,
				Hand::Right => g.button_south,
			},
			(InputEvent::Gamepad(g), ControlBinding::SecondaryButton) => match hand {
				Hand::Left => g.button_north,
				Hand::Right => g.button_east,
			},
			(InputEvent::Gamepad(g), ControlBinding::Trigger) => match hand {
				Hand::Left => g.button_l2,
				Hand::Right => g.button_r2,
			},
			// gamepads have neither
			(InputEvent::Gamepad(_), ControlBinding::Grip | ControlBinding::TriggerButton) => 0.0,
			(_, ControlBinding::Thumbstick) => self.stick_click(hand),
		}
	}

	pub fn stick(&self, hand: Hand) -> Vec2 {
		match (self, hand) {
			(InputEvent::Handle(h), Hand::Left) => h.left_stick,
			(InputEvent::Handle(h), Hand::Right) => h.right_stick,
			(InputEvent::Gamepad(g), Hand::Left) => g.left_stick,
			(InputEvent::Gamepad(g), Hand::Right) => g.right_stick,
		}
	}

	pub fn stick_click(&self, hand: Hand) -> f32 {
		match (self, hand) {
			(InputEvent::Handle(h), Hand::Left) => h.left_stick_button,
			(InputEvent::Handle(h), Hand::Right) => h.right_stick_button,
			(InputEvent::Gamepad(g), Hand::Left) => g.left_stick_button,
			(InputEvent::Gamepad(g), Hand::Right) => g.right_stick_button,
		}
	}
}
