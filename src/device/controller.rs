use crate::{
	event::{DeviceType, EventHandle},
	input::{ControlBinding, Hand, InputEvent, Phase, PressTracker},
	lifecycle::{InteractionContext, Lifecycle},
	scene::NodeId,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerChannel {
	Select,
	Activate,
	UiPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerSettings {
	pub hand: Hand,
	pub select_action: ControlBinding,
	pub activate_action: ControlBinding,
	pub ui_press_action: ControlBinding,
	/// Analog values strictly above this count as pressed.
	pub axis_to_press_threshold: f32,
	/// Visible controller model, handed to interactables so they can hide it.
	pub model: Option<NodeId>,
}
impl Default for ControllerSettings {
	fn default() -> Self {
		Self {
			hand: Hand::Left,
			select_action: ControlBinding::Grip,
			activate_action: ControlBinding::Trigger,
			ui_press_action: ControlBinding::Trigger,
			axis_to_press_threshold: 0.1,
			model: None,
		}
	}
}

/// One transition to forward to the interactor on the controller's node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerCommand {
	pub channel: ControllerChannel,
	pub phase: Phase,
	pub event: EventHandle,
}

/// Maps raw handle/gamepad values onto select, activate and UI press edges.
#[derive(Debug)]
pub struct XrController {
	pub settings: ControllerSettings,
	select: PressTracker,
	activate: PressTracker,
	ui_press: PressTracker,
	event: EventHandle,
}
impl XrController {
	pub fn new(settings: ControllerSettings) -> Self {
		let event = EventHandle {
			device_type: match settings.hand {
				Hand::Left => DeviceType::Left,
				Hand::Right => DeviceType::Right,
			},
			model: settings.model,
			..Default::default()
		};
		XrController {
			settings,
			select: PressTracker::default(),
			activate: PressTracker::default(),
			ui_press: PressTracker::default(),
			event,
		}
	}

	pub fn event(&self) -> &EventHandle {
		&self.event
	}

	pub fn process(&mut self, input: &InputEvent) -> Vec<ControllerCommand> {
		let hand = self.settings.hand;
		let threshold = self.settings.axis_to_press_threshold;
		let mut commands = Vec::new();
		for (channel, binding) in [
			(ControllerChannel::Select, self.settings.select_action),
			(ControllerChannel::Activate, self.settings.activate_action),
			(ControllerChannel::UiPress, self.settings.ui_press_action),
		] {
			let value = input.control(hand, binding);
			let tracker = match channel {
				ControllerChannel::Select => &mut self.select,
				ControllerChannel::Activate => &mut self.activate,
				ControllerChannel::UiPress => &mut self.ui_press,
			};
			tracker.update(value, threshold);
			let Some(phase) = tracker.phase() else {
				continue;
			};
			self.event.event_handle = value;
			if phase != Phase::Stay {
				trace!(?hand, ?channel, ?phase, value, "controller edge");
			}
			commands.push(ControllerCommand {
				channel,
				phase,
				event: self.event,
			});
		}
		commands
	}

	/// Forget held buttons, e.g. when the controller is disabled.
	pub fn reset(&mut self) {
		self.select.reset();
		self.activate.reset();
		self.ui_press.reset();
	}
}
impl Lifecycle for XrController {
	fn on_disable(&mut self, _ctx: &mut InteractionContext) {
		self.reset();
	}
}
