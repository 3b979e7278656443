use crate::scene::NodeId;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
	#[default]
	Other,
	Left,
	Right,
}

/// Record describing one interaction, shared by every listener of a dispatch.
///
/// Interactors and controllers own one of these and mutate it in place; what
/// a listener receives is only meaningful for the duration of that call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventHandle {
	pub device_type: DeviceType,
	pub hit_point: Option<Vec3>,
	/// Visible controller model, hidden while grabbing when requested.
	pub model: Option<NodeId>,
	/// Raw axis/button value that caused the event.
	pub event_handle: f32,
	/// The interactor that emitted the event.
	pub trigger_node: Option<NodeId>,
	pub attach_node: Option<NodeId>,
	pub force_grab: bool,
}

/// Events fired on the interactable's node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionEvent {
	HoverEntered,
	HoverStay,
	HoverExited,
	HoverCanceled,

	SelectEntered,
	SelectStay,
	SelectExited,
	SelectCanceled,

	Activated,
	ActivateStay,
	Deactivated,
	ActivateCanceled,

	UiPressEntered,
	UiPressStay,
	UiPressExited,
	UiPressCanceled,
}

/// State machine output consumed by grab-capable interactables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrabTrigger {
	SelectStart,
	SelectEnd,
	ActivateStart,
	ActivateEnd,
}

/// Sent from an interactable back to the interactor holding it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrabState {
	Start,
	Stay,
	#[default]
	End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
	Interaction(InteractionEvent),
	GrabTrigger(GrabTrigger),
	Grab(GrabState),
}
impl From<InteractionEvent> for Signal {
	fn from(value: InteractionEvent) -> Self {
		Signal::Interaction(value)
	}
}
impl From<GrabTrigger> for Signal {
	fn from(value: GrabTrigger) -> Self {
		Signal::GrabTrigger(value)
	}
}
impl From<GrabState> for Signal {
	fn from(value: GrabState) -> Self {
		Signal::Grab(value)
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatch {
	pub source: NodeId,
	pub target: NodeId,
	pub signal: Signal,
	pub event: EventHandle,
}

/// FIFO of pending node events. Handlers emit into the same queue, so a
/// reaction always lands after the event that caused it.
#[derive(Debug, Default)]
pub struct EventQueue(VecDeque<Dispatch>);
impl EventQueue {
	pub fn emit(
		&mut self,
		source: NodeId,
		target: NodeId,
		signal: impl Into<Signal>,
		event: &EventHandle,
	) {
		self.0.push_back(Dispatch {
			source,
			target,
			signal: signal.into(),
			event: *event,
		});
	}
	pub fn pop(&mut self) -> Option<Dispatch> {
		self.0.pop_front()
	}
	pub fn len(&self) -> usize {
		self.0.len()
	}
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
