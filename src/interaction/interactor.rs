use super::{ContactEvent, DirectInteractor, RayInteractor};
use crate::{
	event::{EventHandle, GrabState, GrabTrigger, InteractionEvent},
	lifecycle::{FrameInfo, InteractionContext, Lifecycle},
	listeners::InteractorEvents,
	scene::NodeId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// How press edges on a channel map to engage/disengage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectActionTrigger {
	/// Engaged while held.
	#[default]
	State,
	/// Same edges as `State`.
	StateChange,
	/// Press engages, the press after a release disengages.
	Toggle,
	/// Alternates on press edges only.
	Sticky,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractorSettings {
	/// Node grabbed objects attach to. Defaults to the interactor itself.
	pub attach_transform: Option<NodeId>,
	pub select_action_trigger: SelectActionTrigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
	Select,
	Activate,
}
impl Channel {
	pub fn entered(self) -> InteractionEvent {
		match self {
			Channel::Select => InteractionEvent::SelectEntered,
			Channel::Activate => InteractionEvent::Activated,
		}
	}
	pub fn stay(self) -> InteractionEvent {
		match self {
			Channel::Select => InteractionEvent::SelectStay,
			Channel::Activate => InteractionEvent::ActivateStay,
		}
	}
	pub fn exited(self) -> InteractionEvent {
		match self {
			Channel::Select => InteractionEvent::SelectExited,
			Channel::Activate => InteractionEvent::Deactivated,
		}
	}
	pub fn canceled(self) -> InteractionEvent {
		match self {
			Channel::Select => InteractionEvent::SelectCanceled,
			Channel::Activate => InteractionEvent::ActivateCanceled,
		}
	}
	pub fn grab_start(self) -> GrabTrigger {
		match self {
			Channel::Select => GrabTrigger::SelectStart,
			Channel::Activate => GrabTrigger::ActivateStart,
		}
	}
	pub fn grab_end(self) -> GrabTrigger {
		match self {
			Channel::Select => GrabTrigger::SelectEnd,
			Channel::Activate => GrabTrigger::ActivateEnd,
		}
	}
}

/// Engaged target plus toggle/sticky memory for one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelLatch {
	pub target: Option<NodeId>,
	pub latched: bool,
}

#[derive(Debug)]
pub enum InteractorKind {
	Ray(RayInteractor),
	Direct(DirectInteractor),
}
impl InteractorKind {
	fn judge_hit(
		&self,
		node: NodeId,
		ctx: &InteractionContext,
		event: &mut EventHandle,
	) -> Option<NodeId> {
		match self {
			InteractorKind::Ray(ray) => ray.judge_hit(node, ctx, event),
			InteractorKind::Direct(direct) => direct.judge_hit(ctx, event),
		}
	}
	fn judge_ui_hit(
		&self,
		node: NodeId,
		ctx: &InteractionContext,
		event: &mut EventHandle,
	) -> Option<NodeId> {
		match self {
			InteractorKind::Ray(ray) => ray.judge_ui_hit(node, ctx, event),
			InteractorKind::Direct(direct) => direct.judge_ui_hit(ctx),
		}
	}
}

/// The active side of an interaction: turns channel edges into events on
/// whatever interactable it hits.
#[derive(Debug)]
pub struct Interactor {
	node: NodeId,
	pub settings: InteractorSettings,
	kind: InteractorKind,
	grab_state: GrabState,
	grabbed: Option<NodeId>,
	select: ChannelLatch,
	activate: ChannelLatch,
	ui_target: Option<NodeId>,
	ui_pressed: bool,
	event: EventHandle,
	listeners: Option<InteractorEvents>,
	inert: bool,
}
impl Interactor {
	pub fn new(node: NodeId, settings: InteractorSettings, kind: InteractorKind) -> Self {
		Interactor {
			node,
			settings,
			kind,
			grab_state: GrabState::End,
			grabbed: None,
			select: ChannelLatch::default(),
			activate: ChannelLatch::default(),
			ui_target: None,
			ui_pressed: false,
			event: EventHandle {
				trigger_node: Some(node),
				..Default::default()
			},
			listeners: None,
			inert: false,
		}
	}
	pub fn ray(node: NodeId, settings: InteractorSettings, ray: RayInteractor) -> Self {
		Self::new(node, settings, InteractorKind::Ray(ray))
	}
	pub fn direct(node: NodeId, settings: InteractorSettings) -> Self {
		Self::new(
			node,
			settings,
			InteractorKind::Direct(DirectInteractor::default()),
		)
	}
	pub fn with_listeners(mut self, listeners: InteractorEvents) -> Self {
		self.listeners = Some(listeners);
		self
	}

	pub fn node(&self) -> NodeId {
		self.node
	}
	pub fn kind(&self) -> &InteractorKind {
		&self.kind
	}
	pub fn kind_mut(&mut self) -> &mut InteractorKind {
		&mut self.kind
	}
	pub fn grab_state(&self) -> GrabState {
		self.grab_state
	}
	/// The interactable currently reporting us as its holder.
	pub fn grabbed(&self) -> Option<NodeId> {
		self.grabbed
	}
	pub fn latch(&self, channel: Channel) -> ChannelLatch {
		match channel {
			Channel::Select => self.select,
			Channel::Activate => self.activate,
		}
	}
	pub fn ui_target(&self) -> Option<NodeId> {
		self.ui_pressed.then_some(self.ui_target).flatten()
	}
	pub fn event(&self) -> &EventHandle {
		&self.event
	}
	pub fn is_inert(&self) -> bool {
		self.inert
	}
	pub(crate) fn set_inert(&mut self, inert: bool) {
		self.inert = inert;
	}

	pub fn select_start(&mut self, ctx: &mut InteractionContext, input: &EventHandle) {
		self.start(Channel::Select, ctx, input)
	}
	pub fn select_stay(&mut self, ctx: &mut InteractionContext, input: &EventHandle) {
		self.stay(Channel::Select, ctx, input)
	}
	pub fn select_end(&mut self, ctx: &mut InteractionContext, input: &EventHandle) {
		self.end(Channel::Select, ctx, input)
	}
	pub fn activate_start(&mut self, ctx: &mut InteractionContext, input: &EventHandle) {
		self.start(Channel::Activate, ctx, input)
	}
	pub fn activate_stay(&mut self, ctx: &mut InteractionContext, input: &EventHandle) {
		self.stay(Channel::Activate, ctx, input)
	}
	pub fn activate_end(&mut self, ctx: &mut InteractionContext, input: &EventHandle) {
		self.end(Channel::Activate, ctx, input)
	}

	pub fn start(&mut self, channel: Channel, ctx: &mut InteractionContext, input: &EventHandle) {
		if self.inert {
			return;
		}
		self.absorb(input);
		let latch = self.latch(channel);
		match self.settings.select_action_trigger {
			SelectActionTrigger::State | SelectActionTrigger::StateChange => {
				if latch.target.is_none() && self.grab_state == GrabState::End {
					self.engage(channel, ctx);
				}
			}
			trigger @ (SelectActionTrigger::Toggle | SelectActionTrigger::Sticky) => {
				if latch.target.is_some() {
					if latch.latched {
						self.disengage(channel, ctx, false);
					}
				} else if self.grab_state == GrabState::End
					&& self.engage(channel, ctx)
					&& trigger == SelectActionTrigger::Sticky
				{
					self.latch_mut(channel).latched = true;
				}
			}
		}
	}

	pub fn stay(&mut self, channel: Channel, ctx: &mut InteractionContext, input: &EventHandle) {
		if self.inert {
			return;
		}
		self.absorb(input);
		let target = match self.latch(channel).target {
			Some(target) => {
				if self.kind.judge_hit(self.node, ctx, &mut self.event).is_none() {
					self.event.hit_point = None;
				}
				Some(target)
			}
			None if self.settings.select_action_trigger == SelectActionTrigger::State
				&& self.grab_state == GrabState::End =>
			{
				self.engage(channel, ctx).then(|| self.latch(channel).target).flatten()
			}
			None => None,
		};
		let Some(target) = target else {
			return;
		};
		ctx.queue.emit(self.node, target, channel.stay(), &self.event);
		if channel == Channel::Select {
			self.notify(InteractionEvent::SelectStay);
		}
	}

	pub fn end(&mut self, channel: Channel, ctx: &mut InteractionContext, input: &EventHandle) {
		if self.inert {
			return;
		}
		self.absorb(input);
		match self.settings.select_action_trigger {
			SelectActionTrigger::State | SelectActionTrigger::StateChange => {
				self.disengage(channel, ctx, false);
			}
			SelectActionTrigger::Toggle => {
				let latch = self.latch_mut(channel);
				if latch.target.is_some() {
					latch.latched = true;
				}
			}
			SelectActionTrigger::Sticky => (),
		}
	}

	pub fn ui_press_enter(&mut self, ctx: &mut InteractionContext, input: &EventHandle) {
		if self.inert || self.ui_pressed {
			return;
		}
		self.absorb(input);
		let Some(target) = self.kind.judge_ui_hit(self.node, ctx, &mut self.event) else {
			return;
		};
		self.ui_target = Some(target);
		self.ui_pressed = true;
		ctx.queue
			.emit(self.node, target, InteractionEvent::UiPressEntered, &self.event);
	}
	pub fn ui_press_stay(&mut self, ctx: &mut InteractionContext, input: &EventHandle) {
		if !self.ui_pressed {
			return;
		}
		self.absorb(input);
		if let Some(target) = self.ui_target {
			ctx.queue
				.emit(self.node, target, InteractionEvent::UiPressStay, &self.event);
		}
	}
	pub fn ui_press_exit(&mut self, ctx: &mut InteractionContext, input: &EventHandle) {
		if !self.ui_pressed {
			return;
		}
		self.absorb(input);
		self.ui_pressed = false;
		if let Some(target) = self.ui_target.take() {
			ctx.queue
				.emit(self.node, target, InteractionEvent::UiPressExited, &self.event);
		}
	}

	/// Physics contact callback. Only direct interactors track contacts.
	pub fn contact(&mut self, contact: ContactEvent) {
		if self.inert {
			return;
		}
		if let InteractorKind::Direct(direct) = &mut self.kind {
			direct.contact(contact, &self.event, &mut self.listeners);
		}
	}

	/// Grab state reported back by the interactable at `source`.
	pub fn on_grab_state(&mut self, ctx: &mut InteractionContext, source: NodeId, state: GrabState) {
		trace!(node = ?self.node, ?source, ?state, "grab state");
		match state {
			GrabState::Start => {
				self.grab_state = GrabState::Start;
				self.grabbed = Some(source);
			}
			GrabState::Stay => {
				if self.grabbed == Some(source) {
					self.grab_state = GrabState::Stay;
				}
			}
			GrabState::End => {
				self.grab_state = GrabState::End;
				self.grabbed = None;
				for channel in [Channel::Select, Channel::Activate] {
					let latch = self.latch_mut(channel);
					if latch.target == Some(source) {
						latch.latched = false;
						latch.target = None;
						debug!(node = ?self.node, ?source, ?channel, "lost hold, canceling channel");
						ctx.queue
							.emit(self.node, source, channel.canceled(), &self.event);
					}
				}
			}
		}
	}

	fn absorb(&mut self, input: &EventHandle) {
		self.event.device_type = input.device_type;
		self.event.model = input.model;
		self.event.event_handle = input.event_handle;
	}

	fn latch_mut(&mut self, channel: Channel) -> &mut ChannelLatch {
		match channel {
			Channel::Select => &mut self.select,
			Channel::Activate => &mut self.activate,
		}
	}

	/// Hit test and, on a hit, claim the target. A miss leaves the channel
	/// exactly as it was.
	fn engage(&mut self, channel: Channel, ctx: &mut InteractionContext) -> bool {
		let Some(target) = self.kind.judge_hit(self.node, ctx, &mut self.event) else {
			trace!(node = ?self.node, ?channel, "press without a target");
			return false;
		};
		debug!(node = ?self.node, ?target, ?channel, "engaged");
		self.latch_mut(channel).target = Some(target);
		ctx.queue
			.emit(self.node, target, channel.grab_start(), &self.event);
		ctx.queue.emit(self.node, target, channel.entered(), &self.event);
		if channel == Channel::Select {
			self.notify(InteractionEvent::SelectEntered);
		}
		true
	}

	fn disengage(&mut self, channel: Channel, ctx: &mut InteractionContext, canceled: bool) {
		let latch = self.latch_mut(channel);
		latch.latched = false;
		let Some(target) = latch.target.take() else {
			return;
		};
		debug!(node = ?self.node, ?target, ?channel, canceled, "disengaged");
		let event = if canceled {
			channel.canceled()
		} else {
			channel.exited()
		};
		ctx.queue.emit(self.node, target, event, &self.event);
		ctx.queue.emit(self.node, target, channel.grab_end(), &self.event);
		if channel == Channel::Select {
			self.notify(InteractionEvent::SelectExited);
		}
	}

	fn notify(&mut self, event: InteractionEvent) {
		notify(&mut self.listeners, event, &self.event);
	}
}

pub(crate) fn notify(
	listeners: &mut Option<InteractorEvents>,
	event: InteractionEvent,
	handle: &EventHandle,
) {
	if let Some(listeners) = listeners {
		listeners.emit(event, handle);
	}
}

impl Lifecycle for Interactor {
	fn on_enable(&mut self, ctx: &mut InteractionContext) {
		if self.inert {
			return;
		}
		let attach_transform = self.settings.attach_transform;
		match &mut self.kind {
			InteractorKind::Ray(ray) => ray.on_enable(self.node, attach_transform, ctx, &mut self.event),
			InteractorKind::Direct(direct) => {
				direct.on_enable(self.node, attach_transform, &mut self.event)
			}
		}
	}
	fn update(&mut self, ctx: &mut InteractionContext, _info: &FrameInfo) {
		if self.inert {
			return;
		}
		if let InteractorKind::Ray(ray) = &mut self.kind {
			ray.update_hover(self.node, ctx, &mut self.event, &mut self.listeners);
		}
	}
	fn on_disable(&mut self, ctx: &mut InteractionContext) {
		for channel in [Channel::Select, Channel::Activate] {
			self.disengage(channel, ctx, true);
		}
		if self.ui_pressed {
			self.ui_pressed = false;
			if let Some(target) = self.ui_target.take() {
				ctx.queue
					.emit(self.node, target, InteractionEvent::UiPressCanceled, &self.event);
			}
		}
		match &mut self.kind {
			InteractorKind::Ray(ray) => {
				ray.cancel_hover(self.node, ctx, &self.event, &mut self.listeners)
			}
			InteractorKind::Direct(direct) => direct.clear(),
		}
		self.event.hit_point = None;
	}
}
