use super::{GrabInteractable, GrabSettings, GrabTriggerMode, TeleportSettings, Teleportable};
use crate::{
	event::{EventHandle, GrabTrigger, InteractionEvent, Signal},
	lifecycle::{FrameInfo, InteractionContext, Lifecycle},
	locomotion::Teleporter,
	scene::NodeId,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractableSettings {
	/// Marker shown where a ray hovers the object.
	pub ray_reticle: Option<NodeId>,
}

#[derive(Debug)]
pub enum InteractableKind {
	Generic,
	Grab(GrabInteractable),
	Teleport(Teleportable),
}

/// The passive side of an interaction, living on a collider node.
#[derive(Debug)]
pub struct Interactable {
	node: NodeId,
	pub settings: InteractableSettings,
	/// Interactor currently holding this object. Identity only.
	holder: Option<NodeId>,
	kind: InteractableKind,
	inert: bool,
}
impl Interactable {
	pub fn new(node: NodeId, settings: InteractableSettings, kind: InteractableKind) -> Self {
		Interactable {
			node,
			settings,
			holder: None,
			kind,
			inert: false,
		}
	}
	pub fn generic(node: NodeId, settings: InteractableSettings) -> Self {
		Self::new(node, settings, InteractableKind::Generic)
	}
	pub fn grab(node: NodeId, settings: InteractableSettings, grab: GrabSettings) -> Self {
		Self::new(
			node,
			settings,
			InteractableKind::Grab(GrabInteractable::new(grab)),
		)
	}
	pub fn teleport(
		node: NodeId,
		settings: InteractableSettings,
		teleport: TeleportSettings,
		teleporter: Option<Teleporter>,
	) -> Self {
		Self::new(
			node,
			settings,
			InteractableKind::Teleport(Teleportable::new(teleport, teleporter)),
		)
	}

	pub fn node(&self) -> NodeId {
		self.node
	}
	pub fn holder(&self) -> Option<NodeId> {
		self.holder
	}
	pub fn kind(&self) -> &InteractableKind {
		&self.kind
	}
	pub fn kind_mut(&mut self) -> &mut InteractableKind {
		&mut self.kind
	}
	pub fn is_inert(&self) -> bool {
		self.inert
	}
	pub(crate) fn set_inert(&mut self, inert: bool) {
		self.inert = inert;
	}

	/// React to a signal addressed to this node.
	pub fn handle(&mut self, ctx: &mut InteractionContext, signal: Signal, event: &EventHandle) {
		if self.inert {
			return;
		}
		match signal {
			Signal::Interaction(kind) => self.handle_interaction(ctx, kind, event),
			Signal::GrabTrigger(trigger) => self.handle_grab_trigger(ctx, trigger, event),
			Signal::Grab(_) => (),
		}
	}

	fn handle_interaction(
		&mut self,
		ctx: &mut InteractionContext,
		kind: InteractionEvent,
		event: &EventHandle,
	) {
		match kind {
			InteractionEvent::HoverEntered | InteractionEvent::HoverStay => {
				let position = match &self.kind {
					InteractableKind::Grab(grab) if grab.is_grabbed() => None,
					InteractableKind::Teleport(teleport) => {
						teleport.reticle_position(self.node, ctx, event)
					}
					_ => event.hit_point,
				};
				match position {
					Some(position) => self.show_reticle(ctx, position),
					None => self.hide_reticle(ctx),
				}
			}
			InteractionEvent::HoverExited | InteractionEvent::HoverCanceled => {
				self.hide_reticle(ctx)
			}
			_ => match &mut self.kind {
				InteractableKind::Teleport(teleport) => {
					if teleport.handle(self.node, &mut self.holder, ctx, kind, event) {
						self.hide_reticle(ctx);
					}
				}
				InteractableKind::Generic => match kind {
					InteractionEvent::SelectEntered => self.holder = event.trigger_node,
					InteractionEvent::SelectExited | InteractionEvent::SelectCanceled => {
						if self.holder == event.trigger_node {
							self.holder = None;
						}
					}
					_ => (),
				},
				InteractableKind::Grab(_) => (),
			},
		}
	}

	fn handle_grab_trigger(
		&mut self,
		ctx: &mut InteractionContext,
		trigger: GrabTrigger,
		event: &EventHandle,
	) {
		let InteractableKind::Grab(grab) = &mut self.kind else {
			return;
		};
		let (start, end) = match grab.settings.grab_trigger {
			GrabTriggerMode::OnSelectEntered => (GrabTrigger::SelectStart, GrabTrigger::SelectEnd),
			GrabTriggerMode::OnActivated => (GrabTrigger::ActivateStart, GrabTrigger::ActivateEnd),
		};
		if trigger == start {
			if let Some(reticle) = self.settings.ray_reticle {
				ctx.host.set_active(reticle, false);
			}
			grab.grab_start(self.node, &mut self.holder, ctx, event);
		} else if trigger == end {
			grab.grab_end(self.node, &mut self.holder, ctx, event);
		}
	}

	fn show_reticle(&self, ctx: &mut InteractionContext, position: Vec3) {
		if let Some(reticle) = self.settings.ray_reticle {
			ctx.host.set_world_position(reticle, position);
			ctx.host.set_active(reticle, true);
		}
	}
	fn hide_reticle(&self, ctx: &mut InteractionContext) {
		if let Some(reticle) = self.settings.ray_reticle {
			ctx.host.set_active(reticle, false);
		}
	}
}

impl Lifecycle for Interactable {
	fn on_enable(&mut self, ctx: &mut InteractionContext) {
		self.hide_reticle(ctx);
	}
	fn update(&mut self, ctx: &mut InteractionContext, info: &FrameInfo) {
		if self.inert {
			return;
		}
		if let InteractableKind::Grab(grab) = &mut self.kind {
			grab.update(self.node, self.holder, ctx, info);
		}
	}
	fn on_disable(&mut self, ctx: &mut InteractionContext) {
		if let InteractableKind::Grab(grab) = &mut self.kind {
			if grab.is_grabbed() {
				debug!(node = ?self.node, holder = ?self.holder, "disabled while held");
				let event = EventHandle {
					trigger_node: self.holder,
					..Default::default()
				};
				grab.release(self.node, &mut self.holder, ctx, &event, true);
			}
		}
		self.holder = None;
		self.hide_reticle(ctx);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		event::{EventQueue, GrabState},
		interaction::Targets,
		scene::BodyKind,
		sim::{SimBody, SimScene},
	};

	#[test]
	fn reticle_follows_hover() {
		let mut scene = SimScene::new();
		let node = scene.spawn_at(Vec3::ZERO);
		let reticle = scene.spawn_at(Vec3::ZERO);
		let targets = Targets::default();
		let mut queue = EventQueue::default();
		let mut interactable = Interactable::generic(node, InteractableSettings {
			ray_reticle: Some(reticle),
		});
		let mut ctx = InteractionContext {
			host: &mut scene,
			targets: &targets,
			queue: &mut queue,
			now: 0.0,
		};
		let hover = EventHandle {
			hit_point: Some(Vec3::new(0.0, 0.3, 0.0)),
			..Default::default()
		};
		interactable.handle(&mut ctx, InteractionEvent::HoverEntered.into(), &hover);
		assert!(ctx.host.is_active(reticle));
		assert_eq!(ctx.host.world_position(reticle), hover.hit_point);
		interactable.handle(&mut ctx, InteractionEvent::HoverExited.into(), &hover);
		assert!(!ctx.host.is_active(reticle));
	}

	#[test]
	fn activate_mode_ignores_select() {
		let mut scene = SimScene::new();
		let node = scene.spawn_at(Vec3::ZERO);
		scene.add_rigid_body(node, SimBody::default());
		let hand = scene.spawn_at(Vec3::Y);
		let targets = Targets::default();
		let mut queue = EventQueue::default();
		let mut interactable = Interactable::grab(node, InteractableSettings::default(), GrabSettings {
			grab_trigger: GrabTriggerMode::OnActivated,
			..Default::default()
		});
		let mut ctx = InteractionContext {
			host: &mut scene,
			targets: &targets,
			queue: &mut queue,
			now: 0.0,
		};
		let event = EventHandle {
			trigger_node: Some(hand),
			attach_node: Some(hand),
			force_grab: true,
			..Default::default()
		};
		interactable.handle(&mut ctx, GrabTrigger::SelectStart.into(), &event);
		assert_eq!(interactable.holder(), None);
		interactable.handle(&mut ctx, GrabTrigger::ActivateStart.into(), &event);
		assert_eq!(interactable.holder(), Some(hand));
		assert_eq!(ctx.host.body_kind(node), Some(BodyKind::Kinematic));
	}

	#[test]
	fn disable_while_held_releases_and_notifies() {
		let mut scene = SimScene::new();
		let node = scene.spawn_at(Vec3::ZERO);
		scene.add_rigid_body(node, SimBody::default());
		let hand = scene.spawn_at(Vec3::Y);
		let targets = Targets::default();
		let mut queue = EventQueue::default();
		let mut interactable = Interactable::grab(node, InteractableSettings::default(), GrabSettings::default());
		let mut ctx = InteractionContext {
			host: &mut scene,
			targets: &targets,
			queue: &mut queue,
			now: 0.0,
		};
		let event = EventHandle {
			trigger_node: Some(hand),
			attach_node: Some(hand),
			force_grab: true,
			..Default::default()
		};
		interactable.handle(&mut ctx, GrabTrigger::SelectStart.into(), &event);
		ctx.queue.pop();
		interactable.on_disable(&mut ctx);

		assert_eq!(interactable.holder(), None);
		assert_eq!(ctx.host.body_kind(node), Some(BodyKind::Dynamic));
		assert_eq!(ctx.host.uses_gravity(node), Some(true));
		let dispatch = ctx.queue.pop().unwrap();
		assert_eq!((dispatch.target, dispatch.signal), (hand, Signal::Grab(GrabState::End)));
	}
}
