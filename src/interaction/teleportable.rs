use crate::{
	event::{EventHandle, InteractionEvent},
	lifecycle::InteractionContext,
	locomotion::Teleporter,
	scene::NodeId,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeleportableType {
	/// Land wherever the ray hit.
	#[default]
	Area,
	/// Land on a fixed spot.
	Anchor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeleportTrigger {
	#[default]
	OnSelectExited,
	OnSelectEntered,
	OnActivated,
	OnDeactivated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeleportSettings {
	pub teleportable_type: TeleportableType,
	/// Landing spot for anchors. Defaults to the teleportable's own node.
	pub anchor_node: Option<NodeId>,
	pub trigger: TeleportTrigger,
}

#[derive(Debug, Default)]
pub struct Teleportable {
	pub settings: TeleportSettings,
	pub teleporter: Option<Teleporter>,
}
impl Teleportable {
	pub fn new(settings: TeleportSettings, teleporter: Option<Teleporter>) -> Self {
		Teleportable {
			settings,
			teleporter,
		}
	}

	/// Where the reticle goes while hovered.
	pub(crate) fn reticle_position(
		&self,
		node: NodeId,
		ctx: &InteractionContext,
		event: &EventHandle,
	) -> Option<Vec3> {
		match self.settings.teleportable_type {
			TeleportableType::Anchor => ctx
				.host
				.world_position(self.settings.anchor_node.unwrap_or(node)),
			TeleportableType::Area => event.hit_point,
		}
	}

	/// Tracks the holder and returns true if a teleport was performed.
	pub(crate) fn handle(
		&mut self,
		node: NodeId,
		holder: &mut Option<NodeId>,
		ctx: &mut InteractionContext,
		kind: InteractionEvent,
		event: &EventHandle,
	) -> bool {
		let fires = match kind {
			InteractionEvent::SelectEntered | InteractionEvent::Activated => {
				*holder = event.trigger_node;
				matches!(
					(kind, self.settings.trigger),
					(InteractionEvent::SelectEntered, TeleportTrigger::OnSelectEntered)
						| (InteractionEvent::Activated, TeleportTrigger::OnActivated)
				)
			}
			InteractionEvent::SelectExited | InteractionEvent::Deactivated => {
				*holder = None;
				matches!(
					(kind, self.settings.trigger),
					(InteractionEvent::SelectExited, TeleportTrigger::OnSelectExited)
						| (InteractionEvent::Deactivated, TeleportTrigger::OnDeactivated)
				)
			}
			InteractionEvent::SelectCanceled | InteractionEvent::ActivateCanceled => {
				*holder = None;
				false
			}
			_ => false,
		};
		fires && self.teleport(node, ctx, event)
	}

	fn teleport(&self, node: NodeId, ctx: &mut InteractionContext, event: &EventHandle) -> bool {
		let Some(hit_point) = event.hit_point else {
			trace!(?node, "teleport without a hit point");
			return false;
		};
		let Some(teleporter) = self.teleporter else {
			trace!(?node, "teleportable has no teleporter");
			return false;
		};
		let destination = match self.settings.teleportable_type {
			TeleportableType::Area => Some(hit_point),
			TeleportableType::Anchor => ctx
				.host
				.world_position(self.settings.anchor_node.unwrap_or(node)),
		};
		let Some(destination) = destination else {
			return false;
		};
		teleporter.teleport(ctx.host, destination);
		true
	}
}
