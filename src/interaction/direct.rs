use super::{interactor::notify, TargetKind};
use crate::{
	event::{EventHandle, InteractionEvent},
	lifecycle::InteractionContext,
	listeners::InteractorEvents,
	scene::NodeId,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Trigger/collision callback delivered by the physics host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactEvent {
	Enter(NodeId),
	Stay(NodeId),
	Exit(NodeId),
}

/// Hit testing by touch: whatever collider the host last reported in
/// contact is the candidate target.
#[derive(Debug, Default)]
pub struct DirectInteractor {
	touching: Option<NodeId>,
}
impl DirectInteractor {
	pub fn touching(&self) -> Option<NodeId> {
		self.touching
	}

	pub(crate) fn contact(
		&mut self,
		contact: ContactEvent,
		event: &EventHandle,
		listeners: &mut Option<InteractorEvents>,
	) {
		match contact {
			ContactEvent::Enter(other) => {
				trace!(?other, "contact entered");
				self.touching = Some(other);
				notify(listeners, InteractionEvent::HoverEntered, event);
			}
			ContactEvent::Stay(other) => {
				self.touching = Some(other);
				notify(listeners, InteractionEvent::HoverStay, event);
			}
			ContactEvent::Exit(other) => {
				if self.touching == Some(other) {
					trace!(?other, "contact exited");
					self.touching = None;
					notify(listeners, InteractionEvent::HoverExited, event);
				}
			}
		}
	}

	pub(crate) fn judge_hit(&self, ctx: &InteractionContext, event: &mut EventHandle) -> Option<NodeId> {
		let target = self
			.touching
			.filter(|touching| ctx.targets.is_interactable(*touching))?;
		event.hit_point = ctx.host.world_position(target);
		Some(target)
	}
	pub(crate) fn judge_ui_hit(&self, ctx: &InteractionContext) -> Option<NodeId> {
		self.touching
			.filter(|touching| ctx.targets.kind(*touching) == Some(TargetKind::UiChecker))
	}

	pub(crate) fn on_enable(
		&mut self,
		node: NodeId,
		attach_transform: Option<NodeId>,
		event: &mut EventHandle,
	) {
		event.force_grab = true;
		event.attach_node = Some(attach_transform.unwrap_or(node));
	}

	pub(crate) fn clear(&mut self) {
		self.touching = None;
	}
}
