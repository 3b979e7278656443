use super::{interactor::notify, TargetKind};
use crate::{
	event::{EventHandle, InteractionEvent},
	lifecycle::InteractionContext,
	listeners::InteractorEvents,
	scene::{to_world_space, Host, NodeId, Ray, RayHit},
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaySettings {
	/// Snap grabbed objects to an offset corrected attach pose instead of
	/// moving a spawned attach node to them.
	pub force_grab: bool,
	/// Node the ray is cast from. Defaults to the interactor.
	pub ray_origin_transform: Option<NodeId>,
	pub max_ray_distance: f32,
	/// Shown at the hit point while hovering.
	pub reticle: Option<NodeId>,
	/// Ray segment in the origin's local space.
	pub line: [Vec3; 2],
}
impl Default for RaySettings {
	fn default() -> Self {
		Self {
			force_grab: true,
			ray_origin_transform: None,
			max_ray_distance: 30.0,
			reticle: None,
			line: [Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0)],
		}
	}
}

#[derive(Debug, Default)]
pub struct RayInteractor {
	pub settings: RaySettings,
	hovered: Option<NodeId>,
	line_hovered: bool,
	spawned_attach: Option<NodeId>,
	/// Reticle scale at one meter, captured on enable.
	reticle_scale: Vec3,
}
impl RayInteractor {
	pub fn new(settings: RaySettings) -> Self {
		RayInteractor {
			settings,
			..Default::default()
		}
	}

	pub fn hovered(&self) -> Option<NodeId> {
		self.hovered
	}
	/// Whether the ray currently rests on any registered target.
	pub fn line_hovered(&self) -> bool {
		self.line_hovered
	}

	pub fn cast(&self, node: NodeId, host: &dyn Host) -> Option<RayHit> {
		let origin = self.settings.ray_origin_transform.unwrap_or(node);
		if !host.is_active(origin) {
			return None;
		}
		let [a, b] = self.settings.line;
		let start = to_world_space(host, origin, a)?;
		let direction = host.world_rotation(origin)? * (b - a);
		host.raycast_closest(Ray::new(start, direction), self.settings.max_ray_distance)
	}

	pub(crate) fn judge_hit(
		&self,
		node: NodeId,
		ctx: &InteractionContext,
		event: &mut EventHandle,
	) -> Option<NodeId> {
		self.judge(node, ctx, event, TargetKind::Interactable)
	}
	pub(crate) fn judge_ui_hit(
		&self,
		node: NodeId,
		ctx: &InteractionContext,
		event: &mut EventHandle,
	) -> Option<NodeId> {
		self.judge(node, ctx, event, TargetKind::UiChecker)
	}
	fn judge(
		&self,
		node: NodeId,
		ctx: &InteractionContext,
		event: &mut EventHandle,
		kind: TargetKind,
	) -> Option<NodeId> {
		let hit = self.cast(node, &*ctx.host)?;
		if ctx.targets.kind(hit.collider) != Some(kind) {
			return None;
		}
		event.hit_point = Some(hit.point);
		Some(hit.collider)
	}

	pub(crate) fn on_enable(
		&mut self,
		node: NodeId,
		attach_transform: Option<NodeId>,
		ctx: &mut InteractionContext,
		event: &mut EventHandle,
	) {
		event.force_grab = self.settings.force_grab;
		let attach = if self.settings.force_grab {
			attach_transform.unwrap_or(node)
		} else {
			*self
				.spawned_attach
				.get_or_insert_with(|| ctx.host.spawn_child(node))
		};
		event.attach_node = Some(attach);
		if let Some(reticle) = self.settings.reticle {
			self.reticle_scale = ctx.host.local_scale(reticle).unwrap_or(Vec3::ONE);
			ctx.host.set_active(reticle, false);
		}
	}

	/// Per-frame hover tracking. The previous target always gets its exit
	/// before the next one is entered.
	pub(crate) fn update_hover(
		&mut self,
		node: NodeId,
		ctx: &mut InteractionContext,
		event: &mut EventHandle,
		listeners: &mut Option<InteractorEvents>,
	) {
		let hit = self
			.cast(node, &*ctx.host)
			.filter(|hit| ctx.targets.kind(hit.collider).is_some());
		match hit {
			Some(hit) => {
				event.hit_point = Some(hit.point);
				if self.hovered == Some(hit.collider) {
					ctx.queue
						.emit(node, hit.collider, InteractionEvent::HoverStay, event);
					notify(listeners, InteractionEvent::HoverStay, event);
				} else {
					if let Some(old) = self.hovered.take() {
						trace!(?node, ?old, "hover moved off");
						ctx.queue.emit(node, old, InteractionEvent::HoverExited, event);
						notify(listeners, InteractionEvent::HoverExited, event);
					}
					trace!(?node, target = ?hit.collider, "hover entered");
					self.hovered = Some(hit.collider);
					ctx.queue
						.emit(node, hit.collider, InteractionEvent::HoverEntered, event);
					notify(listeners, InteractionEvent::HoverEntered, event);
				}
			}
			None => {
				event.hit_point = None;
				if let Some(old) = self.hovered.take() {
					trace!(?node, ?old, "hover lost");
					ctx.queue.emit(node, old, InteractionEvent::HoverExited, event);
					notify(listeners, InteractionEvent::HoverExited, event);
				}
			}
		}
		self.line_hovered = self.hovered.is_some();

		if let Some(reticle) = self.settings.reticle {
			match hit {
				Some(hit) => {
					ctx.host.set_active(reticle, true);
					ctx.host.set_world_position(reticle, hit.point);
					ctx.host
						.set_local_scale(reticle, self.reticle_scale * hit.distance);
				}
				None => ctx.host.set_active(reticle, false),
			}
		}
	}

	pub(crate) fn cancel_hover(
		&mut self,
		node: NodeId,
		ctx: &mut InteractionContext,
		event: &EventHandle,
		listeners: &mut Option<InteractorEvents>,
	) {
		self.line_hovered = false;
		if let Some(reticle) = self.settings.reticle {
			ctx.host.set_active(reticle, false);
		}
		if let Some(old) = self.hovered.take() {
			ctx.queue
				.emit(node, old, InteractionEvent::HoverCanceled, event);
			notify(listeners, InteractionEvent::HoverCanceled, event);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		event::{EventQueue, Signal},
		interaction::Targets,
		sim::SimScene,
	};
	use crate::scene::SceneGraph;
	use glam::Quat;

	#[test]
	fn hover_sequence_exits_before_entering() {
		let mut scene = SimScene::new();
		let hand = scene.spawn_at(Vec3::ZERO);
		let a = scene.spawn_at(Vec3::new(0.0, 0.0, -2.0));
		let b = scene.spawn_at(Vec3::new(2.0, 0.0, 0.0));
		scene.add_sphere_collider(a, 0.25);
		scene.add_sphere_collider(b, 0.25);
		let mut targets = Targets::default();
		targets.insert(a, TargetKind::Interactable);
		targets.insert(b, TargetKind::Interactable);
		let mut queue = EventQueue::default();
		let mut ray = RayInteractor::new(RaySettings::default());
		let mut event = EventHandle::default();
		let mut listeners = None;

		let rotations = [
			Quat::IDENTITY,
			Quat::IDENTITY,
			Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2),
			Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
		];
		for rotation in rotations {
			scene.set_local_rotation(hand, rotation);
			let mut ctx = InteractionContext {
				host: &mut scene,
				targets: &targets,
				queue: &mut queue,
				now: 0.0,
			};
			ray.update_hover(hand, &mut ctx, &mut event, &mut listeners);
		}

		let mut seen = Vec::new();
		while let Some(dispatch) = queue.pop() {
			seen.push((dispatch.target, dispatch.signal));
		}
		assert_eq!(
			seen,
			vec![
				(a, Signal::Interaction(InteractionEvent::HoverEntered)),
				(a, Signal::Interaction(InteractionEvent::HoverStay)),
				(a, Signal::Interaction(InteractionEvent::HoverExited)),
				(b, Signal::Interaction(InteractionEvent::HoverEntered)),
				(b, Signal::Interaction(InteractionEvent::HoverExited)),
			]
		);
		assert_eq!(event.hit_point, None);
		assert!(!ray.line_hovered());
	}

	#[test]
	fn judge_hit_filters_by_target_kind() {
		let mut scene = SimScene::new();
		let hand = scene.spawn_at(Vec3::ZERO);
		let panel = scene.spawn_at(Vec3::new(0.0, 0.0, -3.0));
		scene.add_sphere_collider(panel, 0.5);
		let mut targets = Targets::default();
		targets.insert(panel, TargetKind::UiChecker);
		let mut queue = EventQueue::default();
		let ray = RayInteractor::new(RaySettings::default());
		let ctx = InteractionContext {
			host: &mut scene,
			targets: &targets,
			queue: &mut queue,
			now: 0.0,
		};
		let mut event = EventHandle::default();

		assert_eq!(ray.judge_hit(hand, &ctx, &mut event), None);
		assert_eq!(event.hit_point, None);
		assert_eq!(ray.judge_ui_hit(hand, &ctx, &mut event), Some(panel));
		assert!(event
			.hit_point
			.is_some_and(|p| p.abs_diff_eq(Vec3::new(0.0, 0.0, -2.5), 1e-4)));
	}

	#[test]
	fn non_force_grab_spawns_attach_child_once() {
		let mut scene = SimScene::new();
		let hand = scene.spawn_at(Vec3::new(1.0, 1.0, 1.0));
		let targets = Targets::default();
		let mut queue = EventQueue::default();
		let mut ray = RayInteractor::new(RaySettings {
			force_grab: false,
			..Default::default()
		});
		let mut event = EventHandle::default();
		let mut ctx = InteractionContext {
			host: &mut scene,
			targets: &targets,
			queue: &mut queue,
			now: 0.0,
		};
		ray.on_enable(hand, None, &mut ctx, &mut event);
		let attach = event.attach_node;
		assert!(attach.is_some_and(|a| a != hand));
		assert!(!event.force_grab);
		ray.on_enable(hand, None, &mut ctx, &mut event);
		assert_eq!(event.attach_node, attach);
		assert_eq!(
			ctx.host.world_position(attach.unwrap()),
			Some(Vec3::new(1.0, 1.0, 1.0))
		);
	}

	#[test]
	fn reticle_scales_with_hit_distance() {
		let mut scene = SimScene::new();
		let hand = scene.spawn_at(Vec3::ZERO);
		let wall = scene.spawn_at(Vec3::new(0.0, 0.0, -5.0));
		scene.add_sphere_collider(wall, 1.0);
		let reticle = scene.spawn_at(Vec3::ZERO);
		scene.set_local_scale(reticle, Vec3::splat(0.02));
		let mut targets = Targets::default();
		targets.insert(wall, TargetKind::Interactable);
		let mut queue = EventQueue::default();
		let mut ray = RayInteractor::new(RaySettings {
			reticle: Some(reticle),
			..Default::default()
		});
		let mut event = EventHandle::default();
		let mut ctx = InteractionContext {
			host: &mut scene,
			targets: &targets,
			queue: &mut queue,
			now: 0.0,
		};
		ray.on_enable(hand, None, &mut ctx, &mut event);
		assert!(!ctx.host.is_active(reticle));
		ray.update_hover(hand, &mut ctx, &mut event, &mut None);

		assert!(ctx.host.is_active(reticle));
		assert!(ctx
			.host
			.local_scale(reticle)
			.is_some_and(|s| s.abs_diff_eq(Vec3::splat(0.08), 1e-5)));
		assert_eq!(ctx.host.world_position(reticle), Some(Vec3::new(0.0, 0.0, -4.0)));
	}
}
