use super::{KeyframeCurve, SmoothingCurve, VelocityHistory};
use crate::{
	event::{EventHandle, GrabState},
	lifecycle::{FrameInfo, InteractionContext},
	scene::{to_node_space, BodyKind, Host, NodeId},
};
use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

const SETTLE_TOLERANCE: f32 = 0.01;

/// Which channel moves the object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrabTriggerMode {
	#[default]
	OnSelectEntered,
	OnActivated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrowSimulationMode {
	/// Keep whatever velocity the body reports at release.
	#[default]
	InheritRigidbody,
	/// Reconstruct the velocity from recent motion.
	CurveComputation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrabSettings {
	/// Grab point on the object, used when force grabbing.
	pub attach_transform: Option<NodeId>,
	pub attach_ease_in_time: f32,
	pub grab_trigger: GrabTriggerMode,
	/// Hide the holding controller's model while grabbed.
	pub hide_controller: bool,
	pub throw_on_detach: bool,
	pub throw_simulation_mode: ThrowSimulationMode,
	pub throw_smoothing_duration: f32,
	pub throw_smoothing_curve: KeyframeCurve,
	pub throw_velocity_scale: f32,
	pub throw_angular_velocity_scale: f32,
}
impl Default for GrabSettings {
	fn default() -> Self {
		Self {
			attach_transform: None,
			attach_ease_in_time: 0.15,
			grab_trigger: GrabTriggerMode::default(),
			hide_controller: false,
			throw_on_detach: true,
			throw_simulation_mode: ThrowSimulationMode::default(),
			throw_smoothing_duration: 0.25,
			throw_smoothing_curve: KeyframeCurve::default(),
			throw_velocity_scale: 1.5,
			throw_angular_velocity_scale: 1.0,
		}
	}
}

pub struct GrabInteractable {
	pub settings: GrabSettings,
	curve: Box<dyn SmoothingCurve>,
	model: Option<NodeId>,
	force_grab: bool,
	is_grabbed: bool,
	has_settled: bool,
	attach_node: Option<NodeId>,
	grab_time: f32,
	history: VelocityHistory,
	last_position: Vec3,
	last_rotation: Quat,
}
impl GrabInteractable {
	pub fn new(settings: GrabSettings) -> Self {
		let curve = Box::new(settings.throw_smoothing_curve.clone());
		GrabInteractable {
			settings,
			curve,
			model: None,
			force_grab: false,
			is_grabbed: false,
			has_settled: false,
			attach_node: None,
			grab_time: 0.0,
			history: VelocityHistory::default(),
			last_position: Vec3::ZERO,
			last_rotation: Quat::IDENTITY,
		}
	}
	/// Replace the keyframed weighting curve with any `[0, 1] -> [0, 1]` function.
	pub fn set_smoothing_curve(&mut self, curve: impl SmoothingCurve + 'static) {
		self.curve = Box::new(curve);
	}

	pub fn is_grabbed(&self) -> bool {
		self.is_grabbed
	}
	pub fn has_settled(&self) -> bool {
		self.has_settled
	}
	pub fn history(&self) -> &VelocityHistory {
		&self.history
	}

	pub(crate) fn grab_start(
		&mut self,
		node: NodeId,
		holder: &mut Option<NodeId>,
		ctx: &mut InteractionContext,
		event: &EventHandle,
	) {
		self.is_grabbed = true;
		let new_holder = event.trigger_node;
		if let Some(old) = *holder {
			if Some(old) != new_holder {
				debug!(?node, ?old, ?new_holder, "grab stolen, releasing previous holder");
				ctx.queue.emit(node, old, GrabState::End, event);
			}
		}
		*holder = new_holder;
		if let Some(holder) = new_holder {
			ctx.queue.emit(node, holder, GrabState::Start, event);
		}

		self.attach_node = event.attach_node;
		self.grab_time = 0.0;
		self.has_settled = false;
		self.force_grab = event.force_grab;

		let position = ctx.host.world_position(node).unwrap_or_default();
		let rotation = ctx.host.world_rotation(node).unwrap_or_default();
		if !self.force_grab {
			if let Some(attach) = self.attach_node {
				ctx.host.set_world_position(attach, position);
				ctx.host.set_world_rotation(attach, rotation);
			}
		}
		self.last_position = position;
		self.last_rotation = rotation;

		if self.settings.hide_controller {
			if let Some(old) = self.model.take() {
				ctx.host.set_active(old, true);
			}
		}
		self.model = event.model;
		if self.settings.hide_controller {
			if let Some(model) = self.model {
				ctx.host.set_active(model, false);
			}
		}
		if ctx.host.has_rigid_body(node) {
			ctx.host.set_body_kind(node, BodyKind::Kinematic);
			ctx.host.set_use_gravity(node, false);
		}
		debug!(?node, holder = ?new_holder, force_grab = self.force_grab, "grab started");
	}

	pub(crate) fn grab_end(
		&mut self,
		node: NodeId,
		holder: &mut Option<NodeId>,
		ctx: &mut InteractionContext,
		event: &EventHandle,
	) {
		if holder.is_none() || *holder != event.trigger_node {
			trace!(?node, ?holder, from = ?event.trigger_node, "ignoring release from a non-holder");
			return;
		}
		self.release(node, holder, ctx, event, false);
	}

	/// Drop the object, applying a throw unless `cancel` is set or the grab
	/// ended before the object ever settled.
	pub(crate) fn release(
		&mut self,
		node: NodeId,
		holder: &mut Option<NodeId>,
		ctx: &mut InteractionContext,
		event: &EventHandle,
		cancel: bool,
	) {
		self.is_grabbed = false;
		if let Some(model) = self.model.take() {
			if self.settings.hide_controller {
				ctx.host.set_active(model, true);
			}
		}

		if ctx.host.has_rigid_body(node) {
			let canceled =
				cancel || (self.grab_time < self.settings.attach_ease_in_time && !self.has_settled);
			let (linear, angular) = if canceled || !self.settings.throw_on_detach {
				(Vec3::ZERO, Vec3::ZERO)
			} else {
				self.throw_velocity(node, &*ctx.host, ctx.now)
			};
			debug!(?node, canceled, ?linear, ?angular, "grab released");
			ctx.host.set_linear_velocity(node, linear);
			ctx.host.set_angular_velocity(node, angular);
			ctx.host.set_body_kind(node, BodyKind::Dynamic);
			ctx.host.set_use_gravity(node, true);
		}

		if let Some(holder) = holder.take() {
			ctx.queue.emit(node, holder, GrabState::End, event);
		}
		self.attach_node = None;
	}

	fn throw_velocity(&self, node: NodeId, host: &dyn Host, now: f64) -> (Vec3, Vec3) {
		let (linear, angular) = match self.settings.throw_simulation_mode {
			ThrowSimulationMode::CurveComputation => {
				self.history
					.smoothed(now, self.settings.throw_smoothing_duration, &*self.curve)
			}
			ThrowSimulationMode::InheritRigidbody => (
				host.linear_velocity(node).unwrap_or_default(),
				host.angular_velocity(node).unwrap_or_default(),
			),
		};
		(
			linear * self.settings.throw_velocity_scale,
			angular * self.settings.throw_angular_velocity_scale,
		)
	}

	/// Where the object should sit so its grab point lands on the attach node.
	fn force_target(&self, node: NodeId, host: &dyn Host, attach_position: Vec3, attach_rotation: Quat) -> Option<(Vec3, Quat)> {
		let Some(grab_point) = self.settings.attach_transform else {
			return Some((attach_position, attach_rotation));
		};
		let scale = host.world_scale(grab_point)? / host.local_scale(grab_point)?;
		let offset = -to_node_space(host, node, host.world_position(grab_point)?)?;
		let relative = host.world_rotation(node)?.inverse() * host.world_rotation(grab_point)?;
		Some((
			attach_position + attach_rotation * (scale * offset),
			attach_rotation * relative.inverse(),
		))
	}

	pub(crate) fn update(
		&mut self,
		node: NodeId,
		holder: Option<NodeId>,
		ctx: &mut InteractionContext,
		info: &FrameInfo,
	) {
		if !self.is_grabbed {
			return;
		}
		let Some(attach) = self.attach_node else {
			return;
		};
		let (Some(attach_position), Some(attach_rotation)) =
			(ctx.host.world_position(attach), ctx.host.world_rotation(attach))
		else {
			return;
		};
		let (Some(position), Some(rotation)) =
			(ctx.host.world_position(node), ctx.host.world_rotation(node))
		else {
			return;
		};

		let (target_position, target_rotation) = if self.force_grab {
			match self.force_target(node, &*ctx.host, attach_position, attach_rotation) {
				Some(target) => target,
				None => return,
			}
		} else {
			(attach_position, attach_rotation)
		};

		let ease = self.settings.attach_ease_in_time;
		self.grab_time += info.delta;
		let (new_position, new_rotation) = if self.force_grab && self.grab_time < ease {
			let t = (self.grab_time / ease).clamp(0.0, 1.0);
			(
				position.lerp(target_position, t),
				rotation.slerp(target_rotation, t),
			)
		} else {
			(target_position, target_rotation)
		};
		ctx.host.set_world_position(node, new_position);
		ctx.host.set_world_rotation(node, new_rotation);

		if self.settings.throw_on_detach
			&& self.settings.throw_simulation_mode == ThrowSimulationMode::CurveComputation
			&& info.delta > 0.0
		{
			let linear = (new_position - self.last_position) / info.delta;
			let (x, y, z) = (self.last_rotation.inverse() * new_rotation).to_euler(EulerRot::XYZ);
			let angular = Vec3::new(x, y, z) / info.delta;
			self.history.record(info.elapsed, linear, angular);
		}
		self.last_position = new_position;
		self.last_rotation = new_rotation;

		if !self.has_settled && new_position.abs_diff_eq(target_position, SETTLE_TOLERANCE) {
			trace!(?node, "grab settled");
			self.has_settled = true;
		}

		if let Some(holder) = holder {
			ctx.queue
				.emit(node, holder, GrabState::Stay, &EventHandle {
					trigger_node: Some(holder),
					attach_node: self.attach_node,
					force_grab: self.force_grab,
					..Default::default()
				});
		}
	}
}
impl fmt::Debug for GrabInteractable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GrabInteractable")
			.field("settings", &self.settings)
			.field("is_grabbed", &self.is_grabbed)
			.field("has_settled", &self.has_settled)
			.field("force_grab", &self.force_grab)
			.field("attach_node", &self.attach_node)
			.field("grab_time", &self.grab_time)
			.finish_non_exhaustive()
	}
}
