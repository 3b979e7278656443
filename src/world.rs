//! Owns every interaction component, keyed by the node it lives on, and
//! drives them from input, pose, contact and frame callbacks.

use crate::{
	device::{ControllerChannel, ControllerSettings, PoseEvent, PoseTracker, TrackingOrigin, TrackingOriginSettings, XrController},
	error::{require_collider, InteractionError},
	event::{Dispatch, EventHandle, EventQueue, Signal},
	input::{InputEvent, Phase},
	interaction::{Channel, ContactEvent, Interactable, Interactor, InteractorKind, TargetKind, Targets},
	lifecycle::{FrameInfo, InteractionContext, Scheduled},
	listeners::InteractableEvents,
	locomotion::{LocomotionChecker, LocomotionDriver},
	scene::{Host, NodeId},
};
use rustc_hash::FxHashMap;
use tracing::{debug, error, warn};

fn context<'a>(
	host: &'a mut dyn Host,
	targets: &'a Targets,
	queue: &'a mut EventQueue,
	now: f64,
) -> InteractionContext<'a> {
	InteractionContext {
		host,
		targets,
		queue,
		now,
	}
}

fn sorted_keys<V>(map: &FxHashMap<NodeId, V>) -> Vec<NodeId> {
	let mut keys: Vec<_> = map.keys().copied().collect();
	keys.sort();
	keys
}

pub struct InteractionWorld<H: Host> {
	host: H,
	targets: Targets,
	queue: EventQueue,
	elapsed: f64,
	interactors: FxHashMap<NodeId, Scheduled<Interactor>>,
	interactables: FxHashMap<NodeId, Scheduled<Interactable>>,
	interactable_events: FxHashMap<NodeId, InteractableEvents>,
	controllers: FxHashMap<NodeId, Scheduled<XrController>>,
	pose_trackers: FxHashMap<NodeId, PoseTracker>,
	locomotion: FxHashMap<NodeId, Scheduled<LocomotionDriver>>,
	tracking_origin: Option<TrackingOrigin>,
}
impl<H: Host> InteractionWorld<H> {
	pub fn new(host: H) -> Self {
		InteractionWorld {
			host,
			targets: Targets::default(),
			queue: EventQueue::default(),
			elapsed: 0.0,
			interactors: FxHashMap::default(),
			interactables: FxHashMap::default(),
			interactable_events: FxHashMap::default(),
			controllers: FxHashMap::default(),
			pose_trackers: FxHashMap::default(),
			locomotion: FxHashMap::default(),
			tracking_origin: None,
		}
	}

	pub fn host(&self) -> &H {
		&self.host
	}
	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}
	pub fn elapsed(&self) -> f64 {
		self.elapsed
	}
	pub fn interactor(&self, node: NodeId) -> Option<&Interactor> {
		self.interactors.get(&node).map(Scheduled::get)
	}
	pub fn interactable(&self, node: NodeId) -> Option<&Interactable> {
		self.interactables.get(&node).map(Scheduled::get)
	}
	pub fn controller(&self, node: NodeId) -> Option<&XrController> {
		self.controllers.get(&node).map(Scheduled::get)
	}
	pub fn tracking_origin(&self) -> Option<&TrackingOrigin> {
		self.tracking_origin.as_ref()
	}

	pub fn set_tracking_origin(&mut self, node: NodeId, settings: TrackingOriginSettings) {
		self.tracking_origin = Some(TrackingOrigin::new(&mut self.host, node, settings));
	}
	/// Checker for `agent`, falling back to the tracking origin.
	pub fn locomotion_checker(&self, agent: Option<NodeId>) -> Option<LocomotionChecker> {
		agent
			.or_else(|| self.tracking_origin.as_ref().map(|origin| origin.node))
			.map(LocomotionChecker::new)
	}

	/// Register and enable an interactor. A direct interactor without a
	/// collider is kept but never interacts.
	pub fn add_interactor(&mut self, mut interactor: Interactor) -> NodeId {
		let node = interactor.node();
		if matches!(interactor.kind(), InteractorKind::Direct(_))
			&& require_collider(&self.host, node)
				.inspect_err(|err| error!(%err, "direct interactor"))
				.is_err()
		{
			interactor.set_inert(true);
		}
		let mut scheduled = Scheduled::new(interactor);
		let mut ctx = context(&mut self.host, &self.targets, &mut self.queue, self.elapsed);
		scheduled.set_enabled(true, &mut ctx);
		self.interactors.insert(node, scheduled);
		self.drain();
		node
	}

	pub fn add_interactable(&mut self, mut interactable: Interactable) -> NodeId {
		let node = interactable.node();
		match require_collider(&self.host, node).inspect_err(|err| error!(%err, "interactable")) {
			Ok(()) => self.targets.insert(node, TargetKind::Interactable),
			Err(_) => interactable.set_inert(true),
		}
		let mut scheduled = Scheduled::new(interactable);
		let mut ctx = context(&mut self.host, &self.targets, &mut self.queue, self.elapsed);
		scheduled.set_enabled(true, &mut ctx);
		self.interactables.insert(node, scheduled);
		self.drain();
		node
	}

	pub fn add_interactable_events(&mut self, node: NodeId, events: InteractableEvents) {
		self.interactable_events.insert(node, events);
	}

	/// Mark a collider as a pressable UI surface.
	pub fn add_ui_target(&mut self, node: NodeId) -> Result<(), InteractionError> {
		require_collider(&self.host, node)?;
		self.targets.insert(node, TargetKind::UiChecker);
		Ok(())
	}

	/// The controller drives the interactor registered on the same node.
	pub fn add_controller(&mut self, node: NodeId, settings: ControllerSettings) {
		let mut scheduled = Scheduled::new(XrController::new(settings));
		let mut ctx = context(&mut self.host, &self.targets, &mut self.queue, self.elapsed);
		scheduled.set_enabled(true, &mut ctx);
		self.controllers.insert(node, scheduled);
	}

	pub fn add_pose_tracker(&mut self, tracker: PoseTracker) {
		self.pose_trackers.insert(tracker.node, tracker);
	}

	pub fn add_locomotion(&mut self, node: NodeId, driver: LocomotionDriver) {
		let mut scheduled = Scheduled::new(driver);
		let mut ctx = context(&mut self.host, &self.targets, &mut self.queue, self.elapsed);
		scheduled.set_enabled(true, &mut ctx);
		self.locomotion.insert(node, scheduled);
	}

	/// Feed one controller input event to every controller and locomotion driver.
	pub fn dispatch_input(&mut self, input: &InputEvent) {
		for node in sorted_keys(&self.controllers) {
			let Some(controller) = self
				.controllers
				.get_mut(&node)
				.and_then(Scheduled::active_mut)
			else {
				continue;
			};
			for command in controller.process(input) {
				// a controller with no interactor is a valid setup
				let _ = self.drive(node, command.channel, command.phase, &command.event);
			}
		}
		for node in sorted_keys(&self.locomotion) {
			let Some(driver) = self
				.locomotion
				.get_mut(&node)
				.and_then(Scheduled::active_mut)
			else {
				continue;
			};
			let mut ctx = context(&mut self.host, &self.targets, &mut self.queue, self.elapsed);
			driver.handle_input(&mut ctx, input);
		}
		self.drain();
	}

	/// Send one transition straight to the interactor on `node`.
	pub fn drive(
		&mut self,
		node: NodeId,
		channel: ControllerChannel,
		phase: Phase,
		input: &EventHandle,
	) -> Result<(), InteractionError> {
		let interactor = self
			.interactors
			.get_mut(&node)
			.ok_or(InteractionError::UnknownNode(node))?;
		let Some(interactor) = interactor.active_mut() else {
			return Ok(());
		};
		let mut ctx = context(&mut self.host, &self.targets, &mut self.queue, self.elapsed);
		match (channel, phase) {
			(ControllerChannel::Select, Phase::Start) => interactor.start(Channel::Select, &mut ctx, input),
			(ControllerChannel::Select, Phase::Stay) => interactor.stay(Channel::Select, &mut ctx, input),
			(ControllerChannel::Select, Phase::End) => interactor.end(Channel::Select, &mut ctx, input),
			(ControllerChannel::Activate, Phase::Start) => interactor.start(Channel::Activate, &mut ctx, input),
			(ControllerChannel::Activate, Phase::Stay) => interactor.stay(Channel::Activate, &mut ctx, input),
			(ControllerChannel::Activate, Phase::End) => interactor.end(Channel::Activate, &mut ctx, input),
			(ControllerChannel::UiPress, Phase::Start) => interactor.ui_press_enter(&mut ctx, input),
			(ControllerChannel::UiPress, Phase::Stay) => interactor.ui_press_stay(&mut ctx, input),
			(ControllerChannel::UiPress, Phase::End) => interactor.ui_press_exit(&mut ctx, input),
		}
		self.drain();
		Ok(())
	}

	pub fn dispatch_pose(&mut self, event: &PoseEvent) {
		for node in sorted_keys(&self.pose_trackers) {
			if let Some(tracker) = self.pose_trackers.get(&node) {
				tracker.apply(&mut self.host, event);
			}
		}
	}

	/// Physics contact callback for the collider on `node`.
	pub fn contact(&mut self, node: NodeId, contact: ContactEvent) -> Result<(), InteractionError> {
		let interactor = self
			.interactors
			.get_mut(&node)
			.ok_or(InteractionError::UnknownNode(node))?;
		if let Some(interactor) = interactor.active_mut() {
			interactor.contact(contact);
		}
		Ok(())
	}

	/// Advance one frame: interactors, then interactables, then locomotion.
	pub fn update(&mut self, delta: f32) {
		self.elapsed += delta as f64;
		let info = FrameInfo {
			delta,
			elapsed: self.elapsed,
		};
		for node in sorted_keys(&self.interactors) {
			if let Some(interactor) = self.interactors.get_mut(&node) {
				let mut ctx = context(&mut self.host, &self.targets, &mut self.queue, self.elapsed);
				interactor.update(&mut ctx, &info);
			}
			self.drain();
		}
		for node in sorted_keys(&self.interactables) {
			if let Some(interactable) = self.interactables.get_mut(&node) {
				let mut ctx = context(&mut self.host, &self.targets, &mut self.queue, self.elapsed);
				interactable.update(&mut ctx, &info);
			}
			self.drain();
		}
		for node in sorted_keys(&self.locomotion) {
			if let Some(driver) = self.locomotion.get_mut(&node) {
				let mut ctx = context(&mut self.host, &self.targets, &mut self.queue, self.elapsed);
				driver.update(&mut ctx, &info);
			}
		}
		self.drain();
	}

	/// Enable or disable every component on `node`. Disabling unwinds any
	/// select, grab or hover the components are part of.
	pub fn set_enabled(&mut self, node: NodeId, enabled: bool) -> Result<(), InteractionError> {
		let mut found = false;
		{
			let mut ctx = context(&mut self.host, &self.targets, &mut self.queue, self.elapsed);
			if let Some(interactor) = self.interactors.get_mut(&node) {
				interactor.set_enabled(enabled, &mut ctx);
				found = true;
			}
			if let Some(interactable) = self.interactables.get_mut(&node) {
				interactable.set_enabled(enabled, &mut ctx);
				found = true;
			}
			if let Some(controller) = self.controllers.get_mut(&node) {
				controller.set_enabled(enabled, &mut ctx);
				found = true;
			}
			if let Some(driver) = self.locomotion.get_mut(&node) {
				driver.set_enabled(enabled, &mut ctx);
				found = true;
			}
		}
		if !found {
			return Err(InteractionError::UnknownNode(node));
		}
		debug!(?node, enabled, "components toggled");
		self.drain();
		Ok(())
	}

	pub fn is_enabled(&self, node: NodeId) -> bool {
		self.interactors.get(&node).is_some_and(Scheduled::is_enabled)
			|| self.interactables.get(&node).is_some_and(Scheduled::is_enabled)
	}

	/// Deliver queued events until none are left. Handlers may queue more.
	fn drain(&mut self) {
		while let Some(Dispatch {
			source,
			target,
			signal,
			event,
		}) = self.queue.pop()
		{
			let mut ctx = context(&mut self.host, &self.targets, &mut self.queue, self.elapsed);
			match signal {
				Signal::Grab(state) => match self.interactors.get_mut(&target) {
					Some(interactor) => interactor.get_mut().on_grab_state(&mut ctx, source, state),
					None => warn!(?source, ?target, ?state, "grab state for a node without an interactor"),
				},
				Signal::GrabTrigger(_) => {
					if let Some(interactable) = self
						.interactables
						.get_mut(&target)
						.and_then(Scheduled::active_mut)
					{
						interactable.handle(&mut ctx, signal, &event);
					}
				}
				Signal::Interaction(kind) => {
					if let Some(interactable) = self
						.interactables
						.get_mut(&target)
						.and_then(Scheduled::active_mut)
					{
						interactable.handle(&mut ctx, signal, &event);
					}
					if let Some(events) = self.interactable_events.get_mut(&target) {
						events.emit(kind, &event);
					}
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		device::TrackingOriginMode,
		event::{DeviceType, GrabState, InteractionEvent},
		input::{Hand, HandleInput},
		interaction::{
			ChannelLatch, GrabSettings, GrabTriggerMode, InteractableSettings, InteractorSettings,
			RayInteractor, RaySettings, SelectActionTrigger, TeleportSettings, ThrowSimulationMode,
		},
		locomotion::{ContinuousTurner, Teleporter, TurnerSettings},
		scene::{BodyKind, RigidBodies, SceneGraph},
		sim::{SimBody, SimScene},
	};
	use glam::Vec3;
	use std::{cell::RefCell, rc::Rc};

	fn grip(value: f32) -> InputEvent {
		InputEvent::Handle(HandleInput {
			grip_right: value,
			..Default::default()
		})
	}

	fn right_hand() -> ControllerSettings {
		ControllerSettings {
			hand: Hand::Right,
			..Default::default()
		}
	}

	fn ball(world: &mut InteractionWorld<SimScene>, position: Vec3) -> NodeId {
		let scene = world.host_mut();
		let ball = scene.spawn_at(position);
		scene.add_sphere_collider(ball, 0.1);
		scene.add_rigid_body(ball, SimBody::default());
		world.add_interactable(Interactable::grab(
			ball,
			InteractableSettings::default(),
			GrabSettings::default(),
		))
	}

	fn direct_hand(world: &mut InteractionWorld<SimScene>, position: Vec3) -> NodeId {
		let scene = world.host_mut();
		let hand = scene.spawn_at(position);
		scene.add_sphere_collider(hand, 0.05);
		world.add_interactor(Interactor::direct(hand, InteractorSettings::default()))
	}

	fn press(world: &mut InteractionWorld<SimScene>, hand: NodeId) {
		world
			.drive(hand, ControllerChannel::Select, Phase::Start, &EventHandle::default())
			.unwrap();
	}

	#[test]
	fn steal_moves_ownership() {
		let mut world = InteractionWorld::new(SimScene::new());
		let object = ball(&mut world, Vec3::ZERO);
		let y = direct_hand(&mut world, Vec3::new(0.1, 0.0, 0.0));
		let x = direct_hand(&mut world, Vec3::new(-0.1, 0.0, 0.0));
		world.contact(y, ContactEvent::Enter(object)).unwrap();
		world.contact(x, ContactEvent::Enter(object)).unwrap();

		press(&mut world, y);
		assert_eq!(world.interactable(object).unwrap().holder(), Some(y));
		assert_eq!(world.interactor(y).unwrap().grab_state(), GrabState::Start);

		press(&mut world, x);
		assert_eq!(world.interactable(object).unwrap().holder(), Some(x));
		assert_eq!(world.interactor(x).unwrap().grabbed(), Some(object));
		let loser = world.interactor(y).unwrap();
		assert_eq!(loser.grab_state(), GrabState::End);
		assert_eq!(loser.latch(Channel::Select).target, None);
	}

	#[test]
	fn disabling_holder_mid_grab_restores_body() {
		let mut world = InteractionWorld::new(SimScene::new());
		let object = ball(&mut world, Vec3::ZERO);
		let hand = direct_hand(&mut world, Vec3::new(0.1, 0.0, 0.0));
		world.contact(hand, ContactEvent::Enter(object)).unwrap();
		press(&mut world, hand);
		world.update(0.016);
		assert_eq!(world.host().body_kind(object), Some(BodyKind::Kinematic));

		world.set_enabled(hand, false).unwrap();
		assert_eq!(world.interactable(object).unwrap().holder(), None);
		assert_eq!(world.host().body_kind(object), Some(BodyKind::Dynamic));
		assert_eq!(world.host().uses_gravity(object), Some(true));
		assert_eq!(world.interactor(hand).unwrap().grab_state(), GrabState::End);
	}

	#[test]
	fn disabling_held_object_frees_the_interactor() {
		let mut world = InteractionWorld::new(SimScene::new());
		let object = ball(&mut world, Vec3::ZERO);
		let hand = direct_hand(&mut world, Vec3::new(0.1, 0.0, 0.0));
		world.contact(hand, ContactEvent::Enter(object)).unwrap();
		press(&mut world, hand);

		world.set_enabled(object, false).unwrap();
		let interactor = world.interactor(hand).unwrap();
		assert_eq!(interactor.grab_state(), GrabState::End);
		assert_eq!(interactor.latch(Channel::Select).target, None);
	}

	#[test]
	fn controller_throw_through_ray() {
		let mut world = InteractionWorld::new(SimScene::new());
		let hand = world.host_mut().spawn_at(Vec3::new(0.0, 1.0, 0.0));
		let object = world.host_mut().spawn_at(Vec3::new(0.0, 1.0, -2.0));
		world.host_mut().add_sphere_collider(object, 0.2);
		world.host_mut().add_rigid_body(object, SimBody::default());
		world.add_interactable(Interactable::grab(
			object,
			InteractableSettings::default(),
			GrabSettings {
				throw_simulation_mode: ThrowSimulationMode::CurveComputation,
				..Default::default()
			},
		));
		world.add_interactor(Interactor::ray(
			hand,
			InteractorSettings::default(),
			RayInteractor::new(RaySettings {
				force_grab: false,
				..Default::default()
			}),
		));
		world.add_controller(hand, right_hand());

		world.dispatch_input(&grip(1.0));
		assert_eq!(world.interactable(object).unwrap().holder(), Some(hand));

		let velocity = Vec3::new(1.0, 0.0, 0.0);
		let dt = 1.0 / 60.0;
		for _ in 0..30 {
			let position = world.host().world_position(hand).unwrap();
			world.host_mut().set_world_position(hand, position + velocity * dt);
			world.update(dt);
			world.dispatch_input(&grip(1.0));
		}
		world.dispatch_input(&grip(0.0));

		assert_eq!(world.interactable(object).unwrap().holder(), None);
		let body = *world.host().body(object).unwrap();
		assert_eq!(body.kind, BodyKind::Dynamic);
		assert!(body.linear_velocity.abs_diff_eq(velocity * 1.5, 1e-2), "{}", body.linear_velocity);
	}

	#[test]
	fn sticky_select_through_controller() {
		let mut world = InteractionWorld::new(SimScene::new());
		let hand = world.host_mut().spawn_at(Vec3::ZERO);
		let button = world.host_mut().spawn_at(Vec3::new(0.0, 0.0, -1.0));
		world.host_mut().add_sphere_collider(button, 0.2);
		world.add_interactable(Interactable::generic(button, InteractableSettings::default()));
		world.add_interactor(Interactor::ray(
			hand,
			InteractorSettings {
				select_action_trigger: SelectActionTrigger::Sticky,
				..Default::default()
			},
			RayInteractor::new(RaySettings::default()),
		));
		world.add_controller(hand, right_hand());

		let seen = Rc::new(RefCell::new(Vec::new()));
		let (entered, exited) = (seen.clone(), seen.clone());
		world.add_interactable_events(
			button,
			InteractableEvents::new()
				.on(InteractionEvent::SelectEntered, move |_| entered.borrow_mut().push("start"))
				.on(InteractionEvent::SelectExited, move |_| exited.borrow_mut().push("end")),
		);

		for value in [1.0, 0.0, 1.0, 0.0] {
			world.dispatch_input(&grip(value));
		}
		assert_eq!(*seen.borrow(), vec!["start", "end"]);
		assert_eq!(world.interactable(button).unwrap().holder(), None);
	}

	#[test]
	fn ray_hover_reaches_listeners() {
		let mut world = InteractionWorld::new(SimScene::new());
		let hand = world.host_mut().spawn_at(Vec3::ZERO);
		let target = world.host_mut().spawn_at(Vec3::new(0.0, 0.0, -1.0));
		world.host_mut().add_sphere_collider(target, 0.2);
		world.add_interactable(Interactable::generic(target, InteractableSettings::default()));
		world.add_interactor(Interactor::ray(
			hand,
			InteractorSettings::default(),
			RayInteractor::new(RaySettings::default()),
		));
		let seen = Rc::new(RefCell::new(Vec::new()));
		let mut events = InteractableEvents::new();
		for kind in [
			InteractionEvent::HoverEntered,
			InteractionEvent::HoverStay,
			InteractionEvent::HoverExited,
		] {
			let seen = seen.clone();
			events = events.on(kind, move |_| seen.borrow_mut().push(kind));
		}
		world.add_interactable_events(target, events);

		world.update(0.01);
		world.update(0.01);
		world.host_mut().set_active(target, false);
		world.update(0.01);
		assert_eq!(
			*seen.borrow(),
			vec![
				InteractionEvent::HoverEntered,
				InteractionEvent::HoverStay,
				InteractionEvent::HoverExited,
			]
		);
	}

	#[test]
	fn teleport_area_on_select_exit() {
		let mut world = InteractionWorld::new(SimScene::new());
		let origin = world.host_mut().spawn_at(Vec3::ZERO);
		world.set_tracking_origin(origin, TrackingOriginSettings {
			mode: TrackingOriginMode::Floor,
			..Default::default()
		});
		let hand = world.host_mut().spawn_child(origin);
		world.host_mut().set_local_position(hand, Vec3::new(0.0, 1.0, 0.0));
		world
			.host_mut()
			.set_local_rotation(hand, glam::Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4));
		let floor = world.host_mut().spawn_at(Vec3::new(0.0, -10.0, -3.0));
		world.host_mut().add_sphere_collider(floor, 10.0);

		let teleporter = world.locomotion_checker(None).map(Teleporter::new);
		world.add_interactable(Interactable::teleport(
			floor,
			InteractableSettings::default(),
			TeleportSettings::default(),
			teleporter,
		));
		world.add_interactor(Interactor::ray(
			hand,
			InteractorSettings::default(),
			RayInteractor::new(RaySettings::default()),
		));
		world.add_controller(hand, right_hand());

		world.dispatch_input(&grip(1.0));
		let hit = world.interactor(hand).unwrap().event().hit_point.unwrap();
		world.dispatch_input(&grip(0.0));
		assert!(world
			.host()
			.world_position(origin)
			.unwrap()
			.abs_diff_eq(hit, 1e-4));
	}

	#[test]
	fn missing_collider_makes_component_inert() {
		let mut world = InteractionWorld::new(SimScene::new());
		let hand = world.host_mut().spawn_at(Vec3::ZERO);
		world.add_interactor(Interactor::direct(hand, InteractorSettings::default()));
		assert!(world.interactor(hand).unwrap().is_inert());

		let naked = world.host_mut().spawn_at(Vec3::ZERO);
		assert_eq!(world.add_ui_target(naked), Err(InteractionError::MissingCollider(naked)));
		assert_eq!(
			world.set_enabled(NodeId(999), false),
			Err(InteractionError::UnknownNode(NodeId(999)))
		);
		assert!(world
			.drive(hand, ControllerChannel::Select, Phase::Start, &EventHandle::default())
			.is_ok());
	}

	#[test]
	fn controller_commands_without_interactor_are_ignored() {
		let mut world = InteractionWorld::new(SimScene::new());
		let node = world.host_mut().spawn_at(Vec3::ZERO);
		world.add_controller(node, right_hand());
		world.dispatch_input(&grip(1.0));
		world.dispatch_input(&grip(0.0));
		let controller = world.controller(node).unwrap();
		assert_eq!(controller.event().device_type, DeviceType::Right);
	}

	#[test]
	fn locomotion_follows_stick_until_disabled() {
		let mut world = InteractionWorld::new(SimScene::new());
		let origin = world.host_mut().spawn_at(Vec3::ZERO);
		world.set_tracking_origin(origin, TrackingOriginSettings::default());
		let checker = world.locomotion_checker(None).unwrap();
		world.add_locomotion(
			origin,
			LocomotionDriver::Turner(ContinuousTurner::new(checker, TurnerSettings::default())),
		);

		world.dispatch_input(&InputEvent::Handle(HandleInput {
			right_stick: glam::Vec2::new(0.7, 0.0),
			..Default::default()
		}));
		world.update(0.5);
		let expected = glam::Quat::from_rotation_y(-30f32.to_radians());
		assert!(world.host().local_rotation(origin).unwrap().abs_diff_eq(expected, 1e-5));

		world.set_enabled(origin, false).unwrap();
		world.update(0.5);
		assert!(world.host().local_rotation(origin).unwrap().abs_diff_eq(expected, 1e-5));
	}

	#[test]
	fn toggled_select_survives_activate_grab_on_another_object() {
		let mut world = InteractionWorld::new(SimScene::new());
		let hand = world.host_mut().spawn_at(Vec3::ZERO);
		let button = world.host_mut().spawn_at(Vec3::new(0.0, 0.0, -2.0));
		world.host_mut().add_sphere_collider(button, 0.25);
		world.add_interactable(Interactable::generic(button, InteractableSettings::default()));
		let ball = world.host_mut().spawn_at(Vec3::new(2.0, 0.0, 0.0));
		world.host_mut().add_sphere_collider(ball, 0.25);
		world.host_mut().add_rigid_body(ball, SimBody::default());
		world.add_interactable(Interactable::grab(
			ball,
			InteractableSettings::default(),
			GrabSettings {
				grab_trigger: GrabTriggerMode::OnActivated,
				..Default::default()
			},
		));
		world.add_interactor(Interactor::ray(
			hand,
			InteractorSettings {
				select_action_trigger: SelectActionTrigger::Toggle,
				..Default::default()
			},
			RayInteractor::new(RaySettings::default()),
		));
		let input = EventHandle::default();
		let drive = |world: &mut InteractionWorld<SimScene>, channel: ControllerChannel, phase: Phase| {
			world.drive(hand, channel, phase, &input).unwrap();
		};

		drive(&mut world, ControllerChannel::Select, Phase::Start);
		drive(&mut world, ControllerChannel::Select, Phase::End);
		assert_eq!(world.interactable(button).unwrap().holder(), Some(hand));

		world
			.host_mut()
			.set_local_rotation(hand, glam::Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2));
		drive(&mut world, ControllerChannel::Activate, Phase::Start);
		assert_eq!(world.interactable(ball).unwrap().holder(), Some(hand));
		drive(&mut world, ControllerChannel::Activate, Phase::End);
		drive(&mut world, ControllerChannel::Activate, Phase::Start);
		assert_eq!(world.interactable(ball).unwrap().holder(), None);
		assert_eq!(world.interactor(hand).unwrap().grab_state(), GrabState::End);

		let select = world.interactor(hand).unwrap().latch(Channel::Select);
		assert_eq!(select, ChannelLatch { target: Some(button), latched: true });

		world.host_mut().set_local_rotation(hand, glam::Quat::IDENTITY);
		drive(&mut world, ControllerChannel::Select, Phase::Start);
		assert_eq!(world.interactor(hand).unwrap().latch(Channel::Select), ChannelLatch::default());
		assert_eq!(world.interactable(button).unwrap().holder(), None);
	}
}
