use color_eyre::eyre::{eyre, Result};
use glam::Vec3;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xr_interaction::{
	device::ControllerSettings,
	input::{Hand, HandleInput, InputEvent},
	interaction::{ContactEvent, GrabSettings, InteractableSettings, InteractorSettings, ThrowSimulationMode},
	scene::{RigidBodies, SceneGraph},
	sim::{SimBody, SimScene},
	Interactable, InteractionWorld, Interactor,
};

const FRAME: f32 = 1.0 / 60.0;
const HAND_VELOCITY: Vec3 = Vec3::new(0.0, 1.5, -3.0);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.compact()
		.with_env_filter(EnvFilter::from_env("LOG_LEVEL"))
		.init();

	let mut world = InteractionWorld::new(SimScene::new());
	let hand = world.host_mut().spawn_at(Vec3::new(0.2, 1.2, 0.0));
	world.host_mut().add_sphere_collider(hand, 0.05);
	let ball = world.host_mut().spawn_at(Vec3::new(0.25, 1.2, 0.0));
	world.host_mut().add_sphere_collider(ball, 0.1);
	world.host_mut().add_rigid_body(ball, SimBody::default());

	world.add_interactable(Interactable::grab(
		ball,
		InteractableSettings::default(),
		GrabSettings {
			throw_simulation_mode: ThrowSimulationMode::CurveComputation,
			..Default::default()
		},
	));
	world.add_interactor(Interactor::direct(hand, InteractorSettings::default()));
	world.add_controller(
		hand,
		ControllerSettings {
			hand: Hand::Right,
			..Default::default()
		},
	);
	world.contact(hand, ContactEvent::Enter(ball))?;

	let grip = |value: f32| {
		InputEvent::Handle(HandleInput {
			grip_right: value,
			..Default::default()
		})
	};
	world.dispatch_input(&grip(1.0));
	info!(holder = ?world.interactable(ball).and_then(|i| i.holder()), "grabbed");

	let mut frames = tokio::time::interval(Duration::from_secs_f32(FRAME));
	let swing = async {
		for _ in 0..45 {
			frames.tick().await;
			let position = world
				.host()
				.world_position(hand)
				.ok_or_else(|| eyre!("hand is gone"))?;
			world
				.host_mut()
				.set_world_position(hand, position + HAND_VELOCITY * FRAME);
			world.update(FRAME);
			world.dispatch_input(&grip(1.0));
		}
		world.dispatch_input(&grip(0.0));
		Ok::<_, color_eyre::Report>(())
	};
	tokio::select! {
		_ = tokio::signal::ctrl_c() => return Ok(()),
		e = swing => e?,
	}

	info!(
		linear = ?world.host().linear_velocity(ball),
		angular = ?world.host().angular_velocity(ball),
		"thrown"
	);
	Ok(())
}
