use crate::{event::EventQueue, interaction::Targets, scene::Host};

/// Timing for one frame, handed to every `update`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInfo {
	/// Seconds since the previous frame.
	pub delta: f32,
	/// Seconds since the scheduler started.
	pub elapsed: f64,
}

/// What a component can touch while it runs.
pub struct InteractionContext<'a> {
	pub host: &'a mut dyn Host,
	pub targets: &'a Targets,
	pub queue: &'a mut EventQueue,
	/// Scheduler time in seconds, valid for event dispatch as well as updates.
	pub now: f64,
}

pub trait Lifecycle {
	fn on_enable(&mut self, _ctx: &mut InteractionContext) {}
	/// Called once per frame while enabled.
	fn update(&mut self, _ctx: &mut InteractionContext, _info: &FrameInfo) {}
	/// Must unwind anything the component holds on to.
	fn on_disable(&mut self, _ctx: &mut InteractionContext) {}
}

/// A component plus its enabled flag. Enable/disable transitions run the
/// matching lifecycle hook exactly once.
pub struct Scheduled<C> {
	component: C,
	enabled: bool,
}
impl<C: Lifecycle> Scheduled<C> {
	pub fn new(component: C) -> Self {
		Scheduled {
			component,
			enabled: false,
		}
	}
	pub fn set_enabled(&mut self, enabled: bool, ctx: &mut InteractionContext) {
		if enabled == self.enabled {
			return;
		}
		self.enabled = enabled;
		if enabled {
			self.component.on_enable(ctx);
		} else {
			self.component.on_disable(ctx);
		}
	}
	pub fn update(&mut self, ctx: &mut InteractionContext, info: &FrameInfo) {
		if self.enabled {
			self.component.update(ctx, info);
		}
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}
	pub fn get(&self) -> &C {
		&self.component
	}
	/// Mutable access if the component is currently enabled.
	pub fn active_mut(&mut self) -> Option<&mut C> {
		self.enabled.then_some(&mut self.component)
	}
	pub fn get_mut(&mut self) -> &mut C {
		&mut self.component
	}
}
