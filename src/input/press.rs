use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
	Start,
	Stay,
	End,
}

/// Edge detector turning an analog value into start/acting/stopped flags.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PressTracker {
	started: bool,
	acting: bool,
	stopped: bool,
}
impl PressTracker {
	/// Feed the latest value. Pressed means strictly above `threshold`.
	pub fn update(&mut self, value: f32, threshold: f32) {
		let pressed = value > threshold;
		self.started = pressed && !self.acting;
		self.stopped = !pressed && self.acting;
		self.acting = pressed;
	}
	/// Drop any held press without reporting a stop.
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	pub fn started(&self) -> bool {
		self.started
	}
	pub fn acting(&self) -> bool {
		self.acting
	}
	pub fn stopped(&self) -> bool {
		self.stopped
	}

	pub fn phase(&self) -> Option<Phase> {
		if self.started {
			Some(Phase::Start)
		} else if self.stopped {
			Some(Phase::End)
		} else if self.acting {
			Some(Phase::Stay)
		} else {
			None
		}
	}
}
