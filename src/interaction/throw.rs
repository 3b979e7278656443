use glam::Vec3;
use lerp::Lerp;
use serde::{Deserialize, Serialize};

pub const HISTORY_LEN: usize = 20;

/// Weighting curve mapping a sample's freshness in `[0, 1]` to its weight.
pub trait SmoothingCurve {
	fn evaluate(&self, t: f32) -> f32;
}
impl<F: Fn(f32) -> f32> SmoothingCurve for F {
	fn evaluate(&self, t: f32) -> f32 {
		self(t)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
	pub time: f32,
	pub value: f32,
}

/// Piecewise linear curve through keyframes sorted by time. Outside the key
/// range the nearest key's value is held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeCurve {
	pub keys: Vec<Keyframe>,
}
impl Default for KeyframeCurve {
	fn default() -> Self {
		KeyframeCurve {
			keys: vec![
				Keyframe {
					time: 0.0,
					value: 0.0,
				},
				Keyframe {
					time: 1.0,
					value: 1.0,
				},
			],
		}
	}
}
impl SmoothingCurve for KeyframeCurve {
	fn evaluate(&self, t: f32) -> f32 {
		let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
			return 0.0;
		};
		if t <= first.time {
			return first.value;
		}
		if t >= last.time {
			return last.value;
		}
		for pair in self.keys.windows(2) {
			let (a, b) = (pair[0], pair[1]);
			if t <= b.time {
				let span = b.time - a.time;
				if span <= f32::EPSILON {
					return b.value;
				}
				return Lerp::lerp(a.value, b.value, (t - a.time) / span);
			}
		}
		last.value
	}
}

/// Ring of the most recent per-frame velocity samples of a held object.
///
/// Slots are overwritten cyclically; `filled` counts how many hold real data
/// so a sample taken at time zero is as valid as any other.
#[derive(Debug, Clone)]
pub struct VelocityHistory {
	times: [f64; HISTORY_LEN],
	linear: [Vec3; HISTORY_LEN],
	angular: [Vec3; HISTORY_LEN],
	cursor: usize,
	filled: usize,
}
impl Default for VelocityHistory {
	fn default() -> Self {
		VelocityHistory {
			times: [0.0; HISTORY_LEN],
			linear: [Vec3::ZERO; HISTORY_LEN],
			angular: [Vec3::ZERO; HISTORY_LEN],
			cursor: 0,
			filled: 0,
		}
	}
}
impl VelocityHistory {
	pub fn record(&mut self, time: f64, linear: Vec3, angular: Vec3) {
		self.times[self.cursor] = time;
		self.linear[self.cursor] = linear;
		self.angular[self.cursor] = angular;
		self.cursor = (self.cursor + 1) % HISTORY_LEN;
		self.filled = (self.filled + 1).min(HISTORY_LEN);
	}

	pub fn len(&self) -> usize {
		self.filled
	}
	pub fn is_empty(&self) -> bool {
		self.filled == 0
	}

	/// Recency weighted average of the recorded samples, returned as
	/// `(linear, angular)`. Samples older than `duration` seconds stop the walk.
	pub fn smoothed(&self, now: f64, duration: f32, curve: &dyn SmoothingCurve) -> (Vec3, Vec3) {
		if duration <= 0.0 {
			return self.latest().unwrap_or((Vec3::ZERO, Vec3::ZERO));
		}
		let mut linear_sum = Vec3::ZERO;
		let mut angular_sum = Vec3::ZERO;
		let mut total_weight = 0.0;
		for idx in self.newest_first() {
			let age = (now - self.times[idx]) as f32;
			let weight = curve.evaluate((1.0 - age / duration).clamp(0.0, 1.0));
			linear_sum += self.linear[idx] * weight;
			angular_sum += self.angular[idx] * weight;
			total_weight += weight;
			if age > duration {
				break;
			}
		}
		if total_weight > 0.0 {
			(linear_sum / total_weight, angular_sum / total_weight)
		} else {
			(Vec3::ZERO, Vec3::ZERO)
		}
	}

	fn latest(&self) -> Option<(Vec3, Vec3)> {
		let idx = self.newest_first().next()?;
		Some((self.linear[idx], self.angular[idx]))
	}
	fn newest_first(&self) -> impl Iterator<Item = usize> + '_ {
		(0..self.filled).map(|i| (self.cursor + HISTORY_LEN - 1 - i) % HISTORY_LEN)
	}
}
