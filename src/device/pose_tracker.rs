use crate::scene::{Host, NodeId};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
	pub position: Vec3,
	pub orientation: Quat,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HmdPoseInput {
	pub view_left: Pose,
	pub view_right: Pose,
	pub head_middle: Pose,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandPoseInput {
	pub aim_left: Pose,
	pub aim_right: Pose,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PoseEvent {
	Hmd(HmdPoseInput),
	Hand(HandPoseInput),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingSource {
	ViewLeft,
	ViewRight,
	Hmd,
	#[default]
	HandLeft,
	HandRight,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingType {
	#[default]
	PositionAndRotation,
	Position,
	Rotation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseTrackerSettings {
	pub source: TrackingSource,
	pub tracking_type: TrackingType,
}

/// Copies a tracked device pose onto a node's local transform.
#[derive(Debug)]
pub struct PoseTracker {
	pub node: NodeId,
	pub settings: PoseTrackerSettings,
}
impl PoseTracker {
	pub fn new(node: NodeId, settings: PoseTrackerSettings) -> Self {
		PoseTracker { node, settings }
	}

	/// Pose for this tracker's source, or `None` if the event is for another device.
	pub fn select(&self, event: &PoseEvent) -> Option<Pose> {
		match (event, self.settings.source) {
			(PoseEvent::Hmd(hmd), TrackingSource::ViewLeft) => Some(hmd.view_left),
			(PoseEvent::Hmd(hmd), TrackingSource::ViewRight) => Some(hmd.view_right),
			(PoseEvent::Hmd(hmd), TrackingSource::Hmd) => Some(hmd.head_middle),
			(PoseEvent::Hand(hand), TrackingSource::HandLeft) => Some(hand.aim_left),
			(PoseEvent::Hand(hand), TrackingSource::HandRight) => Some(hand.aim_right),
			_ => None,
		}
	}

	pub fn apply(&self, host: &mut dyn Host, event: &PoseEvent) {
		let Some(pose) = self.select(event) else {
			return;
		};
		let (position, rotation) = match self.settings.tracking_type {
			TrackingType::PositionAndRotation => (pose.position, pose.orientation),
			TrackingType::Position => (pose.position, Quat::IDENTITY),
			TrackingType::Rotation => (Vec3::ZERO, pose.orientation),
		};
		host.set_local_position(self.node, position);
		host.set_local_rotation(self.node, rotation);
	}
}
