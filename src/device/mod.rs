mod controller;
pub use controller::*;
mod pose_tracker;
pub use pose_tracker::*;
mod tracking_origin;
pub use tracking_origin::*;
