pub mod device;
mod error;
pub mod event;
pub mod input;
pub mod interaction;
pub mod lifecycle;
pub mod listeners;
pub mod locomotion;
pub mod scene;
pub mod sim;
mod world;

pub use error::*;
pub use event::{EventHandle, InteractionEvent};
pub use interaction::{Interactable, Interactor};
pub use scene::{Host, NodeId};
pub use world::*;
