//! User-facing callbacks for interaction events, plus the audio cues an
//! interactor can play on hover/select edges.

use crate::event::{EventHandle, InteractionEvent};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type EventCallback = Box<dyn FnMut(&EventHandle)>;

#[derive(Default)]
struct CallbackTable(FxHashMap<InteractionEvent, Vec<EventCallback>>);
impl CallbackTable {
	fn push(&mut self, event: InteractionEvent, callback: EventCallback) {
		self.0.entry(event).or_default().push(callback);
	}
	fn emit(&mut self, event: InteractionEvent, handle: &EventHandle) {
		let Some(callbacks) = self.0.get_mut(&event) else {
			return;
		};
		for callback in callbacks {
			callback(handle);
		}
	}
	fn len(&self, event: InteractionEvent) -> usize {
		self.0.get(&event).map_or(0, Vec::len)
	}
}
impl fmt::Debug for CallbackTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map()
			.entries(self.0.iter().map(|(k, v)| (k, v.len())))
			.finish()
	}
}

/// Callbacks fired when an interactable's node receives an event.
#[derive(Debug, Default)]
pub struct InteractableEvents(CallbackTable);
impl InteractableEvents {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn on<F>(mut self, event: InteractionEvent, callback: F) -> Self
	where
		F: FnMut(&EventHandle) + 'static,
	{
		self.0.push(event, Box::new(callback));
		self
	}
	pub fn emit(&mut self, event: InteractionEvent, handle: &EventHandle) {
		self.0.emit(event, handle)
	}
	pub fn listener_count(&self, event: InteractionEvent) -> usize {
		self.0.len(event)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioClip(pub String);

/// Audio playback collaborator.
pub trait AudioPlayer {
	fn play(&mut self, clip: &AudioClip);
}

/// Which clip, if any, to play on each interactor edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioEvents {
	pub select_entered: Option<AudioClip>,
	pub select_stay: Option<AudioClip>,
	pub select_exited: Option<AudioClip>,
	pub hover_entered: Option<AudioClip>,
	pub hover_stay: Option<AudioClip>,
	pub hover_exited: Option<AudioClip>,
}
impl AudioEvents {
	fn clip(&self, event: InteractionEvent) -> Option<&AudioClip> {
		match event {
			InteractionEvent::SelectEntered => self.select_entered.as_ref(),
			InteractionEvent::SelectStay => self.select_stay.as_ref(),
			InteractionEvent::SelectExited => self.select_exited.as_ref(),
			InteractionEvent::HoverEntered => self.hover_entered.as_ref(),
			InteractionEvent::HoverStay => self.hover_stay.as_ref(),
			InteractionEvent::HoverExited => self.hover_exited.as_ref(),
			_ => None,
		}
	}
}

/// Interactor-side hover and select callbacks.
#[derive(Default)]
pub struct InteractorEvents {
	pub audio: AudioEvents,
	player: Option<Box<dyn AudioPlayer>>,
	callbacks: CallbackTable,
}
impl InteractorEvents {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn with_audio(mut self, audio: AudioEvents, player: impl AudioPlayer + 'static) -> Self {
		self.audio = audio;
		self.player = Some(Box::new(player));
		self
	}
	pub fn on<F>(mut self, event: InteractionEvent, callback: F) -> Self
	where
		F: FnMut(&EventHandle) + 'static,
	{
		self.callbacks.push(event, Box::new(callback));
		self
	}

	pub fn emit(&mut self, event: InteractionEvent, handle: &EventHandle) {
		self.callbacks.emit(event, handle);
		if let (Some(player), Some(clip)) = (&mut self.player, self.audio.clip(event)) {
			player.play(clip);
		}
	}
}
impl fmt::Debug for InteractorEvents {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InteractorEvents")
			.field("audio", &self.audio)
			.field("callbacks", &self.callbacks)
			.finish()
	}
}
