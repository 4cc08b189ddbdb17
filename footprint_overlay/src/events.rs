//! Structured overlay events.
//!
//! Every failure the overlay swallows (a lost tile, a failed geocode, a map call
//! that was rejected) is still reported here, so a host UI can observe it
//! without parsing log output.

use arc_swap::ArcSwap;
use footprint_core::{TileCoord, TileRange};
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
	/// A rebuild started fetching the tiles of `range`.
	RebuildStarted { generation: u64, range: TileRange },

	/// A rebuild pushed its batch to the map.
	RebuildApplied {
		generation: u64,
		features: usize,
		failed_tiles: usize,
		/// `true` if source and layers were created, `false` on an in-place update.
		created: bool,
	},

	/// The viewport zoom is outside the overlay range; the overlay was left as is.
	RebuildSkipped { zoom: f64 },

	/// A batch arrived after a newer rebuild started or after deactivation and was discarded.
	RebuildSuperseded { generation: u64 },

	TileFailed { coord: TileCoord, message: String },

	/// Layers and source were removed from the map.
	OverlayRemoved,

	/// A click did not lead to an annotation.
	InteractionAborted { reason: String },

	GeocodeFailed { message: String },

	RouteFailed { message: String },

	/// The map rejected a source or layer operation.
	MapError { message: String },
}

/// Unique identifier for event listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type EventListener = Arc<dyn Fn(&OverlayEvent) + Send + Sync>;

/// Thread-safe event bus for overlay events
///
/// Listeners are called synchronously, in registration order, on the task that
/// emits the event. The listener list is swapped atomically, so emitting never
/// blocks on a subscription.
#[derive(Clone)]
pub struct EventBus {
	listeners: Arc<ArcSwap<Vec<(ListenerId, EventListener)>>>,
	next_id: Arc<AtomicUsize>,
}

impl EventBus {
	pub fn new() -> Self {
		Self {
			listeners: Arc::new(ArcSwap::from_pointee(Vec::new())),
			next_id: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// Register an event listener
	pub fn subscribe<F>(&self, listener: F) -> ListenerId
	where
		F: Fn(&OverlayEvent) + Send + Sync + 'static,
	{
		let listener: EventListener = Arc::new(listener);
		let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.listeners.rcu(|old| {
			let mut new = (**old).clone();
			new.push((id, listener.clone()));
			new
		});
		id
	}

	/// Removes a listener. Unknown ids are ignored.
	pub fn unsubscribe(&self, id: ListenerId) {
		self.listeners.rcu(|old| {
			old.iter()
				.filter(|(listener_id, _)| *listener_id != id)
				.cloned()
				.collect::<Vec<_>>()
		});
	}

	/// Emit an event to all listeners
	///
	/// If a listener panics, the panic is caught and other listeners continue.
	pub fn emit(&self, event: OverlayEvent) {
		let listeners = self.listeners.load();
		for (_, listener) in listeners.iter() {
			let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
				listener(&event);
			}));
		}
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.load().len()
	}

	/// Collects every emitted event, for tests and headless runs.
	pub fn record(&self) -> Arc<parking_lot::Mutex<Vec<OverlayEvent>>> {
		let events = Arc::new(parking_lot::Mutex::new(Vec::new()));
		let sink = events.clone();
		self.subscribe(move |event| sink.lock().push(event.clone()));
		events
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventBus")
			.field("listeners", &self.listener_count())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Mutex;

	#[test]
	fn subscribe_and_emit() {
		let bus = EventBus::new();
		let counter = Arc::new(Mutex::new(0));
		let c = counter.clone();
		bus.subscribe(move |event| {
			if matches!(event, OverlayEvent::OverlayRemoved) {
				*c.lock().unwrap() += 1;
			}
		});

		bus.emit(OverlayEvent::OverlayRemoved);
		bus.emit(OverlayEvent::RebuildSkipped { zoom: 3.0 });
		bus.emit(OverlayEvent::OverlayRemoved);
		assert_eq!(*counter.lock().unwrap(), 2);
	}

	#[test]
	fn unsubscribe() {
		let bus = EventBus::new();
		let first = bus.record();
		let id = bus.subscribe(|_| {});
		let second = bus.record();
		assert_eq!(bus.listener_count(), 3);

		bus.unsubscribe(id);
		bus.unsubscribe(id);
		assert_eq!(bus.listener_count(), 2);

		bus.emit(OverlayEvent::OverlayRemoved);
		assert_eq!(first.lock().len(), 1);
		assert_eq!(second.lock().len(), 1);
	}

	#[test]
	fn ids_are_unique_after_unsubscribe() {
		let bus = EventBus::new();
		let a = bus.subscribe(|_| {});
		bus.unsubscribe(a);
		let b = bus.subscribe(|_| {});
		assert_ne!(a, b);
	}

	#[test]
	fn panicking_listener_is_isolated() {
		let bus = EventBus::new();
		bus.subscribe(|_| panic!("listener failure"));
		let events = bus.record();

		bus.emit(OverlayEvent::GeocodeFailed {
			message: "timeout".to_string(),
		});
		assert_eq!(
			*events.lock(),
			vec![OverlayEvent::GeocodeFailed {
				message: "timeout".to_string()
			}]
		);
	}

	#[test]
	fn clones_share_listeners() {
		let bus = EventBus::default();
		let clone = bus.clone();
		let events = bus.record();
		clone.emit(OverlayEvent::OverlayRemoved);
		assert_eq!(events.lock().len(), 1);
	}
}
