//! An in-process map engine.
//!
//! `MemoryMap` keeps an ordered source and layer registry, the popups that were
//! opened and a few counters. It behaves like a real engine where the overlay
//! can observe it: duplicate ids are rejected, a source that is still used by
//! a layer cannot be removed, and removing a layer closes the click
//! subscriptions bound to it. Tests and headless CLI runs drive it through
//! [`MemoryMap::set_view`], [`MemoryMap::fire`] and [`MemoryMap::click`].

use super::{LayerSpec, MapEvent, MapEventKind, MapHandle, SourceData, Subscription, SubscriptionId};
use crate::overlay::Annotation;
use anyhow::{Result, bail};
use footprint_core::GeoBBox;
use footprint_geometry::{Coordinates, GeoFeature};
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;

/// Counters of registry mutations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryMapStats {
	pub source_adds: usize,
	pub source_updates: usize,
	pub source_removes: usize,
	pub layer_adds: usize,
	pub layer_removes: usize,
}

struct Listener {
	id: SubscriptionId,
	kind: MapEventKind,
	sender: UnboundedSender<MapEvent>,
}

struct MemoryMapState {
	zoom: f64,
	bounds: GeoBBox,
	sources: Vec<(String, SourceData)>,
	layers: Vec<LayerSpec>,
	listeners: Vec<Listener>,
	popups: Vec<Annotation>,
	stats: MemoryMapStats,
	next_subscription: u64,
}

pub struct MemoryMap {
	state: Mutex<MemoryMapState>,
}

impl MemoryMap {
	pub fn new(zoom: f64, bounds: GeoBBox) -> Self {
		Self {
			state: Mutex::new(MemoryMapState {
				zoom,
				bounds,
				sources: Vec::new(),
				layers: Vec::new(),
				listeners: Vec::new(),
				popups: Vec::new(),
				stats: MemoryMapStats::default(),
				next_subscription: 0,
			}),
		}
	}

	/// Moves the viewport without notifying anyone; see [`Self::move_to`].
	pub fn set_view(&self, zoom: f64, bounds: GeoBBox) {
		let mut state = self.state.lock();
		state.zoom = zoom;
		state.bounds = bounds;
	}

	/// Moves the viewport and fires `moveend`.
	pub fn move_to(&self, zoom: f64, bounds: GeoBBox) -> usize {
		self.set_view(zoom, bounds);
		self.fire(&MapEvent::MoveEnd)
	}

	/// Delivers `event` to every matching subscription and returns how many received it.
	pub fn fire(&self, event: &MapEvent) -> usize {
		let kind = event.kind();
		let mut state = self.state.lock();
		state.listeners.retain(|listener| !listener.sender.is_closed());
		state
			.listeners
			.iter()
			.filter(|listener| listener.kind == kind)
			.filter(|listener| listener.sender.send(event.clone()).is_ok())
			.count()
	}

	/// Clicks `features` of `layer` at `lng_lat`. Nothing happens if the layer is not rendered.
	pub fn click(&self, layer: &str, lng_lat: Coordinates, features: Vec<GeoFeature>) -> usize {
		if !self.has_layer(layer) {
			return 0;
		}
		self.fire(&MapEvent::Click {
			layer: layer.to_string(),
			lng_lat,
			features,
		})
	}

	pub fn source_ids(&self) -> Vec<String> {
		self.state.lock().sources.iter().map(|(id, _)| id.clone()).collect()
	}

	pub fn layer_ids(&self) -> Vec<String> {
		self.state.lock().layers.iter().map(|layer| layer.id.clone()).collect()
	}

	pub fn source(&self, id: &str) -> Option<SourceData> {
		let state = self.state.lock();
		state.sources.iter().find(|(source_id, _)| source_id == id).map(|(_, data)| data.clone())
	}

	pub fn layer(&self, id: &str) -> Option<LayerSpec> {
		self.state.lock().layers.iter().find(|layer| layer.id == id).cloned()
	}

	pub fn popups(&self) -> Vec<Annotation> {
		self.state.lock().popups.clone()
	}

	pub fn stats(&self) -> MemoryMapStats {
		self.state.lock().stats
	}

	/// Number of open subscriptions of `kind`.
	pub fn subscriber_count(&self, kind: &MapEventKind) -> usize {
		let state = self.state.lock();
		state
			.listeners
			.iter()
			.filter(|listener| &listener.kind == kind && !listener.sender.is_closed())
			.count()
	}
}

impl MapHandle for MemoryMap {
	fn zoom(&self) -> f64 {
		self.state.lock().zoom
	}

	fn bounds(&self) -> GeoBBox {
		self.state.lock().bounds
	}

	fn has_source(&self, id: &str) -> bool {
		self.state.lock().sources.iter().any(|(source_id, _)| source_id == id)
	}

	fn add_source(&self, id: &str, data: SourceData) -> Result<()> {
		let mut state = self.state.lock();
		if state.sources.iter().any(|(source_id, _)| source_id == id) {
			bail!("source '{id}' already exists");
		}
		state.sources.push((id.to_string(), data));
		state.stats.source_adds += 1;
		Ok(())
	}

	fn update_source(&self, id: &str, data: SourceData) -> Result<()> {
		let mut state = self.state.lock();
		let Some(entry) = state.sources.iter_mut().find(|(source_id, _)| source_id == id) else {
			bail!("source '{id}' does not exist");
		};
		entry.1 = data;
		state.stats.source_updates += 1;
		Ok(())
	}

	fn remove_source(&self, id: &str) -> Result<()> {
		let mut state = self.state.lock();
		if let Some(layer) = state.layers.iter().find(|layer| layer.source == id) {
			bail!("source '{id}' is still used by layer '{}'", layer.id);
		}
		let before = state.sources.len();
		state.sources.retain(|(source_id, _)| source_id != id);
		if state.sources.len() == before {
			bail!("source '{id}' does not exist");
		}
		state.stats.source_removes += 1;
		Ok(())
	}

	fn has_layer(&self, id: &str) -> bool {
		self.state.lock().layers.iter().any(|layer| layer.id == id)
	}

	fn add_layer(&self, layer: LayerSpec) -> Result<()> {
		let mut state = self.state.lock();
		if state.layers.iter().any(|l| l.id == layer.id) {
			bail!("layer '{}' already exists", layer.id);
		}
		if !state.sources.iter().any(|(source_id, _)| *source_id == layer.source) {
			bail!("source '{}' of layer '{}' does not exist", layer.source, layer.id);
		}
		state.layers.push(layer);
		state.stats.layer_adds += 1;
		Ok(())
	}

	fn remove_layer(&self, id: &str) -> Result<()> {
		let mut state = self.state.lock();
		let before = state.layers.len();
		state.layers.retain(|layer| layer.id != id);
		if state.layers.len() == before {
			bail!("layer '{id}' does not exist");
		}
		state
			.listeners
			.retain(|listener| !matches!(&listener.kind, MapEventKind::Click { layer } if layer == id));
		state.stats.layer_removes += 1;
		Ok(())
	}

	fn subscribe(&self, kind: MapEventKind) -> Subscription {
		let mut state = self.state.lock();
		state.next_subscription += 1;
		let id = SubscriptionId(state.next_subscription);
		let (sender, subscription) = Subscription::channel(id);
		state.listeners.push(Listener { id, kind, sender });
		subscription
	}

	fn unsubscribe(&self, id: SubscriptionId) {
		self.state.lock().listeners.retain(|listener| listener.id != id);
	}

	fn show_popup(&self, annotation: Annotation) {
		log::debug!("popup at {:?}: {}", annotation.position, annotation.title);
		self.state.lock().popups.push(annotation);
	}
}
