//! Keeps the building overlay of a map in sync with its viewport.
//!
//! The controller is either inactive or active. Activating it rebuilds the
//! overlay once and subscribes to `moveend`; every later viewport change inside
//! the configured zoom window triggers another rebuild. Outside the window the
//! last overlay stays visible as it is. Deactivating unsubscribes and removes
//! both layers and the source.
//!
//! A rebuild fetches the tiles covering the viewport and then either creates
//! the source and the two layers or replaces the source data in place. Every
//! rebuild takes a new generation number, and a batch is only applied if no
//! newer rebuild was started (and the overlay was not deactivated) while it was
//! being fetched.

use super::{ExtrusionStyle, FeatureInteractionHandler, LabelStyle};
use crate::{
	BuildingTileFetcher, EventBus, MapEvent, MapEventKind, MapHandle, OverlayEvent,
	map::{LayerKind, LayerSpec, SourceData, Subscription},
	services::{NominatimGeocoder, ReverseGeocoder},
	tiles::HttpTileReader,
};
use anyhow::Result;
use footprint_core::{GeoBBox, TileRange, config::OverlayConfig, io::HttpClient};
use footprint_geometry::GeoCollection;
use parking_lot::Mutex;
use std::sync::{
	Arc,
	atomic::{AtomicU64, Ordering},
};

/// What a rebuild request led to.
#[derive(Debug, Clone, PartialEq)]
pub enum RebuildOutcome {
	Applied {
		generation: u64,
		features: usize,
		failed_tiles: usize,
		/// `true` if the source had to be created.
		created: bool,
	},
	/// Zoom outside the overlay window, nothing was touched.
	Skipped { zoom: f64 },
	/// A newer rebuild or a deactivation overtook this one; its batch was dropped.
	Superseded { generation: u64 },
	/// The overlay is not active.
	Inactive,
	/// The map rejected the update.
	Failed { message: String },
}

#[derive(Default)]
struct OverlayState {
	active: bool,
	collection: GeoCollection,
	/// Click subscription of a freshly created extrusion layer, picked up by `next_event`.
	pending_clicks: Option<Subscription>,
}

pub struct BuildingOverlayController {
	map: Arc<dyn MapHandle>,
	config: Arc<OverlayConfig>,
	fetcher: BuildingTileFetcher,
	interaction: FeatureInteractionHandler,
	events: EventBus,
	generation: AtomicU64,
	state: Mutex<OverlayState>,
	move_end: Option<Subscription>,
	clicks: Option<Subscription>,
}

impl BuildingOverlayController {
	pub fn new(
		map: Arc<dyn MapHandle>,
		config: Arc<OverlayConfig>,
		fetcher: BuildingTileFetcher,
		geocoder: Arc<dyn ReverseGeocoder>,
		events: EventBus,
	) -> Self {
		let interaction = FeatureInteractionHandler::new(map.clone(), geocoder, events.clone());
		Self {
			map,
			config,
			fetcher,
			interaction,
			events,
			generation: AtomicU64::new(0),
			state: Mutex::new(OverlayState::default()),
			move_end: None,
			clicks: None,
		}
	}

	/// Controller talking to the HTTP endpoints of `config`.
	pub fn from_config(map: Arc<dyn MapHandle>, config: Arc<OverlayConfig>) -> Result<Self> {
		let client = HttpClient::new(config.fetch.timeout())?;
		let reader = HttpTileReader::new(client.clone(), config.endpoints.clone());
		let fetcher = BuildingTileFetcher::new(Arc::new(reader), &config.fetch);
		let geocoder = NominatimGeocoder::new(client, config.endpoints.clone());
		Ok(Self::new(map, config, fetcher, Arc::new(geocoder), EventBus::new()))
	}

	pub fn events(&self) -> &EventBus {
		&self.events
	}

	pub fn is_active(&self) -> bool {
		self.state.lock().active
	}

	/// The collection of the last applied rebuild.
	pub fn collection(&self) -> GeoCollection {
		self.state.lock().collection.clone()
	}

	/// Generation of the most recently started rebuild.
	pub fn generation(&self) -> u64 {
		self.generation.load(Ordering::SeqCst)
	}

	pub async fn set_active(&mut self, active: bool) -> RebuildOutcome {
		if active {
			self.activate().await
		} else {
			self.deactivate();
			RebuildOutcome::Inactive
		}
	}

	/// Rebuilds the overlay and starts following the viewport.
	/// On an already active overlay this is a plain [`Self::refresh`].
	pub async fn activate(&mut self) -> RebuildOutcome {
		if self.state.lock().active {
			return self.refresh().await;
		}
		log::info!("activate building overlay");
		self.state.get_mut().active = true;
		let outcome = self.refresh().await;
		self.move_end = Some(self.map.subscribe(MapEventKind::MoveEnd));
		outcome
	}

	/// Stops following the viewport and removes layers and source.
	/// Rebuilds still in flight are discarded.
	pub fn deactivate(&mut self) {
		let state = self.state.get_mut();
		let was_active = std::mem::replace(&mut state.active, false);
		state.collection = GeoCollection::new();
		let pending = state.pending_clicks.take();
		self.generation.fetch_add(1, Ordering::SeqCst);

		for subscription in self.move_end.take().into_iter().chain(self.clicks.take()).chain(pending) {
			self.map.unsubscribe(subscription.id());
		}

		if let Err(err) = self.remove_overlay() {
			log::warn!("failed to remove building overlay: {err}");
			self.events.emit(OverlayEvent::MapError {
				message: err.to_string(),
			});
		}

		if was_active {
			log::info!("deactivate building overlay");
			self.events.emit(OverlayEvent::OverlayRemoved);
		}
	}

	fn remove_overlay(&self) -> Result<()> {
		let layers = &self.config.layers;
		for id in [&layers.labels, &layers.buildings] {
			if self.map.has_layer(id) {
				self.map.remove_layer(id)?;
			}
		}
		if self.map.has_source(&layers.buildings) {
			self.map.remove_source(&layers.buildings)?;
		}
		Ok(())
	}

	/// Rebuilds the overlay for the current viewport if the zoom allows it.
	pub async fn refresh(&self) -> RebuildOutcome {
		if !self.is_active() {
			return RebuildOutcome::Inactive;
		}
		let zoom = self.map.zoom();
		let Some(level) = self.config.zoom.level_for(zoom) else {
			log::debug!("zoom {zoom} outside overlay range, keeping overlay as is");
			self.events.emit(OverlayEvent::RebuildSkipped { zoom });
			return RebuildOutcome::Skipped { zoom };
		};
		let bounds = self.map.bounds();
		self.rebuild_at(level, &bounds).await
	}

	/// Fetches the tiles of `bounds` at `level` and pushes them to the map.
	pub async fn rebuild_at(&self, level: u8, bounds: &GeoBBox) -> RebuildOutcome {
		if !self.is_active() {
			return RebuildOutcome::Inactive;
		}
		let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
		let range = TileRange::from_geo(level, bounds);
		log::info!("rebuild #{generation}: {range} ({} tiles)", range.count_tiles());
		self.events.emit(OverlayEvent::RebuildStarted { generation, range });

		let batch = self.fetcher.fetch_tiles_with_report(&range).await;
		for failure in &batch.failures {
			self.events.emit(OverlayEvent::TileFailed {
				coord: failure.coord,
				message: failure.source.to_string(),
			});
		}
		let features = batch.collection.len();
		let failed_tiles = batch.failures.len();

		let mut state = self.state.lock();
		if !state.active || self.generation.load(Ordering::SeqCst) != generation {
			drop(state);
			log::debug!("rebuild #{generation} superseded, dropping {features} features");
			self.events.emit(OverlayEvent::RebuildSuperseded { generation });
			return RebuildOutcome::Superseded { generation };
		}

		let result = self.apply(&mut state, &batch.collection);
		if result.is_ok() {
			state.collection = batch.collection;
		}
		drop(state);

		match result {
			Ok(created) => {
				log::info!("rebuild #{generation}: {features} features, {failed_tiles} tiles failed");
				self.events.emit(OverlayEvent::RebuildApplied {
					generation,
					features,
					failed_tiles,
					created,
				});
				RebuildOutcome::Applied {
					generation,
					features,
					failed_tiles,
					created,
				}
			}
			Err(err) => {
				log::warn!("rebuild #{generation}: {err}");
				let message = err.to_string();
				self.events.emit(OverlayEvent::MapError {
					message: message.clone(),
				});
				RebuildOutcome::Failed { message }
			}
		}
	}

	/// Creates or updates source and layers; returns `true` if the source was created.
	fn apply(&self, state: &mut OverlayState, collection: &GeoCollection) -> Result<bool> {
		let layers = &self.config.layers;
		let data = SourceData::Collection(collection.clone());
		let created = !self.map.has_source(&layers.buildings);
		if created {
			self.map.add_source(&layers.buildings, data)?;
		} else {
			self.map.update_source(&layers.buildings, data)?;
		}

		if !self.map.has_layer(&layers.buildings) {
			self.map.add_layer(LayerSpec::new(
				&layers.buildings,
				&layers.buildings,
				LayerKind::FillExtrusion(ExtrusionStyle::default()),
			))?;
			state.pending_clicks = Some(self.map.subscribe(MapEventKind::Click {
				layer: layers.buildings.clone(),
			}));
		}

		if !self.map.has_layer(&layers.labels) {
			self.map.add_layer(LayerSpec::new(
				&layers.labels,
				&layers.buildings,
				LayerKind::Symbol(LabelStyle::default()),
			))?;
		}
		Ok(created)
	}

	/// Waits for the next viewport change or building click.
	/// Returns `None` once there is nothing left to listen to.
	pub async fn next_event(&mut self) -> Option<MapEvent> {
		loop {
			if let Some(clicks) = self.state.get_mut().pending_clicks.take() {
				self.clicks = Some(clicks);
			}
			if self.move_end.is_none() && self.clicks.is_none() {
				return None;
			}

			let (from_clicks, event) = tokio::select! {
				event = recv(&mut self.move_end) => (false, event),
				event = recv(&mut self.clicks) => (true, event),
			};
			match event {
				Some(event) => return Some(event),
				None if from_clicks => self.clicks = None,
				None => self.move_end = None,
			}
		}
	}

	pub async fn handle_event(&self, event: MapEvent) {
		match event {
			MapEvent::MoveEnd => {
				self.refresh().await;
			}
			MapEvent::Click { layer, features, .. } if layer == self.config.layers.buildings => {
				self.interaction.handle_click(&features).await;
			}
			other => log::trace!("ignore map event {other:?}"),
		}
	}

	/// Handles map events until the map closes every subscription.
	pub async fn run(&mut self) {
		while let Some(event) = self.next_event().await {
			self.handle_event(event).await;
		}
	}
}

async fn recv(subscription: &mut Option<Subscription>) -> Option<MapEvent> {
	match subscription {
		Some(subscription) => subscription.recv().await,
		None => std::future::pending().await,
	}
}

impl Drop for BuildingOverlayController {
	fn drop(&mut self) {
		if self.state.get_mut().active {
			self.deactivate();
		}
	}
}

#[cfg(test)]
mod tests;
