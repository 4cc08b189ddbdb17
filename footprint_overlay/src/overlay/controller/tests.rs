use super::*;
use crate::{
	GeocodeLookupError, MemoryMap,
	tiles::mock::{MockTileReader, building},
};
use async_trait::async_trait;
use footprint_core::{TileCoord, config::FetchConfig};
use footprint_geometry::Coordinates;
use pretty_assertions::assert_eq;
use std::time::Duration;

struct FixedGeocoder;

#[async_trait]
impl ReverseGeocoder for FixedGeocoder {
	async fn reverse(&self, lon: f64, lat: f64) -> Result<String, GeocodeLookupError> {
		Ok(format!("{lon:.1}, {lat:.1}"))
	}
}

/// Covers the single z15 tile 16384/16383 (z16: 32768/32767).
fn west_view() -> GeoBBox {
	GeoBBox::new(0.001, 0.001, 0.002, 0.002).unwrap()
}

/// Covers the single z15 tile 16385/16383.
fn east_view() -> GeoBBox {
	GeoBBox::new(0.02, 0.001, 0.021, 0.002).unwrap()
}

fn west_tile() -> TileCoord {
	TileCoord::new(15, 16384, 16383)
}

fn east_tile() -> TileCoord {
	TileCoord::new(15, 16385, 16383)
}

fn reader() -> MockTileReader {
	MockTileReader::new()
		.with_tile(west_tile(), vec![building(1, 0.0, 0.0, "west")])
		.with_tile(
			east_tile(),
			vec![building(2, 1.0, 0.0, "east a"), building(3, 2.0, 0.0, "east b")],
		)
		.with_tile(TileCoord::new(16, 32768, 32767), vec![building(4, 3.0, 0.0, "west z16")])
}

struct Setup {
	map: Arc<MemoryMap>,
	reader: Arc<MockTileReader>,
	controller: BuildingOverlayController,
	events: Arc<parking_lot::Mutex<Vec<OverlayEvent>>>,
}

fn setup_with(reader: MockTileReader, zoom: f64, bounds: GeoBBox) -> Setup {
	let map = Arc::new(MemoryMap::new(zoom, bounds));
	let reader = Arc::new(reader);
	let config = OverlayConfig::default().arc();
	let fetcher = BuildingTileFetcher::new(reader.clone(), &FetchConfig::default());
	let controller = BuildingOverlayController::new(map.clone(), config, fetcher, Arc::new(FixedGeocoder), EventBus::new());
	let events = controller.events().record();
	Setup {
		map,
		reader,
		controller,
		events,
	}
}

fn setup() -> Setup {
	setup_with(reader(), 15.5, west_view())
}

fn names(collection: &GeoCollection) -> Vec<String> {
	collection
		.iter()
		.map(|f| f.properties.name.clone().unwrap_or_default())
		.collect()
}

fn source_names(map: &MemoryMap) -> Vec<String> {
	match map.source("osmbuildings") {
		Some(SourceData::Collection(collection)) => names(&collection),
		other => panic!("unexpected source {other:?}"),
	}
}

#[tokio::test]
async fn activation_creates_source_and_layers() {
	let mut s = setup();
	assert_eq!(s.controller.refresh().await, RebuildOutcome::Inactive);
	assert!(s.map.layer_ids().is_empty());

	let outcome = s.controller.activate().await;
	assert_eq!(
		outcome,
		RebuildOutcome::Applied {
			generation: 1,
			features: 1,
			failed_tiles: 0,
			created: true
		}
	);
	assert!(s.controller.is_active());
	assert_eq!(s.map.source_ids(), vec!["osmbuildings"]);
	assert_eq!(s.map.layer_ids(), vec!["osmbuildings", "osmbuildingslabels"]);
	assert_eq!(source_names(&s.map), vec!["west"]);
	assert_eq!(names(&s.controller.collection()), vec!["west"]);
	assert_eq!(s.map.subscriber_count(&MapEventKind::MoveEnd), 1);

	let labels = s.map.layer("osmbuildingslabels").unwrap();
	assert_eq!(labels.source, "osmbuildings");
	assert_eq!(labels.kind, LayerKind::Symbol(LabelStyle::default()));
	assert_eq!(
		s.map.layer("osmbuildings").unwrap().kind,
		LayerKind::FillExtrusion(ExtrusionStyle::default())
	);
}

#[tokio::test]
async fn repeated_rebuilds_update_in_place() {
	let mut s = setup();
	s.controller.activate().await;
	for _ in 0..3 {
		let outcome = s.controller.refresh().await;
		assert!(matches!(outcome, RebuildOutcome::Applied { created: false, .. }), "{outcome:?}");
	}
	// activating an active overlay only refreshes it
	s.controller.activate().await;

	assert_eq!(s.map.layer_ids(), vec!["osmbuildings", "osmbuildingslabels"]);
	assert_eq!(s.map.source_ids(), vec!["osmbuildings"]);
	let stats = s.map.stats();
	assert_eq!(stats.source_adds, 1);
	assert_eq!(stats.source_updates, 4);
	assert_eq!(stats.layer_adds, 2);
	assert_eq!(s.map.subscriber_count(&MapEventKind::MoveEnd), 1);
	assert!(
		!s.events
			.lock()
			.iter()
			.any(|event| matches!(event, OverlayEvent::MapError { .. }))
	);
}

#[tokio::test]
async fn deactivate_and_reactivate() {
	let mut s = setup();
	s.controller.activate().await;
	s.controller.deactivate();

	assert!(!s.controller.is_active());
	assert!(s.map.layer_ids().is_empty());
	assert!(s.map.source_ids().is_empty());
	assert!(s.controller.collection().is_empty());
	assert_eq!(s.map.subscriber_count(&MapEventKind::MoveEnd), 0);
	assert_eq!(
		s.map.subscriber_count(&MapEventKind::Click {
			layer: "osmbuildings".to_string()
		}),
		0
	);
	assert_eq!(s.events.lock().last(), Some(&OverlayEvent::OverlayRemoved));

	// removal is idempotent
	s.controller.deactivate();
	assert_eq!(
		s.events
			.lock()
			.iter()
			.filter(|event| **event == OverlayEvent::OverlayRemoved)
			.count(),
		1
	);

	let outcome = s.controller.set_active(true).await;
	assert!(matches!(outcome, RebuildOutcome::Applied { created: true, .. }), "{outcome:?}");
	assert_eq!(s.map.layer_ids(), vec!["osmbuildings", "osmbuildingslabels"]);
	assert_eq!(s.map.stats().layer_adds, 4);

	assert_eq!(s.controller.set_active(false).await, RebuildOutcome::Inactive);
	assert!(s.map.layer_ids().is_empty());
}

#[tokio::test]
async fn zoom_outside_window_keeps_overlay() {
	let mut s = setup();
	s.controller.activate().await;
	let requests = s.reader.requests().len();

	for zoom in [14.99, 17.0, 3.0] {
		s.map.set_view(zoom, east_view());
		assert_eq!(s.controller.refresh().await, RebuildOutcome::Skipped { zoom });
	}

	assert_eq!(s.reader.requests().len(), requests);
	assert_eq!(source_names(&s.map), vec!["west"]);
	assert_eq!(s.map.stats().source_updates, 0);
	assert!(
		s.events
			.lock()
			.contains(&OverlayEvent::RebuildSkipped { zoom: 17.0 })
	);
}

#[tokio::test]
async fn zoom_level_is_floored() {
	let mut s = setup_with(reader(), 16.7, west_view());
	s.controller.activate().await;
	assert_eq!(source_names(&s.map), vec!["west z16"]);
	assert_eq!(s.reader.requests(), vec![TileCoord::new(16, 32768, 32767)]);
}

#[tokio::test]
async fn failed_tiles_are_reported() {
	let reader = reader().with_failure(west_tile(), 500);
	let bounds = GeoBBox::new(0.001, 0.001, 0.021, 0.002).unwrap();
	let mut s = setup_with(reader, 15.0, bounds);

	let outcome = s.controller.activate().await;
	assert_eq!(
		outcome,
		RebuildOutcome::Applied {
			generation: 1,
			features: 2,
			failed_tiles: 1,
			created: true
		}
	);
	assert_eq!(source_names(&s.map), vec!["east a", "east b"]);
	let events = s.events.lock();
	assert!(matches!(
		&events[0],
		OverlayEvent::RebuildStarted { generation: 1, range } if range.as_tuple() == (16384, 16385, 16383, 16383)
	));
	assert!(matches!(
		&events[1],
		OverlayEvent::TileFailed { coord, message } if *coord == west_tile() && message.contains("HTTP 500")
	));
}

#[tokio::test(start_paused = true)]
async fn stale_batch_is_discarded() {
	let reader = reader().with_delay(west_tile(), Duration::from_secs(10));
	let mut s = setup_with(reader, 15.0, west_view());
	s.controller.activate().await;
	assert_eq!(source_names(&s.map), vec!["west"]);

	// the slow west rebuild starts first and finishes last
	let west = west_view();
	let (slow, fast) = tokio::join!(
		s.controller.rebuild_at(15, &west),
		async {
			tokio::time::sleep(Duration::from_secs(1)).await;
			s.controller.rebuild_at(15, &east_view()).await
		}
	);

	assert_eq!(slow, RebuildOutcome::Superseded { generation: 2 });
	assert!(matches!(fast, RebuildOutcome::Applied { generation: 3, features: 2, .. }), "{fast:?}");
	assert_eq!(source_names(&s.map), vec!["east a", "east b"]);
	assert_eq!(s.controller.generation(), 3);
	assert!(
		s.events
			.lock()
			.contains(&OverlayEvent::RebuildSuperseded { generation: 2 })
	);
}

#[tokio::test]
async fn inactive_overlay_fetches_nothing() {
	let mut s = setup();
	let outcome = s.controller.rebuild_at(15, &west_view()).await;
	assert_eq!(outcome, RebuildOutcome::Inactive);
	assert!(s.reader.requests().is_empty());
	assert!(s.map.source_ids().is_empty());
	assert_eq!(s.controller.generation(), 0);
	assert!(s.events.lock().is_empty());

	s.controller.activate().await;
	s.controller.deactivate();
	let requests = s.reader.requests().len();
	assert_eq!(s.controller.rebuild_at(15, &east_view()).await, RebuildOutcome::Inactive);
	assert_eq!(s.reader.requests().len(), requests);
}

#[tokio::test]
async fn event_loop_follows_viewport_and_clicks() {
	let mut s = setup();
	s.controller.activate().await;

	assert_eq!(s.map.move_to(15.2, east_view()), 1);
	let event = s.controller.next_event().await.unwrap();
	assert_eq!(event, MapEvent::MoveEnd);
	s.controller.handle_event(event).await;
	assert_eq!(source_names(&s.map), vec!["east a", "east b"]);

	let clicked = building(2, 1.0, 0.0, "east a");
	assert_eq!(s.map.click("osmbuildings", Coordinates::new(1.5, 0.5), vec![clicked]), 1);
	let event = s.controller.next_event().await.unwrap();
	assert!(matches!(&event, MapEvent::Click { layer, .. } if layer == "osmbuildings"));
	s.controller.handle_event(event).await;

	let popups = s.map.popups();
	assert_eq!(popups.len(), 1);
	assert_eq!(popups[0].title, "east a");
	assert_eq!(popups[0].position, Coordinates::new(1.5, 0.5));
	assert_eq!(popups[0].address, "1.5, 0.5");
}

#[tokio::test]
async fn next_event_ends_when_map_closes_subscriptions() {
	let mut s = setup();
	s.controller.activate().await;
	let (move_end, clicks) = (
		s.controller.move_end.as_ref().map(Subscription::id),
		s.controller.state.lock().pending_clicks.as_ref().map(Subscription::id),
	);
	s.map.unsubscribe(move_end.unwrap());
	s.map.unsubscribe(clicks.unwrap());
	assert_eq!(s.controller.next_event().await, None);
	s.controller.run().await;
}

#[tokio::test]
async fn drop_tears_down() {
	let mut s = setup();
	s.controller.activate().await;
	let map = s.map.clone();
	drop(s);
	assert!(map.layer_ids().is_empty());
	assert!(map.source_ids().is_empty());
}
