use super::RouteService;
use crate::{
	EventBus, MapHandle, OverlayEvent,
	map::{LayerKind, LayerSpec, SourceData},
	overlay::RouteLineStyle,
};
use anyhow::Result;
use footprint_geometry::{Coordinates, GeoFeature};
use std::sync::Arc;

/// Draws a route between two positions as a line layer.
///
/// The route is a single feature in a source named like the layer. A failed
/// lookup draws nothing and keeps the previous route.
pub struct RouteOverlay {
	map: Arc<dyn MapHandle>,
	router: Arc<dyn RouteService>,
	layer_id: String,
	style: RouteLineStyle,
	events: EventBus,
}

impl RouteOverlay {
	pub fn new(map: Arc<dyn MapHandle>, router: Arc<dyn RouteService>, layer_id: &str, events: EventBus) -> Self {
		Self {
			map,
			router,
			layer_id: layer_id.to_string(),
			style: RouteLineStyle::default(),
			events,
		}
	}

	pub fn with_style(mut self, style: RouteLineStyle) -> Self {
		self.style = style;
		self
	}

	/// Looks up the route and shows it; returns `true` if the map now shows the new route.
	pub async fn show_route(&self, start: Coordinates, end: Coordinates) -> bool {
		let geometry = match self.router.route(start, end).await {
			Ok(geometry) => geometry,
			Err(err) => {
				log::warn!("{err}");
				self.events.emit(OverlayEvent::RouteFailed {
					message: err.to_string(),
				});
				return false;
			}
		};

		match self.apply(GeoFeature::new(geometry)) {
			Ok(()) => true,
			Err(err) => {
				log::warn!("failed to draw route: {err}");
				self.events.emit(OverlayEvent::MapError {
					message: err.to_string(),
				});
				false
			}
		}
	}

	fn apply(&self, feature: GeoFeature) -> Result<()> {
		let id = self.layer_id.as_str();
		if self.map.has_source(id) {
			self.map.update_source(id, SourceData::Feature(feature))?;
		} else {
			self.map.add_source(id, SourceData::Feature(feature))?;
		}
		if !self.map.has_layer(id) {
			self.map
				.add_layer(LayerSpec::new(id, id, LayerKind::Line(self.style.clone())))?;
		}
		Ok(())
	}

	/// Removes layer and source; missing ones are skipped.
	pub fn clear(&self) -> Result<()> {
		let id = self.layer_id.as_str();
		if self.map.has_layer(id) {
			self.map.remove_layer(id)?;
		}
		if self.map.has_source(id) {
			self.map.remove_source(id)?;
		}
		Ok(())
	}
}
