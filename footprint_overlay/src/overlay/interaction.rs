use super::Annotation;
use crate::{EventBus, MapHandle, OverlayEvent, services::ReverseGeocoder};
use footprint_geometry::GeoFeature;
use std::sync::Arc;

/// Turns a click on a building into an address popup.
///
/// The topmost clicked feature is used. Its centroid is reverse geocoded and
/// an [`Annotation`] is shown at the centroid. A feature without a usable ring
/// aborts the interaction, a failed lookup only costs the address.
#[derive(Clone)]
pub struct FeatureInteractionHandler {
	map: Arc<dyn MapHandle>,
	geocoder: Arc<dyn ReverseGeocoder>,
	events: EventBus,
}

impl FeatureInteractionHandler {
	pub fn new(map: Arc<dyn MapHandle>, geocoder: Arc<dyn ReverseGeocoder>, events: EventBus) -> Self {
		Self { map, geocoder, events }
	}

	/// Handles a click carrying `features`; returns the annotation that was shown.
	pub async fn handle_click(&self, features: &[GeoFeature]) -> Option<Annotation> {
		let Some(feature) = features.first() else {
			self.abort("no feature under the cursor".to_string());
			return None;
		};
		if feature.first_ring().is_none() {
			self.abort(format!("{} has no polygon ring", feature.geometry.type_name()));
			return None;
		}
		let centroid = match feature.centroid() {
			Ok(centroid) => centroid,
			Err(err) => {
				self.abort(err.to_string());
				return None;
			}
		};

		let address = match self.geocoder.reverse(centroid.x(), centroid.y()).await {
			Ok(address) => Some(address),
			Err(err) => {
				log::warn!("{err}");
				self.events.emit(OverlayEvent::GeocodeFailed {
					message: err.to_string(),
				});
				None
			}
		};

		let annotation = Annotation::for_feature(feature, centroid, address);
		self.map.show_popup(annotation.clone());
		Some(annotation)
	}

	fn abort(&self, reason: String) {
		log::debug!("click ignored: {reason}");
		self.events.emit(OverlayEvent::InteractionAborted { reason });
	}
}
