use footprint_geometry::{Coordinates, GeoFeature};

/// The popup shown for a clicked building.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
	/// Anchor, usually the centroid of the building.
	pub position: Coordinates,
	pub title: String,
	pub address: String,
	pub building_type: String,
	/// Distance in pixels between anchor and popup.
	pub offset: u32,
}

impl Annotation {
	pub const DEFAULT_TITLE: &'static str = "Building";
	pub const DEFAULT_ADDRESS: &'static str = "Address not found";
	pub const DEFAULT_TYPE: &'static str = "Not specified";
	pub const POPUP_OFFSET: u32 = 25;

	/// Annotation for `feature`; missing or empty values fall back to the defaults.
	pub fn for_feature(feature: &GeoFeature, position: Coordinates, address: Option<String>) -> Annotation {
		let properties = &feature.properties;
		Annotation {
			position,
			title: non_empty_or(properties.name.as_deref(), Self::DEFAULT_TITLE),
			address: non_empty_or(address.as_deref(), Self::DEFAULT_ADDRESS),
			building_type: non_empty_or(properties.building_type.as_deref(), Self::DEFAULT_TYPE),
			offset: Self::POPUP_OFFSET,
		}
	}

	/// Popup body, all values HTML-escaped.
	pub fn to_html(&self) -> String {
		format!(
			"<div class=\"popup-content\"><strong>{}</strong><br/><span class=\"popup-address\">{}</span><br/><span class=\"popup-type\">Type: {}</span></div>",
			escape_html(&self.title),
			escape_html(&self.address),
			escape_html(&self.building_type)
		)
	}
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
	match value {
		Some(value) if !value.trim().is_empty() => value.to_string(),
		_ => default.to_string(),
	}
}

fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			c => escaped.push(c),
		}
	}
	escaped
}

#[cfg(test)]
mod tests {
	use super::*;
	use footprint_geometry::{BuildingProperties, Geometry};
	use pretty_assertions::assert_eq;

	fn feature(name: Option<&str>, building_type: Option<&str>) -> GeoFeature {
		let mut feature = GeoFeature::new(Geometry::Point(Coordinates::new(0.0, 0.0)));
		feature.set_properties(BuildingProperties {
			name: name.map(str::to_string),
			building_type: building_type.map(str::to_string),
			..Default::default()
		});
		feature
	}

	#[test]
	fn defaults() {
		let annotation = Annotation::for_feature(&feature(None, Some("")), Coordinates::new(1.0, 2.0), None);
		assert_eq!(
			annotation,
			Annotation {
				position: Coordinates::new(1.0, 2.0),
				title: "Building".to_string(),
				address: "Address not found".to_string(),
				building_type: "Not specified".to_string(),
				offset: 25,
			}
		);
	}

	#[test]
	fn values() {
		let annotation = Annotation::for_feature(
			&feature(Some("Monas"), Some("monument")),
			Coordinates::new(106.8272, -6.1754),
			Some("Gambir, Jakarta Pusat".to_string()),
		);
		assert_eq!(annotation.title, "Monas");
		assert_eq!(annotation.address, "Gambir, Jakarta Pusat");
		assert_eq!(annotation.building_type, "monument");
	}

	#[test]
	fn html_is_escaped() {
		let annotation = Annotation::for_feature(
			&feature(Some("<b>Tom & Jerry's</b>"), None),
			Coordinates::new(0.0, 0.0),
			Some("\"Main\" St".to_string()),
		);
		assert_eq!(
			annotation.to_html(),
			"<div class=\"popup-content\"><strong>&lt;b&gt;Tom &amp; Jerry&#39;s&lt;/b&gt;</strong><br/><span class=\"popup-address\">&quot;Main&quot; St</span><br/><span class=\"popup-type\">Type: Not specified</span></div>"
		);
	}
}
