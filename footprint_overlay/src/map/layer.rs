use crate::overlay::{ExtrusionStyle, LabelStyle, RouteLineStyle};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
	FillExtrusion(ExtrusionStyle),
	Symbol(LabelStyle),
	Line(RouteLineStyle),
}

impl LayerKind {
	/// Style-spec layer type.
	pub fn type_name(&self) -> &'static str {
		match self {
			LayerKind::FillExtrusion(_) => "fill-extrusion",
			LayerKind::Symbol(_) => "symbol",
			LayerKind::Line(_) => "line",
		}
	}
}

/// A style layer drawing the features of `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
	pub id: String,
	pub source: String,
	pub kind: LayerKind,
}

impl LayerSpec {
	pub fn new(id: &str, source: &str, kind: LayerKind) -> Self {
		Self {
			id: id.to_string(),
			source: source.to_string(),
			kind,
		}
	}

	/// The layer as a MapLibre style-spec layer object.
	pub fn to_json(&self) -> Value {
		let (layout, paint) = match &self.kind {
			LayerKind::FillExtrusion(style) => (None, style.paint()),
			LayerKind::Symbol(style) => (Some(style.layout()), style.paint()),
			LayerKind::Line(style) => (Some(style.layout()), style.paint()),
		};

		let mut layer = Map::new();
		layer.insert("id".to_string(), json!(self.id));
		layer.insert("type".to_string(), json!(self.kind.type_name()));
		layer.insert("source".to_string(), json!(self.source));
		if let Some(layout) = layout {
			layer.insert("layout".to_string(), layout);
		}
		layer.insert("paint".to_string(), paint);
		Value::Object(layer)
	}
}
