use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{self, SeqAccess, Visitor},
	ser::SerializeTuple,
};
use std::fmt::{self, Debug};

/// A `[lon, lat]` position. An altitude in the source document is dropped.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Coordinates(pub [f64; 2]);

impl Coordinates {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self([x, y])
	}

	#[must_use]
	pub fn x(&self) -> f64 {
		self.0[0]
	}

	#[must_use]
	pub fn y(&self) -> f64 {
		self.0[1]
	}
}

impl From<[f64; 2]> for Coordinates {
	fn from(value: [f64; 2]) -> Self {
		Coordinates(value)
	}
}

impl From<(f64, f64)> for Coordinates {
	fn from(value: (f64, f64)) -> Self {
		Coordinates([value.0, value.1])
	}
}

impl From<Coordinates> for [f64; 2] {
	fn from(value: Coordinates) -> Self {
		value.0
	}
}

impl Debug for Coordinates {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl Serialize for Coordinates {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut tuple = serializer.serialize_tuple(2)?;
		tuple.serialize_element(&self.0[0])?;
		tuple.serialize_element(&self.0[1])?;
		tuple.end()
	}
}

struct CoordinatesVisitor;

impl<'de> Visitor<'de> for CoordinatesVisitor {
	type Value = Coordinates;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("a position array with at least two numbers")
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Coordinates, A::Error> {
		let x: f64 = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
		let y: f64 = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(1, &self))?;
		while seq.next_element::<de::IgnoredAny>()?.is_some() {}
		Ok(Coordinates([x, y]))
	}
}

impl<'de> Deserialize<'de> for Coordinates {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_seq(CoordinatesVisitor)
	}
}
