//! TopoJSON decoding. The border file stores shared-border geometry as
//! delta-encoded quantized arcs; this module reconstructs one named
//! object collection into plain GeoJSON features.

use geojson::{Feature, Geometry, JsonObject, Value as GeoValue};
use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum TopologyError {
	#[error("not a topology document")]
	NotTopology,
	#[error("topology has no object {0:?}")]
	MissingObject(String),
	#[error("malformed topology: {0}")]
	Malformed(&'static str),
}

/// Optional quantization transform applied to every arc position.
#[derive(Clone, Copy, Debug)]
struct Transform {
	sx: f64,
	sy: f64,
	tx: f64,
	ty: f64,
}

const IDENTITY: Transform = Transform {
	sx: 1.0,
	sy: 1.0,
	tx: 0.0,
	ty: 0.0,
};

/// Decode the named object of a TopoJSON document into GeoJSON
/// features, the way `topojson.feature` does. Only polygonal
/// geometries carry through; anything else in the collection is
/// skipped.
pub fn feature_collection(text: &str, object: &str) -> Result<Vec<Feature>, TopologyError> {
	let doc: Value =
		serde_json::from_str(text).map_err(|_| TopologyError::Malformed("invalid JSON"))?;
	if doc.get("type").and_then(Value::as_str) != Some("Topology") {
		return Err(TopologyError::NotTopology);
	}

	let transform = match doc.get("transform") {
		Some(t) => parse_transform(t)?,
		None => IDENTITY,
	};
	// positions are delta-encoded only when the topology is quantized
	let delta_encoded = doc.get("transform").is_some();

	let arcs = decode_arcs(
		doc.get("arcs")
			.and_then(Value::as_array)
			.ok_or(TopologyError::Malformed("missing arcs"))?,
		transform,
		delta_encoded,
	)?;

	let collection = doc
		.get("objects")
		.and_then(|o| o.get(object))
		.ok_or_else(|| TopologyError::MissingObject(object.to_string()))?;
	let geometries = match collection.get("geometries").and_then(Value::as_array) {
		Some(list) => list.as_slice(),
		None => std::slice::from_ref(collection),
	};

	let mut features = Vec::new();
	for geometry in geometries {
		if let Some(feature) = decode_geometry(geometry, &arcs)? {
			features.push(feature);
		}
	}
	Ok(features)
}

fn parse_transform(value: &Value) -> Result<Transform, TopologyError> {
	let pair = |key: &str| -> Option<(f64, f64)> {
		let list = value.get(key)?.as_array()?;
		Some((list.first()?.as_f64()?, list.get(1)?.as_f64()?))
	};
	let (sx, sy) = pair("scale").ok_or(TopologyError::Malformed("bad transform scale"))?;
	let (tx, ty) = pair("translate").ok_or(TopologyError::Malformed("bad transform translate"))?;
	Ok(Transform { sx, sy, tx, ty })
}

/// Expand every arc to absolute (lon, lat) positions.
fn decode_arcs(
	raw: &[Value],
	transform: Transform,
	delta_encoded: bool,
) -> Result<Vec<Vec<(f64, f64)>>, TopologyError> {
	let mut arcs = Vec::with_capacity(raw.len());
	for arc in raw {
		let points = arc
			.as_array()
			.ok_or(TopologyError::Malformed("arc is not an array"))?;
		let mut out = Vec::with_capacity(points.len());
		let (mut cx, mut cy) = (0.0, 0.0);
		for point in points {
			let coords = point
				.as_array()
				.ok_or(TopologyError::Malformed("arc point is not an array"))?;
			let x = coords
				.first()
				.and_then(Value::as_f64)
				.ok_or(TopologyError::Malformed("arc point x"))?;
			let y = coords
				.get(1)
				.and_then(Value::as_f64)
				.ok_or(TopologyError::Malformed("arc point y"))?;
			if delta_encoded {
				cx += x;
				cy += y;
			} else {
				cx = x;
				cy = y;
			}
			out.push((cx * transform.sx + transform.tx, cy * transform.sy + transform.ty));
		}
		arcs.push(out);
	}
	Ok(arcs)
}

fn decode_geometry(
	geometry: &Value,
	arcs: &[Vec<(f64, f64)>],
) -> Result<Option<Feature>, TopologyError> {
	let kind = geometry.get("type").and_then(Value::as_str).unwrap_or("");
	let geo = match kind {
		"Polygon" => {
			let rings = geometry
				.get("arcs")
				.and_then(Value::as_array)
				.ok_or(TopologyError::Malformed("polygon without arcs"))?;
			GeoValue::Polygon(decode_rings(rings, arcs)?)
		}
		"MultiPolygon" => {
			let polys = geometry
				.get("arcs")
				.and_then(Value::as_array)
				.ok_or(TopologyError::Malformed("multipolygon without arcs"))?;
			let mut out = Vec::with_capacity(polys.len());
			for poly in polys {
				let rings = poly
					.as_array()
					.ok_or(TopologyError::Malformed("multipolygon member"))?;
				out.push(decode_rings(rings, arcs)?);
			}
			GeoValue::MultiPolygon(out)
		}
		_ => return Ok(None),
	};

	let properties: Option<JsonObject> = geometry
		.get("properties")
		.and_then(Value::as_object)
		.cloned();
	Ok(Some(Feature {
		bbox: None,
		geometry: Some(Geometry::new(geo)),
		id: None,
		properties,
		foreign_members: None,
	}))
}

/// Stitch arc indices into closed rings. A negative (bitwise-not)
/// index means the arc runs reversed; each arc shares its first point
/// with the previous arc's last.
fn decode_rings(
	rings: &[Value],
	arcs: &[Vec<(f64, f64)>],
) -> Result<Vec<Vec<Vec<f64>>>, TopologyError> {
	let mut out = Vec::with_capacity(rings.len());
	for ring_arcs in rings {
		let indices = ring_arcs
			.as_array()
			.ok_or(TopologyError::Malformed("ring is not an array"))?;
		let mut ring: Vec<Vec<f64>> = Vec::new();
		for index in indices {
			let i = index
				.as_i64()
				.ok_or(TopologyError::Malformed("arc index"))?;
			let (arc_index, reversed) = if i < 0 {
				((-1 - i) as usize, true)
			} else {
				(i as usize, false)
			};
			let arc = arcs
				.get(arc_index)
				.ok_or(TopologyError::Malformed("arc index out of range"))?;
			let points: Vec<&(f64, f64)> = if reversed {
				arc.iter().rev().collect()
			} else {
				arc.iter().collect()
			};
			let skip = usize::from(!ring.is_empty());
			ring.extend(points.into_iter().skip(skip).map(|&(x, y)| vec![x, y]));
		}
		out.push(ring);
	}
	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;

	// two arcs tracing a 10x10 square, quantized with an identity-ish
	// transform
	const SQUARE: &str = r#"{
		"type": "Topology",
		"transform": {"scale": [1, 1], "translate": [0, 0]},
		"arcs": [
			[[0, 0], [10, 0], [0, 10]],
			[[10, 10], [-10, 0], [0, -10]]
		],
		"objects": {
			"countries1": {
				"type": "GeometryCollection",
				"geometries": [
					{"type": "Polygon", "arcs": [[0, 1]], "properties": {"name": "Squareland"}}
				]
			}
		}
	}"#;

	fn ring_of(feature: &Feature) -> Vec<(f64, f64)> {
		match feature.geometry.as_ref().map(|g| &g.value) {
			Some(GeoValue::Polygon(rings)) => {
				rings[0].iter().map(|p| (p[0], p[1])).collect()
			}
			other => panic!("unexpected geometry {other:?}"),
		}
	}

	#[test]
	fn decodes_a_quantized_polygon() {
		let features = feature_collection(SQUARE, "countries1").unwrap();
		assert_eq!(features.len(), 1);
		assert_eq!(
			features[0]
				.properties
				.as_ref()
				.and_then(|p| p.get("name"))
				.and_then(|v| v.as_str()),
			Some("Squareland")
		);
		assert_eq!(
			ring_of(&features[0]),
			vec![
				(0.0, 0.0),
				(10.0, 0.0),
				(10.0, 10.0),
				(0.0, 10.0),
				(0.0, 0.0)
			]
		);
	}

	#[test]
	fn negative_indices_reverse_arcs() {
		let doc = SQUARE.replace("[[0, 1]]", "[[-2, -1]]");
		let features = feature_collection(&doc, "countries1").unwrap();
		assert_eq!(
			ring_of(&features[0]),
			vec![
				(0.0, 0.0),
				(0.0, 10.0),
				(10.0, 10.0),
				(10.0, 0.0),
				(0.0, 0.0)
			]
		);
	}

	#[test]
	fn unquantized_arcs_are_absolute() {
		let doc = r#"{
			"type": "Topology",
			"arcs": [[[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]]],
			"objects": {"countries1": {"type": "GeometryCollection", "geometries": [
				{"type": "Polygon", "arcs": [[0]]}
			]}}
		}"#;
		let features = feature_collection(doc, "countries1").unwrap();
		assert_eq!(ring_of(&features[0])[2], (4.0, 4.0));
	}

	#[test]
	fn missing_object_is_an_error() {
		assert!(matches!(
			feature_collection(SQUARE, "nope"),
			Err(TopologyError::MissingObject(_))
		));
	}

	#[test]
	fn non_topology_is_rejected() {
		assert!(matches!(
			feature_collection(r#"{"type": "FeatureCollection"}"#, "countries1"),
			Err(TopologyError::NotTopology)
		));
	}
}
