//! Pure polygon helpers: ring extraction from GeoJSON geometry, the
//! area-weighted centroid used as a zoom target, and point-in-polygon
//! hit testing.

use geojson::{Geometry, Value};

/// Collect every ring of a polygonal geometry as (x, y) pairs. Other
/// geometry kinds yield nothing.
pub fn polygon_rings(geometry: &Geometry) -> Vec<Vec<(f64, f64)>> {
	let mut rings = Vec::new();
	collect_rings(geometry, &mut rings);
	rings
}

fn collect_rings(geometry: &Geometry, out: &mut Vec<Vec<(f64, f64)>>) {
	match &geometry.value {
		Value::Polygon(rings) => {
			for ring in rings {
				out.push(ring.iter().map(|p| (p[0], p[1])).collect());
			}
		}
		Value::MultiPolygon(polygons) => {
			for rings in polygons {
				for ring in rings {
					out.push(ring.iter().map(|p| (p[0], p[1])).collect());
				}
			}
		}
		Value::GeometryCollection(members) => {
			for member in members {
				collect_rings(member, out);
			}
		}
		_ => {}
	}
}

/// Area-weighted centroid over all rings (shoelace). Falls back to the
/// vertex mean when the signed area cancels out.
pub fn centroid(rings: &[Vec<(f64, f64)>]) -> (f64, f64) {
	let mut area = 0.0;
	let mut cx = 0.0;
	let mut cy = 0.0;
	for ring in rings {
		for pair in ring.windows(2) {
			let (x0, y0) = pair[0];
			let (x1, y1) = pair[1];
			let cross = x0 * y1 - x1 * y0;
			area += cross;
			cx += (x0 + x1) * cross;
			cy += (y0 + y1) * cross;
		}
	}
	if area.abs() > 1e-12 {
		return (cx / (3.0 * area), cy / (3.0 * area));
	}

	let mut n = 0usize;
	let (mut sx, mut sy) = (0.0, 0.0);
	for ring in rings {
		for &(x, y) in ring {
			sx += x;
			sy += y;
			n += 1;
		}
	}
	if n == 0 {
		(0.0, 0.0)
	} else {
		(sx / n as f64, sy / n as f64)
	}
}

/// Even-odd ray cast over all rings.
pub fn point_in_rings(rings: &[Vec<(f64, f64)>], x: f64, y: f64) -> bool {
	let mut inside = false;
	for ring in rings {
		let n = ring.len();
		if n < 3 {
			continue;
		}
		let mut j = n - 1;
		for i in 0..n {
			let (xi, yi) = ring[i];
			let (xj, yj) = ring[j];
			if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
				inside = !inside;
			}
			j = i;
		}
	}
	inside
}

#[cfg(test)]
mod tests {
	use super::*;

	fn square(x0: f64, y0: f64, size: f64) -> Vec<(f64, f64)> {
		vec![
			(x0, y0),
			(x0 + size, y0),
			(x0 + size, y0 + size),
			(x0, y0 + size),
			(x0, y0),
		]
	}

	#[test]
	fn extracts_multipolygon_rings() {
		let geometry = Geometry::new(Value::MultiPolygon(vec![
			vec![vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 0.0]]],
			vec![vec![vec![5.0, 5.0], vec![6.0, 5.0], vec![6.0, 6.0], vec![5.0, 5.0]]],
		]));
		let rings = polygon_rings(&geometry);
		assert_eq!(rings.len(), 2);
		assert_eq!(rings[1][0], (5.0, 5.0));
	}

	#[test]
	fn point_geometry_has_no_rings() {
		let geometry = Geometry::new(Value::Point(vec![1.0, 2.0]));
		assert!(polygon_rings(&geometry).is_empty());
	}

	#[test]
	fn centroid_of_a_square() {
		let (cx, cy) = centroid(&[square(10.0, 20.0, 4.0)]);
		assert!((cx - 12.0).abs() < 1e-9);
		assert!((cy - 22.0).abs() < 1e-9);
	}

	#[test]
	fn centroid_of_degenerate_ring_falls_back_to_mean() {
		let (cx, cy) = centroid(&[vec![(1.0, 1.0), (3.0, 3.0)]]);
		assert!((cx - 2.0).abs() < 1e-9);
		assert!((cy - 2.0).abs() < 1e-9);
	}

	#[test]
	fn hit_test_inside_and_outside() {
		let rings = [square(0.0, 0.0, 10.0)];
		assert!(point_in_rings(&rings, 5.0, 5.0));
		assert!(!point_in_rings(&rings, 15.0, 5.0));
		assert!(!point_in_rings(&rings, -1.0, 5.0));
	}

	#[test]
	fn hole_is_outside() {
		let rings = [square(0.0, 0.0, 10.0), square(4.0, 4.0, 2.0)];
		assert!(!point_in_rings(&rings, 5.0, 5.0));
		assert!(point_in_rings(&rings, 1.0, 1.0));
	}
}
