//! Fixed-parameter Aitoff projection shared by border path generation,
//! map-mode force targets, and label placement.

/// Aitoff projection at a fixed scale, translated so the world sits in
/// the lower two thirds of the canvas.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
	scale: f64,
	tx: f64,
	ty: f64,
}

const PROJECTION_SCALE: f64 = 220.0;

impl Projection {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			scale: PROJECTION_SCALE,
			tx: width / 2.0,
			ty: height / 2.0 + 50.0,
		}
	}

	/// Map (longitude, latitude) in degrees to screen (x, y). Screen y
	/// grows downward, so the projected y is flipped.
	pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
		let half_lambda = lon.to_radians() / 2.0;
		let phi = lat.to_radians();
		let alpha = (phi.cos() * half_lambda.cos()).acos();
		let stretch = if alpha == 0.0 { 1.0 } else { alpha / alpha.sin() };
		let x = 2.0 * phi.cos() * half_lambda.sin() * stretch;
		let y = phi.sin() * stretch;
		(self.tx + self.scale * x, self.ty - self.scale * y)
	}
}
