//! The fixed scale registry: pure monotonic mappings from a raw numeric
//! attribute to a visual one. Domains and ranges are constants of the
//! visualization; nothing here holds state.

/// Linear interpolation from a fixed domain to a fixed range, with
/// linear extrapolation outside the domain.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
	d0: f64,
	d1: f64,
	r0: f64,
	r1: f64,
}

impl LinearScale {
	pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self {
			d0: domain.0,
			d1: domain.1,
			r0: range.0,
			r1: range.1,
		}
	}

	pub fn map(&self, x: f64) -> f64 {
		let t = (x - self.d0) / (self.d1 - self.d0);
		self.r0 + (self.r1 - self.r0) * t
	}
}

/// Square-root scale: linear in the sign-preserving square root of the
/// input, extrapolating outside the domain.
#[derive(Clone, Copy, Debug)]
pub struct SqrtScale {
	s0: f64,
	s1: f64,
	r0: f64,
	r1: f64,
}

fn signed_sqrt(x: f64) -> f64 {
	x.signum() * x.abs().sqrt()
}

impl SqrtScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self {
			s0: signed_sqrt(domain.0),
			s1: signed_sqrt(domain.1),
			r0: range.0,
			r1: range.1,
		}
	}

	pub fn map(&self, x: f64) -> f64 {
		let t = (signed_sqrt(x) - self.s0) / (self.s1 - self.s0);
		self.r0 + (self.r1 - self.r0) * t
	}
}

/// An sRGB color, channels unclamped until formatting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
	pub r: f64,
	pub g: f64,
	pub b: f64,
}

impl Rgb {
	/// Parse a `#rrggbb` literal. Only used on the in-crate constants.
	const fn from_hex(hex: u32) -> Self {
		Self {
			r: ((hex >> 16) & 0xff) as f64,
			g: ((hex >> 8) & 0xff) as f64,
			b: (hex & 0xff) as f64,
		}
	}

	pub fn css(&self) -> String {
		format!(
			"rgb({}, {}, {})",
			self.r.round().clamp(0.0, 255.0),
			self.g.round().clamp(0.0, 255.0),
			self.b.round().clamp(0.0, 255.0)
		)
	}
}

/// Two-color gradient over a fixed numeric domain, interpolated per
/// channel in RGB.
#[derive(Clone, Copy, Debug)]
pub struct ColorScale {
	d0: f64,
	d1: f64,
	c0: Rgb,
	c1: Rgb,
}

impl ColorScale {
	pub const fn new(domain: (f64, f64), from: Rgb, to: Rgb) -> Self {
		Self {
			d0: domain.0,
			d1: domain.1,
			c0: from,
			c1: to,
		}
	}

	pub fn map(&self, x: f64) -> Rgb {
		let t = (x - self.d0) / (self.d1 - self.d0);
		Rgb {
			r: self.c0.r + (self.c1.r - self.c0.r) * t,
			g: self.c0.g + (self.c1.g - self.c0.g) * t,
			b: self.c0.b + (self.c1.b - self.c0.b) * t,
		}
	}
}

/// The neutral fill for border paths outside map mode.
pub const NEUTRAL_FILL: Rgb = Rgb::from_hex(0xcccccc);

/// Per-channel RGB mix, `t` in [0, 1].
pub fn mix(a: Rgb, b: Rgb, t: f64) -> Rgb {
	Rgb {
		r: a.r + (b.r - a.r) * t,
		g: a.g + (b.g - a.g) * t,
		b: a.b + (b.b - a.b) * t,
	}
}

/// All scales the chart uses. Only `sort_x` depends on the canvas size.
#[derive(Clone, Debug)]
pub struct Scales {
	/// Bubble and map fill, birth rate in [0, 50].
	pub color: ColorScale,
	/// Bubble radius in the non-map layouts.
	pub radius: SqrtScale,
	/// Bubble radius while on the map.
	pub map_radius: SqrtScale,
	/// Bubble label font size.
	pub text_size: SqrtScale,
	/// X target in the sorted layout, keyed by rate rank.
	pub sort_x: LinearScale,
}

impl Scales {
	pub fn new(width: f64) -> Self {
		Self {
			color: ColorScale::new(
				(0.0, 50.0),
				Rgb::from_hex(0xc2ffcf),
				Rgb::from_hex(0x000095),
			),
			radius: SqrtScale::new((-5.0, 8.0), (-4.0, 30.0)),
			map_radius: SqrtScale::new((6.0, 50.0), (3.0, 8.0)),
			text_size: SqrtScale::new((6.0, 50.0), (7.0, 13.0)),
			sort_x: LinearScale::new((1.0, 230.0), (300.0, width - 100.0)),
		}
	}
}
