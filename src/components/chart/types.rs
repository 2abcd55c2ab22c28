use std::fmt;
use std::str::FromStr;

/// Continent grouping used by the "By region" layout. Closed set: a row
/// with any other value is rejected at load time, so every simulated
/// node has a defined anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
	Africa,
	America,
	Asia,
	Europe,
	Oceania,
}

impl Region {
	/// Cluster anchor for a canvas of the given size.
	pub fn anchor(self, width: f64, height: f64) -> (f64, f64) {
		match self {
			Region::Africa => (width / 6.0 + 100.0, height / 3.0 + 40.0),
			Region::America => (3.0 / 7.0 * width, 2.0 / 3.0 * height + 60.0),
			Region::Asia => (4.0 / 7.0 * width, height / 3.0 + 10.0),
			Region::Europe => (5.0 / 7.0 * width, 2.0 / 3.0 * height + 10.0),
			Region::Oceania => (6.0 / 7.0 * width, height / 3.0 + 10.0),
		}
	}
}

impl FromStr for Region {
	type Err = UnknownRegion;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"Africa" => Ok(Region::Africa),
			"America" => Ok(Region::America),
			"Asia" => Ok(Region::Asia),
			"Europe" => Ok(Region::Europe),
			"Oceania" => Ok(Region::Oceania),
			other => Err(UnknownRegion(other.to_string())),
		}
	}
}

/// Error for a region value outside the closed set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownRegion(pub String);

impl fmt::Display for UnknownRegion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown region {:?}", self.0)
	}
}

/// One row of the statistics CSV, plus the rate rank assigned at load.
#[derive(Clone, Debug, PartialEq)]
pub struct CountryRecord {
	pub country: String,
	pub code: String,
	pub birth: f64,
	pub lat: f64,
	pub long: f64,
	pub region: Region,
	/// 1-based position in the birth-rate ascending ordering.
	pub rank: usize,
}

/// One country outline from the border topology, in (lon, lat) rings.
#[derive(Clone, Debug, Default)]
pub struct BorderFeature {
	pub name: Option<String>,
	pub rings: Vec<Vec<(f64, f64)>>,
}

/// Region caption record from `regions.csv`; positions are fractions of
/// the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionLabel {
	pub region: String,
	pub posx: f64,
	pub posy: f64,
}

/// Everything the two required fetches yield, joined.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
	pub records: Vec<CountryRecord>,
	pub borders: Vec<BorderFeature>,
}

/// The records holding the smallest and largest birth rate.
#[derive(Clone, Debug, PartialEq)]
pub struct RateExtremes {
	pub min_country: String,
	pub min_rate: f64,
	pub max_country: String,
	pub max_rate: f64,
}

/// The four layouts; exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
	#[default]
	Combine,
	Divide,
	Sort,
	Map,
}

/// Tooltip contents and pointer-anchored position, in page pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tooltip {
	pub text: String,
	pub x: f64,
	pub y: f64,
	pub visible: bool,
}

impl Tooltip {
	pub fn show(country: &str, rate: Option<f64>, x: f64, y: f64) -> Self {
		let text = match rate {
			Some(rate) => format!("{country}: {rate}"),
			None => country.to_string(),
		};
		Self {
			text,
			x,
			y,
			visible: true,
		}
	}
}
