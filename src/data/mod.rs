//! Data loading: the two required fetches (border topology + country
//! statistics) joined into one typed result, and the independent
//! region-label fetch. Parsing is separated from fetching so it stays
//! host-testable.

use gloo_net::http::Request;
use log::warn;
use thiserror::Error;

use crate::components::chart::types::{
	BorderFeature, CountryRecord, Dataset, RateExtremes, Region, RegionLabel,
};
use crate::geo::geometry::polygon_rings;
use crate::geo::topo::{self, TopologyError};

const BORDERS_URL: &str = "data/borders.json";
const RECORDS_URL: &str = "data/data.csv";
const REGIONS_URL: &str = "data/regions.csv";

/// The object collection inside the border topology.
const BORDER_OBJECT: &str = "countries1";

#[derive(Clone, Debug, Error)]
pub enum LoadError {
	#[error("fetching {url}: {message}")]
	Fetch { url: String, message: String },
	#[error("fetching {url}: HTTP {status}")]
	Status { url: String, status: u16 },
	#[error(transparent)]
	Topology(#[from] TopologyError),
	#[error("statistics CSV has no {0:?} column")]
	MissingColumn(&'static str),
	#[error("statistics CSV yielded no usable rows")]
	Empty,
}

/// Fetch the topology and the statistics CSV concurrently and wait for
/// both. Either failure fails the whole load; the page renders the
/// error instead of silently showing nothing.
pub async fn load_dataset() -> Result<Dataset, LoadError> {
	let (topology, csv) = futures::try_join!(fetch_text(BORDERS_URL), fetch_text(RECORDS_URL))?;
	let borders = parse_borders(&topology)?;
	let records = parse_records(&csv)?;
	log::info!(
		"loaded {} country records, {} border features",
		records.len(),
		borders.len()
	);
	Ok(Dataset { records, borders })
}

/// Fetch the region captions. Runs uncoordinated with [`load_dataset`];
/// the chart works without them.
pub async fn fetch_region_labels() -> Result<Vec<RegionLabel>, LoadError> {
	let text = fetch_text(REGIONS_URL).await?;
	Ok(parse_region_labels(&text))
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
	let response = Request::get(url).send().await.map_err(|e| LoadError::Fetch {
		url: url.to_string(),
		message: e.to_string(),
	})?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}
	response.text().await.map_err(|e| LoadError::Fetch {
		url: url.to_string(),
		message: e.to_string(),
	})
}

/// Decode the topology into named border outlines. Features without a
/// `name` property are kept; they draw but never match a record.
pub fn parse_borders(text: &str) -> Result<Vec<BorderFeature>, LoadError> {
	let features = topo::feature_collection(text, BORDER_OBJECT)?;
	Ok(features
		.into_iter()
		.map(|feature| {
			let name = feature
				.properties
				.as_ref()
				.and_then(|p| p.get("name"))
				.and_then(|v| v.as_str())
				.map(str::to_string);
			let rings = feature
				.geometry
				.as_ref()
				.map(polygon_rings)
				.unwrap_or_default();
			BorderFeature { name, rings }
		})
		.collect())
}

/// Parse the statistics CSV. Rows with unparseable numbers or a region
/// outside the closed set are dropped with a warning; ranks are
/// assigned from the birth-rate ascending ordering afterwards.
pub fn parse_records(text: &str) -> Result<Vec<CountryRecord>, LoadError> {
	let mut lines = text.lines();
	let header: Vec<String> = lines
		.next()
		.map(split_csv_line)
		.unwrap_or_default()
		.iter()
		.map(|h| h.trim().to_ascii_lowercase())
		.collect();
	let column = |name: &'static str| -> Result<usize, LoadError> {
		header
			.iter()
			.position(|h| h == name)
			.ok_or(LoadError::MissingColumn(name))
	};
	let (country_col, code_col, birth_col, lat_col, long_col, region_col) = (
		column("country")?,
		column("code")?,
		column("birth")?,
		column("lat")?,
		column("long")?,
		column("region")?,
	);

	let mut records = Vec::new();
	for (number, line) in lines.enumerate() {
		if line.trim().is_empty() {
			continue;
		}
		let fields = split_csv_line(line);
		let field = |col: usize| fields.get(col).map(String::as_str).unwrap_or("");
		let parsed = (
			field(birth_col).trim().parse::<f64>(),
			field(lat_col).trim().parse::<f64>(),
			field(long_col).trim().parse::<f64>(),
			field(region_col).parse::<Region>(),
		);
		match parsed {
			(Ok(birth), Ok(lat), Ok(long), Ok(region)) => records.push(CountryRecord {
				country: field(country_col).trim().to_string(),
				code: field(code_col).trim().to_string(),
				birth,
				lat,
				long,
				region,
				rank: 0,
			}),
			_ => warn!("dropping statistics row {}: {line:?}", number + 2),
		}
	}
	if records.is_empty() {
		return Err(LoadError::Empty);
	}

	assign_ranks(&mut records);
	Ok(records)
}

/// 1-based rank in birth-rate ascending order.
fn assign_ranks(records: &mut [CountryRecord]) {
	let mut order: Vec<usize> = (0..records.len()).collect();
	order.sort_by(|&a, &b| records[a].birth.total_cmp(&records[b].birth));
	for (position, index) in order.into_iter().enumerate() {
		records[index].rank = position + 1;
	}
}

/// The info panel's min/max records, read off the ends of the rate
/// ascending ordering.
pub fn rate_extremes(records: &[CountryRecord]) -> Option<RateExtremes> {
	let mut sorted: Vec<&CountryRecord> = records.iter().collect();
	sorted.sort_by(|a, b| a.birth.total_cmp(&b.birth));
	let (first, last) = (sorted.first()?, sorted.last()?);
	Some(RateExtremes {
		min_country: first.country.clone(),
		min_rate: first.birth,
		max_country: last.country.clone(),
		max_rate: last.birth,
	})
}

fn parse_region_labels(text: &str) -> Vec<RegionLabel> {
	let mut labels = Vec::new();
	for line in text.lines().skip(1) {
		if line.trim().is_empty() {
			continue;
		}
		let fields = split_csv_line(line);
		let parsed = (
			fields.first(),
			fields.get(1).and_then(|f| f.trim().parse::<f64>().ok()),
			fields.get(2).and_then(|f| f.trim().parse::<f64>().ok()),
		);
		match parsed {
			(Some(region), Some(posx), Some(posy)) => labels.push(RegionLabel {
				region: region.trim().to_string(),
				posx,
				posy,
			}),
			_ => warn!("dropping region label row: {line:?}"),
		}
	}
	labels
}

/// Minimal CSV field splitter: commas, double quotes, doubled-quote
/// escapes. Enough for the WHO export.
fn split_csv_line(line: &str) -> Vec<String> {
	let mut fields = Vec::new();
	let mut current = String::new();
	let mut quoted = false;
	let mut chars = line.chars().peekable();
	while let Some(c) = chars.next() {
		match c {
			'"' if quoted && chars.peek() == Some(&'"') => {
				chars.next();
				current.push('"');
			}
			'"' => quoted = !quoted,
			',' if !quoted => fields.push(std::mem::take(&mut current)),
			_ => current.push(c),
		}
	}
	fields.push(current);
	fields
}

#[cfg(test)]
mod tests {
	use super::*;

	const CSV: &str = "\
country,code,birth,lat,long,region
Niger,NER,49.661,17.6,8.08,Africa
\"Korea, South\",KOR,8.6,35.9,127.77,Asia
Monaco,MCO,6.5,43.73,7.41,Europe
Nowhere,NWH,abc,0,0,Africa
Atlantis,ATL,12.0,0,0,Lemuria
";

	#[test]
	fn parses_rows_and_skips_bad_ones() {
		let records = parse_records(CSV).unwrap();
		assert_eq!(records.len(), 3);
		assert_eq!(records[1].country, "Korea, South");
		assert_eq!(records[1].region, Region::Asia);
		assert!((records[0].birth - 49.661).abs() < 1e-9);
	}

	#[test]
	fn ranks_follow_rate_ascending_order() {
		let records = parse_records(CSV).unwrap();
		// Monaco 6.5 < Korea 8.6 < Niger 49.661
		assert_eq!(records[2].rank, 1);
		assert_eq!(records[1].rank, 2);
		assert_eq!(records[0].rank, 3);
	}

	#[test]
	fn missing_column_is_an_error() {
		let result = parse_records("country,code,birth\nA,AAA,1.0\n");
		assert!(matches!(result, Err(LoadError::MissingColumn("lat"))));
	}

	#[test]
	fn all_rows_bad_is_empty() {
		let result = parse_records("country,code,birth,lat,long,region\nA,AAA,x,0,0,Africa\n");
		assert!(matches!(result, Err(LoadError::Empty)));
	}

	#[test]
	fn extremes_read_both_ends() {
		let records = parse_records(
			"country,code,birth,lat,long,region\nA,A,10,0,0,Africa\nB,B,40,0,0,Asia\n",
		)
		.unwrap();
		let extremes = rate_extremes(&records).unwrap();
		assert_eq!(extremes.min_country, "A");
		assert!((extremes.min_rate - 10.0).abs() < 1e-9);
		assert_eq!(extremes.max_country, "B");
		assert!((extremes.max_rate - 40.0).abs() < 1e-9);
	}

	#[test]
	fn region_labels_parse_and_skip_malformed() {
		let labels = parse_region_labels("region,posx,posy\nAfrica,0.2,0.3\nAsia,broken,0.5\n");
		assert_eq!(
			labels,
			vec![RegionLabel {
				region: "Africa".to_string(),
				posx: 0.2,
				posy: 0.3,
			}]
		);
	}

	#[test]
	fn borders_carry_names_and_rings() {
		let topology = r#"{
			"type": "Topology",
			"arcs": [[[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]]],
			"objects": {"countries1": {"type": "GeometryCollection", "geometries": [
				{"type": "Polygon", "arcs": [[0]], "properties": {"name": "Boxia"}},
				{"type": "Polygon", "arcs": [[0]]}
			]}}
		}"#;
		let borders = parse_borders(topology).unwrap();
		assert_eq!(borders.len(), 2);
		assert_eq!(borders[0].name.as_deref(), Some("Boxia"));
		assert!(borders[1].name.is_none());
		assert_eq!(borders[0].rings[0].len(), 5);
	}
}
