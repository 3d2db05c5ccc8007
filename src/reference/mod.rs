//! Compiled-in reference data backing the built-in lookup and validator:
//! country names and aliases with centroids, province centroids, and coarse
//! land boxes used by the `seas` and `countries` checks.
//!
//! The tables live under `data/` as CSV and are embedded at compile time. They
//! are parsed once per process on first use of [`Gazetteer::builtin`].
use std::collections::{BTreeSet, HashMap};

use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing::debug;

use crate::core::geo::{BoundingBox, LatLon};
use crate::core::lookup::{CountryLookup, LookupOutcome, name_key};
use crate::error::{Error, Result};
use crate::types::Iso3;

const COUNTRIES_CSV: &str = include_str!("../../data/countries.csv");
const PROVINCES_CSV: &str = include_str!("../../data/provinces.csv");
const LAND_BOXES_CSV: &str = include_str!("../../data/land_boxes.csv");

static BUILTIN: OnceCell<Gazetteer> = OnceCell::new();

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub iso3: Iso3,
    /// ISO 3166-1 alpha-2, uppercase
    pub iso2: String,
    pub name: String,
    pub aliases: Vec<String>,
    pub centroid: LatLon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Province {
    pub iso3: Iso3,
    pub name: String,
    pub centroid: LatLon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandBox {
    pub iso3: Iso3,
    pub bounds: BoundingBox,
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    iso3: Iso3,
    iso2: String,
    name: String,
    aliases: String,
    centroid_lat: f64,
    centroid_lon: f64,
}

#[derive(Debug, Deserialize)]
struct ProvinceRow {
    iso3: Iso3,
    name: String,
    centroid_lat: f64,
    centroid_lon: f64,
}

#[derive(Debug, Deserialize)]
struct LandBoxRow {
    iso3: Iso3,
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

/// Countries, provinces and land boxes with a name index for lookups
#[derive(Debug)]
pub struct Gazetteer {
    countries: Vec<Country>,
    provinces: Vec<Province>,
    land: Vec<LandBox>,
    by_code: HashMap<Iso3, usize>,
    by_name: HashMap<String, BTreeSet<Iso3>>,
}

impl Gazetteer {
    /// Shared gazetteer built from the embedded tables
    pub fn builtin() -> Result<&'static Gazetteer> {
        BUILTIN.get_or_try_init(|| {
            let gazetteer = Gazetteer::from_csv(COUNTRIES_CSV, PROVINCES_CSV, LAND_BOXES_CSV)?;
            debug!(
                "Loaded reference data: {} countries, {} provinces, {} land boxes",
                gazetteer.countries.len(),
                gazetteer.provinces.len(),
                gazetteer.land.len()
            );
            Ok(gazetteer)
        })
    }

    /// Build from CSV text with the same layout as the files under `data/`
    pub fn from_csv(countries: &str, provinces: &str, land: &str) -> Result<Self> {
        let country_rows: Vec<CountryRow> = parse_table("countries", countries)?;
        let province_rows: Vec<ProvinceRow> = parse_table("provinces", provinces)?;
        let land_rows: Vec<LandBoxRow> = parse_table("land_boxes", land)?;

        let mut gazetteer = Gazetteer {
            countries: Vec::with_capacity(country_rows.len()),
            provinces: Vec::with_capacity(province_rows.len()),
            land: Vec::with_capacity(land_rows.len()),
            by_code: HashMap::new(),
            by_name: HashMap::new(),
        };

        for row in country_rows {
            let centroid = LatLon::new(row.centroid_lat, row.centroid_lon);
            if !centroid.in_bounds() {
                return Err(reference_error(
                    "countries",
                    format!("centroid of {} out of bounds", row.iso3),
                ));
            }
            if gazetteer
                .by_code
                .insert(row.iso3, gazetteer.countries.len())
                .is_some()
            {
                return Err(reference_error(
                    "countries",
                    format!("duplicate code {}", row.iso3),
                ));
            }
            let iso2 = row.iso2.to_ascii_uppercase();
            if iso2.len() != 2 || !iso2.bytes().all(|b| b.is_ascii_alphabetic()) {
                return Err(reference_error(
                    "countries",
                    format!("invalid alpha-2 code {:?} for {}", row.iso2, row.iso3),
                ));
            }
            let aliases = row
                .aliases
                .split(';')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect();
            gazetteer.countries.push(Country {
                iso3: row.iso3,
                iso2,
                name: row.name,
                aliases,
                centroid,
            });
        }

        for row in province_rows {
            gazetteer.require_country("provinces", row.iso3)?;
            let centroid = LatLon::new(row.centroid_lat, row.centroid_lon);
            if !centroid.in_bounds() {
                return Err(reference_error(
                    "provinces",
                    format!("centroid of {} out of bounds", row.name),
                ));
            }
            gazetteer.provinces.push(Province {
                iso3: row.iso3,
                name: row.name,
                centroid,
            });
        }

        for row in land_rows {
            gazetteer.require_country("land_boxes", row.iso3)?;
            let bounds = BoundingBox {
                min_lon: row.min_lon,
                min_lat: row.min_lat,
                max_lon: row.max_lon,
                max_lat: row.max_lat,
            };
            if !bounds.is_well_formed() {
                return Err(reference_error(
                    "land_boxes",
                    format!("malformed box for {}", row.iso3),
                ));
            }
            gazetteer.land.push(LandBox {
                iso3: row.iso3,
                bounds,
            });
        }

        gazetteer.index_names();
        Ok(gazetteer)
    }

    fn require_country(&self, table: &'static str, iso3: Iso3) -> Result<()> {
        if self.by_code.contains_key(&iso3) {
            Ok(())
        } else {
            Err(reference_error(table, format!("unknown country code {iso3}")))
        }
    }

    fn index_names(&mut self) {
        for country in &self.countries {
            let names = std::iter::once(country.name.as_str())
                .chain(country.aliases.iter().map(String::as_str))
                .chain([country.iso3.as_str(), country.iso2.as_str()]);
            for name in names {
                let key = name_key(name);
                if !key.is_empty() {
                    self.by_name.entry(key).or_default().insert(country.iso3);
                }
            }
        }
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    pub fn country(&self, iso3: Iso3) -> Option<&Country> {
        self.by_code.get(&iso3).map(|&idx| &self.countries[idx])
    }

    /// Every country and province centroid
    pub fn centroids(&self) -> impl Iterator<Item = LatLon> + '_ {
        self.countries
            .iter()
            .map(|c| c.centroid)
            .chain(self.provinces.iter().map(|p| p.centroid))
    }

    /// True when the point falls in any land box grown by `buffer_deg`
    pub fn on_land(&self, point: LatLon, buffer_deg: f64) -> bool {
        self.land.iter().any(|b| b.bounds.contains(point, buffer_deg))
    }

    /// True when the point falls in one of the land boxes of `iso3`
    pub fn within_country(&self, iso3: Iso3, point: LatLon, buffer_deg: f64) -> bool {
        self.land
            .iter()
            .filter(|b| b.iso3 == iso3)
            .any(|b| b.bounds.contains(point, buffer_deg))
    }

    pub fn has_land_boxes(&self, iso3: Iso3) -> bool {
        self.land.iter().any(|b| b.iso3 == iso3)
    }
}

impl CountryLookup for Gazetteer {
    fn lookup(&self, name: &str) -> LookupOutcome {
        let key = name_key(name);
        match self.by_name.get(&key) {
            Some(codes) if codes.len() == 1 => match codes.iter().next() {
                Some(code) => LookupOutcome::Matched(*code),
                None => LookupOutcome::Unmatched,
            },
            Some(codes) => LookupOutcome::Ambiguous(codes.iter().copied().collect()),
            None => LookupOutcome::Unmatched,
        }
    }
}

fn parse_table<T: serde::de::DeserializeOwned>(table: &'static str, text: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|e| reference_error(table, e.to_string()))
}

fn reference_error(table: &'static str, message: String) -> Error {
    Error::ReferenceData { table, message }
}
