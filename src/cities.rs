//! City reference data for map markers.
//!
//! Each marker carries an explicit id, and map clicks resolve through that id
//! rather than by comparing coordinates.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CityRow {
    city: String,
    country: String,
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityMarker {
    pub id: u32,
    pub city: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CityDirectory {
    markers: Vec<CityMarker>,
}

impl CityDirectory {
    /// Load `city,country,lat,lng` rows from `path`, keeping only `country`.
    pub fn load(path: &Path, country: &str) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, country)
    }

    pub fn from_reader<R: Read>(reader: R, country: &str) -> anyhow::Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut markers = Vec::new();

        for row in rdr.deserialize::<CityRow>() {
            let row = row?;
            if row.country != country {
                continue;
            }
            markers.push(CityMarker {
                id: markers.len() as u32,
                city: row.city,
                lat: row.lat,
                lng: row.lng,
            });
        }

        Ok(Self { markers })
    }

    pub fn markers(&self) -> &[CityMarker] {
        &self.markers
    }

    pub fn resolve(&self, id: u32) -> Option<&CityMarker> {
        self.markers.get(id as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
