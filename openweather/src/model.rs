//! Response bodies, trimmed to the fields we use.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};

/// A point on the globe, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// Current weather for a place. Only the location is retained.
#[derive(Debug, Clone, Deserialize)]
pub struct Weather {
    pub coord: Coord,
    /// The provider's name for the place, which may differ from the query.
    #[serde(default)]
    pub name: Option<String>,
}

/// Air pollution report: a list of readings, current first.
#[derive(Debug, Clone, Deserialize)]
pub struct AirPollution {
    pub list: Vec<PollutionEntry>,
}

impl AirPollution {
    /// The current reading, if the provider sent any.
    pub fn current(&self) -> Option<&PollutionEntry> {
        self.list.first()
    }
}

/// A single air pollution reading.
#[derive(Debug, Clone, Deserialize)]
pub struct PollutionEntry {
    /// Unix time of the reading, in seconds.
    #[serde(default)]
    pub dt: Option<i64>,
    pub main: PollutionIndex,
    pub components: Components,
}

impl PollutionEntry {
    /// Time at which the reading was taken.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.dt.and_then(|dt| DateTime::from_timestamp(dt, 0))
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PollutionIndex {
    /// Air quality index, 1 (good) through 5 (very poor).
    pub aqi: i32,
}

/// Pollutant concentrations in µg/m³, in the order the provider sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components(pub Vec<(String, f64)>);

impl Components {
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn into_inner(self) -> Vec<(String, f64)> {
        self.0
    }
}

impl<'de> Deserialize<'de> for Components {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ComponentsVisitor)
    }
}

/// Walks the map entry by entry, so document order is kept.
struct ComponentsVisitor;

impl<'de> Visitor<'de> for ComponentsVisitor {
    type Value = Components;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of pollutant name to concentration")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(8));
        while let Some((name, value)) = map.next_entry::<String, f64>()? {
            entries.push((name, value));
        }
        Ok(Components(entries))
    }
}
