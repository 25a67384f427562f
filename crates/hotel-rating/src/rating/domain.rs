use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Top-level assessment dimension a hotel is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ServiceQuality,
    Infrastructure,
    Location,
    Dining,
    RoomComfort,
}

impl Category {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::ServiceQuality,
            Self::Infrastructure,
            Self::Location,
            Self::Dining,
            Self::RoomComfort,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::ServiceQuality => "service_quality",
            Self::Infrastructure => "infrastructure",
            Self::Location => "location",
            Self::Dining => "dining",
            Self::RoomComfort => "room_comfort",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ServiceQuality => "Service quality",
            Self::Infrastructure => "Infrastructure and amenities",
            Self::Location => "Location",
            Self::Dining => "Dining and cuisine",
            Self::RoomComfort => "Room comfort",
        }
    }

    /// Fixed improvement suggestion quoted in explanations below five stars.
    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::ServiceQuality => {
                "Improve service quality: staff training, shorter waiting times"
            }
            Self::Infrastructure => {
                "Expand the infrastructure: add a pool, fitness center, spa and other services"
            }
            Self::Location => {
                "Improve transport access or offer transfers to key locations"
            }
            Self::Dining => "Raise the quality of dining: broaden the menu, attract better chefs",
            Self::RoomComfort => {
                "Renovate the rooms: better beds, modern in-room equipment"
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rating category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|category| category.key() == normalized)
            .ok_or_else(|| UnknownCategory(raw.to_string()))
    }
}

/// Per-category scores kept in the order the caller supplied them.
///
/// Explanations list categories in this order, so the ordering is part of
/// the data rather than an accident of a hash map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryScores(Vec<(Category, f64)>);

impl CategoryScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds scores from raw string keys, dropping keys that are not a known category.
    pub fn from_raw<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut scores = Self::new();
        for (key, value) in pairs {
            match key.parse::<Category>() {
                Ok(category) => scores.insert(category, value),
                Err(err) => tracing::debug!(%err, "ignoring unrecognized category score"),
            }
        }
        scores
    }

    /// Sets a category score. Re-inserting a category keeps its original position.
    pub fn insert(&mut self, category: Category, value: f64) {
        match self.0.iter_mut().find(|(existing, _)| *existing == category) {
            Some(entry) => entry.1 = value,
            None => self.0.push((category, value)),
        }
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == category)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Category, f64)> for CategoryScores {
    fn from_iter<T: IntoIterator<Item = (Category, f64)>>(iter: T) -> Self {
        let mut scores = Self::new();
        for (category, value) in iter {
            scores.insert(category, value);
        }
        scores
    }
}

/// Raw criterion answers grouped by category, preserving insertion order at both levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriteriaScores(Vec<(Category, Vec<(String, f64)>)>);

impl CriteriaScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a criterion score, replacing an earlier value for the same criterion name.
    pub fn insert(&mut self, category: Category, criterion: impl Into<String>, value: f64) {
        let criterion = criterion.into();
        let index = match self.0.iter().position(|(existing, _)| *existing == category) {
            Some(index) => index,
            None => {
                self.0.push((category, Vec::new()));
                self.0.len() - 1
            }
        };

        let criteria = &mut self.0[index].1;
        match criteria.iter_mut().find(|(name, _)| *name == criterion) {
            Some(entry) => entry.1 = value,
            None => criteria.push((criterion, value)),
        }
    }

    pub fn criteria_for(&self, category: Category) -> Option<&[(String, f64)]> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == category)
            .map(|(_, criteria)| criteria.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[(String, f64)])> + '_ {
        self.0
            .iter()
            .map(|(category, criteria)| (*category, criteria.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Both score containers travel as JSON objects. Deserialization walks the
// object entries in document order, so the insertion order survives even
// though `serde_json::Map` itself is sorted.

impl Serialize for CategoryScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, value) in &self.0 {
            map.serialize_entry(category.key(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = deserializer.deserialize_map(OrderedPairs::<f64>::new())?;
        Ok(Self::from_raw(
            pairs.iter().map(|(key, value)| (key.as_str(), *value)),
        ))
    }
}

impl Serialize for CriteriaScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, criteria) in &self.0 {
            map.serialize_entry(category.key(), &CriterionList(criteria))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CriteriaScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let groups = deserializer.deserialize_map(OrderedPairs::<OwnedCriterionList>::new())?;
        let mut scores = Self::new();
        for (key, criteria) in groups {
            match key.parse::<Category>() {
                Ok(category) => {
                    for (name, value) in criteria.0 {
                        scores.insert(category, name, value);
                    }
                }
                Err(err) => tracing::debug!(%err, "ignoring unrecognized criteria group"),
            }
        }
        Ok(scores)
    }
}

struct CriterionList<'a>(&'a [(String, f64)]);

impl Serialize for CriterionList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct OwnedCriterionList(Vec<(String, f64)>);

impl<'de> Deserialize<'de> for OwnedCriterionList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_map(OrderedPairs::<f64>::new())
            .map(Self)
    }
}

struct OrderedPairs<V>(PhantomData<V>);

impl<V> OrderedPairs<V> {
    fn new() -> Self {
        Self(PhantomData)
    }
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedPairs<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map keyed by name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            pairs.push((key, value));
        }
        Ok(pairs)
    }
}
