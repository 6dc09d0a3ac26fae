// Summary statistics returned by the analysis service
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResult {
    pub summary_data: SummaryData,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SummaryData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub averages: Averages,
    /// Equipment type -> count, in the order the server sent them
    #[serde(default, deserialize_with = "ordered_counts")]
    pub type_distribution: Vec<TypeCount>,
}

/// Missing averages stay `None` so the view can show a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Averages {
    #[serde(rename = "Flowrate", default)]
    pub flowrate: Option<f64>,
    #[serde(rename = "Pressure", default)]
    pub pressure: Option<f64>,
    #[serde(rename = "Temperature", default)]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeCount {
    pub name: String,
    pub count: u64,
}

impl TypeCount {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Treats an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// A JSON object decoded entry by entry so the server's key order survives
fn ordered_counts<'de, D>(deserializer: D) -> Result<Vec<TypeCount>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedCounts;

    impl<'de> Visitor<'de> for OrderedCounts {
        type Value = Vec<TypeCount>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of equipment type to count")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, count)) = map.next_entry::<String, u64>()? {
                entries.push(TypeCount { name, count });
            }
            Ok(entries)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(OrderedCounts)
}
