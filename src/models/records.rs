//! Seed Records
//!
//! Opaque records accepted by `POST /preload` and the startup seed file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::cache::Record;

/// A record with an identifier and arbitrary other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record for SeedRecord {
    fn subject_id(&self) -> String {
        self.id.clone()
    }

    /// Record count plus `min` / `max` / `mean` of every numeric field.
    fn summarize(records: &[&Self]) -> Value {
        let mut numeric: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for record in records {
            for (name, value) in &record.fields {
                if let Some(n) = value.as_f64() {
                    numeric.entry(name.as_str()).or_default().push(n);
                }
            }
        }

        let fields: Map<String, Value> = numeric
            .into_iter()
            .map(|(name, values)| {
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                (
                    name.to_string(),
                    json!({ "min": min, "max": max, "mean": mean, "count": values.len() }),
                )
            })
            .collect();

        json!({ "count": records.len(), "fields": fields })
    }
}
