// src/index.rs
//
// Lookup from normalized (name, address) to the registry's store_id,
// built from the cleaned store GeoJSON. Only `properties` is read;
// geometry and every other property are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::sanitize::match_key;
use crate::error::{Error, Result};

/* ---------------- GeoJSON shape (just what we read) ---------------- */

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Properties>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    store_id: Option<StoreId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

/// Registries in the wild carry ids as strings or bare numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoreId {
    Text(String),
    Number(serde_json::Number),
}

impl StoreId {
    fn into_string(self) -> String {
        match self {
            StoreId::Text(s) => s.trim().to_string(),
            StoreId::Number(n) => n.to_string(),
        }
    }
}

/* ---------------- index ---------------- */

#[derive(Clone, Debug, Default)]
pub struct StoreIndex {
    by_key: HashMap<String, String>,
    collisions: usize,
}

impl StoreIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let idx = Self::from_geojson_str(&text)?;
        info!(
            path = %path.display(),
            stores = idx.len(),
            collisions = idx.collisions,
            "store index built"
        );
        Ok(idx)
    }

    /// Features without a store_id are skipped. Missing name or address
    /// reads as empty. On duplicate keys the later feature wins.
    pub fn from_geojson_str(text: &str) -> Result<Self> {
        let fc: FeatureCollection = serde_json::from_str(text)?;
        let mut idx = Self::new();
        let mut skipped = 0usize;

        for props in fc.features.into_iter().map(|f| f.properties.unwrap_or_default()) {
            let id = props.store_id.map(StoreId::into_string).unwrap_or_default();
            if id.is_empty() {
                skipped += 1;
                continue;
            }
            idx.insert(
                props.name.as_deref().unwrap_or(""),
                props.address.as_deref().unwrap_or(""),
                id,
            );
        }
        if skipped > 0 {
            debug!(skipped, "features without store_id ignored");
        }
        Ok(idx)
    }

    pub fn insert(&mut self, name: &str, address: &str, store_id: String) {
        let key = match_key(name, address);
        if let Some(prev) = self.by_key.insert(key, store_id) {
            self.collisions += 1;
            debug!(name, address, replaced = %prev, "duplicate store key; later feature wins");
        }
    }

    pub fn lookup(&self, name: &str, address: &str) -> Option<&str> {
        self.get(&match_key(name, address))
    }

    /// By an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// How many inserts replaced an existing key.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}
