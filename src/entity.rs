//! Entity model: floor components, the replaceable store, and dataset parsing.
//!
//! The viewport only reads an entity's `id` and world position. Everything else
//! the data loader delivers (type, inspection dates, flags) is carried through
//! untouched in `meta` for the popup and search layers.
//!
//! Datasets arrive as JSON, either a bare array of components or an envelope
//! `{ "components": [...], "version": "..." }`. When nothing can be loaded the
//! host falls back to [`Dataset::fallback`].

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bounds::Bounds;
use crate::camera::Point;
use crate::consts::{DATASET_MARGIN_X, DATASET_MARGIN_Y};

/// Unique identifier for a floor component (e.g. `"VX248B"`).
pub type EntityId = String;

/// A floor component as delivered by the data loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// World-space x.
    pub x: f64,
    /// World-space y.
    pub y: f64,
    /// Opaque metadata (`type`, `defaultPosition`, `flammable`, ...).
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl Entity {
    #[must_use]
    pub fn new(id: impl Into<EntityId>, x: f64, y: f64) -> Self {
        Self { id: id.into(), x, y, meta: Map::new() }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Component type label from metadata, if present.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.meta.get("type").and_then(Value::as_str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("entity {id} has a non-finite position")]
    NonFinitePosition { id: EntityId },
}

/// A loaded set of entities plus the dataset version tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub version: Option<String>,
    pub entities: Vec<Entity>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDataset {
    Bare(Vec<Entity>),
    Envelope {
        #[serde(default)]
        components: Vec<Entity>,
        #[serde(default)]
        version: Option<String>,
    },
}

impl Dataset {
    /// Parse a dataset from JSON.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Json` for malformed input and
    /// `DatasetError::NonFinitePosition` for unusable coordinates.
    pub fn parse(json: &str) -> Result<Self, DatasetError> {
        let dataset = match serde_json::from_str::<RawDataset>(json)? {
            RawDataset::Bare(entities) => Self { version: None, entities },
            RawDataset::Envelope { components, version } => Self { version, entities: components },
        };
        if let Some(bad) = dataset
            .entities
            .iter()
            .find(|e| !e.x.is_finite() || !e.y.is_finite())
        {
            return Err(DatasetError::NonFinitePosition { id: bad.id.clone() });
        }
        Ok(dataset)
    }

    /// Built-in components shown when no data source is reachable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            version: Some("offline".into()),
            entities: vec![
                component("VX248B", "Valve", 1240.0, 860.0, "closed", true, "2025-07-28"),
                component("SW102A", "Switch", 740.0, 420.0, "on", false, "2025-06-15"),
                component("HY330C", "Hydrant", 1680.0, 980.0, "closed", false, "2025-05-02"),
                component("EX017D", "Exit", 320.0, 120.0, "open", false, "2025-08-01"),
            ],
        }
    }
}

fn component(
    id: &str,
    kind: &str,
    x: f64,
    y: f64,
    default_position: &str,
    flammable: bool,
    last_inspected: &str,
) -> Entity {
    let mut e = Entity::new(id, x, y);
    e.meta.insert("type".into(), Value::from(kind));
    e.meta.insert("defaultPosition".into(), Value::from(default_position));
    e.meta.insert("flammable".into(), Value::from(flammable));
    e.meta.insert("lastInspected".into(), Value::from(last_inspected));
    e
}

/// The current entity list. Replaced wholesale on every load, never diffed.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new entity list.
    pub fn replace(&mut self, entities: Vec<Entity>) {
        self.entities = entities;
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Entities in input order.
    #[must_use]
    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Floor bounds: entity extent plus the dataset margins, or the fallback
    /// rectangle when there are no entities.
    #[must_use]
    pub fn floor_bounds(&self) -> Bounds {
        Bounds::around(self.entities.iter().map(Entity::position), DATASET_MARGIN_X, DATASET_MARGIN_Y)
            .unwrap_or_else(Bounds::fallback)
    }
}
