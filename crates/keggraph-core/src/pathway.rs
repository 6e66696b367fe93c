//! Structural pathway description, as supplied by the markup reader.

use serde::{Deserialize, Serialize};

use crate::graph::{Colors, Geometry, NodeKind};

/// Pathway number of the aggregated "Metabolic pathways" global map.
pub const GLOBAL_MAP_NUMBER: &str = "01100";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathwayDescription {
    /// Pathway identifier (`path:map00010`).
    pub name: String,
    /// Numeric code (`00010`).
    pub number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub entries: Vec<EntryRecord>,
    #[serde(default)]
    pub relations: Vec<RelationRecord>,
    #[serde(default)]
    pub reactions: Vec<ReactionRecord>,
}

impl PathwayDescription {
    pub fn is_global_map(&self) -> bool {
        self.number == GLOBAL_MAP_NUMBER
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: String,
    /// Whitespace-separated external IDs (`hsa:3098 hsa:3099`).
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub reaction: Option<String>,
    #[serde(default)]
    pub graphics: Option<Graphics>,
}

/// First graphics element of an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graphics {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub fgcolor: Option<String>,
    #[serde(default)]
    pub bgcolor: Option<String>,
}

impl Graphics {
    pub fn geometry(&self) -> Geometry {
        Geometry {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn colors(&self) -> Colors {
        Colors {
            foreground: self.fgcolor.clone(),
            background: self.bgcolor.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub entry1: String,
    pub entry2: String,
    #[serde(rename = "type")]
    pub relation_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    /// Entry ID of the reaction's own node.
    pub id: String,
    /// Reaction identifier(s) (`rn:R00710`).
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub reaction_type: String,
    #[serde(default)]
    pub substrates: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
}
