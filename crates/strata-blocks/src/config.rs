use serde::Deserialize;

use crate::types::BlockFaces;

#[derive(Clone, Debug, Deserialize)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub name: String,
    #[serde(default = "default_solid")]
    pub solid: bool,
    #[serde(default)]
    pub translucent: bool,
    #[serde(default)]
    pub textures: Option<TextureDef>,
}

fn default_solid() -> bool {
    true
}

/// `textures = 4`, `textures = { top_bottom = 2, sides = 3 }`, or a table with
/// all six faces.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TextureDef {
    All(u16),
    Column {
        top_bottom: u16,
        sides: u16,
    },
    Faces {
        top: u16,
        bottom: u16,
        north: u16,
        south: u16,
        west: u16,
        east: u16,
    },
}

impl TextureDef {
    pub fn to_faces(&self) -> BlockFaces {
        match *self {
            TextureDef::All(t) => BlockFaces::all(t),
            TextureDef::Column { top_bottom, sides } => BlockFaces::column(top_bottom, sides),
            TextureDef::Faces {
                top,
                bottom,
                north,
                south,
                west,
                east,
            } => BlockFaces {
                top,
                bottom,
                north,
                south,
                west,
                east,
            },
        }
    }
}
