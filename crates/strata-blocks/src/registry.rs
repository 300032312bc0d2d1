use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use super::config::BlocksConfig;
use super::types::{AIR, BlockFaces, BlockId, BlockProperties, Face, MaterialClass};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateName(String),
    TooManyBlocks,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateName(name) => write!(f, "block `{name}` registered twice"),
            RegistryError::TooManyBlocks => write!(f, "block id space exhausted"),
        }
    }
}

impl Error for RegistryError {}

/// Append-only table of block properties. Ids are handed out sequentially by
/// [`BlockRegistry::register`]; id 0 is `air`.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    blocks: Vec<BlockProperties>,
    by_name: HashMap<String, BlockId>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    pub fn new() -> Self {
        let mut reg = Self {
            blocks: Vec::new(),
            by_name: HashMap::new(),
        };
        reg.blocks.push(BlockProperties {
            name: "air".to_string(),
            is_solid: false,
            is_translucent: true,
            textures: BlockFaces::all(0),
        });
        reg.by_name.insert("air".to_string(), AIR);
        reg
    }

    /// The default terrain set.
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        let defs = [
            BlockProperties::solid("grass", BlockFaces::column(2, 3)),
            BlockProperties::solid("dirt", BlockFaces::all(4)),
            BlockProperties::fluid("water", BlockFaces::all(7)),
            BlockProperties::solid("sand", BlockFaces::all(1)),
            BlockProperties::solid("stone", BlockFaces::all(0)),
        ];
        for def in defs {
            let registered = reg.register(def);
            debug_assert!(registered.is_ok(), "builtin block set is valid: {registered:?}");
        }
        reg
    }

    pub fn register(&mut self, props: BlockProperties) -> Result<BlockId, RegistryError> {
        if self.by_name.contains_key(&props.name) {
            return Err(RegistryError::DuplicateName(props.name));
        }
        let id = BlockId::try_from(self.blocks.len()).map_err(|_| RegistryError::TooManyBlocks)?;
        self.by_name.insert(props.name.clone(), id);
        self.blocks.push(props);
        Ok(id)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = Self::new();
        for def in cfg.blocks {
            if def.name == "air" {
                continue;
            }
            reg.register(BlockProperties {
                textures: def.textures.map(|t| t.to_faces()).unwrap_or_default(),
                name: def.name,
                is_solid: def.solid,
                is_translucent: def.translucent,
            })?;
        }
        Ok(reg)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Ok(Self::from_config(cfg)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockProperties> {
        self.blocks.get(id as usize)
    }

    /// Properties for an id obtained from this registry. Panics on an unknown
    /// id: that is a caller bug, not a runtime condition.
    #[inline]
    pub fn props(&self, id: BlockId) -> &BlockProperties {
        match self.blocks.get(id as usize) {
            Some(p) => p,
            None => panic!(
                "InvalidBlockId: {id} (registry holds {} blocks)",
                self.blocks.len()
            ),
        }
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &BlockProperties)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, p)| (i as BlockId, p))
    }

    #[inline]
    pub fn is_air(&self, id: BlockId) -> bool {
        id == AIR
    }

    #[inline]
    pub fn is_solid(&self, id: BlockId) -> bool {
        self.props(id).is_solid
    }

    #[inline]
    pub fn is_translucent(&self, id: BlockId) -> bool {
        self.props(id).is_translucent
    }

    #[inline]
    pub fn material_class(&self, id: BlockId) -> MaterialClass {
        self.props(id).material_class()
    }

    #[inline]
    pub fn texture_index(&self, id: BlockId, face: Face) -> u16 {
        self.props(id).textures.get(face)
    }

    /// Like [`texture_index`](Self::texture_index) for a raw face index;
    /// indices outside `0..6` map to texture 0.
    pub fn texture_index_raw(&self, id: BlockId, face_index: usize) -> u16 {
        match Face::from_index(face_index) {
            Some(face) => self.texture_index(id, face),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_assigns_sequential_ids_after_air() {
        let reg = BlockRegistry::builtin();
        let names: Vec<&str> = reg.iter().map(|(_, p)| p.name.as_str()).collect();
        assert_eq!(names, ["air", "grass", "dirt", "water", "sand", "stone"]);
        assert_eq!(reg.id_by_name("air"), Some(AIR));
        assert_eq!(reg.id_by_name("stone"), Some(5));
        assert_eq!(reg.len(), 6);
        assert!(reg.iter().all(|(id, p)| reg.id_by_name(&p.name) == Some(id)));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut reg = BlockRegistry::new();
        let id = reg
            .register(BlockProperties::solid("brick", BlockFaces::all(9)))
            .unwrap();
        assert_eq!(id, 1);
        let err = reg
            .register(BlockProperties::solid("brick", BlockFaces::all(10)))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("brick".into()));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    #[should_panic(expected = "InvalidBlockId")]
    fn props_panics_on_unknown_id() {
        let reg = BlockRegistry::new();
        let _ = reg.props(42);
    }

    #[test]
    fn grass_uses_column_textures() {
        let reg = BlockRegistry::builtin();
        let grass = reg.id_by_name("grass").unwrap();
        assert_eq!(reg.texture_index(grass, Face::Top), 2);
        assert_eq!(reg.texture_index(grass, Face::Bottom), 2);
        assert_eq!(reg.texture_index(grass, Face::East), 3);
        assert_eq!(reg.texture_index_raw(grass, 4), 3);
        assert_eq!(reg.texture_index_raw(grass, 6), 0);
    }
}
