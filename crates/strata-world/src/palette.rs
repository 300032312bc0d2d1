use std::error::Error;
use std::fmt;

use strata_blocks::types::AIR;
use strata_blocks::{BlockId, BlockRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingBlock(pub String);

impl fmt::Display for MissingBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "terrain needs block `{}` but the registry has none", self.0)
    }
}

impl Error for MissingBlock {}

/// Block ids used by terrain population, resolved once by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainPalette {
    pub air: BlockId,
    pub grass: BlockId,
    pub dirt: BlockId,
    pub stone: BlockId,
    pub sand: BlockId,
    pub water: BlockId,
}

impl TerrainPalette {
    pub fn resolve(reg: &BlockRegistry) -> Result<Self, MissingBlock> {
        let id = |name: &str| reg.id_by_name(name).ok_or_else(|| MissingBlock(name.to_string()));
        Ok(Self {
            air: AIR,
            grass: id("grass")?,
            dirt: id("dirt")?,
            stone: id("stone")?,
            sand: id("sand")?,
            water: id("water")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_blocks::{BlockFaces, BlockProperties};

    #[test]
    fn builtin_registry_resolves() {
        let reg = BlockRegistry::builtin();
        let p = TerrainPalette::resolve(&reg).unwrap();
        assert_eq!(p.air, AIR);
        assert_eq!(reg.props(p.water).name, "water");
        assert_eq!(reg.props(p.stone).name, "stone");
    }

    #[test]
    fn missing_block_is_reported_by_name() {
        let mut reg = BlockRegistry::new();
        reg.register(BlockProperties::solid("grass", BlockFaces::all(1)))
            .unwrap();
        let err = TerrainPalette::resolve(&reg).unwrap_err();
        assert_eq!(err, MissingBlock("dirt".into()));
    }
}
