/// Index into a [`BlockRegistry`](crate::BlockRegistry). Id 0 is always air.
pub type BlockId = u16;

pub const AIR: BlockId = 0;

/// The six axis-aligned faces of a voxel. The discriminant is the face-normal
/// index written into mesh vertices.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Top = 0,
    Bottom = 1,
    /// -Z
    North = 2,
    /// +Z
    South = 3,
    /// -X
    West = 4,
    /// +X
    East = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::North,
        Face::South,
        Face::West,
        Face::East,
    ];

    /// The four faces that can border another chunk.
    pub const HORIZONTAL: [Face; 4] = [Face::North, Face::South, Face::West, Face::East];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<Face> {
        Face::ALL.get(i).copied()
    }

    /// Grid step `(dx, dy, dz)` when leaving the voxel through this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::Top => (0, 1, 0),
            Face::Bottom => (0, -1, 0),
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::West => (-1, 0, 0),
            Face::East => (1, 0, 0),
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        !matches!(self, Face::Top | Face::Bottom)
    }
}

/// Texture atlas index per face.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BlockFaces {
    pub top: u16,
    pub bottom: u16,
    pub north: u16,
    pub south: u16,
    pub west: u16,
    pub east: u16,
}

impl BlockFaces {
    pub const fn all(tex: u16) -> Self {
        Self {
            top: tex,
            bottom: tex,
            north: tex,
            south: tex,
            west: tex,
            east: tex,
        }
    }

    /// Pillar-style blocks: one texture for top and bottom, another for the sides.
    pub const fn column(top_bottom: u16, sides: u16) -> Self {
        Self {
            top: top_bottom,
            bottom: top_bottom,
            north: sides,
            south: sides,
            west: sides,
            east: sides,
        }
    }

    #[inline]
    pub fn get(&self, face: Face) -> u16 {
        match face {
            Face::Top => self.top,
            Face::Bottom => self.bottom,
            Face::North => self.north,
            Face::South => self.south,
            Face::West => self.west,
            Face::East => self.east,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockProperties {
    pub name: String,
    pub is_solid: bool,
    pub is_translucent: bool,
    pub textures: BlockFaces,
}

impl BlockProperties {
    pub fn solid(name: impl Into<String>, textures: BlockFaces) -> Self {
        Self {
            name: name.into(),
            is_solid: true,
            is_translucent: false,
            textures,
        }
    }

    pub fn fluid(name: impl Into<String>, textures: BlockFaces) -> Self {
        Self {
            name: name.into(),
            is_solid: false,
            is_translucent: true,
            textures,
        }
    }

    #[inline]
    pub fn material_class(&self) -> MaterialClass {
        if self.is_translucent {
            MaterialClass::Translucent
        } else {
            MaterialClass::Opaque
        }
    }
}

/// Draw-pass grouping: opaque geometry writes depth, translucent geometry is
/// blended afterwards with depth test only.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MaterialClass {
    Opaque = 0,
    Translucent = 1,
}

impl MaterialClass {
    pub const ALL: [MaterialClass; 2] = [MaterialClass::Opaque, MaterialClass::Translucent];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}
