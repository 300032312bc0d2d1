use serde::Deserialize;
use strata_blocks::Face;

/// Voxel extent of every chunk in a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ChunkDims {
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self::new(16, 128, 16)
    }
}

impl ChunkDims {
    #[inline]
    pub const fn new(sx: usize, sy: usize, sz: usize) -> Self {
        Self { sx, sy, sz }
    }

    #[inline]
    pub const fn volume(self) -> usize {
        self.sx * self.sy * self.sz
    }

    #[inline]
    pub fn contains(self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.sx
            && (y as usize) < self.sy
            && (z as usize) < self.sz
    }

    /// Splits a world block position into its chunk and in-chunk position.
    /// `None` when `wy` lies outside the single vertical chunk layer.
    pub fn split_world(self, wx: i32, wy: i32, wz: i32) -> Option<(ChunkCoord, LocalPos)> {
        if wy < 0 || wy as usize >= self.sy {
            return None;
        }
        let coord = ChunkCoord::from_world(wx, wz, self);
        let local = LocalPos {
            x: wx.rem_euclid(self.sx as i32) as usize,
            y: wy as usize,
            z: wz.rem_euclid(self.sz as i32) as usize,
        };
        Some((coord, local))
    }
}

/// Position of a voxel inside its chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl LocalPos {
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Horizontal faces of the chunk this voxel sits on.
    pub fn boundary_faces(self, dims: ChunkDims) -> impl Iterator<Item = Face> {
        let on = [
            (Face::West, self.x == 0),
            (Face::East, self.x + 1 == dims.sx),
            (Face::North, self.z == 0),
            (Face::South, self.z + 1 == dims.sz),
        ];
        on.into_iter().filter_map(|(f, hit)| hit.then_some(f))
    }
}

/// Largest horizontal block distance from the origin a viewer position maps
/// to. Chunk and block arithmetic is plain `i32` and assumes this range.
pub const WORLD_LIMIT: i32 = 1 << 24;

/// Horizontal chunk index; chunks span the full world height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Floor division, so world x = -1 lands in chunk -1.
    #[inline]
    pub fn from_world(wx: i32, wz: i32, dims: ChunkDims) -> Self {
        Self {
            x: wx.div_euclid(dims.sx as i32),
            z: wz.div_euclid(dims.sz as i32),
        }
    }

    /// Float positions are clamped to `±WORLD_LIMIT`; NaN maps to 0.
    #[inline]
    pub fn from_world_f32(wx: f32, wz: f32, dims: ChunkDims) -> Self {
        let clamp = |v: f32| (v.floor() as i32).clamp(-WORLD_LIMIT, WORLD_LIMIT);
        Self::from_world(clamp(wx), clamp(wz), dims)
    }

    /// World-space block offset of local (0, 0, 0).
    #[inline]
    pub fn world_offset(self, dims: ChunkDims) -> [i32; 3] {
        [self.x * dims.sx as i32, 0, self.z * dims.sz as i32]
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Adjacent chunk across a horizontal face; `None` for top and bottom.
    #[inline]
    pub fn neighbor(self, face: Face) -> Option<Self> {
        if !face.is_horizontal() {
            return None;
        }
        let (dx, _, dz) = face.delta();
        Some(self.offset(dx, dz))
    }

    #[inline]
    pub fn chebyshev(self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// The `(2r+1)^2` coordinates within Chebyshev distance `r`.
    pub fn square_around(self, r: i32) -> impl Iterator<Item = ChunkCoord> {
        let r = r.max(0);
        (-r..=r).flat_map(move |dz| (-r..=r).map(move |dx| self.offset(dx, dz)))
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.x, value.z)
    }
}
