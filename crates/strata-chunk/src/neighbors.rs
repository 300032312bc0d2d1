use strata_blocks::BlockId;
use strata_blocks::types::{AIR, Face};
use strata_world::ChunkCoord;

use crate::ChunkBuf;

/// Coordinates of the adjacent chunks, indexed by [`Face::index`]. Top and
/// bottom never link since the world is one chunk tall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborLinks([Option<ChunkCoord>; 6]);

impl NeighborLinks {
    /// Links every horizontal face for which `loaded` returns true.
    pub fn from_loaded(center: ChunkCoord, mut loaded: impl FnMut(ChunkCoord) -> bool) -> Self {
        let mut links = Self::default();
        for face in Face::HORIZONTAL {
            if let Some(c) = center.neighbor(face) {
                if loaded(c) {
                    links.0[face.index()] = Some(c);
                }
            }
        }
        links
    }

    #[inline]
    pub fn get(&self, face: Face) -> Option<ChunkCoord> {
        self.0[face.index()]
    }

    #[inline]
    pub fn set(&mut self, face: Face, coord: Option<ChunkCoord>) {
        self.0[face.index()] = coord;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Face, ChunkCoord)> + '_ {
        Face::ALL
            .into_iter()
            .filter_map(|f| self.0[f.index()].map(|c| (f, c)))
    }

    pub(crate) fn horizontal_only(mut self) -> Self {
        self.0[Face::Top.index()] = None;
        self.0[Face::Bottom.index()] = None;
        self
    }
}

/// Borrowed view of the chunks next to one chunk, resolved from its links at
/// the moment of use. A missing entry reads as air.
#[derive(Clone, Copy, Default)]
pub struct ChunkNeighbors<'a> {
    chunks: [Option<&'a ChunkBuf>; 6],
}

impl<'a> ChunkNeighbors<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    /// Resolves `links` through `lookup`. Links whose target is gone are
    /// dropped.
    pub fn resolve(
        links: &NeighborLinks,
        mut lookup: impl FnMut(ChunkCoord) -> Option<&'a ChunkBuf>,
    ) -> Self {
        let mut chunks = [None; 6];
        for (face, coord) in links.iter() {
            chunks[face.index()] = lookup(coord);
        }
        Self { chunks }
    }

    #[inline]
    pub fn get(&self, face: Face) -> Option<&'a ChunkBuf> {
        self.chunks[face.index()]
    }

    #[inline]
    pub fn with(mut self, face: Face, chunk: &'a ChunkBuf) -> Self {
        self.chunks[face.index()] = Some(chunk);
        self
    }
}

impl ChunkBuf {
    /// Block at a chunk-local coordinate that may sit one step outside the
    /// chunk. Out-of-range y is air. Out-of-range x or z reads the neighbor
    /// on that side at the wrapped position, or air when it is not linked.
    /// Only one horizontal axis may overflow at a time.
    pub fn block_at(&self, nb: &ChunkNeighbors<'_>, x: i32, y: i32, z: i32) -> BlockId {
        if y < 0 || y >= self.dims.sy as i32 {
            return AIR;
        }
        let sx = self.dims.sx as i32;
        let sz = self.dims.sz as i32;
        let (face, lx, lz) = if x < 0 {
            (Face::West, x + sx, z)
        } else if x >= sx {
            (Face::East, x - sx, z)
        } else if z < 0 {
            (Face::North, x, z + sz)
        } else if z >= sz {
            (Face::South, x, z - sz)
        } else {
            return self.get_local(x as usize, y as usize, z as usize);
        };
        if !(0..sx).contains(&lx) || !(0..sz).contains(&lz) {
            return AIR;
        }
        match nb.get(face) {
            Some(n) => n.get_local(lx as usize, y as usize, lz as usize),
            None => AIR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_world::ChunkDims;

    const DIMS: ChunkDims = ChunkDims::new(4, 8, 4);

    fn filled(coord: ChunkCoord, id: BlockId) -> ChunkBuf {
        ChunkBuf::from_blocks_local(coord, DIMS, vec![id; DIMS.volume()])
    }

    #[test]
    fn from_loaded_skips_missing_and_vertical() {
        let c = ChunkCoord::new(0, 0);
        let links = NeighborLinks::from_loaded(c, |n| n == ChunkCoord::new(1, 0));
        assert_eq!(links.get(Face::East), Some(ChunkCoord::new(1, 0)));
        assert_eq!(links.get(Face::West), None);
        assert_eq!(links.get(Face::Top), None);
        assert_eq!(links.iter().count(), 1);
    }

    #[test]
    fn set_neighbors_drops_vertical_links() {
        let mut buf = ChunkBuf::new_empty(ChunkCoord::new(0, 0), DIMS);
        let mut links = NeighborLinks::default();
        links.set(Face::Top, Some(ChunkCoord::new(9, 9)));
        links.set(Face::North, Some(ChunkCoord::new(0, -1)));
        buf.set_neighbors(links);
        assert_eq!(buf.links().get(Face::Top), None);
        assert_eq!(buf.links().get(Face::North), Some(ChunkCoord::new(0, -1)));
    }

    #[test]
    fn block_at_wraps_into_linked_neighbor() {
        let center = ChunkCoord::new(0, 0);
        let mut buf = filled(center, 0);
        buf.set_local(3, 2, 1, 7);
        let mut east = filled(ChunkCoord::new(1, 0), 0);
        east.set_local(0, 2, 1, 5);
        let mut north = filled(ChunkCoord::new(0, -1), 0);
        north.set_local(2, 3, 3, 6);

        let nb = ChunkNeighbors::none()
            .with(Face::East, &east)
            .with(Face::North, &north);
        assert_eq!(buf.block_at(&nb, 3, 2, 1), 7);
        assert_eq!(buf.block_at(&nb, 4, 2, 1), 5);
        assert_eq!(buf.block_at(&nb, 2, 3, -1), 6);
        // West and south are unlinked.
        assert_eq!(buf.block_at(&nb, -1, 2, 1), AIR);
        assert_eq!(buf.block_at(&nb, 1, 2, 4), AIR);
    }

    #[test]
    fn block_at_treats_vertical_overflow_as_air() {
        let buf = filled(ChunkCoord::new(0, 0), 3);
        let nb = ChunkNeighbors::none();
        assert_eq!(buf.block_at(&nb, 0, -1, 0), AIR);
        assert_eq!(buf.block_at(&nb, 0, 8, 0), AIR);
        assert_eq!(buf.block_at(&nb, 0, 7, 0), 3);
    }

    #[test]
    fn resolve_drops_links_to_unloaded_chunks() {
        let center = ChunkCoord::new(2, 2);
        let west = filled(ChunkCoord::new(1, 2), 4);
        let links = NeighborLinks::from_loaded(center, |_| true);
        let nb = ChunkNeighbors::resolve(&links, |c| (c == west.coord).then_some(&west));
        assert!(nb.get(Face::West).is_some());
        assert!(nb.get(Face::East).is_none());
        assert!(nb.get(Face::South).is_none());
    }
}
