use proptest::prelude::*;
use strata_chunk::{ChunkBuf, ChunkNeighbors};
use strata_world::{ChunkCoord, ChunkDims};

fn dim() -> impl Strategy<Value = usize> {
    1usize..=8
}

fn small_i32() -> impl Strategy<Value = i32> {
    -100_000i32..=100_000
}

fn numbered(coord: ChunkCoord, dims: ChunkDims) -> ChunkBuf {
    let blocks = (0..dims.volume()).map(|i| (i % 65_535) as u16).collect();
    ChunkBuf::from_blocks_local(coord, dims, blocks)
}

proptest! {
    #[test]
    fn idx_is_unique_and_in_range(sx in dim(), sy in dim(), sz in dim()) {
        let dims = ChunkDims::new(sx, sy, sz);
        let buf = ChunkBuf::new_empty(ChunkCoord::new(0, 0), dims);
        let mut seen = vec![false; dims.volume()];
        for z in 0..sz { for y in 0..sy { for x in 0..sx {
            let i = buf.idx(x, y, z);
            prop_assert_eq!(i, x + sx * (y + sy * z));
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    #[test]
    fn set_then_get_reads_back(sx in dim(), sy in dim(), sz in dim(), id in 1u16..100, seed in any::<u64>()) {
        let dims = ChunkDims::new(sx, sy, sz);
        let mut buf = ChunkBuf::new_empty(ChunkCoord::new(0, 0), dims);
        let x = (seed as usize) % sx;
        let y = (seed as usize / 7) % sy;
        let z = (seed as usize / 49) % sz;
        buf.set_local(x, y, z, id);
        prop_assert_eq!(buf.get_local(x, y, z), id);
        prop_assert_eq!(buf.blocks.iter().filter(|b| **b != 0).count(), 1);
    }

    #[test]
    fn get_world_matches_local(cx in small_i32(), cz in small_i32(), sx in dim(), sy in dim(), sz in dim()) {
        let dims = ChunkDims::new(sx, sy, sz);
        let buf = numbered(ChunkCoord::new(cx, cz), dims);
        let [x0, _, z0] = buf.world_offset();
        let (sxi, syi, szi) = (sx as i32, sy as i32, sz as i32);
        let inside = [(x0, 0, z0), (x0 + sxi - 1, syi - 1, z0 + szi - 1)];
        for (wx, wy, wz) in inside {
            let local = buf.get_local((wx - x0) as usize, wy as usize, (wz - z0) as usize);
            prop_assert_eq!(buf.get_world(wx, wy, wz), Some(local));
        }
        let outside = [(x0 - 1, 0, z0), (x0 + sxi, 0, z0), (x0, -1, z0), (x0, syi, z0), (x0, 0, z0 + szi)];
        for (wx, wy, wz) in outside {
            prop_assert!(!buf.contains_world(wx, wy, wz));
            prop_assert_eq!(buf.get_world(wx, wy, wz), None);
        }
    }

    #[test]
    fn block_at_inside_matches_get_local(sx in dim(), sy in dim(), sz in dim()) {
        let dims = ChunkDims::new(sx, sy, sz);
        let buf = numbered(ChunkCoord::new(3, -2), dims);
        let nb = ChunkNeighbors::none();
        for z in 0..sz { for y in 0..sy { for x in 0..sx {
            prop_assert_eq!(buf.block_at(&nb, x as i32, y as i32, z as i32), buf.get_local(x, y, z));
        }}}
    }
}

#[test]
fn from_blocks_local_fits_length_to_volume() {
    let dims = ChunkDims::new(2, 2, 2);
    let short = ChunkBuf::from_blocks_local(ChunkCoord::new(0, 0), dims, vec![5; 3]);
    assert_eq!(short.blocks.len(), 8);
    assert_eq!(short.blocks[7], 0);
    let long = ChunkBuf::from_blocks_local(ChunkCoord::new(0, 0), dims, vec![5; 20]);
    assert_eq!(long.blocks.len(), 8);
    assert!(long.is_populated());
}
