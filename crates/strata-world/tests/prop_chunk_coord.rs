use proptest::prelude::*;
use strata_world::{ChunkCoord, ChunkDims};

fn dims() -> impl Strategy<Value = ChunkDims> {
    (1usize..=32, 1usize..=64, 1usize..=32).prop_map(|(x, y, z)| ChunkDims::new(x, y, z))
}

fn world_i32() -> impl Strategy<Value = i32> {
    -1_000_000i32..=1_000_000
}

proptest! {
    // Moving one chunk width along x or z moves the chunk coordinate by exactly one.
    #[test]
    fn translation_by_chunk_size_shifts_coord(d in dims(), wx in world_i32(), wz in world_i32()) {
        let c = ChunkCoord::from_world(wx, wz, d);
        let sx = d.sx as i32;
        let sz = d.sz as i32;
        prop_assert_eq!(ChunkCoord::from_world(wx + sx, wz, d), c.offset(1, 0));
        prop_assert_eq!(ChunkCoord::from_world(wx - sx, wz, d), c.offset(-1, 0));
        prop_assert_eq!(ChunkCoord::from_world(wx, wz + sz, d), c.offset(0, 1));
        prop_assert_eq!(ChunkCoord::from_world(wx, wz - sz, d), c.offset(0, -1));
    }

    // Chunk offset + local position reconstructs the world position.
    #[test]
    fn split_world_roundtrips(d in dims(), wx in world_i32(), wz in world_i32(), wy in 0i32..64) {
        prop_assume!((wy as usize) < d.sy);
        let (c, l) = d.split_world(wx, wy, wz).unwrap();
        let [ox, oy, oz] = c.world_offset(d);
        prop_assert_eq!(ox + l.x as i32, wx);
        prop_assert_eq!(oy + l.y as i32, wy);
        prop_assert_eq!(oz + l.z as i32, wz);
        prop_assert!(l.x < d.sx && l.z < d.sz);
    }
}

#[test]
fn zero_boundary_is_floor_not_truncation() {
    let d = ChunkDims::new(16, 128, 16);
    assert_eq!(ChunkCoord::from_world(-1, 0, d).x, -1);
    assert_eq!(ChunkCoord::from_world(0, 0, d).x, 0);
    assert_eq!(ChunkCoord::from_world(-16, 0, d).x, -1);
    assert_eq!(ChunkCoord::from_world(-17, 0, d).x, -2);
}
