use proptest::prelude::*;
use strata_edit::{MarchParams, affected_chunks, march_first_solid};
use strata_geom::Vec3;
use strata_world::{ChunkCoord, ChunkDims, LocalPos};

fn dims() -> impl Strategy<Value = ChunkDims> {
    (2usize..=16, 1usize..=32, 2usize..=16).prop_map(|(sx, sy, sz)| ChunkDims::new(sx, sy, sz))
}

proptest! {
    #[test]
    fn affected_chunks_are_owner_plus_adjacent(d in dims(), cx in -1000i32..1000, cz in -1000i32..1000, seed in any::<u64>()) {
        let local = LocalPos::new(
            (seed as usize) % d.sx,
            (seed as usize / 31) % d.sy,
            (seed as usize / 997) % d.sz,
        );
        let owner = ChunkCoord::new(cx, cz);
        let got = affected_chunks(owner, local, d);
        prop_assert_eq!(got[0], owner);
        prop_assert!(got.len() <= 3);
        for c in &got[1..] {
            prop_assert_eq!((c.x - owner.x).abs() + (c.z - owner.z).abs(), 1);
        }
        let on_x_edge = local.x == 0 || local.x + 1 == d.sx;
        let on_z_edge = local.z == 0 || local.z + 1 == d.sz;
        prop_assert_eq!(got.len(), 1 + on_x_edge as usize + on_z_edge as usize);
    }

    #[test]
    fn hit_lies_within_reach(ox in -50.0f32..50.0, oy in -50.0f32..50.0, oz in -50.0f32..50.0,
                             dx in -1.0f32..1.0, dy in -1.0f32..1.0, dz in -1.0f32..1.0) {
        prop_assume!(dx.abs() + dy.abs() + dz.abs() > 0.1);
        let origin = Vec3::new(ox, oy, oz);
        let params = MarchParams::default();
        // Everything below y = oy - 2 is solid.
        let floor = (oy - 2.0).floor() as i32;
        let hit = march_first_solid(origin, Vec3::new(dx, dy, dz), params, |_, y, _| y < floor);
        if let Some(h) = hit {
            let center = Vec3::new(h.block.0 as f32 + 0.5, h.block.1 as f32 + 0.5, h.block.2 as f32 + 0.5);
            prop_assert!((center - origin).length() <= params.reach + 1.0);
            prop_assert!(h.block.1 < floor);
        }
    }
}
