use std::sync::atomic::{AtomicU64, Ordering};

use strata_geom::Vec3;

/// Horizontal viewer position shared between the render and world threads.
/// Both floats live in one word so a read never sees a torn update.
#[derive(Debug, Default)]
pub struct ViewerPosition(AtomicU64);

impl ViewerPosition {
    pub fn new(x: f32, z: f32) -> Self {
        Self(AtomicU64::new(pack(x, z)))
    }

    #[inline]
    pub fn store(&self, x: f32, z: f32) {
        self.0.store(pack(x, z), Ordering::Release);
    }

    #[inline]
    pub fn load(&self) -> (f32, f32) {
        let bits = self.0.load(Ordering::Acquire);
        (f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
    }

    /// Position at ground level, for chunk lookups.
    pub fn as_vec3(&self) -> Vec3 {
        let (x, z) = self.load();
        Vec3::new(x, 0.0, z)
    }
}

#[inline]
fn pack(x: f32, z: f32) -> u64 {
    (u64::from(x.to_bits()) << 32) | u64::from(z.to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_both_components() {
        let v = ViewerPosition::new(-12.5, 3.25);
        assert_eq!(v.load(), (-12.5, 3.25));
        v.store(f32::MAX, -0.0);
        let (x, z) = v.load();
        assert_eq!(x, f32::MAX);
        assert!(z == 0.0 && z.is_sign_negative());
    }
}
