use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::worldgen::TerrainConfig;

/// Scalar field sampled per voxel during terrain population. Positive values
/// lean solid, negative values lean air.
pub trait DensityField: Send + Sync {
    fn density(&self, wx: f32, wy: f32, wz: f32) -> f32;
}

impl<F> DensityField for F
where
    F: Fn(f32, f32, f32) -> f32 + Send + Sync,
{
    #[inline]
    fn density(&self, wx: f32, wy: f32, wz: f32) -> f32 {
        self(wx, wy, wz)
    }
}

/// Heightmap density: `(surface(x, z) - y) / amplitude` plus a small 3D
/// detail term.
pub struct NoiseDensity {
    height: FastNoiseLite,
    detail: FastNoiseLite,
    base_height: f32,
    amplitude: f32,
    detail_weight: f32,
}

impl NoiseDensity {
    pub fn new(cfg: &TerrainConfig) -> Self {
        let mut height = FastNoiseLite::with_seed(cfg.seed);
        height.set_noise_type(Some(NoiseType::Perlin));
        height.set_frequency(Some(cfg.frequency));
        height.set_fractal_type(Some(FractalType::FBm));
        height.set_fractal_octaves(Some(cfg.octaves.max(1)));
        let mut detail = FastNoiseLite::with_seed(cfg.seed ^ 0x5EED_D17A);
        detail.set_noise_type(Some(NoiseType::OpenSimplex2));
        detail.set_frequency(Some(cfg.detail_frequency));
        Self {
            height,
            detail,
            base_height: cfg.base_height,
            amplitude: cfg.amplitude.max(1.0),
            detail_weight: cfg.detail_weight,
        }
    }

    /// Surface height of the column at `(wx, wz)` ignoring the detail term.
    #[inline]
    pub fn surface_height(&self, wx: f32, wz: f32) -> f32 {
        self.base_height + self.height.get_noise_2d(wx, wz) * self.amplitude
    }
}

impl DensityField for NoiseDensity {
    fn density(&self, wx: f32, wy: f32, wz: f32) -> f32 {
        let h = (self.surface_height(wx, wz) - wy) / self.amplitude;
        if self.detail_weight == 0.0 {
            return h;
        }
        h + self.detail.get_noise_3d(wx, wy, wz) * self.detail_weight
    }
}
