//! Colour selection for assembled primitives.
//!
//! Colours carry no meaning beyond telling parts apart, so the default policy
//! is random. Tests pin colours with [`FixedColours`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scan::SilhouetteView;

/// RGBA in linear 0..1.
pub type Rgba = [f32; 4];

pub trait ColourPolicy: Send + Sync + 'static {
    /// Called once at the start of every build pass.
    fn begin_build(&mut self) {}

    /// Colour shared by every layer of one body part.
    fn body_part_colour(&mut self, part: usize) -> Rgba;

    /// Colour shared by every silhouette of one view within a build.
    fn silhouette_colour(&mut self, view: SilhouetteView) -> Rgba;

    /// Per-triangle colour of a surface region.
    fn triangle_colour(&mut self, region: usize, triangle: usize) -> Rgba;

    /// Colour for a sample that carries none of its own.
    fn point_colour(&mut self, sensor: usize, point: usize) -> Rgba;
}

/// Random hues, seeded for reproducibility or from entropy.
pub struct RandomColours {
    rng: StdRng,
    base: [f32; 3],
    alpha_range: (f32, f32),
    front: Rgba,
    side: Rgba,
}

impl RandomColours {
    pub fn new(seed: Option<u64>, base: [f32; 3], alpha_range: (f32, f32)) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (lo, hi) = alpha_range;
        Self {
            rng,
            base,
            alpha_range: (lo.min(hi), lo.max(hi)),
            front: [1.0; 4],
            side: [1.0; 4],
        }
    }

    fn random_rgb(&mut self) -> Rgba {
        [self.rng.r#gen(), self.rng.r#gen(), self.rng.r#gen(), 1.0]
    }
}

impl ColourPolicy for RandomColours {
    fn begin_build(&mut self) {
        self.front = self.random_rgb();
        self.side = self.random_rgb();
    }

    fn body_part_colour(&mut self, _part: usize) -> Rgba {
        self.random_rgb()
    }

    fn silhouette_colour(&mut self, view: SilhouetteView) -> Rgba {
        match view {
            SilhouetteView::Front => self.front,
            SilhouetteView::Side => self.side,
        }
    }

    fn triangle_colour(&mut self, _region: usize, _triangle: usize) -> Rgba {
        let (lo, hi) = self.alpha_range;
        let alpha = if hi > lo { self.rng.gen_range(lo..=hi) } else { lo };
        [self.base[0], self.base[1], self.base[2], alpha]
    }

    fn point_colour(&mut self, _sensor: usize, _point: usize) -> Rgba {
        self.random_rgb()
    }
}

/// Same colour for everything of a given class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedColours {
    pub layer: Rgba,
    pub front: Rgba,
    pub side: Rgba,
    pub triangle: Rgba,
    pub point: Rgba,
}

impl Default for FixedColours {
    fn default() -> Self {
        Self {
            layer: [1.0, 1.0, 1.0, 1.0],
            front: [1.0, 0.0, 0.0, 1.0],
            side: [0.0, 0.0, 1.0, 1.0],
            triangle: [0.8, 0.55, 0.45, 0.5],
            point: [0.0, 1.0, 0.0, 1.0],
        }
    }
}

impl ColourPolicy for FixedColours {
    fn body_part_colour(&mut self, _part: usize) -> Rgba {
        self.layer
    }

    fn silhouette_colour(&mut self, view: SilhouetteView) -> Rgba {
        match view {
            SilhouetteView::Front => self.front,
            SilhouetteView::Side => self.side,
        }
    }

    fn triangle_colour(&mut self, _region: usize, _triangle: usize) -> Rgba {
        self.triangle
    }

    fn point_colour(&mut self, _sensor: usize, _point: usize) -> Rgba {
        self.point
    }
}
