use rand::{Rng, SeedableRng, rngs::StdRng};

/// Immutable per-class display colors for a renderer.
///
/// Constructed explicitly from a seed so every run (and every process) draws
/// a given class in the same color. Not consulted by any detection stage.
#[derive(Debug, Clone)]
pub struct ClassPalette {
    colors: Vec<[u8; 3]>,
}

impl ClassPalette {
    pub fn new(num_classes: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let colors = (0..num_classes)
            .map(|_| {
                [
                    rng.random_range(0..=255),
                    rng.random_range(0..=255),
                    rng.random_range(0..=255),
                ]
            })
            .collect();
        Self { colors }
    }

    /// RGB color for a class id; out-of-range ids fall back to white.
    pub fn color(&self, class_id: u32) -> [u8; 3] {
        self.colors
            .get(class_id as usize)
            .copied()
            .unwrap_or([255, 255, 255])
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
