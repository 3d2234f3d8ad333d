/// Seeded LCG that drives token placement. `next_f64` yields unit samples in
/// `[0, 1)`, which `SpawnArea::lerp` maps onto the inset spawn rectangle, so a
/// candidate never lands on the far edge. Same seed, same board; not crypto
/// secure.
#[derive(Clone, Debug)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// Seed from the browser crypto source when available, otherwise from
    /// `performance.now()`.
    pub fn from_entropy() -> Self {
        #[cfg(feature = "rng")]
        {
            let mut buf = [0u8; 8];
            if getrandom::getrandom(&mut buf).is_ok() {
                return Self::new(u64::from_le_bytes(buf));
            }
        }
        let now = web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0);
        Self::new(now.to_bits())
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        (self.state >> 32) as u32
    }

    /// Uniform float in `[0, 1)`: the top 32 bits scaled by `2^-32`, never 1.0.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn unit_floats_stay_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn largest_draw_stays_off_the_far_edge() {
        use crate::config::GameConfig;
        use crate::game::SpawnArea;

        let top = u32::MAX as f64 / (u32::MAX as f64 + 1.0);
        assert!(top < 1.0);
        let area = SpawnArea::from_config(&GameConfig::default());
        let p = area.lerp(top, top);
        assert!(p.x < area.max.x && p.y < area.max.y);
    }
}
