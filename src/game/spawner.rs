//! Token placement by rejection sampling plus the spawn-interval ramp.

use super::{Point, Token};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::rng::SimpleRng;

/// Rectangle candidates are drawn from: the surface inset by one radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnArea {
    pub min: Point,
    pub max: Point,
}

impl SpawnArea {
    pub fn from_config(config: &GameConfig) -> Self {
        let r = config.token_radius;
        Self {
            min: Point::new(r, r),
            max: Point::new(config.width - r, config.height - r),
        }
    }

    /// Map two unit samples in `[0, 1)` onto the area.
    pub fn lerp(&self, u: f64, v: f64) -> Point {
        Point::new(
            self.min.x + u * (self.max.x - self.min.x),
            self.min.y + v * (self.max.y - self.min.y),
        )
    }
}

/// Anything that can propose placement candidates.
pub trait CandidateSource {
    fn next_candidate(&mut self, area: &SpawnArea) -> Point;
}

impl CandidateSource for SimpleRng {
    fn next_candidate(&mut self, area: &SpawnArea) -> Point {
        let u = self.next_f64();
        let v = self.next_f64();
        area.lerp(u, v)
    }
}

fn overlaps(candidate: Point, tokens: &[Token], min_separation: f64) -> bool {
    tokens
        .iter()
        .any(|t| t.position.distance(candidate) < min_separation)
}

/// Draw candidates until one keeps `min_separation` from every token, giving up
/// after `max_attempts` rejections.
pub fn find_free_position<S: CandidateSource + ?Sized>(
    source: &mut S,
    tokens: &[Token],
    config: &GameConfig,
) -> Result<Point> {
    let area = SpawnArea::from_config(config);
    let min_sep = config.min_separation();
    for _ in 0..config.max_placement_attempts {
        let candidate = source.next_candidate(&area);
        if !overlaps(candidate, tokens, min_sep) {
            return Ok(candidate);
        }
    }
    Err(GameError::PlacementExhausted {
        attempts: config.max_placement_attempts,
    })
}

/// One ramp step: shorten the interval, never below the floor.
pub fn ramp_interval(current_ms: u32, config: &GameConfig) -> u32 {
    current_ms
        .saturating_sub(config.spawn_interval_step_ms)
        .max(config.min_spawn_interval_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TokenId;

    struct Fixed(Vec<Point>);

    impl CandidateSource for Fixed {
        fn next_candidate(&mut self, _area: &SpawnArea) -> Point {
            self.0.remove(0)
        }
    }

    fn token(id: u32, x: f64, y: f64) -> Token {
        Token {
            id: TokenId(id),
            position: Point::new(x, y),
        }
    }

    #[test]
    fn area_is_inset_by_radius() {
        let area = SpawnArea::from_config(&GameConfig::default());
        assert_eq!(area.min, Point::new(20.0, 20.0));
        assert_eq!(area.max, Point::new(780.0, 580.0));
        assert_eq!(area.lerp(0.0, 0.0), area.min);
    }

    #[test]
    fn rng_candidates_stay_inside_area() {
        let cfg = GameConfig::default();
        let area = SpawnArea::from_config(&cfg);
        let mut rng = SimpleRng::new(3);
        for _ in 0..2000 {
            let p = rng.next_candidate(&area);
            assert!(p.x >= 20.0 && p.x < 780.0);
            assert!(p.y >= 20.0 && p.y < 580.0);
        }
    }

    #[test]
    fn exact_separation_is_accepted() {
        let cfg = GameConfig::default();
        let tokens = [token(0, 100.0, 100.0)];
        let mut src = Fixed(vec![Point::new(139.0, 100.0), Point::new(140.0, 100.0)]);
        let p = find_free_position(&mut src, &tokens, &cfg).unwrap();
        assert_eq!(p, Point::new(140.0, 100.0));
    }

    #[test]
    fn gives_up_after_attempt_cap() {
        let cfg = GameConfig {
            max_placement_attempts: 3,
            ..GameConfig::default()
        };
        let tokens = [token(0, 100.0, 100.0)];
        let mut src = Fixed(vec![Point::new(100.0, 100.0); 3]);
        let err = find_free_position(&mut src, &tokens, &cfg).unwrap_err();
        assert!(matches!(err, GameError::PlacementExhausted { attempts: 3 }));
        assert!(src.0.is_empty());
    }

    #[test]
    fn ramp_clamps_at_floor() {
        let cfg = GameConfig::default();
        assert_eq!(ramp_interval(1000, &cfg), 995);
        assert_eq!(ramp_interval(203, &cfg), 200);
        assert_eq!(ramp_interval(200, &cfg), 200);
        assert_eq!(ramp_interval(3, &cfg), 200);
    }
}
