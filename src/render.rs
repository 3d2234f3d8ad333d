//! Scene rendering against an abstract drawing surface.
//!
//! `render` only reads the state. The browser implements [`Surface`] on top of a
//! 2D canvas context; tests use a recording surface.

use crate::config::GameConfig;
use crate::game::{GameState, Gesture, Point};

pub const HEART_SIZE: f64 = 30.0;
pub const HEART_PADDING: f64 = 10.0;

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn stroke_line(&mut self, from: Point, to: Point);
    /// Circle-clipped token image (or a placeholder while it loads).
    fn draw_token(&mut self, center: Point, radius: f64);
    fn draw_heart(&mut self, origin: Point, size: f64, filled: bool);
}

/// Top-left corner of the `index`-th life indicator.
pub fn heart_origin(index: u32) -> Point {
    Point::new(
        HEART_PADDING + index as f64 * (HEART_SIZE + HEART_PADDING),
        HEART_PADDING,
    )
}

pub fn render<S: Surface + ?Sized>(state: &GameState, config: &GameConfig, surface: &mut S) {
    surface.clear(config.width, config.height);

    for link in state.connections() {
        // dangling ends are skipped
        if let (Some(a), Some(b)) = (state.token(link.start), state.token(link.end)) {
            surface.stroke_line(a.position, b.position);
        }
    }

    for token in state.tokens() {
        surface.draw_token(token.position, config.token_radius);
    }

    if let Gesture::Dragging { anchor, pointer } = state.gesture() {
        if let Some(a) = state.token(anchor) {
            surface.stroke_line(a.position, pointer);
        }
    }

    for i in 0..config.starting_lives {
        surface.draw_heart(heart_origin(i), HEART_SIZE, i < state.lives());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CandidateSource, Game, SpawnArea};

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Line(Point, Point),
        Token(Point),
        Heart(bool),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Surface for Recorder {
        fn clear(&mut self, _w: f64, _h: f64) {
            self.0.push(Op::Clear);
        }
        fn stroke_line(&mut self, from: Point, to: Point) {
            self.0.push(Op::Line(from, to));
        }
        fn draw_token(&mut self, center: Point, _radius: f64) {
            self.0.push(Op::Token(center));
        }
        fn draw_heart(&mut self, _origin: Point, _size: f64, filled: bool) {
            self.0.push(Op::Heart(filled));
        }
    }

    struct Fixed(Vec<Point>);

    impl CandidateSource for Fixed {
        fn next_candidate(&mut self, _area: &SpawnArea) -> Point {
            self.0.remove(0)
        }
    }

    #[test]
    fn empty_scene_clears_and_draws_lives() {
        let cfg = GameConfig::default();
        let game = Game::new(cfg.clone(), Fixed(vec![]));
        let mut rec = Recorder::default();
        render(game.state(), &cfg, &mut rec);
        assert_eq!(rec.0[0], Op::Clear);
        assert_eq!(rec.0.len(), 6);
        assert!(rec.0[1..].iter().all(|op| *op == Op::Heart(true)));
    }

    #[test]
    fn drag_line_and_lost_lives_are_drawn() {
        let cfg = GameConfig::default();
        let a = Point::new(100.0, 100.0);
        let mut game = Game::new(cfg.clone(), Fixed(vec![a]));
        game.try_spawn();
        game.on_press(a);
        game.on_release(Point::new(600.0, 500.0));
        game.on_press(a);
        game.on_move(Point::new(200.0, 210.0));

        let mut rec = Recorder::default();
        render(game.state(), &cfg, &mut rec);
        assert_eq!(
            &rec.0[..3],
            &[Op::Clear, Op::Token(a), Op::Line(a, Point::new(200.0, 210.0))]
        );
        let filled: Vec<bool> = rec.0[3..]
            .iter()
            .map(|op| matches!(op, Op::Heart(true)))
            .collect();
        assert_eq!(filled, vec![true, true, true, true, false]);
    }

    #[test]
    fn hearts_are_laid_out_left_to_right() {
        assert_eq!(heart_origin(0), Point::new(10.0, 10.0));
        assert_eq!(heart_origin(2), Point::new(90.0, 10.0));
    }
}
