//! Drag-a-link gesture state and hit testing.

use super::{Point, Token, TokenId};

/// Transient pointer state. Connection membership lives in the connection
/// list, not here.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        anchor: TokenId,
        pointer: Point,
    },
}

impl Gesture {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::Dragging { .. })
    }
}

/// Open square hit box of half-width `radius` (points on the edge miss).
pub fn hit_test(pos: Point, center: Point, radius: f64) -> bool {
    (pos.x - center.x).abs() < radius && (pos.y - center.y).abs() < radius
}

/// First token (in spawn order) whose hit box contains `pos`, skipping `exclude`.
pub fn token_at(tokens: &[Token], pos: Point, radius: f64, exclude: Option<TokenId>) -> Option<TokenId> {
    tokens
        .iter()
        .filter(|t| Some(t.id) != exclude)
        .find(|t| hit_test(pos, t.position, radius))
        .map(|t| t.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_box_is_square_and_open() {
        let c = Point::new(100.0, 100.0);
        assert!(hit_test(c, c, 20.0));
        // corner of the square is outside the circle but inside the box
        assert!(hit_test(Point::new(118.0, 118.0), c, 20.0));
        assert!(!hit_test(Point::new(120.0, 100.0), c, 20.0));
        assert!(!hit_test(Point::new(100.0, 80.0), c, 20.0));
    }

    #[test]
    fn token_at_respects_exclusion_and_order() {
        let tokens = [
            Token {
                id: TokenId(1),
                position: Point::new(100.0, 100.0),
            },
            Token {
                id: TokenId(2),
                position: Point::new(130.0, 100.0),
            },
        ];
        let overlap = Point::new(115.0, 100.0);
        assert_eq!(token_at(&tokens, overlap, 20.0, None), Some(TokenId(1)));
        assert_eq!(
            token_at(&tokens, overlap, 20.0, Some(TokenId(1))),
            Some(TokenId(2))
        );
        assert_eq!(token_at(&tokens, Point::new(400.0, 400.0), 20.0, None), None);
    }
}
