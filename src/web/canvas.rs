use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::game::Point;
use crate::render::Surface;

const LINK_COLOR: &str = "#42b72a";
const PLACEHOLDER_COLOR: &str = "#3b5998";
const HEART_COLOR: &str = "#ff0000";
const GRAY_HEART_COLOR: &str = "#808080";

/// [`Surface`] backed by a 2D canvas context and the token avatar image.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    image: HtmlImageElement,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, image: HtmlImageElement) -> Self {
        Self { ctx, image }
    }

    pub fn set_image_src(&self, url: &str) {
        self.image.set_src(url);
    }

    fn image_ready(&self) -> bool {
        self.image.complete() && self.image.natural_width() > 0
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_stroke_style_str(LINK_COLOR);
        self.ctx.set_line_width(2.0);
        self.ctx.stroke();
    }

    fn draw_token(&mut self, center: Point, radius: f64) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.begin_path();
        ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU).ok();
        if self.image_ready() {
            ctx.clip();
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &self.image,
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            )
            .ok();
        } else {
            // image still loading: plain disc
            ctx.set_fill_style_str(PLACEHOLDER_COLOR);
            ctx.fill();
        }
        ctx.restore();
    }

    fn draw_heart(&mut self, origin: Point, size: f64, filled: bool) {
        let (x, y) = (origin.x, origin.y);
        let ctx = &self.ctx;
        ctx.set_fill_style_str(if filled { HEART_COLOR } else { GRAY_HEART_COLOR });
        ctx.begin_path();
        ctx.move_to(x, y + size / 4.0);
        ctx.quadratic_curve_to(x, y, x + size / 4.0, y);
        ctx.quadratic_curve_to(x + size / 2.0, y, x + size / 2.0, y + size / 4.0);
        ctx.quadratic_curve_to(x + size / 2.0, y, x + size * 3.0 / 4.0, y);
        ctx.quadratic_curve_to(x + size, y, x + size, y + size / 4.0);
        ctx.quadratic_curve_to(x + size, y + size / 2.0, x + size * 3.0 / 4.0, y + size * 3.0 / 4.0);
        ctx.line_to(x + size / 2.0, y + size);
        ctx.line_to(x + size / 4.0, y + size * 3.0 / 4.0);
        ctx.quadratic_curve_to(x, y + size / 2.0, x, y + size / 4.0);
        ctx.fill();
    }
}
