use quizcards_types::{Point, Rect};

/// Control-point distance for approximating a quarter ellipse with one cubic Bézier.
pub const BEZIER_KAPPA: f32 = 0.552_284_8;

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// A cubic Bézier segment: two control points and an end point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveTo {
    pub c1: Point,
    pub c2: Point,
    pub to: Point,
}

/// Four curves tracing the ellipse inscribed in `bounds`, starting and ending
/// at the rightmost point. Coordinates stay in the caller's space.
pub fn ellipse_curves(bounds: Rect) -> (Point, [CurveTo; 4]) {
    let c = bounds.center();
    let rx = bounds.width / 2.0;
    let ry = bounds.height / 2.0;
    let kx = rx * BEZIER_KAPPA;
    let ky = ry * BEZIER_KAPPA;
    let p = Point::new;

    let start = p(c.x + rx, c.y);
    let curves = [
        CurveTo { c1: p(c.x + rx, c.y + ky), c2: p(c.x + kx, c.y + ry), to: p(c.x, c.y + ry) },
        CurveTo { c1: p(c.x - kx, c.y + ry), c2: p(c.x - rx, c.y + ky), to: p(c.x - rx, c.y) },
        CurveTo { c1: p(c.x - rx, c.y - ky), c2: p(c.x - kx, c.y - ry), to: p(c.x, c.y - ry) },
        CurveTo { c1: p(c.x + kx, c.y - ry), c2: p(c.x + rx, c.y - ky), to: p(c.x + rx, c.y) },
    ];
    (start, curves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip() {
        assert_eq!(flip_y(10.0, 100.0), 90.0);
    }

    #[test]
    fn ellipse_is_closed_and_touches_bounds() {
        let bounds = Rect::new(0.0, 0.0, 20.0, 10.0);
        let (start, curves) = ellipse_curves(bounds);
        assert_eq!(start, Point::new(20.0, 5.0));
        assert_eq!(curves[3].to, start);
        assert_eq!(curves[0].to, Point::new(10.0, 10.0));
        assert_eq!(curves[1].to, Point::new(0.0, 5.0));
        assert_eq!(curves[2].to, Point::new(10.0, 0.0));
    }
}
