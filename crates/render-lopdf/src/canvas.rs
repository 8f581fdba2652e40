use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use quizcards_layout::{encode_win_ansi, win_ansi_byte};
use quizcards_render_core::utils::{BEZIER_KAPPA, ellipse_curves, flip_y};
use quizcards_render_core::{FontKey, PageCanvas};
use quizcards_types::{Color, Point, Rect, Size};

/// Resource name of a font in the shared page resources.
pub(crate) fn font_resource_name(font: FontKey) -> &'static str {
    match font {
        FontKey::Body => "F1",
        FontKey::Bold => "F2",
    }
}

/// State the content stream already has set, so repeated operators can be skipped.
#[derive(Debug, Clone, Copy, Default)]
struct GraphicsState {
    fill: Option<Color>,
    stroke: Option<Color>,
    line_width: Option<f32>,
    font: Option<(FontKey, f32)>,
}

/// One page being drawn, accumulating a lopdf content stream.
///
/// Callers work in top-left, y-down coordinates; every point is flipped into
/// PDF space as it is emitted.
pub struct LopdfPage {
    size: Size,
    content: Content,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl LopdfPage {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            content: Content { operations: Vec::new() },
            state: GraphicsState::default(),
            saved: Vec::new(),
        }
    }

    pub fn into_content(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn pdf_point(&self, p: Point) -> (f32, f32) {
        (p.x, flip_y(p.y, self.size.height))
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color, line_width: f32) {
        if self.state.stroke != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke = Some(color);
        }
        if self.state.line_width != Some(line_width) {
            self.push("w", vec![line_width.into()]);
            self.state.line_width = Some(line_width);
        }
    }

    fn curve_to(&mut self, c1: (f32, f32), c2: (f32, f32), to: (f32, f32)) {
        self.push(
            "c",
            vec![c1.0.into(), c1.1.into(), c2.0.into(), c2.1.into(), to.0.into(), to.1.into()],
        );
    }
}

/// Rounds values within float noise of 0 or ±1, keeping rotation matrices exact.
fn snap(v: f32) -> f32 {
    for target in [-1.0, 0.0, 1.0] {
        if (v - target).abs() < 1e-6 {
            return target;
        }
    }
    v
}

impl PageCanvas for LopdfPage {
    fn size(&self) -> Size {
        self.size
    }

    fn save_state(&mut self) {
        self.saved.push(self.state);
        self.push("q", vec![]);
    }

    fn restore_state(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
            self.push("Q", vec![]);
        } else {
            log::warn!("Ignoring unbalanced restore_state on PDF page");
        }
    }

    fn rotate_about(&mut self, center: Point, degrees: f32) {
        // Clockwise on the page is a negative angle once y points up.
        let phi = (-degrees).to_radians();
        let (a, b) = (snap(phi.cos()), snap(phi.sin()));
        let (c, d) = (-b, a);
        let (px, py) = self.pdf_point(center);
        let e = px - (a * px + c * py);
        let f = py - (b * px + d * py);
        self.push(
            "cm",
            vec![a.into(), b.into(), c.into(), d.into(), e.into(), f.into()],
        );
    }

    fn fill_ellipse(&mut self, bounds: Rect, color: Color) {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }
        self.set_fill_color(color);
        let (start, curves) = ellipse_curves(bounds);
        let start = self.pdf_point(start);
        self.push("m", vec![start.0.into(), start.1.into()]);
        for curve in curves {
            let (c1, c2, to) = (
                self.pdf_point(curve.c1),
                self.pdf_point(curve.c2),
                self.pdf_point(curve.to),
            );
            self.curve_to(c1, c2, to);
        }
        self.push("f", vec![]);
    }

    fn stroke_rounded_rect(&mut self, bounds: Rect, radius: f32, line_width: f32, color: Color) {
        if bounds.width <= 0.0 || bounds.height <= 0.0 || line_width <= 0.0 {
            return;
        }
        self.set_stroke(color, line_width);

        let x0 = bounds.x;
        let x1 = bounds.right();
        let y0 = flip_y(bounds.bottom(), self.size.height);
        let y1 = flip_y(bounds.y, self.size.height);
        let r = radius.clamp(0.0, bounds.width.min(bounds.height) / 2.0);

        if r == 0.0 {
            self.push(
                "re",
                vec![x0.into(), y0.into(), bounds.width.into(), bounds.height.into()],
            );
            self.push("S", vec![]);
            return;
        }

        let k = r * BEZIER_KAPPA;
        self.push("m", vec![(x0 + r).into(), y0.into()]);
        self.push("l", vec![(x1 - r).into(), y0.into()]);
        self.curve_to((x1 - r + k, y0), (x1, y0 + r - k), (x1, y0 + r));
        self.push("l", vec![x1.into(), (y1 - r).into()]);
        self.curve_to((x1, y1 - r + k), (x1 - r + k, y1), (x1 - r, y1));
        self.push("l", vec![(x0 + r).into(), y1.into()]);
        self.curve_to((x0 + r - k, y1), (x0, y1 - r + k), (x0, y1 - r));
        self.push("l", vec![x0.into(), (y0 + r).into()]);
        self.curve_to((x0, y0 + r - k), (x0 + r - k, y0), (x0 + r, y0));
        self.push("h", vec![]);
        self.push("S", vec![]);
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: FontKey, size: f32, color: Color) {
        if text.is_empty() {
            return;
        }
        if text.chars().any(|c| win_ansi_byte(c).is_none()) {
            log::warn!("Characters outside WinAnsi in {:?} are printed as '?'", text);
        }
        self.set_fill_color(color);
        self.push("BT", vec![]);
        if self.state.font != Some((font, size)) {
            self.push(
                "Tf",
                vec![Object::Name(font_resource_name(font).as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some((font, size));
        }
        let (x, y) = self.pdf_point(origin);
        self.push("Td", vec![x.into(), y.into()]);
        self.push(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }
}
