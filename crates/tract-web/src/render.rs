//! 2D-canvas renderer for the tract surface.
//!
//! Everything is drawn in tract-space through [`TractPainter`], which owns
//! the wobbled polar projection; pixel coordinates never leak into the
//! drawing routines themselves.

use std::f64::consts::PI;

use tract_core::{ProcessorParams, TractGeometry, TractPoint, VOWEL_ANCHORS};
use web_sys as web;

pub const CANVAS_WIDTH: u32 = 600;
pub const CANVAS_HEIGHT: u32 = 500;

const TRACT_FILL: &str = "pink";
const OUTLINE_STROKE: &str = "#C070C6";
const CONTROL_FILL: &str = "#FFEEF5";
const ACCENT: &str = "orchid";

/// Per-frame painter; all positions go through the wobbled projection.
pub struct TractPainter<'a> {
    ctx: &'a web::CanvasRenderingContext2d,
    geometry: &'a TractGeometry,
    now_sec: f64,
    edge_amplitude: f32,
}

impl<'a> TractPainter<'a> {
    pub fn new(
        ctx: &'a web::CanvasRenderingContext2d,
        geometry: &'a TractGeometry,
        now_sec: f64,
        edge_amplitude: f32,
    ) -> Self {
        Self {
            ctx,
            geometry,
            now_sec,
            edge_amplitude,
        }
    }

    fn point(&self, index: f32, diameter: f32) -> (f64, f64) {
        let p = self.geometry.to_screen_wobbled(
            TractPoint::new(index, diameter),
            self.now_sec,
            self.edge_amplitude,
        );
        (p.x as f64, p.y as f64)
    }

    fn move_to(&self, index: f32, diameter: f32) {
        let (x, y) = self.point(index, diameter);
        self.ctx.move_to(x, y);
    }

    fn line_to(&self, index: f32, diameter: f32) {
        let (x, y) = self.point(index, diameter);
        self.ctx.line_to(x, y);
    }

    fn circle(&self, index: f32, diameter: f32, arc_radius: f64) {
        // cursors sit still; skip the wobble
        let p = self.geometry.to_screen(TractPoint::new(index, diameter));
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(p.x as f64, p.y as f64, arc_radius, 0.0, 2.0 * PI);
    }

    /// Label rotated to follow the tract curvature.
    fn text(&self, index: f32, diameter: f32, text: &str) {
        let angle = self.geometry.index_angle(index);
        let radius = self.geometry.diameter_radius(diameter);
        let p = self.geometry.polar_point(angle, radius);
        self.ctx.save();
        let _ = self.ctx.translate(p.x as f64, p.y as f64 + 2.0);
        let _ = self.ctx.rotate(angle as f64 - PI / 2.0);
        let _ = self.ctx.fill_text(text, 0.0, 0.0);
        self.ctx.restore();
    }
}

/// Full frame: control region, tract fill, nose branch, amplitudes,
/// outlines, labels, cursors.
pub fn draw_surface(
    ctx: &web::CanvasRenderingContext2d,
    geometry: &TractGeometry,
    params: &ProcessorParams,
    now_sec: f64,
) {
    ctx.clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    let p = TractPainter::new(ctx, geometry, now_sec, params.edge_amplitude());
    let tract = &params.tract;
    let length = tract.length;
    let nose = &tract.nose;
    let velum = tract.velum();
    let velum_angle = velum * 4.0;

    draw_tongue_control(&p, params);

    // oral cavity fill
    ctx.begin_path();
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str(TRACT_FILL);
    ctx.set_fill_style_str(TRACT_FILL);
    p.move_to(1.0, 0.0);
    for i in 1..length {
        p.line_to(i as f32, tract.diameter[i]);
    }
    for i in (2..length).rev() {
        p.line_to(i as f32, 0.0);
    }
    ctx.close_path();
    ctx.stroke();
    ctx.fill();

    // nasal cavity fill
    ctx.begin_path();
    p.move_to(nose.start as f32, -nose.offset);
    for i in 1..nose.length {
        p.line_to(
            (nose.start + i) as f32,
            -nose.offset - nose.diameter[i] * 0.9,
        );
    }
    for i in (1..nose.length).rev() {
        p.line_to((nose.start + i) as f32, -nose.offset);
    }
    ctx.close_path();
    ctx.fill();

    // velum flap
    ctx.begin_path();
    p.move_to(nose.start as f32 - 2.0, 0.0);
    p.line_to(nose.start as f32, -nose.offset);
    p.line_to(nose.start as f32 + velum_angle, -nose.offset);
    p.line_to(nose.start as f32 + velum_angle - 2.0, 0.0);
    ctx.close_path();
    ctx.stroke();
    ctx.fill();

    // region labels
    ctx.set_fill_style_str("white");
    ctx.set_font("20px Arial");
    ctx.set_text_align("center");
    ctx.set_global_alpha(1.0);
    p.text(length as f32 * 0.1, 0.425, "throat");
    p.text(length as f32 * 0.71, -1.8, "nasal");
    p.text(length as f32 * 0.71, -1.3, "cavity");
    ctx.set_font("22px Arial");
    p.text(length as f32 * 0.6, 0.9, "oral");
    p.text(length as f32 * 0.7, 0.9, "cavity");

    draw_amplitudes(&p, params);

    // oral outline
    ctx.begin_path();
    ctx.set_line_width(5.0);
    ctx.set_stroke_style_str(OUTLINE_STROKE);
    p.move_to(1.0, tract.diameter[0]);
    for i in 2..length {
        p.line_to(i as f32, tract.diameter[i]);
    }
    p.move_to(1.0, 0.0);
    for i in 2..=(nose.start - 2) {
        p.line_to(i as f32, 0.0);
    }
    p.move_to(nose.start as f32 + velum_angle - 2.0, 0.0);
    for i in (nose.start + velum_angle.ceil() as usize - 2)..length {
        p.line_to(i as f32, 0.0);
    }
    ctx.stroke();

    // nose outline
    ctx.begin_path();
    p.move_to(nose.start as f32, -nose.offset);
    for i in 1..nose.length {
        p.line_to(
            (nose.start + i) as f32,
            -nose.offset - nose.diameter[i] * 0.9,
        );
    }
    p.move_to(nose.start as f32 + velum_angle, -nose.offset);
    for i in (velum_angle.ceil() as usize)..nose.length {
        p.line_to((nose.start + i) as f32, -nose.offset);
    }
    ctx.stroke();

    // velum outline fades in with its opening
    ctx.set_global_alpha((velum * 5.0).min(1.0) as f64);
    ctx.begin_path();
    p.move_to(nose.start as f32 - 2.0, 0.0);
    p.line_to(nose.start as f32, -nose.offset);
    p.line_to(nose.start as f32 + velum_angle, -nose.offset);
    p.line_to(nose.start as f32 + velum_angle - 2.0, 0.0);
    ctx.stroke();

    ctx.set_fill_style_str(ACCENT);
    ctx.set_font("20px Arial");
    ctx.set_global_alpha(0.7);
    p.text(
        length as f32 * 0.95,
        0.8 + 0.8 * tract.diameter[length - 1],
        " lip",
    );

    draw_phonemes(&p, params);
    draw_constrictions(&p, params);

    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str("black");
    ctx.set_text_align("left");
}

/// Pale control strip the tongue may occupy, its dot grid, and the tongue
/// cursor itself.
fn draw_tongue_control(p: &TractPainter, params: &ProcessorParams) {
    let ctx = p.ctx;
    let tongue = &params.tract.tongue;
    let index_range = tongue.index_range;
    let diameter_range = tongue.diameter_range;

    ctx.set_stroke_style_str(CONTROL_FILL);
    ctx.set_fill_style_str(CONTROL_FILL);
    ctx.set_global_alpha(1.0);
    ctx.begin_path();
    ctx.set_line_width(45.0);
    p.move_to(index_range.min, diameter_range.min);
    let mut i = index_range.min + 1.0;
    while i <= index_range.max {
        p.line_to(i, diameter_range.min);
        i += 1.0;
    }
    p.line_to(index_range.center(), diameter_range.max);
    ctx.close_path();
    ctx.stroke();
    ctx.fill();

    // dot grid marking reachable tongue postures
    ctx.set_fill_style_str(ACCENT);
    ctx.set_global_alpha(0.3);
    let dots: [(f32, f32); 9] = [
        (-8.5, diameter_range.min),
        (-4.25, diameter_range.min),
        (0.0, diameter_range.min),
        (4.25, diameter_range.min),
        (8.5, diameter_range.min),
        (-6.1, diameter_range.center()),
        (6.1, diameter_range.center()),
        (0.0, diameter_range.center()),
        (0.0, diameter_range.max),
    ];
    for (offset, diameter) in dots {
        p.circle(index_range.center() + offset, diameter, 3.0);
        ctx.fill();
    }

    // tongue cursor
    ctx.set_line_width(4.0);
    ctx.set_stroke_style_str(ACCENT);
    ctx.set_global_alpha(0.7);
    p.circle(tongue.position.index, tongue.position.diameter, 18.0);
    ctx.stroke();
    ctx.set_global_alpha(0.15);
    ctx.fill();
    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str(ACCENT);
}

/// Per-segment acoustic amplitude bars for both cavities.
fn draw_amplitudes(p: &TractPainter, params: &ProcessorParams) {
    let ctx = p.ctx;
    let tract = &params.tract;
    ctx.set_stroke_style_str(ACCENT);
    ctx.set_line_cap("butt");
    ctx.set_global_alpha(0.3);

    for i in 2..tract.length - 1 {
        ctx.begin_path();
        ctx.set_line_width(tract.amplitude_max[i].sqrt() as f64 * 3.0);
        p.move_to(i as f32, 0.0);
        p.line_to(i as f32, tract.diameter[i]);
        ctx.stroke();
    }
    let nose = &tract.nose;
    for i in 1..nose.length - 1 {
        ctx.begin_path();
        ctx.set_line_width(nose.amplitude_max[i].sqrt() as f64 * 3.0);
        p.move_to((nose.start + i) as f32, -nose.offset);
        p.line_to(
            (nose.start + i) as f32,
            -nose.offset - nose.diameter[i] * 0.9,
        );
        ctx.stroke();
    }
    ctx.set_global_alpha(1.0);
    ctx.set_line_cap("round");
}

/// Phoneme hints: vowels from the anchor table, then approximants,
/// fricatives, stops and nasals. Obstruent labels switch voicing with
/// intensity.
fn draw_phonemes(p: &TractPainter, params: &ProcessorParams) {
    let ctx = p.ctx;
    ctx.set_fill_style_str(ACCENT);
    ctx.set_font("24px Arial");
    ctx.set_text_align("center");
    ctx.set_global_alpha(0.6);

    for anchor in VOWEL_ANCHORS.iter() {
        p.text(anchor.angle, anchor.radius, anchor.phoneme);
    }

    ctx.set_global_alpha(0.8);
    let approximants = 1.1;
    p.text(38.0, approximants, "l");
    p.text(41.0, approximants, "w");
    p.text(4.5, 0.37, "h");

    let voiced = params.intensity > 0.0;
    let obstruents: [&str; 6] = if voiced {
        ["ʒ", "z", "v", "g", "d", "b"]
    } else {
        ["ʃ", "s", "f", "k", "t", "p"]
    };
    let nasals: [&str; 3] = ["ŋ", "n", "m"];

    let fricative_d = 0.3;
    let stop_d = -0.4;
    let nasal_d = -1.1;
    let spots: [(f32, f32); 9] = [
        (31.5, fricative_d),
        (36.0, fricative_d),
        (41.0, fricative_d),
        (22.0, fricative_d),
        (36.0, stop_d),
        (41.0, stop_d),
        (22.0, nasal_d),
        (36.0, nasal_d),
        (41.0, nasal_d),
    ];
    for (n, (index, diameter)) in spots.iter().enumerate() {
        let label = if n < 6 {
            obstruents[n]
        } else {
            nasals[n - 6]
        };
        p.text(*index, *diameter, label);
    }
}

/// One ring per held constriction.
fn draw_constrictions(p: &TractPainter, params: &ProcessorParams) {
    let ctx = p.ctx;
    ctx.set_line_width(4.0);
    ctx.set_stroke_style_str(ACCENT);
    for point in params.tract.constrictions.values() {
        ctx.set_global_alpha(0.7);
        p.circle(point.index, point.diameter, 10.0);
        ctx.stroke();
        ctx.set_global_alpha(0.15);
        ctx.fill();
    }
    ctx.set_global_alpha(1.0);
}
