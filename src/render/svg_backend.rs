use std::convert::Infallible;

use plotters_backend::text_anchor::{HPos, Pos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontFamily,
};
use plotters_svg::SVGBackend;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LayerPrimitives, LinePrimitive, PolylinePrimitive, RectPrimitive,
    RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub rects_drawn: usize,
    pub polylines_drawn: usize,
    pub lines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderer that serializes each frame into a standalone SVG document
/// through `plotters-svg`.
///
/// The latest document is kept in memory; hosts read it through
/// [`SvgRenderer::document`] or take it with [`SvgRenderer::take_document`].
/// SVG coordinates are whole pixels.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    font_family: Option<String>,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn take_document(&mut self) -> String {
        std::mem::take(&mut self.document)
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut document = String::new();
        let mut stats = SvgRenderStats::default();
        {
            let mut backend = SVGBackend::with_string(
                &mut document,
                (frame.viewport.width, frame.viewport.height),
            );
            for layer in &frame.layers {
                draw_layer(&mut backend, layer, self.font_family.as_deref(), &mut stats)
                    .map_err(|err| map_backend_error("failed to draw svg layer", err))?;
            }
            backend
                .present()
                .map_err(|err| map_backend_error("failed to finish svg document", err))?;
        }

        self.document = document;
        self.last_stats = stats;
        Ok(())
    }
}

/// Solid stroke or fill handed to the plotters backend.
#[derive(Clone, Copy)]
struct Paint {
    color: BackendColor,
    stroke_width: u32,
}

impl Paint {
    fn fill(color: Color) -> Self {
        Self {
            color: backend_color(color),
            stroke_width: 1,
        }
    }

    fn stroke(color: Color, width: f64) -> Self {
        Self {
            color: backend_color(color),
            stroke_width: width.round().max(1.0) as u32,
        }
    }
}

impl BackendStyle for Paint {
    fn color(&self) -> BackendColor {
        self.color
    }

    fn stroke_width(&self) -> u32 {
        self.stroke_width
    }
}

/// Label font for one text primitive. Glyph layout is left to the SVG viewer.
struct LabelFont<'a> {
    family: Option<&'a str>,
    size: f64,
    color: BackendColor,
    anchor: Pos,
}

impl BackendTextStyle for LabelFont<'_> {
    type FontError = Infallible;

    fn color(&self) -> BackendColor {
        self.color
    }

    fn size(&self) -> f64 {
        self.size
    }

    fn anchor(&self) -> Pos {
        self.anchor
    }

    fn family(&self) -> FontFamily<'_> {
        match self.family {
            Some(name) => FontFamily::Name(name),
            None => FontFamily::SansSerif,
        }
    }

    fn layout_box(&self, text: &str) -> Result<((i32, i32), (i32, i32)), Self::FontError> {
        let width = (text.chars().count() as f64 * self.size * 0.6).round() as i32;
        Ok(((0, 0), (width, self.size.round() as i32)))
    }

    fn draw<E, DrawFunc: FnMut(i32, i32, BackendColor) -> Result<(), E>>(
        &self,
        _text: &str,
        _pos: BackendCoord,
        _draw: DrawFunc,
    ) -> Result<Result<(), E>, Self::FontError> {
        Ok(Ok(()))
    }
}

type SvgResult = Result<(), DrawingErrorKind<std::io::Error>>;

fn draw_layer(
    backend: &mut SVGBackend<'_>,
    layer: &LayerPrimitives,
    font_family: Option<&str>,
    stats: &mut SvgRenderStats,
) -> SvgResult {
    for rect in &layer.rects {
        draw_rect(backend, rect)?;
        stats.rects_drawn += 1;
    }
    for polyline in &layer.polylines {
        draw_polyline(backend, polyline)?;
        stats.polylines_drawn += 1;
    }
    for line in &layer.lines {
        draw_line(backend, line)?;
        stats.lines_drawn += 1;
    }
    for circle in &layer.circles {
        draw_circle(backend, circle)?;
        stats.circles_drawn += 1;
    }
    for text in &layer.texts {
        draw_text(backend, text, font_family)?;
        stats.texts_drawn += 1;
    }
    Ok(())
}

fn draw_rect(backend: &mut SVGBackend<'_>, rect: &RectPrimitive) -> SvgResult {
    let upper_left = coord(rect.x, rect.y);
    let bottom_right = coord(rect.x + rect.width, rect.y + rect.height);
    if rect.fill_color.alpha > 0.0 {
        backend.draw_rect(upper_left, bottom_right, &Paint::fill(rect.fill_color), true)?;
    }
    if rect.border_width > 0.0 {
        backend.draw_rect(
            upper_left,
            bottom_right,
            &Paint::stroke(rect.border_color, rect.border_width),
            false,
        )?;
    }
    Ok(())
}

fn draw_polyline(backend: &mut SVGBackend<'_>, polyline: &PolylinePrimitive) -> SvgResult {
    if polyline.points.len() < 2 {
        return Ok(());
    }
    backend.draw_path(
        polyline.points.iter().map(|&(x, y)| coord(x, y)),
        &Paint::stroke(polyline.color, polyline.stroke_width),
    )
}

fn draw_line(backend: &mut SVGBackend<'_>, line: &LinePrimitive) -> SvgResult {
    let paint = Paint::stroke(line.color, line.stroke_width);
    let from = (line.x1, line.y1);
    let to = (line.x2, line.y2);
    let pattern = line.stroke_style.dash_pattern();
    if pattern.is_empty() {
        return backend.draw_line(coord(from.0, from.1), coord(to.0, to.1), &paint);
    }
    for (start, end) in dash_segments(from, to, pattern) {
        backend.draw_line(coord(start.0, start.1), coord(end.0, end.1), &paint)?;
    }
    Ok(())
}

fn draw_circle(backend: &mut SVGBackend<'_>, circle: &CirclePrimitive) -> SvgResult {
    let center = coord(circle.cx, circle.cy);
    let radius = circle.radius.round().max(1.0) as u32;
    backend.draw_circle(center, radius, &Paint::fill(circle.fill_color), true)?;
    if circle.stroke_width > 0.0 {
        backend.draw_circle(
            center,
            radius,
            &Paint::stroke(circle.stroke_color, circle.stroke_width),
            false,
        )?;
    }
    Ok(())
}

fn draw_text(
    backend: &mut SVGBackend<'_>,
    text: &TextPrimitive,
    font_family: Option<&str>,
) -> SvgResult {
    let h_pos = match text.h_align {
        TextHAlign::Left => HPos::Left,
        TextHAlign::Center => HPos::Center,
        TextHAlign::Right => HPos::Right,
    };
    let font = LabelFont {
        family: font_family,
        size: text.font_size_px,
        color: backend_color(text.color),
        anchor: Pos::new(h_pos, VPos::Top),
    };
    backend.draw_text(&text.text, &font, coord(text.x, text.y))
}

/// Splits `from -> to` into the "on" segments of a repeating dash pattern.
fn dash_segments(
    from: (f64, f64),
    to: (f64, f64),
    pattern: &[f64],
) -> Vec<((f64, f64), (f64, f64))> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let length = dx.hypot(dy);
    let period: f64 = pattern.iter().sum();
    if length == 0.0 || period <= 0.0 {
        return vec![(from, to)];
    }

    let point_at = |distance: f64| {
        let t = distance / length;
        (from.0 + dx * t, from.1 + dy * t)
    };
    let mut segments = Vec::new();
    let mut travelled = 0.0;
    'outer: loop {
        for (slot, dash) in pattern.iter().enumerate() {
            let end = (travelled + dash).min(length);
            if slot % 2 == 0 && end > travelled {
                segments.push((point_at(travelled), point_at(end)));
            }
            travelled = end;
            if travelled >= length {
                break 'outer;
            }
        }
    }
    segments
}

fn coord(x: f64, y: f64) -> BackendCoord {
    (x.round() as i32, y.round() as i32)
}

fn backend_color(color: Color) -> BackendColor {
    let channel = |value: f64| (value * 255.0).round() as u8;
    BackendColor {
        alpha: color.alpha,
        rgb: (
            channel(color.red),
            channel(color.green),
            channel(color.blue),
        ),
    }
}

fn map_backend_error(prefix: &str, err: DrawingErrorKind<std::io::Error>) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
