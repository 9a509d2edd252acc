use gloo_utils::window;
use plotters::{
    coord::Shift,
    prelude::{
        Circle, DrawingArea, DrawingAreaErrorKind, DrawingBackend, IntoDrawingArea, PathElement,
        Polygon, SVGBackend, Text,
    },
    style::{
        Color, IntoFont, RGBAColor, RGBColor, TextStyle,
        text_anchor::{HPos, Pos, VPos},
    },
};
use setbook_domain::Metric;

use crate::Theme;

pub const WIDTH: u32 = 340;
pub const HEIGHT: u32 = 180;

pub const PADDING_LEFT: f64 = 44.;
pub const PADDING_RIGHT: f64 = 12.;
pub const PADDING_TOP: f64 = 12.;
pub const PADDING_BOTTOM: f64 = 28.;

pub const GRID_LINES: u32 = 4;
pub const X_LABELS: f64 = 5.;

pub const OPACITY_AREA: f64 = 0.12;
pub const OPACITY_GRID: f64 = 0.10;

pub const WIDTH_LINE: f64 = 2.;
pub const RADIUS_MARKER: f64 = 3.;

pub const FONT: (&str, f64) = ("system-ui", 11.);
pub const FONT_PLACEHOLDER: (&str, f64) = ("system-ui", 12.);

pub const PLACEHOLDER: &str = "Not enough data yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Integer,
    Percent,
    /// Integer with a `k` or `M` suffix for large values.
    Compact,
    OneDecimal,
}

impl ValueFormat {
    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            ValueFormat::Integer => integer(value),
            ValueFormat::Percent => format!("{}%", integer(value)),
            ValueFormat::Compact => compact(value.round()),
            ValueFormat::OneDecimal => format!("{:.1}", (value * 10.).round() / 10.),
        }
    }
}

/// Format a number with one decimal and a `k` or `M` suffix if it is large.
#[must_use]
pub fn compact(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let abs = value.abs();
    if abs >= 1_000_000. {
        format!("{:.1}M", value / 1_000_000.)
    } else if abs >= 1_000. {
        format!("{:.1}k", value / 1_000.)
    } else {
        integer(value)
    }
}

#[allow(clippy::float_cmp)]
fn integer(value: f64) -> String {
    let rounded = value.round();
    // avoid "-0"
    if rounded == 0. {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricStyle {
    pub color: RGBColor,
    pub format: ValueFormat,
}

#[must_use]
pub fn metric_style(metric: Metric) -> MetricStyle {
    let (color, format) = match metric {
        Metric::BodyWeight => (RGBColor(0x0A, 0xA6, 0xA6), ValueFormat::OneDecimal),
        Metric::Completion => (RGBColor(0x3B, 0x82, 0xF6), ValueFormat::Percent),
        Metric::Cardio => (RGBColor(0xF5, 0x9E, 0x0B), ValueFormat::Integer),
        Metric::Steps => (RGBColor(0x8B, 0x5C, 0xF6), ValueFormat::Integer),
        Metric::Reps => (RGBColor(0x10, 0xB9, 0x81), ValueFormat::Integer),
        Metric::Tonnage => (RGBColor(0xEF, 0x44, 0x44), ValueFormat::Compact),
    };
    MetricStyle { color, format }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colors {
    pub text: RGBColor,
    pub grid: RGBAColor,
}

/// Colors for a resolved theme, see [`Settings::current_theme`].
///
/// [`Settings::current_theme`]: crate::Settings::current_theme
#[must_use]
pub fn colors(theme: Theme) -> Colors {
    match theme {
        Theme::System | Theme::Light => Colors {
            text: RGBColor(0x52, 0x62, 0x7B),
            grid: RGBColor(13, 19, 33).mix(OPACITY_GRID),
        },
        Theme::Dark => Colors {
            text: RGBColor(0xA9, 0xB4, 0xC6),
            grid: RGBColor(255, 255, 255).mix(OPACITY_GRID),
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub position: f64,
    pub text: String,
}

/// Positions of all chart elements in CSS pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    /// Horizontal grid lines from top to bottom, positioned on the y axis.
    pub grid: Vec<Label>,
    /// Sparse date labels, positioned on the x axis.
    pub x_labels: Vec<Label>,
    /// Runs of consecutive values. A missing value ends a run.
    pub segments: Vec<Vec<(f64, f64)>>,
    pub floor: f64,
}

/// The value range of the y axis.
///
/// The range is padded by 8 % of its span. A range without span gets a band
/// relative to the magnitude of the value.
#[must_use]
pub fn nice_range(min: f64, max: f64) -> (f64, f64) {
    #[allow(clippy::float_cmp)]
    let pad = if min == max {
        min.abs() * 0.1 + 1.
    } else {
        (max - min) * 0.08
    };
    (min - pad, max + pad)
}

/// Place a series of labeled values on a chart of the given size.
///
/// Returns `None` if fewer than two values are present, as no range can be
/// derived then. Every value keeps the x position of its index, so gaps of
/// missing values stay visible.
#[must_use]
pub fn layout(
    data: &[(String, Option<f64>)],
    format: ValueFormat,
    (width, height): (u32, u32),
) -> Option<Layout> {
    let values = data
        .iter()
        .map(|(_, v)| v.filter(|v| v.is_finite()))
        .collect::<Vec<_>>();
    let present = values.iter().flatten().copied().collect::<Vec<_>>();
    if present.len() < 2 {
        return None;
    }

    let (min, max) = nice_range(
        present.iter().copied().fold(f64::INFINITY, f64::min),
        present.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    );

    let width = f64::from(width);
    let height = f64::from(height);
    let plot_width = width - PADDING_LEFT - PADDING_RIGHT;
    let plot_height = height - PADDING_TOP - PADDING_BOTTOM;
    #[allow(clippy::cast_precision_loss)]
    let last = (data.len() - 1) as f64;
    let x = |i: usize| {
        #[allow(clippy::cast_precision_loss)]
        let i = i as f64;
        PADDING_LEFT + plot_width * i / last
    };
    let y = |v: f64| PADDING_TOP + plot_height - (v - min) / (max - min) * plot_height;

    let grid = (0..=GRID_LINES)
        .map(|g| {
            let fraction = f64::from(g) / f64::from(GRID_LINES);
            Label {
                position: PADDING_TOP + plot_height * fraction,
                text: format.format(max - (max - min) * fraction),
            }
        })
        .collect();

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let step = ((data.len() as f64 / X_LABELS).round() as usize).max(1);
    let x_labels = data
        .iter()
        .enumerate()
        .step_by(step)
        .map(|(i, (label, _))| Label {
            position: x(i),
            text: label.clone(),
        })
        .collect();

    let mut segments: Vec<Vec<(f64, f64)>> = vec![];
    let mut current = vec![];
    for (i, value) in values.iter().enumerate() {
        if let Some(value) = value {
            current.push((x(i), y(*value)));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    Some(Layout {
        width,
        height,
        grid,
        x_labels,
        segments,
        floor: PADDING_TOP + plot_height,
    })
}

/// Draw a chart onto a drawing area whose size is the layout size scaled by
/// the device pixel ratio.
///
/// Without a layout, only the placeholder text is drawn.
pub fn render<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: Option<&Layout>,
    style: MetricStyle,
    colors: Colors,
    dpr: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let px = |(x, y): (f64, f64)| (scale(x, dpr), scale(y, dpr));
    let text_style = |font: (&'static str, f64)| {
        TextStyle::from((font.0, font.1 * dpr).into_font())
            .color(&colors.text)
            .pos(Pos::new(HPos::Left, VPos::Bottom))
    };

    let Some(layout) = layout else {
        root.draw(&Text::new(
            PLACEHOLDER,
            px((PADDING_LEFT, PADDING_TOP + 18.)),
            text_style(FONT_PLACEHOLDER),
        ))?;
        return Ok(());
    };

    for line in &layout.grid {
        root.draw(&PathElement::new(
            vec![
                px((PADDING_LEFT, line.position)),
                px((layout.width - PADDING_RIGHT, line.position)),
            ],
            colors.grid.stroke_width(stroke(1., dpr)),
        ))?;
    }

    for line in &layout.grid {
        root.draw(&Text::new(
            line.text.clone(),
            px((6., line.position + 4.)),
            text_style(FONT),
        ))?;
    }

    for label in &layout.x_labels {
        root.draw(&Text::new(
            label.text.clone(),
            px((label.position - 10., layout.height - 10.)),
            text_style(FONT),
        ))?;
    }

    for segment in layout.segments.iter().filter(|s| s.len() > 1) {
        let (Some(first), Some(last)) = (segment.first(), segment.last()) else {
            continue;
        };
        root.draw(&Polygon::new(
            segment
                .iter()
                .copied()
                .chain([(last.0, layout.floor), (first.0, layout.floor)])
                .map(px)
                .collect::<Vec<_>>(),
            style.color.mix(OPACITY_AREA).filled(),
        ))?;
        root.draw(&PathElement::new(
            segment.iter().copied().map(px).collect::<Vec<_>>(),
            style.color.stroke_width(stroke(WIDTH_LINE, dpr)),
        ))?;
    }

    for point in layout.segments.iter().flatten() {
        root.draw(&Circle::new(
            px(*point),
            stroke(RADIUS_MARKER, dpr),
            style.color.filled(),
        ))?;
    }

    Ok(())
}

/// Render a series of labeled values as SVG.
///
/// The canvas is `WIDTH` × `HEIGHT` CSS pixels, backed by a buffer scaled by
/// the device pixel ratio.
pub fn plot(
    data: &[(String, Option<f64>)],
    style: MetricStyle,
    theme: Theme,
    dpr: f64,
) -> Result<String, Box<dyn std::error::Error>> {
    let layout = layout(data, style.format, (WIDTH, HEIGHT));
    let mut result = String::new();

    {
        let root = SVGBackend::with_string(&mut result, buffer_size((WIDTH, HEIGHT), dpr))
            .into_drawing_area();
        render(&root, layout.as_ref(), style, colors(theme), dpr)?;
        root.present()?;
    }

    Ok(result)
}

/// The size of the backing buffer of a canvas.
#[must_use]
pub fn buffer_size((width, height): (u32, u32), dpr: f64) -> (u32, u32) {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scale = |v: u32| (f64::from(v) * dpr).floor().max(1.) as u32;
    (scale(width), scale(height))
}

#[must_use]
pub fn device_pixel_ratio() -> f64 {
    let dpr = window().device_pixel_ratio();
    if dpr.is_finite() && dpr > 0. { dpr } else { 1. }
}

#[allow(clippy::cast_possible_truncation)]
fn scale(value: f64, dpr: f64) -> i32 {
    (value * dpr).round() as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stroke(width: f64, dpr: f64) -> u32 {
    (width * dpr).round().max(1.) as u32
}
