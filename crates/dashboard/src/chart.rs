use chrono::{Days, NaiveDate};
use log::warn;
use plotters::{
    chart::ChartBuilder,
    prelude::{Circle, IntoDrawingArea, SVGBackend},
    series::LineSeries,
    style::{Color, IntoFont, Palette, Palette99, RGBColor, TextStyle, WHITE},
};

use crate::{Settings, Theme};

pub const COLOR_WEIGHT: usize = 8;
pub const COLOR_VOLUME: usize = 6;
pub const COLOR_REPS: usize = 4;

pub const OPACITY_LINE: f64 = 0.9;
pub const OPACITY_MARKER: f64 = 1.0;

pub const WIDTH_LINE: u32 = 2;
pub const SIZE_MARKER: u32 = 3;

pub const FONT: (&str, u32) = ("sans-serif", 12);
pub const FONT_CAPTION: (&str, u32) = ("sans-serif", 16);

#[derive(Clone)]
pub enum PlotType {
    Circle(usize, f64, u32),
    Line(usize, f64, u32),
}

/// Line connecting the values with a marker on every value.
#[must_use]
pub fn plot_line_with_markers(color: usize) -> Vec<PlotType> {
    vec![
        PlotType::Line(color, OPACITY_LINE, WIDTH_LINE),
        PlotType::Circle(color, OPACITY_MARKER, SIZE_MARKER),
    ]
}

#[derive(Clone)]
pub struct PlotData {
    pub values: Vec<(NaiveDate, f32)>,
    pub plots: Vec<PlotType>,
}

#[derive(Clone, Copy, Default, Debug, PartialEq)]
struct Bounds {
    min: f32,
    max: f32,
}

impl Bounds {
    fn max_with_margin(self) -> f32 {
        assert!(0. <= self.min);
        assert!(self.min <= self.max);

        self.max + self.margin()
    }

    fn margin(self) -> f32 {
        assert!(0. <= self.min);
        assert!(self.min <= self.max);

        if (self.max - self.min).abs() > f32::EPSILON {
            return (self.max - self.min) * 0.1;
        }
        0.1
    }
}

/// Plot time series onto a line chart and return it as SVG.
///
/// The y axis always starts at zero. The x axis spans the dates of all
/// series; a single date is widened to a span of one day.
///
/// Every `PlotData` element is drawn in order, and for each element all of
/// its plots are drawn in order.
///
/// `None` is returned if there are no values to plot or if the values exceed
/// the range of the y axis.
pub fn plot(
    data: &[PlotData],
    caption: &str,
    settings: &Settings,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let (Some((first, last)), Some(bounds)) = (determine_x_span(data), determine_y_bounds(data))
    else {
        return Ok(None);
    };

    let y_max = bounds.max_with_margin();
    if !y_max.is_finite() {
        warn!("values of {caption} exceed the plottable range");
        return Ok(None);
    }

    let mut result = String::new();

    {
        let root =
            SVGBackend::with_string(&mut result, (settings.chart_width, settings.chart_height))
                .into_drawing_area();
        let (color, background_color) = colors(settings.theme);

        root.fill(&background_color)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                caption,
                TextStyle::from(FONT_CAPTION.into_font()).color(&color),
            )
            .margin(10f32)
            .x_label_area_size(30f32)
            .y_label_area_size(50f32)
            .build_cartesian_2d(first..last, 0f32..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .set_all_tick_mark_size(3u32)
            .axis_style(color.mix(0.3))
            .bold_line_style(color.mix(0.05))
            .light_line_style(color.mix(0.0))
            .label_style(TextStyle::from(FONT.into_font()).color(&color))
            .x_labels(4)
            .y_labels(6)
            .draw()?;

        for plot_data in data {
            let mut values = plot_data.values.clone();
            values.sort_by_key(|e| e.0);

            for plot in &plot_data.plots {
                match *plot {
                    PlotType::Circle(color, opacity, size) => {
                        chart.draw_series(values.iter().map(|(x, y)| {
                            Circle::new(
                                (*x, *y),
                                size,
                                Palette99::pick(color).mix(opacity).filled(),
                            )
                        }))?;
                    }
                    PlotType::Line(color, opacity, size) => {
                        chart.draw_series(LineSeries::new(
                            values.iter().map(|(x, y)| (*x, *y)),
                            Palette99::pick(color).mix(opacity).stroke_width(size),
                        ))?;
                    }
                }
            }
        }

        root.present()?;
    }

    Ok(Some(result))
}

fn colors(theme: Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(20, 22, 26);
    match theme {
        Theme::Light => (dark, WHITE),
        Theme::Dark => (WHITE, dark),
    }
}

fn determine_x_span(data: &[PlotData]) -> Option<(NaiveDate, NaiveDate)> {
    let dates = data.iter().flat_map(|plot| plot.values.iter().map(|(d, _)| *d));
    let first = dates.clone().min()?;
    let last = dates.max()?;

    if first == last {
        return Some((first, last.checked_add_days(Days::new(1)).unwrap_or(last)));
    }

    Some((first, last))
}

fn determine_y_bounds(data: &[PlotData]) -> Option<Bounds> {
    data.iter()
        .flat_map(|plot| plot.values.iter().map(|(_, v)| *v))
        .fold(None, |bounds: Option<Bounds>, value| {
            let max = bounds.map_or(value, |b| f32::max(b.max, value));
            Some(Bounds {
                min: 0.,
                max: f32::max(max, 0.),
            })
        })
}
