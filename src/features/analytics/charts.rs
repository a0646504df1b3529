//! SVG chart rendering.
//!
//! Every function takes the [`ChartConfig`] explicitly and returns a
//! `data:image/svg+xml;base64,...` URI. Rendering is CPU-bound; callers run it
//! on the blocking pool.

use base64::prelude::*;
use plotters::coord::ranged1d::SegmentValue;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::Pie;
use plotters::prelude::*;
use thiserror::Error;

use crate::core::config::ChartConfig;
use crate::features::analytics::models::RecipeTime;
use crate::features::recipes::classification::TimeBucket;
use crate::features::recipes::models::Difficulty;

const FONT: &str = "sans-serif";

/// Vertical space per recipe in the cooking time chart
const ROW_HEIGHT: u32 = 36;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Chart drawing failed: {0}")]
    Drawing(String),

    #[error("Nothing to chart")]
    Empty,
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(e.to_string())
    }
}

/// The three analytics charts as data URIs
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCharts {
    pub difficulty_chart: String,
    pub time_bucket_chart: String,
    pub recipe_times_chart: String,
}

pub fn render_all(
    difficulty_counts: &[(Difficulty, usize)],
    time_bucket_counts: &[(TimeBucket, usize)],
    recipe_times: &[RecipeTime],
    config: &ChartConfig,
) -> Result<RenderedCharts, ChartError> {
    Ok(RenderedCharts {
        difficulty_chart: render_difficulty_chart(difficulty_counts, config)?,
        time_bucket_chart: render_time_bucket_chart(time_bucket_counts, config)?,
        recipe_times_chart: render_recipe_times_chart(recipe_times, config)?,
    })
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

fn bucket_color(bucket: TimeBucket, config: &ChartConfig) -> RGBColor {
    match bucket {
        TimeBucket::Quick => rgb(config.quick_color),
        TimeBucket::Medium => rgb(config.medium_color),
        TimeBucket::Long => rgb(config.long_color),
    }
}

/// Difficulties share the bucket palette: easy green, medium orange, hard red
fn difficulty_color(difficulty: Difficulty, config: &ChartConfig) -> RGBColor {
    match difficulty {
        Difficulty::Easy => rgb(config.quick_color),
        Difficulty::Medium => rgb(config.medium_color),
        Difficulty::Hard => rgb(config.long_color),
    }
}

fn to_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", BASE64_STANDARD.encode(svg))
}

fn segment_label(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
            labels.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

/// Vertical bars, one per difficulty, in the order given
pub fn render_difficulty_chart(
    counts: &[(Difficulty, usize)],
    config: &ChartConfig,
) -> Result<String, ChartError> {
    if counts.is_empty() {
        return Err(ChartError::Empty);
    }

    let labels: Vec<String> = counts.iter().map(|(d, _)| d.to_string()).collect();
    let max = counts.iter().map(|(_, c)| *c as u32).max().unwrap_or(0);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Recipes by Difficulty", (FONT, 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0u32..counts.len() as u32).into_segmented(), 0u32..max + 1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Difficulty")
            .y_desc("Number of recipes")
            .x_label_formatter(&|v: &SegmentValue<u32>| segment_label(&labels, v))
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, (difficulty, count))| {
            let i = i as u32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), *count as u32),
                ],
                difficulty_color(*difficulty, config).filled(),
            );
            bar.set_margin(0, 0, 15, 15);
            bar
        }))?;

        root.present()?;
    }

    Ok(to_data_uri(&svg))
}

/// Pie of cooking time buckets; empty buckets get no slice
pub fn render_time_bucket_chart(
    counts: &[(TimeBucket, usize)],
    config: &ChartConfig,
) -> Result<String, ChartError> {
    let slices: Vec<(TimeBucket, usize)> =
        counts.iter().copied().filter(|(_, c)| *c > 0).collect();
    if slices.is_empty() {
        return Err(ChartError::Empty);
    }

    let sizes: Vec<f64> = slices.iter().map(|(_, c)| *c as f64).collect();
    let colors: Vec<RGBColor> = slices
        .iter()
        .map(|(b, _)| bucket_color(*b, config))
        .collect();
    let labels: Vec<String> = slices
        .iter()
        .map(|(b, c)| format!("{} ({})", b.label(), c))
        .collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE)?;
        let area = root.titled("Cooking Time Distribution", (FONT, 24))?;

        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = width.min(height) as f64 * 0.32;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(90.0);
        pie.label_style((FONT, 16).into_font().color(&BLACK));
        pie.percentages((FONT, 14).into_font().color(&WHITE));
        area.draw(&pie)?;

        root.present()?;
    }

    Ok(to_data_uri(&svg))
}

/// Horizontal bars of each recipe's cooking time, colored by bucket
pub fn render_recipe_times_chart(
    times: &[RecipeTime],
    config: &ChartConfig,
) -> Result<String, ChartError> {
    if times.is_empty() {
        return Err(ChartError::Empty);
    }

    let labels: Vec<String> = times.iter().map(|t| t.name.clone()).collect();
    let max = times
        .iter()
        .map(|t| t.cooking_time.max(0) as u32)
        .max()
        .unwrap_or(0);
    // Leave room for the "N min" label right of the longest bar
    let x_max = max + (max / 5).max(10);
    let height = config
        .height
        .max(ROW_HEIGHT * times.len() as u32 + 120);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Cooking Time per Recipe", (FONT, 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(180)
            .build_cartesian_2d(0u32..x_max, (0u32..times.len() as u32).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Cooking time (minutes)")
            .y_labels(times.len())
            .y_label_formatter(&|v: &SegmentValue<u32>| segment_label(&labels, v))
            .draw()?;

        chart.draw_series(times.iter().enumerate().map(|(i, t)| {
            let i = i as u32;
            let mut bar = Rectangle::new(
                [
                    (0, SegmentValue::Exact(i)),
                    (t.cooking_time.max(0) as u32, SegmentValue::Exact(i + 1)),
                ],
                bucket_color(t.bucket, config).filled(),
            );
            bar.set_margin(6, 6, 0, 0);
            bar
        }))?;

        chart.draw_series(times.iter().enumerate().map(|(i, t)| {
            Text::new(
                format!("{} min", t.cooking_time),
                (
                    t.cooking_time.max(0) as u32 + 1,
                    SegmentValue::CenterOf(i as u32),
                ),
                (FONT, 14).into_font().color(&BLACK),
            )
        }))?;

        root.present()?;
    }

    Ok(to_data_uri(&svg))
}
