// ABOUTME: Weight chart rendering as SVG and per-user chart file management
// ABOUTME: Plots logged weights, the fitted trend curve, and the forecast; writes are atomic per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: day offsets and point counts are small

//! # Weight Charts
//!
//! Each user has one chart file, `weight_graph_<user_id>.svg`, replaced on every render.
//! Renders for the same user are serialized by a per-user lock and land through a temp file
//! plus rename. A reader sees either the previous chart or the new one. The lock map holds an
//! entry only while a render for that user is in flight.

use crate::errors::{AppError, AppResult};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracker_core::models::WeightSample;
use tracker_intelligence::TrendPredictor;
use uuid::Uuid;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 56.0;
/// Upper bound on vertices in the fitted curve
const MAX_CURVE_POINTS: i64 = 300;

const OBSERVED_COLOR: &str = "#1f77b4";
const FITTED_COLOR: &str = "#2ca02c";
const FORECAST_COLOR: &str = "#ff7f0e";

/// Render a chart of `samples` with the model curve and `forecast_days` of forecast
pub fn render_weight_chart(
    title: &str,
    samples: &[WeightSample],
    model: &TrendPredictor,
    forecast_days: i64,
) -> AppResult<String> {
    let origin = model.origin();
    let forecast = model.forecast_points(forecast_days)?;
    let last_logged = samples
        .iter()
        .map(|s| (s.date - origin).num_days())
        .max()
        .unwrap_or(0);

    let step = (last_logged / MAX_CURVE_POINTS).max(1);
    let mut curve: Vec<(f64, f64)> = (0..=last_logged)
        .step_by(usize::try_from(step).unwrap_or(1))
        .map(|d| (d as f64, model.predict_offset(d as f64)))
        .collect();
    if curve.last().is_some_and(|(x, _)| *x < last_logged as f64) {
        curve.push((last_logged as f64, model.predict_offset(last_logged as f64)));
    }

    // The forecast line starts at the last fitted point so the two segments join
    let mut future: Vec<(f64, f64)> = curve.last().copied().into_iter().collect();
    future.extend(
        forecast
            .iter()
            .map(|p| ((p.date - origin).num_days() as f64, p.weight)),
    );
    let observed: Vec<(f64, f64)> = samples
        .iter()
        .map(|s| ((s.date - origin).num_days() as f64, s.weight))
        .collect();

    let all_y = observed.iter().chain(&curve).chain(&future).map(|(_, y)| *y);
    let (mut y_min, mut y_max) = all_y.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    if !y_min.is_finite() || !y_max.is_finite() {
        return Err(AppError::internal("Chart has no finite values to plot"));
    }
    let pad = ((y_max - y_min) * 0.05).max(0.5);
    y_min -= pad;
    y_max += pad;

    let x_max = future
        .last()
        .map_or(last_logged as f64, |(x, _)| *x)
        .max(1.0);
    let frame = Frame {
        x_max,
        y_min,
        y_max,
    };

    let end_date = forecast.last().map_or_else(
        || samples.iter().map(|s| s.date).max().unwrap_or(origin),
        |p| p.date,
    );

    let mut svg = String::with_capacity(8 * 1024);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif" font-size="12">"#
    ));
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);
    svg.push_str(&format!(
        r#"<text x="{}" y="28" font-size="18" text-anchor="middle">{}</text>"#,
        WIDTH / 2.0,
        html_escape::encode_text(title)
    ));

    // Axes and labels
    let (left, right) = (MARGIN_LEFT, WIDTH - MARGIN_RIGHT);
    let (top, bottom) = (MARGIN_TOP, HEIGHT - MARGIN_BOTTOM);
    svg.push_str(&format!(
        r##"<path d="M{left} {top} L{left} {bottom} L{right} {bottom}" stroke="#444" fill="none"/>"##
    ));
    svg.push_str(&format!(
        r#"<text x="{left}" y="{}" text-anchor="start">{origin}</text>"#,
        bottom + 18.0
    ));
    svg.push_str(&format!(
        r#"<text x="{right}" y="{}" text-anchor="end">{end_date}</text>"#,
        bottom + 18.0
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="middle">Date</text>"#,
        (left + right) / 2.0,
        HEIGHT - 12.0
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="end">{:.1}</text>"#,
        left - 6.0,
        top + 4.0,
        y_max
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="end">{:.1}</text>"#,
        left - 6.0,
        bottom,
        y_min
    ));
    svg.push_str(&format!(
        r#"<text x="16" y="{}" transform="rotate(-90 16 {})" text-anchor="middle">Weight (kg)</text>"#,
        (top + bottom) / 2.0,
        (top + bottom) / 2.0
    ));

    svg.push_str(&format!(
        r#"<polyline fill="none" stroke="{FITTED_COLOR}" stroke-width="2" points="{}"/>"#,
        frame.points(&curve)
    ));
    if future.len() > 1 {
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{FORECAST_COLOR}" stroke-width="2" stroke-dasharray="6 4" points="{}"/>"#,
            frame.points(&future)
        ));
    }
    for point in &observed {
        let (x, y) = frame.project(*point);
        svg.push_str(&format!(
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="{OBSERVED_COLOR}"/>"#
        ));
    }

    // Legend
    let legend = [
        (OBSERVED_COLOR, "Logged weight"),
        (FITTED_COLOR, "Fitted trend"),
        (FORECAST_COLOR, "Forecast"),
    ];
    for (i, (color, label)) in legend.iter().enumerate() {
        let y = top + 8.0 + 16.0 * i as f64;
        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="10" height="10" fill="{color}"/><text x="{}" y="{}">{label}</text>"#,
            right - 120.0,
            y - 9.0,
            right - 104.0,
            y
        ));
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Maps data coordinates (day offset, kg) into the plot area
struct Frame {
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn project(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let px = (x / self.x_max).mul_add(plot_w, MARGIN_LEFT);
        let py = (1.0 - (y - self.y_min) / (self.y_max - self.y_min)).mul_add(plot_h, MARGIN_TOP);
        (px, py)
    }

    fn points(&self, data: &[(f64, f64)]) -> String {
        data.iter()
            .map(|p| {
                let (x, y) = self.project(*p);
                format!("{x:.1},{y:.1}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Owns the chart directory and serializes writes per user
pub struct ChartRenderer {
    charts_dir: PathBuf,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl ChartRenderer {
    /// Renderer writing into `charts_dir`
    #[must_use]
    pub fn new(charts_dir: PathBuf) -> Self {
        Self {
            charts_dir,
            locks: DashMap::new(),
        }
    }

    /// Directory holding the chart files
    #[must_use]
    pub fn charts_dir(&self) -> &Path {
        &self.charts_dir
    }

    /// Chart file for `user_id`
    #[must_use]
    pub fn chart_path(&self, user_id: Uuid) -> PathBuf {
        self.charts_dir.join(format!("weight_graph_{user_id}.svg"))
    }

    /// Replace the user's chart file with `svg`
    ///
    /// The user's lock entry is dropped again once no other render for that user holds it.
    pub async fn write_user_chart(&self, user_id: Uuid, svg: &str) -> AppResult<PathBuf> {
        let lock = self
            .locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let written = {
            let _guard = lock.lock().await;
            self.replace_chart_file(user_id, svg).await
        };
        drop(lock);
        self.locks
            .remove_if(&user_id, |_, lock| Arc::strong_count(lock) == 1);
        written
    }

    async fn replace_chart_file(&self, user_id: Uuid, svg: &str) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.charts_dir)
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to create charts directory {}: {e}",
                    self.charts_dir.display()
                ))
            })?;

        let target = self.chart_path(user_id);
        let temp = self
            .charts_dir
            .join(format!("weight_graph_{user_id}.{}.tmp", Uuid::new_v4().simple()));

        if let Err(e) = tokio::fs::write(&temp, svg).await {
            return Err(AppError::storage(format!("Failed to write chart: {e}")));
        }
        if let Err(e) = tokio::fs::rename(&temp, &target).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                tracing::warn!("Failed to remove temporary chart {}: {cleanup}", temp.display());
            }
            return Err(AppError::storage(format!("Failed to replace chart: {e}")));
        }

        tracing::debug!(user_id = %user_id, path = %target.display(), "Chart written");
        Ok(target)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn samples() -> Vec<WeightSample> {
        (0..5)
            .map(|d| {
                WeightSample::new(
                    NaiveDate::from_ymd_opt(2024, 3, 1 + d).unwrap(),
                    80.0 - 0.3 * f64::from(d),
                )
            })
            .collect()
    }

    #[test]
    fn test_chart_contains_all_series() {
        let samples = samples();
        let model = TrendPredictor::fit(&samples).unwrap();
        let svg = render_weight_chart("Weight <trend>", &samples, &model, 10).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), samples.len());
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains("Weight &lt;trend&gt;"));
        assert!(svg.contains("2024-03-15"));
    }

    #[tokio::test]
    async fn test_charts_are_per_user_and_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path().join("charts"));
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        let path_a = renderer.write_user_chart(a, "<svg>1</svg>").await.unwrap();
        renderer.write_user_chart(a, "<svg>2</svg>").await.unwrap();
        let path_b = renderer.write_user_chart(b, "<svg>b</svg>").await.unwrap();

        assert_ne!(path_a, path_b);
        assert_eq!(std::fs::read_to_string(&path_a).unwrap(), "<svg>2</svg>");
        assert_eq!(std::fs::read_to_string(&path_b).unwrap(), "<svg>b</svg>");
        assert!(renderer.locks.is_empty());
        let files = std::fs::read_dir(renderer.charts_dir()).unwrap().count();
        assert_eq!(files, 2);
    }

    #[tokio::test]
    async fn test_concurrent_renders_for_one_user_release_their_lock() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path().to_path_buf());
        let user = Uuid::new_v4();

        let (first, second, third) = tokio::join!(
            renderer.write_user_chart(user, "<svg>1</svg>"),
            renderer.write_user_chart(user, "<svg>2</svg>"),
            renderer.write_user_chart(user, "<svg>3</svg>"),
        );
        let path = first.unwrap();
        assert_eq!(second.unwrap(), path);
        assert_eq!(third.unwrap(), path);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(["<svg>1</svg>", "<svg>2</svg>", "<svg>3</svg>"].contains(&written.as_str()));
        assert!(renderer.locks.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
