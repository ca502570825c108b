//! Chart rendering for reports
//!
//! Renders a target's recorded series into two SVG charts: latency over
//! record index, and a frequency histogram of observed status codes. An
//! empty series renders a degenerate chart with empty axes rather than
//! failing.

use std::collections::BTreeMap;

use plotters::prelude::*;

use crate::HealthRecord;

pub const MIME_SVG: &str = "image/svg+xml";

const WIDTH: u32 = 800;
const HEIGHT: u32 = 480;

fn chart_err(e: impl std::fmt::Display) -> anyhow::Error {
    anyhow::anyhow!("chart rendering failed: {e}")
}

/// Render the ordered latency sequence (value vs. sequence index).
///
/// Down records have no latency and show up as gaps in the index axis.
pub fn latency_chart(target: &str, records: &[HealthRecord]) -> anyhow::Result<Vec<u8>> {
    let points: Vec<(usize, u64)> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| record.latency_ms.map(|latency| (index, latency)))
        .collect();

    let x_max = records.len().max(1);
    let y_max = points.iter().map(|&(_, latency)| latency).max().unwrap_or(0).max(1);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("Response Time for {target}"), ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(36)
            .y_label_area_size(48)
            .build_cartesian_2d(0..x_max, 0..y_max + y_max / 10 + 1)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_desc("Index")
            .y_desc("Response Time (ms)")
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(LineSeries::new(points, &BLUE))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    Ok(svg.into_bytes())
}

/// Render a frequency histogram of the status codes in a series.
pub fn status_histogram(target: &str, records: &[HealthRecord]) -> anyhow::Result<Vec<u8>> {
    let counts = count_status_codes(records);
    let codes: Vec<u16> = counts.keys().copied().collect();

    let x_max = codes.len().max(1);
    let y_max = counts.values().copied().max().unwrap_or(0).max(1);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("Status Codes for {target}"), ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(36)
            .y_label_area_size(48)
            .build_cartesian_2d((0..x_max).into_segmented(), 0..y_max + 1)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Status Code")
            .y_desc("Count")
            .x_label_formatter(&|position| match position {
                SegmentValue::CenterOf(index) => codes
                    .get(*index)
                    .map(|code| code.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BLUE.filled())
                    .margin(8)
                    .data(counts.values().enumerate().map(|(index, &count)| (index, count))),
            )
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    Ok(svg.into_bytes())
}

/// Count how often each status code appears in a series.
///
/// Down records carry no status code and are not counted.
pub fn count_status_codes(records: &[HealthRecord]) -> BTreeMap<u16, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        if let Some(code) = record.status_code {
            *counts.entry(code).or_insert(0u64) += 1;
        }
    }
    counts
}
