use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;
use tracing::info;

use crate::config::Palette;
use crate::relativity::{RelativisticState, RelativityError, StateInputs};

/// Upper end of the default sweep; γ ≈ 7.09 here, which keeps curves readable.
pub const DEFAULT_MAX_BETA: f64 = 0.99;
pub const DEFAULT_SAMPLES: usize = 1000;

/// Evenly spaced β values from 0 to `max_beta` inclusive, each evaluated
/// on demand with a single calculator call.
#[derive(Debug, Clone)]
pub struct Sweep {
    template: StateInputs,
    max_beta: f64,
    samples: usize,
    next: usize,
}

impl Sweep {
    pub fn new(template: StateInputs, max_beta: f64, samples: usize) -> Self {
        Self {
            template,
            max_beta,
            samples,
            next: 0,
        }
    }

    fn beta_at(&self, index: usize) -> f64 {
        if self.samples <= 1 {
            return 0.0;
        }
        self.max_beta * index as f64 / (self.samples - 1) as f64
    }
}

impl Iterator for Sweep {
    type Item = Result<RelativisticState, RelativityError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.samples {
            return None;
        }
        let beta = self.beta_at(self.next);
        self.next += 1;
        Some(RelativisticState::compute(self.template.at(beta)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.samples - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Sweep {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub velocity_fraction: f64,
    pub gamma: f64,
    /// Moving clock rate as a percentage of the observer's.
    pub time_rate_percent: f64,
    pub proper_time: f64,
    pub dilated_time: f64,
    pub proper_length: f64,
    pub contracted_length: f64,
    pub rest_mass: f64,
    pub relativistic_mass: f64,
    pub rest_energy: f64,
    pub kinetic_energy: f64,
    pub total_energy: f64,
}

impl From<&RelativisticState> for DataPoint {
    fn from(state: &RelativisticState) -> Self {
        Self {
            velocity_fraction: state.beta(),
            gamma: state.gamma,
            time_rate_percent: state.time_rate * 100.0,
            proper_time: state.inputs.proper_time,
            dilated_time: state.dilated_time,
            proper_length: state.inputs.proper_length,
            contracted_length: state.contracted_length,
            rest_mass: state.inputs.rest_mass,
            relativistic_mass: state.relativistic_mass,
            rest_energy: state.energy.rest,
            kinetic_energy: state.energy.kinetic,
            total_energy: state.energy.total,
        }
    }
}

const HEADER: [&str; 12] = [
    "velocity_fraction",
    "gamma",
    "time_rate_percent",
    "proper_time",
    "dilated_time",
    "proper_length",
    "contracted_length",
    "rest_mass",
    "relativistic_mass",
    "rest_energy",
    "kinetic_energy",
    "total_energy",
];

/// Collect a sweep into data points, failing on the first rejected sample.
pub fn collect(sweep: Sweep) -> Result<Vec<DataPoint>, RelativityError> {
    sweep.map(|state| state.map(|s| DataPoint::from(&s))).collect()
}

pub fn export_csv(log: &[DataPoint], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;
    for dp in log {
        // Full precision: β close to 1 must never round up to 1.
        writer.write_record([
            dp.velocity_fraction.to_string(),
            dp.gamma.to_string(),
            dp.time_rate_percent.to_string(),
            dp.proper_time.to_string(),
            dp.dilated_time.to_string(),
            dp.proper_length.to_string(),
            dp.contracted_length.to_string(),
            dp.rest_mass.to_string(),
            dp.relativistic_mass.to_string(),
            dp.rest_energy.to_string(),
            dp.kinetic_energy.to_string(),
            dp.total_energy.to_string(),
        ])?;
    }
    writer.flush()?;
    info!(rows = log.len(), path = %path.display(), "metrics exported");
    Ok(())
}

fn axis_max(log: &[DataPoint], value: impl Fn(&DataPoint) -> f64) -> f64 {
    let max = log.iter().map(value).fold(0.0, f64::max);
    if max > 0.0 { max * 1.05 } else { 1.0 }
}

/// Draw γ, clock rate and total energy against velocity (%c), side by side.
pub fn plot_results(log: &[DataPoint], palette: &Palette, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1500, 500)).into_drawing_area();
    root.fill(&RGBColor::from(palette.background))?;

    let panels = root.split_evenly((1, 3));
    let foreground = RGBColor::from(palette.foreground);
    let marker = RGBColor::from(palette.marker);

    let series: [(&str, &str, RGBColor, fn(&DataPoint) -> f64); 3] = [
        (
            "Relativistic Effects",
            "γ",
            palette.gamma.into(),
            |d| d.gamma,
        ),
        (
            "Time Slowing",
            "Time (%)",
            palette.time.into(),
            |d| d.time_rate_percent,
        ),
        (
            "Total Energy",
            "Energy (J)",
            palette.energy.into(),
            |d| d.total_energy,
        ),
    ];

    for (panel, (caption, y_desc, color, value)) in panels.iter().zip(series) {
        panel.fill(&RGBColor::from(palette.plot_background))?;

        let mut chart = ChartBuilder::on(panel)
            .caption(caption, ("sans-serif", 22).into_font().color(&foreground))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..100f64, 0f64..axis_max(log, value))?;

        chart
            .configure_mesh()
            .light_line_style(RGBColor::from(palette.grid))
            .axis_style(foreground)
            .label_style(("sans-serif", 14).into_font().color(&foreground))
            .x_desc("Velocity (%c)")
            .y_desc(y_desc)
            .draw()?;

        chart.draw_series(LineSeries::new(
            log.iter().map(|d| (d.velocity_fraction * 100.0, value(d))),
            color.stroke_width(2),
        ))?;

        if let Some(last) = log.last() {
            chart.draw_series(std::iter::once(Circle::new(
                (last.velocity_fraction * 100.0, value(last)),
                5,
                marker.filled(),
            )))?;
        }
    }

    root.present()?;
    info!(path = %path.display(), "plot saved");
    Ok(())
}
