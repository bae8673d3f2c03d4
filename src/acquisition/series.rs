// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Plot series derived from samples

use super::Sample;

/// Axis extents for a chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x: [0.0, 1.0],
            y: [0.0, 1.0],
        }
    }
}

/// One plot's points, optionally windowed to the most recent `max_points`
#[derive(Debug, Clone, Default)]
pub struct Series {
    points: Vec<(f64, f64)>,
    max_points: usize,
}

impl Series {
    pub fn new(max_points: usize) -> Self {
        Self {
            points: Vec::new(),
            max_points,
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
        if self.max_points > 0 && self.points.len() > self.max_points {
            let excess = self.points.len() - self.max_points;
            self.points.drain(..excess);
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Data extents padded by 5% so edge points stay visible.
    /// Degenerate axes are widened by one unit each way.
    pub fn bounds(&self) -> Bounds {
        let Some(&(x0, y0)) = self.points.first() else {
            return Bounds::default();
        };
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (x0, x0, y0, y0);
        for &(x, y) in &self.points[1..] {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        Bounds {
            x: pad(min_x, max_x),
            y: pad(min_y, max_y),
        }
    }
}

fn pad(min: f64, max: f64) -> [f64; 2] {
    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        return [min - 1.0, max + 1.0];
    }
    let margin = span * 0.05;
    [min - margin, max + margin]
}

/// The three live plots
#[derive(Debug, Clone, Default)]
pub struct SeriesSet {
    /// x = temperature, y = deformation
    pub deformation_vs_temperature: Series,
    /// x = elapsed seconds, y = deformation
    pub deformation_vs_time: Series,
    /// x = elapsed seconds, y = temperature
    pub temperature_vs_time: Series,
}

impl SeriesSet {
    pub fn new(max_points: usize) -> Self {
        Self {
            deformation_vs_temperature: Series::new(max_points),
            deformation_vs_time: Series::new(max_points),
            temperature_vs_time: Series::new(max_points),
        }
    }

    pub fn push(&mut self, sample: &Sample) {
        self.deformation_vs_temperature
            .push(sample.temperature, sample.deformation);
        self.deformation_vs_time
            .push(sample.elapsed_secs, sample.deformation);
        self.temperature_vs_time
            .push(sample.elapsed_secs, sample.temperature);
    }

    pub fn clear(&mut self) {
        self.deformation_vs_temperature.clear();
        self.deformation_vs_time.clear();
        self.temperature_vs_time.clear();
    }

    pub fn len(&self) -> usize {
        self.deformation_vs_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deformation_vs_time.is_empty()
    }
}
