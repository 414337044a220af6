//! Mapping from model time to horizontal pixel coordinates.

use crate::{config::IndividualLayoutConfig, model::Activity};

/// Horizontal coordinate frame of a chart.
///
/// ```text
/// x_margin | label column | temporal_margin | time domain ... | temporal_margin | x_margin
///          ^ chart_left                     ^ x_base                            ^ chart_right
/// ```
///
/// Times map linearly onto the time domain band. Open-ended rows stretch to
/// `chart_left`/`chart_right`, overrunning the domain by the temporal margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start_of_time: f64,
    end_of_time: f64,
    time_interval: f64,
    x_base: f32,
    chart_left: f32,
    chart_right: f32,
}

impl TimeScale {
    /// Creates a scale for `[start_of_time, end_of_time]` on a canvas `canvas_width` wide.
    ///
    /// A degenerate domain (`end_of_time <= start_of_time`) is given a duration of 1.
    pub fn new(
        start_of_time: f64,
        end_of_time: f64,
        canvas_width: f32,
        label_column: f32,
        config: &IndividualLayoutConfig,
    ) -> Self {
        let chart_left = config.x_margin + label_column;
        let chart_right = canvas_width - config.x_margin;
        let x_base = chart_left + config.temporal_margin;
        let available_width = chart_right - chart_left - 2.0 * config.temporal_margin;

        let mut duration = end_of_time - start_of_time;
        if duration <= 0.0 {
            duration = 1.0;
        }

        Self {
            start_of_time,
            end_of_time,
            time_interval: f64::from(available_width) / duration,
            x_base,
            chart_left,
            chart_right,
        }
    }

    /// Creates a scale whose domain spans the given activities.
    ///
    /// With no activities the domain is the single instant `0`.
    pub fn for_activities<'a>(
        activities: impl IntoIterator<Item = &'a Activity>,
        canvas_width: f32,
        label_column: f32,
        config: &IndividualLayoutConfig,
    ) -> Self {
        let (start, end) = activities
            .into_iter()
            .fold(None, |domain: Option<(f64, f64)>, activity| {
                Some(match domain {
                    None => (activity.beginning, activity.ending),
                    Some((start, end)) => (start.min(activity.beginning), end.max(activity.ending)),
                })
            })
            .unwrap_or((0.0, 0.0));

        Self::new(start, end, canvas_width, label_column, config)
    }

    /// Pixel x-coordinate of time `t`.
    pub fn time_to_x(&self, t: f64) -> f32 {
        self.x_base + ((t - self.start_of_time) * self.time_interval) as f32
    }

    pub fn start_of_time(&self) -> f64 {
        self.start_of_time
    }

    pub fn end_of_time(&self) -> f64 {
        self.end_of_time
    }

    /// Left edge of the chart area, right of the label column.
    pub fn chart_left(&self) -> f32 {
        self.chart_left
    }

    /// Right edge of the chart area.
    pub fn chart_right(&self) -> f32 {
        self.chart_right
    }

    /// Width between [`chart_left`](Self::chart_left) and [`chart_right`](Self::chart_right).
    pub fn full_width(&self) -> f32 {
        self.chart_right - self.chart_left
    }
}
