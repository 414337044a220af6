//! Packing concurrent participations on a row into stacked lanes.
//!
//! The row's time span is cut at every participation boundary. Within each
//! piece, the participations active there split the row's band evenly, so a
//! participation's segment narrows while others overlap it and widens again
//! once they end.

use std::cmp::Ordering;

use chronolane_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::{config::ParticipationLayoutConfig, layout::time::TimeScale, model::Interval};

/// One participation to be packed on a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneCandidate {
    pub activity_id: Id,
    /// Position of the activity in the model, the final tie-breaker.
    pub activity_order: usize,
    /// The activity's full interval, used for stacking order.
    pub activity_interval: Interval,
    /// The part of the activity visible on this row.
    pub visible: Interval,
}

/// A piece of a participation occupying one lane for a sub-interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneSegment {
    pub activity_id: Id,
    pub from: f64,
    pub to: f64,
    /// Zero-based lane, counted from the top.
    pub lane: usize,
    /// Number of lanes in use during `[from, to)`.
    pub lanes: usize,
}

fn stacking_order(a: &LaneCandidate, b: &LaneCandidate) -> Ordering {
    a.activity_interval
        .start()
        .total_cmp(&b.activity_interval.start())
        .then(a.activity_order.cmp(&b.activity_order))
}

/// Packs the candidates of a single row into lane segments.
///
/// Segments are returned ordered by sub-interval, then lane. Candidates with an
/// empty visible interval produce nothing.
pub fn pack(candidates: &[LaneCandidate]) -> Vec<LaneSegment> {
    let mut breakpoints: Vec<f64> = candidates
        .iter()
        .filter(|c| !c.visible.is_empty())
        .flat_map(|c| [c.visible.start(), c.visible.end()])
        .collect();
    breakpoints.sort_by(f64::total_cmp);
    breakpoints.dedup();

    let mut segments = Vec::new();
    for window in breakpoints.windows(2) {
        let (from, to) = (window[0], window[1]);

        let mut active: Vec<&LaneCandidate> = candidates
            .iter()
            .filter(|c| c.visible.covers(from, to))
            .collect();
        if active.is_empty() {
            continue;
        }
        active.sort_by(|a, b| stacking_order(a, b));

        let lanes = active.len();
        segments.extend(active.into_iter().enumerate().map(|(lane, c)| LaneSegment {
            activity_id: c.activity_id,
            from,
            to,
            lane,
            lanes,
        }));
    }
    segments
}

/// Rectangle of a lane segment on a row whose top edge is `row_top`.
///
/// The band of all lanes is centred vertically in the row and is at most
/// `max_band_height` tall. Lanes are separated by `lane_gap` when stacked.
pub fn segment_bounds(
    segment: &LaneSegment,
    row_top: f32,
    row_height: f32,
    scale: &TimeScale,
    config: &ParticipationLayoutConfig,
) -> Bounds {
    let band = config.max_band_height.min(row_height);
    let group_top = row_top + (row_height - band) / 2.0;
    let lane_height = band / segment.lanes as f32;
    let gap = if segment.lanes > 1 { config.lane_gap } else { 0.0 };

    let x = scale.time_to_x(segment.from);
    let width = scale.time_to_x(segment.to) - x;

    Bounds::new_from_top_left(
        Point::new(x, group_top + segment.lane as f32 * lane_height),
        Size::new(width, (lane_height - gap).max(0.0)),
    )
}
