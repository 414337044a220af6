//! Activity boxes spanning all rows an activity touches.

use log::debug;

use chronolane_core::geometry::Bounds;

use crate::{
    layout::{rows::RowIndex, time::TimeScale},
    model::Activity,
};

/// Box of an activity across its participants' rows.
///
/// Horizontally it covers the activity's interval. Vertically it runs from
/// half a gap above the topmost participating row to half a gap below the
/// bottommost one. Returns `None` when no participation resolves to a row.
pub fn activity_bounds(
    activity: &Activity,
    index: &RowIndex,
    row_rects: &[Bounds],
    scale: &TimeScale,
    gap: f32,
) -> Option<Bounds> {
    let span = activity
        .participations
        .iter()
        .flat_map(|participation| index.rows_for(participation))
        .filter_map(|&row| row_rects.get(row))
        .map(|rect| (rect.min_y(), rect.max_y()))
        .reduce(|(top, bottom), (t, b)| (top.min(t), bottom.max(b)));

    let Some((top, bottom)) = span else {
        debug!(activity:% = activity.id; "Activity has no participant rows, skipping box");
        return None;
    };

    Some(Bounds::from_extents(
        scale.time_to_x(activity.beginning),
        scale.time_to_x(activity.ending),
        top - gap / 2.0,
        bottom + gap / 2.0,
    ))
}
