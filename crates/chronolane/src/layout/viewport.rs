//! Canvas sizing.

use chronolane_core::geometry::Size;

use crate::config::{IndividualLayoutConfig, ViewPortConfig};

/// Canvas size for a chart with `row_count` rows.
///
/// The height always leaves room for at least one row, so an empty chart
/// still has a usable canvas.
pub fn canvas_size(row_count: usize, view_port: &ViewPortConfig, config: &IndividualLayoutConfig) -> Size {
    let rows = row_count.max(1) as f32;
    let height = config.top_margin
        + config.gap
        + rows * (config.height + config.gap)
        + config.bottom_margin;
    Size::new(view_port.x * view_port.zoom, height)
}
