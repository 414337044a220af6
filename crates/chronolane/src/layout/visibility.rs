//! Effective time bounds of rows and the visible part of each participation.
//!
//! A participation is drawn only where the activity, the row's own extent and,
//! for installation rows, the installation period and its target's bounds all
//! overlap.

use crate::model::{Activity, Individual, Installation, Interval, Model};

/// Bounds an individual's participations are clipped to on its plain row.
///
/// A side flagged as participant-driven is left open: there the individual's
/// extent follows its participations instead of constraining them.
pub fn participation_clip(individual: &Individual) -> Interval {
    let extent = individual.extent();
    let start = if individual.begins_with_participant {
        f64::NEG_INFINITY
    } else {
        extent.start()
    };
    let end = if individual.ends_with_participant {
        f64::INFINITY
    } else {
        extent.end()
    };
    Interval::new(start, end)
}

/// Drawn extent of an individual's plain row.
///
/// Participant-driven sides are moved to the earliest beginning / latest ending
/// among the activities the individual participates in. Without such
/// activities the declared extent is kept.
pub fn participant_extent<'a>(
    individual: &Individual,
    activities: impl IntoIterator<Item = &'a Activity>,
) -> Interval {
    let extent = individual.extent();
    if !individual.begins_with_participant && !individual.ends_with_participant {
        return extent;
    }

    let span = activities
        .into_iter()
        .filter(|activity| {
            activity
                .participations
                .iter()
                .any(|p| p.individual_id == individual.id)
        })
        .map(Activity::interval)
        .reduce(|a, b| Interval::new(a.start().min(b.start()), a.end().max(b.end())));

    let Some(span) = span else {
        return extent;
    };

    let start = if individual.begins_with_participant {
        span.start()
    } else {
        extent.start()
    };
    let end = if individual.ends_with_participant {
        span.end()
    } else {
        extent.end()
    };
    Interval::new(start, end)
}

/// Effective bounds of an installation target.
///
/// A target placed through `host` (a SystemComponent's own installation into a
/// System) is bounded by that installation, the System's bounds and its own
/// extent, floored at time zero. Without a host the target's declared extent
/// applies.
pub fn target_bounds(model: &Model, target: &Individual, host: Option<&Installation>) -> Interval {
    let Some(host) = host else {
        return target.extent();
    };

    let system_bounds = model
        .individual(host.target_id)
        .map(|system| target_bounds(model, system, None))
        .unwrap_or_else(Interval::unbounded);

    host.interval()
        .intersect(system_bounds)
        .intersect(target.extent())
        .floor_start(0.0)
}

/// Extent of an installation row: the installation period within its target's bounds.
pub fn installation_extent(
    model: &Model,
    installation: &Installation,
    target: &Individual,
    host: Option<&Installation>,
) -> Interval {
    installation
        .interval()
        .intersect(target_bounds(model, target, host))
}

/// The part of `activity` drawn on a row clipped to `clip`, if any.
pub fn visible_interval(activity: Interval, clip: Interval) -> Option<Interval> {
    let visible = activity.intersect(clip);
    (!visible.is_empty()).then_some(visible)
}
