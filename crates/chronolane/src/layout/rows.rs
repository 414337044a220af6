//! Chart rows: one per individual, plus derived rows for installations.
//!
//! Installation rows are layout-only views. They are never part of the model
//! and are rebuilt on every layout call:
//!
//! - after a System's row, one row per component installed into it, ordered by
//!   installation beginning and then by model order;
//! - after such a row for a SystemComponent, one row per component installed
//!   into that SystemComponent within this System context;
//! - after a SystemComponent row without installations of its own, one row per
//!   component installed into it without a System context.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
};

use log::{debug, warn};

use chronolane_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::{
    config::IndividualLayoutConfig,
    layout::{time::TimeScale, visibility},
    model::{Activity, Individual, IndividualRole, Installation, Interval, Model, Participation},
};

/// Identity of a chart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// The plain row of an individual.
    Individual(Id),
    /// A component's row inside an installation target.
    Installation {
        component_id: Id,
        target_id: Id,
        installation_id: Id,
        /// The target's own installation into a System, for nested rows.
        host_installation_id: Option<Id>,
    },
}

impl RowKey {
    /// The individual whose row this is.
    pub fn individual_id(&self) -> Id {
        match self {
            Self::Individual(id) => *id,
            Self::Installation { component_id, .. } => *component_id,
        }
    }

    pub fn is_installation(&self) -> bool {
        matches!(self, Self::Installation { .. })
    }

    /// Stable identifier of the row.
    ///
    /// Installation rows get a composite of component, target and
    /// installation ids (and the host installation for nested rows).
    pub fn id(&self) -> Id {
        match *self {
            Self::Individual(id) => id,
            Self::Installation {
                component_id,
                target_id,
                installation_id,
                host_installation_id,
            } => {
                let id = component_id
                    .create_nested(target_id)
                    .create_nested(installation_id);
                match host_installation_id {
                    Some(host) => id.create_nested(host),
                    None => id,
                }
            }
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A row ready for placement.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    key: RowKey,
    name: String,
    depth: usize,
    extent: Interval,
    clip: Interval,
}

impl RowView {
    fn plain<'a>(individual: &Individual, activities: impl IntoIterator<Item = &'a Activity>) -> Self {
        Self {
            key: RowKey::Individual(individual.id),
            name: individual.name.clone(),
            depth: 0,
            extent: visibility::participant_extent(individual, activities),
            clip: visibility::participation_clip(individual),
        }
    }

    fn installation(
        placement: &Placement<'_>,
        host: Option<&Installation>,
        extent: Interval,
        depth: usize,
    ) -> Self {
        Self {
            key: RowKey::Installation {
                component_id: placement.component.id,
                target_id: placement.installation.target_id,
                installation_id: placement.installation.id,
                host_installation_id: host.map(|h| h.id),
            },
            name: placement.component.name.clone(),
            depth,
            extent,
            clip: extent,
        }
    }

    pub fn key(&self) -> RowKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nesting level: 0 for plain rows, 1 or 2 for installation rows.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Time span the row is drawn over.
    pub fn extent(&self) -> Interval {
        self.extent
    }

    /// Bounds participations on this row are clipped to.
    pub fn clip(&self) -> Interval {
        self.clip
    }
}

/// A component together with one of its installations.
#[derive(Debug, Clone, Copy)]
struct Placement<'a> {
    component: &'a Individual,
    installation: &'a Installation,
    order: usize,
}

/// Groups installations by target, sorted by beginning and then model order.
fn placements_by_target(model: &Model) -> HashMap<Id, Vec<Placement<'_>>> {
    let mut by_target: HashMap<Id, Vec<Placement<'_>>> = HashMap::new();

    for (order, component) in model.individuals().values().enumerate() {
        warn_overlapping_installations(component);

        for installation in &component.installations {
            match model.individual(installation.target_id) {
                Some(target) if target.role.is_installation_target() => {}
                Some(target) => {
                    debug!(
                        component:% = component.id,
                        installation:% = installation.id,
                        target:% = target.id,
                        role:? = target.role;
                        "Skipping installation into an individual that is not an installation target"
                    );
                    continue;
                }
                None => {
                    debug!(
                        component:% = component.id,
                        installation:% = installation.id,
                        target:% = installation.target_id;
                        "Skipping installation with unresolved target"
                    );
                    continue;
                }
            }

            by_target
                .entry(installation.target_id)
                .or_default()
                .push(Placement {
                    component,
                    installation,
                    order,
                });
        }
    }

    for placements in by_target.values_mut() {
        placements.sort_by(|a, b| {
            a.installation
                .beginning
                .total_cmp(&b.installation.beginning)
                .then(a.order.cmp(&b.order))
        });
    }

    by_target
}

/// Pairs of installations of `component` into the same target and system
/// context whose periods overlap, earlier installation first.
fn overlapping_installations(component: &Individual) -> Vec<(&Installation, &Installation)> {
    let mut seen: HashMap<(Id, Option<Id>), Vec<&Installation>> = HashMap::new();
    let mut overlaps = Vec::new();

    for installation in &component.installations {
        let key = (installation.target_id, installation.system_context_id);
        match seen.entry(key) {
            Entry::Occupied(mut entry) => {
                overlaps.extend(
                    entry
                        .get()
                        .iter()
                        .filter(|earlier| earlier.interval().overlaps(installation.interval()))
                        .map(|earlier| (*earlier, installation)),
                );
                entry.get_mut().push(installation);
            }
            Entry::Vacant(entry) => {
                entry.insert(vec![installation]);
            }
        }
    }
    overlaps
}

fn warn_overlapping_installations(component: &Individual) {
    for (first, second) in overlapping_installations(component) {
        warn!(
            component:% = component.id,
            target:% = second.target_id,
            first:% = first.id,
            second:% = second.id;
            "Overlapping installations of the same component into the same target"
        );
    }
}

/// Whether any installation of `component` resolves to a System.
fn is_installed_in_system(model: &Model, component: &Individual) -> bool {
    component.installations.iter().any(|installation| {
        model
            .individual(installation.target_id)
            .is_some_and(|target| target.role == IndividualRole::System)
    })
}

/// Builds the ordered row list for a model snapshot.
///
/// `activities` are the activities in view; they drive participant-bounded
/// extents of plain rows.
pub fn build_rows(model: &Model, activities: &[&Activity]) -> Vec<RowView> {
    let by_target = placements_by_target(model);
    let placements_into = |id: Id| by_target.get(&id).map(Vec::as_slice).unwrap_or_default();

    let mut rows = Vec::with_capacity(model.individuals().len());
    for individual in model.individuals().values() {
        rows.push(RowView::plain(individual, activities.iter().copied()));

        match individual.role {
            IndividualRole::System => {
                for placement in placements_into(individual.id) {
                    let extent =
                        visibility::installation_extent(model, placement.installation, individual, None);
                    rows.push(RowView::installation(placement, None, extent, 1));

                    if placement.component.role != IndividualRole::SystemComponent {
                        continue;
                    }

                    let host = placement.installation;
                    for nested in placements_into(placement.component.id) {
                        let in_context = nested
                            .installation
                            .system_context_id
                            .is_none_or(|context| context == individual.id);
                        if !in_context {
                            continue;
                        }
                        let extent = visibility::installation_extent(
                            model,
                            nested.installation,
                            placement.component,
                            Some(host),
                        );
                        rows.push(RowView::installation(nested, Some(host), extent, 2));
                    }
                }
            }
            IndividualRole::SystemComponent if !is_installed_in_system(model, individual) => {
                for placement in placements_into(individual.id) {
                    if placement.installation.system_context_id.is_some() {
                        continue;
                    }
                    let extent =
                        visibility::installation_extent(model, placement.installation, individual, None);
                    rows.push(RowView::installation(placement, None, extent, 1));
                }
            }
            _ => {}
        }
    }

    debug!(
        individuals = model.individuals().len(),
        rows = rows.len();
        "Built chart rows"
    );
    rows
}

/// Lookup from participations to the rows they are drawn on.
#[derive(Debug, Default)]
pub struct RowIndex {
    by_individual: HashMap<Id, usize>,
    by_installation: HashMap<(Id, Id), Vec<usize>>,
}

impl RowIndex {
    pub fn new(rows: &[RowView]) -> Self {
        let mut index = Self::default();
        for (i, row) in rows.iter().enumerate() {
            match row.key {
                RowKey::Individual(id) => {
                    index.by_individual.insert(id, i);
                }
                RowKey::Installation {
                    component_id,
                    installation_id,
                    ..
                } => {
                    index
                        .by_installation
                        .entry((component_id, installation_id))
                        .or_default()
                        .push(i);
                }
            }
        }
        index
    }

    /// Indices of the rows a participation is drawn on.
    ///
    /// A participation naming an installation maps to every row derived from
    /// that installation; otherwise it maps to the individual's plain row.
    pub fn rows_for(&self, participation: &Participation) -> &[usize] {
        match participation.installation_id {
            Some(installation_id) => self
                .by_installation
                .get(&(participation.individual_id, installation_id))
                .map(Vec::as_slice)
                .unwrap_or_default(),
            None => self
                .by_individual
                .get(&participation.individual_id)
                .map(std::slice::from_ref)
                .unwrap_or_default(),
        }
    }
}

/// Top edge of the row at `index`.
pub fn row_top(index: usize, config: &IndividualLayoutConfig) -> f32 {
    config.top_margin + config.gap + index as f32 * (config.height + config.gap)
}

/// Rectangle of a row spanning `extent`.
///
/// Open sides stretch to the chart edges of `scale`.
pub fn row_bounds(
    extent: Interval,
    index: usize,
    scale: &TimeScale,
    config: &IndividualLayoutConfig,
) -> Bounds {
    let x = if extent.has_open_start() {
        scale.chart_left()
    } else {
        scale.time_to_x(extent.start())
    };
    let right = if extent.has_open_end() {
        scale.chart_right()
    } else {
        scale.time_to_x(extent.end())
    };

    Bounds::new_from_top_left(
        Point::new(x, row_top(index, config)),
        Size::new((right - x).max(0.0), config.height),
    )
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn system_model() -> Model {
        Model::new()
            .with_individual(
                Individual::new("sys", "Cooling system")
                    .with_role(IndividualRole::System)
                    .with_extent(0.0, 100.0),
            )
            .with_individual(
                Individual::new("slot", "Pump slot")
                    .with_role(IndividualRole::SystemComponent)
                    .with_installation(Installation::new("slot-in-sys", "sys", 10.0, Some(80.0))),
            )
            .with_individual(
                Individual::new("pump-b", "Pump B")
                    .with_role(IndividualRole::InstalledComponent)
                    .with_installation(Installation::new("b-in-slot", "slot", 40.0, None)),
            )
            .with_individual(
                Individual::new("pump-a", "Pump A")
                    .with_role(IndividualRole::InstalledComponent)
                    .with_installation(Installation::new("a-in-slot", "slot", 0.0, Some(40.0))),
            )
    }

    fn keys(rows: &[RowView]) -> Vec<String> {
        rows.iter().map(|row| row.key().to_string()).collect()
    }

    #[test]
    fn test_plain_rows_follow_model_order() {
        let model = Model::new()
            .with_individual(Individual::new("b", "B"))
            .with_individual(Individual::new("a", "A"));

        let rows = build_rows(&model, &[]);

        assert_eq!(keys(&rows), ["b", "a"]);
        assert!(rows.iter().all(|row| row.depth() == 0));
    }

    #[test]
    fn test_installation_rows_nest_under_system() {
        let model = system_model();
        let rows = build_rows(&model, &[]);

        assert_eq!(
            keys(&rows),
            [
                "sys",
                "slot::sys::slot-in-sys",
                "pump-a::slot::a-in-slot::slot-in-sys",
                "pump-b::slot::b-in-slot::slot-in-sys",
                "slot",
                "pump-b",
                "pump-a",
            ]
        );
        assert_eq!(rows[1].depth(), 1);
        assert_eq!(rows[2].depth(), 2);
        assert_eq!(rows[2].name(), "Pump A");
    }

    #[test]
    fn test_nested_rows_are_bounded_by_host_installation() {
        let model = system_model();
        let rows = build_rows(&model, &[]);

        assert_eq!(rows[1].extent(), Interval::new(10.0, 80.0));
        assert_eq!(rows[2].extent(), Interval::new(10.0, 40.0));
        assert_eq!(rows[3].extent(), Interval::new(40.0, 80.0));
        assert_eq!(rows[3].clip(), rows[3].extent());
    }

    #[test]
    fn test_standalone_system_component_gets_installation_rows() {
        let model = Model::new()
            .with_individual(Individual::new("slot", "Slot").with_role(IndividualRole::SystemComponent))
            .with_individual(
                Individual::new("c", "C")
                    .with_installation(Installation::new("c-in-slot", "slot", 5.0, None))
                    .with_installation(
                        Installation::new("elsewhere", "slot", 50.0, None).with_system_context("other"),
                    ),
            );

        let rows = build_rows(&model, &[]);

        assert_eq!(keys(&rows), ["slot", "c::slot::c-in-slot", "c"]);
        assert_eq!(rows[1].extent(), Interval::new(5.0, f64::INFINITY));
    }

    #[test]
    fn test_system_component_outside_any_system_keeps_installation_rows() {
        let model = Model::new()
            .with_individual(
                Individual::new("slot", "Slot")
                    .with_role(IndividualRole::SystemComponent)
                    .with_installation(Installation::new("slot-in-ghost", "ghost-sys", 0.0, None)),
            )
            .with_individual(
                Individual::new("c", "C")
                    .with_role(IndividualRole::InstalledComponent)
                    .with_installation(Installation::new("c-in-slot", "slot", 0.0, None)),
            );

        let rows = build_rows(&model, &[]);

        assert_eq!(keys(&rows), ["slot", "c::slot::c-in-slot", "c"]);
        assert_eq!(
            RowIndex::new(&rows).rows_for(&Participation::new("c").in_installation("c-in-slot")),
            [1]
        );
    }

    #[test]
    fn test_overlapping_installations_are_detected() {
        let component = Individual::new("c", "C")
            .with_installation(Installation::new("i1", "slot", 0.0, Some(20.0)))
            .with_installation(Installation::new("i2", "slot", 10.0, Some(30.0)))
            .with_installation(Installation::new("i3", "slot", 30.0, None))
            .with_installation(Installation::new("i4", "slot", 15.0, None).with_system_context("sys"));

        let pairs: Vec<_> = overlapping_installations(&component)
            .into_iter()
            .map(|(first, second)| (first.id.to_string(), second.id.to_string()))
            .collect();

        assert_eq!(pairs, [("i1".to_string(), "i2".to_string())]);
    }

    #[test]
    fn test_overlapping_installations_keep_their_own_rows() {
        let model = Model::new()
            .with_individual(Individual::new("slot", "Slot").with_role(IndividualRole::SystemComponent))
            .with_individual(
                Individual::new("c", "C")
                    .with_installation(Installation::new("i1", "slot", 0.0, Some(20.0)))
                    .with_installation(Installation::new("i2", "slot", 10.0, Some(30.0))),
            );

        let rows = build_rows(&model, &[]);
        let index = RowIndex::new(&rows);

        assert_eq!(keys(&rows), ["slot", "c::slot::i1", "c::slot::i2", "c"]);
        assert_eq!(index.rows_for(&Participation::new("c").in_installation("i1")), [1]);
        assert_eq!(index.rows_for(&Participation::new("c").in_installation("i2")), [2]);
    }

    #[test]
    fn test_system_context_filters_nested_rows() {
        let model = Model::new()
            .with_individual(Individual::new("s1", "S1").with_role(IndividualRole::System))
            .with_individual(Individual::new("s2", "S2").with_role(IndividualRole::System))
            .with_individual(
                Individual::new("slot", "Slot")
                    .with_role(IndividualRole::SystemComponent)
                    .with_installation(Installation::new("in-s1", "s1", 0.0, None))
                    .with_installation(Installation::new("in-s2", "s2", 0.0, None)),
            )
            .with_individual(
                Individual::new("c", "C").with_installation(
                    Installation::new("c-in-slot", "slot", 1.0, None).with_system_context("s2"),
                ),
            );

        let rows = build_rows(&model, &[]);

        assert_eq!(
            keys(&rows),
            [
                "s1",
                "slot::s1::in-s1",
                "s2",
                "slot::s2::in-s2",
                "c::slot::c-in-slot::in-s2",
                "slot",
                "c",
            ]
        );
    }

    #[test]
    fn test_unresolved_and_invalid_targets_are_skipped() {
        let model = Model::new()
            .with_individual(Individual::new("plain", "Plain"))
            .with_individual(
                Individual::new("c", "C")
                    .with_installation(Installation::new("dangling", "missing", 0.0, None))
                    .with_installation(Installation::new("invalid", "plain", 0.0, None)),
            );

        let rows = build_rows(&model, &[]);

        assert_eq!(keys(&rows), ["plain", "c"]);
    }

    #[test]
    fn test_row_index_maps_participations() {
        let rows = build_rows(&system_model(), &[]);
        let index = RowIndex::new(&rows);

        assert_eq!(index.rows_for(&Participation::new("pump-a")), [6]);
        assert_eq!(
            index.rows_for(&Participation::new("pump-a").in_installation("a-in-slot")),
            [2]
        );
        assert!(index.rows_for(&Participation::new("ghost")).is_empty());
        assert!(
            index
                .rows_for(&Participation::new("pump-a").in_installation("nope"))
                .is_empty()
        );
    }

    #[test]
    fn test_row_bounds_cases() {
        let config = IndividualLayoutConfig::default();
        // chart 40..960, domain 50..950 over 0..100
        let scale = TimeScale::new(0.0, 100.0, 1000.0, 0.0, &config);

        let bounded = row_bounds(Interval::new(0.0, 50.0), 0, &scale, &config);
        assert_approx_eq!(f32, bounded.min_x(), 50.0);
        assert_approx_eq!(f32, bounded.width(), 450.0);
        assert_approx_eq!(f32, bounded.min_y(), 35.0);
        assert_approx_eq!(f32, bounded.height(), 20.0);

        let open_start = row_bounds(Interval::new(f64::NEG_INFINITY, 50.0), 1, &scale, &config);
        assert_approx_eq!(f32, open_start.min_x(), 40.0);
        assert_approx_eq!(f32, open_start.max_x(), 500.0);
        assert_approx_eq!(f32, open_start.min_y(), 65.0);

        let open_end = row_bounds(Interval::new(50.0, f64::INFINITY), 0, &scale, &config);
        assert_approx_eq!(f32, open_end.min_x(), 500.0);
        assert_approx_eq!(f32, open_end.max_x(), 960.0);

        let open = row_bounds(Interval::unbounded(), 0, &scale, &config);
        assert_approx_eq!(f32, open.min_x(), 40.0);
        assert_approx_eq!(f32, open.width(), scale.full_width());
    }
}
