//! Space-time chart layout.
//!
//! [`layout`] is a pure function of a [`Model`] snapshot and a [`ChartConfig`]:
//!
//! 1. rows are built (plain and installation rows) and the canvas is sized;
//! 2. the time domain of the activities in view is mapped onto the canvas;
//! 3. rows are placed, then activity boxes are composed across their rows;
//! 4. each participation is clipped to its row and packed into lanes;
//! 5. individual and activity labels are placed, dropping colliding ones.
//!
//! The result is a [`ChartLayout`]: positioned [`Shape`]s in paint order plus
//! the canvas size.

mod activity;
mod labels;
mod lanes;
mod rows;
mod shapes;
mod time;
mod viewport;
mod visibility;

pub use labels::{Declutterer, declutter, truncate_label};
pub use lanes::{LaneCandidate, LaneSegment};
pub use rows::{RowKey, RowView};
pub use shapes::{LabelShape, RectShape, Shape, ShapeKey};
pub use time::TimeScale;

use std::rc::Rc;

use log::{debug, info};

use chronolane_core::{
    draw::{RectangleDefinition, RenderLayer, Text, TextAnchor},
    geometry::{Bounds, Point, Size},
};

use crate::{
    config::{ChartConfig, PresentationConfig},
    model::{Activity, Model},
};

/// Horizontal indent of an installation row's label per nesting level.
const LABEL_INDENT: f32 = 8.0;

/// Rectangle styles shared by all shapes of a class.
struct Styles {
    individual: Rc<RectangleDefinition>,
    installation: Rc<RectangleDefinition>,
    activity: Rc<RectangleDefinition>,
    participation: Rc<RectangleDefinition>,
}

impl Styles {
    fn new(presentation: &PresentationConfig) -> Self {
        let defaults = PresentationConfig::default();
        Self {
            individual: Rc::new(
                presentation
                    .individual
                    .rectangle_definition(RenderLayer::Individual, &defaults.individual),
            ),
            installation: Rc::new(
                presentation
                    .installation
                    .rectangle_definition(RenderLayer::Individual, &defaults.installation),
            ),
            activity: Rc::new(
                presentation
                    .activity
                    .rectangle_definition(RenderLayer::Activity, &defaults.activity),
            ),
            participation: Rc::new(
                presentation
                    .participation
                    .rectangle_definition(RenderLayer::Participation, &defaults.participation),
            ),
        }
    }
}

/// The computed geometry of a chart.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    shapes: Vec<Shape>,
    rows: Vec<RowView>,
    scale: TimeScale,
    size: Size,
}

impl ChartLayout {
    /// All shapes in paint order: rows, activity boxes, participation
    /// segments, individual labels, activity labels.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Canvas size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The time-to-pixel mapping used for this layout.
    pub fn scale(&self) -> &TimeScale {
        &self.scale
    }

    /// Row views in row order.
    pub fn row_views(&self) -> &[RowView] {
        &self.rows
    }

    fn rects_where(&self, predicate: impl Fn(ShapeKey) -> bool) -> impl Iterator<Item = &RectShape> {
        self.shapes
            .iter()
            .filter_map(Shape::as_rect)
            .filter(move |rect| predicate(rect.key()))
    }

    fn labels_where(&self, predicate: impl Fn(ShapeKey) -> bool) -> impl Iterator<Item = &LabelShape> {
        self.shapes
            .iter()
            .filter_map(Shape::as_label)
            .filter(move |label| predicate(label.key()))
    }

    /// Row rectangles, in row order.
    pub fn rows(&self) -> impl Iterator<Item = &RectShape> {
        self.rects_where(|key| matches!(key, ShapeKey::Individual(_)))
    }

    /// Activity boxes, in model order.
    pub fn activity_boxes(&self) -> impl Iterator<Item = &RectShape> {
        self.rects_where(|key| matches!(key, ShapeKey::Activity(_)))
    }

    /// Participation segments, grouped by row.
    pub fn segments(&self) -> impl Iterator<Item = &RectShape> {
        self.rects_where(|key| matches!(key, ShapeKey::Participation { .. }))
    }

    /// Kept individual labels, in row order.
    pub fn individual_labels(&self) -> impl Iterator<Item = &LabelShape> {
        self.labels_where(|key| matches!(key, ShapeKey::IndividualLabel(_)))
    }

    /// Kept activity labels, in placement order.
    pub fn activity_labels(&self) -> impl Iterator<Item = &LabelShape> {
        self.labels_where(|key| matches!(key, ShapeKey::ActivityLabel(_)))
    }

    /// Looks up a shape by key.
    pub fn shape(&self, key: ShapeKey) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.key() == key)
    }
}

/// Activities drawn at the configured breakdown level, with their model order.
fn activities_in_view<'a>(model: &'a Model, config: &ChartConfig) -> Vec<(usize, &'a Activity)> {
    let parent = config.layout().activity.parent;
    model
        .activities()
        .values()
        .enumerate()
        .filter(|(_, activity)| activity.parent_id == parent)
        .collect()
}

/// Computes the layout of `model`.
///
/// Never fails: participations and installations that cannot be resolved are
/// skipped and logged at debug level.
pub fn layout(model: &Model, config: &ChartConfig) -> ChartLayout {
    let individual_config = &config.layout().individual;
    let labels = config.labels();

    let activities = activities_in_view(model, config);
    let in_view: Vec<&Activity> = activities.iter().map(|(_, activity)| *activity).collect();

    let views = rows::build_rows(model, &in_view);
    let size = viewport::canvas_size(views.len(), config.view_port(), individual_config);

    let label_column = if labels.individual.enabled {
        individual_config.text_length
    } else {
        0.0
    };
    let scale = TimeScale::for_activities(
        in_view.iter().copied(),
        size.width(),
        label_column,
        individual_config,
    );
    debug!(
        start_of_time = scale.start_of_time(),
        end_of_time = scale.end_of_time(),
        activities = in_view.len();
        "Time domain resolved"
    );

    let row_rects: Vec<Bounds> = views
        .iter()
        .enumerate()
        .map(|(i, view)| rows::row_bounds(view.extent(), i, &scale, individual_config))
        .collect();
    let index = rows::RowIndex::new(&views);
    let styles = Styles::new(config.presentation());

    let mut shapes = Vec::new();

    for (view, rect) in views.iter().zip(&row_rects) {
        let definition = if view.key().is_installation() {
            &styles.installation
        } else {
            &styles.individual
        };
        shapes.push(Shape::Rect(RectShape::new(
            ShapeKey::Individual(view.key()),
            *rect,
            Rc::clone(definition),
        )));
    }

    let mut boxes = Vec::new();
    for (order, activity) in &activities {
        let Some(bounds) =
            activity::activity_bounds(activity, &index, &row_rects, &scale, individual_config.gap)
        else {
            continue;
        };
        shapes.push(Shape::Rect(RectShape::new(
            ShapeKey::Activity(activity.id),
            bounds,
            Rc::clone(&styles.activity),
        )));
        boxes.push((*order, *activity, bounds));
    }

    let mut candidates: Vec<Vec<LaneCandidate>> = vec![Vec::new(); views.len()];
    for (order, activity) in &activities {
        for participation in &activity.participations {
            let row_ids = index.rows_for(participation);
            if row_ids.is_empty() {
                debug!(
                    activity:% = activity.id,
                    individual:% = participation.individual_id;
                    "Participation does not resolve to a row, skipping"
                );
                continue;
            }

            for &row in row_ids {
                let Some(visible) =
                    visibility::visible_interval(activity.interval(), views[row].clip())
                else {
                    debug!(
                        activity:% = activity.id,
                        row:% = views[row].key();
                        "Participation lies outside the row's bounds"
                    );
                    continue;
                };
                candidates[row].push(LaneCandidate {
                    activity_id: activity.id,
                    activity_order: *order,
                    activity_interval: activity.interval(),
                    visible,
                });
            }
        }
    }

    for (row, row_candidates) in candidates.iter().enumerate() {
        let row_top = row_rects[row].min_y();
        for (segment_index, segment) in lanes::pack(row_candidates).iter().enumerate() {
            let bounds = lanes::segment_bounds(
                segment,
                row_top,
                individual_config.height,
                &scale,
                &config.layout().participation,
            );
            shapes.push(Shape::Rect(RectShape::new(
                ShapeKey::Participation {
                    activity_id: segment.activity_id,
                    row: views[row].key(),
                    segment: segment_index,
                },
                bounds,
                Rc::clone(&styles.participation),
            )));
        }
    }

    if labels.individual.enabled {
        let definition = Rc::new(labels.individual.text_definition(TextAnchor::Start));
        let candidates = views.iter().zip(&row_rects).map(|(view, rect)| {
            let position = Point::new(
                individual_config.x_margin + view.depth() as f32 * LABEL_INDENT,
                rect.min_y() + individual_config.height / 2.0,
            );
            let text = Text::new(
                Rc::clone(&definition),
                truncate_label(view.name(), labels.individual.max_chars),
            );
            LabelShape::new(ShapeKey::IndividualLabel(view.key()), position, text)
        });
        let kept = declutter(candidates, LabelShape::bounds);
        shapes.extend(kept.into_iter().map(Shape::Label));
    }

    if labels.activity.enabled {
        boxes.sort_by(|(a_order, a, _), (b_order, b, _)| {
            a.beginning.total_cmp(&b.beginning).then(a_order.cmp(b_order))
        });

        let definition = Rc::new(labels.activity.text_definition(TextAnchor::Middle));
        let font_size = f32::from(labels.activity.font_size);
        let candidates = boxes.iter().map(|(_, activity, bounds)| {
            let position = Point::new(
                bounds.min_x() + bounds.width() / 2.0,
                bounds.min_y() + font_size,
            );
            let text = Text::new(
                Rc::clone(&definition),
                truncate_label(&activity.name, labels.activity.max_chars),
            );
            LabelShape::new(ShapeKey::ActivityLabel(activity.id), position, text)
        });
        let kept = declutter(candidates, LabelShape::bounds);
        shapes.extend(kept.into_iter().map(Shape::Label));
    }

    info!(
        rows = views.len(),
        shapes = shapes.len(),
        width = size.width(),
        height = size.height();
        "Chart layout computed"
    );

    ChartLayout {
        shapes,
        rows: views,
        scale,
        size,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use chronolane_core::identifier::Id;

    use crate::{
        config::{ActivityLayoutConfig, LabelsConfig, LayoutConfig},
        model::{Individual, IndividualRole, Installation, Participation},
    };

    use super::*;

    fn keys<'a>(rects: impl Iterator<Item = &'a RectShape>) -> Vec<String> {
        rects.map(|rect| rect.key().to_string()).collect()
    }

    #[test]
    fn test_empty_model_has_one_row_canvas() {
        let layout = layout(&Model::new(), &ChartConfig::default());

        assert!(layout.shapes().is_empty());
        // 25 + 10 + 30 + 30
        assert_approx_eq!(f32, layout.size().height(), 95.0);
        assert_approx_eq!(f32, layout.size().width(), 1000.0);
    }

    #[test]
    fn test_paint_order() {
        let model = Model::new()
            .with_individual(Individual::new("a", "Alpha"))
            .with_activity(Activity::new("x", "Work", 0.0, 10.0).with_participant("a"));

        let layout = layout(&model, &ChartConfig::default());
        let order: Vec<_> = layout.shapes().iter().map(|shape| shape.key().to_string()).collect();

        assert_eq!(
            order,
            [
                "individual:a",
                "activity:x",
                "participation:x:a:0",
                "label:individual:a",
                "label:activity:x",
            ]
        );
    }

    #[test]
    fn test_activity_level_filter() {
        let model = Model::new()
            .with_individual(Individual::new("a", "A"))
            .with_activity(Activity::new("top", "Top", 0.0, 100.0).with_participant("a"))
            .with_activity(
                Activity::new("child", "Child", 10.0, 20.0)
                    .with_parent("top")
                    .with_participant("a"),
            );

        let top_level = layout(&model, &ChartConfig::default());
        assert_eq!(keys(top_level.activity_boxes()), ["activity:top"]);
        assert_eq!(top_level.scale().end_of_time(), 100.0);

        let config = ChartConfig::default().with_layout(LayoutConfig {
            activity: ActivityLayoutConfig {
                parent: Some(Id::new("top")),
            },
            ..LayoutConfig::default()
        });
        let children = layout(&model, &config);
        assert_eq!(keys(children.activity_boxes()), ["activity:child"]);
        assert_eq!(children.scale().start_of_time(), 10.0);
        assert_eq!(children.scale().end_of_time(), 20.0);
    }

    #[test]
    fn test_disabled_labels_free_label_column() {
        let model = Model::new()
            .with_individual(Individual::new("a", "A"))
            .with_activity(Activity::new("x", "X", 0.0, 10.0).with_participant("a"));

        let mut labels = LabelsConfig::default();
        labels.individual.enabled = false;
        labels.activity.enabled = false;
        let layout = layout(&model, &ChartConfig::default().with_labels(labels));

        assert_eq!(layout.individual_labels().count(), 0);
        assert_eq!(layout.activity_labels().count(), 0);
        assert_approx_eq!(f32, layout.scale().chart_left(), 40.0);
    }

    #[test]
    fn test_participations_outside_row_bounds_are_skipped() {
        let model = Model::new()
            .with_individual(Individual::new("a", "A").with_extent(0.0, 5.0))
            .with_activity(Activity::new("x", "X", 6.0, 10.0).with_participant("a"))
            .with_activity(Activity::new("y", "Y", 2.0, 8.0).with_participant("a"));

        let layout = layout(&model, &ChartConfig::default());
        let segments: Vec<_> = layout.segments().collect();

        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].key(),
            ShapeKey::Participation {
                activity_id: Id::new("y"),
                row: RowKey::Individual(Id::new("a")),
                segment: 0,
            }
        );
        assert_approx_eq!(f32, segments[0].bounds().max_x(), layout.scale().time_to_x(5.0));
    }

    #[test]
    fn test_installation_participation_lands_on_installation_row() {
        let model = Model::new()
            .with_individual(Individual::new("sys", "System").with_role(IndividualRole::System))
            .with_individual(
                Individual::new("pump", "Pump")
                    .with_installation(Installation::new("i1", "sys", 5.0, Some(15.0))),
            )
            .with_activity(
                Activity::new("run", "Run", 0.0, 20.0)
                    .with_participation(Participation::new("pump").in_installation("i1")),
            );

        let layout = layout(&model, &ChartConfig::default());
        let segments: Vec<_> = layout.segments().collect();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].key().to_string(), "participation:run:pump::sys::i1:0");
        assert_approx_eq!(f32, segments[0].bounds().min_x(), layout.scale().time_to_x(5.0));
        assert_approx_eq!(f32, segments[0].bounds().max_x(), layout.scale().time_to_x(15.0));

        let installation_row = layout
            .shape(ShapeKey::Individual(layout.row_views()[1].key()))
            .expect("installation row is drawn");
        assert_approx_eq!(f32, installation_row.bounds().min_y(), 65.0);
    }

    #[test]
    fn test_component_in_unhosted_system_component_is_drawn() {
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
            )
            .with_activity(
                Activity::new("run", "Run", 0.0, 10.0)
                    .with_participation(Participation::new("c").in_installation("c-in-slot")),
            );

        let layout = layout(&model, &ChartConfig::default());

        assert_eq!(layout.segments().count(), 1);
        assert_eq!(layout.activity_boxes().count(), 1);
    }

    #[test]
    fn test_overlapping_installations_draw_on_separate_rows() {
        let model = Model::new()
            .with_individual(Individual::new("slot", "Slot").with_role(IndividualRole::SystemComponent))
            .with_individual(
                Individual::new("c", "C")
                    .with_installation(Installation::new("i1", "slot", 0.0, Some(20.0)))
                    .with_installation(Installation::new("i2", "slot", 10.0, Some(30.0))),
            )
            .with_activity(
                Activity::new("first", "First", 0.0, 30.0)
                    .with_participation(Participation::new("c").in_installation("i1")),
            )
            .with_activity(
                Activity::new("second", "Second", 0.0, 30.0)
                    .with_participation(Participation::new("c").in_installation("i2")),
            );

        let layout = layout(&model, &ChartConfig::default());

        assert_eq!(layout.row_views().len(), 4);
        let keys: Vec<_> = layout.segments().map(|s| s.key().to_string()).collect();
        assert_eq!(
            keys,
            ["participation:first:c::slot::i1:0", "participation:second:c::slot::i2:0"]
        );
        assert_eq!(layout.activity_boxes().count(), 2);
    }

    #[test]
    fn test_nested_installation_labels_are_indented() {
        let model = Model::new()
            .with_individual(Individual::new("sys", "System").with_role(IndividualRole::System))
            .with_individual(
                Individual::new("pump", "Pump").with_installation(Installation::new("i1", "sys", 0.0, None)),
            );

        let layout = layout(&model, &ChartConfig::default());
        let xs: Vec<_> = layout.individual_labels().map(|label| label.position().x()).collect();

        assert_eq!(xs.len(), 3);
        assert_approx_eq!(f32, xs[0], 40.0);
        assert_approx_eq!(f32, xs[1], 48.0);
        assert_approx_eq!(f32, xs[2], 40.0);
    }

    #[test]
    fn test_activity_labels_truncated_and_centred() {
        let model = Model::new()
            .with_individual(Individual::new("a", "A"))
            .with_activity(
                Activity::new("x", "An activity with a very long name indeed", 0.0, 10.0)
                    .with_participant("a"),
            );

        let layout = layout(&model, &ChartConfig::default());
        let label = layout.activity_labels().next().expect("label kept");
        let activity_box = layout.activity_boxes().next().expect("box drawn").bounds();

        assert_eq!(label.content().chars().count(), 24);
        assert!(label.content().ends_with('…'));
        assert_approx_eq!(f32, label.position().x(), activity_box.min_x() + activity_box.width() / 2.0);
        assert_approx_eq!(f32, label.position().y(), activity_box.min_y() + 12.0);
    }
}
