//! Label placement: truncation and collision removal.

use chronolane_core::geometry::Bounds;

const ELLIPSIS: char = '…';

/// Shortens `text` to at most `max_chars` characters, ending in an ellipsis
/// when anything was cut.
///
/// ```
/// # use chronolane::layout::truncate_label;
/// assert_eq!(truncate_label("Pump", 10), "Pump");
/// assert_eq!(truncate_label("Centrifugal pump", 8), "Centrif…");
/// ```
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut truncated: String = text.chars().take(max_chars - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Greedy first-come placement of non-overlapping boxes.
///
/// A box is accepted only if it does not intersect any box accepted before
/// it, so the caller's ordering decides which label survives a collision.
#[derive(Debug, Default)]
pub struct Declutterer {
    placed: Vec<Bounds>,
}

impl Declutterer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `bounds` if it is free, recording it for later checks.
    pub fn try_place(&mut self, bounds: Bounds) -> bool {
        if self.placed.iter().any(|placed| placed.intersects(&bounds)) {
            return false;
        }
        self.placed.push(bounds);
        true
    }

    /// Boxes accepted so far, in acceptance order.
    pub fn placed(&self) -> &[Bounds] {
        &self.placed
    }
}

/// Keeps the items whose boxes survive first-seen-wins decluttering.
pub fn declutter<T>(items: impl IntoIterator<Item = T>, bounds_of: impl Fn(&T) -> Bounds) -> Vec<T> {
    let mut declutterer = Declutterer::new();
    items
        .into_iter()
        .filter(|item| declutterer.try_place(bounds_of(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use chronolane_core::geometry::{Point, Size};

    use super::*;

    fn square(x: f32, y: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(10.0, 10.0))
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_label("Überlandleitung", 5), "Über…");
        assert_eq!(truncate_label("abc", 3), "abc");
        assert_eq!(truncate_label("abcd", 1), "…");
        assert_eq!(truncate_label("abcd", 0), "");
    }

    #[test]
    fn test_first_seen_wins() {
        let kept = declutter(
            [("a", square(0.0, 0.0)), ("b", square(5.0, 5.0)), ("c", square(20.0, 0.0))],
            |(_, bounds)| *bounds,
        );

        let names: Vec<_> = kept.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_touching_boxes_collide() {
        let mut declutterer = Declutterer::new();
        assert!(declutterer.try_place(square(0.0, 0.0)));
        assert!(!declutterer.try_place(square(10.0, 0.0)));
        assert!(declutterer.try_place(square(10.5, 0.0)));
        assert_eq!(declutterer.placed().len(), 2);
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn boxes_strategy() -> impl Strategy<Value = Vec<Bounds>> {
            prop::collection::vec((0.0f32..200.0, 0.0f32..200.0, 1.0f32..60.0, 1.0f32..30.0), 0..30)
                .prop_map(|specs| {
                    specs
                        .into_iter()
                        .map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
                        .collect()
                })
        }

        fn check_kept_boxes_are_disjoint(boxes: &[Bounds]) {
            let kept = declutter(boxes.iter().copied(), |bounds| *bounds);
            for (i, a) in kept.iter().enumerate() {
                for b in &kept[i + 1..] {
                    assert!(!a.intersects(b));
                }
            }
        }

        fn check_first_box_is_always_kept(boxes: &[Bounds]) {
            let kept = declutter(boxes.iter().copied(), |bounds| *bounds);
            assert_eq!(kept.first(), boxes.first());
        }

        proptest! {
            #[test]
            fn kept_boxes_are_disjoint(boxes in boxes_strategy()) {
                check_kept_boxes_are_disjoint(&boxes);
            }

            #[test]
            fn first_box_is_always_kept(boxes in boxes_strategy()) {
                check_first_box_is_always_kept(&boxes);
            }
        }
    }
}
