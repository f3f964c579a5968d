//! # Drag-Reorder Adapter
//!
//! Translates a finished drag gesture into an index move on the owning
//! list, independent of any gesture-recognition library. The adapter only
//! sees two identities: the dragged item and the item it was dropped over.
//! Both resolve to their current array positions at drop time, never to
//! positions captured at drag start, so the move stays correct if the list
//! shifted mid-gesture.

/// A finished drag gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragEnd {
    /// The item being dragged
    pub active_id: String,

    /// The drop target, if the pointer was over one
    pub over_id: Option<String>,
}

impl DragEnd {
    pub fn new(active_id: impl Into<String>, over_id: Option<&str>) -> Self {
        Self {
            active_id: active_id.into(),
            over_id: over_id.map(String::from),
        }
    }
}

/// An item addressable by a stable identity
pub trait HasId {
    fn id(&self) -> &str;
}

impl HasId for courseforge_content::model::Section {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for courseforge_content::model::Lesson {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Resolve a drag gesture to a `(from, to)` index pair in `items`.
///
/// Returns `None` when the gesture is a no-op: no drop target, dropped on
/// itself, or either identity no longer present in the list.
pub fn resolve_move<T: HasId>(items: &[T], drag: &DragEnd) -> Option<(usize, usize)> {
    let over_id = drag.over_id.as_deref()?;
    if over_id == drag.active_id {
        return None;
    }

    let from = items.iter().position(|item| item.id() == drag.active_id)?;
    let to = items.iter().position(|item| item.id() == over_id)?;
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str);

    impl HasId for Item {
        fn id(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_resolves_current_positions() {
        let items = [Item("a"), Item("b"), Item("c")];

        let drag = DragEnd::new("c", Some("a"));
        assert_eq!(resolve_move(&items, &drag), Some((2, 0)));
    }

    #[test]
    fn test_no_target_is_a_noop() {
        let items = [Item("a"), Item("b")];

        let drag = DragEnd::new("a", None);
        assert_eq!(resolve_move(&items, &drag), None);
    }

    #[test]
    fn test_drop_on_self_is_a_noop() {
        let items = [Item("a"), Item("b")];

        let drag = DragEnd::new("a", Some("a"));
        assert_eq!(resolve_move(&items, &drag), None);
    }

    #[test]
    fn test_vanished_item_is_a_noop() {
        // Item deleted between drag start and drop
        let items = [Item("a"), Item("b")];

        let drag = DragEnd::new("ghost", Some("a"));
        assert_eq!(resolve_move(&items, &drag), None);
    }
}
