use crate::domain::ItemId;
use std::collections::HashMap;

/// Vertical gap between adjacent items, in layout points
pub const ITEM_GAP: f64 = 3.0;

/// Measured layout rectangle of a rendered item.
///
/// Heights are only trustworthy after the item has rendered once; an
/// unmeasured item contributes zero height, which can transiently misplace
/// the insertion point and self-corrects after layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }
}

/// A resolved drop: splice out of `from`, insert at `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    pub from: usize,
    pub to: usize,
}

/// Tracks one in-flight drag over the active list and resolves the drop.
///
/// The engine never mutates the list itself; the item store's `reorder`
/// commits the splice this engine reports on release.
#[derive(Debug, Default)]
pub struct DragReorder {
    layouts: HashMap<ItemId, LayoutRect>,
    dragged: Option<ItemId>,
    translation: (f64, f64),
    displacements: HashMap<ItemId, f64>,
}

impl DragReorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the post-layout rectangle for an item
    pub fn record_layout(&mut self, id: ItemId, rect: LayoutRect) {
        self.layouts.insert(id, rect);
    }

    /// Drop layout and displacement state for items no longer in the list
    pub fn retain_items(&mut self, order: &[ItemId]) {
        self.layouts.retain(|id, _| order.contains(id));
        self.displacements.retain(|id, _| order.contains(id));
    }

    /// Pick up an item; any previous drag state is superseded
    pub fn begin_drag(&mut self, id: ItemId) {
        self.dragged = Some(id);
        self.translation = (0.0, 0.0);
    }

    pub fn dragged(&self) -> Option<ItemId> {
        self.dragged
    }

    pub fn translation(&self) -> (f64, f64) {
        self.translation
    }

    /// Current animated offset for a sibling (zero when at rest)
    pub fn displacement(&self, id: ItemId) -> f64 {
        self.displacements.get(&id).copied().unwrap_or(0.0)
    }

    fn item_height(&self, id: ItemId) -> f64 {
        self.layouts.get(&id).map(|rect| rect.height).unwrap_or(0.0)
    }

    /// Static top edge of the item at `index`: preceding heights plus one
    /// gap per preceding item after the first
    fn item_offset(&self, order: &[ItemId], index: usize) -> f64 {
        order[..index]
            .iter()
            .enumerate()
            .map(|(i, &id)| self.item_height(id) + if i > 0 { ITEM_GAP } else { 0.0 })
            .sum()
    }

    /// Gesture update: accumulate the translation and recompute which
    /// siblings shift to make room.
    ///
    /// An earlier sibling moves down by (dragged height + gap) once the
    /// dragged item's projected top rises above its center; a later
    /// sibling moves up once the projected bottom falls below its center.
    /// Everything else returns to rest.
    pub fn update(&mut self, order: &[ItemId], translation: (f64, f64)) {
        let Some(dragged_id) = self.dragged else {
            return;
        };
        let Some(dragged_idx) = order.iter().position(|&id| id == dragged_id) else {
            return;
        };

        self.translation = translation;

        let dragged_height = self.item_height(dragged_id);
        let dragged_top = self.item_offset(order, dragged_idx) + translation.1;
        let dragged_bottom = dragged_top + dragged_height;

        for (index, &id) in order.iter().enumerate() {
            if index == dragged_idx {
                continue;
            }
            let item_top = self.item_offset(order, index);
            let item_center = item_top + self.item_height(id) / 2.0;

            let target = if index < dragged_idx && dragged_top < item_center {
                dragged_height + ITEM_GAP
            } else if index > dragged_idx && dragged_bottom > item_center {
                -(dragged_height + ITEM_GAP)
            } else {
                0.0
            };
            self.displacements.insert(id, target);
        }
    }

    /// Drop: resolve the insertion index from the final translation.
    ///
    /// Scans for the first sibling whose midpoint the dragged item has
    /// crossed (earlier items compare against the top edge, later ones
    /// against the bottom), adjusts by -1 when the slot lies after the
    /// origin, and defaults to the end of the list. All drag state is
    /// reset regardless of the outcome; `Some` is returned only when the
    /// order actually changes.
    pub fn release(&mut self, order: &[ItemId], translation_y: f64) -> Option<Reorder> {
        let result = self.resolve_drop(order, translation_y);

        self.dragged = None;
        self.translation = (0.0, 0.0);
        self.displacements.clear();

        result.filter(|reorder| reorder.from != reorder.to)
    }

    fn resolve_drop(&self, order: &[ItemId], translation_y: f64) -> Option<Reorder> {
        let dragged_id = self.dragged?;
        let dragged_idx = order.iter().position(|&id| id == dragged_id)?;

        let dragged_height = self.item_height(dragged_id);
        let dragged_top = self.item_offset(order, dragged_idx) + translation_y;
        let dragged_bottom = dragged_top + dragged_height;

        let crossed = order.iter().enumerate().position(|(index, &id)| {
            if index == dragged_idx {
                return false;
            }
            let item_top = self.item_offset(order, index);
            let item_center = item_top + self.item_height(id) / 2.0;
            if index < dragged_idx {
                dragged_top < item_center
            } else {
                dragged_bottom < item_center
            }
        });

        let to = match crossed {
            // Past every midpoint: the item moves to the end
            None => order.len() - 1,
            // Removing the dragged item shifts later indices down by one
            Some(index) if index > dragged_idx => index - 1,
            Some(index) => index,
        };

        Some(Reorder {
            from: dragged_idx,
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Four items of uniform height 50 with ids 10, 20, 30, 40
    fn uniform_engine() -> (DragReorder, Vec<ItemId>) {
        let order: Vec<ItemId> = vec![10, 20, 30, 40];
        let mut engine = DragReorder::new();
        for &id in &order {
            engine.record_layout(id, LayoutRect::sized(200.0, 50.0));
        }
        (engine, order)
    }

    fn splice(order: &[ItemId], reorder: Reorder) -> Vec<ItemId> {
        let mut next = order.to_vec();
        let moved = next.remove(reorder.from);
        next.insert(reorder.to, moved);
        next
    }

    #[test]
    fn test_no_movement_release_is_a_no_op() {
        let (mut engine, order) = uniform_engine();
        engine.begin_drag(20);
        engine.update(&order, (0.0, 0.0));

        assert_eq!(engine.release(&order, 0.0), None);
        assert_eq!(engine.dragged(), None);
        for &id in &order {
            assert_eq!(engine.displacement(id), 0.0);
        }
    }

    #[test]
    fn test_small_wiggle_keeps_original_slot() {
        let (mut engine, order) = uniform_engine();
        engine.begin_drag(30);
        engine.update(&order, (0.0, 10.0));
        assert_eq!(engine.release(&order, 10.0), None);
    }

    #[test]
    fn test_drag_down_displaces_later_siblings_upward() {
        let (mut engine, order) = uniform_engine();
        engine.begin_drag(10);
        // top = 120, bottom = 170; centers of 20/30/40 are 75, 128, 181
        engine.update(&order, (0.0, 120.0));

        assert_eq!(engine.displacement(20), -(50.0 + ITEM_GAP));
        assert_eq!(engine.displacement(30), -(50.0 + ITEM_GAP));
        assert_eq!(engine.displacement(40), 0.0);
    }

    #[test]
    fn test_drag_up_displaces_earlier_siblings_downward() {
        let (mut engine, order) = uniform_engine();
        engine.begin_drag(30);
        // top = 103 - 60 = 43; centers of 10/20 are 25, 75
        engine.update(&order, (0.0, -60.0));

        assert_eq!(engine.displacement(10), 0.0);
        assert_eq!(engine.displacement(20), 50.0 + ITEM_GAP);
        assert_eq!(engine.displacement(40), 0.0);
    }

    #[test]
    fn test_siblings_return_to_rest_when_drag_retreats() {
        let (mut engine, order) = uniform_engine();
        engine.begin_drag(10);
        engine.update(&order, (0.0, 120.0));
        assert_ne!(engine.displacement(20), 0.0);

        engine.update(&order, (0.0, 0.0));
        assert_eq!(engine.displacement(20), 0.0);
        assert_eq!(engine.displacement(30), 0.0);
    }

    #[test]
    fn test_drop_matches_static_splice() {
        let (mut engine, order) = uniform_engine();
        engine.begin_drag(10);
        let reorder = engine.release(&order, 120.0).unwrap();

        assert_eq!(reorder, Reorder { from: 0, to: 2 });
        assert_eq!(splice(&order, reorder), vec![20, 30, 10, 40]);
    }

    #[test]
    fn test_drop_upwards() {
        let (mut engine, order) = uniform_engine();
        engine.begin_drag(30);
        let reorder = engine.release(&order, -60.0).unwrap();

        assert_eq!(reorder, Reorder { from: 2, to: 1 });
        assert_eq!(splice(&order, reorder), vec![10, 30, 20, 40]);
    }

    #[test]
    fn test_drop_past_everything_moves_to_end() {
        let (mut engine, order) = uniform_engine();
        engine.begin_drag(10);
        let reorder = engine.release(&order, 500.0).unwrap();

        assert_eq!(reorder, Reorder { from: 0, to: 3 });
        assert_eq!(splice(&order, reorder), vec![20, 30, 40, 10]);
    }

    #[test]
    fn test_unmeasured_items_count_as_zero_height() {
        let mut engine = DragReorder::new();
        let order: Vec<ItemId> = vec![1, 2, 3];
        engine.record_layout(1, LayoutRect::sized(200.0, 50.0));
        // 2 and 3 never rendered; no panic, drag still resolves
        engine.begin_drag(1);
        engine.update(&order, (0.0, 30.0));
        let reorder = engine.release(&order, 30.0);
        // Zero-height siblings have their centers at the same point, so
        // the item lands at the end once it passes them
        assert_eq!(reorder, Some(Reorder { from: 0, to: 2 }));
    }

    #[test]
    fn test_release_without_active_drag_is_none() {
        let (mut engine, order) = uniform_engine();
        assert_eq!(engine.release(&order, 100.0), None);
    }

    #[test]
    fn test_variable_heights_shift_the_midpoints() {
        let mut engine = DragReorder::new();
        let order: Vec<ItemId> = vec![1, 2, 3];
        engine.record_layout(1, LayoutRect::sized(200.0, 30.0));
        engine.record_layout(2, LayoutRect::sized(200.0, 120.0));
        engine.record_layout(3, LayoutRect::sized(200.0, 30.0));

        engine.begin_drag(1);
        // Offsets: item2 top = 30, center = 90; item3 top = 153, center = 168.
        // bottom = ty + 30 must pass 90 to clear item2.
        engine.update(&order, (0.0, 70.0));
        assert_eq!(engine.displacement(2), -(30.0 + ITEM_GAP));
        assert_eq!(engine.displacement(3), 0.0);

        let reorder = engine.release(&order, 70.0).unwrap();
        assert_eq!(reorder, Reorder { from: 0, to: 1 });
    }

    #[test]
    fn test_retain_items_drops_stale_state() {
        let (mut engine, order) = uniform_engine();
        engine.begin_drag(10);
        engine.update(&order, (0.0, 120.0));
        engine.release(&order, 0.0);

        engine.retain_items(&[10, 20]);
        assert_eq!(engine.item_height(30), 0.0);
        assert_eq!(engine.item_height(10), 50.0);
    }
}
