use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
///
/// Two lists compare equal when they hold the same items in the same
/// insertion order, which makes frame output directly comparable in tests.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem { key: SortKey::new(z, order), cmd });
        self.sorted_dirty = true;
    }

    /// Iterates items in paint order (back-to-front) without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        let items = &self.items;
        self.sorted_indices.sort_by(|&a, &b| items[a].key.cmp(&items[b].key));

        self.sorted_dirty = false;
    }
}

impl PartialEq for DrawList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, Stroke};

    fn line(x: f32) -> DrawCmd {
        DrawCmd::Line(crate::scene::LineCmd {
            from: Vec2::zero(),
            to: Vec2::new(x, 0.0),
            stroke: Stroke::new(1.0, Color::from_hex_rgb(0xFFFFFF)),
        })
    }

    fn painted_xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Line(l) => l.to.x,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push(ZIndex(2), line(1.0));
        list.push(ZIndex(0), line(2.0));
        list.push(ZIndex(2), line(3.0));
        list.push(ZIndex(1), line(4.0));

        assert_eq!(painted_xs(&mut list), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn paint_order_refreshes_after_push() {
        let mut list = DrawList::new();
        list.push(ZIndex(1), line(1.0));
        assert_eq!(painted_xs(&mut list), vec![1.0]);

        list.push(ZIndex(0), line(2.0));
        assert_eq!(painted_xs(&mut list), vec![2.0, 1.0]);
    }

    #[test]
    fn clear_resets_items_and_order() {
        let mut list = DrawList::new();
        list.push(ZIndex(0), line(1.0));
        list.push(ZIndex(0), line(2.0));
        list.clear();
        assert!(list.is_empty());

        list.push(ZIndex(0), line(3.0));
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(painted_xs(&mut list), vec![3.0]);
    }

    #[test]
    fn equality_compares_recorded_items() {
        let mut a = DrawList::new();
        let mut b = DrawList::new();
        a.push(ZIndex(0), line(1.0));
        b.push(ZIndex(0), line(1.0));
        assert_eq!(a, b);

        b.push(ZIndex(0), line(2.0));
        assert_ne!(a, b);
    }
}
