//! Layout propagation.
//!
//! Assigning a size to a widget re-places every child from the child's
//! margin and stretch and the parent's resolved content alignment, then
//! recurses: a child whose size changed re-places its own children before
//! control returns. The tree is therefore fully laid out whenever a size
//! assignment returns, which rendering and hit-testing rely on between
//! frames. The size-changed signal fires only after the subtree below the
//! widget is consistent.

use marmot_render::{Point, Size};
use marmot_style::{HorizontalAlign, StretchMode, VerticalAlign};

use crate::error::TreeError;

use super::node::{SizeChanged, WidgetId};
use super::tree::WidgetTree;

impl WidgetTree {
    /// Assign a widget's size.
    ///
    /// Equality-checked: assigning the current size is a no-op. The first
    /// assignment (and any assignment made while the widget's style is
    /// being applied) also records the authored size, which scale
    /// animations leave untouched.
    pub fn set_size(&mut self, id: WidgetId, size: Size) -> Result<(), TreeError> {
        self.set_size_impl(id, size, true)
    }

    /// Size assignment for animations: identical propagation, but the
    /// value is not recorded as an explicit local override, so a later
    /// style re-application may still supply a size.
    pub(crate) fn set_size_animated(&mut self, id: WidgetId, size: Size) -> Result<(), TreeError> {
        self.set_size_impl(id, size, false)
    }

    pub(crate) fn set_size_impl(
        &mut self,
        id: WidgetId,
        size: Size,
        mark_local: bool,
    ) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::InvalidWidget(id))?;
        if mark_local {
            node.local_set.insert(marmot_style::WidgetProperty::Size);
        }
        if node.size == Some(size) {
            return Ok(());
        }
        if node.original_size.is_none() || node.applying_styles {
            node.original_size = Some(size);
        }
        node.size = Some(size);
        tracing::trace!(target: "marmot::layout", ?id, ?size, "size assigned");

        self.update_child_formatting(id);

        // Children already reflect the new size; external listeners see a
        // consistent subtree.
        if let Some(node) = self.nodes.get(id) {
            node.size_changed.emit(SizeChanged { widget: id, size });
        }
        Ok(())
    }

    /// Recompute the placement of every child of `id`.
    ///
    /// Stretch wins over alignment per axis: a filling child spans the
    /// parent minus its margins; a non-stretched child keeps its intended
    /// size and is aligned within the margin-inset region.
    pub(crate) fn update_child_formatting(&mut self, id: WidgetId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let Some(parent_size) = node.size else {
            return;
        };
        let children = self.child_widgets(id);
        if children.is_empty() {
            return;
        }

        let h_align = self.horizontal_alignment(id);
        let v_align = self.vertical_alignment(id);

        for child_id in children {
            let Some(child) = self.nodes.get(child_id) else {
                continue;
            };
            let margin = child.margin;
            let stretch = child.stretch;
            let intended = child.intended_size();

            let avail_w = (parent_size.width - margin.horizontal()).max(0.0);
            let avail_h = (parent_size.height - margin.vertical()).max(0.0);

            let (width, x) = match stretch.horizontal {
                StretchMode::Fill => (avail_w, margin.left),
                StretchMode::None => {
                    let w = intended.width;
                    let x = match h_align {
                        HorizontalAlign::Left => margin.left,
                        HorizontalAlign::Center => margin.left + (avail_w - w) / 2.0,
                        HorizontalAlign::Right => parent_size.width - margin.right - w,
                    };
                    (w, x)
                }
            };
            let (height, y) = match stretch.vertical {
                StretchMode::Fill => (avail_h, margin.top),
                StretchMode::None => {
                    let h = intended.height;
                    let y = match v_align {
                        VerticalAlign::Top => margin.top,
                        VerticalAlign::Center => margin.top + (avail_h - h) / 2.0,
                        VerticalAlign::Bottom => parent_size.height - margin.bottom - h,
                    };
                    (h, y)
                }
            };

            // Recurses into the grandchildren before returning.
            let _ = self.set_size_impl(child_id, Size::new(width, height), false);
            if let Some(child) = self.nodes.get_mut(child_id) {
                child.offset = Point::new(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use marmot_style::{EdgeInsets, Stretch};
    use parking_lot::Mutex;

    use super::*;
    use crate::widget::WidgetKind;

    #[test]
    fn fill_child_insets_by_margin() {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Panel);
        let child = tree.create(WidgetKind::Panel);
        tree.add_child(root, child).unwrap();
        {
            let c = tree.get_mut(child).unwrap();
            c.set_margin(EdgeInsets::uniform(10.0));
            c.set_stretch(Stretch::FILL);
        }

        tree.set_size(root, Size::new(1000.0, 1600.0)).unwrap();

        let c = tree.get(child).unwrap();
        assert_eq!(c.size(), Size::new(980.0, 1580.0));
        assert_eq!(c.offset(), Point::new(10.0, 10.0));
    }

    #[test]
    fn layout_settles_recursively() {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Panel);
        let mid = tree.create(WidgetKind::Panel);
        let leaf = tree.create(WidgetKind::Panel);
        tree.add_child(root, mid).unwrap();
        tree.add_child(mid, leaf).unwrap();
        tree.get_mut(mid).unwrap().set_stretch(Stretch::FILL);
        {
            let l = tree.get_mut(leaf).unwrap();
            l.set_stretch(Stretch::FILL);
            l.set_margin(EdgeInsets::new(5.0, 0.0, 5.0, 0.0));
        }

        tree.set_size(root, Size::new(100.0, 100.0)).unwrap();

        assert_eq!(tree.get(mid).unwrap().size(), Size::new(100.0, 100.0));
        assert_eq!(tree.get(leaf).unwrap().size(), Size::new(90.0, 100.0));
        assert_eq!(tree.absolute_offset(leaf), Point::new(5.0, 0.0));
    }

    #[test]
    fn non_stretched_child_keeps_intended_size_and_aligns() {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Panel);
        let child = tree.create(WidgetKind::Panel);
        tree.add_child(root, child).unwrap();
        tree.set_size(child, Size::new(20.0, 10.0)).unwrap();
        {
            let r = tree.get_mut(root).unwrap();
            r.set_horizontal_alignment(Some(marmot_style::HorizontalAlign::Center));
            r.set_vertical_alignment(Some(marmot_style::VerticalAlign::Bottom));
        }

        tree.set_size(root, Size::new(100.0, 100.0)).unwrap();

        let c = tree.get(child).unwrap();
        assert_eq!(c.size(), Size::new(20.0, 10.0));
        assert_eq!(c.offset(), Point::new(40.0, 90.0));
    }

    #[test]
    fn assigning_equal_size_is_a_no_op() {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Panel);
        let fired = Arc::new(AtomicUsize::new(0));
        let f = fired.clone();
        tree.get(root).unwrap().size_changed.connect(move |_| {
            f.fetch_add(1, Ordering::SeqCst);
        });

        tree.set_size(root, Size::new(10.0, 10.0)).unwrap();
        tree.set_size(root, Size::new(10.0, 10.0)).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn size_changed_fires_after_children_are_consistent() {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Panel);
        let child = tree.create(WidgetKind::Panel);
        tree.add_child(root, child).unwrap();
        tree.get_mut(child).unwrap().set_stretch(Stretch::FILL);

        // The child's notification must come first, and by the time the
        // parent's fires the child has already been resized.
        let order: Arc<Mutex<Vec<(WidgetId, Size)>>> = Arc::new(Mutex::new(Vec::new()));
        for id in [child, root] {
            let log = order.clone();
            tree.get(id).unwrap().size_changed.connect(move |args: &SizeChanged| {
                log.lock().push((args.widget, args.size));
            });
        }

        tree.set_size(root, Size::new(50.0, 60.0)).unwrap();

        let log = order.lock();
        assert_eq!(
            *log,
            vec![
                (child, Size::new(50.0, 60.0)),
                (root, Size::new(50.0, 60.0)),
            ]
        );
    }

    #[test]
    fn first_assignment_records_original_size() {
        let mut tree = WidgetTree::new();
        let w = tree.create(WidgetKind::Panel);
        tree.set_size(w, Size::new(30.0, 40.0)).unwrap();
        tree.set_size(w, Size::new(60.0, 80.0)).unwrap();
        let node = tree.get(w).unwrap();
        assert_eq!(node.size(), Size::new(60.0, 80.0));
        assert_eq!(node.intended_size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn invalid_widget_is_an_error() {
        let mut tree = WidgetTree::new();
        let w = tree.create(WidgetKind::Panel);
        tree.remove(w).unwrap();
        assert_eq!(
            tree.set_size(w, Size::ZERO).unwrap_err(),
            TreeError::InvalidWidget(w)
        );
    }
}
