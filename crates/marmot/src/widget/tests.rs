//! Cross-engine tests for the widget system: scenarios that span the
//! prepare lifecycle, styles, bindings, layout, and animation together.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use marmot_render::{Color, Point, Size};
use marmot_style::{
    EdgeInsets, PropertyValue, Stretch, Style, StyleLibrary, WidgetProperty,
};

use super::animation::{Animation, generate_bounce_profile};
use super::binding::BindingSource;
use super::tree::WidgetTree;

struct Model {
    clock: Cell<u32>,
}

impl BindingSource for Model {
    fn resolve(&self, member: &str) -> Option<PropertyValue> {
        match member {
            "Clock" => Some(PropertyValue::Text(format!("t{}", self.clock.get()))),
            "Accent" => Some(PropertyValue::Color(Color::GREEN)),
            _ => None,
        }
    }
}

fn sized_style(name: &str, size: Size) -> Style {
    Style::new(name, [(WidgetProperty::Size, PropertyValue::Size(size))])
}

#[test]
fn prepare_runs_styles_bindings_init_once() {
    let mut tree = WidgetTree::new();
    let root = tree.create_panel();
    let label = tree.create_label("placeholder");
    tree.add_child(root, label).unwrap();
    tree.get_mut(label).unwrap().set_style(Some("status".into()));
    tree.set_binding(label, WidgetProperty::Content, "{Clock}")
        .unwrap();
    tree.set_binding_context(root, Some(Rc::new(Model { clock: Cell::new(1) })))
        .unwrap();

    let mut styles = StyleLibrary::new();
    styles
        .register(
            Style::new(
                "status",
                [(
                    WidgetProperty::ForegroundColor,
                    PropertyValue::Color(Color::RED),
                )],
            ),
            false,
        )
        .unwrap();

    let inits = Arc::new(AtomicUsize::new(0));
    let counter = inits.clone();
    tree.on_init(label, move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    tree.prepare(root, &styles);
    let node = tree.get(label).unwrap();
    assert_eq!(node.local_foreground_color(), Some(Color::RED));
    assert_eq!(node.content_text(), Some("t1"));
    assert_eq!(inits.load(Ordering::SeqCst), 1);

    // Prepare is idempotent until invalidated.
    tree.prepare(root, &styles);
    assert_eq!(inits.load(Ordering::SeqCst), 1);

    // Invalidation re-prepares but init stays once-only.
    tree.get_mut(label).unwrap().invalidate();
    tree.prepare(root, &styles);
    assert_eq!(inits.load(Ordering::SeqCst), 1);
}

#[test]
fn init_handler_can_attach_animations() {
    let mut tree = WidgetTree::new();
    let root = tree.create_panel();
    tree.on_init(root, |tree, id| {
        let anim =
            Animation::move_offset_linear(1.0, Point::ZERO, Point::new(10.0, 0.0)).unwrap();
        tree.add_animation(id, anim).unwrap();
    })
    .unwrap();

    tree.prepare(root, &StyleLibrary::new());
    assert_eq!(tree.get(root).unwrap().animation_count(), 1);

    tree.tick(0.5);
    assert_eq!(tree.get(root).unwrap().offset(), Point::new(5.0, 0.0));
}

#[test]
fn style_then_animate_keeps_the_styled_size_as_authored() {
    let mut tree = WidgetTree::new();
    let w = tree.create_panel();
    tree.get_mut(w).unwrap().set_style(Some("card".into()));

    let mut styles = StyleLibrary::new();
    styles
        .register(sized_style("card", Size::new(100.0, 100.0)), false)
        .unwrap();

    tree.prepare(w, &styles);
    assert_eq!(tree.get(w).unwrap().size(), Size::new(100.0, 100.0));

    // Animate a shrink to half size.
    tree.add_animation(
        w,
        Animation::scale_linear(tree.get(w).unwrap().intended_size(), 1.0, 0.5).unwrap(),
    )
    .unwrap();
    tree.tick(1.0);

    let node = tree.get(w).unwrap();
    assert_eq!(node.size(), Size::new(50.0, 50.0));
    // The styled size remains the authored size.
    assert_eq!(node.intended_size(), Size::new(100.0, 100.0));
}

#[test]
fn animate_then_restyle_recovers_the_styled_size() {
    let mut tree = WidgetTree::new();
    let w = tree.create_panel();
    tree.get_mut(w).unwrap().set_style(Some("card".into()));

    let mut styles = StyleLibrary::new();
    styles
        .register(sized_style("card", Size::new(100.0, 100.0)), false)
        .unwrap();
    tree.prepare(w, &styles);

    // Mid-animation the rendered size has drifted from the authored one.
    tree.add_animation(
        w,
        Animation::scale_linear(tree.get(w).unwrap().intended_size(), 1.0, 0.5).unwrap(),
    )
    .unwrap();
    tree.tick(0.5);
    assert_eq!(tree.get(w).unwrap().size(), Size::new(75.0, 75.0));
    assert_eq!(tree.get(w).unwrap().intended_size(), Size::new(100.0, 100.0));

    // A hot-reload re-applies the style: the animated size was never
    // recorded as a local override, so the style write wins and refreshes
    // both slots.
    tree.get_mut(w).unwrap().invalidate();
    tree.prepare(w, &styles);
    let node = tree.get(w).unwrap();
    assert_eq!(node.size(), Size::new(100.0, 100.0));
    assert_eq!(node.intended_size(), Size::new(100.0, 100.0));
}

#[test]
fn layout_uses_authored_size_while_animation_scales() {
    let mut tree = WidgetTree::new();
    let root = tree.create_panel();
    let child = tree.create_panel();
    tree.add_child(root, child).unwrap();
    tree.set_size(child, Size::new(40.0, 40.0)).unwrap();
    tree.set_size(root, Size::new(200.0, 200.0)).unwrap();

    // Shrink the child visually.
    tree.add_animation(
        child,
        Animation::scale_linear(Size::new(40.0, 40.0), 1.0, 0.5).unwrap(),
    )
    .unwrap();
    tree.tick(1.0);
    assert_eq!(tree.get(child).unwrap().size(), Size::new(20.0, 20.0));

    // A parent re-layout reasons from the authored size, not the scaled
    // one: the non-stretched child is re-placed using 40x40.
    tree.set_size(root, Size::new(100.0, 100.0)).unwrap();
    assert_eq!(tree.get(child).unwrap().size(), Size::new(40.0, 40.0));
}

#[test]
fn update_refreshes_live_bindings_across_the_subtree() {
    let mut tree = WidgetTree::new();
    let root = tree.create_panel();
    let label = tree.create_label("");
    tree.add_child(root, label).unwrap();
    let model = Rc::new(Model { clock: Cell::new(0) });
    tree.set_binding_context(root, Some(model.clone())).unwrap();
    tree.set_binding(label, WidgetProperty::Content, "{Clock}")
        .unwrap();

    tree.prepare(root, &StyleLibrary::new());
    assert_eq!(tree.get(label).unwrap().content_text(), Some("t0"));

    model.clock.set(7);
    tree.update(root);
    assert_eq!(tree.get(label).unwrap().content_text(), Some("t7"));
}

#[test]
fn end_to_end_margin_fill_layout() {
    let mut tree = WidgetTree::new();
    let root = tree.create_panel();
    let child = tree.create_panel();
    tree.add_child(root, child).unwrap();
    {
        let c = tree.get_mut(child).unwrap();
        c.set_margin(EdgeInsets::new(10.0, 10.0, 10.0, 10.0));
        c.set_stretch(Stretch::FILL);
    }

    tree.set_size(root, Size::new(1000.0, 1600.0)).unwrap();

    assert_eq!(tree.get(child).unwrap().size(), Size::new(980.0, 1580.0));
    assert_eq!(tree.get(child).unwrap().offset(), Point::new(10.0, 10.0));
    assert_eq!(tree.absolute_offset(child), Point::new(10.0, 10.0));
}

#[test]
fn profile_driven_bounce_lands_at_the_destination() {
    let mut tree = WidgetTree::new();
    let w = tree.create_panel();
    let start = Point::ZERO;
    let end = Point::new(0.0, 200.0);
    let profile = generate_bounce_profile(3, 0.5, 0.0).unwrap();

    tree.add_animation(
        w,
        Animation::move_offset_by_profile(2.0, start, end, profile).unwrap(),
    )
    .unwrap();

    // Drive in uneven steps past completion.
    for dt in [0.3, 0.7, 0.5, 0.6] {
        tree.tick(dt);
    }
    let offset = tree.get(w).unwrap().offset();
    assert!((offset - end).length() < 1e-3, "landed at {offset:?}");
    // Retired on completion.
    assert_eq!(tree.get(w).unwrap().animation_count(), 0);
}

#[test]
fn several_animations_advance_in_the_same_tick() {
    let mut tree = WidgetTree::new();
    let w = tree.create_label("spin");
    tree.set_size(w, Size::new(10.0, 10.0)).unwrap();

    tree.add_animation(
        w,
        Animation::move_offset_linear(1.0, Point::ZERO, Point::new(100.0, 0.0)).unwrap(),
    )
    .unwrap();
    tree.add_animation(w, Animation::rotate_linear(1.0, 2.0).unwrap())
        .unwrap();
    tree.add_animation(
        w,
        Animation::foreground_color_fade(1.0, Color::BLACK, Color::WHITE).unwrap(),
    )
    .unwrap();

    tree.tick(0.5);
    let node = tree.get(w).unwrap();
    assert_eq!(node.offset(), Point::new(50.0, 0.0));
    assert_eq!(node.rotate(), 1.0);
    let fg = node.local_foreground_color().unwrap();
    assert!((fg.r - 0.5).abs() < 1e-6);
}

#[test]
fn content_widget_participates_in_prepare_and_layout() {
    let mut tree = WidgetTree::new();
    let host = tree.create_panel();
    let inner = tree.create_label("inner");
    tree.set_content_widget(host, inner).unwrap();
    tree.get_mut(inner).unwrap().set_stretch(Stretch::FILL);

    tree.prepare(host, &StyleLibrary::new());
    tree.set_size(host, Size::new(30.0, 30.0)).unwrap();

    assert_eq!(tree.get(inner).unwrap().size(), Size::new(30.0, 30.0));
    assert!(tree.get(inner).unwrap().is_prepared());
}
