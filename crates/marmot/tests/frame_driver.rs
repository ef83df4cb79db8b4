//! Integration tests driving whole frames through the stage:
//! prepare, binding refresh, animation advance, layout settle, render.

use std::cell::Cell;
use std::rc::Rc;

use marmot::prelude::*;

/// A game-state model the screens bind against.
struct GameState {
    score: Cell<u32>,
}

impl BindingSource for GameState {
    fn resolve(&self, member: &str) -> Option<PropertyValue> {
        match member {
            "Score" => Some(PropertyValue::Number(self.score.get() as f32)),
            "Title" => Some(PropertyValue::Text("Marmot Quest".into())),
            _ => None,
        }
    }
}

/// A minimal stand-in for the markup parser: builds one screen with a
/// stretched panel and a score label, plus the styles it "found".
struct TestLoader;

impl LayoutLoader for TestLoader {
    fn load_layout(&mut self, tree: &mut WidgetTree, source: &str) -> LoadedLayout {
        let root = tree.create_panel();
        tree.set_size(root, Size::new(1000.0, 1600.0)).unwrap();

        let body = tree.create_panel();
        tree.add_child(root, body).unwrap();
        {
            let node = tree.get_mut(body).unwrap();
            node.set_margin(EdgeInsets::uniform(10.0));
            node.set_stretch(Stretch::FILL);
        }

        let score = tree.create_label("");
        tree.add_child(body, score).unwrap();
        tree.get_mut(score).unwrap().set_name("score");
        tree.get_mut(score).unwrap().set_style(Some("hud".into()));
        tree.set_binding(score, WidgetProperty::Content, "Score: {Score}")
            .unwrap();

        LoadedLayout {
            screens: vec![(source.to_string(), root)],
            styles: vec![Style::new(
                "hud",
                [
                    (
                        WidgetProperty::ForegroundColor,
                        PropertyValue::Color(Color::WHITE),
                    ),
                    (WidgetProperty::FontSize, PropertyValue::Number(0.2)),
                    (
                        WidgetProperty::Size,
                        PropertyValue::Size(Size::new(200.0, 40.0)),
                    ),
                ],
            )],
        }
    }
}

fn loaded_stage(state: Rc<GameState>) -> Stage {
    let mut stage = Stage::new();
    stage.load_layout(&mut TestLoader, "main").unwrap();
    stage.set_screen("main", Some(state)).unwrap();
    stage.prepare();
    stage
}

#[test]
fn a_full_frame_in_driver_order() {
    let state = Rc::new(GameState { score: Cell::new(3) });
    let mut stage = loaded_stage(state.clone());

    let root = stage.current_root().unwrap();
    let body = stage.tree().child_widgets(root)[0];
    let score = stage.tree().find_by_name(root, "score").unwrap();

    // Prepare settled styles, bindings, and layout.
    assert_eq!(
        stage.tree().get(body).unwrap().size(),
        Size::new(980.0, 1580.0)
    );
    assert_eq!(stage.tree().get(body).unwrap().offset(), Point::new(10.0, 10.0));
    assert_eq!(
        stage.tree().get(score).unwrap().content_text(),
        Some("Score: 3")
    );
    assert_eq!(stage.tree().font_size(score), 0.2);

    // Attach a slide-in for the score label.
    stage
        .tree_mut()
        .add_animation(
            score,
            Animation::move_offset_linear(0.5, Point::new(-200.0, 0.0), Point::ZERO).unwrap(),
        )
        .unwrap();

    // Model changed since last frame.
    state.score.set(4);

    // Frame: update, tick, render.
    stage.update();
    stage.tick(0.25);
    let mut renderer = RecordingRenderer::new();
    stage.render(&mut renderer);

    assert_eq!(
        stage.tree().get(score).unwrap().content_text(),
        Some("Score: 4")
    );
    assert_eq!(
        stage.tree().get(score).unwrap().offset(),
        Point::new(-100.0, 0.0)
    );

    // The render traversal drew the label's text with the styled color at
    // the absolute position: body offset + label offset.
    let drawn = renderer
        .commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::Text {
                text,
                position,
                color,
                ..
            } => Some((text.clone(), *position, *color)),
            _ => None,
        })
        .unwrap();
    assert_eq!(drawn.0, "Score: 4");
    assert_eq!(drawn.1, Point::new(-90.0, 10.0));
    assert_eq!(drawn.2, Color::WHITE);

    // Finish the slide; the animation retires.
    stage.tick(0.3);
    assert_eq!(stage.tree().get(score).unwrap().offset(), Point::ZERO);
    assert_eq!(stage.tree().get(score).unwrap().animation_count(), 0);
}

#[test]
fn duplicate_screen_names_require_the_overwrite_path() {
    let state = Rc::new(GameState { score: Cell::new(0) });
    let mut stage = loaded_stage(state);

    // A second load of the same screen name fails outright.
    assert!(stage.load_layout(&mut TestLoader, "main").is_err());
}

#[test]
fn hot_swap_replaces_the_screen_between_frames() {
    let state = Rc::new(GameState { score: Cell::new(0) });
    let mut stage = loaded_stage(state.clone());
    let old_root = stage.current_root().unwrap();

    // Leftover animation on the old screen.
    stage
        .tree_mut()
        .add_animation(
            old_root,
            Animation::move_offset_linear(10.0, Point::ZERO, Point::new(1.0, 0.0)).unwrap(),
        )
        .unwrap();

    // Build a replacement screen and swap it in with a restyled hud.
    let new_root = stage.tree_mut().create_panel();
    stage
        .swap_screen(
            "main",
            new_root,
            vec![Style::new(
                "hud",
                [(WidgetProperty::FontSize, PropertyValue::Number(0.5))],
            )],
            Some(state),
        )
        .unwrap();
    stage.prepare();

    assert!(!stage.tree().contains(old_root));
    assert_eq!(stage.current_root(), Some(new_root));
    // The merged style definition won.
    assert_eq!(
        stage
            .styles()
            .get("hud")
            .unwrap()
            .get(WidgetProperty::FontSize),
        Some(&PropertyValue::Number(0.5))
    );

    // The destroyed screen's animation is gone with it; ticking is safe.
    stage.tick(1.0);
    assert!(stage.tree().contains(new_root));
}

#[test]
fn content_catalog_guards_duplicate_assets() {
    let mut stage = Stage::new();
    stage.content_mut().register_glyph("coin", false).unwrap();
    assert!(stage.content_mut().register_glyph("coin", false).is_err());
    stage
        .content_mut()
        .register_sprite("walk", 16, 24, false)
        .unwrap();
    assert_eq!(
        stage.content().sprite("walk").map(|s| (s.frame_width, s.frame_height)),
        Some((16, 24))
    );
}
