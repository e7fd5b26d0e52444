//! Integration tests: session-level commit policy and undo/redo
//! round trips across add / remove / clear / template application.

use bq_core::model::{ArrangementConfig, CatalogEntry, Color, FlowerCategory};
use bq_core::slots::SlotConfig;
use bq_core::template::{Template, TemplateItem};
use bq_core::FlowerTypeId;
use bq_editor::BuilderSession;
use pretty_assertions::assert_eq;

fn entry(name: &str, category: FlowerCategory) -> CatalogEntry {
    CatalogEntry {
        flower: FlowerTypeId::intern(name),
        name: name.to_string(),
        color: Color::rgb(200, 90, 130),
        image_ref: format!("{name}.png"),
        category,
        stock: 10,
    }
}

fn posy_template() -> Template {
    let item = |x: f32, y: f32, category| TemplateItem {
        flower: FlowerTypeId::intern("tpl_peony"),
        color: Color::rgb(240, 170, 190),
        image_ref: "peony.png".into(),
        category,
        x_pct: x,
        y_pct: y,
        rotation: 0.0,
        scale: 1.0,
        stack_order: None,
    };
    Template {
        name: "posy".into(),
        items: vec![
            item(50.0, 50.0, FlowerCategory::Focal),
            item(35.0, 45.0, FlowerCategory::Filler),
            item(65.0, 55.0, FlowerCategory::Greenery),
        ],
    }
}

#[test]
fn undo_redo_round_trip_restores_exact_arrangement() {
    let mut session = BuilderSession::default();
    session.add_flower(&entry("rose", FlowerCategory::Focal), None);
    session.add_flower(&entry("fern", FlowerCategory::Greenery), None);
    session.add_flower(&entry("baby_breath", FlowerCategory::Filler), None);

    let full = session.arrangement().items.clone();

    // Three undos walk back through each add.
    assert!(session.undo());
    assert!(session.undo());
    assert!(session.undo());
    assert!(session.arrangement().is_empty());

    // Three redos restore the exact list — transforms, order, ids.
    assert!(session.redo());
    assert!(session.redo());
    assert!(session.redo());
    assert_eq!(session.arrangement().items, full);

    // History exhausted in the redo direction.
    assert!(!session.redo());
}

#[test]
fn remove_and_clear_are_single_undo_steps() {
    let mut session = BuilderSession::default();
    let id = session
        .add_flower(&entry("rose", FlowerCategory::Focal), None)
        .unwrap();
    session.add_flower(&entry("fern", FlowerCategory::Greenery), None);

    session.remove_item(id);
    assert_eq!(session.arrangement().len(), 1);
    assert!(session.undo());
    assert_eq!(session.arrangement().len(), 2);
    assert!(session.redo());
    assert_eq!(session.arrangement().len(), 1);

    session.clear();
    assert!(session.arrangement().is_empty());
    assert!(session.undo());
    assert_eq!(session.arrangement().len(), 1);
}

#[test]
fn template_application_is_one_undoable_action() {
    let mut session = BuilderSession::default();
    session.add_flower(&entry("rose", FlowerCategory::Focal), None);
    let before = session.arrangement().items.clone();

    session.apply_template(&posy_template());
    assert_eq!(session.arrangement().len(), 3);

    assert!(session.undo());
    assert_eq!(session.arrangement().items, before);
}

#[test]
fn applying_the_same_template_twice_yields_disjoint_ids() {
    let mut a = BuilderSession::default();
    let mut b = BuilderSession::default();
    let template = posy_template();
    a.apply_template(&template);
    b.apply_template(&template);

    for (x, y) in a.arrangement().items.iter().zip(&b.arrangement().items) {
        assert_ne!(x.id, y.id);
        assert_eq!(x.position, y.position);
        assert_eq!(x.stack_order, y.stack_order);
    }
}

#[test]
fn failed_add_does_not_commit() {
    let config = ArrangementConfig {
        max_items: Some(1),
        ..Default::default()
    };
    let mut session = BuilderSession::new(config, SlotConfig::default(), 30);
    session.add_flower(&entry("rose", FlowerCategory::Focal), None);
    let history_len = session.history().len();

    assert!(
        session
            .add_flower(&entry("fern", FlowerCategory::Greenery), None)
            .is_none()
    );
    assert_eq!(session.history().len(), history_len);
}

#[test]
fn sessions_have_independent_histories() {
    let mut a = BuilderSession::default();
    let mut b = BuilderSession::default();
    a.add_flower(&entry("rose", FlowerCategory::Focal), None);

    assert!(a.undo());
    assert!(!b.undo());
}
