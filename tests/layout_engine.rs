// tests/layout_engine.rs

use std::collections::BTreeSet;

use stepdag::config::LayoutConfig;
use stepdag::dag::StepId;
use stepdag::layout::{self, GraphLayout};
use stepdag::types::StepStatus;
use stepdag_test_utils::builders::{RecipeBuilder, StepBuilder, diamond};
use stepdag_test_utils::init_tracing;

fn none() -> BTreeSet<StepId> {
    BTreeSet::new()
}

fn assert_no_row_overlap(layout: &GraphLayout) {
    for row in &layout.rows {
        let mut nodes: Vec<_> = row.iter().map(|id| layout.node(id).unwrap()).collect();
        nodes.sort_by(|a, b| a.x.total_cmp(&b.x));
        for pair in nodes.windows(2) {
            assert!(
                pair[0].right() <= pair[1].x,
                "{} overlaps {}",
                pair[0].step_id,
                pair[1].step_id
            );
        }
    }
}

#[test]
fn diamond_levels_and_rows() {
    init_tracing();

    let graph = diamond().graph();
    let layout = layout::compute(&graph, &none(), &LayoutConfig::default());

    assert_eq!(layout.level_of("1"), Some(0));
    assert_eq!(layout.level_of("2"), Some(1));
    assert_eq!(layout.level_of("3"), Some(1));
    assert_eq!(layout.level_of("4"), Some(2));
    assert_eq!(
        layout.rows,
        vec![
            vec!["1".to_string()],
            vec!["2".to_string(), "3".to_string()],
            vec!["4".to_string()],
        ]
    );
    assert_eq!(layout.edges.len(), 4);
    assert_no_row_overlap(&layout);
}

#[test]
fn every_resolved_edge_points_to_a_deeper_level() {
    let graph = RecipeBuilder::new()
        .with("a", &[])
        .with("b", &["a"])
        .with("c", &["a", "b"])
        .with("d", &["c", "missing"])
        .with("e", &[])
        .with("f", &["e", "b"])
        .graph();
    let layout = layout::compute(&graph, &none(), &LayoutConfig::default());

    for (dep, dependent) in graph.edges() {
        let (from, to) = (layout.level_of(dep).unwrap(), layout.level_of(dependent).unwrap());
        assert!(to > from, "{dep}({from}) -> {dependent}({to})");
    }
    for edge in &layout.edges {
        let from = layout.node(&edge.from).unwrap();
        let to = layout.node(&edge.to).unwrap();
        assert!(from.y + from.height < to.y);
    }
}

#[test]
fn layout_is_deterministic() {
    let build = || {
        RecipeBuilder::new()
            .with("x", &[])
            .with("y", &["x"])
            .with("z", &["x"])
            .with("w", &["z", "y"])
            .with("v", &[])
            .graph()
    };
    let cfg = LayoutConfig::default();
    let first = layout::compute(&build(), &none(), &cfg);
    let second = layout::compute(&build(), &none(), &cfg);
    assert_eq!(first, second);
}

#[test]
fn two_cycle_still_produces_a_complete_layout() {
    let graph = RecipeBuilder::new()
        .with("start", &[])
        .with("a", &["b"])
        .with("b", &["a"])
        .graph();
    let layout = layout::compute(&graph, &none(), &LayoutConfig::default());

    assert_eq!(layout.nodes.len(), 3);
    assert_eq!(layout.level_of("start"), Some(0));
    assert_eq!(layout.level_of("a"), Some(1));
    assert_eq!(layout.level_of("b"), Some(2));
    // Both directions of the cycle are still drawn.
    assert_eq!(layout.edges.len(), 2);
    assert!(layout.width > 0.0 && layout.height > 0.0);
    assert_no_row_overlap(&layout);
}

#[test]
fn wide_rows_never_overlap_and_define_canvas_width() {
    let mut recipe = RecipeBuilder::new().with("root", &[]);
    for i in 0..7 {
        recipe = recipe.with(&format!("leaf{i}"), &["root"]);
    }
    let cfg = LayoutConfig::default();
    let layout = layout::compute(&recipe.graph(), &none(), &cfg);

    assert_no_row_overlap(&layout);
    let expected = 7.0 * cfg.node_width + 6.0 * cfg.column_gap + 2.0 * cfg.horizontal_padding;
    assert_eq!(layout.width, expected);

    let root = layout.node("root").unwrap();
    let centre = root.x + root.width / 2.0;
    assert_eq!(centre, layout.width / 2.0);
}

#[test]
fn node_text_is_wrapped_and_timed_steps_are_taller() {
    let cfg = LayoutConfig::default();
    let graph = RecipeBuilder::new()
        .with_step(
            StepBuilder::new("1")
                .name("Fry the pancetta in olive oil until golden and crisp")
                .ingredient("pancetta")
                .ingredient("olive oil")
                .minutes(8)
                .build(),
        )
        .with_step(StepBuilder::new("2").name("Serve").build())
        .graph();
    let layout = layout::compute(&graph, &none(), &cfg);

    let fry = layout.node("1").unwrap();
    assert!(fry.title_lines.len() > 1);
    assert!(fry.title_lines.iter().all(|l| l.chars().count() <= cfg.max_chars_per_line));
    assert_eq!(fry.ingredient_lines, vec!["pancetta, olive oil"]);
    assert_eq!(fry.timer_minutes, Some(8));
    assert!(fry.height > layout.node("2").unwrap().height);
}

#[test]
fn status_colouring_agrees_with_classifier() {
    let graph = diamond().graph();
    let completed: BTreeSet<StepId> = ["1".to_string(), "3".to_string()].into_iter().collect();
    let layout = layout::compute(&graph, &completed, &LayoutConfig::default());
    let classification = stepdag::dag::classify(&graph, &completed);

    for id in classification.ready_ids() {
        assert_eq!(layout.node(id).unwrap().status, StepStatus::Ready);
    }
    for id in classification.blocked_ids() {
        assert_eq!(layout.node(id).unwrap().status, StepStatus::Blocked);
    }
    for id in classification.completed_ids() {
        assert_eq!(layout.node(id).unwrap().status, StepStatus::Completed);
    }
}
