use mtv_layout::{compute_layout, LayoutConfig, Point};
use mtv_trace::{parse_trace, Node, NodeId, Schema, SearchTree};

fn fan_out(children: usize) -> SearchTree {
    let mut tree = SearchTree::new(Node::container(String::new()));
    for i in 0..children {
        tree.push_child(tree.root(), Node::candidate(format!("c{i}"), 0.0));
    }
    tree
}

#[test]
fn test_root_at_origin() {
    let tree = fan_out(0);
    let layout = compute_layout(&tree, &LayoutConfig::default());
    assert_eq!(layout.len(), 1);
    assert_eq!(layout.position(tree.root()), Some(Point { x: 0.0, y: 20.0 }));
}

#[test]
fn test_children_split_parent_span() {
    let tree = fan_out(2);
    let layout = compute_layout(&tree, &LayoutConfig::default());

    // Span 110 split in two slices of 55 centered on y = 20.
    assert_eq!(layout.position(NodeId(1)), Some(Point { x: 20.0, y: -7.5 }));
    assert_eq!(layout.position(NodeId(2)), Some(Point { x: 20.0, y: 47.5 }));
}

#[test]
fn test_single_child_stays_level_with_parent() {
    let tree = fan_out(1);
    let layout = compute_layout(&tree, &LayoutConfig::default());
    assert_eq!(layout.position(NodeId(1)), Some(Point { x: 20.0, y: 20.0 }));
}

#[test]
fn test_depth_maps_to_x() {
    let mut tree = SearchTree::new(Node::container(String::new()));
    let mut parent = tree.root();
    for depth in 1..=4 {
        parent = tree.push_child(parent, Node::candidate(format!("d{depth}"), 0.0));
    }
    let config = LayoutConfig {
        horizontal_gap: 7.0,
        origin_x: 3.0,
        ..LayoutConfig::default()
    };
    let layout = compute_layout(&tree, &config);
    for depth in 0..=4 {
        let p = layout.position(NodeId(depth)).unwrap();
        assert_eq!(p.x, 3.0 + 7.0 * depth as f64);
        assert_eq!(p.y, 20.0);
    }
}

#[test]
fn test_sibling_order_preserved() {
    let tree = fan_out(5);
    let layout = compute_layout(&tree, &LayoutConfig::default());
    let ys: Vec<f64> = (1..=5).map(|i| layout.position(NodeId(i)).unwrap().y).collect();
    assert!(ys.windows(2).all(|w| w[0] < w[1]), "{ys:?}");
}

#[test]
fn test_min_span_enforced_for_dense_fan_out() {
    // 110 / 40 = 2.75 is below the 4.0 floor.
    let tree = fan_out(40);
    let config = LayoutConfig::default();
    let layout = compute_layout(&tree, &config);

    let ys: Vec<f64> = (1..=40).map(|i| layout.position(NodeId(i)).unwrap().y).collect();
    for pair in ys.windows(2) {
        assert!(pair[1] > pair[0]);
        assert!(pair[1] - pair[0] >= config.min_span - 1e-9, "boxes overlap: {pair:?}");
    }

    // The block stays centered on the parent.
    let mid = (ys[0] + ys[39]) / 2.0;
    assert!((mid - 20.0).abs() < 1e-9);
}

#[test]
fn test_nested_spans_shrink() {
    // root -> a, b; a -> a1, a2
    let mut tree = SearchTree::new(Node::container(String::new()));
    let a = tree.push_child(tree.root(), Node::candidate("a".into(), 0.0));
    tree.push_child(tree.root(), Node::candidate("b".into(), 0.0));
    let a1 = tree.push_child(a, Node::candidate("a1".into(), 0.0));
    let a2 = tree.push_child(a, Node::candidate("a2".into(), 0.0));

    let layout = compute_layout(&tree, &LayoutConfig::default());
    let a_pos = layout.position(a).unwrap();
    let a1_pos = layout.position(a1).unwrap();
    let a2_pos = layout.position(a2).unwrap();

    assert_eq!(a1_pos.x, 40.0);
    // a's span is 55, split into two slices of 27.5.
    assert_eq!(a2_pos.y - a1_pos.y, 27.5);
    assert_eq!((a1_pos.y + a2_pos.y) / 2.0, a_pos.y);
}

#[test]
fn test_layout_is_deterministic_across_parses() {
    let trace = "\
*State*: s0
*Replan Reasoning*
*Strategy Candidate*: one
*Fast Reward*: 0.1
*Strategy Candidate*: two
*Fast Reward*: 0.2
*Strategy Candidate*: three
*Fast Reward*: 0.3
*Expanded Strategy*: three
*Next State*: s1
*Status*: ok
*Strategy Candidate*: four
*Fast Reward*: 0.4
*Strategy Candidate*: five
*Fast Reward*: 0.5
";
    let first = compute_layout(&parse_trace(trace, Schema::Search).unwrap(), &LayoutConfig::default());
    let second = compute_layout(&parse_trace(trace, Schema::Search).unwrap(), &LayoutConfig::default());

    assert_eq!(first.len(), 6);
    let bits = |l: &mtv_layout::Layout| -> Vec<(NodeId, u64, u64)> {
        l.positions
            .iter()
            .map(|(id, p)| (*id, p.x.to_bits(), p.y.to_bits()))
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
}
