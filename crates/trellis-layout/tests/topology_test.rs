use trellis_graph::alg::{shortest_path, strongly_connected_components};
use trellis_graph::{Edge, Graph};
use trellis_layout::{Algorithm, ForceDirectedOptions, apply, layout};

fn weighted_mesh(n: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_vertex(format!("V{i}")).unwrap();
        g.set_position(&format!("V{i}"), (i * 37 % 11) as f64 * 20.0, (i * 13 % 7) as f64 * 30.0)
            .unwrap();
    }
    for i in 0..n {
        for j in 0..n {
            if i != j && (i * 7 + j * 3) % 5 == 0 {
                let w = 1.0 + ((i + j) % 4) as f64;
                g.add_edge(Edge::directed_weighted(format!("V{i}"), format!("V{j}"), w).unwrap())
                    .unwrap();
            }
        }
    }
    g
}

#[test]
fn layout_preserves_algorithm_results() {
    let mut g = weighted_mesh(12);
    let components_before = strongly_connected_components(&g);
    let path_before = shortest_path(&g, "V0", "V5").unwrap();
    let vertex_count = g.vertex_count();
    let edges_before = g.edges().to_vec();

    apply(&mut g, &Algorithm::default()).unwrap();

    assert_eq!(g.vertex_count(), vertex_count);
    assert_eq!(g.edges(), edges_before.as_slice());
    assert_eq!(strongly_connected_components(&g), components_before);
    assert_eq!(shortest_path(&g, "V0", "V5").unwrap(), path_before);
}

#[test]
fn layout_is_pure_until_committed() {
    let g = weighted_mesh(6);
    let before: Vec<_> = g.positions().map(|(v, p)| (v.clone(), *p)).collect();

    let result = layout(&g, &Algorithm::default()).unwrap();

    let after: Vec<_> = g.positions().map(|(v, p)| (v.clone(), *p)).collect();
    assert_eq!(before, after);
    assert_eq!(result.positions.len(), g.vertex_count());
}

#[test]
fn lin_log_mode_keeps_positions_finite() {
    let mut g = weighted_mesh(10);
    let opts = ForceDirectedOptions {
        lin_log_mode: true,
        iterations: 250,
        ..Default::default()
    };
    apply(&mut g, &Algorithm::ForceDirected(opts)).unwrap();
    assert!(g.positions().all(|(_, p)| p.is_finite()));
}
