use futures::executor::block_on;
use futures::future::join_all;
use trellis_core::{
    AlgorithmKind, AlgorithmResult, GeneratorKind, GeneratorOptions, Session, SessionConfig,
};

fn session(seed: u64) -> Session {
    Session::new(SessionConfig {
        random_seed: Some(seed),
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn generated_graph_survives_export_import_and_keeps_its_components() {
    let mut s = session(11);
    s.generate(
        GeneratorKind::Weighted,
        &GeneratorOptions {
            vertex_count: 15,
            edge_probability: 0.2,
            ..Default::default()
        },
    )
    .unwrap();
    let components = s.run_algorithm(AlgorithmKind::StronglyConnected);

    let mut t = session(12);
    t.import_csv(&s.export_csv()).unwrap();
    assert_eq!(t.run_algorithm(AlgorithmKind::StronglyConnected), components);

    let mut u = session(13);
    u.import_json(&s.export_json().unwrap()).unwrap();
    assert_eq!(u.run_algorithm(AlgorithmKind::StronglyConnected), components);
}

#[test]
fn components_partition_the_vertex_set() {
    for seed in 0..5 {
        let mut s = session(seed);
        s.generate(GeneratorKind::Random, &GeneratorOptions::default())
            .unwrap();
        let AlgorithmResult::ConnectedComponents { components } =
            s.run_algorithm(AlgorithmKind::StronglyConnected)
        else {
            panic!("expected components");
        };
        let mut seen: Vec<&str> = components.iter().flatten().map(|v| v.id()).collect();
        seen.sort();
        let mut all: Vec<&str> = s.graph().vertices().map(|v| v.id()).collect();
        all.sort();
        assert_eq!(seen, all);
    }
}

#[test]
fn several_jobs_can_be_in_flight() {
    let mut s = session(3);
    s.generate(GeneratorKind::Tree, &GeneratorOptions::default())
        .unwrap();
    let tasks = vec![
        s.spawn_algorithm(AlgorithmKind::StronglyConnected).unwrap(),
        s.spawn_algorithm(AlgorithmKind::Layout).unwrap(),
        s.spawn_algorithm(AlgorithmKind::ShortestPath).unwrap(),
    ];
    let outcomes = block_on(join_all(tasks));
    let results: Vec<AlgorithmResult> = outcomes
        .into_iter()
        .map(|o| s.apply_outcome(o))
        .collect();

    assert!(matches!(
        results[0],
        AlgorithmResult::ConnectedComponents { .. }
    ));
    assert_eq!(results[1], AlgorithmResult::message("Layout applied"));
    assert_eq!(
        results[2],
        AlgorithmResult::message("Select start and end vertices")
    );
    assert_eq!(s.history().undo_depth(), 4);
}
