use trellis_graph::{EdgeKind, Graph};

use crate::{Session, SessionConfig};


type Fingerprint = (Vec<(String, f64, f64)>, Vec<(String, String, f64, EdgeKind)>);

/// Everything that identifies a graph's observable state, in a comparable form.
fn fingerprint(graph: &Graph) -> Fingerprint {
    let vertices = graph
        .positions()
        .map(|(v, p)| (v.id().to_string(), p.x, p.y))
        .collect();
    let edges = graph
        .edges()
        .iter()
        .map(|e| {
            (
                e.from().id().to_string(),
                e.to().id().to_string(),
                e.weight(),
                e.kind(),
            )
        })
        .collect();
    (vertices, edges)
}

fn seeded_session() -> Session {
    Session::new(SessionConfig {
        random_seed: Some(42),
        ..Default::default()
    })
    .unwrap()
}
