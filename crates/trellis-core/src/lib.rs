#![forbid(unsafe_code)]

//! Headless graph editing session.
//!
//! [`Session`] owns the live graph together with its view transform, vertex-id counter,
//! shortest-path selection and undo/redo [`History`]. Algorithms run on an
//! [`AlgorithmWorker`] against a copy of the graph and are committed back with
//! [`Session::apply_outcome`].

pub mod algorithm;
pub mod codec;
pub mod config;
pub mod error;
pub mod generate;
pub mod history;
pub mod session;
pub mod status;
pub mod view;
pub mod worker;

pub use algorithm::{AlgorithmKind, AlgorithmOutcome, AlgorithmResult};
pub use codec::Format;
pub use config::SessionConfig;
pub use error::{Error, Result};
pub use generate::{GeneratorKind, GeneratorOptions};
pub use history::{GraphState, History};
pub use session::{Selection, Session};
pub use status::Status;
pub use view::ViewTransform;
pub use worker::{AlgorithmTask, AlgorithmWorker};

pub use trellis_graph as graph;
pub use trellis_layout as layout;

#[cfg(test)]
mod tests;
