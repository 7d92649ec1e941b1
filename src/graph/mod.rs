pub mod construction;
pub mod model;
pub mod serialization;

pub use construction::{GraphLoader, from_dimacs_id, to_dimacs_id};
pub use model::{EdgeAttributes, EdgeId, GraphId, MatchGraph, NodeAttributes, NodeId, RawGraph};
pub use serialization::GraphWriter;
