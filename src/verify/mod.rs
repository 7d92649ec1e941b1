pub mod augmenting;
pub mod degree;
pub mod optima;

pub use augmenting::AugmentingPathSearch;
pub use degree::DegreeCheck;
pub use optima::{OptimaTable, OptimumCheck};
