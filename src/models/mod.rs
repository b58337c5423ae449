pub mod crop;
pub mod recommendation;
pub mod suitability;
pub mod weather;

pub use crop::*;
pub use recommendation::*;
pub use suitability::*;
pub use weather::*;
