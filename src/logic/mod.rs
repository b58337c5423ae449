pub mod advisor;
pub mod assembler;
pub mod calculations;
pub mod repository;
pub mod rules;

pub use advisor::CropAdvisor;
pub use repository::CropRepository;
pub use rules::SuitabilityEngine;
