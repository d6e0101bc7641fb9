pub mod connectors;
pub mod endpoints;
pub mod mask;
