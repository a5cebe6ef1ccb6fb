// Domain layer: compose document model, transform rules and ports (interfaces).

pub mod model;
pub mod ports;
pub mod rules;
