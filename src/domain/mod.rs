// Domain layer: value types, models and ports (interfaces) to the rate catalog
// and customer directory.

pub mod interval;
pub mod model;
pub mod ports;
