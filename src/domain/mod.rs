// Domain layer: content and submission models plus the storage port.

pub mod model;
pub mod ports;
