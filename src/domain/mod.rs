// Domain layer: records, view types, ports and the built-in seed data.

pub mod model;
pub mod ports;
pub mod seed;
