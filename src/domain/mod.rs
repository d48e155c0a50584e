// Domain layer: join rows, resolved agency shapes and the ports to row storage and geocoding.

pub mod model;
pub mod ports;
