// Domain layer: row/record models and the ports the pipeline is driven through.

pub mod model;
pub mod ports;
