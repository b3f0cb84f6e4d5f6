// Domain layer: records flowing through the analysis and the ports the pipeline is built on.

pub mod model;
pub mod ports;
