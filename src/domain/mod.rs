// Domain layer: menu models and ports (interfaces). No HTML or HTTP types here.

pub mod model;
pub mod ports;
