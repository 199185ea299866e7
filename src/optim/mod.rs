pub mod gradients;
pub mod sgd;

pub use gradients::{LayerGradients, NetworkGradients};
pub use sgd::Sgd;
