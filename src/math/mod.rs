pub mod matrix;
pub mod neurons;
pub mod ops;

pub use matrix::Matrix;
pub use neurons::Neurons;
