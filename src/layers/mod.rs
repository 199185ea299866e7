pub mod dense;
pub mod io;

pub use dense::Layer;
pub use io::{Input, Output};
