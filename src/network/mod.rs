pub mod builder;
pub mod network;
pub mod observation;
pub mod spec;

pub use builder::NetworkBuilder;
pub use network::Network;
pub use observation::Observation;
pub use spec::LayerSpec;
