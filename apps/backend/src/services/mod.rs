pub mod registry;

pub use registry::{Binding, ConnId, Outbound, SessionRegistry};
