pub mod install_operations;
pub mod polling;
pub mod service_operations;

#[cfg(test)]
pub(crate) mod test_support;

pub use install_operations::*;
pub use polling::*;
pub use service_operations::*;
