pub(crate) mod core;
pub mod defaults;
pub(crate) mod error;
