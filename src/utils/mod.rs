pub mod log;
pub(crate) mod macros;
