//! Chain access: client construction, contract bindings, reads and writes

pub mod abi;
pub mod client;
pub mod reader;
pub mod sender;
