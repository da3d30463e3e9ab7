//! Caller-held view state.
//!
//! Views own these structs and pass the client in; nothing here is global.

pub mod catalog;
pub mod scanner;

pub use catalog::{ProductCatalog, RefreshStatus};
pub use scanner::{ScanResult, Scanner};
