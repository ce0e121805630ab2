pub mod entry;
pub mod store;
pub mod stats;

pub use entry::*;
pub use store::*;
pub use stats::*;
