mod import;
mod stats;
mod table;

pub use import::*;
pub use stats::*;
pub use table::*;
