pub mod executor;
pub mod picker;

pub use executor::*;
pub use picker::*;
