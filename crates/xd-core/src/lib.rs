pub mod command;
pub mod contracts;
pub mod navigator;
pub mod placeholder;

pub use command::*;
pub use contracts::*;
pub use navigator::*;
pub use placeholder::*;
