//! The `utils` module holds what every other module leans on: the error
//! taxonomy and logging initialisation.

pub mod error;
pub mod logging;
