pub mod aggregate;
pub mod error;
#[cfg(feature = "gui")]
pub mod gui;
pub mod io;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod resolve;
pub mod session;
pub mod validate;

pub use error::{GpaError, Result};
