//! # Application Workflows
//!
//! - [`session`]: encrypt / decrypt / capacity over an image store and renderer
//! - [`menu`]: the interactive Encrypt / Decrypt / Quit loop

pub mod menu;
pub mod session;

pub use menu::{run_menu, MenuChoice};
pub use session::{CapacityReport, Recovered, StegoSession};
