pub mod commands;
pub mod controller;
pub mod state;

pub use controller::{ActionError, ManageController, ManageSnapshot};
pub use state::{ListStatus, ManageState};
