pub mod catalog;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod io;
pub mod items;
pub mod planner;
pub mod state;

pub use error::{CatalogerError, Result};
