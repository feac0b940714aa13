pub mod paths;

pub use paths::{CatalogerPaths, PathUtils};
