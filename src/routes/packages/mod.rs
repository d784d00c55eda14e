mod handler;
pub mod model;

pub use handler::{clear_cache, get_packages, list_packages, list_packages_now};
