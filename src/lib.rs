pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod html;
pub mod logging;
pub mod places;
pub mod shell;
pub mod site;

pub use cache::ResponseCache;
pub use config::Config;
pub use error::{AppError, Result};
pub use fetch::{Gateway, HttpGet};
pub use places::NearbyPlaces;
pub use shell::Shell;
pub use site::NationalSite;
