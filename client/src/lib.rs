mod api;
pub mod api_keys;
pub mod client;
mod constants;
mod error;

pub use pulseback_api_model::*;

pub use self::api::{ApiError, Response};
pub use self::client::{Client, ClientBuilder};
pub use self::constants::{BASE_URL_ENV, DEFAULT_BASE_URL};
pub use self::error::{Error, Result};
