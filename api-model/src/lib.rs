mod api_keys;
mod pagination;

pub use api_keys::*;
pub use pagination::*;
