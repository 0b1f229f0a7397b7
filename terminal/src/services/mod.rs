pub mod api;

pub use api::{ApiClient, ClientConfig};
