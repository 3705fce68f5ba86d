pub mod fetch_utils;
pub mod http_client;
pub mod jolpica_api;
pub mod openf1_api;
pub mod urls;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
pub use http_client::create_http_client_with_timeout;
pub use fetch_utils::{PayloadCheck, fetch_json, fetch_json_checked};
pub use jolpica_api::RaceDataClient;
pub use openf1_api::demo_board;
