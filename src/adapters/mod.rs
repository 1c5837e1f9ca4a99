// Adapters layer: concrete implementations for external systems (geocoding, weather archive, uploads, storage).

pub mod http;
pub mod storage;
pub mod upload;

pub use http::{NominatimResolver, OpenMeteoArchive};
pub use storage::LocalStorage;
pub use upload::parse_upload;
