/// Classification service boundary
///
/// The only network traffic of the application:
/// - `POST /classify` - multipart upload of the selected image
/// - `GET /health` - start-up reachability check

pub mod client;

pub use client::HttpClassifier;
