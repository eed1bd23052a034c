pub mod access_log;
pub mod error_normalizer;
pub mod recover;
pub mod request_id;

pub use access_log::AccessLog;
pub use error_normalizer::ErrorNormalizer;
pub use recover::Recover;
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdMiddleware};
