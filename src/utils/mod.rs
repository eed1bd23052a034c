pub mod id_generator;
pub mod url;

pub use id_generator::{DEFAULT_ID_LENGTH, EntropySource, ID_ALPHABET, IdGenerator, ThreadRngSource};
pub use url::{INVALID_URL_MESSAGE, normalize_target_url};
