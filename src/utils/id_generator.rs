//! Short id generation
//!
//! Ids are fixed-length strings over the URL-safe base64 alphabet. The
//! alphabet has exactly 64 symbols, so masking a uniformly random byte down to
//! its low 6 bits picks a symbol uniformly with no rejection step.

use crate::errors::{Result, SnaplinkError};

/// 短码字符集（URL-safe base64）
pub const ID_ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

pub const DEFAULT_ID_LENGTH: usize = 4;

const SYMBOL_MASK: u8 = 0x3F;

/// Source of random bytes for id generation.
pub trait EntropySource: Send + Sync {
    fn fill(&self, dest: &mut [u8]) -> Result<()>;
}

/// Thread-local CSPRNG from `rand`, reseeded from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl EntropySource for ThreadRngSource {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        dest.iter_mut().for_each(|b| *b = rand::random::<u8>());
        Ok(())
    }
}

pub struct IdGenerator {
    length: usize,
    source: Box<dyn EntropySource>,
}

impl IdGenerator {
    pub fn new(length: usize) -> Self {
        Self::with_source(length, Box::new(ThreadRngSource))
    }

    pub fn with_source(length: usize, source: Box<dyn EntropySource>) -> Self {
        Self { length, source }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct ids this generator can produce.
    pub fn id_space(&self) -> u128 {
        (ID_ALPHABET.len() as u128).saturating_pow(self.length as u32)
    }

    pub fn generate(&self) -> Result<String> {
        let mut buf = vec![0u8; self.length];
        self.source
            .fill(&mut buf)
            .map_err(|e| SnaplinkError::random_source(e.message()))?;

        Ok(buf
            .into_iter()
            .map(|b| ID_ALPHABET[(b & SYMBOL_MASK) as usize] as char)
            .collect())
    }

    pub fn is_valid_id(&self, id: &str) -> bool {
        id.len() == self.length && id.bytes().all(|b| ID_ALPHABET.contains(&b))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_LENGTH)
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}
