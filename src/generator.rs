//! Thin adapter around the `nanoid` crate.
//!
//! `nanoid::format` does the actual encoding. It counts the identifier in
//! bytes, panics on alphabets longer than a byte can index, overflows on
//! huge sizes and never returns for an empty alphabet or a zero size, so
//! `NanoIdGenerator` checks those up front and reports them as errors
//! instead. Alphabets are limited to printable ASCII, which keeps one
//! symbol per byte and one identifier per output line.

use std::collections::HashSet;

use rand::{Rng, thread_rng};

use crate::error::{Error, Result};

/// Default identifier length.
pub const DEFAULT_LENGTH: usize = 21;

/// URL-safe 64-symbol alphabet used when no custom alphabet is given.
pub const DEFAULT_ALPHABET: &str =
    "_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest identifier length the generate command accepts.
pub const MAX_LENGTH: usize = 4096;

pub const MIN_ALPHABET_LEN: usize = 2;
/// Number of printable ASCII symbols (`'!'..='~'`).
pub const MAX_ALPHABET_LEN: usize = 94;

/// Options recognized when building a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Length produced by `generate_default`.
    pub length_hint: usize,
    /// Custom alphabet; `None` selects `DEFAULT_ALPHABET`.
    pub alphabet: Option<Vec<char>>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length_hint: DEFAULT_LENGTH,
            alphabet: None,
        }
    }
}

impl GeneratorOptions {
    pub fn with_length_hint(mut self, length_hint: usize) -> Self {
        self.length_hint = length_hint;
        self
    }

    pub fn with_alphabet(mut self, alphabet: &str) -> Self {
        self.alphabet = Some(alphabet.chars().collect());
        self
    }
}

/// A configured, reusable Nano ID generator.
///
/// ```
/// use nanoid_cli::generator::{GeneratorOptions, NanoIdGenerator};
///
/// let generator = NanoIdGenerator::new(GeneratorOptions::default().with_length_hint(10)).unwrap();
/// assert_eq!(generator.generate_default().unwrap().chars().count(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct NanoIdGenerator {
    alphabet: Vec<char>,
    length_hint: usize,
}

impl NanoIdGenerator {
    /// Build a generator, rejecting options `nanoid::format` cannot handle.
    pub fn new(options: GeneratorOptions) -> Result<Self> {
        if options.length_hint == 0 {
            return Err(Error::Config("length hint must be at least 1".into()));
        }

        let alphabet = match options.alphabet {
            Some(custom) => {
                check_alphabet(&custom)?;
                custom
            }
            None => DEFAULT_ALPHABET.chars().collect(),
        };

        tracing::debug!(
            alphabet_len = alphabet.len(),
            length_hint = options.length_hint,
            "configured generator"
        );

        Ok(Self {
            alphabet,
            length_hint: options.length_hint,
        })
    }

    /// Generate one identifier of exactly `size` characters.
    pub fn generate(&self, size: usize) -> Result<String> {
        if size == 0 {
            return Err(Error::Generation("size must be at least 1".into()));
        }
        if size.checked_mul(8).is_none() {
            return Err(Error::Generation(format!("size {} is too large", size)));
        }
        Ok(nanoid::format(random_bytes, &self.alphabet, size))
    }

    /// Generate one identifier of the configured length hint.
    pub fn generate_default(&self) -> Result<String> {
        self.generate(self.length_hint)
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn length_hint(&self) -> usize {
        self.length_hint
    }
}

fn check_alphabet(alphabet: &[char]) -> Result<()> {
    if alphabet.is_empty() {
        return Err(Error::Config("alphabet must not be empty".into()));
    }
    if let Some(ch) = alphabet.iter().find(|c| !c.is_ascii_graphic()) {
        return Err(Error::Config(format!(
            "alphabet may only contain printable ASCII characters, found {:?}",
            ch
        )));
    }
    if alphabet.len() < MIN_ALPHABET_LEN || alphabet.len() > MAX_ALPHABET_LEN {
        return Err(Error::Config(format!(
            "alphabet must contain between {} and {} symbols, got {}",
            MIN_ALPHABET_LEN,
            MAX_ALPHABET_LEN,
            alphabet.len()
        )));
    }

    let mut seen = HashSet::with_capacity(alphabet.len());
    for &ch in alphabet {
        if !seen.insert(ch) {
            return Err(Error::Config(format!(
                "alphabet contains duplicate character {:?}",
                ch
            )));
        }
    }
    Ok(())
}

/// Random source handed to `nanoid::format`.
fn random_bytes(size: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    let mut buf = vec![0u8; size];
    rng.fill(&mut buf[..]);
    buf
}
