use std::fmt;

use log::debug;
use sha2::{Digest, Sha256};

use crate::{LoadError, WorkoutLog, load};

/// SHA-256 digest of a raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    #[must_use]
    pub fn of(input: &[u8]) -> Self {
        let mut bytes = [0; 32];
        bytes.copy_from_slice(&Sha256::digest(input));
        Self(bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Holds the normalized log of the most recently loaded input.
///
/// The cached log is reused as long as the input has the same fingerprint.
/// Loading a different input replaces it.
#[derive(Default)]
pub struct TableCache {
    current: Option<(Fingerprint, WorkoutLog)>,
}

impl TableCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, input: &[u8]) -> Result<&WorkoutLog, LoadError> {
        let fingerprint = Fingerprint::of(input);

        match self.current.take() {
            Some((cached, log)) if cached == fingerprint => {
                debug!("using cached workout log {fingerprint}");
                Ok(&self.current.insert((cached, log)).1)
            }
            _ => {
                debug!("loading workout log {fingerprint}");
                let log = load(input)?;
                Ok(&self.current.insert((fingerprint, log)).1)
            }
        }
    }

    #[must_use]
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.current.as_ref().map(|(fingerprint, _)| *fingerprint)
    }

    pub fn invalidate(&mut self) {
        self.current = None;
    }
}
