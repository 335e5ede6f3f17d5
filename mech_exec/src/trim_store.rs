//! # Trim storage
//!
//! Joint trims are kept in a small binary file of one signed byte per joint, in joint order.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use biped_lib::actuator::{Trims, NUM_JOINTS};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A trim file.
#[derive(Debug, Clone)]
pub struct TrimStore {
    path: PathBuf,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum TrimStoreError {
    #[error("Cannot access the trim file {0:?}: {1}")]
    Io(PathBuf, io::Error),

    #[error("Trim file must contain {n} bytes, found {0}", n = NUM_JOINTS)]
    WrongLength(usize),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TrimStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Trims, TrimStoreError> {
        let bytes = fs::read(&self.path)
            .map_err(|e| TrimStoreError::Io(self.path.clone(), e))?;

        decode(&bytes)
    }

    /// Load the trims, falling back to zero trims if the file doesn't exist yet.
    pub fn load_or_zero(&self) -> Result<Trims, TrimStoreError> {
        match self.load() {
            Err(TrimStoreError::Io(_, e)) if e.kind() == io::ErrorKind::NotFound => {
                warn!("No trim file at {:?}, using zero trims", self.path);
                Ok([0; NUM_JOINTS])
            }
            r => r,
        }
    }

    pub fn save(&self, trims: &Trims) -> Result<(), TrimStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| TrimStoreError::Io(self.path.clone(), e))?;
        }

        fs::write(&self.path, encode(trims))
            .map_err(|e| TrimStoreError::Io(self.path.clone(), e))?;

        info!("Trims {:?} saved to {:?}", trims, self.path);

        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Decode stored bytes, where values above 127 are negative trims (`b - 256`).
pub fn decode(bytes: &[u8]) -> Result<Trims, TrimStoreError> {
    if bytes.len() != NUM_JOINTS {
        return Err(TrimStoreError::WrongLength(bytes.len()))
    }

    let mut trims = [0i8; NUM_JOINTS];
    for (t, b) in trims.iter_mut().zip(bytes.iter()) {
        *t = if *b > 127 {
            (*b as i16 - 256) as i8
        }
        else {
            *b as i8
        };
    }

    Ok(trims)
}

pub fn encode(trims: &Trims) -> [u8; NUM_JOINTS] {
    let mut bytes = [0u8; NUM_JOINTS];
    for (b, t) in bytes.iter_mut().zip(trims.iter()) {
        *b = *t as u8;
    }
    bytes
}

#[cfg(test)]
mod test {
    use super::*;

    fn temp_store(name: &str) -> TrimStore {
        let mut path = std::env::temp_dir();
        path.push(format!("mech_exec_trims_{}_{}", std::process::id(), name));
        path.push("trims.bin");
        TrimStore::new(path)
    }

    #[test]
    fn test_decode_negative() {
        assert_eq!(
            decode(&[0, 5, 127, 128, 200, 255]).unwrap(),
            [0, 5, 127, -128, -56, -1]
        );
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(&[0, 5, -3, 10, -1, 127]), [0, 5, 253, 10, 255, 127]);
    }

    #[test]
    fn test_wrong_length() {
        assert!(matches!(decode(&[1, 2, 3]), Err(TrimStoreError::WrongLength(3))));
    }

    #[test]
    fn test_save_load() {
        let store = temp_store("save_load");
        let trims = [3, -4, 0, 12, -20, 1];

        store.save(&trims).unwrap();
        assert_eq!(store.load().unwrap(), trims);

        let _ = fs::remove_dir_all(store.path().parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = temp_store("missing");
        assert!(matches!(store.load(), Err(TrimStoreError::Io(..))));
        assert_eq!(store.load_or_zero().unwrap(), [0; NUM_JOINTS]);
    }
}
