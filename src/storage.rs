//! Session Storage Module
//!
//! Key-value entries kept in the per-user data directory so a session
//! survives restarts. On Windows the entries are sealed with DPAPI.

use std::path::PathBuf;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

#[cfg(windows)]
use windows::Win32::Security::Cryptography::{
    CryptProtectData, CryptUnprotectData, CRYPTPROTECT_UI_FORBIDDEN, CRYPT_INTEGER_BLOB,
};

/// Persistent key-value storage, one `<key>.dat` file per entry
#[derive(Debug, Clone)]
pub struct SecureStorage {
    dir: PathBuf,
}

impl SecureStorage {
    /// Open storage rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| StorageError::Io(e.to_string()))?;

        debug!(path = ?dir, "Session storage opened");
        Ok(Self { dir })
    }

    /// Serialize and write an entry
    pub fn save<T: Serialize>(&self, key: &str, data: &T) -> Result<(), StorageError> {
        let json = serde_json::to_vec(data)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let sealed = seal(&json)?;
        std::fs::write(self.entry_path(key), sealed)
            .map_err(|e| StorageError::Io(e.to_string()))?;

        debug!(key, "Stored entry");
        Ok(())
    }

    /// Read an entry. `Ok(None)` when the entry does not exist.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let file_path = self.entry_path(key);
        if !file_path.exists() {
            return Ok(None);
        }

        let sealed = std::fs::read(&file_path)
            .map_err(|e| StorageError::Io(e.to_string()))?;
        let json = unseal(&sealed)?;

        serde_json::from_slice(&json)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Remove an entry. Removing a missing entry is not an error.
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        let file_path = self.entry_path(key);

        match std::fs::remove_file(&file_path) {
            Ok(()) => {
                info!(key, "Deleted stored entry");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    pub fn exists(&self, key: &str) -> bool {
        self.entry_path(key).exists()
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.dat", key))
    }
}

#[cfg(windows)]
fn seal(data: &[u8]) -> Result<Vec<u8>, StorageError> {
    dpapi(data, true).map_err(|_| StorageError::Encryption("DPAPI encryption failed".into()))
}

#[cfg(windows)]
fn unseal(data: &[u8]) -> Result<Vec<u8>, StorageError> {
    dpapi(data, false).map_err(|_| StorageError::Decryption("DPAPI decryption failed".into()))
}

#[cfg(windows)]
fn dpapi(data: &[u8], protect: bool) -> windows::core::Result<Vec<u8>> {
    let input = CRYPT_INTEGER_BLOB {
        cbData: data.len() as u32,
        pbData: data.as_ptr() as *mut u8,
    };
    let mut output = CRYPT_INTEGER_BLOB {
        cbData: 0,
        pbData: std::ptr::null_mut(),
    };

    unsafe {
        if protect {
            CryptProtectData(&input, None, None, None, None, CRYPTPROTECT_UI_FORBIDDEN, &mut output)?;
        } else {
            CryptUnprotectData(&input, None, None, None, None, CRYPTPROTECT_UI_FORBIDDEN, &mut output)?;
        }

        let bytes = std::slice::from_raw_parts(output.pbData, output.cbData as usize).to_vec();

        // Buffer is allocated by DPAPI and must be released with LocalFree
        let _ = windows::Win32::Foundation::LocalFree(windows::Win32::Foundation::HLOCAL(
            output.pbData as *mut std::ffi::c_void,
        ));

        Ok(bytes)
    }
}

#[cfg(not(windows))]
fn seal(data: &[u8]) -> Result<Vec<u8>, StorageError> {
    Ok(data.to_vec())
}

#[cfg(not(windows))]
fn unseal(data: &[u8]) -> Result<Vec<u8>, StorageError> {
    Ok(data.to_vec())
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(String),

    #[error("entry encoding failed: {0}")]
    Serialization(String),

    #[error("could not seal entry: {0}")]
    Encryption(String),

    #[error("could not unseal entry: {0}")]
    Decryption(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_returns_entry() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SecureStorage::open(dir.path()).unwrap();

        storage.save("token", &"T1".to_string()).unwrap();

        assert!(storage.exists("token"));
        assert_eq!(storage.load::<String>("token").unwrap().as_deref(), Some("T1"));
    }

    #[test]
    fn missing_entry_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SecureStorage::open(dir.path()).unwrap();

        assert!(storage.load::<String>("user").unwrap().is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SecureStorage::open(dir.path()).unwrap();

        storage.save("token", &"T1".to_string()).unwrap();
        storage.delete("token").unwrap();
        storage.delete("token").unwrap();

        assert!(!storage.exists("token"));
    }

    #[test]
    fn corrupt_entry_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SecureStorage::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("user.dat"), b"{not json").unwrap();

        #[cfg(not(windows))]
        assert!(matches!(
            storage.load::<serde_json::Value>("user"),
            Err(StorageError::Serialization(_))
        ));
        #[cfg(windows)]
        assert!(storage.load::<serde_json::Value>("user").is_err());
    }
}
