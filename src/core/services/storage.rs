use thiserror::Error;

use crate::models::Board;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available in this browser context")]
    Unavailable,
    #[error("failed to read key {key}: {message}")]
    Read { key: String, message: String },
    #[error("failed to write key {key}: {message}")]
    Write { key: String, message: String },
    #[error("failed to encode board: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum BoardLoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("stored board is not valid JSON for the board layout: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("stored board is incompatible: {0}")]
    Incompatible(String),
}

/// A string key-value slot store. `window.localStorage` in the browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Handle to the page's local storage. Holds nothing itself; the storage
/// object is looked up on each call, so the handle is free to share.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota errors surface here
        local_storage()?.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
    }
}

/// Reads the board slot. `Ok(None)` means nothing has been stored yet; any
/// stored value that fails to decode or has the wrong layout is an error.
pub fn load_board<S: KeyValueStore + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Option<Board>, BoardLoadError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };

    let board: Board = serde_json::from_str(&raw)?;
    board.check_layout().map_err(BoardLoadError::Incompatible)?;
    Ok(Some(board))
}

/// Overwrites the board slot with the whole board.
pub fn save_board<S: KeyValueStore + ?Sized>(
    storage: &S,
    key: &str,
    board: &Board,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(board)?;
    storage.set(key, &json)
}

#[cfg(test)]
pub use memory::MemoryStorage;
