//! `localStorage` backend for the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store persists its snapshot through the session crate's
//! `SessionStorage` trait. In the browser that is `window.localStorage`;
//! native builds have no window and report the backend as unavailable, which
//! the store treats as "no saved session".
//!
//! The handle is zero-sized and looks the window up per call so it stays
//! `Send + Sync` for Leptos context.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::{SessionStorage, StorageError};

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))
}

impl SessionStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).map_err(|e| StorageError::Io(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable("localStorage requires a browser".to_owned()))
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.set_item(key, value).map_err(|e| StorageError::Io(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable("localStorage requires a browser".to_owned()))
        }
    }
}
