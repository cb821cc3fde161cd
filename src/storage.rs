//! 会话存储模块
//!
//! `SessionStore` 在持久化键值存储之上只管理一个可选的 bearer token。
//! 存储不可用时一律视为匿名，不向上抛错。

use crate::error::StorageError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// =========================================================
// 抽象存储接口
// =========================================================

/// 同步键值存储（浏览器 `localStorage` 的抽象）
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =========================================================
// 内存实现
// =========================================================

/// 进程内存储，克隆后共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 模拟被禁用的存储，所有操作都会失败
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        self.entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

// =========================================================
// Session Store
// =========================================================

/// 令牌存储
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// 读取令牌
    ///
    /// 空字符串与读取失败都返回 `None`。
    pub fn get(&self) -> Option<String> {
        match self.storage.get(&self.key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("[SessionStore] read {} failed: {}", self.key, e);
                None
            }
        }
    }

    pub fn set(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(&self.key, token)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let store = SessionStore::new(MemoryStorage::new(), "accessToken");
        assert_eq!(store.get(), None);

        store.set("abc").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc"));

        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_empty_token_is_absent() {
        let storage = MemoryStorage::new();
        storage.set("accessToken", "").unwrap();
        let store = SessionStore::new(storage, "accessToken");
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_unavailable_storage_reads_as_anonymous() {
        let store = SessionStore::new(MemoryStorage::unavailable(), "accessToken");
        assert_eq!(store.get(), None);
        assert!(matches!(store.set("abc"), Err(StorageError::Unavailable(_))));
    }

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone(), "k");
        store.set("t").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("t"));
    }
}
