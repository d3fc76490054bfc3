//! Directory-backed key-value blob store.
//!
//! Each key is one JSON file holding `{data, expiry, timestamp, version}`.
//! Writes are bounded by a byte quota; a write that would overflow it first
//! drops expired and unreadable entries, then the oldest entries that carry
//! a TTL. Persistent entries are never evicted; if they alone leave no room
//! the write fails with [`DextrendsError::QuotaExceeded`].
//! Corrupt blobs are removed on read and reported as missing.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config;
use crate::error::{DextrendsError, Result};

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry<T> {
    data: T,
    /// Milliseconds since the epoch; `None` never expires.
    expiry: Option<i64>,
    timestamp: i64,
    version: String,
}

/// Size and age of a stored blob, as reported by [`LocalStore::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    pub key: String,
    pub size: u64,
    pub timestamp: i64,
    pub expiry: Option<i64>,
}

/// Key-value blob store with a byte quota.
pub struct LocalStore {
    /// Directory holding one file per key.
    pub storage_dir: PathBuf,
    /// Upper bound on the summed size of all blobs.
    pub quota_bytes: u64,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `storage_dir`.
    ///
    /// If `storage_dir` is `None`, uses the platform-appropriate default directory.
    pub fn new(storage_dir: Option<PathBuf>, quota_bytes: u64) -> Result<Self> {
        let dir = storage_dir.unwrap_or_else(config::default_storage_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            storage_dir: dir,
            quota_bytes,
        })
    }

    /// Read a value, or `None` when missing, expired or corrupt.
    ///
    /// Expired and corrupt blobs are deleted as a side effect. A blob that
    /// parses but does not match `T` is an error, not a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        let Some(entry) = self.read_entry(&path)? else {
            return Ok(None);
        };
        if is_expired(entry.expiry) {
            tracing::debug!(key, "expired entry removed");
            remove_quietly(&path);
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(entry.data)?))
    }

    /// Store a value that expires after `ttl`.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let expiry = Utc::now().timestamp_millis().saturating_add(ttl_ms);
        self.write(key, value, Some(expiry))
    }

    /// Store a value with no expiry.
    pub fn set_persistent<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.write(key, value, None)
    }

    /// Delete a key. Returns whether anything was removed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.storage_dir)? {
            let name = entry?.file_name();
            if let Some(key) = name.to_str().and_then(decode_file_name) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Metadata for every readable entry. Unreadable entries are skipped.
    pub fn entries(&self) -> Result<Vec<EntryMeta>> {
        let mut out = Vec::new();
        for key in self.keys()? {
            let path = self.path_for(&key);
            let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            if let Ok(Some(entry)) = self.read_entry_silent(&path) {
                out.push(EntryMeta {
                    key,
                    size,
                    timestamp: entry.timestamp,
                    expiry: entry.expiry,
                });
            }
        }
        Ok(out)
    }

    /// Total bytes currently stored.
    pub fn usage_bytes(&self) -> Result<u64> {
        let mut total = 0;
        for key in self.keys()? {
            total += fs::metadata(self.path_for(&key)).map(|m| m.len()).unwrap_or(0);
        }
        Ok(total)
    }

    /// Remove expired and unreadable entries. Returns how many were removed.
    pub fn cleanup(&self) -> Result<usize> {
        let mut removed = 0;
        for key in self.keys()? {
            let path = self.path_for(&key);
            let stale = match self.read_entry_silent(&path) {
                Ok(Some(entry)) => is_expired(entry.expiry),
                Ok(None) => false,
                Err(_) => true,
            };
            if stale {
                remove_quietly(&path);
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::info!(removed, "storage cleanup removed stale entries");
        }
        Ok(removed)
    }

    /// Delete every entry written by this store.
    pub fn clear(&self) -> Result<()> {
        for key in self.keys()? {
            fs::remove_file(self.path_for(&key))?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn path_for(&self, key: &str) -> PathBuf {
        self.storage_dir.join(encode_file_name(key))
    }

    fn write<T: Serialize>(&self, key: &str, value: &T, expiry: Option<i64>) -> Result<()> {
        let entry = StoredEntry {
            data: value,
            expiry,
            timestamp: Utc::now().timestamp_millis(),
            version: config::STORAGE_VERSION.to_string(),
        };
        let blob = serde_json::to_vec(&entry)?;
        let needed = blob.len() as u64;

        if needed > self.quota_bytes {
            return Err(DextrendsError::QuotaExceeded {
                needed,
                quota: self.quota_bytes,
            });
        }

        if self.usage_excluding(key)? + needed > self.quota_bytes {
            tracing::warn!(key, needed, "storage quota exceeded, attempting cleanup");
            self.cleanup()?;
            self.evict_oldest(key, needed)?;
        }

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let result = (|| -> Result<()> {
            fs::write(&tmp, &blob)?;
            fs::rename(&tmp, &path)?;
            Ok(())
        })();

        if result.is_err() {
            remove_quietly(&tmp);
        }
        result
    }

    fn usage_excluding(&self, key: &str) -> Result<u64> {
        let own = fs::metadata(self.path_for(key)).map(|m| m.len()).unwrap_or(0);
        Ok(self.usage_bytes()?.saturating_sub(own))
    }

    /// Delete the oldest expiring entries (other than `keep`) until `needed`
    /// bytes fit. Persistent entries are never evicted.
    fn evict_oldest(&self, keep: &str, needed: u64) -> Result<()> {
        let mut entries: Vec<EntryMeta> = self
            .entries()?
            .into_iter()
            .filter(|e| e.key != keep && e.expiry.is_some())
            .collect();
        entries.sort_by_key(|e| e.timestamp);

        let mut usage = self.usage_excluding(keep)?;
        for entry in entries {
            if usage + needed <= self.quota_bytes {
                break;
            }
            tracing::info!(key = %entry.key, size = entry.size, "evicting oldest entry");
            remove_quietly(&self.path_for(&entry.key));
            usage = usage.saturating_sub(entry.size);
        }

        if usage + needed > self.quota_bytes {
            return Err(DextrendsError::QuotaExceeded {
                needed,
                quota: self.quota_bytes,
            });
        }
        Ok(())
    }

    /// Read an entry, deleting it with a warning if it does not parse.
    fn read_entry(&self, path: &Path) -> Result<Option<StoredEntry<serde_json::Value>>> {
        match self.read_entry_silent(path) {
            Ok(entry) => Ok(entry),
            Err(DextrendsError::Json(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt storage entry removed");
                remove_quietly(path);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn read_entry_silent(&self, path: &Path) -> Result<Option<StoredEntry<serde_json::Value>>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

fn is_expired(expiry: Option<i64>) -> bool {
    expiry.is_some_and(|e| Utc::now().timestamp_millis() >= e)
}

fn remove_quietly(path: &Path) {
    let _ = fs::remove_file(path);
}

/// Map a key to a file name. Characters outside `[A-Za-z0-9_-]` become `%XX`.
fn encode_file_name(key: &str) -> String {
    let mut name = String::from(config::STORAGE_PREFIX);
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
            name.push(b as char);
        } else {
            name.push_str(&format!("%{:02X}", b));
        }
    }
    name.push_str(".json");
    name
}

fn decode_file_name(name: &str) -> Option<String> {
    let encoded = name
        .strip_prefix(config::STORAGE_PREFIX)?
        .strip_suffix(".json")?;
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
