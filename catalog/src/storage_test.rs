use super::*;

#[test]
fn load_missing_key_returns_none() {
    let storage = MemoryStorage::new();
    assert!(storage.load("nope").expect("load").is_none());
}

#[test]
fn save_then_load_returns_value() {
    let storage = MemoryStorage::new();
    storage.save("k", "v").expect("save");
    assert_eq!(storage.load("k").expect("load").as_deref(), Some("v"));
}

#[test]
fn clones_share_entries() {
    let storage = MemoryStorage::new();
    let reloaded = storage.clone();
    storage.save("k", "v").expect("save");
    assert_eq!(reloaded.raw("k").as_deref(), Some("v"));
}

#[test]
fn remove_missing_key_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.remove("nope").is_ok());
}

#[test]
fn quota_rejects_oversized_write_and_keeps_previous_value() {
    let storage = MemoryStorage::with_quota(4);
    storage.save("k", "abcd").expect("fits");
    let err = storage.save("k", "abcde").expect_err("over quota");
    assert!(matches!(err, StorageError::QuotaExceeded { ref key, bytes: 5 } if key == "k"));
    assert_eq!(storage.raw("k").as_deref(), Some("abcd"));
}

#[test]
fn quota_counts_other_keys() {
    let storage = MemoryStorage::with_quota(6);
    storage.save("a", "abc").expect("fits");
    assert!(storage.save("b", "abcd").is_err());
    assert!(storage.save("b", "abc").is_ok());
}

#[test]
fn lifting_quota_allows_write() {
    let storage = MemoryStorage::with_quota(1);
    assert!(storage.save("k", "long").is_err());
    storage.set_quota(None);
    assert!(storage.save("k", "long").is_ok());
}
