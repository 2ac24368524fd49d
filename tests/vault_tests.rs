//! Integration tests for the hostvault credential vault.

use std::fs;

use hostvault::crypto::{encrypt, generate_master_key, MasterKey};
use hostvault::errors::HostVaultError;
use hostvault::vault::{
    remove_credential, reveal_credential, upsert_credential, CredentialRecord, CredentialStore,
};
use tempfile::TempDir;

/// Helper: a fresh temp dir, vault path inside it, and a master key.
fn setup() -> (TempDir, std::path::PathBuf, MasterKey) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("credentials.enc");
    let key = generate_master_key().expect("generate key");
    (dir, path, key)
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

#[test]
fn load_missing_vault_is_not_found() {
    let (_dir, path, key) = setup();

    let err = CredentialStore::load(&path, &key).unwrap_err();
    assert!(matches!(err, HostVaultError::VaultNotFound(_)));
    assert!(err.is_not_found());

    // The reconciliation path treats it as "no credentials yet".
    assert!(CredentialStore::load_or_default(&path, &key).unwrap().is_empty());
}

#[test]
fn save_and_reload_roundtrip() {
    let (_dir, path, key) = setup();

    let mut store = CredentialStore::new();
    store.insert("web", CredentialRecord::password_only("pw-web"));
    store.insert(
        "db",
        CredentialRecord::with_endpoint("pw-db", "10.0.0.5", "postgres", "2222"),
    );
    store.save(&path, &key).unwrap();

    let reloaded = CredentialStore::load(&path, &key).unwrap();
    assert_eq!(reloaded, store);
    assert_eq!(reloaded.hosts(), vec!["db", "web"]);
}

#[test]
fn vault_file_is_not_plaintext() {
    let (_dir, path, key) = setup();
    upsert_credential(&path, "web", CredentialRecord::password_only("hunter2"), &key).unwrap();

    let raw = fs::read(&path).unwrap();
    let needle = b"hunter2";
    assert!(!raw.windows(needle.len()).any(|w| w == needle));
}

#[cfg(unix)]
#[test]
fn vault_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path, key) = setup();
    upsert_credential(&path, "web", CredentialRecord::password_only("x"), &key).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

// ---------------------------------------------------------------------------
// Upsert
// ---------------------------------------------------------------------------

#[test]
fn upsert_creates_the_vault() {
    let (_dir, path, key) = setup();
    assert!(!path.exists());

    upsert_credential(&path, "web", CredentialRecord::password_only("pw"), &key).unwrap();

    assert!(path.exists());
    assert_eq!(reveal_credential(&path, "web", &key).unwrap(), "pw");
}

#[test]
fn upsert_is_idempotent_on_content() {
    let (_dir, path, key) = setup();
    let record = CredentialRecord::with_endpoint("p", "h", "u", "22");

    upsert_credential(&path, "web", record.clone(), &key).unwrap();
    let first_bytes = fs::read(&path).unwrap();
    upsert_credential(&path, "web", record.clone(), &key).unwrap();
    let second_bytes = fs::read(&path).unwrap();

    // Fresh nonce changes the bytes, not the content.
    assert_ne!(first_bytes, second_bytes);
    let store = CredentialStore::load(&path, &key).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("web"), Some(&record));
}

#[test]
fn failed_save_leaves_previous_vault_intact() {
    let (dir, path, key) = setup();
    upsert_credential(&path, "web", CredentialRecord::password_only("old"), &key).unwrap();
    let before = fs::read(&path).unwrap();

    // A directory in place of the temp file makes the write fail.
    fs::create_dir(dir.path().join(".credentials.enc.tmp")).unwrap();

    let result = upsert_credential(&path, "web", CredentialRecord::password_only("new"), &key);
    assert!(result.is_err());
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(reveal_credential(&path, "web", &key).unwrap(), "old");
}

#[test]
fn upsert_replaces_existing_record_and_keeps_others() {
    let (_dir, path, key) = setup();

    upsert_credential(&path, "a", CredentialRecord::password_only("old"), &key).unwrap();
    upsert_credential(&path, "b", CredentialRecord::password_only("keep"), &key).unwrap();
    upsert_credential(&path, "a", CredentialRecord::password_only("new"), &key).unwrap();

    assert_eq!(reveal_credential(&path, "a", &key).unwrap(), "new");
    assert_eq!(reveal_credential(&path, "b", &key).unwrap(), "keep");
}

// ---------------------------------------------------------------------------
// Remove / reveal
// ---------------------------------------------------------------------------

#[test]
fn remove_absent_host_is_a_noop() {
    let (_dir, path, key) = setup();
    upsert_credential(&path, "web", CredentialRecord::password_only("pw"), &key).unwrap();

    remove_credential(&path, "ghost", &key).expect("absent host must not error");
    assert_eq!(reveal_credential(&path, "web", &key).unwrap(), "pw");
}

#[test]
fn reveal_after_remove_is_not_found() {
    let (_dir, path, key) = setup();
    upsert_credential(&path, "web", CredentialRecord::password_only("pw"), &key).unwrap();
    remove_credential(&path, "web", &key).unwrap();

    let err = reveal_credential(&path, "web", &key).unwrap_err();
    assert!(matches!(err, HostVaultError::CredentialNotFound(ref h) if h == "web"));
}

#[test]
fn remove_without_vault_propagates_not_found() {
    let (_dir, path, key) = setup();
    let err = remove_credential(&path, "web", &key).unwrap_err();
    assert!(matches!(err, HostVaultError::VaultNotFound(_)));
}

// ---------------------------------------------------------------------------
// Corruption
// ---------------------------------------------------------------------------

#[test]
fn truncated_vault_is_corrupt_not_empty() {
    let (_dir, path, key) = setup();
    upsert_credential(&path, "web", CredentialRecord::password_only("pw"), &key).unwrap();

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..15]).unwrap();

    let err = CredentialStore::load(&path, &key).unwrap_err();
    assert!(matches!(err, HostVaultError::CorruptData(_)));

    // Not even the lenient loader may hide it.
    assert!(CredentialStore::load_or_default(&path, &key).is_err());
}

#[test]
fn vault_under_a_different_key_is_corrupt() {
    let (_dir, path, key) = setup();
    upsert_credential(&path, "web", CredentialRecord::password_only("pw"), &key).unwrap();

    let other = generate_master_key().unwrap();
    let err = CredentialStore::load(&path, &other).unwrap_err();
    assert!(matches!(err, HostVaultError::CorruptData(_)));
}

#[test]
fn invalid_json_after_decryption_is_corrupt() {
    let (_dir, path, key) = setup();
    fs::write(&path, encrypt(key.as_bytes(), b"{ nope }").unwrap()).unwrap();

    let err = CredentialStore::load(&path, &key).unwrap_err();
    assert!(matches!(err, HostVaultError::CorruptData(_)));
}

#[test]
fn legacy_bare_string_records_with_trailing_bytes_load() {
    let (_dir, path, key) = setup();
    let mut plaintext = br#"{"credentials":{"old-box":"legacy"}}"#.to_vec();
    plaintext.extend_from_slice(&[0u8; 9]);
    fs::write(&path, encrypt(key.as_bytes(), &plaintext).unwrap()).unwrap();

    assert_eq!(reveal_credential(&path, "old-box", &key).unwrap(), "legacy");

    // Rewriting upgrades the record to the structured shape.
    upsert_credential(&path, "new-box", CredentialRecord::password_only("x"), &key).unwrap();
    let store = CredentialStore::load(&path, &key).unwrap();
    assert_eq!(
        store.get("old-box"),
        Some(&CredentialRecord::password_only("legacy"))
    );
}
