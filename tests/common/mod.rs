//! Shared fixtures: a stub API plus an isolated storage directory.

#![allow(dead_code)]

use exogena_admin_lib::storage::SecureStorage;
use exogena_admin_lib::AppState;
use serde_json::json;
use tempfile::TempDir;
use wiremock::MockServer;

pub const TOKEN: &str = "T1";

pub struct Harness {
    pub server: MockServer,
    pub dir: TempDir,
    pub state: AppState,
}

impl Harness {
    /// Fresh view of the storage directory, as the next start would see it
    pub fn storage(&self) -> SecureStorage {
        SecureStorage::open(self.dir.path()).unwrap()
    }
}

/// No stored session
pub async fn logged_out() -> Harness {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(&server.uri(), SecureStorage::open(dir.path()).unwrap()).unwrap();
    Harness { server, dir, state }
}

/// A session for operator 1 restored from storage
pub async fn logged_in() -> Harness {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    store_session(&dir);
    let state = AppState::new(&server.uri(), SecureStorage::open(dir.path()).unwrap()).unwrap();
    Harness { server, dir, state }
}

pub fn store_session(dir: &TempDir) {
    let storage = SecureStorage::open(dir.path()).unwrap();
    storage
        .save("user", &json!({"id": 1, "name": "Ana", "email": "a@b.com"}))
        .unwrap();
    storage.save("token", &TOKEN.to_string()).unwrap();
}
