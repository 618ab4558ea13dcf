//! Shared integration test helpers

#![allow(dead_code)]

pub mod fake_repo;
pub mod fixtures;
pub mod mock_platform;

pub use fake_repo::FakeRepo;
pub use fixtures::*;
pub use mock_platform::MockPlatformService;

use std::sync::{Arc, Mutex};

/// Ordered record of side effects shared between the fake repo and the mock
/// platform, for asserting cross-component ordering
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Position of the first event starting with `prefix`
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.events().iter().position(|e| e.starts_with(prefix))
    }
}
