//! Serialized access to the student collection.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::store::{IdPolicy, StoreError, Student, StudentStore};

/// The roster service: one [`StudentStore`] behind a mutex.
///
/// Every operation holds the lock for its whole (short, synchronous) run, so
/// two requests never observe each other's partial work. Share it between
/// connection tasks with `Arc`.
#[derive(Debug)]
pub struct StudentService {
    store: Mutex<StudentStore>,
}

impl StudentService {
    pub fn new(store: StudentStore) -> Self {
        Self { store: Mutex::new(store) }
    }

    pub fn list(&self) -> Vec<Student> {
        self.lock().list()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    pub fn create(&self, name: impl Into<String>) -> Student {
        let student = self.lock().create(name);
        info!(id = student.id, name = %student.name, "student added");
        student
    }

    pub fn update(&self, id: u32, name: impl Into<String>) -> Result<Student, StoreError> {
        let result = self.lock().update(id, name);
        match &result {
            Ok(student) => info!(id, name = %student.name, "student updated"),
            Err(e) => debug!(id, "update rejected: {e}"),
        }
        result
    }

    pub fn delete(&self, id: u32) {
        let removed = self.lock().delete(id);
        info!(id, removed, "student deleted");
    }

    // A panic while the lock is held cannot leave the store half-written:
    // each operation mutates it in a single step. Keep serving.
    fn lock(&self) -> MutexGuard<'_, StudentStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StudentService {
    fn default() -> Self {
        Self::new(StudentStore::seeded(IdPolicy::default()))
    }
}
