//! The student collection.
//!
//! [`StudentStore`] owns an insertion-ordered `Vec<Student>` and knows
//! nothing about HTTP or threads. Callers get copies; the only way to change
//! the collection is through its four operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single roster entry.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
}

impl Student {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// The one application-level failure the store reports.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StoreError {
    #[error("student {0} not found")]
    NotFound(u32),
}

/// How [`StudentStore::create`] picks the next identifier.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum IdPolicy {
    /// `max(current ids) + 1`, or `1` when empty. With no deletions this is
    /// `len + 1`. A deleted tail id can be handed out again.
    #[default]
    MaxPlusOne,
    /// A counter that only moves forward. Ids are never reused.
    Monotonic,
}

impl FromStr for IdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max-plus-one" => Ok(Self::MaxPlusOne),
            "monotonic" => Ok(Self::Monotonic),
            other => Err(format!("expected `max-plus-one` or `monotonic`, got `{other}`")),
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MaxPlusOne => "max-plus-one",
            Self::Monotonic => "monotonic",
        })
    }
}

/// Insertion-ordered collection of [`Student`]s with unique ids.
#[derive(Debug, Default)]
pub struct StudentStore {
    students: Vec<Student>,
    policy: IdPolicy,
    /// Highest id ever held. Only consulted under [`IdPolicy::Monotonic`].
    high_water: u32,
}

impl StudentStore {
    pub fn new(policy: IdPolicy) -> Self {
        Self { students: Vec::new(), policy, high_water: 0 }
    }

    /// A store holding the two demo students the service has always started with.
    pub fn seeded(policy: IdPolicy) -> Self {
        Self {
            students: vec![Student::new(1, "Priyanshu"), Student::new(2, "Aarav")],
            policy,
            high_water: 2,
        }
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Every student, in insertion order.
    pub fn list(&self) -> Vec<Student> {
        self.students.clone()
    }

    /// Appends a student under the next id and returns a copy of it.
    pub fn create(&mut self, name: impl Into<String>) -> Student {
        let id = self.next_id();
        let student = Student::new(id, name);
        self.high_water = self.high_water.max(id);
        self.students.push(student.clone());
        student
    }

    /// Replaces the name of student `id` in place. Id and position are kept.
    pub fn update(&mut self, id: u32, name: impl Into<String>) -> Result<Student, StoreError> {
        let student = self
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;
        student.name = name.into();
        Ok(student.clone())
    }

    /// Removes student `id`. Absent ids are a no-op. Returns whether
    /// anything was removed.
    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        self.students.len() != before
    }

    fn next_id(&self) -> u32 {
        match self.policy {
            IdPolicy::MaxPlusOne => self.students.iter().map(|s| s.id).max().unwrap_or(0) + 1,
            IdPolicy::Monotonic => self.high_water + 1,
        }
    }
}
