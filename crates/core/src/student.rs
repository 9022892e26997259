//! Students and the class roster.

use std::collections::HashSet;

use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier for a student.
///
/// Display names are mutable attributes; every engine map (constraints,
/// zone affinities, seat occupancy) keys by id, so renaming a student never
/// orphans their relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StudentId(Uuid);

impl StudentId {
    /// Creates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A student on the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Student {
    /// Stable identity.
    pub id: StudentId,
    /// Display name. Uniqueness is not enforced; identity is the id.
    pub name: String,
}

impl Student {
    /// Creates a new student with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StudentId::new(),
            name: name.into(),
        }
    }
}

/// The class roster: an ordered list of students plus an absence set.
///
/// Order is the order students were added (the order the teacher typed them
/// in); it is preserved across renames and absences so the surrounding UI
/// can show a stable list.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Roster {
    students: Vec<Student>,
    absent: HashSet<StudentId>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roster from a list of display names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            students: names.into_iter().map(Student::new).collect(),
            absent: HashSet::new(),
        }
    }

    /// Adds a student and returns the new id.
    pub fn add(&mut self, name: impl Into<String>) -> StudentId {
        let student = Student::new(name);
        let id = student.id;
        self.students.push(student);
        id
    }

    /// Removes a student. Returns true if the student was present.
    pub fn remove(&mut self, id: StudentId) -> bool {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        self.absent.remove(&id);
        self.students.len() != before
    }

    /// Renames a student, keeping the id stable. Returns true on success.
    pub fn rename(&mut self, id: StudentId, name: impl Into<String>) -> bool {
        match self.students.iter_mut().find(|s| s.id == id) {
            Some(student) => {
                student.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Looks up a student by id.
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Looks up a display name by id.
    pub fn name(&self, id: StudentId) -> Option<&str> {
        self.student(id).map(|s| s.name.as_str())
    }

    /// Marks a student absent; absent students are skipped by every
    /// randomized operation.
    pub fn mark_absent(&mut self, id: StudentId) {
        if self.students.iter().any(|s| s.id == id) {
            self.absent.insert(id);
        }
    }

    /// Clears a student's absence.
    pub fn mark_present(&mut self, id: StudentId) {
        self.absent.remove(&id);
    }

    /// Returns true if the student is marked absent.
    pub fn is_absent(&self, id: StudentId) -> bool {
        self.absent.contains(&id)
    }

    /// Iterates all students in roster order, absent included.
    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    /// Iterates students who are present (not marked absent).
    pub fn present(&self) -> impl Iterator<Item = &Student> {
        self.students.iter().filter(|s| !self.absent.contains(&s.id))
    }

    /// Ids of present students, in roster order.
    pub fn present_ids(&self) -> Vec<StudentId> {
        self.present().map(|s| s.id).collect()
    }

    /// Total roster size, absent included.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Returns true if the roster has no students.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
