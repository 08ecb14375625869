//! In-memory lesson storage
//!
//! Lessons live for the lifetime of the process. Identifiers come from a
//! counter that starts at 1 and is never rewound, so an id is never handed
//! out twice even after its lesson is deleted.

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::LessonError;
use crate::types::{Lesson, LessonDraft};

/// Separator placed between existing content and an appended continuation
pub const CONTINUATION_SEPARATOR: &str = "\n\n";

struct Inner {
    /// Keyed by id; ids only grow, so key order is insertion order
    lessons: BTreeMap<u64, Lesson>,
    next_id: u64,
}

/// Keyed collection of lessons, safe to share across request handlers.
pub struct LessonStore {
    inner: RwLock<Inner>,
}

impl LessonStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                lessons: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store pre-populated with the bundled example lessons
    pub fn with_examples() -> Result<Self, LessonError> {
        let store = Self::new();
        for draft in crate::seed::example_lessons() {
            store.create_lesson(draft)?;
        }
        Ok(store)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, LessonError> {
        self.inner
            .read()
            .map_err(|e| LessonError::Storage(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, LessonError> {
        self.inner
            .write()
            .map_err(|e| LessonError::Storage(e.to_string()))
    }

    /// Insert a draft under a fresh id, stamping the creation time
    pub fn create_lesson(&self, draft: LessonDraft) -> Result<Lesson, LessonError> {
        let mut inner = self.write()?;
        let id = inner.next_id;
        inner.next_id += 1;

        let lesson = Lesson {
            id,
            topic: draft.topic,
            grade_level: draft.grade_level,
            lesson_style: draft.lesson_style,
            content: draft.content,
            read_time: draft.read_time,
            created_at: Utc::now(),
            include_quiz: draft.include_quiz,
            quiz: draft.quiz,
        };
        inner.lessons.insert(id, lesson.clone());

        tracing::debug!(id, topic = %lesson.topic, "stored lesson");
        Ok(lesson)
    }

    pub fn get_lesson(&self, id: u64) -> Result<Option<Lesson>, LessonError> {
        Ok(self.read()?.lessons.get(&id).cloned())
    }

    /// All lessons in insertion order
    pub fn get_all_lessons(&self) -> Result<Vec<Lesson>, LessonError> {
        Ok(self.read()?.lessons.values().cloned().collect())
    }

    /// Append content and bump the read time of an existing lesson.
    ///
    /// Returns `None` when the lesson is absent. The read and the write
    /// happen under one lock, so concurrent continuations never lose an append.
    pub fn update_lesson(
        &self,
        id: u64,
        content_to_append: &str,
        read_time_increment: u32,
    ) -> Result<Option<Lesson>, LessonError> {
        let mut inner = self.write()?;
        let Some(lesson) = inner.lessons.get_mut(&id) else {
            return Ok(None);
        };

        lesson.content.push_str(CONTINUATION_SEPARATOR);
        lesson.content.push_str(content_to_append);
        lesson.read_time = lesson.read_time.saturating_add(read_time_increment);

        tracing::debug!(id, read_time = lesson.read_time, "appended to lesson");
        Ok(Some(lesson.clone()))
    }

    /// Remove a lesson, returning whether it existed
    pub fn delete_lesson(&self, id: u64) -> Result<bool, LessonError> {
        Ok(self.write()?.lessons.remove(&id).is_some())
    }
}

impl Default for LessonStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn draft(topic: &str, content: &str) -> LessonDraft {
        LessonDraft {
            topic: topic.to_string(),
            grade_level: "elementary".to_string(),
            lesson_style: None,
            content: content.to_string(),
            read_time: 1,
            include_quiz: false,
            quiz: None,
        }
    }

    #[test]
    fn test_seeded_store_assigns_next_id() {
        let store = LessonStore::with_examples().unwrap();
        assert_eq!(store.get_all_lessons().unwrap().len(), 2);

        let first = store.create_lesson(draft("Volcanoes", "lava")).unwrap();
        let second = store.create_lesson(draft("Glaciers", "ice")).unwrap();
        assert_eq!(first.id, 3);
        assert_eq!(second.id, 4);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = LessonStore::new();
        let a = store.create_lesson(draft("Atoms", "a")).unwrap();
        assert!(store.delete_lesson(a.id).unwrap());

        let b = store.create_lesson(draft("Bonds", "b")).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_delete_then_get() {
        let store = LessonStore::new();
        let a = store.create_lesson(draft("Atoms", "a")).unwrap();
        let b = store.create_lesson(draft("Bonds", "b")).unwrap();

        assert!(store.delete_lesson(a.id).unwrap());
        assert!(store.get_lesson(a.id).unwrap().is_none());
        assert_eq!(store.get_lesson(b.id).unwrap().unwrap().topic, "Bonds");
        assert!(!store.delete_lesson(a.id).unwrap());
    }

    #[test]
    fn test_update_appends_with_separator() {
        let store = LessonStore::new();
        let lesson = store.create_lesson(draft("Letters", "abc")).unwrap();

        let updated = store.update_lesson(lesson.id, "def", 3).unwrap().unwrap();
        assert_eq!(updated.content, "abc\n\ndef");
        assert_eq!(updated.read_time, lesson.read_time + 3);
        assert_eq!(updated.created_at, lesson.created_at);
        assert_eq!(updated.topic, lesson.topic);

        let stored = store.get_lesson(lesson.id).unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[test]
    fn test_update_missing() {
        let store = LessonStore::new();
        assert!(store.update_lesson(42, "x", 1).unwrap().is_none());
    }

    #[test]
    fn test_all_lessons_in_insertion_order() {
        let store = LessonStore::new();
        for topic in ["One", "Two", "Three"] {
            store.create_lesson(draft(topic, topic)).unwrap();
        }
        let topics: Vec<_> = store
            .get_all_lessons()
            .unwrap()
            .into_iter()
            .map(|l| l.topic)
            .collect();
        assert_eq!(topics, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_concurrent_creates_get_unique_ids() {
        let store = Arc::new(LessonStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|j| {
                            store
                                .create_lesson(draft(&format!("t{i}-{j}"), "x"))
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&200));
    }

    #[test]
    fn test_concurrent_appends_all_land() {
        let store = Arc::new(LessonStore::new());
        let id = store.create_lesson(draft("Shared", "start")).unwrap().id;

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.update_lesson(id, "more", 1).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let lesson = store.get_lesson(id).unwrap().unwrap();
        assert_eq!(lesson.read_time, 11);
        assert_eq!(lesson.content.matches("more").count(), 10);
    }
}
