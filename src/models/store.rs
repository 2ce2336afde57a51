// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-image annotation list with undo/redo history.
//!
//! History is kept as full snapshots of the annotation list. Every
//! recorded mutation pushes the list as it was before the change and
//! clears the redo stack.

use super::annotation::Annotation;

/// Undo and redo stacks of annotation-list snapshots.
#[derive(Debug, Clone, Default)]
struct History {
    /// Undo stack (past states)
    undo_stack: Vec<Vec<Annotation>>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<Vec<Annotation>>,
}

impl History {
    /// Save current state before making a change
    fn push(&mut self, annotations: Vec<Annotation>) {
        self.undo_stack.push(annotations);
        // Clear redo stack when new action is performed
        self.redo_stack.clear();
    }

    /// Undo: restore previous state
    fn undo(&mut self, current: Vec<Annotation>) -> Result<Vec<Annotation>, Vec<Annotation>> {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.redo_stack.push(current);
                Ok(previous)
            }
            None => Err(current),
        }
    }

    /// Redo: restore next state
    fn redo(&mut self, current: Vec<Annotation>) -> Result<Vec<Annotation>, Vec<Annotation>> {
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack.push(current);
                Ok(next)
            }
            None => Err(current),
        }
    }

    fn snapshots_mut(&mut self) -> impl Iterator<Item = &mut Vec<Annotation>> {
        self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut())
    }
}

/// Annotations of the currently open image.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    history: History,
}

impl AnnotationStore {
    /// Create a store holding `annotations` with empty history.
    pub fn new(annotations: Vec<Annotation>) -> Self {
        Self {
            annotations,
            history: History::default(),
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.annotations.get(index)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Record the current list as an undo step without changing it.
    ///
    /// Used before a series of [`update`](Self::update) calls that should
    /// undo as one step.
    pub fn checkpoint(&mut self) {
        self.history.push(self.annotations.clone());
    }

    pub fn add(&mut self, annotation: Annotation) {
        self.checkpoint();
        self.annotations.push(annotation);
    }

    pub fn replace(&mut self, index: usize, annotation: Annotation) {
        if index >= self.annotations.len() {
            return;
        }
        self.checkpoint();
        self.annotations[index] = annotation;
    }

    pub fn remove(&mut self, index: usize) {
        if index >= self.annotations.len() {
            return;
        }
        self.checkpoint();
        self.annotations.remove(index);
    }

    pub fn clear(&mut self) {
        self.checkpoint();
        self.annotations.clear();
    }

    /// Overwrite annotation `index` without recording history.
    pub fn update(&mut self, index: usize, annotation: Annotation) {
        if let Some(slot) = self.annotations.get_mut(index) {
            *slot = annotation;
        }
    }

    /// Restore the previous snapshot. Returns `false` if there was none.
    pub fn undo(&mut self) -> bool {
        let current = std::mem::take(&mut self.annotations);
        let (restored, changed) = match self.history.undo(current) {
            Ok(previous) => (previous, true),
            Err(current) => (current, false),
        };
        self.annotations = restored;
        changed
    }

    /// Re-apply the last undone snapshot. Returns `false` if there was none.
    pub fn redo(&mut self) -> bool {
        let current = std::mem::take(&mut self.annotations);
        let (restored, changed) = match self.history.redo(current) {
            Ok(next) => (next, true),
            Err(current) => (current, false),
        };
        self.annotations = restored;
        changed
    }

    /// Follow a class deletion: drop annotations of `deleted_id` and shift
    /// higher ids down by one.
    ///
    /// The history snapshots are remapped too, so undo never restores an
    /// id that left the registry.
    pub fn reassign_for_class_deletion(&mut self, deleted_id: usize) {
        remap_for_deletion(&mut self.annotations, deleted_id);
        for snapshot in self.history.snapshots_mut() {
            remap_for_deletion(snapshot, deleted_id);
        }
    }
}

fn remap_for_deletion(annotations: &mut Vec<Annotation>, deleted_id: usize) {
    annotations.retain(|a| a.class_id != deleted_id);
    for a in annotations.iter_mut() {
        if a.class_id > deleted_id {
            a.class_id -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::{Point, Rect};

    fn boxed(x: f64, class_id: usize) -> Annotation {
        Annotation::new_box(Rect::new(x, 10.0, 20.0, 20.0), class_id)
    }

    #[test]
    fn test_undo_redo_symmetry() {
        let mut store = AnnotationStore::new(vec![boxed(0.0, 0)]);
        let before = store.annotations().to_vec();

        store.add(boxed(50.0, 1));
        store.replace(0, boxed(5.0, 2));
        store.remove(1);
        store.add(Annotation::new_polygon(
            vec![Point::new(0.0, 0.0), Point::new(30.0, 0.0), Point::new(15.0, 20.0)],
            0,
        ));
        let after = store.annotations().to_vec();

        for _ in 0..4 {
            assert!(store.undo());
        }
        assert_eq!(store.annotations(), before.as_slice());
        assert!(!store.undo());

        for _ in 0..4 {
            assert!(store.redo());
        }
        assert_eq!(store.annotations(), after.as_slice());
        assert!(!store.redo());
    }

    #[test]
    fn test_mutation_clears_redo() {
        let mut store = AnnotationStore::default();
        store.add(boxed(0.0, 0));
        store.undo();

        store.add(boxed(10.0, 0));
        assert!(!store.redo());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut store = AnnotationStore::new(vec![boxed(0.0, 0)]);
        store.remove(4);
        store.replace(4, boxed(1.0, 1));
        assert_eq!(store.len(), 1);
        assert!(!store.undo());
    }

    #[test]
    fn test_undo_after_clear_restores_order() {
        let mut store = AnnotationStore::default();
        store.add(boxed(0.0, 0));
        store.add(boxed(40.0, 1));
        let original = store.annotations().to_vec();

        store.clear();
        assert!(store.is_empty());

        store.undo();
        assert_eq!(store.annotations(), original.as_slice());
    }

    #[test]
    fn test_checkpoint_groups_updates() {
        let mut store = AnnotationStore::new(vec![boxed(0.0, 0)]);
        store.checkpoint();
        store.update(0, boxed(3.0, 0));
        store.update(0, boxed(6.0, 0));

        store.undo();
        assert_eq!(store.get(0), Some(&boxed(0.0, 0)));
    }

    #[test]
    fn test_reassign_for_class_deletion() {
        let mut store = AnnotationStore::new(vec![boxed(0.0, 0), boxed(10.0, 1), boxed(20.0, 2)]);

        store.reassign_for_class_deletion(1);

        let classes: Vec<usize> = store.annotations().iter().map(|a| a.class_id).collect();
        assert_eq!(classes, vec![0, 1]);
        assert_eq!(store.get(1).map(|a| a.rect.x), Some(20.0));
    }

    #[test]
    fn test_reassign_remaps_history() {
        let mut store = AnnotationStore::default();
        store.add(boxed(0.0, 2));
        store.add(boxed(10.0, 1));

        store.reassign_for_class_deletion(1);
        store.undo();

        let classes: Vec<usize> = store.annotations().iter().map(|a| a.class_id).collect();
        assert_eq!(classes, vec![1]);
    }
}
