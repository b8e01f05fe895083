use recall_core::{NewVocabulary, VocabStatus, VocabularyItem};
use serde::Serialize;

/// Words saved during the session, newest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VocabularyBank {
    items: Vec<VocabularyItem>,
}

impl VocabularyBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a fresh `new` item. Existing items are left untouched.
    pub fn save(&mut self, entry: NewVocabulary) -> VocabularyItem {
        let item = VocabularyItem::create(entry);
        self.items.insert(0, item.clone());
        item
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pending(&self) -> Vec<VocabularyItem> {
        self.items.iter().filter(|item| item.is_new()).cloned().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_new()).count()
    }

    pub fn synced_count(&self) -> usize {
        self.len() - self.pending_count()
    }

    /// Flip the given items from `new` to synced; returns how many moved.
    pub fn mark_synced(&mut self, ids: &[String]) -> usize {
        let mut moved = 0;
        for item in self.items.iter_mut().filter(|item| item.is_new() && ids.contains(&item.id)) {
            item.status = VocabStatus::Synced;
            moved += 1;
        }
        moved
    }
}
