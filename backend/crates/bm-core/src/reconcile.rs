//! Optimistic list reconciliation.
//!
//! Three sources mutate the list for the same row: the optimistic local
//! mutation, the result of the server round-trip, and the live notification.
//! Confirmed rows are matched by identifier. A notification that beats the
//! confirmation has no identifier to match yet, so it is matched to the
//! pending entry with the same owner, title and url, which it then confirms.

use crate::Bookmark;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Synthesized locally, insert still in flight. `id` is a local id.
    Pending,
    /// Row as stored by the data service.
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub bookmark: Bookmark,
    pub state: EntryState,
}

impl Entry {
    pub fn is_pending(&self) -> bool {
        self.state == EntryState::Pending
    }
}

/// Bookmarks of one owner, newest first.
#[derive(Debug, Clone, Default)]
pub struct BookmarkList {
    entries: Vec<Entry>,
}

impl BookmarkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an authoritative fetch (already ordered newest first).
    pub fn from_rows(rows: Vec<Bookmark>) -> Self {
        let mut list = Self::new();
        list.replace_all(rows);
        list
    }

    /// Insert a locally-synthesized row at the head. Returns its local id.
    pub fn insert_pending(&mut self, title: String, url: String, owner: Uuid) -> Uuid {
        let bookmark = Bookmark::synthesize(title, url, owner);
        let local_id = bookmark.id;
        self.entries.insert(
            0,
            Entry {
                bookmark,
                state: EntryState::Pending,
            },
        );
        local_id
    }

    /// Server confirmed the insert started by `insert_pending`.
    ///
    /// The pending entry is replaced in place by the server row, unless the
    /// live notification already delivered that row, in which case the
    /// pending entry is dropped. Returns whether the list changed.
    pub fn confirm(&mut self, local_id: Uuid, row: Bookmark) -> bool {
        let pending = self.position_pending(local_id);
        let already_present = self.contains(row.id);

        match (pending, already_present) {
            (Some(index), true) => {
                self.entries.remove(index);
                true
            }
            (Some(index), false) => {
                self.entries[index] = Entry {
                    bookmark: row,
                    state: EntryState::Confirmed,
                };
                true
            }
            (None, true) => false,
            (None, false) => {
                self.push_confirmed_front(row);
                true
            }
        }
    }

    /// Server rejected the insert; discard the pending entry.
    pub fn reject(&mut self, local_id: Uuid) -> bool {
        match self.position_pending(local_id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Live insert notification. Skipped when the row is already present.
    ///
    /// A matching pending entry is promoted in place; the later `confirm` of
    /// that insert then finds the row present and changes nothing.
    pub fn apply_remote_insert(&mut self, row: Bookmark) -> bool {
        if self.contains(row.id) {
            return false;
        }

        match self.position_pending_match(&row) {
            Some(index) => {
                self.entries[index] = Entry {
                    bookmark: row,
                    state: EntryState::Confirmed,
                };
            }
            None => self.push_confirmed_front(row),
        }
        true
    }

    /// Live delete notification.
    pub fn apply_remote_delete(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.state == EntryState::Confirmed && e.bookmark.id == id));
        before != self.entries.len()
    }

    /// Optimistically remove a confirmed row before the server delete.
    /// Pending rows have no server identity yet and are not removable.
    pub fn remove_optimistic(&mut self, id: Uuid) -> Option<Bookmark> {
        let index = self
            .entries
            .iter()
            .position(|e| e.state == EntryState::Confirmed && e.bookmark.id == id)?;
        Some(self.entries.remove(index).bookmark)
    }

    /// Authoritative state from a re-fetch. Discards all optimism.
    pub fn replace_all(&mut self, rows: Vec<Bookmark>) {
        self.entries = rows
            .into_iter()
            .map(|bookmark| Entry {
                bookmark,
                state: EntryState::Confirmed,
            })
            .collect();
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.entries.iter().any(|e| e.bookmark.id == id)
    }

    pub fn get(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|e| e.bookmark.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn bookmarks(&self) -> impl Iterator<Item = &Bookmark> {
        self.entries.iter().map(|e| &e.bookmark)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position_pending(&self, local_id: Uuid) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.state == EntryState::Pending && e.bookmark.id == local_id)
    }

    /// Oldest pending entry for the same row content. Inserts are answered
    /// in the order they were sent, so the oldest one is the match.
    fn position_pending_match(&self, row: &Bookmark) -> Option<usize> {
        self.entries.iter().rposition(|e| {
            e.state == EntryState::Pending
                && e.bookmark.user_id == row.user_id
                && e.bookmark.title == row.title
                && e.bookmark.url == row.url
        })
    }

    fn push_confirmed_front(&mut self, bookmark: Bookmark) {
        self.entries.insert(
            0,
            Entry {
                bookmark,
                state: EntryState::Confirmed,
            },
        );
    }
}
