//! The record store: saved floor plans, the current selection and the live
//! transform being edited.

use crate::state::record::{FloorPlanRecord, RecordDraft, RecordFields};
use crate::state::transform::ImageTransform;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Which record the form is editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    /// Composing a record that has not been saved yet.
    #[default]
    New,
    Saved(usize),
}

/// Identity of a host-side transform swap.
///
/// The viewer only resynchronizes when the token it last saw differs from
/// the store's, so its own outbound updates never bounce back into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SyncToken(u64);

impl SyncToken {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug)]
pub struct RecordStore {
    records: Rc<[FloorPlanRecord]>,
    selection: Selection,
    editing: ImageTransform,
    token: SyncToken,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            records: Rc::from(Vec::new()),
            selection: Selection::New,
            editing: ImageTransform::default(),
            token: SyncToken::default(),
        }
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved records. The slice is replaced on every save, never mutated,
    /// so `Rc::ptr_eq` tells whether anything changed.
    pub fn records(&self) -> Rc<[FloorPlanRecord]> {
        Rc::clone(&self.records)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The live transform, as last reported by the viewer.
    pub fn editing(&self) -> &ImageTransform {
        &self.editing
    }

    pub fn sync_token(&self) -> SyncToken {
        self.token
    }

    /// Outbound setter handed to the viewer.
    pub fn set_editing(&mut self, transform: ImageTransform) {
        self.editing = transform;
    }

    /// Switches the form to another record and swaps in its saved transform.
    ///
    /// Selecting the current record again also swaps, discarding unsaved
    /// viewer edits. An out-of-range index leaves everything unchanged.
    pub fn select(&mut self, selection: Selection) -> bool {
        let transform = match selection {
            Selection::New => ImageTransform::default(),
            Selection::Saved(index) => match self.records.get(index) {
                Some(record) => record.transform.clone(),
                None => {
                    warn!(index, count = self.records.len(), "Ignoring selection past end of list");
                    return false;
                }
            },
        };
        self.selection = selection;
        self.editing = transform;
        self.token = self.token.next();
        debug!(?selection, token = ?self.token, "Selection changed");
        true
    }

    /// Form contents matching the current selection.
    pub fn draft_for_selection(&self) -> RecordDraft {
        match self.selection {
            Selection::New => RecordDraft::default(),
            Selection::Saved(index) => self
                .records
                .get(index)
                .map(|r| RecordDraft::from(&r.fields))
                .unwrap_or_default(),
        }
    }

    /// Creates or overwrites the record at the current selection with
    /// `fields` and the live transform. Returns the record's index.
    ///
    /// A created record becomes selected. The viewer already shows its
    /// transform, so the sync token is left alone.
    pub fn save(&mut self, fields: RecordFields) -> usize {
        let record = FloorPlanRecord {
            fields,
            transform: self.editing.clone(),
        };
        let mut next: Vec<FloorPlanRecord> = self.records.to_vec();
        let index = match self.selection {
            Selection::Saved(index) if index < next.len() => {
                next[index] = record;
                info!(index, name = %next[index].fields.name, "Updated floor plan");
                index
            }
            _ => {
                next.push(record);
                let index = next.len() - 1;
                info!(index, name = %next[index].fields.name, "Created floor plan");
                index
            }
        };
        self.records = next.into();
        self.selection = Selection::Saved(index);
        index
    }
}
