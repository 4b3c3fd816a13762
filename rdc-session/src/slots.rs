//! Upload slot tracker
//!
//! Holds at most one image per named slot for the duration of a session.
//! Slots are independent; replacing a filled slot discards the previous
//! file and its preview.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rdc_common::ImageSlot;
use std::collections::HashMap;

/// A file chosen for upload: raw bytes plus the browser-declared metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A bound slot: the file plus its inline preview representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub file: SlotFile,
    /// base64 `data:` URL, computed from the raw bytes when the slot is set
    pub preview: String,
}

/// Session-scoped tracker for the five required photograph slots
#[derive(Debug, Default)]
pub struct SlotTracker {
    slots: HashMap<ImageSlot, UploadedImage>,
}

impl SlotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a file to a slot. `None` is a no-op, not an error; `Some`
    /// replaces any existing binding wholesale.
    pub fn set(&mut self, slot: ImageSlot, file: Option<SlotFile>) {
        let Some(file) = file else { return };
        let preview = data_url(&file.content_type, &file.bytes);
        self.slots.insert(slot, UploadedImage { file, preview });
    }

    /// Return the slot to empty
    pub fn clear(&mut self, slot: ImageSlot) {
        self.slots.remove(&slot);
    }

    pub fn get(&self, slot: ImageSlot) -> Option<&UploadedImage> {
        self.slots.get(&slot)
    }

    /// Number of filled required slots
    pub fn filled_count(&self) -> usize {
        self.slots.len()
    }

    /// Filled slots in upload-form order
    pub fn iter_filled(&self) -> impl Iterator<Item = (ImageSlot, &UploadedImage)> {
        ImageSlot::ALL
            .into_iter()
            .filter_map(|slot| self.slots.get(&slot).map(|image| (slot, image)))
    }
}

/// Inline rendering representation of the raw bytes
fn data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}
