//! File intake: drag-and-drop target, picker selection and thumbnail preview.
//!
//! The zone is either empty or loaded. A selection that passes validation
//! empties the zone and starts an asynchronous read; the new preview appears
//! once that read completes. Each accepted selection gets a generation number so a slow read
//! of an earlier file cannot overwrite the preview of a later one.

use std::rc::Rc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::ValidationError;
use crate::validation::{FileMeta, SourceFile, validate};

/// A file that is shown in the preview and ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub file: SourceFile,
    /// `data:` URL used as the thumbnail source
    pub thumbnail: Rc<str>,
}

/// Outcome of delivering read bytes to the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The preview now shows the file
    Loaded,
    /// The read belonged to a superseded selection
    Stale,
}

#[derive(Debug, Default)]
pub struct DropZone {
    loaded: Option<LoadedFile>,
    pending: Option<(u64, FileMeta)>,
    highlighted: bool,
    next_generation: u64,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag entered or moved over the zone.
    pub fn drag_over(&mut self) {
        self.highlighted = true;
    }

    /// A drag left the zone or was dropped.
    pub fn drag_ended(&mut self) {
        self.highlighted = false;
    }

    /// Offer a file from a drop or the picker.
    ///
    /// On success returns the generation the caller must pass back to
    /// [`finish_read`](Self::finish_read). On failure the zone is reset.
    pub fn select(&mut self, meta: FileMeta) -> Result<u64, ValidationError> {
        if let Err(e) = validate(&meta) {
            log::info!("Rejected '{}': {}", meta.name, e);
            self.clear();
            return Err(e);
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        log::debug!("Reading '{}' ({} bytes) as generation {}", meta.name, meta.size, generation);
        // The previous file must not stay submittable while the new one loads
        self.loaded = None;
        self.pending = Some((generation, meta));
        Ok(generation)
    }

    /// Deliver the bytes of a finished read.
    pub fn finish_read(&mut self, generation: u64, bytes: Vec<u8>) -> ReadOutcome {
        let meta = match self.pending.take() {
            Some((pending, meta)) if pending == generation => meta,
            other => {
                self.pending = other;
                log::debug!("Ignoring stale read of generation {}", generation);
                return ReadOutcome::Stale;
            }
        };

        let thumbnail: Rc<str> = data_url(&meta.mime, &bytes).into();
        self.loaded = Some(LoadedFile {
            file: SourceFile::new(meta, bytes),
            thumbnail,
        });
        ReadOutcome::Loaded
    }

    /// A read failed. Returns whether it belonged to the current selection,
    /// in which case the zone has been reset.
    pub fn fail_read(&mut self, generation: u64) -> bool {
        if matches!(self.pending, Some((pending, _)) if pending == generation) {
            self.clear();
            true
        } else {
            false
        }
    }

    /// Drop the preview and any pending selection.
    pub fn clear(&mut self) {
        self.loaded = None;
        self.pending = None;
    }

    /// Back to a fresh zone. Generations keep counting so reads started
    /// before the reset stay stale.
    pub fn reset(&mut self) {
        *self = Self {
            next_generation: self.next_generation,
            ..Self::default()
        };
    }

    pub fn loaded(&self) -> Option<&LoadedFile> {
        self.loaded.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// Encode bytes as a `data:` URL.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}
