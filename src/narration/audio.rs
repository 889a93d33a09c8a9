/*!
 * Audio clips and the handle registry that owns them.
 *
 * Synthesized audio is kept in an [`AudioStore`] and referenced through
 * opaque [`AudioHandle`]s. The handle owner decides when the bytes are
 * consumed (`take`) or discarded (`release`); nothing is copied into the
 * rest of the application state.
 */

use std::collections::HashMap;

use bytes::Bytes;
use parking_lot::Mutex;
use uuid::Uuid;

/// Synthesized audio bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Raw audio data
    pub bytes: Bytes,
    /// MIME type of the data, e.g. `audio/mpeg`
    pub mime_type: String,
}

impl AudioClip {
    /// Create a clip from raw bytes and a MIME type
    pub fn new(bytes: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Number of audio bytes in the clip
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the clip holds no audio data
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension matching the clip's MIME type
    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "audio/mpeg" | "audio/mp3" => "mp3",
            "audio/wav" | "audio/x-wav" => "wav",
            "audio/ogg" => "ogg",
            _ => "bin",
        }
    }
}

/// Opaque reference to a clip held by an [`AudioStore`].
///
/// Ownership semantics: whoever receives the handle is responsible for
/// eventually calling [`AudioStore::take`] or [`AudioStore::release`] on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioHandle(Uuid);

impl AudioHandle {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Registry of synthesized clips, keyed by revocable handles.
#[derive(Debug, Default)]
pub struct AudioStore {
    clips: Mutex<HashMap<AudioHandle, AudioClip>>,
}

impl AudioStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clip and hand back the handle that now owns it
    pub fn register(&self, clip: AudioClip) -> AudioHandle {
        let handle = AudioHandle::new();
        self.clips.lock().insert(handle.clone(), clip);
        handle
    }

    /// Read a clip without revoking the handle
    pub fn get(&self, handle: &AudioHandle) -> Option<AudioClip> {
        self.clips.lock().get(handle).cloned()
    }

    /// Remove the clip, transferring the bytes to the caller.
    /// The handle is revoked; later lookups return `None`.
    pub fn take(&self, handle: &AudioHandle) -> Option<AudioClip> {
        self.clips.lock().remove(handle)
    }

    /// Drop the clip without reading it. Returns whether it was still present.
    pub fn release(&self, handle: &AudioHandle) -> bool {
        self.clips.lock().remove(handle).is_some()
    }

    /// Number of clips currently registered
    pub fn len(&self) -> usize {
        self.clips.lock().len()
    }

    /// Whether the store holds no clips
    pub fn is_empty(&self) -> bool {
        self.clips.lock().is_empty()
    }
}
