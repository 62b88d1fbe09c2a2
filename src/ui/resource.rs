use crate::models::ImagePayload;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Issues [`ImageHandle`]s and keeps track of which ones are still alive.
#[derive(Clone, Default)]
pub struct ImageStore {
    live: Arc<Mutex<HashSet<Uuid>>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `payload` in a displayable handle. The handle is released when dropped.
    pub fn create(&self, payload: ImagePayload) -> ImageHandle {
        let id = Uuid::new_v4();
        if let Ok(mut live) = self.live.lock() {
            live.insert(id);
        }
        log::debug!("Created image resource {} ({} bytes)", id, payload.len());

        ImageHandle {
            id,
            url: format!("blob:imagehook/{}", id),
            payload,
            live: Arc::clone(&self.live),
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }

    pub fn is_live(&self, id: &Uuid) -> bool {
        self.live.lock().map(|live| live.contains(id)).unwrap_or(false)
    }
}

/// Owned, non-clonable handle to image bytes, addressable by a `blob:` URL.
pub struct ImageHandle {
    id: Uuid,
    url: String,
    payload: ImagePayload,
    live: Arc<Mutex<HashSet<Uuid>>>,
}

impl ImageHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content_type(&self) -> &str {
        &self.payload.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.payload.data
    }

    pub fn extension(&self) -> &str {
        self.payload.extension()
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("url", &self.url)
            .field("content_type", &self.payload.content_type)
            .field("len", &self.payload.len())
            .finish()
    }
}

impl Drop for ImageHandle {
    fn drop(&mut self) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(&self.id);
        }
        log::debug!("Released image resource {}", self.id);
    }
}
