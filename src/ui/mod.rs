pub mod cancel;
pub mod resource;
pub mod state;

pub use cancel::{CancelHandle, CancelToken};
pub use resource::{ImageHandle, ImageStore};
pub use state::{ImageSlot, StatusKind, StatusMessage, UiState};
