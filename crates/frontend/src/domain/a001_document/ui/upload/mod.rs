//! Document Upload UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: API functions
//! - state.rs: pending/uploaded lists and how request results change them
//! - view_model.rs: FileUploadVm with RwSignals
//! - view.rs: Main component FileUpload

mod model;
mod state;
mod view;
mod view_model;

pub use state::{PendingFiles, UploadPhase, UploadedFiles};
pub use view::FileUpload;
pub use view_model::{FileUploadVm, SelectedFile};
