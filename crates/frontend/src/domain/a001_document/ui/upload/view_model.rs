//! Document Upload - View Model

use leptos::prelude::*;

use super::state::{begin_request, end_request, PendingFiles, UploadPhase, UploadedFiles};

/// Browser file picked for upload
#[derive(Clone, Debug)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub file: web_sys::File,
}

impl SelectedFile {
    pub fn from_file(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            size: file.size() as u64,
            file,
        }
    }
}

#[derive(Clone, Copy)]
pub struct FileUploadVm {
    // `web_sys::File` is not `Send`
    pub pending: RwSignal<PendingFiles<SelectedFile>, LocalStorage>,
    pub uploaded: RwSignal<UploadedFiles>,
    pub phase: RwSignal<UploadPhase>,
}

impl FileUploadVm {
    pub fn new() -> Self {
        Self {
            pending: RwSignal::new_local(PendingFiles::new()),
            uploaded: RwSignal::new(UploadedFiles::default()),
            phase: RwSignal::new(UploadPhase::Idle),
        }
    }

    pub fn add_selected(&self, files: Vec<SelectedFile>) {
        self.pending.update(|pending| pending.add_all(files));
        self.settle_if_idle();
    }

    pub fn remove_selected(&self, index: usize) {
        self.pending.update(|pending| {
            pending.remove_at(index);
        });
        self.settle_if_idle();
    }

    /// Leave Uploading/Deleting alone; otherwise follow the pending list
    fn settle_if_idle(&self) {
        if !self.phase.get_untracked().is_busy() {
            self.settle();
        }
    }

    fn settle(&self) {
        let pending_len = self.pending.with_untracked(|pending| pending.len());
        self.phase.set(UploadPhase::settled(pending_len));
    }

    /// Enter Uploading/Deleting; `false` if a request is already running
    pub fn start(&self, next: UploadPhase, on_busy_change: Callback<bool>) -> bool {
        let mut phase = self.phase.get_untracked();
        let started = begin_request(&mut phase, next, |busy| on_busy_change.run(busy));
        if started {
            self.phase.set(phase);
        }
        started
    }

    /// Back to Idle/Selecting once the request settled, success or not
    pub fn finish(&self, on_busy_change: Callback<bool>) {
        // The widget may be gone when a request resolves after logout
        let Some(pending_len) = self.pending.try_with_untracked(|pending| pending.len()) else {
            return;
        };
        let mut phase = self.phase.get_untracked();
        end_request(&mut phase, pending_len, |busy| on_busy_change.run(busy));
        self.phase.set(phase);
    }
}
