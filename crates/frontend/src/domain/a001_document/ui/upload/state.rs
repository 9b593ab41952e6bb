//! Document Upload - State transitions
//!
//! Plain data, no signals: the view model wraps these in `RwSignal`s and the
//! async handlers feed request results through the `apply_*` functions.

use contracts::domain::a001_document::aggregate::{UploadResponse, UploadedFile};

use crate::layout::notification_service::Notice;
use crate::shared::api_client::ApiError;

pub const UPLOAD_SUCCESS: &str = "Files uploaded successfully";
pub const UPLOAD_FAILURE: &str = "Error uploading files";
pub const DELETE_SUCCESS: &str = "File deleted successfully";
pub const DELETE_FAILURE: &str = "Error deleting file";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadPhase {
    #[default]
    Idle,
    Selecting,
    Uploading,
    Deleting,
}

impl UploadPhase {
    /// Phase once no request is in flight
    pub fn settled(pending_len: usize) -> Self {
        if pending_len > 0 {
            UploadPhase::Selecting
        } else {
            UploadPhase::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, UploadPhase::Uploading | UploadPhase::Deleting)
    }
}

/// Enter `next` (Uploading or Deleting) and report busy.
///
/// Refused while another request is in flight; `on_busy_change` is not called then.
pub fn begin_request(
    phase: &mut UploadPhase,
    next: UploadPhase,
    mut on_busy_change: impl FnMut(bool),
) -> bool {
    if phase.is_busy() {
        return false;
    }
    *phase = next;
    on_busy_change(true);
    true
}

/// Leave the request phase whatever its outcome and report idle
pub fn end_request(
    phase: &mut UploadPhase,
    pending_len: usize,
    mut on_busy_change: impl FnMut(bool),
) {
    *phase = UploadPhase::settled(pending_len);
    on_busy_change(false);
}

/// Files picked locally and not yet sent; duplicates are kept
#[derive(Clone, Debug, PartialEq)]
pub struct PendingFiles<F> {
    items: Vec<F>,
}

impl<F> Default for PendingFiles<F> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<F> PendingFiles<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_all(&mut self, files: impl IntoIterator<Item = F>) {
        self.items.extend(files);
    }

    /// Out-of-range indexes are ignored
    pub fn remove_at(&mut self, index: usize) -> Option<F> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Drop the first `count` entries (the ones that were sent)
    pub fn drain_front(&mut self, count: usize) {
        let count = count.min(self.items.len());
        self.items.drain(..count);
    }

    pub fn items(&self) -> &[F] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Local cache of the server's document list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadedFiles {
    items: Vec<UploadedFile>,
}

impl From<Vec<UploadedFile>> for UploadedFiles {
    fn from(items: Vec<UploadedFile>) -> Self {
        Self { items }
    }
}

impl UploadedFiles {
    pub fn items(&self) -> &[UploadedFile] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn append(&mut self, files: Vec<UploadedFile>) {
        self.items.extend(files);
    }

    /// Remove the first entry with this id; `false` if there was none
    pub fn remove_by_id(&mut self, file_id: &str) -> bool {
        match self.items.iter().position(|f| f.file_id == file_id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UploadOutcome {
    pub notice: Notice,
    /// Leading pending entries the server accepted; files picked meanwhile stay
    pub sent_count: usize,
    pub user_id: Option<String>,
}

pub fn apply_upload_result(
    uploaded: &mut UploadedFiles,
    sent_count: usize,
    result: Result<UploadResponse, ApiError>,
) -> UploadOutcome {
    match result {
        Ok(response) => {
            uploaded.append(response.files);
            UploadOutcome {
                notice: Notice::success(UPLOAD_SUCCESS),
                sent_count,
                user_id: response.user_id,
            }
        }
        Err(_) => UploadOutcome {
            notice: Notice::error(UPLOAD_FAILURE),
            sent_count: 0,
            user_id: None,
        },
    }
}

pub fn apply_delete_result(
    uploaded: &mut UploadedFiles,
    file_id: &str,
    result: Result<(), ApiError>,
) -> Notice {
    match result {
        Ok(()) => {
            uploaded.remove_by_id(file_id);
            Notice::success(DELETE_SUCCESS)
        }
        Err(_) => Notice::error(DELETE_FAILURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::notification_service::NoticeKind;

    fn files(ids: &[&str]) -> Vec<UploadedFile> {
        ids.iter()
            .map(|id| UploadedFile::new(*id, format!("{id}.pdf")))
            .collect()
    }

    fn ids(uploaded: &UploadedFiles) -> Vec<&str> {
        uploaded.items().iter().map(|f| f.file_id.as_str()).collect()
    }

    #[test]
    fn test_pending_keeps_insertion_order_and_duplicates() {
        let mut pending = PendingFiles::new();
        pending.add_all(["a.pdf", "b.pdf"]);
        pending.add_all(["a.pdf"]);
        pending.add_all(Vec::<&str>::new());
        assert_eq!(pending.len(), 3);
        assert_eq!(pending.items(), &["a.pdf", "b.pdf", "a.pdf"]);
    }

    #[test]
    fn test_pending_remove_at_preserves_order() {
        let mut pending = PendingFiles::new();
        pending.add_all(["a", "b", "c", "d"]);

        assert_eq!(pending.remove_at(1), Some("b"));
        assert_eq!(pending.items(), &["a", "c", "d"]);

        assert_eq!(pending.remove_at(7), None);
        assert_eq!(pending.items(), &["a", "c", "d"]);
    }

    #[test]
    fn test_upload_success_appends_and_clears_selection() {
        let mut uploaded = UploadedFiles::from(files(&["old"]));
        let response = UploadResponse {
            user_id: Some("u-1".into()),
            files: files(&["n1", "n2"]),
            ..Default::default()
        };

        let outcome = apply_upload_result(&mut uploaded, 2, Ok(response));

        assert_eq!(ids(&uploaded), vec!["old", "n1", "n2"]);
        assert_eq!(outcome.notice, Notice::success(UPLOAD_SUCCESS));
        assert_eq!(outcome.sent_count, 2);
        assert_eq!(outcome.user_id.as_deref(), Some("u-1"));
    }

    #[test]
    fn test_upload_failure_keeps_everything() {
        let mut uploaded = UploadedFiles::from(files(&["old"]));
        let outcome = apply_upload_result(
            &mut uploaded,
            1,
            Err(ApiError::Status {
                status: 400,
                message: Some("File type not allowed: a.exe".into()),
            }),
        );

        assert_eq!(ids(&uploaded), vec!["old"]);
        assert_eq!(outcome.notice.kind, NoticeKind::Error);
        assert_eq!(outcome.notice.text, UPLOAD_FAILURE);
        assert_eq!(outcome.sent_count, 0);
    }

    #[test]
    fn test_file_picked_during_upload_survives_success() {
        let mut pending = PendingFiles::new();
        pending.add_all(["a.pdf"]);
        let sent = pending.items().to_vec();

        // Picked while the request is in flight
        pending.add_all(["b.pdf"]);

        let mut uploaded = UploadedFiles::default();
        let response = UploadResponse {
            files: files(&["a"]),
            ..Default::default()
        };
        let outcome = apply_upload_result(&mut uploaded, sent.len(), Ok(response));
        pending.drain_front(outcome.sent_count);

        assert_eq!(pending.items(), &["b.pdf"]);
        assert_eq!(ids(&uploaded), vec!["a"]);
    }

    #[test]
    fn test_drain_front_is_bounded() {
        let mut pending = PendingFiles::new();
        pending.add_all(["a", "b"]);
        pending.drain_front(5);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_busy_signal_around_successful_upload() {
        let mut phase = UploadPhase::Selecting;
        let mut pending = PendingFiles::new();
        pending.add_all(["a.pdf"]);
        let mut busy = Vec::new();

        assert!(begin_request(&mut phase, UploadPhase::Uploading, |b| busy.push(b)));
        assert_eq!(phase, UploadPhase::Uploading);
        assert_eq!(busy, vec![true]);

        let response = UploadResponse {
            files: files(&["a"]),
            ..Default::default()
        };
        let outcome = apply_upload_result(&mut UploadedFiles::default(), 1, Ok(response));
        pending.drain_front(outcome.sent_count);
        end_request(&mut phase, pending.len(), |b| busy.push(b));

        assert_eq!(busy, vec![true, false]);
        assert_eq!(phase, UploadPhase::Idle);
    }

    #[test]
    fn test_busy_signal_around_failed_upload() {
        let mut phase = UploadPhase::Selecting;
        let mut busy = Vec::new();

        assert!(begin_request(&mut phase, UploadPhase::Uploading, |b| busy.push(b)));
        let outcome = apply_upload_result(
            &mut UploadedFiles::default(),
            1,
            Err(ApiError::Network("offline".into())),
        );
        assert_eq!(outcome.sent_count, 0);
        end_request(&mut phase, 1, |b| busy.push(b));

        assert_eq!(busy, vec![true, false]);
        assert_eq!(phase, UploadPhase::Selecting);
    }

    #[test]
    fn test_busy_signal_around_failed_delete() {
        let mut phase = UploadPhase::Idle;
        let mut uploaded = UploadedFiles::from(files(&["a"]));
        let mut busy = Vec::new();

        assert!(begin_request(&mut phase, UploadPhase::Deleting, |b| busy.push(b)));
        assert_eq!(phase, UploadPhase::Deleting);
        apply_delete_result(
            &mut uploaded,
            "a",
            Err(ApiError::Status {
                status: 500,
                message: None,
            }),
        );
        end_request(&mut phase, 0, |b| busy.push(b));

        assert_eq!(busy, vec![true, false]);
        assert_eq!(phase, UploadPhase::Idle);
        assert_eq!(ids(&uploaded), vec!["a"]);
    }

    #[test]
    fn test_second_request_rejected_while_busy() {
        let mut phase = UploadPhase::Idle;
        let mut busy = Vec::new();

        assert!(begin_request(&mut phase, UploadPhase::Deleting, |b| busy.push(b)));
        assert!(!begin_request(&mut phase, UploadPhase::Uploading, |b| busy.push(b)));

        assert_eq!(phase, UploadPhase::Deleting);
        assert_eq!(busy, vec![true]);
    }

    #[test]
    fn test_delete_success_removes_exactly_one() {
        let mut uploaded = UploadedFiles::from(files(&["a", "b", "c"]));
        let notice = apply_delete_result(&mut uploaded, "b", Ok(()));
        assert_eq!(ids(&uploaded), vec!["a", "c"]);
        assert_eq!(notice, Notice::success(DELETE_SUCCESS));
    }

    #[test]
    fn test_delete_not_found_leaves_list() {
        let mut uploaded = UploadedFiles::from(files(&["a", "b"]));
        let notice = apply_delete_result(
            &mut uploaded,
            "missing",
            Err(ApiError::Status {
                status: 404,
                message: Some("Document not found".into()),
            }),
        );
        assert_eq!(ids(&uploaded), vec!["a", "b"]);
        assert_eq!(notice, Notice::error(DELETE_FAILURE));
    }

    #[test]
    fn test_phase_after_request() {
        assert_eq!(UploadPhase::settled(0), UploadPhase::Idle);
        assert_eq!(UploadPhase::settled(2), UploadPhase::Selecting);
        assert!(UploadPhase::Uploading.is_busy());
        assert!(UploadPhase::Deleting.is_busy());
        assert!(!UploadPhase::Selecting.is_busy());
    }
}
