/// Application shell state machine
///
/// Owns the selected image, the in-flight flag, the last result and the last
/// error. The iced layer forwards user intents here and runs whatever
/// request `submit` hands back.
///
/// Phases:
/// - `Idle` - no image
/// - `Ready` - image selected, nothing in flight, no outcome yet
/// - `Busy` - request in flight
/// - `Succeeded` / `Failed` - the latest request settled
///
/// Every dispatch gets a new `RequestId`. A settlement is applied only if it
/// carries the latest id and the shell is still busy; selection and reset
/// supersede whatever is in flight.

use super::data::ClassificationResponse;
use super::selection::SelectedImage;
use crate::error::ClassifyError;

/// Prefix of every user-visible classification failure
pub const FAILURE_PREFIX: &str = "Classification failed: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Ready,
    Busy,
    Succeeded,
    Failed,
}

/// Work the caller must perform after a successful `submit`
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub id: RequestId,
    pub image: SelectedImage,
}

#[derive(Debug, Default)]
pub struct Shell {
    selected: Option<SelectedImage>,
    busy: bool,
    result: Option<ClassificationResponse>,
    error: Option<String>,
    /// Id of the most recently dispatched request
    latest: u64,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.busy {
            Phase::Busy
        } else if self.selected.is_none() {
            Phase::Idle
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.result.is_some() {
            Phase::Succeeded
        } else {
            Phase::Ready
        }
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn result(&self) -> Option<&ClassificationResponse> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the classify action is reachable
    pub fn can_submit(&self) -> bool {
        matches!(self.phase(), Phase::Ready | Phase::Succeeded | Phase::Failed)
    }

    /// Selection callback from the image selector. `None` means the image was
    /// removed.
    pub fn select(&mut self, image: Option<SelectedImage>) {
        match &image {
            Some(image) => log::info!("Selected {:?}", image),
            None => log::info!("Selection cleared"),
        }
        self.supersede();
        self.selected = image;
        self.result = None;
        self.error = None;
    }

    /// Start a classification of the selected image
    ///
    /// Returns None (and changes nothing) when there is no image or a request
    /// is already in flight.
    pub fn submit(&mut self) -> Option<Dispatch> {
        if !self.can_submit() {
            log::debug!("Submit ignored in phase {:?}", self.phase());
            return None;
        }
        let image = self.selected.clone()?;

        self.latest += 1;
        let id = RequestId(self.latest);
        self.busy = true;
        self.error = None;

        log::info!("Dispatching request {:?} for {}", id, image.name);
        Some(Dispatch { id, image })
    }

    /// Apply the outcome of request `id`. Returns false when the outcome was
    /// stale and dropped.
    pub fn settle(
        &mut self,
        id: RequestId,
        outcome: Result<ClassificationResponse, ClassifyError>,
    ) -> bool {
        if !self.busy || id != RequestId(self.latest) {
            log::debug!("Dropping stale settlement for {:?}", id);
            return false;
        }

        self.busy = false;
        match outcome {
            Ok(response) => {
                log::info!(
                    "Request {:?} succeeded: {} ({:.1}%)",
                    id,
                    response.top_prediction.style,
                    response.top_prediction.confidence * 100.0
                );
                self.result = Some(response);
                self.error = None;
            }
            Err(err) => {
                log::warn!("Request {:?} failed: {}", id, err);
                self.result = None;
                self.error = Some(format!("{FAILURE_PREFIX}{err}"));
            }
        }
        true
    }

    /// Back to `Idle`, discarding everything
    pub fn reset(&mut self) {
        log::info!("Reset");
        self.supersede();
        self.selected = None;
        self.result = None;
        self.error = None;
    }

    /// Invalidate the in-flight request, if any
    fn supersede(&mut self) {
        if self.busy {
            log::debug!("Superseding request {:?}", RequestId(self.latest));
            self.busy = false;
        }
    }
}
