//! Upload progress reporting

/// Where an upload stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadStatus {
    /// Parts are in flight; progress stays within [0, 90]
    Uploading,
    /// The service durably finalized the object; progress is 100
    Complete,
    /// The upload failed; progress resets to 0
    Error,
}

/// A progress event delivered to the caller's sink.
///
/// Events are transient; a later event supersedes an earlier one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UploadProgress {
    pub status: UploadStatus,
    /// Percentage in [0, 100]
    pub progress: f64,
}

/// Progress sink callback type
pub type ProgressCallback = Box<dyn Fn(UploadProgress) + Send + Sync>;

/// Forwards progress events to an optional caller-supplied sink.
///
/// A missing sink is legal; every emit is then a no-op. The reporter never
/// filters or retries events.
pub(crate) struct ProgressReporter {
    sink: Option<ProgressCallback>,
}

impl ProgressReporter {
    pub(crate) fn new(sink: Option<ProgressCallback>) -> Self {
        Self { sink }
    }

    pub(crate) fn uploading(&self, progress: f64) {
        self.emit(UploadProgress {
            status: UploadStatus::Uploading,
            progress,
        });
    }

    pub(crate) fn complete(&self) {
        self.emit(UploadProgress {
            status: UploadStatus::Complete,
            progress: 100.0,
        });
    }

    pub(crate) fn error(&self) {
        self.emit(UploadProgress {
            status: UploadStatus::Error,
            progress: 0.0,
        });
    }

    fn emit(&self, event: UploadProgress) {
        if let Some(sink) = &self.sink {
            sink(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn missing_sink_is_a_no_op() {
        let reporter = ProgressReporter::new(None);
        reporter.uploading(30.0);
        reporter.complete();
        reporter.error();
    }

    #[test]
    fn forwards_events_in_emission_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter = ProgressReporter::new(Some(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        })));

        reporter.uploading(45.0);
        reporter.complete();

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                UploadProgress {
                    status: UploadStatus::Uploading,
                    progress: 45.0
                },
                UploadProgress {
                    status: UploadStatus::Complete,
                    progress: 100.0
                },
            ]
        );
    }
}
