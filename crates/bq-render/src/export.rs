//! Export orchestration.
//!
//! A rendered image may be delivered to several surfaces (file download,
//! clipboard, native share); each is an [`ExportSink`]. Delivery failures
//! are surfaced to the caller for retry, never swallowed.
//!
//! [`ExportScheduler`] enforces the one-render-in-flight rule per export
//! target: while a render is pending, newer requests for the same target
//! coalesce and only the latest survives. Two renders never interleave on
//! the same output surface.

use crate::images::ImageSource;
use crate::raster::{RenderError, RenderedImage, render_composition};
use bq_core::model::Arrangement;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("export delivery failed: {0}")]
    Delivery(String),
}

/// Destination for a finished export (file, clipboard, share sheet).
/// All sinks receive the same image value for one render.
pub trait ExportSink {
    fn deliver(&mut self, image: &RenderedImage) -> Result<(), ExportError>;
}

/// One pending export: what to render and under which label.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub label: String,
    pub arrangement: Arrangement,
}

#[derive(Debug, Default)]
struct TargetState {
    in_flight: bool,
    pending: Option<ExportRequest>,
}

/// Per-target render gate with queue-and-coalesce semantics.
///
/// Protocol: call [`submit`](Self::submit); if it returns the request,
/// run the render and call [`finish`](Self::finish) when done. `finish`
/// hands back the coalesced follow-up request, if any, which the caller
/// runs next under the same protocol.
#[derive(Debug, Default)]
pub struct ExportScheduler {
    targets: HashMap<String, TargetState>,
}

impl ExportScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a request for `target`. Returns it back when the target is
    /// idle (caller should render now); otherwise stores it as the sole
    /// pending request, replacing any earlier queued one.
    pub fn submit(&mut self, target: &str, request: ExportRequest) -> Option<ExportRequest> {
        let state = self.targets.entry(target.to_string()).or_default();
        if state.in_flight {
            if state.pending.replace(request).is_some() {
                log::debug!("coalesced stale export request for '{target}'");
            }
            None
        } else {
            state.in_flight = true;
            Some(request)
        }
    }

    /// Mark the in-flight render for `target` as done. Returns the
    /// coalesced next request, which is immediately in flight again.
    pub fn finish(&mut self, target: &str) -> Option<ExportRequest> {
        let state = self.targets.get_mut(target)?;
        match state.pending.take() {
            Some(next) => Some(next),
            None => {
                state.in_flight = false;
                None
            }
        }
    }

    pub fn is_idle(&self, target: &str) -> bool {
        self.targets.get(target).is_none_or(|s| !s.in_flight)
    }
}

/// Render a request and deliver the result to every sink.
///
/// Sinks are independent: a failure in one does not stop the others, and
/// the first failure is reported so the caller can retry.
pub fn run_export(
    request: &ExportRequest,
    images: &dyn ImageSource,
    sinks: &mut [&mut dyn ExportSink],
) -> Result<RenderedImage, ExportError> {
    let image = render_composition(&request.arrangement, &request.label, images)?;
    let mut first_failure = None;
    for sink in sinks.iter_mut() {
        if let Err(err) = sink.deliver(&image) {
            log::warn!("export sink failed: {err}");
            first_failure.get_or_insert(err);
        }
    }
    match first_failure {
        Some(err) => Err(err),
        None => Ok(image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(label: &str) -> ExportRequest {
        ExportRequest {
            label: label.to_string(),
            arrangement: Arrangement::default(),
        }
    }

    #[test]
    fn idle_target_runs_immediately() {
        let mut scheduler = ExportScheduler::new();
        let granted = scheduler.submit("download", request("first"));
        assert_eq!(granted.map(|r| r.label), Some("first".to_string()));
        assert!(!scheduler.is_idle("download"));

        assert!(scheduler.finish("download").is_none());
        assert!(scheduler.is_idle("download"));
    }

    #[test]
    fn requests_coalesce_to_the_latest() {
        let mut scheduler = ExportScheduler::new();
        scheduler.submit("download", request("first")).unwrap();

        // Both arrive while the first render is in flight; only the
        // newest survives.
        assert!(scheduler.submit("download", request("second")).is_none());
        assert!(scheduler.submit("download", request("third")).is_none());

        let next = scheduler.finish("download").unwrap();
        assert_eq!(next.label, "third");

        // The coalesced request is in flight until finished too.
        assert!(!scheduler.is_idle("download"));
        assert!(scheduler.finish("download").is_none());
        assert!(scheduler.is_idle("download"));
    }

    #[test]
    fn targets_are_independent() {
        let mut scheduler = ExportScheduler::new();
        scheduler.submit("download", request("a")).unwrap();
        assert!(scheduler.submit("clipboard", request("b")).is_some());
    }
}
