//! The viewer boundary.
//!
//! Rendering lives outside this workspace. A [`Viewer`] receives display
//! requests; what it does with them is its own business.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ViewerResult;
use crate::request::{DisplayKind, DisplayRequest};

/// An external 3D viewer accepting display requests.
pub trait Viewer {
    /// Hands a request to the viewer. Requests are fire-and-forget.
    fn submit(&mut self, request: DisplayRequest) -> ViewerResult<()>;
}

/// Viewer that only logs a summary of each request.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogViewer;

impl Viewer for LogViewer {
    fn submit(&mut self, request: DisplayRequest) -> ViewerResult<()> {
        let colored = request.items.iter().filter(|i| i.color.is_some()).count();
        log::info!(
            "display {}: {} particle(s), {} colored, voxel scale {} '{}'",
            request.kind,
            request.len(),
            colored,
            request.calibration.scale(),
            request.calibration.unit()
        );
        if request.kind == DisplayKind::Surfaces {
            log::debug!("surface triangles: {}", request.triangle_count());
        }
        Ok(())
    }
}

/// Viewer that keeps every request it receives.
///
/// Clones share the same storage, so a handle kept by the caller sees the
/// requests submitted through a clone handed to a manager.
#[derive(Debug, Default, Clone)]
pub struct RecordingViewer {
    requests: Rc<RefCell<Vec<DisplayRequest>>>,
}

impl RecordingViewer {
    /// Creates an empty recording viewer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded requests.
    pub fn requests(&self) -> Vec<DisplayRequest> {
        self.requests.borrow().clone()
    }

    /// Returns the most recent request, if any.
    pub fn last(&self) -> Option<DisplayRequest> {
        self.requests.borrow().last().cloned()
    }

    /// Returns the most recent request of the given kind, if any.
    pub fn last_of(&self, kind: DisplayKind) -> Option<DisplayRequest> {
        self.requests
            .borrow()
            .iter()
            .rev()
            .find(|r| r.kind == kind)
            .cloned()
    }

    /// Number of recorded requests.
    pub fn len(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.requests.borrow().is_empty()
    }

    /// Forgets all recorded requests.
    pub fn clear(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl Viewer for RecordingViewer {
    fn submit(&mut self, request: DisplayRequest) -> ViewerResult<()> {
        log::debug!("recorded {} request ({} items)", request.kind, request.len());
        self.requests.borrow_mut().push(request);
        Ok(())
    }
}
