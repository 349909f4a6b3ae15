//! In-memory window platform that records every call

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::PlatformError;
use crate::math::Size;
use crate::platform::{SurfaceId, WindowPlatform};
use crate::position::Placement;

/// One call made against the platform
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum PlatformCall {
    Add { surface: SurfaceId, placement: Placement },
    Remove { surface: SurfaceId },
    Update { surface: SurfaceId, placement: Placement },
    OpenHostApp,
}

/// Surface table kept in memory, with switchable failures
pub struct RecordingPlatform {
    display: Cell<Size>,
    bottom_inset: Cell<Option<f32>>,
    attached: RefCell<BTreeMap<SurfaceId, Placement>>,
    calls: RefCell<Vec<PlatformCall>>,
    fail_adds: Cell<bool>,
    fail_host_app: Cell<bool>,
}

impl RecordingPlatform {
    /// Create a platform with the given display and no inset data
    pub fn new(display: Size) -> Self {
        Self {
            display: Cell::new(display),
            bottom_inset: Cell::new(None),
            attached: RefCell::new(BTreeMap::new()),
            calls: RefCell::new(Vec::new()),
            fail_adds: Cell::new(false),
            fail_host_app: Cell::new(false),
        }
    }

    pub fn with_bottom_inset(self, inset: Option<f32>) -> Self {
        self.bottom_inset.set(inset);
        self
    }

    /// Change the display size (simulates rotation)
    pub fn set_display_size(&self, display: Size) {
        self.display.set(display);
    }

    pub fn set_bottom_inset(&self, inset: Option<f32>) {
        self.bottom_inset.set(inset);
    }

    /// Make every following `add_surface` fail
    pub fn set_fail_adds(&self, fail: bool) {
        self.fail_adds.set(fail);
    }

    /// Make every following `open_host_app` fail
    pub fn set_fail_host_app(&self, fail: bool) {
        self.fail_host_app.set(fail);
    }

    /// Attach a surface without recording a call (simulates a stale surface)
    pub fn attach_externally(&self, surface: SurfaceId) {
        self.attached.borrow_mut().insert(surface, Placement::default());
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Last placement applied to an attached surface
    pub fn placement_of(&self, surface: SurfaceId) -> Option<Placement> {
        self.attached.borrow().get(&surface).copied()
    }

    pub fn add_count(&self, surface: SurfaceId) -> usize {
        self.count(|call| matches!(call, PlatformCall::Add { surface: s, .. } if *s == surface))
    }

    pub fn remove_count(&self, surface: SurfaceId) -> usize {
        self.count(|call| matches!(call, PlatformCall::Remove { surface: s } if *s == surface))
    }

    pub fn update_count(&self, surface: SurfaceId) -> usize {
        self.count(|call| matches!(call, PlatformCall::Update { surface: s, .. } if *s == surface))
    }

    pub fn host_app_opens(&self) -> usize {
        self.count(|call| matches!(call, PlatformCall::OpenHostApp))
    }

    fn count(&self, predicate: impl Fn(&PlatformCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }
}

impl WindowPlatform for RecordingPlatform {
    fn add_surface(&self, surface: SurfaceId, placement: Placement) -> Result<(), PlatformError> {
        self.calls.borrow_mut().push(PlatformCall::Add { surface, placement });
        if self.fail_adds.get() {
            return Err(PlatformError::Other("add rejected".into()));
        }
        let mut attached = self.attached.borrow_mut();
        if attached.contains_key(&surface) {
            return Err(PlatformError::AlreadyAttached(surface));
        }
        attached.insert(surface, placement);
        Ok(())
    }

    fn remove_surface(&self, surface: SurfaceId) -> Result<(), PlatformError> {
        self.calls.borrow_mut().push(PlatformCall::Remove { surface });
        match self.attached.borrow_mut().remove(&surface) {
            Some(_) => Ok(()),
            None => Err(PlatformError::NotAttached(surface)),
        }
    }

    fn update_placement(&self, surface: SurfaceId, placement: Placement) -> Result<(), PlatformError> {
        self.calls.borrow_mut().push(PlatformCall::Update { surface, placement });
        match self.attached.borrow_mut().get_mut(&surface) {
            Some(current) => {
                *current = placement;
                Ok(())
            }
            None => Err(PlatformError::NotAttached(surface)),
        }
    }

    fn is_attached(&self, surface: SurfaceId) -> bool {
        self.attached.borrow().contains_key(&surface)
    }

    fn display_size(&self) -> Size {
        self.display.get()
    }

    fn bottom_inset(&self) -> Option<f32> {
        self.bottom_inset.get()
    }

    fn open_host_app(&self) -> Result<(), PlatformError> {
        self.calls.borrow_mut().push(PlatformCall::OpenHostApp);
        if self.fail_host_app.get() {
            return Err(PlatformError::HostAppUnavailable("no launcher".into()));
        }
        Ok(())
    }
}
