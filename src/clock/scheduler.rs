/// Token for one armed frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Host hook that delivers one-shot per-frame callbacks.
///
/// A request arms exactly one future callback. Cancelling a handle that already fired or was
/// never issued must be harmless.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }
}

/// In-process scheduler driven by the caller; used for offline rendering and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    armed: Vec<FrameHandle>,
    requests: u64,
    cancellations: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of armed callbacks not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.armed.len()
    }

    pub fn is_armed(&self, handle: FrameHandle) -> bool {
        self.armed.contains(&handle)
    }

    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Cancellations that actually disarmed something.
    pub fn cancellations(&self) -> u64 {
        self.cancellations
    }

    /// Consume the oldest armed callback, as a host would just before invoking it.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.armed.is_empty() {
            None
        } else {
            Some(self.armed.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.requests += 1;
        self.armed.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(i) = self.armed.iter().position(|h| *h == handle) {
            self.armed.remove(i);
            self.cancellations += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/scheduler.rs"]
mod tests;
