use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LoopFlags: u8 {
        const RUNNING = 1 << 0;
        const SUSPENDED = 1 << 1;
        const SCHEDULED = 1 << 2;
        const HALTED = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDecision {
    /// Draw this frame and schedule the next one.
    Render,
    /// Page is hidden: skip drawing and don't reschedule until visible again.
    Suspend,
    /// Loop was stopped.
    Halt,
}

/// Scheduling state of the hero animation loop.
///
/// The browser side asks the gate what to do on every animation-frame
/// callback and on every `visibilitychange`; the gate itself never touches
/// the platform.
#[derive(Debug, Clone)]
pub struct LoopGate {
    flags: LoopFlags,
    frames: u64,
}

impl Default for LoopGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopGate {
    pub fn new() -> Self {
        Self {
            flags: LoopFlags::RUNNING,
            frames: 0,
        }
    }

    /// A gate that has not started yet. Stopping it first keeps it halted.
    pub fn idle() -> Self {
        Self {
            flags: LoopFlags::empty(),
            frames: 0,
        }
    }

    /// Moves an idle gate to running. Returns `false` once stopped.
    pub fn start(&mut self) -> bool {
        if self.is_halted() {
            return false;
        }
        self.flags.insert(LoopFlags::RUNNING);
        true
    }

    pub fn flags(&self) -> LoopFlags {
        self.flags
    }

    pub fn is_running(&self) -> bool {
        self.flags.contains(LoopFlags::RUNNING)
    }

    pub fn is_halted(&self) -> bool {
        self.flags.contains(LoopFlags::HALTED)
    }

    pub fn is_suspended(&self) -> bool {
        self.flags.contains(LoopFlags::SUSPENDED)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Records that a frame request is pending.
    pub fn mark_scheduled(&mut self) {
        self.flags.insert(LoopFlags::SCHEDULED);
    }

    pub fn on_frame(&mut self, page_hidden: bool) -> FrameDecision {
        self.flags.remove(LoopFlags::SCHEDULED);

        if !self.is_running() {
            return FrameDecision::Halt;
        }
        if page_hidden {
            self.flags.insert(LoopFlags::SUSPENDED);
            return FrameDecision::Suspend;
        }

        self.frames += 1;
        FrameDecision::Render
    }

    /// Returns `true` when the caller should schedule a frame to resume.
    pub fn on_visibility(&mut self, page_hidden: bool) -> bool {
        if page_hidden || !self.is_running() || !self.is_suspended() {
            return false;
        }
        self.flags.remove(LoopFlags::SUSPENDED);
        !self.flags.contains(LoopFlags::SCHEDULED)
    }

    /// Stops the loop. Returns `true` if a frame request was still pending
    /// and should be cancelled.
    pub fn stop(&mut self) -> bool {
        let pending = self.flags.contains(LoopFlags::SCHEDULED);
        self.flags = LoopFlags::HALTED;
        pending
    }
}
