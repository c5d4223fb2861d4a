/// Identifies one arming of a [`Countdown`]. Ticks carrying a handle from an
/// earlier arming are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The handle no longer matches the armed countdown.
    Stale,
    Running(u32),
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    remaining: u32,
    generation: u64,
    armed: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the countdown, invalidating every handle handed out before.
    pub fn start(&mut self, seconds: u32) -> TimerHandle {
        self.generation += 1;
        self.remaining = seconds;
        self.armed = true;
        TimerHandle(self.generation)
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.armed = false;
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.armed.then_some(TimerHandle(self.generation))
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn tick(&mut self, handle: TimerHandle) -> Tick {
        if !self.armed || handle.0 != self.generation {
            return Tick::Stale;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.armed = false;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }
}
