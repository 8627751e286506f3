//! Timer plumbing shared by the jumpscare sequencer and its hosts.
//!
//! The browser host maps these onto `setTimeout`/`setInterval`; tests use
//! [`VirtualTimers`], which only moves when told to.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// What a fired timer means to the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    FlashRevert,
    PulseTick,
    Revert,
}

pub trait TimerHost {
    /// Fire `event` once after `delay_ms`.
    fn once(&mut self, delay_ms: u32, event: TimerEvent) -> TimerId;
    /// Fire `event` every `period_ms` until cancelled.
    fn repeat(&mut self, period_ms: u32, event: TimerEvent) -> TimerId;
    /// Cancelling an id that already fired or was cancelled is a no-op.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Clone, Debug)]
struct Pending {
    id: TimerId,
    due_ms: u64,
    seq: u64,
    period_ms: Option<u32>,
    event: TimerEvent,
}

/// Deterministic in-memory timer host with a manual millisecond clock.
#[derive(Clone, Debug, Default)]
pub struct VirtualTimers {
    now_ms: u64,
    next_id: u64,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl VirtualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn active_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Pop the earliest timer due at or before `until_ms` and move the
    /// clock to its fire time. Repeating timers are rescheduled.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerEvent> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.seq))
            .map(|(i, _)| i)?;
        let fired = self.pending.swap_remove(idx);
        self.now_ms = self.now_ms.max(fired.due_ms);
        if let Some(period) = fired.period_ms {
            let seq = self.bump_seq();
            self.pending.push(Pending {
                due_ms: fired.due_ms + period as u64,
                seq,
                ..fired.clone()
            });
        }
        Some(fired.event)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn schedule(&mut self, delay_ms: u32, period_ms: Option<u32>, event: TimerEvent) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let seq = self.bump_seq();
        self.pending.push(Pending {
            id,
            due_ms: self.now_ms + delay_ms as u64,
            seq,
            period_ms,
            event,
        });
        id
    }
}

impl TimerHost for VirtualTimers {
    fn once(&mut self, delay_ms: u32, event: TimerEvent) -> TimerId {
        self.schedule(delay_ms, None, event)
    }

    fn repeat(&mut self, period_ms: u32, event: TimerEvent) -> TimerId {
        // periods below 1ms are clamped, as browsers do
        let period = period_ms.max(1);
        self.schedule(period, Some(period), event)
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|p| p.id != id);
    }
}
