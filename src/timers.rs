use crate::WebSequencer;
use fnv::FnvHashMap;
use gloo_timers::callback::{Interval, Timeout};
use haunt_core::{TimerEvent, TimerHost, TimerId};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

struct PendingTimeout {
    id: TimerId,
    live: Rc<Cell<bool>>,
    _handle: Timeout,
}

/// `setTimeout`/`setInterval` host delivering events to the sequencer.
///
/// Timeouts are flagged dead on fire or cancel and only dropped later,
/// from `once`, so a callback never drops its own closure.
pub struct WebTimers {
    target: Weak<RefCell<WebSequencer>>,
    next_id: u64,
    intervals: FnvHashMap<TimerId, Interval>,
    timeouts: Vec<PendingTimeout>,
}

fn deliver(target: &Weak<RefCell<WebSequencer>>, event: TimerEvent) {
    let Some(seq) = target.upgrade() else {
        return;
    };
    match seq.try_borrow_mut() {
        Ok(mut seq) => seq.on_timer(event),
        Err(_) => log::warn!("[jumpscare] {:?} fired while sequencer busy", event),
    };
}

impl WebTimers {
    pub fn new(target: Weak<RefCell<WebSequencer>>) -> Self {
        Self {
            target,
            next_id: 0,
            intervals: FnvHashMap::default(),
            timeouts: Vec::new(),
        }
    }

    fn next_id(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId(self.next_id)
    }
}

impl TimerHost for WebTimers {
    fn once(&mut self, delay_ms: u32, event: TimerEvent) -> TimerId {
        self.timeouts.retain(|t| t.live.get());
        let id = self.next_id();
        let live = Rc::new(Cell::new(true));
        let target = self.target.clone();
        let flag = live.clone();
        let handle = Timeout::new(delay_ms, move || {
            if flag.replace(false) {
                deliver(&target, event);
            }
        });
        self.timeouts.push(PendingTimeout {
            id,
            live,
            _handle: handle,
        });
        id
    }

    fn repeat(&mut self, period_ms: u32, event: TimerEvent) -> TimerId {
        let id = self.next_id();
        let target = self.target.clone();
        let handle = Interval::new(period_ms, move || deliver(&target, event));
        self.intervals.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        // dropping an Interval clears it
        if self.intervals.remove(&id).is_some() {
            return;
        }
        if let Some(t) = self.timeouts.iter().find(|t| t.id == id) {
            t.live.set(false);
        }
    }
}
