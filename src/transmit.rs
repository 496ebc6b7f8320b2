use crate::pose::{PoseSnapshot, PoseSource};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// "Run once before the next frame" capability of the host.
pub trait FrameScheduler {
    /// Returns false if the task could not be scheduled and will never run.
    fn schedule_once(&self, task: Box<dyn FnOnce()>) -> bool;
}

/// Outbound side of the peer connection, as the transmitter sees it.
pub trait PoseChannel {
    fn is_open(&self) -> bool;
    /// Fire-and-forget.
    fn send(&self, pose: &PoseSnapshot);
}

/// Coalesces pose changes into at most one send per frame.
///
/// Owns the connection handle and the pending-send flag; shared by `Rc` with
/// every listener that reports a change.
pub struct FrameTransmitter<C, S, P>
where
    C: PoseChannel + 'static,
    S: FrameScheduler + 'static,
    P: PoseSource + 'static,
{
    channel: RefCell<Option<C>>,
    scheduler: S,
    source: P,
    pending: Cell<bool>,
    sent: Cell<u64>,
}

impl<C, S, P> FrameTransmitter<C, S, P>
where
    C: PoseChannel + 'static,
    S: FrameScheduler + 'static,
    P: PoseSource + 'static,
{
    pub fn new(scheduler: S, source: P) -> Rc<Self> {
        Rc::new(Self {
            channel: RefCell::new(None),
            scheduler,
            source,
            pending: Cell::new(false),
            sent: Cell::new(0),
        })
    }

    /// Install the connection once it has opened.
    pub fn attach(&self, channel: C) {
        *self.channel.borrow_mut() = Some(channel);
    }

    pub fn is_open(&self) -> bool {
        self.channel.borrow().as_ref().map(|c| c.is_open()).unwrap_or(false)
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    pub fn sent_count(&self) -> u64 {
        self.sent.get()
    }

    /// Read and send immediately, bypassing coalescing. Used to seed the
    /// remote side when the connection opens.
    pub fn send_now(&self) -> bool {
        let channel = self.channel.borrow();
        match channel.as_ref() {
            Some(c) if c.is_open() => {
                c.send(&self.source.read());
                self.sent.set(self.sent.get() + 1);
                true
            }
            _ => false,
        }
    }

    /// Report that some pose input changed.
    pub fn notify_change(self: &Rc<Self>) {
        if !self.is_open() || self.pending.get() {
            return;
        }
        self.pending.set(true);
        let this = Rc::clone(self);
        if !self.scheduler.schedule_once(Box::new(move || this.flush())) {
            self.pending.set(false);
        }
    }

    fn flush(&self) {
        // cleared before reading so a change during the send books a new frame
        self.pending.set(false);
        if !self.send_now() {
            log::debug!("[panel] channel closed before frame; pose dropped");
        }
    }
}
