use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

type Listener = Rc<dyn Fn()>;

/// Subscription list for a single logical signal ("pose changed").
///
/// Emitters do not know who is listening; the dials and the DOM field
/// listeners emit, the transmitter subscribes.
#[derive(Default)]
pub struct ChangeSignal {
    listeners: RefCell<SmallVec<[Listener; 2]>>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn emit(&self) {
        // snapshot so a listener may subscribe while we iterate
        let listeners: SmallVec<[Listener; 2]> = self.listeners.borrow().iter().cloned().collect();
        for l in listeners {
            l();
        }
    }
}
