use crate::dom::{self, Readout};
use crate::signal::ChangeSignal;
use std::rc::Rc;
use web_sys as web;

/// Forward `input` and `change` events of every value surface to the
/// pose-changed signal.
pub fn wire_value_surfaces(surfaces: &[&Readout], changed: &Rc<ChangeSignal>) {
    for surface in surfaces {
        for event in ["input", "change"] {
            let changed = changed.clone();
            dom::add_listener(surface.event_target(), event, move |_ev: web::Event| {
                changed.emit();
            });
        }
    }
}
