use crate::dial::{client_point, DialController};
use crate::dom::{self, KnobFace, Readout};
use glam::DVec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

pub type PanelDial = DialController<KnobFace, Readout>;

/// `clientX`/`clientY` as the browser reports them; web-sys truncates to i32.
fn fractional_client(obj: &JsValue) -> Option<(f64, f64)> {
    let read = |key: &str| {
        js_sys::Reflect::get(obj, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_f64())
    };
    read("clientX").zip(read("clientY"))
}

#[inline]
fn mouse_point(ev: &web::MouseEvent) -> DVec2 {
    client_point(fractional_client(ev), (ev.client_x(), ev.client_y()))
}

/// First active touch, if any.
#[inline]
fn touch_point(ev: &web::TouchEvent) -> Option<DVec2> {
    ev.touches()
        .get(0)
        .map(|t| client_point(fractional_client(&t), (t.client_x(), t.client_y())))
}

/// Start on the knob; move and release on the window so a drag survives
/// leaving the knob's bounds.
pub fn wire_dial(dial: Rc<RefCell<PanelDial>>) {
    let knob: web::EventTarget = dial.borrow().face().element().clone().into();
    wire_gesture_start(&knob, &dial);
    if let Some(wnd) = web::window() {
        wire_gesture_move(&wnd, &dial);
        wire_gesture_end(&wnd, &dial);
    }
}

fn wire_gesture_start(knob: &web::EventTarget, dial: &Rc<RefCell<PanelDial>>) {
    let d = dial.clone();
    dom::add_listener(knob, "mousedown", move |ev: web::MouseEvent| {
        ev.prevent_default();
        d.borrow_mut().start_gesture(mouse_point(&ev));
    });

    let d = dial.clone();
    dom::add_listener(knob, "touchstart", move |ev: web::TouchEvent| {
        ev.prevent_default();
        let p = touch_point(&ev).unwrap_or(DVec2::ZERO);
        d.borrow_mut().start_gesture(p);
    });
}

fn wire_gesture_move(wnd: &web::Window, dial: &Rc<RefCell<PanelDial>>) {
    let d = dial.clone();
    dom::add_listener(wnd, "mousemove", move |ev: web::MouseEvent| {
        d.borrow_mut().continue_gesture(mouse_point(&ev));
    });

    let d = dial.clone();
    dom::add_listener(wnd, "touchmove", move |ev: web::TouchEvent| {
        if let Some(p) = touch_point(&ev) {
            d.borrow_mut().continue_gesture(p);
        }
    });
}

fn wire_gesture_end(wnd: &web::Window, dial: &Rc<RefCell<PanelDial>>) {
    for event in ["mouseup", "touchend", "touchcancel"] {
        let d = dial.clone();
        dom::add_listener(wnd, event, move |_ev: web::Event| {
            d.borrow_mut().end_gesture();
        });
    }
}
