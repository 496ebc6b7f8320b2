use crate::dial::DialFace;
use crate::surface::{tag_has_value, value_property_text, NumericSurface};
use glam::DVec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Attach `handler` for `event` on `target` and leak the closure for the
/// lifetime of the page. Non-passive so handlers may call `prevent_default`.
pub fn add_listener<E>(target: &web::EventTarget, event: &str, mut handler: impl FnMut(E) + 'static)
where
    E: JsCast + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

// ---------------- Value surfaces ----------------

/// A value-bearing element, classified once when it is looked up.
#[derive(Clone, Debug)]
pub enum Readout {
    /// Read and written through text content.
    TextDisplay(web::Element),
    /// Read and written through its `value` property (`<input>`, `<select>`,
    /// `<textarea>`, `<output>` and the other value-bearing elements).
    ValueInput(web::Element),
}

impl Readout {
    pub fn from_element(el: web::Element) -> Self {
        let has_value = tag_has_value(&el.tag_name())
            || js_sys::Reflect::has(&el, &"value".into()).unwrap_or(false);
        if has_value {
            Readout::ValueInput(el)
        } else {
            Readout::TextDisplay(el)
        }
    }

    pub fn by_id(document: &web::Document, id: &str) -> Option<Self> {
        let found = document.get_element_by_id(id).map(Self::from_element);
        if found.is_none() {
            log::warn!("[panel] missing #{}; it will read as 0", id);
        }
        found
    }

    pub fn event_target(&self) -> &web::EventTarget {
        match self {
            Readout::TextDisplay(el) | Readout::ValueInput(el) => el,
        }
    }
}

impl NumericSurface for Readout {
    fn read_raw(&self) -> String {
        match self {
            Readout::TextDisplay(el) => el.text_content().unwrap_or_default(),
            Readout::ValueInput(el) => {
                let v = js_sys::Reflect::get(el, &"value".into()).unwrap_or(JsValue::UNDEFINED);
                value_property_text(v.as_string(), v.as_f64())
            }
        }
    }

    fn write_text(&self, text: &str) {
        match self {
            Readout::TextDisplay(el) => el.set_text_content(Some(text)),
            // text content would wipe a <select>'s options; `value` alone is enough
            Readout::ValueInput(el) => {
                if let Err(e) = js_sys::Reflect::set(el, &"value".into(), &JsValue::from_str(text)) {
                    log::warn!("[panel] could not set value on #{}: {:?}", el.id(), e);
                }
            }
        }
    }
}

// ---------------- Dial face ----------------

#[derive(Clone, Debug)]
pub struct KnobFace {
    el: web::HtmlElement,
}

impl KnobFace {
    /// Wrap the knob element and stop touch drags from scrolling the page.
    pub fn new(el: web::HtmlElement) -> Self {
        _ = el.style().set_property("touch-action", "none");
        Self { el }
    }

    pub fn element(&self) -> &web::HtmlElement {
        &self.el
    }
}

impl DialFace for KnobFace {
    fn pivot(&self) -> DVec2 {
        let rect = self.el.get_bounding_client_rect();
        DVec2::new(
            rect.left() + rect.width() / 2.0,
            rect.top() + rect.height() / 2.0,
        )
    }

    fn rotate_to(&self, degrees: i64) {
        _ = self
            .el
            .style()
            .set_property("transform", &format!("rotate({}deg)", degrees));
    }
}
