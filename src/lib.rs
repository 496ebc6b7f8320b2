#![cfg(target_arch = "wasm32")]
use crate::constants::{DialLayout, DIAL_LAYOUTS, LOG_LEVEL, POSITION_FIELD_IDS, TARGET_PEER_ID};
use crate::dial::{DialConfig, DialController};
use crate::dom::{KnobFace, Readout};
use crate::events::PanelDial;
use crate::frame::AnimationFrameScheduler;
use crate::peer::PeerChannel;
use crate::pose::{PoseReader, PoseSource};
use crate::signal::ChangeSignal;
use crate::transmit::FrameTransmitter;
use anyhow::Context;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dial;
mod dom;
mod events;
mod frame;
mod peer;
mod pose;
mod signal;
mod surface;
mod transmit;

type PanelTransmitter = FrameTransmitter<PeerChannel, AnimationFrameScheduler, PoseReader<Readout>>;

/// Long-lived state of the page: the dials and the transmitter that owns the
/// connection.
struct Panel {
    dials: Vec<Rc<RefCell<PanelDial>>>,
    transmitter: Rc<PanelTransmitter>,
    peer: Option<peer::Peer>,
}

thread_local! {
    static PANEL: RefCell<Option<Panel>> = const { RefCell::new(None) };
}

fn build_dial(
    document: &web::Document,
    layout: &DialLayout,
    changed: &Rc<ChangeSignal>,
) -> anyhow::Result<(Rc<RefCell<PanelDial>>, Readout)> {
    let config = DialConfig::new(layout.min, layout.max, layout.value, layout.step)
        .with_context(|| format!("dial #{}", layout.knob_id))?;
    let knob = document
        .get_element_by_id(layout.knob_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", layout.knob_id))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not an HTML element: {:?}", layout.knob_id, e))?;
    let output = document
        .get_element_by_id(layout.output_id)
        .map(Readout::from_element)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", layout.output_id))?;
    let dial = DialController::new(config, KnobFace::new(knob), output.clone(), changed.clone());
    Ok((Rc::new(RefCell::new(dial)), output))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(LOG_LEVEL).ok();
    log::info!("pose-panel starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let changed = Rc::new(ChangeSignal::new());

    // Dials first so their readouts exist before the pose reader looks them up
    let mut dials = Vec::with_capacity(DIAL_LAYOUTS.len());
    let mut rotations: [Option<Readout>; 3] = [None, None, None];
    for (slot, layout) in rotations.iter_mut().zip(DIAL_LAYOUTS.iter()) {
        match build_dial(&document, layout, &changed) {
            Ok((dial, output)) => {
                events::wire_dial(dial.clone());
                dials.push(dial);
                *slot = Some(output);
            }
            Err(e) => log::error!("[dial] {:#}", e),
        }
    }
    let positions = POSITION_FIELD_IDS.map(|id| Readout::by_id(&document, id));

    let surfaces: Vec<&Readout> = positions.iter().chain(rotations.iter()).flatten().collect();
    events::wire_value_surfaces(&surfaces, &changed);

    let reader = PoseReader::new(positions, rotations);
    if reader.missing_count() > 0 {
        log::warn!("[panel] {} pose source(s) missing", reader.missing_count());
    }
    let transmitter = PanelTransmitter::new(AnimationFrameScheduler, reader);
    {
        let transmitter = transmitter.clone();
        changed.subscribe(move || transmitter.notify_change());
    }

    log::info!(
        "[panel] {} dial(s) ready, {} change listener(s), target {}",
        dials.len(),
        changed.listener_count(),
        TARGET_PEER_ID
    );
    // stored before connecting so the panel stays inspectable offline
    PANEL.with(|p| {
        *p.borrow_mut() = Some(Panel {
            dials,
            transmitter: transmitter.clone(),
            peer: None,
        })
    });

    let peer = peer::create_peer()?;
    peer::connect_when_ready(&peer, TARGET_PEER_ID, move |channel| {
        transmitter.attach(channel);
        transmitter.send_now();
    });
    PANEL.with(|p| {
        if let Some(panel) = p.borrow_mut().as_mut() {
            panel.peer = Some(peer);
        }
    });
    Ok(())
}

/// Whether the PeerJS peer was created; false means the panel runs offline.
#[wasm_bindgen]
pub fn has_peer() -> bool {
    PANEL.with(|p| p.borrow().as_ref().map(|panel| panel.peer.is_some()).unwrap_or(false))
}

/// Current pose as the transmitter would send it, for debugging from the
/// browser console.
#[wasm_bindgen]
pub fn current_pose() -> JsValue {
    PANEL.with(|p| {
        p.borrow()
            .as_ref()
            .and_then(|panel| {
                let pose = panel.transmitter.source().read();
                serde_wasm_bindgen::to_value(&pose).ok()
            })
            .unwrap_or(JsValue::NULL)
    })
}

/// Number of poses sent since startup.
#[wasm_bindgen]
pub fn sent_count() -> u32 {
    PANEL.with(|p| {
        p.borrow()
            .as_ref()
            .map(|panel| panel.transmitter.sent_count() as u32)
            .unwrap_or(0)
    })
}

/// Whether any dial is being dragged right now.
#[wasm_bindgen]
pub fn is_dragging() -> bool {
    PANEL.with(|p| {
        p.borrow()
            .as_ref()
            .map(|panel| panel.dials.iter().any(|d| d.borrow().is_dragging()))
            .unwrap_or(false)
    })
}
