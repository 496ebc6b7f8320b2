use crate::constants::{PEER_HOST, PEER_PATH, PEER_PORT, PEER_RELIABLE, PEER_SECURE};
use crate::pose::PoseSnapshot;
use crate::transmit::PoseChannel;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// PeerJS, loaded by the page as a global `Peer` constructor.
#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    pub type Peer;

    #[wasm_bindgen(constructor, catch)]
    fn new(id: &JsValue, options: &JsValue) -> Result<Peer, JsValue>;

    #[wasm_bindgen(method, js_name = on)]
    fn on_event(this: &Peer, event: &str, callback: &js_sys::Function);

    #[wasm_bindgen(method, js_name = connect)]
    fn connect_to(this: &Peer, id: &str, options: &JsValue) -> DataConnection;

    #[derive(Clone, Debug)]
    pub type DataConnection;

    #[wasm_bindgen(method, getter)]
    fn open(this: &DataConnection) -> bool;

    #[wasm_bindgen(method, catch, js_name = send)]
    fn send_value(this: &DataConnection, data: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = on)]
    fn on_conn_event(this: &DataConnection, event: &str, callback: &js_sys::Function);
}

#[derive(Serialize)]
struct PeerOptions<'a> {
    host: &'a str,
    port: u16,
    path: &'a str,
    secure: bool,
}

#[derive(Serialize)]
struct ConnectOptions {
    reliable: bool,
}

fn on_peer(peer: &Peer, event: &str, handler: impl FnMut(JsValue) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
    peer.on_event(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn on_conn(conn: &DataConnection, event: &str, handler: impl FnMut(JsValue) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
    conn.on_conn_event(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Create the local peer against the configured signalling server.
pub fn create_peer() -> anyhow::Result<Peer> {
    let options = serde_wasm_bindgen::to_value(&PeerOptions {
        host: PEER_HOST,
        port: PEER_PORT,
        path: PEER_PATH,
        secure: PEER_SECURE,
    })
    .map_err(|e| anyhow::anyhow!("peer options: {}", e))?;
    Peer::new(&JsValue::UNDEFINED, &options).map_err(|e| anyhow::anyhow!("new Peer: {:?}", e))
}

/// Once the local peer is registered, dial `target` and hand the open
/// connection to `on_open`. Errors are logged; nothing is retried.
pub fn connect_when_ready(peer: &Peer, target: &'static str, on_open: impl Fn(PeerChannel) + 'static) {
    let peer_for_open = peer.clone();
    let on_open = std::rc::Rc::new(on_open);
    on_peer(peer, "open", move |id: JsValue| {
        log::info!("[peer] open as {}", id.as_string().unwrap_or_default());
        let options = match serde_wasm_bindgen::to_value(&ConnectOptions {
            reliable: PEER_RELIABLE,
        }) {
            Ok(o) => o,
            Err(e) => {
                log::error!("[peer] connect options: {}", e);
                return;
            }
        };
        let conn = peer_for_open.connect_to(target, &options);

        let conn_for_open = conn.clone();
        let on_open = on_open.clone();
        on_conn(&conn, "open", move |_| {
            log::info!("[peer] connected to {}", target);
            (*on_open)(PeerChannel {
                conn: conn_for_open.clone(),
            });
        });
        on_conn(&conn, "error", move |err: JsValue| {
            log::error!("[peer] connection error: {:?}", err);
        });
        on_conn(&conn, "close", move |_| {
            log::warn!("[peer] connection to {} closed", target);
        });
    });

    on_peer(peer, "error", |err: JsValue| {
        log::error!("[peer] error: {:?}", err);
    });
}

/// Open PeerJS data connection carrying poses.
#[derive(Clone, Debug)]
pub struct PeerChannel {
    conn: DataConnection,
}

impl PoseChannel for PeerChannel {
    fn is_open(&self) -> bool {
        self.conn.open()
    }

    fn send(&self, pose: &PoseSnapshot) {
        let payload = match serde_wasm_bindgen::to_value(pose) {
            Ok(v) => v,
            Err(e) => {
                log::error!("[peer] encode pose: {}", e);
                return;
            }
        };
        if let Err(e) = self.conn.send_value(&payload) {
            log::error!("[peer] send failed: {:?}", e);
        }
    }
}
