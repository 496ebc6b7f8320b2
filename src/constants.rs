// Compile-time configuration for the control panel.

// Peer connection
pub const TARGET_PEER_ID: &str = "three-output-003"; // the rendering page registers under this id
pub const PEER_HOST: &str = "0.peerjs.com";
pub const PEER_PORT: u16 = 443;
pub const PEER_PATH: &str = "/";
pub const PEER_SECURE: bool = true;
pub const PEER_RELIABLE: bool = true;

// Logging
pub const LOG_LEVEL: log::Level = log::Level::Info;

// Positional fields, in x, y, z order
pub const POSITION_FIELD_IDS: [&str; 3] = ["position-x", "position-y", "position-z"];

/// Element ids and value range for one rotational dial.
#[derive(Clone, Copy, Debug)]
pub struct DialLayout {
    pub knob_id: &'static str,
    pub output_id: &'static str,
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub step: f64,
}

// Rotational dials, in rx, ry, rz order
pub const DIAL_LAYOUTS: [DialLayout; 3] = [
    DialLayout {
        knob_id: "dial00",
        output_id: "dial00-value",
        min: 0.0,
        max: 360.0,
        value: 90.0,
        step: 0.1,
    },
    DialLayout {
        knob_id: "dial01",
        output_id: "dial01-value",
        min: 0.0,
        max: 360.0,
        value: 90.0,
        step: 0.1,
    },
    DialLayout {
        knob_id: "dial02",
        output_id: "dial02-value",
        min: 0.0,
        max: 360.0,
        value: 90.0,
        step: 0.1,
    },
];
