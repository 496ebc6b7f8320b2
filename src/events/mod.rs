pub mod fields;
pub mod pointer;

pub use fields::wire_value_surfaces;
pub use pointer::{wire_dial, PanelDial};
