use crate::surface::{parse_number, NumericSurface};
use serde::Serialize;

/// One outbound pose: three positions and three rotations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PoseSnapshot {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl PoseSnapshot {
    pub fn from_array([x, y, z, rx, ry, rz]: [f64; 6]) -> Self {
        Self { x, y, z, rx, ry, rz }
    }
}

/// Anything that can produce the current pose on demand.
pub trait PoseSource {
    fn read(&self) -> PoseSnapshot;
}

/// Reads the six value surfaces (x, y, z, rx, ry, rz) into a snapshot.
/// A surface that was not found reads as 0.
pub struct PoseReader<S: NumericSurface> {
    sources: [Option<S>; 6],
}

impl<S: NumericSurface> PoseReader<S> {
    pub fn new(positions: [Option<S>; 3], rotations: [Option<S>; 3]) -> Self {
        let [x, y, z] = positions;
        let [rx, ry, rz] = rotations;
        Self {
            sources: [x, y, z, rx, ry, rz],
        }
    }

    pub fn missing_count(&self) -> usize {
        self.sources.iter().filter(|s| s.is_none()).count()
    }
}

impl<S: NumericSurface> PoseSource for PoseReader<S> {
    fn read(&self) -> PoseSnapshot {
        let mut values = [0.0_f64; 6];
        for (slot, src) in values.iter_mut().zip(self.sources.iter()) {
            *slot = src.as_ref().map(|s| parse_number(&s.read_raw())).unwrap_or(0.0);
        }
        PoseSnapshot::from_array(values)
    }
}
