//! Input decoder.
//!
//! Samples a PISO chain: the parallel-load line is strobed to capture the module's outputs,
//! then every layout bit is shifted out in wire order, reserved positions included. Nothing is
//! cached; every `read` samples the hardware again.

use tracing::debug;

use super::InputSnapshot;
use crate::io::{InputPorts, PinDriver, SampleEdge};
use crate::layout::BitLayout;

/// Reads snapshots of type `I` from one PISO chain.
#[derive(Debug, Clone)]
pub struct InputDecoder<I: InputSnapshot> {
    ports: InputPorts,
    layout: BitLayout<I::Signal>,
    edge: SampleEdge,
}

impl<I: InputSnapshot> InputDecoder<I> {
    /// Creates a decoder for a validated layout.
    ///
    /// # Arguments
    ///
    /// * `ports` - Pins of the PISO chain.
    /// * `layout` - Wire order of the chain.
    /// * `edge` - Sampling point used for every bit of this chain.
    pub const fn new(ports: InputPorts, layout: BitLayout<I::Signal>, edge: SampleEdge) -> Self {
        Self {
            ports,
            layout,
            edge,
        }
    }

    /// Pins of the chain.
    pub const fn ports(&self) -> &InputPorts {
        &self.ports
    }

    /// Wire layout of the chain.
    pub const fn layout(&self) -> &BitLayout<I::Signal> {
        &self.layout
    }

    /// Sampling point used for every bit.
    pub const fn edge(&self) -> SampleEdge {
        self.edge
    }

    /// Sets pin directions and idle levels.
    pub fn initialize_hardware<P: PinDriver + ?Sized>(&self, pins: &mut P) {
        self.ports.initialize_hardware(pins);
    }

    /// Captures the module's current outputs and returns them as a new snapshot.
    pub fn read<P: PinDriver + ?Sized>(&self, pins: &mut P) -> I {
        debug!(layout = self.layout.name(), bits = self.layout.len(), "read");
        self.ports.parallel_load(pins);
        let values = self
            .layout
            .deserialize(|| self.ports.shift_in_bit(pins, self.edge));
        I::from_values(&values)
    }
}
