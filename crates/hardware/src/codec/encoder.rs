//! Output encoder.
//!
//! Pushes an `OutputState` into a SIPO chain: every layout bit is shifted in wire order and the
//! register clock is pulsed once at the end, so the module under test sees the whole new
//! pattern at the same instant.

use tracing::debug;

use super::OutputState;
use crate::io::{OutputPorts, PinDriver};
use crate::layout::BitLayout;

/// Drives one SIPO chain from states of type `O`.
#[derive(Debug, Clone)]
pub struct OutputEncoder<O: OutputState> {
    ports: OutputPorts,
    layout: BitLayout<O::Signal>,
}

impl<O: OutputState> OutputEncoder<O> {
    /// Creates an encoder for a validated layout.
    ///
    /// # Arguments
    ///
    /// * `ports` - Pins of the SIPO chain.
    /// * `layout` - Wire order of the chain.
    pub const fn new(ports: OutputPorts, layout: BitLayout<O::Signal>) -> Self {
        Self { ports, layout }
    }

    /// Pins of the chain.
    pub const fn ports(&self) -> &OutputPorts {
        &self.ports
    }

    /// Wire layout of the chain.
    pub const fn layout(&self) -> &BitLayout<O::Signal> {
        &self.layout
    }

    /// Sets pin directions and idle levels and clears the chain.
    pub fn initialize_hardware<P: PinDriver + ?Sized>(&self, pins: &mut P) {
        self.ports.initialize_hardware(pins);
    }

    /// Wire bits of `state`, in shift order.
    pub fn bits(&self, state: &O) -> Vec<bool> {
        self.layout.serialize(|s| state.signal(s))
    }

    /// Shifts `state` into the chain and latches it onto the outputs.
    pub fn push<P: PinDriver + ?Sized>(&self, pins: &mut P, state: &O) {
        debug!(layout = self.layout.name(), bits = self.layout.len(), "push");
        self.layout.for_each_bit(
            |s| state.signal(s),
            |bit| self.ports.shift_out_bit(pins, bit),
        );
        self.ports.latch(pins);
    }
}
