//! Shift-register chain models.
//!
//! Behavioural models of the two register types on the fixture boards. Both react to pin
//! edges reported by the bench:
//! 1. **SIPO ('595):** Shifts the serial input on a rising shift clock, clears the shift stage
//!    while CLR is low, and copies the shift stage to the outputs on a rising register clock.
//! 2. **PISO ('165):** Captures its parallel inputs while PL is low, presents the current bit
//!    on SO, and advances to the next bit on a rising shift clock.
//!
//! Bits are kept in wire order: index 0 is the first bit shifted in (SIPO) or out (PISO).

use std::collections::VecDeque;

use crate::common::{Level, Pin};
use crate::io::{InputPorts, OutputPorts};

/// A serial-in/parallel-out chain driven by the fixture.
#[derive(Debug, Clone)]
pub struct SipoChain {
    /// Name used to look the chain up on the bench.
    name: &'static str,
    /// Pins of the chain.
    ports: OutputPorts,
    /// Number of register stages.
    capacity: usize,
    /// Shift stage; the front is the oldest bit.
    shift: VecDeque<bool>,
    /// Output stage as of the last register clock.
    latched: Vec<bool>,
    /// Rising edges seen on the shift clock.
    shift_clocks: usize,
    /// Rising edges seen on the register clock.
    latches: usize,
}

impl SipoChain {
    /// Creates an empty chain of `capacity` stages.
    pub fn new(name: &'static str, ports: OutputPorts, capacity: usize) -> Self {
        Self {
            name,
            ports,
            capacity,
            shift: std::iter::repeat_n(false, capacity).collect(),
            latched: vec![false; capacity],
            shift_clocks: 0,
            latches: 0,
        }
    }

    /// Name of the chain.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Pins of the chain.
    pub const fn ports(&self) -> &OutputPorts {
        &self.ports
    }

    /// Bits presented on the register outputs, in wire order.
    pub fn latched(&self) -> &[bool] {
        &self.latched
    }

    /// Bits currently in the shift stage, in wire order.
    pub fn shifted(&self) -> Vec<bool> {
        self.shift.iter().copied().collect()
    }

    /// Rising edges seen on the shift clock.
    pub const fn shift_clocks(&self) -> usize {
        self.shift_clocks
    }

    /// Rising edges seen on the register clock.
    pub const fn latches(&self) -> usize {
        self.latches
    }

    /// Reacts to a write on one of the chain's lines.
    ///
    /// `level_of` returns the level of any pin after the write.
    pub(super) fn on_write(
        &mut self,
        pin: Pin,
        previous: Level,
        level: Level,
        level_of: impl Fn(Pin) -> Level,
    ) {
        let rising = previous == Level::Low && level == Level::High;
        if pin == self.ports.clr && level == Level::Low {
            self.clear();
        }
        if pin == self.ports.sck && rising {
            self.shift_clocks += 1;
            if level_of(self.ports.clr).is_high() {
                self.shift.push_back(level_of(self.ports.si).is_high());
                while self.shift.len() > self.capacity {
                    let _ = self.shift.pop_front();
                }
            }
        }
        if pin == self.ports.rclk && rising {
            self.latches += 1;
            self.latched = self.shifted();
        }
    }

    fn clear(&mut self) {
        self.shift.iter_mut().for_each(|bit| *bit = false);
    }
}

/// A parallel-in/serial-out chain sampled by the fixture.
#[derive(Debug, Clone)]
pub struct PisoChain {
    /// Name used to look the chain up on the bench.
    name: &'static str,
    /// Pins of the chain.
    ports: InputPorts,
    /// Levels on the parallel inputs, in wire order.
    inputs: Vec<bool>,
    /// Bits captured by the last parallel load.
    loaded: Vec<bool>,
    /// Index of the bit currently on SO.
    cursor: usize,
    /// Rising edges seen on the shift clock.
    shift_clocks: usize,
    /// Falling edges seen on PL.
    loads: usize,
}

impl PisoChain {
    /// Creates a chain of `len` stages with every parallel input low.
    pub fn new(name: &'static str, ports: InputPorts, len: usize) -> Self {
        Self {
            name,
            ports,
            inputs: vec![false; len],
            loaded: vec![false; len],
            cursor: 0,
            shift_clocks: 0,
            loads: 0,
        }
    }

    /// Name of the chain.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Pins of the chain.
    pub const fn ports(&self) -> &InputPorts {
        &self.ports
    }

    /// Levels on the parallel inputs, in wire order.
    pub fn inputs(&self) -> &[bool] {
        &self.inputs
    }

    /// Rising edges seen on the shift clock.
    pub const fn shift_clocks(&self) -> usize {
        self.shift_clocks
    }

    /// Falling edges seen on PL.
    pub const fn loads(&self) -> usize {
        self.loads
    }

    /// Drives the parallel inputs. Missing positions read low, extra ones are dropped.
    pub fn set_inputs(&mut self, bits: &[bool]) {
        let len = self.inputs.len();
        self.inputs = bits.iter().copied().chain(std::iter::repeat(false)).take(len).collect();
    }

    /// Level on SO. Past the last stage the serial input of the chain (tied low) shows up.
    pub fn serial_out(&self) -> Level {
        Level::from(self.loaded.get(self.cursor).copied().unwrap_or(false))
    }

    /// Reacts to a write on one of the chain's lines.
    ///
    /// `level_of` returns the level of any pin after the write.
    pub(super) fn on_write(
        &mut self,
        pin: Pin,
        previous: Level,
        level: Level,
        level_of: impl Fn(Pin) -> Level,
    ) {
        let rising = previous == Level::Low && level == Level::High;
        if pin == self.ports.pl && level == Level::Low {
            if previous == Level::High {
                self.loads += 1;
            }
            self.loaded.clone_from(&self.inputs);
            self.cursor = 0;
        }
        if pin == self.ports.sck && rising {
            self.shift_clocks += 1;
            if level_of(self.ports.pl).is_high() {
                self.cursor += 1;
            }
        }
    }
}
