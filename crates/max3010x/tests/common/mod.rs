#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{
    ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation,
};
use max3010x::{
    Clock, Config, Max3010x, Register, DEFAULT_ADDRESS, EXPECTED_PART_ID,
    FIFO_DEPTH,
};

// ---------------------------------------------------------------------------
// Fake time
// ---------------------------------------------------------------------------

/// Nanosecond timeline shared by a [`FakeClock`] and a [`FakeDelay`], so
/// sleeping through the delay is what moves the clock.
#[derive(Clone, Default)]
pub struct Timeline(Rc<Cell<u64>>);

impl Timeline {
    pub fn now_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }

    pub fn set_ms(&self, ms: u64) {
        self.0.set(ms * 1_000_000);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.0.set(self.0.get() + ms * 1_000_000);
    }

    pub fn clock(&self) -> FakeClock {
        FakeClock(self.clone())
    }

    pub fn delay(&self) -> FakeDelay {
        FakeDelay(self.clone())
    }
}

pub struct FakeClock(Timeline);

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.0.now_ms()
    }
}

pub struct FakeDelay(Timeline);

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        let t = &self.0 .0;
        t.set(t.get() + u64::from(ns));
    }
}

// ---------------------------------------------------------------------------
// Simulated MAX3010x
// ---------------------------------------------------------------------------

pub struct DeviceState {
    pub registers: [u8; 256],
    pub fifo: VecDeque<u8>,
    /// Bytes per FIFO record, used to move the read pointer.
    pub record_len: usize,
    /// MODE_CONFIG reads before RESET clears; `None` never clears.
    pub reset_latency: Option<u32>,
    reset_reads_left: Option<u32>,
    /// Whether a TEMP_EN write raises DIE_TEMP_RDY.
    pub temp_ready: bool,
    pub die_temp: (u8, u8),
    /// FIFO bursts that succeed before every following one fails.
    pub fifo_bursts_before_fault: Option<usize>,
    pub bus_down: bool,
    pub fifo_reads: Vec<usize>,
    pub writes: Vec<(u8, u8)>,
    pointer: u8,
}

impl Default for DeviceState {
    fn default() -> Self {
        let mut registers = [0u8; 256];
        registers[Register::PART_ID as usize] = EXPECTED_PART_ID;
        registers[Register::REVISION_ID as usize] = 0x03;
        Self {
            registers,
            fifo: VecDeque::new(),
            record_len: 6,
            reset_latency: Some(2),
            reset_reads_left: None,
            temp_ready: true,
            die_temp: (0x19, 0x04),
            fifo_bursts_before_fault: None,
            bus_down: false,
            fifo_reads: Vec::new(),
            writes: Vec::new(),
            pointer: 0,
        }
    }
}

impl DeviceState {
    pub fn reg(&self, reg: Register) -> u8 {
        self.registers[reg as usize]
    }

    pub fn set_reg(&mut self, reg: Register, value: u8) {
        self.registers[reg as usize] = value;
    }

    /// Queues one record of raw channel words, bits above 18 included.
    pub fn push_record(&mut self, words: &[u32]) {
        for word in words {
            self.fifo.extend(&word.to_be_bytes()[1..]);
        }
        let wr = self.reg(Register::FIFO_WR_PTR);
        self.set_reg(Register::FIFO_WR_PTR, (wr + 1) % FIFO_DEPTH);
    }

    pub fn writes_to(&self, reg: Register) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(r, _)| *r == reg as u8)
            .map(|(_, v)| *v)
            .collect()
    }

    fn write(&mut self, reg: u8, value: u8) {
        self.writes.push((reg, value));
        self.registers[reg as usize] = value;

        if reg == Register::MODE_CONFIG as u8 && value & 0x40 != 0 {
            self.reset_reads_left = self.reset_latency;
        }
        if reg == Register::DIE_TEMP_CONFIG as u8 && value & 0x01 != 0 {
            self.registers[reg as usize] &= !0x01;
            if self.temp_ready {
                self.registers[Register::INT_STATUS_2 as usize] |= 0x02;
                self.set_reg(Register::DIE_TEMP_INT, self.die_temp.0);
                self.set_reg(Register::DIE_TEMP_FRAC, self.die_temp.1);
            }
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), ErrorKind> {
        let reg = self.pointer;

        if reg == Register::FIFO_DATA as u8 {
            if let Some(left) = self.fifo_bursts_before_fault.as_mut() {
                if *left == 0 {
                    return Err(ErrorKind::Other);
                }
                *left -= 1;
            }
            self.fifo_reads.push(buf.len());
            for byte in buf.iter_mut() {
                *byte = self.fifo.pop_front().unwrap_or(0);
            }
            let records = (buf.len() / self.record_len) as u8;
            let rd = self.reg(Register::FIFO_RD_PTR);
            self.set_reg(Register::FIFO_RD_PTR, (rd + records) % FIFO_DEPTH);
            return Ok(());
        }

        if reg == Register::MODE_CONFIG as u8 {
            if let Some(left) = self.reset_reads_left.as_mut() {
                if *left == 0 {
                    self.registers[reg as usize] &= !0x40;
                    self.reset_reads_left = None;
                } else {
                    *left -= 1;
                }
            }
        }

        buf.fill(self.registers[reg as usize]);

        if reg == Register::INT_STATUS_2 as u8 {
            self.registers[reg as usize] = 0;
        }
        Ok(())
    }
}

/// I2C endpoint backed by a shared [`DeviceState`].
#[derive(Clone, Default)]
pub struct SimulatedDevice(pub Rc<RefCell<DeviceState>>);

impl SimulatedDevice {
    pub fn state(&self) -> std::cell::RefMut<'_, DeviceState> {
        self.0.borrow_mut()
    }
}

impl ErrorType for SimulatedDevice {
    type Error = ErrorKind;
}

impl I2c for SimulatedDevice {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        if state.bus_down {
            return Err(ErrorKind::Other);
        }
        if address != DEFAULT_ADDRESS {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if let Some((&reg, values)) = bytes.split_first() {
                        state.pointer = reg;
                        for &value in values {
                            state.write(reg, value);
                        }
                    }
                }
                Operation::Read(buf) => state.read(buf)?,
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub type SimDriver<const N: usize = 4> =
    Max3010x<SimulatedDevice, FakeDelay, FakeClock, N>;

pub fn make_driver<const N: usize>(
) -> (SimDriver<N>, SimulatedDevice, Timeline) {
    let sim = SimulatedDevice::default();
    let timeline = Timeline::default();
    let driver =
        Max3010x::new(sim.clone(), timeline.delay(), timeline.clock());
    (driver, sim, timeline)
}

/// A driver that already went through `setup` with `config`.
pub fn ready_driver<const N: usize>(
    config: Config,
) -> (SimDriver<N>, SimulatedDevice, Timeline) {
    let (mut driver, sim, timeline) = make_driver::<N>();
    driver.setup(config).expect("setup against simulated device");
    sim.state().writes.clear();
    (driver, sim, timeline)
}
