#![no_std]
//! Driver for the Maxim MAX30102 / MAX30105 pulse-oximetry sensor.
//!
//! [`Max3010x`] drains the on-chip FIFO into a small host-side ring and feeds
//! the readings to a beat estimator and a ratio-of-ratios SpO2 estimator.
//! The bus, the delay and the millisecond clock are injected, and every
//! polling loop is bounded by a millisecond budget.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

pub use crate::beat::{
    BeatDetector, BeatEstimator, BeatEvent, PeakBeatDetector, RateAverage,
};
pub use crate::errors::{Error, Operation};
pub use crate::fifo::{Channel, Sample, SampleBuffer, STORAGE_SIZE};
pub use crate::interface::DeviceInterface;
pub use crate::registers::*;
pub use crate::spo2::{Spo2Estimator, Spo2Reading};
pub use crate::time::Clock;
#[cfg(feature = "embassy-time")]
pub use crate::time::EmbassyClock;

pub mod beat;
pub mod errors;
pub mod fifo;
pub mod interface;
pub mod registers;
pub mod spo2;
pub mod time;

/// Budget for the RESET bit to self-clear.
pub const RESET_TIMEOUT_MS: u64 = 100;
/// Budget for a die temperature conversion.
pub const TEMPERATURE_TIMEOUT_MS: u64 = 100;
/// Budget the blocking sample getters wait for fresh data.
pub const SAMPLE_TIMEOUT_MS: u64 = 250;
/// Sleep between polls so the bus is not saturated.
pub const POLL_INTERVAL_MS: u32 = 1;
/// Transfer limit of common two-wire buffers (32 bytes on AVR, 64 on SAMD).
pub const DEFAULT_MAX_TRANSFER: usize = 32;

// Largest possible drain: a full FIFO of three-channel records.
const MAX_BURST: usize = FIFO_DEPTH as usize * fifo::record_len(3);
const TEMP_FRACTION_STEP: f32 = 0.0625;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedAmplitude {
    pub red: u8,
    pub ir: u8,
    pub green: u8,
    pub proximity: u8,
}

impl Default for LedAmplitude {
    /// 0x7F is about 25.4 mA.
    fn default() -> Self {
        Self { red: 0x7F, ir: 0x7F, green: 0x7F, proximity: 0x7F }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub sample_average: SampleAverage,
    pub fifo_rollover: bool,
    pub led_mode: LedMode,
    pub adc_range: AdcRange,
    pub sample_rate: SampleRate,
    pub pulse_width: PulseWidth,
    pub amplitude: LedAmplitude,
    /// Slot 1 to slot 4, only sequenced in [`LedMode::MultiLed`].
    pub slots: [SlotDevice; 4],
    /// Longest single read the bus transport accepts, in bytes.
    pub max_transfer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_average: SampleAverage::Avg4,
            fifo_rollover: true,
            led_mode: LedMode::RedIr,
            adc_range: AdcRange::Na16384,
            sample_rate: SampleRate::Sps200,
            pulse_width: PulseWidth::Us411,
            amplitude: LedAmplitude::default(),
            slots: [
                SlotDevice::RedLed,
                SlotDevice::IrLed,
                SlotDevice::None,
                SlotDevice::None,
            ],
            max_transfer: DEFAULT_MAX_TRANSFER,
        }
    }
}

/// Identity and reset outcome reported by [`Max3010x::setup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    pub part_id: u8,
    pub revision_id: u8,
    /// `false` if the RESET bit had not cleared within the budget; setup
    /// carried on regardless.
    pub reset_completed: bool,
}

/// Number of 3-byte words per FIFO record for a mode and slot assignment.
pub fn active_led_count(mode: LedMode, slots: &[SlotDevice; 4]) -> u8 {
    match mode {
        LedMode::RedOnly => 1,
        LedMode::RedIr => 2,
        LedMode::MultiLed => {
            let populated = slots.iter().filter(|s| s.is_active()).count();
            populated.clamp(1, 3) as u8
        }
    }
}

pub struct Max3010x<
    I2C,
    D,
    C,
    const N: usize = STORAGE_SIZE,
    B = PeakBeatDetector,
> {
    interface: DeviceInterface<I2C>,
    delay: D,
    clock: C,
    config: Config,
    active_leds: u8,
    buffer: SampleBuffer<N>,
    beat: BeatEstimator<B>,
    spo2: Spo2Estimator,
    revision_id: Option<u8>,
    ready: bool,
}

impl<I2C, D, C, const N: usize> Max3010x<I2C, D, C, N>
where
    I2C: I2c,
    D: DelayNs,
    C: Clock,
{
    /// Side-effect free; nothing touches the bus before [`Self::setup`].
    pub fn new(i2c: I2C, delay: D, clock: C) -> Self {
        Self::with_interface(DeviceInterface::new(i2c), delay, clock)
    }

    pub fn with_interface(
        interface: DeviceInterface<I2C>,
        delay: D,
        clock: C,
    ) -> Self {
        Self::with_detector(interface, delay, clock, PeakBeatDetector::new())
    }
}

impl<I2C, D, C, const N: usize, B> Max3010x<I2C, D, C, N, B>
where
    I2C: I2c,
    D: DelayNs,
    C: Clock,
    B: BeatDetector,
{
    /// Like [`Max3010x::with_interface`], with a caller-supplied beat
    /// detector behind [`Self::get_bpm`].
    pub fn with_detector(
        interface: DeviceInterface<I2C>,
        delay: D,
        clock: C,
        detector: B,
    ) -> Self {
        let config = Config::default();
        Self {
            interface,
            delay,
            clock,
            active_leds: active_led_count(config.led_mode, &config.slots),
            config,
            buffer: SampleBuffer::new(),
            beat: BeatEstimator::new(detector),
            spo2: Spo2Estimator::new(),
            revision_id: None,
            ready: false,
        }
    }

    /// Give the bus, delay and clock back.
    pub fn release(self) -> (I2C, D, C) {
        (self.interface.release(), self.delay, self.clock)
    }

    /// Verifies the part, resets it and applies `config`.
    ///
    /// A part ID mismatch fails before any configuration register is written
    /// and leaves the driver unusable until `setup` succeeds.
    pub fn setup(
        &mut self,
        config: Config,
    ) -> Result<DeviceInfo, Error<I2C::Error>> {
        self.ready = false;

        if config.max_transfer < fifo::record_len(3) {
            return Err(Error::InvalidTransferSize(config.max_transfer));
        }

        let part_id = self.part_id()?;
        if part_id != EXPECTED_PART_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("MAX3010x part ID mismatch: {=u8:#x}", part_id);
            return Err(Error::PartIdMismatch(part_id));
        }
        let revision_id = self.read_revision_id()?;

        let reset_completed = match self.soft_reset() {
            Ok(()) => true,
            Err(Error::Timeout(Operation::Reset)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("MAX3010x reset did not complete, continuing");
                false
            }
            Err(e) => return Err(e),
        };

        self.apply_config(config)?;
        self.clear_fifo()?;

        self.buffer.reset();
        self.beat.reset();
        self.spo2.reset();
        self.ready = true;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "MAX3010x rev {=u8} ready, {=u8} active LEDs",
            revision_id,
            self.active_leds
        );

        Ok(DeviceInfo { part_id, revision_id, reset_completed })
    }

    fn apply_config(
        &mut self,
        config: Config,
    ) -> Result<(), Error<I2C::Error>> {
        self.set_fifo_average(config.sample_average)?;
        if config.fifo_rollover {
            self.enable_fifo_rollover()?;
        } else {
            self.disable_fifo_rollover()?;
        }
        self.set_led_mode(config.led_mode)?;
        self.set_adc_range(config.adc_range)?;
        self.set_sample_rate(config.sample_rate)?;
        self.set_pulse_width(config.pulse_width)?;

        self.set_pulse_amplitude_red(config.amplitude.red)?;
        self.set_pulse_amplitude_ir(config.amplitude.ir)?;
        self.set_pulse_amplitude_green(config.amplitude.green)?;
        self.set_pulse_amplitude_proximity(config.amplitude.proximity)?;

        // Unused slots are written too, so the shadow copy matches the part
        // even when the reset timed out.
        for (slot, device) in (1u8..).zip(config.slots) {
            self.enable_slot(slot, device)?;
        }

        self.config.max_transfer = config.max_transfer;
        Ok(())
    }

    /// Sets the RESET bit and waits for the part to clear it.
    pub fn soft_reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.interface.bit_masked_update(
            Register::MODE_CONFIG,
            !ModeConfig::RESET.bits(),
            ModeConfig::RESET.bits(),
        )?;

        let done = self.poll_until(RESET_TIMEOUT_MS, |dev| {
            let mode = dev.interface.read_register(Register::MODE_CONFIG)?;
            Ok(!ModeConfig::from_bits_retain(mode).reset())
        })?;

        if done {
            Ok(())
        } else {
            Err(Error::Timeout(Operation::Reset))
        }
    }

    /// Repeats `done` every [`POLL_INTERVAL_MS`] until it holds or
    /// `budget_ms` have passed. Returns whether it held.
    fn poll_until<F>(
        &mut self,
        budget_ms: u64,
        mut done: F,
    ) -> Result<bool, Error<I2C::Error>>
    where
        F: FnMut(&mut Self) -> Result<bool, Error<I2C::Error>>,
    {
        let start = self.clock.now_ms();
        loop {
            if done(self)? {
                return Ok(true);
            }
            if self.clock.now_ms().saturating_sub(start) >= budget_ms {
                return Ok(false);
            }
            self.delay.delay_ms(POLL_INTERVAL_MS);
        }
    }

    pub fn part_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.interface.read_register(Register::PART_ID)
    }

    pub fn read_revision_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        let id = self.interface.read_register(Register::REVISION_ID)?;
        self.revision_id = Some(id);
        Ok(id)
    }

    /// Revision read during the last [`Self::setup`].
    pub fn revision_id(&self) -> Option<u8> {
        self.revision_id
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Words per FIFO record under the current LED configuration.
    pub fn active_leds(&self) -> u8 {
        self.active_leds
    }

    pub fn interface(&mut self) -> &mut DeviceInterface<I2C> {
        &mut self.interface
    }

    //
    // Mode configuration
    //

    pub fn shutdown(&mut self) -> Result<(), Error<I2C::Error>> {
        self.interface.bit_masked_update(
            Register::MODE_CONFIG,
            !ModeConfig::SHDN.bits(),
            ModeConfig::SHDN.bits(),
        )
    }

    pub fn wake_up(&mut self) -> Result<(), Error<I2C::Error>> {
        self.interface.bit_masked_update(
            Register::MODE_CONFIG,
            !ModeConfig::SHDN.bits(),
            0,
        )
    }

    /// Selects which LEDs are sampled; the FIFO stride follows immediately.
    pub fn set_led_mode(
        &mut self,
        mode: LedMode,
    ) -> Result<(), Error<I2C::Error>> {
        self.interface.bit_masked_update(
            Register::MODE_CONFIG,
            !ModeConfig::MODE.bits(),
            mode as u8,
        )?;
        self.config.led_mode = mode;
        self.refresh_active_leds();
        Ok(())
    }

    //
    // Particle sensing configuration
    //

    pub fn set_adc_range(
        &mut self,
        range: AdcRange,
    ) -> Result<(), Error<I2C::Error>> {
        self.interface.bit_masked_update(
            Register::PARTICLE_CONFIG,
            !ParticleConfig::ADC_RGE.bits(),
            range as u8,
        )?;
        self.config.adc_range = range;
        Ok(())
    }

    pub fn set_sample_rate(
        &mut self,
        rate: SampleRate,
    ) -> Result<(), Error<I2C::Error>> {
        self.interface.bit_masked_update(
            Register::PARTICLE_CONFIG,
            !ParticleConfig::SR.bits(),
            rate as u8,
        )?;
        self.config.sample_rate = rate;
        Ok(())
    }

    pub fn set_pulse_width(
        &mut self,
        width: PulseWidth,
    ) -> Result<(), Error<I2C::Error>> {
        self.interface.bit_masked_update(
            Register::PARTICLE_CONFIG,
            !ParticleConfig::LED_PW.bits(),
            width as u8,
        )?;
        self.config.pulse_width = width;
        Ok(())
    }

    //
    // LED pulse amplitude, 0x00 = 0 mA up to 0xFF = 50 mA
    //

    pub fn set_pulse_amplitude_red(
        &mut self,
        amplitude: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.interface.write_register(Register::LED1_PA, amplitude)?;
        self.config.amplitude.red = amplitude;
        Ok(())
    }

    pub fn set_pulse_amplitude_ir(
        &mut self,
        amplitude: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.interface.write_register(Register::LED2_PA, amplitude)?;
        self.config.amplitude.ir = amplitude;
        Ok(())
    }

    pub fn set_pulse_amplitude_green(
        &mut self,
        amplitude: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.interface.write_register(Register::LED3_PA, amplitude)?;
        self.config.amplitude.green = amplitude;
        Ok(())
    }

    pub fn set_pulse_amplitude_proximity(
        &mut self,
        amplitude: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.interface.write_register(Register::PILOT_PA, amplitude)?;
        self.config.amplitude.proximity = amplitude;
        Ok(())
    }

    /// IR count (8 MSBs) that starts particle sensing mode.
    pub fn set_proximity_threshold(
        &mut self,
        thresh_msb: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.interface.write_register(Register::PROX_INT_THRESH, thresh_msb)
    }

    //
    // Multi-LED slots
    //

    /// Assigns `device` to slot 1 to 4.
    pub fn enable_slot(
        &mut self,
        slot: u8,
        device: SlotDevice,
    ) -> Result<(), Error<I2C::Error>> {
        let reg =
            Register::from_slot_number(slot).ok_or(Error::InvalidSlot(slot))?;
        let (mask, value) = if slot % 2 == 1 {
            (!MultiLedConfig::SLOT_LOW.bits(), device as u8)
        } else {
            (!MultiLedConfig::SLOT_HIGH.bits(), (device as u8) << 4)
        };

        self.interface.bit_masked_update(reg, mask, value)?;
        self.config.slots[usize::from(slot - 1)] = device;
        self.refresh_active_leds();
        Ok(())
    }

    pub fn disable_slots(&mut self) -> Result<(), Error<I2C::Error>> {
        self.interface.write_register(Register::MULTI_LED_CONFIG_1, 0)?;
        self.interface.write_register(Register::MULTI_LED_CONFIG_2, 0)?;
        self.config.slots = [SlotDevice::None; 4];
        self.refresh_active_leds();
        Ok(())
    }

    fn refresh_active_leds(&mut self) {
        self.active_leds =
            active_led_count(self.config.led_mode, &self.config.slots);
    }

    //
    // FIFO configuration
    //

    pub fn set_fifo_average(
        &mut self,
        average: SampleAverage,
    ) -> Result<(), Error<I2C::Error>> {
        self.interface.bit_masked_update(
            Register::FIFO_CONFIG,
            !FifoConfig::SMP_AVE.bits(),
            average as u8,
        )?;
        self.config.sample_average = average;
        Ok(())
    }

    pub fn enable_fifo_rollover(&mut self) -> Result<(), Error<I2C::Error>> {
        self.interface.bit_masked_update(
            Register::FIFO_CONFIG,
            !FifoConfig::FIFO_ROLLOVER_EN.bits(),
            FifoConfig::FIFO_ROLLOVER_EN.bits(),
        )?;
        self.config.fifo_rollover = true;
        Ok(())
    }

    pub fn disable_fifo_rollover(&mut self) -> Result<(), Error<I2C::Error>> {
        self.interface.bit_masked_update(
            Register::FIFO_CONFIG,
            !FifoConfig::FIFO_ROLLOVER_EN.bits(),
            0,
        )?;
        self.config.fifo_rollover = false;
        Ok(())
    }

    /// Free FIFO slots left when the almost-full interrupt fires; 0 means 32
    /// unread samples, 15 means 17.
    pub fn set_fifo_almost_full(
        &mut self,
        empty_slots: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.interface.bit_masked_update(
            Register::FIFO_CONFIG,
            !FifoConfig::FIFO_A_FULL.bits(),
            empty_slots & FifoConfig::FIFO_A_FULL.bits(),
        )
    }

    /// Zeroes the on-chip pointers and overflow counter.
    pub fn clear_fifo(&mut self) -> Result<(), Error<I2C::Error>> {
        self.interface.write_register(Register::FIFO_WR_PTR, 0)?;
        self.interface.write_register(Register::OVF_COUNTER, 0)?;
        self.interface.write_register(Register::FIFO_RD_PTR, 0)
    }

    pub fn get_write_pointer(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.interface.read_register(Register::FIFO_WR_PTR)
    }

    pub fn get_read_pointer(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.interface.read_register(Register::FIFO_RD_PTR)
    }

    /// Samples the part dropped since the counter was last cleared
    /// (saturates at 31). The host ring does not track overflow itself.
    pub fn fifo_overflow_count(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.interface.read_register(Register::OVF_COUNTER)
    }

    //
    // Interrupts
    //

    pub fn enable_interrupt(
        &mut self,
        interrupt: Interrupt,
    ) -> Result<(), Error<I2C::Error>> {
        let (reg, bit) = interrupt.enable_bit();
        self.interface.bit_masked_update(reg, !bit, bit)
    }

    pub fn disable_interrupt(
        &mut self,
        interrupt: Interrupt,
    ) -> Result<(), Error<I2C::Error>> {
        let (reg, bit) = interrupt.enable_bit();
        self.interface.bit_masked_update(reg, !bit, 0)
    }

    /// Reading clears the latched flags.
    pub fn read_interrupt_status_1(
        &mut self,
    ) -> Result<Interrupt1, Error<I2C::Error>> {
        let bits = self.interface.read_register(Register::INT_STATUS_1)?;
        Ok(Interrupt1::from_bits_retain(bits))
    }

    pub fn read_interrupt_status_2(
        &mut self,
    ) -> Result<Interrupt2, Error<I2C::Error>> {
        let bits = self.interface.read_register(Register::INT_STATUS_2)?;
        Ok(Interrupt2::from_bits_retain(bits))
    }

    //
    // Die temperature
    //

    /// One die temperature conversion, in degrees Celsius.
    pub fn read_temperature(&mut self) -> Result<f32, Error<I2C::Error>> {
        // Completion is only observable through DIE_TEMP_RDY.
        self.enable_interrupt(Interrupt::DieTempReady)?;
        self.interface.write_register(
            Register::DIE_TEMP_CONFIG,
            DieTempConfig::TEMP_EN.bits(),
        )?;

        let done = self.poll_until(TEMPERATURE_TIMEOUT_MS, |dev| {
            Ok(dev.read_interrupt_status_2()?.die_temp_ready())
        })?;
        if !done {
            return Err(Error::Timeout(Operation::DieTemperature));
        }

        let integer = self.interface.read_register(Register::DIE_TEMP_INT)?;
        // Reading the fraction clears DIE_TEMP_RDY.
        let fraction = self.interface.read_register(Register::DIE_TEMP_FRAC)?;

        Ok(f32::from(integer as i8)
            + f32::from(fraction) * TEMP_FRACTION_STEP)
    }

    pub fn read_temperature_f(&mut self) -> Result<f32, Error<I2C::Error>> {
        Ok(self.read_temperature()? * 1.8 + 32.0)
    }

    //
    // Sample streaming
    //

    /// Drains every record waiting in the on-chip FIFO into the ring.
    ///
    /// Bursts never exceed the configured transfer limit and never split a
    /// record. Samples are only committed once every burst has succeeded, so
    /// a bus fault leaves the ring untouched. Returns the number of records
    /// the device reported.
    pub fn check(&mut self) -> Result<u8, Error<I2C::Error>> {
        if !self.ready {
            return Err(Error::NotInitialized);
        }

        let read_ptr = self.get_read_pointer()?;
        let write_ptr = self.get_write_pointer()?;
        let pending = fifo::pending_samples(write_ptr, read_ptr);
        if pending == 0 {
            return Ok(0);
        }

        let active_leds = self.active_leds;
        let record_len = fifo::record_len(active_leds);
        let burst_len = fifo::burst_len(
            self.config.max_transfer.min(MAX_BURST),
            record_len,
        );

        // `pending` < FIFO_DEPTH, so the whole drain fits in `raw`.
        let mut raw = [0u8; MAX_BURST];
        let staged = &mut raw[..usize::from(pending) * record_len];

        for burst in staged.chunks_mut(burst_len) {
            #[cfg(feature = "defmt")]
            defmt::trace!("FIFO burst of {=usize} bytes", burst.len());

            self.interface.read_fifo(burst)?;
        }

        for record in staged.chunks_exact(record_len) {
            self.buffer.push(Sample::decode(record, active_leds));
        }

        Ok(pending)
    }

    /// Polls [`Self::check`] until it yields new records or `max_ms` pass.
    pub fn safe_check(&mut self, max_ms: u64) -> Result<u8, Error<I2C::Error>> {
        let mut found = 0;
        let done = self.poll_until(max_ms, |dev| {
            found = dev.check()?;
            Ok(found > 0)
        })?;

        if done {
            Ok(found)
        } else {
            Err(Error::Timeout(Operation::Sample))
        }
    }

    /// Records buffered on the host and not yet consumed.
    pub fn available(&self) -> usize {
        self.buffer.available()
    }

    /// Waits up to [`SAMPLE_TIMEOUT_MS`] for fresh data and returns the newest
    /// reading of `channel`.
    pub fn get_latest(
        &mut self,
        channel: Channel,
    ) -> Result<u32, Error<I2C::Error>> {
        self.safe_check(SAMPLE_TIMEOUT_MS)?;
        Ok(self.buffer.most_recent().channel(channel))
    }

    pub fn get_red(&mut self) -> Result<u32, Error<I2C::Error>> {
        self.get_latest(Channel::Red)
    }

    pub fn get_ir(&mut self) -> Result<u32, Error<I2C::Error>> {
        self.get_latest(Channel::Ir)
    }

    pub fn get_green(&mut self) -> Result<u32, Error<I2C::Error>> {
        self.get_latest(Channel::Green)
    }

    /// Oldest unconsumed reading of `channel`, no bus access.
    pub fn get_fifo(&self, channel: Channel) -> u32 {
        self.buffer.next_queued().channel(channel)
    }

    pub fn get_fifo_red(&self) -> u32 {
        self.get_fifo(Channel::Red)
    }

    pub fn get_fifo_ir(&self) -> u32 {
        self.get_fifo(Channel::Ir)
    }

    pub fn get_fifo_green(&self) -> u32 {
        self.get_fifo(Channel::Green)
    }

    /// Consumes the oldest buffered record, if any.
    pub fn next_sample(&mut self) {
        self.buffer.advance();
    }

    pub fn buffer(&self) -> &SampleBuffer<N> {
        &self.buffer
    }

    //
    // Measurements
    //

    /// Feeds one IR reading to the beat estimator, stamped with the clock.
    pub fn get_bpm(&mut self, ir: u32) -> BeatEvent {
        let now = self.clock.now_ms();
        self.beat.update(ir, now)
    }

    /// Feeds one red/IR pair to the SpO2 estimator and returns the current
    /// estimate.
    pub fn get_spo2(&mut self, red: u32, ir: u32) -> Spo2Reading {
        self.spo2.update(red, ir);
        self.spo2.reading()
    }

    pub fn beat_estimator(&mut self) -> &mut BeatEstimator<B> {
        &mut self.beat
    }

    pub fn spo2_estimator(&mut self) -> &mut Spo2Estimator {
        &mut self.spo2
    }
}
