//! Heart-rate estimation from the IR waveform.

/// IR counts below this mean nothing is resting on the sensor.
pub const FINGER_THRESHOLD: u32 = 500;
/// Beats kept in the rolling average.
pub const RATE_SIZE: usize = 4;
/// Accepted instantaneous rates lie strictly between these bounds.
pub const MIN_BPM: f32 = 20.0;
pub const MAX_BPM: f32 = 255.0;

/// Flags the sample at which a pulse occurred.
pub trait BeatDetector {
    fn check_for_beat(&mut self, sample: u32) -> bool;
}

impl<B: BeatDetector + ?Sized> BeatDetector for &mut B {
    fn check_for_beat(&mut self, sample: u32) -> bool {
        (**self).check_for_beat(sample)
    }
}

// Q15 half of a symmetric 23-tap low-pass, centre tap last.
const FIR_COEFFS: [i64; 12] = [
    172, 321, 579, 927, 1360, 1858, 2390, 2916, 3391, 3768, 4012, 4096,
];
const FIR_LEN: usize = 32;
const FIR_MASK: usize = FIR_LEN - 1;

/// Peak-based beat detector.
///
/// Removes the DC level, low-pass filters the remainder and reports a beat on
/// each rising zero crossing whose preceding peak-to-trough swing looks like
/// a pulse (strictly between 20 and 1000 filtered counts).
#[derive(Debug, Clone)]
pub struct PeakBeatDetector {
    ac_max: i32,
    ac_min: i32,
    signal_current: i32,
    signal_previous: i32,
    signal_min: i32,
    signal_max: i32,
    positive_edge: bool,
    negative_edge: bool,
    dc_register: i64,
    cbuf: [i32; FIR_LEN],
    offset: usize,
}

impl Default for PeakBeatDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PeakBeatDetector {
    pub const fn new() -> Self {
        Self {
            ac_max: 20,
            ac_min: -20,
            signal_current: 0,
            signal_previous: 0,
            signal_min: 0,
            signal_max: 0,
            positive_edge: false,
            negative_edge: false,
            dc_register: 0,
            cbuf: [0; FIR_LEN],
            offset: 0,
        }
    }

    /// Running DC level, Q15 exponential average with weight 1/16.
    fn average_dc_estimator(&mut self, x: u32) -> i32 {
        self.dc_register += ((i64::from(x) << 15) - self.dc_register) >> 4;
        (self.dc_register >> 15) as i32
    }

    fn low_pass_fir_filter(&mut self, din: i32) -> i32 {
        let tap = |offset: usize, back: usize| {
            (offset + FIR_LEN - back) & FIR_MASK
        };

        self.cbuf[self.offset] = din;
        let mut z = FIR_COEFFS[11] * i64::from(self.cbuf[tap(self.offset, 11)]);
        for (i, coeff) in FIR_COEFFS.iter().take(11).enumerate() {
            let pair = i64::from(self.cbuf[tap(self.offset, i)])
                + i64::from(self.cbuf[tap(self.offset, 22 - i)]);
            z += coeff * pair;
        }
        self.offset = (self.offset + 1) & FIR_MASK;

        (z >> 15) as i32
    }
}

impl BeatDetector for PeakBeatDetector {
    fn check_for_beat(&mut self, sample: u32) -> bool {
        let mut beat_detected = false;

        self.signal_previous = self.signal_current;
        let dc = self.average_dc_estimator(sample);
        self.signal_current = self.low_pass_fir_filter(sample as i32 - dc);

        // Rising edge: close out the previous cycle.
        if self.signal_previous < 0 && self.signal_current >= 0 {
            self.ac_max = self.signal_max;
            self.ac_min = self.signal_min;
            self.positive_edge = true;
            self.negative_edge = false;
            self.signal_max = 0;

            let swing = self.ac_max - self.ac_min;
            if swing > 20 && swing < 1000 {
                beat_detected = true;
            }
        }

        if self.signal_previous > 0 && self.signal_current <= 0 {
            self.positive_edge = false;
            self.negative_edge = true;
            self.signal_min = 0;
        }

        if self.positive_edge && self.signal_current > self.signal_previous {
            self.signal_max = self.signal_current;
        }

        if self.negative_edge && self.signal_current < self.signal_previous {
            self.signal_min = self.signal_current;
        }

        beat_detected
    }
}

/// How the rolling average treats window slots that have not seen a beat.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RateAverage {
    /// Window starts zero-filled and is always averaged over all slots, so
    /// the first few averages read low.
    #[default]
    ZeroSeeded,
    /// Average only the slots that hold a recorded beat.
    FilledSlots,
}

/// Outcome of feeding one IR reading to a [`BeatEstimator`].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeatEvent {
    /// IR level below [`FINGER_THRESHOLD`].
    NoFinger,
    NoBeat,
    /// Beat accepted into the rolling window.
    Beat { bpm: f32, average: u16 },
    /// Beat detected but its rate is outside (20, 255) BPM.
    Rejected { bpm: f32 },
}

#[derive(Debug, Clone)]
pub struct BeatEstimator<B = PeakBeatDetector> {
    detector: B,
    policy: RateAverage,
    rates: [u8; RATE_SIZE],
    rate_spot: usize,
    filled: usize,
    last_beat: u64,
    average: u16,
}

impl Default for BeatEstimator<PeakBeatDetector> {
    fn default() -> Self {
        Self::new(PeakBeatDetector::new())
    }
}

impl<B: BeatDetector> BeatEstimator<B> {
    pub fn new(detector: B) -> Self {
        Self::with_policy(detector, RateAverage::default())
    }

    pub fn with_policy(detector: B, policy: RateAverage) -> Self {
        Self {
            detector,
            policy,
            rates: [0; RATE_SIZE],
            rate_spot: 0,
            filled: 0,
            last_beat: 0,
            average: 0,
        }
    }

    /// Feeds one IR reading taken at `now_ms`.
    pub fn update(&mut self, ir: u32, now_ms: u64) -> BeatEvent {
        if ir < FINGER_THRESHOLD {
            return BeatEvent::NoFinger;
        }

        if !self.detector.check_for_beat(ir) {
            return BeatEvent::NoBeat;
        }

        let delta = now_ms.saturating_sub(self.last_beat);
        self.last_beat = now_ms;
        let bpm = 60_000.0 / delta as f32;

        if !(bpm > MIN_BPM && bpm < MAX_BPM) {
            return BeatEvent::Rejected { bpm };
        }

        self.rates[self.rate_spot] = bpm as u8;
        self.rate_spot = (self.rate_spot + 1) % RATE_SIZE;
        self.filled = (self.filled + 1).min(RATE_SIZE);

        let sum: u16 = self.rates.iter().map(|&r| u16::from(r)).sum();
        let divisor = match self.policy {
            RateAverage::ZeroSeeded => RATE_SIZE,
            RateAverage::FilledSlots => self.filled,
        };
        self.average = sum / divisor as u16;

        BeatEvent::Beat { bpm, average: self.average }
    }

    /// Last rolling average, 0 before the first accepted beat.
    pub fn average(&self) -> u16 {
        self.average
    }

    pub fn last_beat_ms(&self) -> u64 {
        self.last_beat
    }

    pub fn rates(&self) -> &[u8; RATE_SIZE] {
        &self.rates
    }

    pub fn policy(&self) -> RateAverage {
        self.policy
    }

    pub fn detector_mut(&mut self) -> &mut B {
        &mut self.detector
    }

    /// Clears the rate history; the detector keeps its filter state.
    pub fn reset(&mut self) {
        self.rates = [0; RATE_SIZE];
        self.rate_spot = 0;
        self.filled = 0;
        self.last_beat = 0;
        self.average = 0;
    }
}
