//! Ratio-of-ratios SpO2 estimate.

/// Samples between SpO2 recomputations.
pub const SPO2_PERIOD: u32 = 100;
/// Weight of the running DC level in the per-sample low-pass.
pub const DC_FILTER_RATE: f64 = 0.95;
/// Weight of the previous estimate in the published SpO2 low-pass.
pub const SPO2_FILTER_RATE: f64 = 0.7;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Spo2Reading {
    /// Latest estimate from the linear calibration curve, in percent.
    pub raw: f64,
    /// Low-passed estimate, in percent.
    pub filtered: f64,
}

/// Per-sample SpO2 filter.
///
/// Red and IR levels are tracked with an exponential low-pass; the squared
/// distance of each sample from that level approximates the AC energy. Every
/// [`SPO2_PERIOD`] samples the normalised AC ratio `R` is mapped through
/// `SpO2 = -23.3 * (R - 0.4) + 100`. Results are not clamped to 0..=100.
/// All state is kept in `f64`.
#[derive(Debug, Clone, Default)]
pub struct Spo2Estimator {
    avg_red: f64,
    avg_ir: f64,
    sum_red_rms: f64,
    sum_ir_rms: f64,
    count: u32,
    reading: Spo2Reading,
}

impl Spo2Estimator {
    pub const fn new() -> Self {
        Self {
            avg_red: 0.0,
            avg_ir: 0.0,
            sum_red_rms: 0.0,
            sum_ir_rms: 0.0,
            count: 0,
            reading: Spo2Reading { raw: 0.0, filtered: 0.0 },
        }
    }

    /// Feeds one red/IR pair. Returns the new reading on the sample that
    /// completes a period.
    pub fn update(&mut self, red: u32, ir: u32) -> Option<Spo2Reading> {
        let red = f64::from(red);
        let ir = f64::from(ir);

        self.avg_red =
            self.avg_red * DC_FILTER_RATE + red * (1.0 - DC_FILTER_RATE);
        self.avg_ir = self.avg_ir * DC_FILTER_RATE + ir * (1.0 - DC_FILTER_RATE);
        self.sum_red_rms += (red - self.avg_red) * (red - self.avg_red);
        self.sum_ir_rms += (ir - self.avg_ir) * (ir - self.avg_ir);

        self.count += 1;
        if self.count < SPO2_PERIOD {
            return None;
        }

        let updated = self.ratio().map(|r| {
            let raw = -23.3 * (r - 0.4) + 100.0;
            let filtered = SPO2_FILTER_RATE * self.reading.filtered
                + (1.0 - SPO2_FILTER_RATE) * raw;
            self.reading = Spo2Reading { raw, filtered };
            self.reading
        });

        self.sum_red_rms = 0.0;
        self.sum_ir_rms = 0.0;
        self.count = 0;

        updated
    }

    /// `R`, or `None` while any term would divide by zero.
    fn ratio(&self) -> Option<f64> {
        if self.avg_red <= 0.0 || self.avg_ir <= 0.0 || self.sum_ir_rms <= 0.0
        {
            return None;
        }
        let red_ratio = libm::sqrt(self.sum_red_rms) / self.avg_red;
        let ir_ratio = libm::sqrt(self.sum_ir_rms) / self.avg_ir;

        Some(red_ratio / ir_ratio)
    }

    pub fn reading(&self) -> Spo2Reading {
        self.reading
    }

    /// Samples accumulated toward the next recomputation.
    pub fn pending(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
