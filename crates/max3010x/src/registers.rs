use bitflags::bitflags;

/// 7-bit I2C address shared by the MAX30102 and MAX30105.
pub const DEFAULT_ADDRESS: u8 = 0x57;
/// Value of [`Register::PART_ID`] on every MAX3010x part.
pub const EXPECTED_PART_ID: u8 = 0x15;
/// Depth of the on-chip FIFO; the read and write pointers wrap at this value.
pub const FIFO_DEPTH: u8 = 32;
/// Bytes per channel in a FIFO record.
pub const BYTES_PER_CHANNEL: usize = 3;
/// Only the low 18 bits of a FIFO channel word carry data.
pub const SAMPLE_MASK: u32 = 0x3FFFF;

///
/// Read / write-able registers
///
#[allow(non_camel_case_types)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Interrupt Status 1
    INT_STATUS_1 = 0x00,
    /// Interrupt Status 2
    INT_STATUS_2 = 0x01,
    /// Interrupt Enable 1
    INT_ENABLE_1 = 0x02,
    /// Interrupt Enable 2
    INT_ENABLE_2 = 0x03,
    /// FIFO Write Pointer
    FIFO_WR_PTR = 0x04,
    /// Overflow Counter
    OVF_COUNTER = 0x05,
    /// FIFO Read Pointer
    FIFO_RD_PTR = 0x06,
    /// FIFO Data Register
    FIFO_DATA = 0x07,
    /// FIFO Configuration
    FIFO_CONFIG = 0x08,
    /// Mode Configuration
    MODE_CONFIG = 0x09,
    /// SpO2 / Particle Sensing Configuration
    PARTICLE_CONFIG = 0x0A,
    /// LED1 (red) Pulse Amplitude
    LED1_PA = 0x0C,
    /// LED2 (IR) Pulse Amplitude
    LED2_PA = 0x0D,
    /// LED3 (green, MAX30105 only) Pulse Amplitude
    LED3_PA = 0x0E,
    /// Proximity Mode LED Pulse Amplitude
    PILOT_PA = 0x10,
    /// Multi-LED Mode Control, slots 1 and 2
    MULTI_LED_CONFIG_1 = 0x11,
    /// Multi-LED Mode Control, slots 3 and 4
    MULTI_LED_CONFIG_2 = 0x12,
    /// Die Temperature Integer
    DIE_TEMP_INT = 0x1F,
    /// Die Temperature Fraction
    DIE_TEMP_FRAC = 0x20,
    /// Die Temperature Config
    DIE_TEMP_CONFIG = 0x21,
    /// Proximity Interrupt Threshold
    PROX_INT_THRESH = 0x30,
    /// Revision ID
    REVISION_ID = 0xFE,
    /// Part ID
    PART_ID = 0xFF,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Multi-LED control register holding the given 1-based slot.
    pub const fn from_slot_number(slot: u8) -> Option<Self> {
        match slot {
            1 | 2 => Some(Self::MULTI_LED_CONFIG_1),
            3 | 4 => Some(Self::MULTI_LED_CONFIG_2),
            _ => None,
        }
    }
}

bitflags! {
    /// INT_STATUS_1 / INT_ENABLE_1
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Interrupt1: u8 {
        const A_FULL   = 0b1000_0000;
        const PPG_RDY  = 0b0100_0000;
        const ALC_OVF  = 0b0010_0000;
        const PROX_INT = 0b0001_0000;
        const PWR_RDY  = 0b0000_0001;
    }
}

impl Interrupt1 {
    pub const fn almost_full(&self) -> bool {
        self.contains(Self::A_FULL)
    }

    pub const fn data_ready(&self) -> bool {
        self.contains(Self::PPG_RDY)
    }

    pub const fn alc_overflow(&self) -> bool {
        self.contains(Self::ALC_OVF)
    }

    pub const fn proximity(&self) -> bool {
        self.contains(Self::PROX_INT)
    }

    pub const fn power_ready(&self) -> bool {
        self.contains(Self::PWR_RDY)
    }
}

bitflags! {
    /// INT_STATUS_2 / INT_ENABLE_2
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Interrupt2: u8 {
        const DIE_TEMP_RDY = 0b0000_0010;
    }
}

impl Interrupt2 {
    pub const fn die_temp_ready(&self) -> bool {
        self.contains(Self::DIE_TEMP_RDY)
    }
}

bitflags! {
    /// FIFO_CONFIG
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct FifoConfig: u8 {
        const SMP_AVE2        = 0b1000_0000;
        const SMP_AVE1        = 0b0100_0000;
        const SMP_AVE0        = 0b0010_0000;
        const FIFO_ROLLOVER_EN = 0b0001_0000;
        const FIFO_A_FULL3    = 0b0000_1000;
        const FIFO_A_FULL2    = 0b0000_0100;
        const FIFO_A_FULL1    = 0b0000_0010;
        const FIFO_A_FULL0    = 0b0000_0001;

        const SMP_AVE = Self::SMP_AVE2.bits() | Self::SMP_AVE1.bits() | Self::SMP_AVE0.bits();
        const FIFO_A_FULL = Self::FIFO_A_FULL3.bits() | Self::FIFO_A_FULL2.bits()
            | Self::FIFO_A_FULL1.bits() | Self::FIFO_A_FULL0.bits();
    }
}

bitflags! {
    /// MODE_CONFIG
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct ModeConfig: u8 {
        const SHDN  = 0b1000_0000;
        const RESET = 0b0100_0000;
        const MODE2 = 0b0000_0100;
        const MODE1 = 0b0000_0010;
        const MODE0 = 0b0000_0001;

        const MODE = Self::MODE2.bits() | Self::MODE1.bits() | Self::MODE0.bits();
    }
}

impl ModeConfig {
    pub const fn reset(&self) -> bool {
        self.contains(Self::RESET)
    }

    pub const fn shutdown(&self) -> bool {
        self.contains(Self::SHDN)
    }
}

bitflags! {
    /// PARTICLE_CONFIG (SpO2 configuration in the MAX30102 datasheet)
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct ParticleConfig: u8 {
        const ADC_RGE1 = 0b0100_0000;
        const ADC_RGE0 = 0b0010_0000;
        const SR2      = 0b0001_0000;
        const SR1      = 0b0000_1000;
        const SR0      = 0b0000_0100;
        const LED_PW1  = 0b0000_0010;
        const LED_PW0  = 0b0000_0001;

        const ADC_RGE = Self::ADC_RGE1.bits() | Self::ADC_RGE0.bits();
        const SR = Self::SR2.bits() | Self::SR1.bits() | Self::SR0.bits();
        const LED_PW = Self::LED_PW1.bits() | Self::LED_PW0.bits();
    }
}

bitflags! {
    /// MULTI_LED_CONFIG_1 / MULTI_LED_CONFIG_2
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct MultiLedConfig: u8 {
        /// Slot 2 (register 1) or slot 4 (register 2)
        const SLOT_HIGH = 0b0111_0000;
        /// Slot 1 (register 1) or slot 3 (register 2)
        const SLOT_LOW  = 0b0000_0111;
    }
}

bitflags! {
    /// DIE_TEMP_CONFIG
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct DieTempConfig: u8 {
        const TEMP_EN = 0b0000_0001;
    }
}

/// Configuration enums
#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleAverage {
    Avg1 = 0x00,
    Avg2 = 0x20,
    #[default]
    Avg4 = 0x40,
    Avg8 = 0x60,
    Avg16 = 0x80,
    Avg32 = 0xA0,
}

/// LEDs sampled by the device.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedMode {
    RedOnly = 0x02,
    #[default]
    RedIr = 0x03,
    /// Slot-driven sequencing, see [`SlotDevice`].
    MultiLed = 0x07,
}

/// ADC full scale in nA.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcRange {
    Na2048 = 0x00,
    Na4096 = 0x20,
    Na8192 = 0x40,
    #[default]
    Na16384 = 0x60,
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleRate {
    Sps50 = 0x00,
    Sps100 = 0x04,
    #[default]
    Sps200 = 0x08,
    Sps400 = 0x0C,
    Sps800 = 0x10,
    Sps1000 = 0x14,
    Sps1600 = 0x18,
    Sps3200 = 0x1C,
}

/// LED pulse width; longer pulses buy ADC resolution (15 to 18 bits).
#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseWidth {
    Us69 = 0x00,
    Us118 = 0x01,
    Us215 = 0x02,
    #[default]
    Us411 = 0x03,
}

/// What a multi-LED time slot drives.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotDevice {
    #[default]
    None = 0x00,
    RedLed = 0x01,
    IrLed = 0x02,
    GreenLed = 0x03,
    NonePilot = 0x04,
    RedPilot = 0x05,
    IrPilot = 0x06,
    GreenPilot = 0x07,
}

impl SlotDevice {
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Interrupt sources that can be routed to the INT pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interrupt {
    AlmostFull,
    DataReady,
    AlcOverflow,
    Proximity,
    DieTempReady,
}

impl Interrupt {
    /// Enable register and bit for this source.
    pub const fn enable_bit(self) -> (Register, u8) {
        match self {
            Self::AlmostFull => {
                (Register::INT_ENABLE_1, Interrupt1::A_FULL.bits())
            }
            Self::DataReady => {
                (Register::INT_ENABLE_1, Interrupt1::PPG_RDY.bits())
            }
            Self::AlcOverflow => {
                (Register::INT_ENABLE_1, Interrupt1::ALC_OVF.bits())
            }
            Self::Proximity => {
                (Register::INT_ENABLE_1, Interrupt1::PROX_INT.bits())
            }
            Self::DieTempReady => {
                (Register::INT_ENABLE_2, Interrupt2::DIE_TEMP_RDY.bits())
            }
        }
    }
}
