/// Bounded polling loops that can run out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// RESET bit did not clear.
    Reset,
    /// DIE_TEMP_RDY never asserted.
    DieTemperature,
    /// FIFO produced no new sample.
    Sample,
}

#[derive(derive_more::From, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<I2cError> {
    /// Bus transaction failed; no data was produced.
    I2c(I2cError),
    /// PART_ID did not read back as 0x15.
    #[from(skip)]
    PartIdMismatch(u8),
    #[from(skip)]
    Timeout(Operation),
    /// Multi-LED slots are numbered 1 to 4.
    #[from(skip)]
    InvalidSlot(u8),
    /// Transfer limit cannot hold one whole sample.
    #[from(skip)]
    InvalidTransferSize(usize),
    /// `setup` has not completed successfully.
    NotInitialized,
}

impl<E: core::fmt::Display> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(err) => write!(f, "I2C communication error: {}", err),
            Error::PartIdMismatch(id) => {
                write!(f, "Unexpected part ID: {:#04x}", id)
            }
            Error::Timeout(op) => write!(f, "Timed out waiting for {}", op),
            Error::InvalidSlot(slot) => {
                write!(f, "Invalid slot number: {}", slot)
            }
            Error::InvalidTransferSize(len) => {
                write!(f, "Transfer size too small: {} bytes", len)
            }
            Error::NotInitialized => write!(f, "Device not set up"),
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Operation::Reset => write!(f, "soft reset"),
            Operation::DieTemperature => write!(f, "die temperature"),
            Operation::Sample => write!(f, "new sample"),
        }
    }
}
