//! Register level access to the sensor over I2C
use embedded_hal::i2c::I2c;

use crate::errors::Error;
use crate::registers::{Register, DEFAULT_ADDRESS};

#[derive(Debug)]
pub struct DeviceInterface<I2C> {
    pub i2c: I2C,
    address: u8,
}

impl<I2C: I2c> DeviceInterface<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Address write followed by a repeated-start read of one byte.
    pub fn read_register(
        &mut self,
        reg: Register,
    ) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8];
        self.i2c
            .write_read(self.address, &[reg.addr()], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    pub fn write_register(
        &mut self,
        reg: Register,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg.addr(), value])
            .map_err(Error::I2c)
    }

    pub fn modify_register<F>(
        &mut self,
        reg: Register,
        f: F,
    ) -> Result<(), Error<I2C::Error>>
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read_register(reg)?;

        self.write_register(reg, f(value))
    }

    /// Keeps the bits set in `mask`, then ORs in `value`.
    pub fn bit_masked_update(
        &mut self,
        reg: Register,
        mask: u8,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_register(reg, |current| (current & mask) | value)
    }

    /// One burst read from FIFO_DATA. The data register does not
    /// auto-increment, so consecutive bytes walk the on-chip FIFO.
    pub fn read_fifo(
        &mut self,
        buf: &mut [u8],
    ) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[Register::FIFO_DATA.addr()], buf)
            .map_err(Error::I2c)
    }
}
