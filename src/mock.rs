// Copyright 2015, Paul Osborne <osbpau@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

use crate::core::{I2CDevice, I2CFunctions};
use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;
use tracing::trace;

/// Error reported by [`MockI2CDevice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MockI2CError {
    /// Injected failure, carrying the negative errno the transport would report
    #[error("mock transaction failed with code {0}")]
    Errno(i32),
}

/// 256 byte register file with an auto-incrementing pointer
pub struct I2CRegisterMap {
    registers: [u8; 0x100],
    offset: u8,
}

impl Default for I2CRegisterMap {
    fn default() -> Self {
        Self::new()
    }
}

impl I2CRegisterMap {
    pub fn new() -> I2CRegisterMap {
        I2CRegisterMap {
            registers: [0x00; 0x100],
            offset: 0,
        }
    }

    pub fn write_regs(&mut self, offset: u8, data: &[u8]) {
        trace!("WRITE | 0x{:02X} : {:?}", offset, data);
        for (i, byte) in data.iter().enumerate() {
            self.registers[offset.wrapping_add(i as u8) as usize] = *byte;
        }
    }

    pub fn read_regs(&self, offset: u8, data: &mut [u8]) {
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = self.registers[offset.wrapping_add(i as u8) as usize];
        }
        trace!("READ  | 0x{:02X} : {:?}", offset, data);
    }

    /// Current register pointer
    pub fn offset(&self) -> u8 {
        self.offset
    }

    fn read_next(&mut self) -> u8 {
        let mut buf = [0u8; 1];
        self.read_regs(self.offset, &mut buf);
        self.offset = self.offset.wrapping_add(1);
        buf[0]
    }
}

/// In-memory stand-in for a potentiometer on an SMBus adapter
///
/// Every SMBus transaction is counted, so tests can assert that a refused
/// probe never touched the bus.  A failure can be injected with
/// [`MockI2CDevice::fail_with`]; it then applies to every transaction
/// until cleared.  The adapter functionality query fails on its own knob,
/// [`MockI2CDevice::fail_functionality`], and is never counted.
pub struct MockI2CDevice {
    pub regmap: I2CRegisterMap,
    functionality: I2CFunctions,
    failure: Option<i32>,
    functionality_failure: Option<i32>,
    transactions: usize,
}

impl Default for MockI2CDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MockI2CDevice {
    /// New device on an adapter that emulates every SMBus transaction
    pub fn new() -> MockI2CDevice {
        MockI2CDevice {
            regmap: I2CRegisterMap::new(),
            functionality: I2CFunctions::I2C_FUNC_I2C | I2CFunctions::I2C_FUNC_SMBUS_EMUL,
            failure: None,
            functionality_failure: None,
            transactions: 0,
        }
    }

    pub fn set_functionality(&mut self, funcs: I2CFunctions) {
        self.functionality = funcs;
    }

    /// Make every following transaction fail with `errno` (`None` to clear)
    pub fn fail_with(&mut self, errno: Option<i32>) {
        self.failure = errno;
    }

    /// Make the functionality query fail with `errno` (`None` to clear)
    pub fn fail_functionality(&mut self, errno: Option<i32>) {
        self.functionality_failure = errno;
    }

    /// Number of bus transactions attempted so far, failed ones included
    pub fn transactions(&self) -> usize {
        self.transactions
    }

    fn begin(&mut self) -> Result<(), MockI2CError> {
        self.transactions += 1;
        match self.failure {
            Some(errno) => Err(MockI2CError::Errno(errno)),
            None => Ok(()),
        }
    }
}

impl I2CDevice for MockI2CDevice {
    type Error = MockI2CError;

    fn functionality(&mut self) -> Result<I2CFunctions, MockI2CError> {
        match self.functionality_failure {
            Some(errno) => Err(MockI2CError::Errno(errno)),
            None => Ok(self.functionality),
        }
    }

    fn smbus_read_byte(&mut self) -> Result<u8, MockI2CError> {
        self.begin()?;
        Ok(self.regmap.read_next())
    }

    // The byte lands in the command slot; the parts treat it as the
    // register pointer (or instruction byte) for the following read.
    fn smbus_write_byte(&mut self, value: u8) -> Result<(), MockI2CError> {
        self.begin()?;
        self.regmap.offset = value;
        Ok(())
    }

    fn smbus_read_byte_data(&mut self, register: u8) -> Result<u8, MockI2CError> {
        self.begin()?;
        self.regmap.offset = register;
        Ok(self.regmap.read_next())
    }

    fn smbus_write_byte_data(&mut self, register: u8, value: u8) -> Result<(), MockI2CError> {
        self.begin()?;
        self.regmap.write_regs(register, &[value]);
        self.regmap.offset = register.wrapping_add(1);
        Ok(())
    }

    fn smbus_read_word_data(&mut self, register: u8) -> Result<u16, MockI2CError> {
        self.begin()?;
        let mut buf = [0u8; 2];
        self.regmap.read_regs(register, &mut buf);
        self.regmap.offset = register.wrapping_add(2);
        Ok(LittleEndian::read_u16(&buf))
    }

    fn smbus_write_word_data(&mut self, register: u8, value: u16) -> Result<(), MockI2CError> {
        self.begin()?;
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, value);
        self.regmap.write_regs(register, &buf);
        self.regmap.offset = register.wrapping_add(2);
        Ok(())
    }
}
