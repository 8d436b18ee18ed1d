// Copyright 2015, Paul Osborne <osbpau@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

use std::error::Error;

bitflags::bitflags! {
    /// Adapter functionality as reported by the `I2C_FUNCS` ioctl
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct I2CFunctions: u32 {
        const I2C_FUNC_I2C = 0x0000_0001;
        const I2C_FUNC_10BIT_ADDR = 0x0000_0002;
        const I2C_FUNC_PROTOCOL_MANGLING = 0x0000_0004; /* I2C_M_IGNORE_NAK etc. */
        const I2C_FUNC_SMBUS_PEC = 0x0000_0008;
        const I2C_FUNC_NOSTART = 0x0000_0010; /* I2C_M_NOSTART */
        const I2C_FUNC_SMBUS_BLOCK_PROC_CALL = 0x0000_8000; /* SMBus 2.0 */
        const I2C_FUNC_SMBUS_QUICK = 0x0001_0000;
        const I2C_FUNC_SMBUS_READ_BYTE = 0x0002_0000;
        const I2C_FUNC_SMBUS_WRITE_BYTE = 0x0004_0000;
        const I2C_FUNC_SMBUS_READ_BYTE_DATA = 0x0008_0000;
        const I2C_FUNC_SMBUS_WRITE_BYTE_DATA = 0x0010_0000;
        const I2C_FUNC_SMBUS_READ_WORD_DATA = 0x0020_0000;
        const I2C_FUNC_SMBUS_WRITE_WORD_DATA = 0x0040_0000;
        const I2C_FUNC_SMBUS_PROC_CALL = 0x0080_0000;
        const I2C_FUNC_SMBUS_READ_BLOCK_DATA = 0x0100_0000;
        const I2C_FUNC_SMBUS_WRITE_BLOCK_DATA = 0x0200_0000;
        const I2C_FUNC_SMBUS_READ_I2C_BLOCK = 0x0400_0000; /* I2C-like block xfer  */
        const I2C_FUNC_SMBUS_WRITE_I2C_BLOCK = 0x0800_0000; /* w/ 1-byte reg. addr. */

        const I2C_FUNC_SMBUS_BYTE = Self::I2C_FUNC_SMBUS_READ_BYTE.bits()
            | Self::I2C_FUNC_SMBUS_WRITE_BYTE.bits();
        const I2C_FUNC_SMBUS_BYTE_DATA = Self::I2C_FUNC_SMBUS_READ_BYTE_DATA.bits()
            | Self::I2C_FUNC_SMBUS_WRITE_BYTE_DATA.bits();
        const I2C_FUNC_SMBUS_WORD_DATA = Self::I2C_FUNC_SMBUS_READ_WORD_DATA.bits()
            | Self::I2C_FUNC_SMBUS_WRITE_WORD_DATA.bits();
        const I2C_FUNC_SMBUS_EMUL = Self::I2C_FUNC_SMBUS_QUICK.bits()
            | Self::I2C_FUNC_SMBUS_BYTE.bits()
            | Self::I2C_FUNC_SMBUS_BYTE_DATA.bits()
            | Self::I2C_FUNC_SMBUS_WORD_DATA.bits()
            | Self::I2C_FUNC_SMBUS_PROC_CALL.bits()
            | Self::I2C_FUNC_SMBUS_WRITE_BLOCK_DATA.bits()
            | Self::I2C_FUNC_SMBUS_READ_I2C_BLOCK.bits()
            | Self::I2C_FUNC_SMBUS_WRITE_I2C_BLOCK.bits()
            | Self::I2C_FUNC_SMBUS_PEC.bits();
    }
}

/// Interface to an I2C slave device from an I2C master
///
/// Typical implementations will store state with references to the bus
/// in use and the address of the slave device.  The trait is based on the
/// Linux i2cdev interface, restricted to the SMBus transactions the
/// potentiometer parts understand.
pub trait I2CDevice {
    /// Error returned by every transaction on this device
    type Error: Error;

    /// Query the functionality supported by the adapter the device sits on
    ///
    /// This is an adapter query, not a bus transaction; nothing is put
    /// on the wire.
    fn functionality(&mut self) -> Result<I2CFunctions, Self::Error>;

    /// Read a single byte from a device, without specifying a device register
    ///
    /// Some devices are so simple that this interface is enough; for
    /// others, it is a shorthand if you want to read the same register as in
    /// the previous SMBus command.
    fn smbus_read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Write a single byte to a device, without specifying a device register
    ///
    /// This is the opposite operation as smbus_read_byte.  As with read_byte,
    /// no register is specified.
    fn smbus_write_byte(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Read a single byte from a device, from a designated register
    ///
    /// The register is specified through the Comm byte.
    fn smbus_read_byte_data(&mut self, register: u8) -> Result<u8, Self::Error>;

    /// Write a single byte to a specific register on a device
    ///
    /// The register is specified through the Comm byte.
    fn smbus_write_byte_data(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;

    /// Read 2 bytes from a given register on a device (lsb first)
    fn smbus_read_word_data(&mut self, register: u8) -> Result<u16, Self::Error>;

    /// Write 2 bytes to a given register on a device (lsb first)
    fn smbus_write_word_data(&mut self, register: u8, value: u16) -> Result<(), Self::Error>;
}

impl<D> I2CDevice for &mut D
where
    D: I2CDevice + ?Sized,
{
    type Error = D::Error;

    fn functionality(&mut self) -> Result<I2CFunctions, D::Error> {
        (**self).functionality()
    }

    fn smbus_read_byte(&mut self) -> Result<u8, D::Error> {
        (**self).smbus_read_byte()
    }

    fn smbus_write_byte(&mut self, value: u8) -> Result<(), D::Error> {
        (**self).smbus_write_byte(value)
    }

    fn smbus_read_byte_data(&mut self, register: u8) -> Result<u8, D::Error> {
        (**self).smbus_read_byte_data(register)
    }

    fn smbus_write_byte_data(&mut self, register: u8, value: u8) -> Result<(), D::Error> {
        (**self).smbus_write_byte_data(register, value)
    }

    fn smbus_read_word_data(&mut self, register: u8) -> Result<u16, D::Error> {
        (**self).smbus_read_word_data(register)
    }

    fn smbus_write_word_data(&mut self, register: u8, value: u16) -> Result<(), D::Error> {
        (**self).smbus_write_word_data(register, value)
    }
}

/// Functions in `required` that the adapter behind `dev` does not support
///
/// An empty set means the adapter can carry every requested transaction.
pub fn missing_functionality<D>(dev: &mut D, required: I2CFunctions) -> Result<I2CFunctions, D::Error>
where
    D: I2CDevice + ?Sized,
{
    Ok(required - dev.functionality()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockI2CDevice;

    #[test]
    fn word_data_covers_read_and_write() {
        let word = I2CFunctions::I2C_FUNC_SMBUS_WORD_DATA;
        assert!(word.contains(I2CFunctions::I2C_FUNC_SMBUS_READ_WORD_DATA));
        assert!(word.contains(I2CFunctions::I2C_FUNC_SMBUS_WRITE_WORD_DATA));
        assert_eq!(word.bits(), 0x0060_0000);
    }

    #[test]
    fn missing_functionality_needs_every_bit() {
        let word = I2CFunctions::I2C_FUNC_SMBUS_WORD_DATA;
        let mut dev = MockI2CDevice::new();
        dev.set_functionality(I2CFunctions::I2C_FUNC_SMBUS_READ_WORD_DATA);
        assert_eq!(
            missing_functionality(&mut dev, word).unwrap(),
            I2CFunctions::I2C_FUNC_SMBUS_WRITE_WORD_DATA
        );

        dev.set_functionality(I2CFunctions::empty());
        assert_eq!(missing_functionality(&mut dev, word).unwrap(), word);

        dev.set_functionality(I2CFunctions::I2C_FUNC_SMBUS_EMUL);
        assert!(missing_functionality(&mut dev, word).unwrap().is_empty());
        assert_eq!(dev.transactions(), 0);
    }
}
