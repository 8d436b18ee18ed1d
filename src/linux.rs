// Copyright 2015, Paul Osborne <osbpau@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

use crate::core::{I2CDevice, I2CFunctions};
use crate::ffi;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from the Linux i2c-dev transport
#[derive(Debug, Error)]
pub enum LinuxI2CError {
    #[error("i2c ioctl failed: {0}")]
    Nix(#[from] nix::Error),
    #[error("i2c device: {0}")]
    Io(#[from] io::Error),
}

impl LinuxI2CError {
    /// Negative errno, the way the kernel reports a failed transfer
    pub fn errno(&self) -> i32 {
        match self {
            LinuxI2CError::Nix(e) => -(*e as i32),
            LinuxI2CError::Io(e) => -e.raw_os_error().unwrap_or(libc::EIO),
        }
    }
}

/// A slave device on a Linux `/dev/i2c-N` adapter
pub struct LinuxI2CDevice {
    devfile: File,
    path: PathBuf,
    slave_address: u16,
}

impl AsRawFd for LinuxI2CDevice {
    fn as_raw_fd(&self) -> RawFd {
        self.devfile.as_raw_fd()
    }
}

impl LinuxI2CDevice {
    /// Create a new I2CDevice for the specified path
    pub fn new<P: AsRef<Path>>(path: P, slave_address: u16) -> Result<LinuxI2CDevice, LinuxI2CError> {
        let file = OpenOptions::new().read(true).write(true).open(path.as_ref())?;
        let mut device = LinuxI2CDevice {
            devfile: file,
            path: path.as_ref().to_path_buf(),
            slave_address: 0, // will be set later
        };
        device.set_slave_address(slave_address)?;
        debug!("opened {} at 0x{:02x}", device.path.display(), slave_address);
        Ok(device)
    }

    /// Set the slave address for this device
    ///
    /// Typically the address is expected to be 7-bits but 10-bit addresses
    /// may be supported by the kernel driver in some cases.  Little validation
    /// is done in Rust as the kernel is good at making sure things are valid.
    pub fn set_slave_address(&mut self, slave_address: u16) -> Result<(), LinuxI2CError> {
        ffi::i2c_set_slave_address(self.as_raw_fd(), slave_address)?;
        self.slave_address = slave_address;
        Ok(())
    }

    pub fn slave_address(&self) -> u16 {
        self.slave_address
    }

    /// Adapter number, taken from a `/dev/i2c-N` style path
    pub fn adapter(&self) -> Option<u32> {
        adapter_number(&self.path)
    }
}

fn adapter_number(path: &Path) -> Option<u32> {
    path.file_name()?
        .to_str()?
        .strip_prefix("i2c-")?
        .parse()
        .ok()
}

impl I2CDevice for LinuxI2CDevice {
    type Error = LinuxI2CError;

    fn functionality(&mut self) -> Result<I2CFunctions, LinuxI2CError> {
        ffi::i2c_get_functionality(self.as_raw_fd()).map_err(From::from)
    }

    fn smbus_read_byte(&mut self) -> Result<u8, LinuxI2CError> {
        ffi::i2c_smbus_read_byte(self.as_raw_fd()).map_err(From::from)
    }

    fn smbus_write_byte(&mut self, value: u8) -> Result<(), LinuxI2CError> {
        ffi::i2c_smbus_write_byte(self.as_raw_fd(), value).map_err(From::from)
    }

    fn smbus_read_byte_data(&mut self, register: u8) -> Result<u8, LinuxI2CError> {
        ffi::i2c_smbus_read_byte_data(self.as_raw_fd(), register).map_err(From::from)
    }

    fn smbus_write_byte_data(&mut self, register: u8, value: u8) -> Result<(), LinuxI2CError> {
        ffi::i2c_smbus_write_byte_data(self.as_raw_fd(), register, value).map_err(From::from)
    }

    fn smbus_read_word_data(&mut self, register: u8) -> Result<u16, LinuxI2CError> {
        ffi::i2c_smbus_read_word_data(self.as_raw_fd(), register).map_err(From::from)
    }

    fn smbus_write_word_data(&mut self, register: u8, value: u16) -> Result<(), LinuxI2CError> {
        ffi::i2c_smbus_write_word_data(self.as_raw_fd(), register, value).map_err(From::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_from_path() {
        assert_eq!(adapter_number(Path::new("/dev/i2c-1")), Some(1));
        assert_eq!(adapter_number(Path::new("/dev/i2c-12")), Some(12));
        assert_eq!(adapter_number(Path::new("/dev/spidev0.0")), None);
        assert_eq!(adapter_number(Path::new("/dev/i2c-")), None);
    }

    #[test]
    fn errno_is_negative() {
        let err = LinuxI2CError::from(nix::Error::EREMOTEIO);
        assert_eq!(err.errno(), -libc::EREMOTEIO);
        let err = LinuxI2CError::from(io::Error::from_raw_os_error(libc::ENOENT));
        assert_eq!(err.errno(), -libc::ENOENT);
    }

    #[test]
    fn missing_adapter_is_io_error() {
        match LinuxI2CDevice::new("/dev/i2c-does-not-exist", 0x2c) {
            Err(LinuxI2CError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            Err(other) => panic!("unexpected {:?}", other),
            Ok(_) => panic!("opened a missing adapter"),
        }
    }
}
