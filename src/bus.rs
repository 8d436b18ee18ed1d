// Copyright 2015, Paul Osborne <osbpau@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

//! Register access primitives used by the potentiometer core.
//!
//! The core never talks to a bus directly.  It gets a [`BusData`] that
//! pairs the connection to one physical device with a shared, stateless
//! set of bus operations ([`DpotBusOps`]).  Every operation is exactly
//! one bus transaction; failures come back as the transport's own error,
//! untouched.

use crate::core::I2CDevice;

/// The six register primitives a potentiometer core needs
///
/// `C` is the connection type of the transport.  Implementations carry no
/// state of their own, so one value serves every connection on that
/// transport.
pub trait DpotBusOps<C: ?Sized> {
    /// Error reported by the transport
    type Error;

    /// Read one byte, no command byte
    fn read_u8(&self, client: &mut C) -> Result<u8, Self::Error>;

    /// Read one byte from `register`
    fn read_u8_at(&self, client: &mut C, register: u8) -> Result<u8, Self::Error>;

    /// Read a 16 bit word from `register`
    fn read_u16_at(&self, client: &mut C, register: u8) -> Result<u16, Self::Error>;

    /// Write one byte, no command byte
    fn write_u8(&self, client: &mut C, value: u8) -> Result<(), Self::Error>;

    /// Write one byte to `register`
    fn write_u8_at(&self, client: &mut C, register: u8, value: u8) -> Result<(), Self::Error>;

    /// Write a 16 bit word to `register`
    fn write_u16_at(&self, client: &mut C, register: u8, value: u16) -> Result<(), Self::Error>;
}

/// Bus operations over SMBus byte and word transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SMBusOps;

/// The SMBus operations shared by every device bound through this crate
pub static SMBUS_OPS: SMBusOps = SMBusOps;

impl<D> DpotBusOps<D> for SMBusOps
where
    D: I2CDevice + ?Sized,
{
    type Error = D::Error;

    #[inline]
    fn read_u8(&self, client: &mut D) -> Result<u8, D::Error> {
        client.smbus_read_byte()
    }

    #[inline]
    fn read_u8_at(&self, client: &mut D, register: u8) -> Result<u8, D::Error> {
        client.smbus_read_byte_data(register)
    }

    #[inline]
    fn read_u16_at(&self, client: &mut D, register: u8) -> Result<u16, D::Error> {
        client.smbus_read_word_data(register)
    }

    #[inline]
    fn write_u8(&self, client: &mut D, value: u8) -> Result<(), D::Error> {
        client.smbus_write_byte(value)
    }

    #[inline]
    fn write_u8_at(&self, client: &mut D, register: u8, value: u8) -> Result<(), D::Error> {
        client.smbus_write_byte_data(register, value)
    }

    #[inline]
    fn write_u16_at(&self, client: &mut D, register: u8, value: u16) -> Result<(), D::Error> {
        client.smbus_write_word_data(register, value)
    }
}

/// A device connection paired with the operations that drive it
///
/// Built once per probe and handed to the core, which decides how long to
/// keep it.
pub struct BusData<C, O: 'static> {
    client: C,
    bops: &'static O,
}

impl<C, O> BusData<C, O>
where
    O: DpotBusOps<C> + 'static,
{
    pub fn new(client: C, bops: &'static O) -> BusData<C, O> {
        BusData { client, bops }
    }

    /// The operations table this connection is driven through
    pub fn bops(&self) -> &'static O {
        self.bops
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Give the connection back, e.g. when the core is torn down
    pub fn into_client(self) -> C {
        self.client
    }

    pub fn read_u8(&mut self) -> Result<u8, O::Error> {
        self.bops.read_u8(&mut self.client)
    }

    pub fn read_u8_at(&mut self, register: u8) -> Result<u8, O::Error> {
        self.bops.read_u8_at(&mut self.client, register)
    }

    pub fn read_u16_at(&mut self, register: u8) -> Result<u16, O::Error> {
        self.bops.read_u16_at(&mut self.client, register)
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), O::Error> {
        self.bops.write_u8(&mut self.client, value)
    }

    pub fn write_u8_at(&mut self, register: u8, value: u8) -> Result<(), O::Error> {
        self.bops.write_u8_at(&mut self.client, register, value)
    }

    pub fn write_u16_at(&mut self, register: u8, value: u16) -> Result<(), O::Error> {
        self.bops.write_u16_at(&mut self.client, register, value)
    }
}
