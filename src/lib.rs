// Copyright 2015, Paul Osborne <osbpau@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

//! # ad525x-dpot
//!
//! SMBus transport for the Analog Devices family of digital
//! potentiometers (AD525x, AD524x, AD517x, AD527x and friends).
//!
//! A transport-neutral potentiometer core only ever needs six register
//! primitives: byte and word reads and writes, with or without a
//! command (register) byte.  This crate provides those primitives over
//! SMBus ([`bus::SMBusOps`]), the static tables binding I2C device ids
//! and device-tree compatible strings to chip types ([`ids`]), and the
//! probe/remove glue handing a matched device to the core
//! ([`driver::DpotI2CDriver`]).
//!
//! On Linux the transport is the kernel's i2c-dev userspace interface:
//! https://www.kernel.org/doc/Documentation/i2c/dev-interface

pub mod bus;
pub mod chip;
pub mod core;
pub mod driver;
pub mod error;
pub mod ids;
pub mod mock;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod ffi;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub mod linux;

pub use crate::bus::{BusData, DpotBusOps, SMBusOps};
pub use crate::chip::ChipType;
pub use crate::core::{I2CDevice, I2CFunctions};
pub use crate::driver::{DeviceHandle, DpotCore, DpotI2CDriver, DpotUnbind};
pub use crate::error::Error;
pub use crate::ids::{DeviceId, DeviceMatch};
