// Copyright 2015, Paul Osborne <osbpau@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

use crate::core::I2CFunctions;
use thiserror::Error;

/// Failure to bind or unbind a potentiometer
///
/// `E` is the transport error, `C` the error of the potentiometer core.
/// Neither is remapped on the way through.
#[derive(Debug, Error)]
pub enum Error<E, C> {
    /// The adapter lacks transactions the bus operations rely on
    #[error("SMBus functionality not supported: {0:?}")]
    Unsupported(I2CFunctions),

    /// No identity table entry matched
    #[error("device not recognized: {0:?}")]
    UnknownDevice(String),

    /// The transport failed while querying the adapter
    #[error("bus error: {0}")]
    Bus(E),

    /// The potentiometer core refused the device
    #[error("core error: {0}")]
    Core(C),
}

impl<E, C> Error<E, C> {
    /// Kernel style errno for this failure, where one is fixed
    ///
    /// A missing capability is `-EIO` and an unknown device `-ENODEV`;
    /// transport and core errors carry their own codes.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Error::Unsupported(_) => Some(-libc::EIO),
            Error::UnknownDevice(_) => Some(-libc::ENODEV),
            Error::Bus(_) | Error::Core(_) => None,
        }
    }
}
