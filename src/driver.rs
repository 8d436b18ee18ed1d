// Copyright 2015, Paul Osborne <osbpau@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

//! Probe and remove glue between an I2C device and the potentiometer core.

use crate::bus::{BusData, DpotBusOps, SMBusOps, SMBUS_OPS};
use crate::core::{missing_functionality, I2CDevice, I2CFunctions};
use crate::error::Error;
use crate::chip::ChipType;
use crate::ids::{self, DeviceId, DeviceMatch};
use std::fmt;
use tracing::{debug, error};

/// Identity of one physical device instance: adapter number and address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceHandle {
    pub adapter: u32,
    pub address: u16,
}

impl DeviceHandle {
    pub fn new(adapter: u32, address: u16) -> DeviceHandle {
        DeviceHandle { adapter, address }
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04x}", self.adapter, self.address)
    }
}

/// Teardown half of a potentiometer core
///
/// Unbinding needs no bus, so this half is independent of the transport.
pub trait DpotUnbind {
    type Error;

    /// Release whatever was set up for `handle`
    fn remove(&mut self, handle: DeviceHandle) -> Result<(), Self::Error>;
}

/// The transport-neutral potentiometer core a matched device is handed to
pub trait DpotCore<C, O: DpotBusOps<C> + 'static>: DpotUnbind {
    /// Take over the device behind `handle`
    fn probe(
        &mut self,
        handle: DeviceHandle,
        bdata: BusData<C, O>,
        chip: ChipType,
        name: &str,
    ) -> Result<(), Self::Error>;
}

/// SMBus driver for the potentiometers listed in [`ids::DPOT_I2C_IDS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpotI2CDriver {
    pub name: &'static str,
    /// Transactions the adapter must support before a device is bound
    pub required: I2CFunctions,
}

impl Default for DpotI2CDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DpotI2CDriver {
    pub const fn new() -> DpotI2CDriver {
        DpotI2CDriver {
            name: "ad_dpot",
            required: I2CFunctions::I2C_FUNC_SMBUS_WORD_DATA,
        }
    }

    /// Bind `dev` to `core`
    ///
    /// The identity in `matched` is resolved first, then the adapter is
    /// checked for SMBus word transactions.  Only when both pass is the
    /// device paired with the SMBus operations and handed to the core; no
    /// transaction is issued on any failure path.
    pub fn probe<D, K>(
        &self,
        core: &mut K,
        handle: DeviceHandle,
        mut dev: D,
        matched: DeviceMatch<'_>,
    ) -> Result<&'static DeviceId, Error<D::Error, K::Error>>
    where
        D: I2CDevice,
        K: DpotCore<D, SMBusOps>,
    {
        let id = match ids::resolve(matched) {
            Some(id) => id,
            None => {
                error!("{}: device {:?} not recognized", handle, matched.key());
                return Err(Error::UnknownDevice(matched.key().to_string()));
            }
        };

        let missing = missing_functionality(&mut dev, self.required).map_err(Error::Bus)?;
        if !missing.is_empty() {
            error!("{}: adapter lacks {:?}", handle, missing);
            return Err(Error::Unsupported(missing));
        }

        let bdata = BusData::new(dev, &SMBUS_OPS);
        core.probe(handle, bdata, id.chip, id.display_name())
            .map_err(Error::Core)?;

        debug!("{}: bound {} ({:?})", handle, id.display_name(), id.chip);
        Ok(id)
    }

    /// Unbind the device behind `handle`
    ///
    /// The core's error is returned as is.
    pub fn remove<K>(&self, core: &mut K, handle: DeviceHandle) -> Result<(), K::Error>
    where
        K: DpotUnbind + ?Sized,
    {
        core.remove(handle)?;
        debug!("{}: removed", handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockI2CDevice, MockI2CError};
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Eq, thiserror::Error)]
    enum CoreError {
        #[error("no such device")]
        NoDevice,
        #[error("wiper readback failed: {0}")]
        Bus(#[from] MockI2CError),
    }

    struct Bound {
        bdata: BusData<MockI2CDevice, SMBusOps>,
        chip: ChipType,
        name: String,
        wiper: u8,
    }

    /// Minimal core: reads RDAC0 on probe, keeps the bus per handle
    #[derive(Default)]
    struct FakeCore {
        devices: BTreeMap<DeviceHandle, Bound>,
    }

    impl DpotUnbind for FakeCore {
        type Error = CoreError;

        fn remove(&mut self, handle: DeviceHandle) -> Result<(), CoreError> {
            self.devices.remove(&handle).map(drop).ok_or(CoreError::NoDevice)
        }
    }

    impl DpotCore<MockI2CDevice, SMBusOps> for FakeCore {
        fn probe(
            &mut self,
            handle: DeviceHandle,
            mut bdata: BusData<MockI2CDevice, SMBusOps>,
            chip: ChipType,
            name: &str,
        ) -> Result<(), CoreError> {
            let wiper = bdata.read_u8_at(0x00)?;
            self.devices.insert(
                handle,
                Bound {
                    bdata,
                    chip,
                    name: name.to_string(),
                    wiper,
                },
            );
            Ok(())
        }
    }

    /// Core over a borrowed device: reads a wiper as soon as it gets the bus
    #[derive(Default)]
    struct ReadingCore {
        bound: usize,
    }

    impl DpotUnbind for ReadingCore {
        type Error = MockI2CError;

        fn remove(&mut self, _handle: DeviceHandle) -> Result<(), MockI2CError> {
            self.bound = self.bound.saturating_sub(1);
            Ok(())
        }
    }

    impl<'a> DpotCore<&'a mut MockI2CDevice, SMBusOps> for ReadingCore {
        fn probe(
            &mut self,
            _handle: DeviceHandle,
            mut bdata: BusData<&'a mut MockI2CDevice, SMBusOps>,
            _chip: ChipType,
            _name: &str,
        ) -> Result<(), MockI2CError> {
            bdata.read_u16_at(0x00)?;
            self.bound += 1;
            Ok(())
        }
    }

    const HANDLE: DeviceHandle = DeviceHandle {
        adapter: 1,
        address: 0x2C,
    };

    #[test]
    fn binds_known_id() {
        let driver = DpotI2CDriver::new();
        let mut core = FakeCore::default();
        let mut dev = MockI2CDevice::new();
        dev.regmap.write_regs(0x00, &[0x80]);

        let id = driver
            .probe(&mut core, HANDLE, dev, DeviceMatch::Id("ad5243"))
            .unwrap();
        assert_eq!(id.chip, ChipType::AD5243);

        let bound = &core.devices[&HANDLE];
        assert_eq!(bound.chip, ChipType::AD5243);
        assert_eq!(bound.name, "ad5243");
        assert_eq!(bound.wiper, 0x80);
        assert_eq!(bound.bdata.client().transactions(), 1);
    }

    #[test]
    fn refuses_adapter_without_word_data() {
        let driver = DpotI2CDriver::new();
        let mut core = FakeCore::default();
        let mut dev = MockI2CDevice::new();
        dev.set_functionality(
            I2CFunctions::I2C_FUNC_SMBUS_BYTE | I2CFunctions::I2C_FUNC_SMBUS_BYTE_DATA,
        );

        let err = driver
            .probe(&mut core, HANDLE, dev, DeviceMatch::Id("ad5243"))
            .unwrap_err();
        match &err {
            Error::Unsupported(missing) => {
                assert_eq!(*missing, I2CFunctions::I2C_FUNC_SMBUS_WORD_DATA)
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(err.errno(), Some(-libc::EIO));
        assert!(core.devices.is_empty());
    }

    #[test]
    fn refusal_names_only_the_missing_direction() {
        let driver = DpotI2CDriver::new();
        let mut core = FakeCore::default();
        let mut dev = MockI2CDevice::new();
        dev.set_functionality(I2CFunctions::I2C_FUNC_SMBUS_READ_WORD_DATA);

        let err = driver
            .probe(&mut core, HANDLE, dev, DeviceMatch::Id("ad5243"))
            .unwrap_err();
        match &err {
            Error::Unsupported(missing) => {
                assert_eq!(*missing, I2CFunctions::I2C_FUNC_SMBUS_WRITE_WORD_DATA)
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(err.errno(), Some(-libc::EIO));
        assert!(core.devices.is_empty());
    }

    #[test]
    fn failed_functionality_query_is_a_bus_error() {
        let driver = DpotI2CDriver::new();
        let mut core = ReadingCore::default();
        let mut dev = MockI2CDevice::new();
        dev.fail_functionality(Some(-5));

        let err = driver
            .probe(&mut core, HANDLE, &mut dev, DeviceMatch::Id("ad5243"))
            .unwrap_err();
        assert_eq!(err.errno(), None);
        match err {
            Error::Bus(e) => assert_eq!(e, MockI2CError::Errno(-5)),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(dev.transactions(), 0);
        assert_eq!(core.bound, 0);
    }

    #[test]
    fn refused_probe_issues_no_transactions() {
        let driver = DpotI2CDriver::new();
        let mut core = ReadingCore::default();
        let mut dev = MockI2CDevice::new();

        dev.set_functionality(I2CFunctions::empty());
        let result = driver.probe(&mut core, HANDLE, &mut dev, DeviceMatch::Id("ad5243"));
        assert!(matches!(result, Err(Error::Unsupported(_))));
        assert_eq!(dev.transactions(), 0);

        dev.set_functionality(I2CFunctions::I2C_FUNC_SMBUS_EMUL);
        let result = driver.probe(&mut core, HANDLE, &mut dev, DeviceMatch::Id("unknown-chip"));
        assert!(matches!(result, Err(Error::UnknownDevice(_))));
        assert_eq!(dev.transactions(), 0);

        let result = driver.probe(&mut core, HANDLE, &mut dev, DeviceMatch::Id("ad5243"));
        assert!(result.is_ok());
        assert_eq!(dev.transactions(), 1);
        assert_eq!(core.bound, 1);
    }

    #[test]
    fn unknown_device_is_not_recognized() {
        let driver = DpotI2CDriver::new();
        let mut core = FakeCore::default();

        let err = driver
            .probe(&mut core, HANDLE, MockI2CDevice::new(), DeviceMatch::Id("unknown-chip"))
            .unwrap_err();
        match &err {
            Error::UnknownDevice(key) => assert_eq!(key, "unknown-chip"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(err.errno(), Some(-libc::ENODEV));

        let err = driver
            .probe(&mut core, HANDLE, MockI2CDevice::new(), DeviceMatch::Compatible("unknown-chip"))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownDevice(_)));
        assert!(core.devices.is_empty());
    }

    #[cfg(feature = "of")]
    #[test]
    fn compatible_forwards_model_name() {
        let driver = DpotI2CDriver::new();
        let mut core = FakeCore::default();

        let id = driver
            .probe(&mut core, HANDLE, MockI2CDevice::new(), DeviceMatch::Compatible("adi,ad5254"))
            .unwrap();
        assert_eq!(id.name, "adi,ad5254");
        assert_eq!(core.devices[&HANDLE].name, "ad5254");
        assert_eq!(core.devices[&HANDLE].chip, ChipType::AD5254);
    }

    #[test]
    fn core_failure_is_forwarded() {
        let driver = DpotI2CDriver::new();
        let mut core = FakeCore::default();
        let mut dev = MockI2CDevice::new();
        dev.fail_with(Some(-121));

        let err = driver
            .probe(&mut core, HANDLE, dev, DeviceMatch::Id("ad5258"))
            .unwrap_err();
        assert_eq!(err.errno(), None);
        match err {
            Error::Core(CoreError::Bus(e)) => assert_eq!(e, MockI2CError::Errno(-121)),
            other => panic!("unexpected {:?}", other),
        }
        assert!(core.devices.is_empty());
    }

    #[test]
    fn remove_forwards_handle() {
        let driver = DpotI2CDriver::new();
        let mut core = FakeCore::default();
        let other = DeviceHandle::new(1, 0x2D);

        driver
            .probe(&mut core, HANDLE, MockI2CDevice::new(), DeviceMatch::Id("ad5252"))
            .unwrap();
        driver
            .probe(&mut core, other, MockI2CDevice::new(), DeviceMatch::Id("ad5252"))
            .unwrap();

        driver.remove(&mut core, HANDLE).unwrap();
        assert!(!core.devices.contains_key(&HANDLE));
        assert!(core.devices.contains_key(&other));

        let err = driver.remove(&mut core, HANDLE).unwrap_err();
        assert_eq!(err, CoreError::NoDevice);
    }

    #[test]
    fn handle_display() {
        assert_eq!(HANDLE.to_string(), "1-002c");
    }
}
