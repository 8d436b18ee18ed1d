// Copyright 2015, Paul Osborne <osbpau@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

#[cfg(any(target_os = "linux", target_os = "android"))]
use ad525x_dpot::chip::Wipers;
#[cfg(any(target_os = "linux", target_os = "android"))]
use ad525x_dpot::linux::{LinuxI2CDevice, LinuxI2CError};
#[cfg(any(target_os = "linux", target_os = "android"))]
use ad525x_dpot::{
    BusData, ChipType, DeviceHandle, DeviceMatch, DpotCore, DpotI2CDriver, DpotUnbind, SMBusOps,
};

use docopt::Docopt;
use std::env::args;

const USAGE: &str = "
Binds a digital potentiometer on a Linux i2c-dev adapter and dumps its
wiper registers.

Usage:
  dpot [--compatible] <device> <addr> <chip>
  dpot (-h | --help)
  dpot --version

<addr> is the 7-bit slave address, hex with a 0x prefix (0x2c) or
decimal without one (44).

Options:
  --compatible  Match <chip> as a device-tree compatible string (adi,ad5243).
  -h --help     Show this help text.
  --version     Show version.
";

/// Reads every wiper once when the device is bound
#[cfg(any(target_os = "linux", target_os = "android"))]
struct WiperDump;

#[cfg(any(target_os = "linux", target_os = "android"))]
impl DpotUnbind for WiperDump {
    type Error = LinuxI2CError;

    fn remove(&mut self, _handle: DeviceHandle) -> Result<(), LinuxI2CError> {
        Ok(())
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
impl DpotCore<LinuxI2CDevice, SMBusOps> for WiperDump {
    fn probe(
        &mut self,
        handle: DeviceHandle,
        mut bdata: BusData<LinuxI2CDevice, SMBusOps>,
        chip: ChipType,
        name: &str,
    ) -> Result<(), LinuxI2CError> {
        println!(
            "{}: {} with {} wiper(s), {} positions",
            handle,
            name,
            chip.wiper_count(),
            chip.max_position()
        );
        for rdac in 0..6u8 {
            if !chip.wipers().contains(Wipers::from_bits_truncate(1 << rdac)) {
                continue;
            }
            let value = if chip.is_wide() {
                bdata.read_u16_at(rdac)?
            } else {
                u16::from(bdata.read_u8_at(rdac)?)
            };
            println!("  RDAC{}: 0x{:03x}", rdac, value);
        }
        Ok(())
    }
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn main() {}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Docopt::new(USAGE)
        .and_then(|d| d.argv(args()).parse())
        .unwrap_or_else(|e| e.exit());
    let path = args.get_str("<device>");
    let addr = args.get_str("<addr>");
    let chip = args.get_str("<chip>");

    let parsed = match addr.strip_prefix("0x").or_else(|| addr.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => addr.parse(),
    };
    let addr = match parsed {
        Ok(addr) => addr,
        Err(_e) => {
            println!("Bad address {}: {}", addr, _e);
            return;
        }
    };

    let dev = match LinuxI2CDevice::new(path, addr) {
        Ok(dev) => dev,
        Err(_e) => {
            println!("Error opening I2C Bus {} {}", path, _e);
            return;
        }
    };

    let handle = DeviceHandle::new(dev.adapter().unwrap_or(0), addr);
    let matched = if args.get_bool("--compatible") {
        DeviceMatch::Compatible(chip)
    } else {
        DeviceMatch::Id(chip)
    };

    let driver = DpotI2CDriver::new();
    let mut core = WiperDump;
    match driver.probe(&mut core, handle, dev, matched) {
        Ok(id) => println!("Bound {} as {:?}", handle, id.chip),
        Err(_e) => {
            println!("Error binding {}: {}", handle, _e);
            return;
        }
    }

    if let Err(_e) = driver.remove(&mut core, handle) {
        println!("Error removing {}: {}", handle, _e);
    }
}
