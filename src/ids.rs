// Copyright 2015, Paul Osborne <osbpau@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

//! Device identity tables.
//!
//! Devices are matched either by their I2C device id (`"ad5243"`) or by a
//! device-tree compatible string (`"adi,ad5243"`).  Both tables are plain
//! static slices; the first exact match wins and a miss is `None`.

use crate::chip::ChipType;

/// One entry of an identity table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId {
    /// I2C device id or compatible string
    pub name: &'static str,
    pub chip: ChipType,
}

impl DeviceId {
    pub const fn new(name: &'static str, chip: ChipType) -> DeviceId {
        DeviceId { name, chip }
    }

    /// Name the core sees for this device
    ///
    /// Compatible strings drop their vendor prefix, so `"adi,ad5243"`
    /// becomes `"ad5243"`.
    pub fn display_name(&self) -> &'static str {
        match self.name.split_once(',') {
            Some((_, model)) => model,
            None => self.name,
        }
    }
}

/// What an enumeration event presented for matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMatch<'a> {
    /// Discrete I2C device id
    Id(&'a str),
    /// Device-tree compatible string
    Compatible(&'a str),
}

impl<'a> DeviceMatch<'a> {
    pub fn key(&self) -> &'a str {
        match *self {
            DeviceMatch::Id(key) | DeviceMatch::Compatible(key) => key,
        }
    }
}

/// I2C device ids handled by this driver
pub static DPOT_I2C_IDS: &[DeviceId] = &[
    DeviceId::new("ad5258", ChipType::AD5258),
    DeviceId::new("ad5259", ChipType::AD5259),
    DeviceId::new("ad5251", ChipType::AD5251),
    DeviceId::new("ad5252", ChipType::AD5252),
    DeviceId::new("ad5253", ChipType::AD5253),
    DeviceId::new("ad5254", ChipType::AD5254),
    DeviceId::new("ad5255", ChipType::AD5255),
    DeviceId::new("ad5241", ChipType::AD5241),
    DeviceId::new("ad5242", ChipType::AD5242),
    DeviceId::new("ad5243", ChipType::AD5243),
    DeviceId::new("ad5245", ChipType::AD5245),
    DeviceId::new("ad5246", ChipType::AD5246),
    DeviceId::new("ad5247", ChipType::AD5247),
    DeviceId::new("ad5248", ChipType::AD5248),
    DeviceId::new("ad5280", ChipType::AD5280),
    DeviceId::new("ad5282", ChipType::AD5282),
    DeviceId::new("adn2860", ChipType::ADN2860),
    DeviceId::new("ad5273", ChipType::AD5273),
    DeviceId::new("ad5161", ChipType::AD5161),
    DeviceId::new("ad5171", ChipType::AD5171),
    DeviceId::new("ad5170", ChipType::AD5170),
    DeviceId::new("ad5172", ChipType::AD5172),
    DeviceId::new("ad5173", ChipType::AD5173),
    DeviceId::new("ad5272", ChipType::AD5272),
    DeviceId::new("ad5274", ChipType::AD5274),
];

/// Device-tree compatible strings, one per I2C device id
#[cfg(feature = "of")]
pub static DPOT_OF_MATCH: &[DeviceId] = &[
    DeviceId::new("adi,ad5258", ChipType::AD5258),
    DeviceId::new("adi,ad5259", ChipType::AD5259),
    DeviceId::new("adi,ad5251", ChipType::AD5251),
    DeviceId::new("adi,ad5252", ChipType::AD5252),
    DeviceId::new("adi,ad5253", ChipType::AD5253),
    DeviceId::new("adi,ad5254", ChipType::AD5254),
    DeviceId::new("adi,ad5255", ChipType::AD5255),
    DeviceId::new("adi,ad5241", ChipType::AD5241),
    DeviceId::new("adi,ad5242", ChipType::AD5242),
    DeviceId::new("adi,ad5243", ChipType::AD5243),
    DeviceId::new("adi,ad5245", ChipType::AD5245),
    DeviceId::new("adi,ad5246", ChipType::AD5246),
    DeviceId::new("adi,ad5247", ChipType::AD5247),
    DeviceId::new("adi,ad5248", ChipType::AD5248),
    DeviceId::new("adi,ad5280", ChipType::AD5280),
    DeviceId::new("adi,ad5282", ChipType::AD5282),
    DeviceId::new("adi,adn2860", ChipType::ADN2860),
    DeviceId::new("adi,ad5273", ChipType::AD5273),
    DeviceId::new("adi,ad5161", ChipType::AD5161),
    DeviceId::new("adi,ad5171", ChipType::AD5171),
    DeviceId::new("adi,ad5170", ChipType::AD5170),
    DeviceId::new("adi,ad5172", ChipType::AD5172),
    DeviceId::new("adi,ad5173", ChipType::AD5173),
    DeviceId::new("adi,ad5272", ChipType::AD5272),
    DeviceId::new("adi,ad5274", ChipType::AD5274),
];

#[cfg(not(feature = "of"))]
pub static DPOT_OF_MATCH: &[DeviceId] = &[];

/// First entry of `table` whose name is exactly `key`
///
/// An empty key never matches.
pub fn lookup<'t>(table: &'t [DeviceId], key: &str) -> Option<&'t DeviceId> {
    if key.is_empty() {
        return None;
    }
    table.iter().find(|id| id.name == key)
}

pub fn lookup_id(name: &str) -> Option<&'static DeviceId> {
    lookup(DPOT_I2C_IDS, name)
}

pub fn lookup_compatible(compatible: &str) -> Option<&'static DeviceId> {
    lookup(DPOT_OF_MATCH, compatible)
}

/// Resolve a match request against the table it addresses
pub fn resolve(matched: DeviceMatch<'_>) -> Option<&'static DeviceId> {
    match matched {
        DeviceMatch::Id(name) => lookup_id(name),
        DeviceMatch::Compatible(compatible) => lookup_compatible(compatible),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn every_id_resolves_to_its_tag() {
        for id in DPOT_I2C_IDS {
            assert_eq!(lookup_id(id.name).map(|found| found.chip), Some(id.chip));
        }
    }

    #[test]
    fn ids_are_unique() {
        for (i, id) in DPOT_I2C_IDS.iter().enumerate() {
            assert!(!DPOT_I2C_IDS[i + 1..].iter().any(|other| other.name == id.name));
        }
    }

    #[test_case("ad5243", ChipType::AD5243 ; "ad5243")]
    #[test_case("adn2860", ChipType::ADN2860 ; "adn2860")]
    #[test_case("ad5274", ChipType::AD5274 ; "ad5274")]
    fn id_lookup(name: &str, chip: ChipType) {
        assert_eq!(resolve(DeviceMatch::Id(name)).unwrap().chip, chip);
    }

    #[test_case("" ; "empty")]
    #[test_case("unknown-chip" ; "unknown")]
    #[test_case("AD5243" ; "case sensitive")]
    #[test_case("ad524" ; "prefix")]
    #[test_case("adi,ad5243" ; "compatible in id table")]
    fn id_misses(name: &str) {
        assert_eq!(lookup_id(name), None);
    }

    #[test]
    fn aliases_resolve_independently() {
        static TABLE: &[DeviceId] = &[
            DeviceId::new("ad5241", ChipType::AD5241),
            DeviceId::new("ad5242", ChipType::AD5242),
            DeviceId::new("ad5242-alt", ChipType::AD5242),
        ];
        assert_eq!(lookup(TABLE, "ad5242").unwrap().chip, ChipType::AD5242);
        assert_eq!(lookup(TABLE, "ad5242-alt").unwrap().chip, ChipType::AD5242);
        assert_eq!(lookup(TABLE, "ad5242-alt").unwrap().name, "ad5242-alt");
    }

    #[test]
    fn first_match_wins() {
        static TABLE: &[DeviceId] = &[
            DeviceId::new("ad5263", ChipType::AD5242),
            DeviceId::new("ad5263", ChipType::AD5243),
        ];
        assert_eq!(lookup(TABLE, "ad5263").unwrap().chip, ChipType::AD5242);
    }

    #[test]
    fn empty_name_entry_never_matches() {
        static TABLE: &[DeviceId] = &[DeviceId::new("", ChipType::AD5241)];
        assert_eq!(lookup(TABLE, ""), None);
    }

    #[test]
    fn display_name_strips_vendor() {
        assert_eq!(DeviceId::new("adi,ad5243", ChipType::AD5243).display_name(), "ad5243");
        assert_eq!(DeviceId::new("ad5243", ChipType::AD5243).display_name(), "ad5243");
    }

    #[cfg(feature = "of")]
    #[test]
    fn every_compatible_has_an_id_twin() {
        assert_eq!(DPOT_OF_MATCH.len(), DPOT_I2C_IDS.len());
        for of in DPOT_OF_MATCH {
            let twin = lookup_id(of.display_name()).expect("compatible without i2c id");
            assert_eq!(twin.chip, of.chip);
            assert_eq!(lookup_compatible(of.name), Some(of));
        }
    }

    #[cfg(feature = "of")]
    #[test]
    fn compatible_lookup() {
        let found = resolve(DeviceMatch::Compatible("adi,ad5243")).unwrap();
        assert_eq!(found.chip, ChipType::AD5243);
        assert_eq!(resolve(DeviceMatch::Compatible("ad5243")), None);
        assert_eq!(resolve(DeviceMatch::Compatible("adi,ad5270")), None);
    }

    #[cfg(not(feature = "of"))]
    #[test]
    fn compatible_lookup_disabled() {
        assert_eq!(resolve(DeviceMatch::Compatible("adi,ad5243")), None);
    }
}
