// Copyright 2015, Paul Osborne <osbpau@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

bitflags::bitflags! {
    /// What a part can do beyond plain wiper access
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u32 {
        /// INC/DEC ALL, 6dB steps
        const CMD_INC = 1 << 0;
        /// EEPROM behind the RDACs
        const CMD_EEP = 1 << 1;
        /// one time programmable fuse
        const CMD_OTP = 1 << 2;
        /// tolerance register
        const CMD_TOL = 1 << 3;
        const RDACS_RW = 1 << 4;
        const RDACS_WONLY = 1 << 5;
        /// RDAC address appended to the data
        const AD_APPDATA = 1 << 6;
        const SPI_8BIT = 1 << 7;

        const RDACS_RW_TOL = Self::RDACS_RW.bits() | Self::CMD_EEP.bits() | Self::CMD_TOL.bits();
        const RDACS_RW_EEP = Self::RDACS_RW.bits() | Self::CMD_EEP.bits();
    }
}

bitflags::bitflags! {
    /// Wipers (RDACs) present on a part, by address
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Wipers: u8 {
        const RDAC0 = 1 << 0;
        const RDAC1 = 1 << 1;
        const RDAC2 = 1 << 2;
        const RDAC3 = 1 << 3;
        const RDAC4 = 1 << 4;
        const RDAC5 = 1 << 5;
    }
}

// features << 18 | wipers << 10 | resolution bits << 6 | unique id
const fn conf(features: Features, wipers: Wipers, bits: u32, uid: u32) -> u32 {
    (features.bits() << 18) | ((wipers.bits() as u32) << 10) | ((bits & 0xF) << 6) | (uid & 0x3F)
}

const B0: Wipers = Wipers::RDAC0;
const B01: Wipers = Wipers::RDAC0.union(Wipers::RDAC1);
const B13: Wipers = Wipers::RDAC1.union(Wipers::RDAC3);
const B012: Wipers = B01.union(Wipers::RDAC2);
const B0123: Wipers = B012.union(Wipers::RDAC3);

const RW: Features = Features::RDACS_RW;
const RW_OTP: Features = Features::RDACS_RW.union(Features::CMD_OTP);
const RW_TOL: Features = Features::RDACS_RW_TOL;
const RW_TOL_INC: Features = Features::RDACS_RW_TOL.union(Features::CMD_INC);
const WONLY_APPDATA: Features = Features::RDACS_WONLY
    .union(Features::AD_APPDATA)
    .union(Features::SPI_8BIT);

/// Chip-type tag of a supported silicon part
///
/// The tag is decoupled from the marketing name; its packed configuration
/// word tells the core how many wipers the part has, how wide they are and
/// which commands it understands.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipType {
    AD5258,
    AD5259,
    AD5251,
    AD5252,
    AD5253,
    AD5254,
    AD5255,
    AD5161,
    AD5241,
    AD5242,
    AD5243,
    AD5245,
    AD5246,
    AD5247,
    AD5248,
    AD5280,
    AD5282,
    ADN2860,
    AD5273,
    AD5171,
    AD5170,
    AD5172,
    AD5173,
    AD5272,
    AD5274,
}

impl ChipType {
    pub const ALL: &'static [ChipType] = &[
        ChipType::AD5258,
        ChipType::AD5259,
        ChipType::AD5251,
        ChipType::AD5252,
        ChipType::AD5253,
        ChipType::AD5254,
        ChipType::AD5255,
        ChipType::AD5161,
        ChipType::AD5241,
        ChipType::AD5242,
        ChipType::AD5243,
        ChipType::AD5245,
        ChipType::AD5246,
        ChipType::AD5247,
        ChipType::AD5248,
        ChipType::AD5280,
        ChipType::AD5282,
        ChipType::ADN2860,
        ChipType::AD5273,
        ChipType::AD5171,
        ChipType::AD5170,
        ChipType::AD5172,
        ChipType::AD5173,
        ChipType::AD5272,
        ChipType::AD5274,
    ];

    /// Packed configuration word handed to the core as driver data
    pub const fn config(self) -> u32 {
        match self {
            ChipType::AD5258 => conf(RW_TOL, B0, 6, 0),
            ChipType::AD5259 => conf(RW_TOL, B0, 8, 1),
            ChipType::AD5251 => conf(RW_TOL_INC, B13, 6, 2),
            ChipType::AD5252 => conf(RW_TOL_INC, B13, 8, 3),
            ChipType::AD5253 => conf(RW_TOL_INC, B0123, 6, 4),
            ChipType::AD5254 => conf(RW_TOL_INC, B0123, 8, 5),
            ChipType::AD5255 => conf(RW_TOL_INC, B012, 9, 6),
            ChipType::AD5161 => conf(WONLY_APPDATA, B0, 8, 7),
            ChipType::AD5241 => conf(RW, B0, 8, 8),
            ChipType::AD5242 => conf(RW, B01, 8, 9),
            ChipType::AD5243 => conf(RW, B01, 8, 10),
            ChipType::AD5245 => conf(RW, B0, 8, 11),
            ChipType::AD5246 => conf(RW, B0, 7, 12),
            ChipType::AD5247 => conf(RW, B0, 7, 13),
            ChipType::AD5248 => conf(RW, B01, 8, 14),
            ChipType::AD5280 => conf(RW, B0, 8, 15),
            ChipType::AD5282 => conf(RW, B01, 8, 16),
            ChipType::ADN2860 => conf(RW_TOL_INC, B012, 9, 17),
            ChipType::AD5273 => conf(RW_OTP, B0, 6, 18),
            ChipType::AD5171 => conf(RW_OTP, B0, 6, 19),
            ChipType::AD5170 => conf(RW_OTP, B0, 8, 20),
            ChipType::AD5172 => conf(RW_OTP, B01, 8, 21),
            ChipType::AD5173 => conf(RW_OTP, B01, 8, 22),
            ChipType::AD5272 => conf(RW_OTP, B0, 10, 23),
            ChipType::AD5274 => conf(RW_OTP, B0, 8, 24),
        }
    }

    /// Look a tag up by its packed configuration word
    pub fn from_config(config: u32) -> Option<ChipType> {
        ChipType::ALL.iter().copied().find(|chip| chip.config() == config)
    }

    pub fn features(self) -> Features {
        Features::from_bits_truncate(self.config() >> 18)
    }

    pub fn wipers(self) -> Wipers {
        Wipers::from_bits_truncate(((self.config() >> 10) & 0xFF) as u8)
    }

    pub fn wiper_count(self) -> u32 {
        self.wipers().bits().count_ones()
    }

    /// Width of a wiper register in bits
    pub fn resolution_bits(self) -> u32 {
        (self.config() >> 6) & 0xF
    }

    /// Number of tap positions
    pub fn max_position(self) -> u32 {
        1 << self.resolution_bits()
    }

    /// Whether a wiper value needs a 16 bit register access
    pub fn is_wide(self) -> bool {
        self.resolution_bits() > 8
    }

    pub fn uid(self) -> u32 {
        self.config() & 0x3F
    }

    pub fn name(self) -> &'static str {
        match self {
            ChipType::AD5258 => "ad5258",
            ChipType::AD5259 => "ad5259",
            ChipType::AD5251 => "ad5251",
            ChipType::AD5252 => "ad5252",
            ChipType::AD5253 => "ad5253",
            ChipType::AD5254 => "ad5254",
            ChipType::AD5255 => "ad5255",
            ChipType::AD5161 => "ad5161",
            ChipType::AD5241 => "ad5241",
            ChipType::AD5242 => "ad5242",
            ChipType::AD5243 => "ad5243",
            ChipType::AD5245 => "ad5245",
            ChipType::AD5246 => "ad5246",
            ChipType::AD5247 => "ad5247",
            ChipType::AD5248 => "ad5248",
            ChipType::AD5280 => "ad5280",
            ChipType::AD5282 => "ad5282",
            ChipType::ADN2860 => "adn2860",
            ChipType::AD5273 => "ad5273",
            ChipType::AD5171 => "ad5171",
            ChipType::AD5170 => "ad5170",
            ChipType::AD5172 => "ad5172",
            ChipType::AD5173 => "ad5173",
            ChipType::AD5272 => "ad5272",
            ChipType::AD5274 => "ad5274",
        }
    }
}

impl fmt::Display for ChipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
