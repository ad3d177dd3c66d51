//! Mineral rarity tiers and their lookup tables.
//!
//! Every table is an exhaustive `match`, so adding a tier is a compile error
//! until its value, colour and label are all defined.

use bevy::color::Color;
use serde::{Deserialize, Serialize};

/// Rarity tier of a scannable object, ordered from common to rare.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MineralType {
    Iron,
    Nickel,
    Silicon,
    Cobalt,
    Gold,
    Iridium,
    Neutronium,
    PsionicCrystal,
    Artifact,
}

impl MineralType {
    /// All tiers in ascending rarity.
    pub const ALL: [MineralType; 9] = [
        MineralType::Iron,
        MineralType::Nickel,
        MineralType::Silicon,
        MineralType::Cobalt,
        MineralType::Gold,
        MineralType::Iridium,
        MineralType::Neutronium,
        MineralType::PsionicCrystal,
        MineralType::Artifact,
    ];

    /// Sale value at the station (credits).
    #[inline]
    pub fn value(self) -> u32 {
        match self {
            MineralType::Iron => 10,
            MineralType::Nickel => 15,
            MineralType::Silicon => 20,
            MineralType::Cobalt => 50,
            MineralType::Gold => 100,
            MineralType::Iridium => 250,
            MineralType::Neutronium => 500,
            MineralType::PsionicCrystal => 1000,
            MineralType::Artifact => 5000,
        }
    }

    /// Display colour once scanned.
    pub fn color(self) -> Color {
        match self {
            MineralType::Iron => Color::srgb_u8(0x94, 0xa3, 0xb8),
            MineralType::Nickel => Color::srgb_u8(0xcb, 0xd5, 0xe1),
            MineralType::Silicon => Color::srgb_u8(0x64, 0x74, 0x8b),
            MineralType::Cobalt => Color::srgb_u8(0x3b, 0x82, 0xf6),
            MineralType::Gold => Color::srgb_u8(0xea, 0xb3, 0x08),
            MineralType::Iridium => Color::srgb_u8(0xa8, 0x55, 0xf7),
            MineralType::Neutronium => Color::srgb_u8(0xec, 0x48, 0x99),
            MineralType::PsionicCrystal => Color::srgb_u8(0x06, 0xb6, 0xd4),
            MineralType::Artifact => Color::srgb_u8(0xf4, 0x3f, 0x5e),
        }
    }

    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            MineralType::Iron => "Iron",
            MineralType::Nickel => "Nickel",
            MineralType::Silicon => "Silicon",
            MineralType::Cobalt => "Cobalt",
            MineralType::Gold => "Gold",
            MineralType::Iridium => "Iridium",
            MineralType::Neutronium => "Neutronium",
            MineralType::PsionicCrystal => "Psionic Crystal",
            MineralType::Artifact => "Alien Artifact",
        }
    }
}
