//! Items, tools, and dye colours handled by citizens.
//!
//! Inventory management itself is external; these are only the value types
//! that cross the collaborator boundary.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── DyeColor ──────────────────────────────────────────────────────────────────

/// The sixteen fleece colours, in metadata order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DyeColor {
    #[default]
    White,
    Orange,
    Magenta,
    LightBlue,
    Yellow,
    Lime,
    Pink,
    Gray,
    Silver,
    Cyan,
    Purple,
    Blue,
    Brown,
    Green,
    Red,
    Black,
}

impl DyeColor {
    pub const ALL: [DyeColor; 16] = [
        DyeColor::White,
        DyeColor::Orange,
        DyeColor::Magenta,
        DyeColor::LightBlue,
        DyeColor::Yellow,
        DyeColor::Lime,
        DyeColor::Pink,
        DyeColor::Gray,
        DyeColor::Silver,
        DyeColor::Cyan,
        DyeColor::Purple,
        DyeColor::Blue,
        DyeColor::Brown,
        DyeColor::Green,
        DyeColor::Red,
        DyeColor::Black,
    ];

    /// Colour for a metadata index in `0..16`.
    pub fn from_index(index: u8) -> CoreResult<DyeColor> {
        DyeColor::ALL
            .get(index as usize)
            .copied()
            .ok_or(CoreError::DyeIndex(index))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DyeColor::White     => "white",
            DyeColor::Orange    => "orange",
            DyeColor::Magenta   => "magenta",
            DyeColor::LightBlue => "light_blue",
            DyeColor::Yellow    => "yellow",
            DyeColor::Lime      => "lime",
            DyeColor::Pink      => "pink",
            DyeColor::Gray      => "gray",
            DyeColor::Silver    => "silver",
            DyeColor::Cyan      => "cyan",
            DyeColor::Purple    => "purple",
            DyeColor::Blue      => "blue",
            DyeColor::Brown     => "brown",
            DyeColor::Green     => "green",
            DyeColor::Red       => "red",
            DyeColor::Black     => "black",
        }
    }
}

impl fmt::Display for DyeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ToolType ──────────────────────────────────────────────────────────────────

/// Tool categories a behavior can require.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolType {
    Shears,
    Axe,
    Hoe,
}

impl ToolType {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolType::Shears => "shears",
            ToolType::Axe    => "axe",
            ToolType::Hoe    => "hoe",
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ItemKind / ItemStack ──────────────────────────────────────────────────────

/// What an item stack holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Wool(DyeColor),
    Mutton,
    Beef,
    Leather,
    Pork,
    Feather,
    Wheat,
    Seeds,
    Carrot,
    Tool(ToolType),
}

impl ItemKind {
    /// Tools never stack and stay with the citizen when it dumps its load.
    #[inline]
    pub fn is_tool(self) -> bool {
        matches!(self, ItemKind::Tool(_))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Wool(c) => write!(f, "{c}_wool"),
            ItemKind::Mutton  => f.write_str("mutton"),
            ItemKind::Beef    => f.write_str("beef"),
            ItemKind::Leather => f.write_str("leather"),
            ItemKind::Pork    => f.write_str("pork"),
            ItemKind::Feather => f.write_str("feather"),
            ItemKind::Wheat   => f.write_str("wheat"),
            ItemKind::Seeds   => f.write_str("seeds"),
            ItemKind::Carrot  => f.write_str("carrot"),
            ItemKind::Tool(t) => write!(f, "{t}"),
        }
    }
}

/// A counted stack of one item kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub kind:  ItemKind,
    pub count: u32,
}

impl ItemStack {
    #[inline]
    pub fn new(kind: ItemKind, count: u32) -> Self {
        Self { kind, count }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.count, self.kind)
    }
}
