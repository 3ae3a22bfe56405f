// Value types for menu attributes and the packing rules between them

use crate::resources::ResourceRef;
use std::fmt;

/// `Menu.NONE`: no group / no item id
pub const NO_ID: i32 = 0;

pub const CATEGORY_MASK: u32 = 0xffff_0000;
pub const USER_MASK: u32 = 0x0000_ffff;
pub const CATEGORY_SHIFT: u32 = 16;

/// Display priority per category index (none, container, system, secondary,
/// alternative, selected alternative)
const CATEGORY_TO_ORDER: [u32; 6] = [1, 4, 5, 3, 2, 0];

/// How an item participates in check state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckableMode {
    #[default]
    None,
    All,
    Exclusive,
}

impl CheckableMode {
    pub fn from_value(value: i64) -> Self {
        match value {
            v if v <= 0 => CheckableMode::None,
            1 => CheckableMode::All,
            _ => CheckableMode::Exclusive,
        }
    }

    pub fn value(self) -> i32 {
        match self {
            CheckableMode::None => 0,
            CheckableMode::All => 1,
            CheckableMode::Exclusive => 2,
        }
    }

    /// Parse a group's `checkableBehavior`
    pub fn parse_behavior(value: &str) -> Option<Self> {
        match value.trim() {
            "none" => Some(CheckableMode::None),
            "all" => Some(CheckableMode::All),
            "single" => Some(CheckableMode::Exclusive),
            other => parse_int(other).map(CheckableMode::from_value),
        }
    }

    pub fn is_checkable(self) -> bool {
        self != CheckableMode::None
    }

    pub fn name(self) -> &'static str {
        match self {
            CheckableMode::None => "none",
            CheckableMode::All => "all",
            CheckableMode::Exclusive => "single",
        }
    }
}

/// Menu category, the upper half of an order key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    None,
    Container,
    System,
    Secondary,
    Alternative,
}

impl Category {
    pub fn bits(self) -> u32 {
        match self {
            Category::None => 0,
            Category::Container => 0x0001_0000,
            Category::System => 0x0002_0000,
            Category::Secondary => 0x0003_0000,
            Category::Alternative => 0x0004_0000,
        }
    }

    /// Parse a `menuCategory` value into its raw bits
    pub fn parse(value: &str) -> Option<u32> {
        let category = match value.trim() {
            "container" => Category::Container,
            "system" => Category::System,
            "secondary" => Category::Secondary,
            "alternative" => Category::Alternative,
            other => return parse_int(other).map(|v| v as u32),
        };
        Some(category.bits())
    }
}

/// Pack a category and an in-category order into one ordering key
pub fn pack_order(category: u32, order: u32) -> u32 {
    (category & CATEGORY_MASK) | (order & USER_MASK)
}

/// Sort key used when presenting items: category priority, then order
pub fn display_ordering(order_key: u32) -> u32 {
    let index = ((order_key & CATEGORY_MASK) >> CATEGORY_SHIFT) as usize;
    let priority = CATEGORY_TO_ORDER.get(index).copied().unwrap_or(0);
    (priority << CATEGORY_SHIFT) | (order_key & USER_MASK)
}

/// Action bar placement flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShowAsAction(pub u32);

impl ShowAsAction {
    pub const NEVER: u32 = 0;
    pub const IF_ROOM: u32 = 1;
    pub const ALWAYS: u32 = 2;
    pub const WITH_TEXT: u32 = 4;
    pub const COLLAPSE_ACTION_VIEW: u32 = 8;

    /// Parse `ifRoom|withText` style flag lists or a raw integer.
    /// Negative integers mean unset and yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(raw) = parse_int(value) {
            return u32::try_from(raw).ok().map(ShowAsAction);
        }

        let mut flags = 0;
        for part in value.split('|') {
            flags |= match part.trim() {
                "never" => Self::NEVER,
                "ifRoom" => Self::IF_ROOM,
                "always" => Self::ALWAYS,
                "withText" => Self::WITH_TEXT,
                "collapseActionView" => Self::COLLAPSE_ACTION_VIEW,
                _ => return None,
            };
        }
        Some(ShowAsAction(flags))
    }

    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag
    }
}

impl fmt::Display for ShowAsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let placement = match self.0 & 0x3 {
            Self::IF_ROOM => "ifRoom",
            Self::ALWAYS => "always",
            _ => "never",
        };
        f.write_str(placement)?;
        if self.contains(Self::WITH_TEXT) {
            f.write_str("|withText")?;
        }
        if self.contains(Self::COLLAPSE_ACTION_VIEW) {
            f.write_str("|collapseActionView")?;
        }
        Ok(())
    }
}

/// Keyboard modifier mask for shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers(pub u32);

impl Modifiers {
    pub const SHIFT: u32 = 0x01;
    pub const ALT: u32 = 0x02;
    pub const SYM: u32 = 0x04;
    pub const FUNCTION: u32 = 0x08;
    pub const CTRL: u32 = 0x1000;
    pub const META: u32 = 0x10000;

    pub const fn ctrl() -> Self {
        Modifiers(Self::CTRL)
    }

    /// Parse `CTRL|SHIFT` style lists or a raw integer
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(raw) = parse_int(value) {
            return u32::try_from(raw).ok().map(Modifiers);
        }

        let mut mask = 0;
        for part in value.split('|') {
            mask |= match part.trim() {
                "META" => Self::META,
                "CTRL" => Self::CTRL,
                "ALT" => Self::ALT,
                "SHIFT" => Self::SHIFT,
                "SYM" => Self::SYM,
                "FUNCTION" => Self::FUNCTION,
                _ => return None,
            };
        }
        Some(Modifiers(mask))
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::ctrl()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::META, "META"),
            (Self::CTRL, "CTRL"),
            (Self::ALT, "ALT"),
            (Self::SHIFT, "SHIFT"),
            (Self::SYM, "SYM"),
            (Self::FUNCTION, "FUNCTION"),
        ];
        let parts: Vec<&str> = names
            .iter()
            .filter(|(bit, _)| self.0 & bit != 0)
            .map(|(_, name)| *name)
            .collect();
        if parts.is_empty() {
            f.write_str("NONE")
        } else {
            f.write_str(&parts.join("+"))
        }
    }
}

/// A shortcut character with its modifier mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: char,
    pub modifiers: Modifiers,
}

/// Blend mode for icon tinting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    SrcOver,
    SrcIn,
    SrcAtop,
    Multiply,
    Screen,
    Add,
}

impl BlendMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "src_over" => Some(BlendMode::SrcOver),
            "src_in" => Some(BlendMode::SrcIn),
            "src_atop" => Some(BlendMode::SrcAtop),
            "multiply" => Some(BlendMode::Multiply),
            "screen" => Some(BlendMode::Screen),
            "add" => Some(BlendMode::Add),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlendMode::SrcOver => "src_over",
            BlendMode::SrcIn => "src_in",
            BlendMode::SrcAtop => "src_atop",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Add => "add",
        }
    }
}

/// Icon tint: a literal ARGB color or an unresolved reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TintList {
    Color(u32),
    Reference(ResourceRef),
}

impl fmt::Display for TintList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TintList::Color(argb) => write!(f, "#{:08x}", argb),
            TintList::Reference(r) => write!(f, "{}", r),
        }
    }
}

/// Decimal or `0x` hex integer
pub fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i64>().ok()?,
    };
    Some(if negative { -parsed } else { parsed })
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
