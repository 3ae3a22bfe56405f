//! Android resource references and values
//!
//! Menu attributes point at other resources (`@+id/action_search`,
//! `@string/search`, `@color/accent`). This module parses those references
//! and resolves the ones a menu build needs: stable integer ids and
//! string/color values loaded from `res/values*` directories.

mod table;

pub use table::ResourceTable;

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// First id handed out for app-package `@+id/` names
pub const APP_ID_BASE: i32 = 0x7f08_0000;
/// First id handed out for `@android:id/` names
pub const FRAMEWORK_ID_BASE: i32 = 0x0102_0000;

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([@?])(\+)?(?:([A-Za-z][\w.]*):)?([A-Za-z_]\w*)/([\w.]+)$")
            .expect("resource reference pattern is valid")
    })
}

/// A parsed `@[+][package:]type/name` or `?[package:]attr/name` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub package: Option<String>,
    pub kind: String,
    pub name: String,
    /// `@+id/...` creates the id if it does not exist yet
    pub create: bool,
    /// `?attr/...` theme attribute rather than a direct reference
    pub theme_attribute: bool,
}

impl ResourceRef {
    pub fn parse(value: &str) -> Option<Self> {
        let caps = reference_regex().captures(value.trim())?;

        Some(Self {
            theme_attribute: &caps[1] == "?",
            create: caps.get(2).is_some(),
            package: caps.get(3).map(|m| m.as_str().to_string()),
            kind: caps[4].to_string(),
            name: caps[5].to_string(),
        })
    }

    pub fn is_framework(&self) -> bool {
        self.package.as_deref() == Some("android")
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.theme_attribute { "?" } else { "@" })?;
        if self.create {
            f.write_str("+")?;
        }
        if let Some(package) = &self.package {
            write!(f, "{}:", package)?;
        }
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Parse a `#RGB`, `#ARGB`, `#RRGGBB` or `#AARRGGBB` literal into ARGB
pub fn parse_color_literal(value: &str) -> Option<u32> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expand = |s: &str| -> Option<u32> {
        let doubled: String = s.chars().flat_map(|c| [c, c]).collect();
        u32::from_str_radix(&doubled, 16).ok()
    };

    match hex.len() {
        3 => expand(hex).map(|rgb| 0xff00_0000 | rgb),
        4 => expand(hex),
        6 => u32::from_str_radix(hex, 16).ok().map(|rgb| 0xff00_0000 | rgb),
        8 => u32::from_str_radix(hex, 16).ok(),
        _ => None,
    }
}
