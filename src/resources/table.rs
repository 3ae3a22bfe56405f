use super::{parse_color_literal, ResourceRef, APP_ID_BASE, FRAMEWORK_ID_BASE};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, trace};

#[derive(Debug)]
struct IdSpace {
    assigned: HashMap<String, i32>,
    next_app: i32,
    next_framework: i32,
}

impl Default for IdSpace {
    fn default() -> Self {
        Self {
            assigned: HashMap::new(),
            next_app: APP_ID_BASE,
            next_framework: FRAMEWORK_ID_BASE,
        }
    }
}

/// Resolved resource values shared by every build in a run
///
/// Ids are handed out on first use, so the same `@+id/name` maps to the same
/// integer in every menu inflated against one table. Id assignment is behind
/// a lock; string and color values are read-only once loaded.
#[derive(Debug, Default)]
pub struct ResourceTable {
    ids: Mutex<IdSpace>,
    strings: HashMap<String, String>,
    colors: HashMap<String, u32>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integer id for an `id` reference, assigning one if needed
    pub fn id_for(&self, reference: &ResourceRef) -> i32 {
        let key = match &reference.package {
            Some(package) => format!("{}:{}", package, reference.name),
            None => reference.name.clone(),
        };

        let mut ids = match self.ids.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(id) = ids.assigned.get(&key) {
            return *id;
        }

        let id = if reference.is_framework() {
            let id = ids.next_framework;
            ids.next_framework += 1;
            id
        } else {
            let id = ids.next_app;
            ids.next_app += 1;
            id
        };
        trace!("Assigned id 0x{:08x} to {}", id, reference);
        ids.assigned.insert(key, id);
        id
    }

    /// Reverse lookup used by reporters
    pub fn id_name(&self, id: i32) -> Option<String> {
        let ids = match self.ids.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        ids.assigned
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(name, _)| name.clone())
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    pub fn color(&self, name: &str) -> Option<u32> {
        self.colors.get(name).copied()
    }

    pub fn insert_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(name.into(), value.into());
    }

    pub fn insert_color(&mut self, name: impl Into<String>, argb: u32) {
        self.colors.insert(name.into(), argb);
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    /// Load every `*.xml` file in a `values*` directory
    pub fn load_values_dir(&mut self, dir: &Path) -> std::io::Result<()> {
        let mut entries: Vec<_> = fs::read_dir(dir)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().map(|e| e == "xml").unwrap_or(false))
            .collect();
        entries.sort();

        for path in entries {
            let contents = fs::read_to_string(&path)?;
            self.load_values_xml(&contents);
            debug!("Loaded values from {}", path.display());
        }

        Ok(())
    }

    /// Parse `<string>` and `<color>` definitions from a values document.
    /// Later definitions override earlier ones.
    pub fn load_values_xml(&mut self, contents: &str) {
        let mut reader = Reader::from_str(contents);
        let mut current: Option<(String, String)> = None;
        let mut text = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    if tag_name == "string" || tag_name == "color" {
                        let name = e
                            .attributes()
                            .flatten()
                            .find(|attr| attr.key.as_ref() == b"name")
                            .map(|attr| String::from_utf8_lossy(&attr.value).to_string());
                        if let Some(name) = name {
                            current = Some((tag_name, name));
                            text.clear();
                        }
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if current.is_some() {
                        if let Ok(t) = e.unescape() {
                            text.push_str(&t);
                        }
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if current.is_some() {
                        text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                Ok(Event::End(ref e)) => {
                    let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    let closes_current = current
                        .as_ref()
                        .map(|(kind, _)| *kind == tag_name)
                        .unwrap_or(false);
                    if closes_current {
                        if let Some((kind, name)) = current.take() {
                            self.store_value(&kind, name, &text);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    debug!("Error parsing values document: {:?}", e);
                    break;
                }
                _ => {}
            }
        }
    }

    fn store_value(&mut self, kind: &str, name: String, raw: &str) {
        match kind {
            "string" => {
                self.strings.insert(name, unescape_android_string(raw));
            }
            "color" => match parse_color_literal(raw) {
                Some(argb) => {
                    self.colors.insert(name, argb);
                }
                None => trace!("Skipping non-literal color {}", name),
            },
            _ => {}
        }
    }
}

/// Undo aapt-style escaping: surrounding quotes and backslash escapes
fn unescape_android_string(raw: &str) -> String {
    let trimmed = raw.trim();
    let inner = if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
