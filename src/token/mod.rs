//! Structural token stream consumed by the menu inflater
//!
//! A menu resource is read as a flat sequence of start tags (with their
//! attributes), end tags and a final end-of-document marker. Text, comments
//! and processing instructions never reach the inflater.

mod xml;

pub use xml::XmlTokenStream;

use crate::error::InflateError;
use std::collections::VecDeque;

/// A single structural event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Start { name: String, attributes: Attributes },
    End { name: String },
    EndDocument,
}

impl TagEvent {
    pub fn start(name: impl Into<String>, attributes: Attributes) -> Self {
        TagEvent::Start {
            name: name.into(),
            attributes,
        }
    }

    pub fn end(name: impl Into<String>) -> Self {
        TagEvent::End { name: name.into() }
    }
}

/// Single-consumer cursor over structural events
pub trait TokenStream {
    /// Advance to the next event. After `EndDocument` every call keeps
    /// returning `EndDocument`.
    fn next_event(&mut self) -> Result<TagEvent, InflateError>;
}

impl<T: TokenStream + ?Sized> TokenStream for &mut T {
    fn next_event(&mut self) -> Result<TagEvent, InflateError> {
        (**self).next_event()
    }
}

/// Attribute set carried by a start tag
///
/// Lookups match on the local name, so `android:title`, `app:title` and
/// `title` all answer to `get("title")`. When several qualified forms are
/// present the first one in document order wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Builder-style insert, handy for scripted streams
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn get(&self, local_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| local_part(name) == local_name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, local_name: &str) -> bool {
        self.get(local_name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn local_part(name: &str) -> &str {
    match name.rfind(':') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Pre-recorded event stream
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<TagEvent>,
}

impl EventQueue {
    pub fn new(events: impl IntoIterator<Item = TagEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl TokenStream for EventQueue {
    fn next_event(&mut self) -> Result<TagEvent, InflateError> {
        Ok(self.events.pop_front().unwrap_or(TagEvent::EndDocument))
    }
}
