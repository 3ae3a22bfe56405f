// Recursive-descent menu inflater
//
// Grammar of the structural stream:
//   menu  := <menu> (group | item | unknown)* </menu>
//   item  := <item attrs/> | <item attrs> menu </item>
//   group := <group attrs> (item | unknown)* </group>
//
// Each <menu> body gets its own ScopeState on the call stack. Unknown tags
// switch the body into skip mode until an end tag with the same name.

use super::registry::ExtensionRegistry;
use super::sink::MenuSink;
use super::state::{ScopeDefaults, ScopeState, BASELINE};
use super::tree::MenuTree;
use crate::error::InflateError;
use crate::resources::ResourceTable;
use crate::token::{TagEvent, TokenStream, XmlTokenStream};
use tracing::{debug, trace};

const TAG_MENU: &str = "menu";
const TAG_GROUP: &str = "group";
const TAG_ITEM: &str = "item";

/// Builds menus from structural token streams
///
/// The inflater holds only shared, read-mostly context; every call to
/// [`MenuInflater::inflate`] keeps its scope state on its own stack, so one
/// inflater can serve concurrent builds as long as each has its own stream
/// and sink.
#[derive(Debug)]
pub struct MenuInflater<'a> {
    resources: &'a ResourceTable,
    registry: &'a ExtensionRegistry,
    defaults: ScopeDefaults,
}

impl<'a> MenuInflater<'a> {
    pub fn new(resources: &'a ResourceTable, registry: &'a ExtensionRegistry) -> Self {
        Self {
            resources,
            registry,
            defaults: BASELINE,
        }
    }

    /// Use different baseline values for group and item fields
    pub fn with_defaults(mut self, defaults: ScopeDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Inflate an XML menu document into a fresh [`MenuTree`]
    pub fn inflate_str(&self, contents: &str) -> Result<MenuTree, InflateError> {
        let mut stream = XmlTokenStream::from_str(contents);
        let mut tree = MenuTree::new();
        self.inflate(&mut stream, &mut tree)?;
        Ok(tree)
    }

    /// Find the root `<menu>` and populate `sink` from its body
    pub fn inflate<S>(&self, stream: &mut S, sink: &mut dyn MenuSink) -> Result<(), InflateError>
    where
        S: TokenStream + ?Sized,
    {
        self.seek_root(stream)?;
        self.parse_menu(stream, sink, 0)?;
        debug!("Menu inflated");
        Ok(())
    }

    fn seek_root<S>(&self, stream: &mut S) -> Result<(), InflateError>
    where
        S: TokenStream + ?Sized,
    {
        loop {
            match stream.next_event()? {
                TagEvent::Start { name, .. } if name == TAG_MENU => return Ok(()),
                TagEvent::Start { name, .. } => {
                    return Err(InflateError::ExpectedMenuRoot { found: Some(name) })
                }
                TagEvent::End { .. } => continue,
                TagEvent::EndDocument => {
                    return Err(InflateError::ExpectedMenuRoot { found: None })
                }
            }
        }
    }

    /// Consume one `<menu>` body up to and including its end tag
    fn parse_menu<S>(
        &self,
        stream: &mut S,
        sink: &mut dyn MenuSink,
        depth: usize,
    ) -> Result<(), InflateError>
    where
        S: TokenStream + ?Sized,
    {
        let mut state = ScopeState::new(self.defaults);
        // Name matching only: a nested unknown tag of the same name ends
        // skipping at the first matching end tag.
        let mut unknown_tag: Option<String> = None;

        loop {
            let event = stream.next_event()?;

            if let Some(skipped) = &unknown_tag {
                match event {
                    TagEvent::End { name } if name == *skipped => {
                        trace!("Leaving unknown <{}>", name);
                        unknown_tag = None;
                    }
                    TagEvent::EndDocument => return Err(InflateError::UnexpectedEndOfDocument),
                    _ => {}
                }
                continue;
            }

            match event {
                TagEvent::Start { name, attributes } => match name.as_str() {
                    TAG_GROUP => state.read_group(&attributes, self.resources),
                    TAG_ITEM => state.read_item(&attributes, self.resources, self.registry),
                    TAG_MENU => {
                        trace!("Nested menu at depth {}", depth + 1);
                        let sub_menu = state.add_sub_menu(sink, self.registry);
                        self.parse_menu(stream, sub_menu.menu(), depth + 1)?;
                    }
                    _ => {
                        trace!("Skipping unknown <{}>", name);
                        unknown_tag = Some(name);
                    }
                },
                TagEvent::End { name } => match name.as_str() {
                    TAG_GROUP => state.reset_group(),
                    TAG_ITEM => {
                        if !state.has_added_item() {
                            state.add_item(sink, self.registry);
                        }
                    }
                    TAG_MENU => return Ok(()),
                    _ => {}
                },
                TagEvent::EndDocument => return Err(InflateError::UnexpectedEndOfDocument),
            }
        }
    }
}
