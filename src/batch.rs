//! Inflating many menu resources in one run
//!
//! Reading and tokenizing files runs on the rayon pool when asked to. Building
//! the trees always runs in file order against the shared resource table, so
//! `@+id/` names get the same ids with or without `--parallel`.

use crate::discovery::MenuFile;
use crate::error::InflateError;
use crate::menu::{ExtensionRegistry, MenuInflater, MenuTree};
use crate::resources::ResourceTable;
use crate::token::{TagEvent, TokenStream, XmlTokenStream};
use rayon::prelude::*;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Outcome of inflating one menu resource
#[derive(Debug)]
pub struct InflatedMenu {
    pub file: MenuFile,
    pub result: Result<MenuTree, InflateError>,
}

impl InflatedMenu {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A tokenized document replayed into the inflater.
/// A reader error is surfaced at the point the reader hit it.
#[derive(Debug)]
struct TokenizedMenu {
    events: VecDeque<TagEvent>,
    error: Option<InflateError>,
}

impl TokenizedMenu {
    fn read(file: &MenuFile) -> Result<Self, InflateError> {
        let contents = std::fs::read_to_string(&file.path)?;
        let mut stream = XmlTokenStream::from_str(&contents);
        let mut events = VecDeque::new();

        loop {
            match stream.next_event() {
                Ok(TagEvent::EndDocument) => return Ok(Self { events, error: None }),
                Ok(event) => events.push_back(event),
                Err(e) => {
                    return Ok(Self {
                        events,
                        error: Some(e),
                    })
                }
            }
        }
    }
}

impl TokenStream for TokenizedMenu {
    fn next_event(&mut self) -> Result<TagEvent, InflateError> {
        if let Some(event) = self.events.pop_front() {
            return Ok(event);
        }
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(TagEvent::EndDocument),
        }
    }
}

/// Inflate every file, tokenizing sequentially or on the rayon pool.
/// Results come back in input order either way.
pub fn inflate_files(
    files: &[MenuFile],
    resources: &ResourceTable,
    registry: &ExtensionRegistry,
    parallel: bool,
) -> Vec<InflatedMenu> {
    let tokenized: Vec<Result<TokenizedMenu, InflateError>> = if parallel {
        files.par_iter().map(TokenizedMenu::read).collect()
    } else {
        files.iter().map(TokenizedMenu::read).collect()
    };

    let inflater = MenuInflater::new(resources, registry);
    files
        .iter()
        .zip(tokenized)
        .map(|(file, tokens)| inflate_file(&inflater, file, tokens))
        .collect()
}

fn inflate_file(
    inflater: &MenuInflater<'_>,
    file: &MenuFile,
    tokens: Result<TokenizedMenu, InflateError>,
) -> InflatedMenu {
    let result = tokens.and_then(|mut stream| {
        let mut tree = MenuTree::new();
        inflater.inflate(&mut stream, &mut tree)?;
        Ok(tree)
    });

    match &result {
        Ok(tree) => debug!(
            "Inflated {}: {} entries, {} submenus",
            file.path.display(),
            tree.total_items(),
            tree.total_sub_menus()
        ),
        Err(e) => warn!("Failed to inflate {}: {}", file.path.display(), e),
    }

    InflatedMenu {
        file: file.clone(),
        result,
    }
}
