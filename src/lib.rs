//! menuinflate - Android menu resource inflation
//!
//! This library turns menu resources (`res/menu/*.xml`) into a tree of
//! fully resolved menu entries: items, groups and nested submenus, with group
//! defaults inherited and resource references resolved.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **Token Stream** - Structural start/end tag events (quick-xml backed)
//! 2. **Inflation** - A recursive-descent driver with per-scope state
//! 3. **Menu Sink** - The output interface, implemented in memory by `MenuTree`
//! 4. **Discovery & Reporting** - Finding menu resources and printing trees

pub mod batch;
pub mod config;
pub mod discovery;
pub mod error;
pub mod menu;
pub mod report;
pub mod resources;
pub mod token;

pub use batch::{inflate_files, InflatedMenu};
pub use config::Config;
pub use discovery::{MenuFile, MenuFinder};
pub use error::{ExtensionError, InflateError};
pub use menu::{
    ExtensionRegistry, MenuInflater, MenuItemSink, MenuSink, MenuTree, ScopeDefaults,
    SubMenuSink,
};
pub use report::{ReportFormat, Reporter};
pub use resources::{ResourceRef, ResourceTable};
pub use token::{Attributes, EventQueue, TagEvent, TokenStream, XmlTokenStream};
