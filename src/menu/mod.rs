//! Menu resource inflation
//!
//! [`MenuInflater`] walks a [`crate::token::TokenStream`] and materializes
//! `<item>`, `<group>` and nested `<menu>` tags into a [`MenuSink`].

mod inflater;
pub mod registry;
mod sink;
mod state;
mod tree;
pub mod types;

pub use inflater::MenuInflater;
pub use registry::{
    ActionProvider, ActionView, DeclaredActionProvider, DeclaredActionView, ExtensionRegistry,
};
pub use sink::{MenuItemSink, MenuSink, SubMenuSink};
pub use state::{ScopeDefaults, ScopeState, BASELINE};
pub use tree::{MenuEntry, MenuItem, MenuTree};
pub use types::{
    BlendMode, Category, CheckableMode, Modifiers, Shortcut, ShowAsAction, TintList, NO_ID,
};
