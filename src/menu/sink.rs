//! Output interface the inflater materializes menus into
//!
//! The inflater only ever calls these operations; it never reads sink state
//! back. A toolkit binding implements the three traits over its own menu
//! objects; [`super::MenuTree`] is the in-memory implementation.

use super::registry::{ActionProvider, ActionView};
use super::types::{BlendMode, Shortcut, ShowAsAction, TintList};
use crate::resources::ResourceRef;

/// A menu (root or submenu body) that accepts new entries
pub trait MenuSink {
    /// Add a plain item and return it for further configuration
    fn add_item(
        &mut self,
        group_id: i32,
        item_id: i32,
        order: u32,
        title: Option<&str>,
    ) -> &mut dyn MenuItemSink;

    /// Add an item that opens a submenu
    fn add_sub_menu(
        &mut self,
        group_id: i32,
        item_id: i32,
        order: u32,
        title: Option<&str>,
    ) -> &mut dyn SubMenuSink;
}

/// Handle returned by [`MenuSink::add_sub_menu`]
pub trait SubMenuSink {
    /// The item in the parent menu that opens this submenu
    fn anchor_item(&mut self) -> &mut dyn MenuItemSink;

    /// The submenu body, where nested entries are added
    fn menu(&mut self) -> &mut dyn MenuSink;
}

/// Mutators applied to an item after it has been added
pub trait MenuItemSink {
    fn set_title_condensed(&mut self, title: &str);
    fn set_icon(&mut self, icon: &ResourceRef);
    fn set_checkable(&mut self, checkable: bool);
    fn set_exclusive_checkable(&mut self, exclusive: bool);
    fn set_checked(&mut self, checked: bool);
    fn set_visible(&mut self, visible: bool);
    fn set_enabled(&mut self, enabled: bool);
    fn set_show_as_action(&mut self, flags: ShowAsAction);
    fn set_on_click(&mut self, method: &str);
    fn set_action_view(&mut self, view: Box<dyn ActionView>);
    fn set_action_view_layout(&mut self, layout: &ResourceRef);
    fn set_action_provider(&mut self, provider: Box<dyn ActionProvider>);
    fn set_content_description(&mut self, text: &str);
    fn set_tooltip_text(&mut self, text: &str);
    fn set_alphabetic_shortcut(&mut self, shortcut: Shortcut);
    fn set_numeric_shortcut(&mut self, shortcut: Shortcut);
    fn set_icon_tint_mode(&mut self, mode: BlendMode);
    fn set_icon_tint_list(&mut self, tint: &TintList);
}
