//! In-memory menu tree
//!
//! [`MenuTree`] is the reference [`MenuSink`]: it records every entry the
//! inflater adds, in insertion order, with all attributes resolved.

use super::registry::{ActionProvider, ActionView};
use super::sink::{MenuItemSink, MenuSink, SubMenuSink};
use super::types::{display_ordering, BlendMode, Shortcut, ShowAsAction, TintList};
use crate::resources::ResourceRef;

/// A single resolved menu item
#[derive(Debug)]
pub struct MenuItem {
    pub group_id: i32,
    pub id: i32,
    /// Packed category and in-category order
    pub order: u32,
    pub title: Option<String>,
    pub title_condensed: Option<String>,
    pub icon: Option<ResourceRef>,
    pub checkable: bool,
    pub exclusive_checkable: bool,
    pub checked: bool,
    pub visible: bool,
    pub enabled: bool,
    pub show_as_action: Option<ShowAsAction>,
    pub on_click: Option<String>,
    pub action_view: Option<Box<dyn ActionView>>,
    pub action_view_layout: Option<ResourceRef>,
    pub action_provider: Option<Box<dyn ActionProvider>>,
    pub content_description: Option<String>,
    pub tooltip_text: Option<String>,
    pub alphabetic_shortcut: Option<Shortcut>,
    pub numeric_shortcut: Option<Shortcut>,
    pub icon_tint_mode: Option<BlendMode>,
    pub icon_tint_list: Option<TintList>,
}

impl MenuItem {
    pub fn new(group_id: i32, id: i32, order: u32, title: Option<&str>) -> Self {
        Self {
            group_id,
            id,
            order,
            title: title.map(str::to_string),
            title_condensed: None,
            icon: None,
            checkable: false,
            exclusive_checkable: false,
            checked: false,
            visible: true,
            enabled: true,
            show_as_action: None,
            on_click: None,
            action_view: None,
            action_view_layout: None,
            action_provider: None,
            content_description: None,
            tooltip_text: None,
            alphabetic_shortcut: None,
            numeric_shortcut: None,
            icon_tint_mode: None,
            icon_tint_list: None,
        }
    }
}

impl MenuItemSink for MenuItem {
    fn set_title_condensed(&mut self, title: &str) {
        self.title_condensed = Some(title.to_string());
    }

    fn set_icon(&mut self, icon: &ResourceRef) {
        self.icon = Some(icon.clone());
    }

    fn set_checkable(&mut self, checkable: bool) {
        self.checkable = checkable;
    }

    fn set_exclusive_checkable(&mut self, exclusive: bool) {
        self.exclusive_checkable = exclusive;
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_show_as_action(&mut self, flags: ShowAsAction) {
        self.show_as_action = Some(flags);
    }

    fn set_on_click(&mut self, method: &str) {
        self.on_click = Some(method.to_string());
    }

    fn set_action_view(&mut self, view: Box<dyn ActionView>) {
        self.action_view = Some(view);
        self.action_view_layout = None;
    }

    fn set_action_view_layout(&mut self, layout: &ResourceRef) {
        self.action_view_layout = Some(layout.clone());
        self.action_view = None;
    }

    fn set_action_provider(&mut self, provider: Box<dyn ActionProvider>) {
        self.action_provider = Some(provider);
    }

    fn set_content_description(&mut self, text: &str) {
        self.content_description = Some(text.to_string());
    }

    fn set_tooltip_text(&mut self, text: &str) {
        self.tooltip_text = Some(text.to_string());
    }

    fn set_alphabetic_shortcut(&mut self, shortcut: Shortcut) {
        self.alphabetic_shortcut = Some(shortcut);
    }

    fn set_numeric_shortcut(&mut self, shortcut: Shortcut) {
        self.numeric_shortcut = Some(shortcut);
    }

    fn set_icon_tint_mode(&mut self, mode: BlendMode) {
        self.icon_tint_mode = Some(mode);
    }

    fn set_icon_tint_list(&mut self, tint: &TintList) {
        self.icon_tint_list = Some(tint.clone());
    }
}

/// An entry in a menu: a plain item, or an anchor item with a submenu body
#[derive(Debug)]
pub struct MenuEntry {
    pub item: MenuItem,
    pub sub_menu: Option<MenuTree>,
}

impl MenuEntry {
    pub fn is_sub_menu(&self) -> bool {
        self.sub_menu.is_some()
    }
}

impl SubMenuSink for MenuEntry {
    fn anchor_item(&mut self) -> &mut dyn MenuItemSink {
        &mut self.item
    }

    fn menu(&mut self) -> &mut dyn MenuSink {
        self.sub_menu.get_or_insert_with(MenuTree::new)
    }
}

/// A menu body, root or nested
#[derive(Debug, Default)]
pub struct MenuTree {
    entries: Vec<MenuEntry>,
}

impl MenuTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order a toolkit would present them: by category
    /// priority, then order, ties kept in insertion order
    pub fn entries_in_display_order(&self) -> Vec<&MenuEntry> {
        let mut sorted: Vec<&MenuEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|entry| display_ordering(entry.item.order));
        sorted
    }

    /// Depth-first search for an item id, submenu anchors included
    pub fn find(&self, id: i32) -> Option<&MenuItem> {
        for entry in &self.entries {
            if entry.item.id == id {
                return Some(&entry.item);
            }
            if let Some(found) = entry.sub_menu.as_ref().and_then(|sub| sub.find(id)) {
                return Some(found);
            }
        }
        None
    }

    /// The submenu body opened by the item with this id
    pub fn sub_menu(&self, id: i32) -> Option<&MenuTree> {
        for entry in &self.entries {
            if let Some(sub) = &entry.sub_menu {
                if entry.item.id == id {
                    return Some(sub);
                }
                if let Some(found) = sub.sub_menu(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Every entry at any depth, anchors included
    pub fn total_items(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| 1 + entry.sub_menu.as_ref().map(MenuTree::total_items).unwrap_or(0))
            .sum()
    }

    /// Number of submenu entries at any depth
    pub fn total_sub_menus(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|entry| entry.sub_menu.as_ref())
            .map(|sub| 1 + sub.total_sub_menus())
            .sum()
    }
}

impl MenuSink for MenuTree {
    fn add_item(
        &mut self,
        group_id: i32,
        item_id: i32,
        order: u32,
        title: Option<&str>,
    ) -> &mut dyn MenuItemSink {
        self.entries.push(MenuEntry {
            item: MenuItem::new(group_id, item_id, order, title),
            sub_menu: None,
        });
        let last = self.entries.len() - 1;
        &mut self.entries[last].item
    }

    fn add_sub_menu(
        &mut self,
        group_id: i32,
        item_id: i32,
        order: u32,
        title: Option<&str>,
    ) -> &mut dyn SubMenuSink {
        self.entries.push(MenuEntry {
            item: MenuItem::new(group_id, item_id, order, title),
            sub_menu: Some(MenuTree::new()),
        });
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }
}
