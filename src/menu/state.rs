// Per-scope inflation state: group defaults plus the pending item
//
// One ScopeState lives for each <menu> body. <group> tags overwrite the group
// defaults, <item> tags capture the pending item (falling back to the group
// for unset fields), and the inflater asks the state to materialize the item
// into a sink exactly once.

use super::registry::{ActionProvider, ExtensionRegistry};
use super::sink::{MenuItemSink, MenuSink, SubMenuSink};
use super::types::{
    pack_order, parse_bool, parse_int, BlendMode, Category, CheckableMode, Modifiers, Shortcut,
    ShowAsAction, TintList, NO_ID,
};
use crate::resources::{parse_color_literal, ResourceRef, ResourceTable};
use crate::token::Attributes;
use tracing::{debug, trace, warn};

/// Baseline values a scope starts from and returns to after each `</group>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeDefaults {
    pub group_id: i32,
    pub item_id: i32,
    pub category: u32,
    pub order: u32,
    pub checkable: CheckableMode,
    pub checked: bool,
    pub visible: bool,
    pub enabled: bool,
    pub shortcut_modifiers: Modifiers,
}

/// The defaults every build uses unless the inflater is configured otherwise
pub const BASELINE: ScopeDefaults = ScopeDefaults {
    group_id: NO_ID,
    item_id: NO_ID,
    category: 0,
    order: 0,
    checkable: CheckableMode::None,
    checked: false,
    visible: true,
    enabled: true,
    shortcut_modifiers: Modifiers::ctrl(),
};

impl Default for ScopeDefaults {
    fn default() -> Self {
        BASELINE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupState {
    id: i32,
    category: u32,
    order: u32,
    checkable: CheckableMode,
    visible: bool,
    enabled: bool,
}

impl GroupState {
    fn baseline(defaults: &ScopeDefaults) -> Self {
        Self {
            id: defaults.group_id,
            category: defaults.category,
            order: defaults.order,
            checkable: defaults.checkable,
            visible: defaults.visible,
            enabled: defaults.enabled,
        }
    }
}

/// Item attributes captured at `<item>` and consumed at materialization
#[derive(Debug, Default)]
struct PendingItem {
    group_id: i32,
    id: i32,
    order_key: u32,
    title: Option<String>,
    title_condensed: Option<String>,
    icon: Option<ResourceRef>,
    icon_tint_list: Option<TintList>,
    icon_tint_mode: Option<BlendMode>,
    alphabetic_shortcut: Option<char>,
    alphabetic_modifiers: Modifiers,
    numeric_shortcut: Option<char>,
    numeric_modifiers: Modifiers,
    checkable: CheckableMode,
    checked: bool,
    visible: bool,
    enabled: bool,
    show_as_action: Option<ShowAsAction>,
    on_click: Option<String>,
    action_layout: Option<ResourceRef>,
    action_view_class: Option<String>,
    action_provider: Option<Box<dyn ActionProvider>>,
    content_description: Option<String>,
    tooltip_text: Option<String>,
}

/// Typed, logging accessors over one tag's attributes
struct AttributeReader<'a> {
    tag: &'static str,
    attrs: &'a Attributes,
    resources: &'a ResourceTable,
}

impl<'a> AttributeReader<'a> {
    fn new(tag: &'static str, attrs: &'a Attributes, resources: &'a ResourceTable) -> Self {
        Self {
            tag,
            attrs,
            resources,
        }
    }

    fn has(&self, name: &str) -> bool {
        self.attrs.contains(name)
    }

    fn raw(&self, name: &str) -> Option<&'a str> {
        self.attrs.get(name)
    }

    /// Parse a present attribute; invalid values are logged and treated as absent
    fn parse<T>(&self, name: &str, kind: &str, f: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        let value = self.raw(name)?;
        let parsed = f(value);
        if parsed.is_none() {
            warn!(
                "Ignoring <{}> attribute '{}': '{}' is not a valid {}",
                self.tag, name, value, kind
            );
        }
        parsed
    }

    fn bool(&self, name: &str) -> Option<bool> {
        self.parse(name, "boolean", parse_bool)
    }

    fn int(&self, name: &str) -> Option<i64> {
        self.parse(name, "integer", parse_int)
    }

    fn reference(&self, name: &str) -> Option<ResourceRef> {
        self.parse(name, "resource reference", ResourceRef::parse)
    }

    fn id(&self, name: &str) -> Option<i32> {
        let resources = self.resources;
        self.parse(name, "id", |value| {
            if let Some(reference) = ResourceRef::parse(value) {
                return reference
                    .is_kind("id")
                    .then(|| resources.id_for(&reference));
            }
            parse_int(value).and_then(|v| i32::try_from(v).ok())
        })
    }

    /// Literal text or an `@string/` reference
    fn text(&self, name: &str) -> Option<String> {
        let value = self.raw(name)?;
        let reference = match ResourceRef::parse(value) {
            Some(r) if r.is_kind("string") && !r.theme_attribute => r,
            _ => return Some(value.to_string()),
        };

        match self.resources.string(&reference.name) {
            Some(resolved) => Some(resolved.to_string()),
            None => {
                debug!("Unresolved string {} on <{}> '{}'", reference, self.tag, name);
                Some(value.to_string())
            }
        }
    }

    /// Shortcuts use the first character of the attribute string
    fn shortcut(&self, name: &str) -> Option<char> {
        self.raw(name).and_then(|value| value.chars().next())
    }

    /// Negative integers are the explicit unset sentinel
    fn show_as_action(&self) -> Option<ShowAsAction> {
        let unset = self
            .raw("showAsAction")
            .and_then(parse_int)
            .map(|v| v < 0)
            .unwrap_or(false);
        if unset {
            return None;
        }
        self.parse("showAsAction", "showAsAction value", ShowAsAction::parse)
    }

    fn tint_list(&self, name: &str) -> Option<TintList> {
        let resources = self.resources;
        self.parse(name, "color", |value| {
            if let Some(argb) = parse_color_literal(value) {
                return Some(TintList::Color(argb));
            }
            let reference = ResourceRef::parse(value)?;
            if reference.is_kind("color") && !reference.theme_attribute {
                if let Some(argb) = resources.color(&reference.name) {
                    return Some(TintList::Color(argb));
                }
            }
            Some(TintList::Reference(reference))
        })
    }
}

/// Mutable record of group defaults and the pending item for one menu level
#[derive(Debug)]
pub struct ScopeState {
    defaults: ScopeDefaults,
    group: GroupState,
    item: PendingItem,
    item_added: bool,
}

impl ScopeState {
    pub fn new(defaults: ScopeDefaults) -> Self {
        let mut state = Self {
            defaults,
            group: GroupState::baseline(&defaults),
            item: PendingItem::default(),
            item_added: false,
        };
        state.item.group_id = defaults.group_id;
        state.item.id = defaults.item_id;
        state.item.order_key = pack_order(defaults.category, defaults.order);
        state.item.alphabetic_modifiers = defaults.shortcut_modifiers;
        state.item.numeric_modifiers = defaults.shortcut_modifiers;
        state.item.checkable = defaults.checkable;
        state.item.checked = defaults.checked;
        state.item.visible = defaults.visible;
        state.item.enabled = defaults.enabled;
        state
    }

    /// Return the group defaults to the baseline
    pub fn reset_group(&mut self) {
        self.group = GroupState::baseline(&self.defaults);
    }

    /// Capture a `<group>` tag: baseline first, then whatever the tag sets
    pub fn read_group(&mut self, attrs: &Attributes, resources: &ResourceTable) {
        self.reset_group();
        let reader = AttributeReader::new("group", attrs, resources);

        if let Some(id) = reader.id("id") {
            self.group.id = id;
        }
        if let Some(category) = reader.parse("menuCategory", "menu category", Category::parse) {
            self.group.category = category;
        }
        if let Some(order) = reader.int("orderInCategory") {
            self.group.order = order as u32;
        }
        if let Some(mode) =
            reader.parse("checkableBehavior", "checkable behavior", CheckableMode::parse_behavior)
        {
            self.group.checkable = mode;
        }
        if let Some(visible) = reader.bool("visible") {
            self.group.visible = visible;
        }
        if let Some(enabled) = reader.bool("enabled") {
            self.group.enabled = enabled;
        }

        trace!("Group defaults now {:?}", self.group);
    }

    /// Capture an `<item>` tag; creation is deferred
    pub fn read_item(
        &mut self,
        attrs: &Attributes,
        resources: &ResourceTable,
        registry: &ExtensionRegistry,
    ) {
        let reader = AttributeReader::new("item", attrs, resources);
        let defaults = self.defaults;
        let group = &self.group;

        let category = reader
            .parse("menuCategory", "menu category", Category::parse)
            .unwrap_or(group.category);
        let order = reader
            .int("orderInCategory")
            .map(|v| v as u32)
            .unwrap_or(group.order);

        let checkable = if reader.has("checkable") {
            match reader.bool("checkable") {
                Some(true) => CheckableMode::All,
                Some(false) => CheckableMode::None,
                None => group.checkable,
            }
        } else {
            group.checkable
        };

        let action_layout = reader.reference("actionLayout");
        let action_view_class = reader.raw("actionViewClass").map(str::to_string);
        let action_provider_class = reader.raw("actionProviderClass").map(str::to_string);

        let action_provider = match &action_provider_class {
            Some(class) if action_layout.is_none() && action_view_class.is_none() => {
                match registry.create_action_provider(class) {
                    Ok(provider) => Some(provider),
                    Err(e) => {
                        warn!("Cannot instantiate action provider, ignoring it: {}", e);
                        None
                    }
                }
            }
            Some(_) => {
                warn!("Ignoring attribute 'actionProviderClass'. Action view already specified.");
                None
            }
            None => None,
        };

        self.item = PendingItem {
            group_id: group.id,
            id: reader.id("id").unwrap_or(defaults.item_id),
            order_key: pack_order(category, order),
            title: reader.text("title"),
            title_condensed: reader.text("titleCondensed"),
            icon: reader.reference("icon"),
            // Tint is never inherited from the previous item
            icon_tint_list: reader.tint_list("iconTint"),
            icon_tint_mode: reader.parse("iconTintMode", "tint mode", BlendMode::parse),
            alphabetic_shortcut: reader.shortcut("alphabeticShortcut"),
            alphabetic_modifiers: reader
                .parse("alphabeticModifiers", "modifier list", Modifiers::parse)
                .unwrap_or(defaults.shortcut_modifiers),
            numeric_shortcut: reader.shortcut("numericShortcut"),
            numeric_modifiers: reader
                .parse("numericModifiers", "modifier list", Modifiers::parse)
                .unwrap_or(defaults.shortcut_modifiers),
            checkable,
            checked: reader.bool("checked").unwrap_or(defaults.checked),
            visible: reader.bool("visible").unwrap_or(group.visible),
            enabled: reader.bool("enabled").unwrap_or(group.enabled),
            show_as_action: reader.show_as_action(),
            on_click: reader.raw("onClick").map(str::to_string),
            action_layout,
            action_view_class,
            action_provider,
            content_description: reader.text("contentDescription"),
            tooltip_text: reader.text("tooltipText"),
        };
        self.item_added = false;

        trace!(
            "Pending item id={} order=0x{:08x} title={:?}",
            self.item.id,
            self.item.order_key,
            self.item.title
        );
    }

    pub fn has_added_item(&self) -> bool {
        self.item_added
    }

    /// Whether the pending item's provider wants a submenu
    pub fn provider_has_sub_menu(&self) -> bool {
        self.item
            .action_provider
            .as_ref()
            .map(|p| p.has_sub_menu())
            .unwrap_or(false)
    }

    /// Materialize the pending item at `</item>`
    pub fn add_item(&mut self, sink: &mut dyn MenuSink, registry: &ExtensionRegistry) {
        self.item_added = true;
        if self.provider_has_sub_menu() {
            debug!("Action provider owns a submenu, adding item {} as submenu", self.item.id);
            let sub_menu = sink.add_sub_menu(
                self.item.group_id,
                self.item.id,
                self.item.order_key,
                self.item.title.as_deref(),
            );
            self.apply(sub_menu.anchor_item(), registry);
        } else {
            let item = sink.add_item(
                self.item.group_id,
                self.item.id,
                self.item.order_key,
                self.item.title.as_deref(),
            );
            self.apply(item, registry);
        }
    }

    /// Materialize the pending item as a submenu, for a nested `<menu>`
    pub fn add_sub_menu<'s>(
        &mut self,
        sink: &'s mut dyn MenuSink,
        registry: &ExtensionRegistry,
    ) -> &'s mut dyn SubMenuSink {
        self.item_added = true;
        let sub_menu = sink.add_sub_menu(
            self.item.group_id,
            self.item.id,
            self.item.order_key,
            self.item.title.as_deref(),
        );
        self.apply(sub_menu.anchor_item(), registry);
        sub_menu
    }

    fn apply(&mut self, item: &mut dyn MenuItemSink, registry: &ExtensionRegistry) {
        let pending = &mut self.item;

        item.set_checked(pending.checked);
        item.set_visible(pending.visible);
        item.set_enabled(pending.enabled);
        item.set_checkable(pending.checkable.is_checkable());
        if let Some(title) = &pending.title_condensed {
            item.set_title_condensed(title);
        }
        if let Some(icon) = &pending.icon {
            item.set_icon(icon);
        }
        if let Some(flags) = pending.show_as_action {
            item.set_show_as_action(flags);
        }
        if let Some(method) = &pending.on_click {
            item.set_on_click(method);
        }
        if pending.checkable == CheckableMode::Exclusive {
            item.set_exclusive_checkable(true);
        }

        if let Some(class) = &pending.action_view_class {
            match registry.create_action_view(class) {
                Ok(view) => item.set_action_view(view),
                Err(e) => warn!("Cannot instantiate action view, ignoring it: {}", e),
            }
            if pending.action_layout.is_some() {
                warn!("Ignoring attribute 'actionLayout'. Action view already specified.");
            }
        } else if let Some(layout) = &pending.action_layout {
            item.set_action_view_layout(layout);
        }
        if let Some(provider) = pending.action_provider.take() {
            item.set_action_provider(provider);
        }

        if let Some(text) = &pending.content_description {
            item.set_content_description(text);
        }
        if let Some(text) = &pending.tooltip_text {
            item.set_tooltip_text(text);
        }
        if let Some(key) = pending.alphabetic_shortcut {
            item.set_alphabetic_shortcut(Shortcut {
                key,
                modifiers: pending.alphabetic_modifiers,
            });
        }
        if let Some(key) = pending.numeric_shortcut {
            item.set_numeric_shortcut(Shortcut {
                key,
                modifiers: pending.numeric_modifiers,
            });
        }
        if let Some(mode) = pending.icon_tint_mode {
            item.set_icon_tint_mode(mode);
        }
        if let Some(tint) = &pending.icon_tint_list {
            item.set_icon_tint_list(tint);
        }
    }
}
