//! Inflation integration tests
//!
//! End-to-end builds over real menu XML and over pre-recorded event streams:
//! - Group inheritance and order packing
//! - Nested menus and provider-owned submenus
//! - Skip mode for unknown tags
//! - Extension failures that must not abort a build
//! - Structural errors

use menuinflate::config::Config;
use menuinflate::menu::{
    ActionView, CheckableMode, ExtensionRegistry, MenuInflater, MenuTree, ShowAsAction, TintList,
};
use menuinflate::resources::{ResourceRef, ResourceTable};
use menuinflate::token::{Attributes, EventQueue, TagEvent};
use menuinflate::{ExtensionError, InflateError};
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_res() -> PathBuf {
    fixtures_path().join("app/src/main/res")
}

fn fixture_resources() -> ResourceTable {
    let mut resources = ResourceTable::new();
    resources
        .load_values_dir(&fixture_res().join("values"))
        .expect("Failed to load fixture values");
    resources
}

fn inflate(xml: &str) -> MenuTree {
    let resources = ResourceTable::new();
    let registry = ExtensionRegistry::new();
    MenuInflater::new(&resources, &registry)
        .inflate_str(xml)
        .expect("Failed to inflate menu")
}

fn inflate_with(registry: &ExtensionRegistry, xml: &str) -> MenuTree {
    let resources = ResourceTable::new();
    MenuInflater::new(&resources, registry)
        .inflate_str(xml)
        .expect("Failed to inflate menu")
}

fn inflate_events(events: Vec<TagEvent>) -> Result<MenuTree, InflateError> {
    let resources = ResourceTable::new();
    let registry = ExtensionRegistry::new();
    let mut stream = EventQueue::new(events);
    let mut tree = MenuTree::new();
    MenuInflater::new(&resources, &registry).inflate(&mut stream, &mut tree)?;
    Ok(tree)
}

fn item(id: &str) -> TagEvent {
    TagEvent::start("item", Attributes::new().with("android:id", id))
}

// ============================================================================
// Fixture Tests
// ============================================================================

#[test]
fn test_fixture_main_menu() {
    let resources = fixture_resources();
    let registry = Config::default().extension_registry();
    let contents = std::fs::read_to_string(fixture_res().join("menu/main.xml")).unwrap();

    let tree = MenuInflater::new(&resources, &registry)
        .inflate_str(&contents)
        .expect("Fixture should inflate");

    assert_eq!(tree.len(), 4, "search, two sort items and the overflow");
    assert_eq!(tree.total_items(), 6);
    assert_eq!(tree.total_sub_menus(), 1);

    let titles: Vec<_> = tree
        .entries()
        .iter()
        .map(|e| e.item.title.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(titles, vec!["Search", "Sort by name", "Sort by date", "More"]);

    let search = &tree.entries()[0].item;
    assert_eq!(
        search.action_view.as_ref().map(|v| v.class_name()),
        Some("androidx.appcompat.widget.SearchView")
    );
    let flags = search.show_as_action.expect("showAsAction should be set");
    assert!(flags.contains(ShowAsAction::IF_ROOM));
    assert!(flags.contains(ShowAsAction::COLLAPSE_ACTION_VIEW));
    assert_eq!(
        search.icon.as_ref().map(|r| r.to_string()),
        Some("@drawable/ic_search".to_string())
    );

    let sort_name = &tree.entries()[1].item;
    let sort_date = &tree.entries()[2].item;
    assert_eq!(sort_name.group_id, sort_date.group_id);
    assert_ne!(sort_name.group_id, 0);
    assert!(sort_name.checkable && sort_name.exclusive_checkable && sort_name.checked);
    assert!(sort_date.checkable && sort_date.exclusive_checkable && !sort_date.checked);

    let more = &tree.entries()[3];
    assert!(more.is_sub_menu());
    let body = more.sub_menu.as_ref().unwrap();
    assert_eq!(body.entries()[0].item.title.as_deref(), Some("Settings"));
    assert_eq!(body.entries()[0].item.order, 100);
    assert_eq!(
        body.entries()[1].item.icon_tint_list,
        Some(TintList::Color(0xFFFF_4081))
    );
}

#[test]
fn test_fixture_ids_are_stable_per_name() {
    let resources = fixture_resources();
    let registry = ExtensionRegistry::new();
    let contents = std::fs::read_to_string(fixture_res().join("menu/main.xml")).unwrap();
    let inflater = MenuInflater::new(&resources, &registry);

    let first = inflater.inflate_str(&contents).unwrap();
    let second = inflater.inflate_str(&contents).unwrap();

    let ids = |tree: &MenuTree| tree.entries().iter().map(|e| e.item.id).collect::<Vec<_>>();
    assert_eq!(ids(&first), ids(&second));

    let search_id = resources.id_for(&ResourceRef::parse("@id/action_search").unwrap());
    assert_eq!(first.entries()[0].item.id, search_id);
    assert_eq!(resources.id_name(search_id).as_deref(), Some("action_search"));
}

#[test]
fn test_fixture_share_provider_owns_sub_menu() {
    let resources = fixture_resources();
    let registry = Config::default().extension_registry();
    let contents = std::fs::read_to_string(fixture_res().join("menu-land/share.xml")).unwrap();

    let tree = MenuInflater::new(&resources, &registry)
        .inflate_str(&contents)
        .unwrap();

    let share = &tree.entries()[0];
    assert!(share.is_sub_menu(), "ShareActionProvider owns a submenu");
    assert!(share.sub_menu.as_ref().unwrap().is_empty());
    assert_eq!(share.item.title.as_deref(), Some("Share"));
    assert_eq!(share.item.show_as_action, Some(ShowAsAction(ShowAsAction::ALWAYS)));

    let cast = &tree.entries()[1];
    assert!(!cast.is_sub_menu());
    assert_eq!(cast.item.order, 0x0003_0000);
    assert!(cast.item.action_provider.is_some());
}

// ============================================================================
// Group Inheritance & Ordering
// ============================================================================

#[test]
fn test_group_values_end_at_group_close() {
    let tree = inflate(
        r#"<menu>
            <group id="5" visible="false" enabled="false" checkableBehavior="all">
                <item id="1"/>
            </group>
            <item id="2"/>
        </menu>"#,
    );

    let inside = tree.find(1).unwrap();
    assert_eq!(inside.group_id, 5);
    assert!(!inside.visible && !inside.enabled && inside.checkable);

    let outside = tree.find(2).unwrap();
    assert_eq!(outside.group_id, 0);
    assert!(outside.visible && outside.enabled && !outside.checkable);
}

#[test]
fn test_item_overrides_group() {
    let tree = inflate(
        r#"<menu>
            <group id="5" visible="false" orderInCategory="3" checkableBehavior="single">
                <item id="1" visible="true" orderInCategory="9" checkable="false"/>
            </group>
        </menu>"#,
    );

    let item = tree.find(1).unwrap();
    assert!(item.visible);
    assert_eq!(item.order, 9);
    assert!(!item.checkable && !item.exclusive_checkable);
}

#[test]
fn test_order_packing_from_group_or_item() {
    let tree = inflate(
        r#"<menu>
            <group menuCategory="alternative" orderInCategory="7"><item id="1"/></group>
            <item id="2" menuCategory="alternative" orderInCategory="7"/>
            <item id="3" menuCategory="system" orderInCategory="70000"/>
        </menu>"#,
    );

    assert_eq!(tree.find(1).unwrap().order, 0x0004_0007);
    assert_eq!(tree.find(2).unwrap().order, 0x0004_0007);
    // In-category order is masked to 16 bits
    assert_eq!(tree.find(3).unwrap().order, 0x0002_0000 | (70000 & 0xffff));
}

#[test]
fn test_display_order_respects_category_priority() {
    let tree = inflate(
        r#"<menu>
            <item id="1" title="System" menuCategory="system"/>
            <item id="2" title="Plain B" orderInCategory="2"/>
            <item id="3" title="Secondary" menuCategory="secondary"/>
            <item id="4" title="Plain A" orderInCategory="1"/>
        </menu>"#,
    );

    let ordered: Vec<_> = tree
        .entries_in_display_order()
        .iter()
        .map(|e| e.item.id)
        .collect();
    // Uncategorized first, then secondary, system last
    assert_eq!(ordered, vec![4, 2, 3, 1]);
}

#[test]
fn test_checkable_behavior_numeric_and_named() {
    let tree = inflate(
        r#"<menu>
            <group checkableBehavior="2"><item id="1"/></group>
            <group checkableBehavior="single"><item id="2"/></group>
            <group checkableBehavior="none"><item id="3"/></group>
        </menu>"#,
    );

    assert!(tree.find(1).unwrap().exclusive_checkable);
    assert!(tree.find(2).unwrap().exclusive_checkable);
    assert!(!tree.find(3).unwrap().checkable);
    assert_eq!(CheckableMode::parse_behavior("single"), Some(CheckableMode::Exclusive));
}

// ============================================================================
// Per-item Attributes
// ============================================================================

#[test]
fn test_tint_does_not_leak_into_next_item() {
    let tree = inflate(
        r##"<menu>
            <item id="1" iconTint="#ff0000" iconTintMode="src_in"/>
            <item id="2"/>
        </menu>"##,
    );

    let tinted = tree.find(1).unwrap();
    assert_eq!(tinted.icon_tint_list, Some(TintList::Color(0xFFFF_0000)));
    assert!(tinted.icon_tint_mode.is_some());

    let plain = tree.find(2).unwrap();
    assert!(plain.icon_tint_list.is_none());
    assert!(plain.icon_tint_mode.is_none());
}

#[test]
fn test_shortcuts_use_first_character_and_default_modifier() {
    let tree = inflate(
        r#"<menu>
            <item id="1" alphabeticShortcut="save" numericShortcut="7" numericModifiers="ALT|SHIFT"/>
        </menu>"#,
    );

    let item = tree.find(1).unwrap();
    let alpha = item.alphabetic_shortcut.unwrap();
    assert_eq!(alpha.key, 's');
    assert_eq!(alpha.modifiers.0, 0x1000);

    let numeric = item.numeric_shortcut.unwrap();
    assert_eq!(numeric.key, '7');
    assert_eq!(numeric.modifiers.0, 0x02 | 0x01);
}

#[test]
fn test_tools_attributes_do_not_shadow_real_ones() {
    let tree = inflate(
        r#"<menu xmlns:android="http://schemas.android.com/apk/res/android"
              xmlns:tools="http://schemas.android.com/tools">
            <item android:id="1" tools:visible="false" tools:title="Preview" android:title="Real"/>
        </menu>"#,
    );

    let item = tree.find(1).unwrap();
    assert_eq!(item.title.as_deref(), Some("Real"));
    assert!(item.visible);
}

#[test]
fn test_unset_show_as_action_is_not_applied() {
    let tree = inflate(r#"<menu><item id="1" showAsAction="-1"/><item id="2"/></menu>"#);

    assert!(tree.find(1).unwrap().show_as_action.is_none());
    assert!(tree.find(2).unwrap().show_as_action.is_none());
}

#[test]
fn test_invalid_attribute_values_fall_back() {
    let tree = inflate(
        r#"<menu>
            <group id="3" enabled="false">
                <item id="1" enabled="perhaps" orderInCategory="soon"/>
            </group>
        </menu>"#,
    );

    let item = tree.find(1).unwrap();
    assert!(!item.enabled, "invalid boolean falls back to the group value");
    assert_eq!(item.order, 0);
}

#[test]
fn test_string_reference_resolution() {
    let mut resources = ResourceTable::new();
    resources.insert_string("open", "Open…");
    let registry = ExtensionRegistry::new();

    let tree = MenuInflater::new(&resources, &registry)
        .inflate_str(
            r#"<menu>
                <item id="1" title="@string/open" tooltipText="@string/missing"/>
            </menu>"#,
        )
        .unwrap();

    let item = tree.find(1).unwrap();
    assert_eq!(item.title.as_deref(), Some("Open…"));
    assert_eq!(item.tooltip_text.as_deref(), Some("@string/missing"));
}

// ============================================================================
// Submenus & Action Providers
// ============================================================================

#[test]
fn test_nested_menu_beats_provider_sub_menu() {
    let mut registry = ExtensionRegistry::new();
    registry.declare_action_provider("com.example.ListProvider", true);

    let tree = inflate_with(
        &registry,
        r#"<menu>
            <item id="1" actionProviderClass="com.example.ListProvider">
                <menu><item id="2"/></menu>
            </item>
        </menu>"#,
    );

    assert_eq!(tree.len(), 1, "the item is created exactly once");
    assert_eq!(tree.total_sub_menus(), 1);
    assert_eq!(tree.sub_menu(1).unwrap().len(), 1);
}

#[test]
fn test_provider_without_sub_menu_adds_plain_item() {
    let mut registry = ExtensionRegistry::new();
    registry.declare_action_provider("com.example.CastProvider", false);

    let tree = inflate_with(
        &registry,
        r#"<menu><item id="1" actionProviderClass="com.example.CastProvider"/></menu>"#,
    );

    let entry = &tree.entries()[0];
    assert!(!entry.is_sub_menu());
    assert_eq!(
        entry.item.action_provider.as_ref().map(|p| p.class_name()),
        Some("com.example.CastProvider")
    );
}

#[test]
fn test_provider_ignored_when_action_view_present() {
    let mut registry = ExtensionRegistry::new();
    registry.declare_action_provider("com.example.ListProvider", true);
    registry.declare_action_view("com.example.SearchBox");

    let tree = inflate_with(
        &registry,
        r#"<menu>
            <item id="1" actionViewClass="com.example.SearchBox" actionProviderClass="com.example.ListProvider"/>
            <item id="2" actionLayout="@layout/search_box" actionProviderClass="com.example.ListProvider"/>
        </menu>"#,
    );

    assert_eq!(tree.total_sub_menus(), 0);
    assert!(tree.find(1).unwrap().action_provider.is_none());
    assert!(tree.find(1).unwrap().action_view.is_some());
    assert!(tree.find(2).unwrap().action_provider.is_none());
    assert!(tree.find(2).unwrap().action_view_layout.is_some());
}

#[test]
fn test_action_view_class_wins_over_layout() {
    let mut registry = ExtensionRegistry::new();
    registry.declare_action_view("com.example.SearchBox");

    let tree = inflate_with(
        &registry,
        r#"<menu><item id="1" actionViewClass="com.example.SearchBox" actionLayout="@layout/search"/></menu>"#,
    );

    let item = tree.find(1).unwrap();
    assert!(item.action_view.is_some());
    assert!(item.action_view_layout.is_none());
}

#[test]
fn test_unknown_extension_classes_are_not_fatal() {
    let tree = inflate(
        r#"<menu>
            <item id="1" title="A" actionViewClass="com.example.Missing"/>
            <item id="2" title="B" actionProviderClass="com.example.AlsoMissing"/>
        </menu>"#,
    );

    assert_eq!(tree.len(), 2);
    assert!(tree.find(1).unwrap().action_view.is_none());
    assert!(tree.find(2).unwrap().action_provider.is_none());
}

#[test]
fn test_failing_factory_is_not_fatal() {
    let mut registry = ExtensionRegistry::new();
    registry.register_action_view("com.example.Broken", || -> Result<Box<dyn ActionView>, ExtensionError> {
        Err(ExtensionError::Construction {
            class: "com.example.Broken".to_string(),
            reason: "no default constructor".to_string(),
        })
    });

    let tree = inflate_with(
        &registry,
        r#"<menu><item id="1" title="Still here" actionViewClass="com.example.Broken"/></menu>"#,
    );

    let item = tree.find(1).unwrap();
    assert_eq!(item.title.as_deref(), Some("Still here"));
    assert!(item.action_view.is_none());
}

#[test]
fn test_deeply_nested_sub_menus() {
    let tree = inflate(
        r#"<menu>
            <item id="1"><menu>
                <item id="2"><menu>
                    <item id="3"><menu><item id="4" title="Leaf"/></menu></item>
                </menu></item>
            </menu></item>
        </menu>"#,
    );

    assert_eq!(tree.total_items(), 4);
    assert_eq!(tree.total_sub_menus(), 3);
    assert_eq!(tree.sub_menu(3).unwrap().entries()[0].item.title.as_deref(), Some("Leaf"));
}

#[test]
fn test_sub_menu_scope_does_not_inherit_outer_group() {
    let tree = inflate(
        r#"<menu>
            <group id="9" enabled="false">
                <item id="1"><menu><item id="2"/></menu></item>
            </group>
        </menu>"#,
    );

    assert_eq!(tree.find(1).unwrap().group_id, 9);
    let nested = tree.find(2).unwrap();
    assert_eq!(nested.group_id, 0);
    assert!(nested.enabled);
}

// ============================================================================
// Skip Mode
// ============================================================================

#[test]
fn test_items_inside_unknown_tag_are_skipped() {
    let tree = inflate(
        r#"<menu>
            <foo><item id="1"/><group id="3"/><menu><item id="4"/></menu></foo>
            <item id="2"/>
        </menu>"#,
    );

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.entries()[0].item.id, 2);
    assert_eq!(tree.entries()[0].item.group_id, 0, "skipped group had no effect");
}

#[test]
fn test_nested_same_name_unknown_ends_skip_early() {
    let tree = inflate(
        r#"<menu>
            <foo><foo></foo><item id="1"/></foo>
        </menu>"#,
    );

    // Skipping stops at the first </foo>, so the item is read
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.entries()[0].item.id, 1);
}

#[test]
fn test_unknown_tag_inside_item() {
    let tree = inflate(
        r#"<menu>
            <item id="1" title="Outer"><extra><menu><item id="2"/></menu></extra></item>
        </menu>"#,
    );

    assert_eq!(tree.len(), 1);
    assert!(!tree.entries()[0].is_sub_menu());
    assert!(tree.find(2).is_none());
}

// ============================================================================
// Structural Errors
// ============================================================================

#[test]
fn test_wrong_root_element() {
    let resources = ResourceTable::new();
    let registry = ExtensionRegistry::new();
    let err = MenuInflater::new(&resources, &registry)
        .inflate_str(r#"<PreferenceScreen><item id="1"/></PreferenceScreen>"#)
        .unwrap_err();

    assert!(err.is_structural());
    assert!(err.to_string().contains("<PreferenceScreen>"));
}

#[test]
fn test_end_of_document_inside_group() {
    let result = inflate_events(vec![
        TagEvent::start("menu", Attributes::new()),
        TagEvent::start("group", Attributes::new()),
        item("1"),
        TagEvent::end("item"),
    ]);

    assert!(matches!(result, Err(InflateError::UnexpectedEndOfDocument)));
}

#[test]
fn test_end_of_document_inside_item() {
    let result = inflate_events(vec![TagEvent::start("menu", Attributes::new()), item("1")]);
    assert!(matches!(result, Err(InflateError::UnexpectedEndOfDocument)));
}

#[test]
fn test_end_of_document_inside_nested_menu() {
    let result = inflate_events(vec![
        TagEvent::start("menu", Attributes::new()),
        item("1"),
        TagEvent::start("menu", Attributes::new()),
        item("2"),
        TagEvent::end("item"),
    ]);
    assert!(matches!(result, Err(InflateError::UnexpectedEndOfDocument)));
}

#[test]
fn test_end_of_document_while_skipping() {
    let result = inflate_events(vec![
        TagEvent::start("menu", Attributes::new()),
        TagEvent::start("foo", Attributes::new()),
        item("1"),
    ]);
    assert!(matches!(result, Err(InflateError::UnexpectedEndOfDocument)));
}

#[test]
fn test_events_after_root_close_are_not_consumed() {
    let mut stream = EventQueue::new(vec![
        TagEvent::start("menu", Attributes::new()),
        item("1"),
        TagEvent::end("item"),
        TagEvent::end("menu"),
        item("2"),
        TagEvent::end("item"),
    ]);
    let resources = ResourceTable::new();
    let registry = ExtensionRegistry::new();
    let mut tree = MenuTree::new();

    MenuInflater::new(&resources, &registry)
        .inflate(&mut stream, &mut tree)
        .unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.entries()[0].item.id, 1);
}

#[test]
fn test_truncated_fixture_fails() {
    let contents =
        std::fs::read_to_string(fixtures_path().join("broken/res/menu/truncated.xml")).unwrap();
    let resources = ResourceTable::new();
    let registry = ExtensionRegistry::new();

    let result = MenuInflater::new(&resources, &registry).inflate_str(&contents);
    assert!(result.is_err());
}
