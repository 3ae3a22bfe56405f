use super::id_label;
use crate::batch::InflatedMenu;
use crate::menu::{MenuEntry, MenuTree};
use crate::resources::ResourceTable;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, menus: &[InflatedMenu], resources: &ResourceTable) -> Result<()> {
        let json = self.render(menus, resources)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }

    pub fn render(&self, menus: &[InflatedMenu], resources: &ResourceTable) -> Result<String> {
        let report = JsonReport::from_menus(menus, resources);
        serde_json::to_string_pretty(&report).into_diagnostic()
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: &'static str,
    files: Vec<JsonFile>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonFile {
    path: String,
    resource: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    entries: Vec<JsonEntry>,
}

#[derive(Serialize)]
struct JsonEntry {
    id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    id_name: Option<String>,
    group_id: i32,
    order: u32,
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title_condensed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    checkable: bool,
    exclusive_checkable: bool,
    checked: bool,
    visible: bool,
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    show_as_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    on_click: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action_view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alphabetic_shortcut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    numeric_shortcut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_tint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_tint_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub_menu: Option<Vec<JsonEntry>>,
}

#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    failures: usize,
    items: usize,
    sub_menus: usize,
}

impl JsonReport {
    fn from_menus(menus: &[InflatedMenu], resources: &ResourceTable) -> Self {
        let mut items = 0;
        let mut sub_menus = 0;
        let mut failures = 0;

        let files = menus
            .iter()
            .map(|menu| {
                let (error, entries) = match &menu.result {
                    Ok(tree) => {
                        items += tree.total_items();
                        sub_menus += tree.total_sub_menus();
                        (None, JsonEntry::from_tree(tree, resources))
                    }
                    Err(e) => {
                        failures += 1;
                        (Some(e.to_string()), Vec::new())
                    }
                };
                JsonFile {
                    path: menu.file.path.display().to_string(),
                    resource: menu.file.resource_name(),
                    error,
                    entries,
                }
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION"),
            files,
            summary: JsonSummary {
                files: menus.len(),
                failures,
                items,
                sub_menus,
            },
        }
    }
}

impl JsonEntry {
    fn from_tree(tree: &MenuTree, resources: &ResourceTable) -> Vec<Self> {
        tree.entries()
            .iter()
            .map(|entry| Self::from_entry(entry, resources))
            .collect()
    }

    fn from_entry(entry: &MenuEntry, resources: &ResourceTable) -> Self {
        let item = &entry.item;
        let action_view = match (&item.action_view, &item.action_view_layout) {
            (Some(view), _) => Some(view.class_name().to_string()),
            (None, Some(layout)) => Some(layout.to_string()),
            (None, None) => None,
        };

        Self {
            id: item.id,
            id_name: id_label(item.id, resources).filter(|label| label.starts_with('@')),
            group_id: item.group_id,
            order: item.order,
            title: item.title.clone(),
            title_condensed: item.title_condensed.clone(),
            icon: item.icon.as_ref().map(|r| r.to_string()),
            checkable: item.checkable,
            exclusive_checkable: item.exclusive_checkable,
            checked: item.checked,
            visible: item.visible,
            enabled: item.enabled,
            show_as_action: item.show_as_action.map(|flags| flags.to_string()),
            on_click: item.on_click.clone(),
            action_view,
            action_provider: item
                .action_provider
                .as_ref()
                .map(|p| p.class_name().to_string()),
            content_description: item.content_description.clone(),
            tooltip_text: item.tooltip_text.clone(),
            alphabetic_shortcut: item
                .alphabetic_shortcut
                .map(|s| format!("{}+{}", s.modifiers, s.key)),
            numeric_shortcut: item
                .numeric_shortcut
                .map(|s| format!("{}+{}", s.modifiers, s.key)),
            icon_tint: item.icon_tint_list.as_ref().map(|t| t.to_string()),
            icon_tint_mode: item.icon_tint_mode.map(|m| m.name()),
            sub_menu: entry
                .sub_menu
                .as_ref()
                .map(|sub| Self::from_tree(sub, resources)),
        }
    }
}
