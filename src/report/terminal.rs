use super::id_label;
use crate::batch::InflatedMenu;
use crate::menu::{MenuEntry, MenuItem, MenuTree};
use crate::resources::ResourceTable;
use colored::Colorize;
use miette::Result;

/// Terminal reporter printing each menu as an indented tree
pub struct TerminalReporter {
    show_attributes: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            show_attributes: true,
        }
    }

    pub fn with_attributes(mut self, show: bool) -> Self {
        self.show_attributes = show;
        self
    }

    pub fn report(&self, menus: &[InflatedMenu], resources: &ResourceTable) -> Result<()> {
        if menus.is_empty() {
            println!("{}", "No menu resources found.".yellow());
            return Ok(());
        }

        for menu in menus {
            println!("{}", menu.file.path.display().to_string().cyan().bold());
            match &menu.result {
                Ok(tree) => self.print_tree(tree, resources, 1),
                Err(e) => println!("  {} {}", "error:".red().bold(), e.to_string().red()),
            }
            println!();
        }

        self.print_summary(menus);
        Ok(())
    }

    fn print_tree(&self, tree: &MenuTree, resources: &ResourceTable, depth: usize) {
        if tree.is_empty() {
            println!("{}{}", "  ".repeat(depth), "(empty)".dimmed());
            return;
        }
        for entry in tree.entries_in_display_order() {
            self.print_entry(entry, resources, depth);
        }
    }

    fn print_entry(&self, entry: &MenuEntry, resources: &ResourceTable, depth: usize) {
        let item = &entry.item;
        let indent = "  ".repeat(depth);
        let marker = if entry.is_sub_menu() { "▸" } else { "•" };
        let title = item.title.as_deref().unwrap_or("(untitled)");

        let mut line = format!("{}{} {}", indent, marker, title.bold());
        if let Some(label) = id_label(item.id, resources) {
            line.push_str(&format!(" {}", label.dimmed()));
        }
        if self.show_attributes {
            let attributes = self.attribute_summary(item);
            if !attributes.is_empty() {
                line.push_str(&format!(" {}", attributes.join(" ").dimmed()));
            }
        }
        println!("{}", line);

        if let Some(sub) = &entry.sub_menu {
            self.print_tree(sub, resources, depth + 1);
        }
    }

    fn attribute_summary(&self, item: &MenuItem) -> Vec<String> {
        let mut parts = Vec::new();

        if item.checkable {
            let mode = if item.exclusive_checkable { "single" } else { "all" };
            parts.push(format!("[checkable:{}]", mode));
        }
        if item.checked {
            parts.push("[checked]".to_string());
        }
        if !item.visible {
            parts.push("[hidden]".to_string());
        }
        if !item.enabled {
            parts.push("[disabled]".to_string());
        }
        if let Some(flags) = item.show_as_action {
            parts.push(format!("[showAsAction:{}]", flags));
        }
        if let Some(icon) = &item.icon {
            parts.push(format!("[icon:{}]", icon));
        }
        if let Some(view) = &item.action_view {
            parts.push(format!("[actionView:{}]", view.class_name()));
        } else if let Some(layout) = &item.action_view_layout {
            parts.push(format!("[actionLayout:{}]", layout));
        }
        if let Some(provider) = &item.action_provider {
            parts.push(format!("[actionProvider:{}]", provider.class_name()));
        }
        if let Some(shortcut) = item.alphabetic_shortcut {
            parts.push(format!("[{}+{}]", shortcut.modifiers, shortcut.key));
        }
        if let Some(method) = &item.on_click {
            parts.push(format!("[onClick:{}]", method));
        }

        parts
    }

    fn print_summary(&self, menus: &[InflatedMenu]) {
        let failures = menus.iter().filter(|m| !m.is_ok()).count();
        let (items, sub_menus) = menus
            .iter()
            .filter_map(|m| m.result.as_ref().ok())
            .fold((0, 0), |(items, subs), tree| {
                (items + tree.total_items(), subs + tree.total_sub_menus())
            });

        println!("{}", "Summary:".bold());
        println!(
            "  {} menus, {} items, {} submenus",
            menus.len().to_string().cyan(),
            items.to_string().cyan(),
            sub_menus.to_string().cyan()
        );
        if failures > 0 {
            println!("  {} {}", failures.to_string().red().bold(), "failed to inflate".red());
        } else {
            println!("  {}", "All menus inflated.".green());
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
