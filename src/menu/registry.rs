//! Class-name keyed factories for action views and action providers
//!
//! Menu resources name custom widgets by class (`app:actionViewClass`,
//! `app:actionProviderClass`). Instead of reflective construction, callers
//! register a factory per class name. A missing or failing factory is never
//! fatal to a build: the inflater logs it and leaves the feature off.

use crate::error::ExtensionError;
use std::collections::HashMap;
use std::fmt;

/// A widget shown in place of an item in the action bar
pub trait ActionView: fmt::Debug + Send {
    fn class_name(&self) -> &str;
}

/// An object that supplies an item's action view and, optionally, a submenu
pub trait ActionProvider: fmt::Debug + Send {
    fn class_name(&self) -> &str;

    /// Providers owning a submenu turn their item into a submenu entry
    fn has_sub_menu(&self) -> bool {
        false
    }
}

type ViewFactory = Box<dyn Fn() -> Result<Box<dyn ActionView>, ExtensionError> + Send + Sync>;
type ProviderFactory =
    Box<dyn Fn() -> Result<Box<dyn ActionProvider>, ExtensionError> + Send + Sync>;

/// Action view known only by its class name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredActionView {
    class_name: String,
}

impl DeclaredActionView {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }
}

impl ActionView for DeclaredActionView {
    fn class_name(&self) -> &str {
        &self.class_name
    }
}

/// Action provider known only by its class name and submenu capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredActionProvider {
    class_name: String,
    has_sub_menu: bool,
}

impl DeclaredActionProvider {
    pub fn new(class_name: impl Into<String>, has_sub_menu: bool) -> Self {
        Self {
            class_name: class_name.into(),
            has_sub_menu,
        }
    }
}

impl ActionProvider for DeclaredActionProvider {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn has_sub_menu(&self) -> bool {
        self.has_sub_menu
    }
}

/// Registry resolving extension class names at build time
#[derive(Default)]
pub struct ExtensionRegistry {
    views: HashMap<String, ViewFactory>,
    providers: HashMap<String, ProviderFactory>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_action_view<F>(&mut self, class_name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn ActionView>, ExtensionError> + Send + Sync + 'static,
    {
        self.views.insert(class_name.into(), Box::new(factory));
    }

    pub fn register_action_provider<F>(&mut self, class_name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn ActionProvider>, ExtensionError> + Send + Sync + 'static,
    {
        self.providers.insert(class_name.into(), Box::new(factory));
    }

    /// Register a class that always constructs as a [`DeclaredActionView`]
    pub fn declare_action_view(&mut self, class_name: impl Into<String>) {
        let class_name = class_name.into();
        let captured = class_name.clone();
        self.register_action_view(class_name, move || {
            Ok(Box::new(DeclaredActionView::new(captured.clone())) as Box<dyn ActionView>)
        });
    }

    /// Register a class that always constructs as a [`DeclaredActionProvider`]
    pub fn declare_action_provider(&mut self, class_name: impl Into<String>, has_sub_menu: bool) {
        let class_name = class_name.into();
        let captured = class_name.clone();
        self.register_action_provider(class_name, move || {
            Ok(Box::new(DeclaredActionProvider::new(captured.clone(), has_sub_menu))
                as Box<dyn ActionProvider>)
        });
    }

    pub fn create_action_view(&self, class_name: &str) -> Result<Box<dyn ActionView>, ExtensionError> {
        match self.views.get(class_name) {
            Some(factory) => factory(),
            None => Err(ExtensionError::UnknownClass(class_name.to_string())),
        }
    }

    pub fn create_action_provider(
        &self,
        class_name: &str,
    ) -> Result<Box<dyn ActionProvider>, ExtensionError> {
        match self.providers.get(class_name) {
            Some(factory) => factory(),
            None => Err(ExtensionError::UnknownClass(class_name.to_string())),
        }
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut views: Vec<_> = self.views.keys().collect();
        views.sort();
        let mut providers: Vec<_> = self.providers.keys().collect();
        providers.sort();
        f.debug_struct("ExtensionRegistry")
            .field("views", &views)
            .field("providers", &providers)
            .finish()
    }
}
