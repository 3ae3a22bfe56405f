use crate::menu::ExtensionRegistry;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for menuinflate runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Patterns to exclude from discovery
    pub exclude: Vec<String>,

    /// Extra `values*` directories to load strings and colors from
    pub values_dirs: Vec<PathBuf>,

    /// Extension classes that can be constructed by name
    pub extensions: ExtensionConfig,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Action view classes (`app:actionViewClass`)
    pub action_views: Vec<String>,

    /// Action provider classes (`app:actionProviderClass`)
    pub action_providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Fully qualified class name
    pub class: String,

    /// Whether the provider supplies a submenu
    #[serde(default)]
    pub has_sub_menu: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json
    pub format: String,

    /// Show per-item attributes in terminal output
    pub show_attributes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude: vec![
                "**/build/**".to_string(),
                "**/generated/**".to_string(),
                "**/.gradle/**".to_string(),
                "**/.idea/**".to_string(),
            ],
            values_dirs: vec![],
            extensions: ExtensionConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            action_views: vec![
                "androidx.appcompat.widget.SearchView".to_string(),
                "android.widget.SearchView".to_string(),
            ],
            action_providers: vec![
                ProviderConfig {
                    class: "androidx.appcompat.widget.ShareActionProvider".to_string(),
                    has_sub_menu: true,
                },
                ProviderConfig {
                    class: "androidx.mediarouter.app.MediaRouteActionProvider".to_string(),
                    has_sub_menu: false,
                },
            ],
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
            show_attributes: true,
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".menuinflate.yml",
            ".menuinflate.yaml",
            ".menuinflate.toml",
            "menuinflate.yml",
            "menuinflate.yaml",
            "menuinflate.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Check if a path matches an exclusion pattern
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|pattern| glob_match(pattern, &path_str))
    }

    /// Registry with every configured extension class declared
    pub fn extension_registry(&self) -> ExtensionRegistry {
        let mut registry = ExtensionRegistry::new();
        for class in &self.extensions.action_views {
            registry.declare_action_view(class.clone());
        }
        for provider in &self.extensions.action_providers {
            registry.declare_action_provider(provider.class.clone(), provider.has_sub_menu);
        }
        registry
    }
}

/// Simple glob matching for patterns like "*.xml" or "**/build/**"
fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern.starts_with('*') && !pattern.contains('/') {
        let suffix = &pattern[1..];
        return text.ends_with(suffix);
    }

    if pattern.ends_with('*') && !pattern.contains('/') {
        let prefix = &pattern[..pattern.len() - 1];
        return text.starts_with(prefix);
    }

    if pattern.contains("**") {
        // "**/build/**" must match a whole directory name, not a substring
        if pattern.starts_with("**/") && pattern.ends_with("/**") {
            let dir_name = pattern.trim_start_matches("**/").trim_end_matches("/**");
            let dir_pattern = format!("/{}/", dir_name.trim_matches('/'));
            return text.contains(&dir_pattern);
        }

        let parts: Vec<&str> = pattern.split("**").collect();
        if parts.len() == 2 {
            let prefix = parts[0].trim_end_matches('/');
            let suffix = parts[1].trim_start_matches('/');

            if prefix.is_empty() && suffix.is_empty() {
                return true;
            }

            if prefix.is_empty() {
                return text.ends_with(suffix) || text.contains(&format!("/{}", suffix));
            }

            if suffix.is_empty() {
                return text.starts_with(prefix) || text.contains(&format!("{}/", prefix));
            }

            return (text.starts_with(prefix) || text.contains(&format!("/{}/", prefix)))
                && (text.ends_with(suffix) || text.contains(&format!("/{}", suffix)));
        }
    }

    text == pattern
}
