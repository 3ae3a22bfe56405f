use crate::config::Config;
use ignore::WalkBuilder;
use miette::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A menu resource on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuFile {
    /// Path to the XML file
    pub path: PathBuf,

    /// The `res/` directory this menu belongs to, when it lives in one
    pub res_dir: Option<PathBuf>,
}

impl MenuFile {
    pub fn new(path: PathBuf) -> Self {
        let res_dir = res_dir_of(&path);
        Self { path, res_dir }
    }

    /// Resource name as referenced from code (`R.menu.<name>`)
    pub fn resource_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// The `res/` dir of a `res/menu*/file.xml` path
fn res_dir_of(path: &Path) -> Option<PathBuf> {
    let menu_dir = path.parent()?;
    let menu_dir_name = menu_dir.file_name()?.to_str()?;
    if !is_menu_dir_name(menu_dir_name) {
        return None;
    }
    menu_dir.parent().map(Path::to_path_buf)
}

/// `menu`, or a qualified variant such as `menu-v21` / `menu-land`
fn is_menu_dir_name(name: &str) -> bool {
    name == "menu" || name.starts_with("menu-")
}

fn is_values_dir_name(name: &str) -> bool {
    name == "values" || name.starts_with("values-")
}

/// Check whether a path looks like a menu resource
pub fn is_menu_resource(path: &Path) -> bool {
    let is_xml = path.extension().map(|e| e == "xml").unwrap_or(false);
    is_xml && res_dir_of(path).is_some()
}

/// Finder for menu resources in a project
pub struct MenuFinder<'a> {
    config: &'a Config,
}

impl<'a> MenuFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Resolve CLI targets: files are taken as-is, directories are scanned
    pub fn find_menus(&self, targets: &[PathBuf]) -> Result<Vec<MenuFile>> {
        let mut menus: Vec<MenuFile> = targets
            .par_iter()
            .flat_map(|target| {
                if target.is_file() {
                    vec![MenuFile::new(target.clone())]
                } else {
                    self.scan_directory(target)
                }
            })
            .collect();

        menus.sort_by(|a, b| a.path.cmp(&b.path));
        menus.dedup();
        debug!("Found {} menu resources", menus.len());
        Ok(menus)
    }

    /// Scan a directory for `res/menu*/*.xml`
    fn scan_directory(&self, dir: &Path) -> Vec<MenuFile> {
        if !dir.exists() {
            trace!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }

        let walker = WalkBuilder::new(dir)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .ignore(true)
            .parents(true)
            .follow_links(false)
            .build();

        walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();

                if self.config.should_exclude(path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }
                if !is_menu_resource(path) {
                    return None;
                }

                trace!("Found menu: {}", path.display());
                Some(MenuFile::new(path.to_path_buf()))
            })
            .collect()
    }

    /// `values*` directories next to the given `res/` directories
    pub fn values_dirs(&self, res_dirs: &[PathBuf]) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        for res_dir in res_dirs {
            let entries = match std::fs::read_dir(res_dir) {
                Ok(entries) => entries,
                Err(e) => {
                    trace!("Cannot list {}: {}", res_dir.display(), e);
                    continue;
                }
            };
            for entry in entries.flatten() {
                let path = entry.path();
                let is_values = path.is_dir()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .map(is_values_dir_name)
                        .unwrap_or(false);
                if is_values && !self.config.should_exclude(&path) {
                    dirs.push(path);
                }
            }
        }
        // Unqualified `values` first so qualified variants override it
        dirs.sort_by_key(|p| {
            let name = p.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
            (name != "values", p.clone())
        });
        dirs.dedup();
        dirs
    }
}
