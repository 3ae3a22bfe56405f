mod file_finder;

pub use file_finder::{is_menu_resource, MenuFile, MenuFinder};
