mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::batch::InflatedMenu;
use crate::resources::ResourceTable;
use miette::Result;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl ReportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "terminal" => Some(ReportFormat::Terminal),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Reporter for inflated menu trees
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    show_attributes: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
            show_attributes: true,
        }
    }

    pub fn with_attributes(mut self, show: bool) -> Self {
        self.show_attributes = show;
        self
    }

    pub fn report(&self, menus: &[InflatedMenu], resources: &ResourceTable) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new().with_attributes(self.show_attributes);
                reporter.report(menus, resources)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone());
                reporter.report(menus, resources)
            }
        }
    }
}

/// Display form of an item id: its resource name when known
pub(crate) fn id_label(id: i32, resources: &ResourceTable) -> Option<String> {
    if id == crate::menu::NO_ID {
        return None;
    }
    Some(match resources.id_name(id) {
        Some(name) => match name.split_once(':') {
            Some((package, local)) => format!("@{}:id/{}", package, local),
            None => format!("@id/{}", name),
        },
        None => id.to_string(),
    })
}
