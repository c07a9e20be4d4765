//! Color theme for CLI output

use crate::domain::sparkmagic::AuthMode;
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Kerberos needs a manual kinit, so it is highlighted as a warning
    pub fn auth_color(&self, auth: AuthMode) -> TableColor {
        match auth {
            AuthMode::None => self.success,
            AuthMode::Kerberos => self.warning,
        }
    }
}
