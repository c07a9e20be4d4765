//! Status icons for CLI output

use crate::domain::sparkmagic::AuthMode;

pub struct StatusIcon;

impl StatusIcon {
    pub const SUCCESS: &'static str = "✓";

    /// Lock shown for Kerberos-secured endpoints
    pub const LOCKED: &'static str = "🔒";

    pub const UNLOCKED: &'static str = "🔓";

    pub fn auth_icon(auth: AuthMode) -> &'static str {
        match auth {
            AuthMode::None => Self::UNLOCKED,
            AuthMode::Kerberos => Self::LOCKED,
        }
    }
}
