//! Author default taken from the local version-control identity.

use log::debug;

pub trait IdentitySource {
    /// Configured user name, if any.
    fn user_name(&self) -> Option<String>;
}

/// Reads `user.name` from the global/system git configuration.
pub struct GitIdentity;

impl IdentitySource for GitIdentity {
    fn user_name(&self) -> Option<String> {
        let name = git2::Config::open_default()
            .and_then(|config| config.get_string("user.name"))
            .map_err(|e| debug!("No git user.name available: {e}"))
            .ok()?;
        let name = name.trim().to_string();
        (!name.is_empty()).then_some(name)
    }
}
