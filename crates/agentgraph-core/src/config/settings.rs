use std::str::FromStr;

use git2::Config;

use crate::error::CoreError;

const DEFAULT_CURSOR_FILE: &str = "agentgraph-cursor";

/// What to do when a registration arrives for a DID that already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReRegistration {
    /// Replace the agent wholesale and write a fresh founding status change.
    #[default]
    Overwrite,
    /// Drop the event and leave the existing agent untouched.
    Ignore,
}

impl ReRegistration {
    pub fn as_str(self) -> &'static str {
        match self {
            ReRegistration::Overwrite => "overwrite",
            ReRegistration::Ignore => "ignore",
        }
    }
}

impl FromStr for ReRegistration {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(ReRegistration::Overwrite),
            "ignore" => Ok(ReRegistration::Ignore),
            other => Err(CoreError::Config(format!(
                "agentgraph.reregistration must be 'overwrite' or 'ignore', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    pub enabled: bool,
    pub reregistration: ReRegistration,
    /// Cursor file name, relative to the repository's .git directory.
    pub cursor_file: String,
}

impl MapperConfig {
    /// Read config from the repo's .git/config [agentgraph] section.
    pub fn load(config: &Config) -> Result<Self, CoreError> {
        let reregistration = match config.get_string("agentgraph.reregistration") {
            Ok(value) => value.parse()?,
            Err(_) => ReRegistration::default(),
        };
        Ok(Self {
            enabled: config.get_bool("agentgraph.enabled").unwrap_or(false),
            reregistration,
            cursor_file: config
                .get_string("agentgraph.cursorFile")
                .unwrap_or_else(|_| DEFAULT_CURSOR_FILE.to_string()),
        })
    }

    /// Write config to the repo's .git/config [agentgraph] section.
    pub fn save(&self, config: &mut Config) -> Result<(), CoreError> {
        config
            .set_bool("agentgraph.enabled", self.enabled)
            .map_err(CoreError::Git)?;
        config
            .set_str("agentgraph.reregistration", self.reregistration.as_str())
            .map_err(CoreError::Git)?;
        config
            .set_str("agentgraph.cursorFile", &self.cursor_file)
            .map_err(CoreError::Git)?;
        Ok(())
    }

    /// Default config for `agentgraph init`.
    pub fn default_init() -> Self {
        Self {
            enabled: true,
            reregistration: ReRegistration::Overwrite,
            cursor_file: DEFAULT_CURSOR_FILE.to_string(),
        }
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self::default_init()
    }
}
