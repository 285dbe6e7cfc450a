use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Address, Error, GENESIS_DESCRIPTION};

#[derive(Config, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionConfig {
    /// The address allowed to register voters and drive the workflow
    #[config(env = "EZBALLOT_ADMINISTRATOR")]
    pub administrator: Address,

    /// Description given to the sentinel proposal
    #[config(default = "GENESIS")]
    pub genesis_description: String,

    /// Longest accepted proposal description in bytes (unbounded if unset)
    #[config(env = "EZBALLOT_MAX_DESCRIPTION_LEN")]
    pub max_description_len: Option<usize>,
}

impl ElectionConfig {
    /// Configuration with defaults for everything but the administrator.
    pub fn new(administrator: Address) -> Self {
        Self {
            administrator,
            genesis_description: GENESIS_DESCRIPTION.to_string(),
            max_description_len: None,
        }
    }

    /// Load from a TOML file, with environment variables taking precedence.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let config = Self::builder().env().file(path.as_ref()).load()?;
        Ok(config)
    }

    pub fn with_max_description_len(mut self, limit: usize) -> Self {
        self.max_description_len = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_from_file_fills_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "administrator = \"0x0101010101010101010101010101010101010101\""
        )
        .unwrap();

        let config = ElectionConfig::load(file.path()).unwrap();
        assert_eq!(config, ElectionConfig::new(Address([1; 20])));
    }

    #[test]
    fn load_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "administrator = \"0202020202020202020202020202020202020202\"\n\
             genesis_description = \"no opinion\"\n\
             max_description_len = 64"
        )
        .unwrap();

        let config = ElectionConfig::load(file.path()).unwrap();
        assert_eq!(config.administrator, Address([2; 20]));
        assert_eq!(config.genesis_description, "no opinion");
        assert_eq!(config.max_description_len, Some(64));
    }

    #[test]
    fn bad_administrator_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "administrator = \"0x12\"").unwrap();

        assert!(matches!(ElectionConfig::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn serializes_as_toml() {
        let config = ElectionConfig::new(Address([3; 20])).with_max_description_len(10);
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("administrator = \"0x0303"));
        assert!(text.contains("max_description_len = 10"));
    }
}
