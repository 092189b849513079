//! Configuration encoding
//!
//! Binary configuration uses postcard; hand-written configuration uses TOML.
//! Both paths validate before handing a config to the controller.

use super::types::{ConfigError, MachineConfig};

/// Upper bound on the encoded size of a `MachineConfig`
pub const MAX_CONFIG_SIZE: usize = 32;

/// Serialize a validated config into `buffer`
///
/// Returns the written prefix of `buffer`.
pub fn encode<'a>(config: &MachineConfig, buffer: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
    config.validate()?;
    postcard::to_slice(config, buffer).map_err(|_| ConfigError::Serialize)
}

/// Deserialize and validate a config
pub fn decode(bytes: &[u8]) -> Result<MachineConfig, ConfigError> {
    let config: MachineConfig =
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
    checked(config)
}

/// Parse and validate a TOML config
///
/// Missing keys take their defaults:
///
/// ```toml
/// tick_rate = "hz10"
///
/// [durations]
/// fill_s = 120
/// wash_s = 300
/// spin_s = 60
/// ```
#[cfg(feature = "toml")]
pub fn from_toml(input: &str) -> Result<MachineConfig, ConfigError> {
    let config: MachineConfig = toml::from_str(input).map_err(|_| ConfigError::TomlParse)?;
    checked(config)
}

fn checked(config: MachineConfig) -> Result<MachineConfig, ConfigError> {
    match config.validate() {
        Ok(()) => Ok(config),
        Err(ConfigError::VersionMismatch) => {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Config version mismatch: found {}, expected {}",
                config.version,
                super::types::CONFIG_VERSION
            );
            Err(ConfigError::VersionMismatch)
        }
        Err(e) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("Rejected config: {:?}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CycleDurations, TickRate, CONFIG_VERSION};

    #[test]
    fn test_encode_decode() {
        let config = MachineConfig {
            tick_rate: TickRate::Hz100,
            durations: CycleDurations {
                fill_s: 4,
                wash_s: 9,
                spin_s: 2,
            },
            ..Default::default()
        };

        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let encoded = encode(&config, &mut buffer).unwrap();
        assert_eq!(decode(encoded), Ok(config));
    }

    #[test]
    fn test_encode_rejects_invalid() {
        let config = MachineConfig {
            durations: CycleDurations {
                fill_s: 10,
                wash_s: 5,
                spin_s: 2,
            },
            ..Default::default()
        };

        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        assert_eq!(
            encode(&config, &mut buffer).map(|b| b.len()),
            Err(ConfigError::DurationOrder)
        );
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buffer = [0u8; 2];
        assert_eq!(
            encode(&MachineConfig::default(), &mut buffer).map(|b| b.len()),
            Err(ConfigError::Serialize)
        );
    }

    #[test]
    fn test_decode_garbage() {
        assert_eq!(decode(&[]), Err(ConfigError::Deserialize));
    }

    #[test]
    fn test_decode_version_mismatch() {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = encode(&MachineConfig::default(), &mut buffer).unwrap().len();
        // version is the first field, encoded as a single byte
        buffer[0] = CONFIG_VERSION + 1;
        assert_eq!(decode(&buffer[..len]), Err(ConfigError::VersionMismatch));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml() {
        let config = from_toml(
            r#"
            tick_rate = "hz1k"

            [durations]
            fill_s = 30
            wash_s = 90
            spin_s = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.tick_rate, TickRate::Hz1k);
        assert_eq!(config.durations.wash_s, 90);

        let ctrl = crate::Controller::from_config(&config).unwrap();
        assert_eq!(ctrl.tick_rate(), TickRate::Hz1k);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_defaults_and_errors() {
        assert_eq!(from_toml(""), Ok(MachineConfig::default()));
        assert_eq!(from_toml("tick_rate = \"fast\""), Err(ConfigError::TomlParse));
        assert_eq!(
            from_toml("[durations]\nspin_s = 500"),
            Err(ConfigError::DurationOrder)
        );
    }
}
