//! TOML unit definitions.
//!
//! ```toml
//! tolerance = 1e-6
//!
//! [[unit]]
//! symbol = "px"
//! scale = 0.025
//! dimension = { length = 1 }
//!
//! [[unit]]
//! symbol = "kn"
//! scale = 0.514444
//! base = "m/s"
//! ```
//!
//! Definitions resolve in order, so a later `base` expression may refer to an earlier symbol.

use crate::dimension::Dimension;
use crate::error::{UnitError, UnitResult};
use crate::registry::{checked_tolerance, UnitRegistry, DEFAULT_TOLERANCE};
use crate::unit::Unit;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loaded unit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConfig {
    /// Relative tolerance for approximate quantity comparisons, applied to the registry.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Extra unit definitions.
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitDefinition>,
}

/// One `[[unit]]` entry.
///
/// Exactly one of `dimension` and `base` must be given. With `base`, the unit is `scale × base`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDefinition {
    /// Symbol the unit is registered under.
    pub symbol: String,
    /// Scale factor (to the canonical unit, or to `base` when given).
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Base-dimension exponents.
    #[serde(default)]
    pub dimension: Option<Dimension>,
    /// Unit expression this unit is a multiple of.
    #[serde(default)]
    pub base: Option<String>,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_scale() -> f64 {
    1.0
}

impl Default for UnitConfig {
    fn default() -> Self {
        UnitConfig {
            tolerance: default_tolerance(),
            units: Vec::new(),
        }
    }
}

impl UnitConfig {
    /// Load unit definitions from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> UnitResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            UnitError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!(
            "loaded {} unit definitions from {}",
            config.units.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse unit definitions from TOML text.
    pub fn from_toml_str(content: &str) -> UnitResult<Self> {
        let config: UnitConfig = toml::from_str(content)
            .map_err(|e| UnitError::Config(format!("failed to parse unit config: {e}")))?;
        checked_tolerance(config.tolerance)?;
        Ok(config)
    }

    /// The SI registry extended with every definition.
    pub fn into_registry(self) -> UnitResult<UnitRegistry> {
        let mut registry = UnitRegistry::si();
        self.apply_to(&mut registry)?;
        Ok(registry)
    }

    /// Sets the registry tolerance and adds every definition to `registry`, in order.
    pub fn apply_to(&self, registry: &mut UnitRegistry) -> UnitResult<()> {
        registry.set_tolerance(self.tolerance)?;
        for def in &self.units {
            let unit = def.resolve(registry)?;
            log::debug!(
                "defining unit `{}` ({}, scale {})",
                unit.symbol(),
                unit.dimension(),
                unit.scale()
            );
            registry.define(unit);
        }
        Ok(())
    }
}

impl FromStr for UnitConfig {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}

impl UnitDefinition {
    /// Builds the unit, looking `base` up in `registry`.
    pub fn resolve(&self, registry: &UnitRegistry) -> UnitResult<Unit> {
        if self.symbol.trim().is_empty() {
            return Err(UnitError::Config("unit symbol must not be empty".to_owned()));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(UnitError::Config(format!(
                "unit `{}` has non-positive scale {}",
                self.symbol, self.scale
            )));
        }
        match (&self.dimension, &self.base) {
            (Some(dimension), None) => Ok(Unit::new(self.symbol.clone(), *dimension, self.scale)),
            (None, Some(base)) => {
                let base = registry.parse(base)?;
                Ok(Unit::new(
                    self.symbol.clone(),
                    base.dimension(),
                    self.scale * base.scale(),
                ))
            }
            _ => Err(UnitError::Config(format!(
                "unit `{}` needs exactly one of `dimension` or `base`",
                self.symbol
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{M, S};
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
tolerance = 1e-6

[[unit]]
symbol = "px"
scale = 0.025
dimension = { length = 1 }

[[unit]]
symbol = "px_per_tick"
scale = 12.0
base = "px/s"
"#;

    #[test]
    fn parses_definitions() {
        let config = UnitConfig::from_toml_str(SAMPLE).unwrap();
        assert_relative_eq!(config.tolerance, 1e-6);
        assert_eq!(config.units.len(), 2);
        assert_eq!(config.units[0].dimension, Some(Dimension::LENGTH));
        assert_eq!(config.units[1].base.as_deref(), Some("px/s"));
    }

    #[test]
    fn later_definitions_see_earlier_ones() {
        let reg = UnitConfig::from_toml_str(SAMPLE).unwrap().into_registry().unwrap();
        let px = reg.get("px").unwrap();
        assert_relative_eq!(px.conversion_factor(&M).unwrap(), 0.025);
        let speed = reg.get("px_per_tick").unwrap();
        assert!(speed.is_compatible(&(M / S)));
        assert_relative_eq!(speed.scale(), 0.3, max_relative = 1e-12);
    }

    #[test]
    fn tolerance_reaches_the_registry() {
        let reg = UnitConfig::from_toml_str(SAMPLE).unwrap().into_registry().unwrap();
        assert_eq!(reg.tolerance(), 1e-6);
        assert!(reg.approx_eq(&(1.0 * M), &(1.000_000_5 * M)));
        assert!(!reg.approx_eq(&(1.0 * M), &(1.000_01 * M)));

        let reg = UnitConfig::default().into_registry().unwrap();
        assert_eq!(reg.tolerance(), DEFAULT_TOLERANCE);
    }

    #[test]
    fn defaults_apply() {
        let config = UnitConfig::from_toml_str("").unwrap();
        assert_eq!(config, UnitConfig::default());
        let config: UnitConfig = "[[unit]]\nsymbol = \"x\"\ndimension = {}".parse().unwrap();
        assert_eq!(config.units[0].scale, 1.0);
    }

    #[test]
    fn rejects_ambiguous_or_missing_dimension() {
        let both = r#"
[[unit]]
symbol = "q"
dimension = { time = 1 }
base = "s"
"#;
        let err = UnitConfig::from_toml_str(both).unwrap().into_registry().unwrap_err();
        assert!(matches!(err, UnitError::Config(_)));

        let neither = "[[unit]]\nsymbol = \"q\"\n";
        assert!(UnitConfig::from_toml_str(neither).unwrap().into_registry().is_err());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(UnitConfig::from_toml_str("tolerance = -1.0").is_err());
        let zero = "[[unit]]\nsymbol = \"z\"\nscale = 0.0\ndimension = { mass = 1 }";
        assert!(UnitConfig::from_toml_str(zero).unwrap().into_registry().is_err());
        let unknown_field = "[[unit]]\nsymbol = \"z\"\nsize = 3";
        assert!(matches!(
            UnitConfig::from_toml_str(unknown_field),
            Err(UnitError::Config(_))
        ));
        let unknown_base = "[[unit]]\nsymbol = \"z\"\nbase = \"parsec\"";
        assert_eq!(
            UnitConfig::from_toml_str(unknown_base)
                .unwrap()
                .into_registry()
                .unwrap_err(),
            UnitError::UnknownUnit("parsec".to_owned())
        );
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = UnitConfig::from_file(file.path()).unwrap();
        assert_eq!(config.units.len(), 2);

        let missing = UnitConfig::from_file("/nonexistent/units.toml");
        assert!(matches!(missing, Err(UnitError::Config(_))));
    }
}
