//! Configuration file parser.
//!
//! Every table is optional; missing tables and fields take their defaults.
//!
//! ```toml
//! [acquisition]
//! sid      = "50 cm"
//! kvp      = "35 kV"
//! exposure = "500 ms"
//!
//! [physics]
//! radiograph_thickness_scale = 50.0
//!
//! [breast]
//! seed = 42
//!
//! [sinogram]
//! max_angle = 180.0
//! step      = 1.0
//! ```

pub mod acquisition;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

pub use acquisition::AcquisitionTable;

use crate::acquisition::{AcquisitionParameters, SinogramRange};
use crate::error::{Result, XrayError};
use crate::phantom::{BreastConfig, PhantomBuilder, ReferenceCalibration, TissueMu};
use crate::physics::PhysicsConfig;
use crate::projection::Projector;

/// Parse a string such as `"50 cm"` into a `uom` quantity
fn deserialize_uom_opt<'d, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'d>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| s.parse::<T>())
        .transpose()
        .map_err(de::Error::custom)
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub acquisition: AcquisitionTable,
    pub physics: PhysicsConfig,
    pub tissue: TissueMu,
    pub breast: BreastConfig,
    pub reference: ReferenceCalibration,
    pub sinogram: SinogramRange,
}

impl Config {

    pub fn acquisition(&self) -> Result<AcquisitionParameters> {
        self.acquisition.resolve(AcquisitionParameters::default())
    }

    pub fn phantom_builder(&self) -> PhantomBuilder {
        PhantomBuilder {
            tissue: self.tissue,
            breast: self.breast.clone(),
            reference: self.reference,
        }
    }

    pub fn projector(&self) -> Projector { Projector::new(self.physics) }
}

pub fn parse_config(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}

pub fn read_config_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|source| XrayError::ConfigRead { path: path.to_path_buf(), source })?;
    parse_config(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // ----- Test the example on-disk config file ----------------------------------------
    #[test]
    fn example_config_file() {
        let config = read_config_file("xray-config.toml").unwrap();
        let params = config.acquisition().unwrap();
        assert!((params.kvp - 35.0).abs() < 1e-4);
        assert!((params.sdd - 1000.0).abs() < 1e-2);
        assert_eq!(params.grid_ratio, 0.9);
        assert_eq!(config.breast.seed, 42);
        assert_eq!(config.sinogram, SinogramRange::new(180.0, 1.0));
    }

    // ----- Some helpers to make the tests more concise ---------------------------------
    fn parse(input: &str) -> Config { parse_config(input).unwrap() }

    macro_rules! check {
        ($text:expr => $($table:ident.$field:ident = $expected:expr);+$(;)?) => {
            let config = parse($text);
            println!("DESERIALIZED: {config:?}");
            $(assert_eq!(config.$table.$field, $expected);)*
        };
    }

    // ----- Test deserializing of individual tables --------------------------------------
    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse(""), Config::default());
    }

    #[test]
    fn config_physics() {
        check!{r#"
                 [physics]
                 mu_al_reference = 0.12
                 radiograph_thickness_scale = 25.0
               "# =>
               physics.mu_al_reference            = 0.12;
               physics.radiograph_thickness_scale = 25.0;
               physics.reference_kvp              = 30.0;
        }
    }

    #[test]
    fn config_tissue_and_breast() {
        check!{r#"
                 [tissue]
                 lesion = 0.9
                 [breast]
                 calcifications = 3
                 seed = 7
                 calcification_radius = [0.02, 0.03]
               "# =>
               tissue.lesion               = 0.9;
               tissue.adipose              = 0.22;
               breast.calcifications       = 3;
               breast.seed                 = 7;
               breast.calcification_radius = (0.02, 0.03);
        }
    }

    #[test]
    fn config_reference_and_sinogram() {
        check!{r#"
                 [reference]
                 offset = 0.0
                 gain = 1.0
                 [sinogram]
                 max_angle = 90.0
               "# =>
               reference.offset   = 0.0;
               reference.gain     = 1.0;
               sinogram.max_angle = 90.0;
               sinogram.step      = 1.0;
        }
    }

    #[test]
    fn builder_and_projector_carry_the_configuration() {
        let config = parse("[tissue]\nlesion = 0.9\n[physics]\nprofile_thickness_scale = 2.0");
        assert_eq!(config.phantom_builder().tissue.lesion, 0.9);
        assert_eq!(config.projector().physics.profile_thickness_scale, 2.0);
    }

    // ----- Make sure that unknown fields are not accepted -----------------------------
    #[test]
    fn config_reject_unknown_table() {
        assert!(matches!(parse_config("[scatter]\nbins = 3"), Err(XrayError::ConfigParse(_))));
    }

    #[test]
    fn config_reject_unknown_field() {
        assert!(parse_config("[physics]\nunknown_field = 666").is_err());
    }

    // ----- Reading from disk -------------------------------------------------------------
    #[test]
    fn read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[acquisition]\nsdd = \"80 cm\"\nangle = 45.0").unwrap();
        let params = read_config_file(file.path()).unwrap().acquisition().unwrap();
        assert_eq!(params.angle_deg, 45.0);
        assert!((params.sdd - 800.0).abs() < 1e-3);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        match read_config_file(&missing) {
            Err(XrayError::ConfigRead { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected ConfigRead, got {other:?}"),
        }
    }
}
