//! The `[acquisition]` table: acquisition parameters with explicit units.

use serde::Deserialize;

use units::{kv_, mm_, s_, ElectricPotential, Length, Time};

use super::deserialize_uom_opt;
use crate::acquisition::AcquisitionParameters;
use crate::error::Result;
use crate::types::{Anglef32, Intensityf32, Ratiof32};

/// Every field is optional: missing ones keep the value of the parameters
/// passed to `resolve`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AcquisitionTable {

    /// Projection angle in degrees
    pub angle: Option<Anglef32>,

    #[serde(default)]
    #[serde(deserialize_with = "deserialize_uom_opt")]
    pub sid: Option<Length>,

    #[serde(default)]
    #[serde(deserialize_with = "deserialize_uom_opt")]
    pub sdd: Option<Length>,

    #[serde(default)]
    #[serde(deserialize_with = "deserialize_uom_opt")]
    pub kvp: Option<ElectricPotential>,

    #[serde(default)]
    #[serde(deserialize_with = "deserialize_uom_opt")]
    pub exposure: Option<Time>,

    /// Aluminium-equivalent thickness
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_uom_opt")]
    pub filtration: Option<Length>,

    pub grid_ratio: Option<Ratiof32>,

    pub i0: Option<Intensityf32>,
}

impl AcquisitionTable {

    /// Overlay the fields present in the table onto `base`, converting to the
    /// core's units (mm, s, kV), and validate the result.
    pub fn resolve(&self, base: AcquisitionParameters) -> Result<AcquisitionParameters> {
        let params = AcquisitionParameters {
            angle_deg    : self.angle     .unwrap_or(base.angle_deg),
            sid          : self.sid       .map_or(base.sid          , mm_),
            sdd          : self.sdd       .map_or(base.sdd          , mm_),
            kvp          : self.kvp       .map_or(base.kvp          , kv_),
            exposure_time: self.exposure  .map_or(base.exposure_time, s_ ),
            filtration_mm: self.filtration.map_or(base.filtration_mm, mm_),
            grid_ratio   : self.grid_ratio.unwrap_or(base.grid_ratio),
            i0           : self.i0        .unwrap_or(base.i0),
        };
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XrayError;
    use float_eq::assert_float_eq;
    use units::{cm, kv, mm, ms};

    fn parse(input: &str) -> AcquisitionTable { toml::from_str(input).unwrap() }

    #[test]
    fn empty_table_keeps_base() {
        let base = AcquisitionParameters { kvp: 42.0, ..AcquisitionParameters::default() };
        assert_eq!(parse("").resolve(base).unwrap(), base);
    }

    #[test]
    fn quantities_are_converted_to_core_units() {
        let table = parse(r#"
            angle      = 30.0
            sid        = "50 cm"
            sdd        = "1.2 m"
            kvp        = "35 kV"
            exposure   = "500 ms"
            filtration = "2.5 mm"
            grid_ratio = 0.9
        "#);
        assert_eq!(table.sid     , Some(cm(50.0)));
        assert_eq!(table.kvp     , Some(kv(35.0)));
        assert_eq!(table.exposure, Some(ms(500.0)));
        assert_eq!(table.filtration, Some(mm(2.5)));

        let p = table.resolve(AcquisitionParameters::default()).unwrap();
        assert_float_eq!(p.angle_deg    ,   30.0, ulps <= 1);
        assert_float_eq!(p.sid          ,  500.0, rmax <= 1e-6);
        assert_float_eq!(p.sdd          , 1200.0, rmax <= 1e-6);
        assert_float_eq!(p.kvp          ,   35.0, rmax <= 1e-6);
        assert_float_eq!(p.exposure_time,    0.5, rmax <= 1e-6);
        assert_float_eq!(p.filtration_mm,    2.5, rmax <= 1e-6);
        assert_float_eq!(p.grid_ratio   ,    0.9, ulps <= 1);
        assert_float_eq!(p.i0           ,    1.0, ulps <= 1);
    }

    #[test]
    fn resolved_parameters_are_validated() {
        let table = parse(r#"kvp = "0 kV""#);
        assert!(matches!(table.resolve(AcquisitionParameters::default()),
                         Err(XrayError::InvalidParameter { name: "kvp", .. })));
    }

    #[test]
    fn numbers_without_units_are_rejected() {
        assert!(toml::from_str::<AcquisitionTable>("sid = 500").is_err());
    }

    #[test]
    fn wrong_dimension_is_rejected() {
        assert!(toml::from_str::<AcquisitionTable>(r#"sid = "35 kV""#).is_err());
    }
}
