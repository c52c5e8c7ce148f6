//! Fabric and material arithmetic: stitch size, thread consumption and
//! finished/cut dimensions, plus the metric/imperial presentation rules.
use crate::geometry::MM_PER_INCH;
use serde::{Deserialize, Serialize};

/// Thread consumed per full cross stitch on the reference fabric, in meters.
/// A needlecraft rule of thumb, not a derived value.
pub const METERS_PER_STITCH_AT_REFERENCE: f64 = 0.013;
/// Fabric count at which [`METERS_PER_STITCH_AT_REFERENCE`] was calibrated.
pub const REFERENCE_FABRIC_COUNT: f64 = 14.0;
/// Length of one standard six-strand skein, in meters.
pub const SKEIN_LENGTH_M: f64 = 8.0;
/// Strands of floss recommended for full crosses on common Aida counts.
pub const RECOMMENDED_STRANDS: u32 = 2;
/// Extra fabric added on every side of the finished design, in inches.
pub const CUT_MARGIN_IN: f64 = 3.0;

pub const CM_PER_INCH: f64 = 2.54;
pub const YARDS_PER_METER: f64 = 1.093_613;

/// Stitches per inch of the fabric (Aida count). Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct FabricCount(f64);

impl FabricCount {
    pub const AIDA_11: FabricCount = FabricCount(11.0);
    pub const AIDA_14: FabricCount = FabricCount(14.0);
    pub const AIDA_16: FabricCount = FabricCount(16.0);
    pub const AIDA_18: FabricCount = FabricCount(18.0);

    /// Returns `None` for zero, negative or non-finite counts.
    pub fn new(count: f64) -> Option<Self> {
        (count.is_finite() && count > 0.0).then_some(Self(count))
    }

    pub fn get(&self) -> f64 {
        self.0
    }

    /// Edge length of one stitch cell in millimeters (`25.4 / count`).
    pub fn cell_size_mm(&self) -> f32 {
        (MM_PER_INCH as f64 / self.0) as f32
    }

    pub fn inches(&self, stitches: usize) -> f64 {
        stitches as f64 / self.0
    }

    pub fn centimeters(&self, stitches: usize) -> f64 {
        self.inches(stitches) * CM_PER_INCH
    }

    /// Display form: at most one decimal, no trailing `.0` (`14`, `14.5`).
    pub fn display(&self) -> String {
        trim_decimal(self.0)
    }
}

impl Default for FabricCount {
    fn default() -> Self {
        Self::AIDA_14
    }
}

impl<'de> Deserialize<'de> for FabricCount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        FabricCount::new(raw).ok_or_else(|| {
            serde::de::Error::custom(format!("fabric count must be positive, got {}", raw))
        })
    }
}

/// Estimated floss needed for a pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadUsage {
    pub meters: f64,
    pub skeins: u32,
}

impl ThreadUsage {
    pub fn estimate(stitch_count: usize, fabric: FabricCount) -> Self {
        let meters = stitch_count as f64 * meters_per_stitch(fabric);
        Self {
            meters,
            skeins: skeins_for_length(meters),
        }
    }
}

/// Thread per stitch scales inversely with the fabric count: finer fabric,
/// shorter stitches.
pub fn meters_per_stitch(fabric: FabricCount) -> f64 {
    METERS_PER_STITCH_AT_REFERENCE * (REFERENCE_FABRIC_COUNT / fabric.get())
}

/// Whole skeins needed for `meters` of thread. Zero length needs zero skeins.
pub fn skeins_for_length(meters: f64) -> u32 {
    if meters <= 0.0 {
        return 0;
    }
    // Absorb float noise so that exactly N skeins' worth never rounds up to N + 1.
    let skeins = meters / SKEIN_LENGTH_M;
    let nearest = skeins.round();
    if (skeins - nearest).abs() < 1e-9 {
        nearest as u32
    } else {
        skeins.ceil() as u32
    }
}

/// A width × height measurement in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width_in: f64,
    pub height_in: f64,
}

impl Dimensions {
    pub fn finished(width_stitches: usize, height_stitches: usize, fabric: FabricCount) -> Self {
        Self {
            width_in: fabric.inches(width_stitches),
            height_in: fabric.inches(height_stitches),
        }
    }

    /// Recommended piece of fabric to cut: the finished size plus
    /// [`CUT_MARGIN_IN`] on each side of both axes.
    pub fn with_cut_margin(&self) -> Self {
        Self {
            width_in: self.width_in + 2.0 * CUT_MARGIN_IN,
            height_in: self.height_in + 2.0 * CUT_MARGIN_IN,
        }
    }

    pub fn width_cm(&self) -> f64 {
        self.width_in * CM_PER_INCH
    }

    pub fn height_cm(&self) -> f64 {
        self.height_in * CM_PER_INCH
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// `"2.4 m (2.6 yd)"` for metric, `"2.6 yd (2.4 m)"` for imperial.
    pub fn format_length(&self, meters: f64) -> String {
        let metric = format!("{:.1} m", meters);
        let imperial = format!("{:.1} yd", meters * YARDS_PER_METER);
        self.primary_with_secondary(metric, imperial)
    }

    /// `"14.5 × 3.6 cm (5.7 × 1.4 in)"` with the preferred unit first.
    pub fn format_dimensions(&self, dims: &Dimensions) -> String {
        let metric = format!("{:.1} × {:.1} cm", dims.width_cm(), dims.height_cm());
        let imperial = format!("{:.1} × {:.1} in", dims.width_in, dims.height_in);
        self.primary_with_secondary(metric, imperial)
    }

    /// A short distance such as a fabric margin: `"7.6 cm (3 in)"`.
    pub fn format_inches(&self, inches: f64) -> String {
        let metric = format!("{} cm", trim_decimal(inches * CM_PER_INCH));
        let imperial = format!("{} in", trim_decimal(inches));
        self.primary_with_secondary(metric, imperial)
    }

    fn primary_with_secondary(&self, metric: String, imperial: String) -> String {
        match self {
            UnitSystem::Metric => format!("{} ({})", metric, imperial),
            UnitSystem::Imperial => format!("{} ({})", imperial, metric),
        }
    }
}

/// One decimal, dropping a trailing `.0`.
fn trim_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stitches_need_zero_skeins() {
        let usage = ThreadUsage::estimate(0, FabricCount::AIDA_14);
        assert_eq!(usage.meters, 0.0);
        assert_eq!(usage.skeins, 0);
    }

    #[test]
    fn skein_rounding_boundary() {
        assert_eq!(skeins_for_length(8.0), 1);
        assert_eq!(skeins_for_length(8.001), 2);
        assert_eq!(skeins_for_length(0.1), 1);
        assert_eq!(skeins_for_length(16.0), 2);
    }

    #[test]
    fn exact_skein_from_stitches_does_not_round_up() {
        // 18.2 count gives 0.01 m per stitch, so 800 stitches is 8 m.
        let fabric = FabricCount::new(18.2).unwrap();
        let usage = ThreadUsage::estimate(800, fabric);
        assert!((usage.meters - 8.0).abs() < 1e-9);
        assert_eq!(usage.skeins, 1);

        let usage = ThreadUsage::estimate(1040, FabricCount::AIDA_14);
        assert!((usage.meters - 13.52).abs() < 1e-9);
        assert_eq!(usage.skeins, 2);
    }

    #[test]
    fn finer_fabric_uses_less_thread_per_stitch() {
        let coarse = meters_per_stitch(FabricCount::AIDA_11);
        let reference = meters_per_stitch(FabricCount::AIDA_14);
        let fine = meters_per_stitch(FabricCount::AIDA_18);
        assert!((reference - 0.013).abs() < 1e-12);
        assert!(coarse > reference && reference > fine);
    }

    #[test]
    fn cut_size_adds_three_inches_per_side() {
        let finished = Dimensions::finished(140, 70, FabricCount::AIDA_14);
        assert!((finished.width_in - 10.0).abs() < 1e-9);
        assert!((finished.height_in - 5.0).abs() < 1e-9);
        let cut = finished.with_cut_margin();
        assert!((cut.width_in - 16.0).abs() < 1e-9);
        assert!((cut.height_in - 11.0).abs() < 1e-9);
        assert!((finished.width_cm() - 25.4).abs() < 1e-9);
    }

    #[test]
    fn cut_margin_follows_unit_preference() {
        assert_eq!(UnitSystem::Metric.format_inches(CUT_MARGIN_IN), "7.6 cm (3 in)");
        assert_eq!(UnitSystem::Imperial.format_inches(CUT_MARGIN_IN), "3 in (7.6 cm)");
    }

    #[test]
    fn unit_system_orders_primary_first() {
        let dims = Dimensions {
            width_in: 10.0,
            height_in: 5.0,
        };
        assert_eq!(
            UnitSystem::Metric.format_dimensions(&dims),
            "25.4 × 12.7 cm (10.0 × 5.0 in)"
        );
        assert_eq!(
            UnitSystem::Imperial.format_dimensions(&dims),
            "10.0 × 5.0 in (25.4 × 12.7 cm)"
        );
        assert!(UnitSystem::Imperial.format_length(1.0).starts_with("1.1 yd"));
    }

    #[test]
    fn fabric_count_display_policy() {
        assert_eq!(FabricCount::AIDA_14.display(), "14");
        assert_eq!(FabricCount::new(14.54).unwrap().display(), "14.5");
        assert_eq!(FabricCount::new(15.96).unwrap().display(), "16");
        assert!(FabricCount::new(0.0).is_none());
        assert!(FabricCount::new(f64::NAN).is_none());
    }

    #[test]
    fn cell_size_matches_fabric_count() {
        assert!((FabricCount::AIDA_14.cell_size_mm() - 1.814_285_7).abs() < 1e-5);
    }
}
