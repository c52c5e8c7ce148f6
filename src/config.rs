use crate::error::PatternError;
use crate::generator::PatternGenerator;
use chrono::NaiveDate;
use crosspatch_render_lopdf::{Branding, PdfProfile};
use crosspatch_types::{Localizer, Margins, Orientation, PageFormat, PageGeometry, Translator, UnitSystem};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Reads the user's preferred measurement system at build time.
pub type UnitPreference = Arc<dyn Fn() -> UnitSystem + Send + Sync>;

/// Page margins used unless configured otherwise.
pub fn default_margins() -> Margins {
    Margins::symmetric(10.0, 17.5)
}

/// Immutable settings shared by every build of a [`PatternGenerator`].
#[derive(Clone)]
pub struct GeneratorConfig {
    pub page_format: PageFormat,
    pub margins: Margins,
    pub branding: Branding,
    pub profile: PdfProfile,
    pub unit_preference: UnitPreference,
    pub localizer: Localizer,
    /// Fixed `YYYY-MM-DD` render date; today's local date when `None`.
    pub fixed_date: Option<String>,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("page_format", &self.page_format)
            .field("margins", &self.margins)
            .field("branding", &self.branding)
            .field("profile", &self.profile)
            .field("localizer", &self.localizer)
            .field("fixed_date", &self.fixed_date)
            .finish_non_exhaustive()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            page_format: PageFormat::A4,
            margins: default_margins(),
            branding: Branding::default(),
            profile: PdfProfile::Standard,
            unit_preference: Arc::new(|| UnitSystem::Metric),
            localizer: Localizer::untranslated(),
            fixed_date: None,
        }
    }
}

impl GeneratorConfig {
    /// The render date in `YYYY-MM-DD` form.
    pub fn render_date(&self) -> String {
        match &self.fixed_date {
            Some(date) => date.clone(),
            None => chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    pub fn units(&self) -> UnitSystem {
        (self.unit_preference)()
    }
}

/// A builder for creating a [`PatternGenerator`].
#[derive(Default)]
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Paper size. Orientation is chosen per request.
    pub fn with_page_format(mut self, format: PageFormat) -> Self {
        self.config.page_format = format;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.config.margins = margins;
        self
    }

    pub fn with_branding(mut self, branding: Branding) -> Self {
        self.config.branding = branding;
        self
    }

    /// Selects the output conformance profile. `PdfX3` disables transparency,
    /// so preview watermarks use their opaque fallback.
    pub fn with_profile(mut self, profile: PdfProfile) -> Self {
        self.config.profile = profile;
        self
    }

    /// Installs the function consulted for metric/imperial display on every build.
    pub fn with_unit_preference<F>(mut self, preference: F) -> Self
    where
        F: Fn() -> UnitSystem + Send + Sync + 'static,
    {
        self.config.unit_preference = Arc::new(preference);
        self
    }

    pub fn with_units(self, units: UnitSystem) -> Self {
        self.with_unit_preference(move || units)
    }

    pub fn with_translator(mut self, translator: Option<Arc<dyn Translator>>) -> Self {
        self.config.localizer = Localizer::new(translator);
        self
    }

    /// Loads a flat `{"key": "text"}` translation catalog.
    pub fn with_translation_catalog(self, json: &str) -> Result<Self, PatternError> {
        let catalog: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| PatternError::Config(format!("Invalid translation catalog: {}", e)))?;
        log::info!("Loaded {} translations.", catalog.len());
        Ok(self.with_translator(Some(Arc::new(catalog))))
    }

    pub fn with_translation_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            PatternError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read translations from '{}': {}", path.display(), e),
            ))
        })?;
        self.with_translation_catalog(&json)
    }

    /// Pins the footer date, making output reproducible.
    pub fn with_fixed_date(mut self, date: impl Into<String>) -> Self {
        self.config.fixed_date = Some(date.into());
        self
    }

    /// Validates the configuration and creates the generator.
    pub fn build(self) -> Result<PatternGenerator, PatternError> {
        let config = self.config;

        let m = config.margins;
        if [m.top, m.right, m.bottom, m.left]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(PatternError::Config(format!(
                "Margins must be finite and non-negative, got {:?}",
                m
            )));
        }
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            let usable = PageGeometry::new(config.page_format, orientation, m).usable_size();
            if !(usable.width > 0.0 && usable.height > 0.0) {
                return Err(PatternError::Config(format!(
                    "Page {:?} leaves no printable area with margins {:?}",
                    config.page_format, m
                )));
            }
        }
        if let Some(date) = &config.fixed_date {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                PatternError::Config(format!("Fixed date '{}' is not YYYY-MM-DD: {}", date, e))
            })?;
        }

        log::info!(
            "Pattern generator ready: {:?} pages, {:?} profile.",
            config.page_format,
            config.profile
        );
        Ok(PatternGenerator::new(config))
    }
}
