//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Tesseract language code(s), e.g. "eng" or "eng+deu"
    pub tesseract_language: String,

    /// Resolution used when rendering PDF pages for OCR (dots per inch)
    pub raster_dpi: u32,

    /// Inserted between the text of consecutive pages
    pub page_separator: String,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tesseract_language.trim().is_empty() {
            return Err("tesseract_language must not be empty".to_string());
        }
        if self.raster_dpi == 0 {
            return Err("raster_dpi must be greater than 0".to_string());
        }
        if self.raster_dpi > 1200 {
            return Err("raster_dpi cannot exceed 1200".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    /// English OCR at the PDF's default 72 DPI, pages joined by newlines
    fn default() -> Self {
        Self {
            tesseract_language: "eng".to_string(),
            raster_dpi: 72,
            page_separator: "\n".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.raster_dpi, 72);
    }

    #[test]
    fn test_invalid_dpi() {
        let mut config = ExtractorConfig::default();
        config.raster_dpi = 0;
        assert!(config.validate().is_err());
        config.raster_dpi = 5000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_language() {
        let mut config = ExtractorConfig::default();
        config.tesseract_language = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml("raster_dpi = 150").unwrap();
        assert_eq!(config.raster_dpi, 150);
        assert_eq!(config.tesseract_language, "eng");
        assert_eq!(config.page_separator, "\n");
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ExtractorConfig::default();
        config.tesseract_language = "eng+deu".to_string();
        let parsed = ExtractorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
