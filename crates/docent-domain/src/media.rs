//! Media kind module - which extraction strategy a declared media type selects

/// Extraction strategy selected by a declared media type
///
/// - Pdf: native text layer first, rasterize-and-OCR fallback
/// - Image: OCR only (no text layer to try)
/// - Unsupported: nothing extractable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// `application/pdf`
    Pdf,

    /// `image/jpeg`, `image/png`, `image/tiff`
    Image,

    /// Any other declared type
    Unsupported,
}

/// Media types accepted at upload
pub const ACCEPTED_MEDIA_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/tiff",
];

impl MediaKind {
    /// Classify a declared media type
    ///
    /// Matching ignores case and any parameters (`; charset=...`).
    pub fn from_media_type(media_type: &str) -> Self {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" => MediaKind::Pdf,
            "image/jpeg" | "image/png" | "image/tiff" => MediaKind::Image,
            _ => MediaKind::Unsupported,
        }
    }

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Pdf => "pdf",
            MediaKind::Image => "image",
            MediaKind::Unsupported => "unsupported",
        }
    }

    /// Whether extraction can produce anything for this kind
    pub fn is_supported(&self) -> bool {
        !matches!(self, MediaKind::Unsupported)
    }
}

/// Whether a declared media type is in the accepted upload set
pub fn is_accepted_media_type(media_type: &str) -> bool {
    MediaKind::from_media_type(media_type).is_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(MediaKind::from_media_type("application/pdf"), MediaKind::Pdf);
        assert_eq!(MediaKind::from_media_type("image/jpeg"), MediaKind::Image);
        assert_eq!(MediaKind::from_media_type("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_media_type("image/tiff"), MediaKind::Image);
        assert_eq!(MediaKind::from_media_type("image/gif"), MediaKind::Unsupported);
        assert_eq!(MediaKind::from_media_type("text/plain"), MediaKind::Unsupported);
        assert_eq!(MediaKind::from_media_type(""), MediaKind::Unsupported);
    }

    #[test]
    fn test_classification_ignores_case_and_parameters() {
        assert_eq!(MediaKind::from_media_type("Application/PDF"), MediaKind::Pdf);
        assert_eq!(
            MediaKind::from_media_type("image/png; charset=binary"),
            MediaKind::Image
        );
    }

    #[test]
    fn test_accepted_set_matches_kinds() {
        for media_type in ACCEPTED_MEDIA_TYPES {
            assert!(is_accepted_media_type(media_type));
        }
        assert!(!is_accepted_media_type("application/msword"));
    }
}
