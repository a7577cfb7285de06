use pagelens_core::analysis::{Analyzer, Section, SectionResult, clamp_score};
use pagelens_core::snapshot::{ImageSample, ImageSnapshot};
use url::Url;

/// How an image's encoding is treated for scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatClass {
    /// webp or avif
    Modern,
    /// Accepted but not modern: jpg, jpeg, png
    Legacy,
    /// svg; accepted and scale-independent
    Vector,
    /// Recognised format outside the accepted set
    NonOptimized,
    /// No recognisable extension or media type
    Unknown,
}

const NON_OPTIMIZED_EXTENSIONS: &[&str] = &["gif", "bmp", "tif", "tiff", "ico", "heic", "heif"];

impl FormatClass {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "webp" | "avif" => FormatClass::Modern,
            "jpg" | "jpeg" | "png" => FormatClass::Legacy,
            "svg" => FormatClass::Vector,
            other if NON_OPTIMIZED_EXTENSIONS.contains(&other) => FormatClass::NonOptimized,
            _ => FormatClass::Unknown,
        }
    }

    /// Classify an image source from its URL path or `data:` media type
    pub fn classify(src: &str) -> Self {
        let src = src.trim();
        if let Some(rest) = src.strip_prefix("data:") {
            let media_type = rest.split([';', ',']).next().unwrap_or_default();
            return match media_type.parse::<mime::Mime>() {
                Ok(m) if m.type_() == mime::IMAGE => {
                    let subtype = m.subtype().as_str();
                    let ext = subtype.strip_suffix("+xml").unwrap_or(subtype);
                    Self::from_extension(ext)
                }
                _ => FormatClass::Unknown,
            };
        }

        let path = match Url::parse(src) {
            Ok(url) => url.path().to_string(),
            // Relative sources: drop query and fragment by hand
            Err(_) => src.split(['?', '#']).next().unwrap_or_default().to_string(),
        };

        let file = path.rsplit('/').next().unwrap_or_default();
        match file.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Self::from_extension(ext),
            _ => FormatClass::Unknown,
        }
    }
}

fn is_missing_alt(image: &ImageSample) -> bool {
    image.alt.as_deref().is_none_or(|alt| alt.trim().is_empty())
}

fn is_oversized(image: &ImageSample) -> bool {
    image.rendered_width > 0.0
        && image.rendered_height > 0.0
        && (image.natural_width > image.rendered_width
            || image.natural_height > image.rendered_height)
}

pub struct ImageAnalyzer;

impl Analyzer for ImageAnalyzer {
    type Input = ImageSnapshot;

    fn section(&self) -> Section {
        Section::Images
    }

    fn analyze(&self, snapshot: &ImageSnapshot) -> SectionResult {
        let images = &snapshot.images;
        let missing_alt = images.iter().filter(|i| is_missing_alt(i)).count();
        let oversized = images.iter().filter(|i| is_oversized(i)).count();

        // Tally format classes; vector and unknown sources are left out
        let mut modern = 0usize;
        let mut legacy = 0usize;
        let mut non_optimized = 0usize;
        for image in images {
            match FormatClass::classify(&image.src) {
                FormatClass::Modern => modern += 1,
                FormatClass::Legacy => legacy += 1,
                FormatClass::NonOptimized => non_optimized += 1,
                FormatClass::Vector | FormatClass::Unknown => {}
            }
        }

        let score = clamp_score(100 - 5 * missing_alt as i64 - 10 * non_optimized as i64);
        let mut result = SectionResult::new(score);

        result.metric("totalImages", images.len());
        result.metric("missingAlt", missing_alt);
        result.metric("nonOptimizedImages", non_optimized);
        result.metric("legacyFormatImages", legacy);
        result.metric("modernFormatImages", modern);
        result.metric("oversizedImages", oversized);

        if missing_alt > 0 {
            result.issue(format!(
                "{} of {} images are missing alt text",
                missing_alt,
                images.len()
            ));
            result.recommend("Add descriptive alt text to every meaningful image");
        }

        if non_optimized > 0 {
            result.issue(format!(
                "{} images use outdated formats such as GIF or BMP",
                non_optimized
            ));
            result.recommend("Convert GIF and BMP images to WebP or AVIF formats");
        }

        if legacy >= 3 {
            result.issue(format!(
                "{} JPEG/PNG images could be served as WebP or AVIF",
                legacy
            ));
        }

        if oversized > 0 {
            result.issue(format!(
                "{} images are larger than their rendered size",
                oversized
            ));
            result.recommend("Resize oversized images and serve responsive srcset variants");
        }

        tracing::debug!(
            "Image analysis: {} images, {} missing alt, {} non-optimized",
            images.len(),
            missing_alt,
            non_optimized
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn image(src: &str, alt: Option<&str>) -> ImageSample {
        ImageSample {
            src: src.to_string(),
            alt: alt.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_extensions() {
        assert_eq!(
            FormatClass::classify("https://cdn.example.com/hero.webp?w=800"),
            FormatClass::Modern
        );
        assert_eq!(FormatClass::classify("/img/team.JPG"), FormatClass::Legacy);
        assert_eq!(FormatClass::classify("logo.svg#icon"), FormatClass::Vector);
        assert_eq!(FormatClass::classify("/spinner.gif"), FormatClass::NonOptimized);
        assert_eq!(
            FormatClass::classify("https://example.com/image"),
            FormatClass::Unknown
        );
        assert_eq!(FormatClass::classify("/.hidden"), FormatClass::Unknown);
    }

    #[test]
    fn test_classify_data_uris() {
        assert_eq!(
            FormatClass::classify("data:image/png;base64,iVBORw0KGgo="),
            FormatClass::Legacy
        );
        assert_eq!(
            FormatClass::classify("data:image/svg+xml;utf8,<svg></svg>"),
            FormatClass::Vector
        );
        assert_eq!(
            FormatClass::classify("data:image/gif;base64,R0lGOD"),
            FormatClass::NonOptimized
        );
        assert_eq!(
            FormatClass::classify("data:text/plain,hello"),
            FormatClass::Unknown
        );
    }

    #[test]
    fn test_missing_alt_and_gif_score() {
        let snapshot = ImageSnapshot {
            images: vec![
                image("/a.jpg", None),
                image("/b.png", Some("   ")),
                image("/c.webp", Some("")),
                image("/d.gif", Some("Animated demo")),
            ],
        };
        let result = ImageAnalyzer.analyze(&snapshot);
        assert_eq!(result.score, 75);
        assert_eq!(result.metrics["missingAlt"], json!(3));
        assert_eq!(result.metrics["nonOptimizedImages"], json!(1));
        assert_eq!(result.metrics["legacyFormatImages"], json!(2));
        assert_eq!(result.metrics["modernFormatImages"], json!(1));
    }

    #[test]
    fn test_oversized_requires_rendered_size() {
        let mut big = image("/hero.webp", Some("Hero"));
        big.natural_width = 4000.0;
        big.natural_height = 2000.0;
        big.rendered_width = 1200.0;
        big.rendered_height = 600.0;

        let mut hidden = big.clone();
        hidden.rendered_width = 0.0;

        let result = ImageAnalyzer.analyze(&ImageSnapshot {
            images: vec![big, hidden],
        });
        assert_eq!(result.metrics["oversizedImages"], json!(1));
        assert_eq!(result.score, 100);
        assert!(result.issues[0].contains("larger than"));
    }

    #[test]
    fn test_no_images() {
        let result = ImageAnalyzer.analyze(&ImageSnapshot::default());
        assert_eq!(result.score, 100);
        assert_eq!(result.metrics["totalImages"], json!(0));
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_score_floors_at_zero() {
        let images = (0..25).map(|i| image(&format!("/{}.gif", i), None)).collect();
        let result = ImageAnalyzer.analyze(&ImageSnapshot { images });
        assert_eq!(result.score, 0);
    }
}
