//! Region heuristics for portfolio images.
//!
//! This is a placeholder for a real object detector: regions are guessed
//! from image dimensions alone and pixel content is never looked at.

use crate::models::portfolio::{BoundingBox, DetectedRegion};

pub const LOGO_LABEL: &str = "Logo";
pub const CERTIFICATE_LABEL: &str = "Certificate";
pub const DOCUMENT_LABEL: &str = "Document";

const LOGO_MIN_SIDE: f64 = 200.0;
const LOGO_SCORE: f64 = 0.75;
const CERTIFICATE_MIN_WIDTH: f64 = 400.0;
const CERTIFICATE_MIN_HEIGHT: f64 = 300.0;
const CERTIFICATE_SCORE: f64 = 0.80;
const DOCUMENT_SCORE: f64 = 0.70;

#[derive(Debug, Clone, Copy, Default)]
pub struct RegionHeuristicDetector;

impl RegionHeuristicDetector {
    /// Always returns at least one region: when no rule fires, a fixed
    /// 100×100 "Document" box at the origin.
    pub fn detect(&self, width: f64, height: f64) -> Vec<DetectedRegion> {
        let mut regions = Vec::new();

        // logos usually sit near the top-left corner
        if width > LOGO_MIN_SIDE && height > LOGO_MIN_SIDE {
            regions.push(DetectedRegion {
                label: LOGO_LABEL.to_string(),
                score: LOGO_SCORE,
                bounding_box: BoundingBox {
                    x: (width * 0.1).min(50.0),
                    y: (height * 0.1).min(50.0),
                    width: (width * 0.15).min(100.0),
                    height: (height * 0.15).min(100.0),
                },
            });
        }

        if width > CERTIFICATE_MIN_WIDTH && height > CERTIFICATE_MIN_HEIGHT {
            regions.push(DetectedRegion {
                label: CERTIFICATE_LABEL.to_string(),
                score: CERTIFICATE_SCORE,
                bounding_box: BoundingBox {
                    x: width * 0.2,
                    y: height * 0.2,
                    width: width * 0.6,
                    height: height * 0.5,
                },
            });
        }

        if regions.is_empty() {
            regions.push(fallback_region(DOCUMENT_LABEL, DOCUMENT_SCORE));
        }

        regions
    }
}

/// A fixed 100×100 box at the origin with the given label and score.
pub fn fallback_region(label: &str, score: f64) -> DetectedRegion {
    DetectedRegion {
        label: label.to_string(),
        score,
        bounding_box: BoundingBox {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(regions: &[DetectedRegion]) -> Vec<&str> {
        regions.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn test_small_image_falls_back_to_document() {
        let regions = RegionHeuristicDetector.detect(50.0, 50.0);
        assert_eq!(labels(&regions), vec![DOCUMENT_LABEL]);
        assert_eq!(regions[0].score, 0.70);
        assert_eq!(
            regions[0].bounding_box,
            BoundingBox {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 100.0,
            }
        );
    }

    #[test]
    fn test_large_image_has_logo_and_certificate() {
        let regions = RegionHeuristicDetector.detect(500.0, 400.0);
        assert_eq!(labels(&regions), vec![LOGO_LABEL, CERTIFICATE_LABEL]);

        let cert = &regions[1];
        assert_eq!(cert.score, 0.80);
        let b = cert.bounding_box;
        assert!((b.x - 100.0).abs() < 1e-9);
        assert!((b.y - 80.0).abs() < 1e-9);
        assert!((b.width - 300.0).abs() < 1e-9);
        assert!((b.height - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_logo_box_is_capped() {
        let regions = RegionHeuristicDetector.detect(2000.0, 1500.0);
        let logo = &regions[0];
        assert_eq!(logo.label, LOGO_LABEL);
        assert_eq!(logo.score, 0.75);
        assert_eq!(
            logo.bounding_box,
            BoundingBox {
                x: 50.0,
                y: 50.0,
                width: 100.0,
                height: 100.0,
            }
        );
    }

    #[test]
    fn test_logo_box_scales_below_cap() {
        let regions = RegionHeuristicDetector.detect(300.0, 250.0);
        assert_eq!(labels(&regions), vec![LOGO_LABEL]);
        let b = regions[0].bounding_box;
        assert!((b.x - 30.0).abs() < 1e-9);
        assert!((b.y - 25.0).abs() < 1e-9);
        assert!((b.width - 45.0).abs() < 1e-9);
        assert!((b.height - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(labels(&RegionHeuristicDetector.detect(200.0, 200.0)), vec![DOCUMENT_LABEL]);
        assert_eq!(labels(&RegionHeuristicDetector.detect(400.0, 301.0)), vec![LOGO_LABEL]);
    }
}
