//! Contour-difference reconstruction for external contours.
//!
//! An `AK` block describes the boundary that remains after cutting. This
//! module compares that boundary with the face's uncut reference rectangle
//! and emits rectangular cut regions explaining the difference: trims at the
//! start and end of the profile, and notches around an end extension.
//!
//! The thresholds below were calibrated against sample files rather than
//! taken from the format standard. In particular the dedicated nine-point
//! path matches the point count produced by exporters for an end tab.

use super::classify::{is_axis_aligned_rectangle, RECTANGLE_POINTS};
use super::cut::CutRegion;
use super::types::{BoundingBox, Point, ReferenceRect};
use crate::lexer::Face;

/// Contours with fewer points produce no geometry.
pub const MIN_CONTOUR_POINTS: usize = 3;
/// Point count that triggers the dedicated extension decoder.
pub const DENSE_CONTOUR_POINTS: usize = 9;
/// Slack when comparing contour edges against reference edges.
pub const EDGE_TOLERANCE: f64 = 1.0;
/// Depth assigned to external cuts; assumed to traverse the material.
pub const EXTERNAL_CUT_DEPTH: f64 = 50.0;
/// Fraction of the length at either end where a cut counts as transverse.
pub const TRANSVERSE_ZONE: f64 = 0.2;
/// Minimum X-span, relative to the length, of a baseline shape.
pub const BASELINE_SPAN_RATIO: f64 = 0.95;

/// Derives the cut regions explaining the difference between `points` and
/// the reference rectangle.
///
/// Fewer than three points yield no cuts; so does a contour matching the
/// reference exactly.
pub fn reconstruct_cuts(
    face: Option<Face>,
    points: &[Point],
    reference: &ReferenceRect,
) -> Vec<CutRegion> {
    if points.len() < MIN_CONTOUR_POINTS {
        return Vec::new();
    }

    if points.len() == DENSE_CONTOUR_POINTS {
        let notches = extension_cuts(points, reference);
        if !notches.is_empty() {
            tracing::debug!(regions = notches.len(), "dense contour decoded as end extension");
            return into_regions(face, &notches, reference);
        }
    }

    let bounds = BoundingBox::from_points(points);
    let mut rects = Vec::new();

    if bounds.min_x > reference.min_x + EDGE_TOLERANCE {
        rects.push(BoundingBox {
            min_x: reference.min_x,
            max_x: bounds.min_x,
            min_y: reference.min_y,
            max_y: reference.max_y,
        });
    }

    if bounds.max_x < reference.max_x - EDGE_TOLERANCE {
        rects.push(BoundingBox {
            min_x: bounds.max_x,
            max_x: reference.max_x,
            min_y: reference.min_y,
            max_y: reference.max_y,
        });
    }

    if points.len() > RECTANGLE_POINTS
        && points.len() != DENSE_CONTOUR_POINTS
        && !is_axis_aligned_rectangle(points)
    {
        rects.extend(extension_cuts(points, reference));
    }

    into_regions(face, &rects, reference)
}

/// Decodes notches above and below an extension at the far end of the
/// contour.
///
/// The two highest distinct rounded X values are the transition and the
/// extension; points beyond the transition give the extension's Y-range.
/// Notches span the rounded values, not the actual coordinates.
pub fn extension_cuts(points: &[Point], reference: &ReferenceRect) -> Vec<BoundingBox> {
    let clusters = rounded_xs(points);
    let [.., transition, extension] = clusters.as_slice() else {
        return Vec::new();
    };
    let (transition, extension) = (*transition, *extension);

    let bounds = BoundingBox::from_points(points);
    if clusters.len() == 2 && bounds.width() >= BASELINE_SPAN_RATIO * reference.length() {
        return Vec::new();
    }

    let mut ext_bounds = BoundingBox::new();
    let mut ext_count = 0;
    for p in points.iter().filter(|p| p.x > transition + EDGE_TOLERANCE) {
        ext_bounds.update(p.x, p.y);
        ext_count += 1;
    }
    if ext_count < 2 {
        return Vec::new();
    }

    let mut rects = Vec::new();
    if ext_bounds.min_y > reference.min_y + EDGE_TOLERANCE {
        rects.push(BoundingBox {
            min_x: transition,
            max_x: extension,
            min_y: reference.min_y,
            max_y: ext_bounds.min_y,
        });
    }
    if ext_bounds.max_y < reference.max_y - EDGE_TOLERANCE {
        rects.push(BoundingBox {
            min_x: transition,
            max_x: extension,
            min_y: ext_bounds.max_y,
            max_y: reference.max_y,
        });
    }
    rects
}

/// Whether `rect` lies within the outer [`TRANSVERSE_ZONE`] of the length.
pub fn is_transverse(rect: &BoundingBox, reference: &ReferenceRect) -> bool {
    let zone = TRANSVERSE_ZONE * reference.length();
    rect.max_x <= reference.min_x + zone || rect.min_x >= reference.max_x - zone
}

/// Distinct rounded X values in ascending order.
fn rounded_xs(points: &[Point]) -> Vec<f64> {
    let mut xs: Vec<f64> = points.iter().map(|p| p.x.round()).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup_by(|a, b| (*a - *b).abs() < f64::EPSILON);
    xs
}

fn into_regions(
    face: Option<Face>,
    rects: &[BoundingBox],
    reference: &ReferenceRect,
) -> Vec<CutRegion> {
    rects
        .iter()
        .map(|rect| {
            CutRegion::rectangle(
                face,
                rect,
                EXTERNAL_CUT_DEPTH,
                is_transverse(rect, reference),
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    // Thresholds in these tests are calibrated values, not format rules.

    #[test]
    fn ut_rec_001_reference_rectangle_yields_no_cuts() {
        let reference = ReferenceRect::new(2000.0, 150.0);
        let points = pts(&[
            (0.0, 0.0),
            (2000.0, 0.0),
            (2000.0, 150.0),
            (0.0, 150.0),
            (0.0, 0.0),
        ]);
        assert!(reconstruct_cuts(Some(Face::Web), &points, &reference).is_empty());
    }

    #[test]
    fn ut_rec_002_start_and_end_trims() {
        let reference = ReferenceRect::new(2259.98, 150.0);
        let points = pts(&[
            (25.72, 0.0),
            (2177.64, 0.0),
            (2177.64, 150.0),
            (25.72, 150.0),
            (25.72, 0.0),
        ]);
        let cuts = reconstruct_cuts(Some(Face::Web), &points, &reference);
        assert_eq!(cuts.len(), 2);

        let start = cuts[0].bounds();
        assert_abs_diff_eq!(start.min_x, 0.0);
        assert_abs_diff_eq!(start.max_x, 25.72);
        assert_abs_diff_eq!(start.min_y, 0.0);
        assert_abs_diff_eq!(start.max_y, 150.0);

        let end = cuts[1].bounds();
        assert_abs_diff_eq!(end.min_x, 2177.64);
        assert_abs_diff_eq!(end.max_x, 2259.98);
        assert_abs_diff_eq!(end.max_y, 150.0);

        for cut in &cuts {
            assert!(cut.is_transverse);
            assert!(!cut.is_internal);
            assert_abs_diff_eq!(cut.depth, EXTERNAL_CUT_DEPTH);
            assert_eq!(cut.contour.len(), 5);
            assert_eq!(cut.face, Some(Face::Web));
        }
    }

    #[test]
    fn ut_rec_003_dense_contour_with_two_clusters_emits_two_notches() {
        let reference = ReferenceRect::new(2000.0, 150.0);
        let points = pts(&[
            (0.0, 40.0),
            (1500.0, 40.0),
            (1500.0, 60.0),
            (1500.0, 80.0),
            (1500.0, 110.0),
            (0.0, 110.0),
            (0.0, 80.0),
            (0.0, 60.0),
            (0.0, 40.0),
        ]);
        let cuts = reconstruct_cuts(Some(Face::Web), &points, &reference);
        assert_eq!(cuts.len(), 2, "no start/end trims may follow: {cuts:?}");

        let top = cuts[0].bounds();
        assert_abs_diff_eq!(top.min_x, 0.0);
        assert_abs_diff_eq!(top.max_x, 1500.0);
        assert_abs_diff_eq!(top.min_y, 0.0);
        assert_abs_diff_eq!(top.max_y, 40.0);

        let bottom = cuts[1].bounds();
        assert_abs_diff_eq!(bottom.min_y, 110.0);
        assert_abs_diff_eq!(bottom.max_y, 150.0);
    }

    #[test]
    fn ut_rec_004_end_tab_notches_are_transverse() {
        let reference = ReferenceRect::new(2000.0, 150.0);
        let points = pts(&[
            (0.0, 0.0),
            (1900.0, 0.0),
            (1900.0, 50.0),
            (2000.0, 50.0),
            (2000.0, 100.0),
            (1900.0, 100.0),
            (1900.0, 150.0),
            (0.0, 150.0),
            (0.0, 0.0),
        ]);
        let cuts = reconstruct_cuts(Some(Face::Top), &points, &reference);
        assert_eq!(cuts.len(), 2);
        assert!(cuts.iter().all(|c| c.is_transverse));
        assert_abs_diff_eq!(cuts[0].bounds().min_x, 1900.0);
        assert_abs_diff_eq!(cuts[0].bounds().max_y, 50.0);
        assert_abs_diff_eq!(cuts[1].bounds().min_y, 100.0);
    }

    #[test]
    fn ut_rec_005_general_extension_combines_with_start_trim() {
        let reference = ReferenceRect::new(2000.0, 150.0);
        let points = pts(&[
            (100.0, 0.0),
            (1900.0, 0.0),
            (1900.0, 30.0),
            (2000.0, 30.0),
            (2000.0, 150.0),
            (100.0, 150.0),
            (100.0, 0.0),
        ]);
        let cuts = reconstruct_cuts(None, &points, &reference);
        assert_eq!(cuts.len(), 2);
        let start = cuts[0].bounds();
        assert_abs_diff_eq!(start.max_x, 100.0);
        let notch = cuts[1].bounds();
        assert_abs_diff_eq!(notch.min_x, 1900.0);
        assert_abs_diff_eq!(notch.max_x, 2000.0);
        assert_abs_diff_eq!(notch.max_y, 30.0);
    }

    #[test]
    fn ut_rec_006_interior_trim_is_not_transverse() {
        let reference = ReferenceRect::new(1000.0, 100.0);
        let rect = BoundingBox {
            min_x: 400.0,
            max_x: 600.0,
            min_y: 0.0,
            max_y: 100.0,
        };
        assert!(!is_transverse(&rect, &reference));
        let near_start = BoundingBox {
            min_x: 0.0,
            max_x: 200.0,
            ..rect
        };
        assert!(is_transverse(&near_start, &reference));
    }

    #[test]
    fn ut_rec_007_notches_span_rounded_cluster_values() {
        let reference = ReferenceRect::new(600.0, 200.0);
        let points = pts(&[
            (0.0, 0.0),
            (500.4, 0.0),
            (500.4, 50.0),
            (599.6, 50.0),
            (599.6, 150.0),
            (500.4, 150.0),
            (500.4, 200.0),
            (0.0, 200.0),
            (0.0, 0.0),
        ]);
        let cuts = reconstruct_cuts(Some(Face::Web), &points, &reference);
        assert_eq!(cuts.len(), 2);
        for cut in &cuts {
            let bounds = cut.bounds();
            assert_abs_diff_eq!(bounds.min_x, 500.0);
            assert_abs_diff_eq!(bounds.max_x, 600.0);
        }
        assert_abs_diff_eq!(cuts[0].bounds().max_y, 50.0);
        assert_abs_diff_eq!(cuts[1].bounds().min_y, 150.0);
    }

    #[test]
    fn rounded_xs_are_sorted_and_distinct() {
        let points = pts(&[(3.2, 0.0), (0.4, 0.0), (2.8, 1.0), (0.0, 1.0), (10.0, 0.0)]);
        assert_eq!(rounded_xs(&points), vec![0.0, 3.0, 10.0]);
    }

    #[test]
    fn bc_rec_001_fewer_than_three_points_yield_nothing() {
        let reference = ReferenceRect::new(2000.0, 150.0);
        assert!(reconstruct_cuts(None, &[], &reference).is_empty());
        let two = pts(&[(100.0, 0.0), (200.0, 150.0)]);
        assert!(reconstruct_cuts(None, &two, &reference).is_empty());
    }

    #[test]
    fn bc_rec_002_baseline_shape_yields_no_extension_cuts() {
        let reference = ReferenceRect::new(2000.0, 150.0);
        let points = pts(&[
            (0.0, 20.0),
            (1960.0, 20.0),
            (1960.0, 60.0),
            (1960.0, 120.0),
            (0.0, 120.0),
            (0.0, 60.0),
            (0.0, 20.0),
        ]);
        assert!(extension_cuts(&points, &reference).is_empty());
        let cuts = reconstruct_cuts(None, &points, &reference);
        assert_eq!(cuts.len(), 1, "only the end trim remains");
        assert_abs_diff_eq!(cuts[0].bounds().min_x, 1960.0);
    }

    #[test]
    fn bc_rec_003_dense_contour_without_notches_falls_back_to_trims() {
        let reference = ReferenceRect::new(2000.0, 150.0);
        let points = pts(&[
            (50.0, 0.0),
            (500.0, 0.0),
            (1000.0, 0.0),
            (2000.0, 0.0),
            (2000.0, 150.0),
            (1000.0, 150.0),
            (500.0, 150.0),
            (50.0, 150.0),
            (50.0, 0.0),
        ]);
        let cuts = reconstruct_cuts(None, &points, &reference);
        assert_eq!(cuts.len(), 1);
        assert_abs_diff_eq!(cuts[0].bounds().max_x, 50.0);
    }
}
