//! `AK` block decoder: boundary trims and notches.

use super::contour;
use crate::geometry::{reconstruct_cuts, CutRegion, ProfileContext, ReferenceRect};
use crate::lexer::Token;

/// Decodes an `AK` block into the cut regions that turn the face's
/// reference rectangle into the described boundary.
pub fn decode(tokens: &[Token], profile: &ProfileContext) -> Vec<CutRegion> {
    let contour = contour::collect(tokens);
    let reference = ReferenceRect::for_face(contour.face, profile);
    let cuts = reconstruct_cuts(contour.face, &contour.points(), &reference);
    tracing::debug!(
        face = ?contour.face,
        points = contour.vertices.len(),
        cuts = cuts.len(),
        "external contour decoded"
    );
    cuts
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::lexer::{tokenize, Face};

    const TRIMMED_WEB: &str = "AK
  v     25.72u     0.00     0.00
      2177.64     0.00     0.00
      2177.64   150.00     0.00
        25.72   150.00     0.00
        25.72     0.00     0.00
EN
";

    #[test]
    fn ut_ak_001_trimmed_web_contour() {
        let profile = ProfileContext {
            length: 2259.98,
            width: 300.0,
            height: 150.0,
        };
        let cuts = decode(&tokenize(TRIMMED_WEB), &profile);
        assert_eq!(cuts.len(), 2);
        assert!(cuts.iter().all(|c| c.is_transverse && c.face == Some(Face::Web)));
        assert_abs_diff_eq!(cuts[0].bounds().max_x, 25.72);
        assert_abs_diff_eq!(cuts[1].bounds().min_x, 2177.64);
        assert_abs_diff_eq!(cuts[1].bounds().max_y, 150.0);
    }

    #[test]
    fn ut_ak_002_flange_face_uses_profile_width() {
        let text = "AK\n  o 0 0 0\n  1500 0 0\n  1500 200 0\n  0 200 0\n  0 0 0\n";
        let profile = ProfileContext {
            length: 2000.0,
            width: 200.0,
            height: 400.0,
        };
        let cuts = decode(&tokenize(text), &profile);
        assert_eq!(cuts.len(), 1);
        assert_abs_diff_eq!(cuts[0].bounds().min_x, 1500.0);
        assert_abs_diff_eq!(cuts[0].bounds().max_y, 200.0);
        assert!(!cuts[0].is_transverse, "500 mm trim reaches past the end zone");
    }

    #[test]
    fn ut_ak_003_default_profile_reference_rectangle_is_uncut() {
        let text = "AK\n  v 0 0\n  2000 0\n  2000 150\n  0 150\n  0 0\n";
        assert!(decode(&tokenize(text), &ProfileContext::default()).is_empty());
    }

    #[test]
    fn bc_ak_001_missing_contour_yields_nothing() {
        assert!(decode(&tokenize("AK\nEN\n"), &ProfileContext::default()).is_empty());
    }
}
