//! Property-based tests for texture geometry and font bounds

use proptest::prelude::*;

use crate::texture::{HostTexture, TexelRegion, FLOATS_PER_TEXEL};
use crate::traits::TextureSurface;
use crate::types::FontBounds;

proptest! {
    /// A region write changes texels inside the region and nothing else
    #[test]
    fn prop_write_region_touches_only_the_region(
        (w, h, x, y, rw, rh) in (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
            (Just(w), Just(h), 0..w, 0..h)
        }).prop_flat_map(|(w, h, x, y)| {
            (Just(w), Just(h), Just(x), Just(y), 1..=w - x, 1..=h - y)
        })
    ) {
        let mut tex = HostTexture::new(w, h);
        let region = TexelRegion::new(x, y, rw, rh);
        let data = vec![1.0; region.float_len()];
        prop_assert!(tex.write_region(region, &data).is_ok());

        for v in 0..h {
            for u in 0..w {
                let inside = u >= x && u < x + rw && v >= y && v < y + rh;
                let expected = if inside { [1.0; FLOATS_PER_TEXEL] } else { [0.0; FLOATS_PER_TEXEL] };
                prop_assert_eq!(tex.texel(u, v), Some(expected));
            }
        }
    }

    /// Regions reaching past the edge are refused
    #[test]
    fn prop_region_past_edge_is_rejected(w in 1u32..32, h in 1u32..32, over in 1u32..8) {
        let mut tex = HostTexture::new(w, h);
        let region = TexelRegion::new(0, 0, w + over, 1);
        let data = vec![0.0; region.float_len()];
        prop_assert!(tex.write_region(region, &data).is_err());
        prop_assert_eq!(tex.upload_count(), 0);
    }

    /// The radius covers the farthest extent on each axis
    #[test]
    fn prop_bounding_radius_covers_extents(
        x_min in -2000i16..0, x_max in 0i16..2000,
        y_min in -2000i16..0, y_max in 0i16..2000,
    ) {
        let bounds = FontBounds { x_min, y_min, x_max, y_max };
        let r = bounds.bounding_radius();
        let max_x = (x_min as f32).abs().max(x_max as f32);
        let max_y = (y_min as f32).abs().max(y_max as f32);
        prop_assert!(r >= max_x && r >= max_y);
    }
}
