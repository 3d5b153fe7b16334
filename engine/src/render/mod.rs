mod draw_list;
mod text;
mod wgpu_backend;

pub use draw_list::{DrawList, ShapeVertex, TextSection};
pub use wgpu_backend::{Frame, Renderer};

/// Color in sRGB space from 8-bit channels, fully opaque.
pub fn rgb8(rgb: [u8; 3]) -> [f32; 4] {
    [
        f32::from(rgb[0]) / 255.0,
        f32::from(rgb[1]) / 255.0,
        f32::from(rgb[2]) / 255.0,
        1.0,
    ]
}

/// Convert an sRGB color to linear space. Alpha is left untouched.
pub fn srgb_to_linear(color: [f32; 4]) -> [f32; 4] {
    fn channel(c: f32) -> f32 {
        if c <= 0.040_45 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    [channel(color[0]), channel(color[1]), channel(color[2]), color[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_scales_channels() {
        assert_eq!(rgb8([0, 255, 0]), [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn linear_conversion_keeps_extremes_and_darkens_midtones() {
        assert_eq!(srgb_to_linear([0.0, 1.0, 0.0, 0.5]), [0.0, 1.0, 0.0, 0.5]);
        let mid = srgb_to_linear(rgb8([128, 128, 128]))[0];
        assert!(mid > 0.2 && mid < 0.23, "got {mid}");
    }
}
