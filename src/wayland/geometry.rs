//! Pure computation of the buffer size, scale and viewport destination for
//! the window surface.

use wayland_client::protocol::wl_output::Transform;

/// A width and height in either surface-local or buffer coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Geometry {
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are positive.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    fn transposed(self) -> Self {
        Self::new(self.height, self.width)
    }

    fn scaled(self, scale: i32) -> Self {
        Self::new(self.width * scale, self.height * scale)
    }

    fn scaled_up(self, scale: f64) -> Self {
        Self::new(
            (self.width as f64 * scale).ceil() as i32,
            (self.height as f64 * scale).ceil() as i32,
        )
    }

    fn square(self) -> Self {
        let side = self.width.min(self.height);
        Self::new(side, side)
    }
}

/// Everything the window needs to tell the compositor about its buffers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BufferGeometry {
    /// The size of the swapchain images in pixels.
    pub size: Geometry,

    /// The integer buffer scale for `wl_surface.set_buffer_scale`.
    pub scale: i32,

    /// The destination size for the viewport. Only present when rendering
    /// at a fractional scale.
    pub viewport_destination: Option<Geometry>,
}

/// True when the transform swaps the buffer's width and height.
pub fn is_transposed(transform: Transform) -> bool {
    matches!(
        transform,
        Transform::_90
            | Transform::_270
            | Transform::Flipped90
            | Transform::Flipped270
    )
}

/// The number of quarter turns that rendering must compensate for when the
/// buffer is presented with the given transform.
pub fn quarter_turns(transform: Transform) -> u32 {
    match transform {
        Transform::_90 | Transform::Flipped90 => 1,
        Transform::_180 | Transform::Flipped180 => 2,
        Transform::_270 | Transform::Flipped270 => 3,
        _ => 0,
    }
}

/// Compute the buffer geometry for a window.
///
/// # Params
///
/// * `logical_size` - the window size in surface-local coordinates
/// * `transform` - the buffer transform reported for the window's outputs
/// * `output_scale` - the largest integer scale of the entered outputs
/// * `fractional_scale` - the preferred fractional scale, if the compositor
///   supports fractional scaling and has sent one
/// * `fixed_ratio` - true when a fullscreen window should render a square
pub fn compute_buffer_geometry(
    logical_size: Geometry,
    transform: Transform,
    output_scale: i32,
    fractional_scale: Option<f64>,
    fixed_ratio: bool,
) -> BufferGeometry {
    let oriented = if is_transposed(transform) {
        logical_size.transposed()
    } else {
        logical_size
    };

    let (mut size, scale) = match fractional_scale {
        Some(fraction) => (oriented.scaled_up(fraction), 1),
        None => {
            let scale = output_scale.max(1);
            (oriented.scaled(scale), scale)
        }
    };

    let mut destination = logical_size;
    if fixed_ratio {
        size = size.square();
        destination = destination.square();
    }

    BufferGeometry {
        size,
        scale,
        viewport_destination: fractional_scale.map(|_| destination),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const LOGICAL: Geometry = Geometry::new(400, 300);

    #[test]
    fn normal_transform_keeps_the_logical_size() {
        let geometry =
            compute_buffer_geometry(LOGICAL, Transform::Normal, 1, None, false);
        assert_eq!(
            geometry,
            BufferGeometry {
                size: LOGICAL,
                scale: 1,
                viewport_destination: None,
            }
        );
    }

    #[test]
    fn quarter_turn_transforms_swap_width_and_height() {
        for transform in [
            Transform::_90,
            Transform::_270,
            Transform::Flipped90,
            Transform::Flipped270,
        ] {
            let geometry =
                compute_buffer_geometry(LOGICAL, transform, 1, None, false);
            assert_eq!(geometry.size, Geometry::new(300, 400));
        }
        for transform in
            [Transform::_180, Transform::Flipped, Transform::Flipped180]
        {
            let geometry =
                compute_buffer_geometry(LOGICAL, transform, 1, None, false);
            assert_eq!(geometry.size, LOGICAL);
        }
    }

    #[test]
    fn integer_scale_multiplies_the_buffer() {
        let geometry =
            compute_buffer_geometry(LOGICAL, Transform::_90, 2, None, false);
        assert_eq!(geometry.size, Geometry::new(600, 800));
        assert_eq!(geometry.scale, 2);
        assert_eq!(geometry.viewport_destination, None);
    }

    #[test]
    fn invalid_output_scales_are_treated_as_one() {
        let geometry =
            compute_buffer_geometry(LOGICAL, Transform::Normal, 0, None, false);
        assert_eq!(geometry.size, LOGICAL);
        assert_eq!(geometry.scale, 1);
    }

    #[test]
    fn fractional_scale_rounds_up_and_uses_the_viewport() {
        let geometry = compute_buffer_geometry(
            Geometry::new(251, 250),
            Transform::Normal,
            3,
            Some(1.5),
            false,
        );
        assert_eq!(geometry.size, Geometry::new(377, 375));
        assert_eq!(geometry.scale, 1);
        assert_eq!(
            geometry.viewport_destination,
            Some(Geometry::new(251, 250))
        );
    }

    #[test]
    fn fractional_viewport_uses_untransformed_logical_size() {
        let geometry = compute_buffer_geometry(
            LOGICAL,
            Transform::_270,
            1,
            Some(1.25),
            false,
        );
        assert_eq!(geometry.size, Geometry::new(375, 500));
        assert_eq!(geometry.viewport_destination, Some(LOGICAL));
    }

    #[test]
    fn fixed_ratio_renders_a_square() {
        let geometry =
            compute_buffer_geometry(LOGICAL, Transform::Normal, 2, None, true);
        assert_eq!(geometry.size, Geometry::new(600, 600));

        let fractional = compute_buffer_geometry(
            LOGICAL,
            Transform::Normal,
            1,
            Some(2.0),
            true,
        );
        assert_eq!(fractional.size, Geometry::new(600, 600));
        assert_eq!(
            fractional.viewport_destination,
            Some(Geometry::new(300, 300))
        );
    }

    #[test]
    fn quarter_turns_follow_the_rotation() {
        assert_eq!(quarter_turns(Transform::Normal), 0);
        assert_eq!(quarter_turns(Transform::Flipped), 0);
        assert_eq!(quarter_turns(Transform::_90), 1);
        assert_eq!(quarter_turns(Transform::Flipped180), 2);
        assert_eq!(quarter_turns(Transform::_270), 3);
    }
}
