pub type Mat4 = nalgebra::Matrix4<f32>;

/// How often the triangle completes a turn, expressed as elapsed milliseconds
/// per degree.
pub const MILLIS_PER_DEGREE: u128 = 5;

/// The rotation angle, in degrees, for the given time since the first frame.
pub fn angle_for_elapsed_millis(elapsed_millis: u128) -> f32 {
    ((elapsed_millis / MILLIS_PER_DEGREE) % 360) as f32
}

/// Build the triangle's model rotation for an angle in degrees.
///
/// The triangle spins about the Y axis. Y is flipped because Vulkan's clip
/// space points down while the triangle's vertices are authored pointing up.
pub fn triangle_rotation(angle_degrees: f32) -> Mat4 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Mat4::new(
        cos, 0.0, -sin, 0.0, //
        0.0, -1.0, 0.0, 0.0, //
        sin, 0.0, cos, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotate a matrix in the XY plane, applied after the existing transform.
pub fn rotate_xy(matrix: &Mat4, cos: f32, sin: f32) -> Mat4 {
    let rotation = Mat4::new(
        cos, -sin, 0.0, 0.0, //
        sin, cos, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );
    rotation * matrix
}

/// Compensate for an output rotated by a number of clockwise quarter turns.
///
/// # Params
///
/// * `quarter_turns` - 0 for normal, 1 for 90 degrees, 2 for 180 degrees and
///   3 for 270 degrees. Values wrap around.
pub fn compensate_quarter_turns(matrix: &Mat4, quarter_turns: u32) -> Mat4 {
    match quarter_turns % 4 {
        1 => rotate_xy(matrix, 0.0, 1.0),
        2 => rotate_xy(matrix, -1.0, 0.0),
        3 => rotate_xy(matrix, 0.0, -1.0),
        _ => *matrix,
    }
}

#[cfg(test)]
mod test {
    use {super::*, nalgebra::Vector4};

    fn assert_close(actual: &Mat4, expected: &Mat4) {
        let diff = (actual - expected).abs().max();
        assert!(diff < 1e-6, "{} != {}", actual, expected);
    }

    #[test]
    fn angle_advances_one_degree_every_five_millis() {
        assert_eq!(angle_for_elapsed_millis(0), 0.0);
        assert_eq!(angle_for_elapsed_millis(4), 0.0);
        assert_eq!(angle_for_elapsed_millis(5), 1.0);
        assert_eq!(angle_for_elapsed_millis(5 * 359), 359.0);
        assert_eq!(angle_for_elapsed_millis(5 * 360), 0.0);
    }

    #[test]
    fn zero_rotation_only_flips_y() {
        let expected = Mat4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, -1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        assert_close(&triangle_rotation(0.0), &expected);
    }

    #[test]
    fn rotation_spins_about_the_y_axis() {
        let rotated = triangle_rotation(90.0) * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((rotated - Vector4::new(0.0, 0.0, 1.0, 1.0)).norm() < 1e-6);

        let up = triangle_rotation(37.0) * Vector4::new(0.0, 0.5, 0.0, 1.0);
        assert!((up - Vector4::new(0.0, -0.5, 0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn column_major_layout_matches_the_shader() {
        let m = triangle_rotation(30.0);
        let (sin, cos) = 30f32.to_radians().sin_cos();
        let slice = m.as_slice();
        assert!((slice[0] - cos).abs() < 1e-6);
        assert!((slice[2] - sin).abs() < 1e-6);
        assert!((slice[8] + sin).abs() < 1e-6);
        assert!((slice[10] - cos).abs() < 1e-6);
        assert_eq!(slice[5], -1.0);
    }

    #[test]
    fn quarter_turns_rotate_the_xy_plane() {
        let point = Vector4::new(1.0, 0.0, 0.0, 1.0);
        let identity = Mat4::identity();

        let quarter = compensate_quarter_turns(&identity, 1) * point;
        assert!((quarter - Vector4::new(0.0, 1.0, 0.0, 1.0)).norm() < 1e-6);

        let half = compensate_quarter_turns(&identity, 2) * point;
        assert!((half - Vector4::new(-1.0, 0.0, 0.0, 1.0)).norm() < 1e-6);

        let three = compensate_quarter_turns(&identity, 3) * point;
        assert!((three - Vector4::new(0.0, -1.0, 0.0, 1.0)).norm() < 1e-6);

        assert_close(&compensate_quarter_turns(&identity, 4), &identity);
    }
}
