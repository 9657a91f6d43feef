//! Pure functions which pick swapchain parameters from the surface's
//! capabilities.

use {
    super::MAX_NUM_IMAGES, crate::graphics::vulkan_api::VulkanError, ash::vk,
};

/// The only image format the renderer draws with.
pub const IMAGE_FORMAT: vk::SurfaceFormatKHR = vk::SurfaceFormatKHR {
    format: vk::Format::B8G8R8A8_UNORM,
    color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
};

/// Require the renderer's image format.
pub fn choose_surface_format(
    formats: &[vk::SurfaceFormatKHR],
) -> Result<vk::SurfaceFormatKHR, VulkanError> {
    formats
        .iter()
        .copied()
        .find(|format| {
            format.format == IMAGE_FORMAT.format
                && format.color_space == IMAGE_FORMAT.color_space
        })
        .ok_or(VulkanError::SurfaceFormatUnsupported(IMAGE_FORMAT.format))
}

/// Require that the surface supports the requested present mode.
pub fn choose_present_mode(
    requested: vk::PresentModeKHR,
    supported: &[vk::PresentModeKHR],
) -> Result<vk::PresentModeKHR, VulkanError> {
    if supported.contains(&requested) {
        Ok(requested)
    } else {
        Err(VulkanError::PresentModeUnsupported {
            requested,
            supported: supported.to_vec(),
        })
    }
}

/// Ask for double buffering unless the surface needs more images.
pub fn choose_image_count(
    capabilities: &vk::SurfaceCapabilitiesKHR,
) -> Result<u32, VulkanError> {
    let mut image_count = capabilities.min_image_count.max(2);
    if capabilities.max_image_count > 0 {
        image_count = image_count.min(capabilities.max_image_count);
    }
    check_image_count(image_count as usize)?;
    Ok(image_count)
}

/// Every swapchain image needs its own frame resources, of which there are
/// at most MAX_NUM_IMAGES.
pub fn check_image_count(count: usize) -> Result<(), VulkanError> {
    if count > MAX_NUM_IMAGES {
        Err(VulkanError::TooManySwapchainImages {
            count,
            max: MAX_NUM_IMAGES,
        })
    } else {
        Ok(())
    }
}

/// Pick the swapchain extent.
///
/// Wayland surfaces report a current extent of u32::MAX because the
/// swapchain decides the surface size. In that case the buffer size is used,
/// clamped to what the surface allows.
pub fn choose_extent(
    capabilities: &vk::SurfaceCapabilitiesKHR,
    buffer_size: (u32, u32),
) -> vk::Extent2D {
    if capabilities.current_extent.width != u32::MAX {
        return capabilities.current_extent;
    }
    let (width, height) = buffer_size;
    let min = capabilities.min_image_extent;
    let max = capabilities.max_image_extent;
    vk::Extent2D {
        width: width.clamp(min.width, max.width.max(min.width)),
        height: height.clamp(min.height, max.height.max(min.height)),
    }
}

/// Opaque surfaces ignore the alpha channel, otherwise the clear color's
/// alpha is premultiplied.
pub fn choose_composite_alpha(
    capabilities: &vk::SurfaceCapabilitiesKHR,
    opaque: bool,
) -> Result<vk::CompositeAlphaFlagsKHR, VulkanError> {
    let composite_alpha = if opaque {
        vk::CompositeAlphaFlagsKHR::OPAQUE
    } else {
        vk::CompositeAlphaFlagsKHR::PRE_MULTIPLIED
    };
    if capabilities
        .supported_composite_alpha
        .contains(composite_alpha)
    {
        Ok(composite_alpha)
    } else {
        Err(VulkanError::CompositeAlphaUnsupported(composite_alpha))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn capabilities(min: u32, max: u32) -> vk::SurfaceCapabilitiesKHR {
        vk::SurfaceCapabilitiesKHR {
            min_image_count: min,
            max_image_count: max,
            current_extent: vk::Extent2D {
                width: u32::MAX,
                height: u32::MAX,
            },
            min_image_extent: vk::Extent2D {
                width: 1,
                height: 1,
            },
            max_image_extent: vk::Extent2D {
                width: 4096,
                height: 4096,
            },
            supported_composite_alpha: vk::CompositeAlphaFlagsKHR::OPAQUE,
            ..Default::default()
        }
    }

    #[test]
    fn image_count_is_at_least_two() {
        assert_eq!(choose_image_count(&capabilities(1, 0)).unwrap(), 2);
        assert_eq!(choose_image_count(&capabilities(3, 8)).unwrap(), 3);
    }

    #[test]
    fn image_count_is_clamped_to_max() {
        assert_eq!(choose_image_count(&capabilities(1, 1)).unwrap(), 1);
    }

    #[test]
    fn too_many_images_is_an_error() {
        let result = choose_image_count(&capabilities(5, 0));
        assert!(matches!(
            result,
            Err(VulkanError::TooManySwapchainImages { count: 5, max: 4 })
        ));
    }

    #[test]
    fn extent_uses_buffer_size_when_undefined() {
        let extent = choose_extent(&capabilities(2, 0), (640, 480));
        assert_eq!((extent.width, extent.height), (640, 480));
    }

    #[test]
    fn extent_is_clamped() {
        let extent = choose_extent(&capabilities(2, 0), (0, 10_000));
        assert_eq!((extent.width, extent.height), (1, 4096));
    }

    #[test]
    fn extent_follows_current_extent_when_defined() {
        let mut caps = capabilities(2, 0);
        caps.current_extent = vk::Extent2D {
            width: 100,
            height: 200,
        };
        let extent = choose_extent(&caps, (640, 480));
        assert_eq!((extent.width, extent.height), (100, 200));
    }

    #[test]
    fn composite_alpha_must_be_supported() {
        let caps = capabilities(2, 0);
        assert_eq!(
            choose_composite_alpha(&caps, true).unwrap(),
            vk::CompositeAlphaFlagsKHR::OPAQUE
        );
        assert!(matches!(
            choose_composite_alpha(&caps, false),
            Err(VulkanError::CompositeAlphaUnsupported(_))
        ));
    }

    #[test]
    fn format_must_be_bgra_unorm() {
        let srgb = vk::SurfaceFormatKHR {
            format: vk::Format::B8G8R8A8_SRGB,
            color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
        };
        assert!(choose_surface_format(&[srgb]).is_err());
        let chosen = choose_surface_format(&[srgb, IMAGE_FORMAT]).unwrap();
        assert_eq!(chosen.format, vk::Format::B8G8R8A8_UNORM);
        assert_eq!(chosen.color_space, vk::ColorSpaceKHR::SRGB_NONLINEAR);
    }

    #[test]
    fn present_mode_must_be_supported() {
        let supported = [vk::PresentModeKHR::FIFO, vk::PresentModeKHR::MAILBOX];
        assert_eq!(
            choose_present_mode(vk::PresentModeKHR::MAILBOX, &supported)
                .unwrap(),
            vk::PresentModeKHR::MAILBOX
        );
        match choose_present_mode(vk::PresentModeKHR::IMMEDIATE, &supported) {
            Err(VulkanError::PresentModeUnsupported { supported: modes, .. }) => {
                assert_eq!(modes, supported.to_vec())
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
