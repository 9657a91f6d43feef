mod acquire_present;
mod selection;

use {
    crate::{
        graphics::vulkan_api::{RenderDevice, VulkanError},
        logging::PrettyList,
    },
    ash::vk,
    indoc::indoc,
    std::sync::Arc,
};

pub use self::{acquire_present::SwapchainStatus, selection::IMAGE_FORMAT};

/// The most swapchain images the application keeps frame resources for.
pub const MAX_NUM_IMAGES: usize = 4;

/// The requested properties of a new swapchain.
#[derive(Debug, Copy, Clone)]
pub struct SwapchainParameters {
    /// The buffer size in pixels.
    pub buffer_size: (u32, u32),
    pub present_mode: vk::PresentModeKHR,
    /// Present with opaque alpha instead of premultiplied alpha.
    pub opaque: bool,
}

/// The swapchain and its images.
pub struct Swapchain {
    images: Vec<vk::Image>,
    format: vk::SurfaceFormatKHR,
    extent: vk::Extent2D,
    swapchain: vk::SwapchainKHR,
    render_device: Arc<RenderDevice>,
}

// Public API
// ----------

impl Swapchain {
    /// Create a new swapchain for the render device's window surface.
    ///
    /// Any previous swapchain must already be destroyed.
    pub fn new(
        render_device: Arc<RenderDevice>,
        parameters: SwapchainParameters,
    ) -> Result<Self, VulkanError> {
        let physical_device = render_device.physical_device();
        let surface = render_device.window_surface();
        let (capabilities, formats, present_modes) = unsafe {
            (
                surface.capabilities(physical_device)?,
                surface.formats(physical_device)?,
                surface.present_modes(physical_device)?,
            )
        };

        let format = selection::choose_surface_format(&formats)?;
        let present_mode = selection::choose_present_mode(
            parameters.present_mode,
            &present_modes,
        )?;
        let image_count = selection::choose_image_count(&capabilities)?;
        let extent =
            selection::choose_extent(&capabilities, parameters.buffer_size);
        let composite_alpha =
            selection::choose_composite_alpha(&capabilities, parameters.opaque)?;

        let queue_family_indices =
            [render_device.graphics_queue().family_index()];
        let create_info = vk::SwapchainCreateInfoKHR::default()
            .surface(surface.raw())
            .min_image_count(image_count)
            .image_format(format.format)
            .image_color_space(format.color_space)
            .image_extent(extent)
            .image_array_layers(1)
            .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT)
            .image_sharing_mode(vk::SharingMode::EXCLUSIVE)
            .queue_family_indices(&queue_family_indices)
            .pre_transform(vk::SurfaceTransformFlagsKHR::IDENTITY)
            .composite_alpha(composite_alpha)
            .present_mode(present_mode)
            .clipped(true);

        let loader = render_device.swapchain_loader();
        let swapchain = unsafe {
            loader
                .create_swapchain(&create_info, None)
                .map_err(VulkanError::UnableToCreateSwapchain)?
        };
        let images = unsafe { loader.get_swapchain_images(swapchain) }
            .map_err(VulkanError::UnableToGetSwapchainImages)
            .and_then(|images| {
                selection::check_image_count(images.len())?;
                Ok(images)
            });
        let images = match images {
            Ok(images) => images,
            Err(err) => {
                unsafe { loader.destroy_swapchain(swapchain, None) };
                return Err(err);
            }
        };

        log::info!(
            indoc!(
                "
                Created swapchain
                  extent: {}x{}
                  images: {}
                  present mode: {:?}
                  composite alpha: {:?}
                  supported present modes: {:?}
                "
            ),
            extent.width,
            extent.height,
            images.len(),
            present_mode,
            composite_alpha,
            PrettyList(&present_modes),
        );

        render_device.set_debug_name(swapchain, "swapchain");
        Ok(Self {
            images,
            format,
            extent,
            swapchain,
            render_device,
        })
    }

    /// The size of every swapchain image.
    pub fn extent(&self) -> vk::Extent2D {
        self.extent
    }

    /// The image format.
    pub fn format(&self) -> vk::Format {
        self.format.format
    }

    /// The swapchain images, indexed by the value returned from acquire.
    pub fn images(&self) -> &[vk::Image] {
        &self.images
    }

    /// The raw swapchain handle.
    pub fn raw(&self) -> vk::SwapchainKHR {
        self.swapchain
    }
}

impl Drop for Swapchain {
    /// The application must ensure that all usage of the Swapchain is complete
    /// before dropping.
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .swapchain_loader()
                .destroy_swapchain(self.swapchain, None);
        }
    }
}

impl std::fmt::Debug for Swapchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Swapchain")
            .field("swapchain", &self.swapchain)
            .field("extent", &self.extent)
            .field("image_count", &self.images.len())
            .finish()
    }
}
