use {
    crate::graphics::vulkan_api::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan ImageView.
pub struct ImageView {
    image_view: vk::ImageView,
    render_device: Arc<RenderDevice>,
}

impl ImageView {
    /// Create a 2D color view of a swapchain image.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the view must be dropped before the swapchain which owns the image
    pub unsafe fn for_swapchain_image(
        render_device: Arc<RenderDevice>,
        image: vk::Image,
        format: vk::Format,
    ) -> Result<Self, VulkanError> {
        let create_info = vk::ImageViewCreateInfo::default()
            .image(image)
            .view_type(vk::ImageViewType::TYPE_2D)
            .format(format)
            .components(vk::ComponentMapping::default())
            .subresource_range(vk::ImageSubresourceRange {
                aspect_mask: vk::ImageAspectFlags::COLOR,
                base_mip_level: 0,
                level_count: 1,
                base_array_layer: 0,
                layer_count: 1,
            });
        let image_view = render_device
            .device()
            .create_image_view(&create_info, None)
            .map_err(VulkanError::UnableToCreateImageView)?;
        Ok(Self {
            image_view,
            render_device,
        })
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(self.image_view, name);
    }

    /// Get the raw Vulkan ImageView handle.
    pub fn raw(&self) -> vk::ImageView {
        self.image_view
    }
}

impl Drop for ImageView {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_image_view(self.image_view, None);
        }
    }
}

impl std::fmt::Debug for ImageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageView")
            .field("image_view", &self.image_view)
            .finish()
    }
}
