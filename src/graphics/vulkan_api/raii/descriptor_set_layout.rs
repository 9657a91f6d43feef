use {
    crate::graphics::vulkan_api::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan DescriptorSetLayout.
pub struct DescriptorSetLayout {
    layout: vk::DescriptorSetLayout,
    render_device: Arc<RenderDevice>,
}

impl DescriptorSetLayout {
    /// Create a layout with the given bindings.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The layout must outlive the pipeline layouts which reference it.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        bindings: &[vk::DescriptorSetLayoutBinding],
    ) -> Result<Self, VulkanError> {
        let create_info =
            vk::DescriptorSetLayoutCreateInfo::default().bindings(bindings);
        let layout = render_device
            .device()
            .create_descriptor_set_layout(&create_info, None)
            .map_err(VulkanError::UnableToCreateDescriptorSetLayout)?;
        Ok(Self {
            layout,
            render_device,
        })
    }

    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(self.layout, name);
    }

    pub fn raw(&self) -> vk::DescriptorSetLayout {
        self.layout
    }
}

impl Drop for DescriptorSetLayout {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_descriptor_set_layout(self.layout, None);
        }
    }
}

impl std::fmt::Debug for DescriptorSetLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorSetLayout")
            .field("layout", &self.layout)
            .finish()
    }
}
