use {
    crate::graphics::vulkan_api::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan RenderPass.
pub struct RenderPass {
    render_pass: vk::RenderPass,
    render_device: Arc<RenderDevice>,
}

impl RenderPass {
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The render pass must outlive every pipeline and framebuffer created
    ///     with it.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::RenderPassCreateInfo,
    ) -> Result<Self, VulkanError> {
        let render_pass = render_device
            .device()
            .create_render_pass(create_info, None)
            .map_err(VulkanError::UnableToCreateRenderPass)?;
        Ok(Self {
            render_pass,
            render_device,
        })
    }

    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(self.render_pass, name);
    }

    pub fn raw(&self) -> vk::RenderPass {
        self.render_pass
    }
}

impl Drop for RenderPass {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_render_pass(self.render_pass, None);
        }
    }
}

impl std::fmt::Debug for RenderPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPass")
            .field("render_pass", &self.render_pass)
            .finish()
    }
}
