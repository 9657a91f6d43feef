use {
    crate::graphics::vulkan_api::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan Framebuffer.
pub struct Framebuffer {
    framebuffer: vk::Framebuffer,
    render_device: Arc<RenderDevice>,
}

impl Framebuffer {
    /// Create a new framebuffer.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The framebuffer must not be dropped while in use by the GPU.
    ///   - The attachments must outlive the framebuffer.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::FramebufferCreateInfo,
    ) -> Result<Self, VulkanError> {
        let framebuffer = render_device
            .device()
            .create_framebuffer(create_info, None)
            .map_err(VulkanError::UnableToCreateFramebuffer)?;
        Ok(Self {
            framebuffer,
            render_device,
        })
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(self.framebuffer, name);
    }

    /// Get the raw Vulkan Framebuffer handle.
    pub fn raw(&self) -> vk::Framebuffer {
        self.framebuffer
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_framebuffer(self.framebuffer, None);
        }
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("framebuffer", &self.framebuffer)
            .finish()
    }
}
