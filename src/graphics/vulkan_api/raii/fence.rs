use {
    crate::graphics::vulkan_api::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan Fence.
pub struct Fence {
    fence: vk::Fence,
    render_device: Arc<RenderDevice>,
}

impl Fence {
    /// Create a new Vulkan fence.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The fence must not be dropped while a queue submission still
    ///     references it.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        flags: vk::FenceCreateFlags,
    ) -> Result<Self, VulkanError> {
        let create_info = vk::FenceCreateInfo::default().flags(flags);
        let fence = render_device
            .device()
            .create_fence(&create_info, None)
            .map_err(VulkanError::UnableToCreateFence)?;
        Ok(Self {
            fence,
            render_device,
        })
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(self.fence, name);
    }

    /// Block until the fence is signalled.
    pub fn wait(&self) -> Result<(), VulkanError> {
        unsafe {
            self.render_device
                .device()
                .wait_for_fences(&[self.fence], true, u64::MAX)
                .map_err(VulkanError::UnableToWaitForFence)
        }
    }

    /// Return the fence to the unsignalled state.
    pub fn reset(&self) -> Result<(), VulkanError> {
        unsafe {
            self.render_device
                .device()
                .reset_fences(&[self.fence])
                .map_err(VulkanError::UnableToResetFence)
        }
    }

    /// Get the Vulkan fence handle.
    pub fn raw(&self) -> vk::Fence {
        self.fence
    }
}

impl Drop for Fence {
    fn drop(&mut self) {
        unsafe {
            self.render_device.device().destroy_fence(self.fence, None);
        }
    }
}

impl std::fmt::Debug for Fence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fence").field("fence", &self.fence).finish()
    }
}
