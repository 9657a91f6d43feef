use {
    crate::graphics::vulkan_api::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan CommandPool.
///
/// Command buffers allocated from the pool are freed along with it.
pub struct CommandPool {
    command_pool: vk::CommandPool,
    primary_command_buffers: Vec<vk::CommandBuffer>,
    render_device: Arc<RenderDevice>,
}

impl CommandPool {
    /// Create a new command pool for the graphics queue family.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The pool must not be dropped while any of its command buffers are
    ///     pending execution.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        flags: vk::CommandPoolCreateFlags,
    ) -> Result<Self, VulkanError> {
        let create_info = vk::CommandPoolCreateInfo::default()
            .flags(flags)
            .queue_family_index(render_device.graphics_queue().family_index());
        let command_pool = render_device
            .device()
            .create_command_pool(&create_info, None)
            .map_err(VulkanError::UnableToCreateCommandPool)?;
        Ok(Self {
            command_pool,
            primary_command_buffers: vec![],
            render_device,
        })
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        let name = name.into();
        for (index, &command_buffer) in
            self.primary_command_buffers.iter().enumerate()
        {
            self.render_device.set_debug_name(
                command_buffer,
                format!("{} command buffer {}", name, index),
            );
        }
        self.render_device.set_debug_name(self.command_pool, name);
    }

    /// Allocate primary command buffers from this pool.
    ///
    /// # Returns
    ///
    /// Returns the index of the first newly allocated command buffer.
    pub fn allocate_primary_command_buffers(
        &mut self,
        count: u32,
    ) -> Result<usize, VulkanError> {
        let allocate_info = vk::CommandBufferAllocateInfo::default()
            .command_pool(self.command_pool)
            .level(vk::CommandBufferLevel::PRIMARY)
            .command_buffer_count(count);
        let new_buffers = unsafe {
            self.render_device
                .device()
                .allocate_command_buffers(&allocate_info)
                .map_err(VulkanError::UnableToAllocateCommandBuffers)?
        };
        let first = self.primary_command_buffers.len();
        self.primary_command_buffers.extend(new_buffers);
        Ok(first)
    }

    /// Get the n'th primary command buffer allocated by this pool.
    pub fn primary_command_buffer(&self, index: usize) -> vk::CommandBuffer {
        self.primary_command_buffers[index]
    }

    /// Reset every command buffer allocated from this pool.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - none of the pool's command buffers may be pending execution
    pub unsafe fn reset(&self) -> Result<(), VulkanError> {
        self.render_device
            .device()
            .reset_command_pool(
                self.command_pool,
                vk::CommandPoolResetFlags::empty(),
            )
            .map_err(VulkanError::UnableToResetCommandBuffer)
    }
}

impl Drop for CommandPool {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_command_pool(self.command_pool, None);
        }
    }
}

impl std::fmt::Debug for CommandPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPool")
            .field("command_pool", &self.command_pool)
            .field("primary_command_buffers", &self.primary_command_buffers)
            .finish()
    }
}
