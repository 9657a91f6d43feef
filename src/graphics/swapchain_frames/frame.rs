use {
    crate::graphics::{
        vulkan_api::{
            CommandPool, Fence, ImageView, RenderDevice, Semaphore,
            SemaphorePool, Swapchain, VulkanError,
        },
        GraphicsError,
    },
    ash::vk,
    std::sync::Arc,
};

/// All of the per-image resources required to record, submit and present
/// one swapchain image.
pub struct Frame {
    // The swapchain image index this frame corresponds to.
    swapchain_image_index: usize,

    // Owns the frame's single primary command buffer.
    command_pool: CommandPool,

    // Signalled when the swapchain image is ready for rendering.
    acquire_semaphore: Option<Semaphore>,

    // Signalled when all graphics operations are complete and the frame is
    // ready to present.
    release_semaphore: Semaphore,

    // Signalled when all submitted graphics commands have completed for this
    // frame. Created signalled so the first acquire does not block.
    queue_submit_fence: Fence,

    swapchain_image_view: ImageView,

    render_device: Arc<RenderDevice>,
}

// Public API
// ----------

impl Frame {
    /// Get the index for the swapchain image that this frame corresponds to.
    /// This is always in the range `0..swapchain_image_count`.
    pub fn swapchain_image_index(&self) -> usize {
        self.swapchain_image_index
    }

    /// Get the frame's command buffer.
    ///
    /// The command buffer is ready for commands when the Frame is returned
    /// by acquire_swapchain_frame. Commands are submitted when present_frame
    /// is called.
    pub fn command_buffer(&self) -> vk::CommandBuffer {
        self.command_pool.primary_command_buffer(0)
    }
}

// Private API
// -----------

impl Frame {
    pub(super) fn new(
        render_device: &Arc<RenderDevice>,
        semaphore_pool: &mut SemaphorePool,
        swapchain_image_index: usize,
        swapchain: &Swapchain,
    ) -> Result<Self, VulkanError> {
        let release_semaphore = semaphore_pool.get_semaphore()?;
        let queue_submit_fence = unsafe {
            Fence::new(render_device.clone(), vk::FenceCreateFlags::SIGNALED)?
        };
        let mut command_pool = unsafe {
            CommandPool::new(
                render_device.clone(),
                vk::CommandPoolCreateFlags::TRANSIENT,
            )?
        };
        command_pool.allocate_primary_command_buffers(1)?;
        let swapchain_image_view = unsafe {
            ImageView::for_swapchain_image(
                render_device.clone(),
                swapchain.images()[swapchain_image_index],
                swapchain.format(),
            )?
        };
        let frame = Self {
            swapchain_image_index,
            command_pool,
            acquire_semaphore: None,
            release_semaphore,
            queue_submit_fence,
            swapchain_image_view,
            render_device: render_device.clone(),
        };
        frame.set_debug_name(format!("Frame {}", swapchain_image_index));
        Ok(frame)
    }

    /// The view of this frame's swapchain image.
    pub(super) fn swapchain_image_view(&self) -> &ImageView {
        &self.swapchain_image_view
    }

    /// Wait for all pending graphics commands for this frame to complete.
    pub(super) fn wait_for_graphics_commands_to_complete(
        &self,
    ) -> Result<(), VulkanError> {
        self.queue_submit_fence.wait()
    }

    /// Replace the Frame's acquire semaphore with the given semaphore. The
    /// old value is returned.
    pub(super) fn replace_acquire_semaphore(
        &mut self,
        acquire_semaphore: Semaphore,
    ) -> Option<Semaphore> {
        acquire_semaphore.set_debug_name(format!(
            "Frame {} acquire semaphore",
            self.swapchain_image_index
        ));
        self.acquire_semaphore.replace(acquire_semaphore)
    }

    /// Reset the frame command buffer and prepare for the current frame's
    /// commands.
    pub(super) fn reset_frame_commands(&mut self) -> Result<(), VulkanError> {
        self.wait_for_graphics_commands_to_complete()?;
        self.queue_submit_fence.reset()?;

        // Safe because the queue submission fence is waited before resetting.
        unsafe {
            self.command_pool.reset()?;
            let begin_info = vk::CommandBufferBeginInfo::default()
                .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);
            self.render_device
                .device()
                .begin_command_buffer(self.command_buffer(), &begin_info)
                .map_err(VulkanError::UnableToBeginCommandBuffer)
        }
    }

    /// End the command buffer and submit to the graphics queue.
    ///
    /// The submission waits for the acquire semaphore before writing color
    /// attachments, then signals the release semaphore and the frame's fence.
    pub(super) fn submit_frame_commands(&mut self) -> Result<(), GraphicsError> {
        let acquire_semaphore = self
            .acquire_semaphore
            .as_ref()
            .ok_or(GraphicsError::FrameNotAcquired(self.swapchain_image_index))?;
        let device = self.render_device.device();
        let wait_semaphores = [acquire_semaphore.raw()];
        let wait_stages = [vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT];
        let command_buffers = [self.command_buffer()];
        let signal_semaphores = [self.release_semaphore.raw()];
        let submit_info = vk::SubmitInfo::default()
            .wait_semaphores(&wait_semaphores)
            .wait_dst_stage_mask(&wait_stages)
            .command_buffers(&command_buffers)
            .signal_semaphores(&signal_semaphores);
        unsafe {
            device
                .end_command_buffer(self.command_buffer())
                .map_err(VulkanError::UnableToEndCommandBuffer)?;
            device
                .queue_submit(
                    self.render_device.graphics_queue().raw(),
                    &[submit_info],
                    self.queue_submit_fence.raw(),
                )
                .map_err(VulkanError::UnableToSubmitCommands)?;
        }
        Ok(())
    }

    /// Borrow the release semaphore which is signalled by the completion of
    /// this frame's graphics commands.
    pub(super) fn release_semaphore(&self) -> &Semaphore {
        &self.release_semaphore
    }

    fn set_debug_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.command_pool.set_debug_name(format!("{} command pool", name));
        self.release_semaphore
            .set_debug_name(format!("{} release semaphore", name));
        self.queue_submit_fence
            .set_debug_name(format!("{} queue submit fence", name));
        self.swapchain_image_view
            .set_debug_name(format!("{} swapchain image view", name));
    }
}
