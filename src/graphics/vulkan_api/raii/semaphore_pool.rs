use {
    crate::graphics::vulkan_api::{RenderDevice, Semaphore, VulkanError},
    std::sync::Arc,
};

/// A collection of binary semaphores which are available for re-use.
///
/// Swapchain images are acquired before the application knows which frame
/// they belong to, so acquire semaphores come from here and are swapped into
/// the frame once the image index is known.
pub struct SemaphorePool {
    recycled_semaphores: Vec<Semaphore>,
    render_device: Arc<RenderDevice>,
}

impl SemaphorePool {
    pub fn new(render_device: Arc<RenderDevice>) -> Self {
        Self {
            recycled_semaphores: vec![],
            render_device,
        }
    }

    /// Get a semaphore from the pool, or create a new one if none are
    /// available.
    pub fn get_semaphore(&mut self) -> Result<Semaphore, VulkanError> {
        match self.recycled_semaphores.pop() {
            Some(recycled) => Ok(recycled),
            None => unsafe { Semaphore::new(self.render_device.clone()) },
        }
    }

    /// Return a semaphore to the pool for future use.
    ///
    /// The semaphore must be unsignalled with no pending operations.
    pub fn return_semaphore(&mut self, semaphore: Semaphore) {
        self.recycled_semaphores.push(semaphore);
    }
}
