use {
    crate::graphics::vulkan_api::{
        DescriptorSetLayout, RenderDevice, VulkanError,
    },
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan DescriptorPool.
///
/// Descriptor sets are freed when the pool is destroyed.
pub struct DescriptorPool {
    descriptor_pool: vk::DescriptorPool,
    render_device: Arc<RenderDevice>,
}

impl DescriptorPool {
    /// Create a new descriptor pool.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The pool must not be dropped while its sets are in use by the GPU.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        max_sets: u32,
        pool_sizes: &[vk::DescriptorPoolSize],
    ) -> Result<Self, VulkanError> {
        let create_info = vk::DescriptorPoolCreateInfo::default()
            .max_sets(max_sets)
            .pool_sizes(pool_sizes);
        let descriptor_pool = render_device
            .device()
            .create_descriptor_pool(&create_info, None)
            .map_err(VulkanError::UnableToCreateDescriptorPool)?;
        Ok(Self {
            descriptor_pool,
            render_device,
        })
    }

    /// Allocate one descriptor set for each of the given layouts.
    pub fn allocate_descriptor_sets(
        &self,
        layouts: &[&DescriptorSetLayout],
    ) -> Result<Vec<vk::DescriptorSet>, VulkanError> {
        let raw_layouts: Vec<vk::DescriptorSetLayout> =
            layouts.iter().map(|layout| layout.raw()).collect();
        let allocate_info = vk::DescriptorSetAllocateInfo::default()
            .descriptor_pool(self.descriptor_pool)
            .set_layouts(&raw_layouts);
        unsafe {
            self.render_device
                .device()
                .allocate_descriptor_sets(&allocate_info)
                .map_err(VulkanError::UnableToAllocateDescriptorSets)
        }
    }

    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(self.descriptor_pool, name);
    }

    pub fn raw(&self) -> vk::DescriptorPool {
        self.descriptor_pool
    }
}

impl Drop for DescriptorPool {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_descriptor_pool(self.descriptor_pool, None);
        }
    }
}

impl std::fmt::Debug for DescriptorPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorPool")
            .field("descriptor_pool", &self.descriptor_pool)
            .finish()
    }
}
