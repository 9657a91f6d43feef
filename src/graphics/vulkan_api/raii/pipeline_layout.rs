use {
    crate::graphics::vulkan_api::{
        DescriptorSetLayout, RenderDevice, VulkanError,
    },
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan PipelineLayout.
pub struct PipelineLayout {
    pipeline_layout: vk::PipelineLayout,
    render_device: Arc<RenderDevice>,
}

impl PipelineLayout {
    /// Create a pipeline layout with no push constants.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The layout must outlive every pipeline created with it.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        set_layouts: &[&DescriptorSetLayout],
    ) -> Result<Self, VulkanError> {
        let raw_layouts: Vec<vk::DescriptorSetLayout> =
            set_layouts.iter().map(|layout| layout.raw()).collect();
        let create_info =
            vk::PipelineLayoutCreateInfo::default().set_layouts(&raw_layouts);
        let pipeline_layout = render_device
            .device()
            .create_pipeline_layout(&create_info, None)
            .map_err(VulkanError::UnableToCreatePipelineLayout)?;
        Ok(Self {
            pipeline_layout,
            render_device,
        })
    }

    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(self.pipeline_layout, name);
    }

    pub fn raw(&self) -> vk::PipelineLayout {
        self.pipeline_layout
    }
}

impl Drop for PipelineLayout {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_pipeline_layout(self.pipeline_layout, None);
        }
    }
}

impl std::fmt::Debug for PipelineLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineLayout")
            .field("pipeline_layout", &self.pipeline_layout)
            .finish()
    }
}
