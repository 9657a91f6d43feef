use {
    crate::graphics::vulkan_api::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan ShaderModule.
pub struct ShaderModule {
    shader_module: vk::ShaderModule,
    render_device: Arc<RenderDevice>,
}

impl ShaderModule {
    /// Create a shader module from SPIR-V bytes.
    ///
    /// The bytes are copied into correctly aligned words first, so they can
    /// come straight from `include_bytes!`.
    pub fn from_spirv_bytes(
        render_device: Arc<RenderDevice>,
        bytes: &[u8],
    ) -> Result<Self, VulkanError> {
        let words = ash::util::read_spv(&mut std::io::Cursor::new(bytes))
            .map_err(VulkanError::InvalidShaderBytes)?;
        let create_info = vk::ShaderModuleCreateInfo::default().code(&words);
        let shader_module = unsafe {
            render_device
                .device()
                .create_shader_module(&create_info, None)
                .map_err(VulkanError::UnableToCreateShaderModule)?
        };
        Ok(Self {
            shader_module,
            render_device,
        })
    }

    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(self.shader_module, name);
    }

    pub fn raw(&self) -> vk::ShaderModule {
        self.shader_module
    }
}

impl Drop for ShaderModule {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_shader_module(self.shader_module, None);
        }
    }
}

impl std::fmt::Debug for ShaderModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderModule")
            .field("shader_module", &self.shader_module)
            .finish()
    }
}
