use {
    crate::graphics::vulkan_api::{Instance, VulkanError},
    ash::{khr, vk},
    std::ffi::c_void,
};

/// The Vulkan surface for the application's Wayland surface and the loader
/// which provides access to the KHR surface queries.
pub struct WindowSurface {
    surface: vk::SurfaceKHR,
    surface_loader: khr::surface::Instance,
}

// Public API
// ----------

impl WindowSurface {
    /// Create a Vulkan surface for a Wayland surface.
    ///
    /// # Params
    ///
    /// * `instance` - the Vulkan instance with the wayland surface extension
    /// * `display` - the raw `wl_display` pointer for the connection
    /// * `surface` - the raw `wl_surface` pointer for the window
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - both pointers must remain valid until the surface is destroyed
    ///   - the surface must be destroyed before the instance
    pub unsafe fn new(
        instance: &Instance,
        display: *mut c_void,
        surface: *mut c_void,
    ) -> Result<Self, VulkanError> {
        let create_info = vk::WaylandSurfaceCreateInfoKHR {
            display,
            surface,
            ..Default::default()
        };
        let surface = instance
            .wayland_surface_loader()
            .create_wayland_surface(&create_info, None)
            .map_err(VulkanError::UnableToCreateSurface)?;
        Ok(Self {
            surface,
            surface_loader: instance.surface_loader().clone(),
        })
    }

    /// The raw surface handle.
    pub fn raw(&self) -> vk::SurfaceKHR {
        self.surface
    }

    /// Check that a queue family on the physical device can present to this
    /// surface.
    ///
    /// # Safety
    ///
    /// Unsafe because the queue family index is assumed to be valid for the
    /// physical device.
    pub unsafe fn supports_queue_family(
        &self,
        physical_device: vk::PhysicalDevice,
        queue_family_index: u32,
    ) -> Result<bool, VulkanError> {
        self.surface_loader
            .get_physical_device_surface_support(
                physical_device,
                queue_family_index,
                self.surface,
            )
            .map_err(|err| {
                VulkanError::UnableToQuerySurface("queue family support", err)
            })
    }

    /// The surface capabilities for the physical device.
    ///
    /// # Safety
    ///
    /// Unsafe because the physical device must still exist.
    pub unsafe fn capabilities(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Result<vk::SurfaceCapabilitiesKHR, VulkanError> {
        self.surface_loader
            .get_physical_device_surface_capabilities(
                physical_device,
                self.surface,
            )
            .map_err(|err| VulkanError::UnableToQuerySurface("capabilities", err))
    }

    /// Every format the surface supports on the physical device.
    ///
    /// # Safety
    ///
    /// Unsafe because the physical device must still exist.
    pub unsafe fn formats(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Result<Vec<vk::SurfaceFormatKHR>, VulkanError> {
        self.surface_loader
            .get_physical_device_surface_formats(physical_device, self.surface)
            .map_err(|err| VulkanError::UnableToQuerySurface("formats", err))
    }

    /// Every present mode the surface supports on the physical device.
    ///
    /// # Safety
    ///
    /// Unsafe because the physical device must still exist.
    pub unsafe fn present_modes(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Result<Vec<vk::PresentModeKHR>, VulkanError> {
        self.surface_loader
            .get_physical_device_surface_present_modes(
                physical_device,
                self.surface,
            )
            .map_err(|err| {
                VulkanError::UnableToQuerySurface("present modes", err)
            })
    }

    /// Destroy the surface.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - It is undefined behavior to use this type after calling destroy.
    ///   - No swapchain may still reference the surface.
    ///   - The surface must be destroyed before the Vulkan instance.
    pub unsafe fn destroy(&mut self) {
        self.surface_loader.destroy_surface(self.surface, None);
    }
}

impl std::fmt::Debug for WindowSurface {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("WindowSurface")
            .field("surface", &self.surface)
            .finish()
    }
}
