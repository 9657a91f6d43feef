mod physical_device;
mod queue;
mod window_surface;

use {
    crate::graphics::vulkan_api::{ffi, Instance, VulkanError},
    ash::{ext::debug_utils, khr, vk},
    std::ffi::{c_void, CString},
};

pub use self::{queue::Queue, window_surface::WindowSurface};

/// The Vulkan logical device, the window surface it presents to, and the
/// instance which owns both.
pub struct RenderDevice {
    memory_properties: vk::PhysicalDeviceMemoryProperties,
    limits: vk::PhysicalDeviceLimits,
    physical_device: vk::PhysicalDevice,
    graphics_queue: Queue,
    swapchain_loader: khr::swapchain::Device,
    debug_utils: Option<debug_utils::Device>,
    device: ash::Device,
    window_surface: WindowSurface,
    instance: Instance,
}

// Public API
// ----------

impl RenderDevice {
    /// Create the window surface and a logical device which can present to
    /// it.
    ///
    /// # Params
    ///
    /// * `instance` - the Vulkan instance, owned by the device from now on
    /// * `display` - the raw `wl_display` pointer
    /// * `surface` - the raw `wl_surface` pointer for the window
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the Wayland display and surface must outlive the render device
    pub unsafe fn new(
        instance: Instance,
        display: *mut c_void,
        surface: *mut c_void,
    ) -> Result<Self, VulkanError> {
        let mut window_surface =
            WindowSurface::new(&instance, display, surface)?;
        let suitable = match physical_device::find_suitable_device(
            &instance,
            &window_surface,
            display,
        ) {
            Ok(suitable) => suitable,
            Err(err) => {
                window_surface.destroy();
                return Err(err);
            }
        };

        let priorities = [1.0_f32];
        let queue_create_infos = [vk::DeviceQueueCreateInfo::default()
            .queue_family_index(suitable.queue_family_index)
            .queue_priorities(&priorities)];
        let extension_ptrs =
            ffi::to_os_ptrs(&physical_device::REQUIRED_DEVICE_EXTENSIONS);
        let create_info = vk::DeviceCreateInfo::default()
            .queue_create_infos(&queue_create_infos)
            .enabled_extension_names(&extension_ptrs);
        let device = match instance.ash().create_device(
            suitable.physical_device,
            &create_info,
            None,
        ) {
            Ok(device) => device,
            Err(err) => {
                window_surface.destroy();
                return Err(VulkanError::UnableToCreateLogicalDevice(err));
            }
        };

        let graphics_queue =
            Queue::new(&device, suitable.queue_family_index, 0);
        let swapchain_loader =
            khr::swapchain::Device::new(instance.ash(), &device);
        let debug_utils = instance
            .has_debug_utils()
            .then(|| debug_utils::Device::new(instance.ash(), &device));
        let properties = instance
            .ash()
            .get_physical_device_properties(suitable.physical_device);
        let memory_properties = instance
            .ash()
            .get_physical_device_memory_properties(suitable.physical_device);
        log::debug!("Graphics and present queue: {}", graphics_queue);

        Ok(Self {
            memory_properties,
            limits: properties.limits,
            physical_device: suitable.physical_device,
            graphics_queue,
            swapchain_loader,
            debug_utils,
            device,
            window_surface,
            instance,
        })
    }

    /// The raw Ash logical device.
    pub fn device(&self) -> &ash::Device {
        &self.device
    }

    /// The physical device backing the logical device.
    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    /// The queue used for both graphics commands and presentation.
    pub fn graphics_queue(&self) -> &Queue {
        &self.graphics_queue
    }

    /// The loader for VK_KHR_swapchain functions.
    pub fn swapchain_loader(&self) -> &khr::swapchain::Device {
        &self.swapchain_loader
    }

    /// The surface swapchains present to.
    pub fn window_surface(&self) -> &WindowSurface {
        &self.window_surface
    }

    /// The physical device limits.
    pub fn limits(&self) -> &vk::PhysicalDeviceLimits {
        &self.limits
    }

    /// Find a memory type index which matches the memory requirement type
    /// bits and has all of the requested property flags.
    pub fn memory_type_index(
        &self,
        type_bits: u32,
        flags: vk::MemoryPropertyFlags,
    ) -> Result<u32, VulkanError> {
        find_memory_type(&self.memory_properties, type_bits, flags)
            .ok_or(VulkanError::NoCompatibleMemoryType { type_bits, flags })
    }

    /// Give a debug name to a Vulkan object owned by this device. The name
    /// shows up in validation layer messages.
    ///
    /// Does nothing when the debug utils extension is not enabled.
    pub fn set_debug_name(
        &self,
        handle: impl vk::Handle,
        name: impl Into<String>,
    ) {
        let Some(debug_utils) = self.debug_utils.as_ref() else {
            return;
        };
        let Ok(name) = CString::new(name.into()) else {
            log::warn!("Debug names cannot contain nul bytes");
            return;
        };
        let name_info = vk::DebugUtilsObjectNameInfoEXT::default()
            .object_handle(handle)
            .object_name(&name);
        let result =
            unsafe { debug_utils.set_debug_utils_object_name(&name_info) };
        if let Err(err) = result {
            log::warn!("Unable to set debug name {:?}: {}", name, err);
        }
    }

    /// Block until the device has finished all submitted work.
    pub fn wait_idle(&self) -> Result<(), VulkanError> {
        unsafe {
            self.device
                .device_wait_idle()
                .map_err(VulkanError::UnableToWaitIdle)
        }
    }
}

impl Drop for RenderDevice {
    fn drop(&mut self) {
        if let Err(err) = self.wait_idle() {
            log::error!("{}", err);
        }
        unsafe {
            self.device.destroy_device(None);
            self.window_surface.destroy();
        }
    }
}

impl std::fmt::Debug for RenderDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderDevice")
            .field("physical_device", &self.physical_device)
            .field("graphics_queue", &self.graphics_queue)
            .field("window_surface", &self.window_surface)
            .field("instance", &self.instance)
            .finish()
    }
}

// Private API
// -----------

fn find_memory_type(
    memory_properties: &vk::PhysicalDeviceMemoryProperties,
    type_bits: u32,
    flags: vk::MemoryPropertyFlags,
) -> Option<u32> {
    let count = memory_properties.memory_type_count as usize;
    memory_properties.memory_types[..count]
        .iter()
        .enumerate()
        .find(|(index, memory_type)| {
            type_bits & (1 << index) != 0
                && memory_type.property_flags.contains(flags)
        })
        .map(|(index, _)| index as u32)
}

#[cfg(test)]
mod test {
    use super::*;

    fn memory_properties(
        types: &[vk::MemoryPropertyFlags],
    ) -> vk::PhysicalDeviceMemoryProperties {
        let mut properties = vk::PhysicalDeviceMemoryProperties {
            memory_type_count: types.len() as u32,
            ..Default::default()
        };
        for (index, &flags) in types.iter().enumerate() {
            properties.memory_types[index].property_flags = flags;
        }
        properties
    }

    #[test]
    fn memory_type_must_have_all_flags() {
        let host = vk::MemoryPropertyFlags::HOST_VISIBLE
            | vk::MemoryPropertyFlags::HOST_COHERENT;
        let properties = memory_properties(&[
            vk::MemoryPropertyFlags::DEVICE_LOCAL,
            vk::MemoryPropertyFlags::HOST_VISIBLE,
            host,
        ]);
        assert_eq!(find_memory_type(&properties, 0b111, host), Some(2));
    }

    #[test]
    fn memory_type_must_be_allowed_by_type_bits() {
        let properties = memory_properties(&[
            vk::MemoryPropertyFlags::HOST_VISIBLE,
            vk::MemoryPropertyFlags::HOST_VISIBLE,
        ]);
        let flags = vk::MemoryPropertyFlags::HOST_VISIBLE;
        assert_eq!(find_memory_type(&properties, 0b10, flags), Some(1));
        assert_eq!(find_memory_type(&properties, 0b100, flags), None);
    }
}
