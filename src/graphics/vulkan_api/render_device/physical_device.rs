use {
    super::WindowSurface,
    crate::{
        graphics::vulkan_api::{Instance, VulkanError},
        logging::PrettyList,
    },
    ash::{khr, vk},
    std::ffi::{c_void, CStr},
};

/// The device extensions this application requires.
pub const REQUIRED_DEVICE_EXTENSIONS: [&CStr; 1] = [khr::swapchain::NAME];

/// A physical device which can render and present to the window, along with
/// the queue family used for both.
#[derive(Debug, Copy, Clone)]
pub struct SuitableDevice {
    pub physical_device: vk::PhysicalDevice,
    pub queue_family_index: u32,
}

/// Pick the first physical device which can draw to the window surface.
///
/// # Safety
///
/// Unsafe because the display pointer must be the connection used to create
/// the window surface.
pub unsafe fn find_suitable_device(
    instance: &Instance,
    window_surface: &WindowSurface,
    display: *mut c_void,
) -> Result<SuitableDevice, VulkanError> {
    let physical_devices = instance
        .ash()
        .enumerate_physical_devices()
        .map_err(VulkanError::UnableToEnumeratePhysicalDevices)?;

    for physical_device in physical_devices {
        let name = device_name(instance, physical_device);
        if !has_required_extensions(instance, physical_device)? {
            log::debug!("{} is missing required device extensions", name);
            continue;
        }

        let families = instance
            .ash()
            .get_physical_device_queue_family_properties(physical_device);
        let mut supports_present =
            |family_index: u32| -> Result<bool, VulkanError> {
                let surface_support = window_surface
                    .supports_queue_family(physical_device, family_index)?;
                Ok(surface_support
                    && instance
                        .wayland_surface_loader()
                        .get_physical_device_wayland_presentation_support(
                            physical_device,
                            family_index,
                            &mut *(display as *mut vk::wl_display),
                        ))
            };

        match find_graphics_queue_family(&families, &mut supports_present)? {
            Some(queue_family_index) => {
                log::info!("Using device {}", name);
                return Ok(SuitableDevice {
                    physical_device,
                    queue_family_index,
                });
            }
            None => {
                log::debug!("{} cannot present to the window surface", name)
            }
        }
    }

    Err(VulkanError::NoSuitableDeviceFound)
}

/// Find the first queue family which supports graphics commands and can
/// present to the window.
///
/// Errors from the presentation query are returned rather than treated as
/// a lack of support.
pub fn find_graphics_queue_family(
    families: &[vk::QueueFamilyProperties],
    supports_present: &mut impl FnMut(u32) -> Result<bool, VulkanError>,
) -> Result<Option<u32>, VulkanError> {
    let graphics_families = families
        .iter()
        .enumerate()
        .filter(|(_, family)| {
            family.queue_count > 0
                && family.queue_flags.contains(vk::QueueFlags::GRAPHICS)
        })
        .map(|(index, _)| index as u32);
    for index in graphics_families {
        if supports_present(index)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// The extensions in `required` which are missing from `available`.
pub fn missing_device_extensions(
    available: &[String],
    required: &[&CStr],
) -> Vec<String> {
    required
        .iter()
        .map(|name| name.to_string_lossy())
        .filter(|name| !available.iter().any(|item| item == name))
        .map(|name| name.into_owned())
        .collect()
}

// Private API
// -----------

unsafe fn has_required_extensions(
    instance: &Instance,
    physical_device: vk::PhysicalDevice,
) -> Result<bool, VulkanError> {
    let available: Vec<String> = instance
        .ash()
        .enumerate_device_extension_properties(physical_device)
        .map_err(VulkanError::UnableToListAvailableExtensions)?
        .iter()
        .filter_map(|ext| ext.extension_name_as_c_str().ok())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    log::trace!("Available device extensions: {}", PrettyList(&available));
    Ok(missing_device_extensions(&available, &REQUIRED_DEVICE_EXTENSIONS)
        .is_empty())
}

unsafe fn device_name(
    instance: &Instance,
    physical_device: vk::PhysicalDevice,
) -> String {
    let properties = instance
        .ash()
        .get_physical_device_properties(physical_device);
    properties
        .device_name_as_c_str()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|_| format!("{:?}", physical_device))
}

#[cfg(test)]
mod test {
    use super::*;

    fn family(flags: vk::QueueFlags, queue_count: u32) -> vk::QueueFamilyProperties {
        vk::QueueFamilyProperties {
            queue_flags: flags,
            queue_count,
            ..Default::default()
        }
    }

    #[test]
    fn picks_first_graphics_family_which_can_present() {
        let families = [
            family(vk::QueueFlags::TRANSFER, 1),
            family(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE, 1),
            family(vk::QueueFlags::GRAPHICS, 1),
        ];
        let index =
            find_graphics_queue_family(&families, &mut |index| Ok(index == 2));
        assert_eq!(index.unwrap(), Some(2));
    }

    #[test]
    fn families_without_queues_are_skipped() {
        let families = [
            family(vk::QueueFlags::GRAPHICS, 0),
            family(vk::QueueFlags::GRAPHICS, 1),
        ];
        let index = find_graphics_queue_family(&families, &mut |_| Ok(true));
        assert_eq!(index.unwrap(), Some(1));
    }

    #[test]
    fn no_family_when_presentation_is_unsupported() {
        let families = [family(vk::QueueFlags::GRAPHICS, 1)];
        let index = find_graphics_queue_family(&families, &mut |_| Ok(false));
        assert_eq!(index.unwrap(), None);
    }

    #[test]
    fn presentation_query_errors_are_returned() {
        let families = [
            family(vk::QueueFlags::GRAPHICS, 1),
            family(vk::QueueFlags::GRAPHICS, 1),
        ];
        let mut queried = vec![];
        let result = find_graphics_queue_family(&families, &mut |index| {
            queried.push(index);
            Err(VulkanError::UnableToQuerySurface(
                "queue family support",
                vk::Result::ERROR_SURFACE_LOST_KHR,
            ))
        });
        assert!(matches!(
            result,
            Err(VulkanError::UnableToQuerySurface(
                _,
                vk::Result::ERROR_SURFACE_LOST_KHR
            ))
        ));
        assert_eq!(queried, vec![0]);
    }

    #[test]
    fn reports_missing_swapchain_extension() {
        let available = vec!["VK_KHR_maintenance1".to_owned()];
        assert_eq!(
            missing_device_extensions(&available, &REQUIRED_DEVICE_EXTENSIONS),
            vec!["VK_KHR_swapchain".to_owned()]
        );
        let available = vec!["VK_KHR_swapchain".to_owned()];
        assert!(
            missing_device_extensions(&available, &REQUIRED_DEVICE_EXTENSIONS)
                .is_empty()
        );
    }
}
