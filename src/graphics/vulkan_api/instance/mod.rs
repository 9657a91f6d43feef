mod debug_callback;
mod extensions;
mod layers;

use {
    self::debug_callback::DebugMessenger,
    crate::{
        graphics::vulkan_api::{ffi, VulkanError},
        logging::PrettyList,
    },
    ash::{ext::debug_utils, khr, vk},
    std::ffi::CStr,
};

/// The instance extensions needed to present to a Wayland surface.
const REQUIRED_EXTENSIONS: [&CStr; 2] =
    [khr::surface::NAME, khr::wayland_surface::NAME];

/// The Vulkan library instance along with the surface extension loaders.
pub struct Instance {
    debug: Option<DebugMessenger>,
    wayland_surface_loader: khr::wayland_surface::Instance,
    surface_loader: khr::surface::Instance,
    ash: ash::Instance,
    entry: ash::Entry,
}

// Public API
// ----------

impl Instance {
    /// Load the Vulkan library and create an instance which can present to
    /// Wayland surfaces.
    ///
    /// Debug builds also enable the debug utils extension and the validation
    /// layer when they are installed.
    pub fn new() -> Result<Self, VulkanError> {
        let entry = unsafe {
            ash::Entry::load().map_err(VulkanError::UnableToLoadVulkan)?
        };

        let available = extensions::available_extensions(&entry)?;
        extensions::check_extensions(&available, &REQUIRED_EXTENSIONS)?;

        let mut enabled_extensions = REQUIRED_EXTENSIONS.to_vec();
        let mut enabled_layers = vec![];
        let enable_debug = cfg!(debug_assertions)
            && extensions::is_available(&available, debug_utils::NAME);
        if enable_debug {
            enabled_extensions.push(debug_utils::NAME);
            enabled_layers = layers::available_debug_layers(&entry)?;
        }

        log::debug!(
            "Enabled extensions: {}",
            PrettyList(&ffi::to_strings(&enabled_extensions))
        );
        log::debug!(
            "Enabled layers: {}",
            PrettyList(&ffi::to_strings(&enabled_layers))
        );

        let ash = create_instance(&entry, &enabled_extensions, &enabled_layers)?;
        let debug = if enable_debug {
            Some(DebugMessenger::new(&entry, &ash)?)
        } else {
            None
        };
        let surface_loader = khr::surface::Instance::new(&entry, &ash);
        let wayland_surface_loader =
            khr::wayland_surface::Instance::new(&entry, &ash);

        Ok(Self {
            debug,
            wayland_surface_loader,
            surface_loader,
            ash,
            entry,
        })
    }

    /// The raw Ash instance.
    pub fn ash(&self) -> &ash::Instance {
        &self.ash
    }

    /// The loader for VK_KHR_surface functions.
    pub fn surface_loader(&self) -> &khr::surface::Instance {
        &self.surface_loader
    }

    /// The loader for VK_KHR_wayland_surface functions.
    pub fn wayland_surface_loader(&self) -> &khr::wayland_surface::Instance {
        &self.wayland_surface_loader
    }

    /// True when the debug utils extension is enabled, so objects can be
    /// given debug names.
    pub fn has_debug_utils(&self) -> bool {
        self.debug.is_some()
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        unsafe {
            if let Some(debug) = self.debug.as_mut() {
                debug.destroy();
            }
            self.ash.destroy_instance(None);
        }
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("instance", &self.ash.handle())
            .field("debug_utils", &self.has_debug_utils())
            .finish()
    }
}

// Private API
// -----------

fn create_instance(
    entry: &ash::Entry,
    enabled_extensions: &[&CStr],
    enabled_layers: &[&CStr],
) -> Result<ash::Instance, VulkanError> {
    let app_name = c"wayland-triangle";
    let engine_name = c"no engine";
    let app_info = vk::ApplicationInfo {
        p_application_name: app_name.as_ptr(),
        p_engine_name: engine_name.as_ptr(),
        application_version: vk::make_api_version(0, 1, 0, 0),
        engine_version: vk::make_api_version(0, 1, 0, 0),
        api_version: vk::API_VERSION_1_1,
        ..Default::default()
    };

    let ext_ptrs = ffi::to_os_ptrs(enabled_extensions);
    let layer_ptrs = ffi::to_os_ptrs(enabled_layers);
    let create_info = vk::InstanceCreateInfo::default()
        .application_info(&app_info)
        .enabled_extension_names(&ext_ptrs)
        .enabled_layer_names(&layer_ptrs);

    unsafe {
        entry
            .create_instance(&create_info, None)
            .map_err(VulkanError::UnableToCreateInstance)
    }
}
