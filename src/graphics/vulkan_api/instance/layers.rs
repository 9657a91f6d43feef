use {
    crate::{graphics::vulkan_api::VulkanError, logging::PrettyList},
    std::ffi::CStr,
};

/// The Khronos validation layer.
pub const VALIDATION_LAYER: &CStr = c"VK_LAYER_KHRONOS_validation";

/// Get the validation layers which are installed.
///
/// Validation is a development aid, so missing layers are logged rather than
/// treated as an error.
pub fn available_debug_layers(
    entry: &ash::Entry,
) -> Result<Vec<&'static CStr>, VulkanError> {
    let properties = unsafe {
        entry
            .enumerate_instance_layer_properties()
            .map_err(VulkanError::UnableToListAvailableLayers)?
    };
    let names: Vec<String> = properties
        .iter()
        .filter_map(|layer| layer.layer_name_as_c_str().ok())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    log::debug!("Available layers: {}", PrettyList(&names));

    let wanted = VALIDATION_LAYER.to_string_lossy();
    if names.iter().any(|name| *name == wanted) {
        Ok(vec![VALIDATION_LAYER])
    } else {
        log::warn!("{} is not installed, validation is disabled", wanted);
        Ok(vec![])
    }
}
