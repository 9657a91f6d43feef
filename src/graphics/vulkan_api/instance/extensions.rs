use {
    crate::{graphics::vulkan_api::VulkanError, logging::PrettyList},
    std::ffi::CStr,
};

/// Get the names of every instance extension available on this platform.
pub fn available_extensions(
    entry: &ash::Entry,
) -> Result<Vec<String>, VulkanError> {
    let properties = unsafe {
        entry
            .enumerate_instance_extension_properties(None)
            .map_err(VulkanError::UnableToListAvailableExtensions)?
    };
    let names: Vec<String> = properties
        .iter()
        .filter_map(|ext| ext.extension_name_as_c_str().ok())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    log::debug!("Available extensions: {}", PrettyList(&names));
    Ok(names)
}

/// Check that each of the required extensions is available.
pub fn check_extensions(
    available: &[String],
    required: &[&CStr],
) -> Result<(), VulkanError> {
    let missing = missing_extensions(available, required);
    if !missing.is_empty() {
        Err(VulkanError::RequiredExtensionsNotFound(missing))
    } else {
        Ok(())
    }
}

/// True when the named extension is in the available list.
pub fn is_available(available: &[String], name: &CStr) -> bool {
    available
        .iter()
        .any(|item| item.as_bytes() == name.to_bytes())
}

/// Every required extension which is not available.
fn missing_extensions(available: &[String], required: &[&CStr]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !is_available(available, name))
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn available() -> Vec<String> {
        vec!["VK_KHR_surface".to_owned(), "VK_EXT_debug_utils".to_owned()]
    }

    #[test]
    fn present_extensions_pass() {
        assert!(check_extensions(&available(), &[c"VK_KHR_surface"]).is_ok());
    }

    #[test]
    fn missing_extensions_are_listed() {
        let result = check_extensions(
            &available(),
            &[c"VK_KHR_surface", c"VK_KHR_wayland_surface"],
        );
        match result {
            Err(VulkanError::RequiredExtensionsNotFound(missing)) => {
                assert_eq!(missing, vec!["VK_KHR_wayland_surface".to_owned()]);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn names_must_match_exactly() {
        assert!(!is_available(&available(), c"VK_KHR_surf"));
        assert!(is_available(&available(), c"VK_EXT_debug_utils"));
    }
}
