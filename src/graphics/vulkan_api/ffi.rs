//! Convenience functions for passing names across the Vulkan ffi boundary.

use std::ffi::{c_char, CStr};

/// Build a vector of pointers to the given names.
///
/// The pointers are only valid while the names are alive. Extension and layer
/// names are usually `'static` so this is rarely a concern.
pub fn to_os_ptrs(names: &[&CStr]) -> Vec<*const c_char> {
    names.iter().map(|name| name.as_ptr()).collect()
}

/// Owned, lossy copies of the given names for logs and error messages.
pub fn to_strings(names: &[&CStr]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pointers_refer_to_the_original_names() {
        let names = [c"VK_KHR_surface", c"VK_KHR_wayland_surface"];
        let ptrs = to_os_ptrs(&names);
        assert_eq!(ptrs.len(), 2);
        let first = unsafe { CStr::from_ptr(ptrs[0]) };
        assert_eq!(first, names[0]);
    }

    #[test]
    fn strings_are_copied() {
        assert_eq!(to_strings(&[c"abc"]), vec!["abc".to_owned()]);
    }
}
