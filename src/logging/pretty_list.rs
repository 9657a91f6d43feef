use std::fmt;

/// Borrowed list of values which formats as a markdown-style bullet list.
///
/// Used to keep long lists (extensions, present modes, outputs) readable in
/// the wrapped multiline log output.
pub struct PrettyList<'data, T>(pub &'data [T]);

impl<'data, T> PrettyList<'data, T> {
    fn write_entries(
        &self,
        f: &mut fmt::Formatter<'_>,
        mut write_entry: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
    ) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(" (none)");
        }
        for entry in self.0 {
            f.write_str("\n- ")?;
            write_entry(f, entry)?;
        }
        Ok(())
    }
}

impl<'data, T> fmt::Debug for PrettyList<'data, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alternate = f.alternate();
        self.write_entries(f, |f, entry| {
            if alternate {
                write!(f, "{:#?}", entry)
            } else {
                write!(f, "{:?}", entry)
            }
        })
    }
}

impl<'data, T> fmt::Display for PrettyList<'data, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_entries(f, |f, entry| write!(f, "{}", entry))
    }
}

#[cfg(test)]
mod test {
    use super::PrettyList;

    #[test]
    fn display_puts_each_entry_on_its_own_line() {
        let names = ["VK_KHR_surface", "VK_KHR_wayland_surface"];
        assert_eq!(
            format!("{}", PrettyList(&names)),
            "\n- VK_KHR_surface\n- VK_KHR_wayland_surface"
        );
    }

    #[test]
    fn debug_uses_debug_formatting() {
        let sizes = [(1, 2)];
        assert_eq!(format!("{:?}", PrettyList(&sizes)), "\n- (1, 2)");
    }

    #[test]
    fn empty_lists_are_called_out() {
        let empty: [u32; 0] = [];
        assert_eq!(format!("{}", PrettyList(&empty)), " (none)");
    }
}
