use std::fmt;

/// Wrapper for &[T] which prints as a markdown-style list, one entry per
/// line. Handy for multiline log records such as the kernel table or the
/// active configuration.
pub struct PrettyList<'data, T>(pub &'data [T]);

impl<'data, T> PrettyList<'data, T> {
    fn write_entries(
        &self,
        f: &mut fmt::Formatter<'_>,
        mut entry: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
    ) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(" (none)");
        }
        for item in self.0 {
            f.write_str("\n- ")?;
            entry(f, item)?;
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
        self.write_entries(f, |f, item| {
            if alternate {
                write!(f, "{:#?}", item)
            } else {
                write!(f, "{:?}", item)
            }
        })
    }
}

impl<'data, T> fmt::Display for PrettyList<'data, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_entries(f, |f, item| write!(f, "{}", item))
    }
}
