use std::fmt;
use std::panic::Location;

/// Source position of the statement that produced a record.
///
/// Captured either implicitly through `#[track_caller]` (file and line
/// only) or explicitly with [`callsite!`](crate::callsite), which also
/// records the module path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub module: Option<&'static str>,
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    /// Position of the nearest caller that is not itself `#[track_caller]`.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(loc: &'static Location<'static>) -> Self {
        CallSite {
            module: None,
            file: loc.file(),
            line: loc.line(),
        }
    }
}

/// `module:line` when the module is known, `file:line` otherwise.
impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.module {
            Some(module) => write!(f, "{}:{}", module, self.line),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

/// Capture the current module path, file and line as a [`CallSite`].
#[macro_export]
macro_rules! callsite {
    () => {
        $crate::location::CallSite {
            module: ::std::option::Option::Some(::std::module_path!()),
            file: ::std::file!(),
            line: ::std::line!(),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_points_here() {
        let site = CallSite::caller();
        assert!(site.file.ends_with("location.rs"));
        assert_eq!(site.to_string(), format!("{}:{}", site.file, site.line));
    }

    #[test]
    fn macro_records_module() {
        let site = crate::callsite!();
        assert_eq!(site.module, Some("jaylog::location::tests"));
        assert_eq!(site.to_string(), format!("jaylog::location::tests:{}", site.line));
    }
}
