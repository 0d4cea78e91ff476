//! Call-site identity for log records
//!
//! Function names and source locations are captured where the log call is
//! written, either through the [`caller!`](crate::caller) macro or through
//! `#[track_caller]` on the logger methods.

use std::panic::Location;

/// Sentinel used for any part of the call site that could not be resolved
pub const UNKNOWN: &str = "unknown";

/// Where a log call came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    function: Option<&'static str>,
    file: Option<&'static str>,
    line: u32,
}

impl Caller {
    /// Create a fully resolved caller
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            function: Some(function),
            file: Some(file),
            line,
        }
    }

    /// Caller from a `#[track_caller]` location; the function name stays unresolved
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            function: None,
            file: Some(location.file()),
            line: location.line(),
        }
    }

    /// Caller with nothing resolved
    pub const fn unknown() -> Self {
        Self {
            function: None,
            file: None,
            line: 0,
        }
    }

    /// Function path keeping the last `depth` `::` segments
    pub fn function_name(&self, depth: i32) -> String {
        match self.function {
            Some(function) => keep_last_segments(function, "::", depth),
            None => UNKNOWN.to_string(),
        }
    }

    /// `path:line` keeping the last `depth` path segments
    pub fn location(&self, depth: i32) -> String {
        match self.file {
            Some(file) => format!(
                "{}:{}",
                keep_last_segments(file, path_separator(file), depth),
                self.line
            ),
            None => format!("{}:{}", UNKNOWN, UNKNOWN),
        }
    }
}

fn path_separator(path: &str) -> &'static str {
    if path.contains('\\') && !path.contains('/') {
        "\\"
    } else {
        "/"
    }
}

/// Keep the last `n` segments of `value` split on `separator`
///
/// Separators inside `<...>` are not split points, so a qualifier like
/// `<app::Widget as core::fmt::Display>` stays one segment.
/// `n <= 0` and `n` larger than the number of segments both keep everything.
pub fn keep_last_segments(value: &str, separator: &str, n: i32) -> String {
    let segments = split_top_level(value, separator);
    let keep = usize::try_from(n).unwrap_or(0);
    if keep == 0 || keep >= segments.len() {
        return value.to_string();
    }
    segments[segments.len() - keep..].join(separator)
}

/// Split on `separator` at angle-bracket depth 0
fn split_top_level<'a>(value: &'a str, separator: &str) -> Vec<&'a str> {
    let bytes = value.as_bytes();
    let sep = separator.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            // `->` in fn pointer types is not a closing bracket
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth = depth.saturating_sub(1),
            _ if depth == 0 && !sep.is_empty() && bytes[i..].starts_with(sep) => {
                segments.push(&value[start..i]);
                i += sep.len();
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&value[start..]);
    segments
}

/// Strip the helper suffix and closure markers from a `type_name` path
#[doc(hidden)]
pub fn trim_function_name(raw: &'static str) -> &'static str {
    let mut name = raw.strip_suffix("::f").unwrap_or(raw);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

/// Fully qualified path of the enclosing function, e.g. `my_app::server::handle`
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::logging::caller::trim_function_name(type_name_of(f))
    }};
}

/// [`Caller`] for the current function, file and line
#[macro_export]
macro_rules! caller {
    () => {
        $crate::logging::Caller::new($crate::function_name!(), file!(), line!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_last_segments_non_positive_keeps_all() {
        let path = "/home/dev/app/src/main.rs";
        assert_eq!(keep_last_segments(path, "/", 0), path);
        assert_eq!(keep_last_segments(path, "/", -3), path);
        assert_eq!(keep_last_segments("a::b::c", "::", 0), "a::b::c");
    }

    #[test]
    fn test_keep_last_segments_truncates() {
        assert_eq!(keep_last_segments("/home/dev/app/src/main.rs", "/", 1), "main.rs");
        assert_eq!(keep_last_segments("/home/dev/app/src/main.rs", "/", 2), "src/main.rs");
        assert_eq!(keep_last_segments("app::server::handle", "::", 2), "server::handle");
    }

    #[test]
    fn test_keep_last_segments_depth_beyond_segments_keeps_all() {
        assert_eq!(keep_last_segments("src/main.rs", "/", 10), "src/main.rs");
        assert_eq!(keep_last_segments("app::run", "::", 3), "app::run");
        assert_eq!(keep_last_segments("main", "::", 1), "main");
    }

    #[test]
    fn test_keep_last_segments_treats_qualified_type_as_one_segment() {
        let name = "app::<app::Widget as core::fmt::Display>::fmt";
        assert_eq!(
            keep_last_segments(name, "::", 2),
            "<app::Widget as core::fmt::Display>::fmt"
        );
        assert_eq!(keep_last_segments(name, "::", 1), "fmt");

        let generic = "app::<alloc::vec::Vec<u8> as app::Store>::save";
        assert_eq!(
            keep_last_segments(generic, "::", 2),
            "<alloc::vec::Vec<u8> as app::Store>::save"
        );

        let fn_ptr = "app::<fn() -> u8 as app::Job>::run";
        assert_eq!(keep_last_segments(fn_ptr, "::", 2), "<fn() -> u8 as app::Job>::run");
    }

    struct Widget;

    impl std::fmt::Display for Widget {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&crate::caller!().function_name(2))
        }
    }

    #[test]
    fn test_function_name_inside_trait_impl() {
        let name = Widget.to_string();
        assert!(name.starts_with('<'), "{}", name);
        assert!(name.ends_with("Widget>::fmt"), "{}", name);
        assert!(name.contains("Display"), "{}", name);
        assert_eq!(name.matches('<').count(), name.matches('>').count());
    }

    #[test]
    fn test_unknown_caller() {
        let caller = Caller::unknown();
        assert_eq!(caller.function_name(1), "unknown");
        assert_eq!(caller.location(1), "unknown:unknown");
    }

    #[test]
    fn test_caller_location_truncation() {
        let caller = Caller::new("app::server::handle", "src/server/mod.rs", 42);
        assert_eq!(caller.location(1), "mod.rs:42");
        assert_eq!(caller.location(2), "server/mod.rs:42");
        assert_eq!(caller.location(0), "src/server/mod.rs:42");
        assert_eq!(caller.location(9), "src/server/mod.rs:42");
    }

    #[test]
    fn test_caller_function_truncation() {
        let caller = Caller::new("app::server::handle", "src/server/mod.rs", 42);
        assert_eq!(caller.function_name(1), "handle");
        assert_eq!(caller.function_name(2), "server::handle");
        assert_eq!(caller.function_name(-1), "app::server::handle");
        assert_eq!(caller.function_name(5), "app::server::handle");
    }

    #[test]
    fn test_windows_style_path() {
        let caller = Caller::new("app::main", "src\\bin\\main.rs", 7);
        assert_eq!(caller.location(2), "bin\\main.rs:7");
    }

    #[test]
    fn test_from_location_uses_track_caller() {
        #[track_caller]
        fn here() -> Caller {
            Caller::from_location(Location::caller())
        }

        let expected_line = line!() + 1;
        let caller = here();
        assert_eq!(caller.location(1), format!("caller.rs:{}", expected_line));
        assert_eq!(caller.function_name(1), "unknown");
    }

    #[test]
    fn test_function_name_macro() {
        let name = crate::function_name!();
        assert!(name.ends_with("tests::test_function_name_macro"), "{}", name);
    }

    #[test]
    fn test_function_name_macro_in_closure() {
        let name = (|| crate::function_name!())();
        assert!(name.ends_with("test_function_name_macro_in_closure"), "{}", name);
    }

    #[test]
    fn test_caller_macro() {
        let line = line!() + 1;
        let caller = crate::caller!();
        assert_eq!(caller.function_name(1), "test_caller_macro");
        assert_eq!(caller.location(1), format!("caller.rs:{}", line));
    }
}
