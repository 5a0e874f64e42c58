use std::ffi::{OsStr, OsString};

/// Default token that makes the driver pause for a debugger before replaying.
pub const DEFAULT_DEBUG_WAIT_FLAG: &str = "-d";

/// The argument list after the debug-wait flag has been taken out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredArgs {
    /// `true` if the flag appeared at least once.
    pub wait_for_debugger: bool,
    /// Remaining arguments in their original order. Element 0 is the program name.
    pub args: Vec<OsString>,
}

/// Removes every occurrence of `flag` from `args` (program name excluded) and
/// reports whether it was present.
///
/// Matching is a literal comparison of the whole argument: `-dv` is not `-d`,
/// and `--` has no special meaning.
pub fn extract_flag<I, S>(args: I, flag: &str) -> FilteredArgs
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut wait_for_debugger = false;
    let mut filtered: Vec<OsString> = iter.next().into_iter().collect();

    for arg in iter {
        if arg.as_os_str() == OsStr::new(flag) {
            wait_for_debugger = true;
            continue;
        }
        filtered.push(arg);
    }

    FilteredArgs {
        wait_for_debugger,
        args: filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(items: &[&str]) -> Vec<OsString> {
        items.iter().map(OsString::from).collect()
    }

    #[test]
    fn flag_is_removed_and_order_preserved() {
        let result = extract_flag(os(&["replayer", "a.bin", "-d", "b.bin"]), "-d");
        assert!(result.wait_for_debugger);
        assert_eq!(result.args, os(&["replayer", "a.bin", "b.bin"]));
    }

    #[test]
    fn no_flag_leaves_args_untouched() {
        let result = extract_flag(os(&["replayer", "a.bin", "b.bin"]), "-d");
        assert!(!result.wait_for_debugger);
        assert_eq!(result.args, os(&["replayer", "a.bin", "b.bin"]));
    }

    #[test]
    fn repeated_flag_is_removed_everywhere() {
        let result = extract_flag(os(&["replayer", "-d", "x", "-d"]), "-d");
        assert!(result.wait_for_debugger);
        assert_eq!(result.args, os(&["replayer", "x"]));
    }

    #[test]
    fn matching_is_literal() {
        let result = extract_flag(os(&["replayer", "-dv", "--", "-D", "--d"]), "-d");
        assert!(!result.wait_for_debugger);
        assert_eq!(result.args, os(&["replayer", "-dv", "--", "-D", "--d"]));
    }

    #[test]
    fn program_name_is_never_treated_as_flag() {
        let result = extract_flag(os(&["-d", "a.bin"]), "-d");
        assert!(!result.wait_for_debugger);
        assert_eq!(result.args, os(&["-d", "a.bin"]));
    }

    #[test]
    fn empty_argument_list() {
        let result = extract_flag(Vec::<OsString>::new(), "-d");
        assert!(!result.wait_for_debugger);
        assert!(result.args.is_empty());
    }

    #[test]
    fn custom_flag_token() {
        let result = extract_flag(os(&["replayer", "-d", "--wait"]), "--wait");
        assert!(result.wait_for_debugger);
        assert_eq!(result.args, os(&["replayer", "-d"]));
    }
}
