//! Testing and assertion macros

/// Asserts that the string representation of an expression matches a wildcard pattern.
///
/// Handy for error messages that embed temporary directory paths.
///
/// # Example
/// ```
/// use flowcell_core::assert_wildcard;
/// let message = "cannot list directory \"/tmp/.tmpA1b2/Bustard\"";
/// assert_wildcard!(message, "cannot list directory \"*/Bustard\"");
/// ```
#[macro_export]
macro_rules! assert_wildcard {
	($expression:expr, $wildcard:expr) => {
		let expression = format!("{}", $expression);
		if !wildmatch::WildMatch::new($wildcard).matches(&expression) {
			panic!(
				"assertion failed: expression \"{expression:?}\" does not match wildcard \"{}\"",
				$wildcard
			)
		}
	};
}
