/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// The CoNLL-U reader matches comment metadata and token ids on every line,
/// so each pattern lives in its own static.
macro_rules! regex {
    ($pat:literal) => {{
        static PATTERN: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
            regex::Regex::new($pat).unwrap_or_else(|err| panic!("built-in pattern {:?} is invalid: {err}", $pat))
        });
        &*PATTERN
    }};
}
