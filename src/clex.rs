//! Just enough C lexing to find identifiers in a declarator.
//!
//! Doxygen does not tokenize the argument string of a function-pointer
//! typedef such as `)(void *ctx, int len)`, so parameter names have to be
//! picked out here.

use regex::Regex;
use std::sync::LazyLock;

static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)[A-Za-z_][A-Za-z0-9_]*|[0-9][0-9A-Za-z_.]*|\s+|\.\.\.|->|.").unwrap()
});

/// Split C source into tokens. Concatenating the tokens yields the input.
pub fn tokenize(source: &str) -> Vec<&str> {
    RE_TOKEN.find_iter(source).map(|m| m.as_str()).collect()
}

/// True when `name` appears as a whole token in `source`.
pub fn contains_token(source: &str, name: &str) -> bool {
    tokenize(source).contains(&name)
}
