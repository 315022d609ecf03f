//! Name and token validation: the legality rules for group names,
//! permission definition names, and permission tokens.

use crate::error::ValidationError;

/// Minimum length of a group or definition name, in code points.
pub const NAME_MIN_LEN: usize = 1;

/// Maximum length of a group or definition name, in code points.
pub const NAME_MAX_LEN: usize = 16;

/// Minimum length of a permission token.
pub const TOKEN_MIN_LEN: usize = 6;

/// Maximum length of a permission token.
pub const TOKEN_MAX_LEN: usize = 12;

/// First code point of the accepted CJK ideograph block.
const CJK_FIRST: char = '\u{4e00}';

/// Last code point of the accepted CJK ideograph block.
const CJK_LAST: char = '\u{9fa5}';

/// Check whether a single character may appear in a name.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || (CJK_FIRST..=CJK_LAST).contains(&c)
}

/// Validate a group name or permission definition name.
///
/// Accepts 1 to 16 code points, each an ASCII letter, ASCII digit,
/// underscore, or a CJK ideograph in U+4E00..=U+9FA5.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    // 1. Length, counted in code points
    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::NameLength(len));
    }

    // 2. Character set
    if let Some(c) = name.chars().find(|c| !is_name_char(*c)) {
        return Err(ValidationError::NameCharacter(c));
    }

    Ok(())
}

/// Validate a permission token.
///
/// Accepts 6 to 12 characters, each an ASCII letter or digit.
pub fn validate_token(token: &str) -> Result<(), ValidationError> {
    let len = token.chars().count();
    if !(TOKEN_MIN_LEN..=TOKEN_MAX_LEN).contains(&len) {
        return Err(ValidationError::TokenLength(len));
    }

    if let Some(c) = token.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(ValidationError::TokenCharacter(c));
    }

    Ok(())
}

/// Shorthand for `validate_name(name).is_ok()`.
pub fn is_legal_name(name: &str) -> bool {
    validate_name(name).is_ok()
}

/// Shorthand for `validate_token(token).is_ok()`.
pub fn is_legal_token(token: &str) -> bool {
    validate_token(token).is_ok()
}
