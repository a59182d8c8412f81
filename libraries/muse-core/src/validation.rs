//! Field-level checks shared by the catalog drafts.
//!
//! Each helper returns the supplied error on failure so drafts can run them as an
//! ordered chain with `?`, stopping at the first problem.

use crate::error::{Result, ValidationError};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum length of a name or title, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 300;

/// Letters (including Spanish accented letters), digits, spaces, apostrophes and hyphens.
const TEXT_PATTERN: &str = r"^[0-9A-Za-zÁÉÍÓÚÜÑáéíóúüñ' -]+$";

const URL_PATTERN: &str = r"(?i)^(https?|ftp)://[^\s/$.?#].[^\s]*$";

static TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TEXT_PATTERN).expect("valid text pattern"));

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("valid url pattern"));

/// True when `value` only uses the permitted free-text characters.
///
/// The empty string does not match.
pub fn is_permitted_text(value: &str) -> bool {
    TEXT_RE.is_match(value)
}

/// True when `value` is an `http`, `https` or `ftp` URL with a host segment.
pub fn is_valid_image_url(value: &str) -> bool {
    URL_RE.is_match(value)
}

pub(crate) fn permitted_text(value: &str, err: ValidationError) -> Result<()> {
    if is_permitted_text(value) {
        Ok(())
    } else {
        Err(err)
    }
}

pub(crate) fn required(value: &str, err: ValidationError) -> Result<()> {
    if value.trim().is_empty() {
        Err(err)
    } else {
        Ok(())
    }
}

pub(crate) fn max_chars(value: &str, max: usize, err: ValidationError) -> Result<()> {
    if value.trim().chars().count() > max {
        Err(err)
    } else {
        Ok(())
    }
}

/// Syntax check that only applies when a URL was actually entered.
pub(crate) fn optional_image_url(value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() || is_valid_image_url(trimmed) {
        Ok(())
    } else {
        Err(ValidationError::ImageUrlInvalid)
    }
}
