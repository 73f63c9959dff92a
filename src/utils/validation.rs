use crate::domain::model::MAX_ITEM_NAME_CHARS;
use crate::utils::error::{MenuError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> MenuError {
    MenuError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 菜單頁面只接受 http/https
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(MenuError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Extra segmentation keywords must be usable as menu item names.
pub fn validate_keywords(field_name: &str, keywords: &[String]) -> Result<()> {
    for keyword in keywords {
        let length = keyword.trim().chars().count();
        if length < 2 {
            return Err(invalid(field_name, keyword, "Keywords need at least 2 characters"));
        }
        if length > MAX_ITEM_NAME_CHARS {
            return Err(invalid(
                field_name,
                keyword,
                format!("Keywords cannot exceed {} characters", MAX_ITEM_NAME_CHARS),
            ));
        }
    }
    Ok(())
}
