// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation for citizen and staff input.
//!
//! These checks are structural only. Geofence admission and lifecycle rules
//! live elsewhere.

use crate::error::DomainError;
use crate::types::Coordinates;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;
pub const MAX_CONTENT_LENGTH: usize = 2000;
pub const MIN_PHOTOS: usize = 1;
pub const MAX_PHOTOS: usize = 3;

/// Validates a report title.
///
/// # Errors
///
/// Returns `DomainError::InvalidTitle` if the trimmed title is empty or
/// longer than `MAX_TITLE_LENGTH` characters.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    let length: usize = title.trim().chars().count();
    if length == 0 {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    if length > MAX_TITLE_LENGTH {
        return Err(DomainError::InvalidTitle(format!(
            "Title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates a report description.
///
/// # Errors
///
/// Returns `DomainError::InvalidDescription` if the trimmed description is
/// empty or longer than `MAX_DESCRIPTION_LENGTH` characters.
pub fn validate_description(description: &str) -> Result<(), DomainError> {
    let length: usize = description.trim().chars().count();
    if length == 0 {
        return Err(DomainError::InvalidDescription(String::from(
            "Description cannot be empty",
        )));
    }
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(DomainError::InvalidDescription(format!(
            "Description cannot exceed {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates coordinates are finite and within WGS84 ranges.
///
/// # Errors
///
/// Returns `DomainError::InvalidCoordinates` otherwise.
pub fn validate_coordinates(coordinates: &Coordinates) -> Result<(), DomainError> {
    let Coordinates {
        latitude,
        longitude,
    } = *coordinates;
    let valid: bool = latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude);
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidCoordinates {
            latitude,
            longitude,
        })
    }
}

/// A report carries between `MIN_PHOTOS` and `MAX_PHOTOS` photos.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhotoCount` outside that range.
pub const fn validate_photo_count(count: usize) -> Result<(), DomainError> {
    if count < MIN_PHOTOS || count > MAX_PHOTOS {
        return Err(DomainError::InvalidPhotoCount { count });
    }
    Ok(())
}

/// # Errors
///
/// Returns `DomainError::InvalidRejectionReason` if the reason is blank.
pub fn validate_rejection_reason(reason: &str) -> Result<(), DomainError> {
    if reason.trim().is_empty() {
        return Err(DomainError::InvalidRejectionReason(String::from(
            "A rejection reason is required",
        )));
    }
    Ok(())
}

/// Validates message or internal note content.
///
/// # Errors
///
/// Returns `DomainError::InvalidContent` if the trimmed content is empty or
/// longer than `MAX_CONTENT_LENGTH` characters.
pub fn validate_content(content: &str) -> Result<(), DomainError> {
    let length: usize = content.trim().chars().count();
    if length == 0 {
        return Err(DomainError::InvalidContent(String::from(
            "Content cannot be empty",
        )));
    }
    if length > MAX_CONTENT_LENGTH {
        return Err(DomainError::InvalidContent(format!(
            "Content cannot exceed {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}
