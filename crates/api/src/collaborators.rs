// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Interfaces to photo storage and address resolution.

use participium_domain::Coordinates;

use crate::error::ApiError;

/// Raw bytes of one uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// Name supplied by the client, used only for its extension.
    pub original_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Where a stored photo can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    pub url: String,
    pub filename: String,
}

/// Persists photo bytes and returns a stable public location.
pub trait PhotoStorage: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be stored.
    fn store(&self, upload: &PhotoUpload) -> Result<StoredPhoto, ApiError>;

    /// Removes a photo stored for a report that was never persisted.
    /// Failures are logged, not returned.
    fn discard(&self, photo: &StoredPhoto);
}

/// Turns coordinates into a human-readable address.
///
/// Implementations must not fail; they fall back to
/// [`fallback_address`] when a lookup is not possible.
pub trait AddressResolver: Send + Sync {
    fn resolve(&self, coordinates: &Coordinates) -> String;
}

/// The deterministic address used when no lookup is available.
#[must_use]
pub fn fallback_address(coordinates: &Coordinates) -> String {
    format!(
        "Lat: {}, Lon: {}",
        coordinates.latitude, coordinates.longitude
    )
}

/// An address resolver that never performs a lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackAddressResolver;

impl AddressResolver for FallbackAddressResolver {
    fn resolve(&self, coordinates: &Coordinates) -> String {
        fallback_address(coordinates)
    }
}
