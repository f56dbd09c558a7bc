use std::fmt;

/// Square access token and the location orders are created for.
#[derive(Clone)]
pub struct Credentials {
    pub access_token: String,
    pub location_id: String,
}

impl Credentials {
    /// Returns `None` unless both values are present and non-blank.
    pub fn from_parts(access_token: Option<String>, location_id: Option<String>) -> Option<Self> {
        let access_token = access_token.filter(|v| !v.trim().is_empty())?;
        let location_id = location_id.filter(|v| !v.trim().is_empty())?;
        Some(Self {
            access_token: access_token.trim().to_string(),
            location_id: location_id.trim().to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("location_id", &self.location_id)
            .finish()
    }
}
