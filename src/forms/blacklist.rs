use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::blacklist::BlockedIp;
use crate::domain::types::IpAddress;
use crate::forms::{FormError, optional_trimmed};
use crate::listing::parse_timestamp;

#[derive(Debug, Deserialize, Validate)]
pub struct BlockIpForm {
    pub ip_address: String,
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
    /// Blank blocks permanently.
    pub expires_at: Option<String>,
}

impl BlockIpForm {
    pub fn into_blocked_ip(
        self,
        blocked_by: &str,
        now: NaiveDateTime,
    ) -> Result<BlockedIp, FormError> {
        self.validate()?;
        let ip_address: IpAddress = self
            .ip_address
            .parse()
            .map_err(|_| FormError::InvalidIpAddress)?;
        let expires_at = match optional_trimmed(self.expires_at) {
            Some(raw) => Some(parse_timestamp(&raw).ok_or(FormError::InvalidDate(raw))?),
            None => None,
        };

        Ok(BlockedIp {
            id: 0,
            ip_address: ip_address.to_string(),
            reason: self.reason.trim().to_string(),
            blocked_by: blocked_by.to_string(),
            created_at: now,
            expires_at,
        })
    }
}
