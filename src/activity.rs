use time::OffsetDateTime;

use crate::{
    profile::{ApplicationProfile, UserProfile},
    receipt::DecryptedReceipt,
};

/// Result of a completed share: who shared what with which application.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDetails {
    receipt_id: Option<String>,
    remember_me_id: Option<String>,
    parent_remember_me_id: Option<String>,
    timestamp: Option<OffsetDateTime>,
    user_profile: UserProfile,
    application_profile: ApplicationProfile,
}

impl ActivityDetails {
    pub fn receipt_id(&self) -> Option<&str> {
        self.receipt_id.as_deref()
    }

    /// Stable identifier for the user, for applications that opted in to remember-me.
    pub fn remember_me_id(&self) -> Option<&str> {
        self.remember_me_id.as_deref()
    }

    pub fn parent_remember_me_id(&self) -> Option<&str> {
        self.parent_remember_me_id.as_deref()
    }

    pub fn timestamp(&self) -> Option<OffsetDateTime> {
        self.timestamp
    }

    pub fn user_profile(&self) -> &UserProfile {
        &self.user_profile
    }

    pub fn application_profile(&self) -> &ApplicationProfile {
        &self.application_profile
    }
}

impl From<DecryptedReceipt> for ActivityDetails {
    fn from(receipt: DecryptedReceipt) -> Self {
        Self {
            receipt_id: receipt.receipt_id,
            remember_me_id: receipt.remember_me_id,
            parent_remember_me_id: receipt.parent_remember_me_id,
            timestamp: receipt.timestamp,
            user_profile: receipt.other_party_profile.into(),
            application_profile: receipt.profile.into(),
        }
    }
}
