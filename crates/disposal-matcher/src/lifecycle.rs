//! Waste record disposal lifecycle
//!
//! ```text
//! PENDING ──add_to_cart──▶ IN_CART ──dispose──▶ DISPOSED
//!    └──────────────────dispose──────────────────▲
//! ```
//!
//! Status only moves forward. Timestamps are set by the constructor and by
//! each transition from the `now` the caller passes in.

use crate::{MatchError, Result, WasteCategory, WasteTaxonomy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisposalStatus {
    Pending,
    InCart,
    Disposed,
}

impl DisposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InCart => "IN_CART",
            Self::Disposed => "DISPOSED",
        }
    }

    /// Whether `self -> next` is a legal forward step
    pub fn can_transition_to(&self, next: DisposalStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InCart)
                | (Self::Pending, Self::Disposed)
                | (Self::InCart, Self::Disposed)
        )
    }
}

impl fmt::Display for DisposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scanned waste item tracked through disposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteRecord {
    pub id: Uuid,
    pub user_id: String,
    /// Normalized taxonomy key as classified at scan time
    pub waste_type: String,
    pub category: WasteCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_grams: Option<f64>,
    pub disposal_status: DisposalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposal_center_id: Option<String>,
    pub scanned_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WasteRecord {
    /// Create a pending record, classifying the waste type
    pub fn new(
        taxonomy: &WasteTaxonomy,
        user_id: impl Into<String>,
        raw_waste_type: &str,
        weight_grams: Option<f64>,
        now: DateTime<Utc>,
    ) -> Self {
        let profile = taxonomy.classify(raw_waste_type);
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            waste_type: profile.key.clone(),
            category: profile.category,
            weight_grams,
            disposal_status: DisposalStatus::Pending,
            disposal_center_id: None,
            scanned_at: now,
            disposed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn transition(&mut self, next: DisposalStatus, now: DateTime<Utc>) -> Result<()> {
        if !self.disposal_status.can_transition_to(next) {
            return Err(MatchError::InvalidTransition {
                from: self.disposal_status,
                to: next,
            });
        }
        self.disposal_status = next;
        self.updated_at = now;
        Ok(())
    }

    pub fn add_to_cart(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.transition(DisposalStatus::InCart, now)
    }

    /// Mark disposed at a center; score the disposal once this succeeds
    pub fn dispose(&mut self, center_id: Option<String>, now: DateTime<Utc>) -> Result<()> {
        self.transition(DisposalStatus::Disposed, now)?;
        self.disposal_center_id = center_id;
        self.disposed_at = Some(now);
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.disposal_status == DisposalStatus::Disposed
    }
}
