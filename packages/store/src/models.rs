//! # Domain models for the deal pipeline
//!
//! Defines the records exchanged with the deals service and held by
//! [`crate::DealBoard`]. Field names follow the service's camelCase JSON so the
//! same types decode REST responses and encode request bodies.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`DealStage`] | One of the eight fixed pipeline positions, in pipeline order. |
//! | [`Deal`] | A sales opportunity: client, product, stage, dates, optional value and notes. |
//! | [`Client`] / [`Product`] | Reference data a deal points at by id. |
//! | [`StageInfo`] | A stage record as served by `/stages`. |
//! | [`NewDeal`] | Create payload (`POST /deals`). |
//! | [`DealUpdate`] | Patch payload (`PATCH /deals/{id}`); absent fields are not sent. |
//!
//! ## Wire leniency
//!
//! The service is a loose JSON store, so decoding accepts a few variants:
//! ids may be numbers or strings, `createdDate` may arrive as `createdAt`,
//! and `value` may arrive as `amount`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// A fixed pipeline position for a deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DealStage {
    #[serde(rename = "Lead Generated")]
    LeadGenerated,
    #[serde(rename = "Contacted")]
    Contacted,
    #[serde(rename = "Application Submitted")]
    ApplicationSubmitted,
    #[serde(rename = "Application Under Review")]
    ApplicationUnderReview,
    #[serde(rename = "Deal Finalized")]
    DealFinalized,
    #[serde(rename = "Payment Confirmed")]
    PaymentConfirmed,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Lost")]
    Lost,
}

impl DealStage {
    /// Every stage in pipeline order.
    pub const ALL: [DealStage; 8] = [
        DealStage::LeadGenerated,
        DealStage::Contacted,
        DealStage::ApplicationSubmitted,
        DealStage::ApplicationUnderReview,
        DealStage::DealFinalized,
        DealStage::PaymentConfirmed,
        DealStage::Completed,
        DealStage::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DealStage::LeadGenerated => "Lead Generated",
            DealStage::Contacted => "Contacted",
            DealStage::ApplicationSubmitted => "Application Submitted",
            DealStage::ApplicationUnderReview => "Application Under Review",
            DealStage::DealFinalized => "Deal Finalized",
            DealStage::PaymentConfirmed => "Payment Confirmed",
            DealStage::Completed => "Completed",
            DealStage::Lost => "Lost",
        }
    }

    /// Whether the deal has left the pipeline (won or lost).
    pub fn is_closed(&self) -> bool {
        matches!(self, DealStage::Completed | DealStage::Lost)
    }
}

impl Default for DealStage {
    fn default() -> Self {
        DealStage::LeadGenerated
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known stage.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown deal stage: {0:?}")]
pub struct UnknownStage(pub String);

impl FromStr for DealStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DealStage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

/// A sales opportunity tracked through the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub client_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub product_id: String,
    pub stage: DealStage,
    /// RFC 3339 timestamp as sent by the service. Kept verbatim so malformed
    /// values can still be displayed as "Invalid Date".
    #[serde(default, alias = "createdAt")]
    pub created_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "updatedAt")]
    pub updated_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "amount")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Deal {
    /// Merge a patch into this deal and stamp `updated_date` with `now`.
    pub fn apply(&mut self, update: &DealUpdate, now: &str) {
        if let Some(ref client_id) = update.client_id {
            self.client_id = client_id.clone();
        }
        if let Some(ref product_id) = update.product_id {
            self.product_id = product_id.clone();
        }
        if let Some(stage) = update.stage {
            self.stage = stage;
        }
        if let Some(ref created) = update.created_at {
            self.created_date = created.clone();
        }
        if let Some(amount) = update.amount {
            self.value = amount;
        }
        if let Some(ref notes) = update.notes {
            self.notes = notes.clone();
        }
        self.updated_date = Some(now.to_string());
    }
}

/// A customer a deal is sold to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Something a deal sells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A stage record from `/stages`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: DealStage,
}

/// Body of `POST /deals`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeal {
    pub client_id: String,
    pub product_id: String,
    pub stage: DealStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewDeal {
    pub fn new(client_id: impl Into<String>, product_id: impl Into<String>, stage: DealStage) -> Self {
        Self {
            client_id: client_id.into(),
            product_id: product_id.into(),
            stage,
            created_at: None,
            amount: None,
            notes: None,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Build the deal a service would store for this payload.
    pub fn into_deal(self, id: String, now: &str) -> Deal {
        Deal {
            id,
            client_id: self.client_id,
            product_id: self.product_id,
            stage: self.stage,
            created_date: self.created_at.unwrap_or_else(|| now.to_string()),
            updated_date: Some(now.to_string()),
            value: self.amount,
            notes: self.notes,
        }
    }
}

/// Body of `PATCH /deals/{id}`. Only present fields are changed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<DealStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// `Some(None)` clears the value and is sent as `null`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub amount: Option<Option<f64>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub notes: Option<Option<String>>,
}

impl DealUpdate {
    /// Patch that only moves the deal to `stage`.
    pub fn stage(stage: DealStage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A field that is present decodes to `Some`, even when it is `null`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Accept `"7"` and `7` alike for id fields.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_parse_and_display() {
        for stage in DealStage::ALL {
            assert_eq!(stage.as_str().parse::<DealStage>().unwrap(), stage);
            assert_eq!(stage.to_string(), stage.as_str());
        }
        assert_eq!(" contacted ".parse::<DealStage>().unwrap(), DealStage::Contacted);
        assert_eq!(
            "Negotiation".parse::<DealStage>(),
            Err(UnknownStage("Negotiation".to_string()))
        );
    }

    #[test]
    fn test_unknown_stage_rejected_by_codec() {
        let json = r#"{"id":"1","clientId":"1","productId":"1","stage":"Negotiation"}"#;
        assert!(serde_json::from_str::<Deal>(json).is_err());
    }

    #[test]
    fn test_deal_decodes_numeric_ids_and_aliases() {
        let json = r#"{
            "id": 12,
            "clientId": "3",
            "productId": 4,
            "stage": "Deal Finalized",
            "createdAt": "2024-01-15T10:30:00Z",
            "amount": 2500
        }"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.id, "12");
        assert_eq!(deal.client_id, "3");
        assert_eq!(deal.product_id, "4");
        assert_eq!(deal.stage, DealStage::DealFinalized);
        assert_eq!(deal.created_date, "2024-01-15T10:30:00Z");
        assert_eq!(deal.value, Some(2500.0));
        assert!(deal.notes.is_none());
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let body = serde_json::to_value(DealUpdate::stage(DealStage::Lost)).unwrap();
        assert_eq!(body, serde_json::json!({ "stage": "Lost" }));
        assert!(DealUpdate::default().is_empty());
    }

    #[test]
    fn test_apply_merges_and_stamps() {
        let mut deal = NewDeal::new("1", "2", DealStage::LeadGenerated)
            .into_deal("d1".to_string(), "2024-01-01T00:00:00Z");
        let update = DealUpdate {
            product_id: Some("9".to_string()),
            notes: Some(Some("Call back".to_string())),
            ..DealUpdate::default()
        };
        deal.apply(&update, "2024-02-01T00:00:00Z");
        assert_eq!(deal.client_id, "1");
        assert_eq!(deal.product_id, "9");
        assert_eq!(deal.stage, DealStage::LeadGenerated);
        assert_eq!(deal.notes.as_deref(), Some("Call back"));
        assert_eq!(deal.created_date, "2024-01-01T00:00:00Z");
        assert_eq!(deal.updated_date.as_deref(), Some("2024-02-01T00:00:00Z"));
    }

    #[test]
    fn test_update_clears_optional_fields() {
        let mut deal = NewDeal::new("1", "2", DealStage::Contacted)
            .with_amount(500.0)
            .with_notes("old notes")
            .into_deal("d1".to_string(), "2024-01-01T00:00:00Z");
        let update = DealUpdate {
            amount: Some(None),
            notes: Some(None),
            ..DealUpdate::default()
        };
        assert!(!update.is_empty());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "amount": null, "notes": null })
        );

        deal.apply(&update, "2024-02-01T00:00:00Z");
        assert!(deal.value.is_none());
        assert!(deal.notes.is_none());
    }

    #[test]
    fn test_update_decodes_null_as_clear() {
        let update: DealUpdate = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(update.notes, Some(None));
        assert_eq!(update.amount, None);

        let update: DealUpdate = serde_json::from_str(r#"{"amount": 12.5}"#).unwrap();
        assert_eq!(update.amount, Some(Some(12.5)));
    }

    #[test]
    fn test_new_deal_payload_shape() {
        let mut payload = NewDeal::new("c1", "p1", DealStage::Contacted).with_amount(10.0);
        payload.created_at = Some("2024-03-01T09:00:00Z".to_string());
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "clientId": "c1",
                "productId": "p1",
                "stage": "Contacted",
                "createdAt": "2024-03-01T09:00:00Z",
                "amount": 10.0
            })
        );
    }
}
