use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub mod receipt {
    use std::collections::BTreeMap;

    use chrono::{DateTime, Utc};

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Person {
        pub id: Uuid,
        pub name: String,
    }

    /// Allocation strategy of an item, as sent over the wire.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum SplitType {
        #[default]
        Unsplit,
        Individual,
        Equal,
        Unequal,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UnequalShare {
        pub person_id: Uuid,
        pub amount: f64,
    }

    /// A receipt line.
    ///
    /// Only the field matching `split_type` is read; the others are ignored
    /// when decoding and omitted when encoding.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReceiptItem {
        pub id: Uuid,
        #[serde(default)]
        pub name: String,
        pub price: f64,
        #[serde(default)]
        pub split_type: SplitType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub assigned_to: Option<Uuid>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub equal_split_people: Option<Vec<Uuid>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub unequal_split: Option<Vec<UnequalShare>>,
    }

    /// A published receipt summary.
    ///
    /// `totals` maps a person id to what they owe, unrounded.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SharedReceipt {
        pub id: Uuid,
        pub title: String,
        pub people: Vec<Person>,
        pub items: Vec<ReceiptItem>,
        pub totals: BTreeMap<Uuid, f64>,
        pub grand_total: f64,
        pub created_at: DateTime<Utc>,
    }
}

pub mod publish {
    use super::*;
    use crate::receipt::{Person, ReceiptItem};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PublishRequest {
        pub title: Option<String>,
        pub people: Vec<Person>,
        pub items: Vec<ReceiptItem>,
    }

    /// Where the published receipt can be read back.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PublishResponse {
        pub id: String,
        pub url: String,
    }
}

pub mod totals {
    use std::collections::BTreeMap;

    use super::*;
    use crate::receipt::{Person, ReceiptItem};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TotalsRequest {
        pub people: Vec<Person>,
        pub items: Vec<ReceiptItem>,
    }

    /// How much of an item's price its allocation covers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ItemStatus {
        Unallocated,
        Partial,
        Full,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TotalsResponse {
        /// Unrounded amount per person.
        pub totals: BTreeMap<Uuid, f64>,
        /// Amount per person rounded to cents.
        pub rounded_totals: BTreeMap<Uuid, f64>,
        pub grand_total: f64,
        /// Ids of the items nobody has been assigned yet.
        pub unsplit_items: Vec<Uuid>,
        pub statuses: BTreeMap<Uuid, ItemStatus>,
    }
}

pub mod extract {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExtractQuery {
        /// OCR language code, `eng` when missing.
        pub language: Option<String>,
    }

    /// An extracted line the user can still edit before adding it.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CandidateView {
        pub id: Uuid,
        pub name: String,
        pub price: String,
        pub is_editing: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExtractResponse {
        pub candidates: Vec<CandidateView>,
        pub message: String,
    }
}
