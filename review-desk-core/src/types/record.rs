//! Review record types
//!
//! Raw documents come back from the store as `StoredDocument` (id + JSON
//! fields). They are normalized exactly once, at load time, into a
//! `ReviewRecord` with a uniform envelope (status, timestamps, search fields)
//! and typed per-category details.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::types::RecordCategory;

/// A document as returned by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Opaque id, unique within its collection
    pub id: String,
    /// Remaining document fields
    pub data: Value,
}

impl StoredDocument {
    #[must_use]
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// Fields matched by free-text search, resolved once during normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFields {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub service_type: Option<String>,
}

/// Normalized record held by the panel controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: String,
    pub category: RecordCategory,
    /// Raw stored status; `None` is pending-equivalent
    pub status: Option<String>,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    pub search: SearchFields,
    pub details: RecordDetails,
}

/// Fields common to every stored document
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "timestamp", with = "crate::utils::datetime")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    updated_at: Option<DateTime<Utc>>,
}

impl ReviewRecord {
    /// Normalize a stored document of the given category.
    pub fn from_document(category: RecordCategory, doc: StoredDocument) -> CoreResult<Self> {
        let envelope: Envelope = serde_json::from_value(doc.data.clone()).map_err(|e| {
            CoreError::SerializationError(format!("{category} {}: {e}", doc.id))
        })?;
        let details = RecordDetails::from_value(category, doc.data)
            .map_err(|e| CoreError::SerializationError(format!("{category} {}: {e}", doc.id)))?;

        Ok(Self {
            id: doc.id,
            category,
            status: envelope.status,
            created_at: envelope.created_at,
            updated_at: envelope.updated_at,
            search: details.search_fields(),
            details,
        })
    }

    /// Copy of this record carrying a new status and update time
    #[must_use]
    pub fn with_status(&self, status: &str, updated_at: DateTime<Utc>) -> Self {
        Self {
            status: Some(status.to_string()),
            updated_at: Some(updated_at),
            ..self.clone()
        }
    }
}

/// Category-specific record fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RecordDetails {
    User(UserDetails),
    ConsultantApplication(ConsultantApplicationDetails),
    ConsultationBooking(BookingDetails),
    SupplierDevice(SupplierDeviceDetails),
    Order(OrderDetails),
    Feedback(FeedbackDetails),
    FeatureSuggestion(FeatureSuggestionDetails),
}

impl RecordDetails {
    fn from_value(category: RecordCategory, value: Value) -> serde_json::Result<Self> {
        Ok(match category {
            RecordCategory::User => Self::User(serde_json::from_value(value)?),
            RecordCategory::ConsultantApplication => {
                Self::ConsultantApplication(serde_json::from_value(value)?)
            }
            RecordCategory::ConsultationBooking => {
                Self::ConsultationBooking(serde_json::from_value(value)?)
            }
            RecordCategory::SupplierDevice => Self::SupplierDevice(serde_json::from_value(value)?),
            RecordCategory::Order => Self::Order(serde_json::from_value(value)?),
            RecordCategory::Feedback => Self::Feedback(serde_json::from_value(value)?),
            RecordCategory::FeatureSuggestion => {
                Self::FeatureSuggestion(serde_json::from_value(value)?)
            }
        })
    }

    fn search_fields(&self) -> SearchFields {
        match self {
            Self::User(u) => SearchFields {
                display_name: u.full_name(),
                email: u.email.clone(),
                service_type: None,
            },
            Self::ConsultantApplication(a) => SearchFields {
                display_name: a.full_name.clone(),
                email: a.email.clone(),
                service_type: a.specialization.clone(),
            },
            Self::ConsultationBooking(b) => SearchFields {
                display_name: first_non_empty(&[&b.client_name, &b.name]),
                email: b.email.clone(),
                service_type: first_non_empty(&[&b.service_type, &b.consultation_type]),
            },
            Self::SupplierDevice(d) => SearchFields {
                display_name: d.device_name.clone(),
                email: None,
                service_type: d.category.clone(),
            },
            Self::Order(o) => SearchFields {
                display_name: o.full_name.clone(),
                email: o.email.clone(),
                service_type: None,
            },
            Self::Feedback(f) => SearchFields {
                display_name: f.name.clone(),
                email: f.email.clone(),
                service_type: None,
            },
            Self::FeatureSuggestion(s) => SearchFields {
                display_name: s.name.clone(),
                email: s.email.clone(),
                service_type: None,
            },
        }
    }
}

/// First value that is present and non-empty
fn first_non_empty(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .find_map(|c| c.as_deref().filter(|s| !s.is_empty()))
        .map(str::to_string)
}

/// Accepts a number or a numeric string; anything else reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts a string, number or bool (stringified); anything else reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Nested object of the expected shape; anything else reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|value| {
        serde_json::from_value(value)
            .map_err(|e| log::debug!("Ignoring malformed nested field: {e}"))
            .ok()
    }))
}

/// Order lines; a missing, null or non-array value is an empty order, and
/// entries that are not objects are skipped.
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<OrderItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(entries)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            serde_json::from_value(entry)
                .map_err(|e| log::debug!("Skipping malformed order item: {e}"))
                .ok()
        })
        .collect())
}

/// Role whose signup carries supplier documents
pub const SUPPLIER_ROLE: &str = "Researcher/Supplier";
/// Role whose signup carries ID / certificate documents
pub const OTHER_ROLE: &str = "Other";

/// A named link to an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLink {
    pub title: &'static str,
    pub name: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub verification_file_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub verification_file_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub supplier_documents: Option<SupplierDocuments>,
    #[serde(deserialize_with = "lenient")]
    pub other_documents: Option<OtherDocuments>,
}

impl UserDetails {
    /// "First Last", skipping missing parts
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.first_name, &self.last_name]
            .into_iter()
            .filter_map(|p| p.as_deref().filter(|s| !s.is_empty()))
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Uploaded documents relevant to the user's role
    #[must_use]
    pub fn relevant_documents(&self) -> Vec<DocumentLink> {
        match self.role.as_deref() {
            Some(SUPPLIER_ROLE) => self
                .supplier_documents
                .as_ref()
                .map(SupplierDocuments::links)
                .unwrap_or_default(),
            Some(OTHER_ROLE) => self
                .other_documents
                .as_ref()
                .map(OtherDocuments::links)
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SupplierDocuments {
    #[serde(deserialize_with = "lenient_string")]
    pub company_registration_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub company_registration_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub international_cert_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub international_cert_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub import_license_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub import_license_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub medi_global_agreement_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub medi_global_agreement_url: Option<String>,
}

impl SupplierDocuments {
    fn links(&self) -> Vec<DocumentLink> {
        collect_links(&[
            (
                "Company Registration Certificate",
                &self.company_registration_name,
                &self.company_registration_url,
            ),
            (
                "International Certificate",
                &self.international_cert_name,
                &self.international_cert_url,
            ),
            (
                "Import License",
                &self.import_license_name,
                &self.import_license_url,
            ),
            (
                "MediGlobal Agreement",
                &self.medi_global_agreement_name,
                &self.medi_global_agreement_url,
            ),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OtherDocuments {
    #[serde(deserialize_with = "lenient_string")]
    pub id_doc_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub id_doc_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub certificate_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub certificate_url: Option<String>,
}

impl OtherDocuments {
    fn links(&self) -> Vec<DocumentLink> {
        collect_links(&[
            ("ID Document", &self.id_doc_name, &self.id_doc_url),
            ("Certificate", &self.certificate_name, &self.certificate_url),
        ])
    }
}

fn collect_links(entries: &[(&'static str, &Option<String>, &Option<String>)]) -> Vec<DocumentLink> {
    entries
        .iter()
        .filter_map(|&(title, name, url)| {
            url.as_deref()
                .filter(|u| !u.is_empty())
                .map(|url| DocumentLink {
                    title,
                    name: name.clone(),
                    url: url.to_string(),
                })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsultantApplicationDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub specialization: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub short_bio: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub membership_fee: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub resume_cv_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub client_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub service_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub consultation_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub engineer_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub engineer_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub specialty: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub preferred_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub preferred_time: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub requirements: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SupplierDeviceDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub device_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
    /// Listing tier, typically `basic` or `premium`; not enforced
    #[serde(rename = "type")]
    #[serde(deserialize_with = "lenient_string")]
    pub listing_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub specifications: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub detailed_specifications: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub quantity: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub delivery_method: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub payment_method: Option<String>,
    #[serde(deserialize_with = "lenient_items")]
    pub items: Vec<OrderItem>,
    #[serde(deserialize_with = "lenient_number")]
    pub subtotal: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub shipping: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub tax: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub feedback: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureSuggestionDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub suggestion: Option<String>,
}
