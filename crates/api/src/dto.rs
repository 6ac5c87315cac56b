//! Request/response payload shapes (`spec.md` §4.1, §6).
//!
//! Every request body carries `Ticks`; every response carries
//! `ResponseCode` + `Ticks` plus operation-specific fields. The source
//! threads both through a shared base accessed via an interface
//! (`spec.md` §9 Design Notes); here that's just two fields on every type,
//! with [`vql_codec::TicksField`] implemented once per request shape.

use serde::{Deserialize, Serialize};
use vql_codec::TicksField;

macro_rules! ticks_field {
    ($ty:ty) => {
        impl TicksField for $ty {
            fn ticks(&self) -> i64 {
                self.ticks
            }
        }
    };
}

// ---- /new ------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(rename = "Ticks")]
    pub ticks: i64,
    #[serde(rename = "IdentifierType")]
    pub identifier_type: String,
    #[serde(rename = "PlatformType")]
    pub platform_type: String,
    #[serde(rename = "Identifier")]
    pub identifier: String,
    /// Base64 HMAC witness (`spec.md` §4.1 "the request must supply
    /// `verify` as the `Seed` field").
    #[serde(rename = "Seed")]
    pub seed: String,
}
ticks_field!(CreateRequest);

#[derive(Debug, Serialize, Default)]
pub struct CreateResponseBody {
    #[serde(rename = "PrivateCode")]
    pub private_code: String,
    #[serde(rename = "SessionId")]
    pub session_id: String,
}

// ---- /logon ------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LogonRequest {
    #[serde(rename = "Ticks")]
    pub ticks: i64,
    #[serde(rename = "PrivateCode")]
    pub private_code: String,
}
ticks_field!(LogonRequest);

#[derive(Debug, Serialize, Default)]
pub struct LogonResponseBody {
    #[serde(rename = "SessionId")]
    pub session_id: String,
}

// ---- /on/queue (enqueue) ------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct EnqueueRequest {
    #[serde(rename = "Ticks")]
    pub ticks: i64,
    #[serde(rename = "VendorCode")]
    pub vendor_code: String,
    #[serde(rename = "QueueCode")]
    pub queue_code: String,
}
ticks_field!(EnqueueRequest);

#[derive(Debug, Serialize, Default)]
pub struct EnqueueResponseBody {
    #[serde(rename = "VendorName")]
    pub vendor_name: String,
    #[serde(rename = "VendorCaption")]
    pub vendor_caption: String,
    #[serde(rename = "KeyCodePrefix")]
    pub key_code_prefix: String,
    #[serde(rename = "KeyCodeSuffix")]
    pub key_code_suffix: String,
    #[serde(rename = "PersonsWaitingBefore")]
    pub persons_waiting_before: i64,
    #[serde(rename = "TotalWaiting")]
    pub total_waiting: i64,
}

// ---- GET /on/queue/:vendorCode/:queueCode (show queue) ------------------------

#[derive(Debug, Serialize, Default)]
pub struct ShowQueueResponseBody {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "PersonsWaitingBefore")]
    pub persons_waiting_before: Option<i64>,
    #[serde(rename = "TotalWaiting")]
    pub total_waiting: Option<i64>,
}

// ---- /on/dequeue (consumer cancel) --------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    #[serde(rename = "Ticks")]
    pub ticks: i64,
    #[serde(rename = "VendorCode")]
    pub vendor_code: String,
    #[serde(rename = "QueueCode")]
    pub queue_code: String,
    #[serde(rename = "KeyCodePrefix")]
    pub key_code_prefix: String,
}
ticks_field!(CancelRequest);

#[derive(Debug, Serialize, Default)]
pub struct UpdatedResponseBody {
    #[serde(rename = "Updated")]
    pub updated: bool,
}

// ---- /on/vendor/upgrade --------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UpgradeRequest {
    #[serde(rename = "Ticks")]
    pub ticks: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Caption")]
    pub caption: String,
    #[serde(rename = "RequireAdmit")]
    pub require_admit: bool,
}
ticks_field!(UpgradeRequest);

#[derive(Debug, Serialize, Default)]
pub struct UpgradeResponseBody {
    #[serde(rename = "VendorCode")]
    pub vendor_code: String,
    #[serde(rename = "QueueCode")]
    pub queue_code: String,
}

// ---- /on/vendor/queue/new (reset / rename) -------------------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateVendorRequest {
    #[serde(rename = "Ticks")]
    pub ticks: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Caption")]
    pub caption: String,
    #[serde(rename = "RequireInitQueue")]
    pub require_init_queue: bool,
}
ticks_field!(UpdateVendorRequest);

#[derive(Debug, Serialize, Default)]
pub struct UpdateVendorResponseBody {
    #[serde(rename = "QueueCode")]
    pub queue_code: Option<String>,
    #[serde(rename = "ResetCount")]
    pub reset_count: Option<i64>,
}

// ---- /on/vendor/queue/dummy -----------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DummyRequest {
    #[serde(rename = "Ticks")]
    pub ticks: i64,
    #[serde(rename = "QueueCode")]
    pub queue_code: String,
}
ticks_field!(DummyRequest);

// ---- GET /on/vendor/manage/:queueCode/:page -------------------------------------

#[derive(Debug, Serialize)]
pub struct ManageEntryBody {
    #[serde(rename = "KeyCodePrefix")]
    pub key_code_prefix: String,
    #[serde(rename = "KeyCodeSuffix")]
    pub key_code_suffix: String,
    #[serde(rename = "Status")]
    pub status: String,
}

#[derive(Debug, Serialize, Default)]
pub struct ManageResponseBody {
    #[serde(rename = "Entries")]
    pub entries: Vec<ManageEntryBody>,
    #[serde(rename = "Total")]
    pub total: i64,
    #[serde(rename = "QueingTotal")]
    pub queuing_total: i64,
}

// ---- /on/vendor/dequeue -----------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VendorDequeueRequest {
    #[serde(rename = "Ticks")]
    pub ticks: i64,
    #[serde(rename = "Force")]
    pub force: bool,
    #[serde(rename = "KeyCodePrefix")]
    pub key_code_prefix: String,
    #[serde(rename = "KeyCodeSuffix")]
    pub key_code_suffix: Option<String>,
}
ticks_field!(VendorDequeueRequest);

// ---- DELETE /on/priv/vendor --------------------------------------------------------

/// No target tenant field: `DropVendor` always acts on the authenticated
/// caller's own resolved `uid` (`spec.md` §9 Open Questions;
/// `original_source/internal/routes/priv/priv.go` drops `authCtx.Uid`, not
/// a caller-supplied id).
#[derive(Debug, Deserialize)]
pub struct DropVendorRequest {
    #[serde(rename = "Ticks")]
    pub ticks: i64,
}
ticks_field!(DropVendorRequest);

#[derive(Debug, Serialize, Default)]
pub struct EmptyBody {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_maps_wire_field_names() {
        let json = r#"{"Ticks":1,"IdentifierType":"phone","PlatformType":"Windows","Identifier":"id","Seed":"c2VlZA=="}"#;
        let parsed: CreateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.ticks, 1);
        assert_eq!(parsed.identifier, "id");
    }
}
