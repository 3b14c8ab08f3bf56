//! # Vendor Portal Domain Models
//!
//! Types shared by the vendor portal gateway and its list engine.
//!
//! ## Key Models
//!
//! - **VendorId**: vendor number in caller form, canonical form and SAP key form
//! - **SapRecord**: one loosely-typed row returned by the SAP OData service
//! - **EntitySet**: catalogue of the entity sets the portal reads
//! - **Typed views**: `VendorProfile`, `RfqLine`, `PurchaseOrder`, `GoodsReceipt`,
//!   `Invoice`, `PaymentAging` and `Memo`, built from a `SapRecord`
//!
//! ## Wire Formats
//!
//! - `sap_date` decodes `/Date(<millis>)/` values and renders chart labels
//! - `odata` unwraps response envelopes and builds request paths
//!
//! Field access never fails: absent text reads as `"N/A"`, absent numbers as
//! zero, undecodable dates as `None`.

pub mod entity;
pub mod finance;
pub mod odata;
pub mod procurement;
pub mod sap_date;
pub mod vendor;

pub use entity::{EntitySet, FieldAccess, FieldValue, SapRecord, MISSING_TEXT};
pub use finance::{Invoice, Memo, MemoKind, PaymentAging};
pub use procurement::{GoodsReceipt, PurchaseOrder, RfqLine};
pub use sap_date::OffsetPolicy;
pub use vendor::{to_canonical, to_sap_key, VendorId, VendorProfile, SAP_KEY_WIDTH};
