pub mod dashboard;
pub mod finance;
pub mod health;
pub mod list_query;
pub mod login;
pub mod procurement;
pub mod profile;

pub use dashboard::*;
pub use finance::*;
pub use health::*;
pub use list_query::ListQuery;
pub use login::*;
pub use procurement::*;
pub use profile::*;

use serde_json::Value;
use vendor_portal_models::{odata, EntitySet};
use vendor_portal_utils::PortalResult;

use crate::AppState;

/// Rows of `set` whose `Lifnr` equals `lifnr`, which is sent as given.
pub(crate) async fn fetch_vendor_rows(
    state: &AppState,
    set: EntitySet,
    lifnr: &str,
) -> PortalResult<Vec<Value>> {
    let filter = odata::filter_eq("Lifnr", lifnr);
    let path = odata::collection_path(set, Some(&filter));
    state.sap.fetch_rows(set, &path).await
}
