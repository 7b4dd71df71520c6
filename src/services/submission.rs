//! User-data submission: issue an id and persist the address and browser
//! metadata records.

use tracing::info;

use crate::api::{Address, BrowserMeta, UserId};
use crate::services::resolver::{ResolveError, ResolveResult};
use crate::store::RecordStore;

fn validate(address: &Address) -> ResolveResult<()> {
    if address.street.trim().is_empty() {
        return Err(ResolveError::input("street must not be empty"));
    }
    if address.city.trim().is_empty() {
        return Err(ResolveError::input("city must not be empty"));
    }
    if address.postal_code.trim().is_empty() {
        return Err(ResolveError::input("postal code must not be empty"));
    }
    Ok(())
}

/// Persist a user submission and return the issued user id.
///
/// The address record is written first; both appends must succeed for the
/// submission to count.
pub async fn submit_user_data(
    store: &dyn RecordStore,
    address: &Address,
    browser: &BrowserMeta,
    client_ip: &str,
) -> ResolveResult<UserId> {
    validate(address)?;

    let user_id = UserId::random();
    store.append_address(&user_id, address).await?;
    store
        .append_browser_meta(&user_id, browser, client_ip)
        .await?;

    info!(user = %user_id, postal_code = %address.postal_code, "stored user submission");
    Ok(user_id)
}
