use crate::client::{GenesisClient, Query};
use crate::enums::ObjectStorage;
use crate::error::Result;
use crate::models::ProfileResponse;
use crate::validate;

/// `profile` section: maintenance of the account
#[derive(Debug, Clone, Copy)]
pub struct Profile<'a> {
    client: &'a GenesisClient,
}

impl<'a> Profile<'a> {
    pub(crate) fn new(client: &'a GenesisClient) -> Self {
        Self { client }
    }

    /// Change the password of the configured account
    ///
    /// The client keeps using the old password afterwards; build a new one with
    /// updated [`Credentials`](crate::Credentials) once this succeeds.
    pub async fn password(&self, new_password: &str) -> Result<ProfileResponse> {
        let new_password = validate::password("new_password", new_password)?;
        let query = Query::new()
            .set("new", new_password)
            .set("repeat", new_password);
        self.client.get_json("/profile/password", query, true).await
    }

    /// Delete a result table stored for the account
    pub async fn remove_result(&self, name: &str, area: ObjectStorage) -> Result<ProfileResponse> {
        let name = validate::object_name(name)?;
        let query = Query::new().set("name", name).set("area", area);
        self.client.get_json("/profile/removeResult", query, true).await
    }
}
