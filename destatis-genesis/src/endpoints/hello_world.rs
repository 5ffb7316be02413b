use crate::client::{GenesisClient, Query};
use crate::error::Result;
use crate::models::{LoginCheck, WhoAmI};

/// `helloworld` section: checks that need no data access
#[derive(Debug, Clone, Copy)]
pub struct HelloWorld<'a> {
    client: &'a GenesisClient,
}

impl<'a> HelloWorld<'a> {
    pub(crate) fn new(client: &'a GenesisClient) -> Self {
        Self { client }
    }

    /// Echo the user agent and IP address the service sees
    ///
    /// No credentials are sent with this request.
    pub async fn who_am_i(&self) -> Result<WhoAmI> {
        self.client
            .get_json("/helloworld/whoami", Query::new(), false)
            .await
    }

    /// Check whether the configured credentials are accepted
    pub async fn login_check(&self) -> Result<LoginCheck> {
        self.client
            .get_json("/helloworld/logincheck", Query::new(), true)
            .await
    }
}
