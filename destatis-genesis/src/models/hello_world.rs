use serde::{Deserialize, Serialize};

/// What the service saw of the calling client (`helloworld/whoami`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WhoAmI {
    /// User agent header of the request
    #[serde(rename = "User-Agent")]
    pub user_agent: String,
    /// IP address the request came from
    #[serde(rename = "User-IP")]
    pub user_ip: String,
}

/// Result of checking the configured credentials (`helloworld/logincheck`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginCheck {
    #[serde(rename = "Username")]
    pub username: String,
    /// Free text such as `"Sie wurden erfolgreich an- und abgemeldet!"`
    #[serde(rename = "Status")]
    pub status: String,
}

impl LoginCheck {
    /// Whether the status text reports a successful login
    pub fn is_successful(&self) -> bool {
        let status = self.status.to_lowercase();
        let negated = status.contains("nicht") || status.contains("not ") || status.contains("unsuccessful");
        !negated && (status.contains("erfolgreich") || status.contains("successful"))
    }
}
