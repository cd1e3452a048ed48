use serde::{Deserialize, Serialize};

/// Claims of the access tokens the HR portal issues. This service only verifies them.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub sub: String,
    pub role: u8, // role id
    pub exp: usize,
    #[serde(default)]
    pub jti: String,

    pub token_type: TokenType,
    /// Terminal user id, present only if the account belongs to an employee
    pub employee_id: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
