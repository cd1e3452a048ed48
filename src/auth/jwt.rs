use crate::models::{Claims, TokenType};
use jsonwebtoken::{DecodingKey, Validation, decode};

/// Decodes and checks an access token; refresh tokens are refused.
pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, String> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())?;

    if claims.token_type != TokenType::Access {
        return Err("not an access token".to_string());
    }
    Ok(claims)
}

#[cfg(test)]
pub(crate) fn sign_for_tests(
    role: u8,
    employee_id: Option<u32>,
    token_type: TokenType,
    secret: &str,
) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;
    let claims = Claims {
        user_id: 1,
        sub: "tester".into(),
        role,
        exp: now + 600,
        jti: "test".into(),
        token_type,
        employee_id,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_access_tokens() {
        let token = sign_for_tests(2, None, TokenType::Access, "secret");
        let claims = verify_access_token(&token, "secret").unwrap();
        assert_eq!(claims.role, 2);
        assert_eq!(claims.sub, "tester");
    }

    #[test]
    fn rejects_refresh_tokens_and_wrong_secret() {
        let refresh = sign_for_tests(2, None, TokenType::Refresh, "secret");
        assert!(verify_access_token(&refresh, "secret").is_err());

        let access = sign_for_tests(2, None, TokenType::Access, "secret");
        assert!(verify_access_token(&access, "other").is_err());
    }
}
