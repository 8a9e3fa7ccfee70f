use chrono::Duration;
use docbook_domain::{Role, User, ID};
use docbook_infra::DocbookContext;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const TOKEN_ISSUER: &str = "docbook";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the `User` the token was issued to
    pub sub: String,
    pub role: Role,
    /// Issued at (as UTC timestamp)
    pub iat: i64,
    /// Expiration time (as UTC timestamp)
    pub exp: i64,
    pub iss: String,
    /// Makes every issued token unique
    pub jti: String,
}

/// Issues a new session token for the `User`
pub fn create_token(user: &User, ctx: &DocbookContext) -> anyhow::Result<String> {
    let now = ctx.sys.now();
    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role,
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ctx.config.jwt_expires_in_secs)).timestamp(),
        iss: TOKEN_ISSUER.to_string(),
        jti: ID::new().to_string(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(ctx.config.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verifies the signature, expiry and issuer of the token
pub fn decode_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[TOKEN_ISSUER]);
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?
    .claims;
    Ok(claims)
}
