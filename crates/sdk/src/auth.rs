use crate::{APIResponse, BaseClient};
use docbook_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthClient {
    base: Arc<BaseClient>,
}

pub type SignUpInput = sign_up::RequestBody;
pub type SignInInput = sign_in::RequestBody;

impl AuthClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn sign_up(&self, input: SignUpInput) -> APIResponse<sign_up::APIResponse> {
        self.base
            .post(input, "auth/signup".into(), StatusCode::CREATED)
            .await
    }

    pub async fn sign_in(&self, input: SignInInput) -> APIResponse<sign_in::APIResponse> {
        self.base
            .post(input, "auth/signin".into(), StatusCode::OK)
            .await
    }
}
