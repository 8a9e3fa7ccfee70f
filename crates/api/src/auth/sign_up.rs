use crate::{
    error::DocbookError,
    shared::{
        auth::{create_token, hash_password},
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use docbook_api_structs::sign_up::*;
use docbook_domain::{Role, User};
use docbook_infra::{DocbookContext, UserStoreError};

pub async fn sign_up_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let body = body.0;
    Guard::against_weak_password(&body.password)?;
    let usecase = SignUpUseCase {
        full_name: Guard::against_empty("fullName", body.full_name)?,
        email: Guard::against_invalid_email(&body.email)?,
        password: body.password,
        phone: body.phone,
        admin_secret_code: body.admin_secret_code,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.user, res.token)))
        .map_err(DocbookError::from)
}

pub struct SignUpUseCase {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub admin_secret_code: Option<String>,
}

// Keeps the password out of the logs
impl std::fmt::Debug for SignUpUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpUseCase")
            .field("email", &self.email)
            .field("admin", &self.admin_secret_code.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
    pub token: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidAdminSecretCode,
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidAdminSecretCode => {
                Self::Unauthorized("Invalid admin secret code provided".into())
            }
            UseCaseError::EmailTaken(email) => {
                Self::Conflict(format!("A user with the email: {} already exists", email))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SignUpUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "SignUp";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        let role = match &self.admin_secret_code {
            Some(code) if *code == ctx.config.admin_signup_secret_code => Role::Admin,
            Some(_) => return Err(UseCaseError::InvalidAdminSecretCode),
            None => Role::User,
        };
        let password_hash =
            hash_password(&self.password).map_err(|_| UseCaseError::StorageError)?;

        let mut user = User::new(
            self.full_name.clone(),
            &self.email,
            password_hash,
            role,
            ctx.sys.now(),
        );
        user.phone = self.phone.clone();
        let token = create_token(&user, ctx).map_err(|_| UseCaseError::StorageError)?;
        user.token = Some(token.clone());

        match ctx.repos.users.insert(&user).await {
            Ok(_) => Ok(UseCaseRes { user, token }),
            Err(UserStoreError::EmailTaken(email)) => Err(UseCaseError::EmailTaken(email)),
            Err(UserStoreError::Storage(_)) => Err(UseCaseError::StorageError),
        }
    }
}
