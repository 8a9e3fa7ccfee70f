use crate::{
    error::DocbookError,
    shared::{
        auth::{hash_password, protect_route, Permission},
        guard::Guard,
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::create_user::*;
use docbook_domain::{Role, User};
use docbook_infra::{DocbookContext, UserStoreError};

pub async fn create_user_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (_, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    Guard::against_weak_password(&body.password)?;
    let usecase = CreateUserUseCase {
        full_name: Guard::against_empty("fullName", body.full_name)?,
        email: Guard::against_invalid_email(&body.email)?,
        password: body.password,
        phone: body.phone,
        role: body.role.unwrap_or_default(),
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(DocbookError::from)
}

pub struct CreateUserUseCase {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Role,
}

impl std::fmt::Debug for CreateUserUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserUseCase")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmailTaken(email) => {
                Self::Conflict(format!("A user with the email: {} already exists", email))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        let password_hash =
            hash_password(&self.password).map_err(|_| UseCaseError::StorageError)?;
        let mut user = User::new(
            self.full_name.clone(),
            &self.email,
            password_hash,
            self.role,
            ctx.sys.now(),
        );
        user.phone = self.phone.clone();

        match ctx.repos.users.insert(&user).await {
            Ok(_) => Ok(user),
            Err(UserStoreError::EmailTaken(email)) => Err(UseCaseError::EmailTaken(email)),
            Err(UserStoreError::Storage(_)) => Err(UseCaseError::StorageError),
        }
    }
}

impl PermissionBoundary for CreateUserUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CreateUser]
    }
}
