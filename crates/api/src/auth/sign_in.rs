use crate::{
    error::DocbookError,
    shared::{
        auth::{create_token, verify_password},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use docbook_api_structs::sign_in::*;
use docbook_domain::User;
use docbook_infra::DocbookContext;

pub async fn sign_in_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let body = body.0;
    let usecase = SignInUseCase {
        email: body.email,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.user, res.token)))
        .map_err(DocbookError::from)
}

pub struct SignInUseCase {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignInUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInUseCase")
            .field("email", &self.email)
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
    InvalidCredentials,
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCredentials => {
                Self::Unauthorized("Invalid email or password".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SignInUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "SignIn";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        let mut user = match ctx.repos.users.find_by_email(&self.email).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(UseCaseError::InvalidCredentials),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        if !verify_password(&self.password, &user.password_hash) {
            return Err(UseCaseError::InvalidCredentials);
        }

        // Replaces the previous token, which stops being accepted
        let token = create_token(&user, ctx).map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .users
            .set_token(&user.id, Some(&token))
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        user.token = Some(token.clone());

        Ok(UseCaseRes { user, token })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::auth::hash_password;
    use chrono::Utc;
    use docbook_domain::{Role, ID};
    use docbook_infra::setup_context;

    async fn setup_user(ctx: &DocbookContext) -> User {
        let user = User::new(
            "Jane".into(),
            &format!("{}@example.com", ID::new()),
            hash_password("secret password").unwrap(),
            Role::User,
            Utc::now(),
        );
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    #[actix_web::main]
    #[test]
    async fn signs_in_with_correct_password() {
        let ctx = setup_context().await.unwrap();
        let user = setup_user(&ctx).await;

        let mut usecase = SignInUseCase {
            email: user.email.to_uppercase(),
            password: "secret password".into(),
        };
        let first = usecase.execute(&ctx).await.unwrap();
        assert_eq!(first.user.id, user.id);

        let second = usecase.execute(&ctx).await.unwrap();
        assert_ne!(first.token, second.token);
        let stored = ctx.repos.users.find(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.token, Some(second.token));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_wrong_credentials() {
        let ctx = setup_context().await.unwrap();
        let user = setup_user(&ctx).await;

        let mut usecase = SignInUseCase {
            email: user.email.clone(),
            password: "wrong password".into(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidCredentials)
        ));

        let mut usecase = SignInUseCase {
            email: format!("{}@example.com", ID::new()),
            password: "secret password".into(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidCredentials)
        ));
    }
}
