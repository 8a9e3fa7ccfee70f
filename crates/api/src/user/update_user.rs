use crate::{
    error::DocbookError,
    shared::{
        auth::{hash_password, protect_route, Permission},
        guard::Guard,
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::update_user::*;
use docbook_domain::{Caller, Role, User, ID};
use docbook_infra::{DocbookContext, UserStoreError};

pub async fn update_user_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;
    let path_params = path_params.into_inner();
    let body = body.0;

    if let Some(password) = &body.password {
        Guard::against_weak_password(password)?;
    }
    let usecase = UpdateUserUseCase {
        caller: user.caller(),
        user_id: Guard::against_malformed_id(path_params.user_id)?,
        full_name: body
            .full_name
            .map(|name| Guard::against_empty("fullName", name))
            .transpose()?,
        email: body
            .email
            .map(|email| Guard::against_invalid_email(&email))
            .transpose()?,
        phone: body.phone,
        password: body.password,
        role: body.role,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(DocbookError::from)
}

pub struct UpdateUserUseCase {
    pub caller: Caller,
    pub user_id: ID,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl std::fmt::Debug for UpdateUserUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserUseCase")
            .field("caller", &self.caller)
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::EmailTaken(email) => {
                Self::Conflict(format!("A user with the email: {} already exists", email))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateUser";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        if !self.caller.can_act_for(&self.user_id) {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }
        let mut user = match ctx.repos.users.find(&self.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(UseCaseError::UserNotFound(self.user_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        if let Some(full_name) = &self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(password) = &self.password {
            user.password_hash =
                hash_password(password).map_err(|_| UseCaseError::StorageError)?;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        user.updated = ctx.sys.now();

        match ctx.repos.users.save(&user).await {
            Ok(_) => Ok(user),
            Err(UserStoreError::EmailTaken(email)) => Err(UseCaseError::EmailTaken(email)),
            Err(UserStoreError::Storage(_)) => Err(UseCaseError::StorageError),
        }
    }
}

impl PermissionBoundary for UpdateUserUseCase {
    fn permissions(&self) -> Vec<Permission> {
        let mut permissions = vec![Permission::UpdateUser];
        if self.role.is_some() {
            permissions.push(Permission::UpdateUserRole);
        }
        permissions
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::auth::{verify_password, Policy};
    use crate::shared::usecase::UseCaseErrorContainer;
    use docbook_infra::setup_context;

    async fn insert_user(ctx: &DocbookContext, role: Role) -> User {
        let user = User::new(
            "Jane Doe".into(),
            &format!("{}@example.com", ID::new()),
            hash_password("secret password").unwrap(),
            role,
            ctx.sys.now(),
        );
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    fn usecase(caller: &User, user_id: &ID) -> UpdateUserUseCase {
        UpdateUserUseCase {
            caller: caller.caller(),
            user_id: user_id.clone(),
            full_name: None,
            email: None,
            phone: None,
            password: None,
            role: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn updates_own_profile() {
        let ctx = setup_context().await.unwrap();
        let user = insert_user(&ctx, Role::User).await;

        let mut update = usecase(&user, &user.id);
        update.full_name = Some("Jane Smith".into());
        update.phone = Some("+4798765432".into());
        update.password = Some("another password".into());
        let res = execute_with_policy(update, &Policy::for_role(user.role), &ctx)
            .await
            .unwrap();
        assert_eq!(res.full_name, "Jane Smith");
        assert_eq!(res.phone.as_deref(), Some("+4798765432"));

        let stored = ctx.repos.users.find(&user.id).await.unwrap().unwrap();
        assert!(verify_password("another password", &stored.password_hash));
    }

    #[actix_web::main]
    #[test]
    async fn users_can_not_update_others() {
        let ctx = setup_context().await.unwrap();
        let user = insert_user(&ctx, Role::User).await;
        let other = insert_user(&ctx, Role::User).await;

        let mut update = usecase(&user, &other.id);
        update.full_name = Some("Hacked".into());
        let res = update.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::UserNotFound(_))));
    }

    #[actix_web::main]
    #[test]
    async fn only_admins_change_roles() {
        let ctx = setup_context().await.unwrap();
        let user = insert_user(&ctx, Role::User).await;
        let admin = insert_user(&ctx, Role::Admin).await;

        let mut update = usecase(&user, &user.id);
        update.role = Some(Role::Admin);
        let res = execute_with_policy(update, &Policy::for_role(user.role), &ctx).await;
        assert!(matches!(res, Err(UseCaseErrorContainer::Unauthorized(_))));

        let mut update = usecase(&admin, &user.id);
        update.role = Some(Role::Admin);
        let res = execute_with_policy(update, &Policy::for_role(admin.role), &ctx)
            .await
            .unwrap();
        assert_eq!(res.role, Role::Admin);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_taken_email() {
        let ctx = setup_context().await.unwrap();
        let user = insert_user(&ctx, Role::User).await;
        let other = insert_user(&ctx, Role::User).await;

        let mut update = usecase(&user, &user.id);
        update.email = Some(other.email.clone());
        let res = update.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::EmailTaken(_))));
    }
}
