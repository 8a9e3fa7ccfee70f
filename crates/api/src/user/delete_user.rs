use crate::{
    error::DocbookError,
    shared::{
        auth::{protect_route, Permission},
        guard::Guard,
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::delete_user::*;
use docbook_domain::{Caller, User, ID};
use docbook_infra::DocbookContext;

pub async fn delete_user_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;
    let path_params = path_params.into_inner();

    let usecase = DeleteUserUseCase {
        caller: user.caller(),
        user_id: Guard::against_malformed_id(path_params.user_id)?,
    };
    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(DocbookError::from)
}

/// Deletes the `User` and every `Appointment` it has
#[derive(Debug)]
pub struct DeleteUserUseCase {
    pub caller: Caller,
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteUser";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        if !self.caller.can_act_for(&self.user_id) {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }
        match ctx.repos.users.delete(&self.user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(UseCaseError::UserNotFound(self.user_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

impl PermissionBoundary for DeleteUserUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::DeleteUser]
    }
}
