use crate::{
    error::DocbookError,
    shared::{
        auth::protect_route,
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::get_user::*;
use docbook_domain::{Caller, User, ID};
use docbook_infra::DocbookContext;

pub async fn get_user_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;
    let path_params = path_params.into_inner();

    let usecase = GetUserUseCase {
        caller: user.caller(),
        user_id: Guard::against_malformed_id(path_params.user_id)?,
    };
    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(DocbookError::from)
}

#[derive(Debug)]
pub struct GetUserUseCase {
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
impl UseCase for GetUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "GetUser";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        // Users can only look up themselves, admins everyone
        if !self.caller.can_act_for(&self.user_id) {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }
        match ctx.repos.users.find(&self.user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(UseCaseError::UserNotFound(self.user_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
