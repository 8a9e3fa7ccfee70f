use crate::{
    error::DocbookError,
    shared::{
        auth::protect_route,
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::get_appointments_by_user::*;
use docbook_domain::{Appointment, Caller, ID};
use docbook_infra::DocbookContext;

pub async fn get_appointments_by_user_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetAppointmentsByUserUseCase {
        caller: user.caller(),
        user_id: Guard::against_malformed_id(path_params.into_inner().user_id)?,
        booked_only: false,
    };
    execute(usecase, &ctx)
        .await
        .map(|appointments| HttpResponse::Ok().json(APIResponse::new(appointments)))
        .map_err(DocbookError::from)
}

/// Appointments of a user, for that user or an admin. With `booked_only`
/// only the scheduled ones are returned.
#[derive(Debug)]
pub struct GetAppointmentsByUserUseCase {
    pub caller: Caller,
    pub user_id: ID,
    pub booked_only: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotAllowed(ID),
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotAllowed(id) => Self::Forbidden(format!(
                "Not allowed to list the appointments of the user with id: {}",
                id
            )),
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAppointmentsByUserUseCase {
    type Response = Vec<Appointment>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetAppointmentsByUser";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        if !self.caller.can_act_for(&self.user_id) {
            return Err(UseCaseError::NotAllowed(self.user_id.clone()));
        }
        match ctx.repos.users.find(&self.user_id).await {
            Ok(Some(_)) => (),
            Ok(None) => return Err(UseCaseError::UserNotFound(self.user_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        }

        let res = if self.booked_only {
            ctx.repos.appointments.find_booked_by_user(&self.user_id).await
        } else {
            ctx.repos.appointments.find_by_user(&self.user_id).await
        };
        res.map_err(|_| UseCaseError::StorageError)
    }
}
