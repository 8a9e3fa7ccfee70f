use crate::{
    error::DocbookError,
    shared::{
        auth::protect_route,
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::get_appointment::*;
use docbook_domain::{Appointment, Caller, ID};
use docbook_infra::DocbookContext;

pub async fn get_appointment_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetAppointmentUseCase {
        caller: user.caller(),
        appointment_id: Guard::against_malformed_id(path_params.into_inner().appointment_id)?,
    };
    execute(usecase, &ctx)
        .await
        .map(|appointment| HttpResponse::Ok().json(APIResponse::new(appointment)))
        .map_err(DocbookError::from)
}

#[derive(Debug)]
pub struct GetAppointmentUseCase {
    pub caller: Caller,
    pub appointment_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    AppointmentNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::AppointmentNotFound(id) => {
                Self::NotFound(format!("The appointment with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAppointmentUseCase {
    type Response = Appointment;
    type Error = UseCaseError;

    const NAME: &'static str = "GetAppointment";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.appointments.find(&self.appointment_id).await {
            Ok(Some(appointment)) if self.caller.can_act_for(&appointment.user_id) => {
                Ok(appointment)
            }
            Ok(_) => Err(UseCaseError::AppointmentNotFound(
                self.appointment_id.clone(),
            )),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::appointment::test_helpers::*;
    use docbook_domain::Role;

    #[actix_web::main]
    #[test]
    async fn only_owner_and_admins_see_appointment() {
        let TestContext {
            ctx,
            user,
            admin,
            doctor,
        } = setup().await;
        let appointment = book(&ctx, &doctor, &user, at(10, 0), 30).await;
        let other = insert_user(&ctx, Role::User).await;

        for caller in [&user, &admin] {
            let mut usecase = GetAppointmentUseCase {
                caller: caller.caller(),
                appointment_id: appointment.id.clone(),
            };
            assert_eq!(usecase.execute(&ctx).await.unwrap().id, appointment.id);
        }

        let mut usecase = GetAppointmentUseCase {
            caller: other.caller(),
            appointment_id: appointment.id.clone(),
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::AppointmentNotFound(_))));
    }
}
