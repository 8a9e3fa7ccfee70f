use crate::{
    error::DocbookError,
    shared::{
        auth::{protect_route, Permission},
        guard::Guard,
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::delete_appointment::*;
use docbook_domain::{Appointment, Caller, ID};
use docbook_infra::DocbookContext;

pub async fn delete_appointment_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteAppointmentUseCase {
        caller: user.caller(),
        appointment_id: Guard::against_malformed_id(path_params.into_inner().appointment_id)?,
    };
    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|appointment| HttpResponse::Ok().json(APIResponse::new(appointment)))
        .map_err(DocbookError::from)
}

#[derive(Debug)]
pub struct DeleteAppointmentUseCase {
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
impl UseCase for DeleteAppointmentUseCase {
    type Response = Appointment;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteAppointment";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.appointments.find(&self.appointment_id).await {
            Ok(Some(appointment)) if self.caller.can_act_for(&appointment.user_id) => (),
            Ok(_) => {
                return Err(UseCaseError::AppointmentNotFound(
                    self.appointment_id.clone(),
                ))
            }
            Err(_) => return Err(UseCaseError::StorageError),
        };

        match ctx.repos.appointments.delete(&self.appointment_id).await {
            Ok(Some(appointment)) => Ok(appointment),
            Ok(None) => Err(UseCaseError::AppointmentNotFound(
                self.appointment_id.clone(),
            )),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

impl PermissionBoundary for DeleteAppointmentUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::DeleteAppointment]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::appointment::test_helpers::*;
    use docbook_domain::Role;

    #[actix_web::main]
    #[test]
    async fn deleting_frees_the_slot() {
        let TestContext {
            ctx, user, doctor, ..
        } = setup().await;
        let appointment = book(&ctx, &doctor, &user, at(10, 0), 30).await;

        let mut usecase = DeleteAppointmentUseCase {
            caller: user.caller(),
            appointment_id: appointment.id.clone(),
        };
        let deleted = usecase.execute(&ctx).await.unwrap();
        assert_eq!(deleted.id, appointment.id);
        assert!(ctx.repos.appointments.find(&appointment.id).await.unwrap().is_none());

        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::AppointmentNotFound(_))));

        book(&ctx, &doctor, &user, at(10, 0), 30).await;
    }

    #[actix_web::main]
    #[test]
    async fn users_can_not_delete_others_appointments() {
        let TestContext {
            ctx, user, doctor, ..
        } = setup().await;
        let other = insert_user(&ctx, Role::User).await;
        let appointment = book(&ctx, &doctor, &other, at(10, 0), 30).await;

        let mut usecase = DeleteAppointmentUseCase {
            caller: user.caller(),
            appointment_id: appointment.id.clone(),
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::AppointmentNotFound(_))));
        assert!(ctx.repos.appointments.find(&appointment.id).await.unwrap().is_some());
    }
}
