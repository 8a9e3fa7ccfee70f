use crate::{
    error::DocbookError,
    shared::{
        auth::{protect_route, Permission},
        guard::Guard,
        retry::with_retry,
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::cancel_appointment::*;
use docbook_domain::{Appointment, AppointmentChanges, AppointmentStatus, Caller, ID};
use docbook_infra::{AppointmentStoreError, DocbookContext};

pub async fn cancel_appointment_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = CancelAppointmentUseCase {
        caller: user.caller(),
        appointment_id: Guard::against_malformed_id(path_params.into_inner().appointment_id)?,
    };
    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|appointment| HttpResponse::Ok().json(APIResponse::new(appointment)))
        .map_err(DocbookError::from)
}

/// Marks the `Appointment` as cancelled which frees its slot.
/// Cancelling twice is not an error.
#[derive(Debug)]
pub struct CancelAppointmentUseCase {
    pub caller: Caller,
    pub appointment_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    AppointmentNotFound(ID),
    AlreadyCompleted(ID),
    Unavailable(String),
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::AppointmentNotFound(id) => {
                Self::NotFound(format!("The appointment with id: {}, was not found.", id))
            }
            UseCaseError::AlreadyCompleted(id) => Self::Conflict(format!(
                "The appointment with id: {} is completed and can not be cancelled",
                id
            )),
            UseCaseError::Unavailable(reason) => Self::Unavailable(reason),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelAppointmentUseCase {
    type Response = Appointment;
    type Error = UseCaseError;

    const NAME: &'static str = "CancelAppointment";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        let appointment = match ctx.repos.appointments.find(&self.appointment_id).await {
            Ok(Some(appointment)) if self.caller.can_act_for(&appointment.user_id) => appointment,
            Ok(_) => {
                return Err(UseCaseError::AppointmentNotFound(
                    self.appointment_id.clone(),
                ))
            }
            Err(_) => return Err(UseCaseError::StorageError),
        };

        match appointment.status {
            AppointmentStatus::Cancelled => return Ok(appointment),
            AppointmentStatus::Completed => {
                return Err(UseCaseError::AlreadyCompleted(appointment.id))
            }
            AppointmentStatus::Scheduled => (),
        }

        // The store checks the status again, it might have been completed
        // in the meantime
        let changes = AppointmentChanges::status(AppointmentStatus::Cancelled, ctx.sys.now());
        with_retry(ctx.config.booking_retry_attempts, || {
            ctx.repos.appointments.update(&appointment.id, &changes)
        })
        .await
        .map_err(|e| match e {
            AppointmentStoreError::AppointmentNotFound(id) => UseCaseError::AppointmentNotFound(id),
            AppointmentStoreError::InvalidStatusChange(e) => UseCaseError::AlreadyCompleted(e.0),
            AppointmentStoreError::Unavailable(reason) => UseCaseError::Unavailable(reason),
            _ => UseCaseError::StorageError,
        })
    }
}

impl PermissionBoundary for CancelAppointmentUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CancelAppointment]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::appointment::test_helpers::*;
    use docbook_domain::{Role, User};

    fn usecase(caller: &User, appointment: &Appointment) -> CancelAppointmentUseCase {
        CancelAppointmentUseCase {
            caller: caller.caller(),
            appointment_id: appointment.id.clone(),
        }
    }

    #[actix_web::main]
    #[test]
    async fn cancelling_frees_the_slot() {
        let TestContext {
            ctx, user, doctor, ..
        } = setup().await;
        let appointment = book(&ctx, &doctor, &user, at(10, 0), 30).await;

        let cancelled = usecase(&user, &appointment).execute(&ctx).await.unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

        // Idempotent
        let again = usecase(&user, &appointment).execute(&ctx).await.unwrap();
        assert_eq!(again.status, AppointmentStatus::Cancelled);

        let booked = ctx
            .repos
            .appointments
            .find_booked_by_doctor(&doctor.id)
            .await
            .unwrap();
        assert!(booked.is_empty());
        book(&ctx, &doctor, &user, at(10, 0), 30).await;
    }

    #[actix_web::main]
    #[test]
    async fn completed_appointments_can_not_be_cancelled() {
        let TestContext {
            ctx, user, doctor, ..
        } = setup().await;
        let appointment = book(&ctx, &doctor, &user, at(10, 0), 30).await;
        ctx.repos
            .appointments
            .update(
                &appointment.id,
                &AppointmentChanges::status(AppointmentStatus::Completed, ctx.sys.now()),
            )
            .await
            .unwrap();

        let res = usecase(&user, &appointment).execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::AlreadyCompleted(_))));
    }

    #[actix_web::main]
    #[test]
    async fn users_can_not_cancel_others_appointments() {
        let TestContext {
            ctx,
            user,
            admin,
            doctor,
        } = setup().await;
        let other = insert_user(&ctx, Role::User).await;
        let appointment = book(&ctx, &doctor, &other, at(10, 0), 30).await;

        let res = usecase(&user, &appointment).execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::AppointmentNotFound(_))));
        assert!(usecase(&admin, &appointment).execute(&ctx).await.is_ok());
    }
}
