use super::{check_working_hours, WorkingHours};
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
use chrono::{DateTime, Utc};
use docbook_api_structs::update_appointment::*;
use docbook_domain::{
    Appointment, AppointmentChanges, AppointmentStatus, Caller, ID, MAX_APPOINTMENT_DURATION,
};
use docbook_infra::{AppointmentStoreError, DocbookContext};

pub async fn update_appointment_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateAppointmentUseCase {
        caller: user.caller(),
        appointment_id: Guard::against_malformed_id(path_params.into_inner().appointment_id)?,
        start_time: body.start_ts,
        duration: body.duration,
        status: body.status,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|appointment| HttpResponse::Ok().json(APIResponse::new(appointment)))
        .map_err(DocbookError::from)
}

/// Moves, resizes or changes the status of an `Appointment`. Only the
/// given fields are written. The result is checked against the other
/// appointments of the doctor, on conflict the stored `Appointment` is
/// left as it was.
#[derive(Debug)]
pub struct UpdateAppointmentUseCase {
    pub caller: Caller,
    pub appointment_id: ID,
    pub start_time: Option<DateTime<Utc>>,
    pub duration: Option<i64>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug)]
pub enum UseCaseError {
    AppointmentNotFound(ID),
    InvalidDuration(i64),
    InvalidStartTime(DateTime<Utc>),
    InvalidStatusChange(String),
    OutsideWorkingHours,
    Conflict(Option<ID>),
    Unavailable(String),
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::AppointmentNotFound(id) => {
                Self::NotFound(format!("The appointment with id: {}, was not found.", id))
            }
            UseCaseError::InvalidDuration(duration) => Self::BadClientData(format!(
                "The duration: {} is not valid, it has to be between 1 and {} minutes",
                duration, MAX_APPOINTMENT_DURATION
            )),
            UseCaseError::InvalidStartTime(start_time) => Self::BadClientData(format!(
                "The start time: {} is not valid",
                start_time
            )),
            UseCaseError::InvalidStatusChange(reason) => Self::Conflict(reason),
            UseCaseError::OutsideWorkingHours => Self::BadClientData(
                "The appointment is outside of the working hours of the doctor".into(),
            ),
            UseCaseError::Conflict(Some(id)) => Self::Conflict(format!(
                "The requested time overlaps the appointment with id: {}",
                id
            )),
            UseCaseError::Conflict(None) => {
                Self::Conflict("The requested time overlaps an existing appointment".into())
            }
            UseCaseError::Unavailable(reason) => Self::Unavailable(reason),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<AppointmentStoreError> for UseCaseError {
    fn from(e: AppointmentStoreError) -> Self {
        match e {
            AppointmentStoreError::Conflict(id) => Self::Conflict(id),
            AppointmentStoreError::AppointmentNotFound(id) => Self::AppointmentNotFound(id),
            AppointmentStoreError::InvalidStatusChange(e) => Self::InvalidStatusChange(e.to_string()),
            AppointmentStoreError::Unavailable(reason) => Self::Unavailable(reason),
            AppointmentStoreError::DoctorNotFound(_) | AppointmentStoreError::Storage(_) => {
                Self::StorageError
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateAppointmentUseCase {
    type Response = Appointment;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateAppointment";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        if let Some(start_time) = self.start_time {
            if !Appointment::is_valid_start_time(&start_time) {
                return Err(UseCaseError::InvalidStartTime(start_time));
            }
        }
        if let Some(duration) = self.duration {
            if !Appointment::is_valid_duration(duration) {
                return Err(UseCaseError::InvalidDuration(duration));
            }
        }

        let appointment = match ctx.repos.appointments.find(&self.appointment_id).await {
            Ok(Some(appointment)) if self.caller.can_act_for(&appointment.user_id) => appointment,
            Ok(_) => {
                return Err(UseCaseError::AppointmentNotFound(
                    self.appointment_id.clone(),
                ))
            }
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let changes = AppointmentChanges {
            start_time: self.start_time,
            duration: self.duration,
            status: self.status,
            updated: ctx.sys.now(),
        };
        let preview = changes
            .apply(&appointment)
            .map_err(|e| UseCaseError::InvalidStatusChange(e.to_string()))?;
        if changes.moves() && preview.is_active() {
            match check_working_hours(&preview, ctx).await {
                Ok(WorkingHours::Covered) => (),
                Ok(WorkingHours::Outside) => return Err(UseCaseError::OutsideWorkingHours),
                Ok(WorkingHours::UnknownDoctor) => {
                    return Err(UseCaseError::AppointmentNotFound(appointment.id.clone()))
                }
                Err(_) => return Err(UseCaseError::StorageError),
            }
        }

        let updated = with_retry(ctx.config.booking_retry_attempts, || {
            ctx.repos.appointments.update(&appointment.id, &changes)
        })
        .await?;

        Ok(updated)
    }
}

impl PermissionBoundary for UpdateAppointmentUseCase {
    fn permissions(&self) -> Vec<Permission> {
        let mut permissions = vec![Permission::UpdateAppointment];
        if self.status == Some(AppointmentStatus::Completed) {
            permissions.push(Permission::CompleteAppointment);
        }
        permissions
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        appointment::test_helpers::*,
        shared::{auth::Policy, usecase::UseCaseErrorContainer},
    };
    use docbook_domain::{Role, User};

    fn usecase(caller: &User, appointment: &Appointment) -> UpdateAppointmentUseCase {
        UpdateAppointmentUseCase {
            caller: caller.caller(),
            appointment_id: appointment.id.clone(),
            start_time: None,
            duration: None,
            status: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn moves_appointment_to_free_slot() {
        let TestContext {
            ctx, user, doctor, ..
        } = setup().await;
        let appointment = book(&ctx, &doctor, &user, at(10, 0), 30).await;

        let mut update = usecase(&user, &appointment);
        update.start_time = Some(at(10, 15));
        update.duration = Some(45);
        let updated = update.execute(&ctx).await.unwrap();
        assert_eq!(updated.start_time, at(10, 15));
        assert_eq!(updated.end_time(), at(11, 0));
    }

    #[actix_web::main]
    #[test]
    async fn conflicting_update_leaves_appointment_unchanged() {
        let TestContext {
            ctx, user, doctor, ..
        } = setup().await;
        let first = book(&ctx, &doctor, &user, at(9, 0), 30).await;
        let second = book(&ctx, &doctor, &user, at(11, 0), 30).await;

        let mut update = usecase(&user, &second);
        update.start_time = Some(at(9, 15));
        let res = update.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::Conflict(Some(id))) if id == first.id));

        let stored = ctx.repos.appointments.find(&second.id).await.unwrap().unwrap();
        assert_eq!(stored.start_time, at(11, 0));
        assert_eq!(stored.duration, 30);
    }

    #[actix_web::main]
    #[test]
    async fn users_can_not_update_others_appointments() {
        let TestContext {
            ctx,
            user,
            admin,
            doctor,
        } = setup().await;
        let other = insert_user(&ctx, Role::User).await;
        let appointment = book(&ctx, &doctor, &other, at(10, 0), 30).await;

        let mut update = usecase(&user, &appointment);
        update.duration = Some(60);
        let res = update.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::AppointmentNotFound(_))));

        let mut update = usecase(&admin, &appointment);
        update.duration = Some(60);
        assert_eq!(update.execute(&ctx).await.unwrap().duration, 60);
    }

    #[actix_web::main]
    #[test]
    async fn only_admins_complete_appointments() {
        let TestContext {
            ctx,
            user,
            admin,
            doctor,
        } = setup().await;
        let appointment = book(&ctx, &doctor, &user, at(10, 0), 30).await;

        let mut update = usecase(&user, &appointment);
        update.status = Some(AppointmentStatus::Completed);
        let res = execute_with_policy(update, &Policy::for_role(user.role), &ctx).await;
        assert!(matches!(res, Err(UseCaseErrorContainer::Unauthorized(_))));

        let mut update = usecase(&admin, &appointment);
        update.status = Some(AppointmentStatus::Completed);
        let res = execute_with_policy(update, &Policy::for_role(admin.role), &ctx)
            .await
            .unwrap();
        assert_eq!(res.status, AppointmentStatus::Completed);
    }

    #[actix_web::main]
    #[test]
    async fn keeps_concurrent_cancellation() {
        let TestContext {
            ctx, user, doctor, ..
        } = setup().await;
        let appointment = book(&ctx, &doctor, &user, at(10, 0), 30).await;

        let mut update = usecase(&user, &appointment);
        update.start_time = Some(at(12, 0));
        // Cancelled between reading and writing the move
        ctx.repos
            .appointments
            .update(
                &appointment.id,
                &AppointmentChanges::status(AppointmentStatus::Cancelled, ctx.sys.now()),
            )
            .await
            .unwrap();
        let updated = update.execute(&ctx).await.unwrap();
        assert_eq!(updated.start_time, at(12, 0));
        assert_eq!(updated.status, AppointmentStatus::Cancelled);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_implausible_start_time() {
        let TestContext {
            ctx, user, doctor, ..
        } = setup().await;
        let appointment = book(&ctx, &doctor, &user, at(10, 0), 30).await;
        book(&ctx, &doctor, &user, at(11, 0), 30).await;

        let far_future: DateTime<Utc> = "+262142-12-31T23:59:00Z".parse().unwrap();
        let mut update = usecase(&user, &appointment);
        update.start_time = Some(far_future);
        let res = update.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::InvalidStartTime(t)) if t == far_future));

        let stored = ctx.repos.appointments.find(&appointment.id).await.unwrap().unwrap();
        assert_eq!(stored.start_time, at(10, 0));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_duration() {
        let TestContext {
            ctx, user, doctor, ..
        } = setup().await;
        let appointment = book(&ctx, &doctor, &user, at(10, 0), 30).await;

        let mut update = usecase(&user, &appointment);
        update.duration = Some(0);
        let res = update.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::InvalidDuration(0))));
    }
}
