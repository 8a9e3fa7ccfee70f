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
use docbook_api_structs::create_appointment::*;
use docbook_domain::{Appointment, Caller, ID, MAX_APPOINTMENT_DURATION};
use docbook_infra::{AppointmentStoreError, DocbookContext};

pub async fn create_appointment_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let user_id = match body.user_id {
        Some(user_id) => Guard::against_malformed_id(user_id)?,
        None => user.id.clone(),
    };
    let usecase = CreateAppointmentUseCase {
        caller: user.caller(),
        doctor_id: Guard::against_malformed_id(body.doctor_id)?,
        user_id,
        start_time: body
            .start_ts
            .ok_or_else(|| DocbookError::BadClientData("The field: startTs is required".into()))?,
        duration: body
            .duration
            .ok_or_else(|| DocbookError::BadClientData("The field: duration is required".into()))?,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|appointment| HttpResponse::Created().json(APIResponse::new(appointment)))
        .map_err(DocbookError::from)
}

/// Books the slot `[start_time, start_time + duration)` with the doctor
/// unless it overlaps another active appointment of that doctor
#[derive(Debug)]
pub struct CreateAppointmentUseCase {
    pub caller: Caller,
    pub doctor_id: ID,
    pub user_id: ID,
    pub start_time: DateTime<Utc>,
    /// Minutes
    pub duration: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidDuration(i64),
    InvalidStartTime(DateTime<Utc>),
    NotAllowedToBookForOthers,
    UserNotFound(ID),
    DoctorNotFound(ID),
    OutsideWorkingHours,
    Conflict(Option<ID>),
    Unavailable(String),
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDuration(duration) => Self::BadClientData(format!(
                "The duration: {} is not valid, it has to be between 1 and {} minutes",
                duration, MAX_APPOINTMENT_DURATION
            )),
            UseCaseError::InvalidStartTime(start_time) => Self::BadClientData(format!(
                "The start time: {} is not valid",
                start_time
            )),
            UseCaseError::NotAllowedToBookForOthers => {
                Self::Forbidden("Users can only book appointments for themselves".into())
            }
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::DoctorNotFound(id) => {
                Self::NotFound(format!("The doctor with id: {}, was not found.", id))
            }
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
            AppointmentStoreError::DoctorNotFound(id) => Self::DoctorNotFound(id),
            AppointmentStoreError::Unavailable(reason) => Self::Unavailable(reason),
            AppointmentStoreError::AppointmentNotFound(_)
            | AppointmentStoreError::InvalidStatusChange(_)
            | AppointmentStoreError::Storage(_) => {
                Self::StorageError
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAppointmentUseCase {
    type Response = Appointment;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateAppointment";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        if !Appointment::is_valid_duration(self.duration) {
            return Err(UseCaseError::InvalidDuration(self.duration));
        }
        if !Appointment::is_valid_start_time(&self.start_time) {
            return Err(UseCaseError::InvalidStartTime(self.start_time));
        }
        if !self.caller.can_act_for(&self.user_id) {
            return Err(UseCaseError::NotAllowedToBookForOthers);
        }
        match ctx.repos.users.find(&self.user_id).await {
            Ok(Some(_)) => (),
            Ok(None) => return Err(UseCaseError::UserNotFound(self.user_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        }

        let appointment = Appointment::new(
            self.doctor_id.clone(),
            self.user_id.clone(),
            self.start_time,
            self.duration,
            ctx.sys.now(),
        );
        match check_working_hours(&appointment, ctx).await {
            Ok(WorkingHours::Covered) => (),
            Ok(WorkingHours::Outside) => return Err(UseCaseError::OutsideWorkingHours),
            Ok(WorkingHours::UnknownDoctor) => {
                return Err(UseCaseError::DoctorNotFound(self.doctor_id.clone()))
            }
            Err(_) => return Err(UseCaseError::StorageError),
        }

        with_retry(ctx.config.booking_retry_attempts, || {
            ctx.repos.appointments.reserve(&appointment)
        })
        .await?;

        Ok(appointment)
    }
}

impl PermissionBoundary for CreateAppointmentUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CreateAppointment]
    }
}
