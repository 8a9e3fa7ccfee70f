use crate::{
    error::DocbookError,
    shared::{
        auth::{protect_route, Permission},
        guard::Guard,
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::get_appointments_by_doctor::*;
use docbook_domain::{Appointment, ID};
use docbook_infra::DocbookContext;

pub async fn get_appointments_by_doctor_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (_, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetAppointmentsByDoctorUseCase {
        doctor_id: Guard::against_malformed_id(path_params.into_inner().doctor_id)?,
    };
    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|appointments| HttpResponse::Ok().json(APIResponse::new(appointments)))
        .map_err(DocbookError::from)
}

/// Every `Appointment` of the doctor, whatever the status
#[derive(Debug)]
pub struct GetAppointmentsByDoctorUseCase {
    pub doctor_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    DoctorNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::DoctorNotFound(id) => {
                Self::NotFound(format!("The doctor with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAppointmentsByDoctorUseCase {
    type Response = Vec<Appointment>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetAppointmentsByDoctor";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.doctors.find(&self.doctor_id).await {
            Ok(Some(_)) => (),
            Ok(None) => return Err(UseCaseError::DoctorNotFound(self.doctor_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        }
        ctx.repos
            .appointments
            .find_by_doctor(&self.doctor_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for GetAppointmentsByDoctorUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ListAppointments]
    }
}
