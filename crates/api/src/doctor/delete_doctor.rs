use crate::{
    error::DocbookError,
    shared::{
        auth::{protect_route, Permission},
        guard::Guard,
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::delete_doctor::*;
use docbook_domain::{Doctor, ID};
use docbook_infra::DocbookContext;

pub async fn delete_doctor_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (_, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteDoctorUseCase {
        doctor_id: Guard::against_malformed_id(path_params.into_inner().doctor_id)?,
    };
    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|doctor| HttpResponse::Ok().json(APIResponse::new(doctor)))
        .map_err(DocbookError::from)
}

/// Deletes the `Doctor` and every `Appointment` booked with it
#[derive(Debug)]
pub struct DeleteDoctorUseCase {
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
impl UseCase for DeleteDoctorUseCase {
    type Response = Doctor;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteDoctor";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.doctors.delete(&self.doctor_id).await {
            Ok(Some(doctor)) => Ok(doctor),
            Ok(None) => Err(UseCaseError::DoctorNotFound(self.doctor_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

impl PermissionBoundary for DeleteDoctorUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::DeleteDoctor]
    }
}
