use crate::{
    error::DocbookError,
    shared::{
        auth::{protect_route, Permission},
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::get_appointments::*;
use docbook_domain::Appointment;
use docbook_infra::DocbookContext;

pub async fn get_appointments_controller(
    http_req: HttpRequest,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (_, policy) = protect_route(&http_req, &ctx).await?;

    execute_with_policy(GetAppointmentsUseCase {}, &policy, &ctx)
        .await
        .map(|appointments| HttpResponse::Ok().json(APIResponse::new(appointments)))
        .map_err(DocbookError::from)
}

#[derive(Debug)]
pub struct GetAppointmentsUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for DocbookError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAppointmentsUseCase {
    type Response = Vec<Appointment>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetAppointments";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .appointments
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for GetAppointmentsUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ListAppointments]
    }
}
