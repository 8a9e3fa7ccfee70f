use crate::{
    error::DocbookError,
    shared::{
        auth::protect_route,
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::get_doctors_by_specialization::*;
use docbook_domain::Doctor;
use docbook_infra::DocbookContext;

pub async fn get_doctors_by_specialization_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    protect_route(&http_req, &ctx).await?;

    let usecase = GetDoctorsBySpecializationUseCase {
        specialization: Guard::against_empty(
            "specialization",
            path_params.into_inner().specialization,
        )?,
    };
    execute(usecase, &ctx)
        .await
        .map(|doctors| HttpResponse::Ok().json(APIResponse::new(doctors)))
        .map_err(DocbookError::from)
}

#[derive(Debug)]
pub struct GetDoctorsBySpecializationUseCase {
    pub specialization: String,
}

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
impl UseCase for GetDoctorsBySpecializationUseCase {
    type Response = Vec<Doctor>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetDoctorsBySpecialization";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .doctors
            .find_by_specialization(&self.specialization)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
