use crate::{
    error::DocbookError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::get_doctors::*;
use docbook_domain::Doctor;
use docbook_infra::DocbookContext;

pub async fn get_doctors_controller(
    http_req: HttpRequest,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    protect_route(&http_req, &ctx).await?;

    execute(GetDoctorsUseCase {}, &ctx)
        .await
        .map(|doctors| HttpResponse::Ok().json(APIResponse::new(doctors)))
        .map_err(DocbookError::from)
}

#[derive(Debug)]
pub struct GetDoctorsUseCase {}

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
impl UseCase for GetDoctorsUseCase {
    type Response = Vec<Doctor>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetDoctors";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .doctors
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
