use crate::{
    error::DocbookError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::get_specializations::*;
use docbook_infra::DocbookContext;

pub async fn get_specializations_controller(
    http_req: HttpRequest,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    protect_route(&http_req, &ctx).await?;

    execute(GetSpecializationsUseCase {}, &ctx)
        .await
        .map(|specializations| HttpResponse::Ok().json(APIResponse { specializations }))
        .map_err(DocbookError::from)
}

#[derive(Debug)]
pub struct GetSpecializationsUseCase {}

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
impl UseCase for GetSpecializationsUseCase {
    type Response = Vec<String>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetSpecializations";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .doctors
            .list_specializations()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
