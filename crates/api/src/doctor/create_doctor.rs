use crate::{
    error::DocbookError,
    shared::{
        auth::{protect_route, Permission},
        guard::Guard,
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::create_doctor::*;
use docbook_domain::{Doctor, Schedule};
use docbook_infra::DocbookContext;

pub async fn create_doctor_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (_, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateDoctorUseCase {
        name: Guard::against_empty("name", body.name)?,
        specialization: Guard::against_empty("specialization", body.specialization)?,
        schedule: body.schedule.unwrap_or_default(),
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|doctor| HttpResponse::Created().json(APIResponse::new(doctor)))
        .map_err(DocbookError::from)
}

#[derive(Debug)]
pub struct CreateDoctorUseCase {
    pub name: String,
    pub specialization: String,
    pub schedule: Schedule,
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
impl UseCase for CreateDoctorUseCase {
    type Response = Doctor;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateDoctor";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        let doctor = Doctor::new(
            self.name.clone(),
            self.specialization.clone(),
            self.schedule.clone(),
            ctx.sys.now(),
        );

        ctx.repos
            .doctors
            .insert(&doctor)
            .await
            .map(|_| doctor)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for CreateDoctorUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CreateDoctor]
    }
}
