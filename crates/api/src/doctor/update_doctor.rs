use crate::{
    error::DocbookError,
    shared::{
        auth::{protect_route, Permission},
        guard::Guard,
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::update_doctor::*;
use docbook_domain::{Doctor, Schedule, ID};
use docbook_infra::DocbookContext;

pub async fn update_doctor_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (_, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateDoctorUseCase {
        doctor_id: Guard::against_malformed_id(path_params.into_inner().doctor_id)?,
        name: body
            .name
            .map(|name| Guard::against_empty("name", name))
            .transpose()?,
        specialization: body
            .specialization
            .map(|s| Guard::against_empty("specialization", s))
            .transpose()?,
        schedule: body.schedule,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|doctor| HttpResponse::Ok().json(APIResponse::new(doctor)))
        .map_err(DocbookError::from)
}

/// Changing the `Schedule` does not touch existing `Appointment`s
#[derive(Debug)]
pub struct UpdateDoctorUseCase {
    pub doctor_id: ID,
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub schedule: Option<Schedule>,
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
impl UseCase for UpdateDoctorUseCase {
    type Response = Doctor;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateDoctor";

    async fn execute(&mut self, ctx: &DocbookContext) -> Result<Self::Response, Self::Error> {
        let mut doctor = match ctx.repos.doctors.find(&self.doctor_id).await {
            Ok(Some(doctor)) => doctor,
            Ok(None) => return Err(UseCaseError::DoctorNotFound(self.doctor_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        if let Some(name) = &self.name {
            doctor.name = name.clone();
        }
        if let Some(specialization) = &self.specialization {
            doctor.specialization = specialization.clone();
        }
        if let Some(schedule) = &self.schedule {
            doctor.schedule = schedule.clone();
        }
        doctor.updated = ctx.sys.now();

        ctx.repos
            .doctors
            .save(&doctor)
            .await
            .map(|_| doctor)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for UpdateDoctorUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::UpdateDoctor]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use docbook_domain::{Time, Weekday};
    use docbook_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn updates_given_fields() {
        let ctx = setup_context().await.unwrap();
        let doctor = Doctor::new(
            "Dr. Old".into(),
            "Neurology".into(),
            Schedule::default(),
            ctx.sys.now(),
        );
        ctx.repos.doctors.insert(&doctor).await.unwrap();

        let schedule = Schedule::new(
            vec![Weekday::Sat],
            Time::new(10, 0).unwrap(),
            Time::new(14, 0).unwrap(),
        )
        .unwrap();
        let mut usecase = UpdateDoctorUseCase {
            doctor_id: doctor.id.clone(),
            name: Some("Dr. New".into()),
            specialization: None,
            schedule: Some(schedule.clone()),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.name, "Dr. New");
        assert_eq!(res.specialization, "Neurology");
        assert_eq!(res.schedule, schedule);

        let mut usecase = UpdateDoctorUseCase {
            doctor_id: ID::new(),
            name: None,
            specialization: None,
            schedule: None,
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::DoctorNotFound(_))));
    }
}
