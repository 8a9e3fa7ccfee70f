use super::get_appointments_by_user::GetAppointmentsByUserUseCase;
use crate::{
    error::DocbookError,
    shared::{auth::protect_route, guard::Guard, usecase::execute},
};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::get_booked_appointments_by_user::*;
use docbook_infra::DocbookContext;

pub async fn get_booked_appointments_by_user_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetAppointmentsByUserUseCase {
        caller: user.caller(),
        user_id: Guard::against_malformed_id(path_params.into_inner().user_id)?,
        booked_only: true,
    };
    execute(usecase, &ctx)
        .await
        .map(|appointments| HttpResponse::Ok().json(APIResponse::new(appointments)))
        .map_err(DocbookError::from)
}
