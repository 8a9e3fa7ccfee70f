use crate::{error::DocbookError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use docbook_api_structs::get_me::*;
use docbook_infra::DocbookContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<DocbookContext>,
) -> Result<HttpResponse, DocbookError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
