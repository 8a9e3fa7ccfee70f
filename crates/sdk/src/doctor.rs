use crate::{APIResponse, BaseClient, ID};
use docbook_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct DoctorClient {
    base: Arc<BaseClient>,
}

pub type CreateDoctorInput = create_doctor::RequestBody;

pub struct UpdateDoctorInput {
    pub doctor_id: ID,
    pub body: update_doctor::RequestBody,
}

impl DoctorClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateDoctorInput) -> APIResponse<create_doctor::APIResponse> {
        self.base
            .post(input, "doctors".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_all(&self) -> APIResponse<get_doctors::APIResponse> {
        self.base.get("doctors".into(), StatusCode::OK).await
    }

    pub async fn get(&self, doctor_id: ID) -> APIResponse<get_doctor::APIResponse> {
        self.base
            .get(format!("doctors/{}", doctor_id), StatusCode::OK)
            .await
    }

    pub async fn get_by_specialization(
        &self,
        specialization: &str,
    ) -> APIResponse<get_doctors_by_specialization::APIResponse> {
        self.base
            .get(
                format!("doctors/specialization/{}", specialization),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_specializations(&self) -> APIResponse<get_specializations::APIResponse> {
        self.base
            .get("doctors/specializations".into(), StatusCode::OK)
            .await
    }

    pub async fn update(&self, input: UpdateDoctorInput) -> APIResponse<update_doctor::APIResponse> {
        self.base
            .put(
                input.body,
                format!("doctors/{}", input.doctor_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, doctor_id: ID) -> APIResponse<delete_doctor::APIResponse> {
        self.base
            .delete(format!("doctors/{}", doctor_id), StatusCode::OK)
            .await
    }
}
