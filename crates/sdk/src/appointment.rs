use crate::{APIResponse, BaseClient, ID};
use chrono::{DateTime, Utc};
use docbook_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppointmentClient {
    base: Arc<BaseClient>,
}

pub struct CreateAppointmentInput {
    pub doctor_id: ID,
    /// Only admins can book for other users
    pub user_id: Option<ID>,
    pub start_ts: DateTime<Utc>,
    pub duration: i64,
}

pub struct UpdateAppointmentInput {
    pub appointment_id: ID,
    pub body: update_appointment::RequestBody,
}

impl AppointmentClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateAppointmentInput,
    ) -> APIResponse<create_appointment::APIResponse> {
        let body = create_appointment::RequestBody {
            doctor_id: input.doctor_id.to_string(),
            user_id: input.user_id.map(|id| id.to_string()),
            start_ts: Some(input.start_ts),
            duration: Some(input.duration),
        };
        self.base
            .post(body, "appointments".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, appointment_id: ID) -> APIResponse<get_appointment::APIResponse> {
        self.base
            .get(format!("appointments/{}", appointment_id), StatusCode::OK)
            .await
    }

    pub async fn get_all(&self) -> APIResponse<get_appointments::APIResponse> {
        self.base.get("appointments".into(), StatusCode::OK).await
    }

    pub async fn get_by_doctor(
        &self,
        doctor_id: ID,
    ) -> APIResponse<get_appointments_by_doctor::APIResponse> {
        self.base
            .get(format!("appointments/doctor/{}", doctor_id), StatusCode::OK)
            .await
    }

    pub async fn get_booked_by_doctor(
        &self,
        doctor_id: ID,
    ) -> APIResponse<get_booked_appointments_by_doctor::APIResponse> {
        self.base
            .get(
                format!("appointments/doctor/{}/booked", doctor_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_by_user(
        &self,
        user_id: ID,
    ) -> APIResponse<get_appointments_by_user::APIResponse> {
        self.base
            .get(format!("appointments/user/{}", user_id), StatusCode::OK)
            .await
    }

    pub async fn get_booked_by_user(
        &self,
        user_id: ID,
    ) -> APIResponse<get_booked_appointments_by_user::APIResponse> {
        self.base
            .get(
                format!("appointments/user/{}/booked", user_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn update(
        &self,
        input: UpdateAppointmentInput,
    ) -> APIResponse<update_appointment::APIResponse> {
        self.base
            .put(
                input.body,
                format!("appointments/{}", input.appointment_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn cancel(
        &self,
        appointment_id: ID,
    ) -> APIResponse<cancel_appointment::APIResponse> {
        self.base
            .post(
                (),
                format!("appointments/{}/cancel", appointment_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(
        &self,
        appointment_id: ID,
    ) -> APIResponse<delete_appointment::APIResponse> {
        self.base
            .delete(format!("appointments/{}", appointment_id), StatusCode::OK)
            .await
    }
}
