use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::job::handler::create_job,
        crate::modules::job::handler::get_job,
        crate::modules::job::handler::list_jobs,
        crate::modules::job::handler::transcription_webhook,
        crate::modules::account::handler::get_my_usage,
        crate::modules::notification::handler::list_notifications,
        crate::modules::notification::handler::unread_count,
        crate::modules::notification::handler::mark_read,
        crate::modules::notification::handler::mark_all_read,
    ),
    components(
        schemas(
            crate::modules::job::dto::CreateJobRequest,
            crate::modules::job::dto::WebhookPayload,
            crate::modules::job::model::Job,
            crate::modules::job::model::JobState,
            crate::modules::account::dto::UsageResponse,
            crate::modules::account::model::SubscriptionTier,
            crate::modules::notification::model::Notification,
            crate::modules::notification::model::NotificationKind,
            crate::modules::notification::dto::UnreadCountResponse,
        )
    ),
    tags(
        (name = "Jobs", description = "Transcription job lifecycle"),
        (name = "Accounts", description = "Tier and usage"),
        (name = "Notifications", description = "Job outcome notifications")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
