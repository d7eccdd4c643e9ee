use poem_openapi::{
    types::{ParseFromJSON, ToJSON},
    Object,
};
use serde::Deserialize;

#[derive(Object)]
pub struct PaginateResponse<T: ParseFromJSON + ToJSON> {
    pub counts: u32,
    pub page: u32,
    pub page_count: u32,
    pub page_size: u32,
    pub results: Vec<T>,
}

/// Success banner payload for mutations.
#[derive(Object)]
pub struct MessageResponse<T: ParseFromJSON + ToJSON> {
    pub message: String,
    pub data: T,
}

#[derive(Object, Deserialize)]
pub struct BadRequestResponse {
    pub message: String,
}

impl BadRequestResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct UnauthorizedResponse {
    pub message: String,
}

impl Default for UnauthorizedResponse {
    fn default() -> Self {
        Self {
            message: "Unauthorized".to_string(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct ForbiddenResponse {
    pub message: String,
}

impl Default for ForbiddenResponse {
    fn default() -> Self {
        Self {
            message: "Forbidden".to_string(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct NotFoundResponse {
    pub message: String,
}

impl NotFoundResponse {
    pub fn new(entity: &str, key: &str, value: &str) -> Self {
        Self {
            message: format!("{} with {} = {} not found", entity, key, value),
        }
    }
}

#[derive(Object, Deserialize, Debug)]
pub struct InternalServerErrorResponse {
    pub module: String,
    pub function: String,
    pub step: String,
    pub message: String,
}

impl InternalServerErrorResponse {
    pub fn new(module: &str, function: &str, step: &str, message: &str) -> Self {
        tracing::error!("{}.{} failed at {}: {}", module, function, step, message);
        Self {
            module: module.to_string(),
            function: function.to_string(),
            step: step.to_string(),
            message: message.to_string(),
        }
    }
}

/// Map `GuardError` onto a response enum carrying `Unauthorized`,
/// `Forbidden` and `InternalServerError` variants.
#[macro_export]
macro_rules! impl_guard_error {
    ($($responses:ty),+ $(,)?) => {
        $(
            impl From<$crate::core::security::GuardError> for $responses {
                fn from(err: $crate::core::security::GuardError) -> Self {
                    use poem_openapi::payload::Json;
                    use $crate::core::security::GuardError;
                    use $crate::schema::common::{ForbiddenResponse, UnauthorizedResponse};
                    match err {
                        GuardError::Unauthorized => {
                            Self::Unauthorized(Json(UnauthorizedResponse::default()))
                        }
                        GuardError::Forbidden => Self::Forbidden(Json(ForbiddenResponse::default())),
                        GuardError::InternalServerError(val) => Self::InternalServerError(Json(val)),
                    }
                }
            }
        )+
    };
}

/// Map `WeddingGuardError` onto a response enum carrying `BadRequest`,
/// `Forbidden`, `NotFound` and `InternalServerError` variants.
#[macro_export]
macro_rules! impl_wedding_guard_error {
    ($($responses:ty),+ $(,)?) => {
        $(
            impl From<$crate::core::membership::WeddingGuardError> for $responses {
                fn from(err: $crate::core::membership::WeddingGuardError) -> Self {
                    use poem_openapi::payload::Json;
                    use $crate::core::membership::WeddingGuardError;
                    use $crate::schema::common::ForbiddenResponse;
                    match err {
                        WeddingGuardError::BadRequest(val) => Self::BadRequest(Json(val)),
                        WeddingGuardError::NotFound(val) => Self::NotFound(Json(val)),
                        WeddingGuardError::Forbidden => {
                            Self::Forbidden(Json(ForbiddenResponse::default()))
                        }
                        WeddingGuardError::InternalServerError(val) => {
                            Self::InternalServerError(Json(val))
                        }
                    }
                }
            }
        )+
    };
}
