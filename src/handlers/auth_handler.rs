use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::domain::user::UserRole,
    models::dto::request::{RegisterRequest, SignInRequest},
    models::dto::response::AuthResponse,
};

#[derive(Debug, Serialize)]
struct CurrentUserResponse {
    status: String,
    name: String,
    email: String,
    role: UserRole,
}

#[post("/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(request.into_inner()).await?;
    let token = state.jwt_service.create_token(&user)?;

    log::info!("Registered new {:?}: {}", user.role, user.email);

    Ok(HttpResponse::Created().json(AuthResponse {
        status: "success".to_string(),
        token,
        name: user.name,
        email: user.email,
        role: user.role,
    }))
}

#[post("/auth/sign-in")]
pub async fn sign_in(
    state: web::Data<AppState>,
    request: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.authenticate(request.into_inner()).await?;
    let token = state.jwt_service.create_token(&user)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        status: "success".to_string(),
        token,
        name: user.name,
        email: user.email,
        role: user.role,
    }))
}

#[get("/auth/current-user")]
pub async fn current_user(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_user(&auth.0.sub).await?;

    Ok(HttpResponse::Ok().json(CurrentUserResponse {
        status: "success".to_string(),
        name: user.name,
        email: user.email,
        role: user.role,
    }))
}
