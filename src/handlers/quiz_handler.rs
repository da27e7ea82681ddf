use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_examinee, require_examiner, AuthenticatedUser},
    errors::AppError,
    models::domain::user::UserRole,
    models::dto::request::{CreateQuizRequest, EnrollRequest, SaveStartTimeRequest, SubmitQuizRequest},
    models::dto::response::{
        QuizHistoryResponse, QuizResponse, QuizzesResponse, StartTimeResponse, StatusResponse,
        SubmitQuizResponse,
    },
};

#[post("/quiz/create")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_examiner(&auth.0)?;

    let quiz = state
        .quiz_service
        .create_quiz(request.into_inner(), &auth.0.sub)
        .await?;
    Ok(HttpResponse::Created().json(QuizResponse {
        status: "success".to_string(),
        quiz,
    }))
}

/// Quizzes relevant to the caller: an examiner sees the quizzes it created,
/// an examinee the enrolled ones it has not submitted yet.
#[get("/quiz/all")]
pub async fn get_all_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = match auth.0.role {
        UserRole::Examiner => state.quiz_service.quizzes_created_by(&auth.0.sub).await?,
        UserRole::Examinee => {
            state
                .quiz_service
                .pending_quizzes_for_examinee(&auth.0.sub)
                .await?
        }
    };
    Ok(HttpResponse::Ok().json(QuizzesResponse {
        status: "success".to_string(),
        quizzes,
    }))
}

#[get("/quiz/unenrolled")]
pub async fn get_unenrolled_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = match auth.0.role {
        UserRole::Examiner => state.quiz_service.other_examiners_quizzes(&auth.0.sub).await?,
        UserRole::Examinee => {
            state
                .quiz_service
                .unenrolled_quizzes_for_examinee(&auth.0.sub)
                .await?
        }
    };
    Ok(HttpResponse::Ok().json(QuizzesResponse {
        status: "success".to_string(),
        quizzes,
    }))
}

#[post("/quiz/by-examiners")]
pub async fn get_quizzes_by_examiners(
    state: web::Data<AppState>,
    examiners: web::Json<Vec<String>>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state
        .quiz_service
        .quizzes_by_examiners(&examiners.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuizzesResponse {
        status: "success".to_string(),
        quizzes,
    }))
}

#[post("/quiz/enroll")]
pub async fn enroll(
    state: web::Data<AppState>,
    request: web::Json<EnrollRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_examinee(&auth.0)?;

    state
        .quiz_service
        .enroll(&request.quiz_id, &auth.0.sub)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/quiz/save-start-time")]
pub async fn save_start_time(
    state: web::Data<AppState>,
    request: web::Json<SaveStartTimeRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_examinee(&auth.0)?;

    state
        .quiz_service
        .save_start_time(&request.quiz_id, &auth.0.sub)
        .await?;
    Ok(HttpResponse::Created().json(StatusResponse::success()))
}

#[get("/quiz/start-time/{quiz_id}")]
pub async fn get_start_time(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_examinee(&auth.0)?;

    let timer = state
        .quiz_service
        .get_start_time(&quiz_id, &auth.0.sub)
        .await?;
    Ok(HttpResponse::Ok().json(StartTimeResponse {
        status: "success".to_string(),
        start_time: timer.started_at,
    }))
}

#[post("/quiz/submit-quiz")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    request: web::Json<SubmitQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_examinee(&auth.0)?;

    let request = request.into_inner();
    let result = state
        .quiz_attempt_service
        .submit_quiz(&request.quiz_id, &auth.0.sub, &request.submitted_questions)
        .await?;
    Ok(HttpResponse::Ok().json(SubmitQuizResponse {
        status: "success".to_string(),
        result: result.into(),
    }))
}

#[get("/quiz/history")]
pub async fn get_quizzes_history(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_examinee(&auth.0)?;

    let quizzes_details = state.quiz_service.quizzes_history(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(QuizHistoryResponse {
        status: "success".to_string(),
        quizzes_details,
    }))
}
