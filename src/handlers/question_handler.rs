use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_examiner, AuthenticatedUser},
    errors::AppError,
    models::dto::request::CreateQuestionsRequest,
    models::dto::response::{QuestionCountResponse, QuestionDto, QuestionsResponse},
    services::question_service::QuizQuestions,
};

#[post("/question/create")]
pub async fn create_questions(
    state: web::Data<AppState>,
    request: web::Json<CreateQuestionsRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_examiner(&auth.0)?;

    let questions = state
        .question_service
        .create_questions(request.into_inner())
        .await?;

    let questions = questions
        .into_iter()
        .map(|q| QuestionDto::from_question(q, true))
        .collect();
    Ok(HttpResponse::Created().json(QuestionsResponse {
        status: "success".to_string(),
        questions,
    }))
}

#[get("/question/all/{quiz_id}")]
pub async fn get_questions_of_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .question_service
        .questions_of_quiz(&quiz_id, &auth.0.sub, auth.0.role)
        .await?;

    let response = match outcome {
        QuizQuestions::Listing(questions) => HttpResponse::Ok().json(QuestionsResponse {
            status: "success".to_string(),
            questions,
        }),
        QuizQuestions::CountOnly(total_questions) => {
            HttpResponse::Ok().json(QuestionCountResponse {
                status: "success".to_string(),
                total_questions,
            })
        }
    };
    Ok(response)
}
