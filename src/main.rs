use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizdesk_server::{
    app_state::AppState,
    auth::AuthMiddleware,
    config::Config,
    handlers::{self, auth_handler, question_handler, quiz_handler},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let state = AppState::new(config.clone())
        .await
        .expect("failed to initialize application state");
    let jwt_service = state.jwt_service.clone();

    log::info!(
        "Starting HTTP server on {}:{}",
        config.web_server_host,
        config.web_server_port
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .service(handlers::health_check)
            .service(auth_handler::register)
            .service(auth_handler::sign_in)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .service(auth_handler::current_user)
                    .service(quiz_handler::create_quiz)
                    .service(quiz_handler::get_all_quizzes)
                    .service(quiz_handler::get_unenrolled_quizzes)
                    .service(quiz_handler::get_quizzes_by_examiners)
                    .service(quiz_handler::enroll)
                    .service(quiz_handler::save_start_time)
                    .service(quiz_handler::get_start_time)
                    .service(quiz_handler::submit_quiz)
                    .service(quiz_handler::get_quizzes_history)
                    .service(question_handler::create_questions)
                    .service(question_handler::get_questions_of_quiz),
            )
    })
    .bind((
        config.web_server_host.as_str(),
        config.web_server_port,
    ))?
    .run()
    .await
}
