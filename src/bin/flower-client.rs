use std::process::ExitCode;

use console::Term;
use dialoguer::{Input, Password};
use flower_cards::{
    client::ApiClient,
    config::ClientConfig,
    ui::{App, GalleryCommand, Session},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // 日志写到 stderr，避免和界面混在一起
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    tracing::debug!("Using API at {}", config.api_url);

    let term = Term::stdout();
    let mut app = App::new(ApiClient::from_config(&config));

    show(&term, &app);
    app.check_session().await;

    match run(&term, &mut app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Terminal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(term: &Term, app: &mut App) -> Result<(), dialoguer::Error> {
    loop {
        show(term, app);

        // 先画出加载状态，再发请求
        if app.gallery_pending() {
            app.load_gallery().await;
            continue;
        }

        match app.session() {
            Session::CheckingSession => app.check_session().await,
            Session::LoggedOut => {
                let username: String = Input::new().with_prompt("Username").interact_text()?;
                let password = Password::new().with_prompt("Password").interact()?;
                app.submit_login(&username, &password).await;
            }
            Session::LoggedIn(_) => {
                let input: String = Input::new()
                    .with_prompt(">")
                    .allow_empty(true)
                    .interact_text()?;
                let Some(command) = GalleryCommand::parse(&input) else {
                    continue;
                };
                if !app.dispatch(command).await {
                    return Ok(());
                }
            }
        }
    }
}

fn show(term: &Term, app: &App) {
    if let Err(e) = term.clear_screen() {
        tracing::debug!("Failed to clear screen: {}", e);
    }
    if let Err(e) = term.write_str(&app.render()) {
        tracing::warn!("Failed to draw screen: {}", e);
    }
}
