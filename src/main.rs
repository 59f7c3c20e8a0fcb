use std::{fs, io::Write, path::Path, process};

use tokio::net::TcpListener;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

use weft::{
    application::{error::AppError, render::render_to_string},
    config,
    infra::{
        error::InfraError,
        http::{CssHandler, CssMiddleware, build_router, handler},
        telemetry,
    },
    presentation::demo::{component_classes, demo_page},
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Render(args) => run_render(settings, args),
        config::Command::Stylesheet(args) => run_stylesheet(args),
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let css = settings.css.stylesheet_enabled.then(|| {
        CssMiddleware::new(component_classes()).with_path(settings.css.stylesheet_path.clone())
    });
    let stylesheet_href = css.as_ref().map(|css| css.path.clone());
    let page = demo_page(&settings.page, stylesheet_href);

    let router = build_router([("/".to_string(), handler(page))], css);

    let listener = TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        addr = %settings.server.addr,
        stylesheet = settings.css.stylesheet_enabled,
        "serving demo page"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

fn run_render(settings: config::Settings, args: config::RenderArgs) -> Result<(), AppError> {
    let html = render_to_string(&demo_page(&settings.page, None))?;
    write_output(args.output.as_deref(), html.as_bytes())?;
    info!(cards = settings.page.cards.get(), bytes = html.len(), "rendered demo page");
    Ok(())
}

fn run_stylesheet(args: config::StylesheetArgs) -> Result<(), AppError> {
    let stylesheet = CssHandler::new(component_classes()).stylesheet();
    write_output(args.output.as_deref(), stylesheet.as_bytes())?;
    Ok(())
}

fn write_output(path: Option<&Path>, contents: &[u8]) -> Result<(), InfraError> {
    match path {
        Some(path) => fs::write(path, contents)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
