use std::io::Result;

use actix_web::{
    http::{header::ContentType, StatusCode},
    web::{self, resource},
    App, HttpResponse, HttpServer,
};
use tracing::{error, info};

use crate::{
    core::{
        data::ProjectQuery,
        lifecycle::{PageController, PageState},
        settings::Settings,
    },
    render::{self, PageView, RenderError},
};

/// Per-worker handle on the project service.
pub struct PageService {
    query: ProjectQuery,
}

impl PageService {
    pub fn new(query: ProjectQuery) -> Self {
        PageService { query }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let query = ProjectQuery::new(&settings.api_base_url.value)
            .with_body_limit(settings.body_limit_bytes.value);
        PageService::new(query)
    }

    /// Each request gets its own controller and runs exactly one load on it,
    /// so response ordering never comes into play here.
    pub async fn load(&self, identifier: &str) -> PageState {
        let controller = PageController::new(self.query.clone());
        controller.load(identifier).await;
        controller.snapshot()
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/project-profile/{id}").route(web::get().to(profile_handler)))
        .service(resource("/project-profile/{id}/view").route(web::get().to(view_handler)))
        .service(resource("/status").route(web::get().to(status_handler)));
}

pub async fn start_server(settings: Settings) -> Result<()> {
    let addr = settings.bind_addr.value;
    let worker_settings = settings.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(PageService::from_settings(&worker_settings)))
            .configure(configure)
    })
    .bind(addr)?;
    info!(%addr, "Server started");
    server.run().await
}

fn status_for(state: &PageState) -> StatusCode {
    match state {
        PageState::Ready(_) => StatusCode::OK,
        PageState::Failed(_) => StatusCode::BAD_GATEWAY,
        PageState::Loading => StatusCode::ACCEPTED,
    }
}

async fn profile_handler(path: web::Path<String>, pages: web::Data<PageService>) -> HttpResponse {
    let state = pages.load(&path).await;
    respond(&state, render::project(&state).to_html(), ContentType::html())
}

async fn view_handler(path: web::Path<String>, pages: web::Data<PageService>) -> HttpResponse {
    let state = pages.load(&path).await;
    respond(&state, render::project(&state).to_json(), ContentType::json())
}

fn respond(
    state: &PageState,
    rendered: std::result::Result<String, RenderError>,
    content_type: ContentType,
) -> HttpResponse {
    match rendered {
        Ok(body) => HttpResponse::build(status_for(state))
            .content_type(content_type)
            .body(body),
        Err(error) => {
            error!(%error, "Failed to render project page");
            HttpResponse::InternalServerError().body("Failed to render project page.")
        }
    }
}

async fn status_handler() -> HttpResponse {
    HttpResponse::Ok().body("folio-profile is running")
}

/// Runs one load outside the server and returns the rendered page.
pub async fn render_once(
    settings: &Settings,
    identifier: &str,
    json: bool,
) -> std::result::Result<(PageState, String), RenderError> {
    let state = PageService::from_settings(settings).load(identifier).await;
    let view: PageView = render::project(&state);
    let body = if json { view.to_json()? } else { view.to_html()? };
    Ok((state, body))
}
