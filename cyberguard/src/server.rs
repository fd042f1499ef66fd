use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::assistant::{
    configuration::Configuration,
    error::RetrievalError,
    pipeline::BriefingPipeline,
    state::{BriefingRequest, BriefingResult, DetailLevel, FocusArea},
};

pub struct AppState {
    pipeline: BriefingPipeline,
}

impl AppState {
    pub fn new(pipeline: BriefingPipeline) -> Self {
        Self { pipeline }
    }
}

#[derive(Debug, Deserialize)]
pub struct BriefingRequestBody {
    query: String,
    focus_area: Option<String>,
    detail_level: Option<String>,
}

#[derive(Debug, Serialize)]
struct OptionsResponse {
    focus_areas: Vec<&'static str>,
    default_focus_area: &'static str,
    detail_levels: Vec<&'static str>,
    default_detail_level: &'static str,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    openai_api_key_loaded: bool,
    perplexity_api_key_loaded: bool,
    retrieval_model: String,
    synthesis_model: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

enum ApiError {
    EmptyQuery,
    Upstream(RetrievalError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::EmptyQuery => (
                StatusCode::BAD_REQUEST,
                "Please enter a question first.".to_string(),
            ),
            ApiError::Upstream(err) => (
                StatusCode::BAD_GATEWAY,
                format!("Could not generate the briefing: {}", err),
            ),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<RetrievalError> for ApiError {
    fn from(err: RetrievalError) -> Self {
        ApiError::Upstream(err)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/options", get(handle_options))
        .route("/api/status", get(handle_status))
        .route("/api/briefing", post(handle_briefing))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(config: Configuration) -> anyhow::Result<()> {
    let pipeline = BriefingPipeline::new(&config)?;
    let state = Arc::new(AppState::new(pipeline));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Starting server");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        focus_areas: FocusArea::ALL.iter().map(|a| a.label()).collect(),
        default_focus_area: FocusArea::default().label(),
        detail_levels: DetailLevel::ALL.iter().map(|d| d.label()).collect(),
        default_detail_level: DetailLevel::default().label(),
    })
}

// Construction already refused empty keys, so a running server always has both.
async fn handle_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        openai_api_key_loaded: true,
        perplexity_api_key_loaded: true,
        retrieval_model: state.pipeline.retrieval_model().to_string(),
        synthesis_model: state.pipeline.synthesis_model().to_string(),
    })
}

async fn handle_briefing(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BriefingRequestBody>,
) -> Result<Json<BriefingResult>, ApiError> {
    if body.query.trim().is_empty() {
        return Err(ApiError::EmptyQuery);
    }

    let focus_area = body.focus_area.as_deref().unwrap_or(FocusArea::default().label());
    let detail_level = body
        .detail_level
        .as_deref()
        .unwrap_or(DetailLevel::default().label());
    let request = BriefingRequest::from_labels(body.query, focus_area, detail_level);
    match state.pipeline.run(&request).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            warn!(error = %e, "Briefing failed");
            Err(e.into())
        }
    }
}

async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>CyberGuard AI – Real-Time Threat Briefings</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            max-width: 1100px;
            margin: 0 auto;
            padding: 20px;
        }
        .layout {
            display: grid;
            grid-template-columns: 2fr 1fr;
            gap: 30px;
        }
        .main-header {
            font-size: 2.2rem;
            font-weight: 800;
            color: #4a00e0;
        }
        .sub-header {
            font-size: 0.95rem;
            color: #64748b;
        }
        textarea {
            width: 100%;
            height: 160px;
            padding: 10px;
        }
        select {
            padding: 6px;
            margin: 6px 0 12px 0;
        }
        button {
            padding: 10px 20px;
            background-color: #4a00e0;
            color: white;
            border: none;
            border-radius: 4px;
            cursor: pointer;
        }
        .panel {
            white-space: pre-wrap;
            padding: 16px;
            border: 1px solid #ddd;
            border-radius: 4px;
            margin-top: 16px;
        }
        .warning {
            background-color: #fff3cd;
        }
        .risk {
            font-weight: 700;
        }
        .hidden {
            display: none;
        }
    </style>
</head>
<body>
    <div class="main-header">CyberGuard AI – Real-Time Threat Briefings</div>
    <p class="sub-header">Turns live web research into executive-ready cybersecurity briefings.</p>
    <div class="layout">
        <div>
            <h3>Ask about any cybersecurity threat or incident</h3>
            <label for="query">Your question</label>
            <textarea id="query">Give me an executive-ready briefing on recent ransomware activity targeting healthcare in the US. Include top threats, notable incidents from the last 6–12 months, and recommended mitigations for a mid-size company.</textarea>
            <div>
                <label for="focus">Focus area (optional)</label><br>
                <select id="focus"></select>
            </div>
            <div>
                <label for="detail">Depth of analysis</label><br>
                <select id="detail"></select>
            </div>
            <button onclick="generate()">Generate Threat Briefing</button>
            <div id="status" class="panel hidden"></div>
            <div id="results" class="hidden">
                <div class="panel risk" id="risk"></div>
                <div class="panel" id="audience"></div>
                <h3>Briefing</h3>
                <div class="panel" id="answer"></div>
                <details>
                    <summary>Raw web research</summary>
                    <div class="panel" id="context"></div>
                </details>
                <div class="panel" id="sources"></div>
            </div>
        </div>
        <div>
            <h3>Use cases</h3>
            <ul>
                <li>Board or leadership updates on a trending threat.</li>
                <li>Fast context on a new incident in your sector.</li>
                <li>Prioritizing hardening work for the next quarter.</li>
            </ul>
            <h3>How it works</h3>
            <ol>
                <li>Your question is researched on the live web with cited sources.</li>
                <li>A second model turns the research into a seven-section briefing.</li>
                <li>A keyword heuristic attaches a rough 1–5 risk score.</li>
            </ol>
        </div>
    </div>

    <script>
    async function loadOptions() {
        const response = await fetch('/api/options');
        const data = await response.json();
        fill('focus', data.focus_areas, data.default_focus_area);
        fill('detail', data.detail_levels, data.default_detail_level);
    }

    function fill(id, values, selected) {
        const el = document.getElementById(id);
        values.forEach(value => {
            const option = document.createElement('option');
            option.value = value;
            option.textContent = value;
            option.selected = value === selected;
            el.appendChild(option);
        });
    }

    function show(id, text) {
        const el = document.getElementById(id);
        el.textContent = text;
        el.classList.remove('hidden');
    }

    async function generate() {
        const status = document.getElementById('status');
        const results = document.getElementById('results');
        results.classList.add('hidden');
        status.classList.remove('warning');
        show('status', 'Researching live sources and generating your briefing...');

        try {
            const response = await fetch('/api/briefing', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({
                    query: document.getElementById('query').value,
                    focus_area: document.getElementById('focus').value,
                    detail_level: document.getElementById('detail').value,
                }),
            });
            const data = await response.json();
            if (!response.ok) {
                status.classList.add('warning');
                show('status', data.error);
                return;
            }
            status.classList.add('hidden');
            show('risk', 'Heuristic risk score: ' + data.risk_score);
            show('audience', data.audience);
            show('answer', data.answer);
            show('context', data.web_context);
            show('sources', data.sources_hint);
            results.classList.remove('hidden');
        } catch (error) {
            status.classList.add('warning');
            show('status', `Error: ${error.message}`);
        }
    }

    loadOptions();
    </script>
</body>
</html>
"#;
