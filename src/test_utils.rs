//! Test utilities
//!
//! Mock calculation server used by the client and controller tests. Each
//! endpoint answers with a configurable status and body, and every posted
//! calculation payload is recorded for later inspection.

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: Value,
}

struct MockState {
    calculate: Canned,
    example: Canned,
    history: Canned,
    health: Canned,
    health_delay: Duration,
    received: Mutex<Vec<(String, Value)>>,
}

/// Builder for [`MockCalculationServer`]
pub struct MockServerBuilder {
    calculate: Canned,
    example: Canned,
    history: Canned,
    health: Canned,
    health_delay: Duration,
}

impl MockServerBuilder {
    /// Answer for `POST /api/calcular/:kind`
    pub fn calculate(mut self, status: StatusCode, body: Value) -> Self {
        self.calculate = Canned { status, body };
        self
    }

    /// Body for `GET /api/historico/dre`
    pub fn history(mut self, body: Value) -> Self {
        self.history = Canned {
            status: StatusCode::OK,
            body,
        };
        self
    }

    /// Answer for `GET /api/exemplo/:kind`
    pub fn example(mut self, status: StatusCode, body: Value) -> Self {
        self.example = Canned { status, body };
        self
    }

    /// Answer for `GET /api/health`
    pub fn health(mut self, status: StatusCode, body: Value) -> Self {
        self.health = Canned { status, body };
        self
    }

    /// Delay before the health endpoint answers
    pub fn health_delay(mut self, delay: Duration) -> Self {
        self.health_delay = delay;
        self
    }

    /// Start the server on an available port
    pub async fn start(self) -> MockCalculationServer {
        let state = Arc::new(MockState {
            calculate: self.calculate,
            example: self.example,
            history: self.history,
            health: self.health,
            health_delay: self.health_delay,
            received: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/calcular/:kind", post(handle_calculate))
            .route("/api/exemplo/:kind", get(handle_example))
            .route("/api/historico/dre", get(handle_history))
            .route("/api/formatar/moeda", post(handle_format_currency))
            .route("/api/health", get(handle_health))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        MockCalculationServer {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }
}

/// Mock calculation server for tests
pub struct MockCalculationServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockCalculationServer {
    pub fn builder() -> MockServerBuilder {
        MockServerBuilder {
            calculate: Canned {
                status: StatusCode::OK,
                body: dre_success_body(3200.0),
            },
            example: Canned {
                status: StatusCode::OK,
                body: json!({
                    "sucesso": true,
                    "exemplo": {
                        "receita_bruta": 100000,
                        "deducoes_receita": 5000,
                        "custo_vendas": 40000,
                        "despesas_operacionais": 20000,
                        "despesas_financeiras": 3000,
                        "outros_rendimentos": 1000,
                        "impostos": 8000
                    }
                }),
            },
            history: Canned {
                status: StatusCode::OK,
                body: json!({"sucesso": true, "historico": []}),
            },
            health: Canned {
                status: StatusCode::OK,
                body: json!({"status": "online"}),
            },
            health_delay: Duration::ZERO,
        }
    }

    /// Base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Calculation payloads received so far, as `(kind, body)`
    pub fn received(&self) -> Vec<(String, Value)> {
        self.state.received.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockCalculationServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_calculate(
    State(state): State<Arc<MockState>>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.received.lock().unwrap().push((kind, body));
    (state.calculate.status, Json(state.calculate.body.clone()))
}

async fn handle_example(
    State(state): State<Arc<MockState>>,
    Path(_kind): Path<String>,
) -> (StatusCode, Json<Value>) {
    (state.example.status, Json(state.example.body.clone()))
}

async fn handle_history(State(state): State<Arc<MockState>>) -> (StatusCode, Json<Value>) {
    (state.history.status, Json(state.history.body.clone()))
}

async fn handle_format_currency(Json(body): Json<Value>) -> Json<Value> {
    let valor = body["valor"].as_f64().unwrap_or(0.0);
    Json(json!({"sucesso": true, "formatado": crate::format::currency(valor)}))
}

async fn handle_health(State(state): State<Arc<MockState>>) -> (StatusCode, Json<Value>) {
    if !state.health_delay.is_zero() {
        tokio::time::sleep(state.health_delay).await;
    }
    (state.health.status, Json(state.health.body.clone()))
}

/// A successful DRE answer with the given net profit
pub fn dre_success_body(lucro_liquido: f64) -> Value {
    let receita_bruta = 10000.0;
    json!({
        "sucesso": true,
        "calculos": {
            "receita_bruta": receita_bruta,
            "receita_liquida": receita_bruta,
            "lucro_bruto": 6000.0,
            "lucro_operacional": 4000.0,
            "lucro_antes_ir": 4000.0,
            "lucro_liquido": lucro_liquido,
            "margem_bruta": 60.0,
            "margem_operacional": 40.0,
            "margem_liquida": lucro_liquido / receita_bruta * 100.0,
            "data_calculo": "2026-01-01T12:00:00"
        },
        "formatado": {
            "receita_bruta": crate::format::currency(receita_bruta),
            "lucro_liquido": crate::format::currency(lucro_liquido)
        },
        "tabela_detalhada": [
            {"descricao": "Receita Bruta", "valor": receita_bruta, "tipo": "receita"},
            {"descricao": "(-) Custo das Vendas", "valor": -4000.0, "tipo": "custo"},
            {"descricao": "Lucro Bruto", "valor": 6000.0, "tipo": "total", "calculado": true},
            {"descricao": "(-) Despesas Operacionais", "valor": -2000.0, "tipo": "despesa"},
            {"descricao": "Lucro Líquido", "valor": lucro_liquido, "tipo": "total-final", "calculado": true}
        ],
        "analise": {
            "rentabilidade": "ALTA",
            "alertas": [],
            "recomendacoes": ["Manter controle de custos"]
        }
    })
}

/// A successful balance sheet answer with the given equity
pub fn balanco_success_body(patrimonio_liquido: f64) -> Value {
    json!({
        "sucesso": true,
        "calculos": {
            "ativo_total": 150000.0,
            "passivo_total": 70000.0,
            "patrimonio_liquido": patrimonio_liquido,
            "equilibrio": (150000.0 - (70000.0 + patrimonio_liquido)).abs(),
            "liquidez_corrente": 1.5,
            "endividamento_total": 46.67,
            "composicao_endividamento": 57.14
        },
        "formatado": {
            "ativo_total": crate::format::currency(150000.0),
            "passivo_total": crate::format::currency(70000.0),
            "liquidez_corrente": "1.50",
            "endividamento_total": "46.67%",
            "composicao_endividamento": "57.14%"
        }
    })
}
