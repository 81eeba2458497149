//! Data Transfer Objects
//!
//! Request and response types exchanged with the calculation API.
//! Wire names follow the server's Portuguese JSON keys.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================
// Requests
// ============================================

/// Raw form input keyed by field id, sent as a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationRequest(BTreeMap<String, String>);

impl CalculationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn field(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(id.into(), value.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for CalculationRequest {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Body of `POST /api/formatar/moeda`
#[derive(Debug, Serialize)]
pub struct FormatCurrencyRequest {
    pub valor: f64,
}

// ============================================
// Responses
// ============================================

/// Result of `POST /api/calcular/{dre,balanco}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub sucesso: bool,
    /// Numeric figures only; non-numeric entries such as `data_calculo`
    /// are dropped on decode
    #[serde(default, deserialize_with = "numeric_entries")]
    pub calculos: BTreeMap<String, f64>,
    #[serde(default)]
    pub formatado: BTreeMap<String, String>,
    #[serde(default)]
    pub tabela_detalhada: Vec<DetailRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analise: Option<Analysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erro: Option<String>,
}

impl CalculationResult {
    /// Numeric figure by snake_case key, falling back to its camelCase alias
    pub fn figure(&self, key: &str) -> Option<f64> {
        self.calculos
            .get(key)
            .or_else(|| self.calculos.get(&crate::statement::camel_case(key)))
            .copied()
    }

    /// Server-formatted figure by snake_case key, falling back to camelCase
    pub fn formatted(&self, key: &str) -> Option<&str> {
        self.formatado
            .get(key)
            .or_else(|| self.formatado.get(&crate::statement::camel_case(key)))
            .map(String::as_str)
    }

    pub fn lucro_liquido(&self) -> f64 {
        self.figure("lucro_liquido").unwrap_or(0.0)
    }

    pub fn margem_liquida(&self) -> f64 {
        self.figure("margem_liquida").unwrap_or(0.0)
    }
}

fn numeric_entries<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.as_f64().map(|n| (key, n)))
        .collect())
}

/// One line of the detailed statement table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub descricao: String,
    pub valor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor_formatado: Option<String>,
    #[serde(default)]
    pub tipo: RowKind,
    #[serde(default)]
    pub calculado: bool,
}

impl DetailRow {
    pub fn new(descricao: impl Into<String>, valor: f64) -> Self {
        Self {
            descricao: descricao.into(),
            valor,
            valor_formatado: None,
            tipo: RowKind::Normal,
            calculado: false,
        }
    }

    pub fn kind(mut self, tipo: RowKind) -> Self {
        self.tipo = tipo;
        self
    }

    pub fn calculated(mut self) -> Self {
        self.calculado = true;
        self
    }
}

/// Visual weight of a detail row. Any `tipo` other than `total` and
/// `total-final` (`receita`, `custo`, `imposto`, ...) is a plain row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowKind {
    Total,
    TotalFinal,
    #[default]
    #[serde(other)]
    Normal,
}

/// Server analysis of the computed statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub rentabilidade: Profitability,
    #[serde(default)]
    pub alertas: Vec<String>,
    #[serde(default)]
    pub recomendacoes: Vec<String>,
}

/// Profitability bucket. Unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Profitability {
    Excelente,
    Alta,
    Moderada,
    Baixa,
    Critica,
    Other(String),
}

impl Profitability {
    pub fn label(&self) -> &str {
        match self {
            Profitability::Excelente => "EXCELENTE",
            Profitability::Alta => "ALTA",
            Profitability::Moderada => "MODERADA",
            Profitability::Baixa => "BAIXA",
            Profitability::Critica => "CRÍTICA",
            Profitability::Other(label) => label,
        }
    }

    /// Badge colour class
    pub fn badge_class(&self) -> &'static str {
        match self {
            Profitability::Excelente => "bg-success",
            Profitability::Alta => "bg-primary",
            Profitability::Moderada => "bg-info",
            Profitability::Baixa => "bg-warning",
            Profitability::Critica => "bg-danger",
            Profitability::Other(_) => "bg-secondary",
        }
    }
}

impl From<String> for Profitability {
    fn from(label: String) -> Self {
        match label.trim().to_uppercase().as_str() {
            "EXCELENTE" => Profitability::Excelente,
            "ALTA" => Profitability::Alta,
            "MODERADA" => Profitability::Moderada,
            "BAIXA" => Profitability::Baixa,
            "CRÍTICA" | "CRITICA" => Profitability::Critica,
            _ => Profitability::Other(label),
        }
    }
}

impl From<Profitability> for String {
    fn from(p: Profitability) -> Self {
        p.label().to_string()
    }
}

impl fmt::Display for Profitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `GET /api/health`
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}

impl HealthResponse {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

/// `GET /api/exemplo/{dre,balanco}`
#[derive(Debug, Deserialize)]
pub struct ExampleResponse {
    pub sucesso: bool,
    #[serde(default)]
    pub exemplo: BTreeMap<String, serde_json::Value>,
}

impl ExampleResponse {
    /// Example values as raw form strings. Numbers are rendered without
    /// quotes, nulls dropped.
    pub fn into_request(self) -> CalculationRequest {
        self.exemplo
            .into_iter()
            .filter_map(|(k, v)| {
                let value = match v {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((k, value))
            })
            .collect()
    }
}

/// A server-side history record; the shape is owned by the server
pub type ServerHistoryRecord = serde_json::Map<String, serde_json::Value>;

/// `GET /api/historico/dre`
#[derive(Debug, Deserialize)]
pub struct ServerHistoryResponse {
    pub sucesso: bool,
    #[serde(default)]
    pub historico: Vec<ServerHistoryRecord>,
}

/// `POST /api/formatar/moeda`
#[derive(Debug, Deserialize)]
pub struct FormatCurrencyResponse {
    pub sucesso: bool,
    #[serde(default)]
    pub formatado: Option<String>,
}
