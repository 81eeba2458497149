//! Statement Kinds
//!
//! Everything that differs between the income statement (DRE) and the
//! balance sheet (Balanço): endpoints, form fields, summary metrics and
//! user-facing labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A financial statement the calculation API knows how to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    /// Demonstração do Resultado do Exercício (income statement)
    Dre,
    /// Balanço Patrimonial (balance sheet)
    Balanco,
}

/// A form input the collector reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Form element id, also the JSON key sent to the API
    pub id: &'static str,
    pub label: &'static str,
    /// Grammatical gender of the label, for validation messages
    pub feminine: bool,
}

/// How a summary metric value is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricFormat {
    Currency,
    Percent,
    Number,
}

/// A summary metric painted in the result panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    /// Key in `calculos` / `formatado`
    pub key: &'static str,
    pub label: &'static str,
    pub format: MetricFormat,
}

const DRE_FIELDS: &[Field] = &[
    Field { id: "receita_bruta", label: "Receita Bruta", feminine: true },
    Field { id: "deducoes_receita", label: "Deduções da Receita", feminine: true },
    Field { id: "custo_vendas", label: "Custo das Vendas", feminine: false },
    Field { id: "despesas_operacionais", label: "Despesas Operacionais", feminine: true },
    Field { id: "despesas_financeiras", label: "Despesas Financeiras", feminine: true },
    Field { id: "outros_rendimentos", label: "Outros Rendimentos", feminine: false },
    Field { id: "impostos", label: "Impostos", feminine: false },
];

const BALANCO_FIELDS: &[Field] = &[
    Field { id: "ativo_circulante", label: "Ativo Circulante", feminine: false },
    Field { id: "ativo_nao_circulante", label: "Ativo Não Circulante", feminine: false },
    Field { id: "passivo_circulante", label: "Passivo Circulante", feminine: false },
    Field { id: "passivo_nao_circulante", label: "Passivo Não Circulante", feminine: false },
    Field { id: "patrimonio_liquido", label: "Patrimônio Líquido", feminine: false },
];

const DRE_METRICS: &[MetricSpec] = &[
    MetricSpec { key: "receita_bruta", label: "Receita Bruta", format: MetricFormat::Currency },
    MetricSpec { key: "receita_liquida", label: "Receita Líquida", format: MetricFormat::Currency },
    MetricSpec { key: "lucro_bruto", label: "Lucro Bruto", format: MetricFormat::Currency },
    MetricSpec { key: "lucro_operacional", label: "Lucro Operacional", format: MetricFormat::Currency },
    MetricSpec { key: "lucro_antes_ir", label: "Lucro Antes do IR", format: MetricFormat::Currency },
    MetricSpec { key: "lucro_liquido", label: "Lucro Líquido", format: MetricFormat::Currency },
    MetricSpec { key: "margem_bruta", label: "Margem Bruta", format: MetricFormat::Percent },
    MetricSpec { key: "margem_operacional", label: "Margem Operacional", format: MetricFormat::Percent },
    MetricSpec { key: "margem_liquida", label: "Margem Líquida", format: MetricFormat::Percent },
];

const BALANCO_METRICS: &[MetricSpec] = &[
    MetricSpec { key: "ativo_total", label: "Ativo Total", format: MetricFormat::Currency },
    MetricSpec { key: "passivo_total", label: "Passivo Total", format: MetricFormat::Currency },
    MetricSpec { key: "patrimonio_liquido", label: "Patrimônio Líquido", format: MetricFormat::Currency },
    MetricSpec { key: "liquidez_corrente", label: "Liquidez Corrente", format: MetricFormat::Number },
    MetricSpec { key: "endividamento_total", label: "Endividamento Total", format: MetricFormat::Percent },
    MetricSpec { key: "composicao_endividamento", label: "Composição do Endividamento", format: MetricFormat::Percent },
];

impl StatementKind {
    pub const ALL: [StatementKind; 2] = [StatementKind::Dre, StatementKind::Balanco];

    /// Path segment used by the API routes
    pub fn slug(&self) -> &'static str {
        match self {
            StatementKind::Dre => "dre",
            StatementKind::Balanco => "balanco",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatementKind::Dre => "DRE",
            StatementKind::Balanco => "Balanço Patrimonial",
        }
    }

    /// `POST` route computing this statement
    pub fn calculate_path(&self) -> String {
        format!("/api/calcular/{}", self.slug())
    }

    /// `GET` route returning a sample request payload
    pub fn example_path(&self) -> String {
        format!("/api/exemplo/{}", self.slug())
    }

    /// Enumerated form fields, in display order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            StatementKind::Dre => DRE_FIELDS,
            StatementKind::Balanco => BALANCO_FIELDS,
        }
    }

    /// The required, non-negative field
    pub fn primary_field(&self) -> &'static Field {
        &self.fields()[0]
    }

    /// Summary metrics painted in the result panel
    pub fn metrics(&self) -> &'static [MetricSpec] {
        match self {
            StatementKind::Dre => DRE_METRICS,
            StatementKind::Balanco => BALANCO_METRICS,
        }
    }

    /// Metric that receives success/danger emphasis
    pub fn highlight_key(&self) -> &'static str {
        match self {
            StatementKind::Dre => "lucro_liquido",
            StatementKind::Balanco => "patrimonio_liquido",
        }
    }

    /// Fallback message when the server rejects a calculation without `erro`
    pub fn failure_message(&self) -> &'static str {
        match self {
            StatementKind::Dre => "Erro ao calcular DRE",
            StatementKind::Balanco => "Erro ao calcular Balanço",
        }
    }

    /// Whether successful results feed the local history cache
    pub fn keeps_history(&self) -> bool {
        matches!(self, StatementKind::Dre)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for StatementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dre" => Ok(StatementKind::Dre),
            "balanco" | "balanço" => Ok(StatementKind::Balanco),
            other => Err(format!("Unknown statement: {}. Use: dre, balanco", other)),
        }
    }
}

/// DOM id of the element showing a summary metric (`result-lucro-liquido`)
pub fn metric_target_id(key: &str) -> String {
    format!("result-{}", key.replace('_', "-"))
}

/// camelCase alias of a snake_case key (`lucro_liquido` → `lucroLiquido`)
pub fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
