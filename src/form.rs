//! Form Collector & Validator
//!
//! Reads the enumerated fields of a statement form into a
//! [`CalculationRequest`] and runs the pre-flight checks. A request that
//! fails validation is never sent.

use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::api::CalculationRequest;
use crate::format::parse_amount;
use crate::statement::{Field, StatementKind};

/// Value used for absent or empty fields
pub const DEFAULT_VALUE: &str = "0";

/// Anything that can hand out raw form values by element id
pub trait FormSource {
    /// Raw value of a form element. `None` when the element does not exist.
    fn value(&self, id: &str) -> Option<String>;
}

impl FormSource for HashMap<String, String> {
    fn value(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl FormSource for BTreeMap<String, String> {
    fn value(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl FormSource for CalculationRequest {
    fn value(&self, id: &str) -> Option<String> {
        self.get(id).map(str::to_string)
    }
}

impl FormSource for [(&str, &str)] {
    fn value(&self, id: &str) -> Option<String> {
        self.iter()
            .find(|(k, _)| *k == id)
            .map(|(_, v)| v.to_string())
    }
}

impl<const N: usize> FormSource for [(&str, &str); N] {
    fn value(&self, id: &str) -> Option<String> {
        self.as_slice().value(id)
    }
}

impl<T: FormSource + ?Sized> FormSource for &T {
    fn value(&self, id: &str) -> Option<String> {
        (**self).value(id)
    }
}

/// Pre-flight validation failure. Carries the offending field so the UI can
/// show the message next to it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Primary field absent or empty
    #[error("Informe {} {}", article(field), field.label)]
    MissingRequired { field: Field },

    /// Primary field below zero
    #[error("{} não pode ser {}", field.label, negative(field))]
    Negative { field: Field },

    /// Primary field is not a number
    #[error("{} deve ser um número válido", field.label)]
    NotANumber { field: Field },
}

impl ValidationError {
    /// Id of the form element the message belongs to
    pub fn field_id(&self) -> &'static str {
        match self {
            ValidationError::MissingRequired { field }
            | ValidationError::Negative { field }
            | ValidationError::NotANumber { field } => field.id,
        }
    }
}

fn article(field: &Field) -> &'static str {
    if field.feminine {
        "a"
    } else {
        "o"
    }
}

fn negative(field: &Field) -> &'static str {
    if field.feminine {
        "negativa"
    } else {
        "negativo"
    }
}

/// Read every enumerated field of `kind`, substituting `"0"` for missing or
/// blank values
pub fn collect<F: FormSource + ?Sized>(kind: StatementKind, form: &F) -> CalculationRequest {
    kind.fields()
        .iter()
        .map(|field| {
            let value = form
                .value(field.id)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_VALUE.to_string());
            (field.id.to_string(), value)
        })
        .collect()
}

/// Check the primary field of `kind`
pub fn validate<F: FormSource + ?Sized>(
    kind: StatementKind,
    form: &F,
) -> Result<(), ValidationError> {
    let field = *kind.primary_field();

    let raw = form.value(field.id).unwrap_or_default();
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingRequired { field });
    }

    match parse_amount(raw) {
        None => Err(ValidationError::NotANumber { field }),
        Some(v) if v < 0.0 => Err(ValidationError::Negative { field }),
        Some(_) => Ok(()),
    }
}

/// Validate, then collect
pub fn collect_validated<F: FormSource + ?Sized>(
    kind: StatementKind,
    form: &F,
) -> Result<CalculationRequest, ValidationError> {
    validate(kind, form)?;
    Ok(collect(kind, form))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_defaults_missing_fields() {
        let form = [
            ("receita_bruta", "10000"),
            ("custo_vendas", "4000"),
            ("despesas_operacionais", "2000"),
        ];

        let request = collect(StatementKind::Dre, &form);
        assert_eq!(request.len(), 7);
        assert_eq!(request.get("receita_bruta"), Some("10000"));
        assert_eq!(request.get("custo_vendas"), Some("4000"));
        assert_eq!(request.get("despesas_operacionais"), Some("2000"));
        for id in [
            "deducoes_receita",
            "despesas_financeiras",
            "outros_rendimentos",
            "impostos",
        ] {
            assert_eq!(request.get(id), Some("0"), "field {}", id);
        }
    }

    #[test]
    fn test_collect_blank_becomes_zero() {
        let form = [("receita_bruta", "500"), ("impostos", "   ")];
        let request = collect(StatementKind::Dre, &form);
        assert_eq!(request.get("impostos"), Some("0"));
    }

    #[test]
    fn test_collect_ignores_unknown_fields() {
        let form = [("receita_bruta", "1"), ("observacao", "texto livre")];
        let request = collect(StatementKind::Dre, &form);
        assert_eq!(request.get("observacao"), None);
        assert_eq!(request.len(), StatementKind::Dre.fields().len());
    }

    #[test]
    fn test_validate_accepts_zero_and_positive() {
        assert!(validate(StatementKind::Dre, &[("receita_bruta", "0")]).is_ok());
        assert!(validate(StatementKind::Dre, &[("receita_bruta", "1.234,56")]).is_ok());
    }

    #[test]
    fn test_validate_accepts_grouped_thousands() {
        let form = [("receita_bruta", "1.234.567")];
        assert!(validate(StatementKind::Dre, &form).is_ok());
        assert!(validate(StatementKind::Balanco, &[("ativo_circulante", "2.500.000")]).is_ok());
    }

    #[test]
    fn test_validate_missing() {
        let empty: [(&str, &str); 0] = [];
        let err = validate(StatementKind::Dre, &empty).unwrap_err();
        assert!(matches!(err, ValidationError::MissingRequired { .. }));
        assert_eq!(err.to_string(), "Informe a Receita Bruta");
        assert_eq!(err.field_id(), "receita_bruta");

        let err = validate(StatementKind::Dre, &[("receita_bruta", "")]).unwrap_err();
        assert!(matches!(err, ValidationError::MissingRequired { .. }));
    }

    #[test]
    fn test_validate_negative() {
        let err = validate(StatementKind::Dre, &[("receita_bruta", "-1")]).unwrap_err();
        assert!(matches!(err, ValidationError::Negative { .. }));
        assert_eq!(err.to_string(), "Receita Bruta não pode ser negativa");
    }

    #[test]
    fn test_validate_not_a_number() {
        let err = validate(StatementKind::Dre, &[("receita_bruta", "dez mil")]).unwrap_err();
        assert!(matches!(err, ValidationError::NotANumber { .. }));
    }

    #[test]
    fn test_balanco_messages() {
        let empty: [(&str, &str); 0] = [];
        let err = validate(StatementKind::Balanco, &empty).unwrap_err();
        assert_eq!(err.to_string(), "Informe o Ativo Circulante");

        let err = validate(StatementKind::Balanco, &[("ativo_circulante", "-5")]).unwrap_err();
        assert_eq!(err.to_string(), "Ativo Circulante não pode ser negativo");
    }

    #[test]
    fn test_collect_validated_from_map() {
        let mut form = HashMap::new();
        form.insert("receita_bruta".to_string(), "10000".to_string());

        let request = collect_validated(StatementKind::Dre, &form).unwrap();
        assert_eq!(request.get("receita_bruta"), Some("10000"));
        assert_eq!(request.get("impostos"), Some("0"));
    }
}
