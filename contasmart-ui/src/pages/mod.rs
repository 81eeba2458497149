//! Pages
//!
//! Top-level page components for each route.

pub mod balanco;
pub mod configuracoes;
pub mod dre;
pub mod historico;

pub use balanco::BalancoPage;
pub use configuracoes::ConfiguracoesPage;
pub use dre::DrePage;
pub use historico::HistoricoPage;
