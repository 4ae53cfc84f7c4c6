//! Listing categories
//!
//! The marketplace scopes every listing page to one category. Each category
//! has a stable machine key (used in configuration and on the wire), a display
//! name, and the slug the upstream site expects in its `category` query.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A listing category
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    #[default]
    #[serde(rename = "ti-programacao")]
    ItProgramming,
    #[serde(rename = "design-multimedia")]
    DesignMultimedia,
    #[serde(rename = "traducao-conteudos")]
    WritingTranslation,
    #[serde(rename = "marketing-vendas")]
    SalesMarketing,
    #[serde(rename = "suporte-administrativo")]
    AdminSupport,
    #[serde(rename = "juridico")]
    Legal,
    #[serde(rename = "financas-administracao")]
    FinanceManagement,
    #[serde(rename = "engenharia-manufatura")]
    EngineeringManufacturing,
}

/// Returned when a category key is not part of the enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category key: {0}")]
pub struct CategoryParseError(pub String);

impl Category {
    pub const ALL: [Category; 8] = [
        Category::ItProgramming,
        Category::DesignMultimedia,
        Category::WritingTranslation,
        Category::SalesMarketing,
        Category::AdminSupport,
        Category::Legal,
        Category::FinanceManagement,
        Category::EngineeringManufacturing,
    ];

    /// Stable machine key
    pub fn key(self) -> &'static str {
        match self {
            Category::ItProgramming => "ti-programacao",
            Category::DesignMultimedia => "design-multimedia",
            Category::WritingTranslation => "traducao-conteudos",
            Category::SalesMarketing => "marketing-vendas",
            Category::AdminSupport => "suporte-administrativo",
            Category::Legal => "juridico",
            Category::FinanceManagement => "financas-administracao",
            Category::EngineeringManufacturing => "engenharia-manufatura",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::ItProgramming => "TI e Programação",
            Category::DesignMultimedia => "Design e Multimídia",
            Category::WritingTranslation => "Tradução e Conteúdos",
            Category::SalesMarketing => "Marketing e Vendas",
            Category::AdminSupport => "Suporte Administrativo",
            Category::Legal => "Jurídico",
            Category::FinanceManagement => "Finanças e Administração",
            Category::EngineeringManufacturing => "Engenharia e Manufatura",
        }
    }

    /// Slug used by the upstream listing page
    pub fn upstream_slug(self) -> &'static str {
        match self {
            Category::ItProgramming => "it-programming",
            Category::DesignMultimedia => "design-multimedia",
            Category::WritingTranslation => "writing-translation",
            Category::SalesMarketing => "sales-marketing",
            Category::AdminSupport => "admin-support",
            Category::Legal => "legal",
            Category::FinanceManagement => "finance-management",
            Category::EngineeringManufacturing => "engineering-manufacturing",
        }
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.key() == key)
            .ok_or_else(|| CategoryParseError(key.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
