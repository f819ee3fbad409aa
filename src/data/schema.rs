use std::collections::{BTreeSet, HashSet};

use crate::error::{ImportError, Result};

// ---------------------------------------------------------------------------
// Distributor vocabulary
// ---------------------------------------------------------------------------

/// Vendor header → `distributor_products` column, in output order.
pub const DISTRIBUTOR_COLUMNS: &[(&str, &str)] = &[
    ("ID", "source_id"),
    ("Código", "code"),
    ("Descrição", "description"),
    ("Unidade", "unit"),
    ("NCM", "ncm"),
    ("Origem", "origin"),
    ("Preço", "price"),
    ("Valor IPI fixo", "ipi_fixed_value"),
    ("Observações", "observations"),
    ("Situação", "status"),
    ("Estoque", "stock"),
    ("Preço de custo", "cost_price"),
    ("Cód. no fornecedor", "supplier_code"),
    ("Fornecedor", "supplier"),
    ("Localização", "location"),
    ("Estoque máximo", "stock_max"),
    ("Estoque mínimo", "stock_min"),
    ("Peso líquido (Kg)", "weight_net_kg"),
    ("Peso bruto (Kg)", "weight_gross_kg"),
    ("GTIN/EAN", "gtin_ean"),
    ("GTIN/EAN da Embalagem", "gtin_ean_package"),
    ("Largura do produto", "product_width"),
    ("Altura do Produto", "product_height"),
    ("Profundidade do produto", "product_depth"),
    ("Data Validade", "expiry_date"),
    ("Descrição do Produto no Fornecedor", "supplier_product_description"),
    ("Descrição Complementar", "description_complement"),
    ("Itens p/ caixa", "items_per_box"),
    ("Produto Variação", "product_variation"),
    ("Tipo Produção", "production_type"),
    ("Classe de enquadramento do IPI", "ipi_class"),
    ("Código na Lista de Serviços", "service_list_code"),
    ("Tipo do item", "item_type"),
    ("Grupo de Tags/Tags", "tags"),
    ("Tributos", "taxes"),
    ("Código Pai", "parent_code"),
    ("Código Integração", "integration_code"),
    ("Grupo de produtos", "product_group"),
    ("Marca", "brand"),
    ("CEST", "cest"),
    ("Volumes", "volumes"),
    ("Descrição Curta", "short_description"),
    ("Cross-Docking", "cross_docking"),
    ("URL Imagens Externas", "external_images_url"),
    ("Link Externo", "external_link"),
    ("Meses Garantia no Fornecedor", "warranty_months_supplier"),
    ("Clonar dados do pai", "clone_parent_data"),
    ("Condição do Produto", "product_condition"),
    ("Frete Grátis", "free_shipping"),
    ("Número FCI", "fci_number"),
    ("Vídeo", "video"),
    ("Departamento", "department"),
    ("Unidade de Medida", "unit_measure"),
    ("Preço de Compra", "purchase_price"),
    ("Categoria do produto", "product_category"),
    ("Informações Adicionais", "additional_info"),
];

/// Target columns coerced to decimals.
pub const NUMERIC_COLUMNS: &[&str] = &[
    "price",
    "ipi_fixed_value",
    "stock",
    "cost_price",
    "stock_max",
    "stock_min",
    "weight_net_kg",
    "weight_gross_kg",
    "product_width",
    "product_height",
    "product_depth",
    "items_per_box",
    "volumes",
    "warranty_months_supplier",
    "purchase_price",
];

pub const DATE_COLUMN: &str = "expiry_date";
pub const IDENTIFIER_COLUMN: &str = "code";

/// Name of the table the output CSV is meant for.
pub const DESTINATION_TABLE: &str = "distributor_products";

// ---------------------------------------------------------------------------
// ColumnMapping
// ---------------------------------------------------------------------------

/// Injective, ordered source-label → target-name mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<(String, String)>,
}

impl ColumnMapping {
    /// Build a mapping, rejecting duplicated source labels or target names.
    pub fn new<S, T>(pairs: impl IntoIterator<Item = (S, T)>) -> Result<Self>
    where
        S: Into<String>,
        T: Into<String>,
    {
        let mut sources = HashSet::new();
        let mut targets = HashSet::new();
        let mut entries = Vec::new();

        for (source, target) in pairs {
            let (source, target) = (source.into(), target.into());
            if !sources.insert(source.clone()) {
                return Err(ImportError::InvalidMapping(format!(
                    "source column '{source}' is mapped twice"
                )));
            }
            if !targets.insert(target.clone()) {
                return Err(ImportError::InvalidMapping(format!(
                    "target column '{target}' is produced twice"
                )));
            }
            entries.push((source, target));
        }

        Ok(ColumnMapping { entries })
    }

    /// The vendor vocabulary used for `distributor_products`.
    pub fn distributor() -> Self {
        ColumnMapping {
            entries: DISTRIBUTOR_COLUMNS
                .iter()
                .map(|(s, t)| (s.to_string(), t.to_string()))
                .collect(),
        }
    }

    /// Target name for a source label.
    pub fn target_for(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, t)| t.as_str())
    }

    /// `(source, target)` pairs in mapping order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    /// Target names in mapping order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, t)| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TargetSchema
// ---------------------------------------------------------------------------

/// Which coercion a target column receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
    Date,
}

/// Everything the pipeline needs to know about the output columns.
#[derive(Debug, Clone)]
pub struct TargetSchema {
    pub mapping: ColumnMapping,
    pub numeric_columns: BTreeSet<String>,
    pub date_column: String,
    pub identifier_column: String,
}

impl TargetSchema {
    pub fn distributor() -> Self {
        TargetSchema {
            mapping: ColumnMapping::distributor(),
            numeric_columns: NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect(),
            date_column: DATE_COLUMN.to_string(),
            identifier_column: IDENTIFIER_COLUMN.to_string(),
        }
    }

    /// The date column wins over the numeric set; everything else is text.
    pub fn kind_of(&self, column: &str) -> ColumnKind {
        if column == self.date_column {
            ColumnKind::Date
        } else if self.numeric_columns.contains(column) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }
}

impl Default for TargetSchema {
    fn default() -> Self {
        Self::distributor()
    }
}
