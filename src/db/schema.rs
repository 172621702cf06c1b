/// Report table: one row per collected incident, `row_order` preserving
/// insertion order. Analysis table: flattened `Categoria`/`Subcategoria`/`Valor`.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS engineer_data (
    row_order INTEGER PRIMARY KEY,
    "Fonte" TEXT NOT NULL,
    "Data da notícia" TEXT NOT NULL,
    "Tipo do golpe" TEXT NOT NULL,
    "Descrição breve do golpe" TEXT NOT NULL DEFAULT '',
    "Canal utilizado" TEXT NOT NULL,
    "Público alvo" TEXT NOT NULL,
    "Estimativa de impacto ou prejuízo" TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS analyst_data (
    "Categoria" TEXT NOT NULL,
    "Subcategoria" TEXT NOT NULL DEFAULT '',
    "Valor" INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_analyst_categoria ON analyst_data("Categoria");
"#;
