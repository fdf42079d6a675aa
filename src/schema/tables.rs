//! Table schema definitions for the IBGE / IPARDES source files

use super::types::*;

pub static POPULATION: TableSchema = TableSchema {
    name: "population",
    source_file: "pop/pop_urbano_rural_total_70_10.CSV",
    columns: &[
        Column::required("codmun", ColumnType::Integer),
        Column::new("nomemun", ColumnType::Text),
        Column::required("ano", ColumnType::Integer),
        Column::required("Total", ColumnType::Count),
        Column::required("Urbana", ColumnType::Count),
        Column::required("Rural", ColumnType::Count),
    ],
    melt: Some(MeltSpec {
        value_columns: &["Total", "Urbana", "Rural"],
    }),
    unique_key: &["codmun", "ano"],
    number_format: NumberFormat::PLAIN,
};

pub static PROJECTION: TableSchema = TableSchema {
    name: "projection",
    source_file: "pop/pop_projetada_ipardes_consolidada.csv",
    columns: &[
        Column::required("codmun", ColumnType::Integer),
        Column::new("nomemun", ColumnType::Text),
        Column::required("2010", ColumnType::Count),
        Column::required("2020", ColumnType::Count),
        Column::required("2030", ColumnType::Count),
        Column::required("2040", ColumnType::Count),
    ],
    melt: Some(MeltSpec {
        value_columns: &["2010", "2020", "2030", "2040"],
    }),
    unique_key: &["codmun"],
    number_format: NumberFormat::PLAIN,
};

pub static AGE_GROUPS: TableSchema = TableSchema {
    name: "age_groups",
    source_file: "pop/estruturaetaria.csv",
    columns: &[
        Column::required("codmun", ColumnType::Integer),
        Column::required("sexo", ColumnType::Text),
        Column::required("0 a 4 anos", ColumnType::Count),
        Column::required("5 a 9 anos", ColumnType::Count),
        Column::required("10 a 14 anos", ColumnType::Count),
        Column::required("15 a 19 anos", ColumnType::Count),
        Column::required("20 a 24 anos", ColumnType::Count),
        Column::required("25 a 29 anos", ColumnType::Count),
        Column::required("30 a 34 anos", ColumnType::Count),
        Column::required("35 a 39 anos", ColumnType::Count),
        Column::required("40 a 44 anos", ColumnType::Count),
        Column::required("45 a 49 anos", ColumnType::Count),
        Column::required("50 a 54 anos", ColumnType::Count),
        Column::required("55 a 59 anos", ColumnType::Count),
        Column::required("60 a 64 anos", ColumnType::Count),
        Column::required("65 a 69 anos", ColumnType::Count),
        Column::required("70 a 74 anos", ColumnType::Count),
        Column::required("75 a 79 anos", ColumnType::Count),
        Column::required("80 anos ou mais", ColumnType::Count),
    ],
    melt: Some(MeltSpec {
        value_columns: &[
            "0 a 4 anos",
            "5 a 9 anos",
            "10 a 14 anos",
            "15 a 19 anos",
            "20 a 24 anos",
            "25 a 29 anos",
            "30 a 34 anos",
            "35 a 39 anos",
            "40 a 44 anos",
            "45 a 49 anos",
            "50 a 54 anos",
            "55 a 59 anos",
            "60 a 64 anos",
            "65 a 69 anos",
            "70 a 74 anos",
            "75 a 79 anos",
            "80 anos ou mais",
        ],
    }),
    unique_key: &["codmun", "sexo"],
    number_format: NumberFormat::PLAIN,
};

pub static MUNICIPALITIES: TableSchema = TableSchema {
    name: "municipalities",
    source_file: "territorio/municipios_brasileiros.csv",
    columns: &[
        Column::required("cod", ColumnType::Integer),
        Column::required("municipio", ColumnType::Text),
        Column::required("uf", ColumnType::Text),
    ],
    melt: None,
    unique_key: &["cod"],
    number_format: NumberFormat::PLAIN,
};

/// IBGE "arranjos populacionais" table 1. Published with pt-BR number formatting.
pub static ARRANGEMENTS: TableSchema = TableSchema {
    name: "arrangements",
    source_file: "pop/arranjos populacionais/tab01.csv",
    columns: &[
        Column::required("CodArranjo", ColumnType::Integer),
        Column::required("Código do município", ColumnType::Integer),
    ],
    melt: None,
    unique_key: &["Código do município"],
    number_format: NumberFormat::PT_BR,
};

pub static ALL_TABLES: &[&TableSchema] = &[
    &MUNICIPALITIES,
    &POPULATION,
    &PROJECTION,
    &AGE_GROUPS,
    &ARRANGEMENTS,
];

/// Get a table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}

/// Get all table names
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
