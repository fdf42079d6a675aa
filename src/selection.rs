//! Sidebar-style selection: state, then municipality, then IBGE code.

use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};

use crate::error::{DataError, DataResult};
use crate::model::MunicipalityRef;

/// A Brazilian federative unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// IBGE state code, the first two digits of every municipality code
    pub code: u8,
    pub uf: &'static str,
    pub name: &'static str,
}

const STATES: [State; 27] = [
    State { code: 11, uf: "RO", name: "Rondônia" },
    State { code: 12, uf: "AC", name: "Acre" },
    State { code: 13, uf: "AM", name: "Amazonas" },
    State { code: 14, uf: "RR", name: "Roraima" },
    State { code: 15, uf: "PA", name: "Pará" },
    State { code: 16, uf: "AP", name: "Amapá" },
    State { code: 17, uf: "TO", name: "Tocantins" },
    State { code: 21, uf: "MA", name: "Maranhão" },
    State { code: 22, uf: "PI", name: "Piauí" },
    State { code: 23, uf: "CE", name: "Ceará" },
    State { code: 24, uf: "RN", name: "Rio Grande do Norte" },
    State { code: 25, uf: "PB", name: "Paraíba" },
    State { code: 26, uf: "PE", name: "Pernambuco" },
    State { code: 27, uf: "AL", name: "Alagoas" },
    State { code: 28, uf: "SE", name: "Sergipe" },
    State { code: 29, uf: "BA", name: "Bahia" },
    State { code: 31, uf: "MG", name: "Minas Gerais" },
    State { code: 32, uf: "ES", name: "Espírito Santo" },
    State { code: 33, uf: "RJ", name: "Rio de Janeiro" },
    State { code: 35, uf: "SP", name: "São Paulo" },
    State { code: 41, uf: "PR", name: "Paraná" },
    State { code: 42, uf: "SC", name: "Santa Catarina" },
    State { code: 43, uf: "RS", name: "Rio Grande do Sul" },
    State { code: 50, uf: "MS", name: "Mato Grosso do Sul" },
    State { code: 51, uf: "MT", name: "Mato Grosso" },
    State { code: 52, uf: "GO", name: "Goiás" },
    State { code: 53, uf: "DF", name: "Distrito Federal" },
];

static STATES_BY_CODE: Lazy<HashMap<u8, State>> =
    Lazy::new(|| STATES.iter().map(|s| (s.code, *s)).collect());

/// State of a municipality, from the first two digits of its 7-digit IBGE code
pub fn state_of(code: u32) -> DataResult<State> {
    let prefix = u8::try_from(code / 100_000).ok();
    prefix
        .and_then(|p| STATES_BY_CODE.get(&p).copied())
        .ok_or_else(|| DataError::no_data(code, "not a valid IBGE municipality code"))
}

/// Distinct UFs of the reference table, sorted
pub fn states(refs: &[MunicipalityRef]) -> Vec<String> {
    refs.iter()
        .map(|r| r.state.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Municipality names of a UF, in table order
pub fn municipalities_in_state<'a>(refs: &'a [MunicipalityRef], uf: &str) -> Vec<&'a str> {
    refs.iter()
        .filter(|r| r.state.eq_ignore_ascii_case(uf))
        .map(|r| r.name.as_str())
        .collect()
}

/// IBGE code of the municipality named `name` in `uf`
pub fn municipality_code(refs: &[MunicipalityRef], uf: &str, name: &str) -> DataResult<u32> {
    refs.iter()
        .find(|r| r.state.eq_ignore_ascii_case(uf) && r.name == name)
        .map(|r| r.code)
        .ok_or_else(|| DataError::UnknownMunicipality {
            uf: uf.to_uppercase(),
            name: name.to_string(),
        })
}

pub fn municipality_name(refs: &[MunicipalityRef], code: u32) -> DataResult<&str> {
    find_municipality(refs, code).map(|r| r.name.as_str())
}

pub fn find_municipality(refs: &[MunicipalityRef], code: u32) -> DataResult<&MunicipalityRef> {
    refs.iter()
        .find(|r| r.code == code)
        .ok_or_else(|| DataError::no_data(code, "not in the municipality reference table"))
}
