use std::fmt;
use std::str::FromStr;

use super::errors::DomainError;

/// Brazilian federative unit (UF) codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateCode {
    Ac,
    Al,
    Ap,
    Am,
    Ba,
    Ce,
    Df,
    Es,
    Go,
    Ma,
    Mt,
    Ms,
    Mg,
    Pa,
    Pb,
    Pr,
    Pe,
    Pi,
    Rj,
    Rn,
    Rs,
    Ro,
    Rr,
    Sc,
    Sp,
    Se,
    To,
}

impl StateCode {
    pub const ALL: [StateCode; 27] = [
        StateCode::Ac,
        StateCode::Al,
        StateCode::Ap,
        StateCode::Am,
        StateCode::Ba,
        StateCode::Ce,
        StateCode::Df,
        StateCode::Es,
        StateCode::Go,
        StateCode::Ma,
        StateCode::Mt,
        StateCode::Ms,
        StateCode::Mg,
        StateCode::Pa,
        StateCode::Pb,
        StateCode::Pr,
        StateCode::Pe,
        StateCode::Pi,
        StateCode::Rj,
        StateCode::Rn,
        StateCode::Rs,
        StateCode::Ro,
        StateCode::Rr,
        StateCode::Sc,
        StateCode::Sp,
        StateCode::Se,
        StateCode::To,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateCode::Ac => "AC",
            StateCode::Al => "AL",
            StateCode::Ap => "AP",
            StateCode::Am => "AM",
            StateCode::Ba => "BA",
            StateCode::Ce => "CE",
            StateCode::Df => "DF",
            StateCode::Es => "ES",
            StateCode::Go => "GO",
            StateCode::Ma => "MA",
            StateCode::Mt => "MT",
            StateCode::Ms => "MS",
            StateCode::Mg => "MG",
            StateCode::Pa => "PA",
            StateCode::Pb => "PB",
            StateCode::Pr => "PR",
            StateCode::Pe => "PE",
            StateCode::Pi => "PI",
            StateCode::Rj => "RJ",
            StateCode::Rn => "RN",
            StateCode::Rs => "RS",
            StateCode::Ro => "RO",
            StateCode::Rr => "RR",
            StateCode::Sc => "SC",
            StateCode::Sp => "SP",
            StateCode::Se => "SE",
            StateCode::To => "TO",
        }
    }
}

impl FromStr for StateCode {
    type Err = DomainError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        StateCode::ALL
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown state code '{}'", code)))
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
