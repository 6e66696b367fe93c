//! EQUATION field parsing.

use serde::{Deserialize, Serialize};

use keggraph_core::EquationShapeError;

pub const EQUATION_ARROW: &str = "<=>";

/// Reactant and product tokens, as written (coefficients are kept).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
}

pub fn parse_equation(field: &str) -> Result<Equation, EquationShapeError> {
    let sides: Vec<&str> = field.split(EQUATION_ARROW).collect();
    if sides.len() != 2 {
        return Err(EquationShapeError {
            sides: sides.len(),
            input: field.to_string(),
        });
    }
    Ok(Equation {
        reactants: side_tokens(sides[0]),
        products: side_tokens(sides[1]),
    })
}

fn side_tokens(side: &str) -> Vec<String> {
    side.split('+').map(|t| t.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_both_sides() {
        let eq = parse_equation("C00024 + C00001 <=> C00033 + C00010").unwrap();
        assert_eq!(eq.reactants, ["C00024", "C00001"]);
        assert_eq!(eq.products, ["C00033", "C00010"]);
    }

    #[test]
    fn keeps_coefficients() {
        let eq = parse_equation("2 C00027 <=> 2 C00001 + C00007").unwrap();
        assert_eq!(eq.reactants, ["2 C00027"]);
        assert_eq!(eq.products, ["2 C00001", "C00007"]);
    }

    #[test]
    fn wrong_side_count_is_reported() {
        let err = parse_equation("C00024 + C00001").unwrap_err();
        assert_eq!(err.sides, 1);
        let err = parse_equation("A <=> B <=> C").unwrap_err();
        assert_eq!(err.sides, 3);
    }
}
