//! Text renderings of a decision rule.

use super::model::Model;

/// Compact label drawn next to a boundary: `0.4·feat1 + -0.4·feat2 + 0.6 ≥ 0`.
pub fn equation_label(model: &Model) -> String {
    format!(
        "{}·feat1 + {}·feat2 + {} ≥ 0",
        short_coefficient(model.w1),
        short_coefficient(model.w2),
        short_coefficient(model.c)
    )
}

/// Signed two-decimal rule used in update explanations:
/// `0.40·feat1 − 0.40·feat2 + 0.60 ≥ 0`.
pub fn signed_rule(model: &Model) -> String {
    let w2_sign = if model.w2 >= 0.0 { " + " } else { " − " };
    let c_sign = if model.c >= 0.0 { " + " } else { " − " };
    format!(
        "{:.2}·feat1{w2_sign}{:.2}·feat2{c_sign}{:.2} ≥ 0",
        model.w1,
        model.w2.abs(),
        model.c.abs()
    )
}

/// Round to two decimals and drop trailing zeros (`0.50` → `0.5`, `2.00` → `2`).
pub fn short_coefficient(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_coefficient_trims_zeros_only_after_decimal_point() {
        assert_eq!(short_coefficient(0.4), "0.4");
        assert_eq!(short_coefficient(2.0), "2");
        assert_eq!(short_coefficient(10.0), "10");
        assert_eq!(short_coefficient(0.0), "0");
        assert_eq!(short_coefficient(-0.001), "0");
        assert_eq!(short_coefficient(-0.456), "-0.46");
    }

    #[test]
    fn equation_label_for_default_model() {
        assert_eq!(
            equation_label(&Model::DEFAULT),
            "0.4·feat1 + -0.4·feat2 + 0.6 ≥ 0"
        );
    }

    #[test]
    fn signed_rule_uses_explicit_operators() {
        assert_eq!(
            signed_rule(&Model::DEFAULT),
            "0.40·feat1 − 0.40·feat2 + 0.60 ≥ 0"
        );
        assert_eq!(
            signed_rule(&Model::new(-1.0, 0.25, -0.5)),
            "-1.00·feat1 + 0.25·feat2 − 0.50 ≥ 0"
        );
    }
}
