use unicode_normalization::UnicodeNormalization as _;

/// Reduce text to a comparison key: NFKD-decompose, drop anything outside
/// ASCII (which removes combining accents), keep only letters and digits,
/// lowercase.
///
/// `"Razão Social"` and `"RAZAO_SOCIAL"` both become `"razaosocial"`.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.nfkd()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize_text("Razão Social"), "razaosocial");
        assert_eq!(normalize_text("RAZAO SOCIAL"), "razaosocial");
        assert_eq!(normalize_text("Endereço"), "endereco");
    }

    #[test]
    fn strips_punctuation_and_whitespace() {
        assert_eq!(normalize_text("CPF/CNPJ"), "cpfcnpj");
        assert_eq!(normalize_text(" Cpf_Cnpj "), "cpfcnpj");
        assert_eq!(normalize_text("12.345.678/0001-99"), "12345678000199");
    }

    #[test]
    fn compatibility_forms_fold_to_ascii() {
        // Fullwidth letters decompose to ASCII under NFKD.
        assert_eq!(normalize_text("ＣＰＦ"), "cpf");
    }

    #[test]
    fn non_latin_text_normalizes_to_empty() {
        assert_eq!(normalize_text("名前"), "");
        assert_eq!(normalize_text(""), "");
    }
}
