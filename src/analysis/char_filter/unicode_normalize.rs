use unicode_normalization::UnicodeNormalization;

use super::CharFilter;

/// Supported Unicode normalization forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationForm {
    NFC,
    NFD,
    NFKC,
    NFKD,
}

/// A char filter that performs Unicode normalization.
///
/// Vietnamese input arrives both precomposed and with combining tone marks;
/// composing first makes `phở` typed either way the same term.
#[derive(Debug, Clone, Copy)]
pub struct UnicodeNormalizeCharFilter {
    form: NormalizationForm,
}

impl UnicodeNormalizeCharFilter {
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }
}

impl Default for UnicodeNormalizeCharFilter {
    fn default() -> Self {
        Self::new(NormalizationForm::NFC)
    }
}

impl CharFilter for UnicodeNormalizeCharFilter {
    fn filter(&self, input: &str) -> String {
        match self.form {
            NormalizationForm::NFC => input.nfc().collect(),
            NormalizationForm::NFD => input.nfd().collect(),
            NormalizationForm::NFKC => input.nfkc().collect(),
            NormalizationForm::NFKD => input.nfkd().collect(),
        }
    }

    fn name(&self) -> &'static str {
        "unicode_normalize"
    }
}
