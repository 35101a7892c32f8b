//! Language catalog
//!
//! Fixed set of languages the assistant answers in. Each language carries a
//! system prompt for future prompt construction; the catalog doubles as the
//! allow-list every request language is validated against.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "kn")]
    Kannada,
    #[serde(rename = "ml")]
    Malayalam,
    #[serde(rename = "pa")]
    Punjabi,
    #[serde(rename = "gu")]
    Gujarati,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Language::English,
        Language::Hindi,
        Language::Tamil,
        Language::Telugu,
        Language::Bengali,
        Language::Marathi,
        Language::Kannada,
        Language::Malayalam,
        Language::Punjabi,
        Language::Gujarati,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Bengali => "bn",
            Language::Marathi => "mr",
            Language::Kannada => "kn",
            Language::Malayalam => "ml",
            Language::Punjabi => "pa",
            Language::Gujarati => "gu",
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            Language::English => "You are an agriculture assistant. Answer clearly and practically.",
            Language::Hindi => "आप एक कृषि सहायक हैं। स्पष्ट और व्यावहारिक उत्तर दें।",
            Language::Tamil => "நீங்கள் ஒரு வேளாண் உதவியாளர். தெளிவாகவும் நடைமுறையாகவும் பதிலளிக்கவும்.",
            Language::Telugu => "మీరు వ్యవసాయ సహాయకులు. స్పష్టంగా మరియు ఆచరణాత్మకంగా సమాధానం ఇవ్వండి.",
            Language::Bengali => "আপনি একজন কৃষি সহকারী। পরিষ্কার এবং ব্যবহারিকভাবে উত্তর দিন।",
            Language::Marathi => "तुम्ही कृषी सहाय्यक आहात. स्पष्ट आणि व्यावहारिक उत्तर द्या.",
            Language::Kannada => "ನೀವು ಕೃಷಿ ಸಹಾಯಕರು. ಸ್ಪಷ್ಟವಾಗಿ ಮತ್ತು ಪ್ರಾಯೋಗಿಕವಾಗಿ ಉತ್ತರಿಸಿ.",
            Language::Malayalam => "നിങ്ങൾ ഒരു കൃഷി സഹായിയാണ്. വ്യക്തമായും പ്രായോഗികമായും മറുപടി നൽകുക.",
            Language::Punjabi => "ਤੁਸੀਂ ਖੇਤੀਬਾੜੀ ਸਹਾਇਕ ਹੋ। ਸਪ\u{0A71}\u{0A36}\u{0A1F} ਅਤੇ ਵਿਹਾਰਕ ਜਵਾਬ ਦਿਓ।",
            Language::Gujarati => "તમે કૃષિ સહાયક છો. સ્પષ્ટ અને વ્યવહારુ જવાબ આપો.",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

pub fn is_supported(code: &str) -> bool {
    Language::from_code(code).is_some()
}

pub fn system_prompt(code: &str) -> Option<&'static str> {
    Language::from_code(code).map(Language::system_prompt)
}

/// Supported language codes, sorted ascending.
pub fn supported_codes() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = Language::ALL.iter().map(|lang| lang.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_codes_sorted_and_complete() {
        let codes = supported_codes();
        assert_eq!(
            codes,
            vec!["bn", "en", "gu", "hi", "kn", "ml", "mr", "pa", "ta", "te"]
        );
    }

    #[test]
    fn test_from_code_round_trips_every_language() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
            assert!(is_supported(lang.code()));
        }
    }

    #[test]
    fn test_unknown_codes_rejected() {
        for code in ["fr", "", "EN", "hin", " en"] {
            assert!(!is_supported(code), "{:?} should not be supported", code);
            assert!(system_prompt(code).is_none());
        }
    }

    #[test]
    fn test_system_prompts_present() {
        assert_eq!(
            system_prompt("en"),
            Some("You are an agriculture assistant. Answer clearly and practically.")
        );
        for lang in Language::ALL {
            assert!(!lang.system_prompt().is_empty());
        }
    }

    const PROMPT_TEXT: [(&str, &str); 10] = [
        ("en", "You are an agriculture assistant. Answer clearly and practically."),
        ("hi", "आप एक कृषि सहायक हैं। स्पष्ट और व्यावहारिक उत्तर दें।"),
        ("ta", "நீங்கள் ஒரு வேளாண் உதவியாளர். தெளிவாகவும் நடைமுறையாகவும் பதிலளிக்கவும்."),
        ("te", "మీరు వ్యవసాయ సహాయకులు. స్పష్టంగా మరియు ఆచరణాత్మకంగా సమాధానం ఇవ్వండి."),
        ("bn", "আপনি একজন কৃষি সহকারী। পরিষ্কার এবং ব্যবহারিকভাবে উত্তর দিন।"),
        ("mr", "तुम्ही कृषी सहाय्यक आहात. स्पष्ट आणि व्यावहारिक उत्तर द्या."),
        ("kn", "ನೀವು ಕೃಷಿ ಸಹಾಯಕರು. ಸ್ಪಷ್ಟವಾಗಿ ಮತ್ತು ಪ್ರಾಯೋಗಿಕವಾಗಿ ಉತ್ತರಿಸಿ."),
        ("ml", "നിങ്ങൾ ഒരു കൃഷി സഹായിയാണ്. വ്യക്തമായും പ്രായോഗികമായും മറുപടി നൽകുക."),
        ("pa", "ਤੁਸੀਂ ਖੇਤੀਬਾੜੀ ਸਹਾਇਕ ਹੋ। ਸਪ\u{0A71}\u{0A36}\u{0A1F} ਅਤੇ ਵਿਹਾਰਕ ਜਵਾਬ ਦਿਓ।"),
        ("gu", "તમે કૃષિ સહાયક છો. સ્પષ્ટ અને વ્યવહારુ જવાબ આપો."),
    ];

    #[test]
    fn test_system_prompts_match_published_text() {
        for (code, text) in PROMPT_TEXT {
            assert_eq!(system_prompt(code), Some(text), "prompt for {}", code);
        }
    }

    #[test]
    fn test_punjabi_prompt_keeps_shin_code_point() {
        let pa = system_prompt("pa").unwrap();
        assert!(pa.contains('\u{0A36}'));
        assert!(!pa.contains("\u{0A38}\u{0A3C}"));
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_value(Language::Tamil).unwrap(), "ta");
        let parsed: Language = serde_json::from_str("\"gu\"").unwrap();
        assert_eq!(parsed, Language::Gujarati);
        assert!(serde_json::from_str::<Language>("\"fr\"").is_err());
    }
}
