//! Rule-based answer generation
//!
//! Questions are matched against two keyword lists in a fixed order (soil
//! before pests) by case-insensitive substring search. The first category
//! that matches picks a canned reply in the requested language; everything
//! else gets the general help reply. Unknown language codes fall back to
//! English.

use crate::catalog::Language;

const SOIL_KEYWORDS: &[&str] = &[
    "soil",
    "fertilizer",
    "fertiliser",
    "nutrient",
    "manure",
    "compost",
    "मिट्टी",
    "खाद",
    "மண்",
    "உரம்",
];

const PEST_KEYWORDS: &[&str] = &[
    "pest",
    "insect",
    "disease",
    "aphid",
    "fungus",
    "कीट",
    "रोग",
    "பூச்சி",
    "நோய்",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    SoilHealth,
    PestManagement,
    General,
}

/// Pick the topic for a question. Soil keywords win over pest keywords.
pub fn classify(question: &str) -> Topic {
    let q = question.to_lowercase();
    if contains_any(&q, SOIL_KEYWORDS) {
        Topic::SoilHealth
    } else if contains_any(&q, PEST_KEYWORDS) {
        Topic::PestManagement
    } else {
        Topic::General
    }
}

/// Canned reply for `question` in `language`.
///
/// Never fails: codes outside the catalog get the English reply. Callers
/// reject unsupported codes before persisting anything.
pub fn generate_answer(question: &str, language: &str) -> &'static str {
    classify(question).reply(Language::from_code(language))
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

impl Topic {
    pub fn reply(self, language: Option<Language>) -> &'static str {
        let lang = language.unwrap_or(Language::English);
        match self {
            Topic::SoilHealth => soil_reply(lang),
            Topic::PestManagement => pest_reply(lang),
            Topic::General => general_reply(lang),
        }
    }
}

fn soil_reply(lang: Language) -> &'static str {
    match lang {
        Language::English => "Soil health: Test soil pH and organic carbon yearly. Use compost and balanced N-P-K based on test.",
        Language::Hindi => "मृदा स्वास्थ्य: हर साल pH और कार्बन की जाँच करें। परीक्षण के आधार पर संतुलित N-P-K और कंपोस्ट दें।",
        Language::Tamil => "மண் ஆரோக்கியம்: ஆண்டுதோறும் pH மற்றும் கார்பன் ச\u{0BC7}\u{0BBE}திக்கவும். ச\u{0BC7}\u{0BBE}தனை அடிப்படையில் N-P-K மற்றும் ச\u{0BC7}\u{0BBE}ழம் சேர்க்கவும்.",
        Language::Telugu => "నేల ఆరోగ్యం: ప్రతి సంవత్సరం pH మరియు కార్బన్ పరీక్షించండి. పరీక్ష ఆధారంగా సమతుల్య N-P-K మరియు కంపోస్ట్ వాడండి.",
        Language::Bengali => "মাটির স্বাস্থ্য: বছরে একবার pH ও কার্বন পরীক্ষা করুন। পরীক্ষার ভিত্তিতে সুষম N-P-K ও কম্পোস্ট দিন।",
        Language::Marathi => "मृदा आरोग्य: दरवर्षी pH आणि कार्बन तपासा. तपासणीवर आधारित संतुलित N-P-K आणि कंपोस्ट वापरा.",
        Language::Kannada => "ಮಣ್ಣಿನ ಆರೋಗ್ಯ: ವರ್ಷಕ್ಕೆ ಒಮ್ಮೆ pH ಮತ್ತು ಕಾರ್ಬನ್ ಪರೀಕ್ಷೆ ಮಾಡಿ. ಪರೀಕ್ಷೆಯ ಆಧಾರದ ಮೇಲೆ ಸಮತೋಲಿತ N-P-K ಮತ್ತು ಕೊಂಪೋಸ್ಟ್ ಬಳಸಿ.",
        Language::Malayalam => "മണ്ണിന്റെ ആരോഗ്യം: വർഷത്തിൽ ഒരിക്കൽ pH, കാർബൺ പരിശോധിക്കുക. പരിശോധനയെ അടിസ്ഥാനപ്പെടുത്തി N-P-K, കമ്പോസ്റ്റ് നൽകുക.",
        Language::Punjabi => "ਮਿੱਟੀ ਸਿਹਤ: ਸਾਲਾਨਾ pH ਤੇ ਕਾਰਬਨ ਦੀ ਜਾਂਚ ਕਰੋ। ਟੈਸਟ ਦੇ ਆਧਾਰ 'ਤੇ ਸੰਤੁਲਿਤ N-P-K ਤੇ ਕੰਪੋਸਟ ਦਿਓ।",
        Language::Gujarati => "માટીની તંદુરસ્તી: દર વર્ષે pH અને કાર્બન તપાસો. પરીક્ષણના આધારે સંતુલિત N-P-K અને કમ્પોસ્ટ આપો.",
    }
}

fn pest_reply(lang: Language) -> &'static str {
    match lang {
        Language::English => "Pest management: Start with field scouting and traps. Prefer IPM: resistant varieties, crop rotation, botanicals.",
        Language::Hindi => "कीट प्रबंधन: फसल निरीक्षण और ट्रैप से शुरू करें। IPM अपनाएँ: रोग-रोधी किस्में, फसल चक्र, वनस्पति कीटनाशक।",
        Language::Tamil => "பூச்சி மேலாண்மை: வயல் கண்காணிப்பு, கண்ணிகள் மூலம் தொடங்கவும். IPM: நோய் எதிர்ப்பு வகைகள், பயிர் சுழற்சி, மூலிகை பூச்சிக்கொல்லிகள்.",
        Language::Telugu => "పురుగు నిర్వహణ: క్షేత్ర పరిశీలన, ట్రాప్స్ తో ప్రారంభించండి. IPM: నిరోధక రకాలు, పంట మార్పిడి, బోటానికల్స్.",
        Language::Bengali => "পোকার দমন: মাঠ পর্যবেক্ষণ ও ফাঁদ দ\u{09BF}\u{09DF}\u{09C7} শুরু করুন। IPM: রোগ-প্রতিরোধী জাত, শস্য পর্য\u{09BE}\u{09DF}\u{0995}্রম, উদ্ভিজ কীটনাশক।",
        Language::Marathi => "कीड व्यवस्थापन: शेत तपासणी, सापळ्यांपासून सुरुवात करा. IPM: प्रतिरोधक वाण, पीक फेरपालट, वनस्पतीजन्य कीटकनाशके.",
        Language::Kannada => "ಕೀಟ ನಿರ್ವಹಣೆ: ಕ್ಷೇತ್ರ ಪರಿಶೀಲನೆ, ಬೋನುಗಳಿಂದ ಆರಂಭಿಸಿ. IPM: ಪ್ರತಿರೋಧಕ ಜಾತಿಗಳು, ಬೆಳೆ ಬದಲಾವಣೆ, ಸಸ್ಯನಾಶಕಗಳು.",
        Language::Malayalam => "കീടനാശനം: വയൽ നിരീക്ഷണവും കുടകളുമായി തുടങ്ങുക. IPM: രോഗപ്രതിരോധ ഇനങ്ങൾ, വിളപരിവർത്തനം, സസ്യാധിഷ്ഠിത കീടനാശിനികൾ.",
        Language::Punjabi => "ਕੀਟ ਪ੍ਰਬੰਧਨ: ਖੇਤ ਦੀ ਜਾਂਚ ਤੇ ਫੰਧਿਆਂ ਨਾਲ ਸ਼ੁਰੂ ਕਰੋ। IPM: ਰੋਗ-ਰੋਧੀ ਕਿਸਮਾਂ, ਫਸਲ ਚੱਕਰ, ਬੋਟੈਨਿਕਲ ਕੀਟਨਾਸ਼ਕ।",
        Language::Gujarati => "કીડ સંચાલન: ખેતર નિરીક્ષણ અને ટ્રેપથી શરૂઆત કરો. IPM: રોગપ્રતિરોધક જાતો, પાક ફરતી, બોટેનિકલ્સ.",
    }
}

fn general_reply(lang: Language) -> &'static str {
    match lang {
        Language::English => "I can help with crop choice, soil, irrigation, pest control and local best practices. Please share location, crop and issue.",
        Language::Hindi => "मैं फसल चयन, मिट्टी, सिंचाई, कीट नियंत्रण और स्थानीय सर्वोत्तम उपायों में मदद कर सकता हूँ। कृपया स्थान, फसल और समस्या बताएं।",
        Language::Tamil => "பயிர் தேர்வு, மண், பாசனம், பூச்சி கட்டுப்பாடு மற்றும் உள்ளூர் சிறந்த நடைமுறைகளில் உதவலாம். இடம், பயிர், சிக்கலை பகிரவும்.",
        Language::Telugu => "పంట ఎంపిక, నేల, సాగు, పురుగు నియంత్రణలో సహాయం చేస్తాను. దయచేసి ప్రదేశం, పంట, సమస్య చెప్పండి.",
        Language::Bengali => "ফসল নির্বাচন, মাটি, সেচ, পোকা দমন ইত্যাদিতে আমি সাহায্য করতে পারি। অনুগ্রহ করে স্থান, ফসল ও সমস্যা বলুন।",
        Language::Marathi => "पीक निवड, माती, सिंचन, किड नियंत्रण याबाबत मी मदत करू शकतो. कृपया ठिकाण, पीक आणि समस्या सांगा.",
        Language::Kannada => "ಬೆಳೆ ಆಯ್ಕೆ, ಮಣ್ಣು, ನೀರಾವರಿ, ಕೀಟ ನಿಯಂತ್ರಣದಲ್ಲಿ ನಾನು ಸಹಾಯ ಮಾಡುತ್ತ\u{0CC6}\u{0CD5}ನೆ. ದಯವಿಟ್ಟು ಸ್ಥಳ, ಬೆಳೆ ಮತ್ತು ಸಮಸ್ಯೆ ಹಂಚಿಕೊಳ್ಳಿ.",
        Language::Malayalam => "വിള തിരഞ്ഞെടുപ്പ്, മണ്ണ്, ജലസേചനം, കീടനിയന്ത്രണം എന്നിവയിൽ ഞാൻ സഹായിക്കും. സ്ഥലം, വിള, പ്രശ്നം പറയുക.",
        Language::Punjabi => "ਫਸਲ ਚੋਣ, ਮਿੱਟੀ, ਸਿੰਚਾਈ, ਕੀਟ ਨਿਯੰਤਰਣ ਵਿੱਚ ਮੈਂ ਮਦਦ ਕਰ ਸਕਦਾ ਹਾਂ। ਕਿਰਪਾ ਕਰਕੇ ਥਾਂ, ਫਸਲ ਅਤੇ ਮੁੱਦਾ ਦੱਸੋ।",
        Language::Gujarati => "હું પાક પસંદગી, માટી, સિંચાઈ, કીડ નિયંત્રણમાં મદદ કરી શકું છું. કૃપા કરવા સ્થળ, પાક અને સમસ્યા જણાવો.",
    }
}
