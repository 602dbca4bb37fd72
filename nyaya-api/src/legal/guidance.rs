//! Canned guidance per category and language

use nyaya_common::models::{Category, Language};

/// Answer returned when a recording contains no recognisable speech
pub const NO_SPEECH_ANSWER: &str = "No speech detected. Please try again.";

const FIR_EN: &str = "To file an FIR (First Information Report) with the police:\n\
1. Visit the nearest police station\n\
2. Provide written or oral complaint\n\
3. Police will record your statement\n\
4. You'll receive an FIR number\n\
5. Keep this number for reference in legal proceedings";

const FIR_HI: &str = "पुलिस के साथ एफआईआर (प्रथम सूचना रिपोर्ट) दर्ज करने के लिए:\n\
1. निकटतम पुलिस स्टेशन जाएं\n\
2. लिखित या मौखिक शिकायत दें\n\
3. पुलिस आपका बयान दर्ज करेगी\n\
4. आपको एफआईआर नंबर मिलेगा\n\
5. कानूनी कार्यवाही में इस नंबर को रखें";

const RTI_EN: &str = "Right to Information (RTI) Act allows you to:\n\
1. Request government information\n\
2. File RTI application at the concerned office\n\
3. Pay applicable fees (usually ₹10)\n\
4. Response required within 30 days\n\
5. Appeal if information is denied";

const RTI_HI: &str = "सूचना का अधिकार (आरटीआई) अधिनियम आपको अनुमति देता है:\n\
1. सरकारी जानकारी का अनुरोध करें\n\
2. संबंधित कार्यालय में आरटीआई आवेदन दाखिल करें\n\
3. लागू शुल्क का भुगतान करें (आमतौर पर ₹10)\n\
4. 30 दिनों के भीतर प्रतिक्रिया आवश्यक है\n\
5. यदि जानकारी से इनकार किया जाए तो अपील करें";

const CONSUMER_EN: &str = "Consumer Protection remedies:\n\
1. File complaint with District Consumer Commission\n\
2. Report to local consumer forum\n\
3. Provide purchase proof and defect details\n\
4. File within 2 years of purchase\n\
5. Compensation may include price refund + damages";

const CONSUMER_HI: &str = "उपभोक्ता संरक्षण उपाय:\n\
1. जिला उपभोक्ता आयोग में शिकायत दर्ज करें\n\
2. स्थानीय उपभोक्ता मंच को रिपोर्ट करें\n\
3. खरीद प्रमाण और दोष विवरण प्रदान करें\n\
4. खरीद के 2 साल के भीतर फाइल करें\n\
5. मुआवजे में मूल्य की वापसी + हर्जाना शामिल हो सकता है";

const GENERAL_EN: &str = "For legal assistance:\n\
1. Consult with qualified legal advocate\n\
2. Legal aid available for poor citizens\n\
3. Contact state bar association\n\
4. Visit district courts for free services\n\
5. Document all relevant evidence";

const GENERAL_HI: &str = "कानूनी सहायता के लिए:\n\
1. योग्य कानूनी वकील से परामर्श लें\n\
2. गरीब नागरिकों के लिए कानूनी सहायता उपलब्ध है\n\
3. राज्य बार एसोसिएशन से संपर्क करें\n\
4. मुफ्त सेवाओं के लिए जिला अदालतों में जाएं\n\
5. सभी प्रासंगिक साक्ष्य दस्तावेज़ करें";

/// Guidance text for a category in the requested language.
///
/// Pairs without curated text (Telugu, property, marriage, employment) fall
/// back to the general English guidance.
pub fn guidance(category: Category, language: Language) -> &'static str {
    match (category, language) {
        (Category::Fir, Language::En) => FIR_EN,
        (Category::Fir, Language::Hi) => FIR_HI,
        (Category::Rti, Language::En) => RTI_EN,
        (Category::Rti, Language::Hi) => RTI_HI,
        (Category::Consumer, Language::En) => CONSUMER_EN,
        (Category::Consumer, Language::Hi) => CONSUMER_HI,
        (Category::General, Language::Hi) => GENERAL_HI,
        _ => GENERAL_EN,
    }
}
