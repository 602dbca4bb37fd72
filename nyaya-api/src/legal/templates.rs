//! FIR and RTI document templates
//!
//! Templates are plain text. Missing detail fields render as empty strings so
//! a partially filled form still yields a printable draft.

use nyaya_common::models::{DocType, Language};
use std::collections::BTreeMap;

const RULE: &str = "════════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "────────────────────────────────────────────────────────────────";

/// Read-only view over the submitted form fields
struct Details<'a> {
    fields: &'a BTreeMap<String, String>,
    today: String,
}

impl<'a> Details<'a> {
    fn new(fields: &'a BTreeMap<String, String>) -> Self {
        Self {
            fields,
            today: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(|s| s.trim()).unwrap_or("")
    }

    fn get_or<'b>(&'b self, key: &str, default: &'b str) -> &'b str {
        match self.get(key) {
            "" => default,
            value => value,
        }
    }

    fn current_date(&self) -> &str {
        self.get_or("current_date", &self.today)
    }
}

/// Render a document of the given type
pub fn render_document(
    doc_type: DocType,
    language: Language,
    details: &BTreeMap<String, String>,
) -> String {
    let details = Details::new(details);
    let content = match doc_type {
        DocType::Fir => render_fir(&details, language),
        DocType::Rti => render_rti(&details, language),
    };
    content.trim().to_string()
}

fn render_fir(d: &Details<'_>, language: Language) -> String {
    let (current_date, place) = (d.current_date(), d.get("place"));
    let (name, age, address) = (d.get("name"), d.get("age"), d.get("address"));
    let (mobile, email) = (d.get("mobile"), d.get("email"));
    let (incident_date, incident_time) = (d.get("incident_date"), d.get("incident_time"));
    let incident_place = d.get("incident_place");
    let incident_description = d.get("incident_description");
    let accused_details = d.get("accused_details");
    let witness_details = d.get("witness_details");
    let evidence_list = d.get("evidence_list");

    if language == Language::Hi {
        format!(
            r#"
प्रथम सूचना रिपोर्ट (एफ.आई.आर.)
First Information Report (FIR)
{RULE}

रिपोर्ट दिनांक / Report Date: {current_date}
स्थान / Place: {place}

विवरण / DETAILS:
{THIN_RULE}

शिकायतकर्ता का नाम / Complainant Name: {name}
आयु / Age: {age}
पता / Address: {address}
मोबाइल / Mobile: {mobile}
ईमेल / Email: {email}

घटना की तारीख / Incident Date: {incident_date}
घटना का समय / Incident Time: {incident_time}
घटना का स्थान / Incident Place: {incident_place}

घटना का विवरण / Incident Description:
{incident_description}

आरोपित का विवरण / Accused Details:
{accused_details}

साक्षी का विवरण / Witness Details:
{witness_details}

साक्ष्य की सूची / Evidence List:
{evidence_list}

{RULE}
यह एफ.आई.आर. पुलिस स्टेशन में दर्ज की जाएगी।
This FIR will be filed with the Police Station.
"#
        )
    } else {
        format!(
            r#"
FIRST INFORMATION REPORT (FIR)
{RULE}

Report Date: {current_date}
Place: {place}

DETAILS:
{THIN_RULE}

Complainant Name: {name}
Age: {age}
Address: {address}
Mobile: {mobile}
Email: {email}

Incident Date: {incident_date}
Incident Time: {incident_time}
Incident Place: {incident_place}

Incident Description:
{incident_description}

Accused Details:
{accused_details}

Witness Details:
{witness_details}

Evidence List:
{evidence_list}

{RULE}
This FIR will be filed with the Police Station.
Complainant Signature: ___________________
Date: ___________________
"#
        )
    }
}

fn render_rti(d: &Details<'_>, language: Language) -> String {
    let current_date = d.current_date();
    let (name, address) = (d.get("name"), d.get("address"));
    let (mobile, email) = (d.get("mobile"), d.get("email"));
    let (question_1, question_2, question_3) =
        (d.get("question_1"), d.get("question_2"), d.get("question_3"));
    let period = d.get("period");
    let department_name = d.get("department_name");
    let department_address = d.get("department_address");
    let fee = d.get_or("fee", "10");
    let payment_mode = d.get_or("payment_mode", "Postal Order");

    if language == Language::Hi {
        format!(
            r#"
सूचना का अधिकार आवेदन / RIGHT TO INFORMATION (RTI) APPLICATION
{RULE}

आवेदन दिनांक / Application Date: {current_date}

आवेदनकर्ता का विवरण / APPLICANT DETAILS:
{THIN_RULE}

नाम / Name: {name}
पता / Address: {address}
मोबाइल / Mobile: {mobile}
ईमेल / Email: {email}

प्रश्न / QUESTIONS:
{THIN_RULE}

प्रश्न 1 / Question 1: {question_1}

प्रश्न 2 / Question 2: {question_2}

प्रश्न 3 / Question 3: {question_3}

सूचना की समयावधि / Period: {period}

विभाग का नाम / Department Name: {department_name}
विभाग का पता / Department Address: {department_address}

आवेदन शुल्क / Application Fee: ₹ {fee}
भुगतान माध्यम / Payment Mode: {payment_mode}

{RULE}
आवेदनकर्ता के हस्ताक्षर / Applicant Signature: ___________________
दिनांक / Date: ___________________

नोट: यह आवेदन संबंधित सरकारी विभाग में जमा किया जाएगा।
Note: This application will be submitted to the concerned government department.
"#
        )
    } else {
        format!(
            r#"
RIGHT TO INFORMATION (RTI) APPLICATION
{RULE}

Application Date: {current_date}

APPLICANT DETAILS:
{THIN_RULE}

Name: {name}
Address: {address}
Mobile: {mobile}
Email: {email}

QUESTIONS:
{THIN_RULE}

Question 1: {question_1}

Question 2: {question_2}

Question 3: {question_3}

Period: {period}

Department Name: {department_name}
Department Address: {department_address}

Application Fee: ₹ {fee}
Payment Mode: {payment_mode}

{RULE}
Applicant Signature: ___________________
Date: ___________________

Note: This application will be submitted to the concerned government department.
"#
        )
    }
}
