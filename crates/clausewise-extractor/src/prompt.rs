//! Prompt descriptions and few-shot examples per document type
//!
//! Every `extraction_class` used below has an entry in the classifier table,
//! so example-following output always lands on a real clause type.

use clausewise_domain::{DocumentType, ExampleData, ExampleExtraction};
use serde_json::{json, Value};

/// Task description for a document type
pub fn description(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::Rental => RENTAL_PROMPT,
        DocumentType::Loan => LOAN_PROMPT,
        DocumentType::Tos => TOS_PROMPT,
    }
}

/// Few-shot examples for a document type
pub fn examples(document_type: DocumentType) -> Vec<ExampleData> {
    match document_type {
        DocumentType::Rental => rental_examples(),
        DocumentType::Loan => loan_examples(),
        DocumentType::Tos => tos_examples(),
    }
}

const RENTAL_PROMPT: &str = r#"Extract the legal clauses of the rental agreement below.
Identify the parties (lessor and lessee), the property, rent and other payments,
the security deposit, the lease duration, maintenance duties, termination and
notice terms, and the governing law.

Use exact text from the agreement for each extraction. Use the extraction
classes shown in the examples. Record structured attributes whenever the text
states them: party_role, monthly_rent, security_deposit, deposit_refundable,
start_date, end_date, notice_period_days, late_payment_penalty, governing_law,
jurisdiction, legal_requirement."#;

const LOAN_PROMPT: &str = r#"Extract the legal clauses of the loan agreement below.
Identify the parties (lender, borrower, guarantor), the loan amount and purpose,
the interest structure, the repayment schedule, collateral and security, events
of default, prepayment terms, and the governing law.

Use exact text from the agreement for each extraction. Use the extraction
classes shown in the examples. Record structured attributes whenever the text
states them: party_role, principal, interest_rate, emi_amount, start_date,
end_date, late_payment_penalty, notice_period_days, governing_law,
jurisdiction, legal_requirement."#;

const TOS_PROMPT: &str = r#"Extract the legal clauses of the terms of service below.
Identify the service provider and the user, the service being offered, the
user's obligations and acceptable use rules, fees, limitations of liability,
account termination, data and privacy terms, and dispute resolution.

Use exact text from the terms for each extraction. Use the extraction classes
shown in the examples. Record structured attributes whenever the text states
them: party_role, depends_on, notice_period_days, late_payment_penalty,
governing_law, jurisdiction, legal_requirement."#;

fn extraction(class: &str, text: &str, attributes: Value) -> ExampleExtraction {
    ExampleExtraction {
        extraction_class: class.to_string(),
        extraction_text: text.to_string(),
        attributes: match attributes {
            Value::Object(map) => map,
            _ => Default::default(),
        },
    }
}

fn rental_examples() -> Vec<ExampleData> {
    let text = "This Lease Agreement is made between Robert Hale (the \"Landlord\") and \
                Maria Chen (the \"Tenant\") for the apartment at 42 Elm Street, Unit 3B. \
                The lease begins on March 1, 2024 and ends on February 28, 2025. The Tenant \
                shall pay a monthly rent of $1,500 on the first day of each month; rent paid \
                after the fifth day incurs a late fee of $50. A refundable security deposit \
                of $3,000 is due at signing. The Landlord shall keep the plumbing and heating \
                in good repair. Either party may terminate this lease with 60 days written \
                notice. This agreement is governed by the laws of the State of Oregon.";

    vec![ExampleData {
        text: text.to_string(),
        extractions: vec![
            extraction(
                "party_lessor",
                "Robert Hale (the \"Landlord\")",
                json!({"party_role": "landlord", "name": "Robert Hale"}),
            ),
            extraction(
                "party_lessee",
                "Maria Chen (the \"Tenant\")",
                json!({"party_role": "tenant", "name": "Maria Chen"}),
            ),
            extraction(
                "property_description",
                "the apartment at 42 Elm Street, Unit 3B",
                json!({"address": "42 Elm Street, Unit 3B", "property_type": "apartment"}),
            ),
            extraction(
                "lease_duration",
                "The lease begins on March 1, 2024 and ends on February 28, 2025",
                json!({"start_date": "2024-03-01", "end_date": "2025-02-28"}),
            ),
            extraction(
                "financial_terms",
                "The Tenant shall pay a monthly rent of $1,500 on the first day of each month",
                json!({"monthly_rent": "$1,500", "due_day": 1}),
            ),
            extraction(
                "financial_terms",
                "rent paid after the fifth day incurs a late fee of $50",
                json!({"late_payment_penalty": "$50"}),
            ),
            extraction(
                "security_deposit",
                "A refundable security deposit of $3,000 is due at signing",
                json!({"security_deposit": "$3,000", "deposit_refundable": true}),
            ),
            extraction(
                "maintenance",
                "The Landlord shall keep the plumbing and heating in good repair",
                json!({"party_role": "landlord"}),
            ),
            extraction(
                "termination",
                "Either party may terminate this lease with 60 days written notice",
                json!({"notice_period_days": 60}),
            ),
            extraction(
                "governing_law",
                "This agreement is governed by the laws of the State of Oregon",
                json!({"governing_law": "State of Oregon"}),
            ),
        ],
    }]
}

fn loan_examples() -> Vec<ExampleData> {
    let text = "This Loan Agreement is entered into by First Harbor Bank (the \"Lender\") \
                and Daniel Okafor (the \"Borrower\"). The Lender agrees to lend the Borrower \
                the principal sum of $25,000 for the purchase of a vehicle. Interest accrues \
                at a fixed rate of 7.5% per annum. The Borrower shall repay the loan in 48 \
                equal monthly installments of $604.47 beginning June 1, 2024. Any installment \
                more than 15 days late incurs a penalty of 2% of the overdue amount. The loan \
                is secured by the purchased vehicle. Failure to pay two consecutive \
                installments constitutes an event of default, upon which the entire balance \
                becomes immediately due. This agreement is governed by the laws of the State \
                of New York.";

    vec![ExampleData {
        text: text.to_string(),
        extractions: vec![
            extraction(
                "party_lender",
                "First Harbor Bank (the \"Lender\")",
                json!({"party_role": "lender", "name": "First Harbor Bank"}),
            ),
            extraction(
                "party_borrower",
                "Daniel Okafor (the \"Borrower\")",
                json!({"party_role": "borrower", "name": "Daniel Okafor"}),
            ),
            extraction(
                "loan_amount",
                "the principal sum of $25,000 for the purchase of a vehicle",
                json!({"principal": "$25,000", "purpose": "vehicle purchase"}),
            ),
            extraction(
                "interest_structure",
                "Interest accrues at a fixed rate of 7.5% per annum",
                json!({"interest_rate": "7.5%", "rate_type": "fixed"}),
            ),
            extraction(
                "repayment_terms",
                "The Borrower shall repay the loan in 48 equal monthly installments of $604.47 beginning June 1, 2024",
                json!({"emi_amount": "$604.47", "tenure_months": 48, "start_date": "2024-06-01"}),
            ),
            extraction(
                "financial_terms",
                "Any installment more than 15 days late incurs a penalty of 2% of the overdue amount",
                json!({"late_payment_penalty": "2% of the overdue amount"}),
            ),
            extraction(
                "collateral",
                "The loan is secured by the purchased vehicle",
                json!({"collateral": "vehicle"}),
            ),
            extraction(
                "default_provisions",
                "Failure to pay two consecutive installments constitutes an event of default, upon which the entire balance becomes immediately due",
                json!({"depends_on": "two consecutive missed installments"}),
            ),
            extraction(
                "governing_law",
                "This agreement is governed by the laws of the State of New York",
                json!({"governing_law": "State of New York"}),
            ),
        ],
    }]
}

fn tos_examples() -> Vec<ExampleData> {
    let text = "These Terms of Service govern your use of the PhotoVault application \
                provided by Lumen Labs Inc. (\"we\", \"us\"). PhotoVault lets you store and \
                share photos online. You must be at least 13 years old and must not upload \
                content that infringes the rights of others. Premium plans are billed \
                monthly at $4.99. To the maximum extent permitted by law, our total \
                liability is limited to the amount you paid us in the preceding twelve \
                months. We may suspend or terminate your account with 30 days notice if you \
                violate these Terms. Any dispute will be resolved by binding arbitration in \
                San Francisco, California. We process personal data in accordance with the \
                GDPR.";

    vec![ExampleData {
        text: text.to_string(),
        extractions: vec![
            extraction(
                "party_service_provider",
                "Lumen Labs Inc. (\"we\", \"us\")",
                json!({"party_role": "service_provider", "name": "Lumen Labs Inc."}),
            ),
            extraction(
                "service_description",
                "PhotoVault lets you store and share photos online",
                json!({"service": "photo storage and sharing"}),
            ),
            extraction(
                "user_obligations",
                "You must be at least 13 years old and must not upload content that infringes the rights of others",
                json!({"party_role": "user", "minimum_age": 13}),
            ),
            extraction(
                "fees",
                "Premium plans are billed monthly at $4.99",
                json!({"fee": "$4.99", "billing_cycle": "monthly"}),
            ),
            extraction(
                "liability_limitation",
                "our total liability is limited to the amount you paid us in the preceding twelve months",
                json!({"liability_cap": "fees paid in preceding twelve months"}),
            ),
            extraction(
                "termination",
                "We may suspend or terminate your account with 30 days notice if you violate these Terms",
                json!({"notice_period_days": 30, "depends_on": "violation of the Terms"}),
            ),
            extraction(
                "dispute_resolution",
                "Any dispute will be resolved by binding arbitration in San Francisco, California",
                json!({"jurisdiction": "San Francisco, California"}),
            ),
            extraction(
                "data_privacy",
                "We process personal data in accordance with the GDPR",
                json!({"legal_requirement": "GDPR"}),
            ),
        ],
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::is_known_label;

    #[test]
    fn test_every_type_has_prompt_and_examples() {
        for doc_type in DocumentType::ALL {
            assert!(!description(doc_type).trim().is_empty());
            assert!(!examples(doc_type).is_empty());
        }
    }

    #[test]
    fn test_example_classes_are_in_classifier_table() {
        for doc_type in DocumentType::ALL {
            for example in examples(doc_type) {
                for extraction in &example.extractions {
                    assert!(
                        is_known_label(&extraction.extraction_class),
                        "unknown class '{}' in {} examples",
                        extraction.extraction_class,
                        doc_type
                    );
                }
            }
        }
    }

    #[test]
    fn test_example_spans_are_verbatim() {
        for doc_type in DocumentType::ALL {
            for example in examples(doc_type) {
                for extraction in &example.extractions {
                    assert!(
                        example.text.contains(&extraction.extraction_text),
                        "span '{}' not found in {} example text",
                        extraction.extraction_text,
                        doc_type
                    );
                }
            }
        }
    }
}
