use temple_admin_api::{ReportKind, ReportLanguage, TransactionType};

/// Report wording for one language.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub organisation: &'static str,
    pub transactions_title: &'static str,
    pub summary_title: &'static str,
    pub category_title: &'static str,
    pub monthly_title: &'static str,
    pub generated: &'static str,
    pub filters: &'static str,
    pub all_records: &'static str,
    pub date: &'static str,
    pub receipt: &'static str,
    pub kind: &'static str,
    pub category: &'static str,
    pub sub_category: &'static str,
    pub description: &'static str,
    pub party: &'static str,
    pub amount: &'static str,
    pub count: &'static str,
    pub metric: &'static str,
    pub month: &'static str,
    pub income: &'static str,
    pub expense: &'static str,
    pub total_income: &'static str,
    pub total_expense: &'static str,
    pub net: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub donation: &'static str,
    pub expense_type: &'static str,
    pub utilities: &'static str,
    pub salary: &'static str,
    pub rent_income: &'static str,
}

pub const ENGLISH: Labels = Labels {
    organisation: "Shri Temple Trust",
    transactions_title: "Transaction Report",
    summary_title: "Summary Report",
    category_title: "Category-wise Report",
    monthly_title: "Monthly Report",
    generated: "Generated",
    filters: "Filters",
    all_records: "All records",
    date: "Date",
    receipt: "Receipt No.",
    kind: "Type",
    category: "Category",
    sub_category: "Sub-category",
    description: "Description",
    party: "Name",
    amount: "Amount",
    count: "Count",
    metric: "Item",
    month: "Month",
    income: "Income",
    expense: "Expense",
    total_income: "Total income",
    total_expense: "Total expense",
    net: "Net",
    from: "From",
    to: "To",
    donation: "Donation",
    expense_type: "Expense",
    utilities: "Utilities",
    salary: "Salary",
    rent_income: "Rent income",
};

pub const MARATHI: Labels = Labels {
    organisation: "श्री मंदिर ट्रस्ट",
    transactions_title: "व्यवहार अहवाल",
    summary_title: "सारांश अहवाल",
    category_title: "वर्गनिहाय अहवाल",
    monthly_title: "मासिक अहवाल",
    generated: "तयार केल्याची वेळ",
    filters: "निकष",
    all_records: "सर्व नोंदी",
    date: "दिनांक",
    receipt: "पावती क्र.",
    kind: "प्रकार",
    category: "वर्ग",
    sub_category: "उपवर्ग",
    description: "तपशील",
    party: "नाव",
    amount: "रक्कम",
    count: "संख्या",
    metric: "बाब",
    month: "महिना",
    income: "उत्पन्न",
    expense: "खर्च",
    total_income: "एकूण उत्पन्न",
    total_expense: "एकूण खर्च",
    net: "निव्वळ",
    from: "पासून",
    to: "पर्यंत",
    donation: "देणगी",
    expense_type: "खर्च",
    utilities: "वीज व पाणी",
    salary: "पगार",
    rent_income: "भाडे उत्पन्न",
};

impl Labels {
    pub fn for_language(language: ReportLanguage) -> &'static Labels {
        match language {
            ReportLanguage::En => &ENGLISH,
            ReportLanguage::Mr => &MARATHI,
        }
    }

    pub fn title(&self, kind: ReportKind) -> &'static str {
        match kind {
            ReportKind::Transactions => self.transactions_title,
            ReportKind::Summary => self.summary_title,
            ReportKind::Category => self.category_title,
            ReportKind::Monthly => self.monthly_title,
        }
    }

    pub fn transaction_type(&self, transaction_type: TransactionType) -> &'static str {
        match transaction_type {
            TransactionType::Donation => self.donation,
            TransactionType::Expense => self.expense_type,
            TransactionType::Utilities => self.utilities,
            TransactionType::Salary => self.salary,
            TransactionType::RentIncome => self.rent_income,
        }
    }

    /// Label for a criterion key produced by `filter::describe`.
    pub fn criterion(&self, key: &str) -> &'static str {
        match key {
            "type" => self.kind,
            "category" => self.category,
            "sub_category" => self.sub_category,
            "month" => self.month,
            "from" => self.from,
            _ => self.to,
        }
    }
}
