//! Expense entry form.

use crate::forms::FormPhase;
use crate::models::{CreateExpenseDto, Expense};

const MSG_DESCRIPTION_REQUIRED: &str = "Необходимо указать описание";
const MSG_AMOUNT_POSITIVE: &str = "Сумма должна быть больше нуля";
const MSG_DATE_REQUIRED: &str = "Необходимо указать дату";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseErrors {
    pub description: Option<String>,
    pub amount: Option<String>,
    pub date: Option<String>,
}

impl ExpenseErrors {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.date.is_none()
    }
}

pub struct ExpenseForm {
    description: String,
    amount: f64,
    date: String,
    category: String,
    errors: ExpenseErrors,
    phase: FormPhase,
    editing_id: Option<i64>,
}

impl ExpenseForm {
    pub fn new() -> Self {
        Self {
            description: String::new(),
            amount: 0.0,
            date: String::new(),
            category: String::new(),
            errors: ExpenseErrors::default(),
            phase: FormPhase::Empty,
            editing_id: None,
        }
    }

    pub fn edit(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            amount: expense.amount,
            date: expense.date.clone(),
            category: expense.category.clone().unwrap_or_default(),
            errors: ExpenseErrors::default(),
            phase: FormPhase::Editing,
            editing_id: Some(expense.id),
        }
    }

    pub fn errors(&self) -> &ExpenseErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = value.to_string();
        if !value.trim().is_empty() {
            self.errors.description = None;
        }
        self.touch();
    }

    pub fn set_amount(&mut self, value: f64) {
        self.amount = value;
        if value > 0.0 {
            self.errors.amount = None;
        }
        self.touch();
    }

    pub fn set_date(&mut self, value: &str) {
        self.date = value.to_string();
        if !value.trim().is_empty() {
            self.errors.date = None;
        }
        self.touch();
    }

    pub fn set_category(&mut self, value: &str) {
        self.category = value.to_string();
        self.touch();
    }

    pub fn is_valid(&self) -> bool {
        !self.description.trim().is_empty() && self.amount > 0.0 && !self.date.trim().is_empty()
    }

    pub fn validate_all(&mut self) -> bool {
        self.errors = ExpenseErrors {
            description: self
                .description
                .trim()
                .is_empty()
                .then(|| MSG_DESCRIPTION_REQUIRED.to_string()),
            amount: (self.amount <= 0.0).then(|| MSG_AMOUNT_POSITIVE.to_string()),
            date: self
                .date
                .trim()
                .is_empty()
                .then(|| MSG_DATE_REQUIRED.to_string()),
        };
        self.errors.is_empty()
    }

    pub fn submit(&mut self) -> Option<CreateExpenseDto> {
        if !self.validate_all() {
            self.phase = FormPhase::Invalid;
            return None;
        }

        self.phase = FormPhase::Submitted;
        Some(CreateExpenseDto {
            description: self.description.clone(),
            amount: self.amount,
            date: self.date.clone(),
            category: (!self.category.trim().is_empty()).then(|| self.category.clone()),
        })
    }

    fn touch(&mut self) {
        self.phase = if self.is_valid() {
            FormPhase::Valid
        } else {
            FormPhase::Invalid
        };
    }
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self::new()
    }
}
